//! Topology construction from a building description.
//!
//! Runs once at startup. Any reference to an undeclared room, zone, or
//! material is a configuration error and aborts construction.

use crate::error::{GraphError, GraphResult};
use crate::portal::Portal;
use crate::stack::{loop_fluid_thickness_in, Assembly, ZoneStack};
use crate::world::World;
use rh_building::{validate_description, AssemblyDef, BuildingDescription, RoomDef};
use rh_core::VolumeId;
use tracing::{info, warn};

/// Extent of the boundary volumes: large enough that their temperature is
/// effectively constant over any simulation.
const BOUNDARY_EXTENT_FT: f64 = 10_000.0;

pub struct TopologyBuilder;

impl TopologyBuilder {
    /// Build the world graph and per-zone hydronic stacks.
    pub fn build(description: &BuildingDescription) -> GraphResult<(World, Vec<ZoneStack>)> {
        validate_description(description)?;

        let mut world = World::new();
        let boundary = [BOUNDARY_EXTENT_FT; 3];
        let world_id = world.add("world", boundary, "air", description.defaults.outside_temp_f)?;
        let ground_id = world.add("ground", boundary, "soil", description.defaults.ground_temp_f)?;
        world.contain(world_id, ground_id)?;

        for room in &description.rooms {
            let id = world.add(
                room.name.clone(),
                room.size,
                "air",
                description.initial_temp_f(room),
            )?;
            world.contain(world_id, id)?;
        }

        Self::connect_walls(description, &mut world, world_id)?;
        Self::connect_roofs(description, &mut world, world_id)?;
        Self::connect_openings(description, &mut world, world_id)?;
        let stacks = Self::build_zone_stacks(description, &mut world, world_id, ground_id)?;

        info!(
            volumes = world.len(),
            zones = stacks.len(),
            "topology constructed"
        );
        Ok((world, stacks))
    }

    /// Connect each wall segment, netting out openings that share the same
    /// room-and-destination pair so insulated area is not double-counted.
    fn connect_walls(
        description: &BuildingDescription,
        world: &mut World,
        world_id: VolumeId,
    ) -> GraphResult<()> {
        for wall in &description.walls {
            let room_id = require_volume(world, &wall.room, "wall")?;
            let onto = if wall.onto == "world" {
                world_id
            } else {
                require_volume(world, &wall.onto, "wall destination")?
            };
            let r = require_r(description, &wall.material, "wall")?;

            let [mut width, height] = wall.size;
            if wall.onto == "world" {
                for opening in description.windows.iter().chain(&description.doors) {
                    if opening.room == wall.room {
                        width -= opening.size[0] * opening.size[1] / height;
                    }
                }
            }
            let width = width.max(0.0);
            let area = width * height;
            if area <= 0.0 {
                warn!(
                    room = %wall.room,
                    label = %wall.label,
                    "wall fully consumed by openings; skipping"
                );
                continue;
            }

            info!(
                room = %wall.room,
                onto = %wall.onto,
                label = %wall.label,
                material = %wall.material,
                area_ft2 = area,
                "wall"
            );
            world.connect(
                room_id,
                Portal::new(
                    format!(
                        "{}/{} Wall {}, {}",
                        wall.room, wall.onto, wall.label, wall.material
                    ),
                    onto,
                    area,
                    r,
                    0.0,
                )?,
            )?;
        }
        Ok(())
    }

    /// Declared roofs connect as given; rooms without one get a default
    /// roof, except joist rooms (their ceiling is another heated floor,
    /// not the sky).
    fn connect_roofs(
        description: &BuildingDescription,
        world: &mut World,
        world_id: VolumeId,
    ) -> GraphResult<()> {
        for roof in &description.roofs {
            let room_id = require_volume(world, &roof.room, "roof")?;
            let r = require_r(description, &roof.material, "roof")?;
            let area = roof.size[0] * roof.size[1];
            info!(room = %roof.room, material = %roof.material, area_ft2 = area, "roof");
            world.connect(
                room_id,
                Portal::new(
                    format!("{}/world Roof, {}", roof.room, roof.material),
                    world_id,
                    area,
                    r,
                    0.0,
                )?,
            )?;
        }

        let default_r = require_r(description, &description.defaults.roof_material, "default roof")?;
        for room in &description.rooms {
            if room.assembly == AssemblyDef::Joist {
                continue;
            }
            if description.roofs.iter().any(|roof| roof.room == room.name) {
                continue;
            }
            let room_id = require_volume(world, &room.name, "default roof")?;
            let area = room.size[0] * room.size[1];
            info!(
                room = %room.name,
                material = %description.defaults.roof_material,
                area_ft2 = area,
                "roof (default)"
            );
            world.connect(
                room_id,
                Portal::new(
                    format!(
                        "{}/world Roof, {}",
                        room.name, description.defaults.roof_material
                    ),
                    world_id,
                    area,
                    default_r,
                    0.0,
                )?,
            )?;
        }
        Ok(())
    }

    /// Doors and windows connect directly to the world; their area was
    /// already netted out of the parent wall.
    fn connect_openings(
        description: &BuildingDescription,
        world: &mut World,
        world_id: VolumeId,
    ) -> GraphResult<()> {
        let window_r = require_r(description, &description.defaults.window_material, "window")?;
        for window in &description.windows {
            let room_id = require_volume(world, &window.room, "window")?;
            let area = window.size[0] * window.size[1];
            info!(room = %window.room, label = %window.label, area_ft2 = area, "window");
            world.connect(
                room_id,
                Portal::new(
                    format!("{}/world Window {}", window.room, window.label),
                    world_id,
                    area,
                    window_r,
                    0.0,
                )?,
            )?;
        }

        let door_r = require_r(description, &description.defaults.door_material, "door")?;
        for door in &description.doors {
            let room_id = require_volume(world, &door.room, "door")?;
            let area = door.size[0] * door.size[1];
            info!(room = %door.room, label = %door.label, area_ft2 = area, "door");
            world.connect(
                room_id,
                Portal::new(
                    format!("{}/world Door {}", door.room, door.label),
                    world_id,
                    area,
                    door_r,
                    0.0,
                )?,
            )?;
        }
        Ok(())
    }

    /// Build each zone's floor/slab/fluid stack.
    ///
    /// Each flooring assembly:
    ///
    /// ```text
    ///        room       room          <- R 0, film = covering (surface)
    ///        floor      floor         <- covering mass
    ///        ---------------          <- spreader contact
    ///             slab                <- slab/subfloor mass
    ///        ---------------          <- fluid coupling
    ///             fluid               <- loop water
    ///        ---------------          <- under-slab insulation (slab only)
    ///            ground
    /// ```
    fn build_zone_stacks(
        description: &BuildingDescription,
        world: &mut World,
        world_id: VolumeId,
        ground_id: VolumeId,
    ) -> GraphResult<Vec<ZoneStack>> {
        let defaults = &description.defaults;
        let coupling_r = require_r(description, &defaults.slab_coupling_material, "zone stack")?;
        let spreader_r = require_r(description, &defaults.spreader_material, "zone stack")?;
        let underslab_r = require_r(description, &defaults.underslab_material, "zone stack")?;

        let mut stacks = Vec::with_capacity(description.zones.len());
        for zone in &description.zones {
            let member_rooms: Vec<&RoomDef> = zone
                .members
                .iter()
                .map(|name| {
                    description
                        .rooms
                        .iter()
                        .find(|r| &r.name == name)
                        .ok_or_else(|| GraphError::UnknownVolume {
                            name: name.clone(),
                            context: format!("zone {}", zone.name),
                        })
                })
                .collect::<GraphResult<_>>()?;

            let assembly = zone_assembly(&zone.name, &member_rooms)?;
            let members: Vec<VolumeId> = zone
                .members
                .iter()
                .map(|name| require_volume(world, name, "zone member"))
                .collect::<GraphResult<_>>()?;
            let primary_temp = world.volume(members[0]).conditions.temperature;

            // Per-member floor coverings, owned by their rooms so a room's
            // detail view shows its own floor.
            let mut floors = Vec::with_capacity(members.len());
            for (room, &room_id) in member_rooms.iter().zip(&members) {
                let covering_r = require_r(description, &room.covering, "floor covering")?;
                let floor_name = format!("{} floor", room.name);
                let floor_id = world.add(
                    floor_name.clone(),
                    [room.size[0], room.size[1], defaults.covering_thickness_ft],
                    room.covering.clone(),
                    primary_temp,
                )?;
                world.contain(room_id, floor_id)?;
                // R 0 so the floor radiates at its own mass temperature;
                // the covering's R becomes the convective film.
                world.connect(
                    room_id,
                    Portal::new(
                        format!("{}/{} Floor of {}", zone.name, floor_name, room.name),
                        floor_id,
                        room.size[0] * room.size[1],
                        0.0,
                        covering_r,
                    )?,
                )?;
                floors.push(floor_id);
            }

            // Merged footprint of all member rooms.
            let (merged_w, merged_d) = member_rooms
                .iter()
                .map(|r| (r.size[0], r.size[1]))
                .reduce(merge_footprint)
                .unwrap_or((0.0, 0.0));
            let footprint = merged_w * merged_d;

            // The loop water, spread over the footprint as an equivalent
            // thickness. A zone may span several rooms, so it lives in the
            // world, not in any one room.
            let fluid_id = world.add(
                zone.name.clone(),
                [merged_w, merged_d, loop_fluid_thickness_in() / 12.0],
                defaults.fluid_material.clone(),
                primary_temp,
            )?;
            world.contain(world_id, fluid_id)?;

            let slab_name = format!("{} slab", zone.name);
            let slab_id = world.add(
                slab_name.clone(),
                [merged_w, merged_d, defaults.slab_thickness_ft],
                defaults.slab_material.clone(),
                primary_temp,
            )?;
            world.contain(world_id, slab_id)?;

            world.connect(
                slab_id,
                Portal::new(
                    format!("{}/{} Fluid", zone.name, slab_name),
                    fluid_id,
                    footprint,
                    coupling_r,
                    0.0,
                )?,
            )?;
            for (room, &floor_id) in member_rooms.iter().zip(&floors) {
                world.connect(
                    slab_id,
                    Portal::new(
                        format!("{}/{} floor Flooring", slab_name, room.name),
                        floor_id,
                        room.size[0] * room.size[1],
                        spreader_r,
                        0.0,
                    )?,
                )?;
            }
            if assembly == Assembly::Slab {
                // Ground sees the slab through the under-slab envelope.
                world.connect(
                    slab_id,
                    Portal::new(
                        format!("{}/ground Insulation", slab_name),
                        ground_id,
                        footprint,
                        underslab_r,
                        0.0,
                    )?,
                )?;
            }

            info!(
                zone = %zone.name,
                members = members.len(),
                footprint_ft2 = footprint,
                ?assembly,
                "zone stack"
            );
            stacks.push(ZoneStack {
                name: zone.name.clone(),
                members,
                floors,
                slab: slab_id,
                fluid: fluid_id,
                assembly,
            });
        }
        Ok(stacks)
    }
}

/// Merge two rectangular footprints, preserving total area.
fn merge_footprint(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    let (wa, da) = a;
    let (wb, db) = b;
    if (da - db).abs() < 1e-9 {
        (wa + wb, da)
    } else {
        let depth = da.max(db);
        ((wa * da + wb * db) / depth, depth)
    }
}

fn zone_assembly(zone: &str, members: &[&RoomDef]) -> GraphResult<Assembly> {
    let joists = members
        .iter()
        .filter(|r| r.assembly == AssemblyDef::Joist)
        .count();
    if joists == 0 {
        Ok(Assembly::Slab)
    } else if joists == members.len() {
        Ok(Assembly::Joist)
    } else {
        Err(GraphError::MixedAssembly {
            zone: zone.to_string(),
        })
    }
}

fn require_volume(world: &World, name: &str, context: &str) -> GraphResult<VolumeId> {
    world.id_of(name).ok_or_else(|| GraphError::UnknownVolume {
        name: name.to_string(),
        context: context.to_string(),
    })
}

fn require_r(
    description: &BuildingDescription,
    material: &str,
    context: &str,
) -> GraphResult<f64> {
    description
        .r_value(material)
        .ok_or_else(|| GraphError::UnknownMaterial {
            name: material.to_string(),
            context: context.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_equal_depths_adds_widths() {
        assert_eq!(merge_footprint((7.0, 49.0), (9.0, 49.0)), (16.0, 49.0));
    }

    #[test]
    fn merge_unequal_depths_preserves_area() {
        let (w, d) = merge_footprint((10.0, 20.0), (5.0, 40.0));
        assert!((w * d - (200.0 + 200.0)).abs() < 1e-9);
        assert_eq!(d, 40.0);
    }
}
