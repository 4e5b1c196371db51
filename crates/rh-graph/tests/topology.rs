//! Topology construction over the built-in sample building.

use rh_building::{three_zone_classroom, AssemblyDef};
use rh_graph::{Assembly, GraphError, TopologyBuilder};

#[test]
fn sample_builds_world_and_ground_first() {
    let (world, stacks) = TopologyBuilder::build(&three_zone_classroom()).unwrap();

    let w = world.by_name("world").expect("world volume");
    let g = world.by_name("ground").expect("ground volume");
    assert_eq!(w.contained_by, None);
    assert_eq!(g.contained_by, Some(w.id));
    assert_eq!(w.conditions.temperature, -40.0);
    assert!((g.conditions.temperature - 41.0).abs() < 1e-9);

    // 2 boundaries + 3 rooms + 3 floors + 3 slabs + 3 fluids
    assert_eq!(world.len(), 14);
    assert_eq!(stacks.len(), 3);
}

#[test]
fn wall_area_nets_out_openings() {
    let (world, _) = TopologyBuilder::build(&three_zone_classroom()).unwrap();

    // left has one 3x7 door; each of its walls nets it out.
    // "Left" wall: W=49, H=8 -> (49 - 21/8) * 8 = 371.0
    let left = world.by_name("left").unwrap();
    let world_id = world.id_of("world").unwrap();
    let wall = left
        .portal_onto(world_id, "left/world Wall Left, SIP3")
        .expect("left wall portal");
    assert!((wall.area - (49.0 - 21.0 / 8.0) * 8.0).abs() < 1e-9);
    assert!((wall.area - 371.0).abs() < 1e-9);

    // right has five 4x3 gable windows; its Right wall is W=49, H=13:
    // (49 - 5*12/13) * 13 = 49*13 - 60 = 577.0
    let right = world.by_name("right").unwrap();
    let wall = right
        .portal_onto(world_id, "right/world Wall Right, SIP3")
        .expect("right wall portal");
    assert!((wall.area - (49.0 * 13.0 - 60.0)).abs() < 1e-9);
}

#[test]
fn netted_area_never_negative() {
    let mut description = three_zone_classroom();
    // A door far larger than any wall of the room.
    description.doors.push(rh_building::OpeningDef {
        room: "left".to_string(),
        label: "Hangar".to_string(),
        size: [100.0, 100.0],
    });
    // Construction still succeeds; the consumed walls are skipped rather
    // than connected with negative area.
    let (world, _) = TopologyBuilder::build(&description).unwrap();
    let left = world.by_name("left").unwrap();
    for portal in &left.portals {
        assert!(portal.area > 0.0, "{} has area {}", portal.name, portal.area);
    }
}

#[test]
fn openings_connect_directly_to_world() {
    let (world, _) = TopologyBuilder::build(&three_zone_classroom()).unwrap();
    let world_id = world.id_of("world").unwrap();

    let left = world.by_name("left").unwrap();
    let door = left
        .portal_onto(world_id, "left/world Door Entry")
        .expect("entry door portal");
    assert_eq!(door.area, 21.0);
    assert_eq!(door.r, 3.0);

    let right = world.by_name("right").unwrap();
    let windows = right
        .portals
        .iter()
        .filter(|p| p.name.contains("Window"))
        .count();
    assert_eq!(windows, 5);
}

#[test]
fn default_roof_synthesized_for_slab_rooms_only() {
    let mut description = three_zone_classroom();
    description.rooms[0].assembly = AssemblyDef::Joist;
    let (world, stacks) = TopologyBuilder::build(&description).unwrap();

    let left = world.by_name("left").unwrap();
    assert!(
        !left.portals.iter().any(|p| p.name.contains("Roof")),
        "joist room must not get a synthesized roof"
    );
    let center = world.by_name("center").unwrap();
    assert!(center.portals.iter().any(|p| p.name.contains("Roof")));

    // The joist zone's slab has no ground coupling.
    let joist_stack = &stacks[0];
    assert_eq!(joist_stack.assembly, Assembly::Joist);
    let slab = world.volume(joist_stack.slab);
    assert!(!slab.portals.iter().any(|p| p.name.contains("Insulation")));
}

#[test]
fn zone_stack_layers_are_linked() {
    let (world, stacks) = TopologyBuilder::build(&three_zone_classroom()).unwrap();
    let ground_id = world.id_of("ground").unwrap();

    for stack in &stacks {
        assert_eq!(stack.members.len(), 1);
        assert_eq!(stack.floors.len(), 1);

        let room = world.volume(stack.primary());
        let floor = world.volume(stack.floors[0]);
        let slab = world.volume(stack.slab);
        let fluid = world.volume(stack.fluid);

        // Room owns the floor and its surface portal: R 0, film > 0.
        assert_eq!(floor.contained_by, Some(room.id));
        let surface = room
            .portals
            .iter()
            .find(|p| p.onto == floor.id)
            .expect("floor surface portal");
        assert_eq!(surface.r, 0.0);
        assert!(surface.film > 0.0);

        // Slab couples to fluid, floor, and ground.
        assert!(slab.portals.iter().any(|p| p.onto == fluid.id));
        assert!(slab.portals.iter().any(|p| p.onto == floor.id));
        assert!(slab.portals.iter().any(|p| p.onto == ground_id));

        // Fluid and slab take the primary room's initial temperature.
        assert_eq!(fluid.conditions.temperature, room.conditions.temperature);
        assert_eq!(slab.conditions.temperature, room.conditions.temperature);

        // Fluid spans the zone footprint at the fixed fill thickness.
        assert!((fluid.footprint() - room.footprint()).abs() < 1e-9);
        assert!((fluid.size[2] * 12.0 - 0.014_758_333).abs() < 1e-6);
    }
}

#[test]
fn undeclared_references_abort_construction() {
    let mut description = three_zone_classroom();
    description.zones[0].members[0] = "attic".to_string();
    assert!(matches!(
        TopologyBuilder::build(&description),
        Err(GraphError::Validation(_))
    ));

    let mut description = three_zone_classroom();
    description.walls[0].material = "unobtainium".to_string();
    assert!(TopologyBuilder::build(&description).is_err());
}
