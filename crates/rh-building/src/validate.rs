//! Building description validation.
//!
//! Any undeclared room, zone, or material reference is a configuration
//! error and aborts before topology construction begins.

use crate::schema::{BuildingDescription, OpeningDef};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate name: {name} in {context}")]
    DuplicateName { name: String, context: String },

    #[error("Missing reference: {name} in {context}")]
    MissingReference { name: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub fn validate_description(description: &BuildingDescription) -> Result<(), ValidationError> {
    let mut materials = HashSet::new();
    for material in &description.materials {
        if !materials.insert(material.name.as_str()) {
            return Err(ValidationError::DuplicateName {
                name: material.name.clone(),
                context: "materials".to_string(),
            });
        }
        if material.r_value < 0.0 || !material.r_value.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: format!("materials.{}.r_value", material.name),
                value: material.r_value.to_string(),
                reason: "must be finite and non-negative".to_string(),
            });
        }
    }

    let mut rooms = HashSet::new();
    for room in &description.rooms {
        if !rooms.insert(room.name.as_str()) {
            return Err(ValidationError::DuplicateName {
                name: room.name.clone(),
                context: "rooms".to_string(),
            });
        }
        if room.name == "world" || room.name == "ground" {
            return Err(ValidationError::InvalidValue {
                field: "rooms.name".to_string(),
                value: room.name.clone(),
                reason: "reserved for boundary volumes".to_string(),
            });
        }
        require_positive_dims(&room.size, &format!("rooms.{}.size", room.name))?;
        require_material(&materials, &room.covering, &format!("rooms.{}", room.name))?;
    }

    for wall in &description.walls {
        require_room(&rooms, &wall.room, "walls.room")?;
        if wall.onto != "world" && !rooms.contains(wall.onto.as_str()) {
            return Err(ValidationError::MissingReference {
                name: wall.onto.clone(),
                context: "walls.onto".to_string(),
            });
        }
        require_material(&materials, &wall.material, &format!("walls.{}", wall.label))?;
        require_positive_dims(&wall.size, &format!("walls.{}.size", wall.label))?;
    }

    for roof in &description.roofs {
        require_room(&rooms, &roof.room, "roofs.room")?;
        require_material(&materials, &roof.material, &format!("roofs.{}", roof.room))?;
        require_positive_dims(&roof.size, &format!("roofs.{}.size", roof.room))?;
    }

    validate_openings(&rooms, &description.windows, "windows")?;
    validate_openings(&rooms, &description.doors, "doors")?;

    let mut zones = HashSet::new();
    for zone in &description.zones {
        if !zones.insert(zone.name.as_str()) {
            return Err(ValidationError::DuplicateName {
                name: zone.name.clone(),
                context: "zones".to_string(),
            });
        }
        if zone.members.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("zones.{}.members", zone.name),
                value: "[]".to_string(),
                reason: "a zone needs at least one member room".to_string(),
            });
        }
        for member in &zone.members {
            if !rooms.contains(member.as_str()) {
                return Err(ValidationError::MissingReference {
                    name: member.clone(),
                    context: format!("zones.{}.members", zone.name),
                });
            }
        }
    }

    for zone_name in description.tuning.zones.keys() {
        if !zones.contains(zone_name.as_str()) {
            return Err(ValidationError::MissingReference {
                name: zone_name.clone(),
                context: "tuning.zones".to_string(),
            });
        }
    }

    for room_name in description
        .setpoints_f
        .keys()
        .chain(description.comfort.keys())
    {
        if !rooms.contains(room_name.as_str()) {
            return Err(ValidationError::MissingReference {
                name: room_name.clone(),
                context: "setpoints/comfort overrides".to_string(),
            });
        }
    }

    let defaults = &description.defaults;
    for (field, material) in [
        ("defaults.window_material", &defaults.window_material),
        ("defaults.door_material", &defaults.door_material),
        ("defaults.roof_material", &defaults.roof_material),
        ("defaults.slab_material", &defaults.slab_material),
        ("defaults.fluid_material", &defaults.fluid_material),
        (
            "defaults.slab_coupling_material",
            &defaults.slab_coupling_material,
        ),
        ("defaults.spreader_material", &defaults.spreader_material),
        ("defaults.underslab_material", &defaults.underslab_material),
    ] {
        require_material(&materials, material, field)?;
    }

    if !(0.0..=1.0).contains(&defaults.humidity) {
        return Err(ValidationError::InvalidValue {
            field: "defaults.humidity".to_string(),
            value: defaults.humidity.to_string(),
            reason: "must be a fraction in [0, 1]".to_string(),
        });
    }

    Ok(())
}

fn validate_openings(
    rooms: &HashSet<&str>,
    openings: &[OpeningDef],
    context: &str,
) -> Result<(), ValidationError> {
    for opening in openings {
        require_room(rooms, &opening.room, context)?;
        require_positive_dims(
            &opening.size,
            &format!("{}.{}.size", context, opening.label),
        )?;
    }
    Ok(())
}

fn require_room(
    rooms: &HashSet<&str>,
    name: &str,
    context: &str,
) -> Result<(), ValidationError> {
    if rooms.contains(name) {
        Ok(())
    } else {
        Err(ValidationError::MissingReference {
            name: name.to_string(),
            context: context.to_string(),
        })
    }
}

fn require_material(
    materials: &HashSet<&str>,
    name: &str,
    context: &str,
) -> Result<(), ValidationError> {
    if materials.contains(name) {
        Ok(())
    } else {
        Err(ValidationError::MissingReference {
            name: name.to_string(),
            context: context.to_string(),
        })
    }
}

fn require_positive_dims(dims: &[f64], field: &str) -> Result<(), ValidationError> {
    for &d in dims {
        if !(d.is_finite() && d > 0.0) {
            return Err(ValidationError::InvalidValue {
                field: field.to_string(),
                value: d.to_string(),
                reason: "dimensions must be finite and positive".to_string(),
            });
        }
    }
    Ok(())
}
