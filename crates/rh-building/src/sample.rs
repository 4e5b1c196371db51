//! Built-in sample description: a three-zone classroom building.
//!
//! A single 23 × 49 ft room span under a shed roof rising left to right,
//! split into three radiant zones (two 7 ft sides and a 9 ft center) so
//! the slab loops can be tuned independently.

use crate::schema::{
    AssemblyDef, BuildingDescription, DefaultsDef, MaterialDef, OpeningDef, RoomDef, TuningDef,
    WallDef, ZoneDef,
};
use std::collections::BTreeMap;

const TRUSS: f64 = 8.0; // height of bottom of trusses
const RISE: f64 = 5.0; // rise of roof toward peak
const WIDTH: f64 = 23.0;
const LENGTH: f64 = 49.0;
const SIDE: f64 = 7.0; // width of the side zones
const CENTER: f64 = WIDTH - SIDE * 2.0;

fn material(name: &str, r_value: f64) -> MaterialDef {
    MaterialDef {
        name: name.to_string(),
        r_value,
        heat_capacity_btu_ft3_f: None,
    }
}

fn mass_material(name: &str, r_value: f64, capacity: f64) -> MaterialDef {
    MaterialDef {
        name: name.to_string(),
        r_value,
        heat_capacity_btu_ft3_f: Some(capacity),
    }
}

/// Average ceiling height at the midline of a span starting `offset` feet
/// from the low side.
fn height_at(offset: f64, width: f64) -> f64 {
    TRUSS + RISE * (offset + width / 2.0) / WIDTH
}

fn room(name: &str, offset: f64, width: f64) -> RoomDef {
    RoomDef {
        name: name.to_string(),
        size: [width, LENGTH, height_at(offset, width)],
        initial_temp_f: None,
        covering: "polyaspartic".to_string(),
        assembly: AssemblyDef::Slab,
    }
}

fn wall(room: &str, label: &str, material: &str, size: [f64; 2]) -> WallDef {
    WallDef {
        room: room.to_string(),
        onto: "world".to_string(),
        label: label.to_string(),
        material: material.to_string(),
        size,
    }
}

fn opening(room: &str, label: &str, size: [f64; 2]) -> OpeningDef {
    OpeningDef {
        room: room.to_string(),
        label: label.to_string(),
        size,
    }
}

fn zone(name: &str, members: &[&str]) -> ZoneDef {
    ZoneDef {
        name: name.to_string(),
        members: members.iter().map(|m| m.to_string()).collect(),
    }
}

pub fn three_zone_classroom() -> BuildingDescription {
    let left = room("left", 0.0, SIDE);
    let center = room("center", SIDE, CENTER);
    let right = room("right", SIDE + CENTER, SIDE);
    let left_h = left.size[2];
    let center_h = center.size[2];
    let right_h = right.size[2];

    BuildingDescription {
        name: "three-zone classroom".to_string(),
        materials: vec![
            material("SIP3", 7.5 * 3.0),
            material("SIP4", 7.5 * 4.0),
            material("window", 3.0), // dual pane w/ internal blinds
            material("door", 3.0),
            mass_material("subfloor", 2.0, 10.9), // 3/4" ply
            material("insulworks", 12.0),
            mass_material("slab", 1.0, 22.0), // concrete R1/inch
            material("tile", 0.25),
            material("bare", 0.1),
            mass_material("fluid", 0.01, 62.43), // heat-spreader contact
            material("furniture", 10.0),
            mass_material("polyaspartic", 0.1, 10.9), // close to bare subfloor
            mass_material("wood", 2.0, 10.9),
            mass_material("water", 0.01, 62.43),
            mass_material("air", 1.0, 0.018),
            mass_material("soil", 1.0, 20.0),
        ],
        rooms: vec![left, center, right],
        walls: vec![
            wall("left", "Left", "SIP3", [LENGTH, TRUSS]),
            wall("left", "Front", "SIP3", [SIDE, left_h]),
            wall("left", "Back", "SIP3", [SIDE, left_h]),
            wall("center", "Front", "SIP3", [CENTER, center_h]),
            wall("center", "Back", "SIP3", [CENTER, center_h]),
            wall("right", "Right", "SIP3", [LENGTH, TRUSS + RISE]),
            wall("right", "Front", "SIP3", [SIDE, right_h]),
            wall("right", "Back", "SIP3", [SIDE, right_h]),
        ],
        roofs: vec![],
        windows: vec![
            opening("right", "Gable 1", [4.0, 3.0]),
            opening("right", "Gable 2", [4.0, 3.0]),
            opening("right", "Gable 3", [4.0, 3.0]),
            opening("right", "Gable 4", [4.0, 3.0]),
            opening("right", "Gable 5", [4.0, 3.0]),
            opening("center", "Front", [4.0, 3.0]),
        ],
        doors: vec![opening("left", "Entry", [3.0, 7.0])],
        zones: vec![
            zone("zone 1", &["left"]),
            zone("zone 2", &["center"]),
            zone("zone 3", &["right"]),
        ],
        defaults: DefaultsDef::default(),
        tuning: TuningDef::default(),
        setpoints_f: BTreeMap::new(),
        comfort: BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_three_zones_over_three_rooms() {
        let description = three_zone_classroom();
        assert_eq!(description.rooms.len(), 3);
        assert_eq!(description.zones.len(), 3);
        for zone in &description.zones {
            assert_eq!(zone.members.len(), 1);
        }
    }

    #[test]
    fn ceiling_rises_toward_the_right() {
        let description = three_zone_classroom();
        let heights: Vec<f64> = description.rooms.iter().map(|r| r.size[2]).collect();
        assert!(heights[0] < heights[1] && heights[1] < heights[2]);
        // left midline: 8 + 5 * 3.5/23
        assert!((heights[0] - (TRUSS + RISE * 3.5 / WIDTH)).abs() < 1e-9);
    }

    #[test]
    fn openings_reference_declared_rooms() {
        let description = three_zone_classroom();
        assert!(crate::validate_description(&description).is_ok());
        assert_eq!(description.windows.len(), 6);
        assert_eq!(description.doors.len(), 1);
    }
}
