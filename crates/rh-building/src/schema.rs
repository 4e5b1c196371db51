//! Building description schema definitions.
//!
//! All geometry is in feet, all temperatures in degrees Fahrenheit (the
//! internal scale), all thermal resistances in ft²·°F·h/BTU.

use rh_core::c_to_f;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildingDescription {
    pub name: String,
    #[serde(default)]
    pub materials: Vec<MaterialDef>,
    #[serde(default)]
    pub rooms: Vec<RoomDef>,
    #[serde(default)]
    pub walls: Vec<WallDef>,
    #[serde(default)]
    pub roofs: Vec<RoofDef>,
    #[serde(default)]
    pub windows: Vec<OpeningDef>,
    #[serde(default)]
    pub doors: Vec<OpeningDef>,
    #[serde(default)]
    pub zones: Vec<ZoneDef>,
    #[serde(default)]
    pub defaults: DefaultsDef,
    #[serde(default)]
    pub tuning: TuningDef,
    /// Per-room setpoint overrides, °F. Rooms without an entry use
    /// `defaults.setpoint_f`.
    #[serde(default)]
    pub setpoints_f: BTreeMap<String, f64>,
    /// Per-room clothing/metabolism overrides for comfort estimation.
    #[serde(default)]
    pub comfort: BTreeMap<String, ComfortPatchDef>,
}

/// A material with its thermal resistance and, for materials that form
/// volumes, a volumetric heat capacity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialDef {
    pub name: String,
    /// R-value, ft²·°F·h/BTU. Zero models direct/fluid coupling.
    pub r_value: f64,
    /// BTU/ft³·°F, for materials that volumes are made of.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_capacity_btu_ft3_f: Option<f64>,
}

/// Floor assembly style for a heated room.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AssemblyDef {
    /// Concrete slab on grade; the slab couples to ground through
    /// under-slab insulation.
    #[default]
    Slab,
    /// Heated subfloor on joists; no slab-to-ground coupling and no
    /// synthesized roof (the "roof" is another heated floor above).
    Joist,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomDef {
    pub name: String,
    /// Width × depth × height, feet.
    pub size: [f64; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_temp_f: Option<f64>,
    /// Floor covering material; its R-value becomes the floor portal's
    /// film resistance.
    pub covering: String,
    #[serde(default)]
    pub assembly: AssemblyDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WallDef {
    pub room: String,
    /// Destination volume; the outside world unless stated.
    #[serde(default = "default_onto")]
    pub onto: String,
    pub label: String,
    pub material: String,
    /// Width × height, feet. Openings sharing the room/destination pair
    /// are netted out of the width at build time.
    pub size: [f64; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoofDef {
    pub room: String,
    pub material: String,
    /// Footprint width × depth, feet.
    pub size: [f64; 2],
}

/// A window or door. Always connects its room to the outside world.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpeningDef {
    pub room: String,
    pub label: String,
    /// Width × height, feet.
    pub size: [f64; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneDef {
    pub name: String,
    /// Member rooms; the first is the primary (its temperature is the
    /// controller's process value and carries the zone setpoint).
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DefaultsDef {
    /// Initial room temperature, °F.
    pub initial_temp_f: f64,
    /// Outside-air boundary temperature, °F.
    pub outside_temp_f: f64,
    /// Sub-grade boundary temperature, °F.
    pub ground_temp_f: f64,
    /// Default room setpoint, °F.
    pub setpoint_f: f64,
    /// Relative humidity assumed for comfort estimation.
    pub humidity: f64,
    /// Default clothing insulation, clo.
    pub clothing_clo: f64,
    /// Default metabolic rate, met.
    pub metabolism_met: f64,
    pub window_material: String,
    pub door_material: String,
    /// Material for synthesized roofs.
    pub roof_material: String,
    /// Floor covering thickness, feet.
    pub covering_thickness_ft: f64,
    /// Slab/subfloor thickness, feet.
    pub slab_thickness_ft: f64,
    /// Material the slab volume is made of.
    pub slab_material: String,
    /// Material the zone fluid volume is made of.
    pub fluid_material: String,
    /// Resistance between the zone fluid and the slab it heats.
    pub slab_coupling_material: String,
    /// Resistance of the heat-spreader contact between slab and floors.
    pub spreader_material: String,
    /// Under-slab envelope insulation toward ground.
    pub underslab_material: String,
}

fn default_onto() -> String {
    "world".to_string()
}

impl Default for DefaultsDef {
    fn default() -> Self {
        Self {
            initial_temp_f: c_to_f(20.0),
            outside_temp_f: -40.0,
            ground_temp_f: c_to_f(5.0),
            setpoint_f: c_to_f(20.0),
            humidity: 0.5,
            clothing_clo: 1.0,  // casual/indoor
            metabolism_met: 1.2, // sitting/standing
            window_material: "window".to_string(),
            door_material: "door".to_string(),
            roof_material: "SIP4".to_string(),
            covering_thickness_ft: 0.125 / 12.0,
            slab_thickness_ft: 0.75 / 12.0,
            slab_material: "wood".to_string(),
            fluid_material: "water".to_string(),
            slab_coupling_material: "subfloor".to_string(),
            spreader_material: "fluid".to_string(),
            underslab_material: "SIP4".to_string(),
        }
    }
}

/// PID loop tuning.
///
/// The defaults drive a zone to its output limit on a sustained ±2 °C
/// error (Kp), on roughly sixteen degree-hours of accumulated error (Ki),
/// and on a fraction of a degree per hour of error slew (Kd).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PidTuningDef {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// Output clamp `[low, high]`. `high` may exceed 1.0 to let one zone
    /// dominate a shared secondary heat source.
    pub lout: [f64; 2],
    /// Persisted integral state; seeds the controller on startup so
    /// control continuity survives restarts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integral: Option<f64>,
}

impl Default for PidTuningDef {
    fn default() -> Self {
        Self {
            kp: 30.0, // ±2 °C of normalized error drives to limit
            ki: 0.001,
            kd: 10_000.0,
            lout: [0.0, 1.0],
            integral: None,
        }
    }
}

/// Field-by-field override of [`PidTuningDef`]; unset fields inherit the
/// default tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PidTuningPatchDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ki: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lout: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integral: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TuningDef {
    pub default: PidTuningDef,
    /// Per-zone overrides, merged field-by-field over the default.
    pub zones: BTreeMap<String, PidTuningPatchDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ComfortPatchDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clo: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub met: Option<f64>,
}

impl BuildingDescription {
    /// Look up a material by name.
    pub fn material(&self, name: &str) -> Option<&MaterialDef> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// R-value of a named material.
    pub fn r_value(&self, name: &str) -> Option<f64> {
        self.material(name).map(|m| m.r_value)
    }

    /// Initial temperature for a room, falling back to the default.
    pub fn initial_temp_f(&self, room: &RoomDef) -> f64 {
        room.initial_temp_f.unwrap_or(self.defaults.initial_temp_f)
    }

    /// Setpoint for a named room, falling back to the default.
    pub fn setpoint_f(&self, room: &str) -> f64 {
        self.setpoints_f
            .get(room)
            .copied()
            .unwrap_or(self.defaults.setpoint_f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_internal_scale() {
        let d = DefaultsDef::default();
        assert!((d.initial_temp_f - 68.0).abs() < 1e-9);
        assert!((d.ground_temp_f - 41.0).abs() < 1e-9);
        assert_eq!(d.outside_temp_f, -40.0);
    }

    #[test]
    fn description_yaml_round_trip() {
        let description = crate::sample::three_zone_classroom();
        let yaml = serde_yaml::to_string(&description).unwrap();
        let back: BuildingDescription = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(description, back);
    }

    #[test]
    fn setpoint_falls_back_to_default() {
        let mut description = crate::sample::three_zone_classroom();
        description
            .setpoints_f
            .insert("left".to_string(), c_to_f(22.0));
        assert!((description.setpoint_f("left") - c_to_f(22.0)).abs() < 1e-9);
        assert!((description.setpoint_f("center") - description.defaults.setpoint_f).abs() < 1e-9);
    }
}
