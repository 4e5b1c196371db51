//! Sensor fusion with fallback.
//!
//! A slab sensor is ground truth for the whole hydronic stack it
//! instruments: an accepted reading overwrites both the slab and the zone
//! fluid. Without one (or with an implausible reading), the stack takes
//! the primary member room's temperature, propagating the room's sensed
//! or estimated air temperature down through the stack.

use rh_core::c_to_f;
use rh_graph::{World, ZoneStack};
use tracing::debug;

/// Plausible band for a slab probe, °C.
const SENSOR_MIN_C: f64 = 0.0;
const SENSOR_MAX_C: f64 = 40.0;

/// What fusion did for one zone this tick.
#[derive(Debug, Clone, PartialEq)]
pub enum FusionOutcome {
    /// Sensor reading accepted (°C) and written through the stack.
    Sensor { zone: String, value_c: f64 },
    /// No usable reading; stack took the primary room's temperature.
    Fallback { zone: String },
}

/// Fuse every zone's slab sensor, returning per-zone outcomes.
///
/// Sensor reads happen under each sensor's own lock, released before any
/// further work.
pub fn fuse_zone_stacks(world: &mut World, stacks: &[ZoneStack], now: f64) -> Vec<FusionOutcome> {
    let mut outcomes = Vec::with_capacity(stacks.len());
    for stack in stacks {
        let reading = world
            .volume(stack.slab)
            .conditions
            .sensor
            .as_ref()
            .and_then(|sensor| sensor.compute(now));

        match reading {
            Some(value_c) if SENSOR_MIN_C < value_c && value_c < SENSOR_MAX_C => {
                let value_f = c_to_f(value_c);
                world.volume_mut(stack.slab).conditions.temperature = value_f;
                world.volume_mut(stack.fluid).conditions.temperature = value_f;
                outcomes.push(FusionOutcome::Sensor {
                    zone: stack.name.clone(),
                    value_c,
                });
            }
            rejected => {
                if let Some(value_c) = rejected {
                    debug!(
                        zone = %stack.name,
                        value_c, "slab sensor out of band; ignoring"
                    );
                }
                let primary_f = world.volume(stack.primary()).conditions.temperature;
                world.volume_mut(stack.slab).conditions.temperature = primary_f;
                world.volume_mut(stack.fluid).conditions.temperature = primary_f;
                outcomes.push(FusionOutcome::Fallback {
                    zone: stack.name.clone(),
                });
            }
        }
    }
    outcomes
}

impl FusionOutcome {
    pub fn zone(&self) -> &str {
        match self {
            FusionOutcome::Sensor { zone, .. } | FusionOutcome::Fallback { zone } => zone,
        }
    }

    /// Accepted sensor value in °C, if any.
    pub fn sensor_c(&self) -> Option<f64> {
        match self {
            FusionOutcome::Sensor { value_c, .. } => Some(*value_c),
            FusionOutcome::Fallback { .. } => None,
        }
    }
}
