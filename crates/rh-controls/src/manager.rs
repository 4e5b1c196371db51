//! Per-zone controller instantiation.

use crate::error::{ControlError, ControlResult};
use crate::pid::Controller;
use crate::tuning::Tuning;
use rh_building::BuildingDescription;
use rh_core::{Interval, VolumeId, FAHRENHEIT, NORMAL};
use rh_graph::{World, ZoneStack};

/// One zone's controller, bound to the zone's primary volume.
#[derive(Debug, Clone)]
pub struct ZoneController {
    pub zone: String,
    /// The primary member room; its temperature is the process value and
    /// carries the zone setpoint.
    pub primary: VolumeId,
    /// Target temperature on the internal scale (°F).
    pub setpoint_f: f64,
    pub controller: Controller,
}

/// All zone controllers, in zone declaration order.
#[derive(Debug, Clone)]
pub struct ZoneControllers {
    entries: Vec<ZoneController>,
    /// Physical interval scaled onto the normalized signal space.
    pub scale: Interval,
}

impl ZoneControllers {
    /// Create one controller per zone from merged default/override tuning.
    ///
    /// Setpoint and process value are scaled into the normalized space
    /// over the temperature interval; output starts at zero.
    pub fn build(
        description: &BuildingDescription,
        world: &World,
        stacks: &[ZoneStack],
        now: f64,
    ) -> ControlResult<Self> {
        let scale = FAHRENHEIT;
        let mut entries = Vec::with_capacity(stacks.len());
        for stack in stacks {
            let primary = stack.primary();
            let primary_name = &world.volume(primary).name;
            let tuning = Tuning::merged(
                &description.tuning.default,
                description.tuning.zones.get(&stack.name),
            );
            let setpoint_f = description.setpoint_f(primary_name);
            let process_f = world.volume(primary).conditions.temperature;
            let controller = Controller::new(
                &tuning,
                scale.scale(setpoint_f, NORMAL),
                scale.scale(process_f, NORMAL),
                0.0,
                now,
            )?;
            entries.push(ZoneController {
                zone: stack.name.clone(),
                primary,
                setpoint_f,
                controller,
            });
        }
        Ok(Self { entries, scale })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ZoneController] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [ZoneController] {
        &mut self.entries
    }

    pub fn by_zone(&self, zone: &str) -> Option<&ZoneController> {
        self.entries.iter().find(|e| e.zone == zone)
    }

    pub fn by_zone_mut(&mut self, zone: &str) -> ControlResult<&mut ZoneController> {
        self.entries
            .iter_mut()
            .find(|e| e.zone == zone)
            .ok_or_else(|| ControlError::UnknownBinding {
                what: zone.to_string(),
            })
    }
}
