//! Named thermal masses.

use crate::portal::Portal;
use rh_core::VolumeId;
use rh_sensors::Sensor;
use std::sync::Arc;

/// Current conditions of a volume.
///
/// Temperature is degrees Fahrenheit, the internal scale. A bound sensor
/// is read (under its own lock) by the fusion step; the volume never owns
/// the sensor's update lifecycle.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    pub temperature: f64,
    pub sensor: Option<Arc<Sensor>>,
}

/// A named thermal mass/region of the building or its subsystems.
#[derive(Debug, Clone)]
pub struct Volume {
    pub id: VolumeId,
    pub name: String,
    /// Width × depth × height, feet.
    pub size: [f64; 3],
    /// Material name, used to derive volumetric heat capacity.
    pub material: String,
    pub conditions: Conditions,
    /// Outbound portals owned by this volume.
    pub portals: Vec<Portal>,
    /// Containing volume, if any. Containment governs traversal and
    /// display, never heat flow.
    pub contained_by: Option<VolumeId>,
    /// Contained sub-volumes, in insertion order.
    pub contains: Vec<VolumeId>,
}

impl Volume {
    /// Footprint area, ft².
    pub fn footprint(&self) -> f64 {
        self.size[0] * self.size[1]
    }

    /// Enclosed volume, ft³.
    pub fn volume_ft3(&self) -> f64 {
        self.size[0] * self.size[1] * self.size[2]
    }

    /// The portal this volume owns onto `other` with the given name.
    pub fn portal_onto(&self, other: VolumeId, name: &str) -> Option<&Portal> {
        self.portals
            .iter()
            .find(|p| p.onto == other && p.name == name)
    }
}
