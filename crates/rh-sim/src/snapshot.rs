//! Display surface: per-tick snapshots.

use crate::fusion::FusionOutcome;
use rh_comfort::ComfortEstimate;
use rh_core::VolumeId;

/// Controller readout attached to a zone's primary volume.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneReadout {
    pub zone: String,
    /// Heat call, percent of normalized output.
    pub heatcall_pct: f64,
    /// Raw P/I/D state.
    pub p: f64,
    pub i: f64,
    pub d: f64,
    /// Signed share of each term in the current output.
    pub contributions: (f64, f64, f64),
    /// Zone setpoint, °C.
    pub setpoint_c: f64,
    /// Slab and fluid temperatures, °C.
    pub slab_c: f64,
    pub fluid_c: f64,
}

/// One volume's state as exposed to the display layer.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeSnapshot {
    pub id: VolumeId,
    pub name: String,
    pub temperature_c: f64,
    pub radiant_c: f64,
    /// Net heat rate, BTU/h.
    pub btu_h: f64,
    /// Comfort estimate for occupied volumes.
    pub comfort: Option<ComfortEstimate>,
    /// Present on zone primary volumes.
    pub zone: Option<ZoneReadout>,
}

/// Everything one tick produced, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub now: f64,
    pub elapsed_s: f64,
    /// Volumes in the zone-aware display order.
    pub volumes: Vec<VolumeSnapshot>,
    pub fusion: Vec<FusionOutcome>,
}

impl TickReport {
    pub fn volume(&self, name: &str) -> Option<&VolumeSnapshot> {
        self.volumes.iter().find(|v| v.name == name)
    }
}
