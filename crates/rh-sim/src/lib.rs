//! rh-sim: the real-time zone control and estimation loop.
//!
//! One authoritative cycle per tick, in fixed order: advance time,
//! compute heat flow, fuse sensors, apply the model update, aggregate per
//! volume, estimate comfort, run the zone controllers. Sensor fusion runs
//! before the model update so corrected temperatures are what is
//! advanced; control runs after aggregation so the displayed load and the
//! next control decision come from the same tick's fused state.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod fusion;
pub mod sim;
pub mod snapshot;

pub use aggregate::{aggregate_volume, VolumeAggregate};
pub use config::{ComfortDefaults, ComfortOverride, LoopConfig, LoopEvent};
pub use error::{SimError, SimResult};
pub use fusion::{fuse_zone_stacks, FusionOutcome};
pub use sim::Simulation;
pub use snapshot::{TickReport, VolumeSnapshot, ZoneReadout};
