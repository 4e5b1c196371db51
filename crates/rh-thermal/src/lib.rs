//! rh-thermal: the thermal-network engine.
//!
//! The control loop consumes this through the [`ThermalNetwork`] trait:
//! `compute` returns directional per-portal heat deltas for an elapsed
//! interval, `absorb` applies them to every volume's temperature. The
//! [`ConductionEngine`] here is the reference implementation; the trait is
//! the seam a higher-fidelity engine would plug into.

pub mod capacity;
pub mod engine;
pub mod surface;

pub use capacity::CapacityTable;
pub use engine::{ConductionEngine, FluxKey, FluxMap, ThermalNetwork};
pub use surface::facing_temperature;
