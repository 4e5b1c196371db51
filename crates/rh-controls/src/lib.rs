//! rh-controls: per-zone PID control on normalized signals.
//!
//! Controllers operate entirely in the (0,1) signal space; callers scale
//! physical units in and out through `rh_core::Interval`. Gains and clamp
//! bounds are plain public fields so the interactive override path can
//! mutate them directly between ticks.

pub mod error;
pub mod manager;
pub mod pid;
pub mod tuning;

pub use error::{ControlError, ControlResult};
pub use manager::{ZoneController, ZoneControllers};
pub use pid::Controller;
pub use tuning::Tuning;
