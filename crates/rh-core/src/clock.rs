//! Wall-clock seconds as a plain scalar.
//!
//! The control loop, controllers, and sensors all pass time around as
//! `f64` seconds since the Unix epoch so elapsed intervals are a single
//! subtraction.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time, seconds since the Unix epoch.
pub fn now_s() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
