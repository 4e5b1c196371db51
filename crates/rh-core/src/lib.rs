//! Core types shared across the radiant control stack.
//!
//! Small by design: stable identifiers, the common error type, numeric
//! helpers, and the temperature/interval conventions every other crate
//! agrees on.

pub mod clock;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use clock::now_s;
pub use error::{CoreError, CoreResult};
pub use ids::{Id, PortalId, VolumeId, ZoneId};
pub use numeric::{ensure_finite, nearly_equal, Real, Tolerances};
pub use units::{c_to_f, f_to_c, Interval, CELSIUS, FAHRENHEIT, NORMAL, PERCENT};
