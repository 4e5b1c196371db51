//! Shared application service layer for radiant.
//!
//! Centralizes what every frontend needs: compiling a building
//! description into a running [`Runtime`], the interactive mutation
//! surface, and controller-state persistence across restarts.

pub mod error;
pub mod persist;
pub mod runtime;

pub use error::{AppError, AppResult};
pub use persist::{load_state, save_state, state_path, PersistedState};
pub use runtime::{Runtime, SensorMode};
