//! rh-sensors: lock-guarded scalar sensors and the simulated driver.
//!
//! Sensors are the one piece of shared state in the system that is mutated
//! outside the control loop: a background driver (hardware poller or the
//! simulator here) writes readings while the loop reads them. Every access
//! to a sensor's buffer goes through its own lock, and the lock is never
//! held across blocking work.

pub mod sensor;
pub mod sim;

pub use sensor::{Reading, Sensor};
pub use sim::{SimWave, SimulatedDriver};

pub type SensorResult<T> = Result<T, SensorError>;

#[derive(thiserror::Error, Debug)]
pub enum SensorError {
    #[error("Sensor driver error: {what}")]
    Driver { what: String },
}
