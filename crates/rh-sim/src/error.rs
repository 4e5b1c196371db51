//! Error types for the update loop.

use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Control error: {0}")]
    Control(#[from] rh_controls::ControlError),

    #[error("Loop event channel disconnected")]
    Disconnected,
}
