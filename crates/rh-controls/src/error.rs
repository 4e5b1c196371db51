//! Error types for control operations.

use thiserror::Error;

pub type ControlResult<T> = Result<T, ControlError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A zone referenced a volume the world graph does not contain.
    #[error("Unknown zone binding: {what}")]
    UnknownBinding { what: String },
}
