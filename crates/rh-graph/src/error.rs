//! Error types for world-graph construction.

use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Duplicate volume name: {name}")]
    DuplicateName { name: String },

    #[error("Unknown volume: {name} (referenced by {context})")]
    UnknownVolume { name: String, context: String },

    #[error("Unknown material: {name} (referenced by {context})")]
    UnknownMaterial { name: String, context: String },

    #[error("Invalid portal: {what}")]
    BadPortal { what: String },

    #[error("Volume already contained: {name}")]
    AlreadyContained { name: String },

    #[error("Zone {zone} mixes slab and joist assemblies")]
    MixedAssembly { zone: String },

    #[error("Validation error: {0}")]
    Validation(#[from] rh_building::ValidationError),
}
