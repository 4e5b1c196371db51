//! rh-building: declarative building description format and validation.
//!
//! A `BuildingDescription` is an immutable value describing rooms, envelope
//! segments, heating zones, materials, and tuning. The topology builder in
//! `rh-graph` consumes it to produce the world graph; nothing here mutates
//! shared state.

pub mod sample;
pub mod schema;
pub mod validate;

pub use sample::three_zone_classroom;
pub use schema::*;
pub use validate::{validate_description, ValidationError};

pub type BuildingResult<T> = Result<T, BuildingError>;

#[derive(thiserror::Error, Debug)]
pub enum BuildingError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> BuildingResult<BuildingDescription> {
    let content = std::fs::read_to_string(path)?;
    let description: BuildingDescription = serde_yaml::from_str(&content)?;
    validate_description(&description)?;
    Ok(description)
}

pub fn save_yaml(path: &std::path::Path, description: &BuildingDescription) -> BuildingResult<()> {
    validate_description(description)?;
    let content = serde_yaml::to_string(description)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> BuildingResult<BuildingDescription> {
    let content = std::fs::read_to_string(path)?;
    let description: BuildingDescription = serde_json::from_str(&content)?;
    validate_description(&description)?;
    Ok(description)
}

pub fn save_json(path: &std::path::Path, description: &BuildingDescription) -> BuildingResult<()> {
    validate_description(description)?;
    let content = serde_json::to_string_pretty(description)?;
    std::fs::write(path, content)?;
    Ok(())
}
