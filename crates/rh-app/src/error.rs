//! Error types for the rh-app service layer.

/// Application error type that wraps errors from the backend crates and
/// provides a unified interface for frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Building description error: {0}")]
    Building(#[from] rh_building::BuildingError),

    #[error("Topology error: {0}")]
    Graph(#[from] rh_graph::GraphError),

    #[error("Control error: {0}")]
    Control(#[from] rh_controls::ControlError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] rh_sim::SimError),

    #[error("Unknown zone: {0}")]
    UnknownZone(String),

    #[error("Unknown volume: {0}")]
    UnknownVolume(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for rh-app operations.
pub type AppResult<T> = Result<T, AppError>;
