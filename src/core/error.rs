//! Error types for the build systems

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// A placement candidate has no usable collision shape
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Mesh error: {0}")]
    Mesh(String),

    #[error("Entity error: {0}")]
    Entity(String),
}
