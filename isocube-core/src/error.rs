//! Error types for isocube

use thiserror::Error;

/// Errors raised while loading scene configuration or palette colors.
///
/// Projection, topology and animation sampling are total and never fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed scene config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene config: {0}")]
    InvalidConfig(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type alias for isocube operations
pub type Result<T> = std::result::Result<T, Error>;
