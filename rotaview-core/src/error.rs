//! Error types for rotaview.

use thiserror::Error;

/// Errors that can occur while loading documents or configuration.
///
/// The schedule transforms themselves never fail; malformed input is
/// tolerated and contributes nothing.
#[derive(Error, Debug)]
pub enum RotaviewError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),
}

/// Result type alias for rotaview operations.
pub type RotaviewResult<T> = Result<T, RotaviewError>;
