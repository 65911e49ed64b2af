//! Error types for the vigil_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for vigil_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Empty or malformed catalog supplied
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Navigation request outside valid bounds; state is left unchanged
    #[error("Index {index} out of range (valid: 0..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A group key that does not exist in the catalog
    #[error("Unknown group '{0}'")]
    UnknownGroup(String),

    /// State management error
    #[error("State error: {0}")]
    State(String),
}
