use thiserror::Error;

/// Main error type for the tailmotion crate
///
/// Only the file-facing parts (config, bundling, writing) produce errors. The
/// animation helpers degrade to inert values instead.
#[derive(Debug, Error)]
pub enum MotionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Circular @import detected at {path}")]
    CircularImport { path: String },

    #[error("Failed to read stylesheet {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to write output to {path}: {message}")]
    OutputError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, MotionError>;
