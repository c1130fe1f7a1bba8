/// Core error types for Aster Alarm
use crate::types::TrackId;
use thiserror::Error;

/// Result type alias using `AsterError`
pub type Result<T> = std::result::Result<T, AsterError>;

/// Core error type for Aster Alarm
#[derive(Error, Debug)]
pub enum AsterError {
    /// Category table failed validation
    #[error("Invalid category registry: {0}")]
    InvalidRegistry(String),

    /// Track not present in the current session
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data-fetch collaborator failed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl AsterError {
    /// Create an invalid registry error
    pub fn invalid_registry(msg: impl Into<String>) -> Self {
        Self::InvalidRegistry(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }
}

impl From<config::ConfigError> for AsterError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
