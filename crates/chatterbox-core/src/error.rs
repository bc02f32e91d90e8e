use thiserror::Error;

/// Top-level error type for the Chatterbox service.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for ChatterboxError` so that the `?` operator works
/// across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatterboxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ChatterboxError {
    fn from(err: toml::de::Error) -> Self {
        ChatterboxError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ChatterboxError {
    fn from(err: toml::ser::Error) -> Self {
        ChatterboxError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ChatterboxError {
    fn from(err: serde_json::Error) -> Self {
        ChatterboxError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Chatterbox operations.
pub type Result<T> = std::result::Result<T, ChatterboxError>;
