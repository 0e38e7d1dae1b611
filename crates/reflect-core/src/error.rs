use thiserror::Error;

/// Top-level error type for the Reflect system.
///
/// Each variant wraps a subsystem-specific failure. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for ReflectError`
/// so that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReflectError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Voice input error: {0}")]
    Voice(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ReflectError {
    fn from(err: toml::de::Error) -> Self {
        ReflectError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ReflectError {
    fn from(err: toml::ser::Error) -> Self {
        ReflectError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ReflectError {
    fn from(err: serde_json::Error) -> Self {
        ReflectError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Reflect operations.
pub type Result<T> = std::result::Result<T, ReflectError>;
