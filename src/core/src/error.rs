//! Unified error types for GroupScope
//!
//! Collaborators (storage, membership, grants, permissions) report their own
//! infrastructure failures through [`CoreError`]. The engine never produces
//! these for domain conditions such as a dangling term or an empty scope.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for GroupScope collaborators
#[derive(Debug, Error)]
pub enum CoreError {
    /// Backing store failed to answer a lookup
    #[error("Storage error: {0}")]
    Storage(String),

    /// A record that must exist for the operation is missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/Deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input/state
    #[error("Invalid: {0}")]
    Invalid(String),

    /// I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create a storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        CoreError::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        CoreError::NotFound(msg.into())
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        CoreError::Configuration(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        CoreError::Invalid(msg.into())
    }

    /// Whether the error came from the backing store rather than the caller
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, CoreError::Storage(_) | CoreError::Io(_))
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}
