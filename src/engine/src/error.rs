//! Error types for the GroupScope engine

use thiserror::Error;

/// Engine errors
///
/// Domain conditions (dangling references, empty scope, malformed exclusion
/// text, disabled vocabularies) never surface here; they degrade to smaller
/// results. Only collaborator failures and unusable caller input do.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Collaborator failure, propagated unchanged
    #[error(transparent)]
    Collaborator(#[from] groupscope_core::CoreError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
