//! Crate-level error types for `docchat-kernel`.
//!
//! [`DocChatError`] composes the typed errors of every sub-module so that
//! the `?` operator converts them automatically at orchestration layers
//! (ingestion, retrieval QA). Domain errors defined in `docchat-foundation`
//! convert into it through `From` impls living in that crate.

use crate::config::ConfigError;
use crate::llm::ModelError;
use crate::rag::IndexError;
use thiserror::Error;

/// Unified error for docchat operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocChatError {
    /// A remote model call failed or returned an unusable envelope.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// The similarity index is missing, corrupt or incompatible.
    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    /// Configuration could not be loaded or is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A source document could not be loaded.
    #[error("Loader error: {0}")]
    Loader(String),

    /// A prompt template could not be rendered.
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// The caller supplied unusable input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A low-level I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for docchat operations.
pub type DocChatResult<T> = Result<T, DocChatError>;
