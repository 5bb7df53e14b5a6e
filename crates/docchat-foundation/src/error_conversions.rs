//! Cross-crate error conversions for docchat-foundation
//!
//! Implements `From<DomainError> for DocChatError` so errors defined in
//! this crate flow into the kernel's unified error with `?`.

use docchat_kernel::DocChatError;

// ============================================================================
// LoaderError → DocChatError
// ============================================================================

impl From<crate::rag::loaders::LoaderError> for DocChatError {
    fn from(err: crate::rag::loaders::LoaderError) -> Self {
        DocChatError::Loader(err.to_string())
    }
}

// ============================================================================
// PromptError → DocChatError
// ============================================================================

impl From<crate::prompt::PromptError> for DocChatError {
    fn from(err: crate::prompt::PromptError) -> Self {
        DocChatError::Prompt(err.to_string())
    }
}
