//! Error types for snuggle-renderer.
//!
//! Rendering itself is fail-soft and infallible; only context
//! construction from external input can error.

use thiserror::Error;

/// All errors that can arise from building a [`crate::TemplateContext`]
/// out of caller-supplied JSON.
#[derive(Debug, Error)]
pub enum ContextError {
    /// JSON parse error.
    #[error("context JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but is not a JSON object.
    #[error("context must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },
}
