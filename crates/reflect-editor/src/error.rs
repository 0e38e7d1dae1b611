//! Error types for the editor component.

use reflect_core::error::ReflectError;

use crate::state::EditorPhase;

/// Errors from the reflection editor.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("reflection has no identifier")]
    MissingId,
    #[error("a save is already in flight")]
    Busy,
    #[error("draft is empty")]
    EmptyDraft,
    #[error("invalid editor transition: {from} -> {to}")]
    InvalidTransition {
        from: EditorPhase,
        to: EditorPhase,
    },
    #[error("editor state lock poisoned: {0}")]
    LockPoisoned(String),
    #[error("store error: {0}")]
    Store(String),
}

impl From<ReflectError> for EditorError {
    fn from(err: ReflectError) -> Self {
        EditorError::Store(err.to_string())
    }
}
