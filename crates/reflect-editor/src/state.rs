//! Editor state snapshot and phase transitions.
//!
//! The editing lifecycle is a two-phase state machine:
//! - Idle -> Saving (save accepted, persistence call in flight)
//! - Saving -> Idle (persistence call resolved, success or failure)
//!
//! All transitions are validated before being applied, so the busy flag can
//! never drift out of sync with an in-flight save.

use std::fmt;

use crate::error::EditorError;

/// Operational phase of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorPhase {
    /// No save in progress. Editing and save/cancel triggers are live.
    Idle,
    /// A persistence call is in flight. Save and cancel are disabled.
    Saving,
}

impl fmt::Display for EditorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorPhase::Idle => write!(f, "Idle"),
            EditorPhase::Saving => write!(f, "Saving"),
        }
    }
}

impl EditorPhase {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &EditorPhase) -> bool {
        matches!(
            (self, target),
            (EditorPhase::Idle, EditorPhase::Saving) | (EditorPhase::Saving, EditorPhase::Idle)
        )
    }
}

/// Snapshot of the editor's local state.
///
/// The draft is initialized from the input record's body and fully replaced
/// on each edit. The error message is user-facing and cleared at the start
/// of every save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    /// Current draft text.
    pub draft: String,
    /// Current lifecycle phase.
    pub phase: EditorPhase,
    /// User-facing error message from the last failed operation, if any.
    pub error: Option<String>,
}

impl EditorState {
    /// Create a fresh state with the given initial draft.
    pub fn new(draft: impl Into<String>) -> Self {
        Self {
            draft: draft.into(),
            phase: EditorPhase::Idle,
            error: None,
        }
    }

    /// Whether the save trigger is enabled: not busy and the trimmed draft
    /// is non-empty.
    pub fn can_save(&self) -> bool {
        self.phase == EditorPhase::Idle && !self.draft.trim().is_empty()
    }

    /// Whether edits and cancel are accepted. Both are disabled while a
    /// save is in flight.
    pub fn is_busy(&self) -> bool {
        self.phase == EditorPhase::Saving
    }

    fn transition(&mut self, target: EditorPhase) -> Result<(), EditorError> {
        if self.phase.can_transition_to(&target) {
            tracing::debug!("Editor phase: {} -> {}", self.phase, target);
            self.phase = target;
            Ok(())
        } else {
            Err(EditorError::InvalidTransition {
                from: self.phase,
                to: target,
            })
        }
    }

    /// Enter the Saving phase, clearing any prior error message.
    pub fn begin_save(&mut self) -> Result<(), EditorError> {
        self.transition(EditorPhase::Saving)?;
        self.error = None;
        Ok(())
    }

    /// Leave the Saving phase after a successful persistence call.
    pub fn complete_save(&mut self) -> Result<(), EditorError> {
        self.transition(EditorPhase::Idle)
    }

    /// Leave the Saving phase after a failed persistence call, surfacing a
    /// user-facing message. The draft is preserved for retry.
    pub fn fail_save(&mut self, message: impl Into<String>) -> Result<(), EditorError> {
        self.transition(EditorPhase::Idle)?;
        self.error = Some(message.into());
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_display() {
        assert_eq!(EditorPhase::Idle.to_string(), "Idle");
        assert_eq!(EditorPhase::Saving.to_string(), "Saving");
    }

    #[test]
    fn test_valid_transitions() {
        assert!(EditorPhase::Idle.can_transition_to(&EditorPhase::Saving));
        assert!(EditorPhase::Saving.can_transition_to(&EditorPhase::Idle));
    }

    #[test]
    fn test_invalid_transitions() {
        // Cannot transition to self.
        assert!(!EditorPhase::Idle.can_transition_to(&EditorPhase::Idle));
        assert!(!EditorPhase::Saving.can_transition_to(&EditorPhase::Saving));
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = EditorState::new("hello");
        assert_eq!(state.phase, EditorPhase::Idle);
        assert_eq!(state.draft, "hello");
        assert!(state.error.is_none());
        assert!(!state.is_busy());
    }

    #[test]
    fn test_can_save_requires_nonempty_draft() {
        assert!(EditorState::new("hello").can_save());
        assert!(!EditorState::new("").can_save());
        assert!(!EditorState::new("   \n\t").can_save());
    }

    #[test]
    fn test_can_save_false_while_saving() {
        let mut state = EditorState::new("hello");
        state.begin_save().unwrap();
        assert!(!state.can_save());
        assert!(state.is_busy());
    }

    #[test]
    fn test_begin_save_clears_prior_error() {
        let mut state = EditorState::new("hello");
        state.error = Some("old error".to_string());
        state.begin_save().unwrap();
        assert!(state.error.is_none());
    }

    #[test]
    fn test_double_begin_save_fails() {
        let mut state = EditorState::new("hello");
        state.begin_save().unwrap();
        let result = state.begin_save();
        assert!(matches!(
            result,
            Err(EditorError::InvalidTransition { .. })
        ));
        // Still saving; the failed attempt changed nothing.
        assert_eq!(state.phase, EditorPhase::Saving);
    }

    #[test]
    fn test_save_success_cycle() {
        let mut state = EditorState::new("hello");
        state.begin_save().unwrap();
        state.complete_save().unwrap();
        assert_eq!(state.phase, EditorPhase::Idle);
        assert!(state.error.is_none());
        assert_eq!(state.draft, "hello");
    }

    #[test]
    fn test_save_failure_cycle_preserves_draft() {
        let mut state = EditorState::new("hello");
        state.begin_save().unwrap();
        state.fail_save("save failed").unwrap();
        assert_eq!(state.phase, EditorPhase::Idle);
        assert_eq!(state.error.as_deref(), Some("save failed"));
        assert_eq!(state.draft, "hello");
        // Eligible for retry.
        assert!(state.can_save());
    }

    #[test]
    fn test_complete_save_from_idle_fails() {
        let mut state = EditorState::new("hello");
        let result = state.complete_save();
        assert!(matches!(
            result,
            Err(EditorError::InvalidTransition { .. })
        ));
    }
}
