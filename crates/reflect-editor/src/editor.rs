//! The reflection editor component.
//!
//! `ReflectionEditor` owns the draft text and busy/error state for one
//! editing session. It orchestrates two injected collaborators, a
//! `ReflectionStore` for persistence and a `SpeechSource` for voice input,
//! and reports completion or cancellation to its owner via callbacks.
//!
//! The editor never mutates the record it was given; a successful save hands
//! the completion callback a new record with the updated body and timestamp.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::broadcast;

use reflect_core::error::ReflectError;
use reflect_core::events::EditorEvent;
use reflect_core::types::Reflection;

use crate::draft::append_transcript;
use crate::error::EditorError;
use crate::speech::SpeechSource;
use crate::state::{EditorPhase, EditorState};
use crate::store::ReflectionStore;

/// Fixed user-facing message for any failed save attempt.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save reflection. Please try again.";

/// Fixed user-facing message for any voice transcription failure.
pub const VOICE_FAILED_MESSAGE: &str =
    "Failed to process voice input. Please try again or use text input.";

/// Invoked with the updated record after a successful save.
pub type SaveCallback = Box<dyn Fn(Reflection) + Send + Sync>;

/// Invoked when the user cancels the editing session.
pub type CancelCallback = Box<dyn Fn() + Send + Sync>;

const EVENT_CHANNEL_CAPACITY: usize = 32;

/// A single editing session over one reflection record.
pub struct ReflectionEditor {
    /// The input record. Never mutated; `save` derives a new value from it.
    reflection: Reflection,
    state: Arc<Mutex<EditorState>>,
    store: Arc<dyn ReflectionStore>,
    on_save: SaveCallback,
    on_cancel: CancelCallback,
    events: broadcast::Sender<EditorEvent>,
}

impl std::fmt::Debug for ReflectionEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReflectionEditor")
            .field("reflection", &self.reflection)
            .field("state", &self.state)
            .finish()
    }
}

impl ReflectionEditor {
    /// Create an editor for the given record.
    ///
    /// The draft initializes to the record's body. `on_save` receives the
    /// updated record after a successful save; `on_cancel` fires when the
    /// session is cancelled.
    pub fn new(
        reflection: Reflection,
        store: Arc<dyn ReflectionStore>,
        on_save: SaveCallback,
        on_cancel: CancelCallback,
    ) -> Self {
        let state = EditorState::new(reflection.reflection.clone());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            reflection,
            state: Arc::new(Mutex::new(state)),
            store,
            on_save,
            on_cancel,
            events,
        }
    }

    /// Subscribe to the editor's domain events.
    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.events.subscribe()
    }

    /// Returns a snapshot of the current editor state.
    pub fn snapshot(&self) -> EditorState {
        // A poisoned lock still holds a coherent state; recover the guard.
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Returns the current draft text.
    pub fn draft(&self) -> String {
        self.snapshot().draft
    }

    /// Returns the current user-facing error message, if any.
    pub fn error(&self) -> Option<String> {
        self.snapshot().error
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> EditorPhase {
        self.snapshot().phase
    }

    /// Whether the save trigger is enabled.
    pub fn can_save(&self) -> bool {
        self.snapshot().can_save()
    }

    /// Replace the draft text entirely.
    ///
    /// Rejected while a save is in flight; the text area is disabled then.
    pub fn set_draft(&self, text: impl Into<String>) -> Result<(), EditorError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| EditorError::LockPoisoned(e.to_string()))?;
        if state.is_busy() {
            return Err(EditorError::Busy);
        }
        state.draft = text.into();
        Ok(())
    }

    /// Handle a transcribed text increment from the voice widget.
    ///
    /// Accepted in any phase; an increment arriving while a save is in
    /// flight lands in the draft but not in the outcome of that save.
    pub fn handle_transcript(&self, text: &str) {
        apply_transcript(&self.state, &self.events, text);
    }

    /// Handle a transcription failure reported by the voice widget.
    ///
    /// Surfaces the fixed voice-failure message. The draft is untouched and
    /// an in-flight save is not aborted.
    pub fn handle_voice_error(&self, error: &ReflectError) {
        apply_voice_failure(&self.state, &self.events, error);
    }

    /// Wire a speech source to this editor's transcript and error handlers.
    pub fn attach_speech(&self, source: &mut dyn SpeechSource) {
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let on_transcript = Box::new(move |text: String| {
            apply_transcript(&state, &events, &text);
        });

        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let on_error = Box::new(move |error: ReflectError| {
            apply_voice_failure(&state, &events, &error);
        });

        source.attach(on_transcript, on_error);
    }

    /// Save the current draft.
    ///
    /// Ineligible attempts (busy, or trimmed-empty draft) and a missing
    /// record identifier fail without reaching the store. Otherwise the
    /// editor goes busy, calls the store with the draft captured at this
    /// point, and on success invokes the completion callback with a new
    /// record carrying the draft body and a fresh timestamp. On failure the
    /// fixed save-failure message is surfaced and the draft is preserved so
    /// the user may retry.
    pub async fn save(&self) -> Result<(), EditorError> {
        // Eligibility, the identifier check, and the transition to Saving
        // happen under a single guard so no edit can slip in between them.
        let (id, draft) = {
            let mut state = self
                .state
                .lock()
                .map_err(|e| EditorError::LockPoisoned(e.to_string()))?;
            if state.is_busy() {
                return Err(EditorError::Busy);
            }
            if state.draft.trim().is_empty() {
                return Err(EditorError::EmptyDraft);
            }
            let Some(id) = self.reflection.id.clone() else {
                tracing::error!("Save attempted on a reflection with no identifier");
                state.error = Some(SAVE_FAILED_MESSAGE.to_string());
                let _ = self.events.send(EditorEvent::SaveFailed {
                    id: None,
                    timestamp: Utc::now(),
                });
                return Err(EditorError::MissingId);
            };
            state.begin_save()?;
            (id, state.draft.clone())
        };

        tracing::info!(id = %id, body_length = draft.len(), "Saving reflection");
        let _ = self.events.send(EditorEvent::SaveStarted {
            id: id.clone(),
            timestamp: Utc::now(),
        });

        match self.store.update_reflection(&id, &draft).await {
            Ok(()) => {
                {
                    let mut state = self
                        .state
                        .lock()
                        .map_err(|e| EditorError::LockPoisoned(e.to_string()))?;
                    state.complete_save()?;
                }
                let updated = self.reflection.with_body(draft);
                tracing::info!(id = %id, "Reflection saved");
                let _ = self.events.send(EditorEvent::Saved {
                    id: id.clone(),
                    body_length: updated.reflection.len(),
                    timestamp: Utc::now(),
                });
                (self.on_save)(updated);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, id = %id, "Failed to save reflection");
                {
                    let mut state = self
                        .state
                        .lock()
                        .map_err(|e| EditorError::LockPoisoned(e.to_string()))?;
                    state.fail_save(SAVE_FAILED_MESSAGE)?;
                }
                let _ = self.events.send(EditorEvent::SaveFailed {
                    id: Some(id),
                    timestamp: Utc::now(),
                });
                Err(EditorError::Store(e.to_string()))
            }
        }
    }

    /// Cancel the editing session.
    ///
    /// Rejected while a save is in flight, mirroring the save trigger's own
    /// disablement. Never touches persisted state.
    pub fn cancel(&self) -> Result<(), EditorError> {
        {
            let state = self
                .state
                .lock()
                .map_err(|e| EditorError::LockPoisoned(e.to_string()))?;
            if state.is_busy() {
                return Err(EditorError::Busy);
            }
        }
        tracing::info!("Editing cancelled");
        let _ = self.events.send(EditorEvent::Cancelled {
            timestamp: Utc::now(),
        });
        (self.on_cancel)();
        Ok(())
    }
}

fn apply_transcript(
    state: &Mutex<EditorState>,
    events: &broadcast::Sender<EditorEvent>,
    text: &str,
) {
    let appended = text.trim();
    if appended.is_empty() {
        tracing::debug!("Ignoring empty voice transcript");
        return;
    }
    // A poisoned lock still holds a coherent state; recover the guard.
    let mut state = state.lock().unwrap_or_else(|e| e.into_inner());
    state.draft = append_transcript(&state.draft, text);
    tracing::debug!(
        appended_length = appended.len(),
        draft_length = state.draft.len(),
        "Voice transcript appended"
    );
    let _ = events.send(EditorEvent::TranscriptAppended {
        appended_length: appended.len(),
        draft_length: state.draft.len(),
        timestamp: Utc::now(),
    });
}

fn apply_voice_failure(
    state: &Mutex<EditorState>,
    events: &broadcast::Sender<EditorEvent>,
    error: &ReflectError,
) {
    tracing::error!(error = %error, "Voice input error");
    let mut state = state.lock().unwrap_or_else(|e| e.into_inner());
    state.error = Some(VOICE_FAILED_MESSAGE.to_string());
    let _ = events.send(EditorEvent::VoiceFailed {
        timestamp: Utc::now(),
    });
}

// =============================================================================
// Tests
// =============================================================================
