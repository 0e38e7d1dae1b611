use serde::{Deserialize, Serialize};

use crate::types::{ReflectionId, Timestamp};

/// Domain events emitted by the editor after state changes.
///
/// Events are broadcast for observers (status displays, audit logging) and
/// never carried back into the editor; dropping every receiver is harmless.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EditorEvent {
    /// A save was accepted and the persistence call is in flight.
    SaveStarted {
        id: ReflectionId,
        timestamp: Timestamp,
    },

    /// The persistence call succeeded and the completion callback ran.
    Saved {
        id: ReflectionId,
        body_length: usize,
        timestamp: Timestamp,
    },

    /// The save attempt failed. `id` is `None` when the record had no
    /// identifier and the store was never called.
    SaveFailed {
        id: Option<ReflectionId>,
        timestamp: Timestamp,
    },

    /// A voice transcript increment was appended to the draft.
    TranscriptAppended {
        appended_length: usize,
        draft_length: usize,
        timestamp: Timestamp,
    },

    /// The voice widget reported a transcription failure.
    VoiceFailed { timestamp: Timestamp },

    /// Editing was cancelled without saving.
    Cancelled { timestamp: Timestamp },
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_event_json_round_trip() {
        let event = EditorEvent::Saved {
            id: ReflectionId::new("r1"),
            body_length: 42,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: EditorEvent = serde_json::from_str(&json).unwrap();
        match back {
            EditorEvent::Saved {
                id, body_length, ..
            } => {
                assert_eq!(id.as_str(), "r1");
                assert_eq!(body_length, 42);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_save_failed_without_id_serializes() {
        let event = EditorEvent::SaveFailed {
            id: None,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("SaveFailed"));
    }
}
