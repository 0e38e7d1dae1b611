//! Reflect Editor crate - draft state machine, voice append, and save/cancel
//! orchestration.
//!
//! Provides the headless `ReflectionEditor` component that manages one
//! editing session over a reflection record. Persistence and speech-to-text
//! are injected capability traits (`ReflectionStore`, `SpeechSource`), so
//! the component runs identically under tests, the demo binary, and a real
//! frontend.

pub mod draft;
pub mod editor;
pub mod error;
pub mod speech;
pub mod state;
pub mod store;

pub use editor::{
    CancelCallback, ReflectionEditor, SaveCallback, SAVE_FAILED_MESSAGE, VOICE_FAILED_MESSAGE,
};
pub use error::EditorError;
pub use speech::{ScriptedSpeech, SpeechItem, SpeechSource, TranscriptHandler, VoiceErrorHandler};
pub use state::{EditorPhase, EditorState};
pub use store::{MemoryStore, ReflectionStore};
