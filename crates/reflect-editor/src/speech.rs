//! Speech-to-text capability for voice-input augmentation.
//!
//! The editor hands a speech source two handlers and otherwise does not
//! control the widget's lifecycle. The real transcription engine lives
//! outside this crate; `ScriptedSpeech` is a deterministic stand-in for
//! tests and the demo binary.

use reflect_core::error::ReflectError;

/// Handler invoked with each transcribed text increment.
pub type TranscriptHandler = Box<dyn Fn(String) + Send + Sync>;

/// Handler invoked when the speech source reports a transcription failure.
pub type VoiceErrorHandler = Box<dyn Fn(ReflectError) + Send + Sync>;

/// A source of transcribed speech increments.
pub trait SpeechSource {
    /// Hand the source its transcript and error handlers. Replaces any
    /// previously attached handlers.
    fn attach(&mut self, on_transcript: TranscriptHandler, on_error: VoiceErrorHandler);
}

/// One scripted emission from a `ScriptedSpeech` source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechItem {
    /// A successfully transcribed text increment.
    Transcript(String),
    /// A transcription failure with a diagnostic message.
    Failure(String),
}

/// Deterministic speech source that replays a fixed script.
pub struct ScriptedSpeech {
    script: Vec<SpeechItem>,
    on_transcript: Option<TranscriptHandler>,
    on_error: Option<VoiceErrorHandler>,
}

impl ScriptedSpeech {
    /// Create a source that will replay the given items in order.
    pub fn new(script: Vec<SpeechItem>) -> Self {
        Self {
            script,
            on_transcript: None,
            on_error: None,
        }
    }

    /// Emit every scripted item to the attached handlers.
    ///
    /// Items emitted before `attach` was called are dropped silently, the
    /// same way a real widget speaks into the void until wired up.
    pub fn play(&self) {
        for item in &self.script {
            match item {
                SpeechItem::Transcript(text) => {
                    if let Some(ref handler) = self.on_transcript {
                        handler(text.clone());
                    }
                }
                SpeechItem::Failure(message) => {
                    if let Some(ref handler) = self.on_error {
                        handler(ReflectError::Voice(message.clone()));
                    }
                }
            }
        }
    }
}

impl SpeechSource for ScriptedSpeech {
    fn attach(&mut self, on_transcript: TranscriptHandler, on_error: VoiceErrorHandler) {
        self.on_transcript = Some(on_transcript);
        self.on_error = Some(on_error);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_scripted_speech_emits_in_order() {
        let transcripts = Arc::new(Mutex::new(Vec::new()));
        let errors = Arc::new(Mutex::new(Vec::new()));

        let mut source = ScriptedSpeech::new(vec![
            SpeechItem::Transcript("hello".to_string()),
            SpeechItem::Failure("microphone unavailable".to_string()),
            SpeechItem::Transcript("world".to_string()),
        ]);

        let t = Arc::clone(&transcripts);
        let e = Arc::clone(&errors);
        source.attach(
            Box::new(move |text| t.lock().unwrap().push(text)),
            Box::new(move |err| e.lock().unwrap().push(err.to_string())),
        );
        source.play();

        assert_eq!(*transcripts.lock().unwrap(), vec!["hello", "world"]);
        let errors = errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("microphone unavailable"));
    }

    #[test]
    fn test_play_without_handlers_is_silent() {
        let source = ScriptedSpeech::new(vec![SpeechItem::Transcript("dropped".to_string())]);
        // No attach; nothing to observe, nothing to panic.
        source.play();
    }
}
