use crate::api::types::{Language, SoundKind};

/// Failure reported by an [`AudioBridge`]. Never reaches gameplay code:
/// [`dispatch_audio`] logs and drops it.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("speech synthesis failed: {0}")]
    Speech(String),
    #[error("sound playback failed: {0}")]
    Playback(String),
    #[error("audio backend unavailable")]
    Unavailable,
}

/// A side-effect request queued by the game logic during a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioRequest {
    Speak { text: String, language: Language },
    Sound(SoundKind),
}

/// The narrow interface to the audio / text-to-speech collaborator.
///
/// Implementations start playback and return immediately; whatever happens
/// afterwards must not feed back into game state.
pub trait AudioBridge {
    fn speak(&mut self, text: &str, language: Language) -> Result<(), AudioError>;
    fn play_sound(&mut self, kind: SoundKind) -> Result<(), AudioError>;
}

/// Forward queued requests to the bridge. Failures are logged and swallowed.
pub fn dispatch_audio<A: AudioBridge + ?Sized>(bridge: &mut A, requests: Vec<AudioRequest>) {
    for request in requests {
        let result = match &request {
            AudioRequest::Speak { text, language } => bridge.speak(text, *language),
            AudioRequest::Sound(kind) => bridge.play_sound(*kind),
        };
        if let Err(err) = result {
            log::warn!("audio request {:?} dropped: {}", request, err);
        }
    }
}

/// Bridge that discards everything. Used for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioBridge for SilentAudio {
    fn speak(&mut self, _text: &str, _language: Language) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_sound(&mut self, _kind: SoundKind) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Bridge that remembers every request it received.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    pub spoken: Vec<(String, Language)>,
    pub sounds: Vec<SoundKind>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.spoken.clear();
        self.sounds.clear();
    }
}

impl AudioBridge for RecordingAudio {
    fn speak(&mut self, text: &str, language: Language) -> Result<(), AudioError> {
        self.spoken.push((text.to_string(), language));
        Ok(())
    }

    fn play_sound(&mut self, kind: SoundKind) -> Result<(), AudioError> {
        self.sounds.push(kind);
        Ok(())
    }
}
