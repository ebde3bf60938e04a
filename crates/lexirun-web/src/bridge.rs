use lexirun_core::{AudioBridge, AudioError, Language, SoundKind};
use wasm_bindgen::prelude::*;

// Provided by the page as `window.lexirunAudio = { speak, playSound }`.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = lexirunAudio, js_name = speak)]
    fn js_speak(text: &str, lang: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = lexirunAudio, js_name = playSound)]
    fn js_play_sound(kind: &str) -> Result<(), JsValue>;
}

/// Forwards audio requests to the TypeScript audio manager.
/// Speech is asynchronous on the JS side; only the synchronous call can fail here.
#[derive(Debug, Default)]
pub struct JsAudioBridge;

impl AudioBridge for JsAudioBridge {
    fn speak(&mut self, text: &str, language: Language) -> Result<(), AudioError> {
        js_speak(text, language.speech_code()).map_err(|e| AudioError::Speech(format!("{:?}", e)))
    }

    fn play_sound(&mut self, kind: SoundKind) -> Result<(), AudioError> {
        js_play_sound(kind.name()).map_err(|e| AudioError::Playback(format!("{:?}", e)))
    }
}
