//! Browser bindings for the LexiRun game core.
//!
//! One [`GameSession`] lives in a `thread_local!`; TypeScript drives it through
//! the free functions below: `game_init` once, `game_tick` every animation
//! frame, input and UI actions as they happen, and JSON reads for rendering.

mod bridge;

use std::cell::RefCell;

use lexirun_core::{
    Category, GameConfig, GameSession, InputEvent, ShopItem, Vocabulary, WordSource, WritingMode,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use bridge::JsAudioBridge;

thread_local! {
    static SESSION: RefCell<Option<GameSession<JsAudioBridge>>> = RefCell::new(None);
}

/// Run `f` against the session. Before `game_init` it logs and returns the default.
fn with_session<R: Default>(f: impl FnOnce(&mut GameSession<JsAudioBridge>) -> R) -> R {
    SESSION.with(|cell| match cell.borrow_mut().as_mut() {
        Some(session) => f(session),
        None => {
            log::warn!("game not initialized, call game_init() first");
            R::default()
        }
    })
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::error!("state serialization failed: {}", err);
        "null".to_string()
    })
}

fn load_words(vocabulary_json: Option<String>) -> Result<Box<dyn WordSource>, JsValue> {
    let vocabulary = match vocabulary_json {
        Some(json) => Vocabulary::from_json(&json),
        #[cfg(feature = "builtin-vocabulary")]
        None => Vocabulary::builtin(),
        #[cfg(not(feature = "builtin-vocabulary"))]
        None => return Err(JsValue::from_str("no vocabulary provided")),
    };
    let vocabulary = vocabulary.map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::info!("vocabulary: {} words", vocabulary.len());
    Ok(Box::new(vocabulary))
}

/// Create the session. `config_json` may be partial; missing values use defaults.
#[wasm_bindgen]
pub fn game_init(config_json: Option<String>, vocabulary_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json {
        Some(json) => GameConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => GameConfig::default(),
    };
    let words = load_words(vocabulary_json)?;
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64 ^ js_sys::Date::now() as u64;

    let session = GameSession::new(config, words, JsAudioBridge, seed);
    SESSION.with(|cell| {
        *cell.borrow_mut() = Some(session);
    });
    log::info!("lexirun: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_session(|s| s.tick(dt));
}

// ---- Player input ----

#[wasm_bindgen]
pub fn game_lane_left() {
    with_session(|s| s.push_input(InputEvent::LaneLeft));
}

#[wasm_bindgen]
pub fn game_lane_right() {
    with_session(|s| s.push_input(InputEvent::LaneRight));
}

#[wasm_bindgen]
pub fn game_jump() {
    with_session(|s| s.push_input(InputEvent::Jump));
}

#[wasm_bindgen]
pub fn game_fast_drop() {
    with_session(|s| s.push_input(InputEvent::FastDrop));
}

#[wasm_bindgen]
pub fn game_activate_ability() {
    with_session(|s| s.push_input(InputEvent::ActivateAbility));
}

/// Forward a `KeyboardEvent.code`. Returns true if the key is bound.
#[wasm_bindgen]
pub fn game_key_down(code: &str) -> bool {
    match InputEvent::from_key(code) {
        Some(event) => with_session(|s| {
            s.push_input(event);
            true
        }),
        None => false,
    }
}

// ---- UI actions ----

#[wasm_bindgen]
pub fn game_start() {
    with_session(|s| s.store_mut().start_game());
}

#[wasm_bindgen]
pub fn game_restart() {
    with_session(|s| s.store_mut().restart_game());
}

#[wasm_bindgen]
pub fn game_answer_quiz(answer: &str) -> bool {
    with_session(|s| s.store_mut().answer_quiz(answer))
}

/// Buy by item name (`DOUBLE_JUMP`, `MAX_LIFE`, `HEAL`, `IMMORTAL`).
/// Without `cost` the configured price applies.
#[wasm_bindgen]
pub fn game_buy_item(item: &str, cost: Option<f64>) -> bool {
    let Some(item) = ShopItem::from_name(item) else {
        log::warn!("unknown shop item {}", item);
        return false;
    };
    with_session(|s| match cost {
        Some(cost) => s.store_mut().buy_item(item, cost.max(0.0) as u64),
        None => s.store_mut().buy(item),
    })
}

#[wasm_bindgen]
pub fn game_open_shop() {
    with_session(|s| s.store_mut().open_shop());
}

#[wasm_bindgen]
pub fn game_close_shop() {
    with_session(|s| s.store_mut().close_shop());
}

#[wasm_bindgen]
pub fn game_set_writing_mode(mode: &str) -> bool {
    match WritingMode::from_name(mode) {
        Some(mode) => with_session(|s| {
            s.store_mut().set_writing_mode(mode);
            true
        }),
        None => false,
    }
}

#[wasm_bindgen]
pub fn game_toggle_category(name: &str) -> bool {
    match Category::from_name(name) {
        Some(category) => with_session(|s| {
            s.store_mut().toggle_category(category);
            true
        }),
        None => false,
    }
}

/// Replace the selection with a JSON array of category names.
#[wasm_bindgen]
pub fn game_set_categories(json: &str) -> bool {
    match serde_json::from_str::<Vec<Category>>(json) {
        Ok(categories) => with_session(|s| {
            s.store_mut().set_selected_categories(categories);
            true
        }),
        Err(err) => {
            log::warn!("bad category list: {}", err);
            false
        }
    }
}

#[wasm_bindgen]
pub fn game_clear_achievement() {
    with_session(|s| s.store_mut().clear_new_achievement());
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_state_json() -> String {
    with_session(|s| to_json(s.state()))
}

#[wasm_bindgen]
pub fn get_objects_json() -> String {
    with_session(|s| to_json(s.track().objects()))
}

#[wasm_bindgen]
pub fn get_player_x() -> f32 {
    with_session(|s| s.player().position().x)
}

#[wasm_bindgen]
pub fn get_player_y() -> f32 {
    with_session(|s| s.player().position().y)
}

#[wasm_bindgen]
pub fn get_player_lane() -> i32 {
    with_session(|s| s.player().lane())
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    SESSION.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |s| s.events_ptr())
    })
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_session(|s| s.events_len())
}
