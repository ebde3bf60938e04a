use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Unique identifier for a track object within one run.
/// Assigned monotonically by the track engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Which side of a word pair an orb shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// The language being learned (Japanese).
    #[serde(rename = "jp")]
    Source,
    /// The player's own language (English).
    #[serde(rename = "en")]
    Target,
}

impl Language {
    /// The other side of the pair.
    pub fn opposite(self) -> Self {
        match self {
            Language::Source => Language::Target,
            Language::Target => Language::Source,
        }
    }

    /// Language code handed to the speech synthesizer.
    pub fn speech_code(self) -> &'static str {
        match self {
            Language::Source => "ja",
            Language::Target => "en",
        }
    }

    /// Short tag used by the presentation layer ("jp" / "en").
    pub fn tag(self) -> &'static str {
        match self {
            Language::Source => "jp",
            Language::Target => "en",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "jp" | "ja" => Some(Language::Source),
            "en" => Some(Language::Target),
            _ => None,
        }
    }
}

/// The orb the player is carrying, waiting for its translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldWord {
    pub word_id: String,
    pub text: String,
    pub language: Language,
}

impl HeldWord {
    pub fn new(word_id: impl Into<String>, text: impl Into<String>, language: Language) -> Self {
        Self {
            word_id: word_id.into(),
            text: text.into(),
            language,
        }
    }

    /// Two orbs pair up when they are the two sides of the same word.
    pub fn pairs_with(&self, word_id: &str, language: Language) -> bool {
        self.word_id == word_id && self.language != language
    }
}

/// Sounds the game logic can request.
/// The numeric value maps to a sound in the TypeScript audio manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u32)]
pub enum SoundKind {
    GemCollect = 1,
    CorrectMatch = 2,
    WrongMatch = 3,
    Jump = 4,
    Damage = 5,
}

impl SoundKind {
    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            SoundKind::GemCollect => "gemCollect",
            SoundKind::CorrectMatch => "correctMatch",
            SoundKind::WrongMatch => "wrongMatch",
            SoundKind::Jump => "jump",
            SoundKind::Damage => "damage",
        }
    }
}

/// A game event handed to the presentation layer once per frame.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
/// See [`event_kinds`] for the meaning of each kind.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// Event kinds written into [`GameEvent::kind`].
pub mod event_kinds {
    /// a = x, b = y, c = object id
    pub const OBSTACLE_HIT: f32 = 1.0;
    /// a = x, b = y, c = object id
    pub const GEM_COLLECTED: f32 = 2.0;
    /// a = x, b = y, c = object id
    pub const ORB_COLLECTED: f32 = 3.0;
    /// a = points awarded, b = combo tier
    pub const WORD_MATCHED: f32 = 4.0;
    /// a = score after penalty
    pub const WORD_MISMATCHED: f32 = 5.0;
    /// a = number of options
    pub const QUIZ_STARTED: f32 = 6.0;
    /// a = new level
    pub const LEVEL_UP: f32 = 7.0;
    /// a = final score
    pub const GAME_OVER: f32 = 8.0;
    /// a = achievement index
    pub const ACHIEVEMENT_UNLOCKED: f32 = 9.0;
}
