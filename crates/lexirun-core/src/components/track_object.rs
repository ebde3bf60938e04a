use glam::Vec3;
use serde::Serialize;

use crate::api::types::{Language, ObjectId};

/// What a track object is. Each variant carries only what it needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    Obstacle,
    Gem,
    WordOrb {
        word_id: String,
        text: String,
        language: Language,
    },
}

impl ObjectKind {
    pub fn word_orb(word_id: impl Into<String>, text: impl Into<String>, language: Language) -> Self {
        ObjectKind::WordOrb {
            word_id: word_id.into(),
            text: text.into(),
            language,
        }
    }

    pub fn is_word_orb(&self) -> bool {
        matches!(self, ObjectKind::WordOrb { .. })
    }
}

/// A spawned object on the track.
/// `pos.x` is the lateral lane position, `pos.y` the height, `pos.z` the
/// forward coordinate (negative ahead of the player, growing toward it).
#[derive(Debug, Clone, Serialize)]
pub struct TrackObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub pos: Vec3,
    /// Cleared on collision or when the object leaves the track.
    pub active: bool,
}

impl TrackObject {
    pub fn new(id: ObjectId, kind: ObjectKind) -> Self {
        Self {
            id,
            kind,
            pos: Vec3::ZERO,
            active: true,
        }
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }
}
