use serde::{Deserialize, Serialize};

use crate::assets::vocabulary::Category;

/// Invalid or unreadable configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Complete tuning for a game. Every field has a default, so a JSON
/// override only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub track: TrackConfig,
    pub scoring: ScoringConfig,
    pub run: RunConfig,
    pub player: PlayerConfig,
    pub shop: ShopConfig,
}

/// Spawn and collision tuning for the track engine.
/// Distances are in world units along the run axis (z grows toward the camera).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Lateral distance between lane centers.
    pub lane_width: f32,
    /// Objects are created at z = -spawn_distance.
    pub spawn_distance: f32,
    /// Objects past z = remove_distance are discarded.
    pub remove_distance: f32,
    /// Distance travelled before the first spawn of a run.
    pub first_spawn_distance: f32,
    /// Lower bound of the randomized gap between spawns.
    pub spawn_gap_min: f32,
    /// Upper bound (exclusive) of the randomized gap between spawns.
    pub spawn_gap_max: f32,
    /// Maximum number of live objects on the track.
    pub max_objects: usize,
    /// Upper bound for a single tick's delta time, in seconds.
    pub max_frame_dt: f32,
    /// Half-depth of the collision band around the player plane (z = 0).
    pub collision_band: f32,
    /// Maximum lateral distance for a collision.
    pub lateral_tolerance: f32,
    /// Maximum vertical distance for picking up gems and orbs.
    pub pickup_tolerance: f32,
    /// Obstacles hit a player whose feet are below this height.
    pub obstacle_clearance: f32,
    /// Height at which gems and orbs float.
    pub pickup_height: f32,
    /// While holding a word: chance that a spawn is the matching orb.
    pub match_orb_chance: f64,
    /// While not holding: chance that a spawn is a word orb.
    pub word_orb_chance: f64,
    /// Chance that a fresh orb shows the source-language side.
    pub source_first_chance: f64,
    /// Chance that a non-word spawn is a gem rather than an obstacle.
    pub gem_chance: f64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            lane_width: 2.2,
            spawn_distance: 120.0,
            remove_distance: 20.0,
            first_spawn_distance: 10.0,
            spawn_gap_min: 20.0,
            spawn_gap_max: 40.0,
            max_objects: 50,
            max_frame_dt: 0.05,
            collision_band: 0.8,
            lateral_tolerance: 0.8,
            pickup_tolerance: 1.3,
            obstacle_clearance: 1.6,
            pickup_height: 1.2,
            match_orb_chance: 0.85,
            word_orb_chance: 0.5,
            source_first_chance: 0.95,
            gem_chance: 0.3,
        }
    }
}

/// Points, combo and progression rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub base_points: u64,
    /// A match within this many milliseconds of the previous one extends the combo.
    pub combo_window_ms: f64,
    pub max_combo: u32,
    /// Multiplier gained per combo tier above 1.
    pub combo_step: f64,
    pub mismatch_penalty: u64,
    /// Speed added by every correct match.
    pub speed_step: f32,
    /// Matches needed before a quiz is forced.
    pub matches_to_advance: u32,
    pub quiz_bonus: u64,
    pub gem_value: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_points: 200,
            combo_window_ms: 4000.0,
            max_combo: 10,
            combo_step: 0.25,
            mismatch_penalty: 50,
            speed_step: 0.5,
            matches_to_advance: 5,
            quiz_bonus: 500,
            gem_value: 50,
        }
    }
}

/// Values a fresh run starts from, plus run-wide timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub base_speed: f32,
    /// Speed added per level after a passed quiz.
    pub level_speed_step: f32,
    pub starting_lives: u32,
    pub lane_count: u32,
    pub starting_words: usize,
    pub starting_difficulty: u8,
    /// Words drawn from the catalog after each passed quiz.
    pub words_per_level: usize,
    /// Mastery at which a word graduates to the learned list.
    pub mastery_to_learn: u32,
    /// Graduation never shrinks the active pool below this size.
    pub min_active_words: usize,
    pub immortality_ms: f64,
    pub achievement_popup_ms: f64,
    pub default_categories: Vec<Category>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_speed: 20.0,
            level_speed_step: 2.0,
            starting_lives: 3,
            lane_count: 3,
            starting_words: 5,
            starting_difficulty: 2,
            words_per_level: 3,
            mastery_to_learn: 3,
            min_active_words: 3,
            immortality_ms: 5000.0,
            achievement_popup_ms: 3000.0,
            default_categories: vec![Category::Animals, Category::Food, Category::Nature],
        }
    }
}

/// Avatar movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub gravity: f32,
    pub jump_velocity: f32,
    pub fast_drop_velocity: f32,
    /// Second jump velocity as a fraction of the first.
    pub double_jump_factor: f32,
    /// How quickly the avatar slides toward its lane (per second).
    pub lane_lerp_rate: f32,
    /// Obstacle hits are ignored for this long after a hit.
    pub hit_invulnerability_ms: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            gravity: 52.0,
            jump_velocity: 16.5,
            fast_drop_velocity: -24.0,
            double_jump_factor: 0.9,
            lane_lerp_rate: 20.0,
            hit_invulnerability_ms: 1500.0,
        }
    }
}

/// Default shop prices, in score points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub double_jump: u64,
    pub max_life: u64,
    pub heal: u64,
    pub immortality: u64,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            double_jump: 1000,
            max_life: 1500,
            heal: 1000,
            immortality: 3000,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.track;
        if !(t.spawn_gap_min > 0.0 && t.spawn_gap_min < t.spawn_gap_max) {
            return Err(ConfigError::Invalid(format!(
                "spawn gap range [{}, {}) is empty or non-positive",
                t.spawn_gap_min, t.spawn_gap_max
            )));
        }
        if t.max_objects == 0 {
            return Err(ConfigError::Invalid("max_objects must be positive".into()));
        }
        if t.max_frame_dt <= 0.0 {
            return Err(ConfigError::Invalid("max_frame_dt must be positive".into()));
        }
        let chances = [
            ("match_orb_chance", t.match_orb_chance),
            ("word_orb_chance", t.word_orb_chance),
            ("source_first_chance", t.source_first_chance),
            ("gem_chance", t.gem_chance),
        ];
        for (name, p) in chances {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!("{name} = {p} is not a probability")));
            }
        }
        let r = &self.run;
        if r.lane_count == 0 || r.lane_count % 2 == 0 {
            return Err(ConfigError::Invalid(format!(
                "lane_count must be odd, got {}",
                r.lane_count
            )));
        }
        if r.starting_lives == 0 {
            return Err(ConfigError::Invalid("starting_lives must be at least 1".into()));
        }
        if !(1..=3).contains(&r.starting_difficulty) {
            return Err(ConfigError::Invalid(format!(
                "starting_difficulty must be 1..=3, got {}",
                r.starting_difficulty
            )));
        }
        if r.default_categories.is_empty() {
            return Err(ConfigError::Invalid("default_categories is empty".into()));
        }
        let s = &self.scoring;
        if s.max_combo == 0 || s.matches_to_advance == 0 {
            return Err(ConfigError::Invalid(
                "max_combo and matches_to_advance must be positive".into(),
            ));
        }
        Ok(())
    }
}
