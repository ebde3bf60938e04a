use serde::Serialize;

use crate::api::game::GameConfig;
use crate::api::types::HeldWord;
use crate::assets::vocabulary::{ActiveWord, Category, WritingMode};
use crate::core::scheduler::SessionId;
use crate::game::achievements::{AchievementBook, AchievementId};
use crate::game::quiz::Quiz;

/// Top-level game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[default]
    Menu,
    Playing,
    Quiz,
    Shop,
    GameOver,
}

impl GameStatus {
    /// Statuses in which a run is in progress.
    pub fn in_run(self) -> bool {
        matches!(self, GameStatus::Playing | GameStatus::Quiz | GameStatus::Shop)
    }
}

/// Lifetime counters. Survive restarts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub total_words_learned: u32,
    pub total_matches: u32,
    pub total_correct_quizzes: u32,
    pub highest_combo: u32,
    pub highest_streak: u32,
    pub total_play_time_ms: f64,
    pub gems_collected: u32,
    pub levels_completed: u32,
}

/// Abilities owned in the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub has_double_jump: bool,
    pub has_immortality: bool,
    pub immortality_active: bool,
}

/// Everything the presentation layer reads.
///
/// Run-scoped fields are reset by a new run; `stats`, `achievements`,
/// `selected_categories` and `writing_mode` persist across runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    pub status: GameStatus,
    pub score: u64,
    pub lives: u32,
    pub max_lives: u32,
    pub level: u32,
    pub speed: f32,
    pub lane_count: u32,
    pub distance: f32,
    pub gems_collected: u32,

    pub active_words: Vec<ActiveWord>,
    pub learned_words: Vec<ActiveWord>,
    pub held_word: Option<HeldWord>,
    /// Correct matches since the last quiz.
    pub matches_made: u32,

    pub combo: u32,
    pub max_combo: u32,
    pub streak: u32,
    pub last_match_ms: f64,

    pub quiz: Option<Quiz>,
    pub quizzes_completed: u32,
    pub inventory: Inventory,

    pub selected_categories: Vec<Category>,
    pub writing_mode: WritingMode,
    pub achievements: AchievementBook,
    pub new_achievement: Option<AchievementId>,
    pub stats: PlayerStats,

    pub session: SessionId,
    /// Game-clock time of the last state change.
    pub now_ms: f64,
}

impl RunState {
    /// Menu state before the first run.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            status: GameStatus::Menu,
            score: 0,
            lives: config.run.starting_lives,
            max_lives: config.run.starting_lives,
            level: 1,
            speed: config.run.base_speed,
            lane_count: config.run.lane_count,
            distance: 0.0,
            gems_collected: 0,
            active_words: Vec::new(),
            learned_words: Vec::new(),
            held_word: None,
            matches_made: 0,
            combo: 0,
            max_combo: 0,
            streak: 0,
            last_match_ms: 0.0,
            quiz: None,
            quizzes_completed: 0,
            inventory: Inventory::default(),
            selected_categories: config.run.default_categories.clone(),
            writing_mode: WritingMode::default(),
            achievements: AchievementBook::new(),
            new_achievement: None,
            stats: PlayerStats::default(),
            session: SessionId::default(),
            now_ms: 0.0,
        }
    }

    /// Reset every run-scoped field for a fresh run.
    /// Lifetime stats, achievements and settings are left alone.
    pub fn reset_run(&mut self, config: &GameConfig, session: SessionId, words: Vec<ActiveWord>) {
        self.status = GameStatus::Playing;
        self.score = 0;
        self.lives = config.run.starting_lives;
        self.max_lives = config.run.starting_lives;
        self.level = 1;
        self.speed = config.run.base_speed;
        self.lane_count = config.run.lane_count;
        self.distance = 0.0;
        self.gems_collected = 0;
        self.active_words = words;
        self.learned_words.clear();
        self.held_word = None;
        self.matches_made = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.streak = 0;
        self.last_match_ms = self.now_ms;
        self.quiz = None;
        self.quizzes_completed = 0;
        self.inventory = Inventory::default();
        self.new_achievement = None;
        self.session = session;
    }

    pub fn active_word_ids(&self) -> Vec<&str> {
        self.active_words.iter().map(|w| w.id()).collect()
    }

    /// Active words followed by learned ones: the quiz pool.
    pub fn known_words(&self) -> impl Iterator<Item = &ActiveWord> {
        self.active_words.iter().chain(self.learned_words.iter())
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }
}
