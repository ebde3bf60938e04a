use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::api::audio::AudioRequest;
use crate::api::game::GameConfig;
use crate::api::types::{event_kinds, GameEvent, HeldWord, Language, SoundKind};
use crate::assets::vocabulary::{ActiveWord, Category, WordSource, WritingMode};
use crate::core::scheduler::Scheduler;
use crate::core::time::RunClock;
use crate::game::achievements::{AchievementContext, AchievementId};
use crate::game::quiz::{build_quiz, OPTION_COUNT};
use crate::game::scoring::{apply_penalty, match_points, next_combo};
use crate::game::shop::ShopItem;
use crate::game::state::{GameStatus, RunState};

/// Handle returned by [`GameStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Effects applied after a delay, only if their run is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    ExpireImmortality,
    ClearAchievementPopup(AchievementId),
}

/// What a [`GameStore::collect_word`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// First half of a pair, now held.
    Held,
    Matched { points: u64, combo: u32 },
    Mismatched,
    /// No run in progress.
    Ignored,
}

type Observer = Box<dyn FnMut(&RunState)>;

/// Owns the progression state of a game and every rule that changes it.
///
/// Each public action mutates [`RunState`] and then notifies observers once.
/// Side effects for the audio layer and the presentation are queued and
/// collected with [`GameStore::drain_audio`] and [`GameStore::drain_events`].
pub struct GameStore {
    config: GameConfig,
    words: Box<dyn WordSource>,
    rng: ChaCha8Rng,
    clock: RunClock,
    timers: Scheduler<Deferred>,
    state: RunState,
    audio: Vec<AudioRequest>,
    events: Vec<GameEvent>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl GameStore {
    pub fn new(config: GameConfig, words: Box<dyn WordSource>, seed: u64) -> Self {
        let state = RunState::new(&config);
        Self {
            config,
            words,
            rng: ChaCha8Rng::seed_from_u64(seed),
            clock: RunClock::new(),
            timers: Scheduler::new(),
            state,
            audio: Vec::with_capacity(16),
            events: Vec::with_capacity(16),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    pub fn is_immortal(&self) -> bool {
        self.state.inventory.immortality_active
    }

    // -- Run lifecycle --------------------------------------------------

    /// Start a fresh run from the selected categories.
    pub fn start_game(&mut self) {
        let session = self.state.session.next();
        self.timers.cancel_session_except(session);

        let words: Vec<ActiveWord> = self
            .words
            .sample_words(
                &self.state.selected_categories,
                self.config.run.starting_words,
                self.config.run.starting_difficulty,
                &[],
                &mut self.rng,
            )
            .into_iter()
            .map(ActiveWord::new)
            .collect();
        if words.is_empty() {
            log::warn!("no words available for {:?}", self.state.selected_categories);
        }

        self.state.reset_run(&self.config, session, words);
        log::info!(
            "run {} started with {} words",
            session.0,
            self.state.active_words.len()
        );
        self.notify();
    }

    pub fn restart_game(&mut self) {
        self.start_game();
    }

    // -- Collisions -------------------------------------------------------

    /// Handle a collected word orb: hold it, or try to pair it with the held one.
    pub fn collect_word(&mut self, word_id: &str, text: &str, language: Language) -> CollectOutcome {
        if !self.state.is_playing() {
            log::warn!("collect_word({}) ignored in {:?}", word_id, self.state.status);
            return CollectOutcome::Ignored;
        }

        self.audio.push(AudioRequest::Speak {
            text: text.to_string(),
            language,
        });

        let pairs = self
            .state
            .held_word
            .as_ref()
            .map(|held| held.pairs_with(word_id, language));
        let outcome = match pairs {
            None => {
                self.state.held_word = Some(HeldWord::new(word_id, text, language));
                CollectOutcome::Held
            }
            Some(true) => self.apply_match(word_id),
            Some(false) => self.apply_mismatch(),
        };
        self.notify();
        outcome
    }

    fn apply_match(&mut self, word_id: &str) -> CollectOutcome {
        let now = self.clock.now_ms();
        let scoring = &self.config.scoring;
        let s = &mut self.state;

        let combo = next_combo(s.combo, now - s.last_match_ms, scoring);
        let points = match_points(combo, scoring);

        s.held_word = None;
        s.score += points;
        s.combo = combo;
        s.max_combo = s.max_combo.max(combo);
        s.streak += 1;
        s.last_match_ms = now;
        s.matches_made += 1;
        s.speed += scoring.speed_step;
        if let Some(word) = s.active_words.iter_mut().find(|w| w.id() == word_id) {
            word.mastery += 1;
        }
        s.stats.total_matches += 1;
        s.stats.highest_combo = s.stats.highest_combo.max(combo);
        s.stats.highest_streak = s.stats.highest_streak.max(s.streak);

        log::debug!("match {} +{} (combo {})", word_id, points, combo);
        self.audio.push(AudioRequest::Sound(SoundKind::CorrectMatch));
        self.events.push(GameEvent::new(
            event_kinds::WORD_MATCHED,
            points as f32,
            combo as f32,
            0.0,
        ));

        self.unlock_achievements();
        if self.state.matches_made >= self.config.scoring.matches_to_advance {
            self.begin_quiz();
        }
        CollectOutcome::Matched { points, combo }
    }

    fn apply_mismatch(&mut self) -> CollectOutcome {
        let s = &mut self.state;
        s.held_word = None;
        s.combo = 0;
        s.streak = 0;
        s.score = apply_penalty(s.score, &self.config.scoring);

        self.audio.push(AudioRequest::Sound(SoundKind::WrongMatch));
        self.events.push(GameEvent::new(
            event_kinds::WORD_MISMATCHED,
            self.state.score as f32,
            0.0,
            0.0,
        ));
        CollectOutcome::Mismatched
    }

    /// Award a collected gem.
    pub fn collect_gem(&mut self, value: u64) {
        if !self.state.is_playing() {
            return;
        }
        self.state.score += value;
        self.state.gems_collected += 1;
        self.state.stats.gems_collected += 1;
        self.audio.push(AudioRequest::Sound(SoundKind::GemCollect));
        self.unlock_achievements();
        self.notify();
    }

    /// Lose a life. Returns false when nothing happened (immortal, or no run).
    pub fn take_damage(&mut self) -> bool {
        let applied = self.apply_damage();
        if applied {
            self.notify();
        }
        applied
    }

    fn apply_damage(&mut self) -> bool {
        if !self.state.status.in_run() || self.state.inventory.immortality_active {
            return false;
        }
        let s = &mut self.state;
        s.combo = 0;
        s.streak = 0;
        s.held_word = None;

        if s.lives > 1 {
            s.lives -= 1;
            self.audio.push(AudioRequest::Sound(SoundKind::WrongMatch));
            log::debug!("hit, {} lives left", s.lives);
        } else {
            s.lives = 0;
            s.status = GameStatus::GameOver;
            s.speed = 0.0;
            s.quiz = None;
            log::info!("run {} over with score {}", s.session.0, s.score);
            self.events.push(GameEvent::new(
                event_kinds::GAME_OVER,
                self.state.score as f32,
                0.0,
                0.0,
            ));
        }
        true
    }

    // -- Quiz -----------------------------------------------------------

    /// Stop the world and ask a question about a known word.
    pub fn start_quiz(&mut self) {
        if self.begin_quiz() {
            self.notify();
        }
    }

    fn begin_quiz(&mut self) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        let quiz = build_quiz(
            self.state.known_words(),
            self.state.writing_mode,
            &mut self.rng,
        );
        let Some(quiz) = quiz else {
            log::warn!("quiz skipped: no known words");
            return false;
        };

        let s = &mut self.state;
        s.quiz = Some(quiz);
        s.status = GameStatus::Quiz;
        s.speed = 0.0;
        s.matches_made = 0;
        s.held_word = None;
        self.events.push(GameEvent::new(
            event_kinds::QUIZ_STARTED,
            OPTION_COUNT as f32,
            0.0,
            0.0,
        ));
        true
    }

    /// Check a quiz answer. Correct answers level up and resume the run;
    /// wrong ones cost a life and keep the quiz open while lives remain.
    pub fn answer_quiz(&mut self, answer: &str) -> bool {
        if self.state.status != GameStatus::Quiz {
            log::warn!("answer_quiz ignored in {:?}", self.state.status);
            return false;
        }
        let Some(quiz) = self.state.quiz.as_ref() else {
            return false;
        };

        let correct = quiz.is_correct(answer, self.state.writing_mode);
        if correct {
            let question = quiz.question.jp.clone();
            self.audio.push(AudioRequest::Sound(SoundKind::CorrectMatch));
            self.audio.push(AudioRequest::Speak {
                text: question,
                language: Language::Source,
            });
            self.level_up();
            self.unlock_achievements();
        } else {
            self.audio.push(AudioRequest::Sound(SoundKind::WrongMatch));
            self.apply_damage();
        }
        self.notify();
        correct
    }

    fn level_up(&mut self) {
        let level = self.state.level + 1;
        let max_difficulty = (level / 2 + 1).min(3) as u8;

        let exclude: Vec<&str> = self.state.known_words().map(|w| w.id()).collect();
        let fresh = self.words.sample_words(
            &self.state.selected_categories,
            self.config.run.words_per_level,
            max_difficulty,
            &exclude,
            &mut self.rng,
        );
        let added = fresh.len();
        self.state
            .active_words
            .extend(fresh.into_iter().map(ActiveWord::new));
        let learned = self.graduate_words();

        let s = &mut self.state;
        s.level = level;
        s.score += self.config.scoring.quiz_bonus;
        s.speed = self.config.run.base_speed + level as f32 * self.config.run.level_speed_step;
        s.quiz = None;
        s.status = GameStatus::Playing;
        s.quizzes_completed += 1;
        s.stats.total_correct_quizzes += 1;
        s.stats.levels_completed += 1;

        log::info!(
            "level {} (+{} words, {} learned, difficulty {})",
            level,
            added,
            learned,
            max_difficulty
        );
        self.events.push(GameEvent::new(event_kinds::LEVEL_UP, level as f32, 0.0, 0.0));
    }

    /// Move mastered words to the learned list without starving the spawner.
    fn graduate_words(&mut self) -> u32 {
        let threshold = self.config.run.mastery_to_learn;
        let floor = self.config.run.min_active_words;
        let s = &mut self.state;

        let mut graduated = 0;
        while s.active_words.len() > floor {
            let Some(pos) = s.active_words.iter().position(|w| w.mastery >= threshold) else {
                break;
            };
            let word = s.active_words.remove(pos);
            log::debug!("learned {}", word.id());
            s.learned_words.push(word);
            graduated += 1;
        }
        s.stats.total_words_learned += graduated;
        graduated
    }

    // -- Shop -----------------------------------------------------------

    /// Buy `item` for `cost` points. Nothing is spent when the score is short.
    pub fn buy_item(&mut self, item: ShopItem, cost: u64) -> bool {
        let s = &mut self.state;
        if s.score < cost {
            return false;
        }
        s.score -= cost;
        match item {
            ShopItem::DoubleJump => s.inventory.has_double_jump = true,
            ShopItem::MaxLife => {
                s.max_lives += 1;
                s.lives += 1;
            }
            ShopItem::Heal => s.lives = (s.lives + 1).min(s.max_lives),
            ShopItem::Immortality => s.inventory.has_immortality = true,
        }
        log::info!("bought {:?} for {}", item, cost);
        self.notify();
        true
    }

    /// Buy `item` at its configured price.
    pub fn buy(&mut self, item: ShopItem) -> bool {
        let cost = item.price(&self.config.shop);
        self.buy_item(item, cost)
    }

    pub fn open_shop(&mut self) {
        if self.state.status == GameStatus::Playing {
            self.state.status = GameStatus::Shop;
            self.notify();
        }
    }

    pub fn close_shop(&mut self) {
        if self.state.status == GameStatus::Shop {
            self.state.status = GameStatus::Playing;
            self.notify();
        }
    }

    /// Turn on the owned immortality ability for a fixed time.
    pub fn activate_immortality(&mut self) {
        let inventory = &mut self.state.inventory;
        if !inventory.has_immortality || inventory.immortality_active {
            return;
        }
        inventory.immortality_active = true;
        self.timers.schedule(
            self.clock.now_ms(),
            self.config.run.immortality_ms,
            self.state.session,
            Deferred::ExpireImmortality,
        );
        log::info!("immortality on for {} ms", self.config.run.immortality_ms);
        self.notify();
    }

    // -- Settings -------------------------------------------------------

    pub fn set_writing_mode(&mut self, mode: WritingMode) {
        self.state.writing_mode = mode;
        self.notify();
    }

    /// Add or remove a category. The last selected category stays.
    pub fn toggle_category(&mut self, category: Category) {
        let selected = &mut self.state.selected_categories;
        if let Some(pos) = selected.iter().position(|c| *c == category) {
            if selected.len() == 1 {
                return;
            }
            selected.remove(pos);
        } else {
            selected.push(category);
        }
        self.notify();
    }

    pub fn set_selected_categories(&mut self, categories: Vec<Category>) {
        if categories.is_empty() {
            return;
        }
        self.state.selected_categories = categories;
        self.notify();
    }

    // -- Achievements ---------------------------------------------------

    /// Evaluate every locked achievement against the current state.
    pub fn check_achievements(&mut self) {
        if self.unlock_achievements() {
            self.notify();
        }
    }

    /// Returns true when something was unlocked. Only the first unlock of a
    /// pass becomes the popup.
    fn unlock_achievements(&mut self) -> bool {
        let now = self.clock.now_ms();
        let s = &mut self.state;
        let ctx = AchievementContext {
            stats: &s.stats,
            combo: s.combo,
            streak: s.streak,
            selected_categories: s.selected_categories.len(),
        };
        let unlocked = s.achievements.evaluate(&ctx, now);
        let Some(&first) = unlocked.first() else {
            return false;
        };

        for id in &unlocked {
            log::info!("achievement unlocked: {}", id.name());
        }
        s.new_achievement = Some(first);
        self.timers.schedule(
            now,
            self.config.run.achievement_popup_ms,
            s.session,
            Deferred::ClearAchievementPopup(first),
        );
        self.events.push(GameEvent::new(
            event_kinds::ACHIEVEMENT_UNLOCKED,
            first.index() as f32,
            0.0,
            0.0,
        ));
        true
    }

    pub fn clear_new_achievement(&mut self) {
        if self.state.new_achievement.take().is_some() {
            self.notify();
        }
    }

    // -- Frame plumbing -------------------------------------------------

    pub fn set_distance(&mut self, distance: f32) {
        self.state.distance = distance;
        self.notify();
    }

    /// Advance the game clock by `dt` seconds and apply deferred effects
    /// that belong to the current run.
    pub fn advance_time(&mut self, dt: f32) {
        self.clock.advance(dt);
        let now = self.clock.now_ms();
        self.state.now_ms = now;
        if self.state.is_playing() && dt > 0.0 {
            self.state.stats.total_play_time_ms += dt as f64 * 1000.0;
        }

        let mut changed = false;
        for (session, action) in self.timers.take_due(now) {
            if session != self.state.session {
                log::debug!("dropping stale {:?} from run {}", action, session.0);
                continue;
            }
            match action {
                Deferred::ExpireImmortality => {
                    self.state.inventory.immortality_active = false;
                    log::info!("immortality expired");
                }
                Deferred::ClearAchievementPopup(id) => {
                    if self.state.new_achievement == Some(id) {
                        self.state.new_achievement = None;
                    }
                }
            }
            changed = true;
        }
        if changed {
            self.notify();
        }
    }

    /// Queue a sound from outside the store (player movement, obstacle hits).
    pub fn play_sound(&mut self, kind: SoundKind) {
        self.audio.push(AudioRequest::Sound(kind));
    }

    pub fn drain_audio(&mut self) -> Vec<AudioRequest> {
        std::mem::take(&mut self.audio)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Observers ------------------------------------------------------

    /// Call `observer` with the new state after every action.
    pub fn subscribe(&mut self, observer: impl FnMut(&RunState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn notify(&mut self) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::vocabulary::Vocabulary;
    use crate::game::quiz::PLACEHOLDER;
    use std::cell::Cell;
    use std::rc::Rc;

    // Five easy words in the default categories, so a run always draws all
    // of them, plus harder words for level ups.
    const CATALOG: &str = r#"{
        "words": [
            { "id": "a1", "en": "Cat", "jp": "猫", "hiragana": "ねこ", "romaji": "neko", "category": "animals", "difficulty": 1 },
            { "id": "a2", "en": "Dog", "jp": "犬", "hiragana": "いぬ", "romaji": "inu", "category": "animals", "difficulty": 1 },
            { "id": "f1", "en": "Rice", "jp": "米", "hiragana": "こめ", "romaji": "kome", "category": "food", "difficulty": 1 },
            { "id": "f2", "en": "Water", "jp": "水", "hiragana": "みず", "romaji": "mizu", "category": "food", "difficulty": 1 },
            { "id": "n1", "en": "Tree", "jp": "木", "hiragana": "き", "romaji": "ki", "category": "nature", "difficulty": 2 },
            { "id": "n2", "en": "Mountain", "jp": "山", "hiragana": "やま", "romaji": "yama", "category": "nature", "difficulty": 3 },
            { "id": "n3", "en": "River", "jp": "川", "hiragana": "かわ", "romaji": "kawa", "category": "nature", "difficulty": 3 },
            { "id": "c1", "en": "Red", "jp": "赤", "hiragana": "あか", "romaji": "aka", "category": "colors", "difficulty": 1 }
        ]
    }"#;

    fn store() -> GameStore {
        let vocab = Vocabulary::from_json(CATALOG).unwrap();
        GameStore::new(GameConfig::default(), Box::new(vocab), 7)
    }

    fn started() -> GameStore {
        let mut store = store();
        store.start_game();
        store
    }

    fn match_pair(store: &mut GameStore, id: &str) -> CollectOutcome {
        store.collect_word(id, "jp-side", Language::Source);
        store.collect_word(id, "en-side", Language::Target)
    }

    fn correct_answer(store: &GameStore) -> String {
        let state = store.state();
        state.quiz.as_ref().unwrap().correct_answer(state.writing_mode).to_string()
    }

    #[test]
    fn start_game_draws_easy_words_and_plays() {
        let store = started();
        let state = store.state();
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.active_words.len(), 5);
        assert!(state.active_words.iter().all(|w| w.entry.difficulty <= 2));
        assert!(state.active_words.iter().all(|w| w.id() != "c1"));
        assert_eq!(state.lives, 3);
        assert_eq!(state.speed, 20.0);
    }

    #[test]
    fn pair_across_languages_scores() {
        let mut store = started();
        assert_eq!(
            store.collect_word("a1", "猫", Language::Source),
            CollectOutcome::Held
        );
        assert_eq!(store.state().held_word.as_ref().unwrap().word_id, "a1");

        let outcome = store.collect_word("a1", "Cat", Language::Target);
        assert_eq!(outcome, CollectOutcome::Matched { points: 200, combo: 1 });
        let state = store.state();
        assert_eq!(state.score, 200);
        assert_eq!(state.matches_made, 1);
        assert!(state.held_word.is_none());
        assert_eq!(state.speed, 20.5);
        assert_eq!(state.streak, 1);
        let cat = state.active_words.iter().find(|w| w.id() == "a1").unwrap();
        assert_eq!(cat.mastery, 1);
    }

    #[test]
    fn collecting_speaks_every_orb() {
        let mut store = started();
        store.drain_audio();
        store.collect_word("a1", "猫", Language::Source);
        store.collect_word("a1", "Cat", Language::Target);
        assert_eq!(
            store.drain_audio(),
            vec![
                AudioRequest::Speak { text: "猫".into(), language: Language::Source },
                AudioRequest::Speak { text: "Cat".into(), language: Language::Target },
                AudioRequest::Sound(SoundKind::CorrectMatch),
            ]
        );
    }

    #[test]
    fn same_language_twice_is_a_mismatch() {
        let mut store = started();
        store.collect_word("a1", "猫", Language::Source);
        let outcome = store.collect_word("a1", "猫", Language::Source);
        assert_eq!(outcome, CollectOutcome::Mismatched);
        let state = store.state();
        assert_eq!(state.score, 0);
        assert!(state.held_word.is_none());
        assert_eq!(state.combo, 0);
    }

    #[test]
    fn different_ids_mismatch_with_penalty() {
        let mut store = started();
        match_pair(&mut store, "a1");
        store.collect_word("a1", "猫", Language::Source);
        store.collect_word("a2", "Dog", Language::Target);
        let state = store.state();
        assert_eq!(state.score, 150);
        assert_eq!(state.combo, 0);
        assert_eq!(state.streak, 0);
        assert!(state.held_word.is_none());
    }

    #[test]
    fn combo_grows_inside_window_and_resets_after() {
        let mut store = started();
        assert_eq!(match_pair(&mut store, "a1"), CollectOutcome::Matched { points: 200, combo: 1 });
        store.advance_time(1.0);
        assert_eq!(match_pair(&mut store, "a2"), CollectOutcome::Matched { points: 250, combo: 2 });
        store.advance_time(5.0);
        assert_eq!(match_pair(&mut store, "f1"), CollectOutcome::Matched { points: 200, combo: 1 });
        assert_eq!(store.state().streak, 3);
        assert_eq!(store.state().max_combo, 2);
    }

    #[test]
    fn fifth_match_starts_quiz_in_same_call() {
        let mut store = started();
        for id in ["a1", "a2", "f1", "f2"] {
            match_pair(&mut store, id);
            assert_eq!(store.state().status, GameStatus::Playing);
        }
        match_pair(&mut store, "a1");
        let state = store.state();
        assert_eq!(state.status, GameStatus::Quiz);
        assert_eq!(state.speed, 0.0);
        assert_eq!(state.matches_made, 0);
        let quiz = state.quiz.as_ref().unwrap();
        assert_eq!(quiz.options.len(), 3);
    }

    #[test]
    fn collisions_are_ignored_outside_play() {
        let mut store = store();
        assert_eq!(
            store.collect_word("a1", "猫", Language::Source),
            CollectOutcome::Ignored
        );
        assert!(store.drain_audio().is_empty());
        assert!(!store.take_damage());
    }

    #[test]
    fn correct_answer_levels_up() {
        let mut store = started();
        store.start_quiz();
        let score = store.state().score;
        let answer = correct_answer(&store);

        assert!(store.answer_quiz(&answer));
        let state = store.state();
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.level, 2);
        assert_eq!(state.speed, 24.0);
        assert_eq!(state.score, score + 500);
        assert!(state.quiz.is_none());
        assert_eq!(state.stats.total_correct_quizzes, 1);
        assert_eq!(state.stats.levels_completed, 1);
        // Level 2 draws at difficulty <= 2: only the tree is left in the
        // selected categories, and it is already active.
        assert_eq!(state.active_words.len(), 5);
    }

    #[test]
    fn later_levels_draw_harder_words() {
        let mut store = started();
        for _ in 0..3 {
            store.start_quiz();
            let answer = correct_answer(&store);
            assert!(store.answer_quiz(&answer));
        }
        let state = store.state();
        assert_eq!(state.level, 4);
        let ids = state.active_word_ids();
        assert!(ids.contains(&"n2") && ids.contains(&"n3"));
        assert!(!ids.contains(&"c1"));
    }

    #[test]
    fn wrong_answer_costs_a_life_and_keeps_quiz() {
        let mut store = started();
        store.start_quiz();
        assert!(!store.answer_quiz(PLACEHOLDER));
        let state = store.state();
        assert_eq!(state.lives, 2);
        assert_eq!(state.status, GameStatus::Quiz);
        assert!(state.quiz.is_some());
    }

    #[test]
    fn wrong_answer_on_last_life_ends_run() {
        let mut store = started();
        store.take_damage();
        store.take_damage();
        store.start_quiz();
        assert!(!store.answer_quiz("nope"));
        let state = store.state();
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(state.speed, 0.0);
    }

    #[test]
    fn answering_without_quiz_is_guarded() {
        let mut store = started();
        assert!(!store.answer_quiz("猫"));
        assert_eq!(store.state().lives, 3);
    }

    #[test]
    fn damage_clears_held_word_and_combo() {
        let mut store = started();
        match_pair(&mut store, "a1");
        store.collect_word("a2", "犬", Language::Source);
        assert!(store.take_damage());
        let state = store.state();
        assert_eq!(state.lives, 2);
        assert_eq!(state.combo, 0);
        assert_eq!(state.streak, 0);
        assert!(state.held_word.is_none());
    }

    #[test]
    fn last_life_ends_run() {
        let mut store = started();
        for _ in 0..3 {
            store.take_damage();
        }
        let state = store.state();
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(state.speed, 0.0);
        assert!(!store.take_damage());
        assert!(store
            .drain_events()
            .iter()
            .any(|e| e.kind == event_kinds::GAME_OVER));
    }

    #[test]
    fn immortality_blocks_damage_until_it_expires() {
        let mut store = started();
        assert!(store.buy_item(ShopItem::Immortality, 0));
        store.activate_immortality();
        assert!(store.is_immortal());

        store.collect_word("a1", "猫", Language::Source);
        let before = store.state().clone();
        assert!(!store.take_damage());
        assert_eq!(store.state(), &before);

        store.advance_time(4.9);
        assert!(store.is_immortal());
        store.advance_time(0.2);
        assert!(!store.is_immortal());
        assert!(store.take_damage());
        assert_eq!(store.state().lives, 2);
    }

    #[test]
    fn stale_immortality_timer_does_not_touch_new_run() {
        let mut store = started();
        store.buy_item(ShopItem::Immortality, 0);
        store.activate_immortality();
        store.advance_time(3.0);

        store.restart_game();
        assert!(!store.is_immortal());
        store.buy_item(ShopItem::Immortality, 0);
        store.advance_time(1.0);
        store.activate_immortality();

        // The first run's timer would have fired at 5 s.
        store.advance_time(2.0);
        assert!(store.is_immortal());
        store.advance_time(3.5);
        assert!(!store.is_immortal());
    }

    #[test]
    fn activation_requires_ownership() {
        let mut store = started();
        store.activate_immortality();
        assert!(!store.is_immortal());
    }

    #[test]
    fn restart_resets_run_fields() {
        let mut store = started();
        match_pair(&mut store, "a1");
        store.buy_item(ShopItem::MaxLife, 0);
        store.collect_word("a2", "犬", Language::Source);
        for _ in 0..4 {
            store.take_damage();
        }
        assert_eq!(store.state().status, GameStatus::GameOver);

        store.restart_game();
        let state = store.state();
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.max_lives, 3);
        assert_eq!(state.matches_made, 0);
        assert!(state.held_word.is_none());
        assert_eq!(state.speed, 20.0);
        assert_eq!(state.stats.total_matches, 1);
    }

    #[test]
    fn purchases_need_enough_score() {
        let mut store = started();
        match_pair(&mut store, "a1");
        assert!(!store.buy_item(ShopItem::DoubleJump, 1000));
        assert_eq!(store.state().score, 200);

        assert!(store.buy_item(ShopItem::DoubleJump, 150));
        assert_eq!(store.state().score, 50);
        assert!(store.state().inventory.has_double_jump);
    }

    #[test]
    fn heal_caps_at_max_and_max_life_grows_both() {
        let mut store = started();
        store.buy_item(ShopItem::Heal, 0);
        assert_eq!(store.state().lives, 3);
        store.take_damage();
        store.buy_item(ShopItem::Heal, 0);
        assert_eq!(store.state().lives, 3);
        store.buy_item(ShopItem::MaxLife, 0);
        assert_eq!((store.state().lives, store.state().max_lives), (4, 4));
    }

    #[test]
    fn shop_opens_only_from_play() {
        let mut store = store();
        store.open_shop();
        assert_eq!(store.state().status, GameStatus::Menu);
        store.start_game();
        store.open_shop();
        assert_eq!(store.state().status, GameStatus::Shop);
        store.close_shop();
        assert_eq!(store.state().status, GameStatus::Playing);
    }

    #[test]
    fn gems_add_score_and_lifetime_count() {
        let mut store = started();
        store.collect_gem(50);
        store.collect_gem(50);
        let state = store.state();
        assert_eq!(state.score, 100);
        assert_eq!(state.gems_collected, 2);
        assert_eq!(state.stats.gems_collected, 2);
    }

    #[test]
    fn first_match_shows_popup_that_clears_itself() {
        let mut store = started();
        match_pair(&mut store, "a1");
        assert_eq!(store.state().new_achievement, Some(AchievementId::FirstMatch));
        store.advance_time(2.9);
        assert!(store.state().new_achievement.is_some());
        store.advance_time(0.2);
        assert!(store.state().new_achievement.is_none());
    }

    #[test]
    fn old_popup_timer_leaves_newer_popup_alone() {
        let mut store = started();
        match_pair(&mut store, "a1");
        store.clear_new_achievement();
        store.advance_time(1.0);
        for id in ["a2", "f1", "f2", "a1"] {
            match_pair(&mut store, id);
        }
        // Five rapid matches: combo 5 unlocks two achievements, the first wins.
        assert_eq!(store.state().new_achievement, Some(AchievementId::SpeedDemon));
        assert!(store.state().achievements.is_unlocked(AchievementId::ComboKing));

        store.advance_time(2.5);
        assert_eq!(store.state().new_achievement, Some(AchievementId::SpeedDemon));
        store.advance_time(1.0);
        assert!(store.state().new_achievement.is_none());
    }

    #[test]
    fn categories_keep_at_least_one() {
        let mut store = store();
        store.set_selected_categories(vec![Category::Food]);
        store.toggle_category(Category::Food);
        assert_eq!(store.state().selected_categories, vec![Category::Food]);
        store.toggle_category(Category::Colors);
        assert_eq!(
            store.state().selected_categories,
            vec![Category::Food, Category::Colors]
        );
        store.set_selected_categories(Vec::new());
        assert_eq!(store.state().selected_categories.len(), 2);
    }

    #[test]
    fn mastered_words_graduate_after_quiz() {
        let mut store = started();
        for _ in 0..3 {
            match_pair(&mut store, "a1");
        }
        store.start_quiz();
        let answer = correct_answer(&store);
        store.answer_quiz(&answer);

        let state = store.state();
        assert!(state.learned_words.iter().any(|w| w.id() == "a1"));
        assert!(state.active_words.iter().all(|w| w.id() != "a1"));
        assert_eq!(state.stats.total_words_learned, 1);
    }

    #[test]
    fn observers_see_each_action_once() {
        let mut store = started();
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let id = store.subscribe(move |_| seen.set(seen.get() + 1));

        for id in ["a1", "a2", "f1", "f2"] {
            match_pair(&mut store, id);
        }
        assert_eq!(calls.get(), 8);
        // The fifth match also starts the quiz, still one notification.
        store.collect_word("a1", "猫", Language::Source);
        store.collect_word("a1", "Cat", Language::Target);
        assert_eq!(calls.get(), 10);

        assert!(store.unsubscribe(id));
        store.start_game();
        assert_eq!(calls.get(), 10);
    }

    #[test]
    fn play_time_counts_only_while_playing() {
        let mut store = store();
        store.advance_time(1.0);
        assert_eq!(store.state().stats.total_play_time_ms, 0.0);
        store.start_game();
        store.advance_time(0.5);
        assert!((store.state().stats.total_play_time_ms - 500.0).abs() < 1e-6);
    }
}
