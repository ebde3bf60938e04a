use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::api::audio::{dispatch_audio, AudioBridge};
use crate::api::game::GameConfig;
use crate::api::types::{event_kinds, GameEvent, SoundKind};
use crate::assets::vocabulary::WordSource;
use crate::components::track_object::ObjectKind;
use crate::core::scheduler::SessionId;
use crate::core::time::clamp_dt;
use crate::game::state::{GameStatus, RunState};
use crate::game::store::GameStore;
use crate::input::player::PlayerController;
use crate::input::queue::{InputEvent, InputQueue};
use crate::systems::spawn::SpawnContext;
use crate::systems::track::{ResolvedCollision, TrackEngine};

/// Wires the store, the track and the avatar into one frame loop.
///
/// The presentation layer owns one session, pushes input, calls
/// [`GameSession::tick`] once per rendered frame and reads state back.
/// UI actions (menus, quiz answers, shop) go through [`GameSession::store_mut`].
pub struct GameSession<A: AudioBridge> {
    store: GameStore,
    track: TrackEngine,
    player: PlayerController,
    input: InputQueue,
    audio: A,
    rng: ChaCha8Rng,
    last_status: GameStatus,
    last_session: SessionId,
    /// Events produced during the last tick.
    frame_events: Vec<GameEvent>,
}

impl<A: AudioBridge> GameSession<A> {
    pub fn new(config: GameConfig, words: Box<dyn WordSource>, audio: A, seed: u64) -> Self {
        let track = TrackEngine::new(config.track.clone());
        let player = PlayerController::new(config.player.clone(), config.track.lane_width);
        let store = GameStore::new(config, words, seed);
        let last_session = store.state().session;
        Self {
            store,
            track,
            player,
            input: InputQueue::new(),
            audio,
            rng: ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
            last_status: GameStatus::Menu,
            last_session,
            frame_events: Vec::with_capacity(16),
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let dt = clamp_dt(dt, self.track.config().max_frame_dt);
        self.frame_events.clear();

        self.sync_status();
        self.handle_input();
        self.player.update(dt);

        if self.store.state().is_playing() {
            let collisions = {
                let state = self.store.state();
                let ctx = SpawnContext {
                    held: state.held_word.as_ref(),
                    pool: &state.active_words,
                    lane_count: state.lane_count,
                };
                self.track
                    .advance(dt, state.speed, self.player.position(), &ctx, &mut self.rng)
            };
            for hit in collisions {
                self.resolve(hit);
                // A quiz or game over ends the frame's collision handling.
                if !self.store.state().is_playing() {
                    break;
                }
            }
            self.store.set_distance(self.track.distance());
        }

        self.store.advance_time(dt);
        self.sync_status();

        dispatch_audio(&mut self.audio, self.store.drain_audio());
        self.frame_events.extend(self.store.drain_events());
    }

    /// Reset the world when the store enters play: fully for a new run,
    /// objects only when resuming from a quiz or the shop.
    fn sync_status(&mut self) {
        let state = self.store.state();
        let (status, session) = (state.status, state.session);

        if session != self.last_session {
            self.track.reset();
            self.player.reset();
            self.input.clear();
        } else if status == GameStatus::Playing && self.last_status != GameStatus::Playing {
            self.track.clear();
        }
        self.last_status = status;
        self.last_session = session;
    }

    fn handle_input(&mut self) {
        let accepting = matches!(
            self.store.state().status,
            GameStatus::Playing | GameStatus::Shop
        );
        for event in self.input.drain() {
            if !accepting {
                continue;
            }
            match event {
                InputEvent::LaneLeft => {
                    self.player.change_lane(-1, self.store.state().lane_count);
                }
                InputEvent::LaneRight => {
                    self.player.change_lane(1, self.store.state().lane_count);
                }
                InputEvent::Jump => {
                    let double = self.store.state().inventory.has_double_jump;
                    if self.player.jump(double).is_some() {
                        self.store.play_sound(SoundKind::Jump);
                    }
                }
                InputEvent::FastDrop => {
                    self.player.fast_drop();
                }
                InputEvent::ActivateAbility => self.store.activate_immortality(),
            }
        }
    }

    fn resolve(&mut self, hit: ResolvedCollision) {
        let kind = match &hit.kind {
            ObjectKind::Obstacle => event_kinds::OBSTACLE_HIT,
            ObjectKind::Gem => event_kinds::GEM_COLLECTED,
            ObjectKind::WordOrb { .. } => event_kinds::ORB_COLLECTED,
        };
        self.frame_events
            .push(GameEvent::new(kind, hit.pos.x, hit.pos.y, hit.id.0 as f32));

        match hit.kind {
            ObjectKind::Obstacle => {
                if self.store.is_immortal() {
                    return;
                }
                if self.player.register_hit(self.store.now_ms()) {
                    self.store.play_sound(SoundKind::Damage);
                    self.store.take_damage();
                }
            }
            ObjectKind::Gem => {
                let value = self.store.config().scoring.gem_value;
                self.store.collect_gem(value);
            }
            ObjectKind::WordOrb {
                word_id,
                text,
                language,
            } => {
                self.store.collect_word(&word_id, &text, language);
            }
        }
    }

    // ---- Accessors ----

    pub fn state(&self) -> &RunState {
        self.store.state()
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut GameStore {
        &mut self.store
    }

    pub fn track(&self) -> &TrackEngine {
        &self.track
    }

    pub fn track_mut(&mut self) -> &mut TrackEngine {
        &mut self.track
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Events from the last tick, collisions first.
    pub fn events(&self) -> &[GameEvent] {
        &self.frame_events
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.frame_events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.frame_events.len() as u32
    }
}
