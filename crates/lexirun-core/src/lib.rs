pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod input;
pub mod assets;
pub mod game;
pub mod session;

// Re-export key types at crate root for convenience
pub use api::audio::{AudioBridge, AudioError, AudioRequest, RecordingAudio, SilentAudio};
pub use api::game::{ConfigError, GameConfig, PlayerConfig, RunConfig, ScoringConfig, ShopConfig, TrackConfig};
pub use api::types::{event_kinds, GameEvent, HeldWord, Language, ObjectId, SoundKind};
pub use assets::vocabulary::{ActiveWord, CatalogError, Category, Vocabulary, WordEntry, WordSource, WritingMode};
pub use components::track_object::{ObjectKind, TrackObject};
pub use core::scheduler::{Scheduler, SessionId};
pub use core::time::RunClock;
pub use game::achievements::{Achievement, AchievementBook, AchievementId};
pub use game::quiz::Quiz;
pub use game::shop::ShopItem;
pub use game::state::{GameStatus, Inventory, PlayerStats, RunState};
pub use game::store::{CollectOutcome, GameStore, SubscriptionId};
pub use input::player::{JumpKind, PlayerController};
pub use input::queue::{InputEvent, InputQueue};
pub use session::GameSession;
pub use systems::spawn::SpawnContext;
pub use systems::track::{ResolvedCollision, TrackEngine};
