//! Spawn decisions for the track.
//!
//! Every random choice is a free function over an injected `Rng`, so the
//! distribution of spawns can be checked with a seeded generator.

use rand::Rng;

use crate::api::game::TrackConfig;
use crate::api::types::{HeldWord, Language};
use crate::assets::vocabulary::ActiveWord;
use crate::components::track_object::ObjectKind;

/// What the spawner needs to know about the progression state.
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext<'a> {
    pub held: Option<&'a HeldWord>,
    pub pool: &'a [ActiveWord],
    pub lane_count: u32,
}

/// Distance to travel before the next spawn, uniform in `[gap_min, gap_max)`.
pub fn roll_spawn_gap<R: Rng + ?Sized>(rng: &mut R, config: &TrackConfig) -> f32 {
    rng.gen_range(config.spawn_gap_min..config.spawn_gap_max)
}

/// Lane index centered on zero: `-(n/2) ..= n/2` for an odd lane count.
pub fn roll_lane<R: Rng + ?Sized>(rng: &mut R, lane_count: u32) -> i32 {
    let lanes = lane_count.max(1);
    rng.gen_range(0..lanes) as i32 - (lanes / 2) as i32
}

/// Choose the next object kind, or `None` when no word data is available.
///
/// While a word is held the matching orb is strongly favored, so a pair can
/// always be completed; the rest of the time an obstacle keeps the pressure on.
pub fn choose_spawn<R: Rng + ?Sized>(
    rng: &mut R,
    ctx: &SpawnContext<'_>,
    config: &TrackConfig,
) -> Option<ObjectKind> {
    match ctx.held {
        Some(held) => {
            if rng.gen_bool(config.match_orb_chance) {
                matching_orb(held, ctx.pool)
            } else {
                Some(ObjectKind::Obstacle)
            }
        }
        None => {
            if rng.gen_bool(config.word_orb_chance) {
                fresh_orb(rng, ctx.pool, config)
            } else if rng.gen_bool(config.gem_chance) {
                Some(ObjectKind::Gem)
            } else {
                Some(ObjectKind::Obstacle)
            }
        }
    }
}

/// The other side of the held word, looked up in the active pool.
pub fn matching_orb(held: &HeldWord, pool: &[ActiveWord]) -> Option<ObjectKind> {
    let word = pool.iter().find(|w| w.id() == held.word_id)?;
    let language = held.language.opposite();
    Some(ObjectKind::word_orb(
        word.id(),
        word.entry.orb_text(language),
        language,
    ))
}

/// A random word from the pool, usually showing its source-language side.
pub fn fresh_orb<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[ActiveWord],
    config: &TrackConfig,
) -> Option<ObjectKind> {
    if pool.is_empty() {
        return None;
    }
    let language = if rng.gen_bool(config.source_first_chance) {
        Language::Source
    } else {
        Language::Target
    };
    let word = &pool[rng.gen_range(0..pool.len())];
    Some(ObjectKind::word_orb(
        word.id(),
        word.entry.orb_text(language),
        language,
    ))
}

/// Resting height of a freshly spawned object.
pub fn spawn_height(kind: &ObjectKind, config: &TrackConfig) -> f32 {
    match kind {
        ObjectKind::Obstacle => config.obstacle_clearance / 2.0,
        ObjectKind::Gem | ObjectKind::WordOrb { .. } => config.pickup_height,
    }
}
