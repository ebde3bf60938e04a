use glam::{Vec2, Vec3};
use rand::Rng;

use crate::api::game::TrackConfig;
use crate::api::types::ObjectId;
use crate::components::track_object::{ObjectKind, TrackObject};
use crate::core::time::clamp_dt;
use crate::systems::collision::overlaps;
use crate::systems::spawn::{choose_spawn, roll_lane, roll_spawn_gap, spawn_height, SpawnContext};

/// A collision resolved during [`TrackEngine::advance`].
/// The object is already gone from the track; this is a copy of its data.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCollision {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub pos: Vec3,
}

/// Owns every object on the track: spawns them, moves them toward the
/// player and reports overlaps.
pub struct TrackEngine {
    config: TrackConfig,
    objects: Vec<TrackObject>,
    /// Distance travelled since the run started.
    distance: f32,
    next_spawn_at: f32,
    next_id: u32,
}

impl TrackEngine {
    pub fn new(config: TrackConfig) -> Self {
        let capacity = config.max_objects;
        let next_spawn_at = config.first_spawn_distance;
        Self {
            config,
            objects: Vec::with_capacity(capacity),
            distance: 0.0,
            next_spawn_at,
            next_id: 0,
        }
    }

    /// Clear the track for a new run.
    pub fn reset(&mut self) {
        self.objects.clear();
        self.distance = 0.0;
        self.next_spawn_at = self.config.first_spawn_distance;
        self.next_id = 0;
    }

    /// Drop every object but keep the distance travelled.
    /// The next spawn comes after the usual lead-in.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.next_spawn_at = self.distance + self.config.first_spawn_distance;
    }

    /// Run one tick: move objects, resolve collisions against the player at
    /// `player` (x = lateral, y = height), drop objects that passed, then spawn.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        speed: f32,
        player: Vec2,
        ctx: &SpawnContext<'_>,
        rng: &mut R,
    ) -> Vec<ResolvedCollision> {
        let dt = clamp_dt(dt, self.config.max_frame_dt);
        let step = speed.max(0.0) * dt;
        self.distance += step;

        let mut resolved = Vec::new();
        for object in self.objects.iter_mut().filter(|o| o.active) {
            object.pos.z += step;

            if overlaps(object, player, &self.config) {
                object.active = false;
                resolved.push(ResolvedCollision {
                    id: object.id,
                    kind: object.kind.clone(),
                    pos: object.pos,
                });
            } else if object.pos.z > self.config.remove_distance {
                // Passed without contact: no penalty.
                object.active = false;
            }
        }
        self.objects.retain(|o| o.active);

        self.try_spawn(ctx, rng);
        resolved
    }

    fn try_spawn<R: Rng + ?Sized>(&mut self, ctx: &SpawnContext<'_>, rng: &mut R) {
        if self.distance < self.next_spawn_at || self.objects.len() >= self.config.max_objects {
            return;
        }

        let lane = roll_lane(rng, ctx.lane_count);
        match choose_spawn(rng, ctx, &self.config) {
            Some(kind) => {
                let id = ObjectId(self.next_id);
                self.next_id += 1;
                let pos = Vec3::new(
                    lane as f32 * self.config.lane_width,
                    spawn_height(&kind, &self.config),
                    -self.config.spawn_distance,
                );
                log::debug!("spawn {:?} {:?} at lane {}", id, kind, lane);
                self.objects.push(TrackObject::new(id, kind).with_pos(pos));
            }
            None => log::debug!("spawn skipped: no eligible word"),
        }
        self.next_spawn_at = self.distance + roll_spawn_gap(rng, &self.config);
    }

    /// Iterate over live objects.
    pub fn iter(&self) -> impl Iterator<Item = &TrackObject> {
        self.objects.iter()
    }

    pub fn objects(&self) -> &[TrackObject] {
        &self.objects
    }

    pub fn get(&self, id: ObjectId) -> Option<&TrackObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Place an object directly. Used by scripted scenarios and tests.
    pub fn insert(&mut self, kind: ObjectKind, pos: Vec3) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(TrackObject::new(id, kind).with_pos(pos));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{HeldWord, Language};
    use crate::assets::vocabulary::{ActiveWord, Category, WordEntry};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pool() -> Vec<ActiveWord> {
        vec![ActiveWord::new(WordEntry {
            id: "a1".into(),
            en: "Cat".into(),
            jp: "猫".into(),
            hiragana: "ねこ".into(),
            romaji: "neko".into(),
            category: Category::Animals,
            difficulty: 1,
        })]
    }

    /// Player parked far to the side so nothing collides.
    const AWAY: Vec2 = Vec2::new(100.0, 0.0);

    #[test]
    fn objects_move_by_speed_times_dt() {
        let mut track = TrackEngine::new(TrackConfig::default());
        let pool = pool();
        let ctx = SpawnContext { held: None, pool: &pool, lane_count: 3 };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let id = track.insert(ObjectKind::Gem, Vec3::new(0.0, 1.2, -50.0));

        track.advance(0.02, 20.0, AWAY, &ctx, &mut rng);
        let z = track.get(id).unwrap().pos.z;
        assert!((z - (-49.6)).abs() < 1e-4, "z = {}", z);
    }

    #[test]
    fn huge_dt_is_clamped() {
        let mut track = TrackEngine::new(TrackConfig::default());
        let ctx = SpawnContext { held: None, pool: &[], lane_count: 3 };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let id = track.insert(ObjectKind::Obstacle, Vec3::new(0.0, 0.8, -10.0));

        let hits = track.advance(5.0, 20.0, Vec2::ZERO, &ctx, &mut rng);
        assert!(hits.is_empty());
        assert!((track.get(id).unwrap().pos.z - (-9.0)).abs() < 1e-4);
        assert!((track.distance() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn collision_resolves_and_removes_object() {
        let mut track = TrackEngine::new(TrackConfig::default());
        let ctx = SpawnContext { held: None, pool: &[], lane_count: 3 };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let id = track.insert(ObjectKind::Obstacle, Vec3::new(0.0, 0.8, -0.5));

        let hits = track.advance(0.016, 20.0, Vec2::ZERO, &ctx, &mut rng);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, id);
        assert_eq!(hits[0].kind, ObjectKind::Obstacle);
        assert!(track.get(id).is_none());
    }

    #[test]
    fn passed_objects_are_removed_silently() {
        let mut track = TrackEngine::new(TrackConfig::default());
        let ctx = SpawnContext { held: None, pool: &[], lane_count: 3 };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        track.insert(ObjectKind::Gem, Vec3::new(0.0, 1.2, 19.9));

        let hits = track.advance(0.05, 20.0, AWAY, &ctx, &mut rng);
        assert!(hits.is_empty());
        assert!(track.is_empty());
    }

    #[test]
    fn first_spawn_happens_after_first_spawn_distance() {
        let mut track = TrackEngine::new(TrackConfig::default());
        let pool = pool();
        let ctx = SpawnContext { held: None, pool: &pool, lane_count: 3 };
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        // 20 units/s * 0.05 s = 1 unit per tick; first spawn at 10.
        for _ in 0..9 {
            track.advance(0.05, 20.0, AWAY, &ctx, &mut rng);
        }
        assert!(track.is_empty());
        track.advance(0.05, 20.0, AWAY, &ctx, &mut rng);
        assert_eq!(track.len(), 1);
        let spawned = &track.objects()[0];
        assert!((spawned.pos.z - (-120.0)).abs() < 1e-4);
        assert_eq!(spawned.id, ObjectId(0));
    }

    #[test]
    fn never_exceeds_object_cap() {
        let config = TrackConfig {
            max_objects: 4,
            spawn_gap_min: 0.1,
            spawn_gap_max: 0.2,
            first_spawn_distance: 0.0,
            remove_distance: 1000.0,
            ..TrackConfig::default()
        };
        let mut track = TrackEngine::new(config);
        let pool = pool();
        let ctx = SpawnContext { held: None, pool: &pool, lane_count: 3 };
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..500 {
            track.advance(0.05, 20.0, AWAY, &ctx, &mut rng);
            assert!(track.len() <= 4);
        }
        assert_eq!(track.len(), 4);
    }

    #[test]
    fn ids_are_monotonic_and_reset_with_run() {
        let config = TrackConfig {
            spawn_gap_min: 0.5,
            spawn_gap_max: 0.6,
            first_spawn_distance: 0.0,
            ..TrackConfig::default()
        };
        let mut track = TrackEngine::new(config);
        let pool = pool();
        let held = HeldWord::new("a1", "猫", Language::Source);
        let ctx = SpawnContext { held: Some(&held), pool: &pool, lane_count: 3 };
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        for _ in 0..40 {
            track.advance(0.05, 20.0, AWAY, &ctx, &mut rng);
        }
        let ids: Vec<u32> = track.iter().map(|o| o.id.0).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        track.clear();
        assert!(track.is_empty());
        assert!(track.distance() > 0.0);

        track.reset();
        assert!(track.is_empty());
        assert_eq!(track.distance(), 0.0);
        track.advance(0.05, 20.0, AWAY, &ctx, &mut rng);
        assert_eq!(track.objects()[0].id, ObjectId(0));
    }
}
