use glam::Vec2;

use crate::api::game::TrackConfig;
use crate::components::track_object::{ObjectKind, TrackObject};

/// True when `z` lies inside the band around the player plane.
/// Collisions are only tested there, not along the object's whole path.
pub fn in_collision_band(z: f32, config: &TrackConfig) -> bool {
    z > -config.collision_band && z < config.collision_band
}

/// Whether `object` overlaps the player at `player` (x = lateral, y = height).
pub fn overlaps(object: &TrackObject, player: Vec2, config: &TrackConfig) -> bool {
    if !object.active || !in_collision_band(object.pos.z, config) {
        return false;
    }
    if (object.pos.x - player.x).abs() >= config.lateral_tolerance {
        return false;
    }
    match object.kind {
        // Jumping above the clearance height clears the obstacle.
        ObjectKind::Obstacle => player.y < config.obstacle_clearance,
        ObjectKind::Gem | ObjectKind::WordOrb { .. } => {
            (player.y - object.pos.y).abs() < config.pickup_tolerance
        }
    }
}
