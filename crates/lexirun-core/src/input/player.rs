use glam::Vec2;

use crate::api::game::PlayerConfig;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Which jump a [`PlayerController::jump`] call performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Single,
    Double,
}

/// Lane and vertical movement of the avatar.
///
/// The avatar sits at z = 0; `x` slides toward the current lane and `y` is
/// the height of its feet above the track.
#[derive(Debug, Clone)]
pub struct PlayerController {
    config: PlayerConfig,
    lane_width: f32,
    lane: i32,
    x: f32,
    y: f32,
    velocity_y: f32,
    airborne: bool,
    jumps: u32,
    invulnerable_until_ms: f64,
}

impl PlayerController {
    pub fn new(config: PlayerConfig, lane_width: f32) -> Self {
        Self {
            config,
            lane_width,
            lane: 0,
            x: 0.0,
            y: 0.0,
            velocity_y: 0.0,
            airborne: false,
            jumps: 0,
            invulnerable_until_ms: 0.0,
        }
    }

    /// Back to the center lane, on the ground.
    pub fn reset(&mut self) {
        self.lane = 0;
        self.x = 0.0;
        self.y = 0.0;
        self.velocity_y = 0.0;
        self.airborne = false;
        self.jumps = 0;
        self.invulnerable_until_ms = 0.0;
    }

    /// Move `delta` lanes, clamped to `±lane_count / 2`. Returns the new lane.
    pub fn change_lane(&mut self, delta: i32, lane_count: u32) -> i32 {
        let max = (lane_count / 2) as i32;
        self.lane = (self.lane + delta).clamp(-max, max);
        self.lane
    }

    /// Jump from the ground, or once more in the air with double jump.
    pub fn jump(&mut self, has_double_jump: bool) -> Option<JumpKind> {
        let max_jumps = if has_double_jump { 2 } else { 1 };
        if !self.airborne {
            self.airborne = true;
            self.jumps = 1;
            self.velocity_y = self.config.jump_velocity;
            Some(JumpKind::Single)
        } else if self.jumps < max_jumps {
            self.jumps += 1;
            self.velocity_y = self.config.jump_velocity * self.config.double_jump_factor;
            Some(JumpKind::Double)
        } else {
            None
        }
    }

    /// Slam downward. Only has an effect in the air.
    pub fn fast_drop(&mut self) -> bool {
        if self.airborne {
            self.velocity_y = self.config.fast_drop_velocity;
        }
        self.airborne
    }

    /// Integrate one frame of `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let target = self.lane as f32 * self.lane_width;
        self.x = lerp(self.x, target, (dt * self.config.lane_lerp_rate).min(1.0));

        if self.airborne {
            self.y += self.velocity_y * dt;
            self.velocity_y -= self.config.gravity * dt;
            if self.y <= 0.0 {
                self.y = 0.0;
                self.velocity_y = 0.0;
                self.airborne = false;
                self.jumps = 0;
            }
        }
    }

    /// Start the post-hit grace window. Returns false if one is already running.
    pub fn register_hit(&mut self, now_ms: f64) -> bool {
        if self.is_invulnerable(now_ms) {
            return false;
        }
        self.invulnerable_until_ms = now_ms + self.config.hit_invulnerability_ms;
        true
    }

    pub fn is_invulnerable(&self, now_ms: f64) -> bool {
        now_ms < self.invulnerable_until_ms
    }

    /// Lateral and vertical position used for collision tests.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn lane(&self) -> i32 {
        self.lane
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn jumps(&self) -> u32 {
        self.jumps
    }
}
