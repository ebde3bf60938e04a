/// Clamp a frame delta to `[0, ceiling]`.
/// A stalled frame must not teleport objects through the player.
pub fn clamp_dt(dt: f32, ceiling: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, ceiling)
}

/// Game-time clock in milliseconds, advanced only by ticks.
/// Combo windows and unlock timestamps read this instead of wall time,
/// so a paused tab does not break a combo and replays stay deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunClock {
    now_ms: f64,
}

impl RunClock {
    pub fn new() -> Self {
        Self { now_ms: 0.0 }
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.now_ms += dt as f64 * 1000.0;
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Milliseconds elapsed since `earlier_ms`.
    pub fn since(&self, earlier_ms: f64) -> f64 {
        self.now_ms - earlier_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_large_frames() {
        assert_eq!(clamp_dt(1.0, 0.05), 0.05);
        assert_eq!(clamp_dt(0.016, 0.05), 0.016);
    }

    #[test]
    fn negative_and_nan_become_zero() {
        assert_eq!(clamp_dt(-0.1, 0.05), 0.0);
        assert_eq!(clamp_dt(f32::NAN, 0.05), 0.0);
    }

    #[test]
    fn clock_accumulates_milliseconds() {
        let mut clock = RunClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert!((clock.now_ms() - 750.0).abs() < 1e-6);
        assert!((clock.since(250.0) - 500.0).abs() < 1e-6);
    }

    #[test]
    fn clock_ignores_non_positive_steps() {
        let mut clock = RunClock::new();
        clock.advance(-1.0);
        clock.advance(0.0);
        assert_eq!(clock.now_ms(), 0.0);
    }
}
