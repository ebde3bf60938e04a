use crate::api::game::ScoringConfig;

/// Combo tier after a correct match.
/// Extends the combo (up to the cap) inside the window, otherwise restarts at 1.
pub fn next_combo(previous: u32, since_last_match_ms: f64, config: &ScoringConfig) -> u32 {
    if since_last_match_ms < config.combo_window_ms {
        (previous + 1).min(config.max_combo)
    } else {
        1
    }
}

/// Score multiplier for a combo tier: 1.0 at tier 1, +`combo_step` per tier.
pub fn combo_multiplier(tier: u32, config: &ScoringConfig) -> f64 {
    1.0 + tier.saturating_sub(1) as f64 * config.combo_step
}

/// Points for a correct match at the given combo tier.
pub fn match_points(tier: u32, config: &ScoringConfig) -> u64 {
    (config.base_points as f64 * combo_multiplier(tier, config)).floor() as u64
}

/// Score after a mismatch penalty, floored at zero.
pub fn apply_penalty(score: u64, config: &ScoringConfig) -> u64 {
    score.saturating_sub(config.mismatch_penalty)
}
