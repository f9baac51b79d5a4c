//! Escape odds.

use crate::config::GameConfig;

/// Chance in percent that a flee attempt succeeds.
///
/// ```text
/// base + weight * ln(dex + 1) / ln(1.5) - difficulty² / divisor
/// ```
///
/// clamped to `[flee_min_chance, flee_max_chance]`.
pub fn flee_chance(dexterity: f64, difficulty: f64, config: &GameConfig) -> f64 {
    let dexterity_term = (dexterity.max(0.0) + 1.0).ln() / 1.5_f64.ln();
    let difficulty_term = if config.flee_difficulty_divisor > 0.0 {
        difficulty * difficulty / config.flee_difficulty_divisor
    } else {
        0.0
    };
    (config.flee_base_chance + config.flee_dexterity_weight * dexterity_term - difficulty_term)
        .clamp(config.flee_min_chance, config.flee_max_chance)
}
