//! Hit chance and accuracy calculations.

use crate::conditions::AttackModifiers;
use crate::env::Dice;

/// Effective chance for one target, or `None` for actions that always connect.
///
/// # Formula
///
/// ```text
/// hit_chance = base * accuracy_mult * blur
/// clamped to [0, 1]
/// ```
pub fn effective_hit_chance(base: Option<f64>, modifiers: &AttackModifiers) -> Option<f64> {
    base.map(|chance| (chance * modifiers.hit_chance_mult).clamp(0.0, 1.0))
}

/// Rolls one hit check. Actions without a hit chance connect without rolling.
pub fn check_hit(chance: Option<f64>, dice: &mut Dice<'_>) -> bool {
    match chance {
        Some(chance) => dice.chance(chance),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::StatScale;
    use crate::env::PcgRng;

    #[test]
    fn modifiers_scale_and_clamp() {
        let mods = AttackModifiers {
            hit_chance_mult: 0.5,
            damage: StatScale::IDENTITY,
        };
        assert_eq!(effective_hit_chance(Some(0.8), &mods), Some(0.4));
        assert_eq!(effective_hit_chance(None, &mods), None);

        let boosted = AttackModifiers {
            hit_chance_mult: 3.0,
            damage: StatScale::IDENTITY,
        };
        assert_eq!(effective_hit_chance(Some(0.8), &boosted), Some(1.0));
    }

    #[test]
    fn missing_chance_never_rolls() {
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 5);
        assert!(check_hit(None, &mut dice));
        assert_eq!(dice.cursor(), 0);
        assert!(!check_hit(Some(0.0), &mut dice));
    }
}
