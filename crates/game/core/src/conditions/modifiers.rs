//! Aggregated condition modifiers.
//!
//! Conditions are folded into small modifier structs on demand; nothing here
//! is cached, so a creature's derived stats always reflect its current list.

use bitflags::bitflags;

use crate::state::{Condition, EffectKind, EffectStyle};

/// `value * mult + flat`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatScale {
    pub mult: f64,
    pub flat: f64,
}

impl StatScale {
    pub const IDENTITY: Self = Self {
        mult: 1.0,
        flat: 0.0,
    };

    pub fn apply(&self, value: f64) -> f64 {
        value * self.mult + self.flat
    }

    fn increase(&mut self, style: EffectStyle, magnitude: f64) {
        if style.is_flat() {
            self.flat += magnitude;
        } else {
            self.mult *= 1.0 + magnitude;
        }
    }

    fn decrease(&mut self, style: EffectStyle, magnitude: f64) {
        if style.is_flat() {
            self.flat -= magnitude;
        } else {
            self.mult *= 1.0 - magnitude;
        }
    }
}

impl Default for StatScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Maximum-stat modifiers from `*Max increase/decrease` effects.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MaxModifiers {
    pub health: StatScale,
    pub mana: StatScale,
    pub sanity: StatScale,
}

impl MaxModifiers {
    pub fn from_conditions(conditions: &[Condition]) -> Self {
        let mut mods = Self::default();
        for effect in conditions.iter().flat_map(|c| c.effects.iter()) {
            let (style, m) = (effect.style, effect.magnitude);
            match effect.kind {
                EffectKind::HealthMaxIncrease => mods.health.increase(style, m),
                EffectKind::HealthMaxDecrease => mods.health.decrease(style, m),
                EffectKind::ManaMaxIncrease => mods.mana.increase(style, m),
                EffectKind::ManaMaxDecrease => mods.mana.decrease(style, m),
                EffectKind::SanityMaxIncrease => mods.sanity.increase(style, m),
                EffectKind::SanityMaxDecrease => mods.sanity.decrease(style, m),
                _ => {}
            }
        }
        mods
    }
}

/// Offensive modifiers for one attacker/defender pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackModifiers {
    pub hit_chance_mult: f64,
    pub damage: StatScale,
}

impl AttackModifiers {
    /// Folds the attacker's own conditions and the defender's evasive ones.
    pub fn between(attacker: &[Condition], defender: &[Condition]) -> Self {
        let mut hit_chance_mult = 1.0;
        let mut damage = StatScale::IDENTITY;

        for effect in attacker.iter().flat_map(|c| c.effects.iter()) {
            match effect.kind {
                EffectKind::AccuracyReduction => hit_chance_mult *= 1.0 - effect.magnitude,
                EffectKind::AccuracyIncrease => hit_chance_mult *= 1.0 + effect.magnitude,
                EffectKind::Strengthen => damage.increase(effect.style, effect.magnitude),
                EffectKind::Weaken => damage.decrease(effect.style, effect.magnitude),
                _ => {}
            }
        }
        for effect in defender.iter().flat_map(|c| c.effects.iter()) {
            if effect.kind == EffectKind::Blur {
                hit_chance_mult *= effect.magnitude;
            }
        }

        Self {
            hit_chance_mult: hit_chance_mult.max(0.0),
            damage,
        }
    }
}

/// Armor modifiers.
pub fn armor_scale(conditions: &[Condition]) -> StatScale {
    let mut scale = StatScale::IDENTITY;
    for effect in conditions.iter().flat_map(|c| c.effects.iter()) {
        match effect.kind {
            EffectKind::ArmorIncrease => scale.increase(effect.style, effect.magnitude),
            EffectKind::ArmorDecrease => scale.decrease(effect.style, effect.magnitude),
            _ => {}
        }
    }
    scale
}

bitflags! {
    /// Action-blocking states.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Incapacitation: u8 {
        /// May only pass.
        const STUNNED = 1 << 0;
        /// May not cast spells.
        const SILENCED = 1 << 1;
    }
}

impl Incapacitation {
    pub fn from_conditions(conditions: &[Condition]) -> Self {
        let mut flags = Self::empty();
        for condition in conditions {
            if condition.has_effect(&EffectKind::Stun) {
                flags |= Self::STUNNED;
            }
            if condition.has_effect(&EffectKind::Silenced) {
                flags |= Self::SILENCED;
            }
        }
        flags
    }
}

/// Health damage the defender's reactive conditions deal back to an attacker.
pub fn thorns_damage(defender: &[Condition]) -> f64 {
    defender
        .iter()
        .map(|c| c.magnitude_of(&EffectKind::Thorns))
        .sum()
}

/// Damage a holder's `revenge` conditions return after losing `damage_taken` health.
///
/// `min(damage_taken * 5, magnitude * 10)`, or 0 without a revenge condition.
pub fn revenge_damage(holder: &[Condition], damage_taken: f64) -> f64 {
    let magnitude: f64 = holder
        .iter()
        .map(|c| c.magnitude_of(&EffectKind::Revenge))
        .sum();
    if magnitude <= 0.0 || damage_taken <= 0.0 {
        return 0.0;
    }
    (damage_taken * 5.0).min(magnitude * 10.0)
}

/// Per-turn mana delta from `mana regen` and `mana drain` effects.
pub fn mana_tick(condition: &Condition) -> f64 {
    condition.magnitude_of(&EffectKind::ManaRegen) - condition.magnitude_of(&EffectKind::ManaDrain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConditionEffect;

    fn with_effects(effects: Vec<ConditionEffect>) -> Condition {
        Condition {
            turns: 3,
            effects,
            ..Condition::default()
        }
    }

    #[test]
    fn attack_modifiers_fold_both_sides() {
        let attacker = vec![with_effects(vec![
            ConditionEffect::new(EffectKind::Strengthen, EffectStyle::Multiplier, 0.5),
            ConditionEffect::new(EffectKind::Weaken, EffectStyle::Flat, 2.0),
            ConditionEffect::new(EffectKind::AccuracyReduction, EffectStyle::Flat, 0.25),
        ])];
        let defender = vec![with_effects(vec![ConditionEffect::new(
            EffectKind::Blur,
            EffectStyle::Flat,
            0.5,
        )])];

        let mods = AttackModifiers::between(&attacker, &defender);

        // 0.75 from accuracy reduction, halved by blur
        assert_eq!(mods.hit_chance_mult, 0.375);
        // 10 * 1.5 - 2
        assert_eq!(mods.damage.apply(10.0), 13.0);
    }

    #[test]
    fn incapacitation_flags() {
        let conditions = vec![
            with_effects(vec![ConditionEffect::new(EffectKind::Stun, EffectStyle::Flat, 0.0)]),
            with_effects(vec![ConditionEffect::new(
                EffectKind::Silenced,
                EffectStyle::Flat,
                0.0,
            )]),
        ];
        let flags = Incapacitation::from_conditions(&conditions);
        assert!(flags.contains(Incapacitation::STUNNED | Incapacitation::SILENCED));
        assert!(Incapacitation::from_conditions(&[]).is_empty());
    }

    #[test]
    fn max_modifiers_stack_multiplicatively() {
        let conditions = vec![
            with_effects(vec![ConditionEffect::new(
                EffectKind::HealthMaxIncrease,
                EffectStyle::Percentage,
                0.5,
            )]),
            with_effects(vec![ConditionEffect::new(
                EffectKind::HealthMaxDecrease,
                EffectStyle::Flat,
                10.0,
            )]),
        ];
        let mods = MaxModifiers::from_conditions(&conditions);
        assert_eq!(mods.health.apply(100.0), 140.0);
        assert_eq!(mods.mana, StatScale::IDENTITY);
    }

    #[test]
    fn revenge_is_capped_by_magnitude() {
        let holder = vec![with_effects(vec![ConditionEffect::new(
            EffectKind::Revenge,
            EffectStyle::Flat,
            3.0,
        )])];
        // 4 * 5 = 20 < 3 * 10
        assert_eq!(revenge_damage(&holder, 4.0), 20.0);
        assert_eq!(revenge_damage(&holder, 12.0), 30.0);
        assert_eq!(revenge_damage(&[], 12.0), 0.0);
    }
}
