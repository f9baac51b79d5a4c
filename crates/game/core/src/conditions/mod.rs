//! Condition engine.
//!
//! Places buffs and debuffs on creatures and ticks them at the three points
//! of the turn cycle:
//!
//! - [`TickPhase::OwnTurnEnd`]: per-tick damage, mana regen/drain, countdown
//! - [`TickPhase::EnemyTurnEnd`]: lethal thresholds only (`destroy undead`)
//! - [`TickPhase::WorldTimeTick`]: like `OwnTurnEnd`, and debilitations also bite
//!
//! Conditions resolve in the order they were applied, each one fully before
//! the next.

mod modifiers;
mod placement;

pub use modifiers::{
    AttackModifiers, Incapacitation, MaxModifiers, StatScale, armor_scale, mana_tick,
    revenge_damage, thorns_damage,
};
pub use placement::{Placement, condition_id, instantiate};

use crate::combat::round_quarter;
use crate::state::{Condition, Creature, EffectKind, Stat, VitalSignal};

/// Point in the turn cycle a tick happens at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickPhase {
    /// The holder just finished its own turn.
    OwnTurnEnd,
    /// The opposing side just finished its turn.
    EnemyTurnEnd,
    /// The world clock advanced outside combat.
    WorldTimeTick,
}

/// What a tick did to its creature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub health_change: f64,
    pub sanity_change: f64,
    pub mana_change: f64,
    /// Names of conditions removed by this tick.
    pub expired: Vec<String>,
    pub signals: Vec<VitalSignal>,
}

/// Places a condition on a creature.
///
/// A debilitation whose id is already present is ignored; everything else
/// stacks. Returns whether the condition was added.
pub fn apply_condition(creature: &mut Creature, condition: Condition) -> bool {
    if condition.debilitation
        && creature
            .conditions()
            .iter()
            .any(|existing| existing.debilitation && existing.id == condition.id)
    {
        tracing::trace!(
            creature = %creature.id,
            condition = %condition.name,
            "debilitation already present"
        );
        return false;
    }

    tracing::trace!(creature = %creature.id, condition = %condition.name, "condition applied");
    creature.conditions_mut().push(condition);
    creature.reclamp();
    true
}

/// Removes every condition with the given id. Returns how many were removed.
pub fn remove_condition(creature: &mut Creature, id: &str) -> usize {
    let conditions = creature.conditions_mut();
    let before = conditions.len();
    conditions.retain(|c| c.id != id);
    let removed = before - conditions.len();
    creature.reclamp();
    removed
}

/// Ticks every condition on a creature for one phase.
pub fn tick(creature: &mut Creature, phase: TickPhase) -> TickReport {
    let mut report = TickReport::default();

    for index in 0..creature.conditions().len() {
        let condition = &creature.conditions()[index];
        let bites = match phase {
            TickPhase::OwnTurnEnd => !condition.debilitation,
            TickPhase::WorldTimeTick => true,
            TickPhase::EnemyTurnEnd => false,
        };
        let counts_down = bites && !condition.debilitation && !condition.aura;

        if phase == TickPhase::EnemyTurnEnd {
            let threshold = condition.magnitude_of(&EffectKind::DestroyUndead);
            if condition.has_effect(&EffectKind::DestroyUndead)
                && creature.is_undead()
                && !creature.is_defeated()
                && creature.health() <= threshold
            {
                let change = creature.kill();
                report.health_change += change.applied();
                report.signals.extend(change.signal);
            }
            continue;
        }

        if !bites {
            continue;
        }

        let health = round_quarter(condition.health_per_tick());
        let sanity = round_quarter(condition.sanity_per_tick());
        let mana = mana_tick(condition);

        if health != 0.0 {
            let change = creature.apply_delta(Stat::Health, -health);
            report.health_change += change.applied();
            report.signals.extend(change.signal);
        }
        if sanity != 0.0 {
            let change = creature.apply_delta(Stat::Sanity, -sanity);
            report.sanity_change += change.applied();
            report.signals.extend(change.signal);
        }
        if mana != 0.0 {
            let change = creature.apply_delta(Stat::Mana, mana);
            report.mana_change += change.applied();
        }
        if counts_down {
            creature.conditions_mut()[index].turns -= 1;
        }
    }

    let conditions = creature.conditions_mut();
    conditions.retain(|condition| {
        if condition.is_expired() {
            report.expired.push(condition.name.clone());
            false
        } else {
            true
        }
    });
    creature.reclamp();

    if !report.expired.is_empty() {
        tracing::debug!(creature = %creature.id, expired = ?report.expired, "conditions expired");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ConditionEffect, EffectStyle};

    fn creature() -> Creature {
        Creature::fresh("c", "ghoul", 100.0, 30.0, 20.0)
    }

    fn poison(id: &str, turns: i32, per_tick: f64) -> Condition {
        Condition {
            id: id.into(),
            name: "poison".into(),
            turns,
            effects: vec![ConditionEffect::new(
                EffectKind::HealthDamage,
                EffectStyle::Flat,
                per_tick,
            )],
            health_damage: vec![per_tick],
            sanity_damage: vec![0.0],
            ..Condition::default()
        }
    }

    fn debilitation(id: &str) -> Condition {
        Condition {
            id: id.into(),
            name: "bad back".into(),
            debilitation: true,
            health_damage: vec![1.0],
            ..Condition::default()
        }
    }

    #[test]
    fn debilitations_are_unique_ordinary_conditions_stack() {
        let mut c = creature();

        assert!(apply_condition(&mut c, debilitation("arthritis")));
        assert!(!apply_condition(&mut c, debilitation("arthritis")));
        assert_eq!(c.conditions().len(), 1);

        assert!(apply_condition(&mut c, poison("venom", 3, 2.0)));
        assert!(apply_condition(&mut c, poison("venom", 3, 2.0)));
        assert_eq!(c.conditions().len(), 3);
    }

    #[test]
    fn own_turn_end_damages_counts_down_and_prunes() {
        let mut c = creature();
        apply_condition(&mut c, poison("a", 1, 2.5));
        apply_condition(&mut c, poison("b", 2, 1.0));

        let report = tick(&mut c, TickPhase::OwnTurnEnd);

        // 2.5 + 1.0
        assert_eq!(c.health(), 96.5);
        assert_eq!(report.health_change, -3.5);
        assert_eq!(report.expired, vec!["poison".to_string()]);
        assert_eq!(c.conditions().len(), 1);
        assert_eq!(c.conditions()[0].turns, 1);
    }

    #[test]
    fn debilitations_only_bite_on_world_ticks() {
        let mut c = creature();
        apply_condition(&mut c, debilitation("gout"));

        tick(&mut c, TickPhase::OwnTurnEnd);
        assert_eq!(c.health(), 100.0);

        tick(&mut c, TickPhase::WorldTimeTick);
        assert_eq!(c.health(), 99.0);
        // Never counts down
        assert_eq!(c.conditions().len(), 1);
    }

    #[test]
    fn auras_apply_without_counting_down() {
        let mut c = creature();
        let mut aura = poison("aura", 0, 1.0);
        aura.aura = true;
        apply_condition(&mut c, aura);

        tick(&mut c, TickPhase::OwnTurnEnd);
        tick(&mut c, TickPhase::OwnTurnEnd);
        assert_eq!(c.health(), 98.0);
        assert_eq!(c.conditions()[0].turns, 0);
    }

    #[test]
    fn enemy_turn_end_only_checks_thresholds() {
        let mut c = creature();
        c.being_type = "undead".into();
        c.apply_delta(Stat::Health, -85.0);
        apply_condition(&mut c, poison("p", 2, 3.0));
        apply_condition(
            &mut c,
            Condition {
                id: "holy".into(),
                turns: 2,
                effects: vec![ConditionEffect::new(
                    EffectKind::DestroyUndead,
                    EffectStyle::Flat,
                    20.0,
                )],
                ..Condition::default()
            },
        );

        let report = tick(&mut c, TickPhase::EnemyTurnEnd);

        assert!(c.is_defeated());
        assert_eq!(report.signals, vec![VitalSignal::Defeated]);
        // No countdown in this phase
        assert!(c.conditions().iter().all(|cond| cond.turns == 2));
    }

    #[test]
    fn mana_regen_and_drain() {
        let mut c = creature();
        c.apply_delta(Stat::Mana, -20.0);
        apply_condition(
            &mut c,
            Condition {
                turns: 2,
                effects: vec![
                    ConditionEffect::new(EffectKind::ManaRegen, EffectStyle::Flat, 5.0),
                    ConditionEffect::new(EffectKind::ManaDrain, EffectStyle::Flat, 1.0),
                ],
                ..Condition::default()
            },
        );
        let report = tick(&mut c, TickPhase::OwnTurnEnd);
        assert_eq!(c.mana(), 14.0);
        assert_eq!(report.mana_change, 4.0);
    }
}
