//! Move selection for monsters and minions.

use crate::combat::CombatAction;
use crate::conditions::Incapacitation;
use crate::env::{AttackDefinition, ContentOracle, Dice};
use crate::state::Creature;

/// Bonus per buff or debuff an attack carries.
const EFFECT_BONUS: f64 = 1.25;

/// Upper bound of the random bonus added to every score.
const JITTER: f64 = 1.25;

/// Picks the move for a creature's turn.
///
/// Stunned creatures pass, as do creatures that cannot afford any of their
/// attacks. Otherwise every affordable attack is scored with
/// [`score_attack`] plus a small random bonus and the best one is used.
///
/// `minion_count` is the size of the creature's own retinue, or `None` for
/// creatures that cannot command summons.
pub fn choose_attack(
    actor: &Creature,
    minion_count: Option<usize>,
    opponents: usize,
    content: &dyn ContentOracle,
    dice: &mut Dice<'_>,
) -> CombatAction {
    if Incapacitation::from_conditions(actor.conditions()).contains(Incapacitation::STUNNED) {
        return CombatAction::Pass;
    }

    let has_pool = actor.base_mana_max() > 0.0;
    let mut best: Option<(f64, &AttackDefinition)> = None;
    for attack in actor
        .attacks
        .iter()
        .filter_map(|name| content.attack(name))
        .filter(|attack| !has_pool || actor.mana() >= attack.energy_cost)
    {
        let score = score_attack(attack, actor, minion_count, opponents) + dice.unit() * JITTER;
        if best.is_none_or(|(top, _)| score > top) {
            best = Some((score, attack));
        }
    }

    match best {
        Some((_, attack)) => CombatAction::Attack(attack.clone()),
        None => {
            tracing::debug!(creature = %actor.id, "no affordable attack");
            CombatAction::Pass
        }
    }
}

/// Priority of an attack before the random bonus.
///
/// ```text
/// score = per_hit_damage * hits * targets + 1.25 * (buffs + debuffs)
/// ```
///
/// Summoning attacks are then favoured while healthy and short on minions:
///
/// | health   | 0 minions | 1 minion | 2+ minions |
/// |----------|-----------|----------|------------|
/// | > 75%    | x5        | x1.5     | /2         |
/// | > 50%    | x2        | /2       | /3         |
/// | lower    | /4        | /4       | /4         |
pub fn score_attack(
    attack: &AttackDefinition,
    actor: &Creature,
    minion_count: Option<usize>,
    opponents: usize,
) -> f64 {
    let per_hit = (actor.attack_power * attack.damage_mult + attack.flat_health_damage).max(0.0);
    let targets = attack.targeting.target_count(opponents).max(1);
    let mut score = per_hit * f64::from(attack.hits.max(1)) * targets as f64;
    score += (attack.buffs.len() + attack.debuffs.len()) as f64 * EFFECT_BONUS;

    if let Some(minions) = minion_count.filter(|_| !attack.summons.is_empty()) {
        let health_max = actor.health_max();
        let health = if health_max > 0.0 {
            actor.health() / health_max
        } else {
            0.0
        };
        score = if health > 0.75 {
            match minions {
                0 => score * 5.0,
                1 => score * 1.5,
                _ => score / 2.0,
            }
        } else if health > 0.5 {
            match minions {
                0 => score * 2.0,
                1 => score / 2.0,
                _ => score / 3.0,
            }
        } else {
            score / 4.0
        };
    }
    score
}
