//! Resolves one attack, spell or pass.
//!
//! Every precondition is checked before anything is mutated; once the cost is
//! paid the action runs to completion.

use crate::combat::damage::{DamageType, mitigate, round_quarter};
use crate::combat::hit::{check_hit, effective_hit_chance};
use crate::combat::{ActionOutcome, CombatAction, CombatError, Combatant, Incapacity, TargetOutcome};
use crate::conditions::{
    AttackModifiers, Incapacitation, Placement, StatScale, apply_condition, condition_id,
    instantiate, thorns_damage,
};
use crate::config::GameConfig;
use crate::env::{ContentKind, ContentOracle, Dice, OracleError};
use crate::state::{Creature, Minion, Stat};

/// Debuff entry that heals the actor instead of placing a condition.
pub const LIFESTEAL: &str = "lifesteal";

/// Read-only inputs for resolution.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub content: &'a dyn ContentOracle,
    pub config: &'a GameConfig,
}

/// Resolves `action` by `actor` against `targets`.
///
/// Pass takes no targets. Attacks and spells take targets in the order they
/// should be resolved; single-target actions need exactly one, dual-target
/// actions one or two, area actions at least one.
///
/// # Errors
///
/// Checked in this order, before any mutation:
///
/// 1. `ActorIncapacitated` if a stunned actor does anything but pass, or a
///    silenced actor casts
/// 2. `InvalidTarget` on a cardinality mismatch or a defeated target
/// 3. `InsufficientProficiency` if the caster's rank is below the spell's
/// 4. `InsufficientResource` if mana (spells) or energy (monster attacks)
///    is below the cost
/// 5. `Content` if a buff, debuff or summon is missing from the tables
pub fn resolve_action(
    actor: &mut dyn Combatant,
    action: &CombatAction,
    targets: &mut [&mut dyn Combatant],
    ctx: &ResolveContext<'_>,
    dice: &mut Dice<'_>,
) -> Result<ActionOutcome, CombatError> {
    validate(&*actor, action, &*targets, ctx.content)?;

    let actor_id = actor.creature().id.clone();
    if matches!(action, CombatAction::Pass) {
        tracing::debug!(actor = %actor_id, "pass");
        return Ok(ActionOutcome::passed(actor_id));
    }

    let mut outcome = ActionOutcome {
        actor_id: actor_id.clone(),
        action: action.name().to_owned(),
        ..ActionOutcome::default()
    };

    // Cost
    let cost = match action {
        CombatAction::Spell(spell) => spell.mana_cost,
        CombatAction::Attack(attack) if actor.pays_energy() => attack.energy_cost,
        _ => 0.0,
    };
    if cost > 0.0 {
        actor.creature_mut().apply_delta(Stat::Mana, -cost);
        outcome.cost = cost;
    }

    let hits = match action {
        CombatAction::Attack(attack) => attack.hits.max(1),
        _ => 1,
    };
    let base_hit_chance = match action {
        CombatAction::Attack(attack) => attack.hit_chance,
        CombatAction::Spell(spell) => spell.hit_chance,
        CombatAction::Pass => None,
    };

    for target in targets.iter_mut() {
        let mut result = TargetOutcome {
            target_id: target.creature().id.clone(),
            ..TargetOutcome::default()
        };

        let modifiers =
            AttackModifiers::between(actor.creature().conditions(), target.creature().conditions());
        result.hit = check_hit(effective_hit_chance(base_hit_chance, &modifiers), dice);
        if !result.hit {
            tracing::debug!(actor = %actor_id, target = %result.target_id, "miss");
            outcome.targets.push(result);
            continue;
        }

        // Damage
        let dealt = round_quarter(
            base_damage(actor.creature(), action, &modifiers.damage, hits, ctx.config)
                .into_iter()
                .map(|(damage_type, amount)| {
                    mitigate(
                        amount,
                        damage_type,
                        target.armor(),
                        target.resistance(damage_type),
                    )
                })
                .sum::<f64>()
                .max(0.0),
        );
        if dealt > 0.0 {
            let change = target.creature_mut().apply_delta(Stat::Health, -dealt);
            result.damage = -change.applied();
            result.signals.extend(change.signal);
        }

        let sanity_damage = match action {
            CombatAction::Attack(attack) => attack.flat_sanity_damage,
            CombatAction::Spell(spell) => spell.sanity_damage,
            CombatAction::Pass => 0.0,
        };
        if sanity_damage > 0.0 {
            let change = target.creature_mut().apply_delta(Stat::Sanity, -sanity_damage);
            result.sanity_damage = -change.applied();
            result.signals.extend(change.signal);
        }

        // Thorns
        let thorns = round_quarter(thorns_damage(target.creature().conditions()));
        if thorns > 0.0 {
            let change = actor.creature_mut().apply_delta(Stat::Health, -thorns);
            result.thorns = -change.applied();
            outcome.actor_signals.extend(change.signal);
        }

        // Debuffs
        let debuffs = match action {
            CombatAction::Attack(attack) => attack.debuffs.as_slice(),
            CombatAction::Spell(spell) => spell.debuffs.as_slice(),
            CombatAction::Pass => &[],
        };
        for debuff in debuffs {
            if !dice.chance(debuff.chance) {
                continue;
            }
            if debuff.name == LIFESTEAL {
                let per_hit = dealt / f64::from(hits);
                let heal = round_quarter(per_hit * ctx.config.lifesteal_ratio) * f64::from(hits);
                let change = actor.creature_mut().apply_delta(Stat::Health, heal);
                outcome.lifesteal += change.applied();
                continue;
            }
            if target.creature().is_defeated() {
                continue;
            }
            let Some(template) = ctx.content.condition(&debuff.name) else {
                continue;
            };
            let target_creature = target.creature_mut();
            let placement = Placement {
                placed_by: &actor_id,
                source_power: dealt,
                holder_health_max: target_creature.base_health_max(),
                holder_sanity_max: target_creature.base_sanity_max(),
            };
            let condition = instantiate(template, &placement, condition_id(template, dice));
            if apply_condition(target_creature, condition) {
                result.debuffs.push(debuff.name.clone());
            }
        }

        tracing::debug!(
            actor = %actor_id,
            target = %result.target_id,
            damage = result.damage,
            debuffs = ?result.debuffs,
            "hit"
        );
        outcome.targets.push(result);
    }

    // Self damage
    let self_damage = match action {
        CombatAction::Attack(attack) => attack.self_damage,
        CombatAction::Spell(spell) => spell.self_damage,
        CombatAction::Pass => 0.0,
    };
    if self_damage != 0.0 {
        let change = actor.creature_mut().apply_delta(Stat::Health, -self_damage);
        outcome.self_change = change.applied();
        outcome.actor_signals.extend(change.signal);
    }

    // Buffs
    for name in action.buffs() {
        let Some(template) = ctx.content.condition(name) else {
            continue;
        };
        let creature = actor.creature_mut();
        let placement = Placement {
            placed_by: &actor_id,
            source_power: creature.attack_power,
            holder_health_max: creature.base_health_max(),
            holder_sanity_max: creature.base_sanity_max(),
        };
        let condition = instantiate(template, &placement, condition_id(template, dice));
        if apply_condition(creature, condition) {
            outcome.buffs.push(name.clone());
        }
    }

    // Summons
    for name in action.summons() {
        if let Some(template) = ctx.content.minion(name) {
            let creature = template.creature.spawn(dice.next_id(&template.creature.species));
            outcome.summoned.push(Minion::new(creature, template.turns_alive));
        }
    }

    tracing::debug!(
        actor = %actor_id,
        action = %outcome.action,
        damage = outcome.total_damage(),
        summoned = outcome.summoned.len(),
        "action resolved"
    );
    Ok(outcome)
}

/// Checks everything about an action except its targets.
///
/// Used to reject an action before asking the player to pick targets.
///
/// # Errors
///
/// Same as [`resolve_action`], minus `InvalidTarget`.
pub fn precheck(
    actor: &dyn Combatant,
    action: &CombatAction,
    content: &dyn ContentOracle,
) -> Result<(), CombatError> {
    check_incapacity(actor, action)?;
    check_requirements(actor, action, content)
}

fn validate(
    actor: &dyn Combatant,
    action: &CombatAction,
    targets: &[&mut dyn Combatant],
    content: &dyn ContentOracle,
) -> Result<(), CombatError> {
    check_incapacity(actor, action)?;
    check_targets(action, targets)?;
    check_requirements(actor, action, content)
}

fn check_incapacity(actor: &dyn Combatant, action: &CombatAction) -> Result<(), CombatError> {
    let incapacitation = Incapacitation::from_conditions(actor.creature().conditions());
    if incapacitation.contains(Incapacitation::STUNNED) && !matches!(action, CombatAction::Pass) {
        return Err(CombatError::ActorIncapacitated(Incapacity::Stunned));
    }
    if incapacitation.contains(Incapacitation::SILENCED) && action.is_spell() {
        return Err(CombatError::ActorIncapacitated(Incapacity::Silenced));
    }
    Ok(())
}

fn check_targets(action: &CombatAction, targets: &[&mut dyn Combatant]) -> Result<(), CombatError> {
    let Some(targeting) = action.targeting() else {
        return Ok(());
    };
    if !targeting.accepts(targets.len()) {
        return Err(CombatError::InvalidTarget(format!(
            "{} takes {:?} targeting, got {} targets",
            action.name(),
            targeting,
            targets.len()
        )));
    }
    if let Some(defeated) = targets.iter().find(|t| t.creature().is_defeated()) {
        return Err(CombatError::InvalidTarget(format!(
            "{} is already defeated",
            defeated.creature().id
        )));
    }
    Ok(())
}

fn check_requirements(
    actor: &dyn Combatant,
    action: &CombatAction,
    content: &dyn ContentOracle,
) -> Result<(), CombatError> {
    let creature = actor.creature();
    match action {
        CombatAction::Spell(spell) => {
            if let Some(actual) = actor.proficiency(spell.element) {
                if actual < spell.proficiency_needed {
                    return Err(CombatError::InsufficientProficiency {
                        required: spell.proficiency_needed,
                        actual,
                    });
                }
            }
            if creature.mana() < spell.mana_cost {
                return Err(CombatError::InsufficientResource {
                    stat: Stat::Mana,
                    required: spell.mana_cost,
                    available: creature.mana(),
                });
            }
        }
        CombatAction::Attack(attack) => {
            if actor.pays_energy() && creature.mana() < attack.energy_cost {
                return Err(CombatError::InsufficientResource {
                    stat: Stat::Mana,
                    required: attack.energy_cost,
                    available: creature.mana(),
                });
            }
        }
        CombatAction::Pass => return Ok(()),
    }

    let conditions = action
        .buffs()
        .iter()
        .map(String::as_str)
        .chain(action.debuff_names().filter(|name| *name != LIFESTEAL));
    for name in conditions {
        if content.condition(name).is_none() {
            return Err(OracleError::not_found(ContentKind::Condition, name).into());
        }
    }
    for name in action.summons() {
        if content.minion(name).is_none() {
            return Err(OracleError::not_found(ContentKind::Minion, name.as_str()).into());
        }
    }
    Ok(())
}

/// Damage by type before mitigation.
///
/// # Formula
///
/// ```text
/// attack:  ((attack_power * damage_mult + flat) * mult + flat_mod) * hits      (physical)
/// spell:   per type, amount + power * (amount / total) * spell_power_scaling
///          power = attack power (physical), max(attack, magic) (raw), magic otherwise
/// ```
///
/// Condition damage modifiers (`strengthen`, `weaken`) apply per hit; a
/// spell's flat modifier is split across its damage types by share.
fn base_damage(
    actor: &Creature,
    action: &CombatAction,
    scale: &StatScale,
    hits: u32,
    config: &GameConfig,
) -> Vec<(DamageType, f64)> {
    match action {
        CombatAction::Attack(attack) => {
            let per_hit = actor.attack_power * attack.damage_mult + attack.flat_health_damage;
            if per_hit <= 0.0 {
                return Vec::new();
            }
            let per_hit = scale.apply(per_hit).max(0.0);
            vec![(DamageType::Physical, per_hit * f64::from(hits))]
        }
        CombatAction::Spell(spell) => {
            let total: f64 = spell.damage.values().filter(|v| **v > 0.0).sum();
            if total <= 0.0 {
                return Vec::new();
            }
            spell
                .damage
                .iter()
                .filter(|(_, amount)| **amount > 0.0)
                .map(|(damage_type, amount)| {
                    let share = amount / total;
                    let power = match damage_type {
                        DamageType::Physical => actor.attack_power,
                        DamageType::Raw => actor.attack_power.max(actor.magic_power),
                        _ => actor.magic_power,
                    };
                    let value = amount + power * share * config.spell_power_scaling;
                    let scaled = value * scale.mult + scale.flat * share;
                    (*damage_type, scaled.max(0.0))
                })
                .collect()
        }
        CombatAction::Pass => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        AttackDefinition, ConditionTemplate, DebuffRoll, EffectTemplate, MinionTemplate, PcgRng,
        SpellDefinition, CreatureTemplate,
    };
    use crate::state::{
        Condition, ConditionEffect, ConditionStyle, EffectKind, EffectStyle, Element,
        MagicProficiency, ProficiencyRank,
    };
    use crate::testing::{StubContent, monster, player};

    fn attack(name: &str) -> AttackDefinition {
        AttackDefinition {
            name: name.into(),
            ..AttackDefinition::default()
        }
    }

    fn stun() -> Condition {
        Condition {
            id: "stun-1".into(),
            name: "stun".into(),
            turns: 1,
            effects: vec![ConditionEffect::new(EffectKind::Stun, EffectStyle::Flat, 1.0)],
            ..Condition::default()
        }
    }

    fn resolve(
        content: &StubContent,
        actor: &mut dyn Combatant,
        action: &CombatAction,
        targets: &mut [&mut dyn Combatant],
    ) -> Result<ActionOutcome, CombatError> {
        let rng = PcgRng;
        let mut dice = Dice::new(&rng, 11);
        let config = GameConfig::default();
        let ctx = ResolveContext { content, config: &config };
        resolve_action(actor, action, targets, &ctx, &mut dice)
    }

    #[test]
    fn multi_hit_attack_totals_per_hit_times_hits() {
        let content = StubContent::default();
        let mut hero = player();
        let mut goblin = monster("g1", 100.0);
        let action = CombatAction::Attack(AttackDefinition {
            hits: 3,
            ..attack("flurry")
        });

        let outcome = resolve(&content, &mut hero, &action, &mut [&mut goblin]).unwrap();

        // attack power 10 * mult 1 = 10 per hit, 3 hits, no armor
        assert_eq!(outcome.total_damage(), 30.0);
        assert_eq!(goblin.health(), 70.0);
    }

    #[test]
    fn insufficient_mana_changes_nothing() {
        let content = StubContent::default();
        let mut hero = player();
        hero.stats.apply_delta(Stat::Mana, -45.0);
        let mut goblin = monster("g1", 40.0);
        let action = CombatAction::Spell(SpellDefinition {
            name: "fireball".into(),
            mana_cost: 10.0,
            damage: [(DamageType::Fire, 20.0)].into_iter().collect(),
            ..SpellDefinition::default()
        });

        let err = resolve(&content, &mut hero, &action, &mut [&mut goblin]).unwrap_err();

        assert!(matches!(err, CombatError::InsufficientResource { stat: Stat::Mana, .. }));
        assert_eq!(hero.stats.mana(), 5.0);
        assert_eq!(goblin.health(), 40.0);
    }

    #[test]
    fn stunned_actor_may_only_pass() {
        let content = StubContent::default();
        let mut hero = player();
        apply_condition(&mut hero.stats, stun());
        let mut goblin = monster("g1", 40.0);
        let before = (hero.clone(), goblin.clone());

        let slash = CombatAction::Attack(attack("slash"));
        let err = resolve(&content, &mut hero, &slash, &mut [&mut goblin]).unwrap_err();
        assert_eq!(err, CombatError::ActorIncapacitated(Incapacity::Stunned));
        assert_eq!((hero.clone(), goblin.clone()), before);

        let outcome = resolve(&content, &mut hero, &CombatAction::Pass, &mut []).unwrap();
        assert_eq!(outcome.action, "pass");
    }

    #[test]
    fn silenced_actor_cannot_cast_but_can_attack() {
        let content = StubContent::default();
        let mut hero = player();
        apply_condition(
            &mut hero.stats,
            Condition {
                turns: 2,
                effects: vec![ConditionEffect::new(EffectKind::Silenced, EffectStyle::Flat, 1.0)],
                ..Condition::default()
            },
        );
        let mut goblin = monster("g1", 40.0);
        let spell = CombatAction::Spell(SpellDefinition {
            name: "spark".into(),
            ..SpellDefinition::default()
        });
        assert_eq!(
            resolve(&content, &mut hero, &spell, &mut [&mut goblin]).unwrap_err(),
            CombatError::ActorIncapacitated(Incapacity::Silenced)
        );
        let slash = CombatAction::Attack(attack("slash"));
        assert!(resolve(&content, &mut hero, &slash, &mut [&mut goblin]).is_ok());
    }

    #[test]
    fn target_cardinality_and_defeated_targets_are_rejected() {
        let content = StubContent::default();
        let mut hero = player();
        let mut a = monster("a", 40.0);
        let mut b = monster("b", 40.0);
        let single = CombatAction::Attack(attack("slash"));

        let err = resolve(&content, &mut hero, &single, &mut [&mut a, &mut b]).unwrap_err();
        assert!(matches!(err, CombatError::InvalidTarget(_)));
        let err = resolve(&content, &mut hero, &single, &mut []).unwrap_err();
        assert!(matches!(err, CombatError::InvalidTarget(_)));

        b.kill();
        let err = resolve(&content, &mut hero, &single, &mut [&mut b]).unwrap_err();
        assert!(matches!(err, CombatError::InvalidTarget(_)));
    }

    #[test]
    fn proficiency_gates_player_spells() {
        let content = StubContent::default();
        let mut hero = player();
        let mut goblin = monster("g1", 40.0);
        let spell = CombatAction::Spell(SpellDefinition {
            name: "inferno".into(),
            element: Element::Fire,
            proficiency_needed: ProficiencyRank::Adept,
            ..SpellDefinition::default()
        });

        let err = resolve(&content, &mut hero, &spell, &mut [&mut goblin]).unwrap_err();
        assert_eq!(
            err,
            CombatError::InsufficientProficiency {
                required: ProficiencyRank::Adept,
                actual: ProficiencyRank::Novice,
            }
        );

        hero.magic_proficiencies.push(MagicProficiency {
            school: "fire".into(),
            proficiency: 150,
        });
        assert!(resolve(&content, &mut hero, &spell, &mut [&mut goblin]).is_ok());
    }

    #[test]
    fn raw_damage_ignores_armor() {
        let content = StubContent::default();
        let spell = CombatAction::Spell(SpellDefinition {
            name: "unmake".into(),
            damage: [(DamageType::Raw, 15.0)].into_iter().collect(),
            ..SpellDefinition::default()
        });

        let mut dealt = Vec::new();
        for armor in [0.0, 150.0, 900.0] {
            let mut hero = player();
            hero.stats.attack_power = 25.0;
            let mut goblin = monster("g1", 500.0);
            goblin.base_armor = armor;
            let outcome = resolve(&content, &mut hero, &spell, &mut [&mut goblin]).unwrap();
            dealt.push(outcome.total_damage());
        }

        // 15 base + max(25, 10) power
        assert_eq!(dealt, vec![40.0, 40.0, 40.0]);
    }

    #[test]
    fn armor_reduces_physical_damage() {
        let content = StubContent::default();
        let mut hero = player();
        let mut tank = monster("t", 100.0);
        tank.base_armor = 1000.0;
        let outcome =
            resolve(&content, &mut hero, &CombatAction::Attack(attack("slash")), &mut [&mut tank])
                .unwrap();
        // 10 * (1 - 0.925) = 0.75
        assert_eq!(outcome.total_damage(), 0.75);
    }

    #[test]
    fn monster_attacks_spend_energy_players_do_not() {
        let content = StubContent::default();
        let costly = CombatAction::Attack(AttackDefinition {
            energy_cost: 15.0,
            ..attack("maul")
        });

        let mut goblin = monster("g1", 40.0);
        let mut hero = player();
        resolve(&content, &mut goblin, &costly, &mut [&mut hero]).unwrap();
        assert_eq!(goblin.mana(), 5.0);

        let err = resolve(&content, &mut goblin, &costly, &mut [&mut hero]).unwrap_err();
        assert!(matches!(err, CombatError::InsufficientResource { .. }));

        let mut target = monster("g2", 40.0);
        resolve(&content, &mut hero, &costly, &mut [&mut target]).unwrap();
        assert_eq!(hero.stats.mana(), 50.0);
    }

    #[test]
    fn missed_targets_take_nothing() {
        let content = StubContent::default().with_condition(ConditionTemplate {
            name: "bleed".into(),
            turns: 3,
            ..ConditionTemplate::default()
        });
        let mut hero = player();
        let mut goblin = monster("g1", 40.0);
        let action = CombatAction::Attack(AttackDefinition {
            hit_chance: Some(0.0),
            debuffs: vec![DebuffRoll {
                name: "bleed".into(),
                chance: 1.0,
            }],
            ..attack("wild swing")
        });

        let outcome = resolve(&content, &mut hero, &action, &mut [&mut goblin]).unwrap();

        assert!(!outcome.any_hit());
        assert_eq!(goblin.health(), 40.0);
        assert!(goblin.conditions().is_empty());
    }

    #[test]
    fn debuffs_thorns_lifesteal_and_self_effects() {
        let content = StubContent::default()
            .with_condition(ConditionTemplate {
                name: "burn".into(),
                style: ConditionStyle::Debuff,
                turns: 2,
                effects: vec![EffectTemplate {
                    kind: EffectKind::HealthDamage,
                    style: EffectStyle::Multiplier,
                    amount: 0.5,
                }],
                ..ConditionTemplate::default()
            })
            .with_condition(ConditionTemplate {
                name: "fortify".into(),
                style: ConditionStyle::Buff,
                turns: 3,
                effects: vec![EffectTemplate {
                    kind: EffectKind::ArmorIncrease,
                    style: EffectStyle::Flat,
                    amount: 5.0,
                }],
                ..ConditionTemplate::default()
            });

        let mut hero = player();
        hero.stats.apply_delta(Stat::Health, -50.0);
        let mut goblin = monster("g1", 100.0);
        apply_condition(
            &mut goblin,
            Condition {
                turns: 2,
                effects: vec![ConditionEffect::new(EffectKind::Thorns, EffectStyle::Flat, 2.0)],
                ..Condition::default()
            },
        );
        let action = CombatAction::Attack(AttackDefinition {
            self_damage: -4.0,
            buffs: vec!["fortify".into()],
            debuffs: vec![
                DebuffRoll {
                    name: "burn".into(),
                    chance: 1.0,
                },
                DebuffRoll {
                    name: LIFESTEAL.into(),
                    chance: 1.0,
                },
            ],
            ..attack("vampiric strike")
        });

        let outcome = resolve(&content, &mut hero, &action, &mut [&mut goblin]).unwrap();

        assert_eq!(outcome.targets[0].damage, 10.0);
        assert_eq!(outcome.targets[0].debuffs, vec!["burn".to_string()]);
        // Burn ticks for half the damage that placed it
        assert_eq!(goblin.conditions()[1].health_per_tick(), 5.0);
        assert_eq!(outcome.targets[0].thorns, 2.0);
        assert_eq!(outcome.lifesteal, 5.0);
        assert_eq!(outcome.self_change, 4.0);
        // 50 - 2 thorns + 5 lifesteal + 4 self heal
        assert_eq!(hero.stats.health(), 57.0);
        assert_eq!(outcome.buffs, vec!["fortify".to_string()]);
        assert_eq!(hero.stats.armor(), 5.0);
    }

    #[test]
    fn unknown_debuff_is_rejected_before_mutation() {
        let content = StubContent::default();
        let mut hero = player();
        let mut goblin = monster("g1", 40.0);
        let action = CombatAction::Attack(AttackDefinition {
            debuffs: vec![DebuffRoll {
                name: "mystery".into(),
                chance: 1.0,
            }],
            ..attack("slash")
        });
        let err = resolve(&content, &mut hero, &action, &mut [&mut goblin]).unwrap_err();
        assert!(matches!(err, CombatError::Content(OracleError::NotFound { .. })));
        assert_eq!(goblin.health(), 40.0);
    }

    #[test]
    fn summons_are_returned_to_the_caller() {
        let content = StubContent::default().with_minion(MinionTemplate {
            creature: CreatureTemplate {
                species: "skeleton".into(),
                health: 20.0,
                attack_power: 3.0,
                attacks: vec!["claw".into()],
                ..CreatureTemplate::default()
            },
            turns_alive: 4,
        });
        let mut hero = player();
        let mut goblin = monster("g1", 40.0);
        let action = CombatAction::Spell(SpellDefinition {
            name: "raise dead".into(),
            summons: vec!["skeleton".into(), "skeleton".into()],
            ..SpellDefinition::default()
        });

        let outcome = resolve(&content, &mut hero, &action, &mut [&mut goblin]).unwrap();

        assert_eq!(outcome.summoned.len(), 2);
        assert_eq!(outcome.summoned[0].turns_left_alive, 4);
        assert_ne!(outcome.summoned[0].base.id, outcome.summoned[1].base.id);
    }

    #[test]
    fn spell_power_splits_across_damage_types() {
        let content = StubContent::default();
        let mut hero = player();
        hero.stats.magic_power = 20.0;
        let mut goblin = monster("g1", 200.0);
        let action = CombatAction::Spell(SpellDefinition {
            name: "steam".into(),
            damage: [(DamageType::Fire, 10.0), (DamageType::Cold, 30.0)]
                .into_iter()
                .collect(),
            ..SpellDefinition::default()
        });
        let outcome = resolve(&content, &mut hero, &action, &mut [&mut goblin]).unwrap();
        // 10 + 20 * 0.25 = 15 fire, 30 + 20 * 0.75 = 45 cold
        assert_eq!(outcome.total_damage(), 60.0);
    }
}
