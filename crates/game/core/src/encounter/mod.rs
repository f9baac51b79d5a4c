//! Encounter state machine.
//!
//! One call drives the encounter from the player's input until it needs
//! input again or ends:
//!
//! ```text
//! AwaitingPlayerAction
//!   -> ResolvingPlayerAction (player, then the player's minions)
//!   -> [AwaitingTargetSelection -> ResolvingPlayerAction]
//!   -> EnemyTurn -> MinionTurns -> ConditionTick
//!   -> AwaitingPlayerAction | Victory | PlayerDefeated | Fled
//! ```
//!
//! Enemy-side creatures are addressed by slot: 0 is the leader, `i + 1` is
//! its `i`-th minion.

mod ai;
mod report;

pub use ai::{choose_attack, score_attack};
pub use report::{RevengeStrike, Rewards, TickEntry, TurnReport};

use std::iter;

use crate::combat::{
    ActionOutcome, ActionRef, CombatAction, CombatError, Combatant, ResolveContext, precheck,
    resolve_action, round_quarter,
};
use crate::conditions::{TickPhase, revenge_damage, tick};
use crate::dungeon::{DungeonError, DungeonRun, find_level, find_level_mut, flee_chance};
use crate::env::{Dice, Targeting};
use crate::state::{
    Creature, EncounterPhase, Enemy, Minion, PlayerCharacter, Stat, prune_minions,
};

impl DungeonRun<'_> {
    /// Takes the player's turn with a known attack or spell.
    ///
    /// `targets` are enemy slots. Without them, an action that reaches every
    /// standing enemy resolves immediately; otherwise it waits in
    /// `AwaitingTargetSelection` for [`DungeonRun::select_target`].
    ///
    /// # Errors
    ///
    /// `NoEncounter`, `UnexpectedPhase`, and the resolver's `CombatError`s
    /// (checked before anything changes).
    pub fn player_action(
        &mut self,
        action: &ActionRef,
        targets: Option<&[usize]>,
    ) -> Result<TurnReport, DungeonError> {
        self.expect_phase(EncounterPhase::AwaitingPlayerAction)?;
        let known = match action {
            ActionRef::Attack(_) => &self.player.physical_attacks,
            ActionRef::Spell(_) => &self.player.known_spells,
        };
        if !known.iter().any(|k| k == action.name()) {
            return Err(CombatError::UnknownAction(action.name().to_owned()).into());
        }
        let resolved = action.resolve(self.content)?;
        precheck(&*self.player, &resolved, self.content)?;

        let slots = match targets {
            Some(slots) => slots.to_vec(),
            None => {
                let alive = self.alive_enemy_slots()?;
                let covers = resolved
                    .targeting()
                    .is_some_and(|targeting| targeting.covers(alive.len()));
                if !covers {
                    self.dungeon_mut()?.pending_action = Some(action.clone());
                    let mut report = TurnReport::default();
                    report.enter(EncounterPhase::ResolvingPlayerAction);
                    report.enter(EncounterPhase::AwaitingTargetSelection);
                    return Ok(report);
                }
                alive
            }
        };
        self.fight(Opening::Act(resolved, slots), TurnReport::default())
    }

    /// Resolves the action waiting for targets against the chosen slots.
    ///
    /// # Errors
    ///
    /// `NoPendingAction` outside target selection; the resolver's errors
    /// otherwise, in which case the action keeps waiting.
    pub fn select_target(&mut self, targets: &[usize]) -> Result<TurnReport, DungeonError> {
        let phase = self.phase().ok_or(DungeonError::NoEncounter)?;
        if phase != EncounterPhase::AwaitingTargetSelection {
            return Err(DungeonError::NoPendingAction);
        }
        let pending = self
            .dungeon()
            .and_then(|d| d.pending_action.clone())
            .ok_or(DungeonError::NoPendingAction)?;
        let resolved = pending.resolve(self.content)?;
        self.fight(Opening::Act(resolved, targets.to_vec()), TurnReport::default())
    }

    /// Skips the player's action. Also abandons an action waiting for targets.
    ///
    /// # Errors
    ///
    /// `NoEncounter` outside combat.
    pub fn pass(&mut self) -> Result<TurnReport, DungeonError> {
        self.phase().ok_or(DungeonError::NoEncounter)?;
        self.fight(Opening::Act(CombatAction::Pass, Vec::new()), TurnReport::default())
    }

    /// Tries to escape the encounter.
    ///
    /// Success ends the encounter and the run without rewards, and lets a
    /// week pass. Failure costs the player's action: the enemy side takes
    /// its turn as usual.
    ///
    /// # Errors
    ///
    /// `NoEncounter`, or `UnexpectedPhase` unless awaiting the player's action.
    pub fn flee(&mut self) -> Result<TurnReport, DungeonError> {
        self.expect_phase(EncounterPhase::AwaitingPlayerAction)?;
        let dungeon = self.dungeon().ok_or(DungeonError::NotInDungeon)?;
        let difficulty = self
            .game
            .instance(&dungeon.instance)
            .map_or(0.0, |instance| instance.difficulty);
        let chance = flee_chance(self.player.dexterity, difficulty, self.config);
        let escaped = self.dice.unit() * 100.0 < chance;
        tracing::info!(chance, escaped, "flee attempt");

        let mut report = TurnReport {
            fled: Some(escaped),
            ..TurnReport::default()
        };
        if !escaped {
            return self.fight(Opening::FailedFlee, report);
        }
        self.player.current_dungeon = None;
        self.tick_clock();
        report.enter(EncounterPhase::Fled);
        Ok(report)
    }

    fn expect_phase(&self, expected: EncounterPhase) -> Result<(), DungeonError> {
        let actual = self.phase().ok_or(DungeonError::NoEncounter)?;
        if actual != expected {
            return Err(DungeonError::UnexpectedPhase { actual });
        }
        Ok(())
    }

    fn alive_enemy_slots(&self) -> Result<Vec<usize>, DungeonError> {
        self.dungeon()
            .and_then(|d| d.enemy.as_ref())
            .map(alive_slots)
            .ok_or(DungeonError::NoEncounter)
    }

    /// Runs the turn with the encounter's creatures lifted out of the player.
    fn fight(&mut self, opening: Opening, mut report: TurnReport) -> Result<TurnReport, DungeonError> {
        let mut dungeon = self
            .player
            .current_dungeon
            .take()
            .ok_or(DungeonError::NotInDungeon)?;
        let Some(enemy) = dungeon.enemy.take() else {
            self.player.current_dungeon = Some(dungeon);
            return Err(DungeonError::NoEncounter);
        };
        let pending = dungeon.pending_action.take();

        let ctx = ResolveContext {
            content: self.content,
            config: self.config,
        };
        let allies = std::mem::take(&mut self.player.minions);
        let mut field = Field {
            player: &mut *self.player,
            allies,
            enemy,
        };
        let result = field.play(opening, &ctx, &mut self.dice, &mut report);
        let Field { allies, enemy, .. } = field;
        self.player.minions = allies;
        dungeon.enemy = Some(enemy);

        let ending = match result {
            Ok(ending) => ending,
            Err(err) => {
                dungeon.pending_action = pending;
                self.player.current_dungeon = Some(dungeon);
                return Err(err.into());
            }
        };
        self.player.current_dungeon = Some(dungeon);

        match ending {
            Ending::Ongoing => {}
            Ending::Victory => report.rewards = Some(self.claim_victory()?),
            Ending::Defeat => self.record_defeat(),
        }
        Ok(report)
    }

    /// Pays out and closes a won encounter.
    ///
    /// The leader's template rolls the gold. A boss victory marks the level's
    /// boss defeated, opens the next floor or the dungeons this one unlocks,
    /// awards skill points and may complete the instance.
    fn claim_victory(&mut self) -> Result<Rewards, DungeonError> {
        let dungeon = self
            .player
            .current_dungeon
            .as_mut()
            .ok_or(DungeonError::NotInDungeon)?;
        let instance = dungeon.instance.clone();
        let level = dungeon.level.clone();
        let boss = dungeon.fighting_boss;
        // Fail before paying out if the run points nowhere
        find_level(self.game, &instance, &level)?;

        let enemy = dungeon.enemy.take();
        dungeon.pending_action = None;
        dungeon.fighting_boss = false;
        dungeon.tile_won = true;

        let mut rewards = Rewards::default();
        let leader = enemy.as_ref().map(|e| e.base.species.as_str());
        if let Some(template) = leader.and_then(|species| self.content.creature(species)) {
            rewards.gold = self.dice.between(template.gold_min, template.gold_max).floor();
        }
        self.player.gold += rewards.gold;

        if boss {
            find_level_mut(self.game, &instance, &level)?.boss_defeated = true;
            self.open_next_level(&instance, &mut rewards);
            rewards.boss_defeated = true;
            rewards.skill_points = self.config.boss_skill_points;
            self.player.unallocated_skill_points = self
                .player
                .unallocated_skill_points
                .saturating_add(i32::try_from(rewards.skill_points).unwrap_or(i32::MAX));
            if self.game.note_completion(&instance) {
                rewards.completed_instance = Some(instance.clone());
            }
        }

        tracing::info!(
            gold = rewards.gold,
            boss = rewards.boss_defeated,
            %instance,
            %level,
            "victory"
        );
        Ok(rewards)
    }

    fn record_defeat(&mut self) {
        tracing::info!(player = %self.player.id(), "player defeated");
        self.game.at_death_screen = true;
        self.player.current_dungeon = None;
        self.player.minions.clear();
    }
}

enum Opening {
    Act(CombatAction, Vec<usize>),
    FailedFlee,
}

enum Ending {
    Ongoing,
    Victory,
    Defeat,
}

/// Both sides of an encounter, borrowed apart so any creature can act on any
/// other.
struct Field<'p> {
    player: &'p mut PlayerCharacter,
    allies: Vec<Minion>,
    enemy: Enemy,
}

impl Field<'_> {
    /// Plays one round. Only the player's own action can fail, and it fails
    /// before anything changes.
    fn play(
        &mut self,
        opening: Opening,
        ctx: &ResolveContext<'_>,
        dice: &mut Dice<'_>,
        report: &mut TurnReport,
    ) -> Result<Ending, CombatError> {
        if let Opening::Act(action, slots) = opening {
            report.enter(EncounterPhase::ResolvingPlayerAction);
            let outcome = {
                let Field { player, enemy, .. } = self;
                let mut targets = pick(enemy_side(enemy), &slots)?;
                resolve_action(&mut **player, &action, &mut targets, ctx, dice)?
            };
            self.allies.extend(outcome.summoned.iter().cloned());
            report.actions.push(outcome);
            if let Some(ending) = self.settle(report) {
                return Ok(ending);
            }

            self.allies_act(ctx, dice, report);
            self.tick_enemy_side(TickPhase::EnemyTurnEnd, report);
            if let Some(ending) = self.settle(report) {
                return Ok(ending);
            }
        }

        report.enter(EncounterPhase::EnemyTurn);
        self.leader_acts(ctx, dice, report);
        if let Some(ending) = self.settle(report) {
            return Ok(ending);
        }

        report.enter(EncounterPhase::MinionTurns);
        self.enemy_minions_act(ctx, dice, report);
        self.tick_player_side(TickPhase::EnemyTurnEnd, report);
        if let Some(ending) = self.settle(report) {
            return Ok(ending);
        }

        report.enter(EncounterPhase::ConditionTick);
        self.tick_player_side(TickPhase::OwnTurnEnd, report);
        self.tick_enemy_side(TickPhase::OwnTurnEnd, report);
        prune_minions(&mut self.allies);
        prune_minions(&mut self.enemy.minions);
        if let Some(ending) = self.settle(report) {
            return Ok(ending);
        }

        report.enter(EncounterPhase::AwaitingPlayerAction);
        Ok(Ending::Ongoing)
    }

    /// Terminal outcome, if any. The player's death takes precedence.
    fn settle(&self, report: &mut TurnReport) -> Option<Ending> {
        if self.player.is_dead() {
            report.enter(EncounterPhase::PlayerDefeated);
            Some(Ending::Defeat)
        } else if self.enemy.is_cleared() {
            report.enter(EncounterPhase::Victory);
            Some(Ending::Victory)
        } else {
            None
        }
    }

    /// Player minions act top to bottom against the first standing enemies.
    fn allies_act(&mut self, ctx: &ResolveContext<'_>, dice: &mut Dice<'_>, report: &mut TurnReport) {
        let mut summoned = Vec::new();
        for index in 0..self.allies.len() {
            let Field { allies, enemy, .. } = self;
            let alive = alive_slots(enemy);
            if alive.is_empty() {
                break;
            }
            let minion = &mut allies[index];
            if minion.base.is_defeated() {
                continue;
            }
            minion.spend_turn();

            let action = choose_attack(&minion.base, None, alive.len(), ctx.content, dice);
            let count = action.targeting().map_or(0, |t| t.target_count(alive.len()));
            let Ok(mut targets) = pick(enemy_side(enemy), &alive[..count]) else {
                continue;
            };
            if let Some(outcome) = act(minion, &action, &mut targets, ctx, dice) {
                summoned.extend(outcome.summoned.iter().cloned());
                report.actions.push(outcome);
            }
        }
        self.allies.extend(summoned);
        prune_minions(&mut self.allies);
    }

    fn leader_acts(&mut self, ctx: &ResolveContext<'_>, dice: &mut Dice<'_>, report: &mut TurnReport) {
        let Field {
            player,
            allies,
            enemy,
        } = self;
        if enemy.base.is_defeated() {
            return;
        }
        let minions = Some(enemy.minions.len());
        let action = choose_attack(&enemy.base, minions, 1 + alive_allies(allies).len(), ctx.content, dice);
        let picks = player_side_picks(action.targeting(), allies, dice);
        let mut targets = player_side(player, allies, &picks);
        let Some(outcome) = act(&mut enemy.base, &action, &mut targets, ctx, dice) else {
            return;
        };
        drop(targets);

        revenge(player, &mut enemy.base, &outcome, report);
        enemy.minions.extend(outcome.summoned.iter().cloned());
        report.actions.push(outcome);
    }

    /// Enemy minions act top to bottom. Minions summoned during this phase
    /// wait for the next round.
    fn enemy_minions_act(
        &mut self,
        ctx: &ResolveContext<'_>,
        dice: &mut Dice<'_>,
        report: &mut TurnReport,
    ) {
        let acting = self.enemy.minions.len();
        for index in 0..acting {
            if self.player.is_dead() {
                break;
            }
            let Field {
                player,
                allies,
                enemy,
            } = self;
            let minion = &mut enemy.minions[index];
            if minion.base.is_defeated() {
                continue;
            }
            minion.spend_turn();

            let opponents = 1 + alive_allies(allies).len();
            let action = choose_attack(&minion.base, None, opponents, ctx.content, dice);
            let picks = player_side_picks(action.targeting(), allies, dice);
            let mut targets = player_side(player, allies, &picks);
            let Some(outcome) = act(minion, &action, &mut targets, ctx, dice) else {
                continue;
            };
            drop(targets);

            revenge(player, &mut minion.base, &outcome, report);
            enemy.minions.extend(outcome.summoned.iter().cloned());
            report.actions.push(outcome);
        }
        prune_minions(&mut self.enemy.minions);
    }

    fn tick_player_side(&mut self, phase: TickPhase, report: &mut TurnReport) {
        let creatures =
            iter::once(&mut self.player.stats).chain(self.allies.iter_mut().map(|m| &mut m.base));
        tick_side(creatures, phase, report);
    }

    fn tick_enemy_side(&mut self, phase: TickPhase, report: &mut TurnReport) {
        let creatures = iter::once(&mut self.enemy.base)
            .chain(self.enemy.minions.iter_mut().map(|m| &mut m.base));
        tick_side(creatures, phase, report);
    }
}

/// Resolves a creature's chosen move. Failures are content faults; the
/// creature loses its turn.
fn act(
    actor: &mut dyn Combatant,
    action: &CombatAction,
    targets: &mut [&mut dyn Combatant],
    ctx: &ResolveContext<'_>,
    dice: &mut Dice<'_>,
) -> Option<ActionOutcome> {
    match resolve_action(actor, action, targets, ctx, dice) {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            tracing::warn!(
                actor = %actor.creature().id,
                action = action.name(),
                error = %err,
                "creature action failed"
            );
            None
        }
    }
}

/// Returns revenge damage to an attacker that hurt the player.
fn revenge(
    player: &PlayerCharacter,
    attacker: &mut Creature,
    outcome: &ActionOutcome,
    report: &mut TurnReport,
) {
    let taken: f64 = outcome
        .targets
        .iter()
        .filter(|t| t.target_id == player.stats.id)
        .map(|t| t.damage)
        .sum();
    let damage = round_quarter(revenge_damage(player.stats.conditions(), taken));
    if damage <= 0.0 || attacker.is_defeated() {
        return;
    }
    let change = attacker.apply_delta(Stat::Health, -damage);
    report.revenge.push(RevengeStrike {
        attacker_id: attacker.id.clone(),
        damage: -change.applied(),
    });
}

fn tick_side<'c>(
    creatures: impl Iterator<Item = &'c mut Creature>,
    phase: TickPhase,
    report: &mut TurnReport,
) {
    for creature in creatures {
        if creature.is_defeated() {
            continue;
        }
        let mut result = tick(creature, phase);
        if phase == TickPhase::OwnTurnEnd {
            result.mana_change += creature.regenerate().applied();
        }
        report.record_tick(&creature.id, phase, result);
    }
}

/// Standing enemy-side slots, leader first.
fn alive_slots(enemy: &Enemy) -> Vec<usize> {
    iter::once(&enemy.base)
        .chain(enemy.minions.iter().map(|m| &m.base))
        .enumerate()
        .filter(|(_, creature)| !creature.is_defeated())
        .map(|(slot, _)| slot)
        .collect()
}

fn alive_allies(allies: &[Minion]) -> Vec<usize> {
    allies
        .iter()
        .enumerate()
        .filter(|(_, minion)| !minion.base.is_defeated())
        .map(|(index, _)| index)
        .collect()
}

fn enemy_side(enemy: &mut Enemy) -> Vec<Option<&mut dyn Combatant>> {
    let Enemy { base, minions } = enemy;
    let mut side: Vec<Option<&mut dyn Combatant>> = Vec::with_capacity(minions.len() + 1);
    side.push(Some(base as &mut dyn Combatant));
    side.extend(minions.iter_mut().map(|m| Some(m as &mut dyn Combatant)));
    side
}

/// Takes the creatures in `slots`, in order. Each slot may be taken once.
fn pick<'s>(
    mut side: Vec<Option<&'s mut dyn Combatant>>,
    slots: &[usize],
) -> Result<Vec<&'s mut dyn Combatant>, CombatError> {
    slots
        .iter()
        .map(|&slot| {
            side.get_mut(slot)
                .and_then(Option::take)
                .ok_or_else(|| CombatError::InvalidTarget(format!("enemy slot {slot} is not available")))
        })
        .collect()
}

/// Player-side targets of an enemy move.
///
/// The player is always hit; a dual move adds one random standing minion, an
/// area move every standing minion. `None` for a pass.
fn player_side_picks(
    targeting: Option<Targeting>,
    allies: &[Minion],
    dice: &mut Dice<'_>,
) -> Option<Vec<usize>> {
    let standing = alive_allies(allies);
    match targeting? {
        Targeting::Single => Some(Vec::new()),
        Targeting::Dual if standing.is_empty() => Some(Vec::new()),
        Targeting::Dual => Some(vec![standing[dice.below(standing.len())]]),
        Targeting::Area => Some(standing),
    }
}

fn player_side<'s>(
    player: &'s mut PlayerCharacter,
    allies: &'s mut [Minion],
    picks: &Option<Vec<usize>>,
) -> Vec<&'s mut dyn Combatant> {
    let Some(picks) = picks else {
        return Vec::new();
    };
    let mut side: Vec<&mut dyn Combatant> = Vec::with_capacity(picks.len() + 1);
    side.push(player);
    side.extend(
        allies
            .iter_mut()
            .enumerate()
            .filter(|(index, _)| picks.contains(index))
            .map(|(_, minion)| minion as &mut dyn Combatant),
    );
    side
}
