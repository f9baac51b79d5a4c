//! Automated dungeon run driving the engine's public entry points.
//!
//! The pilot explores breadth-first toward the nearest uncleared room, opens
//! the boss room once the level allows it, and fights with the first usable
//! physical attack against the weakest standing enemy. It flees when health
//! drops low and leaves once nothing is left to clear.

use std::collections::{HashSet, VecDeque};

use game_core::state::{CurrentDungeon, DungeonLevel, Game};
use game_core::{ActionRef, DungeonError, DungeonRun, EncounterPhase, RoomEvent, Tile, TurnReport};

/// Health fraction below which the pilot tries to flee.
pub const FLEE_BELOW: f64 = 0.25;

/// How an automated run ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every reachable room cleared; the player walked out.
    Left,
    Fled,
    Defeated,
    /// Move budget spent mid-run; the dungeon stays open in the save.
    #[default]
    OutOfMoves,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub instance: String,
    pub level: String,
    pub rooms_entered: usize,
    pub turns: usize,
    pub encounters_won: usize,
    pub bosses_defeated: usize,
    pub gold: f64,
    pub outcome: RunOutcome,
}

/// First unlocked level whose boss still stands, falling back to the first
/// level of the first instance once everything open is cleared.
pub fn next_level(game: &Game) -> Option<(String, String)> {
    let pending = game.dungeon_instances.iter().find_map(|instance| {
        instance
            .levels
            .iter()
            .find(|level| level.unlocked && !level.boss_defeated)
            .map(|level| (instance.name.clone(), level.id()))
    });
    pending.or_else(|| {
        game.dungeon_instances.first().and_then(|instance| {
            instance
                .levels
                .first()
                .map(|level| (instance.name.clone(), level.id()))
        })
    })
}

/// Plays until the run ends or `max_moves` moves and turns are spent.
///
/// Resumes a dungeon left open by an earlier session; otherwise starts the
/// level picked by [`next_level`].
///
/// # Errors
///
/// Engine errors other than an unusable action. They are raised before any
/// state changes, so the world is still consistent and safe to save.
pub fn play(run: &mut DungeonRun<'_>, max_moves: usize) -> Result<RunSummary, DungeonError> {
    if run.dungeon().is_none() {
        let (instance, level) = next_level(run.game()).ok_or(DungeonError::NotInDungeon)?;
        run.start_dungeon(&instance, &level)?;
    }
    let mut summary = RunSummary::default();
    if let Some(dungeon) = run.dungeon() {
        summary.instance = dungeon.instance.clone();
        summary.level = dungeon.level.clone();
    }

    for _ in 0..max_moves {
        let Some(dungeon) = run.dungeon() else {
            return Ok(summary);
        };

        if run.phase().is_some() {
            let report = take_turn(run)?;
            summary.turns += 1;
            if let Some(outcome) = record(&report, &mut summary) {
                summary.outcome = outcome;
                return Ok(summary);
            }
            continue;
        }

        let boss_ready = level_of(run.game(), dungeon).is_some_and(DungeonLevel::boss_ready);
        match next_step(dungeon, boss_ready) {
            Some(step) => {
                let event = run.enter_tile(step.x, step.y)?;
                summary.rooms_entered += 1;
                match event {
                    RoomEvent::Quiet => {}
                    RoomEvent::Encounter { species } => {
                        tracing::info!(%species, x = step.x, y = step.y, "encounter");
                    }
                    RoomEvent::Boss { species } => {
                        tracing::info!(%species, x = step.x, y = step.y, "boss encounter");
                    }
                }
            }
            None => {
                let clock = run.leave_dungeon()?;
                tracing::info!(date = ?clock.date, "left the dungeon");
                summary.outcome = RunOutcome::Left;
                return Ok(summary);
            }
        }
    }

    tracing::info!(max_moves, "move budget spent");
    summary.outcome = RunOutcome::OutOfMoves;
    Ok(summary)
}

fn level_of<'g>(game: &'g Game, dungeon: &CurrentDungeon) -> Option<&'g DungeonLevel> {
    game.instance(&dungeon.instance)
        .and_then(|instance| instance.level(&dungeon.level))
}

/// Folds a turn into the summary. Returns the outcome when the run is over.
fn record(report: &TurnReport, summary: &mut RunSummary) -> Option<RunOutcome> {
    if let Some(rewards) = &report.rewards {
        summary.encounters_won += 1;
        summary.gold += rewards.gold;
        if rewards.boss_defeated {
            summary.bosses_defeated += 1;
        }
    }
    match report.outcome() {
        Some(EncounterPhase::PlayerDefeated) => Some(RunOutcome::Defeated),
        Some(EncounterPhase::Fled) => Some(RunOutcome::Fled),
        _ => None,
    }
}

fn take_turn(run: &mut DungeonRun<'_>) -> Result<TurnReport, DungeonError> {
    if run.phase() == Some(EncounterPhase::AwaitingTargetSelection) {
        let Some(slot) = weakest_enemy(run) else {
            return run.pass();
        };
        return match run.select_target(&[slot]) {
            Err(DungeonError::Combat(err)) => {
                tracing::debug!(%err, "target selection rejected; passing");
                run.pass()
            }
            other => other,
        };
    }

    let stats = &run.player().stats;
    if stats.health() < stats.health_max() * FLEE_BELOW {
        return run.flee();
    }

    let attacks = run.player().physical_attacks.clone();
    for name in attacks {
        match run.player_action(&ActionRef::Attack(name), None) {
            Ok(report) => return Ok(report),
            Err(DungeonError::Combat(err)) => {
                tracing::debug!(%err, "attack unavailable");
            }
            Err(err) => return Err(err),
        }
    }
    run.pass()
}

/// Standing enemy slot with the least health.
fn weakest_enemy(run: &DungeonRun<'_>) -> Option<usize> {
    let enemy = run.dungeon()?.enemy.as_ref()?;
    std::iter::once(&enemy.base)
        .chain(enemy.minions.iter().map(|m| &m.base))
        .enumerate()
        .filter(|(_, creature)| !creature.is_defeated())
        .min_by(|(_, a), (_, b)| a.health().total_cmp(&b.health()))
        .map(|(slot, _)| slot)
}

/// First step toward the nearest room worth entering.
///
/// Paths run through cleared rooms only; entering an uncleared room starts a
/// fight. The boss room counts only when the level's boss gate is open.
fn next_step(dungeon: &CurrentDungeon, boss_ready: bool) -> Option<Tile> {
    let start = dungeon.current_position;
    let wanted = |tile: &Tile| !tile.cleared_room && (!tile.is_boss_room || boss_ready);

    let mut seen = HashSet::from([(start.x, start.y)]);
    // (tile, first step taken from start)
    let mut queue: VecDeque<(Tile, Option<Tile>)> = VecDeque::from([(start, None)]);

    while let Some((tile, first)) = queue.pop_front() {
        for neighbour in dungeon.dungeon_map.iter().filter(|t| t.is_adjacent(&tile)) {
            if !seen.insert((neighbour.x, neighbour.y)) {
                continue;
            }
            let step = first.unwrap_or(*neighbour);
            if wanted(neighbour) {
                return Some(step);
            }
            if neighbour.cleared_room {
                queue.push_back((*neighbour, Some(step)));
            }
        }
    }
    None
}
