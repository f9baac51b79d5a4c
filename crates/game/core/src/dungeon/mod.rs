//! Dungeon run state machine.
//!
//! [`DungeonRun`] is the single entry point UI code drives during a run. It
//! borrows the world and the player for the duration of one call, together
//! with the content tables and a dice cursor:
//!
//! - map level: [`DungeonRun::start_dungeon`], [`DungeonRun::enter_tile`],
//!   [`DungeonRun::advance_step`], [`DungeonRun::load_boss`],
//!   [`DungeonRun::leave_dungeon`]
//! - encounter level: `player_action`, `select_target`, `pass` and `flee`,
//!   implemented in [`crate::encounter`]
//!
//! Every entry point validates before it mutates, so an `Err` leaves the
//! state exactly as it was.

mod error;
mod flee;
mod map;

pub use error::DungeonError;
pub use flee::flee_chance;
pub use map::{bounding_box, generate_tiles};

use crate::clock::ClockReport;
use crate::config::GameConfig;
use crate::encounter::Rewards;
use crate::env::{ContentKind, ContentOracle, Dice, GameEnv, OracleError};
use crate::state::{
    Creature, CurrentDungeon, DungeonLevel, EncounterPhase, Enemy, Game, Minion, PlayerCharacter,
    Tile,
};

/// Lifespan of boss escorts; they stay until defeated.
pub const ESCORT_TURNS: i32 = i32::MAX;

/// What the player found on entering a tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoomEvent {
    /// Already cleared; nothing happens.
    Quiet,
    /// An ordinary encounter began against the named species.
    Encounter { species: String },
    /// The level boss and its escort appeared.
    Boss { species: String },
}

/// One dungeon session over borrowed world state.
pub struct DungeonRun<'a> {
    pub(crate) game: &'a mut Game,
    pub(crate) player: &'a mut PlayerCharacter,
    pub(crate) content: &'a dyn ContentOracle,
    pub(crate) config: &'a GameConfig,
    pub(crate) dice: Dice<'a>,
}

impl<'a> DungeonRun<'a> {
    /// # Errors
    ///
    /// Returns `OracleError::ContentNotAvailable` if `env` carries no content.
    pub fn new(
        game: &'a mut Game,
        player: &'a mut PlayerCharacter,
        env: GameEnv<'a>,
        dice: Dice<'a>,
    ) -> Result<Self, OracleError> {
        Ok(Self {
            game,
            player,
            content: env.content()?,
            config: env.config(),
            dice,
        })
    }

    pub fn game(&self) -> &Game {
        self.game
    }

    pub fn player(&self) -> &PlayerCharacter {
        self.player
    }

    /// Current dice position, for resuming the sequence in a later session.
    pub fn dice(&self) -> Dice<'a> {
        self.dice
    }

    pub fn dungeon(&self) -> Option<&CurrentDungeon> {
        self.player.current_dungeon.as_ref()
    }

    /// Rest phase of the active encounter, `None` outside combat.
    pub fn phase(&self) -> Option<EncounterPhase> {
        self.dungeon().and_then(CurrentDungeon::phase)
    }

    /// Enters a level of an unlocked instance.
    ///
    /// Generates the floor, places the player on the entrance and records the
    /// map's bounding box. No boss room is placed once the boss is down.
    ///
    /// # Errors
    ///
    /// `AlreadyInDungeon` during a run, `UnknownInstance`/`UnknownLevel` for
    /// names the world does not have, `LevelLocked` for a floor no boss
    /// victory has opened yet.
    pub fn start_dungeon(&mut self, instance: &str, level: &str) -> Result<(), DungeonError> {
        if self.player.current_dungeon.is_some() {
            return Err(DungeonError::AlreadyInDungeon);
        }
        let floor = find_level(self.game, instance, level)?;
        if !floor.unlocked {
            return Err(DungeonError::LevelLocked {
                instance: instance.to_owned(),
                level: level.to_owned(),
            });
        }
        let count = usize::try_from(floor.tiles).unwrap_or(0);
        let place_boss = !floor.boss_defeated && !floor.bosses.is_empty();

        let dungeon_map = generate_tiles(count, place_boss, &mut self.dice);
        let map_dimensions = bounding_box(&dungeon_map);
        let current_position = dungeon_map[0];

        tracing::info!(
            instance,
            level,
            rooms = dungeon_map.len(),
            "entered dungeon"
        );
        self.player.current_dungeon = Some(CurrentDungeon {
            instance: instance.to_owned(),
            level: level.to_owned(),
            current_position,
            dungeon_map,
            map_dimensions,
            ..CurrentDungeon::default()
        });
        Ok(())
    }

    /// Moves to an orthogonally adjacent tile.
    ///
    /// Leaving a tile whose fight was won advances the level's step counter.
    /// An uncleared tile is marked cleared and starts an encounter: the boss
    /// roster for the boss room, otherwise a creature rolled from the level's
    /// encounter table.
    ///
    /// A room is cleared on entry, not on victory, so walking back into it
    /// never spawns a second encounter. A fight set aside with
    /// [`suspend_encounter`](Self::suspend_encounter) returns only through
    /// [`resume_encounter`](Self::resume_encounter), boss flag included.
    ///
    /// # Errors
    ///
    /// - `NotInDungeon`, `EncounterActive`
    /// - `TileNotFound`, `TileNotAdjacent`
    /// - `BossNotReady` when the boss room is entered before the level's
    ///   step quota is met (the player does not move)
    pub fn enter_tile(&mut self, x: i32, y: i32) -> Result<RoomEvent, DungeonError> {
        let dungeon = self
            .player
            .current_dungeon
            .as_ref()
            .ok_or(DungeonError::NotInDungeon)?;
        if dungeon.in_encounter() {
            return Err(DungeonError::EncounterActive);
        }
        let target = *dungeon
            .tile(x, y)
            .ok_or(DungeonError::TileNotFound { x, y })?;
        if !target.is_adjacent(&dungeon.current_position) {
            return Err(DungeonError::TileNotAdjacent { x, y });
        }

        let instance = dungeon.instance.clone();
        let credit = i32::from(dungeon.tile_won);
        let floor = find_level(self.game, &instance, &dungeon.level)?;
        let boss_fight = !target.cleared_room && target.is_boss_room && !floor.boss_defeated;
        if boss_fight {
            if floor.step + credit < floor.steps_before_boss {
                return Err(DungeonError::BossNotReady {
                    step: floor.step + credit,
                    required: floor.steps_before_boss,
                });
            }
            if let Some(missing) = floor.bosses.iter().find(|b| self.content.creature(b).is_none()) {
                return Err(OracleError::not_found(ContentKind::Creature, missing.as_str()).into());
            }
        }
        let floor_number = floor.level;
        let encounter = if target.cleared_room || boss_fight {
            None
        } else {
            Some(self.roll_encounter(&instance, floor_number)?)
        };

        if credit > 0 {
            self.advance_step()?;
        }
        let dungeon = self.dungeon_mut()?;
        dungeon.tile_won = false;
        if let Some(tile) = dungeon.tile_mut(x, y) {
            tile.cleared_room = true;
        }
        dungeon.current_position = Tile {
            cleared_room: true,
            ..target
        };
        tracing::debug!(x, y, "entered tile");

        if target.cleared_room {
            return Ok(RoomEvent::Quiet);
        }
        if boss_fight {
            let species = self.load_boss()?;
            return Ok(RoomEvent::Boss { species });
        }
        match encounter {
            Some(creature) => {
                let species = creature.species.clone();
                tracing::info!(%species, "encounter");
                self.dungeon_mut()?.enemy = Some(Enemy::new(creature));
                Ok(RoomEvent::Encounter { species })
            }
            None => Ok(RoomEvent::Quiet),
        }
    }

    /// Credits one step toward the level boss. Returns the new count.
    ///
    /// # Errors
    ///
    /// `NotInDungeon`, or `UnknownInstance`/`UnknownLevel` if the run points
    /// at a level the world no longer has.
    pub fn advance_step(&mut self) -> Result<i32, DungeonError> {
        let dungeon = self
            .player
            .current_dungeon
            .as_ref()
            .ok_or(DungeonError::NotInDungeon)?;
        let floor = find_level_mut(self.game, &dungeon.instance, &dungeon.level)?;
        floor.step += 1;
        tracing::debug!(step = floor.step, quota = floor.steps_before_boss, "step advanced");
        Ok(floor.step)
    }

    /// Starts the boss fight, replacing any current enemy.
    ///
    /// The first boss leads; the rest of the roster joins as its minions.
    /// Returns the leader's species.
    ///
    /// # Errors
    ///
    /// `BossDefeated` or `BossNotReady` from the level's gate, and
    /// `Oracle(NotFound)` for a boss missing from the creature tables. Nothing
    /// changes on error.
    pub fn load_boss(&mut self) -> Result<String, DungeonError> {
        let dungeon = self
            .player
            .current_dungeon
            .as_ref()
            .ok_or(DungeonError::NotInDungeon)?;
        let floor = find_level(self.game, &dungeon.instance, &dungeon.level)?;
        if floor.boss_defeated {
            return Err(DungeonError::BossDefeated(floor.id()));
        }
        if !floor.boss_ready() {
            return Err(DungeonError::BossNotReady {
                step: floor.step,
                required: floor.steps_before_boss,
            });
        }
        let roster = floor.bosses.clone();
        let Some((leader, escort)) = roster.split_first() else {
            return Err(OracleError::not_found(ContentKind::Creature, "boss").into());
        };

        let mut enemy = Enemy::new(self.spawn(leader)?);
        for species in escort {
            enemy.minions.push(Minion::new(self.spawn(species)?, ESCORT_TURNS));
        }

        tracing::info!(boss = %leader, escort = escort.len(), "boss fight");
        let dungeon = self.dungeon_mut()?;
        dungeon.enemy = Some(enemy);
        dungeon.fighting_boss = true;
        dungeon.pending_action = None;
        Ok(leader.clone())
    }

    /// Walks out of the dungeon and lets a week pass.
    ///
    /// # Errors
    ///
    /// `NotInDungeon`, or `EncounterActive` while an enemy is present.
    pub fn leave_dungeon(&mut self) -> Result<ClockReport, DungeonError> {
        let dungeon = self
            .player
            .current_dungeon
            .as_ref()
            .ok_or(DungeonError::NotInDungeon)?;
        if dungeon.in_encounter() {
            return Err(DungeonError::EncounterActive);
        }
        tracing::info!(instance = %dungeon.instance, level = %dungeon.level, "left dungeon");
        self.player.current_dungeon = None;
        Ok(self.tick_clock())
    }

    /// Sets the active encounter aside in `saved_enemy`, remembering whether
    /// it is the boss fight.
    ///
    /// # Errors
    ///
    /// `NoEncounter` outside combat, `UnexpectedPhase` while targets are
    /// being picked.
    pub fn suspend_encounter(&mut self) -> Result<(), DungeonError> {
        let phase = self.phase().ok_or(DungeonError::NoEncounter)?;
        if phase != EncounterPhase::AwaitingPlayerAction {
            return Err(DungeonError::UnexpectedPhase { actual: phase });
        }
        let dungeon = self.dungeon_mut()?;
        let enemy = dungeon.enemy.take();
        let boss = std::mem::take(&mut dungeon.fighting_boss);
        self.player.saved_enemy = enemy;
        self.player.saved_boss_fight = boss;
        tracing::debug!(boss, "encounter suspended");
        Ok(())
    }

    /// Brings a suspended encounter back onto the current tile.
    ///
    /// # Errors
    ///
    /// `NotInDungeon`, `EncounterActive`, or `NoSavedEncounter`.
    pub fn resume_encounter(&mut self) -> Result<(), DungeonError> {
        let dungeon = self
            .player
            .current_dungeon
            .as_mut()
            .ok_or(DungeonError::NotInDungeon)?;
        if dungeon.in_encounter() {
            return Err(DungeonError::EncounterActive);
        }
        let enemy = self
            .player
            .saved_enemy
            .take()
            .ok_or(DungeonError::NoSavedEncounter)?;
        dungeon.enemy = Some(enemy);
        dungeon.fighting_boss = std::mem::take(&mut self.player.saved_boss_fight);
        tracing::debug!(boss = dungeon.fighting_boss, "encounter resumed");
        Ok(())
    }

    pub(crate) fn dungeon_mut(&mut self) -> Result<&mut CurrentDungeon, DungeonError> {
        self.player
            .current_dungeon
            .as_mut()
            .ok_or(DungeonError::NotInDungeon)
    }

    /// Lets a week pass outside the dungeon. A player the tick kills lands
    /// on the death screen.
    pub(crate) fn tick_clock(&mut self) -> ClockReport {
        let report = self
            .game
            .game_tick(self.player, self.content, self.config, &mut self.dice);
        if self.player.is_dead() {
            tracing::info!(player = %self.player.id(), "player died between runs");
            self.game.at_death_screen = true;
            self.player.minions.clear();
        }
        report
    }

    /// Opens what a boss victory in `instance` leads to: the next floor, or
    /// the instances it unlocks once no deeper floor is left.
    pub(crate) fn open_next_level(&mut self, instance: &str, rewards: &mut Rewards) {
        let Some(current) = self.game.instance_mut(instance) else {
            return;
        };
        if let Some(level) = current.unlock_next_level() {
            tracing::info!(%instance, level, "level unlocked");
            rewards.unlocked_level = Some(level.to_string());
            return;
        }

        let unlocks = self
            .content
            .dungeon(instance)
            .map(|definition| definition.unlocks.clone())
            .unwrap_or_default();
        for name in unlocks {
            if self.game.instance(&name).is_some() {
                continue;
            }
            let Some(definition) = self.content.dungeon(&name) else {
                tracing::warn!(%instance, unlock = %name, "unlocked dungeon missing from content");
                continue;
            };
            tracing::info!(%instance, unlock = %name, "dungeon unlocked");
            self.game.dungeon_instances.push(definition.instantiate());
            rewards.unlocked_instances.push(name);
        }
    }

    /// Fresh creature of `species` with a new id.
    pub(crate) fn spawn(&mut self, species: &str) -> Result<Creature, DungeonError> {
        let template = self
            .content
            .creature(species)
            .ok_or_else(|| OracleError::not_found(ContentKind::Creature, species))?;
        Ok(template.spawn(self.dice.next_id(species)))
    }

    fn roll_encounter(&mut self, instance: &str, level: i32) -> Result<Creature, DungeonError> {
        let definition = self
            .content
            .dungeon(instance)
            .ok_or_else(|| OracleError::not_found(ContentKind::Dungeon, instance))?
            .level(level)
            .ok_or_else(|| OracleError::not_found(ContentKind::DungeonLevel, level.to_string()))?;
        if definition.encounters.is_empty() {
            return Err(DungeonError::EmptyEncounterTable(level.to_string()));
        }
        let species = &definition.encounters[self.dice.below(definition.encounters.len())];
        self.spawn(species)
    }
}

pub(crate) fn find_level<'g>(
    game: &'g Game,
    instance: &str,
    level: &str,
) -> Result<&'g DungeonLevel, DungeonError> {
    game.instance(instance)
        .ok_or_else(|| DungeonError::UnknownInstance(instance.to_owned()))?
        .level(level)
        .ok_or_else(|| DungeonError::UnknownLevel {
            instance: instance.to_owned(),
            level: level.to_owned(),
        })
}

pub(crate) fn find_level_mut<'g>(
    game: &'g mut Game,
    instance: &str,
    level: &str,
) -> Result<&'g mut DungeonLevel, DungeonError> {
    game.instance_mut(instance)
        .ok_or_else(|| DungeonError::UnknownInstance(instance.to_owned()))?
        .level_mut(level)
        .ok_or_else(|| DungeonError::UnknownLevel {
            instance: instance.to_owned(),
            level: level.to_owned(),
        })
}
