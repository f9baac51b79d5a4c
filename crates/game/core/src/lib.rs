//! Deterministic rules for the dungeon crawler.
//!
//! `game-core` owns the canonical model (creatures, conditions, dungeon runs,
//! the player and the world clock) and the rules that mutate it: the
//! condition engine, the combat resolver, the encounter state machine and
//! dungeon navigation. It performs no I/O. Static content, randomness and
//! balancing constants reach it through the oracles bundled in [`Env`], and
//! every run-level mutation flows through [`DungeonRun`].
pub mod combat;
pub mod conditions;
pub mod config;
pub mod dungeon;
pub mod encounter;
pub mod env;
pub mod error;
pub mod state;

mod clock;

#[cfg(test)]
mod testing;

pub use clock::{ClockReport, LOW_SANITY};
pub use combat::{
    ActionOutcome, ActionRef, CombatAction, CombatError, Combatant, DamageType, ResolveContext,
    TargetOutcome, resolve_action,
};
pub use conditions::{TickPhase, TickReport, apply_condition, remove_condition, tick};
pub use config::GameConfig;
pub use dungeon::{DungeonError, DungeonRun, RoomEvent, flee_chance};
pub use encounter::{Rewards, TurnReport};
pub use env::{
    ContentKind, ContentOracle, Dice, Env, GameEnv, OracleError, PcgRng, RngOracle, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Condition, Creature, CurrentDungeon, DungeonInstance, DungeonLevel, EncounterPhase, Enemy,
    Game, Minion, PlayerCharacter, Stat, Tile,
};
