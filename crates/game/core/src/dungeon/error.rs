//! Dungeon run errors.

use crate::combat::CombatError;
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::EncounterPhase;

/// Errors raised by dungeon and encounter entry points.
///
/// Like combat errors, every variant is raised before any state changes.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DungeonError {
    #[error("player is not in a dungeon")]
    NotInDungeon,

    #[error("player is already in a dungeon")]
    AlreadyInDungeon,

    #[error("no active encounter")]
    NoEncounter,

    #[error("an encounter is in progress")]
    EncounterActive,

    /// Entry point called in a phase that does not accept it.
    #[error("not allowed while {actual:?}")]
    UnexpectedPhase { actual: EncounterPhase },

    #[error("no action is waiting for targets")]
    NoPendingAction,

    #[error("no tile at ({x}, {y})")]
    TileNotFound { x: i32, y: i32 },

    #[error("tile ({x}, {y}) is not adjacent to the current position")]
    TileNotAdjacent { x: i32, y: i32 },

    #[error("boss needs {required} steps, have {step}")]
    BossNotReady { step: i32, required: i32 },

    #[error("boss of level {0} already defeated")]
    BossDefeated(String),

    #[error("dungeon instance '{0}' not found")]
    UnknownInstance(String),

    #[error("level {level} not found in '{instance}'")]
    UnknownLevel { instance: String, level: String },

    /// Floor not opened yet; the boss above it still stands.
    #[error("level {level} of '{instance}' is locked")]
    LevelLocked { instance: String, level: String },

    /// Level has no creatures to roll an encounter from.
    #[error("level {0} has no encounter table")]
    EmptyEncounterTable(String),

    #[error("no saved encounter")]
    NoSavedEncounter,

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for DungeonError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::BossNotReady { .. }
            | Self::EncounterActive
            | Self::NoSavedEncounter
            | Self::LevelLocked { .. } => ErrorSeverity::Recoverable,
            Self::NotInDungeon
            | Self::AlreadyInDungeon
            | Self::NoEncounter
            | Self::UnexpectedPhase { .. }
            | Self::NoPendingAction
            | Self::TileNotFound { .. }
            | Self::TileNotAdjacent { .. }
            | Self::BossDefeated(_)
            | Self::UnknownInstance(_)
            | Self::UnknownLevel { .. } => ErrorSeverity::Validation,
            Self::EmptyEncounterTable(_) => ErrorSeverity::Internal,
            Self::Combat(err) => err.severity(),
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotInDungeon => "DUNGEON_NOT_IN_DUNGEON",
            Self::AlreadyInDungeon => "DUNGEON_ALREADY_IN_DUNGEON",
            Self::NoEncounter => "DUNGEON_NO_ENCOUNTER",
            Self::EncounterActive => "DUNGEON_ENCOUNTER_ACTIVE",
            Self::UnexpectedPhase { .. } => "DUNGEON_UNEXPECTED_PHASE",
            Self::NoPendingAction => "DUNGEON_NO_PENDING_ACTION",
            Self::TileNotFound { .. } => "DUNGEON_TILE_NOT_FOUND",
            Self::TileNotAdjacent { .. } => "DUNGEON_TILE_NOT_ADJACENT",
            Self::BossNotReady { .. } => "DUNGEON_BOSS_NOT_READY",
            Self::BossDefeated(_) => "DUNGEON_BOSS_DEFEATED",
            Self::UnknownInstance(_) => "DUNGEON_UNKNOWN_INSTANCE",
            Self::UnknownLevel { .. } => "DUNGEON_UNKNOWN_LEVEL",
            Self::LevelLocked { .. } => "DUNGEON_LEVEL_LOCKED",
            Self::EmptyEncounterTable(_) => "DUNGEON_EMPTY_ENCOUNTER_TABLE",
            Self::NoSavedEncounter => "DUNGEON_NO_SAVED_ENCOUNTER",
            Self::Combat(err) => err.error_code(),
            Self::Oracle(err) => err.error_code(),
        }
    }
}
