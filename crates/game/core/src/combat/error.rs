//! Combat resolution errors.
//!
//! Every variant is raised before the resolver touches any state.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ProficiencyRank, Stat};

/// Why an actor cannot take the requested action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Incapacity {
    /// May only pass.
    Stunned,
    /// May not cast spells.
    Silenced,
}

/// Errors that can occur while resolving a combat action.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    /// Cost exceeds the actor's current pool.
    #[error("insufficient {stat:?}: need {required}, have {available}")]
    InsufficientResource {
        stat: Stat,
        required: f64,
        available: f64,
    },

    /// Actor is stunned or silenced.
    #[error("actor is incapacitated ({0:?})")]
    ActorIncapacitated(Incapacity),

    /// Wrong number of targets, or a target already defeated.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// Actor does not know the requested attack or spell.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// Caster's rank in the spell's school is too low.
    #[error("requires {required} proficiency, have {actual}")]
    InsufficientProficiency {
        required: ProficiencyRank,
        actual: ProficiencyRank,
    },

    /// Action, buff, debuff or summon missing from the content tables.
    #[error(transparent)]
    Content(#[from] OracleError),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientResource { .. } | Self::ActorIncapacitated(_) => {
                ErrorSeverity::Recoverable
            }
            Self::InvalidTarget(_)
            | Self::UnknownAction(_)
            | Self::InsufficientProficiency { .. } => ErrorSeverity::Validation,
            Self::Content(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientResource { .. } => "COMBAT_INSUFFICIENT_RESOURCE",
            Self::ActorIncapacitated(_) => "COMBAT_ACTOR_INCAPACITATED",
            Self::InvalidTarget(_) => "COMBAT_INVALID_TARGET",
            Self::UnknownAction(_) => "COMBAT_UNKNOWN_ACTION",
            Self::InsufficientProficiency { .. } => "COMBAT_INSUFFICIENT_PROFICIENCY",
            Self::Content(err) => err.error_code(),
        }
    }
}
