//! Oracle access errors.
//!
//! Errors related to oracle availability and content lookup.

use crate::error::{ErrorSeverity, GameError};

/// Kind of content a lookup was for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentKind {
    Attack,
    Spell,
    Condition,
    Creature,
    Minion,
    Dungeon,
    DungeonLevel,
}

impl ContentKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Spell => "spell",
            Self::Condition => "condition",
            Self::Creature => "creature",
            Self::Minion => "minion",
            Self::Dungeon => "dungeon",
            Self::DungeonLevel => "dungeon level",
        }
    }
}

/// Errors that occur when accessing Oracle data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// ContentOracle is not available in the environment.
    #[error("ContentOracle not available")]
    ContentNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,

    /// Named content entry does not exist.
    #[error("{} '{name}' not found", kind.as_str())]
    NotFound { kind: ContentKind, name: String },
}

impl OracleError {
    pub fn not_found(kind: ContentKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // Missing oracles are fatal - engine cannot proceed
            Self::ContentNotAvailable | Self::RngNotAvailable => ErrorSeverity::Fatal,
            // Not found errors are validation errors - invalid references
            Self::NotFound { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ContentNotAvailable => "ORACLE_CONTENT_NOT_AVAILABLE",
            Self::RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            Self::NotFound { .. } => "ORACLE_CONTENT_NOT_FOUND",
        }
    }
}
