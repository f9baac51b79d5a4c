//! Common error infrastructure for game-core.
//!
//! This module provides the shared severity classification and the
//! [`GameError`] trait implemented by every engine error. Domain-specific
//! errors (e.g. `CombatError`, `DungeonError`) live next to the entry points
//! that raise them.
//!
//! # Design Principles
//!
//! - **Pre-mutation**: every error is raised before any state is touched
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Stable codes**: each variant maps to a static code for logs and tests

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: the same request may succeed later (e.g. after regaining mana)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: unrecoverable errors indicating corrupted game state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later or pick an alternative action.
    ///
    /// Examples: insufficient mana, actor stunned, boss not yet unlocked
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: defeated target, tile not adjacent
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: enemy present without an encounter phase
    Internal,

    /// Fatal error - game state corrupted, cannot continue.
    ///
    /// Examples: missing required oracle
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
