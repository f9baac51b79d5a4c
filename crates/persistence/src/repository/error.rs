//! Error types raised by save repositories.

use thiserror::Error;

use crate::error::DecodeError;

/// Errors surfaced by save repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed save data: {0}")]
    MalformedSaveData(#[from] DecodeError),

    #[error("invalid save slot name '{0}'")]
    InvalidSlot(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
