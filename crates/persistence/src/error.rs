//! Decode failures.
//!
//! Every variant describes a structurally invalid save: the payload cannot be
//! trusted and the caller should fall back to a backup or a new game. Unknown
//! field numbers are not errors; they are skipped.

use thiserror::Error;

use crate::wire::WireType;

/// A malformed save payload.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of data in {message}")]
    Truncated { message: &'static str },

    #[error("varint longer than 10 bytes in {message}")]
    VarintOverflow { message: &'static str },

    #[error("invalid wire type {wire} in {message}")]
    InvalidWireType { message: &'static str, wire: u8 },

    #[error("field number {field} out of range in {message}")]
    InvalidFieldNumber { message: &'static str, field: u64 },

    #[error("deprecated group wire type on {message}.{field}")]
    Group { message: &'static str, field: u32 },

    #[error("{message}.{field} expects {expected:?}, found {actual:?}")]
    WrongWireType {
        message: &'static str,
        field: u32,
        expected: WireType,
        actual: WireType,
    },

    #[error("{message}.{field} is not valid UTF-8")]
    InvalidUtf8 { message: &'static str, field: u32 },

    #[error("{message}.{field}: invalid value '{value}'")]
    InvalidValue {
        message: &'static str,
        field: u32,
        value: String,
    },

    #[error("{message} parallel arrays disagree: {lengths:?}")]
    ParallelArrays {
        message: &'static str,
        lengths: Vec<usize>,
    },

    #[error("not a save file")]
    BadMagic,

    #[error("unsupported save format version {0}")]
    UnsupportedVersion(u16),

    #[error("checksum mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}
