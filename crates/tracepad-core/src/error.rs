#![forbid(unsafe_code)]

//! Error types.
//!
//! Two failure classes exist:
//!
//! 1. [`ParseError`]: a serialized pattern token could not be decoded. This is
//!    a data problem; callers usually fall back to an empty pattern.
//! 2. [`TracepadError::InvalidState`]: a caller broke a precondition (Animate
//!    on an empty pattern, an unmapped display mode). These are programming
//!    errors and are not expected at runtime.
//!
//! Pointer handling never produces either; stray or repeated hits are no-ops.

use thiserror::Error;

/// Failure decoding a serialized pattern token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Each cell takes two characters; the token length was odd.
    #[error("pattern token has odd length {len}")]
    OddLength { len: usize },
    /// A character is not a digit in the codec's radix.
    #[error("invalid digit {ch:?} at offset {offset}")]
    InvalidDigit { offset: usize, ch: char },
    /// A digit decoded to a coordinate beyond the grid resolution.
    #[error("coordinate {value} at offset {offset} exceeds grid resolution {max}")]
    OutOfRange { offset: usize, value: u32, max: u32 },
    /// The same cell appears twice.
    #[error("duplicate cell ({col}, {row}) at offset {offset}")]
    DuplicateCell { offset: usize, col: u32, row: u32 },
}

/// Top-level error for tracepad APIs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TracepadError {
    /// A precondition was violated by the caller.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// A serialized pattern could not be decoded.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl TracepadError {
    pub(crate) fn invalid_state(detail: impl Into<String>) -> Self {
        Self::InvalidState(detail.into())
    }
}

/// Standard result type for tracepad APIs.
pub type Result<T> = std::result::Result<T, TracepadError>;
