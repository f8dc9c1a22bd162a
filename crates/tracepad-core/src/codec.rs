#![forbid(unsafe_code)]

//! Pattern serialization.
//!
//! A pattern is encoded as two characters per cell, column then row, each a
//! single base-36 digit (`0-9a-z`) naming the cell's position on a grid with
//! `divisions` steps per axis. A 20-division grid therefore has 21 valid
//! positions per axis, `0` through `k`.
//!
//! # Invariants
//!
//! 1. `decode(encode(p)) == p` for every pattern of grid-aligned points.
//! 2. Encoding snaps off-grid points to the nearest grid position.
//! 3. Decoding rejects odd lengths, non-digits, positions beyond the grid and
//!    repeated cells; it never returns a pattern with duplicates.

use ahash::AHashSet;

use crate::error::ParseError;
use crate::point::Point;

const RADIX: u32 = 36;

/// Default number of grid steps per axis.
pub const DEFAULT_DIVISIONS: u32 = 20;

/// Finest grid a token can address: one base-36 digit per axis.
pub const MAX_DIVISIONS: u32 = RADIX - 1;

/// Encoder/decoder for compact pattern tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternCodec {
    divisions: u32,
}

impl PatternCodec {
    /// Create a codec for a grid with `divisions` steps per axis.
    ///
    /// Clamped to `1..=MAX_DIVISIONS` so every position fits in a single
    /// base-36 digit.
    #[must_use]
    pub fn new(divisions: u32) -> Self {
        Self {
            divisions: divisions.clamp(1, MAX_DIVISIONS),
        }
    }

    /// Grid steps per axis.
    #[inline]
    #[must_use]
    pub const fn divisions(&self) -> u32 {
        self.divisions
    }

    /// Serialize a pattern to its text token.
    #[must_use]
    pub fn encode(&self, pattern: &[Point]) -> String {
        let mut out = String::with_capacity(pattern.len() * 2);
        for point in pattern {
            let (col, row) = point.grid_position(self.divisions);
            out.push(digit(col.min(self.divisions)));
            out.push(digit(row.min(self.divisions)));
        }
        out
    }

    /// Parse a text token back into a pattern.
    pub fn decode(&self, token: &str) -> Result<Vec<Point>, ParseError> {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() % 2 != 0 {
            return Err(ParseError::OddLength { len: chars.len() });
        }

        let mut seen = AHashSet::with_capacity(chars.len() / 2);
        let mut pattern = Vec::with_capacity(chars.len() / 2);
        for (pair_index, pair) in chars.chunks_exact(2).enumerate() {
            let offset = pair_index * 2;
            let col = self.position(pair[0], offset)?;
            let row = self.position(pair[1], offset + 1)?;
            if !seen.insert((col, row)) {
                return Err(ParseError::DuplicateCell { offset, col, row });
            }
            pattern.push(Point::from_grid(col, row, self.divisions));
        }
        Ok(pattern)
    }

    fn position(&self, ch: char, offset: usize) -> Result<u32, ParseError> {
        let value = ch
            .to_digit(RADIX)
            .ok_or(ParseError::InvalidDigit { offset, ch })?;
        // Uppercase is accepted by to_digit; the canonical form is lowercase.
        if ch.is_ascii_uppercase() {
            return Err(ParseError::InvalidDigit { offset, ch });
        }
        if value > self.divisions {
            return Err(ParseError::OutOfRange {
                offset,
                value,
                max: self.divisions,
            });
        }
        Ok(value)
    }
}

impl Default for PatternCodec {
    fn default() -> Self {
        Self::new(DEFAULT_DIVISIONS)
    }
}

fn digit(value: u32) -> char {
    char::from_digit(value, RADIX).unwrap_or('0')
}
