#![forbid(unsafe_code)]

//! Canonical pointer events.
//!
//! The host translates its platform touch/mouse stream into [`PointerEvent`]
//! values in surface-relative pixel coordinates. Only a single pointer is
//! modelled.
//!
//! # Design Notes
//!
//! - `Move` carries the historical sub-positions the platform batched since
//!   the previous event, oldest first, so fast strokes do not skip cells.
//! - `Cancel` carries no position; the host lost the pointer.

use smallvec::SmallVec;

use crate::geometry::Position;

/// Historical positions batched into a single move, oldest first.
pub type History = SmallVec<[Position; 4]>;

/// A normalized pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// The pointer touched down.
    Down(Position),
    /// The pointer moved.
    Move {
        /// Current position.
        position: Position,
        /// Intermediate positions since the last event, oldest first.
        history: History,
    },
    /// The pointer lifted.
    Up(Position),
    /// The gesture was taken away by the host.
    Cancel,
}

impl PointerEvent {
    /// Down at `(x, y)`.
    #[must_use]
    pub fn down(x: f32, y: f32) -> Self {
        Self::Down(Position::new(x, y))
    }

    /// Move to `(x, y)` with no batched history.
    #[must_use]
    pub fn move_to(x: f32, y: f32) -> Self {
        Self::Move {
            position: Position::new(x, y),
            history: History::new(),
        }
    }

    /// Move to `(x, y)` after passing through `history`, oldest first.
    #[must_use]
    pub fn move_through(history: impl IntoIterator<Item = (f32, f32)>, x: f32, y: f32) -> Self {
        Self::Move {
            position: Position::new(x, y),
            history: history
                .into_iter()
                .map(|(hx, hy)| Position::new(hx, hy))
                .collect(),
        }
    }

    /// Up at `(x, y)`.
    #[must_use]
    pub fn up(x: f32, y: f32) -> Self {
        Self::Up(Position::new(x, y))
    }

    /// The event's current position, if it has one.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Down(p) | Self::Up(p) => Some(*p),
            Self::Move { position, .. } => Some(*position),
            Self::Cancel => None,
        }
    }

    /// Every position carried by the event: history first, then current.
    pub fn samples(&self) -> impl Iterator<Item = Position> + '_ {
        let history: &[Position] = match self {
            Self::Move { history, .. } => history.as_slice(),
            _ => &[],
        };
        history.iter().copied().chain(self.position())
    }
}
