#![forbid(unsafe_code)]

//! Display mode state machine.
//!
//! [`DisplayModeMachine`] tracks the four-state [`DisplayMode`] that drives
//! both coloring and autoplay.
//!
//! # Invariants
//!
//! 1. Transitions are caller-driven; the only internal transition is the
//!    forced reset to `Correct` when a gesture starts or the pattern is cleared.
//! 2. Entering `Animate` requires a non-empty pattern and records the
//!    autoplay baseline; any other mode clears it.
//! 3. Re-entering `Animate` while animating restarts the cycle from `now`.
//!
//! # Failure Modes
//!
//! - `Animate` on an empty pattern is a caller bug and returns
//!   [`TracepadError::InvalidState`]; the current mode is left unchanged.
//! - An unknown persisted ordinal returns `InvalidState` from
//!   [`DisplayMode::from_ordinal`].

use web_time::Instant;

use crate::error::{Result, TracepadError};

/// How the pattern is currently presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayMode {
    /// Nothing meaningful to show.
    Empty,
    /// The pattern is (being) drawn normally.
    #[default]
    Correct,
    /// The pattern plays itself back in a loop.
    Animate,
    /// The pattern was rejected.
    Wrong,
}

impl DisplayMode {
    /// Stable integer used in persisted state.
    #[must_use]
    pub const fn ordinal(self) -> i32 {
        match self {
            Self::Empty => 0,
            Self::Correct => 1,
            Self::Animate => 2,
            Self::Wrong => 3,
        }
    }

    /// Inverse of [`ordinal`](Self::ordinal).
    pub fn from_ordinal(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Self::Empty),
            1 => Ok(Self::Correct),
            2 => Ok(Self::Animate),
            3 => Ok(Self::Wrong),
            other => Err(TracepadError::invalid_state(format!(
                "unknown display mode ordinal {other}"
            ))),
        }
    }
}

/// Outcome of a successful mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: DisplayMode,
    pub to: DisplayMode,
    /// The autoplay clock was (re)started.
    pub autoplay_started: bool,
}

/// The display mode plus the autoplay clock baseline.
#[derive(Debug, Clone, Default)]
pub struct DisplayModeMachine {
    mode: DisplayMode,
    autoplay_baseline: Option<Instant>,
}

impl DisplayModeMachine {
    /// Start in `Correct`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Whether autoplay is running.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.mode == DisplayMode::Animate
    }

    /// When the current autoplay cycle was started, if animating.
    #[inline]
    #[must_use]
    pub fn autoplay_baseline(&self) -> Option<Instant> {
        self.autoplay_baseline
    }

    /// Move to `to`. `pattern_len` is the length of the loaded pattern.
    pub fn transition(
        &mut self,
        to: DisplayMode,
        pattern_len: usize,
        now: Instant,
    ) -> Result<ModeTransition> {
        if to == DisplayMode::Animate && pattern_len == 0 {
            return Err(TracepadError::invalid_state(
                "a non-empty pattern is required to enter Animate mode",
            ));
        }
        let from = self.mode;
        self.mode = to;
        let autoplay_started = to == DisplayMode::Animate;
        self.autoplay_baseline = autoplay_started.then_some(now);
        tracing::debug!(?from, ?to, autoplay_started, "display mode transition");
        Ok(ModeTransition {
            from,
            to,
            autoplay_started,
        })
    }

    /// Forced reset to `Correct`; stops autoplay.
    pub fn force_correct(&mut self) {
        self.mode = DisplayMode::Correct;
        self.autoplay_baseline = None;
    }
}
