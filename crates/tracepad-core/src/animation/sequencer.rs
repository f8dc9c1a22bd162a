#![forbid(unsafe_code)]

//! Frame-clock driven cell pulses, line growth and autoplay.
//!
//! # Invariants
//!
//! 1. Every line-growth entry holds the cancellation token handed out by
//!    [`CellState::begin_line_animation`]. A cancelled token means the entry
//!    is dropped on the next tick without touching the cell, so a gesture
//!    reset can never be overwritten by a stale interpolation.
//! 2. Entries whose cell index is no longer loaded are dropped.
//! 3. A completed or cancelled pulse leaves the cell at its base size; a
//!    completed line growth leaves `line_end` at the target center.
//!
//! [`CellState::begin_line_animation`]: crate::cell_state::CellState::begin_line_animation

use std::time::Duration;

use web_time::Instant;

use super::{Animation, Sequence, Tween, fast_out_slow_in, linear_out_slow_in, sequence};
use crate::cancellation::CancellationToken;
use crate::geometry::Position;
use crate::layout::{DotMetrics, GridLayout};
use crate::model::PatternModel;

use super::autoplay::autoplay_frame;

// ---------------------------------------------------------------------------
// Timings
// ---------------------------------------------------------------------------

/// Durations of the built-in animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationTimings {
    /// Pulse from base to activated size.
    pub pulse_grow: Duration,
    /// Pulse from activated back to base size.
    pub pulse_shrink: Duration,
    /// Growth of the connecting segment into a new cell.
    pub line_growth: Duration,
    /// Autoplay time per cell.
    pub autoplay_step: Duration,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            pulse_grow: Duration::from_millis(96),
            pulse_shrink: Duration::from_millis(192),
            line_growth: Duration::from_millis(100),
            autoplay_step: Duration::from_millis(700),
        }
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct CellPulse {
    index: usize,
    base: f32,
    last: Instant,
    animation: Sequence<Tween, Tween>,
}

#[derive(Debug)]
struct LineGrowth {
    index: usize,
    from: Position,
    to: Position,
    last: Instant,
    token: CancellationToken,
    animation: Tween,
}

/// Time since `last`, advancing `last` to `now`. A clock that goes
/// backwards yields zero.
fn step(last: &mut Instant, now: Instant) -> Duration {
    let dt = now.saturating_duration_since(*last);
    if now > *last {
        *last = now;
    }
    dt
}

// ---------------------------------------------------------------------------
// AnimationSequencer
// ---------------------------------------------------------------------------

/// Schedules and advances cell animations.
#[derive(Debug, Default)]
pub struct AnimationSequencer {
    timings: AnimationTimings,
    pulses: Vec<CellPulse>,
    lines: Vec<LineGrowth>,
}

impl AnimationSequencer {
    /// A sequencer with the given timings.
    #[must_use]
    pub fn new(timings: AnimationTimings) -> Self {
        Self {
            timings,
            pulses: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Configured timings.
    #[inline]
    #[must_use]
    pub fn timings(&self) -> &AnimationTimings {
        &self.timings
    }

    /// Number of running pulses and line growths.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.pulses.len() + self.lines.len()
    }

    /// Whether ticking would change anything.
    #[must_use]
    pub fn is_idle(&self, model: &PatternModel) -> bool {
        self.active_count() == 0 && !model.mode_machine().is_animating()
    }

    /// Drop every scheduled animation (after a reload).
    pub fn clear(&mut self) {
        self.pulses.clear();
        self.lines.clear();
    }

    /// Stop every running pulse and put its cell back at base size.
    ///
    /// Returns how many pulses were stopped.
    pub fn cancel_pulses(&mut self, model: &mut PatternModel) -> usize {
        let states = model.states_mut();
        for pulse in &self.pulses {
            if let Some(state) = states.get_mut(pulse.index) {
                state.size = pulse.base;
            }
        }
        let stopped = self.pulses.len();
        self.pulses.clear();
        stopped
    }

    /// Pulse cell `index` from base to activated size and back.
    ///
    /// Restarting a pulse on the same cell replaces the old one.
    pub fn start_cell_pulse(&mut self, index: usize, metrics: &DotMetrics, now: Instant) {
        self.pulses.retain(|p| p.index != index);
        let grow = Tween::new(
            metrics.dot_size,
            metrics.dot_size_activated,
            self.timings.pulse_grow,
        )
        .easing(linear_out_slow_in);
        let shrink = Tween::new(
            metrics.dot_size_activated,
            metrics.dot_size,
            self.timings.pulse_shrink,
        )
        .easing(fast_out_slow_in);
        self.pulses.push(CellPulse {
            index,
            base: metrics.dot_size,
            last: now,
            animation: sequence(grow, shrink),
        });
    }

    /// Grow the segment into cell `index` from `from` to `to`.
    ///
    /// Registers a fresh cancellation token on the cell's state.
    pub fn start_line_growth(
        &mut self,
        model: &mut PatternModel,
        index: usize,
        from: Position,
        to: Position,
        now: Instant,
    ) {
        let Some(state) = model.states_mut().get_mut(index) else {
            return;
        };
        let token = state.begin_line_animation(from);
        self.lines.retain(|l| l.index != index);
        self.lines.push(LineGrowth {
            index,
            from,
            to,
            last: now,
            token,
            animation: Tween::new(0.0, 1.0, self.timings.line_growth).easing(fast_out_slow_in),
        });
    }

    /// Advance everything to `now`. Returns `true` if a redraw is needed.
    pub fn tick(&mut self, now: Instant, model: &mut PatternModel, layout: &GridLayout) -> bool {
        let mut changed = false;
        let cell_count = model.states().len();

        self.pulses.retain_mut(|pulse| {
            let Some(state) = model.states_mut().get_mut(pulse.index) else {
                return false;
            };
            pulse.animation.tick(step(&mut pulse.last, now));
            changed = true;
            if pulse.animation.is_complete() {
                state.size = pulse.base;
                false
            } else {
                state.size = pulse.animation.value();
                true
            }
        });

        self.lines.retain_mut(|line| {
            if line.token.is_cancelled() || line.index >= cell_count {
                return false;
            }
            let state = &mut model.states_mut()[line.index];
            line.animation.tick(step(&mut line.last, now));
            changed = true;
            if line.animation.is_complete() {
                state.line_end = Some(line.to);
                state.finish_line_animation();
                false
            } else {
                state.line_end = Some(line.from.lerp(line.to, line.animation.value()));
                true
            }
        });

        if let Some(baseline) = model.mode_machine().autoplay_baseline() {
            let elapsed = now.saturating_duration_since(baseline);
            if let Some(frame) = autoplay_frame(model, layout, elapsed, self.timings.autoplay_step)
            {
                frame.apply(model);
                changed = true;
            }
        }

        if changed {
            tracing::trace!(
                pulses = self.pulses.len(),
                lines = self.lines.len(),
                "animation tick"
            );
        }
        changed
    }
}
