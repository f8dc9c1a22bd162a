#![forbid(unsafe_code)]

//! Gesture tracking: pointer events into pattern mutations.
//!
//! [`GestureTracker`] consumes [`PointerEvent`]s, hit-tests them against the
//! [`GridLayout`], appends cells to the [`PatternModel`], starts activation
//! animations on the [`AnimationSequencer`], notifies a [`PatternListener`]
//! and reports which part of the surface must be redrawn.
//!
//! # State Machine
//!
//! - `Down` clears the previous pattern, snaps running pulses back to base
//!   size (full redraw) and hit-tests. A hit
//!   starts tracking. A miss while a gesture was still in progress notifies
//!   `on_pattern_cleared`.
//! - `Move` hit-tests every batched sample, oldest first. The first cell of a
//!   gesture starts tracking even when the `Down` missed.
//! - `Up` ending a press with a non-empty pattern stops tracking, cancels
//!   line growth and notifies `on_pattern_detected`.
//! - `Cancel` while tracking clears the pattern, stops pulses and notifies
//!   `on_pattern_cleared`.
//!
//! # Invariants
//!
//! 1. `on_pattern_start` fires exactly once per gesture, immediately before
//!    the first `on_pattern_cell_added`.
//! 2. A cell is appended at most once per gesture; repeated hits are no-ops.
//! 3. Moves are only processed between a `Down` and the following
//!    `Up`/`Cancel`.
//! 4. Every notification fires synchronously inside [`GestureTracker::process`].
//!
//! # Failure Modes
//!
//! None. Out-of-range positions and repeated hits are ignored; the tracker
//! never returns an error.

use web_time::Instant;

use crate::animation::AnimationSequencer;
use crate::event::PointerEvent;
use crate::geometry::{Position, Rect, RectF};
use crate::layout::GridLayout;
use crate::model::PatternModel;
use crate::point::Point;

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Observer of pattern lifecycle events.
///
/// Every method has an empty default so implementors only override what they
/// need.
pub trait PatternListener {
    /// A new gesture hit its first cell.
    fn on_pattern_start(&mut self) {}

    /// A cell was appended; `pattern` is the pattern so far.
    fn on_pattern_cell_added(&mut self, _pattern: &[Point]) {}

    /// The gesture finished with a non-empty pattern.
    fn on_pattern_detected(&mut self, _pattern: &[Point]) {}

    /// The gesture was abandoned.
    fn on_pattern_cleared(&mut self) {}
}

impl PatternListener for () {}

impl<L: PatternListener + ?Sized> PatternListener for &mut L {
    fn on_pattern_start(&mut self) {
        (**self).on_pattern_start();
    }

    fn on_pattern_cell_added(&mut self, pattern: &[Point]) {
        (**self).on_pattern_cell_added(pattern);
    }

    fn on_pattern_detected(&mut self, pattern: &[Point]) {
        (**self).on_pattern_detected(pattern);
    }

    fn on_pattern_cleared(&mut self) {
        (**self).on_pattern_cleared();
    }
}

/// Which part of the surface needs repainting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Everything.
    Full,
    /// Only this rectangle.
    Rect(Rect),
}

impl Redraw {
    /// Merge two requests; `Full` absorbs everything.
    #[must_use]
    pub fn merge(self, other: Redraw) -> Redraw {
        match (self, other) {
            (Redraw::Rect(a), Redraw::Rect(b)) => Redraw::Rect(a.union(&b)),
            _ => Redraw::Full,
        }
    }
}

/// Tracker behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureOptions {
    /// Skip activation animations (the path is hidden anyway).
    pub stealth: bool,
    /// Request a haptic pulse for each added cell.
    pub haptic_feedback: bool,
}

/// The state the tracker mutates while processing one event.
#[derive(Debug)]
pub struct TrackerScene<'a> {
    pub model: &'a mut PatternModel,
    pub layout: &'a GridLayout,
    pub sequencer: &'a mut AnimationSequencer,
}

/// What processing one event produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackerOutput {
    /// Redraw request, if any.
    pub redraw: Option<Redraw>,
    /// Haptic pulses to forward to the host.
    pub haptic_pulses: u32,
}

impl TrackerOutput {
    fn request(&mut self, redraw: Redraw) {
        self.redraw = Some(match self.redraw {
            Some(existing) => existing.merge(redraw),
            None => redraw,
        });
    }
}

// ---------------------------------------------------------------------------
// GestureTracker
// ---------------------------------------------------------------------------

/// Pointer-event state machine.
#[derive(Debug, Default)]
pub struct GestureTracker {
    options: GestureOptions,
    pressed: bool,
    tracking: bool,
    last_move_dirty: Rect,
}

impl GestureTracker {
    /// A tracker in the idle state.
    #[must_use]
    pub fn new(options: GestureOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Current options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> GestureOptions {
        self.options
    }

    /// Replace the options; takes effect on the next event.
    pub fn set_options(&mut self, options: GestureOptions) {
        self.options = options;
    }

    /// Whether a gesture is in progress.
    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Return to idle without notifying anyone.
    pub fn reset(&mut self) {
        self.pressed = false;
        self.tracking = false;
        self.last_move_dirty = Rect::default();
    }

    /// Process one pointer event.
    pub fn process<L: PatternListener + ?Sized>(
        &mut self,
        event: &PointerEvent,
        now: Instant,
        scene: &mut TrackerScene<'_>,
        listener: &mut L,
    ) -> TrackerOutput {
        let mut out = TrackerOutput::default();
        match event {
            PointerEvent::Down(position) => {
                self.on_down(*position, now, scene, listener, &mut out);
            }
            PointerEvent::Move { position, .. } => {
                if self.pressed {
                    self.on_move(event, *position, now, scene, listener, &mut out);
                }
            }
            PointerEvent::Up(_) => self.on_up(scene, listener, &mut out),
            PointerEvent::Cancel => self.on_cancel(scene, listener, &mut out),
        }
        out
    }

    fn on_down<L: PatternListener + ?Sized>(
        &mut self,
        position: Position,
        now: Instant,
        scene: &mut TrackerScene<'_>,
        listener: &mut L,
        out: &mut TrackerOutput,
    ) {
        scene.model.clear_pattern();
        scene.sequencer.cancel_pulses(scene.model);
        out.request(Redraw::Full);
        self.pressed = true;
        self.last_move_dirty = Rect::default();
        scene.model.set_in_progress(position);

        let was_tracking = self.tracking;
        self.tracking = false;
        if self.detect_and_add(position, now, scene, listener, out).is_none() && was_tracking {
            tracing::debug!("down missed every cell; previous gesture cleared");
            listener.on_pattern_cleared();
        }
    }

    fn on_move<L: PatternListener + ?Sized>(
        &mut self,
        event: &PointerEvent,
        position: Position,
        now: Instant,
        scene: &mut TrackerScene<'_>,
        listener: &mut L,
        out: &mut TrackerOutput,
    ) {
        let radius = scene.layout.metrics().path_width;
        let previous = scene.model.in_progress();
        let mut dirty = Rect::default();
        let mut moved = false;

        for sample in event.samples() {
            let hit = self.detect_and_add(sample, now, scene, listener, out);
            moved |= sample != previous;

            let Some(&last) = scene.model.pattern().last() else {
                continue;
            };
            if !self.tracking {
                continue;
            }
            let cells = scene.model.cells();
            let mut region =
                RectF::around_segment(scene.layout.center(cells[last]), sample, radius);
            if let Some(index) = hit {
                region = region.union(&scene.layout.cell_bounds(cells[index]));
            }
            dirty = dirty.union(&region.round());
        }
        scene.model.set_in_progress(position);

        if moved {
            let region = self.last_move_dirty.union(&dirty);
            self.last_move_dirty = dirty;
            if !region.is_empty() {
                out.request(Redraw::Rect(region));
            }
        }
    }

    fn on_up<L: PatternListener + ?Sized>(
        &mut self,
        scene: &mut TrackerScene<'_>,
        listener: &mut L,
        out: &mut TrackerOutput,
    ) {
        let was_pressed = std::mem::replace(&mut self.pressed, false);
        if !was_pressed || scene.model.pattern_len() == 0 {
            return;
        }
        self.tracking = false;
        let cancelled = scene.model.cancel_line_animations();
        let pattern = scene.model.pattern_points();
        tracing::debug!(cells = pattern.len(), cancelled, "pattern detected");
        listener.on_pattern_detected(&pattern);
        out.request(Redraw::Full);
    }

    fn on_cancel<L: PatternListener + ?Sized>(
        &mut self,
        scene: &mut TrackerScene<'_>,
        listener: &mut L,
        out: &mut TrackerOutput,
    ) {
        self.pressed = false;
        if !self.tracking {
            return;
        }
        self.tracking = false;
        scene.model.clear_pattern();
        let pulses = scene.sequencer.cancel_pulses(scene.model);
        tracing::debug!(pulses, "gesture cancelled");
        listener.on_pattern_cleared();
        out.request(Redraw::Full);
    }

    /// Hit-test `position`; on a new cell append it, start its animations
    /// and notify. Returns the appended cell's index.
    fn detect_and_add<L: PatternListener + ?Sized>(
        &mut self,
        position: Position,
        now: Instant,
        scene: &mut TrackerScene<'_>,
        listener: &mut L,
        out: &mut TrackerOutput,
    ) -> Option<usize> {
        let index = scene.layout.hit_test(&*scene.model, position)?;
        if !scene.model.append(index) {
            return None;
        }

        if self.options.haptic_feedback {
            out.haptic_pulses += 1;
        }
        if !self.options.stealth {
            let target = scene.layout.center(scene.model.cells()[index]);
            let from = scene.model.in_progress();
            scene
                .sequencer
                .start_cell_pulse(index, scene.layout.metrics(), now);
            scene
                .sequencer
                .start_line_growth(scene.model, index, from, target, now);
        }

        if !self.tracking && scene.model.pattern_len() == 1 {
            self.tracking = true;
            scene.model.force_correct();
            tracing::debug!(cell = index, "pattern started");
            listener.on_pattern_start();
        }
        listener.on_pattern_cell_added(&scene.model.pattern_points());
        Some(index)
    }
}
