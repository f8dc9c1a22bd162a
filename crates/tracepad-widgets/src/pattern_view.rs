#![forbid(unsafe_code)]

//! The pattern tracing widget.
//!
//! [`PatternView`] is the single entry point a host embeds. It owns the
//! [`PatternModel`], the [`GestureTracker`], the [`AnimationSequencer`] and
//! the [`PatternRenderer`], and talks back through a [`PatternListener`] and
//! a [`Surface`].
//!
//! # Host loop
//!
//! 1. `measure` then `on_size_changed` when the layout changes.
//! 2. `handle_event` for every pointer event.
//! 3. `tick` once per frame while [`is_animating`](PatternView::is_animating).
//! 4. `render` into a [`Frame`] whenever the surface asks for a repaint.
//!
//! # Invariants
//!
//! 1. A disabled widget ignores every pointer event and reports it as not
//!    handled.
//! 2. `save_state` records every loaded cell, so a restored widget has the
//!    same hittable grid. A traced pattern is recorded separately and
//!    replayed over those cells.
//! 3. `restore_state` always loads the cells in `Correct` mode before the
//!    saved mode is applied, so entering `Animate` sees the restored
//!    pattern.
//! 4. Stealth and haptic switches live in the tracker options; the config
//!    mirrors them for [`save_state`](PatternView::save_state).
//!
//! # Failure Modes
//!
//! - A malformed cell token restores an empty grid, logs a warning and
//!   returns the `ParseError`. A malformed trace token keeps the restored
//!   cells with an empty pattern.
//! - `Animate` on an empty pattern and unknown mode ordinals return
//!   `InvalidState` and leave the current mode unchanged.

use tracepad_core::animation::AnimationSequencer;
use tracepad_core::codec::PatternCodec;
use tracepad_core::display_mode::DisplayMode;
use tracepad_core::error::Result;
use tracepad_core::event::PointerEvent;
use tracepad_core::gesture::{
    GestureOptions, GestureTracker, PatternListener, Redraw, TrackerScene,
};
use tracepad_core::layout::{self, GridLayout, MeasureSpec};
use tracepad_core::model::PatternModel;
use tracepad_core::point::Point;
use tracepad_render::color::ColorScheme;
use tracepad_render::frame::Frame;
use tracepad_render::renderer::{PatternRenderer, RenderOptions};
use web_time::Instant;

use crate::Surface;
use crate::config::PatternViewConfig;
use crate::saved_state::SavedState;

/// A grid of dots the user traces a pattern across.
#[derive(Debug)]
pub struct PatternView<L = (), S = ()> {
    config: PatternViewConfig,
    model: PatternModel,
    layout: GridLayout,
    sequencer: AnimationSequencer,
    tracker: GestureTracker,
    renderer: PatternRenderer,
    codec: PatternCodec,
    input_enabled: bool,
    listener: L,
    surface: S,
}

impl<L: PatternListener, S: Surface> PatternView<L, S> {
    /// Build a widget with no cells loaded.
    ///
    /// `config.divisions` is clamped to what the codec can address, so the
    /// layout and saved tokens share one grid.
    #[must_use]
    pub fn new(mut config: PatternViewConfig, listener: L, surface: S) -> Self {
        config.divisions = config.grid_divisions();
        let tracker = GestureTracker::new(GestureOptions {
            stealth: config.stealth,
            haptic_feedback: config.haptic_feedback,
        });
        Self {
            model: PatternModel::new(),
            layout: config.layout(),
            sequencer: AnimationSequencer::new(config.timings),
            renderer: PatternRenderer::new(config.colors),
            codec: PatternCodec::new(config.divisions),
            tracker,
            input_enabled: true,
            listener,
            surface,
            config,
        }
    }

    // --- accessors ---

    /// Current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PatternViewConfig {
        &self.config
    }

    /// Cells, pattern, drawn-set and mode.
    #[inline]
    #[must_use]
    pub fn model(&self) -> &PatternModel {
        &self.model
    }

    /// Measured grid layout.
    #[inline]
    #[must_use]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    #[inline]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    #[inline]
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Current display mode.
    #[inline]
    #[must_use]
    pub fn display_mode(&self) -> DisplayMode {
        self.model.mode()
    }

    /// The traced pattern as points, in trace order.
    #[must_use]
    pub fn pattern(&self) -> Vec<Point> {
        self.model.pattern_points()
    }

    /// Whether a gesture is in progress.
    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracker.is_tracking()
    }

    // --- switches ---

    #[inline]
    #[must_use]
    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn enable_input(&mut self) {
        self.input_enabled = true;
    }

    pub fn disable_input(&mut self) {
        self.input_enabled = false;
    }

    /// Whether the connecting path is hidden.
    #[inline]
    #[must_use]
    pub fn is_stealth(&self) -> bool {
        self.tracker.options().stealth
    }

    pub fn set_stealth(&mut self, stealth: bool) {
        self.config.stealth = stealth;
        self.tracker.set_options(GestureOptions {
            stealth,
            ..self.tracker.options()
        });
    }

    #[inline]
    #[must_use]
    pub fn is_haptic_feedback_enabled(&self) -> bool {
        self.tracker.options().haptic_feedback
    }

    pub fn set_haptic_feedback(&mut self, enabled: bool) {
        self.config.haptic_feedback = enabled;
        self.tracker.set_options(GestureOptions {
            haptic_feedback: enabled,
            ..self.tracker.options()
        });
    }

    /// Replace the color scheme and repaint.
    pub fn set_colors(&mut self, colors: ColorScheme) {
        self.config.colors = colors;
        self.renderer.set_colors(colors);
        self.surface.request_redraw(Redraw::Full);
    }

    // --- pattern ---

    /// Load `points` as the cells and pattern, then enter `mode`.
    ///
    /// Duplicate points are dropped. Scheduled animations from the previous
    /// pattern are discarded and any gesture in progress is abandoned
    /// silently.
    pub fn set_pattern(
        &mut self,
        mode: DisplayMode,
        points: impl IntoIterator<Item = Point>,
        now: Instant,
    ) -> Result<()> {
        let count = self.model.load(points, self.config.metrics.dot_size);
        self.sequencer.clear();
        self.tracker.reset();
        tracing::debug!(cells = count, ?mode, "pattern loaded");
        self.set_display_mode(mode, now)
    }

    /// Enter `mode`. Entering `Animate` restarts autoplay from the first
    /// cell.
    pub fn set_display_mode(&mut self, mode: DisplayMode, now: Instant) -> Result<()> {
        let transition = self.model.set_display_mode(mode, now)?;
        if transition.autoplay_started {
            if let Some(&first) = self.model.pattern().first() {
                let center = self.layout.center(self.model.cells()[first]);
                self.model.set_in_progress(center);
            }
        }
        self.surface.request_redraw(Redraw::Full);
        Ok(())
    }

    /// Drop the traced pattern and return to `Correct`.
    pub fn clear_pattern(&mut self) {
        self.model.clear_pattern();
        self.sequencer.cancel_pulses(&mut self.model);
        self.tracker.reset();
        self.surface.request_redraw(Redraw::Full);
    }

    // --- layout ---

    /// Size this widget for the parent's constraints, honoring the aspect
    /// rule.
    #[must_use]
    pub fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> (u32, u32) {
        layout::measure(
            self.config.aspect,
            width,
            height,
            self.config.min_width,
            self.config.min_height,
        )
    }

    /// Record the final surface size.
    pub fn on_size_changed(&mut self, width: u32, height: u32) {
        self.layout.set_size(width as f32, height as f32);
        tracing::trace!(width, height, "surface resized");
    }

    // --- input and frames ---

    /// Feed one pointer event. Returns `false` when input is disabled.
    pub fn handle_event(&mut self, event: &PointerEvent, now: Instant) -> bool {
        if !self.input_enabled {
            return false;
        }
        let mut scene = TrackerScene {
            model: &mut self.model,
            layout: &self.layout,
            sequencer: &mut self.sequencer,
        };
        let output = self
            .tracker
            .process(event, now, &mut scene, &mut self.listener);
        for _ in 0..output.haptic_pulses {
            self.surface.haptic_pulse();
        }
        if let Some(redraw) = output.redraw {
            self.surface.request_redraw(redraw);
        }
        true
    }

    /// Whether `tick` still has work to do.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.sequencer.is_idle(&self.model)
    }

    /// Advance animations to `now`. Requests a full redraw and returns `true`
    /// when anything moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        let changed = self.sequencer.tick(now, &mut self.model, &self.layout);
        if changed {
            self.surface.request_redraw(Redraw::Full);
        }
        changed
    }

    /// Append this frame's draw primitives.
    pub fn render(&self, frame: &mut Frame) -> Result<()> {
        let options = RenderOptions {
            stealth: self.is_stealth(),
            tracking: self.tracker.is_tracking(),
        };
        self.renderer
            .render(&self.model, &self.layout, options, frame)
    }

    // --- persistence ---

    /// Snapshot the cells, traced pattern, mode and switches.
    #[must_use]
    pub fn save_state(&self) -> SavedState {
        let traced_pattern = (!self.model.is_load_order())
            .then(|| self.codec.encode(&self.model.pattern_points()));
        SavedState {
            serialized_pattern: self.codec.encode(self.model.cells()),
            traced_pattern,
            display_mode: self.model.mode().ordinal(),
            input_enabled: self.input_enabled,
            stealth_mode: self.is_stealth(),
            haptic_enabled: self.is_haptic_feedback_enabled(),
        }
    }

    /// Restore a snapshot taken by [`save_state`](Self::save_state).
    ///
    /// Switches are applied first, so they survive a malformed token.
    pub fn restore_state(&mut self, state: &SavedState, now: Instant) -> Result<()> {
        self.input_enabled = state.input_enabled;
        self.set_stealth(state.stealth_mode);
        self.set_haptic_feedback(state.haptic_enabled);

        let cells = match self.codec.decode(&state.serialized_pattern) {
            Ok(cells) => cells,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    token = %state.serialized_pattern,
                    "malformed saved pattern; restoring an empty pattern"
                );
                self.set_pattern(DisplayMode::Correct, Vec::new(), now)?;
                return Err(err.into());
            }
        };
        self.set_pattern(DisplayMode::Correct, cells, now)?;

        if let Some(token) = &state.traced_pattern {
            match self.codec.decode(token) {
                Ok(trace) => {
                    let traced = self.model.restore_trace(&trace);
                    tracing::debug!(traced, "saved trace restored");
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        token = %token,
                        "malformed saved trace; keeping the cells untraced"
                    );
                    self.clear_pattern();
                    return Err(err.into());
                }
            }
        }
        let mode = DisplayMode::from_ordinal(state.display_mode)?;
        self.set_display_mode(mode, now)
    }
}
