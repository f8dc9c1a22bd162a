#![forbid(unsafe_code)]

//! Pattern renderer: model state to draw primitives.
//!
//! Paint order:
//!
//! 1. One circle per loaded cell, diameter `size * scale`, shifted down by
//!    `translate`, colored by the [`ColorScheme`] rule with the cell's alpha.
//! 2. Unless in stealth mode, one segment per consecutive pair of lit pattern
//!    cells, stopping at the first unlit one. A segment runs from the previous
//!    cell's center to the cell's animated `line_end`, or to its center when
//!    no growth is recorded.
//! 3. While tracking or autoplaying, a trailing segment from the last lit
//!    cell to the in-progress pointer, faded in by
//!    `clamp((distance / square_width - 0.3) * 4, 0, 1)`.
//!
//! # Failure Modes
//!
//! - A lit cell in `Empty` mode has no color and yields
//!   `TracepadError::InvalidState`. The frame may hold the primitives
//!   emitted before the failure.

use tracepad_core::display_mode::DisplayMode;
use tracepad_core::error::Result;
use tracepad_core::geometry::Position;
use tracepad_core::layout::GridLayout;
use tracepad_core::model::PatternModel;

use crate::color::ColorScheme;
use crate::frame::{Frame, Primitive};

/// Presentation flags that are not part of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Hide the connecting path.
    pub stealth: bool,
    /// A gesture is in progress.
    pub tracking: bool,
}

/// Trailing segment opacity for a pointer `distance` away from the last lit
/// cell on a grid of `square_width` pixels.
#[must_use]
pub fn trailing_alpha(distance: f32, square_width: f32) -> f32 {
    if square_width <= 0.0 {
        return 1.0;
    }
    ((distance / square_width - 0.3) * 4.0).clamp(0.0, 1.0)
}

/// Emits draw primitives for a [`PatternModel`].
#[derive(Debug, Clone, Default)]
pub struct PatternRenderer {
    colors: ColorScheme,
}

impl PatternRenderer {
    /// A renderer using `colors`.
    #[must_use]
    pub fn new(colors: ColorScheme) -> Self {
        Self { colors }
    }

    /// Color scheme in use.
    #[inline]
    #[must_use]
    pub fn colors(&self) -> &ColorScheme {
        &self.colors
    }

    /// Replace the color scheme.
    pub fn set_colors(&mut self, colors: ColorScheme) {
        self.colors = colors;
    }

    /// Append this pass's primitives to `frame`.
    pub fn render(
        &self,
        model: &PatternModel,
        layout: &GridLayout,
        options: RenderOptions,
        frame: &mut Frame,
    ) -> Result<()> {
        let mode = model.mode();
        self.draw_cells(model, layout, options, frame)?;
        if !options.stealth {
            self.draw_path(model, layout, options, frame)?;
        }
        tracing::trace!(primitives = frame.len(), ?mode, "pattern rendered");
        Ok(())
    }

    fn draw_cells(
        &self,
        model: &PatternModel,
        layout: &GridLayout,
        options: RenderOptions,
        frame: &mut Frame,
    ) -> Result<()> {
        let mode = model.mode();
        for (index, (&point, state)) in model.cells().iter().zip(model.states()).enumerate() {
            let lit = model.is_drawn(index);
            let color = self
                .colors
                .resolve(mode, lit, options.stealth, options.tracking)?;
            let center = layout.center(point);
            frame.push(Primitive::Circle {
                center: Position::new(center.x, center.y + state.translate),
                radius: state.rendered_size() / 2.0,
                color: color.with_opacity(state.alpha),
            });
        }
        Ok(())
    }

    fn draw_path(
        &self,
        model: &PatternModel,
        layout: &GridLayout,
        options: RenderOptions,
        frame: &mut Frame,
    ) -> Result<()> {
        let mode = model.mode();
        let width = layout.metrics().path_width;
        let cells = model.cells();
        let states = model.states();
        let lit: Vec<usize> = model
            .pattern()
            .iter()
            .copied()
            .take_while(|&index| model.is_drawn(index))
            .collect();
        let Some(&last) = lit.last() else {
            return Ok(());
        };
        let color = self
            .colors
            .path_color(mode, options.stealth, options.tracking)?;

        for pair in lit.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            let center = layout.center(cells[cur]);
            frame.push(Primitive::Segment {
                from: layout.center(cells[prev]),
                to: states[cur].line_end.unwrap_or(center),
                width,
                color,
            });
        }

        if options.tracking || mode == DisplayMode::Animate {
            let from = layout.center(cells[last]);
            let to = model.in_progress();
            let alpha = trailing_alpha(from.distance(to), layout.square_width());
            frame.push(Primitive::Segment {
                from,
                to,
                width,
                color: color.with_opacity(alpha),
            });
        }
        Ok(())
    }
}
