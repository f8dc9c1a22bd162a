#![forbid(unsafe_code)]

//! Per-cell transient animation state.

use crate::cancellation::{CancellationSource, CancellationToken};
use crate::geometry::Position;

/// Animation state for one loaded cell.
///
/// Created when a pattern is loaded, not when the cell is activated. Written
/// by the tracker and the sequencer; the renderer only reads it.
///
/// `line_end` is the animated tip of the connecting segment growing towards
/// this cell; the segment itself always starts at the previous cell's center.
/// `None` is the "undefined" sentinel: the renderer then draws the full
/// static segment to the cell center.
#[derive(Debug)]
pub struct CellState {
    /// Render diameter in pixels.
    pub size: f32,
    /// Multiplier applied to `size` when drawing.
    pub scale: f32,
    /// Vertical draw offset in pixels.
    pub translate: f32,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
    /// Current animated end of the incoming segment.
    pub line_end: Option<Position>,
    line_animation: Option<CancellationSource>,
}

impl CellState {
    /// Fresh state at the given base diameter.
    #[must_use]
    pub fn new(size: f32) -> Self {
        Self {
            size,
            scale: 1.0,
            translate: 0.0,
            alpha: 1.0,
            line_end: None,
            line_animation: None,
        }
    }

    /// Diameter actually drawn: `size * scale`.
    #[inline]
    #[must_use]
    pub fn rendered_size(&self) -> f32 {
        self.size * self.scale
    }

    /// Whether a line-growth animation is in flight for this cell.
    #[inline]
    #[must_use]
    pub fn has_line_animation(&self) -> bool {
        self.line_animation.is_some()
    }

    /// Start a new line-growth animation with its tip at `start`, cancelling
    /// any previous one, and return the token the animation must honor.
    pub fn begin_line_animation(&mut self, start: Position) -> CancellationToken {
        if let Some(previous) = self.line_animation.take() {
            previous.cancel();
        }
        let source = CancellationSource::new();
        let token = source.token();
        self.line_animation = Some(source);
        self.line_end = Some(start);
        token
    }

    /// Mark the line-growth animation as finished, keeping its final endpoint.
    pub fn finish_line_animation(&mut self) {
        self.line_animation = None;
    }

    /// Cancel an in-flight line-growth animation and reset the endpoints to
    /// undefined. Returns `true` if an animation was cancelled.
    pub fn cancel_line_animation(&mut self) -> bool {
        let Some(source) = self.line_animation.take() else {
            return false;
        };
        source.cancel();
        self.line_end = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_defaults() {
        let s = CellState::new(12.0);
        assert_eq!(s.size, 12.0);
        assert_eq!(s.scale, 1.0);
        assert_eq!(s.translate, 0.0);
        assert_eq!(s.alpha, 1.0);
        assert!(s.line_end.is_none());
        assert!(!s.has_line_animation());
    }

    #[test]
    fn rendered_size_applies_scale() {
        let mut s = CellState::new(10.0);
        s.scale = 1.5;
        assert_eq!(s.rendered_size(), 15.0);
    }

    #[test]
    fn cancel_invalidates_token_and_resets_sentinel() {
        let mut s = CellState::new(10.0);
        let token = s.begin_line_animation(Position::new(1.0, 2.0));
        assert_eq!(s.line_end, Some(Position::new(1.0, 2.0)));

        assert!(s.cancel_line_animation());
        assert!(token.is_cancelled());
        assert!(s.line_end.is_none());
        assert!(!s.cancel_line_animation());
    }

    #[test]
    fn restarting_cancels_previous_token() {
        let mut s = CellState::new(10.0);
        let first = s.begin_line_animation(Position::new(0.0, 0.0));
        let second = s.begin_line_animation(Position::new(5.0, 5.0));
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }

    #[test]
    fn finished_animation_keeps_endpoint() {
        let mut s = CellState::new(10.0);
        let token = s.begin_line_animation(Position::new(0.0, 0.0));
        s.line_end = Some(Position::new(9.0, 9.0));
        s.finish_line_animation();
        assert!(!token.is_cancelled());
        assert!(!s.cancel_line_animation());
        assert_eq!(s.line_end, Some(Position::new(9.0, 9.0)));
    }
}
