#![forbid(unsafe_code)]

//! Autoplay scrubbing for `Animate` mode.
//!
//! A cycle lasts `(n + 1) * step` for a pattern of `n` cells. At `elapsed`
//! into the cycle, `floor(elapsed / step)` leading cells are lit. While
//! strictly between the first and last activation the in-progress pointer
//! slides linearly from the last lit cell towards the next one; the extra
//! step at the end holds the complete pattern before the loop wraps.

use std::time::Duration;

use crate::geometry::Position;
use crate::layout::GridLayout;
use crate::model::PatternModel;

/// One autoplay sample: what to light and where the pointer is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoplayFrame {
    /// Number of leading pattern cells lit.
    pub activated: usize,
    /// Interpolated pointer position.
    pub in_progress: Position,
}

impl AutoplayFrame {
    /// Write the frame into the model.
    pub fn apply(&self, model: &mut PatternModel) {
        model.draw_leading(self.activated);
        model.set_in_progress(self.in_progress);
    }
}

/// Sample the autoplay loop at `elapsed` since the cycle baseline.
///
/// Returns `None` for an empty pattern.
#[must_use]
pub fn autoplay_frame(
    model: &PatternModel,
    layout: &GridLayout,
    elapsed: Duration,
    step: Duration,
) -> Option<AutoplayFrame> {
    let pattern = model.pattern();
    let (&first, &last) = (pattern.first()?, pattern.last()?);
    let n = pattern.len();
    let step_ms = step.as_millis().max(1);
    let cycle_ms = step_ms * (n as u128 + 1);
    let spot = elapsed.as_millis() % cycle_ms;
    let activated = (spot / step_ms) as usize;

    let center = |i: usize| layout.center(model.cells()[i]);
    let in_progress = if activated == 0 {
        center(first)
    } else if activated >= n {
        center(last)
    } else {
        let t = (spot % step_ms) as f32 / step_ms as f32;
        center(pattern[activated - 1]).lerp(center(pattern[activated]), t)
    };

    Some(AutoplayFrame {
        activated,
        in_progress,
    })
}
