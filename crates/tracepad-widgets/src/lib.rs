#![forbid(unsafe_code)]

//! Pattern tracing widget for tracepad.
//!
//! [`PatternView`] owns the pattern model, the gesture tracker, the animation
//! sequencer and the renderer. The host feeds it pointer events and frame
//! ticks, and receives redraw and haptic requests through its [`Surface`].

pub mod config;
pub mod pattern_view;
pub mod saved_state;

pub use config::PatternViewConfig;
pub use pattern_view::PatternView;
pub use saved_state::SavedState;

use tracepad_core::gesture::Redraw;

/// The host side of a widget: where repaint and haptic requests go.
pub trait Surface {
    /// Repaint the whole widget or only a region of it.
    fn request_redraw(&mut self, redraw: Redraw);

    /// Play one short haptic pulse.
    fn haptic_pulse(&mut self) {}
}

impl Surface for () {
    fn request_redraw(&mut self, _redraw: Redraw) {}
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn request_redraw(&mut self, redraw: Redraw) {
        (**self).request_redraw(redraw);
    }

    fn haptic_pulse(&mut self) {
        (**self).haptic_pulse();
    }
}
