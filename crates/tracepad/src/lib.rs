#![forbid(unsafe_code)]

//! Tracepad public facade crate.
//!
//! Re-exports the types a host needs to embed a pattern tracing grid, plus a
//! prelude for day-to-day usage.

// --- Core re-exports -------------------------------------------------------

pub use tracepad_core::animation::AnimationTimings;
pub use tracepad_core::codec::PatternCodec;
pub use tracepad_core::display_mode::DisplayMode;
pub use tracepad_core::error::{ParseError, Result, TracepadError};
pub use tracepad_core::event::PointerEvent;
pub use tracepad_core::geometry::{Position, Rect, Sides};
pub use tracepad_core::gesture::{PatternListener, Redraw};
pub use tracepad_core::layout::{Aspect, DotMetrics, MeasureSpec};
pub use tracepad_core::point::Point;

// --- Render re-exports -----------------------------------------------------

pub use tracepad_render::color::{ColorScheme, PackedRgba};
pub use tracepad_render::frame::{Frame, Primitive};

// --- Widget re-exports -----------------------------------------------------

pub use tracepad_widgets::{PatternView, PatternViewConfig, SavedState, Surface};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Aspect, ColorScheme, DisplayMode, Frame, MeasureSpec, PatternListener, PatternView,
        PatternViewConfig, Point, PointerEvent, Primitive, Redraw, Result, SavedState, Surface,
        TracepadError,
    };

    pub use crate::{core, render, widgets};
}

pub use tracepad_core as core;
pub use tracepad_render as render;
pub use tracepad_widgets as widgets;
