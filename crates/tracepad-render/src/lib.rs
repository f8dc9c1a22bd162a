#![forbid(unsafe_code)]

//! Render layer: colors, draw primitives and the pattern renderer.
//!
//! # Role in tracepad
//! `tracepad-render` turns a [`PatternModel`](tracepad_core::model::PatternModel)
//! into an ordered list of circles and segments. It owns no surface; the host
//! rasterizes the [`Frame`](frame::Frame) however it likes.
//!
//! # Primary responsibilities
//! - **PackedRgba / ColorScheme**: compact colors and the per-mode color rule.
//! - **Frame / Primitive**: the render target for one pass.
//! - **PatternRenderer**: cells, connecting path and trailing segment.

pub mod color;
pub mod frame;
pub mod renderer;

pub use color::{ColorScheme, PackedRgba};
pub use frame::{Frame, Primitive};
pub use renderer::{PatternRenderer, RenderOptions, trailing_alpha};
