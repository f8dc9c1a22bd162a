#![forbid(unsafe_code)]

//! Core: points, pointer events, hit-testing, gesture tracking and animation.
//!
//! # Role in tracepad
//! `tracepad-core` is the input and state layer. It owns the normalized
//! [`Point`](point::Point) type, the pointer event stream, the pattern model
//! (loaded cells, traced pattern, drawn-set, display mode) and the two engines
//! that mutate it: the [`GestureTracker`](gesture::GestureTracker) and the
//! [`AnimationSequencer`](animation::AnimationSequencer).
//!
//! # Primary responsibilities
//! - **Point / PatternCodec**: value-based grid coordinates and their compact
//!   text token.
//! - **GridLayout**: normalized-to-surface mapping, hit boxes, measurement.
//! - **GestureTracker**: pointer events to pattern mutations, notifications
//!   and minimal redraw rectangles.
//! - **AnimationSequencer**: frame-clock driven cell pulses, line growth and
//!   autoplay.
//!
//! # How it fits in the system
//! `tracepad-render` reads the [`PatternModel`](model::PatternModel) to emit
//! draw primitives, and `tracepad-widgets` wires everything behind a single
//! widget with a listener and a host surface.

pub mod animation;
pub mod cancellation;
pub mod cell_state;
pub mod codec;
pub mod display_mode;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod logging;
pub mod model;
pub mod point;

pub use error::{ParseError, Result, TracepadError};
