#![forbid(unsafe_code)]

//! Frame = ordered draw primitives for one render pass.
//!
//! The renderer never touches pixels. It appends [`Primitive`]s to a
//! [`Frame`] in paint order and the host rasterizes them on its own surface.
//!
//! # Usage
//!
//! ```
//! use tracepad_core::geometry::Position;
//! use tracepad_render::color::PackedRgba;
//! use tracepad_render::frame::{Frame, Primitive};
//!
//! let mut frame = Frame::new();
//! frame.push(Primitive::Circle {
//!     center: Position::new(10.0, 10.0),
//!     radius: 6.0,
//!     color: PackedRgba::WHITE,
//! });
//! assert_eq!(frame.circles().count(), 1);
//! ```

use tracepad_core::geometry::Position;

use crate::color::PackedRgba;

/// A single draw command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// A filled circle.
    Circle {
        center: Position,
        radius: f32,
        color: PackedRgba,
    },
    /// A stroked line segment with round caps.
    Segment {
        from: Position,
        to: Position,
        width: f32,
        color: PackedRgba,
    },
}

impl Primitive {
    /// Whether this is a [`Primitive::Segment`].
    #[inline]
    #[must_use]
    pub fn is_segment(&self) -> bool {
        matches!(self, Self::Segment { .. })
    }
}

/// Render target for one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    primitives: Vec<Primitive>,
}

impl Frame {
    /// An empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty frame with room for `capacity` primitives.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            primitives: Vec::with_capacity(capacity),
        }
    }

    /// Drop all primitives, keeping the allocation.
    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    /// Append a primitive.
    #[inline]
    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// All primitives in paint order.
    #[inline]
    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Number of primitives.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Whether the frame is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Circles in paint order.
    pub fn circles(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(|p| !p.is_segment())
    }

    /// Segments in paint order.
    pub fn segments(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(|p| p.is_segment())
    }
}
