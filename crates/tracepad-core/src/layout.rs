#![forbid(unsafe_code)]

//! Grid layout: measurement, normalized-to-surface mapping and hit-testing.
//!
//! A normalized [`Point`] maps to the surface as
//! `center = padding + coord * measured_extent`. Each cell's hit box is a
//! square of half-extent `dot_size * hit_factor` around that center,
//! independent of the cell's animated size.
//!
//! # Hit-test order
//!
//! Cells are tested in load order and the first one whose hit box contains
//! the pointer and that is not yet drawn wins. Overlapping hit boxes are
//! therefore resolved in favor of the earlier-loaded cell.

use crate::codec::DEFAULT_DIVISIONS;
use crate::geometry::{Position, RectF, Sides};
use crate::model::PatternModel;
use crate::point::Point;

// ---------------------------------------------------------------------------
// Measurement
// ---------------------------------------------------------------------------

/// How width and height are reconciled when both are flexible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Aspect {
    /// Both sides become the smaller of the two.
    #[default]
    Square,
    /// Width is kept; height shrinks to at most the width.
    LockWidth,
    /// Height is kept; width shrinks to at most the height.
    LockHeight,
}

/// A parent's sizing constraint for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    /// No constraint: use the desired size.
    Unspecified,
    /// Upper bound hint.
    AtMost(u32),
    /// Exact size.
    Exactly(u32),
}

impl MeasureSpec {
    /// Resolve against the widget's desired size.
    ///
    /// `AtMost` yields `max(bound, desired)`, letting the widget fill the
    /// offered space.
    #[must_use]
    pub fn resolve(self, desired: u32) -> u32 {
        match self {
            Self::Unspecified => desired,
            Self::AtMost(bound) => bound.max(desired),
            Self::Exactly(size) => size,
        }
    }
}

/// Measure the widget: resolve both specs, then apply the aspect rule.
#[must_use]
pub fn measure(
    aspect: Aspect,
    width_spec: MeasureSpec,
    height_spec: MeasureSpec,
    min_width: u32,
    min_height: u32,
) -> (u32, u32) {
    let width = width_spec.resolve(min_width);
    let height = height_spec.resolve(min_height);
    let smaller = width.min(height);
    match aspect {
        Aspect::Square => (smaller, smaller),
        Aspect::LockWidth => (width, smaller),
        Aspect::LockHeight => (smaller, height),
    }
}

// ---------------------------------------------------------------------------
// Dot metrics
// ---------------------------------------------------------------------------

/// Pixel sizes of dots and the connecting path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DotMetrics {
    /// Base dot diameter.
    pub dot_size: f32,
    /// Diameter at the peak of the activation pulse.
    pub dot_size_activated: f32,
    /// Stroke width of connecting segments.
    pub path_width: f32,
    /// Hit box half-extent as a multiple of `dot_size`.
    pub hit_factor: f32,
}

impl Default for DotMetrics {
    fn default() -> Self {
        Self {
            dot_size: 12.0,
            dot_size_activated: 28.0,
            path_width: 3.0,
            hit_factor: 4.0,
        }
    }
}

// ---------------------------------------------------------------------------
// GridLayout
// ---------------------------------------------------------------------------

/// Maps normalized points onto the measured surface.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    metrics: DotMetrics,
    padding: Sides,
    width: f32,
    height: f32,
    divisions: u32,
}

impl GridLayout {
    /// A zero-sized layout with the given metrics.
    #[must_use]
    pub fn new(metrics: DotMetrics) -> Self {
        Self {
            metrics,
            padding: Sides::default(),
            width: 0.0,
            height: 0.0,
            divisions: DEFAULT_DIVISIONS,
        }
    }

    /// Set padding (builder pattern).
    #[must_use]
    pub fn with_padding(mut self, padding: Sides) -> Self {
        self.padding = padding;
        self
    }

    /// Set grid divisions (builder pattern). Zero is treated as 1.
    #[must_use]
    pub fn with_divisions(mut self, divisions: u32) -> Self {
        self.divisions = divisions.max(1);
        self
    }

    /// Set the measured size (builder pattern).
    #[must_use]
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.set_size(width, height);
        self
    }

    /// Update the measured surface size.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Dot and path metrics.
    #[inline]
    #[must_use]
    pub fn metrics(&self) -> &DotMetrics {
        &self.metrics
    }

    /// Padding.
    #[inline]
    #[must_use]
    pub fn padding(&self) -> Sides {
        self.padding
    }

    /// Measured width.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Measured height.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Grid divisions per axis.
    #[inline]
    #[must_use]
    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    /// Surface position of a normalized point.
    #[must_use]
    pub fn center(&self, point: Point) -> Position {
        Position::new(
            self.padding.left + point.x() * self.width,
            self.padding.top + point.y() * self.height,
        )
    }

    /// Width of one grid square: padded width over the division count.
    #[must_use]
    pub fn square_width(&self) -> f32 {
        (self.width - self.padding.horizontal_sum()).max(0.0) / self.divisions as f32
    }

    /// Height of one grid square: padded height over the division count.
    #[must_use]
    pub fn square_height(&self) -> f32 {
        (self.height - self.padding.vertical_sum()).max(0.0) / self.divisions as f32
    }

    /// The activation region of a cell.
    #[must_use]
    pub fn hit_box(&self, point: Point) -> RectF {
        let half = self.metrics.dot_size * self.metrics.hit_factor;
        RectF::centered(self.center(point), half, half)
    }

    /// The grid square around a cell, used for redraw regions.
    #[must_use]
    pub fn cell_bounds(&self, point: Point) -> RectF {
        RectF::centered(
            self.center(point),
            self.square_width() * 0.5,
            self.square_height() * 0.5,
        )
    }

    /// Find the first loaded, not-yet-drawn cell whose hit box contains
    /// `position`.
    #[must_use]
    pub fn hit_test(&self, model: &PatternModel, position: Position) -> Option<usize> {
        model
            .cells()
            .iter()
            .enumerate()
            .find(|&(index, &point)| {
                !model.is_drawn(index) && self.hit_box(point).contains(position)
            })
            .map(|(index, _)| index)
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(DotMetrics::default())
    }
}
