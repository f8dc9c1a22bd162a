#![forbid(unsafe_code)]

//! Normalized grid coordinates.

use std::fmt;
use std::hash::{Hash, Hasher};

/// An immutable point on the normalized `[0, 1] x [0, 1]` grid.
///
/// Coordinates are clamped at construction; out-of-range input is silently
/// pulled onto the nearest edge and NaN becomes `0.0`. Equality and hashing
/// compare the clamped bit patterns, so two points built from inputs that
/// clamp to the same values are interchangeable as map keys.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawPoint", into = "RawPoint"))]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Create a point, clamping both coordinates into `[0, 1]`.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    /// Create the point at `(col, row)` on a grid with `divisions` steps per axis.
    ///
    /// `divisions == 0` is treated as 1.
    #[must_use]
    pub fn from_grid(col: u32, row: u32, divisions: u32) -> Self {
        let d = divisions.max(1) as f32;
        Self::new(col as f32 / d, row as f32 / d)
    }

    /// Horizontal coordinate in `[0, 1]`.
    #[inline]
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in `[0, 1]`.
    #[inline]
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Nearest `(col, row)` on a grid with `divisions` steps per axis.
    #[must_use]
    pub fn grid_position(&self, divisions: u32) -> (u32, u32) {
        let d = divisions.max(1) as f32;
        ((self.x * d).round() as u32, (self.y * d).round() as u32)
    }
}

/// Clamp into `[0, 1]`, mapping NaN to `0.0` and `-0.0` to `+0.0`.
fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        return 0.0;
    }
    // Adding +0.0 normalizes a negative zero so bitwise equality holds.
    v.clamp(0.0, 1.0) + 0.0
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point[x={:.2};y={:.2}]", self.x, self.y)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawPoint {
    x: f32,
    y: f32,
}

#[cfg(feature = "serde")]
impl From<RawPoint> for Point {
    fn from(raw: RawPoint) -> Self {
        Self::new(raw.x, raw.y)
    }
}

#[cfg(feature = "serde")]
impl From<Point> for RawPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    #[test]
    fn in_range_values_are_unchanged() {
        let p = Point::new(0.25, 0.75);
        assert_eq!(p.x(), 0.25);
        assert_eq!(p.y(), 0.75);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let p = Point::new(-3.0, 7.5);
        assert_eq!(p.x(), 0.0);
        assert_eq!(p.y(), 1.0);
    }

    #[test]
    fn nan_clamps_to_zero() {
        let p = Point::new(f32::NAN, 0.5);
        assert_eq!(p.x(), 0.0);
        assert_eq!(p, Point::new(0.0, 0.5));
    }

    #[test]
    fn negative_zero_equals_zero() {
        assert_eq!(Point::new(-0.0, 0.0), Point::new(0.0, 0.0));
    }

    #[test]
    fn equality_compares_both_axes() {
        // x of one point equals y of the other; they must still differ.
        let a = Point::new(0.2, 0.4);
        let b = Point::new(0.4, 0.4);
        assert_ne!(a, b);
        assert_eq!(a, Point::new(0.2, 0.4));
    }

    #[test]
    fn clamped_duplicates_collapse_in_sets() {
        let mut set = AHashSet::new();
        set.insert(Point::new(1.5, -1.0));
        set.insert(Point::new(1.0, 0.0));
        set.insert(Point::new(9.0, -0.0));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn grid_round_trip() {
        let p = Point::from_grid(7, 13, 20);
        assert_eq!(p.grid_position(20), (7, 13));
        assert_eq!(Point::from_grid(20, 0, 20), Point::new(1.0, 0.0));
    }

    #[test]
    fn display_format() {
        assert_eq!(Point::new(0.5, 0.25).to_string(), "Point[x=0.50;y=0.25]");
    }
}
