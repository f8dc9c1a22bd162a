#![forbid(unsafe_code)]

//! Widget configuration.
//!
//! [`PatternViewConfig`] gathers every recognized option in one record:
//! aspect rule, stealth and haptic switches, colors, dot metrics, grid
//! resolution and animation timings. Defaults match a stock lock-pattern
//! style grid: 12 px dots pulsing to 28 px, a 3 px path and a hit box four
//! dot sizes wide on a 20-division grid.
//!
//! # Example
//!
//! ```
//! use tracepad_core::layout::Aspect;
//! use tracepad_widgets::PatternViewConfig;
//!
//! let config = PatternViewConfig::default()
//!     .with_aspect(Aspect::LockWidth)
//!     .with_stealth(true)
//!     .with_divisions(4);
//! assert!(config.stealth);
//! assert_eq!(config.divisions, 4);
//! ```

use tracepad_core::animation::AnimationTimings;
use tracepad_core::codec::{DEFAULT_DIVISIONS, MAX_DIVISIONS};
use tracepad_core::geometry::Sides;
use tracepad_core::layout::{Aspect, DotMetrics, GridLayout};
use tracepad_render::color::ColorScheme;

/// All options recognized by [`PatternView`](crate::PatternView).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PatternViewConfig {
    /// How width and height are reconciled during measurement.
    pub aspect: Aspect,
    /// Hide the connecting path.
    pub stealth: bool,
    /// Request a haptic pulse for each added cell.
    pub haptic_feedback: bool,
    /// Per-mode colors.
    pub colors: ColorScheme,
    /// Dot sizes, path width and hit factor.
    pub metrics: DotMetrics,
    /// Grid steps per axis, shared by layout and codec. Values outside
    /// `1..=MAX_DIVISIONS` are clamped when a widget is built.
    pub divisions: u32,
    /// Surface padding.
    pub padding: Sides,
    /// Smallest width reported by measurement.
    pub min_width: u32,
    /// Smallest height reported by measurement.
    pub min_height: u32,
    /// Animation durations.
    pub timings: AnimationTimings,
}

impl Default for PatternViewConfig {
    fn default() -> Self {
        Self {
            aspect: Aspect::Square,
            stealth: false,
            haptic_feedback: true,
            colors: ColorScheme::default(),
            metrics: DotMetrics::default(),
            divisions: DEFAULT_DIVISIONS,
            padding: Sides::default(),
            min_width: 0,
            min_height: 0,
            timings: AnimationTimings::default(),
        }
    }
}

impl PatternViewConfig {
    /// Set the aspect rule (builder pattern).
    #[must_use]
    pub fn with_aspect(mut self, aspect: Aspect) -> Self {
        self.aspect = aspect;
        self
    }

    /// Set stealth mode (builder pattern).
    #[must_use]
    pub fn with_stealth(mut self, stealth: bool) -> Self {
        self.stealth = stealth;
        self
    }

    /// Enable or disable haptic feedback (builder pattern).
    #[must_use]
    pub fn with_haptic_feedback(mut self, enabled: bool) -> Self {
        self.haptic_feedback = enabled;
        self
    }

    /// Set the color scheme (builder pattern).
    #[must_use]
    pub fn with_colors(mut self, colors: ColorScheme) -> Self {
        self.colors = colors;
        self
    }

    /// Set base and activated dot diameters (builder pattern).
    #[must_use]
    pub fn with_dot_size(mut self, base: f32, activated: f32) -> Self {
        self.metrics.dot_size = base;
        self.metrics.dot_size_activated = activated;
        self
    }

    /// Set the connecting path stroke width (builder pattern).
    #[must_use]
    pub fn with_path_width(mut self, width: f32) -> Self {
        self.metrics.path_width = width;
        self
    }

    /// Set the hit box factor (builder pattern).
    #[must_use]
    pub fn with_hit_factor(mut self, factor: f32) -> Self {
        self.metrics.hit_factor = factor;
        self
    }

    /// Set grid divisions (builder pattern), clamped to
    /// `1..=MAX_DIVISIONS` so saved tokens stay lossless.
    #[must_use]
    pub fn with_divisions(mut self, divisions: u32) -> Self {
        self.divisions = divisions.clamp(1, MAX_DIVISIONS);
        self
    }

    /// `divisions` forced into the range the codec can address.
    #[inline]
    #[must_use]
    pub fn grid_divisions(&self) -> u32 {
        self.divisions.clamp(1, MAX_DIVISIONS)
    }

    /// Set padding (builder pattern).
    #[must_use]
    pub fn with_padding(mut self, padding: Sides) -> Self {
        self.padding = padding;
        self
    }

    /// Set the minimum measured size (builder pattern).
    #[must_use]
    pub fn with_min_size(mut self, width: u32, height: u32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    /// Set animation timings (builder pattern).
    #[must_use]
    pub fn with_timings(mut self, timings: AnimationTimings) -> Self {
        self.timings = timings;
        self
    }

    /// A zero-sized layout for this configuration.
    #[must_use]
    pub fn layout(&self) -> GridLayout {
        GridLayout::new(self.metrics)
            .with_padding(self.padding)
            .with_divisions(self.grid_divisions())
    }

    /// Parse a JSON configuration. Missing fields keep their defaults.
    #[cfg(feature = "state-persistence")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    #[cfg(feature = "state-persistence")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = PatternViewConfig::default();
        assert_eq!(c.aspect, Aspect::Square);
        assert!(!c.stealth);
        assert!(c.haptic_feedback);
        assert_eq!(c.metrics.dot_size, 12.0);
        assert_eq!(c.metrics.dot_size_activated, 28.0);
        assert_eq!(c.metrics.path_width, 3.0);
        assert_eq!(c.metrics.hit_factor, 4.0);
        assert_eq!(c.divisions, 20);
    }

    #[test]
    fn builders_chain() {
        let c = PatternViewConfig::default()
            .with_dot_size(8.0, 16.0)
            .with_path_width(2.0)
            .with_hit_factor(1.5)
            .with_divisions(0)
            .with_min_size(40, 50)
            .with_haptic_feedback(false);
        assert_eq!(c.metrics.dot_size, 8.0);
        assert_eq!(c.metrics.dot_size_activated, 16.0);
        assert_eq!(c.metrics.path_width, 2.0);
        assert_eq!(c.metrics.hit_factor, 1.5);
        assert_eq!(c.divisions, 1);
        assert_eq!((c.min_width, c.min_height), (40, 50));
        assert!(!c.haptic_feedback);
    }

    #[test]
    fn divisions_stay_within_token_range() {
        let c = PatternViewConfig::default().with_divisions(50);
        assert_eq!(c.divisions, MAX_DIVISIONS);

        let c = PatternViewConfig {
            divisions: 50,
            ..PatternViewConfig::default()
        };
        assert_eq!(c.grid_divisions(), 35);
        assert_eq!(c.layout().divisions(), 35);
    }

    #[test]
    fn layout_carries_grid_settings() {
        let c = PatternViewConfig::default()
            .with_divisions(4)
            .with_padding(Sides::all(2.0));
        let layout = c.layout();
        assert_eq!(layout.divisions(), 4);
        assert_eq!(layout.padding(), Sides::all(2.0));
        assert_eq!(layout.width(), 0.0);
    }

    #[cfg(feature = "state-persistence")]
    #[test]
    fn partial_json_keeps_defaults() {
        let c = PatternViewConfig::from_json(r#"{"stealth": true, "divisions": 3}"#).unwrap();
        assert!(c.stealth);
        assert_eq!(c.divisions, 3);
        assert_eq!(c.metrics, DotMetrics::default());
        assert!(c.haptic_feedback);
    }

    #[cfg(feature = "state-persistence")]
    #[test]
    fn json_round_trip() {
        let c = PatternViewConfig::default().with_aspect(Aspect::LockHeight);
        let json = c.to_json().unwrap();
        assert_eq!(PatternViewConfig::from_json(&json).unwrap(), c);
    }
}
