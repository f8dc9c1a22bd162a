#![forbid(unsafe_code)]

//! Packed colors and per-mode color schemes.
//!
//! # Color rule
//!
//! A cell that is not lit, stealth mode, or a gesture still in progress all
//! use the regular color. Otherwise `Wrong` uses the error color and
//! `Correct`/`Animate` use the success color. `Empty` has no mapping: asking
//! for a lit color in `Empty` is a configuration error.

use tracepad_core::display_mode::DisplayMode;
use tracepad_core::error::{Result, TracepadError};

/// A color packed as `0xRRGGBBAA`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    pub const TRANSPARENT: Self = Self(0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Opaque color from components.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Color from components including alpha.
    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self((r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | a as u32)
    }

    #[inline]
    #[must_use]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    #[must_use]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    #[must_use]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    #[must_use]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Same color with alpha replaced by `opacity` in `[0, 1]`.
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }
}

impl std::fmt::Debug for PackedRgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

/// Colors used for each presentation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorScheme {
    /// Unlit cells, stealth mode and gestures in progress.
    pub regular: PackedRgba,
    /// Lit cells in `Wrong` mode.
    pub error: PackedRgba,
    /// Lit cells in `Correct` and `Animate` mode.
    pub success: PackedRgba,
    /// Override for connecting segments; `None` uses the lit-cell color.
    pub path: Option<PackedRgba>,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            regular: PackedRgba::WHITE,
            error: PackedRgba::rgb(0xf4, 0x43, 0x36),
            success: PackedRgba::rgb(0x4c, 0xaf, 0x50),
            path: None,
        }
    }
}

impl ColorScheme {
    /// Resolve the color of a cell (or, with `lit = true`, of the path).
    pub fn resolve(
        &self,
        mode: DisplayMode,
        lit: bool,
        stealth: bool,
        tracking: bool,
    ) -> Result<PackedRgba> {
        if !lit || stealth || tracking {
            return Ok(self.regular);
        }
        match mode {
            DisplayMode::Wrong => Ok(self.error),
            DisplayMode::Correct | DisplayMode::Animate => Ok(self.success),
            DisplayMode::Empty => Err(TracepadError::InvalidState(format!(
                "no color mapped for display mode {mode:?}"
            ))),
        }
    }

    /// Color of connecting segments.
    pub fn path_color(&self, mode: DisplayMode, stealth: bool, tracking: bool) -> Result<PackedRgba> {
        match self.path {
            Some(color) => Ok(color),
            None => self.resolve(mode, true, stealth, tracking),
        }
    }
}
