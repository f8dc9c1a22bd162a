#![forbid(unsafe_code)]

//! Animation primitives and the frame-clock driven sequencer.
//!
//! Everything here is advanced cooperatively: the host calls
//! [`AnimationSequencer::tick`] once per frame with the current instant and
//! redraws if it returns `true`. No threads, no timers.
//!
//! # Building blocks
//!
//! - [`Animation`]: a value in time advanced by `tick(dt)`.
//! - [`EasingFn`] and the curves the widget uses: [`linear`],
//!   [`fast_out_slow_in`] and [`linear_out_slow_in`], all built on
//!   [`cubic_bezier`].
//! - [`Tween`]: eased interpolation between two values over a duration.
//! - [`Sequence`]: two animations back to back, forwarding overshoot.
//!
//! # Invariants
//!
//! 1. `value()` of a [`Tween`] is `from` before the first tick and exactly
//!    `to` once complete.
//! 2. `overshoot()` is zero until an animation completes; afterwards it is
//!    the part of the last `dt` that was not consumed.
//! 3. Easing curves map `0.0 -> 0.0` and `1.0 -> 1.0`; inputs are clamped.

mod autoplay;
mod sequencer;

pub use autoplay::{AutoplayFrame, autoplay_frame};
pub use sequencer::{AnimationSequencer, AnimationTimings};

use std::time::Duration;

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-driven value.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current value.
    fn value(&self) -> f32;

    /// Time past completion consumed by the last tick.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// An easing curve over normalized time.
pub type EasingFn = fn(f32) -> f32;

/// Identity curve.
#[inline]
#[must_use]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Standard material curve, `cubic-bezier(0.4, 0, 0.2, 1)`.
#[must_use]
pub fn fast_out_slow_in(t: f32) -> f32 {
    cubic_bezier(0.4, 0.0, 0.2, 1.0, t)
}

/// Deceleration curve, `cubic-bezier(0, 0, 0.2, 1)`.
#[must_use]
pub fn linear_out_slow_in(t: f32) -> f32 {
    cubic_bezier(0.0, 0.0, 0.2, 1.0, t)
}

/// Evaluate a CSS-style cubic Bézier timing curve with control points
/// `(x1, y1)` and `(x2, y2)` at time `t`.
///
/// Solves `x(s) = t` by Newton iteration with a bisection fallback, then
/// returns `y(s)`.
#[must_use]
pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 || t == 1.0 {
        return t;
    }

    let bezier = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    let slope = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
    };

    let mut s = t;
    for _ in 0..8 {
        let err = bezier(x1, x2, s) - t;
        if err.abs() < 1e-6 {
            return bezier(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = t;
    for _ in 0..32 {
        let x = bezier(x1, x2, s);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    bezier(y1, y2, s)
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Eased interpolation from `from` to `to` over `duration`.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
    overshoot: Duration,
}

impl Tween {
    /// Linear tween. A zero duration is clamped to 1ns.
    #[must_use]
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration: duration.max(Duration::from_nanos(1)),
            elapsed: Duration::ZERO,
            easing: linear,
            overshoot: Duration::ZERO,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        let total = self.elapsed + dt;
        if total >= self.duration {
            self.overshoot = total - self.duration;
            self.elapsed = self.duration;
        } else {
            self.elapsed = total;
        }
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        if self.is_complete() {
            return self.to;
        }
        let progress = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let eased = (self.easing)(progress);
        self.from + (self.to - self.from) * eased
    }

    fn overshoot(&self) -> Duration {
        self.overshoot
    }
}

// ---------------------------------------------------------------------------
// Sequence
// ---------------------------------------------------------------------------

/// `first` then `second`. Time left over when `first` completes is handed
/// to `second` in the same tick.
#[derive(Debug, Clone)]
pub struct Sequence<A, B> {
    first: A,
    second: B,
}

/// Chain two animations.
#[must_use]
pub fn sequence<A: Animation, B: Animation>(first: A, second: B) -> Sequence<A, B> {
    Sequence { first, second }
}

impl<A: Animation, B: Animation> Animation for Sequence<A, B> {
    fn tick(&mut self, dt: Duration) {
        if !self.first.is_complete() {
            self.first.tick(dt);
            if self.first.is_complete() {
                let rest = self.first.overshoot();
                if !rest.is_zero() {
                    self.second.tick(rest);
                }
            }
        } else {
            self.second.tick(dt);
        }
    }

    fn is_complete(&self) -> bool {
        self.first.is_complete() && self.second.is_complete()
    }

    fn value(&self) -> f32 {
        if self.first.is_complete() {
            self.second.value()
        } else {
            self.first.value()
        }
    }

    fn overshoot(&self) -> Duration {
        self.second.overshoot()
    }
}
