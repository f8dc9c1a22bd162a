#![forbid(unsafe_code)]

//! Stop flags for line-growth animations.
//!
//! Each cell's [`CellState`](crate::cell_state::CellState) keeps the
//! [`CancellationSource`] of the segment growing into it, and the queued
//! entry in the sequencer keeps the matching [`CancellationToken`]. A gesture
//! reset flips the flag through the source; the sequencer drops any entry
//! whose token reads as cancelled before it writes another endpoint.
//!
//! ```
//! use tracepad_core::cancellation::CancellationSource;
//!
//! let growth = CancellationSource::new();
//! let queued = growth.token();
//! growth.cancel();
//! assert!(queued.is_cancelled());
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared stop flag. `true` once the owning animation was cut short.
#[derive(Default)]
struct StopFlag(AtomicBool);

impl StopFlag {
    fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Held by the animation owner; flips the flag for every handed-out token.
///
/// Letting the source go out of scope leaves its tokens live. A finished
/// growth is released that way without being reported as cut short.
#[derive(Default)]
pub struct CancellationSource {
    flag: Arc<StopFlag>,
}

/// Read side of a [`CancellationSource`], carried by a queued animation.
#[derive(Clone)]
pub struct CancellationToken {
    flag: Arc<StopFlag>,
}

impl CancellationSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A token for the animation this source controls.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            flag: Arc::clone(&self.flag),
        }
    }

    /// Cut the animation short. Idempotent.
    pub fn cancel(&self) {
        self.flag.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.is_set()
    }
}

impl CancellationToken {
    /// Whether the owner cut the animation short.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.is_set()
    }
}

impl fmt::Debug for StopFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_set() { "stopped" } else { "live" })
    }
}

impl fmt::Debug for CancellationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CancellationSource").field(&*self.flag).finish()
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CancellationToken").field(&*self.flag).finish()
    }
}
