#![forbid(unsafe_code)]

//! Pattern model: loaded cells, the traced pattern, the drawn-set and mode.
//!
//! Cells are the grid points currently loaded into the widget, in load order.
//! The pattern is an ordered list of indices into those cells. Loading a
//! pattern makes every loaded cell part of the pattern in load order (the
//! autoplay source); a reset empties the pattern and tracking appends to it.
//!
//! # Invariants
//!
//! 1. Every pattern entry indexes an existing cell, so every pattern point
//!    has a [`CellState`].
//! 2. No cell appears twice in the pattern.
//! 3. The drawn-set is sized to the loaded cells; a cell can only be drawn if
//!    it is in the pattern.
//! 4. Loading, clearing and entering `Animate` reset the drawn-set to empty.

use ahash::AHashMap;
use web_time::Instant;

use crate::cell_state::CellState;
use crate::display_mode::{DisplayMode, DisplayModeMachine, ModeTransition};
use crate::error::Result;
use crate::geometry::Position;
use crate::point::Point;

// ---------------------------------------------------------------------------
// DrawnSet
// ---------------------------------------------------------------------------

/// Bitset of lit cells, indexed by load position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawnSet {
    words: Vec<u64>,
    len: usize,
}

impl DrawnSet {
    /// An all-clear set for `len` cells.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)],
            len,
        }
    }

    /// Number of cells tracked (lit or not).
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.len
    }

    /// Whether cell `index` is lit. Out-of-range indices are never lit.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index < self.len && self.words[index / 64] & (1 << (index % 64)) != 0
    }

    /// Light cell `index`. Returns `true` if it was not lit before.
    pub fn insert(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        let word = &mut self.words[index / 64];
        let bit = 1 << (index % 64);
        let fresh = *word & bit == 0;
        *word |= bit;
        fresh
    }

    /// Clear every bit.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// Number of lit cells.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

// ---------------------------------------------------------------------------
// PatternModel
// ---------------------------------------------------------------------------

/// All mutable widget state shared by the tracker, sequencer and renderer.
#[derive(Debug, Default)]
pub struct PatternModel {
    cells: Vec<Point>,
    states: Vec<CellState>,
    index: AHashMap<Point, usize>,
    pattern: Vec<usize>,
    drawn: DrawnSet,
    mode: DisplayModeMachine,
    in_progress: Position,
}

impl PatternModel {
    /// An empty model in `Correct` mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the loaded cells. Duplicates are dropped, keeping the first.
    ///
    /// Every cell gets a fresh [`CellState`] at `base_size`; the pattern
    /// becomes the load order and nothing is drawn. Returns the cell count.
    pub fn load(&mut self, points: impl IntoIterator<Item = Point>, base_size: f32) -> usize {
        self.cancel_line_animations();
        self.cells.clear();
        self.index.clear();
        for point in points {
            if !self.index.contains_key(&point) {
                self.index.insert(point, self.cells.len());
                self.cells.push(point);
            }
        }
        self.states = self.cells.iter().map(|_| CellState::new(base_size)).collect();
        self.pattern = (0..self.cells.len()).collect();
        self.drawn = DrawnSet::new(self.cells.len());
        self.cells.len()
    }

    // --- cells ---

    /// Loaded cells in load order.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// Load position of `point`, if loaded.
    #[must_use]
    pub fn index_of(&self, point: &Point) -> Option<usize> {
        self.index.get(point).copied()
    }

    /// Animation state per loaded cell.
    #[inline]
    #[must_use]
    pub fn states(&self) -> &[CellState] {
        &self.states
    }

    /// Mutable animation state per loaded cell.
    #[inline]
    pub fn states_mut(&mut self) -> &mut [CellState] {
        &mut self.states
    }

    // --- pattern ---

    /// The pattern as indices into [`cells`](Self::cells).
    #[inline]
    #[must_use]
    pub fn pattern(&self) -> &[usize] {
        &self.pattern
    }

    /// The pattern as points, in gesture order.
    #[must_use]
    pub fn pattern_points(&self) -> Vec<Point> {
        self.pattern.iter().map(|&i| self.cells[i]).collect()
    }

    /// Number of cells in the pattern.
    #[inline]
    #[must_use]
    pub fn pattern_len(&self) -> usize {
        self.pattern.len()
    }

    /// Append cell `index` to the pattern and light it.
    ///
    /// Returns `false` (and changes nothing) if the index is out of range or
    /// the cell is already drawn.
    pub fn append(&mut self, index: usize) -> bool {
        if index >= self.cells.len() || self.drawn.contains(index) {
            return false;
        }
        if !self.pattern.contains(&index) {
            self.pattern.push(index);
        }
        self.drawn.insert(index);
        true
    }

    /// Whether the pattern is still the untouched load order: every cell in
    /// load position and nothing drawn.
    #[must_use]
    pub fn is_load_order(&self) -> bool {
        self.drawn.count() == 0 && self.pattern.iter().copied().eq(0..self.cells.len())
    }

    /// Replace the pattern with `points` as a finished trace over the
    /// loaded cells, lighting each one.
    ///
    /// Points that are not loaded and repeats are skipped. The mode is left
    /// alone. Returns the new pattern length.
    pub fn restore_trace(&mut self, points: &[Point]) -> usize {
        self.cancel_line_animations();
        self.pattern.clear();
        self.drawn.clear();
        for point in points {
            if let Some(index) = self.index_of(point) {
                self.append(index);
            }
        }
        self.pattern.len()
    }

    /// Empty the pattern and drawn-set, cancel line animations and force
    /// `Correct`.
    pub fn clear_pattern(&mut self) {
        self.cancel_line_animations();
        self.pattern.clear();
        self.drawn.clear();
        self.mode.force_correct();
    }

    /// Cancel every in-flight line-growth animation. Returns how many were
    /// cancelled.
    pub fn cancel_line_animations(&mut self) -> usize {
        self.states
            .iter_mut()
            .map(CellState::cancel_line_animation)
            .filter(|&cancelled| cancelled)
            .count()
    }

    // --- drawn-set ---

    /// Lit cells.
    #[inline]
    #[must_use]
    pub fn drawn(&self) -> &DrawnSet {
        &self.drawn
    }

    /// Whether cell `index` is lit.
    #[inline]
    #[must_use]
    pub fn is_drawn(&self, index: usize) -> bool {
        self.drawn.contains(index)
    }

    /// Light exactly the first `count` pattern entries.
    pub fn draw_leading(&mut self, count: usize) {
        self.drawn.clear();
        for &index in self.pattern.iter().take(count) {
            self.drawn.insert(index);
        }
    }

    // --- mode ---

    /// Current display mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> DisplayMode {
        self.mode.mode()
    }

    /// The mode machine (for the autoplay baseline).
    #[inline]
    #[must_use]
    pub fn mode_machine(&self) -> &DisplayModeMachine {
        &self.mode
    }

    /// Change the display mode. Entering `Animate` clears the drawn-set.
    pub fn set_display_mode(&mut self, mode: DisplayMode, now: Instant) -> Result<ModeTransition> {
        let transition = self.mode.transition(mode, self.pattern.len(), now)?;
        if transition.autoplay_started {
            self.drawn.clear();
        }
        Ok(transition)
    }

    /// Forced reset to `Correct`, used when a gesture starts.
    pub fn force_correct(&mut self) {
        self.mode.force_correct();
    }

    // --- pointer ---

    /// Current in-progress pointer position (live or autoplayed).
    #[inline]
    #[must_use]
    pub fn in_progress(&self) -> Position {
        self.in_progress
    }

    /// Update the in-progress pointer position.
    pub fn set_in_progress(&mut self, position: Position) {
        self.in_progress = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TracepadError;

    fn grid(points: &[(u32, u32)]) -> Vec<Point> {
        points.iter().map(|&(c, r)| Point::from_grid(c, r, 4)).collect()
    }

    #[test]
    fn drawn_set_basics() {
        let mut set = DrawnSet::new(70);
        assert!(set.insert(0));
        assert!(set.insert(69));
        assert!(!set.insert(69));
        assert!(!set.insert(70));
        assert!(set.contains(69));
        assert!(!set.contains(1));
        assert_eq!(set.count(), 2);
        set.clear();
        assert_eq!(set.count(), 0);
        assert_eq!(set.capacity(), 70);
    }

    #[test]
    fn load_dedups_and_keeps_order() {
        let mut m = PatternModel::new();
        let pts = grid(&[(0, 0), (1, 1), (0, 0), (2, 2)]);
        assert_eq!(m.load(pts, 10.0), 3);
        assert_eq!(m.cells(), &grid(&[(0, 0), (1, 1), (2, 2)])[..]);
        assert_eq!(m.pattern(), &[0, 1, 2]);
        assert_eq!(m.states().len(), 3);
        assert!(m.states().iter().all(|s| s.size == 10.0));
        assert_eq!(m.drawn().count(), 0);
        assert_eq!(m.index_of(&Point::from_grid(2, 2, 4)), Some(2));
    }

    #[test]
    fn append_rejects_duplicates() {
        let mut m = PatternModel::new();
        m.load(grid(&[(0, 0), (1, 1)]), 10.0);
        m.clear_pattern();
        assert!(m.append(1));
        assert!(!m.append(1));
        assert!(!m.append(9));
        assert_eq!(m.pattern(), &[1]);
        assert!(m.is_drawn(1));
        assert_eq!(m.pattern_points(), grid(&[(1, 1)]));
    }

    #[test]
    fn clear_pattern_cancels_animations_and_forces_correct() {
        let mut m = PatternModel::new();
        m.load(grid(&[(0, 0), (1, 1)]), 10.0);
        m.set_display_mode(DisplayMode::Wrong, Instant::now()).unwrap();
        let token = m.states_mut()[0].begin_line_animation(Position::default());
        m.clear_pattern();
        assert!(token.is_cancelled());
        assert_eq!(m.pattern_len(), 0);
        assert_eq!(m.mode(), DisplayMode::Correct);
    }

    #[test]
    fn animate_on_empty_pattern_fails() {
        let mut m = PatternModel::new();
        let err = m.set_display_mode(DisplayMode::Animate, Instant::now());
        assert!(matches!(err, Err(TracepadError::InvalidState(_))));
    }

    #[test]
    fn animate_clears_drawn() {
        let mut m = PatternModel::new();
        m.load(grid(&[(0, 0), (1, 1)]), 10.0);
        m.draw_leading(2);
        assert_eq!(m.drawn().count(), 2);
        m.set_display_mode(DisplayMode::Animate, Instant::now()).unwrap();
        assert_eq!(m.drawn().count(), 0);
    }

    #[test]
    fn restore_trace_keeps_cells_and_lights_the_trace() {
        let mut m = PatternModel::new();
        m.load(grid(&[(0, 0), (1, 1), (2, 2)]), 10.0);
        assert!(m.is_load_order());

        let n = m.restore_trace(&grid(&[(2, 2), (3, 3), (0, 0), (2, 2)]));
        assert_eq!(n, 2);
        assert_eq!(m.cells().len(), 3);
        assert_eq!(m.pattern(), &[2, 0]);
        assert!(m.is_drawn(2) && m.is_drawn(0) && !m.is_drawn(1));
        assert!(!m.is_load_order());
    }

    #[test]
    fn traced_load_order_is_not_load_order() {
        let mut m = PatternModel::new();
        m.load(grid(&[(0, 0), (1, 1)]), 10.0);
        m.clear_pattern();
        m.append(0);
        m.append(1);
        assert_eq!(m.pattern(), &[0, 1]);
        assert!(!m.is_load_order());
    }

    #[test]
    fn draw_leading_follows_pattern_order() {
        let mut m = PatternModel::new();
        m.load(grid(&[(0, 0), (1, 1), (2, 2)]), 10.0);
        m.clear_pattern();
        m.append(2);
        m.append(0);
        m.draw_leading(1);
        assert!(m.is_drawn(2));
        assert!(!m.is_drawn(0));
    }
}
