//! Scripted gesture and autoplay flows across tracker, sequencer and model.

use std::time::Duration;

use tracepad_core::animation::{AnimationSequencer, AnimationTimings};
use tracepad_core::display_mode::DisplayMode;
use tracepad_core::event::PointerEvent;
use tracepad_core::geometry::Position;
use tracepad_core::gesture::{GestureOptions, GestureTracker, PatternListener, TrackerScene};
use tracepad_core::layout::{DotMetrics, GridLayout};
use tracepad_core::model::PatternModel;
use tracepad_core::point::Point;
use web_time::Instant;

#[derive(Debug, Default)]
struct Events(Vec<&'static str>, Vec<Vec<Point>>);

impl PatternListener for Events {
    fn on_pattern_start(&mut self) {
        self.0.push("start");
    }
    fn on_pattern_cell_added(&mut self, _pattern: &[Point]) {
        self.0.push("added");
    }
    fn on_pattern_detected(&mut self, pattern: &[Point]) {
        self.0.push("detected");
        self.1.push(pattern.to_vec());
    }
    fn on_pattern_cleared(&mut self) {
        self.0.push("cleared");
    }
}

struct Harness {
    model: PatternModel,
    layout: GridLayout,
    sequencer: AnimationSequencer,
    tracker: GestureTracker,
    events: Events,
    clock: Instant,
}

impl Harness {
    /// A 3x3 grid (divisions 2) on a 200x200 surface.
    fn new() -> Self {
        let layout = GridLayout::new(DotMetrics {
            hit_factor: 1.0,
            ..DotMetrics::default()
        })
        .with_size(200.0, 200.0)
        .with_divisions(2);
        let mut model = PatternModel::new();
        let cells = (0..=2).flat_map(|r| (0..=2).map(move |c| Point::from_grid(c, r, 2)));
        model.load(cells, 12.0);
        model.clear_pattern();
        Self {
            model,
            layout,
            sequencer: AnimationSequencer::new(AnimationTimings::default()),
            tracker: GestureTracker::default(),
            events: Events::default(),
            clock: Instant::now(),
        }
    }

    fn send(&mut self, event: PointerEvent) {
        let mut scene = TrackerScene {
            model: &mut self.model,
            layout: &self.layout,
            sequencer: &mut self.sequencer,
        };
        self.tracker
            .process(&event, self.clock, &mut scene, &mut self.events);
    }

    fn advance(&mut self, dt: Duration) -> bool {
        self.clock += dt;
        self.sequencer
            .tick(self.clock, &mut self.model, &self.layout)
    }
}

#[test]
fn three_cell_stroke_is_detected_in_gesture_order() {
    let mut h = Harness::new();
    h.send(PointerEvent::down(0.0, 200.0));
    h.send(PointerEvent::move_through([(100.0, 100.0)], 200.0, 0.0));
    h.send(PointerEvent::up(200.0, 0.0));

    assert_eq!(
        h.events.0,
        ["start", "added", "added", "added", "detected"]
    );
    assert_eq!(
        h.events.1[0],
        vec![
            Point::from_grid(0, 2, 2),
            Point::from_grid(1, 1, 2),
            Point::from_grid(2, 0, 2),
        ]
    );
}

#[test]
fn reset_during_line_growth_is_never_overwritten() {
    let mut h = Harness::new();
    h.send(PointerEvent::down(0.0, 0.0));
    h.send(PointerEvent::move_to(100.0, 0.0));
    assert!(h.model.states()[1].has_line_animation());

    h.advance(Duration::from_millis(20));
    h.send(PointerEvent::Cancel);
    h.advance(Duration::from_millis(20));

    assert!(h.model.states()[1].line_end.is_none());
    assert_eq!(h.events.0.last(), Some(&"cleared"));
}

#[test]
fn animations_settle_after_pulse_duration() {
    let mut h = Harness::new();
    h.send(PointerEvent::down(0.0, 0.0));
    assert!(h.advance(Duration::from_millis(50)));
    assert!(h.model.states()[0].size > 12.0);
    h.advance(Duration::from_millis(400));
    assert_eq!(h.model.states()[0].size, 12.0);
    assert_eq!(h.model.states()[0].line_end, Some(Position::new(0.0, 0.0)));
    assert!(!h.advance(Duration::from_millis(16)));
}

#[test]
fn autoplay_lights_everything_then_wraps_seamlessly() {
    let mut h = Harness::new();
    h.model.load(
        [
            Point::from_grid(0, 0, 2),
            Point::from_grid(1, 0, 2),
            Point::from_grid(2, 0, 2),
        ],
        12.0,
    );
    h.model
        .set_display_mode(DisplayMode::Animate, h.clock)
        .unwrap();
    let step = h.sequencer.timings().autoplay_step;

    h.advance(step * 3);
    assert_eq!(h.model.drawn().count(), 3);
    assert_eq!(h.model.in_progress(), Position::new(200.0, 0.0));

    h.advance(step - Duration::from_millis(1));
    assert_eq!(h.model.drawn().count(), 3);

    h.advance(Duration::from_millis(1));
    assert_eq!(h.model.drawn().count(), 0);
    assert_eq!(h.model.in_progress(), Position::new(0.0, 0.0));

    h.advance(step + step / 2);
    assert_eq!(h.model.drawn().count(), 1);
    assert_eq!(h.model.in_progress(), Position::new(50.0, 0.0));
}

#[test]
fn gesture_stops_autoplay() {
    let mut h = Harness::new();
    let cells = h.model.cells().to_vec();
    h.model.load(cells, 12.0);
    h.model
        .set_display_mode(DisplayMode::Animate, h.clock)
        .unwrap();
    h.send(PointerEvent::down(100.0, 100.0));
    assert_eq!(h.model.mode(), DisplayMode::Correct);
    assert!(h.model.mode_machine().autoplay_baseline().is_none());
    assert_eq!(h.model.pattern_len(), 1);
}

#[test]
fn stealth_gestures_skip_animations() {
    let mut h = Harness::new();
    h.tracker.set_options(GestureOptions {
        stealth: true,
        haptic_feedback: false,
    });
    h.send(PointerEvent::down(0.0, 0.0));
    assert_eq!(h.sequencer.active_count(), 0);
    assert!(!h.advance(Duration::from_millis(16)));
}
