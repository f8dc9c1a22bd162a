//! End-to-end widget flows: pointer scripts in, listener calls, redraw
//! requests and frames out.

use std::time::Duration;

use proptest::prelude::*;
use tracepad_core::display_mode::DisplayMode;
use tracepad_core::event::PointerEvent;
use tracepad_core::gesture::{PatternListener, Redraw};
use tracepad_core::point::Point;
use tracepad_render::frame::Frame;
use tracepad_widgets::{PatternView, PatternViewConfig, Surface};
use web_time::Instant;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Start,
    Added(usize),
    Detected(Vec<Point>),
    Cleared,
}

#[derive(Debug, Default)]
struct Calls(Vec<Call>);

impl PatternListener for Calls {
    fn on_pattern_start(&mut self) {
        self.0.push(Call::Start);
    }
    fn on_pattern_cell_added(&mut self, pattern: &[Point]) {
        self.0.push(Call::Added(pattern.len()));
    }
    fn on_pattern_detected(&mut self, pattern: &[Point]) {
        self.0.push(Call::Detected(pattern.to_vec()));
    }
    fn on_pattern_cleared(&mut self) {
        self.0.push(Call::Cleared);
    }
}

#[derive(Debug, Default)]
struct Screen {
    redraws: Vec<Redraw>,
}

impl Surface for Screen {
    fn request_redraw(&mut self, redraw: Redraw) {
        self.redraws.push(redraw);
    }
}

const A: (f32, f32) = (0.0, 0.0);
const B: (f32, f32) = (150.0, 0.0);

/// A 3x3 grid (divisions 2) on a 300x300 surface with tight hit boxes.
fn widget() -> PatternView<Calls, Screen> {
    let config = PatternViewConfig::default()
        .with_divisions(2)
        .with_hit_factor(1.0)
        .with_haptic_feedback(false);
    let mut view = PatternView::new(config, Calls::default(), Screen::default());
    let (w, h) = view.measure(
        tracepad_core::layout::MeasureSpec::Exactly(300),
        tracepad_core::layout::MeasureSpec::AtMost(400),
    );
    view.on_size_changed(w, h);
    let cells = (0..=2).flat_map(|r| (0..=2).map(move |c| Point::from_grid(c, r, 2)));
    view.set_pattern(DisplayMode::Correct, cells, Instant::now())
        .unwrap();
    view.clear_pattern();
    view
}

fn send(view: &mut PatternView<Calls, Screen>, event: PointerEvent) {
    view.handle_event(&event, Instant::now());
}

#[test]
fn measured_square_surface() {
    let view = widget();
    assert_eq!(view.layout().width(), 300.0);
    assert_eq!(view.layout().height(), 300.0);
}

#[test]
fn down_up_on_single_cell() {
    let mut view = widget();
    send(&mut view, PointerEvent::down(A.0, A.1));
    send(&mut view, PointerEvent::up(A.0, A.1));
    assert_eq!(
        view.listener().0,
        [
            Call::Start,
            Call::Added(1),
            Call::Detected(vec![Point::from_grid(0, 0, 2)]),
        ]
    );
}

#[test]
fn revisiting_a_cell_does_not_duplicate_it() {
    let mut view = widget();
    send(&mut view, PointerEvent::down(A.0, A.1));
    send(&mut view, PointerEvent::move_to(B.0, B.1));
    send(&mut view, PointerEvent::move_to(A.0 + 1.0, A.1 + 1.0));
    send(&mut view, PointerEvent::up(A.0, A.1));
    assert_eq!(
        view.pattern(),
        vec![Point::from_grid(0, 0, 2), Point::from_grid(1, 0, 2)]
    );
    let added = view
        .listener()
        .0
        .iter()
        .filter(|c| matches!(c, Call::Added(_)))
        .count();
    assert_eq!(added, 2);
}

#[test]
fn cancel_clears_and_never_detects() {
    let mut view = widget();
    send(&mut view, PointerEvent::down(A.0, A.1));
    send(&mut view, PointerEvent::Cancel);
    send(&mut view, PointerEvent::up(A.0, A.1));
    assert_eq!(
        view.listener().0,
        [Call::Start, Call::Added(1), Call::Cleared]
    );
    assert!(view.pattern().is_empty());
    assert_eq!(view.surface().redraws.last(), Some(&Redraw::Full));
}

#[test]
fn move_requests_partial_redraw() {
    let mut view = widget();
    send(&mut view, PointerEvent::down(A.0, A.1));
    send(&mut view, PointerEvent::move_to(B.0, B.1));
    assert!(matches!(
        view.surface().redraws.last(),
        Some(Redraw::Rect(rect)) if !rect.is_empty()
    ));
}

#[test]
fn autoplay_cycle_lights_all_cells_then_wraps() {
    let mut view = widget();
    let start = Instant::now();
    let pattern = [
        Point::from_grid(0, 0, 2),
        Point::from_grid(1, 0, 2),
        Point::from_grid(2, 0, 2),
        Point::from_grid(2, 1, 2),
    ];
    view.set_pattern(DisplayMode::Animate, pattern, start)
        .unwrap();
    let step = view.config().timings.autoplay_step;

    view.tick(start + step * 4);
    assert_eq!(view.model().drawn().count(), 4);

    let cycle = step * 5;
    view.tick(start + cycle);
    assert_eq!(view.model().drawn().count(), 0);
    view.tick(start + cycle + step);
    assert_eq!(view.model().drawn().count(), 1);

    let mut frame = Frame::new();
    view.render(&mut frame).unwrap();
    // One lit cell: only the trailing segment.
    assert_eq!(frame.segments().count(), 1);
}

#[test]
fn animations_finish_and_widget_goes_idle() {
    let mut view = widget();
    let start = Instant::now();
    view.handle_event(&PointerEvent::down(A.0, A.1), start);
    view.handle_event(&PointerEvent::move_to(B.0, B.1), start);
    view.handle_event(&PointerEvent::up(B.0, B.1), start);
    assert!(view.is_animating());

    let mut t = start;
    for _ in 0..40 {
        t += Duration::from_millis(16);
        view.tick(t);
    }
    assert!(!view.is_animating());
    assert!(!view.tick(t + Duration::from_millis(16)));
}

#[test]
fn stealth_widget_never_draws_segments() {
    let mut view = widget();
    view.set_stealth(true);
    send(&mut view, PointerEvent::down(A.0, A.1));
    send(&mut view, PointerEvent::move_to(B.0, B.1));
    send(&mut view, PointerEvent::up(B.0, B.1));
    let mut frame = Frame::new();
    view.render(&mut frame).unwrap();
    assert_eq!(frame.segments().count(), 0);
}

#[test]
fn saved_trace_restores_onto_the_full_grid() {
    let mut view = widget();
    send(&mut view, PointerEvent::down(A.0, A.1));
    send(&mut view, PointerEvent::move_to(B.0, B.1));
    send(&mut view, PointerEvent::up(B.0, B.1));
    let saved = view.save_state();

    let mut restored = widget();
    restored.restore_state(&saved, Instant::now()).unwrap();
    assert_eq!(restored.model().cells().len(), 9);
    assert_eq!(restored.pattern(), view.pattern());

    send(&mut restored, PointerEvent::down(300.0, 300.0));
    send(&mut restored, PointerEvent::up(300.0, 300.0));
    assert_eq!(
        restored.listener().0.last(),
        Some(&Call::Detected(vec![Point::from_grid(2, 2, 2)]))
    );
}

fn pointer_event() -> impl Strategy<Value = PointerEvent> {
    let coord = -50.0f32..350.0;
    prop_oneof![
        (coord.clone(), coord.clone()).prop_map(|(x, y)| PointerEvent::down(x, y)),
        (
            prop::collection::vec((coord.clone(), coord.clone()), 0..4),
            coord.clone(),
            coord.clone()
        )
            .prop_map(|(history, x, y)| PointerEvent::move_through(history, x, y)),
        (coord.clone(), coord).prop_map(|(x, y)| PointerEvent::up(x, y)),
        Just(PointerEvent::Cancel),
    ]
}

proptest! {
    #[test]
    fn arbitrary_streams_keep_patterns_unique_and_render(
        events in prop::collection::vec(pointer_event(), 0..60),
    ) {
        let mut view = widget();
        let mut now = Instant::now();
        for event in &events {
            now += Duration::from_millis(8);
            view.handle_event(event, now);
            view.tick(now);
            let pattern = view.pattern();
            for (i, p) in pattern.iter().enumerate() {
                prop_assert!(!pattern[i + 1..].contains(p));
            }
        }
        let mut frame = Frame::new();
        prop_assert!(view.render(&mut frame).is_ok());
        prop_assert_eq!(frame.circles().count(), 9);
    }
}
