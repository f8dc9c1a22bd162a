//! The prelude alone is enough to embed a widget.

use tracepad::prelude::*;
use web_time::Instant;

#[test]
fn prelude_drives_a_widget() {
    let mut view = PatternView::new(PatternViewConfig::default().with_divisions(2), (), ());
    view.on_size_changed(100, 100);
    view.set_pattern(
        DisplayMode::Correct,
        [Point::from_grid(0, 0, 2), Point::from_grid(1, 1, 2)],
        Instant::now(),
    )
    .unwrap();

    let mut frame = Frame::new();
    view.render(&mut frame).unwrap();
    assert_eq!(frame.circles().count(), 2);
    assert_eq!(view.save_state().serialized_pattern, "0011");
}

#[test]
fn animate_without_cells_is_an_error() {
    let mut view = PatternView::new(PatternViewConfig::default(), (), ());
    let err = view.set_pattern(DisplayMode::Animate, Vec::<Point>::new(), Instant::now());
    assert!(matches!(err, Err(TracepadError::InvalidState(_))));
}
