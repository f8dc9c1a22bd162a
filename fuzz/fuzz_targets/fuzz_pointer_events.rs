#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tracepad_core::display_mode::DisplayMode;
use tracepad_core::event::PointerEvent;
use tracepad_core::point::Point;
use tracepad_render::frame::Frame;
use tracepad_widgets::{PatternView, PatternViewConfig};
use web_time::Instant;

#[derive(Debug, Arbitrary)]
enum Op {
    Down(i16, i16),
    Move(Vec<(i16, i16)>, i16, i16),
    Up(i16, i16),
    Cancel,
    Tick(u8),
    Animate,
    Clear,
    Stealth(bool),
}

#[derive(Debug, Arbitrary)]
struct Script {
    divisions: u8,
    cells: Vec<(u8, u8)>,
    ops: Vec<Op>,
}

fuzz_target!(|script: Script| {
    let divisions = u32::from(script.divisions % 8) + 1;
    let config = PatternViewConfig::default().with_divisions(divisions);
    let mut view = PatternView::new(config, (), ());
    view.on_size_changed(320, 320);

    let cells: Vec<Point> = script
        .cells
        .iter()
        .take(81)
        .map(|&(c, r)| Point::from_grid(u32::from(c) % (divisions + 1), u32::from(r) % (divisions + 1), divisions))
        .collect();
    let mut now = Instant::now();
    let _ = view.set_pattern(DisplayMode::Correct, cells, now);

    for op in script.ops.into_iter().take(256) {
        let event = match op {
            Op::Down(x, y) => PointerEvent::down(f32::from(x), f32::from(y)),
            Op::Move(history, x, y) => PointerEvent::move_through(
                history
                    .into_iter()
                    .take(8)
                    .map(|(hx, hy)| (f32::from(hx), f32::from(hy))),
                f32::from(x),
                f32::from(y),
            ),
            Op::Up(x, y) => PointerEvent::up(f32::from(x), f32::from(y)),
            Op::Cancel => PointerEvent::Cancel,
            Op::Tick(ms) => {
                now += Duration::from_millis(u64::from(ms));
                view.tick(now);
                continue;
            }
            Op::Animate => {
                let _ = view.set_display_mode(DisplayMode::Animate, now);
                continue;
            }
            Op::Clear => {
                view.clear_pattern();
                continue;
            }
            Op::Stealth(on) => {
                view.set_stealth(on);
                continue;
            }
        };
        view.handle_event(&event, now);

        let pattern = view.pattern();
        for (i, p) in pattern.iter().enumerate() {
            assert!(!pattern[i + 1..].contains(p), "duplicate cell in pattern");
        }
    }

    let mut frame = Frame::new();
    view.render(&mut frame).expect("Correct/Animate modes always have colors");
});
