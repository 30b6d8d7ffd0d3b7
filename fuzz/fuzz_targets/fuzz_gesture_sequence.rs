#![no_main]

use arbitrary::Arbitrary;
use histoscroll_core::gesture::{GestureController, ReleaseKind};
use histoscroll_core::{Bounds, CaptureCommand, PointerPosition, WheelEvent};
use libfuzzer_sys::fuzz_target;
use web_time::Duration;

#[derive(Debug, Arbitrary)]
enum Op {
    Press { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Release,
    Cancel,
    Wheel { dx: f64, dy: f64 },
    Frame { ms: u8 },
    ScrollTo { offset: f64, animate: bool },
    Resize { content: u16, viewport: u16, step: u8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    content: u16,
    viewport: u16,
    step: u8,
    ops: Vec<Op>,
}

fn bounds(content: u16, viewport: u16, step: u8) -> Bounds {
    let step = f64::from(step.max(1));
    Bounds::new(f64::from(content) * step, f64::from(viewport), step)
}

fuzz_target!(|input: Input| {
    let mut g = GestureController::default();
    g.set_bounds(bounds(input.content, input.viewport, input.step));
    let mut held = false;

    for op in input.ops.iter().take(512) {
        let dispatch = match *op {
            Op::Press { x, y } => Some(g.press(PointerPosition::new(x, y))),
            Op::Move { x, y } => Some(g.move_to(PointerPosition::new(x, y))),
            Op::Release => Some(g.release(PointerPosition::new(0.0, 0.0))),
            Op::Cancel => Some(g.cancel()),
            Op::Wheel { dx, dy } => {
                g.wheel(WheelEvent::new(dx, dy));
                None
            }
            Op::Frame { ms } => {
                g.frame(Duration::from_millis(u64::from(ms)));
                None
            }
            Op::ScrollTo { offset, animate } => {
                g.scroll_to(offset, animate);
                None
            }
            Op::Resize {
                content,
                viewport,
                step,
            } => {
                g.set_bounds(bounds(content, viewport, step));
                None
            }
        };

        if let Some(d) = dispatch {
            match d.capture {
                Some(CaptureCommand::Acquire) => {
                    assert!(!held, "double acquire");
                    held = true;
                }
                Some(CaptureCommand::Release) => {
                    assert!(held, "release without acquire");
                    held = false;
                }
                None => {}
            }
            if d.release == Some(ReleaseKind::Click) {
                assert!(!g.moved_significantly(), "click after drag");
            }
        }

        let max = g.bounds().map_or(0.0, |b| b.max_offset);
        let offset = g.offset();
        assert!(offset.is_finite(), "non-finite offset");
        assert!((0.0..=max).contains(&offset), "offset {offset} outside [0, {max}]");
    }

    assert_eq!(g.teardown().is_some(), held);
});
