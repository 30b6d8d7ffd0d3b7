#![no_main]

use histoscroll_core::VisibleWindow;
use histoscroll_core::window::items_per_view;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // offset, viewport, step as f64 plus count and overscan as u32.
    if data.len() < 32 {
        return;
    }
    let f = |i: usize| f64::from_le_bytes(data[i..i + 8].try_into().unwrap());
    let u = |i: usize| u32::from_le_bytes(data[i..i + 4].try_into().unwrap()) as usize;
    let offset = f(0);
    let viewport = f(8);
    let step = f(16);
    let count = u(24);
    let overscan = u(28) % 1_000;

    let w = VisibleWindow::compute(offset, viewport, step, count, overscan);

    assert!(w.start <= w.end || w.is_empty(), "inverted window {w:?}");
    assert!(w.end <= count, "window {w:?} past count {count}");
    if w.end > w.start {
        assert!(
            w.len() <= items_per_view(viewport, step).saturating_add(overscan * 2),
            "window {w:?} exceeds size bound"
        );
    }
});
