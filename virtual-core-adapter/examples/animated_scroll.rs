use virtual_core::{HeightUpdate, ScrollToOptions, VirtualCoreOptions};
use virtual_core_adapter::{Controller, Easing, ScrollMode};

fn main() {
    // Example: a frame loop driving an animated scroll-to while rows get measured.
    //
    // An adapter would:
    // - start the scroll in response to a "go to line" command
    // - call tick(now_ms) every frame and apply the returned offset to the real scroll container
    // - render `render_range()` and feed the measured heights back
    let mut c = Controller::new(VirtualCoreOptions::new(10_000, 20.0), 480.0);
    let mode = ScrollMode::Animated {
        duration_ms: 240,
        easing: Easing::SmoothStep,
    };
    c.scroll_to_index(2_000, mode, ScrollToOptions::default(), 0);

    let mut now_ms = 0u64;
    while c.core().is_scrolling() && now_ms < 5_000 {
        now_ms += 16;
        if let Some(top) = c.tick(now_ms) {
            println!("t={now_ms} top={top:.1} range={:?}", c.render_range());
        }
        let range = c.render_range();
        c.apply_measurements(
            (range.start_index..range.end_index).map(|i| HeightUpdate::new(i, 24.0)),
        );
    }

    println!(
        "result={:?} top={} total_height={}",
        c.take_scroll_result(),
        c.scroll_top(),
        c.core().total_height()
    );
}
