// Example: measured heights replacing estimates, with scroll anchoring.
use virtual_core::{HeightUpdate, VirtualCore, VirtualCoreOptions};

fn main() {
    let mut core = VirtualCore::new(VirtualCoreOptions::new(100, 10.0));
    let mut scroll_top = 200.0;
    let view_height = 30.0;

    println!(
        "before: top={scroll_top} total={} range={:?}",
        core.total_height(),
        core.render_range(scroll_top, view_height)
    );

    // Rows 0 and 1 sit above the viewport: their growth is compensated. Row 25 is visible.
    let outcome = core.update_heights(
        [
            HeightUpdate::new(0, 30.0),
            HeightUpdate::new(1, 50.0),
            HeightUpdate::new(25, 40.0),
        ],
        scroll_top,
    );
    scroll_top += outcome.scroll_correction;
    println!(
        "after: correction={} top={scroll_top} total={} range={:?}",
        outcome.scroll_correction,
        core.total_height(),
        core.render_range(scroll_top, view_height)
    );

    // Growing the list keeps every measured row.
    core.batch_update(|core| {
        core.set_total(150);
        core.set_total(200);
    });
    println!("grown: total={} height={}", core.total(), core.total_height());
}
