// Example: render-range queries over a uniform table.
use virtual_core::{VirtualCore, VirtualCoreOptions};

fn main() {
    let mut core = VirtualCore::new(
        VirtualCoreOptions::new(1_000_000, 20.0)
            .with_on_total_height_change(Some(|h: f64| println!("total_height={h}"))),
    );

    let range = core.render_range(123_456.0, 600.0);
    println!("range={range:?}");

    let mut rows = Vec::new();
    core.collect_rows(range, &mut rows);
    println!("first={:?} last={:?}", rows.first(), rows.last());

    core.set_buffer(0);
    println!("unbuffered={:?}", core.render_range(123_456.0, 600.0));
    println!("row at 1e6 px: {:?}", core.index_at_offset(1_000_000.0));
}
