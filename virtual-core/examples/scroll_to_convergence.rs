// Example: scroll_to_index converging while a host measures rows after every scroll.
use std::sync::{Arc, Mutex};

use virtual_core::{
    HeightUpdate, ScrollOutcome, ScrollToCallbacks, ScrollToOptions, VirtualCore,
    VirtualCoreOptions,
};

fn real_height(index: usize) -> f64 {
    20.0 + (index % 7) as f64 * 6.0
}

fn main() {
    let mut core = VirtualCore::new(VirtualCoreOptions::new(10_000, 20.0));
    let view_height = 600.0;
    let scroll_top = Arc::new(Mutex::new(0.0f64));

    let top = Arc::clone(&scroll_top);
    let callbacks = ScrollToCallbacks::new(move |request| {
        println!("scroll to {}", request.top);
        *top.lock().unwrap() = request.top;
        ScrollOutcome::Immediate
    })
    .with_on_complete(|top, iterations| println!("done: top={top} iterations={iterations}"))
    .with_on_abort(|reason| println!("aborted: {reason}"));

    core.scroll_to_index(5_000, callbacks, ScrollToOptions::default());

    while core.is_scrolling() {
        let current = *scroll_top.lock().unwrap();
        let range = core.render_range(current, view_height);
        let updates =
            (range.start_index..range.end_index).map(|i| HeightUpdate::new(i, real_height(i)));
        let outcome = core.update_heights(updates, current);
        *scroll_top.lock().unwrap() += outcome.scroll_correction;

        core.flush_deferred();
    }

    println!("state after: {:?}", core.scroll_to_state());
}
