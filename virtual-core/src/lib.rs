//! A windowing core for long lists of rows whose heights are discovered lazily.
//!
//! The intended host is a text view whose lines wrap around inline markup, so a line's real
//! height is only known after layout. The core keeps a per-row position table seeded with a
//! default estimate and answers the questions a virtualized view needs on every frame:
//!
//! - which rows to render for a scroll offset and viewport height (binary search, `O(log n)`)
//! - how far to shift the scroll position after measured heights replace estimates above the
//!   viewport (scroll anchoring)
//! - how to reach a row whose position is still an estimate: [`VirtualCore::scroll_to_index`]
//!   scrolls, lets the host measure, and re-scrolls until the target stops moving
//!
//! It is UI-agnostic. The host is expected to provide:
//! - the current scroll offset and viewport height
//! - measured row heights after each render pass
//! - an `on_scroll` callback that performs scrolls, synchronously or as an animation
//!
//! ```
//! use virtual_core::{HeightUpdate, VirtualCore, VirtualCoreOptions};
//!
//! let mut core = VirtualCore::new(VirtualCoreOptions::new(1_000, 20.0));
//! let range = core.render_range(500.0, 300.0);
//! assert_eq!((range.start_index, range.end_index), (20, 46));
//!
//! // Row 3 sits above the viewport: growing it shifts the scroll position by the same amount.
//! let outcome = core.update_heights([HeightUpdate::new(3, 50.0)], 500.0);
//! assert_eq!(outcome.scroll_correction, 30.0);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod options;
mod positions;
mod scroll_to;
mod state;
mod types;
mod virtual_core;


#[cfg(feature = "tracing")]
pub(crate) const LOG_TARGET: &str = "virtual_core";

pub use options::{DEFAULT_BUFFER, OnTotalHeightChange, VirtualCoreOptions};
pub use scroll_to::{
    AbortReason, DEFAULT_MAX_ITERATIONS, OnAbortCallback, OnCompleteCallback, OnScrollCallback,
    ScrollOutcome, ScrollRequest, ScrollTicket, ScrollToCallbacks, ScrollToOptions,
};
pub use state::{ScrollStatus, ScrollToState};
pub use types::{HeightUpdate, HeightUpdateOutcome, ItemPosition, RenderRange};
pub use virtual_core::VirtualCore;
