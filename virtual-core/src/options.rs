use alloc::sync::Arc;

/// Rows rendered past each edge of the visible range when no buffer is configured.
pub const DEFAULT_BUFFER: usize = 5;

/// A callback fired whenever the total content height changes.
///
/// The argument is the new total height. The core is mutably borrowed while this runs, so the
/// callback must not try to reach back into it (e.g. through a shared cell); record the value
/// and act on it afterwards.
pub type OnTotalHeightChange = Arc<dyn Fn(f64) + Send + Sync>;

/// Configuration for [`crate::VirtualCore`].
///
/// Cheap to clone: the callback lives in an `Arc`.
#[derive(Clone)]
pub struct VirtualCoreOptions {
    /// Initial row count.
    pub total: usize,
    /// Height assumed for every row until it is measured. Must be positive.
    pub default_height: f64,
    /// Extra rows rendered beyond each edge of the visible range, to mask re-render latency
    /// while scrolling.
    pub buffer: usize,
    pub on_total_height_change: Option<OnTotalHeightChange>,
}

impl VirtualCoreOptions {
    /// Creates options for `total` rows estimated at `default_height` each.
    pub fn new(total: usize, default_height: f64) -> Self {
        debug_assert!(
            default_height.is_finite() && default_height > 0.0,
            "default_height must be positive and finite (got {default_height})"
        );
        Self {
            total,
            default_height,
            buffer: DEFAULT_BUFFER,
            on_total_height_change: None,
        }
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = total;
        self
    }

    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_on_total_height_change(
        mut self,
        on_total_height_change: Option<impl Fn(f64) + Send + Sync + 'static>,
    ) -> Self {
        self.on_total_height_change = on_total_height_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for VirtualCoreOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualCoreOptions")
            .field("total", &self.total)
            .field("default_height", &self.default_height)
            .field("buffer", &self.buffer)
            .field(
                "on_total_height_change",
                &self.on_total_height_change.as_ref().map(|_| ".."),
            )
            .finish()
    }
}
