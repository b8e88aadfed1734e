use alloc::sync::Arc;
use core::fmt;

/// Scroll iterations allowed before a scroll-to session gives up.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// What the host did with a scroll request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollOutcome {
    /// The scroll position was applied synchronously.
    ///
    /// The session settles on the next [`crate::VirtualCore::flush_deferred`], giving
    /// measurements triggered by the scroll a chance to be fed in first.
    Immediate,
    /// The scroll is in flight (e.g. animated). The host must later call
    /// [`crate::VirtualCore::complete_scroll`] / [`crate::VirtualCore::notify_scroll_complete`],
    /// or [`crate::VirtualCore::fail_scroll`].
    Pending,
}

/// Identifies the scroll-to session that issued a [`ScrollRequest`].
///
/// Completions carrying a ticket from a superseded session are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScrollTicket(pub(crate) u64);

/// A scroll the host is asked to perform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    /// Target scroll offset (the target row's current estimated top).
    pub top: f64,
    pub ticket: ScrollTicket,
}

/// Performs a scroll for a scroll-to session.
///
/// Runs while the core is mutably borrowed: it must not call back into the core.
pub type OnScrollCallback = Arc<dyn Fn(ScrollRequest) -> ScrollOutcome + Send + Sync>;

/// Fired once when a session converges, with `(final_top, iterations)`.
pub type OnCompleteCallback = Arc<dyn Fn(f64, usize) + Send + Sync>;

/// Fired once when a session terminates without converging.
pub type OnAbortCallback = Arc<dyn Fn(AbortReason) + Send + Sync>;

/// Callbacks for [`crate::VirtualCore::scroll_to_index`].
///
/// Exactly one of `on_complete` / `on_abort` fires per session.
#[derive(Clone)]
pub struct ScrollToCallbacks {
    pub on_scroll: OnScrollCallback,
    pub on_complete: Option<OnCompleteCallback>,
    pub on_abort: Option<OnAbortCallback>,
}

impl ScrollToCallbacks {
    pub fn new(on_scroll: impl Fn(ScrollRequest) -> ScrollOutcome + Send + Sync + 'static) -> Self {
        Self {
            on_scroll: Arc::new(on_scroll),
            on_complete: None,
            on_abort: None,
        }
    }

    pub fn with_on_complete(mut self, f: impl Fn(f64, usize) + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Arc::new(f));
        self
    }

    pub fn with_on_abort(mut self, f: impl Fn(AbortReason) + Send + Sync + 'static) -> Self {
        self.on_abort = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for ScrollToCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollToCallbacks")
            .field("on_complete", &self.on_complete.is_some())
            .field("on_abort", &self.on_abort.is_some())
            .finish_non_exhaustive()
    }
}

/// Per-request tuning for [`crate::VirtualCore::scroll_to_index`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollToOptions {
    /// Maximum drift of the target's estimated top between two iterations that still counts as
    /// converged. Defaults to the core's default row height.
    pub threshold: Option<f64>,
    /// Defaults to [`DEFAULT_MAX_ITERATIONS`].
    pub max_iterations: Option<usize>,
}

impl ScrollToOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }
}

/// Why a scroll-to session ended without converging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbortReason {
    /// Another `scroll_to_index` call replaced the session.
    Superseded,
    /// `abort_scroll_to` was called.
    Manual,
    /// The target kept moving for this many iterations.
    MaxIterations(usize),
    /// The host reported that the scroll could not be performed.
    ScrollFailed,
    /// `set_total` removed the target row.
    TargetOutOfRange,
    /// `reset` discarded the table.
    Reset,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Superseded => f.write_str("new scroll requested"),
            Self::Manual => f.write_str("manually aborted"),
            Self::MaxIterations(n) => write!(f, "max iterations ({n}) reached"),
            Self::ScrollFailed => f.write_str("scroll failed"),
            Self::TargetOutOfRange => f.write_str("target index out of range after setTotal"),
            Self::Reset => f.write_str("reset called"),
        }
    }
}

impl core::error::Error for AbortReason {}
