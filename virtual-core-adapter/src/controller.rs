use std::sync::Arc;

use virtual_core::{
    HeightUpdate, HeightUpdateOutcome, RenderRange, ScrollOutcome, ScrollTicket,
    ScrollToCallbacks, ScrollToOptions, VirtualCore, VirtualCoreOptions,
};

use crate::mailbox::Mailbox;
use crate::{Easing, ScrollResult, Tween};

/// How the controller performs the scrolls of a scroll-to session.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollMode {
    /// Jump to the target; the core settles the scroll on the next [`Controller::tick`].
    Instant,
    /// Tween toward the target; the scroll completes when the tween does.
    Animated { duration_ms: u64, easing: Easing },
}

#[derive(Clone, Copy, Debug)]
struct ActiveTween {
    tween: Tween,
    ticket: ScrollTicket,
}

/// A framework-neutral controller that wraps a [`VirtualCore`] together with the scroll state a
/// host view would otherwise track itself.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_height` / `on_scroll` when UI events occur
/// - `apply_measurements` after each layout pass
/// - `tick(now_ms)` each frame, applying the returned offset to the real scroll container
#[derive(Debug)]
pub struct Controller {
    core: VirtualCore,
    scroll_top: f64,
    view_height: f64,
    tween: Option<ActiveTween>,
    mailbox: Arc<Mailbox>,
    now_ms: u64,
}

impl Controller {
    pub fn new(options: VirtualCoreOptions, view_height: f64) -> Self {
        Self::from_core(VirtualCore::new(options), view_height)
    }

    pub fn from_core(core: VirtualCore, view_height: f64) -> Self {
        Self {
            core,
            scroll_top: 0.0,
            view_height: view_height.max(0.0),
            tween: None,
            mailbox: Arc::default(),
            now_ms: 0,
        }
    }

    pub fn core(&self) -> &VirtualCore {
        &self.core
    }

    /// Direct access to the core. Scrolls issued through it bypass the controller.
    pub fn core_mut(&mut self) -> &mut VirtualCore {
        &mut self.core
    }

    pub fn into_core(self) -> VirtualCore {
        self.core
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn view_height(&self) -> f64 {
        self.view_height
    }

    pub fn max_scroll_top(&self) -> f64 {
        (self.core.total_height() - self.view_height).max(0.0)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    fn clamp(&self, top: f64) -> f64 {
        top.clamp(0.0, self.max_scroll_top())
    }

    pub fn on_viewport_height(&mut self, view_height: f64) {
        self.view_height = view_height.max(0.0);
        self.scroll_top = self.clamp(self.scroll_top);
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    ///
    /// Cancels any active tween and aborts the active scroll-to session. Reports of the offset
    /// the controller itself last set are ignored.
    pub fn on_scroll(&mut self, top: f64) {
        if (top - self.scroll_top).abs() < 0.5 {
            return;
        }
        vtrace!(top, prev = self.scroll_top, "on_scroll");
        self.tween = None;
        self.core.abort_scroll_to();
        self.scroll_top = self.clamp(top);
    }

    pub fn render_range(&self) -> RenderRange {
        self.core.render_range(self.scroll_top, self.view_height)
    }

    /// Feeds measured heights to the core and applies the resulting scroll correction.
    pub fn apply_measurements<I>(&mut self, updates: I) -> HeightUpdateOutcome
    where
        I: IntoIterator,
        I::Item: Into<HeightUpdate>,
    {
        let outcome = self.core.update_heights(updates, self.scroll_top);
        if outcome.scroll_correction != 0.0 {
            self.scroll_top = self.clamp(self.scroll_top + outcome.scroll_correction);
            if let Some(active) = &mut self.tween {
                active.tween.shift(outcome.scroll_correction);
            }
        } else {
            self.scroll_top = self.clamp(self.scroll_top);
        }
        self.apply_requests();
        outcome
    }

    /// Starts a scroll-to session driven by this controller.
    ///
    /// The outcome is available from [`Self::take_scroll_result`] once the session ends.
    pub fn scroll_to_index(
        &mut self,
        index: usize,
        mode: ScrollMode,
        options: ScrollToOptions,
        now_ms: u64,
    ) {
        self.now_ms = now_ms;
        self.tween = None;

        let on_scroll = Arc::clone(&self.mailbox);
        let on_complete = Arc::clone(&self.mailbox);
        let on_abort = Arc::clone(&self.mailbox);
        let callbacks = ScrollToCallbacks::new(move |request| {
            on_scroll.post_request(request, mode);
            match mode {
                ScrollMode::Instant => ScrollOutcome::Immediate,
                ScrollMode::Animated { .. } => ScrollOutcome::Pending,
            }
        })
        .with_on_complete(move |top, iterations| {
            on_complete.post_result(ScrollResult::Completed { top, iterations });
        })
        .with_on_abort(move |reason| on_abort.post_result(ScrollResult::Aborted(reason)));

        vdebug!(index, ?mode, "scroll_to_index");
        self.core.scroll_to_index(index, callbacks, options);
        self.apply_requests();
    }

    /// Aborts the active scroll-to session and any tween it started.
    pub fn abort_scroll_to(&mut self) {
        self.tween = None;
        self.core.abort_scroll_to();
    }

    /// The result of the last scroll-to session that ended since the previous call.
    pub fn take_scroll_result(&mut self) -> Option<ScrollResult> {
        self.mailbox.take_result()
    }

    /// Advances the controller.
    ///
    /// Samples an active tween, completing its scroll once it finishes, then settles a pending
    /// instant scroll. Returns the new scroll top when it changed.
    pub fn tick(&mut self, now_ms: u64) -> Option<f64> {
        self.now_ms = now_ms;
        let before = self.scroll_top;

        if let Some(active) = self.tween {
            self.scroll_top = self.clamp(active.tween.sample(now_ms));
            if active.tween.is_done(now_ms) {
                self.tween = None;
                self.core.complete_scroll(active.ticket);
                self.apply_requests();
            }
        }

        self.core.flush_deferred();
        self.apply_requests();

        (self.scroll_top != before).then_some(self.scroll_top)
    }

    pub fn set_total(&mut self, total: usize) {
        self.core.set_total(total);
        if !self.core.is_scrolling() {
            self.tween = None;
        }
        self.scroll_top = self.clamp(self.scroll_top);
    }

    pub fn reset(&mut self, total: Option<usize>) {
        self.tween = None;
        self.core.reset(total);
        self.scroll_top = self.clamp(self.scroll_top);
    }

    fn apply_requests(&mut self) {
        let Some((request, mode)) = self.mailbox.take_request() else {
            return;
        };
        let to = self.clamp(request.top);
        match mode {
            ScrollMode::Instant => {
                self.tween = None;
                self.scroll_top = to;
            }
            ScrollMode::Animated {
                duration_ms,
                easing,
            } => {
                self.tween = Some(ActiveTween {
                    tween: Tween::new(self.scroll_top, to, self.now_ms, duration_ms, easing),
                    ticket: request.ticket,
                });
            }
        }
        vtrace!(top = request.top, applied = to, "scroll request applied");
    }
}
