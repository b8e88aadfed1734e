use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::positions::PositionTable;
use crate::state::Session;
use crate::{
    AbortReason, DEFAULT_MAX_ITERATIONS, HeightUpdate, HeightUpdateOutcome, ItemPosition,
    OnTotalHeightChange, RenderRange, ScrollOutcome, ScrollRequest, ScrollStatus, ScrollTicket,
    ScrollToCallbacks, ScrollToOptions, ScrollToState, VirtualCoreOptions,
};

/// Windowing core for a list of rows whose heights are only known after layout.
///
/// The core is DOM-free and single-threaded:
/// - Hosts query [`Self::render_range`] on every scroll/resize to learn which rows to
///   materialize.
/// - After layout, hosts feed real row heights through [`Self::update_heights`] and add the
///   returned `scroll_correction` to their scroll position.
/// - [`Self::scroll_to_index`] drives an iterative scroll → measure → re-check loop until the
///   target row's estimated position stops moving.
///
/// Callbacks run while the core is mutably borrowed and must not call back into it.
pub struct VirtualCore {
    default_height: f64,
    buffer: usize,
    on_total_height_change: Option<OnTotalHeightChange>,

    positions: PositionTable,

    scroll_to: Option<Session>,
    deferred: Option<ScrollTicket>,
    next_ticket: u64,

    notify_depth: usize,
    notify_pending: bool,
}

impl VirtualCore {
    /// Builds a table of `options.total` rows at the default height and fires the total-height
    /// notification once.
    pub fn new(options: VirtualCoreOptions) -> Self {
        vdebug!(
            total = options.total,
            default_height = options.default_height,
            buffer = options.buffer,
            "VirtualCore::new"
        );
        let core = Self {
            positions: PositionTable::uniform(options.total, options.default_height),
            default_height: options.default_height,
            buffer: options.buffer,
            on_total_height_change: options.on_total_height_change,
            scroll_to: None,
            deferred: None,
            next_ticket: 0,
            notify_depth: 0,
            notify_pending: false,
        };
        core.notify_now();
        core
    }

    pub fn total(&self) -> usize {
        self.positions.len()
    }

    pub fn default_height(&self) -> f64 {
        self.default_height
    }

    pub fn buffer(&self) -> usize {
        self.buffer
    }

    pub fn set_buffer(&mut self, buffer: usize) {
        self.buffer = buffer;
    }

    pub fn set_on_total_height_change(
        &mut self,
        on_total_height_change: Option<impl Fn(f64) + Send + Sync + 'static>,
    ) {
        self.on_total_height_change = on_total_height_change.map(|f| Arc::new(f) as _);
    }

    /// Bottom of the last row, or `0` for an empty table.
    pub fn total_height(&self) -> f64 {
        self.positions.total_height()
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.on_total_height_change {
            cb(self.total_height());
        }
    }

    fn notify_total_height(&mut self) {
        if self.notify_depth > 0 {
            self.notify_pending = true;
            return;
        }
        self.notify_now();
    }

    /// Coalesces every total-height notification raised inside `f` into one, fired with the
    /// final height when the outermost batch ends.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.notify_depth = self.notify_depth.saturating_add(1);

        f(self);

        debug_assert!(self.notify_depth > 0, "notify_depth underflow");
        self.notify_depth = self.notify_depth.saturating_sub(1);

        if self.notify_depth == 0 && core::mem::take(&mut self.notify_pending) {
            self.notify_now();
        }
    }

    /// Returns the rows to render for a viewport at `scroll_top` spanning `view_height`.
    ///
    /// The range covers every row intersecting `[scroll_top, scroll_top + view_height]` plus
    /// `buffer` rows on each side, clamped to the table. `O(log n)`.
    pub fn render_range(&self, scroll_top: f64, view_height: f64) -> RenderRange {
        let total = self.total();
        if total == 0 {
            return RenderRange::empty();
        }
        let last = total - 1;

        let anchor_index = self.positions.find_start_index(scroll_top).min(last);
        let start_index = anchor_index.saturating_sub(self.buffer);

        // `find_start_index` may return `total`; clamp before turning it into an exclusive end.
        let end_anchor = self.positions.find_start_index(scroll_top + view_height);
        let end_index = end_anchor.saturating_add(self.buffer).min(last) + 1;

        RenderRange {
            start_index,
            end_index,
            offset: self.top_by_index(start_index),
            anchor_index,
        }
    }

    /// Cumulative top of `index`; the total height for indexes past the end.
    pub fn top_by_index(&self, index: usize) -> f64 {
        match self.positions.get(index) {
            Some(row) => row.top,
            None => self.total_height(),
        }
    }

    /// A copy of the row's position, if it exists.
    pub fn item_position(&self, index: usize) -> Option<ItemPosition> {
        self.positions.get(index)
    }

    /// The row containing `offset`, clamped to the last row.
    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some(self.positions.find_start_index(offset).min(total - 1))
    }

    /// Iterates `(index, position)` for every row of `range` that still exists.
    pub fn for_each_row(&self, range: RenderRange, mut f: impl FnMut(usize, ItemPosition)) {
        let rows = self.positions.rows();
        let end = range.end_index.min(rows.len());
        if range.start_index >= end {
            return;
        }
        for (i, row) in rows[range.start_index..end].iter().enumerate() {
            f(range.start_index + i, *row);
        }
    }

    /// Collects the rows of `range` into `out` (clears `out` first).
    pub fn collect_rows(&self, range: RenderRange, out: &mut Vec<(usize, ItemPosition)>) {
        out.clear();
        self.for_each_row(range, |i, row| out.push((i, row)));
    }

    /// Applies measured row heights and returns the scroll correction that keeps the viewport
    /// visually anchored.
    ///
    /// - Updates for missing rows or with non-positive or non-finite heights are dropped.
    /// - Updates are applied in ascending index order; unchanged heights are skipped.
    /// - Only rows lying entirely above `current_scroll_top` (old bottom `<=` scroll top)
    ///   contribute their delta to `scroll_correction`.
    /// - Offsets are recomputed once, from the smallest changed index to the end.
    pub fn update_heights<I>(&mut self, updates: I, current_scroll_top: f64) -> HeightUpdateOutcome
    where
        I: IntoIterator,
        I::Item: Into<HeightUpdate>,
    {
        let total = self.total();
        let mut batch: Vec<HeightUpdate> = updates.into_iter().map(Into::into).collect();
        let received = batch.len();
        batch.retain(|u| u.is_valid_for(total));
        if batch.len() != received {
            vdebug!(
                dropped = received - batch.len(),
                total,
                "update_heights: dropped invalid updates"
            );
        }
        if batch.is_empty() {
            return HeightUpdateOutcome::default();
        }
        batch.sort_by_key(|u| u.index);

        let mut scroll_correction = 0.0;
        let mut first_changed: Option<usize> = None;
        for update in &batch {
            let Some(row) = self.positions.get(update.index) else {
                continue;
            };
            let diff = update.height - row.height;
            if diff == 0.0 {
                continue;
            }
            if row.top + row.height <= current_scroll_top {
                scroll_correction += diff;
            }
            self.positions.set_height(update.index, update.height);
            first_changed.get_or_insert(update.index);
        }

        let Some(start) = first_changed else {
            return HeightUpdateOutcome::default();
        };
        self.positions.recompute_from(start);
        vtrace!(
            updates = batch.len(),
            first_changed = start,
            scroll_correction,
            total_height = self.total_height(),
            "update_heights"
        );
        self.notify_total_height();

        match self.scroll_to.as_ref().map(Session::status) {
            Some(ScrollStatus::Scrolling) => {
                self.replace_session(Session::with_pending_height_update);
            }
            Some(ScrollStatus::Waiting) => self.check_convergence(),
            Some(ScrollStatus::Idle) | None => {}
        }

        HeightUpdateOutcome {
            scroll_correction,
            first_changed,
        }
    }

    /// Starts an iterative scroll to `index` (clamped to the last row).
    ///
    /// Any active session is aborted first with [`AbortReason::Superseded`]. On an empty table
    /// `on_complete(0.0, 0)` fires immediately.
    ///
    /// Each iteration hands `callbacks.on_scroll` the target's current estimated top. Once the
    /// host reports completion (see [`ScrollOutcome`]), the target's top is compared with the
    /// value it was scrolled to: within `threshold` completes the session, otherwise another
    /// scroll is issued, up to `max_iterations`.
    pub fn scroll_to_index(
        &mut self,
        index: usize,
        callbacks: ScrollToCallbacks,
        options: ScrollToOptions,
    ) {
        let total = self.total();
        if total == 0 {
            vdebug!(index, "scroll_to_index: empty table");
            if let Some(cb) = &callbacks.on_complete {
                cb(0.0, 0);
            }
            return;
        }
        let index = index.min(total - 1);

        self.abort(AbortReason::Superseded);

        let threshold = options.threshold.unwrap_or(self.default_height);
        let max_iterations = options.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS);
        let top = self.top_by_index(index);
        let ticket = ScrollTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);

        vdebug!(index, top, threshold, max_iterations, "scroll_to_index");
        self.scroll_to = Some(Session::new(
            ticket,
            index,
            top,
            threshold,
            max_iterations,
            callbacks,
        ));
        self.issue_scroll(top);
    }

    /// Aborts the active scroll-to session with [`AbortReason::Manual`]. No-op when idle.
    pub fn abort_scroll_to(&mut self) {
        self.abort(AbortReason::Manual);
    }

    /// Whether a scroll-to session is active.
    pub fn is_scrolling(&self) -> bool {
        self.scroll_to.is_some()
    }

    pub fn scroll_status(&self) -> ScrollStatus {
        self.scroll_to
            .as_ref()
            .map_or(ScrollStatus::Idle, Session::status)
    }

    pub fn scroll_to_state(&self) -> Option<ScrollToState> {
        self.scroll_to.as_ref().map(|s| s.state)
    }

    /// Signals that the in-flight scroll finished, then checks convergence.
    ///
    /// Ignored unless the active session is scrolling. Prefer [`Self::complete_scroll`] when
    /// completions can arrive late (e.g. from a cancelled animation).
    pub fn notify_scroll_complete(&mut self) {
        let Some(session) = &self.scroll_to else {
            return;
        };
        if session.status() != ScrollStatus::Scrolling {
            return;
        }
        if self.deferred == Some(session.ticket) {
            self.deferred = None;
        }
        self.replace_session(Session::waiting);
        self.check_convergence();
    }

    /// Like [`Self::notify_scroll_complete`], but only for the session that issued `ticket`.
    ///
    /// Returns `false` when the ticket is stale.
    pub fn complete_scroll(&mut self, ticket: ScrollTicket) -> bool {
        if !self.is_scrolling_for(ticket) {
            vtrace!(?ticket, "complete_scroll: stale ticket");
            return false;
        }
        self.notify_scroll_complete();
        true
    }

    /// Reports that the scroll issued for `ticket` could not be performed; aborts the session
    /// with [`AbortReason::ScrollFailed`].
    ///
    /// Returns `false` when the ticket is stale.
    pub fn fail_scroll(&mut self, ticket: ScrollTicket) -> bool {
        if !self.is_scrolling_for(ticket) {
            return false;
        }
        self.abort(AbortReason::ScrollFailed);
        true
    }

    /// Settles a scroll the host applied synchronously ([`ScrollOutcome::Immediate`]).
    ///
    /// Hosts call this once per scheduling turn, after feeding that turn's measurements. A
    /// completion belonging to a session that has since been replaced is dropped.
    pub fn flush_deferred(&mut self) {
        let Some(ticket) = self.deferred.take() else {
            return;
        };
        if self.is_scrolling_for(ticket) {
            self.notify_scroll_complete();
        }
    }

    /// Whether a synchronous scroll is waiting for [`Self::flush_deferred`].
    pub fn has_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Grows or shrinks the table without touching surviving rows.
    ///
    /// New rows get the default height, appended after the current last row. Aborts an active
    /// session whose target no longer exists.
    pub fn set_total(&mut self, total: usize) {
        let prev = self.total();
        if prev == total {
            return;
        }
        vdebug!(prev, total, "set_total");
        if total > prev {
            self.positions.grow(total, self.default_height);
        } else {
            self.positions.truncate(total);
        }

        let target = self.scroll_to.as_ref().map(|s| s.state.target_index);
        if target.is_some_and(|t| t >= total) {
            self.abort(AbortReason::TargetOutOfRange);
        }

        self.notify_total_height();
    }

    /// Discards every measured height and rebuilds the table at the default height.
    ///
    /// `total` defaults to the current row count. Aborts any active session.
    pub fn reset(&mut self, total: Option<usize>) {
        self.abort(AbortReason::Reset);
        self.deferred = None;

        let total = total.unwrap_or(self.total());
        vdebug!(total, "reset");
        self.positions = PositionTable::uniform(total, self.default_height);
        self.notify_total_height();
    }

    fn is_scrolling_for(&self, ticket: ScrollTicket) -> bool {
        self.scroll_to
            .as_ref()
            .is_some_and(|s| s.ticket == ticket && s.status() == ScrollStatus::Scrolling)
    }

    fn replace_session(&mut self, f: impl FnOnce(Session) -> Session) {
        self.scroll_to = self.scroll_to.take().map(f);
    }

    fn issue_scroll(&mut self, top: f64) {
        let Some(session) = self.scroll_to.take() else {
            return;
        };
        let session = session.scrolling(top);
        let request = ScrollRequest {
            top,
            ticket: session.ticket,
        };
        let on_scroll = Arc::clone(&session.callbacks.on_scroll);
        vtrace!(
            target_index = session.state.target_index,
            iteration = session.state.iterations,
            top,
            "scroll_to: issuing scroll"
        );
        self.scroll_to = Some(session);

        match on_scroll(request) {
            ScrollOutcome::Immediate => self.deferred = Some(request.ticket),
            ScrollOutcome::Pending => {}
        }
    }

    fn check_convergence(&mut self) {
        let Some(session) = &self.scroll_to else {
            return;
        };
        if session.status() != ScrollStatus::Waiting {
            return;
        }
        let state = session.state;
        let current = self.top_by_index(state.target_index);

        if session.has_converged(current) {
            let Some(session) = self.scroll_to.take() else {
                return;
            };
            vdebug!(
                target_index = state.target_index,
                top = current,
                iterations = state.iterations,
                "scroll_to: converged"
            );
            if let Some(cb) = &session.callbacks.on_complete {
                cb(current, state.iterations);
            }
        } else if state.iterations >= state.max_iterations {
            self.abort(AbortReason::MaxIterations(state.max_iterations));
        } else {
            self.issue_scroll(current);
        }
    }

    fn abort(&mut self, reason: AbortReason) {
        let Some(session) = self.scroll_to.take() else {
            return;
        };
        if self.deferred == Some(session.ticket) {
            self.deferred = None;
        }
        match reason {
            AbortReason::MaxIterations(_) | AbortReason::ScrollFailed => {
                vwarn!(
                    target_index = session.state.target_index,
                    iterations = session.state.iterations,
                    %reason,
                    "scroll_to aborted"
                );
            }
            _ => {
                vdebug!(
                    target_index = session.state.target_index,
                    %reason,
                    "scroll_to aborted"
                );
            }
        }
        if let Some(cb) = &session.callbacks.on_abort {
            cb(reason);
        }
    }

    #[cfg(test)]
    pub(crate) fn debug_check(&self) {
        self.positions.debug_check();
    }
}

impl core::fmt::Debug for VirtualCore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualCore")
            .field("total", &self.total())
            .field("total_height", &self.total_height())
            .field("default_height", &self.default_height)
            .field("buffer", &self.buffer)
            .field("scroll_to", &self.scroll_to_state())
            .field("deferred", &self.deferred)
            .finish_non_exhaustive()
    }
}
