use crate::{ScrollTicket, ScrollToCallbacks};

/// Phase of the active scroll-to session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollStatus {
    /// No scroll issued yet (or no session at all).
    #[default]
    Idle,
    /// A scroll was handed to the host and its completion is awaited.
    Scrolling,
    /// The host reported completion; convergence is being checked.
    Waiting,
}

/// A read-only snapshot of the active scroll-to session.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollToState {
    pub target_index: usize,
    /// Target top at the time of the last issued scroll.
    pub last_top: f64,
    /// Number of scrolls issued so far.
    pub iterations: usize,
    pub max_iterations: usize,
    pub threshold: f64,
    pub status: ScrollStatus,
    /// A height update landed while the last scroll was still in flight.
    pub height_update_pending: bool,
}

/// The single active scroll-to session.
///
/// Transitions consume the session and return its successor; the core stores the result back
/// into its `Option<Session>` slot.
#[derive(Clone, Debug)]
pub(crate) struct Session {
    pub(crate) ticket: ScrollTicket,
    pub(crate) state: ScrollToState,
    pub(crate) callbacks: ScrollToCallbacks,
}

impl Session {
    pub(crate) fn new(
        ticket: ScrollTicket,
        target_index: usize,
        top: f64,
        threshold: f64,
        max_iterations: usize,
        callbacks: ScrollToCallbacks,
    ) -> Self {
        Self {
            ticket,
            state: ScrollToState {
                target_index,
                last_top: top,
                iterations: 0,
                max_iterations,
                threshold,
                status: ScrollStatus::Idle,
                height_update_pending: false,
            },
            callbacks,
        }
    }

    /// Issues the next scroll toward `top`.
    pub(crate) fn scrolling(self, top: f64) -> Self {
        Self {
            state: ScrollToState {
                last_top: top,
                iterations: self.state.iterations.saturating_add(1),
                status: ScrollStatus::Scrolling,
                height_update_pending: false,
                ..self.state
            },
            ..self
        }
    }

    pub(crate) fn with_pending_height_update(self) -> Self {
        Self {
            state: ScrollToState {
                height_update_pending: true,
                ..self.state
            },
            ..self
        }
    }

    pub(crate) fn waiting(self) -> Self {
        Self {
            state: ScrollToState {
                status: ScrollStatus::Waiting,
                height_update_pending: false,
                ..self.state
            },
            ..self
        }
    }

    pub(crate) fn status(&self) -> ScrollStatus {
        self.state.status
    }

    /// Whether the target's estimated `top` stayed within the threshold of the last scroll.
    pub(crate) fn has_converged(&self, current_top: f64) -> bool {
        let drift = current_top - self.state.last_top;
        let drift = if drift < 0.0 { -drift } else { drift };
        drift <= self.state.threshold
    }
}
