use std::sync::{Mutex, PoisonError};

use virtual_core::{AbortReason, ScrollRequest};

use crate::ScrollMode;

/// How a scroll-to session ended.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollResult {
    Completed { top: f64, iterations: usize },
    Aborted(AbortReason),
}

#[derive(Debug, Default)]
struct Slots {
    request: Option<(ScrollRequest, ScrollMode)>,
    result: Option<ScrollResult>,
}

/// Shared between the controller and the callbacks it installs on the core.
///
/// The callbacks only record; the controller applies requests after the core call returns.
#[derive(Debug, Default)]
pub(crate) struct Mailbox {
    slots: Mutex<Slots>,
}

impl Mailbox {
    fn with<R>(&self, f: impl FnOnce(&mut Slots) -> R) -> R {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut slots)
    }

    pub(crate) fn post_request(&self, request: ScrollRequest, mode: ScrollMode) {
        self.with(|s| s.request = Some((request, mode)));
    }

    pub(crate) fn take_request(&self) -> Option<(ScrollRequest, ScrollMode)> {
        self.with(|s| s.request.take())
    }

    pub(crate) fn post_result(&self, result: ScrollResult) {
        self.with(|s| s.result = Some(result));
    }

    pub(crate) fn take_result(&self) -> Option<ScrollResult> {
        self.with(|s| s.result.take())
    }
}
