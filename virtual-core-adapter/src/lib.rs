//! Host-side helpers for the `virtual-core` crate.
//!
//! `virtual-core` is UI-agnostic: it answers range queries and drives scroll-to sessions through
//! callbacks, but leaves the scroll position itself to the host. This crate provides the
//! framework-neutral pieces most hosts end up writing:
//!
//! - [`Controller`]: owns the scroll position and viewport height, applies scroll corrections,
//!   and performs scroll-to sessions either instantly or through a tween (requires `std`)
//! - [`Tween`] / [`Easing`]: time-based interpolation for adapter-driven smooth scrolling
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

#[cfg(feature = "std")]
#[macro_use]
mod macros;

#[cfg(feature = "std")]
mod controller;
#[cfg(feature = "std")]
mod mailbox;
mod tween;


#[cfg(feature = "tracing")]
pub(crate) const LOG_TARGET: &str = "virtual_core_adapter";

#[cfg(feature = "std")]
pub use controller::{Controller, ScrollMode};
#[cfg(feature = "std")]
pub use mailbox::ScrollResult;
pub use tween::{Easing, Tween};
