// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Towline Plugins: the built-in behavior units.
//!
//! Every plugin here is an independent, composable implementation of
//! [`DragPlugin`](towline_protocol::DragPlugin): a pure function of its
//! configuration, depending only on the shared
//! [`DragContext`](towline_protocol::DragContext) — never on another plugin's
//! private state.
//!
//! | Plugin | Hooks | Behavior |
//! |---|---|---|
//! | [`IgnoreMultitouch`] | drag-start, drag | Cancels once a second concurrent pointer appears. |
//! | [`Classes`] | setup, drag-start, drag-end, cleanup | Managed/dragging/dragged class toggling. |
//! | [`Axis`] | should-start, drag | Locks movement to one axis, or vetoes entirely. |
//! | [`UserSelectGuard`] | drag-start, drag-end | Suspends text selection for the interaction, restoring the prior value exactly. |
//! | [`Grid`] | drag | Snaps the proposal up to per-axis step multiples. |
//! | [`Bounds`] | setup, drag-start, drag, drag-end | Clamps the proposal so the node stays inside an envelope. |
//! | [`Transform`] | setup, drag | Renders the committed offset, always as a deferred effect. |
//! | [`Disabled`] | should-start | Unconditional veto; the interaction never starts. |
//! | [`Controls`] | should-start | Allow/block press regions (drag handles, cancel zones). |
//!
//! Configuration is validated fail-fast: constructors that can receive bad
//! input return [`ConfigError`] instead of deferring the surprise to
//! mid-drag.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod axis;
mod bounds;
mod classes;
mod controls;
mod disabled;
mod error;
mod grid;
mod multitouch;
mod transform;
mod user_select;

pub use axis::{Axis, AxisLock};
pub use bounds::{Bounds, BoundsFrom, Recompute};
pub use classes::{Classes, DRAGGED_CLASS, DRAGGING_CLASS, MANAGED_CLASS};
pub use controls::Controls;
pub use disabled::Disabled;
pub use error::ConfigError;
pub use grid::Grid;
pub use multitouch::IgnoreMultitouch;
pub use transform::Transform;
pub use user_select::UserSelectGuard;
