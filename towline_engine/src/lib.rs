// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Towline Engine: the per-node drag interaction engine.
//!
//! ## Overview
//!
//! One [`DragInstance`] manages one node. It owns the node's
//! [`DragContext`](towline_protocol::DragContext), its resolved plugin set,
//! and the `idle → interacting → dragging → idle` state machine. Pointer
//! samples go in; committed offsets, deferred host effects, and notifications
//! come out.
//!
//! ## Per-move algorithm
//!
//! On each qualifying move the engine computes the raw displacement since the
//! press (scaled into layout pixels), derives the movement proposal as the
//! difference between where the pointer wants the node and where the
//! committed offset has it, runs the `drag` chain — where each plugin may
//! overwrite the proposal, last writer wins — and commits
//! `offset += proposal` only if no plugin vetoed. The external drag
//! notification always carries the *committed* offset, never the raw delta.
//!
//! ## Live updates
//!
//! [`DragInstance::update`] reconciles a new plugin list against the current
//! one by name, keeping unchanged instances (and their private state)
//! untouched. Mid-interaction, only live-update eligible plugins reconcile
//! immediately — and the engine replays the most recent pointer move against
//! the updated chain, so the visual result reflects the new configuration
//! without waiting for the next real event. The rest of the update is applied
//! once the interaction returns to idle.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use towline_engine::{DragInstance, DragOptions};
//! use towline_host_ref::RefHost;
//! use towline_protocol::{PointerId, PointerInput};
//! use towline_plugins::Transform;
//!
//! let mut host = RefHost::new();
//! host.insert_node(1, Rect::new(0.0, 0.0, 100.0, 100.0));
//!
//! let mut instance = DragInstance::attach(
//!     1,
//!     vec![Box::new(Transform::new())],
//!     DragOptions::new(),
//!     &mut host,
//! );
//!
//! let pointer = PointerId(10);
//! instance.pointer_down(&mut host, &[], PointerInput::new(Point::ZERO, pointer, 0));
//! instance.pointer_move(&mut host, PointerInput::new(Point::new(30.0, 40.0), pointer, 16));
//! instance.pointer_up(&mut host, PointerInput::new(Point::new(30.0, 40.0), pointer, 32));
//!
//! assert_eq!(instance.offset(), kurbo::Vec2::new(30.0, 40.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`; the doctest runs on the reference
//! host.

#![no_std]

extern crate alloc;

mod instance;
mod options;

pub use instance::{DragInstance, MANAGED_ATTR, STATE_ATTR, STATE_DRAGGING, STATE_IDLE};
pub use options::{DragOptions, EventCallback, FaultCallback, Threshold};
