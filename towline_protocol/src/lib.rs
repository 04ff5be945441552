// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Towline Protocol: the capability contract between the drag engine and its
//! plugins.
//!
//! ## Overview
//!
//! A Towline interaction is a conversation between three parties:
//!
//! - The **engine** (`towline_engine`) owns per-node state and decides *when*
//!   each hook phase runs.
//! - **Plugins** implement [`DragPlugin`]: named, prioritized behavior units
//!   whose hooks observe and rewrite the in-flight movement proposal.
//! - The **host** implements [`DragHost`]: the only way anything in Towline
//!   touches a real node (measuring, classes, attributes, transforms, pointer
//!   capture).
//!
//! This crate defines the vocabulary all three share, and the dispatcher that
//! walks a hook chain while honoring veto and cancellation outcomes. It holds
//! no interaction state of its own.
//!
//! ## Hook chains
//!
//! Within one phase, plugins run in descending [`priority`](DragPlugin::priority)
//! order, registration order breaking ties. Each hook returns an [`Outcome`]:
//!
//! - [`Outcome::Continue`]: keep going.
//! - [`Outcome::Veto`]: stop the phase; its queued effects are discarded.
//! - [`Outcome::Cancel`]: stop the phase *and* the interaction; remaining
//!   hooks in the phase are skipped except for plugins whose
//!   [`cancelable`](DragPlugin::cancelable) is `false`.
//!
//! A hook that fails (`Err`) is reported as a [`Fault`] and demoted to a veto;
//! one plugin's failure never takes the engine down.
//!
//! ## Effects are a transaction
//!
//! Hooks never mutate the host directly — they only see `&H`. Mutations are
//! queued on the [`EffectQueue`] and flushed once, after the phase completes.
//! A vetoed or cancelled phase discards its queue wholesale, so a node is
//! never left half-updated by a phase that did not commit.
//!
//! ## Minimal example
//!
//! ```
//! use towline_protocol::{
//!     DragContext, DragHost, DragPlugin, EffectQueue, Outcome, Phase, PhaseResult, PluginSet,
//!     dispatcher,
//! };
//! # use towline_protocol::{CaptureError, DragEvent, PointerId};
//! # use kurbo::{Rect, Size, Vec2};
//! # #[derive(Debug, Default)]
//! # struct NullHost;
//! # impl DragHost for NullHost {
//! #     type Node = u32;
//! #     fn measure(&self, _: u32) -> Rect { Rect::ZERO }
//! #     fn layout_size(&self, _: u32) -> Size { Size::ZERO }
//! #     fn set_translate(&mut self, _: u32, _: Vec2) {}
//! #     fn add_class(&mut self, _: u32, _: &str) {}
//! #     fn remove_class(&mut self, _: u32, _: &str) {}
//! #     fn set_attribute(&mut self, _: u32, _: &str, _: &str) {}
//! #     fn remove_attribute(&mut self, _: u32, _: &str) {}
//! #     fn set_pointer_capture(&mut self, _: u32, _: PointerId) -> Result<(), CaptureError> { Ok(()) }
//! #     fn release_pointer_capture(&mut self, _: u32, _: PointerId) {}
//! #     fn user_select(&self) -> Option<String> { None }
//! #     fn set_user_select(&mut self, _: Option<&str>) {}
//! #     fn emit(&mut self, _: u32, _: &DragEvent<u32>) {}
//! # }
//!
//! /// Halves every horizontal movement.
//! struct HalfSpeed;
//!
//! impl<H: DragHost> DragPlugin<H> for HalfSpeed {
//!     fn name(&self) -> &'static str {
//!         "half-speed"
//!     }
//!
//!     fn drag(
//!         &mut self,
//!         cx: &mut DragContext<H::Node>,
//!         _host: &H,
//!         _fx: &mut EffectQueue<H>,
//!     ) -> Result<Outcome, towline_protocol::HookError> {
//!         cx.proposed.x = cx.proposed.x.map(|x| x / 2.0);
//!         Ok(Outcome::Continue)
//!     }
//! }
//!
//! let mut plugins: PluginSet<NullHost> = PluginSet::resolve(vec![Box::new(HalfSpeed)]);
//! let mut cx = DragContext::new(7_u32);
//! cx.proposed.x = Some(10.0);
//!
//! let host = NullHost;
//! let mut fx = EffectQueue::new();
//! let result = dispatcher::run_phase(Phase::Drag, &mut plugins, &mut cx, &host, &mut fx, &mut |_| {});
//!
//! assert_eq!(result, PhaseResult::Completed);
//! assert_eq!(cx.proposed.x, Some(5.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod context;
pub mod dispatcher;
pub mod effects;
pub mod fingerprint;
pub mod host;
pub mod plugin;
pub mod set;

pub use context::{DragContext, Proposed};
pub use effects::EffectQueue;
pub use host::{
    CaptureError, DragEvent, DragEventKind, DragHost, PointerButton, PointerId, PointerInput,
};
pub use plugin::{DragPlugin, Fault, HookError, Outcome, Phase, PhaseResult};
pub use set::PluginSet;
