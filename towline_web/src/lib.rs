// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Towline Web: the `web-sys` embedding.
//!
//! This crate is the only place Towline touches a real DOM. It provides:
//!
//! - [`WebHost`]: a [`DragHost`](towline_protocol::DragHost) over
//!   `web_sys::Element`s. Elements are interned behind small copyable
//!   [`NodeId`] handles, which is what the host-agnostic core crates route
//!   on.
//! - [`WebDrags`]: delegated listener wiring — exactly one set of
//!   `pointerdown`/`pointermove`/`pointerup`/`pointercancel` listeners on a
//!   configurable ancestor (default `document.body`), installed lazily on the
//!   first attach, fanning out to a
//!   [`DelegatedDrags`](towline_delegate::DelegatedDrags) registry.
//!
//! Control-region elements (drag handles, cancel zones) must be registered
//! with the host before they can appear in press paths; see
//! [`WebDrags::register_region`].
//!
//! Like the rest of the workspace's web backends, everything here is gated
//! on `wasm32`; on other targets the crate compiles to (almost) nothing.

#![no_std]

extern crate alloc;

#[cfg(target_arch = "wasm32")]
mod delegated;
#[cfg(target_arch = "wasm32")]
mod host;

#[cfg(target_arch = "wasm32")]
pub use delegated::WebDrags;
#[cfg(target_arch = "wasm32")]
pub use host::WebHost;

/// Handle for an interned DOM element.
///
/// Small, copyable, and stable for as long as the element stays registered;
/// it never extends the element's lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);
