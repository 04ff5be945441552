// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Towline Geometry: pure drag-space math.
//!
//! This crate holds the stateless numeric helpers the rest of Towline is built
//! on: snapping a proposed movement to a grid, clamping a movement step so a
//! rectangle stays inside an envelope, and computing the inverse scale factor
//! that maps pointer pixels back into layout pixels.
//!
//! Everything here is a pure function over [`kurbo`] primitives; no host, no
//! plugin protocol, no interaction state. Higher layers decide *when* to call
//! these; this crate only decides *what the numbers are*.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Rect, Vec2};
//! use towline_geometry::{clamp_step, snap_axis};
//!
//! // Snap a 7px movement up to the next multiple of 10.
//! assert_eq!(snap_axis(7.0, 10.0), Some(10.0));
//! // A zero step locks the axis entirely.
//! assert_eq!(snap_axis(7.0, 0.0), None);
//!
//! // A 50px step would push the box past the envelope; it gets clamped.
//! let envelope = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let node = Rect::new(60.0, 0.0, 80.0, 20.0);
//! assert_eq!(clamp_step(envelope, node, Vec2::new(50.0, 0.0)).x, 20.0);
//! ```
//!
//! This crate is `no_std` when built without the `std` feature; numeric
//! support then comes from `libm`, mirroring how kurbo handles the split.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("towline_geometry requires either the `std` or the `libm` feature");

mod clamp;
mod scale;
mod snap;

pub use clamp::clamp_step;
pub use scale::inverse_scale;
pub use snap::{snap_axis, snap_pair};
