// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance configuration: thresholds, initial position, callbacks.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Vec2;

use towline_protocol::{DragEvent, Fault};

/// Gate between the interacting and dragging states.
///
/// Both conditions must hold before the first move commits: at least
/// `distance` layout pixels of displacement since the press, and at least
/// `delay` milliseconds since the press. The defaults are zero, which makes
/// the first qualifying move transition immediately.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Threshold {
    /// Minimum displacement in layout pixels.
    pub distance: f64,
    /// Minimum elapsed press time in milliseconds.
    pub delay: u64,
}

impl Threshold {
    /// A distance-only threshold.
    #[must_use]
    pub fn distance(distance: f64) -> Self {
        Self {
            distance,
            delay: 0,
        }
    }

    /// A delay-only threshold.
    #[must_use]
    pub fn delay(delay: u64) -> Self {
        Self {
            distance: 0.0,
            delay,
        }
    }
}

/// Direct notification callback.
pub type EventCallback<N> = Box<dyn FnMut(&DragEvent<N>)>;

/// Error-report callback; receives every hook and resource fault.
pub type FaultCallback<N> = Box<dyn FnMut(Fault<N>)>;

/// Configuration for one [`DragInstance`](crate::DragInstance).
///
/// The notification callbacks mirror the events emitted on the node through
/// the host, for embeddings without a node-level event bus. The fault
/// callback is the engine's only error output: hooks that fail are reported
/// here and the interaction carries on in a safely-reset state.
pub struct DragOptions<N> {
    /// Committed offset the node starts with (defaults to zero).
    pub initial_offset: Vec2,
    /// Interacting → dragging gate.
    pub threshold: Threshold,
    /// Called once per interaction when dragging begins.
    pub on_drag_start: Option<EventCallback<N>>,
    /// Called on every committed move.
    pub on_drag: Option<EventCallback<N>>,
    /// Called once per interaction when dragging ends.
    pub on_drag_end: Option<EventCallback<N>>,
    /// Called whenever a hook or resource acquisition fails.
    pub on_fault: Option<FaultCallback<N>>,
}

impl<N> DragOptions<N> {
    /// Defaults: zero initial offset, zero thresholds, no callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            initial_offset: Vec2::ZERO,
            threshold: Threshold::default(),
            on_drag_start: None,
            on_drag: None,
            on_drag_end: None,
            on_fault: None,
        }
    }

    /// Start the node at a caller-supplied committed offset.
    #[must_use]
    pub fn with_initial_offset(mut self, offset: Vec2) -> Self {
        self.initial_offset = offset;
        self
    }

    /// Set the interacting → dragging gate.
    #[must_use]
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Install the drag-start callback.
    #[must_use]
    pub fn on_drag_start(mut self, callback: impl FnMut(&DragEvent<N>) + 'static) -> Self {
        self.on_drag_start = Some(Box::new(callback));
        self
    }

    /// Install the per-move callback.
    #[must_use]
    pub fn on_drag(mut self, callback: impl FnMut(&DragEvent<N>) + 'static) -> Self {
        self.on_drag = Some(Box::new(callback));
        self
    }

    /// Install the drag-end callback.
    #[must_use]
    pub fn on_drag_end(mut self, callback: impl FnMut(&DragEvent<N>) + 'static) -> Self {
        self.on_drag_end = Some(Box::new(callback));
        self
    }

    /// Install the fault callback.
    #[must_use]
    pub fn on_fault(mut self, callback: impl FnMut(Fault<N>) + 'static) -> Self {
        self.on_fault = Some(Box::new(callback));
        self
    }
}

impl<N> Default for DragOptions<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for DragOptions<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragOptions")
            .field("initial_offset", &self.initial_offset)
            .field("threshold", &self.threshold)
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag", &self.on_drag.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .field("on_fault", &self.on_fault.is_some())
            .finish()
    }
}
