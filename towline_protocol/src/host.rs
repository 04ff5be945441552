// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host boundary: how Towline observes and mutates real nodes.
//!
//! Core crates never touch a DOM (or any other scene) directly. Everything
//! flows through [`DragHost`], keyed by a small copyable node handle chosen by
//! the host. `towline_host_ref` provides an in-memory recording host for
//! tests; `towline_web` implements the trait over `web-sys` elements.

use alloc::string::String;
use core::fmt;

use kurbo::{Point, Rect, Size, Vec2};

/// Identifier the host assigns to one pointer (mouse, pen, touch contact).
///
/// Matches the numbering of the host's pointer events; Towline only ever
/// compares these for equality.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

/// Which button initiated a pointer press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PointerButton {
    /// The primary button (left mouse button, pen contact, touch).
    #[default]
    Primary,
    /// The auxiliary button (middle mouse button).
    Auxiliary,
    /// The secondary button (right mouse button). Never starts a drag.
    Secondary,
    /// Anything else (back/forward/eraser and friends).
    Other,
}

/// One pointer sample delivered to the engine.
///
/// Timestamps are plain milliseconds from whatever monotonic-enough clock the
/// host has; the engine only ever subtracts them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerInput {
    /// Pointer position in the host's viewport coordinates.
    pub position: Point,
    /// Button held for a press; ignored for moves and releases.
    pub button: PointerButton,
    /// Which pointer this sample belongs to.
    pub pointer: PointerId,
    /// Sample time in milliseconds.
    pub timestamp: u64,
}

impl PointerInput {
    /// A primary-button sample at `position`.
    #[must_use]
    pub fn new(position: Point, pointer: PointerId, timestamp: u64) -> Self {
        Self {
            position,
            button: PointerButton::Primary,
            pointer,
            timestamp,
        }
    }

    /// Same sample with a different button.
    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

/// Which notification a [`DragEvent`] carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragEventKind {
    /// The interaction crossed its thresholds and committed its first move.
    Start,
    /// A move was committed.
    Drag,
    /// The interaction ended.
    End,
}

/// Payload of the drag notifications fired on the managed node and delivered
/// to direct callbacks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragEvent<N> {
    /// Which notification this is.
    pub kind: DragEventKind,
    /// The committed cumulative offset, in layout pixels.
    pub offset: Vec2,
    /// The node the behavior was attached to.
    pub root_node: N,
    /// The node currently holding pointer capture (usually `root_node`).
    pub current_node: N,
}

/// The host refused to grant pointer capture.
///
/// Capture is a singular resource; when acquisition fails the engine reports
/// the fault and resets the interaction to idle rather than running
/// half-captured.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CaptureError {
    /// The pointer capture was requested for.
    pub pointer: PointerId,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host refused pointer capture for pointer {}", self.pointer.0)
    }
}

impl core::error::Error for CaptureError {}

/// Node-level operations Towline needs from its embedding.
///
/// Handles (`Node`) are small copyable values; holding one never extends the
/// lifetime of whatever it names. Hooks receive the host immutably (reads
/// only); mutations happen when the engine flushes the effect queue or
/// applies its own engine-owned writes.
pub trait DragHost {
    /// Host-chosen node handle.
    type Node: Copy + Eq + core::hash::Hash + fmt::Debug + 'static;

    /// The node's rendered bounding rectangle, in viewport coordinates.
    fn measure(&self, node: Self::Node) -> Rect;

    /// The node's untransformed layout size (its own width/height, before any
    /// visual scaling).
    fn layout_size(&self, node: Self::Node) -> Size;

    /// Render the committed offset, typically as a CSS translate.
    fn set_translate(&mut self, node: Self::Node, offset: Vec2);

    /// Add a class token to the node.
    fn add_class(&mut self, node: Self::Node, class: &str);

    /// Remove a class token from the node.
    fn remove_class(&mut self, node: Self::Node, class: &str);

    /// Set an attribute on the node.
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    /// Remove an attribute from the node.
    fn remove_attribute(&mut self, node: Self::Node, name: &str);

    /// Route subsequent events for `pointer` to `node` until released.
    ///
    /// # Errors
    ///
    /// [`CaptureError`] when the host cannot grant capture (for example the
    /// pointer is already gone).
    fn set_pointer_capture(&mut self, node: Self::Node, pointer: PointerId)
    -> Result<(), CaptureError>;

    /// Undo [`set_pointer_capture`](Self::set_pointer_capture). Releasing
    /// capture that is not held is a no-op.
    fn release_pointer_capture(&mut self, node: Self::Node, pointer: PointerId);

    /// The document-level user-select value, `None` when unset.
    fn user_select(&self) -> Option<String>;

    /// Set (or with `None`, clear) the document-level user-select value.
    fn set_user_select(&mut self, value: Option<&str>);

    /// Fire a drag notification on the node's own event channel, if the host
    /// has one. Hosts without node-level events may ignore this; direct
    /// callbacks on the engine options cover that case.
    fn emit(&mut self, node: Self::Node, event: &DragEvent<Self::Node>);
}
