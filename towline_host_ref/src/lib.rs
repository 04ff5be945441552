// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Towline Host Ref: a reference [`DragHost`] that records everything.
//!
//! This host backs the engine and plugin test suites: nodes are plain `u32`
//! handles with seeded geometry, and every mutation — classes, attributes,
//! translates, pointer-capture traffic, emitted notifications, the
//! document-level user-select value — lands in inspectable state instead of a
//! real scene. Capture acquisition can be forced to fail to exercise the
//! engine's reset path.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Rect, Vec2};
//! use towline_host_ref::RefHost;
//! use towline_protocol::DragHost;
//!
//! let mut host = RefHost::new();
//! host.insert_node(1, Rect::new(0.0, 0.0, 100.0, 50.0));
//!
//! host.set_translate(1, Vec2::new(10.0, 0.0));
//! assert_eq!(host.translate_of(1), Some(Vec2::new(10.0, 0.0)));
//!
//! // Measurement reflects the applied translate, like a real bounding rect.
//! assert_eq!(host.measure(1), Rect::new(10.0, 0.0, 110.0, 50.0));
//! ```

use hashbrown::HashMap;
use kurbo::{Rect, Size, Vec2};

use towline_protocol::{CaptureError, DragEvent, DragHost, PointerId};

/// One entry in the pointer-capture traffic log.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CaptureOp {
    /// Capture was granted to the node for the pointer.
    Acquire(u32, PointerId),
    /// Capture was released by the node for the pointer.
    Release(u32, PointerId),
}

#[derive(Clone, Debug, Default)]
struct NodeState {
    rect: Rect,
    layout: Size,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    translate: Option<Vec2>,
}

/// In-memory recording host. Nodes are `u32` handles seeded with geometry via
/// [`insert_node`](RefHost::insert_node) / [`insert_scaled`](RefHost::insert_scaled).
///
/// Unknown handles measure as zero rectangles rather than panicking, so tests
/// can probe error paths without seeding everything.
#[derive(Debug, Default)]
pub struct RefHost {
    nodes: HashMap<u32, NodeState>,
    user_select: Option<String>,
    captured: Option<(u32, PointerId)>,
    capture_log: Vec<CaptureOp>,
    events: Vec<(u32, DragEvent<u32>)>,
    /// When `true`, the next capture acquisition fails with [`CaptureError`].
    pub fail_capture: bool,
}

impl RefHost {
    /// An empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a node whose layout size equals its rendered rect (unscaled).
    pub fn insert_node(&mut self, node: u32, rect: Rect) {
        self.insert_scaled(node, rect, rect.size());
    }

    /// Seed a node with distinct rendered rect and layout size, for
    /// inverse-scale coverage.
    pub fn insert_scaled(&mut self, node: u32, rect: Rect, layout: Size) {
        self.nodes.insert(
            node,
            NodeState {
                rect,
                layout,
                ..NodeState::default()
            },
        );
    }

    /// Pre-set the document-level user-select value.
    pub fn seed_user_select(&mut self, value: Option<&str>) {
        self.user_select = value.map(str::to_owned);
    }

    /// Classes currently on the node, in application order.
    #[must_use]
    pub fn classes_of(&self, node: u32) -> &[String] {
        self.nodes.get(&node).map_or(&[], |n| &n.classes)
    }

    /// `true` when the node carries the class.
    #[must_use]
    pub fn has_class(&self, node: u32, class: &str) -> bool {
        self.classes_of(node).iter().any(|c| c == class)
    }

    /// Current value of an attribute on the node.
    #[must_use]
    pub fn attr(&self, node: u32, name: &str) -> Option<&str> {
        self.nodes
            .get(&node)?
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The last translate applied to the node, if any.
    #[must_use]
    pub fn translate_of(&self, node: u32) -> Option<Vec2> {
        self.nodes.get(&node)?.translate
    }

    /// Current capture holder, if any.
    #[must_use]
    pub fn captured(&self) -> Option<(u32, PointerId)> {
        self.captured
    }

    /// Complete acquire/release history.
    #[must_use]
    pub fn capture_log(&self) -> &[CaptureOp] {
        &self.capture_log
    }

    /// Every notification emitted on a node, in order.
    #[must_use]
    pub fn events(&self) -> &[(u32, DragEvent<u32>)] {
        &self.events
    }

    /// Forget recorded events, keeping node state.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl DragHost for RefHost {
    type Node = u32;

    fn measure(&self, node: u32) -> Rect {
        self.nodes.get(&node).map_or(Rect::ZERO, |n| {
            n.rect + n.translate.unwrap_or(Vec2::ZERO)
        })
    }

    fn layout_size(&self, node: u32) -> Size {
        self.nodes.get(&node).map_or(Size::ZERO, |n| n.layout)
    }

    fn set_translate(&mut self, node: u32, offset: Vec2) {
        if let Some(state) = self.nodes.get_mut(&node) {
            state.translate = Some(offset);
        }
    }

    fn add_class(&mut self, node: u32, class: &str) {
        if let Some(state) = self.nodes.get_mut(&node) {
            if !state.classes.iter().any(|c| c == class) {
                state.classes.push(class.to_owned());
            }
        }
    }

    fn remove_class(&mut self, node: u32, class: &str) {
        if let Some(state) = self.nodes.get_mut(&node) {
            state.classes.retain(|c| c != class);
        }
    }

    fn set_attribute(&mut self, node: u32, name: &str, value: &str) {
        if let Some(state) = self.nodes.get_mut(&node) {
            match state.attrs.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => *v = value.to_owned(),
                None => state.attrs.push((name.to_owned(), value.to_owned())),
            }
        }
    }

    fn remove_attribute(&mut self, node: u32, name: &str) {
        if let Some(state) = self.nodes.get_mut(&node) {
            state.attrs.retain(|(n, _)| n != name);
        }
    }

    fn set_pointer_capture(&mut self, node: u32, pointer: PointerId) -> Result<(), CaptureError> {
        if self.fail_capture {
            return Err(CaptureError { pointer });
        }
        self.captured = Some((node, pointer));
        self.capture_log.push(CaptureOp::Acquire(node, pointer));
        Ok(())
    }

    fn release_pointer_capture(&mut self, node: u32, pointer: PointerId) {
        if self.captured == Some((node, pointer)) {
            self.captured = None;
        }
        self.capture_log.push(CaptureOp::Release(node, pointer));
    }

    fn user_select(&self) -> Option<String> {
        self.user_select.clone()
    }

    fn set_user_select(&mut self, value: Option<&str>) {
        self.user_select = value.map(str::to_owned);
    }

    fn emit(&mut self, node: u32, event: &DragEvent<u32>) {
        self.events.push((node, *event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_are_deduplicated_and_removable() {
        let mut host = RefHost::new();
        host.insert_node(1, Rect::new(0.0, 0.0, 10.0, 10.0));
        host.add_class(1, "towline");
        host.add_class(1, "towline");
        assert_eq!(host.classes_of(1).len(), 1);
        host.remove_class(1, "towline");
        assert!(!host.has_class(1, "towline"));
    }

    #[test]
    fn attributes_overwrite_in_place() {
        let mut host = RefHost::new();
        host.insert_node(1, Rect::new(0.0, 0.0, 10.0, 10.0));
        host.set_attribute(1, "data-towline-state", "idle");
        host.set_attribute(1, "data-towline-state", "dragging");
        assert_eq!(host.attr(1, "data-towline-state"), Some("dragging"));
        host.remove_attribute(1, "data-towline-state");
        assert_eq!(host.attr(1, "data-towline-state"), None);
    }

    #[test]
    fn capture_can_be_forced_to_fail() {
        let mut host = RefHost::new();
        host.fail_capture = true;
        assert!(host.set_pointer_capture(1, PointerId(2)).is_err());
        assert_eq!(host.captured(), None);
    }

    #[test]
    fn release_only_clears_the_matching_holder() {
        let mut host = RefHost::new();
        host.set_pointer_capture(1, PointerId(2)).unwrap();
        host.release_pointer_capture(3, PointerId(2));
        assert_eq!(host.captured(), Some((1, PointerId(2))));
        host.release_pointer_capture(1, PointerId(2));
        assert_eq!(host.captured(), None);
    }

    #[test]
    fn unknown_nodes_measure_as_zero() {
        let host = RefHost::new();
        assert_eq!(host.measure(99), Rect::ZERO);
        assert_eq!(host.layout_size(99), Size::ZERO);
    }
}
