// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `DragHost` over interned `web_sys::Element`s.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Rect, Size, Vec2};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use towline_protocol::{CaptureError, DragEvent, DragEventKind, DragHost, PointerId};

use crate::NodeId;

/// Bubbling events dispatched on the managed element, in
/// start/drag/end order.
pub const EVENT_NAMES: [&str; 3] = ["towline:dragstart", "towline:drag", "towline:dragend"];

/// A [`DragHost`] whose nodes are DOM elements interned behind [`NodeId`]s.
pub struct WebHost {
    document: Document,
    nodes: HashMap<NodeId, Element>,
    next: u32,
}

impl core::fmt::Debug for WebHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebHost")
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

impl WebHost {
    /// A host over the current window's document. `None` outside a browsing
    /// context.
    #[must_use]
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::with_document(document))
    }

    /// A host over an explicit document.
    #[must_use]
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            nodes: HashMap::new(),
            next: 0,
        }
    }

    /// Intern `element`, returning its handle. Re-registering an element
    /// returns the existing handle.
    pub fn register(&mut self, element: &Element) -> NodeId {
        if let Some(id) = self.id_of(element) {
            return id;
        }
        let id = NodeId(self.next);
        self.next += 1;
        self.nodes.insert(id, element.clone());
        id
    }

    /// Drop the handle's association, letting the element go.
    pub fn unregister(&mut self, node: NodeId) {
        self.nodes.remove(&node);
    }

    /// The handle for an already-registered element.
    #[must_use]
    pub fn id_of(&self, element: &Element) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, candidate)| *candidate == element)
            .map(|(id, _)| *id)
    }

    /// The element behind a handle.
    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(&node)
    }

    /// Root→target path of *registered* ancestors of `target`, inclusive.
    /// Unregistered intermediate elements do not appear; an empty result
    /// means no managed ancestor exists.
    #[must_use]
    pub fn path_to(&self, target: &Element) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(target.clone());
        while let Some(element) = current {
            if let Some(id) = self.id_of(&element) {
                path.push(id);
            }
            current = element.parent_element();
        }
        path.reverse();
        path
    }

    fn html(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node)?.dyn_ref::<HtmlElement>().cloned()
    }
}

impl DragHost for WebHost {
    type Node = NodeId;

    fn measure(&self, node: NodeId) -> Rect {
        self.element(node).map_or(Rect::ZERO, |element| {
            let rect = element.get_bounding_client_rect();
            Rect::new(
                rect.x(),
                rect.y(),
                rect.x() + rect.width(),
                rect.y() + rect.height(),
            )
        })
    }

    fn layout_size(&self, node: NodeId) -> Size {
        match self.html(node) {
            Some(element) => Size::new(
                f64::from(element.offset_width()),
                f64::from(element.offset_height()),
            ),
            None => self.measure(node).size(),
        }
    }

    fn set_translate(&mut self, node: NodeId, offset: Vec2) {
        if let Some(element) = self.html(node) {
            let _ = element.style().set_property(
                "transform",
                &format!("translate3d({}px, {}px, 0)", offset.x, offset.y),
            );
        }
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().remove_1(class);
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.set_attribute(name, value);
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.remove_attribute(name);
        }
    }

    fn set_pointer_capture(&mut self, node: NodeId, pointer: PointerId) -> Result<(), CaptureError> {
        let Some(element) = self.element(node) else {
            return Err(CaptureError { pointer });
        };
        element
            .set_pointer_capture(pointer.0)
            .map_err(|_| CaptureError { pointer })
    }

    fn release_pointer_capture(&mut self, node: NodeId, pointer: PointerId) {
        if let Some(element) = self.element(node) {
            let _ = element.release_pointer_capture(pointer.0);
        }
    }

    fn user_select(&self) -> Option<String> {
        let body = self.document.body()?;
        let value = body.style().get_property_value("user-select").ok()?;
        if value.is_empty() { None } else { Some(value) }
    }

    fn set_user_select(&mut self, value: Option<&str>) {
        let Some(body) = self.document.body() else {
            return;
        };
        match value {
            Some(value) => {
                let _ = body.style().set_property("user-select", value);
            }
            None => {
                let _ = body.style().remove_property("user-select");
            }
        }
    }

    fn emit(&mut self, node: NodeId, event: &DragEvent<NodeId>) {
        let Some(element) = self.element(node) else {
            return;
        };
        let name = match event.kind {
            DragEventKind::Start => EVENT_NAMES[0],
            DragEventKind::Drag => EVENT_NAMES[1],
            DragEventKind::End => EVENT_NAMES[2],
        };
        let detail = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&detail, &"offsetX".into(), &event.offset.x.into());
        let _ = js_sys::Reflect::set(&detail, &"offsetY".into(), &event.offset.y.into());
        let init = web_sys::CustomEventInit::new();
        init.set_bubbles(true);
        init.set_detail(&detail);
        if let Ok(custom) = web_sys::CustomEvent::new_with_event_init_dict(name, &init) {
            let _ = element.dispatch_event(&custom);
        }
    }
}
