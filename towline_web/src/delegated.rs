// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy delegated listener wiring.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Point;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, EventTarget, PointerEvent};

use towline_delegate::DelegatedDrags;
use towline_engine::DragOptions;
use towline_protocol::{DragPlugin, PointerButton, PointerId, PointerInput};

use crate::NodeId;
use crate::host::WebHost;

struct Inner {
    host: WebHost,
    drags: DelegatedDrags<WebHost>,
}

struct Listeners {
    down: Closure<dyn FnMut(PointerEvent)>,
    moved: Closure<dyn FnMut(PointerEvent)>,
    up: Closure<dyn FnMut(PointerEvent)>,
    cancel: Closure<dyn FnMut(PointerEvent)>,
}

/// One delegated listener set over a registry of managed elements.
///
/// Listeners install lazily on the first [`attach`](Self::attach) and come
/// off on drop. Presses resolve their propagation path by walking registered
/// ancestors from the event target; moves and releases go straight to the
/// active node, mirroring pointer capture.
pub struct WebDrags {
    inner: Rc<RefCell<Inner>>,
    root: EventTarget,
    listeners: Option<Listeners>,
}

impl core::fmt::Debug for WebDrags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebDrags")
            .field("installed", &self.listeners.is_some())
            .finish_non_exhaustive()
    }
}

impl WebDrags {
    /// A manager delegating from `document.body`. `None` outside a browsing
    /// context.
    #[must_use]
    pub fn new() -> Option<Self> {
        let host = WebHost::new()?;
        let body = web_sys::window()?.document()?.body()?;
        Some(Self::with_root(host, body.into()))
    }

    /// A manager delegating from an explicit ancestor.
    #[must_use]
    pub fn with_root(host: WebHost, root: EventTarget) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                host,
                drags: DelegatedDrags::new(),
            })),
            root,
            listeners: None,
        }
    }

    /// Manage `element`. Installs the delegated listeners if this is the
    /// first attach. Returns the element's handle.
    pub fn attach(
        &mut self,
        element: &Element,
        plugins: Vec<Box<dyn DragPlugin<WebHost>>>,
        options: DragOptions<NodeId>,
    ) -> NodeId {
        self.ensure_listeners();
        let inner = &mut *self.inner.borrow_mut();
        let node = inner.host.register(element);
        inner.drags.attach(&mut inner.host, node, plugins, options);
        node
    }

    /// Intern a non-managed element (a drag handle or cancel zone) so it can
    /// appear in press paths and be referenced by control-region plugins.
    pub fn register_region(&mut self, element: &Element) -> NodeId {
        self.inner.borrow_mut().host.register(element)
    }

    /// Reconcile a managed element's plugin list, honoring live-update
    /// eligibility mid-drag.
    pub fn update(&mut self, node: NodeId, plugins: Vec<Box<dyn DragPlugin<WebHost>>>) -> bool {
        let inner = &mut *self.inner.borrow_mut();
        inner.drags.update(&mut inner.host, node, plugins)
    }

    /// Destroy a managed element's instance and drop its registration.
    pub fn destroy(&mut self, node: NodeId) -> bool {
        let inner = &mut *self.inner.borrow_mut();
        let destroyed = inner.drags.destroy(&mut inner.host, node);
        inner.host.unregister(node);
        destroyed
    }

    fn ensure_listeners(&mut self) {
        if self.listeners.is_some() {
            return;
        }

        let down = {
            let inner = Rc::clone(&self.inner);
            Closure::new(move |event: PointerEvent| {
                let Some(target) = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                else {
                    return;
                };
                let inner = &mut *inner.borrow_mut();
                let path = inner.host.path_to(&target);
                if path.is_empty() {
                    return;
                }
                inner
                    .drags
                    .pointer_down(&mut inner.host, &path, input_from(&event));
            })
        };
        let moved = {
            let inner = Rc::clone(&self.inner);
            Closure::new(move |event: PointerEvent| {
                let inner = &mut *inner.borrow_mut();
                inner.drags.pointer_move(&mut inner.host, input_from(&event));
            })
        };
        let up = {
            let inner = Rc::clone(&self.inner);
            Closure::new(move |event: PointerEvent| {
                let inner = &mut *inner.borrow_mut();
                inner.drags.pointer_up(&mut inner.host, input_from(&event));
            })
        };
        let cancel = {
            let inner = Rc::clone(&self.inner);
            Closure::new(move |_event: PointerEvent| {
                let inner = &mut *inner.borrow_mut();
                inner.drags.cancel_active(&mut inner.host);
            })
        };

        let _ = self
            .root
            .add_event_listener_with_callback("pointerdown", down.as_ref().unchecked_ref());
        let _ = self
            .root
            .add_event_listener_with_callback("pointermove", moved.as_ref().unchecked_ref());
        let _ = self
            .root
            .add_event_listener_with_callback("pointerup", up.as_ref().unchecked_ref());
        let _ = self
            .root
            .add_event_listener_with_callback("pointercancel", cancel.as_ref().unchecked_ref());

        self.listeners = Some(Listeners {
            down,
            moved,
            up,
            cancel,
        });
    }
}

impl Drop for WebDrags {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.take() {
            let _ = self.root.remove_event_listener_with_callback(
                "pointerdown",
                listeners.down.as_ref().unchecked_ref(),
            );
            let _ = self.root.remove_event_listener_with_callback(
                "pointermove",
                listeners.moved.as_ref().unchecked_ref(),
            );
            let _ = self.root.remove_event_listener_with_callback(
                "pointerup",
                listeners.up.as_ref().unchecked_ref(),
            );
            let _ = self.root.remove_event_listener_with_callback(
                "pointercancel",
                listeners.cancel.as_ref().unchecked_ref(),
            );
        }
    }
}

fn input_from(event: &PointerEvent) -> PointerInput {
    let button = match event.button() {
        // Moves report -1; treat them as primary so they are never dropped.
        -1 | 0 => PointerButton::Primary,
        1 => PointerButton::Auxiliary,
        2 => PointerButton::Secondary,
        _ => PointerButton::Other,
    };
    PointerInput {
        position: Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
        button,
        pointer: PointerId(event.pointer_id()),
        timestamp: timestamp_ms(event.time_stamp()),
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "DOM timestamps are positive millisecond counts well inside u64 range."
)]
fn timestamp_ms(raw: f64) -> u64 {
    if raw.is_finite() && raw > 0.0 { raw as u64 } else { 0 }
}
