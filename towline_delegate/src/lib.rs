// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Towline Delegate: many managed nodes behind one listener set.
//!
//! ## Overview
//!
//! Installing per-node listeners does not scale; the delegated manager keeps
//! a single registry of [`DragInstance`]s and fans pointer events out to the
//! right one. The embedding installs exactly one set of document-level
//! listeners (see `towline_web` for the `web-sys` wiring), resolves each
//! event's root→target propagation path, and hands it here.
//!
//! ## Routing
//!
//! - **Press**: the path is walked from the target outward; the *nearest*
//!   managed ancestor receives the press, along with the sub-path from
//!   itself down to the target. Paths with no managed ancestor are ignored.
//! - **Move/release**: routed to the single *active* node — the one whose
//!   press started an interaction — regardless of where the pointer sits in
//!   the tree now, mirroring pointer-capture semantics. At most one node is
//!   active at a time; presses arriving while one is active are delivered to
//!   it (so multitouch policies can see them), never to a second node.
//!
//! Instances can be attached, updated (including live plugin replacement
//! mid-drag), and destroyed dynamically; destroying the active node ends its
//! interaction first.
//!
//! The registry does not extend node lifetimes — handles are small copyable
//! values — so on this target "weak association" means: drop an entry with
//! [`DelegatedDrags::destroy`], or it stays until the manager itself goes
//! away. Skipping `destroy` leaks the instance.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use towline_engine::{DragInstance, DragOptions};
use towline_protocol::{DragHost, DragPlugin, PointerInput};

/// Registry of per-node drag instances with delegated event fan-out.
pub struct DelegatedDrags<H: DragHost> {
    instances: HashMap<H::Node, DragInstance<H>>,
    active: Option<H::Node>,
}

impl<H: DragHost> DelegatedDrags<H> {
    /// An empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
            active: None,
        }
    }

    /// Number of managed nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// `true` when no nodes are managed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// `true` when `node` is managed.
    #[must_use]
    pub fn is_managed(&self, node: H::Node) -> bool {
        self.instances.contains_key(&node)
    }

    /// The node currently interacting, if any.
    #[must_use]
    pub fn active(&self) -> Option<H::Node> {
        self.active
    }

    /// Borrow the instance managing `node`.
    #[must_use]
    pub fn instance(&self, node: H::Node) -> Option<&DragInstance<H>> {
        self.instances.get(&node)
    }

    /// Attach a new instance for `node`. Returns `false` (and does nothing)
    /// when the node is already managed; use [`update`](Self::update) to
    /// change a live instance's plugins.
    pub fn attach(
        &mut self,
        host: &mut H,
        node: H::Node,
        plugins: Vec<Box<dyn DragPlugin<H>>>,
        options: DragOptions<H::Node>,
    ) -> bool {
        if self.instances.contains_key(&node) {
            return false;
        }
        let instance = DragInstance::attach(node, plugins, options, host);
        self.instances.insert(node, instance);
        true
    }

    /// Reconcile `node`'s plugin list. Returns `false` for unmanaged nodes.
    pub fn update(
        &mut self,
        host: &mut H,
        node: H::Node,
        plugins: Vec<Box<dyn DragPlugin<H>>>,
    ) -> bool {
        match self.instances.get_mut(&node) {
            Some(instance) => {
                instance.update(plugins, host);
                true
            }
            None => false,
        }
    }

    /// Destroy `node`'s instance, ending its interaction if it is the active
    /// one. Returns `false` for unmanaged nodes.
    pub fn destroy(&mut self, host: &mut H, node: H::Node) -> bool {
        match self.instances.remove(&node) {
            Some(instance) => {
                if self.active == Some(node) {
                    self.active = None;
                }
                instance.destroy(host);
                true
            }
            None => false,
        }
    }

    /// Destroy every instance.
    pub fn destroy_all(&mut self, host: &mut H) {
        self.active = None;
        for (_, instance) in self.instances.drain() {
            instance.destroy(host);
        }
    }

    /// Route a pointer press along its root→target propagation path.
    ///
    /// Returns the node that received the press, or `None` when no managed
    /// ancestor exists on the path.
    pub fn pointer_down(
        &mut self,
        host: &mut H,
        path: &[H::Node],
        input: PointerInput,
    ) -> Option<H::Node> {
        // An in-flight interaction owns every event until it ends.
        if let Some(active) = self.active {
            if let Some(instance) = self.instances.get_mut(&active) {
                instance.pointer_down(host, path, input);
                self.sync_active(active);
            }
            return Some(active);
        }

        // Nearest managed ancestor: walk from the target outward.
        let position = path
            .iter()
            .rposition(|node| self.instances.contains_key(node))?;
        let node = path[position];
        let instance = self.instances.get_mut(&node)?;
        instance.pointer_down(host, &path[position..], input);
        if instance.is_interacting() {
            self.active = Some(node);
        }
        Some(node)
    }

    /// Route a pointer move to the active node, if any.
    pub fn pointer_move(&mut self, host: &mut H, input: PointerInput) {
        if let Some(active) = self.active {
            if let Some(instance) = self.instances.get_mut(&active) {
                instance.pointer_move(host, input);
            }
            self.sync_active(active);
        }
    }

    /// Route a pointer release to the active node, if any.
    pub fn pointer_up(&mut self, host: &mut H, input: PointerInput) {
        if let Some(active) = self.active {
            if let Some(instance) = self.instances.get_mut(&active) {
                instance.pointer_up(host, input);
            }
            self.sync_active(active);
        }
    }

    /// Cancel the active interaction (for `pointercancel` and friends).
    pub fn cancel_active(&mut self, host: &mut H) {
        if let Some(active) = self.active {
            if let Some(instance) = self.instances.get_mut(&active) {
                instance.cancel(host);
            }
            self.active = None;
        }
    }

    fn sync_active(&mut self, node: H::Node) {
        let still_interacting = self
            .instances
            .get(&node)
            .is_some_and(DragInstance::is_interacting);
        if !still_interacting {
            self.active = None;
        }
    }
}

impl<H: DragHost> Default for DelegatedDrags<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: DragHost> fmt::Debug for DelegatedDrags<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegatedDrags")
            .field("instances", &self.instances.len())
            .field("active", &self.active)
            .finish()
    }
}
