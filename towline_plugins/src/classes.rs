// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class toggling: mark the managed, dragging, and has-dragged states.

use alloc::string::String;

use towline_protocol::fingerprint::fingerprint_of;
use towline_protocol::{DragContext, DragHost, DragPlugin, EffectQueue, HookError, Outcome};

/// Class present on every managed node.
pub const MANAGED_CLASS: &str = "towline";
/// Class present while an interaction is in the dragging state.
pub const DRAGGING_CLASS: &str = "towline-dragging";
/// Class added once the node has completed at least one interaction.
pub const DRAGGED_CLASS: &str = "towline-dragged";

/// Toggles state classes on the managed node.
///
/// - `setup`: adds the persistent managed class.
/// - `drag_start`: adds the dragging class.
/// - `drag_end`: removes the dragging class and adds the has-dragged marker.
/// - `cleanup`: removes all three.
///
/// All writes go through the effect queue, so a vetoed start never flashes
/// the dragging class.
#[derive(Clone, Debug)]
pub struct Classes {
    managed: String,
    dragging: String,
    dragged: String,
}

impl Classes {
    /// The default class names.
    #[must_use]
    pub fn new() -> Self {
        Self::with_names(MANAGED_CLASS, DRAGGING_CLASS, DRAGGED_CLASS)
    }

    /// Custom class names, in managed/dragging/dragged order.
    #[must_use]
    pub fn with_names(
        managed: impl Into<String>,
        dragging: impl Into<String>,
        dragged: impl Into<String>,
    ) -> Self {
        Self {
            managed: managed.into(),
            dragging: dragging.into(),
            dragged: dragged.into(),
        }
    }
}

impl Default for Classes {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: DragHost> DragPlugin<H> for Classes {
    fn name(&self) -> &'static str {
        "classes"
    }

    fn live_update(&self) -> bool {
        true
    }

    fn fingerprint(&self) -> u64 {
        fingerprint_of(&(&self.managed, &self.dragging, &self.dragged))
    }

    fn setup(
        &mut self,
        cx: &mut DragContext<H::Node>,
        _host: &H,
        fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        let node = cx.root_node;
        let class = self.managed.clone();
        fx.defer(move |host| host.add_class(node, &class));
        Ok(Outcome::Continue)
    }

    fn drag_start(
        &mut self,
        cx: &mut DragContext<H::Node>,
        _host: &H,
        fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        let node = cx.root_node;
        let class = self.dragging.clone();
        fx.defer(move |host| host.add_class(node, &class));
        Ok(Outcome::Continue)
    }

    fn drag_end(
        &mut self,
        cx: &mut DragContext<H::Node>,
        _host: &H,
        fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        let node = cx.root_node;
        let dragging = self.dragging.clone();
        let dragged = self.dragged.clone();
        fx.defer(move |host| {
            host.remove_class(node, &dragging);
            host.add_class(node, &dragged);
        });
        Ok(Outcome::Continue)
    }

    fn cleanup(
        &mut self,
        cx: &mut DragContext<H::Node>,
        _host: &H,
        fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        let node = cx.root_node;
        let managed = self.managed.clone();
        let dragging = self.dragging.clone();
        let dragged = self.dragged.clone();
        fx.defer(move |host| {
            host.remove_class(node, &managed);
            host.remove_class(node, &dragging);
            host.remove_class(node, &dragged);
        });
        Ok(Outcome::Continue)
    }
}
