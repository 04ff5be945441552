// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-node interaction engine.

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Vec2;

use towline_geometry::inverse_scale;
use towline_protocol::dispatcher::{dispatch_hook, run_phase, run_terminal_phase};
use towline_protocol::{
    DragContext, DragEvent, DragEventKind, DragHost, DragPlugin, EffectQueue, Fault, Phase,
    PhaseResult, PluginSet, PointerButton, PointerId, PointerInput, Proposed,
};

use crate::options::DragOptions;

/// Attribute marking a node as managed by an instance.
pub const MANAGED_ATTR: &str = "data-towline";
/// Attribute carrying the interaction status, [`STATE_IDLE`] or
/// [`STATE_DRAGGING`].
pub const STATE_ATTR: &str = "data-towline-state";
/// Status value outside the dragging state.
pub const STATE_IDLE: &str = "idle";
/// Status value while dragging.
pub const STATE_DRAGGING: &str = "dragging";

/// Plugin values queued while an interaction kept them from reconciling.
struct PendingUpdate<H: DragHost> {
    /// Incoming plugins that were not live-update eligible.
    rest: Vec<Box<dyn DragPlugin<H>>>,
    /// Every name present in the full incoming list; current plugins outside
    /// this set are removed once idle.
    retained: Vec<&'static str>,
}

/// One managed node: its context, resolved plugin set, and state machine.
///
/// The state machine per node is `idle → interacting → dragging → idle`.
/// Interacting begins at a qualifying pointer-down that survives the
/// `should_start` chain; dragging begins on the first move that satisfies the
/// configured thresholds and survives `drag_start`; pointer-up (or a
/// cancellation from `drag_start` onward) unconditionally ends the
/// interaction, with the terminal `drag_end` chain running first, always.
///
/// The engine owns the capture-transfer invariant: at most one node holds
/// pointer capture, and reassigning
/// [`currently_dragged_node`](DragContext::currently_dragged_node) releases
/// the old capture before acquiring the new one.
pub struct DragInstance<H: DragHost> {
    cx: DragContext<H::Node>,
    plugins: PluginSet<H>,
    fx: EffectQueue<H>,
    options: DragOptions<H::Node>,
    press_time: Option<u64>,
    last_move: Option<PointerInput>,
    pending: Option<PendingUpdate<H>>,
    capture: Option<(H::Node, PointerId)>,
    start_notified: bool,
}

impl<H: DragHost> core::fmt::Debug for DragInstance<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragInstance")
            .field("node", &self.cx.root_node)
            .field("offset", &self.cx.offset)
            .field("is_interacting", &self.cx.is_interacting)
            .field("is_dragging", &self.cx.is_dragging)
            .field("plugins", &self.plugins)
            .finish_non_exhaustive()
    }
}

/// Fault sink borrowing only the options, so it can run while the plugin set
/// and context are borrowed elsewhere.
fn fault_sink<N>(options: &mut DragOptions<N>) -> impl FnMut(Fault<N>) + '_ {
    move |fault| {
        if let Some(callback) = &mut options.on_fault {
            callback(fault);
        }
    }
}

impl<H: DragHost> DragInstance<H> {
    /// Register `node`, resolve and set up `plugins`, and mark the node
    /// managed.
    ///
    /// Setup runs per plugin with its own effect boundary: a failing plugin
    /// is reported through the fault callback and dropped, and the attach
    /// proceeds with the rest.
    pub fn attach(
        node: H::Node,
        plugins: Vec<Box<dyn DragPlugin<H>>>,
        options: DragOptions<H::Node>,
        host: &mut H,
    ) -> Self {
        let mut cx = DragContext::new(node);
        cx.offset = options.initial_offset;
        cx.start_offset = cx.offset;

        let mut instance = Self {
            cx,
            plugins: PluginSet::new(),
            fx: EffectQueue::new(),
            options,
            press_time: None,
            last_move: None,
            pending: None,
            capture: None,
            start_notified: false,
        };

        host.set_attribute(node, MANAGED_ATTR, "");
        host.set_attribute(node, STATE_ATTR, STATE_IDLE);
        instance.reconcile(plugins, &[], host);
        instance
    }

    /// The managed node.
    pub fn node(&self) -> H::Node {
        self.cx.root_node
    }

    /// The committed cumulative offset.
    pub fn offset(&self) -> Vec2 {
        self.cx.offset
    }

    /// `true` between a qualifying pointer-down and the interaction's end.
    pub fn is_interacting(&self) -> bool {
        self.cx.is_interacting
    }

    /// `true` while past the thresholds.
    pub fn is_dragging(&self) -> bool {
        self.cx.is_dragging
    }

    /// `true` when a plugin with `name` is currently installed.
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.contains(name)
    }

    /// Reconcile the plugin list against `plugins`.
    ///
    /// Idle: removed plugins get `cleanup`, changed identities get `cleanup`
    /// old + `setup` new, unchanged plugins (same name, priority, and
    /// fingerprint) are left untouched. Mid-interaction: only live-update
    /// eligible plugins reconcile now; the rest is stashed and applied when
    /// the interaction returns to idle, and if any live plugin changed, the
    /// most recent pointer move is replayed against the updated chain.
    pub fn update(&mut self, plugins: Vec<Box<dyn DragPlugin<H>>>, host: &mut H) {
        if !self.cx.is_interacting {
            self.reconcile(plugins, &[], host);
            return;
        }

        let retained: Vec<&'static str> = plugins.iter().map(|p| p.name()).collect();
        let mut live = Vec::new();
        let mut rest = Vec::new();
        for plugin in plugins {
            // Eligible only when both sides agree: the incoming value is
            // live-updatable and the installed one (if any) is too.
            let old_is_live = self
                .plugins
                .iter()
                .find(|p| p.name() == plugin.name())
                .is_none_or(|p| p.live_update());
            if plugin.live_update() && old_is_live {
                live.push(plugin);
            } else {
                rest.push(plugin);
            }
        }

        let changed = self.reconcile_live(live, &retained, host);
        self.pending = Some(PendingUpdate { rest, retained });

        if changed && let Some(sample) = self.last_move {
            self.pointer_move(host, sample);
        }
    }

    /// Run `cleanup` on every plugin, release engine-held resources, and
    /// unmark the node.
    pub fn destroy(mut self, host: &mut H) {
        if self.cx.is_interacting {
            self.end_interaction(host);
        }
        for mut plugin in self.plugins.drain() {
            Self::cleanup_one(
                &mut plugin,
                &mut self.cx,
                &mut self.fx,
                &mut self.options,
                host,
            );
        }
        self.release_capture(host);
        host.remove_attribute(self.cx.root_node, STATE_ATTR);
        host.remove_attribute(self.cx.root_node, MANAGED_ATTR);
    }

    /// Feed a pointer press. `path` is the root→target propagation path of
    /// the press within this node's subtree; an empty path stands for a press
    /// on the node itself.
    pub fn pointer_down(&mut self, host: &mut H, path: &[H::Node], input: PointerInput) {
        if self.cx.is_interacting {
            self.foreign_pointer(host, input.pointer);
            return;
        }
        if input.button != PointerButton::Primary {
            return;
        }

        let node = self.cx.root_node;
        let rect = host.measure(node);
        self.cx.cached_root_rect = rect;
        self.cx.inverse_scale = inverse_scale(host.layout_size(node).width, rect.width());
        self.cx.initial = input.position;
        self.cx.start_offset = self.cx.offset;
        self.cx.delta = Vec2::ZERO;
        self.cx.proposed.clear();
        self.cx.pointer = input.pointer;
        self.cx.press_path.clear();
        if path.is_empty() {
            self.cx.press_path.push(node);
        } else {
            self.cx.press_path.extend_from_slice(path);
        }

        let result = run_phase(
            Phase::ShouldStart,
            &mut self.plugins,
            &mut self.cx,
            &*host,
            &mut self.fx,
            fault_sink(&mut self.options),
        );
        if result != PhaseResult::Completed {
            // A vetoed (or cancelled) should-start never starts anything.
            self.fx.discard();
            self.cx.press_path.clear();
            return;
        }

        let target = self.cx.currently_dragged_node;
        if let Err(error) = host.set_pointer_capture(target, input.pointer) {
            self.fx.discard();
            fault_sink(&mut self.options)(Fault {
                phase: Phase::ShouldStart,
                plugin: None,
                node,
                error: Box::new(error),
            });
            self.reset_to_idle(host);
            return;
        }
        self.capture = Some((target, input.pointer));

        self.cx.is_interacting = true;
        self.cx.active_pointers.clear();
        self.cx.active_pointers.push(input.pointer);
        self.press_time = Some(input.timestamp);
        self.fx.flush(host);
    }

    /// Feed a pointer move.
    pub fn pointer_move(&mut self, host: &mut H, input: PointerInput) {
        if !self.cx.is_interacting {
            return;
        }
        if self.cx.active_pointers.first() != Some(&input.pointer) {
            self.foreign_pointer(host, input.pointer);
            return;
        }

        self.last_move = Some(input);
        self.cx.pointer = input.pointer;
        self.cx.delta = (input.position - self.cx.initial) * self.cx.inverse_scale;

        if !self.cx.is_dragging {
            if !self.thresholds_met(input.timestamp) {
                return;
            }
            let result = run_phase(
                Phase::DragStart,
                &mut self.plugins,
                &mut self.cx,
                &*host,
                &mut self.fx,
                fault_sink(&mut self.options),
            );
            match result {
                PhaseResult::Vetoed => {
                    // Stay interacting; a later move may start cleanly.
                    self.fx.discard();
                    return;
                }
                PhaseResult::Cancelled => {
                    self.fx.discard();
                    self.end_interaction(host);
                    return;
                }
                PhaseResult::Completed => {
                    self.cx.is_dragging = true;
                    host.set_attribute(self.cx.root_node, STATE_ATTR, STATE_DRAGGING);
                    self.fx.flush(host);
                    self.apply_capture_transfer(host);
                }
            }
        }

        // The first committed move doubles as the visual catch-up for the
        // move that crossed the thresholds.
        self.run_drag_chain(host);
    }

    /// Feed a pointer release.
    pub fn pointer_up(&mut self, host: &mut H, input: PointerInput) {
        if !self.cx.is_interacting {
            return;
        }
        if self.cx.active_pointers.first() != Some(&input.pointer) {
            self.cx.active_pointers.retain(|p| *p != input.pointer);
            return;
        }
        self.cx.pointer = input.pointer;
        self.end_interaction(host);
    }

    /// Explicitly cancel any in-flight interaction (for `pointercancel` and
    /// friends).
    pub fn cancel(&mut self, host: &mut H) {
        if self.cx.is_interacting {
            self.end_interaction(host);
        }
    }

    // ---------------------------------------------------------------------
    // Internals

    fn thresholds_met(&self, now: u64) -> bool {
        let threshold = self.options.threshold;
        let elapsed = self
            .press_time
            .map_or(0, |start| now.saturating_sub(start));
        elapsed >= threshold.delay && self.cx.delta.hypot() >= threshold.distance
    }

    /// Run the drag chain for the current delta and commit on success.
    fn run_drag_chain(&mut self, host: &mut H) {
        let target = self.cx.start_offset + self.cx.delta;
        let step = target - self.cx.offset;
        self.cx.proposed = Proposed::new(step.x, step.y);

        let result = run_phase(
            Phase::Drag,
            &mut self.plugins,
            &mut self.cx,
            &*host,
            &mut self.fx,
            fault_sink(&mut self.options),
        );
        match result {
            PhaseResult::Completed => {
                self.cx.offset += self.cx.proposed.resolve();
                self.cx.proposed.clear();
                self.fx.flush(host);
                self.apply_capture_transfer(host);
                if !self.start_notified {
                    self.start_notified = true;
                    self.notify(DragEventKind::Start, host);
                }
                self.notify(DragEventKind::Drag, host);
            }
            PhaseResult::Vetoed => self.fx.discard(),
            PhaseResult::Cancelled => {
                self.fx.discard();
                self.end_interaction(host);
            }
        }
    }

    /// An additional pointer pressed or moved while an interaction is live:
    /// record it and give the chain one synthetic, commit-free run so
    /// multitouch policies can react immediately.
    fn foreign_pointer(&mut self, host: &mut H, pointer: PointerId) {
        if !self.cx.active_pointers.contains(&pointer) {
            self.cx.active_pointers.push(pointer);
        }
        self.cx.pointer = pointer;
        self.cx.proposed.clear();

        let result = run_phase(
            Phase::Drag,
            &mut self.plugins,
            &mut self.cx,
            &*host,
            &mut self.fx,
            fault_sink(&mut self.options),
        );
        match result {
            PhaseResult::Completed => self.fx.flush(host),
            PhaseResult::Vetoed => self.fx.discard(),
            PhaseResult::Cancelled => {
                self.fx.discard();
                self.end_interaction(host);
            }
        }
        self.cx.proposed.clear();
    }

    /// Wind an interaction down: terminal drag-end chain, engine-owned
    /// resets, end notification, pending plugin reconciliation.
    fn end_interaction(&mut self, host: &mut H) {
        run_terminal_phase(
            Phase::DragEnd,
            &mut self.plugins,
            &mut self.cx,
            &*host,
            &mut self.fx,
            fault_sink(&mut self.options),
        );
        self.fx.flush(host);

        host.set_attribute(self.cx.root_node, STATE_ATTR, STATE_IDLE);
        self.release_capture(host);
        if self.start_notified {
            self.notify(DragEventKind::End, host);
        }

        self.cx.reset_interaction();
        self.press_time = None;
        self.last_move = None;
        self.start_notified = false;
        self.apply_pending(host);
    }

    fn reset_to_idle(&mut self, host: &mut H) {
        self.release_capture(host);
        host.set_attribute(self.cx.root_node, STATE_ATTR, STATE_IDLE);
        self.cx.reset_interaction();
        self.press_time = None;
        self.last_move = None;
        self.start_notified = false;
    }

    /// Honor a `currently_dragged_node` reassignment: release the old
    /// capture, acquire the new one, atomically from the plugins' point of
    /// view. Acquisition failure resets the interaction.
    fn apply_capture_transfer(&mut self, host: &mut H) {
        let desired = self.cx.currently_dragged_node;
        let Some((held, pointer)) = self.capture else {
            return;
        };
        if held == desired {
            return;
        }
        host.release_pointer_capture(held, pointer);
        match host.set_pointer_capture(desired, pointer) {
            Ok(()) => self.capture = Some((desired, pointer)),
            Err(error) => {
                self.capture = None;
                let node = self.cx.root_node;
                fault_sink(&mut self.options)(Fault {
                    phase: Phase::Drag,
                    plugin: None,
                    node,
                    error: Box::new(error),
                });
                self.end_interaction(host);
            }
        }
    }

    fn release_capture(&mut self, host: &mut H) {
        if let Some((node, pointer)) = self.capture.take() {
            host.release_pointer_capture(node, pointer);
        }
    }

    fn notify(&mut self, kind: DragEventKind, host: &mut H) {
        let event = DragEvent {
            kind,
            offset: self.cx.offset,
            root_node: self.cx.root_node,
            current_node: self.cx.currently_dragged_node,
        };
        host.emit(self.cx.root_node, &event);
        let callback = match kind {
            DragEventKind::Start => &mut self.options.on_drag_start,
            DragEventKind::Drag => &mut self.options.on_drag,
            DragEventKind::End => &mut self.options.on_drag_end,
        };
        if let Some(callback) = callback {
            callback(&event);
        }
    }

    // ---------------------------------------------------------------------
    // Reconciliation

    fn setup_one(
        plugin: &mut Box<dyn DragPlugin<H>>,
        cx: &mut DragContext<H::Node>,
        fx: &mut EffectQueue<H>,
        options: &mut DragOptions<H::Node>,
        host: &mut H,
    ) -> bool {
        match dispatch_hook(plugin.as_mut(), Phase::Setup, cx, &*host, fx) {
            Ok(_) => {
                fx.flush(host);
                true
            }
            Err(error) => {
                fx.discard();
                let node = cx.root_node;
                fault_sink(options)(Fault {
                    phase: Phase::Setup,
                    plugin: Some(plugin.name()),
                    node,
                    error,
                });
                false
            }
        }
    }

    fn cleanup_one(
        plugin: &mut Box<dyn DragPlugin<H>>,
        cx: &mut DragContext<H::Node>,
        fx: &mut EffectQueue<H>,
        options: &mut DragOptions<H::Node>,
        host: &mut H,
    ) {
        match dispatch_hook(plugin.as_mut(), Phase::Cleanup, cx, &*host, fx) {
            Ok(_) => fx.flush(host),
            Err(error) => {
                fx.discard();
                let node = cx.root_node;
                fault_sink(options)(Fault {
                    phase: Phase::Cleanup,
                    plugin: Some(plugin.name()),
                    node,
                    error,
                });
            }
        }
    }

    fn identical(old: &dyn DragPlugin<H>, new: &dyn DragPlugin<H>) -> bool {
        old.priority() == new.priority() && old.fingerprint() == new.fingerprint()
    }

    /// Full reconciliation against `incoming`. Old plugins whose name is in
    /// `extra_keep` but absent from `incoming` survive untouched; everything
    /// else absent from `incoming` is cleaned up.
    fn reconcile(
        &mut self,
        incoming: Vec<Box<dyn DragPlugin<H>>>,
        extra_keep: &[&'static str],
        host: &mut H,
    ) {
        let incoming = PluginSet::resolve(incoming).drain();

        let mut slots: Vec<Option<Box<dyn DragPlugin<H>>>> =
            self.plugins.drain().into_iter().map(Some).collect();
        let mut by_name: HashMap<&'static str, usize> = HashMap::with_capacity(slots.len());
        for (index, slot) in slots.iter().enumerate() {
            if let Some(plugin) = slot {
                by_name.insert(plugin.name(), index);
            }
        }

        let mut final_list: Vec<Box<dyn DragPlugin<H>>> = Vec::with_capacity(incoming.len());
        for mut plugin in incoming {
            let old = by_name
                .get(plugin.name())
                .and_then(|&index| slots[index].take());
            match old {
                Some(old_plugin) if Self::identical(old_plugin.as_ref(), plugin.as_ref()) => {
                    final_list.push(old_plugin);
                }
                Some(mut old_plugin) => {
                    Self::cleanup_one(
                        &mut old_plugin,
                        &mut self.cx,
                        &mut self.fx,
                        &mut self.options,
                        host,
                    );
                    if Self::setup_one(
                        &mut plugin,
                        &mut self.cx,
                        &mut self.fx,
                        &mut self.options,
                        host,
                    ) {
                        final_list.push(plugin);
                    }
                }
                None => {
                    if Self::setup_one(
                        &mut plugin,
                        &mut self.cx,
                        &mut self.fx,
                        &mut self.options,
                        host,
                    ) {
                        final_list.push(plugin);
                    }
                }
            }
        }

        for slot in &mut slots {
            if let Some(mut plugin) = slot.take() {
                if extra_keep.contains(&plugin.name()) {
                    final_list.push(plugin);
                } else {
                    Self::cleanup_one(
                        &mut plugin,
                        &mut self.cx,
                        &mut self.fx,
                        &mut self.options,
                        host,
                    );
                }
            }
        }

        self.plugins = PluginSet::resolve(final_list);
    }

    /// Mid-interaction reconciliation of live-update eligible plugins only.
    /// Returns whether anything actually changed.
    fn reconcile_live(
        &mut self,
        live: Vec<Box<dyn DragPlugin<H>>>,
        retained: &[&'static str],
        host: &mut H,
    ) -> bool {
        let live = PluginSet::resolve(live).drain();

        let mut slots: Vec<Option<Box<dyn DragPlugin<H>>>> =
            self.plugins.drain().into_iter().map(Some).collect();
        let mut by_name: HashMap<&'static str, usize> = HashMap::with_capacity(slots.len());
        for (index, slot) in slots.iter().enumerate() {
            if let Some(plugin) = slot {
                by_name.insert(plugin.name(), index);
            }
        }

        let mut changed = false;
        let mut final_list: Vec<Box<dyn DragPlugin<H>>> = Vec::with_capacity(slots.len());

        for mut plugin in live {
            let old = by_name
                .get(plugin.name())
                .and_then(|&index| slots[index].take());
            match old {
                Some(old_plugin) if Self::identical(old_plugin.as_ref(), plugin.as_ref()) => {
                    final_list.push(old_plugin);
                }
                Some(mut old_plugin) => {
                    changed = true;
                    Self::cleanup_one(
                        &mut old_plugin,
                        &mut self.cx,
                        &mut self.fx,
                        &mut self.options,
                        host,
                    );
                    if Self::setup_one(
                        &mut plugin,
                        &mut self.cx,
                        &mut self.fx,
                        &mut self.options,
                        host,
                    ) {
                        final_list.push(plugin);
                    }
                }
                None => {
                    changed = true;
                    if Self::setup_one(
                        &mut plugin,
                        &mut self.cx,
                        &mut self.fx,
                        &mut self.options,
                        host,
                    ) {
                        final_list.push(plugin);
                    }
                }
            }
        }

        for slot in &mut slots {
            if let Some(mut plugin) = slot.take() {
                // A live plugin missing from the full incoming list is being
                // removed; that is eligible now. Everything else waits.
                if plugin.live_update() && !retained.contains(&plugin.name()) {
                    changed = true;
                    Self::cleanup_one(
                        &mut plugin,
                        &mut self.cx,
                        &mut self.fx,
                        &mut self.options,
                        host,
                    );
                } else {
                    final_list.push(plugin);
                }
            }
        }

        self.plugins = PluginSet::resolve(final_list);
        changed
    }

    /// Apply a stashed mid-interaction update now that the node is idle.
    fn apply_pending(&mut self, host: &mut H) {
        let Some(PendingUpdate { rest, retained }) = self.pending.take() else {
            return;
        };
        let rest_names: Vec<&'static str> = rest.iter().map(|p| p.name()).collect();
        let keep: Vec<&'static str> = retained
            .into_iter()
            .filter(|name| !rest_names.contains(name))
            .collect();
        self.reconcile(rest, &keep, host);
    }
}
