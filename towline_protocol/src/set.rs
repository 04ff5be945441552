// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The resolved, ordered plugin registry for one node.
//!
//! Resolution happens once per reconciliation pass, not per event: duplicates
//! collapse by name through an explicit map, then the survivors are ordered by
//! priority. The hook dispatcher walks the result as-is.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::host::DragHost;
use crate::plugin::DragPlugin;

/// An ordered set of plugins, deduplicated by name.
///
/// ## Resolution rules
///
/// - Same name twice: the later registration replaces the earlier one when
///   its priority is equal or higher; otherwise the earlier one stays.
/// - Execution order is descending priority; registration order breaks ties.
///
/// Both rules hold uniformly across every phase and across the delegated
/// multi-instance layer.
pub struct PluginSet<H: DragHost> {
    entries: Vec<Box<dyn DragPlugin<H>>>,
}

impl<H: DragHost> PluginSet<H> {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Collapse a registration list into an ordered set.
    #[must_use]
    pub fn resolve(plugins: Vec<Box<dyn DragPlugin<H>>>) -> Self {
        let mut kept: Vec<Box<dyn DragPlugin<H>>> = Vec::with_capacity(plugins.len());
        let mut by_name: HashMap<&'static str, usize> = HashMap::with_capacity(plugins.len());

        for plugin in plugins {
            match by_name.entry(plugin.name()) {
                hashbrown::hash_map::Entry::Occupied(slot) => {
                    let index = *slot.get();
                    if plugin.priority() >= kept[index].priority() {
                        kept[index] = plugin;
                    }
                }
                hashbrown::hash_map::Entry::Vacant(slot) => {
                    slot.insert(kept.len());
                    kept.push(plugin);
                }
            }
        }

        // Stable: equal priorities keep registration order.
        kept.sort_by(|a, b| b.priority().cmp(&a.priority()));
        Self { entries: kept }
    }

    /// Number of resolved plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no plugins are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` when a plugin with `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|p| p.name() == name)
    }

    /// Iterate in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn DragPlugin<H>> {
        self.entries.iter().map(|p| p.as_ref())
    }

    /// Iterate mutably in execution order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn DragPlugin<H>>> {
        self.entries.iter_mut()
    }

    /// Take every plugin out, leaving the set empty. Reconciliation uses this
    /// to rebuild the set while reusing unchanged instances.
    pub fn drain(&mut self) -> Vec<Box<dyn DragPlugin<H>>> {
        core::mem::take(&mut self.entries)
    }
}

impl<H: DragHost> Default for PluginSet<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: DragHost> fmt::Debug for PluginSet<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|p| p.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DragContext;
    use crate::effects::EffectQueue;
    use crate::host::{CaptureError, DragEvent, PointerId};
    use crate::plugin::{HookError, Outcome};
    use alloc::string::String;
    use alloc::vec;
    use kurbo::{Rect, Size, Vec2};

    #[derive(Debug, Default)]
    struct NullHost;

    impl DragHost for NullHost {
        type Node = u32;

        fn measure(&self, _: u32) -> Rect {
            Rect::ZERO
        }
        fn layout_size(&self, _: u32) -> Size {
            Size::ZERO
        }
        fn set_translate(&mut self, _: u32, _: Vec2) {}
        fn add_class(&mut self, _: u32, _: &str) {}
        fn remove_class(&mut self, _: u32, _: &str) {}
        fn set_attribute(&mut self, _: u32, _: &str, _: &str) {}
        fn remove_attribute(&mut self, _: u32, _: &str) {}
        fn set_pointer_capture(&mut self, _: u32, _: PointerId) -> Result<(), CaptureError> {
            Ok(())
        }
        fn release_pointer_capture(&mut self, _: u32, _: PointerId) {}
        fn user_select(&self) -> Option<String> {
            None
        }
        fn set_user_select(&mut self, _: Option<&str>) {}
        fn emit(&mut self, _: u32, _: &DragEvent<u32>) {}
    }

    struct Named {
        name: &'static str,
        priority: i32,
        mark: f64,
    }

    impl DragPlugin<NullHost> for Named {
        fn name(&self) -> &'static str {
            self.name
        }
        fn priority(&self) -> i32 {
            self.priority
        }
        fn drag(
            &mut self,
            cx: &mut DragContext<u32>,
            _host: &NullHost,
            _fx: &mut EffectQueue<NullHost>,
        ) -> Result<Outcome, HookError> {
            cx.proposed.x = Some(self.mark);
            Ok(Outcome::Continue)
        }
    }

    fn named(name: &'static str, priority: i32, mark: f64) -> Box<dyn DragPlugin<NullHost>> {
        Box::new(Named {
            name,
            priority,
            mark,
        })
    }

    #[test]
    fn later_equal_or_higher_priority_replaces_same_name() {
        let set = PluginSet::resolve(vec![named("p", 1, 1.0), named("p", 2, 2.0)]);
        assert_eq!(set.len(), 1);
        // The survivor is the priority-2 registration.
        assert_eq!(set.iter().next().unwrap().priority(), 2);
    }

    #[test]
    fn later_lower_priority_is_dropped() {
        let set = PluginSet::resolve(vec![named("p", 5, 1.0), named("p", 2, 2.0)]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().unwrap().priority(), 5);
    }

    #[test]
    fn equal_priority_keeps_later_registration() {
        let set = PluginSet::resolve(vec![named("p", 3, 1.0), named("p", 3, 2.0)]);
        assert_eq!(set.len(), 1);
        let mut set = set;
        let mut cx = DragContext::new(0_u32);
        let mut fx = EffectQueue::new();
        let host = NullHost;
        for plugin in set.iter_mut() {
            plugin.drag(&mut cx, &host, &mut fx).unwrap();
        }
        assert_eq!(cx.proposed.x, Some(2.0));
    }

    #[test]
    fn execution_order_is_descending_priority_with_stable_ties() {
        let mut set = PluginSet::resolve(vec![
            named("low", -1, 0.0),
            named("first-tie", 0, 0.0),
            named("high", 10, 0.0),
            named("second-tie", 0, 0.0),
        ]);
        let order: Vec<&'static str> = set.iter_mut().map(|p| p.name()).collect();
        assert_eq!(order, vec!["high", "first-tie", "second-tie", "low"]);
    }

    #[test]
    fn drain_leaves_the_set_empty() {
        let mut set = PluginSet::resolve(vec![named("a", 0, 0.0), named("b", 1, 0.0)]);
        let drained = set.drain();
        assert_eq!(drained.len(), 2);
        assert!(set.is_empty());
    }
}
