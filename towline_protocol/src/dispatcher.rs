// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helpers: walk a hook chain and honor veto/cancel outcomes.
//!
//! The dispatcher executes one phase's hook across a resolved [`PluginSet`]
//! and applies the propagation rules:
//!
//! - Process plugins in set order (descending priority, stable ties).
//! - [`Outcome::Veto`] aborts the phase immediately.
//! - [`Outcome::Cancel`] skips the remaining plugins in the phase, except
//!   those whose [`cancelable`](crate::DragPlugin::cancelable) is `false`,
//!   which still get their hook.
//! - A hook error is handed to `on_fault` and treated as a veto; after a
//!   cancellation it is reported but does not change the result.
//!
//! The caller owns the transaction: flush the effect queue on
//! [`PhaseResult::Completed`], discard it otherwise. [`run_terminal_phase`]
//! is the exception used for the drag-end wind-down, where every hook runs
//! and outcomes carry no control-flow meaning.
//!
//! ## Minimal example
//!
//! ```
//! use towline_protocol::{dispatcher, DragContext, EffectQueue, Phase, PhaseResult, PluginSet};
//! # use towline_protocol::{CaptureError, DragEvent, DragHost, PointerId};
//! # use kurbo::{Rect, Size, Vec2};
//! # #[derive(Debug, Default)]
//! # struct NullHost;
//! # impl DragHost for NullHost {
//! #     type Node = u32;
//! #     fn measure(&self, _: u32) -> Rect { Rect::ZERO }
//! #     fn layout_size(&self, _: u32) -> Size { Size::ZERO }
//! #     fn set_translate(&mut self, _: u32, _: Vec2) {}
//! #     fn add_class(&mut self, _: u32, _: &str) {}
//! #     fn remove_class(&mut self, _: u32, _: &str) {}
//! #     fn set_attribute(&mut self, _: u32, _: &str, _: &str) {}
//! #     fn remove_attribute(&mut self, _: u32, _: &str) {}
//! #     fn set_pointer_capture(&mut self, _: u32, _: PointerId) -> Result<(), CaptureError> { Ok(()) }
//! #     fn release_pointer_capture(&mut self, _: u32, _: PointerId) {}
//! #     fn user_select(&self) -> Option<String> { None }
//! #     fn set_user_select(&mut self, _: Option<&str>) {}
//! #     fn emit(&mut self, _: u32, _: &DragEvent<u32>) {}
//! # }
//!
//! let mut plugins: PluginSet<NullHost> = PluginSet::new();
//! let mut cx = DragContext::new(1_u32);
//! let mut fx = EffectQueue::new();
//! let host = NullHost;
//!
//! // An empty chain trivially completes; the caller may flush.
//! let result =
//!     dispatcher::run_phase(Phase::Drag, &mut plugins, &mut cx, &host, &mut fx, |_| {});
//! assert_eq!(result, PhaseResult::Completed);
//! ```

use crate::context::DragContext;
use crate::effects::EffectQueue;
use crate::host::DragHost;
use crate::plugin::{DragPlugin, Fault, HookError, Outcome, Phase, PhaseResult};
use crate::set::PluginSet;

/// Invoke the hook matching `phase` on a single plugin.
///
/// # Errors
///
/// Whatever the hook itself fails with.
pub fn dispatch_hook<H: DragHost>(
    plugin: &mut dyn DragPlugin<H>,
    phase: Phase,
    cx: &mut DragContext<H::Node>,
    host: &H,
    fx: &mut EffectQueue<H>,
) -> Result<Outcome, HookError> {
    match phase {
        Phase::Setup => plugin.setup(cx, host, fx),
        Phase::ShouldStart => plugin.should_start(cx, host, fx),
        Phase::DragStart => plugin.drag_start(cx, host, fx),
        Phase::Drag => plugin.drag(cx, host, fx),
        Phase::DragEnd => plugin.drag_end(cx, host, fx),
        Phase::Cleanup => plugin.cleanup(cx, host, fx),
    }
}

/// Run one phase's hook chain, honoring veto and cancellation.
///
/// Returns how the chain ended; the caller flushes the effect queue on
/// [`PhaseResult::Completed`] and discards it otherwise.
pub fn run_phase<H: DragHost>(
    phase: Phase,
    plugins: &mut PluginSet<H>,
    cx: &mut DragContext<H::Node>,
    host: &H,
    fx: &mut EffectQueue<H>,
    mut on_fault: impl FnMut(Fault<H::Node>),
) -> PhaseResult {
    let node = cx.root_node;
    let mut cancelled = false;

    for plugin in plugins.iter_mut() {
        if cancelled && plugin.cancelable() {
            continue;
        }
        match dispatch_hook(plugin.as_mut(), phase, cx, host, fx) {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Veto) => {
                if !cancelled {
                    return PhaseResult::Vetoed;
                }
                // The interaction is already ending; a veto adds nothing.
            }
            Ok(Outcome::Cancel) => cancelled = true,
            Err(error) => {
                let name = plugin.name();
                on_fault(Fault {
                    phase,
                    plugin: Some(name),
                    node,
                    error,
                });
                if !cancelled {
                    return PhaseResult::Vetoed;
                }
            }
        }
    }

    if cancelled {
        PhaseResult::Cancelled
    } else {
        PhaseResult::Completed
    }
}

/// Run a terminal phase: every plugin's hook executes, outcomes are ignored,
/// and errors are reported without stopping the walk.
///
/// The engine uses this for the drag-end wind-down, which must run "first,
/// always" — cleanup symmetry (class removal, user-select restoration) may
/// not be lost to a veto raised by an unrelated plugin.
pub fn run_terminal_phase<H: DragHost>(
    phase: Phase,
    plugins: &mut PluginSet<H>,
    cx: &mut DragContext<H::Node>,
    host: &H,
    fx: &mut EffectQueue<H>,
    mut on_fault: impl FnMut(Fault<H::Node>),
) {
    let node = cx.root_node;
    for plugin in plugins.iter_mut() {
        if let Err(error) = dispatch_hook(plugin.as_mut(), phase, cx, host, fx) {
            let name = plugin.name();
            on_fault(Fault {
                phase,
                plugin: Some(name),
                node,
                error,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{CaptureError, DragEvent, PointerId};
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
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

    #[derive(Debug)]
    struct BrokenHook;

    impl core::fmt::Display for BrokenHook {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("broken hook")
        }
    }

    impl core::error::Error for BrokenHook {}

    /// Scripted plugin: records which of its hooks ran, returns a fixed
    /// outcome from `drag`.
    struct Scripted {
        name: &'static str,
        priority: i32,
        cancelable: bool,
        outcome: Result<Outcome, ()>,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl DragPlugin<NullHost> for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }
        fn priority(&self) -> i32 {
            self.priority
        }
        fn cancelable(&self) -> bool {
            self.cancelable
        }
        fn drag(
            &mut self,
            _cx: &mut DragContext<u32>,
            _host: &NullHost,
            fx: &mut EffectQueue<NullHost>,
        ) -> Result<Outcome, HookError> {
            self.log.borrow_mut().push(self.name);
            fx.defer(|_| {});
            match self.outcome {
                Ok(outcome) => Ok(outcome),
                Err(()) => Err(Box::new(BrokenHook)),
            }
        }
    }

    fn scripted(
        name: &'static str,
        priority: i32,
        outcome: Result<Outcome, ()>,
        log: &Rc<RefCell<Vec<&'static str>>>,
    ) -> Box<dyn DragPlugin<NullHost>> {
        Box::new(Scripted {
            name,
            priority,
            cancelable: true,
            outcome,
            log: Rc::clone(log),
        })
    }

    fn run(plugins: Vec<Box<dyn DragPlugin<NullHost>>>) -> (PhaseResult, usize, Vec<Fault<u32>>) {
        let mut set = PluginSet::resolve(plugins);
        let mut cx = DragContext::new(0_u32);
        let mut fx = EffectQueue::new();
        let host = NullHost;
        let mut faults = Vec::new();
        let result = run_phase(Phase::Drag, &mut set, &mut cx, &host, &mut fx, |fault| {
            faults.push(fault);
        });
        (result, fx.len(), faults)
    }

    #[test]
    fn all_continue_completes_in_priority_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (result, pending, faults) = run(vec![
            scripted("low", -5, Ok(Outcome::Continue), &log),
            scripted("high", 5, Ok(Outcome::Continue), &log),
            scripted("mid", 0, Ok(Outcome::Continue), &log),
        ]);
        assert_eq!(result, PhaseResult::Completed);
        assert_eq!(*log.borrow(), vec!["high", "mid", "low"]);
        assert_eq!(pending, 3);
        assert!(faults.is_empty());
    }

    #[test]
    fn veto_short_circuits_the_phase() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (result, _, _) = run(vec![
            scripted("vetoer", 5, Ok(Outcome::Veto), &log),
            scripted("after", 0, Ok(Outcome::Continue), &log),
        ]);
        assert_eq!(result, PhaseResult::Vetoed);
        assert_eq!(*log.borrow(), vec!["vetoer"]);
    }

    #[test]
    fn cancel_skips_cancelable_but_not_noncancelable() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let stubborn = Box::new(Scripted {
            name: "stubborn",
            priority: -1,
            cancelable: false,
            outcome: Ok(Outcome::Continue),
            log: Rc::clone(&log),
        });
        let (result, _, _) = run(vec![
            scripted("canceller", 5, Ok(Outcome::Cancel), &log),
            scripted("skipped", 0, Ok(Outcome::Continue), &log),
            stubborn,
        ]);
        assert_eq!(result, PhaseResult::Cancelled);
        assert_eq!(*log.borrow(), vec!["canceller", "stubborn"]);
    }

    #[test]
    fn hook_error_is_reported_and_vetoes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (result, _, faults) = run(vec![
            scripted("broken", 5, Err(()), &log),
            scripted("after", 0, Ok(Outcome::Continue), &log),
        ]);
        assert_eq!(result, PhaseResult::Vetoed);
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].plugin, Some("broken"));
        assert_eq!(faults[0].phase, Phase::Drag);
        assert_eq!(*log.borrow(), vec!["broken"]);
    }

    #[test]
    fn terminal_phase_runs_everyone_despite_veto_and_error() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = PluginSet::resolve(vec![
            scripted("vetoer", 5, Ok(Outcome::Veto), &log),
            scripted("broken", 3, Err(()), &log),
            scripted("last", 0, Ok(Outcome::Continue), &log),
        ]);
        let mut cx = DragContext::new(0_u32);
        let mut fx = EffectQueue::new();
        let host = NullHost;
        let mut faults = Vec::new();
        run_terminal_phase(Phase::Drag, &mut set, &mut cx, &host, &mut fx, |fault| {
            faults.push(fault);
        });
        assert_eq!(*log.borrow(), vec!["vetoer", "broken", "last"]);
        assert_eq!(faults.len(), 1);
    }
}
