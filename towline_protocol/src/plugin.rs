// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The plugin capability contract: phases, outcomes, and the hook trait.

use alloc::boxed::Box;

use crate::context::DragContext;
use crate::effects::EffectQueue;
use crate::host::DragHost;

/// The points in an interaction's life where plugin hooks run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Once, when the plugin is attached or replaced.
    Setup,
    /// At pointer-down, deciding whether an interaction may begin.
    ShouldStart,
    /// When movement thresholds are met, before the first committed move.
    DragStart,
    /// On every qualifying pointer move.
    Drag,
    /// When the interaction ends; terminal, always runs for every plugin.
    DragEnd,
    /// Once, when the plugin is detached or replaced.
    Cleanup,
}

/// What a hook tells the dispatcher about the rest of the phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Keep going.
    #[default]
    Continue,
    /// Stop this phase; queued effects are discarded. Vetoing `should_start`
    /// means no interaction begins; vetoing `drag` means nothing commits for
    /// this move.
    Veto,
    /// Stop this phase *and* end the interaction (from `drag_start` onward).
    /// Remaining hooks in the phase are skipped unless a plugin is marked
    /// non-cancelable.
    Cancel,
}

/// How a completed hook chain ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PhaseResult {
    /// Every hook ran (or stood aside); effects may flush.
    Completed,
    /// A hook vetoed (or failed); effects must be discarded.
    Vetoed,
    /// A hook cancelled; effects must be discarded and, from `drag_start`
    /// onward, the interaction ends.
    Cancelled,
}

/// Error type hooks may fail with. One plugin's failure is contained: it is
/// reported as a [`Fault`] and demoted to a veto of the current phase.
pub type HookError = Box<dyn core::error::Error>;

/// Report delivered to the error callback when a hook fails.
#[derive(Debug)]
pub struct Fault<N> {
    /// Phase whose chain the failure aborted.
    pub phase: Phase,
    /// Name of the failing plugin, when the failure came from one.
    pub plugin: Option<&'static str>,
    /// The managed node the failure happened on.
    pub node: N,
    /// The underlying error.
    pub error: HookError,
}

/// A named, prioritized behavior unit over one node's interactions.
///
/// All hooks are optional: the defaults do nothing and continue. A plugin's
/// private state lives in its own fields; the engine and other plugins never
/// see it. Cross-plugin communication goes through the [`DragContext`] alone.
///
/// Hooks receive the host read-only. Mutations belong on the
/// [`EffectQueue`], which the engine flushes only if the phase commits.
pub trait DragPlugin<H: DragHost> {
    /// Identity key. Two registrations with the same name collapse to one;
    /// the equal-or-higher-priority later registration wins.
    fn name(&self) -> &'static str;

    /// Chain position: higher runs earlier. Defaults to 0. The last plugin to
    /// write a proposal wins, so the lowest priority has the final word.
    fn priority(&self) -> i32 {
        0
    }

    /// May this plugin be replaced while an interaction is in flight?
    /// Ineligible plugins are reconciled once the interaction returns to
    /// idle.
    fn live_update(&self) -> bool {
        false
    }

    /// When `false`, a cancellation earlier in a phase does not skip this
    /// plugin's hook in that phase.
    fn cancelable(&self) -> bool {
        true
    }

    /// Stand-in for reference identity during reconciliation: a plugin is
    /// "unchanged" when name, priority, and fingerprint all match, in which
    /// case the old instance (and its private state) is kept. Implementations
    /// should fold their configuration through
    /// [`fingerprint`](crate::fingerprint); the default of 0 is right for
    /// config-free plugins.
    fn fingerprint(&self) -> u64 {
        0
    }

    /// Runs once at attach or replacement.
    ///
    /// # Errors
    ///
    /// A failing setup is reported and the plugin is dropped from the set;
    /// the attach itself proceeds.
    fn setup(
        &mut self,
        cx: &mut DragContext<H::Node>,
        host: &H,
        fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        let _ = (cx, host, fx);
        Ok(Outcome::Continue)
    }

    /// Runs at pointer-down. A veto keeps the interaction from starting.
    ///
    /// # Errors
    ///
    /// Reported as a [`Fault`] and treated as a veto.
    fn should_start(
        &mut self,
        cx: &mut DragContext<H::Node>,
        host: &H,
        fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        let _ = (cx, host, fx);
        Ok(Outcome::Continue)
    }

    /// Runs when thresholds are met, immediately before the first committed
    /// move.
    ///
    /// # Errors
    ///
    /// Reported as a [`Fault`] and treated as a veto.
    fn drag_start(
        &mut self,
        cx: &mut DragContext<H::Node>,
        host: &H,
        fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        let _ = (cx, host, fx);
        Ok(Outcome::Continue)
    }

    /// Runs on every qualifying move. Read, overwrite, or null out
    /// [`proposed`](DragContext::proposed) here.
    ///
    /// # Errors
    ///
    /// Reported as a [`Fault`] and treated as a veto.
    fn drag(
        &mut self,
        cx: &mut DragContext<H::Node>,
        host: &H,
        fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        let _ = (cx, host, fx);
        Ok(Outcome::Continue)
    }

    /// Runs when the interaction ends, for every plugin, regardless of how it
    /// ended.
    ///
    /// # Errors
    ///
    /// Reported as a [`Fault`]; the wind-down continues with the next plugin.
    fn drag_end(
        &mut self,
        cx: &mut DragContext<H::Node>,
        host: &H,
        fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        let _ = (cx, host, fx);
        Ok(Outcome::Continue)
    }

    /// Runs once at detach or replacement.
    ///
    /// # Errors
    ///
    /// Reported as a [`Fault`]; the detach proceeds.
    fn cleanup(
        &mut self,
        cx: &mut DragContext<H::Node>,
        host: &H,
        fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        let _ = (cx, host, fx);
        Ok(Outcome::Continue)
    }
}
