// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multitouch rejection: one pointer per interaction.

use towline_protocol::{DragContext, DragHost, DragPlugin, EffectQueue, HookError, Outcome};

/// Cancels the interaction the moment a second concurrent pointer is seen.
///
/// The engine keeps [`DragContext::active_pointers`] current (including a
/// chain run when an extra pointer merely presses without moving), so this
/// plugin is a pure predicate over the context. Runs at high priority so the
/// cancellation lands before other plugins do per-move work.
#[derive(Copy, Clone, Debug, Default)]
pub struct IgnoreMultitouch;

impl IgnoreMultitouch {
    /// The plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<H: DragHost> DragPlugin<H> for IgnoreMultitouch {
    fn name(&self) -> &'static str {
        "ignore-multitouch"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn live_update(&self) -> bool {
        true
    }

    fn drag_start(
        &mut self,
        cx: &mut DragContext<H::Node>,
        _host: &H,
        _fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        Ok(Self::verdict(cx))
    }

    fn drag(
        &mut self,
        cx: &mut DragContext<H::Node>,
        _host: &H,
        _fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        Ok(Self::verdict(cx))
    }
}

impl IgnoreMultitouch {
    fn verdict<N>(cx: &DragContext<N>) -> Outcome {
        if cx.active_pointers.len() > 1 {
            Outcome::Cancel
        } else {
            Outcome::Continue
        }
    }
}
