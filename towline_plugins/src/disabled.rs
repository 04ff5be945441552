// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disabled: a drag that never starts.

use towline_protocol::{DragContext, DragHost, DragPlugin, EffectQueue, HookError, Outcome};

/// Unconditionally vetoes `should_start`, so the node stays managed but
/// inert. Live-updatable, which is the whole point: frameworks toggle it in
/// and out of the plugin list to flip interactivity.
#[derive(Copy, Clone, Debug, Default)]
pub struct Disabled;

impl Disabled {
    /// The plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<H: DragHost> DragPlugin<H> for Disabled {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn live_update(&self) -> bool {
        true
    }

    fn should_start(
        &mut self,
        _cx: &mut DragContext<H::Node>,
        _host: &H,
        _fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        Ok(Outcome::Veto)
    }
}
