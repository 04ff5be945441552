// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! User-select guard: suspend text selection for the interaction's duration.

use alloc::string::String;

use towline_protocol::{DragContext, DragHost, DragPlugin, EffectQueue, HookError, Outcome};

/// Suspends document-level text selection while a drag is live and restores
/// the prior value exactly on end — including a non-default prior value set
/// by someone else.
///
/// Marked non-cancelable: if another plugin cancels the interaction, the
/// restoration hook still runs, so the page is never left unselectable.
#[derive(Clone, Debug, Default)]
pub struct UserSelectGuard {
    prior: Option<Option<String>>,
}

impl UserSelectGuard {
    /// A guard with nothing suspended yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: DragHost> DragPlugin<H> for UserSelectGuard {
    fn name(&self) -> &'static str {
        "user-select"
    }

    fn cancelable(&self) -> bool {
        false
    }

    fn drag_start(
        &mut self,
        _cx: &mut DragContext<H::Node>,
        host: &H,
        fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        self.prior = Some(host.user_select());
        fx.defer(|host| host.set_user_select(Some("none")));
        Ok(Outcome::Continue)
    }

    fn drag_end(
        &mut self,
        _cx: &mut DragContext<H::Node>,
        _host: &H,
        fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        if let Some(prior) = self.prior.take() {
            fx.defer(move |host| host.set_user_select(prior.as_deref()));
        }
        Ok(Outcome::Continue)
    }
}
