// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform: render the committed offset.

use alloc::rc::Rc;
use core::fmt;

use kurbo::Vec2;

use towline_protocol::fingerprint::nonce;
use towline_protocol::{DragContext, DragHost, DragPlugin, EffectQueue, HookError, Outcome};

/// Replacement render function: receives the host, the root node, and the
/// offset to render.
pub type RenderFn<H> = dyn Fn(&mut H, <H as DragHost>::Node, Vec2);

/// The default rendering plugin: writes the committed offset into the node's
/// visual transform, or hands it to a caller-supplied render function.
///
/// Rendering is always queued as a deferred effect, never applied inside the
/// hook, so a vetoed move draws nothing. Priority −1000 puts it after every
/// adjusting plugin, which is what makes the queued value the *committed*
/// one: nothing lower runs that could still rewrite the proposal.
///
/// Also renders once at setup, so a caller-supplied initial offset is visible
/// before the first interaction.
pub struct Transform<H: DragHost> {
    render: Option<Rc<RenderFn<H>>>,
    nonce: u64,
}

impl<H: DragHost + 'static> Transform<H> {
    /// Default rendering via [`DragHost::set_translate`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            render: None,
            nonce: 0,
        }
    }

    /// Render through a custom function instead (different CSS property,
    /// different element — the function's business).
    ///
    /// Closure-carrying configurations read as changed on every
    /// reconciliation.
    #[must_use]
    pub fn with_render(render: impl Fn(&mut H, H::Node, Vec2) + 'static) -> Self {
        Self {
            render: Some(Rc::new(render)),
            nonce: nonce(),
        }
    }

    fn queue_render(&self, node: H::Node, offset: Vec2, fx: &mut EffectQueue<H>) {
        match &self.render {
            Some(render) => {
                let render = Rc::clone(render);
                fx.defer(move |host| render(host, node, offset));
            }
            None => fx.defer(move |host| host.set_translate(node, offset)),
        }
    }
}

impl<H: DragHost + 'static> Default for Transform<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: DragHost> fmt::Debug for Transform<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("custom_render", &self.render.is_some())
            .finish()
    }
}

impl<H: DragHost + 'static> DragPlugin<H> for Transform<H> {
    fn name(&self) -> &'static str {
        "transform"
    }

    fn priority(&self) -> i32 {
        -1000
    }

    fn live_update(&self) -> bool {
        true
    }

    fn fingerprint(&self) -> u64 {
        self.nonce
    }

    fn setup(
        &mut self,
        cx: &mut DragContext<H::Node>,
        _host: &H,
        fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        self.queue_render(cx.root_node, cx.offset, fx);
        Ok(Outcome::Continue)
    }

    fn drag(
        &mut self,
        cx: &mut DragContext<H::Node>,
        _host: &H,
        fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        // The proposal is settled by now; what we queue is what commits.
        let target = cx.offset + cx.proposed.resolve();
        self.queue_render(cx.root_node, target, fx);
        Ok(Outcome::Continue)
    }
}
