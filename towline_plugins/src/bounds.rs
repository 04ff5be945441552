// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds: keep the node's rectangle inside a movement envelope.

use alloc::boxed::Box;
use core::fmt;
use core::hash::{Hash, Hasher};

use kurbo::{Rect, Vec2};

use towline_geometry::clamp_step;
use towline_protocol::fingerprint::{FingerprintHasher, nonce};
use towline_protocol::{DragContext, DragHost, DragPlugin, EffectQueue, HookError, Outcome};

bitflags::bitflags! {
    /// When the envelope is re-resolved during an interaction.
    ///
    /// The setup resolution always happens; these flags add refresh points.
    /// Re-resolving per move tracks a moving ancestor at the cost of a
    /// measurement each event.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Recompute: u8 {
        /// Refresh when thresholds are met, before the first committed move.
        const DRAG_START = 0b001;
        /// Refresh on every move.
        const MOVE = 0b010;
        /// Refresh when the interaction ends.
        const DRAG_END = 0b100;
    }
}

impl Default for Recompute {
    fn default() -> Self {
        Self::DRAG_START
    }
}

/// Where the movement envelope comes from.
pub enum BoundsFrom<N> {
    /// A fixed rectangle in viewport coordinates.
    Rect(Rect),
    /// The rendered rectangle of another node, typically an ancestor.
    Ancestor(N),
    /// An arbitrary source, re-invoked at every refresh point.
    Custom(Box<dyn Fn() -> Rect>),
}

impl<N: fmt::Debug> fmt::Debug for BoundsFrom<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rect(rect) => f.debug_tuple("Rect").field(rect).finish(),
            Self::Ancestor(node) => f.debug_tuple("Ancestor").field(node).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Clamps every proposal so the committed offset can never push the node's
/// rectangle outside the envelope, edges inclusive.
///
/// The clamp relates the interaction-start geometry snapshot
/// ([`DragContext::cached_root_rect`]) to the offset committed since then,
/// converting through the interaction's inverse scale so a visually scaled
/// node is still clamped against what is actually on screen.
#[derive(Debug)]
pub struct Bounds<N> {
    from: BoundsFrom<N>,
    recompute: Recompute,
    envelope: Option<Rect>,
    nonce: u64,
}

impl<N> Bounds<N> {
    /// Clamp against a fixed rectangle.
    #[must_use]
    pub fn rect(rect: Rect) -> Self {
        Self {
            from: BoundsFrom::Rect(rect),
            recompute: Recompute::default(),
            envelope: None,
            nonce: 0,
        }
    }

    /// Clamp against another node's rendered rectangle.
    #[must_use]
    pub fn ancestor(node: N) -> Self {
        Self {
            from: BoundsFrom::Ancestor(node),
            recompute: Recompute::default(),
            envelope: None,
            nonce: 0,
        }
    }

    /// Clamp against an arbitrary source.
    ///
    /// Closure-sourced bounds cannot be structurally compared, so every
    /// instance reads as changed during reconciliation.
    #[must_use]
    pub fn custom(source: impl Fn() -> Rect + 'static) -> Self {
        Self {
            from: BoundsFrom::Custom(Box::new(source)),
            recompute: Recompute::default(),
            envelope: None,
            nonce: nonce(),
        }
    }

    /// Choose when the envelope refreshes during an interaction.
    #[must_use]
    pub fn with_recompute(mut self, recompute: Recompute) -> Self {
        self.recompute = recompute;
        self
    }

    fn resolve<H: DragHost<Node = N>>(&mut self, host: &H)
    where
        N: Copy,
    {
        self.envelope = Some(match &self.from {
            BoundsFrom::Rect(rect) => *rect,
            BoundsFrom::Ancestor(node) => host.measure(*node),
            BoundsFrom::Custom(source) => source(),
        });
    }
}

impl<H: DragHost> DragPlugin<H> for Bounds<H::Node> {
    fn name(&self) -> &'static str {
        "bounds"
    }

    fn live_update(&self) -> bool {
        true
    }

    fn fingerprint(&self) -> u64 {
        let mut hasher = FingerprintHasher::new();
        self.recompute.hash(&mut hasher);
        match &self.from {
            BoundsFrom::Rect(rect) => {
                0_u8.hash(&mut hasher);
                for coord in [rect.x0, rect.y0, rect.x1, rect.y1] {
                    coord.to_bits().hash(&mut hasher);
                }
            }
            BoundsFrom::Ancestor(node) => {
                1_u8.hash(&mut hasher);
                node.hash(&mut hasher);
            }
            BoundsFrom::Custom(_) => {
                2_u8.hash(&mut hasher);
                self.nonce.hash(&mut hasher);
            }
        }
        hasher.finish()
    }

    fn setup(
        &mut self,
        _cx: &mut DragContext<H::Node>,
        host: &H,
        _fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        self.resolve(host);
        Ok(Outcome::Continue)
    }

    fn drag_start(
        &mut self,
        _cx: &mut DragContext<H::Node>,
        host: &H,
        _fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        if self.recompute.contains(Recompute::DRAG_START) {
            self.resolve(host);
        }
        Ok(Outcome::Continue)
    }

    fn drag(
        &mut self,
        cx: &mut DragContext<H::Node>,
        host: &H,
        _fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        if self.recompute.contains(Recompute::MOVE) {
            self.resolve(host);
        }
        let Some(envelope) = self.envelope else {
            return Ok(Outcome::Continue);
        };

        // Layout-space step, converted into viewport space for the clamp and
        // back. `cached_root_rect` was measured when `offset == start_offset`,
        // so the rectangle's current position is the snapshot shifted by what
        // has been committed since.
        let to_viewport = if cx.inverse_scale > 0.0 {
            1.0 / cx.inverse_scale
        } else {
            1.0
        };
        let committed = (cx.offset - cx.start_offset) * to_viewport;
        let rect_now = cx.cached_root_rect + committed;
        let step = cx.proposed.resolve() * to_viewport;
        let clamped = clamp_step(envelope, rect_now, step) * cx.inverse_scale;

        cx.proposed.x = cx.proposed.x.map(|_| clamped.x);
        cx.proposed.y = cx.proposed.y.map(|_| clamped.y);
        Ok(Outcome::Continue)
    }

    fn drag_end(
        &mut self,
        _cx: &mut DragContext<H::Node>,
        host: &H,
        _fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        if self.recompute.contains(Recompute::DRAG_END) {
            self.resolve(host);
        }
        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use towline_host_ref::RefHost;
    use towline_protocol::Proposed;

    fn dragging_context(rect: Rect) -> DragContext<u32> {
        let mut cx = DragContext::new(1_u32);
        cx.cached_root_rect = rect;
        cx.is_interacting = true;
        cx.is_dragging = true;
        cx.initial = Point::new(rect.x0, rect.y0);
        cx
    }

    fn run_drag(plugin: &mut Bounds<u32>, cx: &mut DragContext<u32>, host: &RefHost) {
        let mut fx = EffectQueue::new();
        DragPlugin::<RefHost>::setup(plugin, cx, host, &mut fx).unwrap();
        DragPlugin::<RefHost>::drag(plugin, cx, host, &mut fx).unwrap();
    }

    #[test]
    fn proposal_inside_envelope_is_untouched() {
        let mut plugin = Bounds::rect(Rect::new(0.0, 0.0, 200.0, 200.0));
        let mut cx = dragging_context(Rect::new(10.0, 10.0, 50.0, 50.0));
        cx.proposed = Proposed::new(20.0, 20.0);
        run_drag(&mut plugin, &mut cx, &RefHost::new());
        assert_eq!(cx.proposed, Proposed::new(20.0, 20.0));
    }

    #[test]
    fn proposal_is_clamped_at_the_envelope_edge() {
        let mut plugin = Bounds::rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut cx = dragging_context(Rect::new(60.0, 60.0, 80.0, 80.0));
        cx.proposed = Proposed::new(50.0, -70.0);
        run_drag(&mut plugin, &mut cx, &RefHost::new());
        // Right edge stops at 100, top edge at 0.
        assert_eq!(cx.proposed, Proposed::new(20.0, -60.0));
    }

    #[test]
    fn committed_offset_since_start_is_accounted_for() {
        let mut plugin = Bounds::rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut cx = dragging_context(Rect::new(0.0, 0.0, 20.0, 20.0));
        // 70px already committed this interaction; 20 more would overflow.
        cx.offset = Vec2::new(70.0, 0.0);
        cx.proposed = Proposed::new(20.0, 0.0);
        run_drag(&mut plugin, &mut cx, &RefHost::new());
        assert_eq!(cx.proposed.x, Some(10.0));
    }

    #[test]
    fn ancestor_envelope_is_measured_through_the_host() {
        let mut host = RefHost::new();
        host.insert_node(9, Rect::new(0.0, 0.0, 50.0, 50.0));
        let mut plugin = Bounds::ancestor(9_u32);
        let mut cx = dragging_context(Rect::new(0.0, 0.0, 20.0, 20.0));
        cx.proposed = Proposed::new(100.0, 0.0);
        run_drag(&mut plugin, &mut cx, &host);
        assert_eq!(cx.proposed.x, Some(30.0));
    }

    #[test]
    fn scaled_node_clamps_in_viewport_space() {
        // Layout twice the rendered size: inverse_scale = 2. A layout-space
        // step of 160 is 80 viewport px; only 80 viewport px of room exists,
        // so the full step survives, and one more layout px would not.
        let mut plugin = Bounds::rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut cx = dragging_context(Rect::new(0.0, 0.0, 20.0, 20.0));
        cx.inverse_scale = 2.0;
        cx.proposed = Proposed::new(170.0, 0.0);
        run_drag(&mut plugin, &mut cx, &RefHost::new());
        assert_eq!(cx.proposed.x, Some(160.0));
    }

    #[test]
    fn absent_axis_gains_no_opinion() {
        let mut plugin = Bounds::rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut cx = dragging_context(Rect::new(0.0, 0.0, 20.0, 20.0));
        cx.proposed = Proposed {
            x: Some(200.0),
            y: None,
        };
        run_drag(&mut plugin, &mut cx, &RefHost::new());
        assert_eq!(cx.proposed.x, Some(80.0));
        assert_eq!(cx.proposed.y, None);
    }

    #[test]
    fn custom_sources_always_read_as_changed() {
        let a: Bounds<u32> = Bounds::custom(|| Rect::ZERO);
        let b: Bounds<u32> = Bounds::custom(|| Rect::ZERO);
        assert_ne!(
            DragPlugin::<RefHost>::fingerprint(&a),
            DragPlugin::<RefHost>::fingerprint(&b)
        );
    }

    #[test]
    fn rect_sources_fingerprint_structurally() {
        let a: Bounds<u32> = Bounds::rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b: Bounds<u32> = Bounds::rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let c: Bounds<u32> = Bounds::rect(Rect::new(0.0, 0.0, 99.0, 10.0));
        assert_eq!(
            DragPlugin::<RefHost>::fingerprint(&a),
            DragPlugin::<RefHost>::fingerprint(&b)
        );
        assert_ne!(
            DragPlugin::<RefHost>::fingerprint(&a),
            DragPlugin::<RefHost>::fingerprint(&c)
        );
    }
}
