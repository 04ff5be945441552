// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis constraint: restrict movement to one axis, or forbid it entirely.

use towline_protocol::fingerprint::fingerprint_of;
use towline_protocol::{DragContext, DragHost, DragPlugin, EffectQueue, HookError, Outcome};

/// Which axes an interaction may move along.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum AxisLock {
    /// Free movement.
    #[default]
    Both,
    /// Horizontal only; the vertical proposal is nulled every move.
    X,
    /// Vertical only; the horizontal proposal is nulled every move.
    Y,
    /// No movement at all; the interaction never starts.
    None,
}

/// Constrains movement per [`AxisLock`].
///
/// With [`AxisLock::None`] the `should_start` chain is vetoed outright;
/// otherwise the locked axis has its proposal dropped on every move, so the
/// committed offset on that axis never changes.
#[derive(Copy, Clone, Debug)]
pub struct Axis {
    lock: AxisLock,
}

impl Axis {
    /// Constrain movement to `lock`.
    #[must_use]
    pub fn new(lock: AxisLock) -> Self {
        Self { lock }
    }
}

impl<H: DragHost> DragPlugin<H> for Axis {
    fn name(&self) -> &'static str {
        "axis"
    }

    fn live_update(&self) -> bool {
        true
    }

    fn fingerprint(&self) -> u64 {
        fingerprint_of(&self.lock)
    }

    fn should_start(
        &mut self,
        _cx: &mut DragContext<H::Node>,
        _host: &H,
        _fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        Ok(match self.lock {
            AxisLock::None => Outcome::Veto,
            _ => Outcome::Continue,
        })
    }

    fn drag(
        &mut self,
        cx: &mut DragContext<H::Node>,
        _host: &H,
        _fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        match self.lock {
            AxisLock::Both => {}
            AxisLock::X => cx.proposed.y = None,
            AxisLock::Y => cx.proposed.x = None,
            // Live-swapped in mid-interaction: freeze in place.
            AxisLock::None => cx.proposed.clear(),
        }
        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use towline_host_ref::RefHost;
    use towline_protocol::Proposed;

    fn drag_with(lock: AxisLock, proposed: Proposed) -> Proposed {
        let mut plugin = Axis::new(lock);
        let mut cx = DragContext::new(1_u32);
        cx.proposed = proposed;
        let host = RefHost::new();
        let mut fx = EffectQueue::new();
        DragPlugin::<RefHost>::drag(&mut plugin, &mut cx, &host, &mut fx).unwrap();
        cx.proposed
    }

    #[test]
    fn x_lock_nulls_vertical() {
        let out = drag_with(AxisLock::X, Proposed::new(5.0, 7.0));
        assert_eq!(out.x, Some(5.0));
        assert_eq!(out.y, None);
    }

    #[test]
    fn y_lock_nulls_horizontal() {
        let out = drag_with(AxisLock::Y, Proposed::new(5.0, 7.0));
        assert_eq!(out.x, None);
        assert_eq!(out.y, Some(7.0));
    }

    #[test]
    fn both_leaves_the_proposal_alone() {
        let out = drag_with(AxisLock::Both, Proposed::new(5.0, 7.0));
        assert_eq!(out, Proposed::new(5.0, 7.0));
    }

    #[test]
    fn none_vetoes_the_start() {
        let mut plugin = Axis::new(AxisLock::None);
        let mut cx = DragContext::new(1_u32);
        let host = RefHost::new();
        let mut fx = EffectQueue::new();
        let outcome =
            DragPlugin::<RefHost>::should_start(&mut plugin, &mut cx, &host, &mut fx).unwrap();
        assert_eq!(outcome, Outcome::Veto);
    }

    #[test]
    fn fingerprint_tracks_the_lock() {
        let a: &dyn DragPlugin<RefHost> = &Axis::new(AxisLock::X);
        let b: &dyn DragPlugin<RefHost> = &Axis::new(AxisLock::X);
        let c: &dyn DragPlugin<RefHost> = &Axis::new(AxisLock::Y);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
