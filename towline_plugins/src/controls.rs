// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controls: drag handles and cancel regions.

use core::hash::{Hash, Hasher};

use smallvec::SmallVec;

use towline_protocol::fingerprint::FingerprintHasher;
use towline_protocol::{DragContext, DragHost, DragPlugin, EffectQueue, HookError, Outcome};

use crate::error::ConfigError;

/// Restricts where on the node a drag may begin.
///
/// The initiating press carries its root→target propagation path; this plugin
/// walks it from the pressed element outward and lets the *nearest* listed
/// region decide:
///
/// - landing in a block region vetoes the start,
/// - landing in an allow region (a "handle") permits it,
/// - with a non-empty allow list, a press in neither region is vetoed;
///   with only a block list, such a press is permitted.
///
/// Nearest-wins means a block region nested inside a handle is honored, and
/// vice versa. A node listed in both regions is a configuration error.
#[derive(Clone, Debug)]
pub struct Controls<N> {
    allow: SmallVec<[N; 4]>,
    block: SmallVec<[N; 4]>,
}

impl<N: Copy + Eq> Controls<N> {
    /// Allow and block regions together.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ConflictingControls`] when a node appears in both
    /// lists.
    pub fn new(
        allow: impl IntoIterator<Item = N>,
        block: impl IntoIterator<Item = N>,
    ) -> Result<Self, ConfigError> {
        let allow: SmallVec<[N; 4]> = allow.into_iter().collect();
        let block: SmallVec<[N; 4]> = block.into_iter().collect();
        if allow.iter().any(|node| block.contains(node)) {
            return Err(ConfigError::ConflictingControls);
        }
        Ok(Self { allow, block })
    }

    /// Only drag handles: presses outside every handle are vetoed.
    #[must_use]
    pub fn handles(allow: impl IntoIterator<Item = N>) -> Self {
        Self {
            allow: allow.into_iter().collect(),
            block: SmallVec::new(),
        }
    }

    /// Only cancel regions: presses inside one are vetoed.
    #[must_use]
    pub fn cancels(block: impl IntoIterator<Item = N>) -> Self {
        Self {
            allow: SmallVec::new(),
            block: block.into_iter().collect(),
        }
    }
}

impl<H: DragHost> DragPlugin<H> for Controls<H::Node> {
    fn name(&self) -> &'static str {
        "controls"
    }

    fn live_update(&self) -> bool {
        true
    }

    fn fingerprint(&self) -> u64 {
        let mut hasher = FingerprintHasher::new();
        self.allow.len().hash(&mut hasher);
        for node in &self.allow {
            node.hash(&mut hasher);
        }
        self.block.len().hash(&mut hasher);
        for node in &self.block {
            node.hash(&mut hasher);
        }
        hasher.finish()
    }

    fn should_start(
        &mut self,
        cx: &mut DragContext<H::Node>,
        _host: &H,
        _fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        // Walk from the pressed element outward; the nearest region decides.
        for node in cx.press_path.iter().rev() {
            if self.block.contains(node) {
                return Ok(Outcome::Veto);
            }
            if self.allow.contains(node) {
                return Ok(Outcome::Continue);
            }
        }
        if self.allow.is_empty() {
            Ok(Outcome::Continue)
        } else {
            Ok(Outcome::Veto)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use towline_host_ref::RefHost;

    fn verdict(plugin: &mut Controls<u32>, path: &[u32]) -> Outcome {
        let mut cx = DragContext::new(path[0]);
        cx.press_path.extend_from_slice(path);
        let host = RefHost::new();
        let mut fx = EffectQueue::new();
        DragPlugin::<RefHost>::should_start(plugin, &mut cx, &host, &mut fx).unwrap()
    }

    #[test]
    fn press_on_a_handle_is_allowed() {
        let mut plugin = Controls::handles([5_u32]);
        assert_eq!(verdict(&mut plugin, &[1, 5, 9]), Outcome::Continue);
    }

    #[test]
    fn press_outside_every_handle_is_vetoed() {
        let mut plugin = Controls::handles([5_u32]);
        assert_eq!(verdict(&mut plugin, &[1, 7, 9]), Outcome::Veto);
    }

    #[test]
    fn press_in_a_cancel_region_is_vetoed() {
        let mut plugin = Controls::cancels([9_u32]);
        assert_eq!(verdict(&mut plugin, &[1, 9]), Outcome::Veto);
        assert_eq!(verdict(&mut plugin, &[1, 7]), Outcome::Continue);
    }

    #[test]
    fn nearest_region_wins_for_nested_block_inside_handle() {
        // Path root→target: 1 → handle 5 → cancel 9. The press lands on 9.
        let mut plugin = Controls::new([5_u32], [9_u32]).unwrap();
        assert_eq!(verdict(&mut plugin, &[1, 5, 9]), Outcome::Veto);
        // Pressing the handle itself is fine.
        assert_eq!(verdict(&mut plugin, &[1, 5]), Outcome::Continue);
    }

    #[test]
    fn nearest_region_wins_for_nested_handle_inside_block() {
        let mut plugin = Controls::new([9_u32], [5_u32]).unwrap();
        assert_eq!(verdict(&mut plugin, &[1, 5, 9]), Outcome::Continue);
        assert_eq!(verdict(&mut plugin, &[1, 5, 7]), Outcome::Veto);
    }

    #[test]
    fn conflicting_lists_fail_fast() {
        assert_eq!(
            Controls::new([5_u32], [5_u32]).unwrap_err(),
            ConfigError::ConflictingControls
        );
    }

    #[test]
    fn fingerprint_is_structural() {
        let a = Controls::handles([1_u32, 2]);
        let b = Controls::handles([1_u32, 2]);
        let c = Controls::handles([2_u32, 1]);
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
