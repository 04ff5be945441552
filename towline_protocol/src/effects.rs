// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred host mutations: a commit-or-discard transaction per phase.
//!
//! Hooks see the host immutably; anything they want to change they queue here
//! as a boxed unit of work. The engine flushes the queue once, after the phase
//! completes, which batches host writes and guarantees that a vetoed or
//! cancelled phase leaves no partial mutation behind.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// An unordered collection of pending host mutations for the current phase.
///
/// Invariants: effects run at most once; they run only if the phase that
/// queued them completed without veto or cancellation (the terminal drag-end
/// chain being the documented exception, where effects always flush).
pub struct EffectQueue<H: ?Sized> {
    effects: Vec<Box<dyn FnOnce(&mut H)>>,
}

impl<H: ?Sized> EffectQueue<H> {
    /// An empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Queue a unit of work for the end of the current phase.
    ///
    /// "Defer" means defer to the end of this phase, not to a future turn;
    /// the engine flushes synchronously once the chain finishes.
    pub fn defer(&mut self, effect: impl FnOnce(&mut H) + 'static) {
        self.effects.push(Box::new(effect));
    }

    /// Execute all queued effects against `host`, leaving the queue empty.
    pub fn flush(&mut self, host: &mut H) {
        for effect in self.effects.drain(..) {
            effect(host);
        }
    }

    /// Drop all queued effects without running them.
    pub fn discard(&mut self) {
        self.effects.clear();
    }

    /// Number of pending effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// `true` when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl<H: ?Sized> Default for EffectQueue<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> fmt::Debug for EffectQueue<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectQueue")
            .field("pending", &self.effects.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn flush_runs_each_effect_once_and_clears() {
        let mut fx: EffectQueue<Vec<u32>> = EffectQueue::new();
        fx.defer(|log| log.push(1));
        fx.defer(|log| log.push(2));
        assert_eq!(fx.len(), 2);

        let mut log = Vec::new();
        fx.flush(&mut log);
        assert_eq!(log, vec![1, 2]);
        assert!(fx.is_empty());

        // A second flush runs nothing.
        fx.flush(&mut log);
        assert_eq!(log, vec![1, 2]);
    }

    #[test]
    fn discard_drops_effects_without_running() {
        let mut fx: EffectQueue<Vec<u32>> = EffectQueue::new();
        fx.defer(|log| log.push(1));
        fx.discard();
        assert!(fx.is_empty());

        let mut log = Vec::new();
        fx.flush(&mut log);
        assert!(log.is_empty());
    }
}
