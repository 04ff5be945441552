// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic configuration fingerprints for plugin reconciliation.
//!
//! Reconciliation has no reference identity to lean on, so plugins summarize
//! their configuration as a `u64`. The fold must be deterministic across
//! separately-constructed values and across processes — which rules out the
//! randomly-seeded default hashers — so this module carries a fixed-seed
//! FNV-1a fold behind the standard [`core::hash::Hasher`] interface.
//!
//! Closure-carrying configurations cannot be summarized structurally; they
//! burn a [`nonce`] instead, which makes every instance read as changed —
//! the conservative translation of reference identity.

use core::hash::{Hash, Hasher};
use core::sync::atomic::{AtomicU64, Ordering};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Fixed-seed FNV-1a fold implementing [`Hasher`].
#[derive(Clone, Debug)]
pub struct FingerprintHasher(u64);

impl FingerprintHasher {
    /// A fresh fold at the FNV offset basis.
    #[must_use]
    pub fn new() -> Self {
        Self(FNV_OFFSET)
    }
}

impl Default for FingerprintHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FingerprintHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 ^= u64::from(byte);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }
}

/// Fingerprint any hashable configuration value.
#[must_use]
pub fn fingerprint_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FingerprintHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// A process-unique token for configurations that cannot be summarized
/// structurally (closures). Each call returns a new value, never zero.
#[must_use]
pub fn nonce() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_fold_equal() {
        assert_eq!(fingerprint_of(&(1_u32, 2.5_f64.to_bits())), fingerprint_of(&(1_u32, 2.5_f64.to_bits())));
        assert_eq!(fingerprint_of("grid"), fingerprint_of("grid"));
    }

    #[test]
    fn different_values_fold_differently() {
        assert_ne!(fingerprint_of(&1_u32), fingerprint_of(&2_u32));
        assert_ne!(fingerprint_of("axis-x"), fingerprint_of("axis-y"));
    }

    #[test]
    fn nonces_are_unique_and_nonzero() {
        let a = nonce();
        let b = nonce();
        assert_ne!(a, 0);
        assert_ne!(a, b);
    }
}
