// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fail-fast configuration errors.

use core::fmt;

/// A plugin was configured with values it cannot honor.
///
/// These surface synchronously from constructors, before the plugin ever
/// joins a set — a misconfigured plugin should fail loudly at the call site,
/// not silently mid-drag.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A grid step is negative or non-finite. Zero is legal (it locks the
    /// axis); anything below or outside the reals is not.
    InvalidGridStep {
        /// Which axis carried the bad step, `'x'` or `'y'`.
        axis: char,
        /// The rejected value.
        value: f64,
    },
    /// The same node appears in both the allow and the block region list.
    ConflictingControls,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGridStep { axis, value } => {
                write!(f, "invalid grid step on {axis} axis: {value}")
            }
            Self::ConflictingControls => {
                f.write_str("a node appears in both allow and block control regions")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
