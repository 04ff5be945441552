// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid snapping: quantize every committed move to step multiples.

use towline_geometry::snap_axis;
use towline_protocol::fingerprint::fingerprint_of;
use towline_protocol::{DragContext, DragHost, DragPlugin, EffectQueue, HookError, Outcome};

use crate::error::ConfigError;

/// Rounds the in-flight proposal up to the nearest multiple of the configured
/// per-axis steps, so the committed offset is always an exact multiple too.
///
/// A zero step locks that axis to its last committed value (the proposal is
/// dropped, not rounded to zero — a later plugin could still reinstate it).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid {
    step_x: f64,
    step_y: f64,
}

impl Grid {
    /// A grid with the given per-axis steps.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidGridStep`] when a step is negative or
    /// non-finite. Zero is legal and locks the axis.
    pub fn new(step_x: f64, step_y: f64) -> Result<Self, ConfigError> {
        for (axis, value) in [('x', step_x), ('y', step_y)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidGridStep { axis, value });
            }
        }
        Ok(Self { step_x, step_y })
    }
}

impl<H: DragHost> DragPlugin<H> for Grid {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn live_update(&self) -> bool {
        true
    }

    fn fingerprint(&self) -> u64 {
        fingerprint_of(&(self.step_x.to_bits(), self.step_y.to_bits()))
    }

    fn drag(
        &mut self,
        cx: &mut DragContext<H::Node>,
        _host: &H,
        _fx: &mut EffectQueue<H>,
    ) -> Result<Outcome, HookError> {
        cx.proposed.x = cx.proposed.x.and_then(|v| snap_axis(v, self.step_x));
        cx.proposed.y = cx.proposed.y.and_then(|v| snap_axis(v, self.step_y));
        Ok(Outcome::Continue)
    }
}
