// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Envelope clamping for proposed movement steps.

use kurbo::{Rect, Vec2};

/// Clamp a movement step so that `rect` shifted by the step stays inside
/// `bound`, edges inclusive.
///
/// `rect` is the moving rectangle's current position; `step` is the candidate
/// translation for this move. The permitted step range per axis is
/// `[bound.min - rect.min, bound.max - rect.max]`.
///
/// When the envelope is too small to contain the rectangle on an axis, the
/// range is inverted; the step then pins the rectangle's minimum edge to the
/// envelope's minimum edge, a deterministic choice that keeps repeated moves
/// stable.
#[must_use]
pub fn clamp_step(bound: Rect, rect: Rect, step: Vec2) -> Vec2 {
    Vec2::new(
        clamp_axis(bound.x0 - rect.x0, bound.x1 - rect.x1, step.x),
        clamp_axis(bound.y0 - rect.y0, bound.y1 - rect.y1, step.y),
    )
}

fn clamp_axis(lo: f64, hi: f64, value: f64) -> f64 {
    if lo > hi {
        // Rectangle wider/taller than the envelope.
        lo
    } else {
        value.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUND: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    #[test]
    fn step_within_envelope_is_untouched() {
        let rect = Rect::new(10.0, 10.0, 30.0, 30.0);
        let step = Vec2::new(5.0, -5.0);
        assert_eq!(clamp_step(BOUND, rect, step), step);
    }

    #[test]
    fn step_is_clamped_at_the_far_edge() {
        let rect = Rect::new(60.0, 0.0, 80.0, 20.0);
        let clamped = clamp_step(BOUND, rect, Vec2::new(50.0, 0.0));
        assert_eq!(clamped, Vec2::new(20.0, 0.0));
    }

    #[test]
    fn step_is_clamped_at_the_near_edge() {
        let rect = Rect::new(10.0, 10.0, 30.0, 30.0);
        let clamped = clamp_step(BOUND, rect, Vec2::new(-25.0, -25.0));
        assert_eq!(clamped, Vec2::new(-10.0, -10.0));
    }

    #[test]
    fn edges_are_inclusive() {
        let rect = Rect::new(0.0, 0.0, 20.0, 20.0);
        // Exactly reaching the far edge is permitted.
        let clamped = clamp_step(BOUND, rect, Vec2::new(80.0, 80.0));
        assert_eq!(clamped, Vec2::new(80.0, 80.0));
    }

    #[test]
    fn oversized_rect_pins_to_min_edge() {
        let rect = Rect::new(-10.0, 20.0, 150.0, 40.0);
        let clamped = clamp_step(BOUND, rect, Vec2::new(30.0, 0.0));
        // x range is inverted ([10, -50]); pin the left edge to bound.x0.
        assert_eq!(clamped.x, 10.0);
        assert_eq!(clamped.y, 0.0);
    }

    #[test]
    fn zero_step_stays_zero_inside_envelope() {
        let rect = Rect::new(40.0, 40.0, 60.0, 60.0);
        assert_eq!(clamp_step(BOUND, rect, Vec2::ZERO), Vec2::ZERO);
    }
}
