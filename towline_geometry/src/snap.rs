// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid snapping for proposed movement deltas.

#[cfg(feature = "std")]
#[inline]
fn ceil(value: f64) -> f64 {
    value.ceil()
}

#[cfg(not(feature = "std"))]
#[inline]
fn ceil(value: f64) -> f64 {
    libm::ceil(value)
}

/// Snap a single-axis movement to the next multiple of `step`, rounding up.
///
/// Returns `None` when `step` is zero: a zero step means the axis is locked
/// and the caller should drop its movement opinion for that axis entirely,
/// leaving the committed value where it already is.
///
/// Negative movements snap toward zero (`ceil` semantics), so the result is
/// always an exact multiple of `step` regardless of direction.
#[must_use]
pub fn snap_axis(value: f64, step: f64) -> Option<f64> {
    if step == 0.0 {
        return None;
    }
    Some(ceil(value / step) * step)
}

/// Snap both axes of a movement, returning per-axis results.
///
/// Each axis follows [`snap_axis`]: `None` where the step locks the axis,
/// `Some(multiple)` otherwise.
#[must_use]
pub fn snap_pair(x: f64, y: f64, step_x: f64, step_y: f64) -> (Option<f64>, Option<f64>) {
    (snap_axis(x, step_x), snap_axis(y, step_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_up_to_next_multiple() {
        assert_eq!(snap_axis(7.0, 10.0), Some(10.0));
        assert_eq!(snap_axis(10.0, 10.0), Some(10.0));
        assert_eq!(snap_axis(10.1, 10.0), Some(20.0));
    }

    #[test]
    fn zero_step_locks_axis() {
        assert_eq!(snap_axis(123.0, 0.0), None);
        assert_eq!(snap_pair(5.0, 5.0, 0.0, 4.0), (None, Some(8.0)));
    }

    #[test]
    fn negative_values_snap_toward_zero() {
        // ceil(-7 / 10) * 10 == 0, ceil(-12 / 10) * 10 == -10.
        assert_eq!(snap_axis(-7.0, 10.0), Some(-0.0));
        assert_eq!(snap_axis(-12.0, 10.0), Some(-10.0));
    }

    #[test]
    fn result_is_exact_multiple() {
        for raw in [-33.3, -0.2, 0.0, 0.4, 17.9, 250.01] {
            let quotient = snap_axis(raw, 12.5).unwrap() / 12.5;
            assert_eq!(quotient % 1.0, 0.0, "{raw} snapped off the 12.5 grid");
        }
    }

    #[test]
    fn fractional_steps() {
        assert_eq!(snap_axis(0.6, 0.5), Some(1.0));
        assert_eq!(snap_axis(0.5, 0.5), Some(0.5));
    }
}
