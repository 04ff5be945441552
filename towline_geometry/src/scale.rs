// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inverse scale: mapping pointer pixels back to layout pixels.

/// Compute the factor that converts pointer-space deltas into layout-space
/// deltas for a node whose rendering may be visually scaled.
///
/// `layout_width` is the node's untransformed layout width (what the host
/// reports as the element's own size); `rendered_width` is the width of its
/// rendered bounding rectangle. When a transform scales the node down, a
/// pointer pixel covers more than one layout pixel, so deltas must be
/// multiplied by `layout / rendered` to land where the pointer actually is.
///
/// Degenerate inputs (zero, negative, or non-finite widths) yield `1.0` so an
/// unmeasurable node still drags one-to-one.
#[must_use]
pub fn inverse_scale(layout_width: f64, rendered_width: f64) -> f64 {
    if !(layout_width > 0.0) || !(rendered_width > 0.0) {
        return 1.0;
    }
    let scale = layout_width / rendered_width;
    if scale.is_finite() { scale } else { 1.0 }
}
