// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mutable interaction context shared by every hook of one node.
//!
//! One [`DragContext`] exists per managed node. It is passed `&mut` into each
//! hook invocation and is the *sole* channel for cross-plugin communication:
//! proposals, pointer bookkeeping, and the geometry snapshot all live here.
//! Plugins keep their private state in their own fields, never in the context.

use kurbo::{Point, Rect, Vec2};
use smallvec::SmallVec;

use crate::host::PointerId;

/// The in-flight movement candidate for the current phase, per axis.
///
/// `None` on an axis means "no opinion, do not move this axis"; the engine
/// treats it as zero when committing. The last plugin in the chain to write an
/// axis wins.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Proposed {
    /// Candidate horizontal movement, in layout pixels.
    pub x: Option<f64>,
    /// Candidate vertical movement, in layout pixels.
    pub y: Option<f64>,
}

impl Proposed {
    /// A proposal with both axes populated.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Collapse to a concrete vector, reading absent axes as zero.
    #[must_use]
    pub fn resolve(self) -> Vec2 {
        Vec2::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }

    /// Drop both opinions.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// `true` when neither axis carries an opinion.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

/// Shared, mutable state of one node's interactions.
///
/// Field ownership: the engine writes everything here; plugins may read
/// anything and may write [`proposed`](Self::proposed) and
/// [`dragged_node`](Self::dragged_node). Reassigning `dragged_node` makes the
/// engine transfer pointer capture (release old, acquire new) after the
/// current chain.
#[derive(Clone, Debug)]
pub struct DragContext<N> {
    /// The in-flight movement candidate for the current phase.
    pub proposed: Proposed,
    /// Raw displacement since interaction start, scaled to layout pixels,
    /// before any plugin adjustment.
    pub delta: Vec2,
    /// Cumulative committed offset since the node became managed. The only
    /// value that is "real" across interactions.
    pub offset: Vec2,
    /// Value of [`offset`](Self::offset) captured when the current
    /// interaction began. Relates `offset` to
    /// [`cached_root_rect`](Self::cached_root_rect), which was measured at
    /// the same instant.
    pub start_offset: Vec2,
    /// Anchor pointer position recorded at interaction start.
    pub initial: Point,
    /// `true` from a qualifying pointer-down until the interaction ends.
    pub is_interacting: bool,
    /// `true` once movement thresholds are met; implies `is_interacting`.
    pub is_dragging: bool,
    /// The node the behavior was attached to.
    pub root_node: N,
    /// The node holding pointer capture. Starts as `root_node`; a plugin may
    /// redirect it.
    pub currently_dragged_node: N,
    /// Rendered bounding rectangle of `root_node`, snapshotted once per
    /// interaction start. Not refreshed per move; plugins needing fresher
    /// geometry must measure through the host themselves.
    pub cached_root_rect: Rect,
    /// Layout ÷ rendered width at interaction start; pointer deltas are
    /// multiplied by this to land in layout pixels.
    pub inverse_scale: f64,
    /// Pointer of the sample currently being processed.
    pub pointer: PointerId,
    /// All pointers currently down on the node, initiating pointer first.
    pub active_pointers: SmallVec<[PointerId; 2]>,
    /// Root→target propagation path of the initiating press. Empty outside an
    /// interaction.
    pub press_path: SmallVec<[N; 4]>,
}

impl<N: Copy> DragContext<N> {
    /// A fresh idle context for `node`.
    #[must_use]
    pub fn new(node: N) -> Self {
        Self {
            proposed: Proposed::default(),
            delta: Vec2::ZERO,
            offset: Vec2::ZERO,
            start_offset: Vec2::ZERO,
            initial: Point::ZERO,
            is_interacting: false,
            is_dragging: false,
            root_node: node,
            currently_dragged_node: node,
            cached_root_rect: Rect::ZERO,
            inverse_scale: 1.0,
            pointer: PointerId(-1),
            active_pointers: SmallVec::new(),
            press_path: SmallVec::new(),
        }
    }

    /// Reset everything that belongs to a single interaction, keeping the
    /// committed offset and node identity.
    pub fn reset_interaction(&mut self) {
        self.proposed.clear();
        self.delta = Vec2::ZERO;
        self.start_offset = self.offset;
        self.initial = Point::ZERO;
        self.is_interacting = false;
        self.is_dragging = false;
        self.currently_dragged_node = self.root_node;
        self.inverse_scale = 1.0;
        self.pointer = PointerId(-1);
        self.active_pointers.clear();
        self.press_path.clear();
    }
}
