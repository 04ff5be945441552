// Copyright 2026 the Towline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing tests for the delegated multi-instance manager.

use kurbo::{Point, Rect, Vec2};
use towline_delegate::DelegatedDrags;
use towline_engine::DragOptions;
use towline_host_ref::RefHost;
use towline_plugins::{Controls, Grid, IgnoreMultitouch, Transform};
use towline_protocol::{PointerId, PointerInput};

const OUTER: u32 = 1;
const INNER: u32 = 2;
const CHILD_OF_INNER: u32 = 3;
const UNMANAGED: u32 = 9;
const POINTER: PointerId = PointerId(10);

fn host() -> RefHost {
    let mut host = RefHost::new();
    host.insert_node(OUTER, Rect::new(0.0, 0.0, 300.0, 300.0));
    host.insert_node(INNER, Rect::new(50.0, 50.0, 150.0, 150.0));
    host.insert_node(CHILD_OF_INNER, Rect::new(60.0, 60.0, 90.0, 90.0));
    host
}

fn sample(x: f64, y: f64, t: u64) -> PointerInput {
    PointerInput::new(Point::new(x, y), POINTER, t)
}

#[test]
fn press_routes_to_the_nearest_managed_ancestor() {
    let mut host = host();
    let mut drags: DelegatedDrags<RefHost> = DelegatedDrags::new();
    drags.attach(&mut host, OUTER, vec![], DragOptions::new());
    drags.attach(&mut host, INNER, vec![], DragOptions::new());

    // Press lands on a child of INNER; INNER is nearer than OUTER.
    let hit = drags.pointer_down(&mut host, &[OUTER, INNER, CHILD_OF_INNER], sample(70.0, 70.0, 0));
    assert_eq!(hit, Some(INNER));
    assert_eq!(drags.active(), Some(INNER));

    drags.pointer_move(&mut host, sample(100.0, 70.0, 16));
    assert_eq!(drags.instance(INNER).unwrap().offset(), Vec2::new(30.0, 0.0));
    assert_eq!(drags.instance(OUTER).unwrap().offset(), Vec2::ZERO);

    drags.pointer_up(&mut host, sample(100.0, 70.0, 32));
    assert_eq!(drags.active(), None);
}

#[test]
fn press_with_no_managed_ancestor_is_ignored() {
    let mut host = host();
    let mut drags: DelegatedDrags<RefHost> = DelegatedDrags::new();
    drags.attach(&mut host, OUTER, vec![], DragOptions::new());

    let hit = drags.pointer_down(&mut host, &[UNMANAGED], sample(0.0, 0.0, 0));
    assert_eq!(hit, None);
    assert_eq!(drags.active(), None);

    // Moves and releases without an active node are no-ops.
    drags.pointer_move(&mut host, sample(50.0, 50.0, 16));
    drags.pointer_up(&mut host, sample(50.0, 50.0, 32));
    assert_eq!(drags.instance(OUTER).unwrap().offset(), Vec2::ZERO);
}

#[test]
fn moves_follow_the_active_node_not_the_pointer_position() {
    let mut host = host();
    let mut drags: DelegatedDrags<RefHost> = DelegatedDrags::new();
    drags.attach(&mut host, OUTER, vec![], DragOptions::new());
    drags.attach(&mut host, INNER, vec![], DragOptions::new());

    drags.pointer_down(&mut host, &[OUTER, INNER], sample(60.0, 60.0, 0));
    assert_eq!(drags.active(), Some(INNER));

    // The pointer is far outside INNER now; the interaction still owns it.
    drags.pointer_move(&mut host, sample(280.0, 280.0, 16));
    assert_eq!(
        drags.instance(INNER).unwrap().offset(),
        Vec2::new(220.0, 220.0)
    );
    drags.pointer_up(&mut host, sample(280.0, 280.0, 32));
}

#[test]
fn presses_during_an_interaction_go_to_the_active_node() {
    let mut host = host();
    let mut drags: DelegatedDrags<RefHost> = DelegatedDrags::new();
    drags.attach(
        &mut host,
        OUTER,
        vec![Box::new(IgnoreMultitouch::new())],
        DragOptions::new(),
    );
    drags.attach(&mut host, INNER, vec![], DragOptions::new());

    drags.pointer_down(&mut host, &[OUTER], sample(10.0, 10.0, 0));
    drags.pointer_move(&mut host, sample(30.0, 10.0, 16));
    assert_eq!(drags.active(), Some(OUTER));

    // A second pointer presses INNER; it must not start a second
    // interaction, and the multitouch policy on the active node cancels.
    let second = PointerInput::new(Point::new(60.0, 60.0), PointerId(11), 20);
    let hit = drags.pointer_down(&mut host, &[OUTER, INNER], second);
    assert_eq!(hit, Some(OUTER));
    assert!(!drags.instance(INNER).unwrap().is_interacting());
    assert_eq!(drags.active(), None, "multitouch cancellation went idle");
}

#[test]
fn press_path_reaches_the_instance_for_control_regions() {
    let mut host = host();
    let mut drags: DelegatedDrags<RefHost> = DelegatedDrags::new();
    // CHILD_OF_INNER is a cancel region inside INNER.
    drags.attach(
        &mut host,
        INNER,
        vec![Box::new(Controls::cancels([CHILD_OF_INNER]))],
        DragOptions::new(),
    );

    let hit = drags.pointer_down(&mut host, &[INNER, CHILD_OF_INNER], sample(70.0, 70.0, 0));
    assert_eq!(hit, Some(INNER), "the press still resolved to INNER");
    assert_eq!(drags.active(), None, "but the cancel region vetoed the start");

    // Pressing INNER outside the cancel region works.
    drags.pointer_down(&mut host, &[INNER], sample(55.0, 55.0, 10));
    assert_eq!(drags.active(), Some(INNER));
    drags.pointer_up(&mut host, sample(55.0, 55.0, 20));
}

#[test]
fn live_plugin_replacement_mid_drag_through_the_manager() {
    let mut host = host();
    let mut drags: DelegatedDrags<RefHost> = DelegatedDrags::new();
    drags.attach(
        &mut host,
        OUTER,
        vec![Box::new(Transform::new())],
        DragOptions::new(),
    );

    drags.pointer_down(&mut host, &[OUTER], sample(0.0, 0.0, 0));
    drags.pointer_move(&mut host, sample(33.0, 0.0, 16));
    assert_eq!(drags.instance(OUTER).unwrap().offset(), Vec2::new(33.0, 0.0));

    assert!(drags.update(
        &mut host,
        OUTER,
        vec![
            Box::new(Grid::new(50.0, 50.0).unwrap()),
            Box::new(Transform::new()),
        ],
    ));

    drags.pointer_move(&mut host, sample(40.0, 0.0, 32));
    assert_eq!(
        drags.instance(OUTER).unwrap().offset(),
        Vec2::new(83.0, 0.0),
        "residual step quantized by the live-swapped grid"
    );
    drags.pointer_up(&mut host, sample(40.0, 0.0, 48));
}

#[test]
fn destroying_the_active_node_ends_its_interaction() {
    let mut host = host();
    let mut drags: DelegatedDrags<RefHost> = DelegatedDrags::new();
    drags.attach(&mut host, OUTER, vec![], DragOptions::new());

    drags.pointer_down(&mut host, &[OUTER], sample(0.0, 0.0, 0));
    drags.pointer_move(&mut host, sample(10.0, 0.0, 16));
    assert_eq!(host.captured(), Some((OUTER, POINTER)));

    assert!(drags.destroy(&mut host, OUTER));
    assert_eq!(drags.active(), None);
    assert_eq!(host.captured(), None);
    assert!(drags.is_empty());
}

#[test]
fn duplicate_attach_is_refused() {
    let mut host = host();
    let mut drags: DelegatedDrags<RefHost> = DelegatedDrags::new();
    assert!(drags.attach(&mut host, OUTER, vec![], DragOptions::new()));
    assert!(!drags.attach(&mut host, OUTER, vec![], DragOptions::new()));
    assert_eq!(drags.len(), 1);
}
