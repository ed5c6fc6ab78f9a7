// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for `seatmap_view2d`.
//!
//! These exercise the window invariants under arbitrary gesture sequences
//! and the reversibility of zoom and pan.

use kurbo::{Point, Rect, Size, Vec2};
use proptest::prelude::*;
use seatmap_view2d::{CullBackend, GridBuckets, LinearScan, ViewportController};

fn arena() -> ViewportController {
    ViewportController::new(Size::new(1400.0, 2600.0), Size::new(800.0, 600.0))
}

fn close(a: Rect, b: Rect, tol: f64) -> bool {
    (a.x0 - b.x0).abs() < tol
        && (a.y0 - b.y0).abs() < tol
        && (a.x1 - b.x1).abs() < tol
        && (a.y1 - b.y1).abs() < tol
}

#[derive(Clone, Debug)]
enum Op {
    Zoom(f64, Option<(f64, f64)>),
    BeginPan(f64, f64),
    MovePan(f64, f64),
    EndPan,
    BeginPinch(f64),
    MovePinch(f64, f64, f64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0.05..20.0_f64, proptest::option::of((0.0..1.0_f64, 0.0..1.0_f64)))
            .prop_map(|(f, o)| Op::Zoom(f, o)),
        (-500.0..1500.0_f64, -500.0..1500.0_f64).prop_map(|(x, y)| Op::BeginPan(x, y)),
        (-500.0..1500.0_f64, -500.0..1500.0_f64).prop_map(|(x, y)| Op::MovePan(x, y)),
        Just(Op::EndPan),
        (-10.0..400.0_f64).prop_map(Op::BeginPinch),
        (-10.0..400.0_f64, 0.0..1.0_f64, 0.0..1.0_f64).prop_map(|(d, x, y)| Op::MovePinch(d, x, y)),
    ]
}

proptest! {
    #[test]
    fn window_width_stays_in_limits(ops in proptest::collection::vec(op(), 0..64)) {
        let mut vp = arena();
        let limits = vp.zoom_limits();
        let aspect = 2600.0 / 1400.0;
        for op in ops {
            match op {
                Op::Zoom(f, o) => { vp.apply_zoom(f, o.map(Point::from)); }
                Op::BeginPan(x, y) => { vp.begin_pan(Point::new(x, y)); }
                Op::MovePan(x, y) => { vp.continue_pan(Point::new(x, y)); }
                Op::EndPan => vp.end_pan(),
                Op::BeginPinch(d) => { vp.begin_pinch(d); }
                Op::MovePinch(d, x, y) => { vp.continue_pinch(d, Some(Point::new(x, y))); }
            }
            let w = vp.window();
            prop_assert!(w.width() > 0.0 && w.height() > 0.0);
            prop_assert!(w.width() >= limits.min_width - 1e-6);
            prop_assert!(w.width() <= limits.max_width + 1e-6);
            prop_assert!((w.height() / w.width() - aspect).abs() < 1e-6);
        }
    }

    #[test]
    fn out_of_range_zoom_is_noop(factor in 0.01..10.0_f64, ox in 0.0..1.0_f64, oy in 0.0..1.0_f64) {
        let mut vp = arena();
        let before = vp.window();
        let width = before.width() * factor;
        let accepted = vp.apply_zoom(factor, Some(Point::new(ox, oy)));
        if !(400.0..=2800.0).contains(&width) {
            prop_assert!(!accepted);
            prop_assert_eq!(vp.window(), before);
        } else {
            prop_assert!(accepted);
        }
    }

    #[test]
    fn zoom_in_then_out_restores_window(ox in 0.0..1.0_f64, oy in 0.0..1.0_f64) {
        let mut vp = arena();
        let before = vp.window();
        prop_assert!(vp.apply_zoom(0.5, Some(Point::new(ox, oy))));
        prop_assert!(vp.apply_zoom(2.0, Some(Point::new(ox, oy))));
        prop_assert!(close(vp.window(), before, 1e-6));
    }

    #[test]
    fn pan_there_and_back_restores_origin(dx in -2000.0..2000.0_f64, dy in -2000.0..2000.0_f64) {
        let mut vp = arena();
        vp.apply_zoom(0.7, Some(Point::new(0.25, 0.75)));
        let before = vp.window();
        vp.pan_by_view(Vec2::new(dx, dy));
        vp.pan_by_view(Vec2::new(-dx, -dy));
        prop_assert!((vp.window().x0 - before.x0).abs() < 1e-6);
        prop_assert!((vp.window().y0 - before.y0).abs() < 1e-6);
    }

    #[test]
    fn grid_and_linear_agree(
        points in proptest::collection::vec((-100.0..1500.0_f64, -100.0..2700.0_f64), 0..300),
        zoom in 0.3..1.9_f64,
        ox in 0.0..1.0_f64,
        oy in 0.0..1.0_f64,
        padding in 0.0..250.0_f64,
    ) {
        let positions: Vec<Point> = points.into_iter().map(Point::from).collect();
        let mut vp = arena();
        vp.apply_zoom(zoom, Some(Point::new(ox, oy)));

        let linear = LinearScan::new(&positions);
        let mut grid = GridBuckets::new(64.0);
        grid.rebuild(&positions);

        let mut a = Vec::new();
        let mut b = Vec::new();
        vp.visible_slots(&linear, padding, &mut a);
        vp.visible_slots(&grid, padding, &mut b);
        prop_assert_eq!(&a, &b);

        let scanned: Vec<usize> = vp.visible_seats(0..positions.len(), padding, |i| positions[*i]);
        prop_assert_eq!(a, scanned);
    }
}

#[test]
fn drag_right_moves_window_left() {
    let mut vp = arena();
    vp.begin_pan(Point::new(400.0, 300.0));
    vp.continue_pan(Point::new(480.0, 300.0));
    assert!(vp.window().x0 < 0.0);
    assert_eq!(vp.window().y0, 0.0);
}
