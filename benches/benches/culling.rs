// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use seatmap_venue::synthetic;
use seatmap_view2d::{CullBackend, GridBuckets, InputProfile, LinearScan, ViewportController};

fn arena_positions() -> (Size, Vec<Point>) {
    let venue = synthetic::metropolis_arena(1).unwrap();
    let positions = venue.seats().map(|s| s.position()).collect();
    (venue.map().size(), positions)
}

/// Zooms the controller in by `steps` wheel clicks around the center.
fn zoomed(map: Size, steps: usize) -> ViewportController {
    let mut view = ViewportController::new(map, Size::new(700.0, 1300.0));
    for _ in 0..steps {
        view.apply_zoom(0.9, None);
    }
    view
}

fn bench_cull_backends(c: &mut Criterion) {
    let (map, positions) = arena_positions();
    let linear = LinearScan::new(&positions);
    let mut grid = GridBuckets::default();
    grid.rebuild(&positions);
    let padding = InputProfile::Pointer.default_padding();

    let mut group = c.benchmark_group("cull/arena");
    group.throughput(Throughput::Elements(positions.len() as u64));

    // 0 steps shows the whole map; 12 steps is close to the 400-unit floor.
    for steps in [0_usize, 6, 12] {
        let view = zoomed(map, steps);
        let mut out = Vec::with_capacity(positions.len());

        group.bench_function(BenchmarkId::new("visible_seats", steps), |b| {
            b.iter(|| {
                let visible = view.visible_seats(positions.iter(), padding, |p| **p);
                black_box(visible.len());
            });
        });
        group.bench_function(BenchmarkId::new("LinearScan", steps), |b| {
            b.iter(|| {
                view.visible_slots(&linear, padding, &mut out);
                black_box(out.len());
            });
        });
        group.bench_function(BenchmarkId::new("GridBuckets", steps), |b| {
            b.iter(|| {
                view.visible_slots(&grid, padding, &mut out);
                black_box(out.len());
            });
        });
    }
    group.finish();
}

fn bench_grid_rebuild(c: &mut Criterion) {
    let (_, positions) = arena_positions();
    let mut group = c.benchmark_group("cull/rebuild");
    for cell in [48.0_f64, 96.0, 192.0] {
        group.bench_function(BenchmarkId::new("GridBuckets", cell), |b| {
            b.iter(|| {
                let mut grid = GridBuckets::new(cell);
                grid.rebuild(black_box(&positions));
                black_box(grid.occupied_cells());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cull_backends, bench_grid_rebuild);
criterion_main!(benches);
