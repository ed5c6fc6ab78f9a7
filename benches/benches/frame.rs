// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use seatmap_engine::{CullingMode, EngineConfig, InputEvent, SeatMapSession};
use seatmap_selection::MemoryStore;
use seatmap_venue::synthetic;

fn session(culling: CullingMode) -> SeatMapSession<MemoryStore> {
    let config = EngineConfig {
        culling,
        ..EngineConfig::default()
    };
    let mut session = SeatMapSession::new(config, MemoryStore::new(), Size::new(700.0, 1300.0));
    session.complete_load(synthetic::metropolis_arena(3));
    for _ in 0..8 {
        session.handle(&InputEvent::Wheel {
            delta_y: -1.0,
            position: Point::new(350.0, 650.0),
        });
    }
    session
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("session/frame");
    for (name, mode) in [("linear", CullingMode::Linear), ("grid", CullingMode::Grid)] {
        let session = session(mode);
        group.bench_function(BenchmarkId::new("frame", name), |b| {
            b.iter(|| black_box(session.frame().map(|f| f.visible.len())));
        });
    }
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let mut session = session(CullingMode::Linear);
    session.handle(&InputEvent::PointerDown {
        position: Point::new(350.0, 650.0),
    });
    let mut x = 350.0;
    c.bench_function("session/drag_move", |b| {
        b.iter(|| {
            x = if x > 600.0 { 100.0 } else { x + 1.0 };
            black_box(session.handle(&InputEvent::PointerMove {
                position: Point::new(x, 650.0),
            }));
        });
    });
}

criterion_group!(benches, bench_frame, bench_drag);
criterion_main!(benches);
