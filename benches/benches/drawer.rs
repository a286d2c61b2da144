// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the drawer drag loop and its style plumbing.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use kurbo::Rect;
use understory_drawer::dialog::OpenFlag;
use understory_drawer::drag::{DragSession, DragToken, PointerId, PointerSample};
use understory_drawer::headless::HeadlessSurface;
use understory_drawer::{Drawer, DrawerConfig};
use understory_inline_style::{InlineStyle, PropertySet, StyleProperty, StyleTarget, apply, capture};
use understory_timing::TimerQueue;

const P: PointerId = PointerId(1);

fn open_drawer() -> (Drawer<HeadlessSurface, OpenFlag>, HeadlessSurface) {
    let content = HeadlessSurface::new(Rect::new(0.0, 444.0, 390.0, 844.0));
    let mut drawer = Drawer::new(DrawerConfig::default(), OpenFlag(false));
    drawer.bind_root(HeadlessSurface::new(Rect::new(0.0, 0.0, 390.0, 844.0)));
    drawer.bind_overlay(HeadlessSurface::new(Rect::new(0.0, 0.0, 390.0, 844.0)));
    drawer.bind_content(content.clone());
    drawer.bind_drag_handle(HeadlessSurface::new(Rect::new(170.0, 452.0, 220.0, 462.0)));
    drawer.open(0);
    drawer.advance(1_000);
    (drawer, content)
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("drawer/drag");

    group.bench_function("session_on_move", |b| {
        let mut session = DragSession::new(
            DragToken::new(1, P),
            &PointerSample::new(P, 0.0, 460.0, 0),
            400.0,
            false,
        );
        let mut y = 460.0;
        b.iter(|| {
            y = if y > 800.0 { 400.0 } else { y + 3.0 };
            black_box(session.on_move(black_box(y), 0.93));
        });
    });

    for moves in [10_usize, 60, 240] {
        group.bench_with_input(
            BenchmarkId::new("gesture_with_surfaces", moves),
            &moves,
            |b, &moves| {
                b.iter_batched(
                    open_drawer,
                    |(mut drawer, content)| {
                        let token = drawer
                            .pointer_down(PointerSample::new(P, 195.0, 460.0, 2_000), false)
                            .expect("drawer is bound");
                        for i in 0..moves {
                            let y = 460.0 + i as f64;
                            let t = 2_000 + i as u64 * 16;
                            black_box(drawer.pointer_move(token, PointerSample::new(P, 195.0, y, t)));
                        }
                        let up = PointerSample::new(P, 195.0, 460.0 + moves as f64, 2_000 + moves as u64 * 16);
                        black_box(drawer.pointer_up(token, up, 844.0));
                        black_box(content.write_count());
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_style(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline_style");
    let mut style = InlineStyle::new();
    style.set_inline_style(StyleProperty::Transform, "translate3d(0, 0, 0)");
    style.set_inline_style(StyleProperty::Transition, "none");

    group.bench_function("capture_all", |b| {
        b.iter(|| black_box(capture(black_box(&style), PropertySet::all())));
    });

    let snapshot = capture(&style, PropertySet::all());
    group.bench_function("restore_all", |b| {
        b.iter_batched(
            || style.clone(),
            |mut target| {
                apply(Some(&mut target), &snapshot);
                black_box(target);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_timers(c: &mut Criterion) {
    c.bench_function("timing/schedule_and_drain_64", |b| {
        b.iter(|| {
            let mut timers = TimerQueue::new();
            for i in 0..64_u64 {
                timers.schedule_after(0, (i * 37) % 500, i);
            }
            let mut fired = 0;
            while let Some((_, payload)) = timers.pop_due(1_000) {
                fired += payload;
            }
            black_box(fired)
        });
    });
}

criterion_group!(benches, bench_drag, bench_style, bench_timers);
criterion_main!(benches);
