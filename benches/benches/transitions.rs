// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use flourish::{AnimationCurve, Flourish, FlourishBuilder, Orientation};
use flourish_scene::{Arrangement, LocalNode, QueryFilter, Scene, Sizing};
use kurbo::{Point, Size};

const FRAME: Duration = Duration::from_millis(16);
const CELL: f64 = 40.0;

/// A column of `n` fixed-size overlay cells, each carrying its own panel.
fn gen_cells(n: usize) -> (Scene, Vec<Flourish<Scene>>) {
    let mut scene = Scene::new();
    let root = scene.insert(
        None,
        LocalNode {
            sizing: Sizing::Fixed(Size::new(CELL, CELL * n as f64)),
            arrangement: Arrangement::Column,
            ..Default::default()
        },
    );
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let cell = scene.insert(
            Some(root),
            LocalNode {
                sizing: Sizing::Fixed(Size::new(CELL, CELL)),
                ..Default::default()
            },
        );
        let flourish = FlourishBuilder::new(&scene, cell)
            .unwrap()
            .panel_layout(LocalNode::default())
            .orientation(Orientation::ALL[i % 4])
            .curve(AnimationCurve::Bounce)
            .duration_ms(300)
            .build(&mut scene)
            .unwrap();
        out.push(flourish);
    }
    scene.layout();
    for f in &mut out {
        let _ = f.on_parent_laid_out(&mut scene);
    }
    let _ = scene.commit();
    (scene, out)
}

fn bench_show_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("show_all");
    for &n in &[16usize, 128, 1024] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("tick_commit_n{}", n), |b| {
            b.iter_batched(
                || gen_cells(n),
                |(mut scene, mut panels)| {
                    for f in &mut panels {
                        f.show(&mut scene);
                    }
                    let mut running = true;
                    while running {
                        running = false;
                        for f in &mut panels {
                            running |= f.tick(&mut scene, FRAME);
                        }
                        black_box(scene.commit());
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_hit_mid_flight(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_mid_flight");
    let n = 256;
    let (mut scene, mut panels) = gen_cells(n);
    for f in &mut panels {
        f.show(&mut scene);
        let _ = f.tick(&mut scene, Duration::from_millis(150));
    }
    let _ = scene.commit();
    let filter = QueryFilter {
        visible_only: true,
        pickable_only: true,
    };
    group.throughput(Throughput::Elements(n as u64));
    group.bench_function("hit_test_point", |b| {
        b.iter(|| {
            for i in 0..n {
                let pt = Point::new(CELL * 0.5, CELL * (i as f64 + 0.5));
                black_box(scene.hit_test_point(pt, filter));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_show_all, bench_hit_mid_flight);
criterion_main!(benches);
