//! Benchmarks for the world tick and the steering rules.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;

use wordswarm::rules::{cohesion, separation, Neighborhood};
use wordswarm::{Agent, SpatialConfig, SpatialGrid, World};

/// A loose swarm of `count` separated letters spread over the boundary sphere.
fn scene(count: usize) -> Vec<Agent> {
    (0..count)
        .map(|i| {
            let angle = i as f32 * 2.399_963;
            let radius = 7.5 * ((i as f32 + 0.5) / count as f32).sqrt();
            Agent::separated(
                (b'a' + (i % 26) as u8) as char,
                Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0),
                Vec3::new(-angle.sin(), angle.cos(), 0.0),
            )
        })
        .collect()
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for count in [100, 500, 2000] {
        group.bench_with_input(BenchmarkId::new("brute_force", count), &count, |b, &count| {
            let mut world = World::with_seed(1);
            world.extend(scene(count));
            b.iter(|| black_box(world.tick(1.0 / 60.0)))
        });

        group.bench_with_input(BenchmarkId::new("grid", count), &count, |b, &count| {
            let mut world = World::with_seed(1).with_spatial(SpatialConfig::new(2.0));
            world.extend(scene(count));
            b.iter(|| black_box(world.tick(1.0 / 60.0)))
        });
    }

    group.finish();
}

fn bench_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("rules");
    let agents = scene(1000);
    let grid = SpatialGrid::build(&agents, 2.0);

    group.bench_function("separation_all", |b| {
        let hood = Neighborhood::all(&agents);
        b.iter(|| black_box(separation(&agents[500], &hood, 1.0, 2.0)))
    });

    group.bench_function("separation_grid", |b| {
        let hood = Neighborhood::indexed(&agents, &grid);
        b.iter(|| black_box(separation(&agents[500], &hood, 1.0, 2.0)))
    });

    group.bench_function("cohesion_all", |b| {
        let hood = Neighborhood::all(&agents);
        b.iter(|| black_box(cohesion(&agents[500], &hood, 8.0, 1.5, 0.3)))
    });

    group.bench_function("spatial_build", |b| {
        b.iter(|| black_box(SpatialGrid::build(&agents, 2.0)))
    });

    group.finish();
}

criterion_group!(benches, bench_tick, bench_rules);
criterion_main!(benches);
