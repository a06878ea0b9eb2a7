//! Benchmarks for the proximity-link builders and the physics step.
//!
//! Run with: `cargo bench -p field-core`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use field_core::physics::step;
use field_core::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn sphere_cloud(n: usize) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(n as u64);
    (0..n)
        .map(|_| {
            let v = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            v.normalize_or_zero() * 25.0
        })
        .collect()
}

fn bench_link_builders(c: &mut Criterion) {
    let mut group = c.benchmark_group("link_rebuild");
    let params = FieldConfig::neural().links;
    let uncapped = LinkParams {
        cap: usize::MAX,
        ..params.clone()
    };

    for n in [500usize, 2_000, 10_000] {
        let pts = sphere_cloud(n);
        let mut out = EdgeSet::with_capacity(params.cap);

        group.bench_with_input(BenchmarkId::new("quadratic_capped", n), &pts, |b, pts| {
            let mut builder = QuadraticLinks;
            b.iter(|| builder.rebuild(black_box(pts), &params, &mut out))
        });
        group.bench_with_input(BenchmarkId::new("grid_capped", n), &pts, |b, pts| {
            let mut builder = GridLinks::new();
            b.iter(|| builder.rebuild(black_box(pts), &params, &mut out))
        });
        group.bench_with_input(BenchmarkId::new("quadratic_uncapped", n), &pts, |b, pts| {
            let mut builder = QuadraticLinks;
            b.iter(|| builder.rebuild(black_box(pts), &uncapped, &mut out))
        });
        group.bench_with_input(BenchmarkId::new("grid_uncapped", n), &pts, |b, pts| {
            let mut builder = GridLinks::new();
            b.iter(|| builder.rebuild(black_box(pts), &uncapped, &mut out))
        });
    }

    group.finish();
}

fn bench_physics_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("physics_step");

    for cfg in [FieldConfig::ambient(), FieldConfig::neural()] {
        let name = if cfg.audio_reactive { "neural" } else { "ambient" };
        let mut rng = StdRng::seed_from_u64(1);
        let mut groups = generate_field(&cfg, Viewport::default(), &mut rng);
        let sample = AmplitudeSample::new(&[0.25; 1024]).ok();
        let pointer = PointerState::new(0.3, -0.2);
        let mut t = 0.0f32;

        group.bench_function(name, |b| {
            b.iter(|| {
                t += 1.0 / 60.0;
                for g in &mut groups {
                    step(
                        g,
                        &cfg.physics,
                        cfg.audio_reactive,
                        pointer,
                        sample.as_ref(),
                        t,
                    );
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_link_builders, bench_physics_step);
criterion_main!(benches);
