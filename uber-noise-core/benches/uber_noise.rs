#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use uber_noise_core::{GridSpec, NoiseOptions, Position, UberNoise, sample_grid};

fn simple() -> UberNoise {
    UberNoise::new(NoiseOptions::seeded("bench"))
}

fn medium() -> UberNoise {
    UberNoise::new(NoiseOptions {
        octaves: Some(5),
        sharpness: Some(0.5.into()),
        ..NoiseOptions::seeded("bench")
    })
}

fn complex() -> UberNoise {
    UberNoise::new(NoiseOptions {
        octaves: Some(6),
        gain: Some(0.5.into()),
        power: Some(
            NoiseOptions {
                min: Some(1.0.into()),
                max: Some(3.0.into()),
                ..NoiseOptions::default()
            }
            .into(),
        ),
        warp: Some(1.5.into()),
        warp2: Some(0.5.into()),
        sharpness: Some(NoiseOptions::default().into()),
        steps: Some(32.0.into()),
        ..NoiseOptions::seeded("bench")
    })
}

fn positions(dimension: usize) -> Vec<Position> {
    (0..256)
        .map(|i| {
            let t = f64::from(i) * 0.173;
            let at = Position::new(t, t * 0.61 - 11.0);
            match dimension {
                2 => at,
                3 => at.with_z(t * 1.7),
                _ => at.with_z(t * 1.7).with_w(-t),
            }
        })
        .collect()
}

// ── Engine configurations ───────────────────────────────────────────────────

fn bench_engines(c: &mut Criterion) {
    let engines = [("simple", simple()), ("medium", medium()), ("complex", complex())];

    for dimension in [2, 3, 4] {
        let coords = positions(dimension);
        let mut group = c.benchmark_group(format!("uber_noise_{dimension}d"));
        group.throughput(criterion::Throughput::Elements(coords.len() as u64));

        for (name, noise) in &engines {
            group.bench_with_input(BenchmarkId::from_parameter(name), &coords, |b, coords| {
                b.iter(|| {
                    for &at in coords {
                        black_box(noise.evaluate(black_box(at)));
                    }
                });
            });
        }
        group.finish();
    }
}

// ── Construction ────────────────────────────────────────────────────────────

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("uber_noise_construct");
    group.bench_function("simple", |b| b.iter(|| black_box(simple())));
    group.bench_function("complex", |b| b.iter(|| black_box(complex())));
    group.finish();
}

// ── Grid sampling ───────────────────────────────────────────────────────────

fn bench_grid(c: &mut Criterion) {
    let noise = medium();
    let mut group = c.benchmark_group("uber_noise_grid");

    for size in [64, 256] {
        let spec = GridSpec {
            width: size,
            height: size,
            step: 0.05,
            ..GridSpec::default()
        };
        group.throughput(criterion::Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &spec, |b, spec| {
            b.iter(|| black_box(sample_grid(&noise, spec)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engines, bench_construction, bench_grid);
criterion_main!(benches);
