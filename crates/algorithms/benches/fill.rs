//! Benchmarks for minima filling

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pitfill_algorithms::fill::{fill_minima, FillMinimaParams};
use pitfill_core::{Connectivity, Raster};

const NULL: i16 = -9999;

/// Create a band with bowl shape: higher edges sloping toward a central pit
fn create_bowl(size: usize) -> Raster<i16> {
    let center = size as f64 / 2.0;
    let data = (0..size * size)
        .map(|i| {
            let (row, col) = (i / size, i % size);
            let dx = col as f64 - center;
            let dy = row as f64 - center;
            let dist = (dx * dx + dy * dy).sqrt();
            // Bowl + small ripple so there are many local minima
            let noise = ((row * 7 + col * 13) % 17) as i16;
            (dist * 4.0) as i16 + noise
        })
        .collect();
    Raster::from_vec(data, size, size).unwrap()
}

/// Same bowl with a square no-data hole in one quadrant
fn create_bowl_with_hole(size: usize) -> Raster<i16> {
    let mut band = create_bowl(size);
    let (from, to) = (size / 8, size / 4);
    for row in from..to {
        for col in from..to {
            band.set(row, col, NULL).unwrap();
        }
    }
    band
}

fn bench_fill_border(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill/border_seeded");
    for size in [128, 256, 512, 1024] {
        let band = create_bowl(size);
        let stats = band.statistics();
        let boundary = stats.min.unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| fill_minima(black_box(&band), &FillMinimaParams::new(NULL, boundary)).unwrap())
        });
    }
    group.finish();
}

fn bench_fill_null_rim(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill/null_rim_seeded");
    for size in [128, 256, 512, 1024] {
        let band = create_bowl_with_hole(size);
        let boundary = create_bowl(size).statistics().min.unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| fill_minima(black_box(&band), &FillMinimaParams::new(NULL, boundary)).unwrap())
        });
    }
    group.finish();
}

fn bench_connectivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill/connectivity");
    let band = create_bowl(512);
    let boundary = band.statistics().min.unwrap();
    for connectivity in [Connectivity::Four, Connectivity::Eight, Connectivity::Diagonal] {
        let params = FillMinimaParams::new(NULL, boundary).with_connectivity(connectivity);
        group.bench_with_input(
            BenchmarkId::from_parameter(connectivity),
            &connectivity,
            |b, _| b.iter(|| fill_minima(black_box(&band), &params).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_fill_border,
    bench_fill_null_rim,
    bench_connectivity,
);
criterion_main!(benches);
