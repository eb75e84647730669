//! Benchmarks for geo crate distance calculations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dronemap_geo::{distances_from, haversine_distance, BoundingBox, Coordinate};

fn create_test_points(count: usize) -> Vec<Coordinate> {
    (0..count)
        .map(|i| {
            // Generate points in a grid around Berlin
            let lat = 52.0 + (i as f64 * 0.01) % 2.0;
            let lng = 13.0 + (i as f64 * 0.01) % 2.0;
            Coordinate::new(lat, lng)
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let berlin = Coordinate::new(52.5200, 13.4050);
    let paris = Coordinate::new(48.8566, 2.3522);

    c.bench_function("haversine_single", |b| {
        b.iter(|| haversine_distance(black_box(&berlin), black_box(&paris)))
    });
}

fn bench_batch_distances(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_distances");
    let origin = Coordinate::new(50.0, 10.0);

    for size in [10, 100, 1000, 10000].iter() {
        let points = create_test_points(*size);

        group.bench_with_input(BenchmarkId::new("distances_from", size), size, |b, _| {
            b.iter(|| distances_from(black_box(&origin), black_box(&points)))
        });
    }

    group.finish();
}

fn bench_bounding_box(c: &mut Criterion) {
    let bbox = BoundingBox::new(53.0, 52.0, 14.0, 13.0);
    let points = create_test_points(1000);

    c.bench_function("bbox_contains_1000", |b| {
        b.iter(|| points.iter().filter(|p| bbox.contains(black_box(p))).count())
    });
}

criterion_group!(
    benches,
    bench_single_distance,
    bench_batch_distances,
    bench_bounding_box
);
criterion_main!(benches);
