//! Benchmarks for the geometry toolkit.

use criterion::{criterion_group, criterion_main, Criterion};

use atoll::prelude::*;
use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Two point clusters joined by a thin bridge, with the outer rectangle as
/// the convex hull.
fn cluster_cloud() -> (Vec<Point2<f64>>, Vec<usize>) {
    let mut points = Vec::new();
    for j in 0..5 {
        for i in 0..5 {
            points.push(Point2::new(2.0 + i as f64 * 4.0, 2.0 + j as f64 * 4.0));
            points.push(Point2::new(62.0 + i as f64 * 4.0, 2.0 + j as f64 * 4.0));
        }
    }
    for i in 0..3 {
        points.push(Point2::new(28.0 + i as f64 * 8.0, 10.0));
    }
    let corner = points.len();
    points.extend([
        Point2::new(0.0, 0.0),
        Point2::new(80.0, 0.0),
        Point2::new(80.0, 20.0),
        Point2::new(0.0, 20.0),
    ]);
    (points, vec![corner, corner + 1, corner + 2, corner + 3])
}

/// A unit quad split into two solid triangles plus its ghost closure.
fn split_quad() -> DualMesh {
    let region_vertices = vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.5, 0.5];
    let side_start_region = vec![0, 2, 1, 1, 2, 3, 2, 0, 4, 0, 1, 4, 3, 2, 4, 1, 3, 4];
    let side_opposite_side = vec![6, 3, 9, 1, 12, 15, 0, 11, 13, 2, 17, 7, 4, 8, 16, 5, 14, 10];
    DualMesh::new(4, 6, region_vertices, side_start_region, side_opposite_side).unwrap()
}

fn bench_poisson_disk(c: &mut Criterion) {
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    let options = PoissonDiskOptions::new(10.0);

    c.bench_function("poisson_disk_100x100_r10", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(12345);
            poisson_disk(&bounds, &options, &mut rng).unwrap()
        });
    });
}

fn bench_concave_hull(c: &mut Criterion) {
    let (points, convex) = cluster_cloud();
    let options = ConcaveHullOptions::new(6.0);

    c.bench_function("concave_hull_cluster_cloud", |b| {
        b.iter(|| concave_hull(&points, &convex, &options).unwrap());
    });
}

fn bench_region_circulation(c: &mut Criterion) {
    let mesh = split_quad();

    c.bench_function("sides_around_all_regions", |b| {
        b.iter(|| {
            let mut count = 0;
            for r in 0..mesh.num_regions() {
                count += mesh.sides_around_region(r).len();
            }
            count
        });
    });
}

criterion_group!(
    benches,
    bench_poisson_disk,
    bench_concave_hull,
    bench_region_circulation
);
criterion_main!(benches);
