//! Benchmark: Quickhull scaling with point count
//!
//! Run with:
//!   cargo bench -p noperthedron-hull --bench quickhull
//!
//! Thread scaling of the parallel point assignment:
//!   RAYON_NUM_THREADS=1 cargo bench -p noperthedron-hull --bench quickhull

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use noperthedron_hull::{ConvexHull3D, FaceMode, HullMesh, testdata};
use std::time::Duration;

fn bench_sphere_hull(c: &mut Criterion) {
    let mut group = c.benchmark_group("quickhull_sphere");
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));

    for &n in &[90, 500, 2000, 8000] {
        let points = testdata::fibonacci_sphere_points(n, 1.0);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("fibonacci", n), &points, |b, points| {
            b.iter(|| {
                let hull = ConvexHull3D::build(black_box(points)).unwrap();
                black_box(hull)
            });
        });
    }

    group.finish();
}

fn bench_mesh_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_assembly");

    let points = testdata::antiprism_vertices(15, 1.0, 0.5);
    let hull = ConvexHull3D::build(&points).unwrap();

    for mode in [FaceMode::Triangles, FaceMode::Polygons] {
        group.bench_function(format!("antiprism_15_{:?}", mode), |b| {
            b.iter(|| black_box(HullMesh::from_hull(black_box(&hull), mode).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sphere_hull, bench_mesh_assembly);
criterion_main!(benches);
