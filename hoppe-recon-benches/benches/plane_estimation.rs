//! Tangent-plane estimation (C2) benchmarks.
//!
//! Measures the time to estimate tangent planes for a sphere-surface point
//! cloud across increasing sample counts and neighborhood sizes, isolating
//! the k-d tree build plus per-sample PCA pass from orientation and
//! marching cubes.
#![allow(missing_docs, reason = "Criterion macros generate undocumented items")]
#![allow(
    clippy::expect_used,
    reason = "benchmark setup is infallible for valid constants"
)]
#![allow(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use hoppe_recon_core::estimate_planes;
use hoppe_recon_test_support::sphere_point_cloud;

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Sphere radius used for all benchmark datasets.
const RADIUS: f32 = 1.0;

/// Point counts to benchmark.
const POINT_COUNTS: &[usize] = &[200, 1_000, 5_000];

/// Neighborhood size used for estimation.
const K: usize = 10;

fn plane_estimation(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate_planes");
    group.sample_size(20);

    for &point_count in POINT_COUNTS {
        let cloud = sphere_point_cloud(point_count, RADIUS, SEED);

        group.bench_with_input(
            BenchmarkId::from_parameter(point_count),
            &cloud,
            |b, cloud| {
                b.iter(|| {
                    estimate_planes(cloud, K).expect("plane estimation must succeed");
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, plane_estimation);
criterion_main!(benches);
