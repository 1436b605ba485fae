//! Marching-cubes isosurface extraction (C6) benchmarks.
//!
//! Measures the time to sweep a uniform voxel grid against a fixed-radius
//! sphere SDF at increasing grid resolutions, isolating the threaded sweep
//! and corner cache from the upstream plane-estimation and orientation
//! stages.
#![allow(missing_docs, reason = "Criterion macros generate undocumented items")]
#![allow(
    clippy::expect_used,
    reason = "benchmark setup is infallible for valid constants"
)]
#![allow(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
#![allow(
    clippy::float_arithmetic,
    reason = "the benchmark SDF is a literal sphere distance function"
)]
#![allow(
    clippy::cast_precision_loss,
    reason = "grid corner count is converted to f32 to derive a voxel resolution"
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use hoppe_recon_core::{GridSpec, Point, sweep_marching_cubes};

/// Sphere radius the benchmark SDF measures distance to.
const RADIUS: f32 = 1.0;

/// Grid corner counts (per axis) to benchmark.
const GRID_SIZES: &[usize] = &[16, 32, 64];

fn sphere_sdf(query: Point) -> Option<f32> {
    let distance = (query.x() * query.x() + query.y() * query.y() + query.z() * query.z()).sqrt();
    Some(distance - RADIUS)
}

fn marching_cubes_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("marching_cubes_sweep");
    group.sample_size(20);

    for &corners in GRID_SIZES {
        let extent = 2.5 * RADIUS;
        let resolution = (2.0 * extent) / (corners.saturating_sub(1).max(1)) as f32;
        let grid = GridSpec {
            nx: corners,
            ny: corners,
            nz: corners,
            resolution,
            origin: Point::new(-extent, -extent, -extent),
        };

        group.bench_with_input(BenchmarkId::from_parameter(corners), &grid, |b, &grid| {
            b.iter(|| {
                sweep_marching_cubes(grid, sphere_sdf).expect("sweep must succeed");
            });
        });
    }

    group.finish();
}

criterion_group!(benches, marching_cubes_sweep);
criterion_main!(benches);
