//! Shared synthetic point-cloud fixtures used across the reconstruction
//! workspace's tests and benchmarks.
//!
//! Every generator is deterministic given the same seed, so a failing test
//! or a benchmark regression can be reproduced exactly by re-running it.

use hoppe_recon_core::{Point, PointCloud};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

/// Generates `samples` points approximately uniformly distributed on the
/// surface of a sphere of radius `radius` centered at the origin, using the
/// spherical Fibonacci lattice.
///
/// The Fibonacci lattice is used rather than rejection sampling so the
/// point count is exact and the spacing is near-uniform without per-point
/// randomness; `seed` still perturbs the lattice's starting phase so
/// repeated calls with different seeds are not identical.
#[must_use]
pub fn sphere_point_cloud(samples: usize, radius: f32, seed: u64) -> PointCloud {
    let mut rng = SmallRng::seed_from_u64(seed);
    let phase: f32 = rng.gen_range(0.0..(2.0 * PI));
    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());

    let mut points = Vec::with_capacity(samples);
    #[expect(
        clippy::float_arithmetic,
        reason = "spherical Fibonacci lattice sampling"
    )]
    #[expect(
        clippy::cast_precision_loss,
        reason = "sample index converted to f32 for lattice parameterization"
    )]
    for i in 0..samples {
        let t = (i as f32 + 0.5) / samples as f32;
        let inclination = (1.0 - 2.0 * t).acos();
        let azimuth = phase + golden_angle * i as f32;
        let x = radius * inclination.sin() * azimuth.cos();
        let y = radius * inclination.sin() * azimuth.sin();
        let z = radius * inclination.cos();
        points.push(Point::new(x, y, z));
    }
    PointCloud::new(points)
}

/// Generates a dense sampling of the six faces of an axis-aligned cube
/// spanning `[-half_extent, half_extent]^3`, `samples_per_face` points per
/// face on a jittered regular grid.
#[must_use]
pub fn cube_surface_point_cloud(
    samples_per_face: usize,
    half_extent: f32,
    seed: u64,
) -> PointCloud {
    let mut rng = SmallRng::seed_from_u64(seed);
    let grid_side = samples_per_face.max(1).isqrt().max(1);

    let mut points = Vec::with_capacity(grid_side * grid_side * 6);
    #[expect(
        clippy::float_arithmetic,
        reason = "grid coordinates are linearly interpolated across a face"
    )]
    #[expect(
        clippy::cast_precision_loss,
        reason = "grid index converted to f32 for interpolation"
    )]
    for face in 0..6_u8 {
        for row in 0..grid_side {
            for col in 0..grid_side {
                let u = lattice_coordinate(row, grid_side, &mut rng, half_extent);
                let v = lattice_coordinate(col, grid_side, &mut rng, half_extent);
                points.push(face_point(face, u, v, half_extent));
            }
        }
    }
    PointCloud::new(points)
}

#[expect(
    clippy::float_arithmetic,
    reason = "grid coordinate interpolation plus jitter"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "grid index converted to f32 for interpolation"
)]
fn lattice_coordinate(index: usize, grid_side: usize, rng: &mut SmallRng, half_extent: f32) -> f32 {
    let step = (2.0 * half_extent) / grid_side.max(1) as f32;
    let jitter_span = step * 0.1;
    let base = -half_extent + step * (index as f32 + 0.5);
    base + rng.gen_range(-jitter_span..jitter_span)
}

fn face_point(face: u8, u: f32, v: f32, half_extent: f32) -> Point {
    match face {
        0 => Point::new(half_extent, u, v),
        1 => Point::new(-half_extent, u, v),
        2 => Point::new(u, half_extent, v),
        3 => Point::new(u, -half_extent, v),
        4 => Point::new(u, v, half_extent),
        _ => Point::new(u, v, -half_extent),
    }
}
