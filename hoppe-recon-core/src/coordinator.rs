//! Pipeline orchestration (C7): wires the spatial index, plane estimator,
//! orientation solver, SDF evaluator and marching-cubes engine together.
//!
//! Mirrors the workspace ancestor's `Chutoro::run`/`run_with_len` split: a
//! thin public `run` delegates to an instrumented, doc-hidden worker that
//! does the actual orchestration.

use tracing::{info, instrument};

use crate::builder::{Density, Parameters};
use crate::error::{ReconError, Result};
use crate::geometry::PointCloud;
use crate::marching_cubes::{self, GridSpec, Triangle};
use crate::orientation;
use crate::plane::PlaneCloud;
use crate::plane_estimation;
use crate::sdf::{self, SdfParams};

/// Factor applied to the bounding-box volume per sample when deriving an
/// automatic voxel resolution (§4.7): "the factor 8 keeps voxels roughly
/// coarser than inter-sample spacing."
const AUTO_DENSITY_FACTOR: f32 = 8.0;

/// The oriented plane cloud and triangle soup produced by [`Reconstructor::run`].
#[derive(Debug, Clone)]
pub struct ReconstructionOutput {
    /// The oriented plane cloud, exposed so callers can emit the optional
    /// debug point cloud (`--dump-planes`) between orientation fixing and
    /// marching cubes.
    pub planes: PlaneCloud,
    /// The unordered triangle soup produced by the marching-cubes sweep.
    pub triangles: Vec<Triangle>,
    /// The final voxel resolution actually used (after any doubling to
    /// satisfy the voxel-count cap).
    pub resolution: f32,
}

/// An immutable, validated reconstruction pipeline.
///
/// Constructed via [`crate::builder::ReconBuilder`], which validates
/// [`Parameters`] once so `run` stays free of per-call validation branches.
#[derive(Debug, Clone, Copy)]
pub struct Reconstructor {
    params: Parameters,
}

impl Reconstructor {
    pub(crate) const fn new(params: Parameters) -> Self {
        Self { params }
    }

    /// Returns the parameters this reconstructor was built with.
    #[must_use]
    pub const fn parameters(&self) -> Parameters {
        self.params
    }

    /// Runs the full reconstruction pipeline over `cloud`.
    ///
    /// # Errors
    /// Returns [`ReconError::EmptyInput`] if `cloud` has no points,
    /// [`ReconError::PlaneEstimationFailure`] or
    /// [`ReconError::OrientationFailure`] if those stages fail, and
    /// [`ReconError::MarchingCubesFailure`] if grid construction fails.
    #[instrument(skip(self, cloud), fields(points = cloud.len(), k = self.params.k))]
    pub fn run(&self, cloud: &PointCloud) -> Result<ReconstructionOutput> {
        if cloud.is_empty() {
            return Err(ReconError::EmptyInput);
        }

        let mut planes = plane_estimation::estimate_planes(cloud, self.params.k)?;
        orientation::fix_orientations(&mut planes, self.params.k)?;

        let bounds = BoundingBox::from_origins(&planes);
        let resolution = resolve_density(self.params, &bounds, planes.len());
        let (grid, resolution) = fit_grid(&bounds, resolution, self.params.max_volume);

        let sdf_params = SdfParams {
            density: resolution,
            noise: self.params.noise,
        };
        let triangles = marching_cubes::sweep(grid, |query| sdf::evaluate(&planes, query, sdf_params))?;

        info!(
            triangle_count = triangles.len(),
            resolution, "reconstruction completed"
        );
        Ok(ReconstructionOutput {
            planes,
            triangles,
            resolution,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct BoundingBox {
    min: crate::geometry::Point,
    max: crate::geometry::Point,
}

impl BoundingBox {
    fn from_origins(planes: &PlaneCloud) -> Self {
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for plane in planes.planes() {
            let origin = plane.origin();
            let coords = [origin.x(), origin.y(), origin.z()];
            for axis in 0..3 {
                if coords[axis] < min[axis] {
                    min[axis] = coords[axis];
                }
                if coords[axis] > max[axis] {
                    max[axis] = coords[axis];
                }
            }
        }
        if !min[0].is_finite() {
            min = [0.0; 3];
            max = [0.0; 3];
        }
        Self {
            min: crate::geometry::Point::new(min[0], min[1], min[2]),
            max: crate::geometry::Point::new(max[0], max[1], max[2]),
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "bounding box extent is a component-wise subtraction"
    )]
    fn extent(&self) -> (f32, f32, f32) {
        (
            self.max.x() - self.min.x(),
            self.max.y() - self.min.y(),
            self.max.z() - self.min.z(),
        )
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "density heuristic is the bounding-box volume per sample, scaled"
)]
fn resolve_density(params: Parameters, bounds: &BoundingBox, plane_count: usize) -> f32 {
    match params.density {
        Density::Fixed(value) => value,
        Density::Auto => {
            let (w, h, d) = bounds.extent();
            let n = plane_count.max(1) as f32;
            let estimate = AUTO_DENSITY_FACTOR * w * h * d / n;
            if estimate.is_finite() && estimate > 0.0 {
                estimate
            } else {
                1.0
            }
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "voxel counts are extent divided by resolution, doubled until capped"
)]
fn fit_grid(bounds: &BoundingBox, initial_resolution: f32, max_volume: usize) -> (GridSpec, f32) {
    let (w, h, d) = bounds.extent();
    let mut resolution = initial_resolution;

    loop {
        let (nx, ny, nz) = voxel_counts(w, h, d, resolution);
        if nx.saturating_mul(ny).saturating_mul(nz) <= max_volume {
            let grid = GridSpec {
                nx: nx + 1,
                ny: ny + 1,
                nz: nz + 1,
                resolution,
                origin: bounds.min,
            };
            return (grid, resolution);
        }
        resolution *= 2.0;
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "per-axis voxel count is extent divided by resolution, rounded up"
)]
fn voxel_counts(w: f32, h: f32, d: f32, resolution: f32) -> (usize, usize, usize) {
    let axis = |extent: f32| -> usize {
        if resolution <= 0.0 || !extent.is_finite() {
            return 1;
        }
        ((extent / resolution).ceil() as usize).max(1)
    };
    (axis(w), axis(h), axis(d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ReconBuilder;
    use crate::geometry::Point;

    fn unit_sphere_cloud(samples: usize) -> PointCloud {
        let mut points = Vec::with_capacity(samples);
        #[expect(
            clippy::float_arithmetic,
            reason = "test fixture: spherical coordinates from a sample index"
        )]
        for i in 0..samples {
            let t = i as f32 / samples as f32;
            let theta = t * std::f32::consts::TAU;
            let phi = (1.0 - 2.0 * t).acos();
            let x = phi.sin() * theta.cos();
            let y = phi.sin() * theta.sin();
            let z = phi.cos();
            points.push(Point::new(x, y, z));
        }
        PointCloud::new(points)
    }

    #[test]
    fn rejects_empty_point_cloud() {
        let reconstructor = ReconBuilder::new().build().expect("builder must succeed");
        let err = reconstructor
            .run(&PointCloud::new(Vec::new()))
            .expect_err("empty cloud must be rejected");
        assert!(matches!(err, ReconError::EmptyInput));
    }

    #[test]
    fn reconstructs_a_sampled_sphere_without_error() {
        let reconstructor = ReconBuilder::new()
            .with_k(12)
            .with_max_volume(200_000)
            .build()
            .expect("builder must succeed");
        let cloud = unit_sphere_cloud(600);
        let output = reconstructor.run(&cloud).expect("reconstruction must succeed");
        assert!(!output.triangles.is_empty());
        assert!(output.resolution > 0.0);
    }

    #[test]
    fn honors_the_voxel_count_cap() {
        let reconstructor = ReconBuilder::new()
            .with_k(10)
            .with_density(Density::Fixed(0.01))
            .with_max_volume(1_000)
            .build()
            .expect("builder must succeed");
        let cloud = unit_sphere_cloud(300);
        let output = reconstructor.run(&cloud).expect("reconstruction must succeed");
        let (nx, ny, nz) = voxel_counts(2.0, 2.0, 2.0, output.resolution);
        assert!(nx * ny * nz <= 1_000);
    }
}
