//! Per-sample tangent-plane estimation via local PCA (C2).
//!
//! For each sample point, a plane is fit to its k-nearest-neighbor
//! neighborhood by taking the eigenvector of least variance of the
//! neighborhood's covariance matrix. The estimation pass is embarrassingly
//! parallel over independent samples with no shared mutable state, so it is
//! expressed as a `rayon` parallel map rather than explicit thread
//! partitioning (see the concurrency note in the crate's top-level docs).

use nalgebra::{Matrix3, SymmetricEigen, Vector3};
use rayon::prelude::*;
use tracing::warn;

use crate::error::{PlaneEstimationError, Result};
use crate::geometry::{Point, PointCloud};
use crate::plane::{Plane, PlaneCloud};
use crate::spatial_index::SpatialIndex;

/// Minimum number of distinct neighbors (excluding the sample itself)
/// required to emit a plane; below this the neighborhood is considered
/// degenerate and the sample is skipped.
const MIN_DISTINCT_NEIGHBORS: usize = 3;

/// Estimates a tangent plane for each point in `cloud`.
///
/// Builds its own spatial index over `cloud`'s points, mirroring how the
/// orientation solver (C4) builds its own index over plane origins rather
/// than accepting one from the caller.
///
/// Samples whose neighborhood is too small to form a stable estimate
/// (`DegenerateNeighborhood`, §7) are skipped with a warning rather than
/// failing the whole pass.
///
/// # Errors
/// Returns [`PlaneEstimationError::InvalidNeighborhoodSize`] if `k <= 1`, and
/// [`PlaneEstimationError::SpatialIndexFailure`] if the spatial index over
/// sample points cannot be built.
pub fn estimate_planes(cloud: &PointCloud, k: usize) -> Result<PlaneCloud> {
    if k <= 1 {
        return Err(PlaneEstimationError::InvalidNeighborhoodSize { got: k }.into());
    }

    let index = SpatialIndex::build(cloud.points())
        .map_err(|source| PlaneEstimationError::SpatialIndexFailure { source })?;

    let estimates: Vec<Option<(usize, Plane)>> = cloud
        .points()
        .par_iter()
        .enumerate()
        .map(|(sample_index, sample)| estimate_one(cloud, &index, k, sample_index, *sample))
        .collect();

    let mut planes = Vec::with_capacity(estimates.len());
    let mut source_indices = Vec::with_capacity(estimates.len());
    for estimate in estimates.into_iter().flatten() {
        let (sample_index, plane) = estimate;
        planes.push(plane);
        source_indices.push(sample_index);
    }

    Ok(PlaneCloud::new(planes, source_indices))
}

fn estimate_one(
    cloud: &PointCloud,
    index: &SpatialIndex,
    k: usize,
    sample_index: usize,
    sample: Point,
) -> Option<(usize, Plane)> {
    let neighbors = index.k_nearest(sample, k + 1).ok()?;

    if neighbors.len() < k + 1 {
        warn!(
            sample_index,
            requested = k + 1,
            found = neighbors.len(),
            "spatial index returned fewer neighbors than requested"
        );
    }

    let neighbor_points: Vec<Point> = neighbors
        .into_iter()
        .filter(|neighbor| neighbor.index != sample_index)
        .filter_map(|neighbor| cloud.get(neighbor.index).copied())
        .collect();

    if neighbor_points.len() < MIN_DISTINCT_NEIGHBORS {
        warn!(
            sample_index,
            found = neighbor_points.len(),
            "degenerate neighborhood, skipping sample"
        );
        return None;
    }

    let (centroid, normal) = fit_plane(&neighbor_points)?;
    Some((sample_index, Plane::new(centroid, normal)))
}

#[expect(
    clippy::float_arithmetic,
    reason = "centroid and covariance accumulation over raw coordinates"
)]
fn fit_plane(neighbors: &[Point]) -> Option<(Point, Vector3<f32>)> {
    let count = neighbors.len();
    let count_f32 = count as f32;

    let mut sum = Vector3::new(0.0_f32, 0.0, 0.0);
    for neighbor in neighbors {
        sum += neighbor.as_nalgebra().coords;
    }
    let centroid_vector = sum / count_f32;
    let centroid = Point::from(nalgebra::Point3::from(centroid_vector));

    let mut covariance = Matrix3::<f32>::zeros();
    for neighbor in neighbors {
        let delta = neighbor.as_nalgebra().coords - centroid_vector;
        covariance += delta * delta.transpose();
    }

    let eigen = SymmetricEigen::new(covariance);
    let min_index = eigen
        .eigenvalues
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(index, _)| index)?;
    let normal = eigen.eigenvectors.column(min_index).into_owned();
    let normal = normal.try_normalize(f32::EPSILON)?;

    Some((centroid, normal))
}
