//! Global normal-orientation propagation (C4).
//!
//! Builds a "Riemannian proximity graph" over plane normals — a proximity
//! graph weighted by `1 - |n_i . n_j|` — computes its minimum spanning tree
//! via [`crate::graph`], then propagates a consistent orientation sign from
//! a y-up seed outward along the MST in DFS order.
//!
//! Edge harvesting is partitioned across a fixed number of threads using
//! `std::thread::scope` with an explicit contiguous index range per worker,
//! per the crate's concurrency model: this phase has two pieces of shared
//! mutable state (the edge accumulator and, to serialize degenerate-sample
//! diagnostics, a logging mutex), so it uses explicit partitioning rather
//! than `rayon`'s work-stealing scheduler.

use std::sync::Mutex;

use nalgebra::Vector3;
use tracing::{instrument, warn};

use crate::error::{OrientationError, Result};
use crate::graph::Graph;
use crate::plane::PlaneCloud;
use crate::spatial_index::SpatialIndex;

const WORLD_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

/// Propagates a consistent orientation sign across `planes` in place.
///
/// # Errors
/// Returns [`OrientationError::EmptyPlaneCloud`] if there are no planes, and
/// [`OrientationError::GraphFailure`] if the spatial index over plane
/// origins cannot be built or queried.
#[instrument(skip(planes), fields(planes = planes.len(), k))]
pub fn fix_orientations(planes: &mut PlaneCloud, k: usize) -> Result<()> {
    if planes.is_empty() {
        return Err(OrientationError::EmptyPlaneCloud.into());
    }

    let origins = planes.origins();
    let index = SpatialIndex::build(&origins)
        .map_err(|source| OrientationError::GraphFailure { source })?;

    let graph = harvest_riemannian_graph(planes, &index, k)
        .map_err(|source| OrientationError::GraphFailure { source })?;

    let seed = select_seed(planes);
    if let Some(seed_plane) = planes.get_mut(seed)
        && seed_plane.normal().dot(&WORLD_UP) < 0.0
    {
        seed_plane.flip();
    }

    propagate_signs(planes, &graph, seed);
    Ok(())
}

/// Selects the index of the plane with the maximum y-coordinate origin,
/// breaking ties by the lowest index. This is the orientation anchor; it
/// assumes the input coordinate frame is "y up" (§4.4 of the design notes).
fn select_seed(planes: &PlaneCloud) -> usize {
    let mut best_index = 0;
    let mut best_y = f32::NEG_INFINITY;
    for (index, plane) in planes.planes().iter().enumerate() {
        if plane.origin().y() > best_y {
            best_y = plane.origin().y();
            best_index = index;
        }
    }
    best_index
}

fn harvest_riemannian_graph(
    planes: &PlaneCloud,
    index: &SpatialIndex,
    k: usize,
) -> core::result::Result<Graph, crate::error::SpatialIndexError> {
    let node_count = planes.len();
    let thread_count = std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(1)
        .min(node_count.max(1));

    let graph = Mutex::new(Graph::new(node_count));
    let log_gate = Mutex::new(());
    let chunks = partition_range(node_count, thread_count);
    let mut query_error = Mutex::new(None);

    std::thread::scope(|scope| {
        for chunk in &chunks {
            let chunk = chunk.clone();
            let graph = &graph;
            let log_gate = &log_gate;
            let query_error = &query_error;
            scope.spawn(move || {
                harvest_chunk(planes, index, k, chunk, graph, log_gate, query_error);
            });
        }
    });

    if let Some(error) = query_error.get_mut().expect("log mutex not poisoned").take() {
        return Err(error);
    }

    Ok(graph.into_inner().expect("graph mutex not poisoned"))
}

#[expect(clippy::float_arithmetic, reason = "Riemannian proximity cost 1 - |dot|")]
fn harvest_chunk(
    planes: &PlaneCloud,
    index: &SpatialIndex,
    k: usize,
    range: std::ops::Range<usize>,
    graph: &Mutex<Graph>,
    log_gate: &Mutex<()>,
    query_error: &Mutex<Option<crate::error::SpatialIndexError>>,
) {
    for i in range {
        let Some(plane_i) = planes.get(i) else {
            continue;
        };
        let neighbors = match index.k_nearest(plane_i.origin(), k + 1) {
            Ok(neighbors) => neighbors,
            Err(error) => {
                let mut slot = query_error.lock().expect("log mutex not poisoned");
                if slot.is_none() {
                    *slot = Some(error);
                }
                continue;
            }
        };

        if neighbors.len() < k + 1 {
            let _guard = log_gate.lock().expect("log mutex not poisoned");
            warn!(
                plane_index = i,
                found = neighbors.len(),
                "fewer plane-origin neighbors than requested while building orientation graph"
            );
        }

        let mut local_edges = Vec::with_capacity(neighbors.len());
        for neighbor in neighbors {
            if neighbor.index == i {
                continue;
            }
            let Some(plane_j) = planes.get(neighbor.index) else {
                continue;
            };
            let cost = 1.0 - plane_i.normal().dot(&plane_j.normal()).abs();
            local_edges.push((i, neighbor.index, cost));
        }

        let mut guard = graph.lock().expect("graph mutex not poisoned");
        for (a, b, cost) in local_edges {
            guard.add_edge(a, b, cost);
        }
    }
}

/// Splits `0..len` into `parts` contiguous, near-equal ranges. Shared with
/// [`crate::marching_cubes`]'s voxel sweep, which partitions its index space
/// the same way.
pub(crate) fn partition_range(len: usize, parts: usize) -> Vec<std::ops::Range<usize>> {
    if parts == 0 || len == 0 {
        return Vec::new();
    }
    let base = len / parts;
    let remainder = len % parts;
    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for part in 0..parts {
        let extra = usize::from(part < remainder);
        let end = start + base + extra;
        if start < end {
            ranges.push(start..end);
        }
        start = end;
    }
    ranges
}

/// DFS-order sign propagation from `seed`.
///
/// For each newly visited plane, the normal is compared against the DFS
/// predecessor's normal (not necessarily the MST parent) and flipped if the
/// dot product is negative. This matches the documented reference
/// behaviour (see the crate's design ledger for the order-sensitivity
/// caveat) rather than a strictly MST-parent-based propagation.
fn propagate_signs(planes: &mut PlaneCloud, graph: &Graph, seed: usize) {
    let mut clean = graph.clone();
    clean.clean_duplicate_edges();
    let mst = clean.generate_mst();
    let mut mst_graph = Graph::new(graph.node_count());
    for edge in &mst {
        mst_graph.add_edge(edge.a, edge.b, edge.cost);
    }

    let mut previous_normal: Option<Vector3<f32>> = None;
    mst_graph.traverse_dfs(seed, |node, _predecessor| {
        if let Some(previous) = previous_normal
            && let Some(plane) = planes.get_mut(node)
            && plane.normal().dot(&previous) < 0.0
        {
            plane.flip();
        }
        previous_normal = planes.get(node).map(crate::plane::Plane::normal);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::plane::Plane;

    fn plane_cloud(entries: &[(Point, Vector3<f32>)]) -> PlaneCloud {
        let planes = entries
            .iter()
            .map(|(origin, normal)| Plane::new(*origin, *normal))
            .collect();
        let indices = (0..entries.len()).collect();
        PlaneCloud::new(planes, indices)
    }

    #[test]
    fn select_seed_picks_maximum_y() {
        let cloud = plane_cloud(&[
            (Point::new(0.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)),
            (Point::new(0.0, 5.0, 0.0), Vector3::new(0.0, 1.0, 0.0)),
            (Point::new(0.0, 2.0, 0.0), Vector3::new(0.0, 1.0, 0.0)),
        ]);
        assert_eq!(select_seed(&cloud), 1);
    }

    #[test]
    fn fix_orientations_rejects_empty_cloud() {
        let mut cloud = plane_cloud(&[]);
        let err = fix_orientations(&mut cloud, 4).expect_err("empty cloud must be rejected");
        assert!(matches!(
            err,
            crate::error::ReconError::OrientationFailure {
                source: OrientationError::EmptyPlaneCloud
            }
        ));
    }

    #[test]
    fn fix_orientations_aligns_nearby_normals_on_a_line() {
        let mut cloud = plane_cloud(&[
            (Point::new(0.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)),
            (Point::new(1.0, 0.0, 0.0), Vector3::new(0.0, -1.0, 0.0)),
            (Point::new(2.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)),
        ]);
        fix_orientations(&mut cloud, 2).expect("orientation must succeed");

        for pair in cloud.planes().windows(2) {
            assert!(pair[0].normal().dot(&pair[1].normal()) >= -1e-4);
        }
    }
}
