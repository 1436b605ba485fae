//! Uniform-grid marching-cubes isosurface extraction (C6).
//!
//! Corner ordering and edge ordering are fixed to match the 256-entry table
//! in [`crate::mc_table`]; see that module's doc comment for the exact
//! layout. Each triangle's vertices are its cell's own cube-edge midpoints
//! (no interpolation toward the zero crossing, per the crate's design
//! notes), and the sweep is partitioned across a fixed number of threads
//! sharing a corner-value cache and a triangle output buffer behind two
//! mutexes, mirroring the orientation solver's concurrency model.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::instrument;

use crate::error::{MarchingCubesError, Result};
use crate::geometry::Point;
use crate::mc_table::triangles_for_state;
use crate::orientation::partition_range;

/// Integer offsets (in units of `resolution`) of the eight cube corners,
/// matching the 256-entry table's corner numbering.
const CORNER_OFFSETS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Corner-index pairs for the twelve cube edges, matching the table's edge
/// numbering.
const EDGE_CORNERS: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// A single output triangle, with vertices in world coordinates. Winding and
/// vertex order follow the 256-entry table's triangle order directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub a: Point,
    /// Second vertex.
    pub b: Point,
    /// Third vertex.
    pub c: Point,
}

/// Describes a uniform voxel grid: corner counts along each axis (so
/// `nx - 1` voxels span the x axis, and so on), the edge length of a single
/// voxel, and the world position of corner `(0, 0, 0)`.
#[derive(Debug, Clone, Copy)]
pub struct GridSpec {
    /// Corner count along x.
    pub nx: usize,
    /// Corner count along y.
    pub ny: usize,
    /// Corner count along z.
    pub nz: usize,
    /// Edge length of a single voxel.
    pub resolution: f32,
    /// World position of corner `(0, 0, 0)`.
    pub origin: Point,
}

type CornerKey = (usize, usize, usize);
type CornerCache = Mutex<HashMap<CornerKey, f32>>;

/// Sweeps `grid`, evaluating `sdf` at cube corners and polygonizing the
/// 256-case table, returning the (unordered) set of emitted triangles.
///
/// # Errors
/// Returns [`MarchingCubesError::EmptyGrid`] if any grid dimension is zero.
#[instrument(skip(sdf), fields(nx = grid.nx, ny = grid.ny, nz = grid.nz))]
pub fn sweep(grid: GridSpec, sdf: impl Fn(Point) -> Option<f32> + Sync) -> Result<Vec<Triangle>> {
    if grid.nx == 0 || grid.ny == 0 || grid.nz == 0 {
        return Err(MarchingCubesError::EmptyGrid {
            nx: grid.nx,
            ny: grid.ny,
            nz: grid.nz,
        }
        .into());
    }

    let voxels_x = grid.nx - 1;
    let voxels_y = grid.ny - 1;
    let voxels_z = grid.nz - 1;
    let voxel_count = voxels_x * voxels_y * voxels_z;
    if voxel_count == 0 {
        return Ok(Vec::new());
    }

    let thread_count = std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(1)
        .min(voxel_count);

    let cache: CornerCache = Mutex::new(HashMap::new());
    let triangles = Mutex::new(Vec::new());
    let chunks = partition_range(voxel_count, thread_count);

    std::thread::scope(|scope| {
        for chunk in &chunks {
            let chunk = chunk.clone();
            let cache = &cache;
            let triangles = &triangles;
            let sdf = &sdf;
            scope.spawn(move || {
                sweep_chunk(grid, voxels_y, voxels_z, chunk, sdf, cache, triangles);
            });
        }
    });

    Ok(triangles.into_inner().expect("triangle mutex not poisoned"))
}

fn sweep_chunk(
    grid: GridSpec,
    voxels_y: usize,
    voxels_z: usize,
    range: std::ops::Range<usize>,
    sdf: &(impl Fn(Point) -> Option<f32> + Sync),
    cache: &CornerCache,
    triangles: &Mutex<Vec<Triangle>>,
) {
    let mut local = Vec::new();
    for linear in range {
        let voxel = linear_to_voxel(linear, voxels_y, voxels_z);
        polygonize_voxel(grid, voxel, sdf, cache, &mut local);
    }
    triangles
        .lock()
        .expect("triangle mutex not poisoned")
        .extend(local);
}

fn linear_to_voxel(linear: usize, voxels_y: usize, voxels_z: usize) -> (usize, usize, usize) {
    let plane = voxels_y * voxels_z;
    let x = linear / plane;
    let remainder = linear % plane;
    let y = remainder / voxels_z;
    let z = remainder % voxels_z;
    (x, y, z)
}

fn polygonize_voxel(
    grid: GridSpec,
    voxel: (usize, usize, usize),
    sdf: &(impl Fn(Point) -> Option<f32> + Sync),
    cache: &CornerCache,
    out: &mut Vec<Triangle>,
) {
    let (vx, vy, vz) = voxel;
    let mut corner_keys = [(0_usize, 0_usize, 0_usize); 8];
    let mut corner_values = [0.0_f32; 8];

    for (i, offset) in CORNER_OFFSETS.iter().enumerate() {
        let key = (vx + offset[0], vy + offset[1], vz + offset[2]);
        corner_keys[i] = key;
        corner_values[i] = corner_value(grid, key, sdf, cache);
    }

    let mut state: u8 = 0;
    for (i, value) in corner_values.iter().enumerate() {
        if *value < 0.0 {
            state |= 1_u8 << i;
        }
    }

    if state == 0 || state == 255 {
        return;
    }

    let corner_positions = corner_keys.map(|key| corner_world_position(grid, key));

    for triangle in triangles_for_state(state) {
        out.push(Triangle {
            a: edge_midpoint(&corner_positions, triangle[0]),
            b: edge_midpoint(&corner_positions, triangle[1]),
            c: edge_midpoint(&corner_positions, triangle[2]),
        });
    }
}

/// Resolves the SDF value at cube corner `key`, consulting and then
/// populating the shared cache. Duplicate evaluation of the same corner
/// before its first publication is possible and benign, since the SDF is
/// deterministic (§5 of the crate's concurrency notes).
fn corner_value(
    grid: GridSpec,
    key: CornerKey,
    sdf: &(impl Fn(Point) -> Option<f32> + Sync),
    cache: &CornerCache,
) -> f32 {
    {
        let guard = cache.lock().expect("corner cache mutex not poisoned");
        if let Some(&value) = guard.get(&key) {
            return value;
        }
    }

    let world = corner_world_position(grid, key);
    let value = sdf(world).unwrap_or(1.0);

    let mut guard = cache.lock().expect("corner cache mutex not poisoned");
    *guard.entry(key).or_insert(value)
}

#[expect(
    clippy::float_arithmetic,
    reason = "corner world position is an origin plus a scaled integer offset"
)]
fn corner_world_position(grid: GridSpec, key: CornerKey) -> Point {
    let (cx, cy, cz) = key;
    Point::new(
        grid.origin.x() + grid.resolution * cx as f32,
        grid.origin.y() + grid.resolution * cy as f32,
        grid.origin.z() + grid.resolution * cz as f32,
    )
}

#[expect(
    clippy::float_arithmetic,
    reason = "edge midpoint is the mean of two corner world positions"
)]
fn edge_midpoint(corner_positions: &[Point; 8], edge: u8) -> Point {
    let [a, b] = EDGE_CORNERS[usize::from(edge)];
    let pa = corner_positions[a];
    let pb = corner_positions[b];
    Point::new(
        (pa.x() + pb.x()) / 2.0,
        (pa.y() + pb.y()) / 2.0,
        (pa.z() + pb.z()) / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_voxel_grid() -> GridSpec {
        GridSpec {
            nx: 2,
            ny: 2,
            nz: 2,
            resolution: 1.0,
            origin: Point::new(0.0, 0.0, 0.0),
        }
    }

    #[test]
    fn empty_grid_is_rejected() {
        let grid = GridSpec {
            nx: 0,
            ..single_voxel_grid()
        };
        let err = sweep(grid, |_| Some(1.0)).expect_err("zero dimension must be rejected");
        assert!(matches!(
            err,
            crate::error::ReconError::MarchingCubesFailure {
                source: MarchingCubesError::EmptyGrid { nx: 0, .. }
            }
        ));
    }

    /// Scenario S3: corner 0 negative, all others positive -> state 1, one
    /// triangle at edge midpoints 3, 0, 8 (cyclic rotation of the table's
    /// stored order 0, 8, 3).
    #[test]
    fn state_one_emits_single_triangle_at_expected_midpoints() {
        let grid = single_voxel_grid();
        let triangles = sweep(grid, |p| {
            if p.x() < 0.5 && p.y() < 0.5 && p.z() < 0.5 {
                Some(-1.0)
            } else {
                Some(1.0)
            }
        })
        .expect("sweep must succeed");

        assert_eq!(triangles.len(), 1);
        let triangle = triangles[0];
        // Table order for state 1 is (edge 0, edge 8, edge 3); a cyclic
        // rotation of the reference scenario's (edge 3, edge 0, edge 8).
        assert_eq!(triangle.a, Point::new(0.5, 0.0, 0.0));
        assert_eq!(triangle.b, Point::new(0.0, 0.0, 0.5));
        assert_eq!(triangle.c, Point::new(0.0, 0.5, 0.0));
    }

    /// Scenario S4: all eight corners negative -> state 255, no triangles.
    #[test]
    fn state_255_emits_no_triangles() {
        let grid = single_voxel_grid();
        let triangles = sweep(grid, |_| Some(-1.0)).expect("sweep must succeed");
        assert!(triangles.is_empty());
    }

    #[test]
    fn state_zero_emits_no_triangles() {
        let grid = single_voxel_grid();
        let triangles = sweep(grid, |_| Some(1.0)).expect("sweep must succeed");
        assert!(triangles.is_empty());
    }

    #[test]
    fn out_of_support_corners_are_treated_as_positive() {
        let grid = single_voxel_grid();
        let triangles = sweep(grid, |_| None).expect("sweep must succeed");
        assert!(triangles.is_empty());
    }

    #[test]
    fn repeated_sweeps_of_a_deterministic_sdf_agree_on_triangle_count() {
        let grid = GridSpec {
            nx: 4,
            ny: 4,
            nz: 4,
            resolution: 0.5,
            origin: Point::new(-1.0, -1.0, -1.0),
        };
        let sdf = |p: Point| Some(p.x() * p.x() + p.y() * p.y() + p.z() * p.z() - 0.5);

        let first = sweep(grid, sdf).expect("sweep must succeed");
        let second = sweep(grid, sdf).expect("sweep must succeed");
        assert_eq!(first.len(), second.len());
    }
}
