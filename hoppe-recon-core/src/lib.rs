//! Surface-from-samples reconstruction core library.
//!
//! Implements the Hoppe et al. (1992) pipeline over an unorganized point
//! cloud: spatial indexing (C1), tangent-plane estimation (C2), an
//! undirected graph / minimum-spanning-tree toolkit (C3), orientation
//! propagation (C4), a signed-distance evaluator (C5), marching-cubes
//! isosurface extraction (C6), and a coordinator tying the stages together
//! (C7). See each module's doc comment for the stage it implements.

mod builder;
mod coordinator;
mod error;
mod geometry;
mod graph;
mod marching_cubes;
mod mc_table;
mod orientation;
mod plane;
mod plane_estimation;
mod sdf;
mod spatial_index;

pub use crate::{
    builder::{Density, Parameters, ReconBuilder},
    coordinator::{Reconstructor, ReconstructionOutput},
    error::{
        GraphError, GraphErrorCode, MarchingCubesError, MarchingCubesErrorCode,
        OrientationError, OrientationErrorCode, PlaneEstimationError, PlaneEstimationErrorCode,
        ReconError, ReconErrorCode, Result, SpatialIndexError, SpatialIndexErrorCode,
    },
    geometry::{Point, PointCloud},
    graph::{Edge, Graph},
    marching_cubes::{GridSpec, Triangle, sweep as sweep_marching_cubes},
    orientation::fix_orientations,
    plane::{Plane, PlaneCloud},
    plane_estimation::estimate_planes,
    sdf::{SdfParams, evaluate as evaluate_sdf},
    spatial_index::{Neighbor, SpatialIndex},
};
