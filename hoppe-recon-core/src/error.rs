//! Error types for the reconstruction core library.
//!
//! Each failure domain gets its own `thiserror`-derived enum paired with a
//! stable, machine-readable `*ErrorCode` enum, mirroring how the library's
//! clustering ancestor split [`DataSourceError`]-style domain errors from a
//! top-level orchestration error.

use std::fmt;

use thiserror::Error;

/// Stable codes describing [`SpatialIndexError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum SpatialIndexErrorCode {
    /// The tree was queried before any points were indexed.
    EmptyTree,
    /// A query point's dimensionality did not match the indexed points.
    DimensionMismatch,
    /// The underlying k-d tree rejected the query or insertion.
    BackendFailure,
}

impl SpatialIndexErrorCode {
    /// Returns the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyTree => "SPATIAL_INDEX_EMPTY_TREE",
            Self::DimensionMismatch => "SPATIAL_INDEX_DIMENSION_MISMATCH",
            Self::BackendFailure => "SPATIAL_INDEX_BACKEND_FAILURE",
        }
    }
}

impl fmt::Display for SpatialIndexErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the k-d tree wrapper (C1).
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SpatialIndexError {
    /// The tree was queried before any points were indexed.
    #[error("spatial index holds no points")]
    EmptyTree,
    /// A query point's dimensionality did not match the indexed points.
    #[error("query dimension {query} does not match indexed dimension {indexed}")]
    DimensionMismatch {
        /// Dimensionality of the query point.
        query: usize,
        /// Dimensionality the tree was built with.
        indexed: usize,
    },
    /// The underlying k-d tree rejected the query or insertion.
    #[error("spatial index backend failure: {message}")]
    BackendFailure {
        /// Description forwarded from the underlying k-d tree crate.
        message: String,
    },
}

impl SpatialIndexError {
    /// Retrieves the stable [`SpatialIndexErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> SpatialIndexErrorCode {
        match self {
            Self::EmptyTree => SpatialIndexErrorCode::EmptyTree,
            Self::DimensionMismatch { .. } => SpatialIndexErrorCode::DimensionMismatch,
            Self::BackendFailure { .. } => SpatialIndexErrorCode::BackendFailure,
        }
    }
}

/// Stable codes describing [`PlaneEstimationError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum PlaneEstimationErrorCode {
    /// `k` was not greater than 1.
    InvalidNeighborhoodSize,
    /// The spatial index over sample points could not be built or queried.
    SpatialIndexFailure,
}

impl PlaneEstimationErrorCode {
    /// Returns the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidNeighborhoodSize => "PLANE_ESTIMATION_INVALID_NEIGHBORHOOD_SIZE",
            Self::SpatialIndexFailure => "PLANE_ESTIMATION_SPATIAL_INDEX_FAILURE",
        }
    }
}

impl fmt::Display for PlaneEstimationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while estimating tangent planes (C2).
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlaneEstimationError {
    /// `k` was not greater than 1.
    #[error("neighborhood size k must be greater than 1 (got {got})")]
    InvalidNeighborhoodSize {
        /// The rejected value of `k`.
        got: usize,
    },
    /// The spatial index over sample points could not be built or queried.
    #[error("failed to build the spatial index over sample points: {source}")]
    SpatialIndexFailure {
        /// Underlying spatial-index failure.
        #[source]
        source: SpatialIndexError,
    },
}

impl PlaneEstimationError {
    /// Retrieves the stable [`PlaneEstimationErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> PlaneEstimationErrorCode {
        match self {
            Self::InvalidNeighborhoodSize { .. } => {
                PlaneEstimationErrorCode::InvalidNeighborhoodSize
            }
            Self::SpatialIndexFailure { .. } => PlaneEstimationErrorCode::SpatialIndexFailure,
        }
    }
}

/// Stable codes describing [`GraphError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum GraphErrorCode {
    /// An edge referenced a node index outside `node_count`.
    NodeIndexOutOfBounds,
}

impl GraphErrorCode {
    /// Returns the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NodeIndexOutOfBounds => "GRAPH_NODE_INDEX_OUT_OF_BOUNDS",
        }
    }
}

impl fmt::Display for GraphErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the undirected graph / MST machinery (C3).
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// An edge referenced a node index outside `node_count`.
    #[error("edge endpoint {index} is out of bounds for a graph with {node_count} nodes")]
    NodeIndexOutOfBounds {
        /// The offending node index.
        index: usize,
        /// The graph's declared node count.
        node_count: usize,
    },
}

impl GraphError {
    /// Retrieves the stable [`GraphErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> GraphErrorCode {
        match self {
            Self::NodeIndexOutOfBounds { .. } => GraphErrorCode::NodeIndexOutOfBounds,
        }
    }
}

/// Stable codes describing [`OrientationError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum OrientationErrorCode {
    /// Orientation was requested over an empty plane cloud.
    EmptyPlaneCloud,
    /// The Riemannian graph or spatial index backing it failed.
    GraphFailure,
}

impl OrientationErrorCode {
    /// Returns the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyPlaneCloud => "ORIENTATION_EMPTY_PLANE_CLOUD",
            Self::GraphFailure => "ORIENTATION_GRAPH_FAILURE",
        }
    }
}

impl fmt::Display for OrientationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while propagating normal orientation (C4).
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum OrientationError {
    /// Orientation was requested over an empty plane cloud.
    #[error("cannot orient an empty plane cloud")]
    EmptyPlaneCloud,
    /// The Riemannian graph or spatial index backing it failed.
    #[error("failed to build the Riemannian proximity graph: {source}")]
    GraphFailure {
        /// Underlying spatial-index failure.
        #[source]
        source: SpatialIndexError,
    },
}

impl OrientationError {
    /// Retrieves the stable [`OrientationErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> OrientationErrorCode {
        match self {
            Self::EmptyPlaneCloud => OrientationErrorCode::EmptyPlaneCloud,
            Self::GraphFailure { .. } => OrientationErrorCode::GraphFailure,
        }
    }
}

/// Stable codes describing [`MarchingCubesErrorCode`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum MarchingCubesErrorCode {
    /// One of the requested grid dimensions was zero.
    EmptyGrid,
    /// `max_volume` was zero.
    ZeroVolumeCap,
}

impl MarchingCubesErrorCode {
    /// Returns the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyGrid => "MARCHING_CUBES_EMPTY_GRID",
            Self::ZeroVolumeCap => "MARCHING_CUBES_ZERO_VOLUME_CAP",
        }
    }
}

impl fmt::Display for MarchingCubesErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the marching-cubes engine (C6).
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MarchingCubesError {
    /// One of the requested grid dimensions was zero.
    #[error("grid dimensions ({nx}, {ny}, {nz}) must all be positive")]
    EmptyGrid {
        /// Requested voxel count along x.
        nx: usize,
        /// Requested voxel count along y.
        ny: usize,
        /// Requested voxel count along z.
        nz: usize,
    },
    /// `max_volume` was zero.
    #[error("max_volume must be greater than zero")]
    ZeroVolumeCap,
}

impl MarchingCubesError {
    /// Retrieves the stable [`MarchingCubesErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> MarchingCubesErrorCode {
        match self {
            Self::EmptyGrid { .. } => MarchingCubesErrorCode::EmptyGrid,
            Self::ZeroVolumeCap => MarchingCubesErrorCode::ZeroVolumeCap,
        }
    }
}

/// Stable codes describing [`ReconErrorCode`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ReconErrorCode {
    /// `k` was not greater than 1.
    InvalidNeighborhoodSize,
    /// `density` was not `Auto` and was not finite and positive.
    InvalidDensity,
    /// `max_volume` was zero.
    InvalidMaxVolume,
    /// The input point cloud contained no points.
    EmptyInput,
    /// Plane estimation failed.
    PlaneEstimationFailure,
    /// Orientation propagation failed.
    OrientationFailure,
    /// Marching cubes failed.
    MarchingCubesFailure,
}

impl ReconErrorCode {
    /// Returns the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidNeighborhoodSize => "RECON_INVALID_NEIGHBORHOOD_SIZE",
            Self::InvalidDensity => "RECON_INVALID_DENSITY",
            Self::InvalidMaxVolume => "RECON_INVALID_MAX_VOLUME",
            Self::EmptyInput => "RECON_EMPTY_INPUT",
            Self::PlaneEstimationFailure => "RECON_PLANE_ESTIMATION_FAILURE",
            Self::OrientationFailure => "RECON_ORIENTATION_FAILURE",
            Self::MarchingCubesFailure => "RECON_MARCHING_CUBES_FAILURE",
        }
    }
}

impl fmt::Display for ReconErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error produced by constructing or running a [`Reconstructor`].
///
/// [`Reconstructor`]: crate::coordinator::Reconstructor
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ReconError {
    /// `k` was not greater than 1.
    #[error("k must be greater than 1 (got {got})")]
    InvalidNeighborhoodSize {
        /// The rejected value of `k`.
        got: usize,
    },
    /// `density` was not `Auto` and was not finite and positive.
    #[error("density must be finite and positive (got {got})")]
    InvalidDensity {
        /// The rejected value of `density`.
        got: f32,
    },
    /// `max_volume` was zero.
    #[error("max_volume must be greater than zero")]
    InvalidMaxVolume,
    /// The input point cloud contained no points.
    #[error("point cloud contains no points")]
    EmptyInput,
    /// Plane estimation failed.
    #[error("plane estimation failed: {source}")]
    PlaneEstimationFailure {
        /// Underlying plane-estimation failure.
        #[from]
        source: PlaneEstimationError,
    },
    /// Orientation propagation failed.
    #[error("orientation propagation failed: {source}")]
    OrientationFailure {
        /// Underlying orientation failure.
        #[from]
        source: OrientationError,
    },
    /// Marching cubes failed.
    #[error("marching cubes failed: {source}")]
    MarchingCubesFailure {
        /// Underlying marching-cubes failure.
        #[from]
        source: MarchingCubesError,
    },
}

impl ReconError {
    /// Retrieves the stable [`ReconErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ReconErrorCode {
        match self {
            Self::InvalidNeighborhoodSize { .. } => ReconErrorCode::InvalidNeighborhoodSize,
            Self::InvalidDensity { .. } => ReconErrorCode::InvalidDensity,
            Self::InvalidMaxVolume => ReconErrorCode::InvalidMaxVolume,
            Self::EmptyInput => ReconErrorCode::EmptyInput,
            Self::PlaneEstimationFailure { .. } => ReconErrorCode::PlaneEstimationFailure,
            Self::OrientationFailure { .. } => ReconErrorCode::OrientationFailure,
            Self::MarchingCubesFailure { .. } => ReconErrorCode::MarchingCubesFailure,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ReconError>;
