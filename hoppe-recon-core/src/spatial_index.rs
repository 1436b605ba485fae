//! A thin wrapper over a static k-d tree, used for k-nearest-neighbor
//! queries over point-cloud samples (C1) and, later in the pipeline, over
//! plane origins (C4).
//!
//! The wrapper is intentionally minimal: it owns the coordinate storage the
//! underlying tree borrows against, exposes a single [`SpatialIndex::k_nearest`]
//! operation, and translates the backing crate's own error type into
//! [`SpatialIndexError`] so callers never see a third-party error type across
//! the public API boundary.

use kdtree::KdTree;
use kdtree::distance::squared_euclidean;

use crate::error::{SpatialIndexError, SpatialIndexErrorCode};
use crate::geometry::Point;

type Result<T> = core::result::Result<T, SpatialIndexError>;

/// A single k-nearest-neighbor result: the index of the matched point and
/// its squared distance from the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Index of the matched point in the sequence the index was built from.
    pub index: usize,
    /// Squared Euclidean distance from the query point.
    pub squared_distance: f32,
}

/// A static k-d tree over a fixed set of 3D points.
///
/// Rebuilt whenever the underlying point set changes; there is no
/// incremental insertion once [`SpatialIndex::build`] has returned.
pub struct SpatialIndex {
    tree: KdTree<f32, usize, [f32; 3]>,
}

impl SpatialIndex {
    /// Builds a spatial index over `points`.
    ///
    /// # Errors
    /// Returns [`SpatialIndexError::BackendFailure`] if the underlying tree
    /// rejects an insertion (for example, a non-finite coordinate).
    pub fn build(points: &[Point]) -> Result<Self> {
        let mut tree = KdTree::new(3);
        for (index, point) in points.iter().enumerate() {
            let coords = [point.x(), point.y(), point.z()];
            tree.add(coords, index)
                .map_err(|source| SpatialIndexError::BackendFailure {
                    message: source.to_string(),
                })?;
        }
        Ok(Self { tree })
    }

    /// Returns the `k` nearest points to `query`, in ascending
    /// squared-distance order.
    ///
    /// # Errors
    /// Returns [`SpatialIndexError::EmptyTree`] if no points were indexed,
    /// and [`SpatialIndexError::BackendFailure`] if the underlying tree
    /// query fails for another reason.
    pub fn k_nearest(&self, query: Point, k: usize) -> Result<Vec<Neighbor>> {
        if self.tree.size() == 0 {
            return Err(SpatialIndexError::EmptyTree);
        }
        let coords = [query.x(), query.y(), query.z()];
        let results = self
            .tree
            .nearest(&coords, k, &squared_euclidean)
            .map_err(|source| SpatialIndexError::BackendFailure {
                message: source.to_string(),
            })?;
        Ok(results
            .into_iter()
            .map(|(squared_distance, &index)| Neighbor {
                index,
                squared_distance,
            })
            .collect())
    }
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.tree.size())
            .finish()
    }
}

/// Returns the stable code for an index-construction or query failure that
/// has already been classified, for logging call sites that only need the
/// code rather than the full error value.
#[must_use]
pub const fn error_code(error: &SpatialIndexError) -> SpatialIndexErrorCode {
    error.code()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k_nearest_orders_by_distance() {
        let points = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(5.0, 0.0, 0.0),
        ];
        let index = SpatialIndex::build(&points).expect("build must succeed");
        let neighbors = index
            .k_nearest(Point::new(0.0, 0.0, 0.0), 3)
            .expect("query must succeed");
        assert_eq!(neighbors[0].index, 0);
        assert_eq!(neighbors[1].index, 1);
        assert_eq!(neighbors[2].index, 2);
        assert!(neighbors[0].squared_distance <= neighbors[1].squared_distance);
        assert!(neighbors[1].squared_distance <= neighbors[2].squared_distance);
    }

    #[test]
    fn empty_tree_is_rejected() {
        let index = SpatialIndex::build(&[]).expect("build must succeed on empty input");
        let err = index
            .k_nearest(Point::new(0.0, 0.0, 0.0), 1)
            .expect_err("query over empty tree must fail");
        assert_eq!(err.code(), SpatialIndexErrorCode::EmptyTree);
    }
}
