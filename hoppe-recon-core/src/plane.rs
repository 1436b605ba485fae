//! Oriented tangent-plane primitives produced by plane estimation and
//! consumed by orientation propagation and the signed-distance evaluator.

use nalgebra::Vector3;

use crate::geometry::Point;

/// A local tangent plane estimated at a sample point.
///
/// `origin` never changes after estimation; `normal` may have its sign
/// flipped during orientation propagation but keeps unit length throughout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    origin: Point,
    normal: Vector3<f32>,
}

impl Plane {
    /// Builds a plane from an origin and a (pre-normalized) unit normal.
    #[must_use]
    pub const fn new(origin: Point, normal: Vector3<f32>) -> Self {
        Self { origin, normal }
    }

    /// Returns the plane's origin.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the plane's unit normal.
    #[must_use]
    pub const fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Flips the sign of the normal in place.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }
}

/// An ordered, positionally indexed sequence of planes.
///
/// Index `i` corresponds to sample point `i` in the [`PointCloud`] the planes
/// were estimated from, unless a sample was skipped for degeneracy (see
/// `PlaneCloud::source_indices`).
///
/// [`PointCloud`]: crate::geometry::PointCloud
#[derive(Debug, Clone, Default)]
pub struct PlaneCloud {
    planes: Vec<Plane>,
    /// For each plane, the index of the point cloud sample it was estimated
    /// from. Present so skipped (degenerate) samples do not silently shift
    /// the positional correspondence that most of the pipeline assumes.
    source_indices: Vec<usize>,
}

impl PlaneCloud {
    /// Builds a plane cloud from planes paired with their originating sample
    /// index.
    #[must_use]
    pub fn new(planes: Vec<Plane>, source_indices: Vec<usize>) -> Self {
        Self {
            planes,
            source_indices,
        }
    }

    /// Returns the number of planes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    /// Returns `true` when no planes were estimated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// Returns the planes as a slice.
    #[must_use]
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Returns the plane at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Plane> {
        self.planes.get(index)
    }

    /// Returns a mutable reference to the plane at `index`, if present.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Plane> {
        self.planes.get_mut(index)
    }

    /// Returns the originating point-cloud sample index for plane `index`.
    #[must_use]
    pub fn source_index(&self, index: usize) -> Option<usize> {
        self.source_indices.get(index).copied()
    }

    /// Returns all plane origins as points, in plane-index order.
    #[must_use]
    pub fn origins(&self) -> Vec<Point> {
        self.planes.iter().map(Plane::origin).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_negates_normal() {
        let mut plane = Plane::new(Point::new(0.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        plane.flip();
        assert_eq!(plane.normal(), Vector3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn plane_cloud_tracks_source_indices() {
        let planes = vec![Plane::new(Point::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0))];
        let cloud = PlaneCloud::new(planes, vec![7]);
        assert_eq!(cloud.source_index(0), Some(7));
        assert_eq!(cloud.source_index(1), None);
    }
}
