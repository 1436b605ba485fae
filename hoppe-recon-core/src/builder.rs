//! Parameter validation and construction of a [`Reconstructor`].
//!
//! Mirrors the workspace ancestor's builder/runtime split: a plain-data
//! builder validates [`Parameters`] once, and the resulting [`Reconstructor`]
//! exposes only [`Reconstructor::run`], keeping the hot path free of
//! per-call validation branches.

use crate::coordinator::Reconstructor;
use crate::error::{ReconError, Result};

/// Voxel resolution / SDF support-radius configuration.
///
/// `Auto` derives the resolution from the point cloud's bounding box and
/// sample count (§4.7); `Fixed` pins it to a caller-supplied value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Density {
    /// Derive resolution from the bounding box and sample count.
    Auto,
    /// Use this resolution directly (still subject to the voxel-count cap).
    Fixed(f32),
}

/// Reconstruction parameters recognized by the [`Reconstructor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// Neighborhood size for plane estimation and the orientation graph.
    /// Must be greater than 1.
    pub k: usize,
    /// Voxel resolution strategy.
    pub density: Density,
    /// Additional slack added to `density` in the SDF support test.
    pub noise: f32,
    /// Reserved: the isosurface level. The current implementation always
    /// compares the raw SDF value to zero.
    pub isolevel: f32,
    /// Hard cap on voxel count (`Nx * Ny * Nz`).
    pub max_volume: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            k: 8,
            density: Density::Auto,
            noise: 0.0,
            isolevel: 0.0,
            max_volume: 8_000_000,
        }
    }
}

/// Validates [`Parameters`] and constructs a [`Reconstructor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconBuilder {
    params: Parameters,
}

impl ReconBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the neighborhood size.
    #[must_use]
    pub const fn with_k(mut self, k: usize) -> Self {
        self.params.k = k;
        self
    }

    /// Overrides the voxel-resolution strategy.
    #[must_use]
    pub const fn with_density(mut self, density: Density) -> Self {
        self.params.density = density;
        self
    }

    /// Overrides the SDF support-radius slack.
    #[must_use]
    pub const fn with_noise(mut self, noise: f32) -> Self {
        self.params.noise = noise;
        self
    }

    /// Overrides the voxel-count cap.
    #[must_use]
    pub const fn with_max_volume(mut self, max_volume: usize) -> Self {
        self.params.max_volume = max_volume;
        self
    }

    /// Validates the configuration and constructs a [`Reconstructor`].
    ///
    /// # Errors
    /// Returns [`ReconError::InvalidNeighborhoodSize`] if `k <= 1`,
    /// [`ReconError::InvalidDensity`] if a fixed density is not finite and
    /// positive, and [`ReconError::InvalidMaxVolume`] if `max_volume == 0`.
    pub fn build(self) -> Result<Reconstructor> {
        if self.params.k <= 1 {
            return Err(ReconError::InvalidNeighborhoodSize { got: self.params.k });
        }
        if let Density::Fixed(value) = self.params.density
            && (!value.is_finite() || value <= 0.0)
        {
            return Err(ReconError::InvalidDensity { got: value });
        }
        if self.params.max_volume == 0 {
            return Err(ReconError::InvalidMaxVolume);
        }

        Ok(Reconstructor::new(self.params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_k_not_greater_than_one() {
        let err = ReconBuilder::new()
            .with_k(1)
            .build()
            .expect_err("k=1 must be rejected");
        assert!(matches!(err, ReconError::InvalidNeighborhoodSize { got: 1 }));
    }

    #[test]
    fn rejects_non_finite_fixed_density() {
        let err = ReconBuilder::new()
            .with_density(Density::Fixed(f32::NAN))
            .build()
            .expect_err("non-finite density must be rejected");
        assert!(matches!(err, ReconError::InvalidDensity { .. }));
    }

    #[test]
    fn rejects_zero_max_volume() {
        let err = ReconBuilder::new()
            .with_max_volume(0)
            .build()
            .expect_err("zero max_volume must be rejected");
        assert!(matches!(err, ReconError::InvalidMaxVolume));
    }

    #[test]
    fn accepts_default_parameters() {
        assert!(ReconBuilder::new().build().is_ok());
    }
}
