//! End-to-end reconstruction scenarios exercising the public
//! `Reconstructor::run` API against synthetic fixtures.
#![expect(clippy::expect_used, reason = "tests require contextual panics")]

use hoppe_recon_core::{Density, ReconBuilder};
use hoppe_recon_test_support::{cube_surface_point_cloud, sphere_point_cloud};
use nalgebra::Vector3;
use rstest::rstest;

#[rstest]
fn unit_sphere_reconstructs_with_outward_normals() {
    let cloud = sphere_point_cloud(1_000, 1.0, 7);
    let reconstructor = ReconBuilder::new()
        .with_k(12)
        .with_max_volume(500_000)
        .build()
        .expect("builder must succeed");

    let output = reconstructor.run(&cloud).expect("reconstruction must succeed");
    assert!(!output.triangles.is_empty());

    let tolerance = 2.0 * output.resolution;
    for triangle in &output.triangles {
        for vertex in [triangle.a, triangle.b, triangle.c] {
            let radius =
                (vertex.x() * vertex.x() + vertex.y() * vertex.y() + vertex.z() * vertex.z())
                    .sqrt();
            assert!(
                (radius - 1.0).abs() <= tolerance,
                "vertex radius {radius} outside tolerance {tolerance}"
            );
        }
    }

    for plane in output.planes.planes() {
        let origin = plane.origin();
        let outward = Vector3::new(origin.x(), origin.y(), origin.z());
        assert!(
            plane.normal().dot(&outward) > 0.0,
            "normal {:?} does not point outward from origin {:?}",
            plane.normal(),
            origin
        );
    }
}

#[rstest]
fn cube_surface_reconstructs_within_one_voxel_of_bounds() {
    let cloud = cube_surface_point_cloud(200, 1.0, 11);
    let reconstructor = ReconBuilder::new()
        .with_k(10)
        .with_density(Density::Fixed(0.2))
        .with_max_volume(500_000)
        .build()
        .expect("builder must succeed");

    let output = reconstructor.run(&cloud).expect("reconstruction must succeed");
    assert!(!output.triangles.is_empty());

    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for triangle in &output.triangles {
        for vertex in [triangle.a, triangle.b, triangle.c] {
            let coords = [vertex.x(), vertex.y(), vertex.z()];
            for (axis, coord) in coords.into_iter().enumerate() {
                min[axis] = min[axis].min(coord);
                max[axis] = max[axis].max(coord);
            }
        }
    }

    let voxel = output.resolution;
    for axis in 0..3 {
        assert!(
            min[axis] >= -1.0 - voxel,
            "min[{axis}] = {} below cube bound",
            min[axis]
        );
        assert!(
            max[axis] <= 1.0 + voxel,
            "max[{axis}] = {} above cube bound",
            max[axis]
        );
    }
}
