//! PLY point-cloud writer (intermediate debug output, §6).
//!
//! ASCII PLY: an `element vertex` per plane origin, colored uniformly
//! `(255, 125, 0)`. Used by `--dump-planes` to inspect the oriented plane
//! cloud before marching cubes runs.

use std::io::{self, Write};
use std::path::PathBuf;

use hoppe_recon_core::PlaneCloud;
use thiserror::Error;

/// Fixed vertex color used for every dumped plane origin, matching the
/// original implementation's debug dump.
const VERTEX_COLOR: (u8, u8, u8) = (255, 125, 0);

/// Errors raised while writing a PLY plane-cloud dump.
#[derive(Debug, Error)]
pub enum PlyWriteError {
    /// Failed to write to the destination.
    #[error("failed to write PLY point cloud to `{path}`: {source}")]
    Io {
        /// Path being written, for diagnostics.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Writes the origins of `planes` to `writer` as an ASCII PLY point cloud.
///
/// # Errors
/// Returns [`PlyWriteError`] if writing fails.
pub fn write_plane_cloud_ply(
    path: &std::path::Path,
    planes: &PlaneCloud,
    writer: impl Write,
) -> Result<(), PlyWriteError> {
    let mut writer = io::BufWriter::new(writer);
    let io_err = |source: io::Error| PlyWriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let (red, green, blue) = VERTEX_COLOR;
    writeln!(writer, "ply").map_err(io_err)?;
    writeln!(writer, "format ascii 1.0").map_err(io_err)?;
    writeln!(writer, "element vertex {}", planes.len()).map_err(io_err)?;
    writeln!(writer, "property float x").map_err(io_err)?;
    writeln!(writer, "property float y").map_err(io_err)?;
    writeln!(writer, "property float z").map_err(io_err)?;
    writeln!(writer, "property uchar red").map_err(io_err)?;
    writeln!(writer, "property uchar green").map_err(io_err)?;
    writeln!(writer, "property uchar blue").map_err(io_err)?;
    writeln!(writer, "end_header").map_err(io_err)?;

    for plane in planes.planes() {
        let origin = plane.origin();
        writeln!(
            writer,
            "{} {} {} {red} {green} {blue}",
            origin.x(),
            origin.y(),
            origin.z()
        )
        .map_err(io_err)?;
    }

    writer.flush().map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoppe_recon_core::{Plane, Point};
    use nalgebra::Vector3;
    use std::path::Path;

    fn sample_cloud() -> PlaneCloud {
        let plane = Plane::new(Point::new(0.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        PlaneCloud::new(vec![plane], vec![0])
    }

    #[test]
    fn writes_ascii_header_and_colored_vertex() {
        let planes = sample_cloud();
        let mut buffer = Vec::new();
        write_plane_cloud_ply(Path::new("planes.ply"), &planes, &mut buffer)
            .expect("write must succeed");
        let text = String::from_utf8(buffer).expect("output must be valid UTF-8");
        assert!(text.starts_with("ply\nformat ascii 1.0\nelement vertex 1\n"));
        assert!(text.contains("end_header\n"));
        assert!(text.trim_end().ends_with("0 0 0 255 125 0"));
    }

    #[test]
    fn empty_plane_cloud_still_writes_a_valid_header() {
        let planes = PlaneCloud::new(Vec::new(), Vec::new());
        let mut buffer = Vec::new();
        write_plane_cloud_ply(Path::new("planes.ply"), &planes, &mut buffer)
            .expect("write must succeed");
        let text = String::from_utf8(buffer).expect("output must be valid UTF-8");
        assert!(text.contains("element vertex 0"));
    }
}
