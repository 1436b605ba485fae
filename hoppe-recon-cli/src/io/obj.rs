//! OBJ mesh writer.
//!
//! ASCII Wavefront OBJ. Vertices are not deduplicated: each triangle
//! contributes its own three `v` lines, followed by one `f` line per
//! triangle with 1-based indices. No normals or texture coordinates are
//! emitted.

use std::io::{self, Write};
use std::path::PathBuf;

use hoppe_recon_core::Triangle;
use thiserror::Error;

/// Errors raised while writing an OBJ mesh.
#[derive(Debug, Error)]
pub enum ObjWriteError {
    /// Failed to write to the destination.
    #[error("failed to write OBJ mesh to `{path}`: {source}")]
    Io {
        /// Path being written, for diagnostics.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Writes `triangles` to `writer` as an OBJ mesh (§6).
///
/// Vertices are written in triangle order (three per face, undeduplicated),
/// followed by one `f i j k` line per triangle using 1-based indices.
///
/// # Errors
/// Returns [`ObjWriteError`] if writing fails.
pub fn write_obj(
    path: &std::path::Path,
    triangles: &[Triangle],
    writer: impl Write,
) -> Result<(), ObjWriteError> {
    let mut writer = io::BufWriter::new(writer);
    let io_err = |source: io::Error| ObjWriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    for triangle in triangles {
        write_vertex(&mut writer, &triangle.a).map_err(io_err)?;
        write_vertex(&mut writer, &triangle.b).map_err(io_err)?;
        write_vertex(&mut writer, &triangle.c).map_err(io_err)?;
    }

    for index in 0..triangles.len() {
        let base = index * 3 + 1;
        writeln!(writer, "f {base} {} {}", base + 1, base + 2).map_err(io_err)?;
    }

    writer.flush().map_err(io_err)
}

fn write_vertex(writer: &mut impl Write, point: &hoppe_recon_core::Point) -> io::Result<()> {
    writeln!(writer, "v {} {} {}", point.x(), point.y(), point.z())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoppe_recon_core::Point;
    use std::path::Path;

    fn triangle(offset: f32) -> Triangle {
        Triangle {
            a: Point::new(offset, 0.0, 0.0),
            b: Point::new(offset, 1.0, 0.0),
            c: Point::new(offset, 0.0, 1.0),
        }
    }

    #[test]
    fn writes_undeduplicated_vertices_and_one_based_faces() {
        let triangles = vec![triangle(0.0), triangle(1.0)];
        let mut buffer = Vec::new();
        write_obj(Path::new("mesh.obj"), &triangles, &mut buffer).expect("write must succeed");
        let text = String::from_utf8(buffer).expect("output must be valid UTF-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(&lines[0..6], &[
            "v 0 0 0", "v 0 1 0", "v 0 0 1", "v 1 0 0", "v 1 1 0", "v 1 0 1",
        ]);
        assert_eq!(&lines[6..8], &["f 1 2 3", "f 4 5 6"]);
    }

    #[test]
    fn empty_mesh_writes_nothing() {
        let mut buffer = Vec::new();
        write_obj(Path::new("mesh.obj"), &[], &mut buffer).expect("write must succeed");
        assert!(buffer.is_empty());
    }
}
