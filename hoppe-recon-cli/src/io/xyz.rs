//! XYZ point-cloud reader.
//!
//! ASCII, whitespace-separated `x y z` triples, one per line; comments are
//! not supported and parsing runs to EOF. The separator is permissive: any
//! run of whitespace between coordinates is accepted.

use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use hoppe_recon_core::{Point, PointCloud};
use thiserror::Error;

/// Errors raised while reading an XYZ point cloud.
#[derive(Debug, Error)]
pub enum XyzReadError {
    /// Failed to read a line from the input.
    #[error("failed to read line {line} of `{path}`: {source}")]
    Io {
        /// Path being read, for diagnostics.
        path: PathBuf,
        /// One-based line number that failed to read.
        line: usize,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A non-blank line did not contain exactly three whitespace-separated
    /// floats.
    #[error("line {line} of `{path}` is not a valid `x y z` triple: `{content}`")]
    MalformedTriple {
        /// Path being read, for diagnostics.
        path: PathBuf,
        /// One-based line number that failed to parse.
        line: usize,
        /// The offending line, verbatim.
        content: String,
    },
}

/// Reads a point cloud from `reader`, one whitespace-separated `x y z`
/// triple per line. Blank lines are skipped.
///
/// # Errors
/// Returns [`XyzReadError`] if a line cannot be read, or a non-blank line
/// does not parse as three whitespace-separated floats.
pub fn read_point_cloud(path: &Path, reader: impl Read) -> Result<PointCloud, XyzReadError> {
    let mut points = Vec::new();
    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| XyzReadError::Io {
            path: path.to_path_buf(),
            line: line_number,
            source,
        })?;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        let malformed = || XyzReadError::MalformedTriple {
            path: path.to_path_buf(),
            line: line_number,
            content: line.clone(),
        };
        let [x, y, z] = fields.as_slice() else {
            return Err(malformed());
        };
        let (x, y, z) = parse_triple(x, y, z).ok_or_else(malformed)?;
        points.push(Point::new(x, y, z));
    }
    Ok(PointCloud::new(points))
}

fn parse_triple(x: &str, y: &str, z: &str) -> Option<(f32, f32, f32)> {
    Some((x.parse().ok()?, y.parse().ok()?, z.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_whitespace_separated_triples() {
        let data = "0.0 0.0 0.0\n1.0\t2.0   3.0\n\n-1.5 2.5 -3.5\n";
        let cloud = read_point_cloud(Path::new("test.xyz"), Cursor::new(data))
            .expect("well-formed input must parse");
        assert_eq!(cloud.len(), 3);
        assert_eq!(cloud.points()[1], Point::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn rejects_a_malformed_line() {
        let data = "0.0 0.0 0.0\nnot a triple\n";
        let err = read_point_cloud(Path::new("test.xyz"), Cursor::new(data))
            .expect_err("malformed line must be rejected");
        assert!(matches!(err, XyzReadError::MalformedTriple { line: 2, .. }));
    }

    #[test]
    fn empty_input_yields_empty_cloud() {
        let cloud = read_point_cloud(Path::new("test.xyz"), Cursor::new(""))
            .expect("empty input must parse");
        assert!(cloud.is_empty());
    }
}
