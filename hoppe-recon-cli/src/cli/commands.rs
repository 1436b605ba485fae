//! Command implementation and argument parsing for the `hoppe-recon` CLI.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use hoppe_recon_core::{Density, ReconBuilder, ReconError};
use thiserror::Error;

use crate::io::{ObjWriteError, PlyWriteError, XyzReadError, read_point_cloud, write_obj, write_plane_cloud_ply};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "hoppe-recon",
    about = "Reconstruct a watertight triangle mesh from an unorganized point cloud."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Reconstruct a mesh from an XYZ point cloud.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to the input XYZ point cloud.
    pub input: PathBuf,

    /// Path the reconstructed OBJ mesh is written to.
    pub output: PathBuf,

    /// Neighborhood size for plane estimation and the orientation graph.
    #[arg(long, default_value_t = 8)]
    pub k: usize,

    /// Fixed voxel resolution. Derived from the point cloud's bounding box
    /// and sample count when omitted.
    #[arg(long)]
    pub density: Option<f32>,

    /// Additional slack added to `density` in the SDF support test.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f32,

    /// Hard cap on voxel count (`Nx * Ny * Nz`).
    #[arg(long, default_value_t = 8_000_000)]
    pub max_volume: usize,

    /// Optional path to dump the oriented plane cloud as a debug PLY file.
    #[arg(long)]
    pub dump_planes: Option<PathBuf>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Failed to open the input or output path.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading the XYZ point cloud failed.
    #[error(transparent)]
    Xyz(#[from] XyzReadError),
    /// Writing the OBJ mesh failed.
    #[error(transparent)]
    Obj(#[from] ObjWriteError),
    /// Writing the debug PLY plane dump failed.
    #[error(transparent)]
    Ply(#[from] PlyWriteError),
    /// Core reconstruction failed.
    #[error(transparent)]
    Core(#[from] ReconError),
}

/// Summarizes the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Path the input point cloud was read from.
    pub input: PathBuf,
    /// Path the reconstructed mesh was written to.
    pub output: PathBuf,
    /// Number of points in the input cloud.
    pub point_count: usize,
    /// Number of triangles in the reconstructed mesh.
    pub triangle_count: usize,
    /// Final voxel resolution used by the marching-cubes sweep.
    pub resolution: f32,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when parsing, reconstruction, or I/O fails.
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => run_command(run),
    }
}

pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let RunCommand {
        input,
        output,
        k,
        density,
        noise,
        max_volume,
        dump_planes,
    } = command;

    let cloud = read_point_cloud(&input, open_reader(&input)?)?;
    let point_count = cloud.len();

    let mut builder = ReconBuilder::new().with_k(k).with_noise(noise).with_max_volume(max_volume);
    if let Some(density) = density {
        builder = builder.with_density(Density::Fixed(density));
    }
    let reconstructor = builder.build()?;
    let outcome = reconstructor.run(&cloud)?;

    write_obj(&output, &outcome.triangles, create_writer(&output)?)?;

    if let Some(dump_path) = dump_planes.as_deref() {
        write_plane_cloud_ply(dump_path, &outcome.planes, create_writer(dump_path)?)?;
    }

    Ok(ExecutionSummary {
        input,
        output,
        point_count,
        triangle_count: outcome.triangles.len(),
        resolution: outcome.resolution,
    })
}

fn open_reader(path: &Path) -> Result<File, CliError> {
    File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn create_writer(path: &Path) -> Result<File, CliError> {
    File::create(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "input: {}", summary.input.display())?;
    writeln!(writer, "output: {}", summary.output.display())?;
    writeln!(writer, "points: {}", summary.point_count)?;
    writeln!(writer, "triangles: {}", summary.triangle_count)?;
    writeln!(writer, "resolution: {}", summary.resolution)?;
    Ok(())
}
