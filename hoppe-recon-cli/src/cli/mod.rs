//! Command-line interface orchestration for the `hoppe-recon` binary.
//!
//! The CLI offers a single `run` command: load an XYZ point cloud, execute
//! the reconstruction pipeline with the requested parameters, write the
//! resulting mesh as OBJ, and optionally dump the oriented plane cloud as a
//! debug PLY point cloud.

mod commands;

pub use commands::{Cli, CliError, Command, ExecutionSummary, RunCommand, render_summary, run_cli};

#[cfg(test)]
mod tests;
