//! Clap-parsing tests for the top-level [`Cli`] surface.

use super::Cli;
use clap::Parser;

#[test]
fn parses_the_run_subcommand_with_required_positionals() {
    let args = ["hoppe-recon", "run", "in.xyz", "out.obj"];
    let cli = Cli::try_parse_from(args).expect("run with positionals must parse");
    let super::Command::Run(run) = cli.command;
    assert_eq!(run.input.to_string_lossy(), "in.xyz");
    assert_eq!(run.output.to_string_lossy(), "out.obj");
    assert_eq!(run.k, 8);
    assert_eq!(run.max_volume, 8_000_000);
}

#[test]
fn rejects_a_missing_output_path() {
    let args = ["hoppe-recon", "run", "in.xyz"];
    let result = Cli::try_parse_from(args);
    assert!(result.is_err());
}

#[test]
fn parses_optional_flags() {
    let args = [
        "hoppe-recon",
        "run",
        "in.xyz",
        "out.obj",
        "--k",
        "16",
        "--density",
        "0.25",
        "--noise",
        "0.01",
        "--max-volume",
        "1000",
        "--dump-planes",
        "planes.ply",
    ];
    let cli = Cli::try_parse_from(args).expect("flags must parse");
    let super::Command::Run(run) = cli.command;
    assert_eq!(run.k, 16);
    assert_eq!(run.density, Some(0.25));
    assert_eq!(run.noise, 0.01);
    assert_eq!(run.max_volume, 1000);
    assert_eq!(run.dump_planes.as_deref().map(|p| p.to_string_lossy().into_owned()), Some("planes.ply".to_owned()));
}
