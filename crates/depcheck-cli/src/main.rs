#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod logging;

use clap::Parser;
use depcheck_core::Config;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "depcheck")]
#[command(
    author,
    version = depcheck_core::VERSION,
    about = "Check package.json dependency sections against node_modules",
    long_about = None
)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    /// JSON file with check options
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Path to package.json (defaults to <cwd>/package.json)
    #[arg(value_name = "MANIFEST")]
    manifest: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json);

    logging::init(config.verbosity, config.json_logs);

    let span = tracing::info_span!("check", cmd = "check", cwd = %config.cwd.display());
    let _guard = span.enter();
    commands::check::run(
        &config,
        cli.manifest.as_deref(),
        cli.options.as_deref(),
        cli.json,
    )
}
