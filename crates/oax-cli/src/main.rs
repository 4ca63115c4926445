//! # oax CLI entry point
//!
//! Parses command-line arguments, initializes logging, resolves the
//! repository and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use oax_cli::check::run_check;
use oax_cli::generate::run_generate;
use oax_cli::sample::{run_sample, SampleArgs};
use oax_cli::Workspace;

/// OpenAPI example generation and catalog checking.
#[derive(Parser, Debug)]
#[command(name = "oax", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit log lines as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to a configuration file (default: `oax.yaml` at the repository root).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Repository root (default: nearest ancestor containing the OpenAPI directory).
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write one example per declared operation and rewrite the catalog.
    Generate,

    /// Check the catalog against the specifications and example files.
    Check,

    /// Print the sample synthesized for one schema reference.
    Sample(SampleArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let workspace = Workspace::open(
        cli.root.as_deref(),
        cli.config.as_deref(),
        &cwd,
        |name| std::env::var(name).ok(),
    )?;

    match cli.command {
        Commands::Generate => run_generate(&workspace),
        Commands::Check => run_check(&workspace),
        Commands::Sample(args) => run_sample(&args, &workspace),
    }
}

/// `RUST_LOG` when set, otherwise the level chosen by `-v`.
fn init_tracing(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
