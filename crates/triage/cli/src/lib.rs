//! Triage CLI - command-line front end for support-incident triage
//!
//! This CLI is the presentation layer over `triage-core`:
//! - Evaluate the seed tickets or a ticket file over one or more passes
//! - Generate scenario tickets
//! - Replay a full dashboard session with recurrence memory
//! - Describe the hypothesis rule battery

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::{demo, evaluate, generate, rules};
pub use error::{CliError, CliResult};

/// Triage CLI application
#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Support-incident triage - group tickets, propose root causes, remember recurrences", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (toml, yaml or json)
    #[arg(short, long, env = "TRIAGE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Triage a ticket list
    Evaluate(evaluate::EvaluateArgs),

    /// Generate scenario tickets
    Generate(generate::GenerateArgs),

    /// Replay a dashboard session: seed pass, then every scenario
    Demo,

    /// Show the hypothesis rule battery
    Rules,
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let triage_config = config::load(cli.config.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Evaluate(args) => evaluate::execute(args, triage_config, cli.output),
        Commands::Generate(args) => generate::execute(args, cli.output),
        Commands::Demo => demo::execute(triage_config, cli.output),
        Commands::Rules => rules::execute(triage_config, cli.output),
    }
}
