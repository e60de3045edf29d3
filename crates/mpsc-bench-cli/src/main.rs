// crates/mpsc-bench-cli/src/main.rs
// ============================================================================
// Module: MPSC Bench CLI Entry Point
// Description: Command dispatcher for benchmark ingestion and config checks.
// Purpose: Turn a results directory into one dataset document.
// Dependencies: clap, mpsc-bench-config, mpsc-bench-ingest, serde_json, tracing.
// ============================================================================

//! ## Overview
//! `mpsc-bench ingest` loads every artifact family from a results directory
//! (or one throughput document), aggregates the throughput records, and
//! writes the resulting dataset as JSON to stdout or `--output`. Logs go to
//! stderr and honor `RUST_LOG`.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use mpsc_bench_config::BenchConfig;
use mpsc_bench_ingest::Dataset;
use mpsc_bench_ingest::ingest;
use thiserror::Error;
use tracing::error;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Default results directory.
const DEFAULT_INPUT: &str = "results";

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "mpsc-bench", version, disable_help_subcommand = true)]
struct Cli {
    /// Enable debug logging (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Ingest benchmark artifacts into one dataset.
    Ingest(IngestCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for the ingest command.
#[derive(Args, Debug)]
struct IngestCommand {
    /// Results directory or a single throughput document.
    #[arg(long, short, value_name = "PATH", default_value = DEFAULT_INPUT)]
    input: PathBuf,
    /// Optional config file path (defaults to `mpsc-bench.toml` or env override).
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,
    /// Write the dataset here instead of stdout.
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to `mpsc-bench.toml` or env override).
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Commands::Ingest(command) => command_ingest(&command),
        Commands::Config {
            command,
        } => command_config(&command),
    }
}

/// Installs the stderr log subscriber.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes the ingest command.
fn command_ingest(command: &IngestCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let dataset = ingest(&config, &command.input)
        .map_err(|err| CliError::new(format!("ingestion failed: {err}")))?;
    let rendered = render_dataset(&dataset)?;
    match &command.output {
        Some(path) => {
            fs::write(path, rendered.as_bytes()).map_err(|err| {
                CliError::new(format!("failed to write {}: {err}", path.display()))
            })?;
            info!(path = %path.display(), "wrote dataset");
        }
        None => {
            write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Dispatches config subcommands.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = load_config(command.config.as_deref())?;
    write_stdout_line("config ok").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads and validates configuration.
fn load_config(path: Option<&Path>) -> CliResult<BenchConfig> {
    BenchConfig::load(path).map_err(|err| CliError::new(format!("failed to load config: {err}")))
}

/// Serializes a dataset as pretty JSON.
fn render_dataset(dataset: &Dataset) -> CliResult<String> {
    serde_json::to_string_pretty(dataset)
        .map_err(|err| CliError::new(format!("failed to serialize dataset: {err}")))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Logs an error, echoes it to stderr, and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    error!(error = %message, "command failed");
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
