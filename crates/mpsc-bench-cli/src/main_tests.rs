// crates/mpsc-bench-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Argument parsing and command execution tests.
// Purpose: Ensure ingest writes a dataset and bad configs fail cleanly.
// Dependencies: mpsc-bench-cli main helpers, tempfile
// ============================================================================

//! ## Overview
//! Drives the command functions directly against temp results directories.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use clap::Parser;
use serde_json::Value;
use tempfile::tempdir;

use super::Cli;
use super::Commands;
use super::ConfigCommand;
use super::ConfigValidateCommand;
use super::DEFAULT_INPUT;
use super::IngestCommand;
use super::command_config_validate;
use super::command_ingest;
use super::emit_error;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn short_flags_select_input_and_output() {
    let cli = Cli::try_parse_from(["mpsc-bench", "ingest", "-i", "runs/a", "-o", "out.json"]).unwrap();
    let Commands::Ingest(command) = cli.command else {
        panic!("expected ingest command");
    };
    assert_eq!(command.input, PathBuf::from("runs/a"));
    assert_eq!(command.output, Some(PathBuf::from("out.json")));
}

#[test]
fn emitted_errors_reach_the_log_subscriber() {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let _ = emit_error("ingestion failed: input not found: results");
    });

    let text = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
    assert!(text.contains("ERROR"));
    assert!(text.contains("input not found: results"));
}

#[test]
fn ingest_defaults_to_results_directory() {
    let cli = Cli::try_parse_from(["mpsc-bench", "ingest"]).unwrap();
    let Commands::Ingest(command) = cli.command else {
        panic!("expected ingest command");
    };
    assert_eq!(command.input, PathBuf::from(DEFAULT_INPUT));
    assert!(command.output.is_none());
    assert!(!cli.verbose);
}

#[test]
fn config_validate_parses_path() {
    let cli =
        Cli::try_parse_from(["mpsc-bench", "--verbose", "config", "validate", "--config", "x.toml"])
            .unwrap();
    let Commands::Config {
        command: ConfigCommand::Validate(command),
    } = cli.command
    else {
        panic!("expected config validate command");
    };
    assert_eq!(command.config, Some(PathBuf::from("x.toml")));
    assert!(cli.verbose);
}

#[test]
fn ingest_writes_dataset_to_output_file() {
    let dir = tempdir().unwrap();
    let results = dir.path().join("results");
    fs::create_dir(&results).unwrap();
    fs::write(
        results.join("benchmark_results_q1024.json"),
        r#"{"benchmarkResults": {"queueSize": 1024, "producerCount": 0, "successfulPops": 5000000}}"#,
    )
    .unwrap();
    let config = dir.path().join("mpsc-bench.toml");
    fs::write(&config, "[aggregate]\nmeasurement_window_secs = 0.5\n").unwrap();
    let output = dir.path().join("dataset.json");

    command_ingest(&IngestCommand {
        input: results,
        config: Some(config),
        output: Some(output.clone()),
    })
    .unwrap();

    let dataset: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(dataset["aggregation"]["matrix"]["cells"], serde_json::json!([[10.0]]));
}

#[test]
fn ingest_reports_missing_input() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("mpsc-bench.toml");
    fs::write(&config, "").unwrap();

    let err = command_ingest(&IngestCommand {
        input: dir.path().join("absent"),
        config: Some(config),
        output: None,
    })
    .unwrap_err();

    assert!(err.to_string().contains("input not found"));
}

#[test]
fn config_validate_rejects_invalid_window() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("mpsc-bench.toml");
    fs::write(&config, "[aggregate]\nmeasurement_window_secs = 0.0\n").unwrap();

    let err = command_config_validate(&ConfigValidateCommand {
        config: Some(config),
    })
    .unwrap_err();

    assert!(err.to_string().contains("failed to load config"));
}
