// crates/mpsc-bench-ingest/src/error.rs
// ============================================================================
// Module: Ingest Errors
// Description: Failure taxonomy for artifact ingestion.
// Purpose: Separate fatal input failures from per-source degradations.
// Dependencies: mpsc-bench-core, thiserror
// ============================================================================

//! ## Overview
//! Only [`IngestError::NotFound`] for the input root (and an input with no
//! usable throughput records) aborts a run. Per-source failures inside a
//! directory scan are logged and recorded in the run's source reports.
//! Field coercion failures are not errors at all: they surface as
//! [`mpsc_bench_core::FieldValue::Text`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use mpsc_bench_core::AggregateError;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted by loaders and the ingestion pipeline.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input path does not exist.
    #[error("input not found: {}", .0.display())]
    NotFound(PathBuf),
    /// A source document is not valid structured data or lacks expected fields.
    #[error("malformed source {}: {reason}", path.display())]
    Malformed {
        /// Offending source.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },
    /// A cross-reference lookup failed; the filename-derived key is used instead.
    #[error("configuration key unresolved for {}: {reason}", path.display())]
    KeyUnresolved {
        /// Source whose key could not be cross-referenced.
        path: PathBuf,
        /// Why the lookup failed.
        reason: String,
    },
    /// A source exceeded the configured size limit.
    #[error("source {} exceeds size limit: {actual_bytes} bytes (max {max_bytes})", path.display())]
    TooLarge {
        /// Offending source.
        path: PathBuf,
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Observed size in bytes.
        actual_bytes: usize,
    },
    /// I/O failure while reading a source or listing a directory.
    #[error("io failure reading {}: {reason}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error text.
        reason: String,
    },
    /// The input yielded no throughput records.
    #[error("no throughput results found in {}", .0.display())]
    NoThroughputDocuments(PathBuf),
    /// Aggregation failed.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}
