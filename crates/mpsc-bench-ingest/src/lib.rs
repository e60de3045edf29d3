// crates/mpsc-bench-ingest/src/lib.rs
// ============================================================================
// Module: MPSC Bench Ingest Library
// Description: Loaders for every benchmark artifact family and the pipeline.
// Purpose: Turn a results directory into one keyed, cross-referenced dataset.
// Dependencies: csv, mpsc-bench-config, mpsc-bench-core, serde_json, tracing
// ============================================================================

//! ## Overview
//! Throughput documents are merged first and produce a [`KeyIndex`] that the
//! counter loader uses to adopt the key recorded inside each throughput
//! document. Zone traces are keyed from their file names alone. Directory
//! scans degrade per file: a bad source is logged, reported in the run's
//! [`SourceReport`] list, and skipped.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod counter;
pub mod crossref;
pub mod error;
pub mod pipeline;
pub mod source;
pub mod throughput;
pub mod zone_trace;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use counter::CounterLoader;
pub use counter::CounterSet;
pub use counter::extract_metrics;
pub use counter::parse_counter_line;
pub use crossref::KeyIndex;
pub use crossref::KeyIndexEntry;
pub use error::IngestError;
pub use pipeline::Dataset;
pub use pipeline::ingest;
pub use source::SourceReport;
pub use source::SourceStatus;
pub use throughput::ThroughputLoader;
pub use throughput::ThroughputSet;
pub use zone_trace::ZONE_TRACE_COLUMNS;
pub use zone_trace::ZoneTraceLoader;
pub use zone_trace::ZoneTraceSet;
