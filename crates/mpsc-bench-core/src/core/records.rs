// crates/mpsc-bench-core/src/core/records.rs
// ============================================================================
// Module: Benchmark Records
// Description: Parsed records for throughput, zone-trace, and counter artifacts.
// Purpose: Provide immutable, serializable sample types for the ingestion pipeline.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Records are created once by a loader and never mutated afterwards. The
//! throughput document schema accepts either a single record or an array of
//! records under `benchmarkResults`; both forms normalize to a list.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::key::ConfigurationKey;
use crate::core::value::FieldValue;

// ============================================================================
// SECTION: Throughput
// ============================================================================

/// One completed benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThroughputRecord {
    /// Queue size reported by the harness.
    pub queue_size: u64,
    /// Number of concurrent producers.
    pub producer_count: u32,
    /// Number of pops that returned an element during the measurement window.
    pub successful_pops: u64,
    /// Remaining harness fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ThroughputRecord {
    /// Returns the configuration key embedded in the record.
    #[must_use]
    pub const fn key(&self) -> ConfigurationKey {
        ConfigurationKey::new(self.queue_size, self.producer_count)
    }
}

/// Opaque descriptive metadata about the benchmark host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentDescriptor(pub Value);

/// `benchmarkResults` payload: a single record or a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultPayload {
    /// Batched results.
    Many(Vec<ThroughputRecord>),
    /// A single result object.
    One(Box<ThroughputRecord>),
}

impl ResultPayload {
    /// Normalizes the payload into a list of records.
    #[must_use]
    pub fn into_records(self) -> Vec<ThroughputRecord> {
        match self {
            Self::Many(records) => records,
            Self::One(record) => vec![*record],
        }
    }
}

/// Top-level throughput document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThroughputDocument {
    /// Result payload.
    pub benchmark_results: ResultPayload,
    /// Optional host descriptor; `null` is treated as absent.
    #[serde(default)]
    pub cpu_info: Option<EnvironmentDescriptor>,
}

impl ThroughputDocument {
    /// Splits the document into its normalized records and environment descriptor.
    #[must_use]
    pub fn into_parts(self) -> (Vec<ThroughputRecord>, Option<EnvironmentDescriptor>) {
        let environment = self.cpu_info.filter(|descriptor| !descriptor.0.is_null());
        (self.benchmark_results.into_records(), environment)
    }
}

// ============================================================================
// SECTION: Zone Trace
// ============================================================================

/// One timing-zone summary row from a zone-trace export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneTraceRecord {
    /// Configuration key recovered from the file name.
    #[serde(flatten)]
    pub key: ConfigurationKey,
    /// Zone name (for example `Push` or `Pop`).
    pub name: String,
    /// Source file of the instrumented zone.
    pub src_file: String,
    /// Source line of the instrumented zone.
    pub src_line: FieldValue,
    /// Total time spent in the zone, in nanoseconds.
    pub total_ns: FieldValue,
    /// Share of total traced time, in percent.
    pub total_perc: FieldValue,
    /// Number of zone samples.
    pub counts: FieldValue,
    /// Mean zone duration, in nanoseconds.
    pub mean_ns: FieldValue,
    /// Minimum zone duration, in nanoseconds.
    pub min_ns: FieldValue,
    /// Maximum zone duration, in nanoseconds.
    pub max_ns: FieldValue,
    /// Standard deviation of zone duration, in nanoseconds.
    pub std_ns: FieldValue,
}

// ============================================================================
// SECTION: Counters
// ============================================================================

/// One hardware-counter snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterRecord {
    /// Authoritative configuration key (cross-referenced when possible).
    #[serde(flatten)]
    pub key: ConfigurationKey,
    /// Extracted counter values by logical metric name.
    pub metrics: BTreeMap<String, u64>,
}
