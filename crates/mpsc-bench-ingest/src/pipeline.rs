// crates/mpsc-bench-ingest/src/pipeline.rs
// ============================================================================
// Module: Ingestion Pipeline
// Description: Runs the loaders and the aggregator for one input path.
// Purpose: Assemble one keyed, cross-referenced dataset per invocation.
// Dependencies: mpsc-bench-config, mpsc-bench-core, serde, tracing
// ============================================================================

//! ## Overview
//! Throughput results load first and seed the cross-reference index. The
//! aggregator runs over the merged records. Zone traces and counter dumps are
//! loaded only for directory inputs, each gated by its `[ingest]` switch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use mpsc_bench_config::BenchConfig;
use mpsc_bench_core::Aggregation;
use mpsc_bench_core::Aggregator;
use mpsc_bench_core::CounterRecord;
use mpsc_bench_core::EnvironmentDescriptor;
use mpsc_bench_core::ThroughputRecord;
use mpsc_bench_core::ZoneTraceRecord;
use serde::Serialize;
use tracing::info;

use crate::counter::CounterLoader;
use crate::counter::CounterSet;
use crate::crossref::KeyIndex;
use crate::error::IngestError;
use crate::source::SourceReport;
use crate::throughput::ThroughputLoader;
use crate::zone_trace::ZoneTraceLoader;

// ============================================================================
// SECTION: Dataset
// ============================================================================

/// Everything one ingestion run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Host descriptor from the first throughput document that had one.
    pub environment: Option<EnvironmentDescriptor>,
    /// Merged throughput records.
    pub throughput: Vec<ThroughputRecord>,
    /// Series and matrix derived from `throughput`.
    pub aggregation: Aggregation,
    /// Zone-trace rows.
    pub zone_traces: Vec<ZoneTraceRecord>,
    /// Counter snapshots.
    pub counters: Vec<CounterRecord>,
    /// Per-source outcomes, throughput first.
    pub sources: Vec<SourceReport>,
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Ingests `input` (a results directory or one throughput document).
///
/// # Errors
///
/// Returns [`IngestError::NotFound`] when `input` does not exist,
/// [`IngestError::NoThroughputDocuments`] when no throughput record loads,
/// and aggregation or single-document failures as-is.
pub fn ingest(config: &BenchConfig, input: &Path) -> Result<Dataset, IngestError> {
    let max_file_bytes = config.ingest.max_file_bytes;
    let throughput = ThroughputLoader::new(max_file_bytes).load(input)?;
    if throughput.records.is_empty() {
        return Err(IngestError::NoThroughputDocuments(input.to_path_buf()));
    }
    let aggregation = Aggregator::new(config.aggregator_config())?.aggregate(&throughput.records)?;
    info!(
        records = throughput.records.len(),
        queue_sizes = aggregation.matrix.queue_sizes.len(),
        producer_counts = aggregation.matrix.producer_counts.len(),
        "aggregated throughput"
    );

    let mut sources = throughput.sources;
    let mut zone_traces = Vec::new();
    let mut counters = Vec::new();
    if input.is_dir() {
        if config.ingest.zone_traces {
            let set = ZoneTraceLoader::new(max_file_bytes).load(input)?;
            zone_traces = set.records;
            sources.extend(set.sources);
        }
        if config.ingest.counters {
            let set = load_counters(config, input, &throughput.key_index)?;
            counters = set.records;
            sources.extend(set.sources);
        }
    }
    info!(
        zone_traces = zone_traces.len(),
        counters = counters.len(),
        sources = sources.len(),
        "ingestion complete"
    );
    Ok(Dataset {
        environment: throughput.environment,
        throughput: throughput.records,
        aggregation,
        zone_traces,
        counters,
        sources,
    })
}

/// Runs the counter loader with the configured catalog.
fn load_counters(
    config: &BenchConfig,
    dir: &Path,
    index: &KeyIndex,
) -> Result<CounterSet, IngestError> {
    CounterLoader::new(config.counter_catalog(), config.ingest.max_file_bytes).load(dir, index)
}
