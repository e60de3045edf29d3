// crates/mpsc-bench-ingest/src/counter.rs
// ============================================================================
// Module: Counter Loader
// Description: Extracts recognized hardware counters from perf-stat dumps.
// Purpose: Emit counter snapshots keyed by the authoritative throughput key.
// Dependencies: mpsc-bench-core, tracing
// ============================================================================

//! ## Overview
//! Counter dumps are named `perf_q<N>_p<P>.txt`; both tokens are mandatory and
//! a file without them is skipped. The filename key is looked up in the
//! [`KeyIndex`] built by the throughput loader: a resolved entry supersedes
//! the filename key, anything else falls back to it with a warning.
//!
//! Extraction starts every catalog metric at `0` and scans line by line. A
//! line counts only when it holds exactly an integer and an event name
//! (optionally followed by a `#` annotation). The first match wins per metric.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;

use mpsc_bench_core::ArtifactFamily;
use mpsc_bench_core::ConfigurationKey;
use mpsc_bench_core::CounterCatalog;
use mpsc_bench_core::CounterRecord;
use mpsc_bench_core::DecodedKey;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::crossref::KeyIndex;
use crate::crossref::KeyIndexEntry;
use crate::error::IngestError;
use crate::source::SourceReport;
use crate::source::SourceStatus;
use crate::source::discover;
use crate::source::read_file_limited;

// ============================================================================
// SECTION: Line Parsing
// ============================================================================

/// Parses one perf-stat line into `(event name, value)`.
///
/// Returns `None` for headers, blank lines, and `<not supported>` markers.
#[must_use]
pub fn parse_counter_line(line: &str) -> Option<(&str, u64)> {
    let body = line.split_once('#').map_or(line, |(body, _)| body);
    let mut tokens = body.split_whitespace();
    let value = tokens.next()?;
    let event = tokens.next()?;
    if tokens.next().is_some() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    value.parse().ok().map(|value| (event, value))
}

/// Extracts catalog metrics from a full dump.
#[must_use]
pub fn extract_metrics(catalog: &CounterCatalog, text: &str) -> BTreeMap<String, u64> {
    let mut metrics = catalog.zeroed();
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for (event, value) in text.lines().filter_map(parse_counter_line) {
        for metric in catalog.metrics_for_event(event) {
            if seen.insert(metric) {
                metrics.insert(metric.to_string(), value);
            }
        }
    }
    metrics
}

// ============================================================================
// SECTION: Loader
// ============================================================================

/// Counter snapshots gathered from a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterSet {
    /// Snapshots in sorted-file order.
    pub records: Vec<CounterRecord>,
    /// One report per counter dump.
    pub sources: Vec<SourceReport>,
}

/// Loads perf-stat counter dumps.
#[derive(Debug, Clone)]
pub struct CounterLoader {
    /// Recognized metrics.
    catalog: CounterCatalog,
    /// Maximum dump size, in bytes.
    max_file_bytes: usize,
}

impl CounterLoader {
    /// Creates a loader for the given catalog and per-file size limit.
    #[must_use]
    pub const fn new(catalog: CounterCatalog, max_file_bytes: usize) -> Self {
        Self {
            catalog,
            max_file_bytes,
        }
    }

    /// Loads every counter dump in `dir`, cross-referencing keys via `index`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] when `dir` is absent or cannot be listed.
    pub fn load(&self, dir: &Path, index: &KeyIndex) -> Result<CounterSet, IngestError> {
        let family = ArtifactFamily::Counter;
        let mut set = CounterSet::default();
        for file in discover(dir, family)? {
            let DecodedKey::Exact(file_key) = file.decoded else {
                warn!(path = %file.path.display(), "skipping counter dump without queue and producer tokens");
                set.sources.push(SourceReport::skipped(
                    file.path,
                    family,
                    "file name does not match the counter pattern",
                ));
                continue;
            };
            let bytes = match read_file_limited(&file.path, self.max_file_bytes) {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!(path = %file.path.display(), error = %err, "skipping counter dump");
                    set.sources.push(SourceReport::skipped(file.path, family, err.to_string()));
                    continue;
                }
            };
            let (key, status) = resolve_key(&file.path, file_key, index);
            let metrics = extract_metrics(&self.catalog, &String::from_utf8_lossy(&bytes));
            info!(path = %file.path.display(), key = %key, "loaded counter dump");
            set.records.push(CounterRecord {
                key,
                metrics,
            });
            set.sources.push(SourceReport {
                path: file.path,
                family,
                status,
                records: 1,
            });
        }
        Ok(set)
    }
}

/// Chooses the authoritative key for a dump named with `file_key`.
fn resolve_key(
    path: &Path,
    file_key: ConfigurationKey,
    index: &KeyIndex,
) -> (ConfigurationKey, SourceStatus) {
    let reason = match index.get(file_key) {
        Some(KeyIndexEntry::Resolved(key)) => {
            if *key != file_key {
                debug!(path = %path.display(), file_key = %file_key, key = %key, "throughput key supersedes file name");
            }
            return (*key, SourceStatus::Resolved {
                key: *key,
            });
        }
        Some(KeyIndexEntry::Unusable(reason)) => {
            format!("throughput document for {file_key} unusable: {reason}")
        }
        None => format!("no throughput document for {file_key}"),
    };
    let err = IngestError::KeyUnresolved {
        path: path.to_path_buf(),
        reason,
    };
    warn!(error = %err, "falling back to file name key");
    (file_key, SourceStatus::DefaultedKey {
        key: file_key,
        reason: err.to_string(),
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
