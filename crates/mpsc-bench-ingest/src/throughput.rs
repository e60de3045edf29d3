// crates/mpsc-bench-ingest/src/throughput.rs
// ============================================================================
// Module: Throughput Loader
// Description: Loads and merges throughput result documents.
// Purpose: Produce one ordered record collection plus the host descriptor.
// Dependencies: mpsc-bench-core, serde_json, tracing
// ============================================================================

//! ## Overview
//! A directory input merges every `benchmark_results_q*.json` shard in
//! `(queue_size, producer_count)` order derived from the file names. A single
//! document input is taken as-is: its records' own fields are authoritative
//! and no filename key recovery happens.
//!
//! The environment descriptor is taken from the first document that carries a
//! non-null one. Descriptors in later documents are discarded, even when they
//! differ. Malformed shards are logged and skipped; the merge continues.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use mpsc_bench_core::ArtifactFamily;
use mpsc_bench_core::EnvironmentDescriptor;
use mpsc_bench_core::ThroughputDocument;
use mpsc_bench_core::ThroughputRecord;
use tracing::info;
use tracing::warn;

use crate::crossref::KeyIndex;
use crate::crossref::KeyIndexEntry;
use crate::error::IngestError;
use crate::source::SourceReport;
use crate::source::SourceStatus;
use crate::source::discover;
use crate::source::read_file_limited;
use crate::source::status_from_name;

// ============================================================================
// SECTION: Output
// ============================================================================

/// Merged throughput results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThroughputSet {
    /// Records in sorted-file order, then document order.
    pub records: Vec<ThroughputRecord>,
    /// Host descriptor from the first document that supplied one.
    pub environment: Option<EnvironmentDescriptor>,
    /// Cross-reference table for counter dumps.
    pub key_index: KeyIndex,
    /// One report per document.
    pub sources: Vec<SourceReport>,
}

// ============================================================================
// SECTION: Loader
// ============================================================================

/// Loads throughput result documents.
#[derive(Debug, Clone, Copy)]
pub struct ThroughputLoader {
    /// Maximum document size, in bytes.
    max_file_bytes: usize,
}

impl ThroughputLoader {
    /// Creates a loader with the given per-document size limit.
    #[must_use]
    pub const fn new(max_file_bytes: usize) -> Self {
        Self {
            max_file_bytes,
        }
    }

    /// Loads a directory of shards or a single document.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::NotFound`] when `input` does not exist. For a
    /// single document, any read or parse failure is returned; for a
    /// directory, only failure to list the directory is.
    pub fn load(&self, input: &Path) -> Result<ThroughputSet, IngestError> {
        if input.is_dir() { self.load_directory(input) } else { self.load_document(input) }
    }

    /// Merges every throughput shard in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] when the directory is absent or cannot be listed.
    pub fn load_directory(&self, dir: &Path) -> Result<ThroughputSet, IngestError> {
        let family = ArtifactFamily::Throughput;
        let mut set = ThroughputSet::default();
        for file in discover(dir, family)? {
            let file_key = file.decoded.key();
            let document = match self.read_document(&file.path) {
                Ok(document) => document,
                Err(err) => {
                    warn!(path = %file.path.display(), error = %err, "skipping throughput document");
                    if file.decoded.is_exact() {
                        set.key_index.insert(file_key, KeyIndexEntry::Unusable(err.to_string()));
                    }
                    set.sources.push(SourceReport::skipped(file.path, family, err.to_string()));
                    continue;
                }
            };
            let (records, environment) = document.into_parts();
            if file.decoded.is_exact() {
                let entry = records.first().map_or_else(
                    || KeyIndexEntry::Unusable("document carries no benchmark results".to_string()),
                    |record| KeyIndexEntry::Resolved(record.key()),
                );
                set.key_index.insert(file_key, entry);
            }
            if set.environment.is_none() {
                set.environment = environment;
            }
            info!(path = %file.path.display(), records = records.len(), "loaded throughput document");
            set.sources.push(SourceReport {
                path: file.path,
                family,
                status: status_from_name(family, file.decoded),
                records: records.len(),
            });
            set.records.extend(records);
        }
        Ok(set)
    }

    /// Loads one document without merging or filename key recovery.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] when the document is absent, too large, or malformed.
    pub fn load_document(&self, path: &Path) -> Result<ThroughputSet, IngestError> {
        let (records, environment) = self.read_document(path)?.into_parts();
        let status = records.first().map_or_else(
            || SourceStatus::Skipped {
                reason: "document carries no benchmark results".to_string(),
            },
            |record| SourceStatus::Resolved {
                key: record.key(),
            },
        );
        info!(path = %path.display(), records = records.len(), "loaded throughput document");
        let report = SourceReport {
            path: path.to_path_buf(),
            family: ArtifactFamily::Throughput,
            status,
            records: records.len(),
        };
        Ok(ThroughputSet {
            records,
            environment,
            key_index: KeyIndex::new(),
            sources: vec![report],
        })
    }

    /// Reads and parses one throughput document.
    fn read_document(&self, path: &Path) -> Result<ThroughputDocument, IngestError> {
        let bytes = read_file_limited(path, self.max_file_bytes)?;
        serde_json::from_slice(&bytes).map_err(|err| IngestError::Malformed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }
}
