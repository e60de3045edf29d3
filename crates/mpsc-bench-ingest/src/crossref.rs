// crates/mpsc-bench-ingest/src/crossref.rs
// ============================================================================
// Module: Cross-Reference Index
// Description: Filename key to authoritative key lookup built from throughput documents.
// Purpose: Let counter dumps adopt the key recorded inside throughput documents.
// Dependencies: mpsc-bench-core
// ============================================================================

//! ## Overview
//! The throughput loader records, for each document whose file name carries
//! both key tokens, the key embedded in its first record. Counter dumps look up
//! their own filename key here instead of reconstructing a throughput file
//! name. A document that could not be used is recorded with the reason, so
//! the counter loader can tell "missing" from "unreadable".

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use mpsc_bench_core::ConfigurationKey;

// ============================================================================
// SECTION: Index
// ============================================================================

/// Cross-reference outcome for one filename key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyIndexEntry {
    /// Key embedded in the document's first record.
    Resolved(ConfigurationKey),
    /// The document existed but could not supply a key.
    Unusable(String),
}

/// Lookup table keyed by filename-derived configuration key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyIndex {
    /// Entries by filename-derived key.
    entries: BTreeMap<ConfigurationKey, KeyIndexEntry>,
}

impl KeyIndex {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Records an entry; the first entry for a key wins.
    pub fn insert(&mut self, file_key: ConfigurationKey, entry: KeyIndexEntry) {
        if let Entry::Vacant(slot) = self.entries.entry(file_key) {
            slot.insert(entry);
        }
    }

    /// Looks up the entry for a filename-derived key.
    #[must_use]
    pub fn get(&self, file_key: ConfigurationKey) -> Option<&KeyIndexEntry> {
        self.entries.get(&file_key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the index holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
