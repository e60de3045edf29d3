// crates/mpsc-bench-core/src/core/counters.rs
// ============================================================================
// Module: Counter Catalog
// Description: Recognized hardware counters and event-name matching.
// Purpose: Map logical metric names to the base event names emitted by perf.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`CounterCatalog`] is an explicit, ordered mapping from logical metric
//! name to expected base event name. Event names in counter dumps may carry a
//! modifier suffix after `:` (for example `dTLB-load-misses:u`); the suffix is
//! stripped before comparison.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Counters recognized when no catalog is configured.
pub const DEFAULT_COUNTERS: [(&str, &str); 2] = [
    ("dTLB-load-misses", "dTLB-load-misses"),
    ("iTLB-load-misses", "iTLB-load-misses"),
];

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Recognized counters keyed by logical metric name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterCatalog {
    /// Logical metric name to expected base event name.
    metrics: BTreeMap<String, String>,
}

impl CounterCatalog {
    /// Creates a catalog from `(metric, base_event)` pairs.
    #[must_use]
    pub fn new<I, K, V>(metrics: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            metrics: metrics.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
        }
    }

    /// Iterates `(metric, base_event)` pairs in metric-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metrics.iter().map(|(metric, event)| (metric.as_str(), event.as_str()))
    }

    /// Returns the number of recognized metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Returns true when no metrics are recognized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Returns a zero-initialized value map with one entry per metric.
    #[must_use]
    pub fn zeroed(&self) -> BTreeMap<String, u64> {
        self.metrics.keys().map(|metric| (metric.clone(), 0)).collect()
    }

    /// Returns the metrics whose expected base event matches `event_name`.
    pub fn metrics_for_event<'a>(&'a self, event_name: &'a str) -> impl Iterator<Item = &'a str> {
        let base = base_event_name(event_name);
        self.iter().filter(move |(_, expected)| *expected == base).map(|(metric, _)| metric)
    }
}

impl Default for CounterCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTERS)
    }
}

/// Strips a `:<suffix>` modifier from a perf event name.
#[must_use]
pub fn base_event_name(event_name: &str) -> &str {
    event_name.split_once(':').map_or(event_name, |(base, _)| base)
}
