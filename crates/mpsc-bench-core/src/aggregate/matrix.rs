// crates/mpsc-bench-core/src/aggregate/matrix.rs
// ============================================================================
// Module: Throughput Matrix
// Description: Dense producer-count by queue-size throughput grid.
// Purpose: Back heatmap presentation with fixed, data-derived dimensions.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Dimensions are fixed from the distinct sorted keys before any value is
//! placed. Rows are producer counts, columns are queue sizes, and unpopulated
//! cells hold `0.0`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::ConfigurationKey;

// ============================================================================
// SECTION: Matrix
// ============================================================================

/// Dense throughput matrix indexed by `(rank(producer_count), rank(queue_size))`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThroughputMatrix {
    /// Distinct queue sizes, ascending (column labels).
    pub queue_sizes: Vec<u64>,
    /// Distinct producer counts, ascending (row labels).
    pub producer_counts: Vec<u32>,
    /// Row-major cells; `cells[row][column]`.
    pub cells: Vec<Vec<f64>>,
}

impl ThroughputMatrix {
    /// Creates a zero-filled matrix with the given axes.
    #[must_use]
    pub fn zeroed(queue_sizes: &BTreeSet<u64>, producer_counts: &BTreeSet<u32>) -> Self {
        let queue_sizes: Vec<u64> = queue_sizes.iter().copied().collect();
        let producer_counts: Vec<u32> = producer_counts.iter().copied().collect();
        let cells = vec![vec![0.0; queue_sizes.len()]; producer_counts.len()];
        Self {
            queue_sizes,
            producer_counts,
            cells,
        }
    }

    /// Returns `(rows, columns)`: distinct producer counts by distinct queue sizes.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.producer_counts.len(), self.queue_sizes.len())
    }

    /// Returns `(row, column)` for a key whose coordinates are on both axes.
    #[must_use]
    pub fn position(&self, key: ConfigurationKey) -> Option<(usize, usize)> {
        let row = self.producer_counts.binary_search(&key.producer_count).ok()?;
        let column = self.queue_sizes.binary_search(&key.queue_size).ok()?;
        Some((row, column))
    }

    /// Returns the cell value for `key`, if the key lies on both axes.
    #[must_use]
    pub fn get(&self, key: ConfigurationKey) -> Option<f64> {
        let (row, column) = self.position(key)?;
        self.cells.get(row).and_then(|cells| cells.get(column)).copied()
    }

    /// Writes `value` into the cell for `key`. Returns false when `key` is off-axis.
    pub(crate) fn place(&mut self, key: ConfigurationKey, value: f64) -> bool {
        let Some((row, column)) = self.position(key) else {
            return false;
        };
        match self.cells.get_mut(row).and_then(|cells| cells.get_mut(column)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }
}
