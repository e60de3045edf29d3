// crates/mpsc-bench-core/src/aggregate/series.rs
// ============================================================================
// Module: Derived Series
// Description: Throughput grouped by queue size and by producer count.
// Purpose: Provide sorted line-chart series for presentation.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Both groupings hold the same record set. Each record appears in exactly one
//! group of each grouping, and every group is sorted ascending on its
//! secondary key.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Points
// ============================================================================

/// A point in a queue-size group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerPoint {
    /// Secondary key.
    pub producer_count: u32,
    /// Throughput in millions of operations per second.
    pub throughput_mops: f64,
}

/// A point in a producer-count group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuePoint {
    /// Secondary key.
    pub queue_size: u64,
    /// Throughput in millions of operations per second.
    pub throughput_mops: f64,
}

// ============================================================================
// SECTION: Series
// ============================================================================

/// Two orderings of the same throughput samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedSeries {
    /// Groups keyed by queue size, each sorted by producer count.
    pub by_queue_size: BTreeMap<u64, Vec<ProducerPoint>>,
    /// Groups keyed by producer count, each sorted by queue size.
    pub by_producer_count: BTreeMap<u32, Vec<QueuePoint>>,
}

impl DerivedSeries {
    /// Adds one sample to both groupings. Call [`DerivedSeries::sort`] afterwards.
    pub(crate) fn push(&mut self, queue_size: u64, producer_count: u32, throughput_mops: f64) {
        self.by_queue_size.entry(queue_size).or_default().push(ProducerPoint {
            producer_count,
            throughput_mops,
        });
        self.by_producer_count.entry(producer_count).or_default().push(QueuePoint {
            queue_size,
            throughput_mops,
        });
    }

    /// Sorts every group on its secondary key. The sort is stable.
    pub(crate) fn sort(&mut self) {
        for points in self.by_queue_size.values_mut() {
            points.sort_by_key(|point| point.producer_count);
        }
        for points in self.by_producer_count.values_mut() {
            points.sort_by_key(|point| point.queue_size);
        }
    }

    /// Returns the number of samples held by each grouping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_queue_size.values().map(Vec::len).sum()
    }

    /// Returns true when no samples were grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_queue_size.is_empty()
    }
}
