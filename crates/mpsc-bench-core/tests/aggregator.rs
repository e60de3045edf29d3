// crates/mpsc-bench-core/tests/aggregator.rs
// ============================================================================
// Module: Aggregator Tests
// Description: Throughput conversion, grouping, and matrix placement.
// Purpose: Validate series/matrix invariants and duplicate-key policies.
// Dependencies: mpsc-bench-core, proptest, serde_json
// ============================================================================

//! ## Overview
//! Tests the aggregator for:
//! - Unit conversion with an explicit measurement window
//! - Grouping: every record once per grouping, groups sorted
//! - Matrix dimensions fixed by distinct keys, zero-filled gaps
//! - Duplicate keys under both policies

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::float_cmp,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeSet;

use mpsc_bench_core::AggregateError;
use mpsc_bench_core::Aggregator;
use mpsc_bench_core::AggregatorConfig;
use mpsc_bench_core::ConfigurationKey;
use mpsc_bench_core::DuplicatePolicy;
use mpsc_bench_core::ThroughputRecord;
use proptest::prelude::*;
use serde_json::Map;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn record(queue_size: u64, producer_count: u32, successful_pops: u64) -> ThroughputRecord {
    ThroughputRecord {
        queue_size,
        producer_count,
        successful_pops,
        extra: Map::new(),
    }
}

fn aggregator(window: f64, policy: DuplicatePolicy) -> Aggregator {
    Aggregator::new(AggregatorConfig {
        measurement_window_secs: window,
        duplicate_policy: policy,
    })
    .unwrap()
}

// ============================================================================
// SECTION: Conversion
// ============================================================================

#[test]
fn throughput_uses_configured_window() {
    let half = aggregator(0.5, DuplicatePolicy::LastWriteWins);
    let full = aggregator(1.0, DuplicatePolicy::LastWriteWins);
    let sample = record(1024, 0, 5_000_000);
    assert_eq!(half.throughput_mops(&sample), 10.0);
    assert_eq!(full.throughput_mops(&sample), 5.0);
}

#[test]
fn invalid_windows_are_rejected() {
    for window in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let result = Aggregator::new(AggregatorConfig {
            measurement_window_secs: window,
            duplicate_policy: DuplicatePolicy::LastWriteWins,
        });
        assert!(matches!(result, Err(AggregateError::InvalidWindow(_))), "{window}");
    }
}

// ============================================================================
// SECTION: End-to-End Example
// ============================================================================

#[test]
fn two_configurations_fill_two_of_four_cells() {
    let records = vec![record(1024, 0, 5_000_000), record(2048, 4, 8_000_000)];
    let aggregation =
        aggregator(0.5, DuplicatePolicy::LastWriteWins).aggregate(&records).unwrap();

    let matrix = &aggregation.matrix;
    assert_eq!(matrix.shape(), (2, 2));
    assert_eq!(matrix.queue_sizes, vec![1024, 2048]);
    assert_eq!(matrix.producer_counts, vec![0, 4]);
    assert_eq!(matrix.cells, vec![vec![10.0, 0.0], vec![0.0, 16.0]]);
    assert_eq!(matrix.get(ConfigurationKey::new(2048, 4)), Some(16.0));
    assert_eq!(matrix.get(ConfigurationKey::new(4096, 4)), None);

    let by_queue = &aggregation.series.by_queue_size;
    assert_eq!(by_queue[&1024][0].throughput_mops, 10.0);
    assert_eq!(by_queue[&2048][0].producer_count, 4);
    let by_producer = &aggregation.series.by_producer_count;
    assert_eq!(by_producer[&4][0].queue_size, 2048);
    assert!(aggregation.duplicates.is_empty());
}

#[test]
fn reprocessing_is_bit_identical() {
    let records = vec![record(64, 1, 3), record(128, 2, 7_777_777), record(64, 2, 1)];
    let aggregator = aggregator(0.3, DuplicatePolicy::LastWriteWins);
    let first = serde_json::to_string(&aggregator.aggregate(&records).unwrap()).unwrap();
    let second = serde_json::to_string(&aggregator.aggregate(&records).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn groups_are_sorted_on_secondary_key() {
    let records = vec![record(256, 8, 8), record(128, 8, 4), record(256, 1, 2), record(128, 1, 1)];
    let aggregation =
        aggregator(1.0, DuplicatePolicy::LastWriteWins).aggregate(&records).unwrap();
    let producers: Vec<u32> = aggregation.series.by_queue_size[&256]
        .iter()
        .map(|point| point.producer_count)
        .collect();
    assert_eq!(producers, vec![1, 8]);
    let queues: Vec<u64> =
        aggregation.series.by_producer_count[&8].iter().map(|point| point.queue_size).collect();
    assert_eq!(queues, vec![128, 256]);
}

#[test]
fn empty_input_yields_empty_structures() {
    let aggregation = aggregator(0.5, DuplicatePolicy::Reject).aggregate(&[]).unwrap();
    assert!(aggregation.series.is_empty());
    assert_eq!(aggregation.matrix.shape(), (0, 0));
}

// ============================================================================
// SECTION: Duplicate Keys
// ============================================================================

#[test]
fn last_write_wins_applies_to_series_and_matrix() {
    let records = vec![record(1024, 2, 1_000_000), record(1024, 2, 3_000_000)];
    let aggregation = aggregator(1.0, DuplicatePolicy::LastWriteWins).aggregate(&records).unwrap();
    assert_eq!(aggregation.duplicates, vec![ConfigurationKey::new(1024, 2)]);
    assert_eq!(aggregation.series.len(), 1);
    assert_eq!(aggregation.series.by_queue_size[&1024][0].throughput_mops, 3.0);
    assert_eq!(aggregation.matrix.get(ConfigurationKey::new(1024, 2)), Some(3.0));
}

#[test]
fn reject_policy_fails_on_duplicate() {
    let records = vec![record(1024, 2, 1), record(2048, 2, 1), record(1024, 2, 2)];
    let result = aggregator(1.0, DuplicatePolicy::Reject).aggregate(&records);
    assert_eq!(result, Err(AggregateError::DuplicateKey(ConfigurationKey::new(1024, 2))));
}

// ============================================================================
// SECTION: Property Tests
// ============================================================================

fn distinct_records() -> impl Strategy<Value = Vec<ThroughputRecord>> {
    prop::collection::btree_map((1u64..64, 0u32..16), 0u64..10_000_000, 0..48).prop_map(|map| {
        map.into_iter()
            .map(|((queue_size, producer_count), pops)| record(queue_size, producer_count, pops))
            .collect()
    })
}

proptest! {
    #[test]
    fn every_record_appears_once_per_grouping(records in distinct_records()) {
        let aggregation = aggregator(0.5, DuplicatePolicy::Reject).aggregate(&records).unwrap();
        let series = &aggregation.series;
        prop_assert_eq!(series.len(), records.len());
        let by_producer: usize = series.by_producer_count.values().map(Vec::len).sum();
        prop_assert_eq!(by_producer, records.len());
        for (queue_size, points) in &series.by_queue_size {
            prop_assert!(points.windows(2).all(|pair| pair[0].producer_count < pair[1].producer_count));
            for point in points {
                prop_assert!(records.iter().any(|r| r.queue_size == *queue_size
                    && r.producer_count == point.producer_count));
            }
        }
        for points in series.by_producer_count.values() {
            prop_assert!(points.windows(2).all(|pair| pair[0].queue_size < pair[1].queue_size));
        }
    }

    #[test]
    fn matrix_shape_matches_distinct_keys(records in distinct_records()) {
        let aggregation = aggregator(0.5, DuplicatePolicy::Reject).aggregate(&records).unwrap();
        let queues: BTreeSet<u64> = records.iter().map(|r| r.queue_size).collect();
        let producers: BTreeSet<u32> = records.iter().map(|r| r.producer_count).collect();
        prop_assert_eq!(aggregation.matrix.shape(), (producers.len(), queues.len()));
        let populated = aggregation
            .matrix
            .cells
            .iter()
            .flatten()
            .filter(|value| **value != 0.0)
            .count();
        let nonzero = records.iter().filter(|r| r.successful_pops > 0).count();
        prop_assert_eq!(populated, nonzero);
    }
}
