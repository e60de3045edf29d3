// crates/mpsc-bench-core/src/aggregate/aggregator.rs
// ============================================================================
// Module: Throughput Aggregator
// Description: Unit conversion, grouping, and matrix placement.
// Purpose: Derive presentation-ready structures from merged throughput records.
// Dependencies: serde, tracing
// ============================================================================

//! ## Overview
//! Throughput is `successful_pops / measurement_window_secs / 1e6` (MOps/sec).
//! The measurement window is an explicit configuration value because
//! historical artifacts were produced with different windows.
//!
//! Duplicate configuration keys are resolved by [`DuplicatePolicy`] and the
//! same resolution applies to the series and to the matrix.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::aggregate::AggregateError;
use crate::aggregate::matrix::ThroughputMatrix;
use crate::aggregate::series::DerivedSeries;
use crate::core::ConfigurationKey;
use crate::core::ThroughputRecord;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default harness measurement window, in seconds.
pub const DEFAULT_MEASUREMENT_WINDOW_SECS: f64 = 0.5;
/// Operations per million operations.
const OPS_PER_MILLION: f64 = 1e6;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Policy applied when two records share a configuration key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later record in merge order replaces the earlier one everywhere.
    #[default]
    LastWriteWins,
    /// Aggregation fails on the first duplicate key.
    Reject,
}

/// Aggregator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Harness measurement window, in seconds.
    pub measurement_window_secs: f64,
    /// Duplicate-key resolution.
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            measurement_window_secs: DEFAULT_MEASUREMENT_WINDOW_SECS,
            duplicate_policy: DuplicatePolicy::LastWriteWins,
        }
    }
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Aggregator output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    /// Grouped, sorted series.
    pub series: DerivedSeries,
    /// Dense heatmap matrix.
    pub matrix: ThroughputMatrix,
    /// Keys whose earlier records were replaced, in replacement order.
    pub duplicates: Vec<ConfigurationKey>,
}

// ============================================================================
// SECTION: Aggregator
// ============================================================================

/// Derives series and matrix from merged throughput records.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    /// Validated configuration.
    config: AggregatorConfig,
}

impl Aggregator {
    /// Creates an aggregator after validating the measurement window.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::InvalidWindow`] when the window is not a
    /// finite, positive number of seconds.
    pub fn new(config: AggregatorConfig) -> Result<Self, AggregateError> {
        let window = config.measurement_window_secs;
        if !window.is_finite() || window <= 0.0 {
            return Err(AggregateError::InvalidWindow(window));
        }
        Ok(Self {
            config,
        })
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Converts a record's successful pops into MOps/sec.
    #[must_use]
    #[allow(clippy::cast_precision_loss, reason = "Pop counts stay far below 2^53.")]
    pub fn throughput_mops(&self, record: &ThroughputRecord) -> f64 {
        record.successful_pops as f64 / self.config.measurement_window_secs / OPS_PER_MILLION
    }

    /// Groups records into series and places them into the matrix.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::DuplicateKey`] when the policy is
    /// [`DuplicatePolicy::Reject`] and two records share a key.
    pub fn aggregate(&self, records: &[ThroughputRecord]) -> Result<Aggregation, AggregateError> {
        let mut latest: BTreeMap<ConfigurationKey, usize> = BTreeMap::new();
        let mut duplicates = Vec::new();
        let mut queue_sizes = BTreeSet::new();
        let mut producer_counts = BTreeSet::new();
        for (index, record) in records.iter().enumerate() {
            let key = record.key();
            queue_sizes.insert(key.queue_size);
            producer_counts.insert(key.producer_count);
            if latest.insert(key, index).is_some() {
                if self.config.duplicate_policy == DuplicatePolicy::Reject {
                    return Err(AggregateError::DuplicateKey(key));
                }
                warn!(
                    queue_size = key.queue_size,
                    producer_count = key.producer_count,
                    "duplicate configuration key; later record replaces earlier"
                );
                duplicates.push(key);
            }
        }

        let mut survivors: Vec<usize> = latest.into_values().collect();
        survivors.sort_unstable();

        let mut series = DerivedSeries::default();
        let mut matrix = ThroughputMatrix::zeroed(&queue_sizes, &producer_counts);
        for record in survivors.into_iter().filter_map(|index| records.get(index)) {
            let throughput = self.throughput_mops(record);
            series.push(record.queue_size, record.producer_count, throughput);
            if !matrix.place(record.key(), throughput) {
                debug!(key = %record.key(), "record key missing from matrix axes");
            }
        }
        series.sort();

        Ok(Aggregation {
            series,
            matrix,
            duplicates,
        })
    }
}
