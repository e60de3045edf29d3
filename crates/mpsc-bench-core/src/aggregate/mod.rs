// crates/mpsc-bench-core/src/aggregate/mod.rs
// ============================================================================
// Module: MPSC Bench Aggregation
// Description: Series grouping and heatmap matrix construction.
// Purpose: Turn merged throughput records into presentation structures.
// Dependencies: crate::core, serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! Aggregation consumes only the merged throughput records. It performs unit
//! conversion, grouping, and matrix placement, and no other statistics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::ConfigurationKey;

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod aggregator;
pub mod matrix;
pub mod series;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use aggregator::Aggregation;
pub use aggregator::Aggregator;
pub use aggregator::AggregatorConfig;
pub use aggregator::DEFAULT_MEASUREMENT_WINDOW_SECS;
pub use aggregator::DuplicatePolicy;
pub use matrix::ThroughputMatrix;
pub use series::DerivedSeries;
pub use series::ProducerPoint;
pub use series::QueuePoint;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted by the aggregator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregateError {
    /// Measurement window is not a finite, positive number of seconds.
    #[error("invalid measurement window: {0} seconds")]
    InvalidWindow(f64),
    /// Two records share a configuration key under the reject policy.
    #[error("duplicate configuration key: {0}")]
    DuplicateKey(ConfigurationKey),
}
