// crates/mpsc-bench-core/src/lib.rs
// ============================================================================
// Module: MPSC Bench Core Library
// Description: Public API surface for the benchmark data model and aggregation.
// Purpose: Expose keys, records, counter catalog, and the aggregator.
// Dependencies: crate::{core, aggregate}
// ============================================================================

//! ## Overview
//! MPSC bench core defines the configuration key that ties every benchmark
//! artifact together, the records parsed from each artifact family, and the
//! aggregator that turns merged throughput records into sorted series and a
//! dense matrix. It performs no I/O.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod aggregate;
pub mod core;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use aggregate::AggregateError;
pub use aggregate::Aggregation;
pub use aggregate::Aggregator;
pub use aggregate::AggregatorConfig;
pub use aggregate::DEFAULT_MEASUREMENT_WINDOW_SECS;
pub use aggregate::DerivedSeries;
pub use aggregate::DuplicatePolicy;
pub use aggregate::ProducerPoint;
pub use aggregate::QueuePoint;
pub use aggregate::ThroughputMatrix;
