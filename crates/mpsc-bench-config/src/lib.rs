// crates/mpsc-bench-config/src/lib.rs
// ============================================================================
// Module: MPSC Bench Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for mpsc-bench.toml semantics.
// Dependencies: mpsc-bench-core, serde, toml
// ============================================================================

//! ## Overview
//! `mpsc-bench-config` defines the configuration model for ingestion runs:
//! the harness measurement window, the recognized hardware counters, and
//! loader limits. Harness parameters are explicit values handed to the
//! aggregator and loaders, so runs with different parameters can coexist.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
