// crates/mpsc-bench-core/src/core/mod.rs
// ============================================================================
// Module: MPSC Bench Core Types
// Description: Configuration keys, parsed records, and counter catalog.
// Purpose: Provide stable, serializable types shared by every loader.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types describe one benchmark configuration and the samples recovered
//! for it from each artifact family. They carry no I/O.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod counters;
pub mod key;
pub mod records;
pub mod value;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use counters::CounterCatalog;
pub use counters::DEFAULT_COUNTERS;
pub use counters::base_event_name;
pub use key::ArtifactFamily;
pub use key::ConfigurationKey;
pub use key::DecodedKey;
pub use key::KeyCodec;
pub use records::CounterRecord;
pub use records::EnvironmentDescriptor;
pub use records::ResultPayload;
pub use records::ThroughputDocument;
pub use records::ThroughputRecord;
pub use records::ZoneTraceRecord;
pub use value::FieldValue;
