// crates/mpsc-bench-core/src/core/value.rs
// ============================================================================
// Module: Field Values
// Description: Tagged numeric values with raw-text fallback.
// Purpose: Preserve unparsable export cells without losing type information.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Tabular exports occasionally contain cells that do not parse as their
//! declared type. [`FieldValue`] keeps the parsed value when coercion succeeds
//! and the raw text otherwise, so consumers pattern-match instead of guessing.
//! Empty cells coerce to zero of the declared type.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Field Value
// ============================================================================

/// A coerced field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integer-typed field that parsed cleanly.
    Integer(i64),
    /// Float-typed field that parsed cleanly.
    Float(f64),
    /// Raw text retained after a failed coercion (or a text-typed field).
    Text(String),
}

impl FieldValue {
    /// Coerces `raw` to an integer, falling back to the raw text.
    #[must_use]
    pub fn coerce_integer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Integer(0);
        }
        trimmed.parse::<i64>().map_or_else(|_| Self::Text(raw.to_string()), Self::Integer)
    }

    /// Coerces `raw` to a float, falling back to the raw text.
    #[must_use]
    pub fn coerce_float(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Float(0.0);
        }
        trimmed.parse::<f64>().map_or_else(|_| Self::Text(raw.to_string()), Self::Float)
    }

    /// Returns the value as `f64` when it is numeric.
    #[must_use]
    #[allow(clippy::cast_precision_loss, reason = "Chart axes tolerate precision loss.")]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// Returns the value as `i64` when it is an integer.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Float(_) | Self::Text(_) => None,
        }
    }

    /// Returns true when coercion fell back to raw text.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}
