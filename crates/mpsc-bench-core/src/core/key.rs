// crates/mpsc-bench-core/src/core/key.rs
// ============================================================================
// Module: Configuration Keys
// Description: Experiment coordinates and the filename key codec.
// Purpose: Recover `(queue_size, producer_count)` from artifact file names.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every benchmark artifact family follows a fixed naming convention: a
//! mandatory `q<digits>` token and an optional `_p<digits>` token between a
//! family prefix and a family extension. [`KeyCodec`] decodes those names into
//! a [`ConfigurationKey`] and reports how the key was obtained.
//!
//! Conventions callers must rely on:
//! - When the `_p<digits>` token is absent, `producer_count = 0`. This is a
//!   naming convention, not a measurement.
//! - When the mandatory `q<digits>` token is absent or unparsable, the key is
//!   `{0, 0}` and the outcome is [`DecodedKey::Malformed`]. Decoding never fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Configuration Key
// ============================================================================

/// Identifies one benchmark configuration.
///
/// Ordering is lexicographic on `(queue_size, producer_count)`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationKey {
    /// Queue size reported by the harness.
    pub queue_size: u64,
    /// Number of concurrent producers.
    pub producer_count: u32,
}

impl ConfigurationKey {
    /// Creates a configuration key.
    #[must_use]
    pub const fn new(queue_size: u64, producer_count: u32) -> Self {
        Self {
            queue_size,
            producer_count,
        }
    }
}

impl fmt::Display for ConfigurationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}_p{}", self.queue_size, self.producer_count)
    }
}

// ============================================================================
// SECTION: Artifact Families
// ============================================================================

/// Artifact families produced by the benchmark harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactFamily {
    /// `benchmark_results_q<N>[_p<P>].json`
    Throughput,
    /// `tracy_q<N>[_p<P>].csv`
    ZoneTrace,
    /// `perf_q<N>_p<P>.txt`
    Counter,
}

impl ArtifactFamily {
    /// File name prefix, up to and including the `q` token marker.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Throughput => "benchmark_results_q",
            Self::ZoneTrace => "tracy_q",
            Self::Counter => "perf_q",
        }
    }

    /// File name extension, including the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Throughput => ".json",
            Self::ZoneTrace => ".csv",
            Self::Counter => ".txt",
        }
    }

    /// Returns true when the `_p<digits>` token is mandatory for this family.
    #[must_use]
    pub const fn requires_producer(self) -> bool {
        matches!(self, Self::Counter)
    }

    /// Stable label used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Throughput => "throughput",
            Self::ZoneTrace => "zone_trace",
            Self::Counter => "counter",
        }
    }

    /// Returns true when `file_name` belongs to this family's glob
    /// (`<prefix>*<extension>`), regardless of whether the key decodes.
    #[must_use]
    pub fn matches_name(self, file_name: &str) -> bool {
        file_name.len() >= self.prefix().len() + self.extension().len()
            && file_name.starts_with(self.prefix())
            && file_name.ends_with(self.extension())
    }
}

impl fmt::Display for ArtifactFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Decode Outcome
// ============================================================================

/// Result of decoding a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedKey {
    /// Both tokens were present.
    Exact(ConfigurationKey),
    /// The optional producer token was absent; `producer_count` is 0.
    ProducerDefaulted(ConfigurationKey),
    /// The name did not follow the family pattern; the key is `{0, 0}`.
    Malformed,
}

impl DecodedKey {
    /// Returns the decoded key, `{0, 0}` for malformed names.
    #[must_use]
    pub const fn key(&self) -> ConfigurationKey {
        match self {
            Self::Exact(key) | Self::ProducerDefaulted(key) => *key,
            Self::Malformed => ConfigurationKey::new(0, 0),
        }
    }

    /// Returns true when both tokens were present in the name.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

// ============================================================================
// SECTION: Key Codec
// ============================================================================

/// Filename key codec for all artifact families.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyCodec;

impl KeyCodec {
    /// Decodes a bare file name for the given family.
    #[must_use]
    pub fn decode(family: ArtifactFamily, file_name: &str) -> DecodedKey {
        let Some(body) = file_name
            .strip_prefix(family.prefix())
            .and_then(|rest| rest.strip_suffix(family.extension()))
        else {
            return DecodedKey::Malformed;
        };
        let (queue_token, producer_token) = match body.split_once("_p") {
            Some((queue, producer)) => (queue, Some(producer)),
            None => (body, None),
        };
        let Some(queue_size) = parse_digits::<u64>(queue_token) else {
            return DecodedKey::Malformed;
        };
        match producer_token {
            Some(token) => parse_digits::<u32>(token).map_or(DecodedKey::Malformed, |producers| {
                DecodedKey::Exact(ConfigurationKey::new(queue_size, producers))
            }),
            None if family.requires_producer() => DecodedKey::Malformed,
            None => DecodedKey::ProducerDefaulted(ConfigurationKey::new(queue_size, 0)),
        }
    }

    /// Decodes the file name component of `path`.
    ///
    /// Paths without a UTF-8 file name decode as [`DecodedKey::Malformed`].
    #[must_use]
    pub fn decode_path(family: ArtifactFamily, path: &Path) -> DecodedKey {
        path.file_name()
            .and_then(|name| name.to_str())
            .map_or(DecodedKey::Malformed, |name| Self::decode(family, name))
    }

    /// Encodes a key into the family's canonical file name (always with both tokens).
    #[must_use]
    pub fn encode(family: ArtifactFamily, key: ConfigurationKey) -> String {
        format!(
            "{}{}_p{}{}",
            family.prefix(),
            key.queue_size,
            key.producer_count,
            family.extension()
        )
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a non-empty run of ASCII digits.
fn parse_digits<T: std::str::FromStr>(token: &str) -> Option<T> {
    if token.is_empty() || !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
