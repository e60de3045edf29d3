// crates/mpsc-bench-ingest/src/source.rs
// ============================================================================
// Module: Artifact Sources
// Description: Family-scoped directory discovery, bounded reads, and source reports.
// Purpose: Give every loader the same deterministic file order and size policy.
// Dependencies: mpsc-bench-core, serde
// ============================================================================

//! ## Overview
//! Discovery lists the files of one artifact family in a directory and sorts
//! them by decoded key, breaking ties by file name, so merge order is
//! reproducible across runs. Every file a loader touches produces a
//! [`SourceReport`] recording whether its key resolved cleanly, fell back to a
//! default, or whether the file was skipped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use mpsc_bench_core::ArtifactFamily;
use mpsc_bench_core::ConfigurationKey;
use mpsc_bench_core::DecodedKey;
use mpsc_bench_core::KeyCodec;
use serde::Deserialize;
use serde::Serialize;

use crate::error::IngestError;

// ============================================================================
// SECTION: Source Reports
// ============================================================================

/// How a source's configuration key was obtained, or why it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    /// Key recovered without fallback.
    Resolved {
        /// Recovered key.
        key: ConfigurationKey,
    },
    /// Key fell back to a default or to the filename-derived key.
    DefaultedKey {
        /// Key in effect.
        key: ConfigurationKey,
        /// Why the fallback applied.
        reason: String,
    },
    /// Source contributed nothing.
    Skipped {
        /// Why the source was skipped.
        reason: String,
    },
}

impl SourceStatus {
    /// Returns the key in effect, if the source was not skipped.
    #[must_use]
    pub const fn key(&self) -> Option<ConfigurationKey> {
        match self {
            Self::Resolved {
                key,
            }
            | Self::DefaultedKey {
                key, ..
            } => Some(*key),
            Self::Skipped {
                ..
            } => None,
        }
    }

    /// Returns true when the source was skipped.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Outcome for one ingested source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    /// Source path.
    pub path: PathBuf,
    /// Artifact family of the source.
    pub family: ArtifactFamily,
    /// Key resolution outcome.
    #[serde(flatten)]
    pub status: SourceStatus,
    /// Number of records the source contributed.
    pub records: usize,
}

impl SourceReport {
    /// Creates a report for a skipped source.
    pub(crate) fn skipped(
        path: PathBuf,
        family: ArtifactFamily,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            path,
            family,
            status: SourceStatus::Skipped {
                reason: reason.into(),
            },
            records: 0,
        }
    }
}

/// Maps a filename decode outcome onto a source status.
pub(crate) fn status_from_name(family: ArtifactFamily, decoded: DecodedKey) -> SourceStatus {
    match decoded {
        DecodedKey::Exact(key) => SourceStatus::Resolved {
            key,
        },
        DecodedKey::ProducerDefaulted(key) => SourceStatus::DefaultedKey {
            key,
            reason: "producer token absent; producer_count defaults to 0".to_string(),
        },
        DecodedKey::Malformed => SourceStatus::DefaultedKey {
            key: decoded.key(),
            reason: format!("file name does not match the {family} pattern"),
        },
    }
}

// ============================================================================
// SECTION: Discovery
// ============================================================================

/// A family member found in a directory.
#[derive(Debug, Clone)]
pub(crate) struct DiscoveredFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// Key decoded from the file name.
    pub decoded: DecodedKey,
}

/// Lists the files of `family` in `dir`, sorted by `(key, file name)`.
///
/// A missing `dir` yields [`IngestError::NotFound`].
pub(crate) fn discover(dir: &Path, family: ArtifactFamily) -> Result<Vec<DiscoveredFile>, IngestError> {
    let entries = fs::read_dir(dir).map_err(|err| open_error(dir, &err))?;
    let mut files: Vec<(ConfigurationKey, String, DiscoveredFile)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| io_error(dir, &err))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()).map(str::to_string)
        else {
            continue;
        };
        if !family.matches_name(&name) {
            continue;
        }
        let decoded = KeyCodec::decode(family, &name);
        files.push((
            decoded.key(),
            name,
            DiscoveredFile {
                path,
                decoded,
            },
        ));
    }
    files.sort_by(|left, right| (left.0, &left.1).cmp(&(right.0, &right.1)));
    Ok(files.into_iter().map(|(_, _, file)| file).collect())
}

// ============================================================================
// SECTION: Bounded Reads
// ============================================================================

/// Reads a file while enforcing a maximum byte limit.
pub(crate) fn read_file_limited(path: &Path, max_bytes: usize) -> Result<Vec<u8>, IngestError> {
    let file = File::open(path).map_err(|err| open_error(path, &err))?;
    let limit = u64::try_from(max_bytes.saturating_add(1)).map_err(|_| IngestError::Io {
        path: path.to_path_buf(),
        reason: "size limit exceeds u64".to_string(),
    })?;
    let mut buf = Vec::new();
    file.take(limit).read_to_end(&mut buf).map_err(|err| io_error(path, &err))?;
    if buf.len() > max_bytes {
        return Err(IngestError::TooLarge {
            path: path.to_path_buf(),
            max_bytes,
            actual_bytes: buf.len(),
        });
    }
    Ok(buf)
}

/// Maps a failure to open `path`, keeping "not found" distinct.
fn open_error(path: &Path, err: &std::io::Error) -> IngestError {
    if err.kind() == ErrorKind::NotFound {
        IngestError::NotFound(path.to_path_buf())
    } else {
        io_error(path, err)
    }
}

/// Builds an [`IngestError::Io`] for `path`.
fn io_error(path: &Path, err: &std::io::Error) -> IngestError {
    IngestError::Io {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
