// crates/mpsc-bench-ingest/src/zone_trace.rs
// ============================================================================
// Module: Zone Trace Loader
// Description: Reads per-configuration zone-timing CSV exports.
// Purpose: Emit key-annotated zone summaries with tolerant numeric coercion.
// Dependencies: csv, mpsc-bench-core, tracing
// ============================================================================

//! ## Overview
//! Each `tracy_q<N>[_p<P>].csv` file contributes one [`ZoneTraceRecord`] per
//! row, annotated with the key decoded from its file name. Columns are found
//! by header name, so extra or reordered columns are tolerated and absent ones
//! read as empty cells. Cells are decoded as lossy UTF-8. Numeric cells that
//! do not parse are kept as raw text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Cow;
use std::path::Path;

use csv::ReaderBuilder;
use csv::ByteRecord;
use mpsc_bench_core::ArtifactFamily;
use mpsc_bench_core::ConfigurationKey;
use mpsc_bench_core::FieldValue;
use mpsc_bench_core::ZoneTraceRecord;
use tracing::info;
use tracing::warn;

use crate::error::IngestError;
use crate::source::SourceReport;
use crate::source::discover;
use crate::source::read_file_limited;
use crate::source::status_from_name;

// ============================================================================
// SECTION: Columns
// ============================================================================

/// Header names consumed from a zone-trace export, in [`ColumnMap`] order.
pub const ZONE_TRACE_COLUMNS: [&str; 10] = [
    "name",
    "src_file",
    "src_line",
    "total_ns",
    "total_perc",
    "counts",
    "mean_ns",
    "min_ns",
    "max_ns",
    "std_ns",
];

/// Positions of the consumed columns within one file's header row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    /// Indexes aligned with [`ZONE_TRACE_COLUMNS`]; `None` when absent.
    indexes: [Option<usize>; ZONE_TRACE_COLUMNS.len()],
}

impl ColumnMap {
    /// Locates the consumed columns in `headers`.
    fn from_headers(headers: &ByteRecord) -> Self {
        let mut indexes = [None; ZONE_TRACE_COLUMNS.len()];
        for (slot, column) in indexes.iter_mut().zip(ZONE_TRACE_COLUMNS) {
            *slot = headers
                .iter()
                .position(|header| String::from_utf8_lossy(header).trim() == column);
        }
        Self {
            indexes,
        }
    }

    /// Returns the names of consumed columns the header lacks.
    fn missing(&self) -> Vec<&'static str> {
        self.indexes
            .iter()
            .zip(ZONE_TRACE_COLUMNS)
            .filter(|(index, _)| index.is_none())
            .map(|(_, column)| column)
            .collect()
    }

    /// Returns the cell for column `column` of `row`, or an empty cell.
    fn cell<'a>(&self, row: &'a ByteRecord, column: usize) -> Cow<'a, str> {
        self.indexes
            .get(column)
            .copied()
            .flatten()
            .and_then(|index| row.get(index))
            .map_or(Cow::Borrowed(""), String::from_utf8_lossy)
    }

    /// Builds a record from one data row.
    fn record(&self, key: ConfigurationKey, row: &ByteRecord) -> ZoneTraceRecord {
        ZoneTraceRecord {
            key,
            name: self.cell(row, 0).trim().to_string(),
            src_file: self.cell(row, 1).trim().to_string(),
            src_line: FieldValue::coerce_integer(&self.cell(row, 2)),
            total_ns: FieldValue::coerce_float(&self.cell(row, 3)),
            total_perc: FieldValue::coerce_float(&self.cell(row, 4)),
            counts: FieldValue::coerce_integer(&self.cell(row, 5)),
            mean_ns: FieldValue::coerce_float(&self.cell(row, 6)),
            min_ns: FieldValue::coerce_float(&self.cell(row, 7)),
            max_ns: FieldValue::coerce_float(&self.cell(row, 8)),
            std_ns: FieldValue::coerce_float(&self.cell(row, 9)),
        }
    }
}

// ============================================================================
// SECTION: Loader
// ============================================================================

/// Zone-trace rows gathered from a directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneTraceSet {
    /// Rows in sorted-file order, then file order.
    pub records: Vec<ZoneTraceRecord>,
    /// One report per trace file.
    pub sources: Vec<SourceReport>,
}

/// Loads zone-trace exports.
#[derive(Debug, Clone, Copy)]
pub struct ZoneTraceLoader {
    /// Maximum export size, in bytes.
    max_file_bytes: usize,
}

impl ZoneTraceLoader {
    /// Creates a loader with the given per-file size limit.
    #[must_use]
    pub const fn new(max_file_bytes: usize) -> Self {
        Self {
            max_file_bytes,
        }
    }

    /// Loads every zone-trace export in `dir`.
    ///
    /// A file that cannot be read, or whose header cannot be parsed, is
    /// skipped as a whole. Absent columns yield empty cells.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] when `dir` is absent or cannot be listed.
    pub fn load(&self, dir: &Path) -> Result<ZoneTraceSet, IngestError> {
        let family = ArtifactFamily::ZoneTrace;
        let mut set = ZoneTraceSet::default();
        for file in discover(dir, family)? {
            match self.read_rows(&file.path, file.decoded.key()) {
                Ok(rows) => {
                    info!(path = %file.path.display(), rows = rows.len(), "loaded zone trace");
                    set.sources.push(SourceReport {
                        path: file.path,
                        family,
                        status: status_from_name(family, file.decoded),
                        records: rows.len(),
                    });
                    set.records.extend(rows);
                }
                Err(err) => {
                    warn!(path = %file.path.display(), error = %err, "skipping zone trace");
                    set.sources.push(SourceReport::skipped(file.path, family, err.to_string()));
                }
            }
        }
        Ok(set)
    }

    /// Parses all rows of one export.
    ///
    /// Only an unreadable header fails the file; a bad row is skipped alone.
    fn read_rows(
        &self,
        path: &Path,
        key: ConfigurationKey,
    ) -> Result<Vec<ZoneTraceRecord>, IngestError> {
        let bytes = read_file_limited(path, self.max_file_bytes)?;
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(bytes.as_slice());
        let headers = reader
            .byte_headers()
            .map_err(|err| IngestError::Malformed {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?
            .clone();
        let columns = ColumnMap::from_headers(&headers);
        let missing = columns.missing();
        if !missing.is_empty() {
            warn!(path = %path.display(), columns = %missing.join(","), "zone trace lacks columns; cells default to empty");
        }
        let mut rows = Vec::new();
        for row in reader.byte_records() {
            match row {
                Ok(row) => rows.push(columns.record(key, &row)),
                Err(err) => warn!(path = %path.display(), error = %err, "skipping zone trace row"),
            }
        }
        Ok(rows)
    }
}
