// crates/mpsc-bench-ingest/tests/zone_trace.rs
// ============================================================================
// Module: Zone Trace Loader Tests
// Description: Filename keys, column lookup, and numeric coercion fallback.
// Purpose: Validate that malformed cells never abort a trace file.
// Dependencies: mpsc-bench-core, mpsc-bench-ingest, tempfile
// ============================================================================

//! ## Overview
//! Zone-trace rows take their key from the file name alone, keep raw text for
//! unparseable numeric cells, and come out file by file in key order.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::float_cmp,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::fs;

use common::TRACE_HEADER;
use common::write_file;
use common::write_trace;
use mpsc_bench_core::ConfigurationKey;
use mpsc_bench_core::FieldValue;
use mpsc_bench_ingest::IngestError;
use mpsc_bench_ingest::SourceStatus;
use mpsc_bench_ingest::ZoneTraceLoader;
use tempfile::tempdir;

const LIMIT: usize = 1024 * 1024;

#[test]
fn rows_carry_filename_key_and_typed_fields() {
    let dir = tempdir().unwrap();
    write_trace(
        dir.path(),
        "tracy_q1024_p4.csv",
        &["Push,mpsc_queue.hpp,42,1500000,62.5,3000,500.0,120,9000,33.3"],
    );

    let set = ZoneTraceLoader::new(LIMIT).load(dir.path()).unwrap();

    assert_eq!(set.records.len(), 1);
    let row = &set.records[0];
    assert_eq!(row.key, ConfigurationKey::new(1024, 4));
    assert_eq!(row.name, "Push");
    assert_eq!(row.src_file, "mpsc_queue.hpp");
    assert_eq!(row.src_line, FieldValue::Integer(42));
    assert_eq!(row.counts, FieldValue::Integer(3000));
    assert_eq!(row.total_perc, FieldValue::Float(62.5));
    assert_eq!(row.min_ns, FieldValue::Float(120.0));
}

#[test]
fn unparseable_cells_keep_raw_text() {
    let dir = tempdir().unwrap();
    write_trace(dir.path(), "tracy_q64.csv", &["Pop,queue.cpp,n/a,1e3,-,12,1,1,1,nan?"]);

    let set = ZoneTraceLoader::new(LIMIT).load(dir.path()).unwrap();

    let row = &set.records[0];
    assert_eq!(row.src_line, FieldValue::Text("n/a".to_string()));
    assert_eq!(row.total_ns, FieldValue::Float(1000.0));
    assert_eq!(row.total_perc, FieldValue::Text("-".to_string()));
    assert_eq!(row.std_ns, FieldValue::Text("nan?".to_string()));
    assert!(matches!(set.sources[0].status, SourceStatus::DefaultedKey { .. }));
    assert_eq!(row.key, ConfigurationKey::new(64, 0));
}

#[test]
fn empty_cells_coerce_to_zero() {
    let dir = tempdir().unwrap();
    write_trace(dir.path(), "tracy_q64_p1.csv", &["Pop,queue.cpp,,,,,,,,"]);

    let set = ZoneTraceLoader::new(LIMIT).load(dir.path()).unwrap();

    let row = &set.records[0];
    assert_eq!(row.src_line, FieldValue::Integer(0));
    assert_eq!(row.mean_ns, FieldValue::Float(0.0));
}

#[test]
fn columns_are_found_by_header_name() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "tracy_q8_p1.csv",
        "counts,name,extra,src_file,src_line,total_ns,total_perc,mean_ns,min_ns,max_ns,std_ns\n\
         7,Push,x,q.hpp,10,70,100,10,9,11,0.5\n",
    );

    let set = ZoneTraceLoader::new(LIMIT).load(dir.path()).unwrap();

    assert_eq!(set.records[0].name, "Push");
    assert_eq!(set.records[0].counts, FieldValue::Integer(7));
}

#[test]
fn files_are_read_in_key_order_rows_in_file_order() {
    let dir = tempdir().unwrap();
    write_trace(dir.path(), "tracy_q2048_p1.csv", &["C,f,1,1,1,1,1,1,1,1"]);
    write_trace(dir.path(), "tracy_q512_p2.csv", &["A,f,1,1,1,1,1,1,1,1", "B,f,1,1,1,1,1,1,1,1"]);

    let set = ZoneTraceLoader::new(LIMIT).load(dir.path()).unwrap();

    let names: Vec<&str> = set.records.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn absent_columns_read_as_empty_cells() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "tracy_q8_p1.csv",
        "name,src_file,src_line,total_ns,total_perc,counts,mean_ns,min_ns,max_ns
         Push,q.hpp,10,70,100,7,10,9,11
         Pop,q.hpp,20,30,0,3,10,9,11
",
    );

    let set = ZoneTraceLoader::new(LIMIT).load(dir.path()).unwrap();

    assert_eq!(set.records.len(), 2);
    assert!(!set.sources[0].status.is_skipped());
    assert_eq!(set.records[1].name, "Pop");
    assert_eq!(set.records[0].std_ns, FieldValue::Float(0.0));
    assert_eq!(set.records[1].src_line, FieldValue::Integer(20));
}

#[test]
fn header_with_only_text_columns_keeps_rows() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "tracy_q8_p1.csv", "name
Push
");

    let set = ZoneTraceLoader::new(LIMIT).load(dir.path()).unwrap();

    assert_eq!(set.records[0].name, "Push");
    assert_eq!(set.records[0].src_file, "");
    assert_eq!(set.records[0].counts, FieldValue::Integer(0));
}

#[test]
fn invalid_utf8_cell_does_not_drop_the_file() {
    let dir = tempdir().unwrap();
    let mut bytes = format!("{TRACE_HEADER}
Push,q.hpp,1,1,1,1,1,1,1,1
").into_bytes();
    bytes.extend_from_slice(b"Pop,q\xff.hpp,2,2,2,2,2,2,2,2\n");
    fs::write(dir.path().join("tracy_q8_p1.csv"), bytes).unwrap();

    let set = ZoneTraceLoader::new(LIMIT).load(dir.path()).unwrap();

    let names: Vec<&str> = set.records.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Push", "Pop"]);
    assert!(set.records[1].src_file.starts_with('q'));
    assert_eq!(set.records[1].src_line, FieldValue::Integer(2));
}

#[test]
fn missing_directory_is_not_found() {
    let dir = tempdir().unwrap();
    let err = ZoneTraceLoader::new(LIMIT).load(&dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, IngestError::NotFound(_)));
}
