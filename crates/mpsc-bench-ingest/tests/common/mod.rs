// crates/mpsc-bench-ingest/tests/common/mod.rs
// ============================================================================
// Module: Ingest Test Fixtures
// Description: Writers for throughput, zone-trace, and counter artifacts.
// Purpose: Build realistic results directories inside temp dirs.
// ============================================================================

#![allow(
    dead_code,
    clippy::expect_used,
    reason = "Each test binary uses a different subset of fixtures."
)]

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Value;
use serde_json::json;

/// Zone-trace header row as the profiler exports it.
pub const TRACE_HEADER: &str =
    "name,src_file,src_line,total_ns,total_perc,counts,mean_ns,min_ns,max_ns,std_ns";

/// Builds one harness record with a pass-through field.
pub fn record(queue_size: u64, producer_count: u32, successful_pops: u64) -> Value {
    json!({
        "queueSize": queue_size,
        "producerCount": producer_count,
        "successfulPops": successful_pops,
        "failedPushes": 0,
    })
}

/// Writes `content` to `dir/name`.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

/// Writes a throughput document with optional `cpuInfo`.
pub fn write_throughput(dir: &Path, name: &str, results: Value, cpu_info: Option<Value>) -> PathBuf {
    let mut document = json!({ "benchmarkResults": results });
    if let (Some(info), Some(object)) = (cpu_info, document.as_object_mut()) {
        object.insert("cpuInfo".to_string(), info);
    }
    let text = serde_json::to_string_pretty(&document).expect("serialize fixture");
    write_file(dir, name, &text)
}

/// Writes a zone-trace export with the standard header.
pub fn write_trace(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let mut text = String::from(TRACE_HEADER);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    write_file(dir, name, &text)
}

/// Writes a perf-stat dump in the tool's usual layout.
pub fn write_counters(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let mut text = String::from("\n Performance counter stats for './mpsc_bench':\n\n");
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text.push_str("\n       0.512345678 seconds time elapsed\n");
    write_file(dir, name, &text)
}
