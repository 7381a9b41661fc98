//! Filesystem helpers for tests that write inputs or rendered figures.

use std::path::{Path, PathBuf};

use ppath_common::PathRecord;
use tempfile::TempDir;

/// Fresh temporary directory, removed when dropped.
pub fn output_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temporary directory")
}

/// Serialize `record` as JSON into `dir/name` and return the file path.
pub fn write_record(dir: &Path, name: &str, record: &PathRecord) -> PathBuf {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(record).expect("record serializes");
    std::fs::write(&path, json).expect("failed to write record");
    path
}
