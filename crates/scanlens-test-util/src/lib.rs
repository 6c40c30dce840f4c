//! Shared test fixtures for the scanlens workspace.
//!
//! Integration tests in several crates need the same three things: a real
//! temporary source tree, a scanner-shaped report file, and a scanner-shaped
//! status file. Building them here keeps the fixtures consistent with the
//! wire formats the engine consumes.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{json, Map, Value};
use tempfile::TempDir;

/// UTF-8 view of a temp dir root.
pub fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 temp path")
}

/// Write `contents` at `path`, creating parent directories.
pub fn write_file(path: &Utf8Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, contents).expect("write file");
}

/// One issue object in the scanner's report shape.
pub fn issue(severity: &str, msg: &str, line: i64, column: i64) -> Value {
    json!({ "severity": severity, "msg": msg, "line": line, "column": column })
}

/// A full report document: relative key -> issues.
pub fn report(entries: Vec<(&str, Vec<Value>)>) -> String {
    let mut detail = Map::new();
    for (key, issues) in entries {
        detail.insert(key.to_string(), Value::Array(issues));
    }
    json!({ "issue_detail": detail }).to_string()
}

/// A `scan_status.json` document with the given active issue count.
pub fn status(status: &str, active: u64) -> String {
    json!({
        "status": status,
        "scan_report": {
            "lintscan": { "total": { "state_detail": { "active": active } } }
        }
    })
    .to_string()
}
