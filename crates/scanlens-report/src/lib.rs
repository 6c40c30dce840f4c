//! Decoding of the scanner's output files.
//!
//! Two inputs exist: the issue report (consumed by the tree builder) and
//! `scan_status.json` (consumed by the quality gate). Decode failures are
//! typed and fatal to the current scan; the engine never aggregates a
//! partially decoded report.

#![forbid(unsafe_code)]

mod scan_report;
mod status;

pub use scan_report::{decode_report, read_report, ScanReport};
pub use status::{decode_status, read_status};

/// Why a scanner output file could not be turned into a usable value.
#[derive(Debug, thiserror::Error)]
pub enum ReportDecodeError {
    #[error("read {path}: {source}")]
    Read {
        path: camino::Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed report: {0}")]
    Malformed(#[from] serde_json::Error),
}
