//! Stable DTOs shared across the scanlens workspace.
//!
//! This crate is intentionally boring:
//! - the severity scale and per-node severity counters
//! - the canonical issue record produced by report decoding
//! - serde schemas for the external scanner's report and status files
//! - forward-slash-normalized relative path handling
//! - the scan summary envelope

#![forbid(unsafe_code)]

pub mod issue;
pub mod path;
pub mod report;
pub mod status;
pub mod summary;

pub use issue::{IssueRecord, Severity, SeverityCounts, UNPLACED_LINE};
pub use path::ScanPath;
pub use report::{RawIssue, RawReport};
pub use status::{GateVerdict, ScanStatus};
pub use summary::{ScanSummary, ToolMeta};
