use crate::issue::SeverityCounts;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Summary envelope for one aggregation run.
///
/// Emitted alongside the tree so CI consumers get stable metadata without
/// re-walking the result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScanSummary {
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub duration_ms: u64,

    /// Rolled-up counts of the whole tree, unattached bucket included.
    pub counts: SeverityCounts,
    /// Files under the root that the report had issues for.
    pub matched_files: u64,
    /// Issues whose report key matched nothing on disk.
    pub unattached_issues: u64,
    /// Exit code of the external scanner, when one was launched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanner_exit_code: Option<i32>,
}
