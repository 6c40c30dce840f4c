use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Wire schema of the scanner's `scan_status.json`.
///
/// Only the fields the quality gate reads are modeled; the real file carries
/// considerably more. The nesting mirrors the scanner's output:
/// `scan_report.lintscan.total.state_detail.active` is the count of issues
/// still active after the scan.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScanStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub scan_report: StatusReport,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatusReport {
    #[serde(default)]
    pub lintscan: LintScan,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LintScan {
    #[serde(default)]
    pub total: LintScanTotal,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LintScanTotal {
    #[serde(default)]
    pub state_detail: StateDetail,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StateDetail {
    #[serde(default)]
    pub active: u64,
}

impl ScanStatus {
    /// Active issue count used by the quality gate.
    pub fn active_issues(&self) -> u64 {
        self.scan_report.lintscan.total.state_detail.active
    }
}

/// Outcome of the quality gate: pass when the active issue count stays
/// within the configured threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GateVerdict {
    pub pass: bool,
    pub active: u64,
    pub threshold: u64,
}

impl GateVerdict {
    pub fn evaluate(status: &ScanStatus, threshold: u64) -> Self {
        let active = status.active_issues();
        GateVerdict {
            pass: active <= threshold,
            active,
            threshold,
        }
    }
}
