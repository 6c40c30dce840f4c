use crate::issue::Severity;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire schema of the scanner's report file.
///
/// This is a *consumed* format: permissive on extras, strict on the parts the
/// engine needs. Keys of `issue_detail` are file paths relative to the scan
/// root; values are the issues found in that file, in scanner order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawReport {
    #[serde(default)]
    pub issue_detail: BTreeMap<String, Vec<RawIssue>>,
}

/// One issue object inside `issue_detail`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawIssue {
    pub severity: Severity,
    pub msg: String,
    /// 1-based; -1 when the scanner could not place the issue.
    #[serde(default = "default_line")]
    pub line: i64,
    /// 1-based; meaningless when `line` is unresolved.
    #[serde(default = "default_column")]
    pub column: i64,
}

fn default_line() -> i64 {
    crate::issue::UNPLACED_LINE
}

fn default_column() -> i64 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_the_documented_shape() {
        let text = r#"{
            "issue_detail": {
                "a/b.py": [
                    {"severity": "error", "msg": "x", "line": 3, "column": 1}
                ]
            },
            "some_other_field": 7
        }"#;
        let report: RawReport = serde_json::from_str(text).expect("decode");
        let issues = report.issue_detail.get("a/b.py").expect("key");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].msg, "x");
        assert_eq!(issues[0].line, 3);
        assert_eq!(issues[0].column, 1);
    }

    #[test]
    fn missing_line_defaults_to_unplaced() {
        let text = r#"{"issue_detail": {"k": [{"severity": "info", "msg": "m"}]}}"#;
        let report: RawReport = serde_json::from_str(text).expect("decode");
        assert_eq!(report.issue_detail["k"][0].line, crate::issue::UNPLACED_LINE);
        assert_eq!(report.issue_detail["k"][0].column, 1);
    }
}
