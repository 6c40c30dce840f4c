use camino::Utf8PathBuf;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel line number for an issue that cannot be attributed to a line.
///
/// Issues carrying this value count toward severity totals but are never
/// registered as line annotations. Their `column` is undefined.
pub const UNPLACED_LINE: i64 = -1;

/// Severity scale used by the external scanner.
///
/// The derived `Ord` is the scale's total order: `Info < Warning < Error < Fatal`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub fn name(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One finding reported by the external scanner.
///
/// Created by report decoding with the report's relative path; `file_path`
/// and `line` are rewritten exactly once when the owning file is located
/// during the tree walk (unmatched issues are forced to [`UNPLACED_LINE`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IssueRecord {
    #[schemars(with = "String")]
    pub file_path: Utf8PathBuf,
    /// 1-based, or [`UNPLACED_LINE`].
    pub line: i64,
    /// 1-based. Undefined when `line` is unresolved.
    pub column: i64,
    pub severity: Severity,
    pub message: String,
}

impl IssueRecord {
    /// Whether this issue can be placed on a concrete source line.
    pub fn has_line(&self) -> bool {
        self.line != UNPLACED_LINE
    }
}

/// Per-node severity tally. `total` is the sum of the four buckets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeverityCounts {
    pub fatal: u64,
    pub error: u64,
    pub warning: u64,
    pub info: u64,
    pub total: u64,
}

impl SeverityCounts {
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Fatal => self.fatal += 1,
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
        self.total += 1;
    }

    /// Component-wise sum, used to roll a child's tally into its parent.
    pub fn merge(&mut self, other: &SeverityCounts) {
        self.fatal += other.fatal;
        self.error += other.error;
        self.warning += other.warning;
        self.info += other.info;
        self.total += other.total;
    }

    pub fn get(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Fatal => self.fatal,
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_total_order() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
        assert_eq!(
            Severity::ALL.iter().max().copied(),
            Some(Severity::Fatal)
        );
    }

    #[test]
    fn severity_serde_names_are_lowercase() {
        let v = serde_json::to_string(&Severity::Warning).expect("serialize");
        assert_eq!(v, "\"warning\"");
        let back: Severity = serde_json::from_str("\"fatal\"").expect("deserialize");
        assert_eq!(back, Severity::Fatal);
    }

    #[test]
    fn issue_record_round_trips_with_its_path() {
        let issue = IssueRecord {
            file_path: Utf8PathBuf::from("/src/a/b.py"),
            line: 3,
            column: 1,
            severity: Severity::Error,
            message: "x".to_string(),
        };
        let v = serde_json::to_value(&issue).expect("serialize");
        assert_eq!(v["file_path"], "/src/a/b.py");
        let back: IssueRecord = serde_json::from_value(v).expect("deserialize");
        assert_eq!(back, issue);
    }

    #[test]
    fn counts_merge_is_component_wise() {
        let mut a = SeverityCounts::default();
        a.add(Severity::Error);
        a.add(Severity::Info);

        let mut b = SeverityCounts::default();
        b.add(Severity::Error);
        b.add(Severity::Fatal);

        a.merge(&b);
        assert_eq!(a.fatal, 1);
        assert_eq!(a.error, 2);
        assert_eq!(a.warning, 0);
        assert_eq!(a.info, 1);
        assert_eq!(a.total, 4);
    }
}
