use crate::ReportDecodeError;
use camino::Utf8Path;
use scanlens_types::{IssueRecord, RawReport, ScanPath, SeverityCounts};
use std::collections::BTreeMap;

/// Decoded report, ready for one tree walk.
///
/// Keys are scan-root-relative paths, normalized via [`ScanPath`]; values
/// keep the scanner's issue order. The tree builder removes keys as it
/// matches them to real files; whatever remains afterwards is drained into
/// the synthetic unattached bucket. One report serves exactly one walk.
#[derive(Clone, Debug, Default)]
pub struct ScanReport {
    issues: BTreeMap<ScanPath, Vec<IssueRecord>>,
}

impl ScanReport {
    /// Remove and return the issues recorded under `key`, if any.
    pub fn take(&mut self, key: &ScanPath) -> Option<Vec<IssueRecord>> {
        self.issues.remove(key)
    }

    /// Drain every remaining entry, in key order.
    pub fn drain_remaining(&mut self) -> Vec<(ScanPath, Vec<IssueRecord>)> {
        std::mem::take(&mut self.issues).into_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ScanPath> {
        self.issues.keys()
    }

    /// Severity tally over everything still in the report.
    pub fn counts(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for issues in self.issues.values() {
            for issue in issues {
                counts.add(issue.severity);
            }
        }
        counts
    }

    #[doc(hidden)]
    pub fn from_entries(entries: Vec<(ScanPath, Vec<IssueRecord>)>) -> Self {
        Self {
            issues: entries.into_iter().collect(),
        }
    }
}

/// Decode report text into a [`ScanReport`].
///
/// The issue's `file_path` starts out as the report's relative key; the tree
/// walk rewrites it to the real absolute path once the file is located.
pub fn decode_report(text: &str) -> Result<ScanReport, ReportDecodeError> {
    let raw: RawReport = serde_json::from_str(text)?;

    let mut issues: BTreeMap<ScanPath, Vec<IssueRecord>> = BTreeMap::new();
    for (key, raw_issues) in raw.issue_detail {
        let key = ScanPath::new(&key);
        let records: Vec<IssueRecord> = raw_issues
            .into_iter()
            .map(|raw| IssueRecord {
                file_path: key.to_utf8_pathbuf(),
                line: raw.line,
                column: raw.column,
                severity: raw.severity,
                message: raw.msg,
            })
            .collect();
        // Normalization can collapse distinct raw keys; keep both issue lists.
        issues.entry(key).or_default().extend(records);
    }

    Ok(ScanReport { issues })
}

/// Read and decode the report file at `path`.
pub fn read_report(path: &Utf8Path) -> Result<ScanReport, ReportDecodeError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReportDecodeError::Read {
        path: path.to_owned(),
        source,
    })?;
    decode_report(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanlens_types::Severity;

    #[test]
    fn decode_keeps_issue_order_within_a_key() {
        let text = r#"{"issue_detail": {"a/b.py": [
            {"severity": "warning", "msg": "first", "line": 3, "column": 1},
            {"severity": "fatal", "msg": "second", "line": 3, "column": 9}
        ]}}"#;
        let mut report = decode_report(text).expect("decode");
        let issues = report.take(&ScanPath::new("a/b.py")).expect("key present");
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].message, "first");
        assert_eq!(issues[1].message, "second");
        assert_eq!(issues[1].severity, Severity::Fatal);
        assert!(report.is_empty());
    }

    #[test]
    fn decode_normalizes_backslash_keys() {
        let text = r#"{"issue_detail": {"a\\b.py": [
            {"severity": "info", "msg": "m", "line": 1, "column": 1}
        ]}}"#;
        let mut report = decode_report(text).expect("decode");
        assert!(report.take(&ScanPath::new("a/b.py")).is_some());
    }

    #[test]
    fn malformed_report_is_an_error_not_a_partial_result() {
        let err = decode_report("{\"issue_detail\": [1, 2]}").unwrap_err();
        assert!(matches!(err, ReportDecodeError::Malformed(_)));
    }

    #[test]
    fn take_is_consuming() {
        let text = r#"{"issue_detail": {"k.py": [
            {"severity": "error", "msg": "m", "line": 1, "column": 1}
        ]}}"#;
        let mut report = decode_report(text).expect("decode");
        assert!(report.take(&ScanPath::new("k.py")).is_some());
        assert!(report.take(&ScanPath::new("k.py")).is_none());
    }

    #[test]
    fn drain_remaining_empties_the_report() {
        let text = r#"{"issue_detail": {
            "gone.py": [{"severity": "error", "msg": "m", "line": 4, "column": 2}],
            "also.py": [{"severity": "info", "msg": "n", "line": 1, "column": 1}]
        }}"#;
        let mut report = decode_report(text).expect("decode");
        let rest = report.drain_remaining();
        assert_eq!(rest.len(), 2);
        assert!(report.is_empty());
        // Key order is deterministic.
        assert_eq!(rest[0].0, ScanPath::new("also.py"));
        assert_eq!(rest[1].0, ScanPath::new("gone.py"));
    }

    #[test]
    fn counts_tally_everything_left() {
        let text = r#"{"issue_detail": {
            "a.py": [{"severity": "error", "msg": "m", "line": 4, "column": 2},
                     {"severity": "error", "msg": "n", "line": 5, "column": 2}],
            "b.py": [{"severity": "info", "msg": "o", "line": 1, "column": 1}]
        }}"#;
        let report = decode_report(text).expect("decode");
        let counts = report.counts();
        assert_eq!(counts.error, 2);
        assert_eq!(counts.info, 1);
        assert_eq!(counts.total, 3);
    }
}
