//! Per-file, per-line annotation registry.
//!
//! One registry instance is shared by a whole process: the tree walk writes
//! into it while aggregating a scan, and the rendering side reads through
//! [`AnnotationRegistry::consume`], which also evicts: annotations are
//! one-shot per scan, so stale markers never stack across scans.
//!
//! Merge semantics for a single line: the visual severity only ever goes up
//! (the marker must reflect the worst finding), while messages accumulate in
//! arrival order (the tooltip must list every finding).

#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use scanlens_types::{IssueRecord, Severity};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

/// The merged annotation state for one source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineAnnotation {
    /// Maximum severity among all messages recorded for this line.
    pub severity: Severity,
    /// `"severity: message"` strings in arrival order.
    pub messages: Vec<String>,
}

/// Text form of an issue as it appears in annotation message lists.
pub fn format_issue(issue: &IssueRecord) -> String {
    format!("{}: {}", issue.severity, issue.message)
}

/// Process-wide map of `(file path, line) -> LineAnnotation`.
///
/// Create one at startup and hand it to the tree builder and the renderer;
/// interior mutability keeps both sides on `&self`. Writes for one file and
/// consumes for another never conflict; same-file access is serialized by
/// the single lock (contention is one scan at a time in practice).
#[derive(Debug, Default)]
pub struct AnnotationRegistry {
    inner: Mutex<HashMap<Utf8PathBuf, BTreeMap<i64, LineAnnotation>>>,
}

impl AnnotationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one issue against its line.
    ///
    /// Callers must not pass unplaced issues (`line == -1`); they count
    /// toward tree totals but have no line to highlight, so they are
    /// ignored here.
    pub fn record(&self, issue: &IssueRecord) {
        if !issue.has_line() {
            return;
        }
        let mut inner = self.lock();
        let lines = inner.entry(issue.file_path.clone()).or_default();
        match lines.get_mut(&issue.line) {
            None => {
                lines.insert(
                    issue.line,
                    LineAnnotation {
                        severity: issue.severity,
                        messages: vec![format_issue(issue)],
                    },
                );
            }
            Some(annotation) => {
                annotation.messages.push(format_issue(issue));
                // Severity never downgrades within a scan.
                if issue.severity > annotation.severity {
                    annotation.severity = issue.severity;
                }
            }
        }
    }

    /// Return and atomically remove all entries for `path`.
    ///
    /// An empty result is not an error: it means "clear existing highlights,
    /// nothing to add."
    pub fn consume(&self, path: &Utf8Path) -> BTreeMap<i64, LineAnnotation> {
        self.lock().remove(path).unwrap_or_default()
    }

    /// Drop all entries for `path` without returning them.
    ///
    /// Used before re-scanning a file whose previous annotations should not
    /// survive even if nothing consumes them.
    pub fn evict(&self, path: &Utf8Path) {
        self.lock().remove(path);
    }

    /// Paths that currently hold annotations, in stable order.
    pub fn annotated_files(&self) -> Vec<Utf8PathBuf> {
        let mut files: Vec<Utf8PathBuf> = self.lock().keys().cloned().collect();
        files.sort();
        files
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Utf8PathBuf, BTreeMap<i64, LineAnnotation>>> {
        // A poisoned lock only means a panic elsewhere mid-update; the map
        // itself is still structurally sound.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
