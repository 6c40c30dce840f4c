use anyhow::Context;
use camino::Utf8Path;
use scanlens_annotate::AnnotationRegistry;
use scanlens_tree::{build_tree, prune, FileNode};
use scanlens_types::{ScanSummary, ToolMeta};
use time::OffsetDateTime;

/// Input for offline aggregation: a report file and the scan root it
/// describes.
#[derive(Clone, Copy, Debug)]
pub struct AggregateInput<'a> {
    /// Directory the scanner ran over, or a single file for file scans.
    pub root: &'a Utf8Path,
    /// The report file the scanner wrote.
    pub report_path: &'a Utf8Path,
    pub registry: &'a AnnotationRegistry,
    /// Recorded in the summary when the scanner was actually launched.
    pub scanner_exit_code: Option<i32>,
}

/// A pruned tree plus the summary envelope describing the run.
#[derive(Clone, Debug)]
pub struct AggregateOutput {
    pub tree: FileNode,
    pub summary: ScanSummary,
    /// Non-fatal walk warnings, for the caller's log sink.
    pub warnings: Vec<String>,
}

/// Decode the report, build and prune the result tree, populate the
/// registry.
///
/// A report that fails to decode fails the whole aggregation; the registry
/// is only written once decoding has succeeded, so a malformed report never
/// leaves half-updated annotations behind.
pub fn aggregate_report(input: AggregateInput<'_>) -> anyhow::Result<AggregateOutput> {
    let started_at = OffsetDateTime::now_utc();

    let mut report =
        scanlens_report::read_report(input.report_path).context("decode scan report")?;
    tracing::debug!(files = report.len(), "report decoded");

    let built =
        build_tree(input.root, &mut report, input.registry).context("build result tree")?;

    let mut tree = built.root;
    let counts = tree.counts;
    prune(&mut tree);

    let finished_at = OffsetDateTime::now_utc();
    let duration_ms = (finished_at - started_at).whole_milliseconds().max(0) as u64;

    Ok(AggregateOutput {
        tree,
        summary: ScanSummary {
            tool: ToolMeta {
                name: "scanlens".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            started_at,
            finished_at,
            duration_ms,
            counts,
            matched_files: built.matched_files,
            unattached_issues: built.unattached_issues,
            scanner_exit_code: input.scanner_exit_code,
        },
        warnings: built.warnings,
    })
}
