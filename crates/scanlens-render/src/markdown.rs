use scanlens_tree::FileNode;
use scanlens_types::{GateVerdict, ScanSummary, UNPLACED_LINE};

/// Markdown summary for CI comment surfaces.
pub fn render_markdown(summary: &ScanSummary, root: &FileNode) -> String {
    let mut out = String::new();

    out.push_str("# Scanlens report\n\n");
    out.push_str(&format!(
        "- Issues: {} (fatal {}, error {}, warning {}, info {})\n",
        summary.counts.total,
        summary.counts.fatal,
        summary.counts.error,
        summary.counts.warning,
        summary.counts.info
    ));
    out.push_str(&format!(
        "- Files with issues: {}\n- Unattached issues: {}\n",
        summary.matched_files, summary.unattached_issues
    ));
    if let Some(code) = summary.scanner_exit_code {
        out.push_str(&format!("- Scanner exit code: {code}\n"));
    }
    out.push('\n');

    if summary.counts.total == 0 {
        out.push_str("No issues.\n");
        return out;
    }

    out.push_str("## Issues\n\n");
    write_issues(&mut out, root);
    out
}

fn write_issues(out: &mut String, node: &FileNode) {
    for issue in &node.issues {
        if issue.line == UNPLACED_LINE {
            out.push_str(&format!(
                "- `{}` **{}** {}\n",
                issue.file_path, issue.severity, issue.message
            ));
        } else {
            out.push_str(&format!(
                "- `{}:{}:{}` **{}** {}\n",
                issue.file_path, issue.line, issue.column, issue.severity, issue.message
            ));
        }
    }
    for child in &node.children {
        write_issues(out, child);
    }
}

/// One-line gate verdict, in the wording CI logs show.
pub fn render_gate(verdict: &GateVerdict) -> String {
    if verdict.pass {
        format!(
            "gate passed: {} active issues within threshold {}",
            verdict.active, verdict.threshold
        )
    } else {
        format!(
            "gate failed: {} active issues exceed threshold {}",
            verdict.active, verdict.threshold
        )
    }
}
