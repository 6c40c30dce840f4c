use scanlens_tree::{FileNode, NodeKind};
use scanlens_types::{Severity, UNPLACED_LINE};
use std::fmt::Write as _;

/// Render the pruned result tree as indented text.
///
/// Directories get a trailing `/`; any node with issues below it shows its
/// non-zero severity buckets; file nodes list their issues with
/// `line:column` (or `-` when the issue has no line).
pub fn render_tree(root: &FileNode) -> String {
    let mut out = String::new();
    write_node(&mut out, root, 0);
    out
}

fn write_node(out: &mut String, node: &FileNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let suffix = match node.kind {
        NodeKind::Directory => "/",
        NodeKind::File | NodeKind::Unattached => "",
    };
    let _ = write!(out, "{indent}{}{suffix}", node.name);
    if node.counts.total > 0 {
        let mut parts: Vec<String> = Vec::new();
        // Worst first.
        for severity in [
            Severity::Fatal,
            Severity::Error,
            Severity::Warning,
            Severity::Info,
        ] {
            let n = node.counts.get(severity);
            if n > 0 {
                parts.push(format!("{severity} {n}"));
            }
        }
        let _ = write!(out, " [{}]", parts.join(", "));
    }
    out.push('\n');

    for issue in &node.issues {
        let _ = write!(out, "{indent}  ");
        if issue.line == UNPLACED_LINE {
            let _ = writeln!(out, "- {}: {}", issue.severity, issue.message);
        } else {
            let _ = writeln!(
                out,
                "{}:{} {}: {}",
                issue.line, issue.column, issue.severity, issue.message
            );
        }
    }
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanlens_types::IssueRecord;

    fn issue(line: i64, severity: Severity, message: &str) -> IssueRecord {
        IssueRecord {
            file_path: "/src/a/b.py".into(),
            line,
            column: 1,
            severity,
            message: message.to_string(),
        }
    }

    #[test]
    fn renders_nested_nodes_with_counts() {
        let mut b = FileNode::file("b.py");
        b.counts.add(Severity::Error);
        b.issues.push(issue(3, Severity::Error, "x"));

        let mut a = FileNode::directory("a");
        a.counts.merge(&b.counts);
        a.children.push(b);

        let mut root = FileNode::directory("src");
        root.counts.merge(&a.counts);
        root.children.push(a);

        let text = render_tree(&root);
        assert_eq!(
            text,
            "src/ [error 1]\n  a/ [error 1]\n    b.py [error 1]\n      3:1 error: x\n"
        );
    }

    #[test]
    fn unplaced_issues_render_without_a_location() {
        let mut bucket = FileNode {
            name: "unattached".to_string(),
            kind: NodeKind::Unattached,
            counts: Default::default(),
            children: Vec::new(),
            issues: Vec::new(),
        };
        bucket.counts.add(Severity::Warning);
        bucket.issues.push(issue(UNPLACED_LINE, Severity::Warning, "gone"));

        let text = render_tree(&bucket);
        assert_eq!(text, "unattached [warning 1]\n  - warning: gone\n");
    }

    #[test]
    fn clean_root_renders_bare() {
        let root = FileNode::directory("src");
        assert_eq!(render_tree(&root), "src/\n");
    }
}
