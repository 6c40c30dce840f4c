use crate::node::{FileNode, NodeKind};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use scanlens_annotate::AnnotationRegistry;
use scanlens_report::ScanReport;
use scanlens_types::{ScanPath, UNPLACED_LINE};

/// Display name of the synthetic bucket holding unattached issues.
pub const UNATTACHED_NODE_NAME: &str = "unattached";

/// Result of one build walk. The report handed in is fully drained: every
/// key was either matched to a file node or moved into the unattached
/// bucket; nothing is silently dropped and nothing is double-counted.
#[derive(Clone, Debug)]
pub struct BuiltTree {
    pub root: FileNode,
    /// Files under the root the report had issues for.
    pub matched_files: u64,
    /// Issues whose key matched nothing on disk.
    pub unattached_issues: u64,
    /// Non-fatal filesystem problems encountered during the walk
    /// (unreadable directories, non-UTF-8 names). For the log sink.
    pub warnings: Vec<String>,
}

struct Walk<'a> {
    report: &'a mut ScanReport,
    registry: &'a AnnotationRegistry,
    matched_files: u64,
    warnings: Vec<String>,
}

/// Build the result tree for `root`, consuming `report` and registering
/// line annotations as files are matched.
///
/// `root` is normally the scanned directory; a file root produces the
/// single-file variant where only that file's key is consulted. A root that
/// cannot be stat-ed at all is an error, since there is nothing to attach
/// results to.
pub fn build_tree(
    root: &Utf8Path,
    report: &mut ScanReport,
    registry: &AnnotationRegistry,
) -> anyhow::Result<BuiltTree> {
    let meta = std::fs::metadata(root.as_std_path())
        .with_context(|| format!("stat scan root {root}"))?;

    let mut walk = Walk {
        report,
        registry,
        matched_files: 0,
        warnings: Vec::new(),
    };

    let mut node;
    let mut unattached_issues = 0;
    if meta.is_dir() {
        node = walk_dir(&mut walk, root, root);
        let leftovers = walk.report.drain_remaining();
        if !leftovers.is_empty() {
            let bucket = unattached_bucket(leftovers);
            unattached_issues = bucket.counts.total;
            // The bucket participates in the rollup like any other child.
            node.counts.merge(&bucket.counts);
            node.children.push(bucket);
        }
    } else {
        // Single-file scan: the tree is rooted at the file itself and only
        // its own key is consulted; other keys cannot belong to this tree.
        let parent = root.parent().unwrap_or(Utf8Path::new(""));
        node = visit_file(&mut walk, parent, root);
        for (_, issues) in walk.report.drain_remaining() {
            unattached_issues += issues.len() as u64;
        }
    }

    Ok(BuiltTree {
        root: node,
        matched_files: walk.matched_files,
        unattached_issues,
        warnings: walk.warnings,
    })
}

fn walk_dir(walk: &mut Walk<'_>, root: &Utf8Path, dir: &Utf8Path) -> FileNode {
    let mut node = FileNode::directory(node_name(dir));

    let entries = match std::fs::read_dir(dir.as_std_path()) {
        Ok(entries) => entries,
        Err(err) => {
            // Unreadable directory: keep the node, skip the subtree.
            walk.warnings
                .push(format!("skipping unreadable directory {dir}: {err}"));
            return node;
        }
    };

    let mut listed: Vec<(Utf8PathBuf, bool)> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                walk.warnings.push(format!("while listing {dir}: {err}"));
                continue;
            }
        };
        let path = match Utf8PathBuf::from_path_buf(entry.path()) {
            Ok(path) => path,
            Err(path) => {
                walk.warnings
                    .push(format!("skipping non-UTF-8 path {}", path.display()));
                continue;
            }
        };
        let is_dir = match entry.file_type() {
            Ok(file_type) => file_type.is_dir(),
            Err(err) => {
                walk.warnings.push(format!("while typing {path}: {err}"));
                continue;
            }
        };
        listed.push((path, is_dir));
    }

    // Lexicographic order keeps the tree reproducible across runs and
    // platforms; raw read_dir order is whatever the filesystem feels like.
    listed.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name()));

    for (path, is_dir) in listed {
        let child = if is_dir {
            walk_dir(walk, root, &path)
        } else {
            visit_file(walk, root, &path)
        };
        node.counts.merge(&child.counts);
        node.children.push(child);
    }

    node
}

fn visit_file(walk: &mut Walk<'_>, root: &Utf8Path, file: &Utf8Path) -> FileNode {
    let mut node = FileNode::file(node_name(file));

    let Some(key) = ScanPath::relative_to(root, file) else {
        return node;
    };
    if let Some(issues) = walk.report.take(&key) {
        walk.matched_files += 1;
        for mut issue in issues {
            // The report spoke in relative keys; from here on the issue
            // carries the real location.
            issue.file_path = file.to_owned();
            walk.registry.record(&issue);
            node.push_issue(issue);
        }
    }
    node
}

fn unattached_bucket(leftovers: Vec<(ScanPath, Vec<scanlens_types::IssueRecord>)>) -> FileNode {
    let mut bucket = FileNode {
        name: UNATTACHED_NODE_NAME.to_string(),
        kind: NodeKind::Unattached,
        counts: Default::default(),
        children: Vec::new(),
        issues: Vec::new(),
    };
    for (key, issues) in leftovers {
        for mut issue in issues {
            // No file, no line to highlight.
            issue.file_path = key.to_utf8_pathbuf();
            issue.line = UNPLACED_LINE;
            bucket.push_issue(issue);
        }
    }
    bucket
}

fn node_name(path: &Utf8Path) -> String {
    path.file_name().unwrap_or(path.as_str()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prune;
    use scanlens_report::decode_report;
    use scanlens_types::{Severity, SeverityCounts};
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    /// Directory counts must equal the component-wise sum of their children.
    fn assert_rollup(node: &FileNode) {
        if node.is_directory() {
            let mut sum = SeverityCounts::default();
            for child in &node.children {
                assert_rollup(child);
                sum.merge(&child.counts);
            }
            assert_eq!(node.counts, sum, "rollup broken at {}", node.name);
        } else {
            let mut tally = SeverityCounts::default();
            for issue in &node.issues {
                tally.add(issue.severity);
            }
            assert_eq!(node.counts, tally, "leaf tally broken at {}", node.name);
        }
    }

    #[test]
    fn matched_issue_lands_on_its_file_and_rolls_up() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("a/b.py"), "print(1)\n");
        write_file(&root.join("a/c.py"), "print(2)\n");

        let mut report = decode_report(
            r#"{"issue_detail": {"a/b.py": [
                {"severity": "error", "msg": "x", "line": 3, "column": 1}
            ]}}"#,
        )
        .expect("decode");
        let registry = AnnotationRegistry::new();

        let built = build_tree(&root, &mut report, &registry).expect("build");
        assert_rollup(&built.root);
        assert_eq!(built.matched_files, 1);
        assert_eq!(built.unattached_issues, 0);
        assert!(report.is_empty(), "report must be fully drained");

        let mut tree = built.root;
        assert_eq!(tree.counts.error, 1);
        assert_eq!(tree.counts.total, 1);

        prune(&mut tree);
        let a = tree.child("a").expect("a survives pruning");
        assert_eq!(a.children.len(), 1);
        let b = a.child("b.py").expect("b.py survives pruning");
        assert_eq!(b.counts.error, 1);
        assert_eq!(b.counts.total, 1);
        assert_eq!(b.issues.len(), 1);
        assert_eq!(b.issues[0].file_path, root.join("a/b.py"));
        assert!(a.child("c.py").is_none(), "clean file is pruned");

        let lines = registry.consume(&root.join("a/b.py"));
        assert_eq!(lines.len(), 1);
        let entry = &lines[&3];
        assert_eq!(entry.severity, Severity::Error);
        assert_eq!(entry.messages, vec!["error: x".to_string()]);
    }

    #[test]
    fn unmatched_key_goes_to_the_unattached_bucket() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("present.py"), "\n");

        let mut report = decode_report(
            r#"{"issue_detail": {"missing.py": [
                {"severity": "warning", "msg": "gone", "line": 7, "column": 2}
            ]}}"#,
        )
        .expect("decode");
        let registry = AnnotationRegistry::new();

        let built = build_tree(&root, &mut report, &registry).expect("build");
        assert_rollup(&built.root);
        assert_eq!(built.unattached_issues, 1);

        let bucket = built.root.child(UNATTACHED_NODE_NAME).expect("bucket");
        assert_eq!(bucket.kind, NodeKind::Unattached);
        assert_eq!(bucket.issues.len(), 1);
        assert_eq!(bucket.issues[0].line, UNPLACED_LINE);
        assert_eq!(bucket.counts.warning, 1);

        // Unattached issues never become line annotations.
        assert!(registry.is_empty());
    }

    #[test]
    fn no_bucket_when_everything_matches() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("a.py"), "\n");

        let mut report = decode_report(
            r#"{"issue_detail": {"a.py": [
                {"severity": "info", "msg": "m", "line": 1, "column": 1}
            ]}}"#,
        )
        .expect("decode");
        let registry = AnnotationRegistry::new();

        let built = build_tree(&root, &mut report, &registry).expect("build");
        assert!(built.root.child(UNATTACHED_NODE_NAME).is_none());
    }

    #[test]
    fn unplaced_issue_counts_but_is_not_annotated() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("a.py"), "\n");

        let mut report = decode_report(
            r#"{"issue_detail": {"a.py": [
                {"severity": "fatal", "msg": "whole-file problem", "line": -1, "column": 1}
            ]}}"#,
        )
        .expect("decode");
        let registry = AnnotationRegistry::new();

        let built = build_tree(&root, &mut report, &registry).expect("build");
        assert_eq!(built.root.counts.fatal, 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn children_are_sorted_lexicographically() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        for name in ["zeta.py", "alpha.py", "mid", "beta.py"] {
            if name == "mid" {
                std::fs::create_dir(root.join(name).as_std_path()).expect("mkdir");
            } else {
                write_file(&root.join(name), "\n");
            }
        }

        let mut report = scanlens_report::ScanReport::default();
        let registry = AnnotationRegistry::new();
        let built = build_tree(&root, &mut report, &registry).expect("build");

        let names: Vec<&str> = built.root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alpha.py", "beta.py", "mid", "zeta.py"]);
    }

    #[test]
    fn single_file_root_matches_only_its_own_key() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("target.py"), "\n");

        let mut report = decode_report(
            r#"{"issue_detail": {
                "target.py": [{"severity": "error", "msg": "x", "line": 2, "column": 1}],
                "other.py": [{"severity": "info", "msg": "y", "line": 1, "column": 1}]
            }}"#,
        )
        .expect("decode");
        let registry = AnnotationRegistry::new();

        let built =
            build_tree(&root.join("target.py"), &mut report, &registry).expect("build");
        assert_eq!(built.root.kind, NodeKind::File);
        assert_eq!(built.root.counts.error, 1);
        assert_eq!(built.matched_files, 1);
        assert_eq!(built.unattached_issues, 1);
        assert!(report.is_empty());
    }

    #[test]
    fn nonexistent_root_is_an_error() {
        let mut report = scanlens_report::ScanReport::default();
        let registry = AnnotationRegistry::new();
        let err = build_tree(Utf8Path::new("/no/such/root"), &mut report, &registry)
            .unwrap_err();
        assert!(err.to_string().contains("stat scan root"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_degrades_to_an_empty_node() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("locked/inner.py"), "\n");
        let locked = root.join("locked");
        std::fs::set_permissions(locked.as_std_path(), std::fs::Permissions::from_mode(0o000))
            .expect("chmod");
        if std::fs::read_dir(locked.as_std_path()).is_ok() {
            // Privileged test runner; permission bits have no effect here.
            std::fs::set_permissions(
                locked.as_std_path(),
                std::fs::Permissions::from_mode(0o755),
            )
            .expect("chmod back");
            return;
        }

        let mut report = decode_report(
            r#"{"issue_detail": {"locked/inner.py": [
                {"severity": "error", "msg": "x", "line": 1, "column": 1}
            ]}}"#,
        )
        .expect("decode");
        let registry = AnnotationRegistry::new();

        let built = build_tree(&root, &mut report, &registry).expect("build");

        std::fs::set_permissions(locked.as_std_path(), std::fs::Permissions::from_mode(0o755))
            .expect("chmod back");

        assert!(!built.warnings.is_empty(), "walk should warn");
        let locked_node = built.root.child("locked").expect("empty node kept");
        assert!(locked_node.children.is_empty());
        // The file was unreachable, so its issue ends up unattached.
        assert_eq!(built.unattached_issues, 1);
    }
}
