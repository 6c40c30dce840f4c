use scanlens_types::{IssueRecord, SeverityCounts};

/// What a tree node stands for. Rendering dispatches on this tag; there is
/// no runtime-checked generic payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A real directory under the scan root.
    Directory,
    /// A real file under the scan root.
    File,
    /// The synthetic bucket for issues whose report key matched no file on
    /// disk. Holds issues like a file node, but is exempt from zero-count
    /// pruning (it is only attached when non-empty).
    Unattached,
}

/// One node of the aggregated result tree.
///
/// Invariant: for a `Directory` node, `counts` is the component-wise sum of
/// its children's counts and `issues` is empty; for `File` and `Unattached`
/// nodes, `counts` tallies `issues` and `children` is empty. The tree is
/// immutable after the build walk except for [`crate::prune`], which deletes
/// whole subtrees.
#[derive(Clone, Debug, PartialEq)]
pub struct FileNode {
    pub name: String,
    pub kind: NodeKind,
    pub counts: SeverityCounts,
    pub children: Vec<FileNode>,
    pub issues: Vec<IssueRecord>,
}

impl FileNode {
    pub fn directory(name: impl Into<String>) -> Self {
        FileNode {
            name: name.into(),
            kind: NodeKind::Directory,
            counts: SeverityCounts::default(),
            children: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        FileNode {
            name: name.into(),
            kind: NodeKind::File,
            counts: SeverityCounts::default(),
            children: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Locate a direct child by name.
    pub fn child(&self, name: &str) -> Option<&FileNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Push an issue onto a leaf node, updating its tally.
    pub(crate) fn push_issue(&mut self, issue: IssueRecord) {
        self.counts.add(issue.severity);
        self.issues.push(issue);
    }
}
