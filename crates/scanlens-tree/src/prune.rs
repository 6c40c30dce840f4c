use crate::node::{FileNode, NodeKind};

/// Remove every zero-count subtree, in place.
///
/// Runs on a tree whose counts are already rolled up, so a child with
/// `total == 0` can be dropped without looking inside it; nothing below it
/// can be non-zero. The unattached bucket is never removed (it is only
/// attached when non-empty in the first place), and the node `prune` is
/// called on is always retained, even at zero, as the attachment point for
/// rendering.
pub fn prune(node: &mut FileNode) {
    if !node.is_directory() {
        return;
    }
    node.children
        .retain(|child| child.kind == NodeKind::Unattached || !child.counts.is_empty());
    for child in &mut node.children {
        prune(child);
    }
}
