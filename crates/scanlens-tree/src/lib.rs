//! Result tree construction and pruning.
//!
//! The builder joins a decoded scan report against the real directory tree
//! under the scan root, producing a [`FileNode`] hierarchy with severity
//! counts rolled up bottom-up, line annotations registered as a side effect,
//! and issues the report attributes to nonexistent files collected into one
//! synthetic unattached bucket. The pruning pass then drops every subtree
//! that carries no issues, so only actionable nodes remain.

#![forbid(unsafe_code)]

mod build;
mod node;
mod prune;

pub use build::{build_tree, BuiltTree, UNATTACHED_NODE_NAME};
pub use node::{FileNode, NodeKind};
pub use prune::prune;
