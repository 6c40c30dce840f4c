//! Rendering of scan results for CI surfaces (terminal text, Markdown).
//!
//! The GUI tree and editor markup of IDE hosts are out of scope; these
//! renderers are the equivalents for pipelines and terminals, dispatching on
//! the node tag instead of widget types.

#![forbid(unsafe_code)]

mod annotations;
mod markdown;
mod tree;

pub use annotations::render_annotations;
pub use markdown::{render_gate, render_markdown};
pub use tree::render_tree;
