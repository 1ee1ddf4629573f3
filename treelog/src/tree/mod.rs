//! Value trees: the node model, the classifier, the generator and search.
pub mod classify;
mod format;
pub mod generate;
pub mod node;
pub mod search;

pub use classify::{Class, classify, is_simple};
pub use format::format_float;
pub use generate::{ENTRY_LABEL, TreeGenerator, generate_tree, generate_tree_with};
pub use node::{Node, NodeKind};
pub use search::matches_query;
