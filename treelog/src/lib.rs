//! Treelog: structured, depth-limited value trees for human-readable logging.
//!
//! Any value implementing [`Introspect`] can be turned into a [`Node`] tree, rendered as
//! indented text, searched case-insensitively, and kept as a [`LogEntry`] in a bounded
//! [`LogStore`] that evicts its oldest entries in batches.
//!
//! Example
//! ```
//! use std::collections::BTreeMap;
//! use treelog::{generate_tree, render, render_compact};
//!
//! let tree = generate_tree(&vec![1, 2, 3]);
//! assert_eq!(render(&tree), "Vec: [\n  0: 1,\n  1: 2,\n  2: 3\n]");
//!
//! let ages = BTreeMap::from([("Bob", 5), ("Alice", 3)]);
//! assert_eq!(render_compact(&generate_tree(&ages)), "{ Alice: 3, Bob: 5 }");
//! assert!(generate_tree(&ages).matches_query("alice"));
//! ```
//!
//! User types get their structure through `#[derive(Introspect)]`:
//! ```
//! use treelog::{Introspect, generate_tree, render};
//!
//! #[derive(Introspect)]
//! #[introspect(property = "area")]
//! pub struct Rect {
//!     pub width: u32,
//!     pub height: u32,
//! }
//!
//! impl Rect {
//!     fn area(&self) -> u32 {
//!         self.width * self.height
//!     }
//! }
//!
//! let tree = generate_tree(&Rect { width: 2, height: 3 });
//! assert_eq!(
//!     render(&tree),
//!     "Rect: {\n  width: 2,\n  height: 3,\n  area: 6\n}"
//! );
//! ```

// Lets the derive macro's `::treelog::` paths resolve inside this crate too.
extern crate self as treelog;

/// Configuration constants and the TOML configuration file.
pub mod config;
pub mod error;
/// The structural introspection capability and its built-in implementations.
pub mod introspect;
/// Log records, the bounded log store and the logger front-end.
pub mod logging;
/// Plain, compact and colored rendering.
pub mod render;
/// Node trees: model, classifier, generator and search.
pub mod tree;

pub use config::{Config, EVICTION_BATCH, INDENT_WIDTH, MAX_DEPTH, MAX_LOGS};
pub use error::{Error, IntrospectError, Result};
pub use introspect::{Elements, Entries, Introspect, Item, Member, Members, Shape, TypeRef};
pub use logging::{
    CallSite, LogEntry, LogInfo, LogLevel, LogStore, Logger, ObserverId, SourceLocation,
    StoreEvent,
};
pub use render::{Renderer, print_colored, render, render_compact};
pub use tree::{Node, NodeKind, TreeGenerator, generate_tree, generate_tree_with, matches_query};

#[cfg(feature = "derive")]
pub use treelog_derive::Introspect;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::{
        Introspect, LogLevel, LogStore, Logger, Node, NodeKind, generate_tree, matches_query,
        render, render_compact, tl_debug, tl_error, tl_info, tl_trace, tl_warn, tlog,
    };
}
