#[cfg(feature = "serialize")]
use serde::Serialize;
use strum::{Display, EnumIs};

use crate::{error::IntrospectError, introspect::TypeRef};

/// The kind of a [`Node`]. Drives both the brackets used when rendering and leaf semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub enum NodeKind {
    /// Generation depth ran out at this node (usually a deep or circular structure).
    Shallow,
    /// A scalar, string, vector-like or other atomic value.
    Simple,
    /// A fieldless enum variant.
    Enum,
    /// A sequence, children are prefixed by their index.
    Collection,
    /// A key/value container, children are prefixed by their key.
    Dictionary,
    /// A struct, tuple or data-carrying variant, children are prefixed by member name.
    Object,
    /// The absence sentinel.
    Null,
}

impl NodeKind {
    /// Opening and closing bracket used around the children of a node of this kind.
    pub fn brackets(self) -> (&'static str, &'static str) {
        if self.is_collection() {
            ("[", "]")
        } else {
            ("{", "}")
        }
    }
}

/// A single node of a generated value tree.
///
/// Nodes are immutable once built: the builder methods consume the node and the fields are
/// only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Node {
    label: String,
    prefix: Option<String>,
    kind: NodeKind,
    type_ref: Option<TypeRef>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(label: impl Into<String>, kind: NodeKind, type_ref: Option<TypeRef>) -> Self {
        Node {
            label: label.into(),
            prefix: None,
            kind,
            type_ref,
            children: Vec::new(),
        }
    }

    /// The node standing for an absent value.
    pub fn null() -> Self {
        Node::new("null", NodeKind::Null, None)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub(crate) fn with_prefix_opt(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Display text: the type name for composites, the value's text for leaves.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Index, key or member name under which the node sits in its parent.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Type of the value, absent only for [`NodeKind::Null`].
    pub fn type_ref(&self) -> Option<TypeRef> {
        self.type_ref
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether this leaf stands in for a value that could not be introspected.
    pub fn is_error(&self) -> bool {
        self.type_ref == Some(TypeRef::of::<IntrospectError>())
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Height of this subtree; a leaf has height 1.
    pub fn height(&self) -> usize {
        1 + self.children.iter().map(Node::height).max().unwrap_or(0)
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::render::render(self))
    }
}
