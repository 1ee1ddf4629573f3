use std::panic::{AssertUnwindSafe, catch_unwind};

use log::warn;

use crate::{
    config::{MAX_DEPTH, TreeConfig},
    error::IntrospectError,
    introspect::{Elements, Entries, Introspect, Item, Members, TypeRef},
    tree::{
        classify::{Class, classify, is_simple},
        format::format_float,
        node::{Node, NodeKind},
    },
};

/// Label of the synthetic node built for a dictionary entry whose key is not simple.
pub const ENTRY_LABEL: &str = "Entry";

const ENTRY_TYPE: TypeRef = TypeRef::from_static("treelog::Entry");

/// Builds depth-limited [`Node`] trees out of [`Introspect`] values.
///
/// Depth is the only guard against cyclic or very deep structures: every descent from a
/// composite into a child consumes one level, and a value reached with no level left
/// becomes a [`NodeKind::Shallow`] leaf showing its text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeGenerator {
    max_depth: i32,
    contain_panics: bool,
}

impl Default for TreeGenerator {
    fn default() -> Self {
        TreeGenerator {
            max_depth: MAX_DEPTH,
            contain_panics: true,
        }
    }
}

impl TreeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TreeConfig) -> Self {
        TreeGenerator {
            max_depth: config.max_depth,
            contain_panics: config.contain_panics,
        }
    }

    pub fn with_max_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// When enabled, a panic raised while describing a value turns that node into an
    /// error leaf instead of unwinding through the caller.
    pub fn with_contain_panics(mut self, contain_panics: bool) -> Self {
        self.contain_panics = contain_panics;
        self
    }

    pub fn max_depth(&self) -> i32 {
        self.max_depth
    }

    /// Tree of `value` with the configured depth and no prefix.
    pub fn generate(&self, value: &dyn Introspect) -> Node {
        self.generate_with(value, None, self.max_depth)
    }

    /// Tree of `value`, with `prefix` on the root and `depth` levels available.
    pub fn generate_with(&self, value: &dyn Introspect, prefix: Option<&str>, depth: i32) -> Node {
        self.node(value, prefix.map(str::to_string), depth)
    }

    // Runs `f`, turning a panic into an error when containment is enabled.
    fn contain<T>(&self, f: impl FnOnce() -> T) -> Result<T, IntrospectError> {
        if !self.contain_panics {
            return Ok(f());
        }
        catch_unwind(AssertUnwindSafe(f)).map_err(IntrospectError::from_panic)
    }

    fn node(&self, value: &dyn Introspect, prefix: Option<String>, depth: i32) -> Node {
        match self.contain(|| self.build(value, prefix.clone(), depth)) {
            Ok(node) => node,
            Err(err) => error_leaf(&err, prefix),
        }
    }

    fn item_node(&self, item: &Item<'_>, prefix: Option<String>, depth: i32) -> Node {
        match item.value() {
            Ok(value) => self.node(value, prefix, depth),
            Err(err) => error_leaf(err, prefix),
        }
    }

    fn build(&self, value: &dyn Introspect, prefix: Option<String>, depth: i32) -> Node {
        let type_ref = Some(value.type_ref());

        let (kind, children, variant) = match classify(value, depth) {
            Class::Null => return Node::null().with_prefix_opt(prefix),
            Class::Shallow => {
                return Node::new(value.text(), NodeKind::Shallow, type_ref).with_prefix_opt(prefix);
            }
            Class::Float(f) => {
                return Node::new(format_float(f), NodeKind::Simple, type_ref)
                    .with_prefix_opt(prefix);
            }
            Class::Simple => {
                return Node::new(value.text(), NodeKind::Simple, type_ref).with_prefix_opt(prefix);
            }
            Class::Enum(name) => {
                return Node::new(name, NodeKind::Enum, type_ref).with_prefix_opt(prefix);
            }
            Class::Dictionary(entries) => {
                (NodeKind::Dictionary, self.dictionary(entries, depth), None)
            }
            Class::Collection(elements) => {
                (NodeKind::Collection, self.collection(elements, depth), None)
            }
            Class::Object(members) => {
                let variant = members.variant_name();
                (NodeKind::Object, self.object(members, depth), variant)
            }
        };

        let mut label = value.type_ref().simple_name();
        if let Some(variant) = variant {
            label.push_str("::");
            label.push_str(variant);
        }

        Node::new(label, kind, type_ref)
            .with_prefix_opt(prefix)
            .with_children(children)
    }

    fn collection(&self, elements: Elements<'_>, depth: i32) -> Vec<Node> {
        elements
            .enumerate()
            .map(|(index, element)| self.item_node(&element, Some(index.to_string()), depth - 1))
            .collect()
    }

    fn dictionary(&self, entries: Entries<'_>, depth: i32) -> Vec<Node> {
        entries
            .map(|(key, value)| self.entry(&key, &value, depth))
            .collect()
    }

    fn entry(&self, key: &Item<'_>, value: &Item<'_>, depth: i32) -> Node {
        // Simple keys flatten the entry into the value node, prefixed by the key text.
        let flat_key = key
            .value()
            .map(|key| self.contain(|| is_simple(key).then(|| key.text())));

        let key_node = match flat_key {
            Ok(Ok(Some(text))) => return self.item_node(value, Some(text), depth - 1),
            Ok(Err(err)) => error_leaf(&err, Some("Key".to_string())),
            Ok(Ok(None)) | Err(_) => self.item_node(key, Some("Key".to_string()), depth - 1),
        };
        let value_node = self.item_node(value, Some("Value".to_string()), depth - 1);

        Node::new(ENTRY_LABEL, NodeKind::Object, Some(ENTRY_TYPE))
            .with_children(vec![key_node, value_node])
    }

    fn object(&self, members: Members<'_>, depth: i32) -> Vec<Node> {
        members
            .iter()
            .map(|member| self.item_node(member.item(), Some(member.name().to_string()), depth - 1))
            .collect()
    }
}

fn error_leaf(err: &IntrospectError, prefix: Option<String>) -> Node {
    match &prefix {
        Some(prefix) => warn!("Could not introspect `{prefix}`: {err}"),
        None => warn!("Could not introspect value: {err}"),
    }

    Node::new(
        format!("<error: {err}>"),
        NodeKind::Simple,
        Some(TypeRef::of::<IntrospectError>()),
    )
    .with_prefix_opt(prefix)
}

/// Tree of `value` using the default depth ceiling.
pub fn generate_tree(value: &dyn Introspect) -> Node {
    TreeGenerator::default().generate(value)
}

/// Tree of `value` with an explicit root prefix and depth.
pub fn generate_tree_with(value: &dyn Introspect, prefix: Option<&str>, depth: i32) -> Node {
    TreeGenerator::default().generate_with(value, prefix, depth)
}
