use crate::tree::node::Node;

impl Node {
    /// Whether `query` appears, ignoring case, in the label or prefix of this node or of
    /// any node below it.
    pub fn matches_query(&self, query: &str) -> bool {
        self.matches_folded(&query.to_lowercase())
    }

    fn matches_folded(&self, query: &str) -> bool {
        if contains_folded(self.label(), query) {
            return true;
        }

        if self
            .prefix()
            .is_some_and(|prefix| contains_folded(prefix, query))
        {
            return true;
        }

        if self.is_leaf() {
            return false;
        }

        self.children()
            .iter()
            .any(|child| child.matches_folded(query))
    }
}

fn contains_folded(haystack: &str, folded_query: &str) -> bool {
    haystack.to_lowercase().contains(folded_query)
}

/// Free-function form of [`Node::matches_query`].
pub fn matches_query(node: &Node, query: &str) -> bool {
    node.matches_query(query)
}
