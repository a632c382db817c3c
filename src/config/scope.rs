//! Arena-backed tree of array-of-tables config sections.
//!
//! Every node lives in one `Vec` owned by [`ScopeTree`] and is addressed by
//! a [`ScopeId`] index. Appending a sibling never moves existing nodes, so
//! parent back-references and previously handed-out ids stay valid for the
//! lifetime of the tree — the arena replaces the raw parent pointers of a
//! naive by-value layout, which could dangle on reallocation.
//!
//! Dropping the tree releases every node and key-value pair exactly once;
//! an absent tree (`Option::None`) drops as a no-op.

/// Index of a node inside a [`ScopeTree`].
///
/// Ids are only meaningful for the tree that produced them and remain valid
/// until that tree is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

/// One parsed section: its key-value pairs plus its position in the nesting
/// tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeNode {
    parent: Option<ScopeId>,
    /// Ordered key-value pairs; keys are unique (last write wins).
    pairs: Vec<(String, String)>,
    /// Child series by section name, in first-seen order. The same name
    /// repeating in the input grows one series (array-of-tables semantics).
    series: Vec<(String, Vec<ScopeId>)>,
}

/// The fully built section tree. Exactly one root exists per parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeTree {
    nodes: Vec<ScopeNode>,
}

impl ScopeTree {
    /// Create a tree holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![ScopeNode {
                parent: None,
                pairs: Vec::new(),
                series: Vec::new(),
            }],
        }
    }

    /// The root node. The only node without a parent.
    #[must_use]
    pub const fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// The parent of `node`, or `None` for the root.
    #[must_use]
    pub fn parent(&self, node: ScopeId) -> Option<ScopeId> {
        self.nodes[node.0].parent
    }

    /// The ordered child series registered under `name`, or `None` if no
    /// section by that name was ever appended to `node`. Never creates.
    #[must_use]
    pub fn lookup_child_series(&self, node: ScopeId, name: &str) -> Option<&[ScopeId]> {
        self.nodes[node.0]
            .series
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, ids)| ids.as_slice())
    }

    /// Append a new child under `node` in the series named `name`, starting
    /// the series if it does not exist yet. Returns the new child's id.
    ///
    /// Previously returned ids (siblings included) are never invalidated.
    pub fn append_child(&mut self, node: ScopeId, name: &str) -> ScopeId {
        let child = ScopeId(self.nodes.len());
        self.nodes.push(ScopeNode {
            parent: Some(node),
            pairs: Vec::new(),
            series: Vec::new(),
        });
        let series = &mut self.nodes[node.0].series;
        if let Some((_, ids)) = series.iter_mut().find(|(k, _)| k == name) {
            ids.push(child);
        } else {
            series.push((name.to_string(), vec![child]));
        }
        child
    }

    /// Record a key-value pair on `node`. A repeated key replaces the
    /// earlier value in place: last occurrence wins.
    pub fn insert_pair(&mut self, node: ScopeId, key: &str, value: &str) {
        let pairs = &mut self.nodes[node.0].pairs;
        if let Some((_, v)) = pairs.iter_mut().find(|(k, _)| k == key) {
            *v = value.to_string();
        } else {
            pairs.push((key.to_string(), value.to_string()));
        }
    }

    /// The raw value recorded under `key` on `node`, if any.
    #[must_use]
    pub fn get(&self, node: ScopeId, key: &str) -> Option<&str> {
        self.nodes[node.0]
            .pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All key-value pairs on `node`, in recorded order.
    #[must_use]
    pub fn pairs(&self, node: ScopeId) -> &[(String, String)] {
        &self.nodes[node.0].pairs
    }

    /// Section names with children under `node`, in first-seen order.
    #[must_use]
    pub fn series_names(&self, node: ScopeId) -> impl Iterator<Item = &str> {
        self.nodes[node.0].series.iter().map(|(k, _)| k.as_str())
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn new_tree_has_only_a_parentless_root() {
        let tree = ScopeTree::new();
        assert_eq!(tree.parent(tree.root()), None);
        assert!(tree.pairs(tree.root()).is_empty());
        assert_eq!(tree.series_names(tree.root()).count(), 0);
    }

    #[test]
    fn append_child_starts_a_singleton_series() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        let child = tree.append_child(root, "screen");
        assert_eq!(tree.parent(child), Some(root));
        assert_eq!(tree.lookup_child_series(root, "screen"), Some(&[child][..]));
    }

    #[test]
    fn repeated_append_grows_the_same_series_in_order() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        let a = tree.append_child(root, "screen");
        let b = tree.append_child(root, "screen");
        let c = tree.append_child(root, "screen");
        assert_eq!(
            tree.lookup_child_series(root, "screen"),
            Some(&[a, b, c][..])
        );
    }

    #[test]
    fn sibling_growth_preserves_existing_ids() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        let first = tree.append_child(root, "monitor");
        tree.insert_pair(first, "id", "\"eDP-1\"");
        // Grow the arena well past its initial capacity.
        for _ in 0..64 {
            tree.append_child(root, "monitor");
        }
        assert_eq!(tree.get(first, "id"), Some("\"eDP-1\""));
        assert_eq!(tree.parent(first), Some(root));
    }

    #[test]
    fn lookup_never_creates() {
        let tree = ScopeTree::new();
        assert_eq!(tree.lookup_child_series(tree.root(), "screen"), None);
        assert_eq!(tree.series_names(tree.root()).count(), 0);
    }

    #[test]
    fn distinct_names_form_distinct_series() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        let s = tree.append_child(root, "screen");
        let m = tree.append_child(s, "monitor");
        assert_eq!(tree.lookup_child_series(root, "monitor"), None);
        assert_eq!(tree.lookup_child_series(s, "monitor"), Some(&[m][..]));
    }

    #[test]
    fn duplicate_key_last_occurrence_wins() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        tree.insert_pair(root, "dpi", "96");
        tree.insert_pair(root, "name", "\"desk\"");
        tree.insert_pair(root, "dpi", "144");
        assert_eq!(tree.get(root, "dpi"), Some("144"));
        // The replaced key keeps its original position.
        assert_eq!(tree.pairs(root)[0], ("dpi".to_string(), "144".to_string()));
        assert_eq!(tree.pairs(root).len(), 2);
    }

    #[test]
    fn teardown_of_absent_tree_is_safe() {
        let mut maybe: Option<ScopeTree> = None;
        drop(maybe.take());
        maybe = Some(ScopeTree::new());
        drop(maybe.take());
        drop(maybe.take()); // second take sees None
    }

    #[test]
    fn clone_is_deep_and_structurally_equal() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        let s = tree.append_child(root, "screen");
        tree.insert_pair(s, "name", "\"docked\"");
        let copy = tree.clone();
        assert_eq!(tree, copy);
    }
}
