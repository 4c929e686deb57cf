//! B+Tree node definitions

/// Position of a node in the tree's arena
pub type NodeId = usize;

/// A single B+Tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Holds the actual entries, strictly increasing by key
    Leaf { entries: Vec<(String, String)> },

    /// Routing node: child `i` covers keys in `[keys[i-1], keys[i])`
    Internal {
        keys: Vec<String>,
        children: Vec<NodeId>,
    },
}

impl Node {
    /// An empty leaf, used as the root of an empty tree
    pub fn empty_leaf() -> Self {
        Node::Leaf {
            entries: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Entries in a leaf, children in an internal node
    pub fn fanout(&self) -> usize {
        match self {
            Node::Leaf { entries } => entries.len(),
            Node::Internal { children, .. } => children.len(),
        }
    }
}

/// Index of the child whose range contains `key`.
///
/// Counts the separators `<= key`, which is exactly the `i` with
/// `keys[i-1] <= key < keys[i]`.
pub(crate) fn child_index(keys: &[String], key: &str) -> usize {
    keys.partition_point(|separator| separator.as_str() <= key)
}

/// Binary search a leaf for `key`
pub(crate) fn search_leaf(
    entries: &[(String, String)],
    key: &str,
) -> std::result::Result<usize, usize> {
    entries.binary_search_by(|(k, _)| k.as_str().cmp(key))
}
