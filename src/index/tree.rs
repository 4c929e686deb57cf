//! B+Tree implementation
//!
//! Arena-backed tree with upsert, point lookup and split propagation.

use super::node::{child_index, search_leaf, Node, NodeId};
use super::MIN_ORDER;

/// In-memory B+Tree mapping string keys to string values
#[derive(Debug, Clone)]
pub struct BPlusTree {
    /// Node arena; ids are stable because nodes are never freed
    pub(super) nodes: Vec<Node>,

    /// Id of the current root
    pub(super) root: NodeId,

    /// Max entries per leaf and max children per internal node
    pub(super) order: usize,

    /// Number of distinct keys stored
    pub(super) len: usize,
}

impl BPlusTree {
    /// Create an empty tree with the given branching order.
    ///
    /// Orders below [`MIN_ORDER`] are raised to it.
    pub fn new(order: usize) -> Self {
        Self {
            nodes: vec![Node::empty_leaf()],
            root: 0,
            order: order.max(MIN_ORDER),
            len: 0,
        }
    }

    /// Look up the value stored for `key`
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut id = self.root;
        loop {
            match &self.nodes[id] {
                Node::Internal { keys, children } => id = children[child_index(keys, key)],
                Node::Leaf { entries } => {
                    return search_leaf(entries, key)
                        .ok()
                        .map(|pos| entries[pos].1.as_str());
                }
            }
        }
    }

    /// Insert or replace the value for `key`.
    ///
    /// Returns the previous value when the key already existed. Replacing a
    /// value never changes the shape of the tree.
    pub fn upsert(&mut self, key: String, value: String) -> Option<String> {
        // (internal node, child index taken) for every level above the leaf
        let mut path: Vec<(NodeId, usize)> = Vec::new();
        let mut id = self.root;

        let overflow = loop {
            match &mut self.nodes[id] {
                Node::Internal { keys, children } => {
                    let idx = child_index(keys, &key);
                    path.push((id, idx));
                    id = children[idx];
                }
                Node::Leaf { entries } => match search_leaf(entries, &key) {
                    Ok(pos) => return Some(std::mem::replace(&mut entries[pos].1, value)),
                    Err(pos) => {
                        entries.insert(pos, (key, value));
                        break entries.len() > self.order;
                    }
                },
            }
        };

        self.len += 1;
        if overflow {
            self.split_upward(id, path);
        }
        None
    }

    /// Split an overflowing leaf and carry the promoted separators up the
    /// recorded path, growing a new root if the old one splits.
    fn split_upward(&mut self, leaf: NodeId, mut path: Vec<(NodeId, usize)>) {
        let (mut separator, mut sibling) = self.split_leaf(leaf);

        while let Some((parent, idx)) = path.pop() {
            let overflow = match &mut self.nodes[parent] {
                Node::Internal { keys, children } => {
                    keys.insert(idx, separator);
                    children.insert(idx + 1, sibling);
                    children.len() > self.order
                }
                Node::Leaf { .. } => unreachable!("insertion path only records internal nodes"),
            };
            if !overflow {
                return;
            }
            (separator, sibling) = self.split_internal(parent);
        }

        let old_root = self.root;
        self.root = self.alloc(Node::Internal {
            keys: vec![separator],
            children: vec![old_root, sibling],
        });
        tracing::trace!(height = self.height(), "B+Tree root split");
    }

    /// Move the upper half of a leaf into a new right sibling.
    ///
    /// Returns the sibling's first key (the separator to promote) and its id.
    fn split_leaf(&mut self, id: NodeId) -> (String, NodeId) {
        let mid = (self.order + 1) / 2;
        let right = match &mut self.nodes[id] {
            Node::Leaf { entries } => entries.split_off(mid),
            Node::Internal { .. } => unreachable!("split_leaf called on an internal node"),
        };
        let separator = right[0].0.clone();
        (separator, self.alloc(Node::Leaf { entries: right }))
    }

    /// Split an internal node holding `order + 1` children.
    ///
    /// The median separator moves up; it stays in neither half.
    fn split_internal(&mut self, id: NodeId) -> (String, NodeId) {
        let s = self.order / 2;
        let (separator, right_keys, right_children) = match &mut self.nodes[id] {
            Node::Internal { keys, children } => {
                let mut right_keys = keys.split_off(s);
                let separator = right_keys.remove(0);
                let right_children = children.split_off(s + 1);
                (separator, right_keys, right_children)
            }
            Node::Leaf { .. } => unreachable!("split_internal called on a leaf"),
        };
        let sibling = self.alloc(Node::Internal {
            keys: right_keys,
            children: right_children,
        });
        (separator, sibling)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Branching order `M`
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of levels; a lone root leaf has height 1
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut id = self.root;
        while let Node::Internal { children, .. } = &self.nodes[id] {
            id = children[0];
            height += 1;
        }
        height
    }

    /// Number of nodes allocated in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node by id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Iterate all entries in ascending key order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tree: self,
            stack: vec![self.root],
            leaf: (&[] as &[(String, String)]).iter(),
        }
    }
}

impl Default for BPlusTree {
    fn default() -> Self {
        Self::new(super::DEFAULT_ORDER)
    }
}

/// In-order iterator over a tree's entries
pub struct Iter<'a> {
    tree: &'a BPlusTree,

    /// Nodes still to visit, next one on top
    stack: Vec<NodeId>,

    /// Remaining entries of the current leaf
    leaf: std::slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, value)) = self.leaf.next() {
                return Some((key.as_str(), value.as_str()));
            }
            let tree = self.tree;
            match &tree.nodes[self.stack.pop()?] {
                Node::Leaf { entries } => self.leaf = entries.iter(),
                Node::Internal { children, .. } => {
                    self.stack.extend(children.iter().rev().copied());
                }
            }
        }
    }
}

impl<'a> IntoIterator for &'a BPlusTree {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
