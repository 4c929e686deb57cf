//! Structural checks for the B+Tree
//!
//! Walks the whole tree and reports the first broken invariant. Used by the
//! test suites after long upsert sequences; not on any hot path.

use thiserror::Error;

use super::node::{Node, NodeId};
use super::tree::BPlusTree;

/// A broken B+Tree invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("leaf {node} sits at depth {depth}, expected {expected}")]
    UnevenDepth {
        node: NodeId,
        depth: usize,
        expected: usize,
    },

    #[error("keys in node {node} are not strictly increasing at position {position}")]
    Unsorted { node: NodeId, position: usize },

    #[error("internal node {node} has {children} children for {keys} separators")]
    ChildCount {
        node: NodeId,
        keys: usize,
        children: usize,
    },

    #[error("key {key:?} in leaf {node} lies outside the range routed to it")]
    OutOfRange { node: NodeId, key: String },

    #[error("node {node} holds {size} items, allowed {min}..={max}")]
    Fill {
        node: NodeId,
        size: usize,
        min: usize,
        max: usize,
    },

    #[error("tree reports {reported} keys but its leaves hold {actual}")]
    LengthMismatch { reported: usize, actual: usize },

    #[error("{reachable} of {allocated} allocated nodes are reachable from the root")]
    Unreachable { reachable: usize, allocated: usize },
}

/// Bookkeeping threaded through the walk
struct Walk {
    leaf_depth: Option<usize>,
    keys_seen: usize,
    nodes_seen: usize,
}

impl BPlusTree {
    /// Check every structural invariant of the tree:
    ///
    /// 1. all leaves at the same depth
    /// 2. keys strictly increasing within each node
    /// 3. `children == separators + 1` for internal nodes
    /// 4. each key routed to exactly one leaf (separator bounds hold)
    /// 5. non-root nodes hold between `⌈M/2⌉` and `M` items
    pub fn validate(&self) -> std::result::Result<(), InvariantViolation> {
        let mut walk = Walk {
            leaf_depth: None,
            keys_seen: 0,
            nodes_seen: 0,
        };
        self.check_node(self.root, 1, None, None, &mut walk)?;

        if walk.keys_seen != self.len {
            return Err(InvariantViolation::LengthMismatch {
                reported: self.len,
                actual: walk.keys_seen,
            });
        }
        if walk.nodes_seen != self.nodes.len() {
            return Err(InvariantViolation::Unreachable {
                reachable: walk.nodes_seen,
                allocated: self.nodes.len(),
            });
        }
        Ok(())
    }

    fn check_node(
        &self,
        id: NodeId,
        depth: usize,
        lower: Option<&str>,
        upper: Option<&str>,
        walk: &mut Walk,
    ) -> std::result::Result<(), InvariantViolation> {
        walk.nodes_seen += 1;
        let node = &self.nodes[id];
        self.check_fill(id, node)?;

        match node {
            Node::Leaf { entries } => {
                let expected = *walk.leaf_depth.get_or_insert(depth);
                if depth != expected {
                    return Err(InvariantViolation::UnevenDepth {
                        node: id,
                        depth,
                        expected,
                    });
                }
                check_sorted(id, entries.iter().map(|(k, _)| k.as_str()))?;
                for (key, _) in entries {
                    let above = lower.map_or(true, |lo| key.as_str() >= lo);
                    let below = upper.map_or(true, |hi| key.as_str() < hi);
                    if !(above && below) {
                        return Err(InvariantViolation::OutOfRange {
                            node: id,
                            key: key.clone(),
                        });
                    }
                }
                walk.keys_seen += entries.len();
            }
            Node::Internal { keys, children } => {
                if children.len() != keys.len() + 1 {
                    return Err(InvariantViolation::ChildCount {
                        node: id,
                        keys: keys.len(),
                        children: children.len(),
                    });
                }
                check_sorted(id, keys.iter().map(String::as_str))?;
                for (i, &child) in children.iter().enumerate() {
                    let lo = if i == 0 { lower } else { Some(keys[i - 1].as_str()) };
                    let hi = keys.get(i).map(String::as_str).or(upper);
                    self.check_node(child, depth + 1, lo, hi, walk)?;
                }
            }
        }
        Ok(())
    }

    fn check_fill(&self, id: NodeId, node: &Node) -> std::result::Result<(), InvariantViolation> {
        let size = node.fanout();
        let (min, max) = if id != self.root {
            ((self.order + 1) / 2, self.order)
        } else if node.is_leaf() {
            (0, self.order)
        } else {
            (2, self.order)
        };
        if size < min || size > max {
            return Err(InvariantViolation::Fill {
                node: id,
                size,
                min,
                max,
            });
        }
        Ok(())
    }
}

fn check_sorted<'a>(
    node: NodeId,
    keys: impl Iterator<Item = &'a str>,
) -> std::result::Result<(), InvariantViolation> {
    let mut previous: Option<&str> = None;
    for (position, key) in keys.enumerate() {
        if previous.is_some_and(|p| p >= key) {
            return Err(InvariantViolation::Unsorted { node, position });
        }
        previous = Some(key);
    }
    Ok(())
}
