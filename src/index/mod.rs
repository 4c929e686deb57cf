//! Index Module
//!
//! In-memory ordered index over the live key/value pairs.
//!
//! ## Responsibilities
//! - Point lookups in logarithmic time
//! - Upserts with last-write-wins replacement
//! - Stay reconstructible from the log (the index itself is never persisted)
//!
//! ## Data Structure Choice
//! A B+Tree stored in an arena:
//! - Nodes live in a `Vec<Node>` owned by the tree, children are `NodeId`s
//! - Values only live in leaves; internal nodes hold separator keys
//! - No deletion, so nodes only ever split and the tree only ever grows
//! - Splits propagate along the descent path, so nodes carry no parent links
//!
//! ```text
//!                   ┌──────────────┐
//!                   │   [ "m" ]    │   internal (1 separator, 2 children)
//!                   └──┬────────┬──┘
//!            key < "m" │        │ key >= "m"
//!          ┌───────────▼─┐    ┌─▼───────────┐
//!          │ a=1  c=2    │    │ m=3  x=4    │   leaves
//!          └─────────────┘    └─────────────┘
//! ```

mod node;
mod tree;
mod verify;

pub use node::{Node, NodeId};
pub use tree::{BPlusTree, Iter};
pub use verify::InvariantViolation;

/// Smallest branching order the split rules support
pub const MIN_ORDER: usize = 3;

/// Branching order used when none is configured
pub const DEFAULT_ORDER: usize = 32;
