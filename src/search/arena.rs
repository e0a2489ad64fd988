// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Arena storage for search nodes.
//!
//! All live nodes sit in one `Vec`, addressed by index. A sibling container
//! is a contiguous range of indices, pushed in one go after the children of
//! a member have been generated and sorted. Because the driver explores
//! depth-first and children are always pushed above their parent's
//! container, freeing a fully explored subtree is a single truncation back
//! to the mark taken when its root was visited. No node ever holds a
//! pointer to another node.

use crate::search::node::SearchNode;
use std::ops::Range;

/// Index-addressed node storage with stack discipline.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// The number of live nodes. Taken before pushing a container, this is
    /// the mark to truncate back to when that container is spent.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow the node at `index`.
    pub fn node(&self, index: usize) -> &SearchNode {
        &self.nodes[index]
    }

    /// Mutably borrow the node at `index`.
    pub fn node_mut(&mut self, index: usize) -> &mut SearchNode {
        &mut self.nodes[index]
    }

    /// Append a generated sibling container, returning its index range.
    pub fn push_container(&mut self, children: Vec<SearchNode>) -> Range<usize> {
        let start = self.nodes.len();
        self.nodes.extend(children);
        start..self.nodes.len()
    }

    /// Drop every node at or above `mark`.
    pub fn truncate(&mut self, mark: usize) {
        self.nodes.truncate(mark);
    }
}
