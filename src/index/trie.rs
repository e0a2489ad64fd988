// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Prefix-tree index over itemsets.
//!
//! Itemsets are registered along root-to-node paths of ascending attributes;
//! a node whose path equals a registered itemset is a terminal and carries
//! that itemset's payload. The root is the terminal for the empty itemset.
//!
//! Two query families are supported:
//!
//! - subset enumeration (`contains_subset_of`, `for_each_subset_of`): walk
//!   down only the edges labelled with query attributes, so every terminal
//!   reached has a path that is a subset of the query;
//! - minimal-superset search (`min_superset_of`): breadth-first expansion,
//!   so the first terminal that has consumed the whole query is one of
//!   smallest cardinality.
//!
//! Nodes live in an arena and refer to each other by index; child maps are
//! ordered, so every walk is deterministic. Dropping the trie frees it all
//! at once.

use crate::itemset::{Attribute, AttributeSet};
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug)]
struct TrieNode<P> {
    /// Edge label from the parent; `None` only at the root.
    attribute: Option<Attribute>,
    parent: Option<usize>,
    children: BTreeMap<Attribute, usize>,
    payload: Option<P>,
}

/// Prefix tree mapping itemsets to payloads.
#[derive(Debug)]
pub struct ItemsetTrie<P> {
    nodes: Vec<TrieNode<P>>,
    terminals: usize,
}

impl<P> ItemsetTrie<P> {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode {
                attribute: None,
                parent: None,
                children: BTreeMap::new(),
                payload: None,
            }],
            terminals: 0,
        }
    }

    /// The number of registered itemsets.
    pub fn len(&self) -> usize {
        self.terminals
    }

    /// Check if no itemset is registered.
    pub fn is_empty(&self) -> bool {
        self.terminals == 0
    }

    /// Register `itemset` with `payload`, returning the previous payload if
    /// the itemset was already present. Re-insertion changes no query result
    /// beyond the payload value.
    pub fn insert(&mut self, itemset: &AttributeSet, payload: P) -> Option<P> {
        let mut current = 0;
        for attribute in itemset.iter() {
            let next = self.nodes[current].children.get(&attribute).copied();
            current = match next {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode {
                        attribute: Some(attribute),
                        parent: Some(current),
                        children: BTreeMap::new(),
                        payload: None,
                    });
                    self.nodes[current].children.insert(attribute, child);
                    child
                }
            };
        }
        let replaced = self.nodes[current].payload.replace(payload);
        if replaced.is_none() {
            self.terminals += 1;
        }
        replaced
    }

    /// The payload registered for exactly `itemset`, if any.
    pub fn payload_of(&self, itemset: &AttributeSet) -> Option<&P> {
        let node = self.node_of(itemset)?;
        self.nodes[node].payload.as_ref()
    }

    /// Unregister `itemset`, returning its payload. Interior nodes are kept
    /// until the trie is dropped.
    pub fn remove(&mut self, itemset: &AttributeSet) -> Option<P> {
        let node = self.node_of(itemset)?;
        let removed = self.nodes[node].payload.take();
        if removed.is_some() {
            self.terminals -= 1;
        }
        removed
    }

    fn node_of(&self, itemset: &AttributeSet) -> Option<usize> {
        let mut current = 0;
        for attribute in itemset.iter() {
            current = self.nodes[current].children.get(&attribute).copied()?;
        }
        Some(current)
    }

    /// The itemset whose terminal this node is, rebuilt from parent links.
    fn path_of(&self, node: usize) -> AttributeSet {
        let mut set = AttributeSet::empty();
        let mut current = node;
        while let (Some(attribute), Some(parent)) =
            (self.nodes[current].attribute, self.nodes[current].parent)
        {
            set.insert(attribute);
            current = parent;
        }
        set
    }

    /// Check whether some registered itemset is a subset of `query` (the
    /// query itself included).
    pub fn contains_subset_of(&self, query: &AttributeSet) -> bool {
        self.subset_hit(0, query)
    }

    fn subset_hit(&self, node: usize, query: &AttributeSet) -> bool {
        let n = &self.nodes[node];
        if n.payload.is_some() {
            return true;
        }
        n.children
            .iter()
            .any(|(&attribute, &child)| query.contains(attribute) && self.subset_hit(child, query))
    }

    /// Visit every registered itemset that is a subset of `query`, in
    /// ascending path order.
    pub fn for_each_subset_of(
        &self,
        query: &AttributeSet,
        mut action: impl FnMut(&AttributeSet, &P),
    ) {
        let mut path = AttributeSet::empty();
        self.subset_walk(0, Some(query), &mut path, &mut action);
    }

    /// Visit every registered itemset, in ascending path order.
    pub fn for_each(&self, mut action: impl FnMut(&AttributeSet, &P)) {
        let mut path = AttributeSet::empty();
        self.subset_walk(0, None, &mut path, &mut action);
    }

    fn subset_walk(
        &self,
        node: usize,
        query: Option<&AttributeSet>,
        path: &mut AttributeSet,
        action: &mut impl FnMut(&AttributeSet, &P),
    ) {
        let n = &self.nodes[node];
        if let Some(payload) = &n.payload {
            action(path, payload);
        }
        for (&attribute, &child) in &n.children {
            if query.map_or(true, |q| q.contains(attribute)) {
                path.insert(attribute);
                self.subset_walk(child, query, path, action);
                path.remove(attribute);
            }
        }
    }

    /// Find a smallest registered superset of `query` (the query itself
    /// included) whose payload satisfies `accept`.
    ///
    /// The expansion is breadth-first over the trie, pruned to edges that
    /// can still complete the query: paths ascend, so an edge labelled past
    /// the next unconsumed query attribute is dead. The first accepted
    /// terminal is therefore at minimal depth, i.e. of minimal cardinality.
    pub fn min_superset_of(
        &self,
        query: &AttributeSet,
        mut accept: impl FnMut(&P) -> bool,
    ) -> Option<(AttributeSet, &P)> {
        let needed: Vec<Attribute> = query.iter().collect();
        let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
        queue.push_back((0, 0));
        while let Some((node, matched)) = queue.pop_front() {
            let n = &self.nodes[node];
            if matched == needed.len() {
                if let Some(payload) = &n.payload {
                    if accept(payload) {
                        return Some((self.path_of(node), payload));
                    }
                }
                for &child in n.children.values() {
                    queue.push_back((child, matched));
                }
            } else {
                let next = needed[matched];
                for (&attribute, &child) in n.children.range(..=next) {
                    queue.push_back((child, matched + usize::from(attribute == next)));
                }
            }
        }
        None
    }

    /// Absorb every itemset of `other`. When both tries hold the same
    /// itemset, `combine(existing, incoming)` chooses the surviving payload.
    pub fn merge(&mut self, mut other: ItemsetTrie<P>, mut combine: impl FnMut(P, P) -> P) {
        let mut stack: Vec<usize> = vec![0];
        while let Some(node) = stack.pop() {
            if let Some(incoming) = other.nodes[node].payload.take() {
                let path = other.path_of(node);
                let merged = match self.remove(&path) {
                    Some(existing) => combine(existing, incoming),
                    None => incoming,
                };
                self.insert(&path, merged);
            }
            stack.extend(other.nodes[node].children.values());
        }
    }
}

impl<P> Default for ItemsetTrie<P> {
    fn default() -> Self {
        Self::new()
    }
}
