// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search nodes and the pairwise join that generates them.
//!
//! A [`SearchNode`] is one candidate itemset: its intent, the representation
//! of its extent, and the derived quantities the policies compare (support
//! and tid sum). Nodes are created either from a level-1 attribute column or
//! by joining a node with a later sibling in its container.
//!
//! # Extent representations
//!
//! Under [`ExtentShape::Tidsets`] every node stores its full extent. Under
//! [`ExtentShape::Diffsets`] level-1 nodes still store full tidsets, but a
//! deeper node stores only the difference from the extending parent's
//! logical extent, which is usually far smaller on dense data. Support and
//! tid sum are maintained incrementally from the parent, so the policies
//! never need the logical extent itself and run unmodified on either shape.

use crate::itemset::{Attribute, AttributeSet, Tidset};

/// How node extents are represented for one mining run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtentShape {
    /// Every node stores its full tidset.
    #[default]
    Tidsets,
    /// Nodes below level 1 store the difference from the extending parent.
    Diffsets,
}

/// The stored extent of one node.
#[derive(Debug, Clone)]
pub enum Extent {
    /// The transactions containing the intent.
    Tids(Tidset),
    /// The transactions in the extending parent's logical extent but not in
    /// this node's.
    Diffs(Tidset),
}

impl Extent {
    /// The stored bit vector, whichever representation it is.
    pub fn bits(&self) -> &Tidset {
        match self {
            Extent::Tids(bits) | Extent::Diffs(bits) => bits,
        }
    }
}

/// One candidate itemset in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub intent: AttributeSet,
    pub extent: Extent,
    /// Cardinality of the logical extent. Equal supports of a node and its
    /// child imply equal logical extents, which is what the closure and
    /// generator policies test.
    pub support: u32,
    /// Sum of the tids in the logical extent, the SubsumptionHash key source.
    pub tid_sum: u64,
    /// Depth in the tree. Equals the intent cardinality except under closure
    /// propagation, which can grow the intent in place.
    pub level: u32,
    /// Set when closure propagation retires this node; absorbed nodes are
    /// skipped both as join partners and when the cursor reaches them.
    pub absorbed: bool,
}

impl SearchNode {
    /// Build a level-1 node from an attribute column.
    pub fn level1(attribute: Attribute, tids: Tidset) -> Self {
        let support = tids.len();
        let tid_sum = tids.position_sum();
        Self {
            intent: AttributeSet::singleton(attribute),
            extent: Extent::Tids(tids),
            support,
            tid_sum,
            level: 1,
            absorbed: false,
        }
    }

    /// Build the accepted child of extending member `x`.
    ///
    /// `scratch` must hold the joined representation exactly as written by
    /// [`join_into`] for the same `x` and shape; it is copied into the node.
    pub fn joined(
        intent: AttributeSet,
        x: &SearchNode,
        shape: ExtentShape,
        support: u32,
        scratch: &Tidset,
    ) -> Self {
        let extent = match shape {
            ExtentShape::Tidsets => Extent::Tids(scratch.clone()),
            ExtentShape::Diffsets => Extent::Diffs(scratch.clone()),
        };
        Self {
            intent,
            extent,
            support,
            tid_sum: join_tid_sum(x, shape, scratch),
            level: x.level + 1,
            absorbed: false,
        }
    }
}

/// Join extending member `x` with its later sibling `y`, writing the child's
/// stored representation into `scratch` and returning the child's support.
///
/// Under `Tidsets` the result is the extent intersection. Under `Diffsets`
/// the result is the difference from `x`'s logical extent: computed from two
/// full tidsets at level 1, or from the two parents' diffsets below that.
pub fn join_into(x: &SearchNode, y: &SearchNode, shape: ExtentShape, scratch: &mut Tidset) -> u32 {
    let diff_count = match (shape, &x.extent, &y.extent) {
        (ExtentShape::Tidsets, Extent::Tids(xt), Extent::Tids(yt)) => {
            return xt.intersect_into(yt, scratch);
        }
        (ExtentShape::Diffsets, Extent::Tids(xt), Extent::Tids(yt)) => {
            xt.difference_into(yt, scratch)
        }
        (ExtentShape::Diffsets, Extent::Diffs(xd), Extent::Diffs(yd)) => {
            yd.difference_into(xd, scratch)
        }
        _ => unreachable!("sibling extents out of step with the configured shape"),
    };
    x.support - diff_count
}

/// The tid sum of the child whose stored representation `scratch` holds,
/// as written by [`join_into`] for extending member `x`.
pub fn join_tid_sum(x: &SearchNode, shape: ExtentShape, scratch: &Tidset) -> u64 {
    match shape {
        ExtentShape::Tidsets => scratch.position_sum(),
        ExtentShape::Diffsets => x.tid_sum - scratch.position_sum(),
    }
}
