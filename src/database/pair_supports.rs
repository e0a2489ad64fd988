// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Precomputed supports of all attribute pairs.
//!
//! The matrix stores, for every pair of attributes `a < b`, the number of
//! transactions that contain both. It is filled during the staging pass and
//! lets the search reject an infrequent 2-itemset without materializing its
//! extent. Only the shallowest level benefits: no n-dimensional analogue is
//! practical, so deeper joins always intersect extents.
//!
//! Storage is a flat strict lower triangle indexed by attribute id, so memory
//! is quadratic in the largest attribute id. The matrix is optional for that
//! reason; see `MinerOptions::use_pair_supports`.

use crate::itemset::Attribute;

/// Triangular matrix of 2-itemset supports.
#[derive(Debug, Clone)]
pub struct PairSupportMatrix {
    /// counts[i*(i-1)/2 + j] holds the pair (j+1, i+1) for 0 <= j < i.
    counts: Vec<u32>,
    max_attribute: u32,
}

impl PairSupportMatrix {
    /// Create an all-zero matrix covering attribute ids `1..=max_attribute`.
    pub fn new(max_attribute: u32) -> Self {
        let k = max_attribute as usize;
        Self {
            counts: vec![0; k * k.saturating_sub(1) / 2],
            max_attribute,
        }
    }

    /// The largest attribute id the matrix covers.
    pub fn max_attribute(&self) -> u32 {
        self.max_attribute
    }

    fn index(&self, a: Attribute, b: Attribute) -> usize {
        debug_assert_ne!(a, b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let i = hi.as_index();
        let j = lo.as_index();
        i * (i - 1) / 2 + j
    }

    /// Record one transaction containing both `a` and `b`.
    pub fn increment(&mut self, a: Attribute, b: Attribute) {
        let index = self.index(a, b);
        self.counts[index] += 1;
    }

    /// The number of transactions containing both `a` and `b`.
    pub fn support_of(&self, a: Attribute, b: Attribute) -> u32 {
        self.counts[self.index(a, b)]
    }
}
