// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Support-keyed hash for subsumption tests.
//!
//! The hash answers one family of questions in O(1) average time: does any
//! already-accepted itemset with the *same support* as the probe stand in a
//! subset or superset relation to it? Equal support plus a subset relation
//! implies equal extents, so the bucket key is derived from the extent
//! alone: two itemsets with identical extents always land in the same
//! bucket, which is exactly what closure detection, generator detection and
//! duplicate elimination need.
//!
//! The table is sized once at construction and never resized; a bucket
//! degrades to a linear scan under collision, a performance concern but not
//! a correctness one.

use crate::itemset::AttributeSet;

/// Default bucket count for a mining run.
pub const DEFAULT_TABLE_SIZE: usize = 1 << 16;

/// An accepted itemset snapshot: membership tests only, never traversal.
#[derive(Debug, Clone)]
struct HashEntry {
    intent: AttributeSet,
    support: u32,
}

/// Fixed-size hash over (intent, support) entries keyed by extent tid sum.
#[derive(Debug)]
pub struct SubsumptionHash {
    buckets: Vec<Vec<HashEntry>>,
    entries: usize,
}

impl SubsumptionHash {
    /// Create a hash with `table_size` buckets.
    ///
    /// # Panics
    ///
    /// Panics if `table_size` is 0.
    pub fn new(table_size: usize) -> Self {
        assert!(table_size > 0, "Table size out of range: {}", table_size);
        Self {
            buckets: vec![Vec::new(); table_size],
            entries: 0,
        }
    }

    /// Create a hash with the default table size.
    pub fn with_default_size() -> Self {
        Self::new(DEFAULT_TABLE_SIZE)
    }

    /// Total number of stored entries.
    pub fn len(&self) -> usize {
        self.entries
    }

    /// Check if the hash holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    fn bucket_index(&self, tid_sum: u64) -> usize {
        (tid_sum % self.buckets.len() as u64) as usize
    }

    /// Append an entry without any dominance check.
    pub fn add(&mut self, intent: AttributeSet, support: u32, tid_sum: u64) {
        let index = self.bucket_index(tid_sum);
        self.buckets[index].push(HashEntry { intent, support });
        self.entries += 1;
    }

    /// Check whether some stored itemset of equal support is a subset of the
    /// probe (the probe itself included, if ever stored).
    pub fn contains_subset_of(&self, intent: &AttributeSet, support: u32, tid_sum: u64) -> bool {
        self.buckets[self.bucket_index(tid_sum)]
            .iter()
            .any(|entry| entry.support == support && entry.intent.is_subset_of(intent))
    }

    /// Check whether some stored itemset of equal support is a superset of
    /// the probe (the probe itself included, if ever stored).
    pub fn contains_superset_of(&self, intent: &AttributeSet, support: u32, tid_sum: u64) -> bool {
        self.buckets[self.bucket_index(tid_sum)]
            .iter()
            .any(|entry| entry.support == support && intent.is_subset_of(&entry.intent))
    }

    /// Insert an entry, first evicting every equal-support entry in its
    /// bucket whose intent is a proper superset of the new intent. A newly
    /// found smaller itemset thereby replaces the entries it dominates.
    pub fn replace(&mut self, intent: AttributeSet, support: u32, tid_sum: u64) {
        let index = self.bucket_index(tid_sum);
        let bucket = &mut self.buckets[index];
        let before = bucket.len();
        bucket.retain(|entry| {
            !(entry.support == support && intent.is_proper_subset_of(&entry.intent))
        });
        self.entries -= before - bucket.len();
        bucket.push(HashEntry { intent, support });
        self.entries += 1;
    }
}
