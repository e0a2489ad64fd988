// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.
//!
//! Provides dataset builders and a brute-force reference miner. The
//! reference enumerates the full powerset of observed attributes and checks
//! each definition directly, so it is only usable on small databases, which
//! is exactly what the property tests generate.

#![allow(dead_code)]

use std::collections::BTreeSet;

use itemset_search::database::HorizontalDatabase;
use itemset_search::itemset::{Attribute, AttributeSet};
use itemset_search::miner::{CollectSink, Miner, MinerOptions, MinerTask};

/// Build an attribute set from raw ids.
pub fn attrs(ids: &[u32]) -> AttributeSet {
    let list: Vec<Attribute> = ids.iter().map(|&id| Attribute::new(id)).collect();
    AttributeSet::from_attributes(&list)
}

/// The five-transaction dataset used by the deterministic scenarios, with
/// A=1, C=2, D=3, T=4, W=5.
pub fn zaki_dataset() -> HorizontalDatabase {
    HorizontalDatabase::from_rows(&[
        &[1, 2, 4, 5],    // A C T W
        &[2, 3, 5],       // C D W
        &[1, 2, 4, 5],    // A C T W
        &[1, 2, 3, 5],    // A C D W
        &[1, 2, 3, 4, 5], // A C D T W
    ])
}

/// Options with progress lines suppressed, as every test wants them.
pub fn options(min_support: u32, task: MinerTask) -> MinerOptions {
    let mut options = MinerOptions::new(min_support, task);
    options.quiet = true;
    options
}

/// Run a miner to completion, collecting every report.
pub fn run(database: HorizontalDatabase, options: MinerOptions) -> (Miner, CollectSink) {
    let mut sink = CollectSink::new();
    let miner = Miner::new(database, options).unwrap().start(&mut sink);
    (miner, sink)
}

/// The reported (intent, support) pairs in report order.
pub fn reported(sink: &CollectSink) -> Vec<(AttributeSet, u32)> {
    sink.itemsets
        .iter()
        .map(|item| (item.intent.clone(), item.support))
        .collect()
}

/// A brute-force miner used as the oracle for property tests.
///
/// Supports are counted by scanning every row; closure and generator status
/// are checked against every other enumerated subset, straight from their
/// definitions.
pub struct Reference {
    rows: Vec<AttributeSet>,
    transactions: u32,
    attributes: Vec<Attribute>,
}

impl Reference {
    pub fn new(database: &HorizontalDatabase) -> Self {
        let transactions = database.transaction_count();
        let mut rows = Vec::new();
        let mut seen = AttributeSet::empty();
        for row in database.clone().into_rows() {
            let set = AttributeSet::from_attributes(&row);
            seen.union_with(&set);
            rows.push(set);
        }
        let attributes: Vec<Attribute> = seen.iter().collect();
        Self {
            rows,
            transactions,
            attributes,
        }
    }

    /// Number of rows containing every attribute of `itemset`.
    pub fn support_of(&self, itemset: &AttributeSet) -> u32 {
        self.rows
            .iter()
            .filter(|row| itemset.is_subset_of(row))
            .count() as u32
    }

    /// Whether some single attribute occurs in every transaction. The
    /// engine reports the empty itemset exactly in this case.
    pub fn has_full_column(&self) -> bool {
        self.attributes.iter().any(|&attribute| {
            self.support_of(&AttributeSet::singleton(attribute)) == self.transactions
        })
    }

    /// Every subset of the observed attributes with its support. Subsets
    /// using unobserved attributes have support 0 and can never qualify.
    fn enumerate(&self) -> Vec<(AttributeSet, u32)> {
        let n = self.attributes.len();
        assert!(n < 16, "reference oracle is for small universes");
        let mut all = Vec::with_capacity(1 << n);
        for mask in 0u32..(1u32 << n) {
            let mut set = AttributeSet::empty();
            for (bit, &attribute) in self.attributes.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    set.insert(attribute);
                }
            }
            let support = self.support_of(&set);
            all.push((set, support));
        }
        all
    }

    pub fn frequent(&self, min_support: u32) -> BTreeSet<(AttributeSet, u32)> {
        let full = self.has_full_column();
        self.enumerate()
            .into_iter()
            .filter(|(set, support)| {
                if set.is_empty() {
                    full
                } else {
                    *support >= min_support
                }
            })
            .collect()
    }

    pub fn closed(&self, min_support: u32) -> BTreeSet<(AttributeSet, u32)> {
        let all = self.enumerate();
        all.iter()
            .filter(|(set, support)| {
                !set.is_empty()
                    && *support >= min_support
                    && !all.iter().any(|(other, other_support)| {
                        set.is_proper_subset_of(other) && other_support == support
                    })
            })
            .cloned()
            .collect()
    }

    pub fn generators(&self, min_support: u32) -> BTreeSet<(AttributeSet, u32)> {
        let all = self.enumerate();
        let full = self.has_full_column();
        all.iter()
            .filter(|(set, support)| {
                if set.is_empty() {
                    return full;
                }
                *support >= min_support
                    && !all.iter().any(|(other, other_support)| {
                        !other.is_empty()
                            && other.is_proper_subset_of(set)
                            && other_support == support
                    })
            })
            .cloned()
            .collect()
    }
}
