// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Vertical itemset mining over transactional databases.
//!
//! Given a database of transactions (sets of attributes) and a minimum
//! support, the miner enumerates frequent itemsets, closed itemsets,
//! minimal generators, or closed itemsets annotated with their minimal
//! generators, in a single depth-first traversal per task.
//!
//! # Architecture
//!
//! The implementation uses a two-tier memory model:
//!
//! ## Tier 1: Staged Data (Immutable)
//!
//! Data prepared once before the search and never mutated by it:
//! - Vertical database - one transaction-id bitset per attribute
//! - Pair-support matrix - precomputed supports of all attribute pairs
//!
//! ## Tier 2: Search State (Mutable)
//!
//! State owned by one traversal:
//! - Node arena - sibling containers allocated and freed stack-fashion
//! - Frame stack - one cursor per suspended container
//! - Subsumption hash - closed and generator itemsets seen so far
//!
//! # Search Algorithm
//!
//! Every task runs the same skeleton: visit a node, join it with each
//! later sibling, keep the candidates its policy accepts as children, and
//! descend. The policies differ in what they prune and report:
//!
//! 1. **Frequent**: keep every candidate at or above minimum support
//! 2. **Closed**: equal-support joins fold into the node's closure instead
//!    of becoming children; a subsumption hash drops duplicate closures
//! 3. **Generators**: candidates matching a parent's support, or subsuming
//!    a known generator, are pruned with their whole subtree; traversal is
//!    reversed so subsets are always hashed before their supersets
//!
//! The association task runs 2 and 3 over the same staged data and joins
//! the results, linking each closed itemset to its minimal generators.
//!
//! # References
//!
//! - Zaki, M. J. and Hsiao, C.-J. (2002). "CHARM: An efficient algorithm for
//!   closed itemset mining." SDM 2002.
//! - Zaki, M. J. and Gouda, K. (2003). "Fast vertical mining using diffsets."
//!   KDD 2003.
//! - Szathmary, L., Valtchev, P., Napoli, A., Godin, R. (2009). "Efficient
//!   vertical mining of frequent closures and generators." IDA 2009.

pub mod database;
pub mod error;
pub mod index;
pub mod itemset;
pub mod miner;
pub mod search;

// Re-export commonly used types
pub use database::HorizontalDatabase;
pub use error::{Error, Result};
pub use itemset::{Attribute, AttributeSet};
pub use miner::{Miner, MinerOptions, MinerTask, ReportedItemset, ResultSink};
