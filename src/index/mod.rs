// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Auxiliary indexes consulted during and after the search.
//!
//! The [`SubsumptionHash`] answers equal-support subset/superset probes in
//! O(1) average time and is what the closed and generator policies consult
//! on their hot path. The [`ItemsetTrie`] answers structural subset and
//! minimal-superset queries over collected results; the association task
//! builds and merges tries after its two mining passes.

pub mod subsumption;
pub mod trie;

pub use subsumption::{SubsumptionHash, DEFAULT_TABLE_SIZE};
pub use trie::ItemsetTrie;
