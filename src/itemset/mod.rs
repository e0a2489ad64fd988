// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Core itemset types.
//!
//! This module defines the vocabulary the whole crate is written in:
//!
//! - [`Attribute`]: a single item, identified by a 1-based integer id
//! - [`AttributeSet`]: an itemset (the intent of a search node), as a bitset
//! - [`Tidset`]: the transactions supporting an itemset (its extent), as a
//!   fixed-capacity bitset
//!
//! These types are plain data with no knowledge of the search. Everything
//! above them (databases, nodes, indexes, the miner) is phrased in terms of
//! them.

pub mod attribute;
pub mod attribute_set;
pub mod tidset;

pub use attribute::Attribute;
pub use attribute_set::{AttributeSet, AttributeSetIter};
pub use tidset::{Tidset, TidsetIter};
