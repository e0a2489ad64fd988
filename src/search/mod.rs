// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The candidate space: nodes, joins and their storage.
//!
//! The search tree ("IT-tree") is never materialized as a linked structure.
//! Nodes live in a [`NodeArena`] and are related only positionally: a
//! sibling container is an index range, children are generated from later
//! siblings within a range, and spent subtrees are freed by truncation. The
//! join mechanics for both extent representations live in [`node`].

pub mod arena;
pub mod node;

pub use arena::NodeArena;
pub use node::{join_into, join_tid_sum, Extent, ExtentShape, SearchNode};
