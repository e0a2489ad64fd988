// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for the mining engine.
//!
//! Only configuration problems are recoverable errors: they are detected
//! before any search work starts and reported to the caller, with no partial
//! results produced. Structural invariant violations (out-of-range ids,
//! malformed containers) are programming errors and panic via assertions.

use thiserror::Error;

/// Errors detected while validating a mining configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The minimum support threshold exceeds the number of transactions, so
    /// no itemset can qualify. An empty database with any threshold lands
    /// here too.
    #[error("minimum support {min_support} exceeds transaction count {transactions}")]
    SupportExceedsTransactions {
        /// The requested threshold.
        min_support: u32,
        /// The number of transactions staged.
        transactions: u32,
    },

    /// A minimum support of zero would accept the entire powerset of the
    /// attribute universe; thresholds start at 1.
    #[error("minimum support must be at least 1")]
    ZeroMinSupport,

    /// The task name passed by the upstream flag layer does not resolve to a
    /// mining task.
    #[error("unknown mining task: {0:?}")]
    UnknownTask(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
