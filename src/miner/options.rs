// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Run configuration.
//!
//! Everything that varies between mining runs is collected in
//! [`MinerOptions`] and handed to the miner at construction. There is no
//! process-wide configuration: two miners with different options can coexist
//! in one process.

use crate::error::{Error, Result};
use crate::search::ExtentShape;
use std::fmt;

/// Which family of itemsets a run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinerTask {
    /// Every frequent itemset.
    Frequent,
    /// Frequent itemsets equal to their own closure.
    Closed,
    /// Frequent minimal generators.
    Generators,
    /// Closed itemsets annotated with their minimal generators.
    ClosedWithGenerators,
}

impl MinerTask {
    /// Resolve an upstream flag name to a task.
    ///
    /// # Example
    ///
    /// ```
    /// use itemset_search::miner::MinerTask;
    ///
    /// assert_eq!(MinerTask::from_name("closed").unwrap(), MinerTask::Closed);
    /// assert!(MinerTask::from_name("fuzzy").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "frequent" => Ok(MinerTask::Frequent),
            "closed" => Ok(MinerTask::Closed),
            "generators" => Ok(MinerTask::Generators),
            "closed-generators" => Ok(MinerTask::ClosedWithGenerators),
            _ => Err(Error::UnknownTask(name.to_string())),
        }
    }

    /// The flag name this task answers to.
    pub fn name(self) -> &'static str {
        match self {
            MinerTask::Frequent => "frequent",
            MinerTask::Closed => "closed",
            MinerTask::Generators => "generators",
            MinerTask::ClosedWithGenerators => "closed-generators",
        }
    }
}

impl fmt::Display for MinerTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The order siblings take within a generated container.
///
/// Ascending support is the fail-fast choice: cheap members are joined and
/// rejected first. Traversal correctness does not depend on the choice, only
/// on it being applied consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChildOrder {
    #[default]
    AscendingSupport,
    DescendingSupport,
}

/// Options for one mining run.
#[derive(Debug, Clone)]
pub struct MinerOptions {
    /// Minimum number of supporting transactions for a reported itemset.
    /// Must be at least 1 and at most the transaction count.
    pub min_support: u32,
    pub task: MinerTask,
    pub shape: ExtentShape,
    pub order: ChildOrder,
    /// Precompute all 2-itemset supports during staging. Worth it unless the
    /// attribute universe is so large that a quadratic table hurts.
    pub use_pair_supports: bool,
    /// Suppress the stderr progress lines.
    pub quiet: bool,
}

impl MinerOptions {
    /// Options with the default shape, order and optimizations.
    pub fn new(min_support: u32, task: MinerTask) -> Self {
        Self {
            min_support,
            task,
            shape: ExtentShape::default(),
            order: ChildOrder::default(),
            use_pair_supports: true,
            quiet: false,
        }
    }
}
