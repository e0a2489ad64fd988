// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Counters are carried by the miner and incremented at the pruning and
//! reporting points of the search. They describe how a run went and back the
//! memory-discipline and pruning assertions in the tests.

use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;

#[derive(EnumCountMacro, Copy, Clone)]
#[repr(u8)]
pub enum Counters {
    /// Search nodes placed in the arena, level-1 nodes included.
    NodesCreated,
    /// Candidates rejected by the pair-support matrix before any join.
    PairSupportRejections,
    /// Candidates whose joined support fell below the threshold.
    SupportRejections,
    /// Closure propagations: a member's intent grew by absorbing a partner's.
    ClosurePropagations,
    /// Join partners retired from their container by closure propagation.
    PartnersAbsorbed,
    /// Generator candidates sharing a parent's support.
    ParentSupportRejections,
    /// Rejections by the subsumption hash, closed and generator alike.
    SubsumptionRejections,
    /// Itemsets handed to the result sink.
    ItemsetsReported,
    /// Sibling containers pushed onto the search stack.
    ContainersPushed,
    /// High-water mark of live arena nodes.
    PeakLiveNodes,
}

#[derive(Debug, Default)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub fn increment_counter(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Raise the specified counter to `value` if it is below it.
    pub fn record_max(&mut self, counter: Counters, value: u64) {
        let slot = &mut self.stats[counter as usize];
        *slot = (*slot).max(value);
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }
}
