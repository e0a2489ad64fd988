// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The result-reporting seam.
//!
//! The miner pushes every accepted itemset into a caller-supplied
//! [`ResultSink`] as the search runs, then pushes one [`MiningSummary`] when
//! it finishes. What happens to the stream (collect it, count it, print it)
//! is entirely the sink's business; three ready-made sinks cover the common
//! cases.

use crate::itemset::AttributeSet;
use std::io;

/// One accepted itemset, as handed to the sink.
#[derive(Debug, Clone)]
pub struct ReportedItemset {
    pub intent: AttributeSet,
    pub support: u32,
    /// Set when the reporting task established this itemset is closed.
    pub closed: bool,
    /// Set when the reporting task established this itemset is a minimal
    /// generator.
    pub generator: bool,
    /// The minimal generators of this closed itemset. Filled by the
    /// association task only; empty everywhere else.
    pub minimal_generators: Vec<AttributeSet>,
}

impl ReportedItemset {
    /// An itemset with no closure or generator information attached.
    pub fn plain(intent: AttributeSet, support: u32) -> Self {
        Self {
            intent,
            support,
            closed: false,
            generator: false,
            minimal_generators: Vec::new(),
        }
    }
}

/// End-of-run totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MiningSummary {
    pub itemsets_found: u64,
    /// Closed itemsets found; 0 for tasks that do not compute closure.
    pub closed_found: u64,
}

/// Receiver for the output of one mining run.
pub trait ResultSink {
    /// Called once per accepted itemset, in the run's deterministic order.
    fn report(&mut self, itemset: ReportedItemset);

    /// Called once, after the search is exhausted.
    fn summarize(&mut self, _summary: &MiningSummary) {}
}

/// Sink that keeps everything it receives.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub itemsets: Vec<ReportedItemset>,
    pub summary: Option<MiningSummary>,
}

impl CollectSink {
    pub fn new() -> Self {
        CollectSink::default()
    }
}

impl ResultSink for CollectSink {
    fn report(&mut self, itemset: ReportedItemset) {
        self.itemsets.push(itemset);
    }

    fn summarize(&mut self, summary: &MiningSummary) {
        self.summary = Some(*summary);
    }
}

/// Sink that only counts reports, for runs whose output would be too large
/// to hold.
#[derive(Debug, Default)]
pub struct CountSink {
    pub reported: u64,
}

impl CountSink {
    pub fn new() -> Self {
        CountSink::default()
    }
}

impl ResultSink for CountSink {
    fn report(&mut self, _itemset: ReportedItemset) {
        self.reported += 1;
    }
}

/// Sink that writes one `a b c (support)` line per itemset, with the
/// minimal generators of an association run indented below their closure.
///
/// The reporting seam carries no error channel, so write failures are
/// discarded.
#[derive(Debug)]
pub struct WriteSink<W: io::Write> {
    writer: W,
}

impl<W: io::Write> WriteSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Take the writer back, e.g. to inspect an in-memory buffer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> ResultSink for WriteSink<W> {
    fn report(&mut self, itemset: ReportedItemset) {
        writeln!(self.writer, "{} ({})", itemset.intent, itemset.support).ok();
        for generator in &itemset.minimal_generators {
            writeln!(self.writer, "  generator: {}", generator).ok();
        }
    }

    fn summarize(&mut self, summary: &MiningSummary) {
        writeln!(
            self.writer,
            "# {} itemsets ({} closed)",
            summary.itemsets_found, summary.closed_found
        )
        .ok();
    }
}
