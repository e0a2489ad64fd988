// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mining driver.
//!
//! The miner owns one run end to end: it validates the configuration,
//! stages the transaction database into vertical form, drives a
//! depth-first traversal of the candidate space under the selected policy,
//! and streams accepted itemsets into a [`ResultSink`].
//!
//! # Architecture
//!
//! The traversal uses an explicit stack of [`Frame`]s instead of recursion.
//! Each frame is one sibling container in the arena; each step visits one
//! member of the top frame:
//!
//! 1. Join the member with each of its later siblings, in container order,
//!    keeping the candidates the policy accepts as the member's children
//! 2. Report the member (or, for generators, report candidates as they are
//!    accepted)
//! 3. Sort the children by support and push them as a new frame
//!
//! When a frame's cursor is exhausted the frame pops and the arena is
//! truncated back to the container's start, freeing the whole subtree in
//! one move. Peak memory is therefore the root-to-frontier path plus one
//! sibling level, never the full candidate space.
//!
//! Frequent and closed mining visit members first-to-last; generator mining
//! visits last-to-first (reverse pre-order), so that every accepted subset
//! is in the subsumption hash before any of its supersets is checked.
//!
//! # Example
//!
//! ```
//! use itemset_search::database::HorizontalDatabase;
//! use itemset_search::miner::{CollectSink, Miner, MinerOptions, MinerTask};
//!
//! let db = HorizontalDatabase::from_rows(&[&[1, 2], &[1, 2, 3], &[2, 3]]);
//! let mut options = MinerOptions::new(2, MinerTask::Closed);
//! options.quiet = true;
//!
//! let mut sink = CollectSink::new();
//! let miner = Miner::new(db, options).unwrap().start(&mut sink);
//!
//! assert_eq!(miner.summary().closed_found, 3);
//! assert_eq!(sink.itemsets.len(), 3);
//! ```

pub mod options;
pub mod sink;
pub mod statistics;

pub use options::{ChildOrder, MinerOptions, MinerTask};
pub use sink::{CollectSink, CountSink, MiningSummary, ReportedItemset, ResultSink, WriteSink};
pub use statistics::{Counters, Statistics};

use crate::database::{HorizontalDatabase, VerticalDatabase};
use crate::error::{Error, Result};
use crate::index::{ItemsetTrie, SubsumptionHash};
use crate::itemset::{Attribute, AttributeSet, Tidset};
use crate::search::{join_into, join_tid_sum, NodeArena, SearchNode};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Range;

/// One suspended sibling container on the search stack.
#[derive(Debug)]
struct Frame {
    /// Arena range holding the container's members.
    container: Range<usize>,

    /// Members visited so far, counted in traversal direction.
    cursor: usize,
}

/// Which single traversal to run; the association task runs two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Frequent,
    Closed,
    Generators,
}

/// The active policy of a pass, holding the state only it needs.
enum Policy {
    Frequent,
    Closed { hash: SubsumptionHash },
    Generators { hash: SubsumptionHash },
}

/// Totals produced by one pass.
#[derive(Debug, Clone, Copy, Default)]
struct PassOutcome {
    itemsets: u64,
    closed: u64,
}

/// Per-itemset payload the association task collects into its tries.
#[derive(Debug, Clone)]
struct PhaseRecord {
    support: u32,
    closed: bool,
    generator: bool,
}

/// A single mining run over one transaction database.
///
/// A miner is constructed with its database and options, started exactly
/// once, and afterwards answers for the run's totals. There is no shared or
/// process-wide state: concurrent runs are as independent as their miners.
#[derive(Debug)]
pub struct Miner {
    options: MinerOptions,
    horizontal: HorizontalDatabase,
    statistics: Statistics,
    summary: MiningSummary,
    finished: bool,
}

impl Miner {
    /// Create a miner for `database` under `options`.
    ///
    /// All configuration checking happens here, before any search: a
    /// minimum support of zero, or one exceeding the transaction count, is
    /// rejected. `start` itself cannot fail.
    ///
    /// # Example
    ///
    /// ```
    /// use itemset_search::database::HorizontalDatabase;
    /// use itemset_search::miner::{Miner, MinerOptions, MinerTask};
    ///
    /// let empty = HorizontalDatabase::new();
    /// assert!(Miner::new(empty, MinerOptions::new(1, MinerTask::Frequent)).is_err());
    /// ```
    pub fn new(database: HorizontalDatabase, options: MinerOptions) -> Result<Self> {
        if options.min_support == 0 {
            return Err(Error::ZeroMinSupport);
        }
        if options.min_support > database.transaction_count() {
            return Err(Error::SupportExceedsTransactions {
                min_support: options.min_support,
                transactions: database.transaction_count(),
            });
        }
        Ok(Self {
            options,
            horizontal: database,
            statistics: Statistics::new(),
            summary: MiningSummary::default(),
            finished: false,
        })
    }

    /// Run the search to exhaustion, streaming results into `sink`.
    ///
    /// Consumes the miner and returns it finished, so the run's
    /// [`summary`](Self::summary) and [`statistics`](Self::statistics)
    /// remain queryable. The summary is also pushed to the sink.
    ///
    /// # Panics
    ///
    /// Panics if called on a miner that has already been started.
    pub fn start(mut self, sink: &mut dyn ResultSink) -> Miner {
        assert!(!self.finished, "Miner already started");
        self.finished = true;

        let horizontal = std::mem::take(&mut self.horizontal);
        if !self.options.quiet {
            eprintln!(
                "[Miner] Staging {} transactions for {} mining (min support {})...",
                horizontal.transaction_count(),
                self.options.task,
                self.options.min_support
            );
        }
        let staged = VerticalDatabase::stage(horizontal, self.options.use_pair_supports);
        if !self.options.quiet {
            eprintln!(
                "[Miner] Staged {} attribute columns over {} transactions",
                staged.attribute_count(),
                staged.transactions()
            );
        }

        let outcome = match self.options.task {
            MinerTask::Frequent => {
                self.run_pass(Pass::Frequent, staged, &mut |item| sink.report(item))
            }
            MinerTask::Closed => self.run_pass(Pass::Closed, staged, &mut |item| sink.report(item)),
            MinerTask::Generators => {
                self.run_pass(Pass::Generators, staged, &mut |item| sink.report(item))
            }
            MinerTask::ClosedWithGenerators => self.run_association(staged, sink),
        };

        self.summary = MiningSummary {
            itemsets_found: outcome.itemsets,
            closed_found: outcome.closed,
        };
        sink.summarize(&self.summary);
        if !self.options.quiet {
            eprintln!(
                "[Miner] Completed: {} itemsets found ({} closed)",
                self.summary.itemsets_found, self.summary.closed_found
            );
        }
        self
    }

    /// Totals of the completed run; zeros before `start`.
    pub fn summary(&self) -> MiningSummary {
        self.summary
    }

    /// Counters accumulated by the run.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// The sibling order within a container: by support, ties broken by the
    /// first differing attribute, so output order is a pure function of the
    /// input data.
    fn sibling_order(order: ChildOrder, a: &SearchNode, b: &SearchNode) -> Ordering {
        let ascending = a
            .support
            .cmp(&b.support)
            .then_with(|| a.intent.cmp(&b.intent));
        match order {
            ChildOrder::AscendingSupport => ascending,
            ChildOrder::DescendingSupport => ascending.reverse(),
        }
    }

    /// Run one traversal of the candidate space, streaming each accepted
    /// itemset into `report`.
    fn run_pass(
        &mut self,
        pass: Pass,
        mut vertical: VerticalDatabase,
        report: &mut dyn FnMut(ReportedItemset),
    ) -> PassOutcome {
        let min_support = self.options.min_support;
        let shape = self.options.shape;
        let transactions = vertical.transactions();
        let mut pair_supports = vertical.take_pair_supports();
        let mut outcome = PassOutcome::default();

        let mut policy = match pass {
            Pass::Frequent => Policy::Frequent,
            Pass::Closed => Policy::Closed {
                hash: SubsumptionHash::with_default_size(),
            },
            Pass::Generators => Policy::Generators {
                hash: SubsumptionHash::with_default_size(),
            },
        };

        // Level-1 initialization. The vertical database is consumed here:
        // each frequent attribute's tidset moves into its node.
        let mut full_extent_attribute = false;
        let mut level1: Vec<(Attribute, SearchNode)> = Vec::new();
        for column in vertical.into_columns() {
            if column.tids.len() == transactions {
                full_extent_attribute = true;
            }
            if column.tids.len() >= min_support {
                let attribute = column.attribute;
                level1.push((attribute, SearchNode::level1(attribute, column.tids)));
                self.statistics.increment_counter(Counters::NodesCreated);
            } else {
                self.statistics.increment_counter(Counters::SupportRejections);
            }
        }
        level1.sort_by(|(_, a), (_, b)| Self::sibling_order(self.options.order, a, b));
        // The attribute whose tidset is each root member's extent, for the
        // pair-support shortcut. Intents can grow under closure propagation;
        // extents cannot.
        let seeds: Vec<Attribute> = level1.iter().map(|(attribute, _)| *attribute).collect();
        let nodes: Vec<SearchNode> = level1.into_iter().map(|(_, node)| node).collect();

        // The empty itemset qualifies exactly when some attribute occurs in
        // every transaction; the root's own extent is never materialized.
        if full_extent_attribute && pass != Pass::Closed {
            let mut item = ReportedItemset::plain(AttributeSet::empty(), transactions);
            item.generator = pass == Pass::Generators;
            report(item);
            self.statistics.increment_counter(Counters::ItemsetsReported);
            outcome.itemsets += 1;
        }

        // Level-1 generator acceptance is unconditional: no member is ever
        // compared against the root. Accepted generators enter the hash and
        // are reported at acceptance.
        if let Policy::Generators { hash } = &mut policy {
            for node in &nodes {
                hash.replace(node.intent.clone(), node.support, node.tid_sum);
                let mut item = ReportedItemset::plain(node.intent.clone(), node.support);
                item.generator = true;
                report(item);
                self.statistics.increment_counter(Counters::ItemsetsReported);
                outcome.itemsets += 1;
            }
        }

        let mut arena = NodeArena::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut scratch = Tidset::empty(transactions);
        let reverse = pass == Pass::Generators;

        let root = arena.push_container(nodes);
        if !root.is_empty() {
            self.statistics.increment_counter(Counters::ContainersPushed);
            self.statistics
                .record_max(Counters::PeakLiveNodes, arena.len() as u64);
            stack.push(Frame {
                container: root,
                cursor: 0,
            });
        }

        // Main traversal loop: one member visit per iteration.
        while let Some(frame) = stack.last_mut() {
            let width = frame.container.end - frame.container.start;
            if frame.cursor >= width {
                // Container spent: free it and everything above it.
                let mark = frame.container.start;
                stack.pop();
                arena.truncate(mark);
                continue;
            }
            let container = frame.container.clone();
            let position = frame.cursor;
            frame.cursor += 1;
            let spent_after = frame.cursor >= width;
            let at_root = stack.len() == 1;
            // Once the last level-1 member has been extended the pair
            // matrix has no further use.
            let exhausts_root = at_root && spent_after;
            let index = if reverse {
                container.end - 1 - position
            } else {
                container.start + position
            };

            if arena.node(index).absorbed {
                if exhausts_root {
                    pair_supports = None;
                }
                continue;
            }

            // Generate children from later siblings. The join structure is
            // fixed by container order; traversal direction only decides
            // visit order.
            let mut children: Vec<SearchNode> = Vec::new();
            for partner in index + 1..container.end {
                if arena.node(partner).absorbed {
                    continue;
                }
                if let Some(matrix) = pair_supports.as_ref() {
                    if arena.node(index).level == 1 {
                        let a = seeds[index - container.start];
                        let b = seeds[partner - container.start];
                        if matrix.support_of(a, b) < min_support {
                            self.statistics
                                .increment_counter(Counters::PairSupportRejections);
                            continue;
                        }
                    }
                }
                let support = join_into(arena.node(index), arena.node(partner), shape, &mut scratch);
                if support < min_support {
                    self.statistics.increment_counter(Counters::SupportRejections);
                    continue;
                }
                match &mut policy {
                    Policy::Frequent => {
                        let mut intent = arena.node(index).intent.clone();
                        intent.union_with(&arena.node(partner).intent);
                        children.push(SearchNode::joined(
                            intent,
                            arena.node(index),
                            shape,
                            support,
                            &scratch,
                        ));
                        self.statistics.increment_counter(Counters::NodesCreated);
                    }
                    Policy::Closed { .. } => {
                        let equals_member = support == arena.node(index).support;
                        let equals_partner = support == arena.node(partner).support;
                        if equals_member {
                            // The member's extent lies inside the partner's,
                            // so its closure gains the partner's attributes.
                            // Children generated so far gain them too.
                            let partner_intent = arena.node(partner).intent.clone();
                            arena.node_mut(index).intent.union_with(&partner_intent);
                            for child in &mut children {
                                child.intent.union_with(&partner_intent);
                            }
                            if equals_partner {
                                arena.node_mut(partner).absorbed = true;
                                self.statistics.increment_counter(Counters::PartnersAbsorbed);
                            }
                            self.statistics
                                .increment_counter(Counters::ClosurePropagations);
                            continue;
                        }
                        let mut intent = arena.node(index).intent.clone();
                        intent.union_with(&arena.node(partner).intent);
                        if equals_partner {
                            // The partner's extent lies inside the member's:
                            // the child carries everything the partner would.
                            arena.node_mut(partner).absorbed = true;
                            self.statistics.increment_counter(Counters::PartnersAbsorbed);
                        }
                        children.push(SearchNode::joined(
                            intent,
                            arena.node(index),
                            shape,
                            support,
                            &scratch,
                        ));
                        self.statistics.increment_counter(Counters::NodesCreated);
                    }
                    Policy::Generators { hash } => {
                        if support == arena.node(index).support
                            || support == arena.node(partner).support
                        {
                            // A parent is an equal-support proper subset, so
                            // the candidate is no generator; neither is any
                            // of its supersets.
                            self.statistics
                                .increment_counter(Counters::ParentSupportRejections);
                            continue;
                        }
                        let mut intent = arena.node(index).intent.clone();
                        intent.union_with(&arena.node(partner).intent);
                        let tid_sum = join_tid_sum(arena.node(index), shape, &scratch);
                        if hash.contains_subset_of(&intent, support, tid_sum) {
                            self.statistics
                                .increment_counter(Counters::SubsumptionRejections);
                            continue;
                        }
                        hash.replace(intent.clone(), support, tid_sum);
                        let mut item = ReportedItemset::plain(intent.clone(), support);
                        item.generator = true;
                        report(item);
                        self.statistics.increment_counter(Counters::ItemsetsReported);
                        outcome.itemsets += 1;
                        children.push(SearchNode::joined(
                            intent,
                            arena.node(index),
                            shape,
                            support,
                            &scratch,
                        ));
                        self.statistics.increment_counter(Counters::NodesCreated);
                    }
                }
            }

            // Visit-time reporting. Closure propagation for this member is
            // complete, so its intent is final.
            match &mut policy {
                Policy::Frequent => {
                    let node = arena.node(index);
                    report(ReportedItemset::plain(node.intent.clone(), node.support));
                    self.statistics.increment_counter(Counters::ItemsetsReported);
                    outcome.itemsets += 1;
                }
                Policy::Closed { hash } => {
                    let node = arena.node(index);
                    if hash.contains_superset_of(&node.intent, node.support, node.tid_sum) {
                        // The same closure was already reported from another
                        // branch.
                        self.statistics
                            .increment_counter(Counters::SubsumptionRejections);
                    } else {
                        hash.add(node.intent.clone(), node.support, node.tid_sum);
                        let mut item = ReportedItemset::plain(node.intent.clone(), node.support);
                        item.closed = true;
                        report(item);
                        self.statistics.increment_counter(Counters::ItemsetsReported);
                        outcome.itemsets += 1;
                        outcome.closed += 1;
                    }
                }
                Policy::Generators { .. } => {}
            }

            if exhausts_root {
                pair_supports = None;
            }

            if !children.is_empty() {
                children.sort_by(|a, b| Self::sibling_order(self.options.order, a, b));
                let range = arena.push_container(children);
                self.statistics.increment_counter(Counters::ContainersPushed);
                self.statistics
                    .record_max(Counters::PeakLiveNodes, arena.len() as u64);
                stack.push(Frame {
                    container: range,
                    cursor: 0,
                });
            }
        }

        outcome
    }

    /// The association task: a closed pass and a generator pass over the
    /// same staged database, unified through a merged trie that links every
    /// generator to its closure.
    fn run_association(
        &mut self,
        staged: VerticalDatabase,
        sink: &mut dyn ResultSink,
    ) -> PassOutcome {
        let second = staged.clone();

        let mut merged: ItemsetTrie<PhaseRecord> = ItemsetTrie::new();
        self.run_pass(Pass::Closed, staged, &mut |item| {
            merged.insert(
                &item.intent,
                PhaseRecord {
                    support: item.support,
                    closed: true,
                    generator: false,
                },
            );
        });

        let mut generators: ItemsetTrie<PhaseRecord> = ItemsetTrie::new();
        self.run_pass(Pass::Generators, second, &mut |item| {
            generators.insert(
                &item.intent,
                PhaseRecord {
                    support: item.support,
                    closed: false,
                    generator: true,
                },
            );
        });

        // An itemset can be both closed and a generator; merging keeps one
        // record carrying both flags.
        merged.merge(generators, |existing, incoming| PhaseRecord {
            support: existing.support,
            closed: existing.closed || incoming.closed,
            generator: existing.generator || incoming.generator,
        });

        // Link each generator to its closure: the smallest closed superset
        // with the same support.
        let mut links: BTreeMap<AttributeSet, Vec<AttributeSet>> = BTreeMap::new();
        merged.for_each(|intent, record| {
            if record.generator {
                let closure = merged
                    .min_superset_of(intent, |p| p.closed && p.support == record.support);
                if let Some((closure_intent, _)) = closure {
                    links.entry(closure_intent).or_default().push(intent.clone());
                }
            }
        });

        // Report each closed itemset once, in trie order, with its minimal
        // generators attached.
        let mut outcome = PassOutcome::default();
        merged.for_each(|intent, record| {
            if record.closed {
                sink.report(ReportedItemset {
                    intent: intent.clone(),
                    support: record.support,
                    closed: true,
                    generator: record.generator,
                    minimal_generators: links.remove(intent).unwrap_or_default(),
                });
                self.statistics.increment_counter(Counters::ItemsetsReported);
                outcome.itemsets += 1;
                outcome.closed += 1;
            }
        });

        outcome
    }
}
