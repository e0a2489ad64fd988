// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! End-to-end scenario tests for the mining driver.
//!
//! These tests validate that the miner correctly:
//! - Enumerates frequent itemsets exactly once, in deterministic order
//! - Folds non-closed itemsets into their closures
//! - Prunes non-generators and reports every minimal generator
//! - Links closed itemsets to their minimal generators in the association task
//! - Produces identical output on tidset and diffset extents
//!
//! The fixed dataset is the five-transaction one from common (A=1, C=2, D=3,
//! T=4, W=5); expected outputs and counter values are worked out by hand.

mod common;

use common::{attrs, options, reported, run, zaki_dataset, Reference};
use itemset_search::itemset::AttributeSet;
use itemset_search::miner::{ChildOrder, Counters, Miner, MinerTask, WriteSink};
use itemset_search::search::ExtentShape;
use std::collections::BTreeSet;

#[test]
fn test_frequent_scenario_exact_order() {
    let (miner, sink) = run(zaki_dataset(), options(3, MinerTask::Frequent));

    // C and W occur in all five transactions, so the empty itemset leads.
    // Then one depth-first subtree per level-1 member, cheapest first.
    let expected = vec![
        (attrs(&[]), 5),
        (attrs(&[3]), 3),
        (attrs(&[2, 3]), 3),
        (attrs(&[2, 3, 5]), 3),
        (attrs(&[3, 5]), 3),
        (attrs(&[4]), 3),
        (attrs(&[1, 4]), 3),
        (attrs(&[1, 2, 4]), 3),
        (attrs(&[1, 2, 4, 5]), 3),
        (attrs(&[1, 4, 5]), 3),
        (attrs(&[2, 4]), 3),
        (attrs(&[2, 4, 5]), 3),
        (attrs(&[4, 5]), 3),
        (attrs(&[1]), 4),
        (attrs(&[1, 2]), 4),
        (attrs(&[1, 2, 5]), 4),
        (attrs(&[1, 5]), 4),
        (attrs(&[2]), 5),
        (attrs(&[2, 5]), 5),
        (attrs(&[5]), 5),
    ];
    assert_eq!(reported(&sink), expected);
    assert_eq!(miner.summary().itemsets_found, 20);
    assert_eq!(miner.summary().closed_found, 0);
}

#[test]
fn test_frequent_scenario_matches_reference() {
    let db = zaki_dataset();
    let oracle = Reference::new(&db);
    let (_, sink) = run(db, options(3, MinerTask::Frequent));

    let mined: BTreeSet<(AttributeSet, u32)> = reported(&sink).into_iter().collect();
    assert_eq!(mined, oracle.frequent(3));
}

#[test]
fn test_closed_scenario() {
    let (miner, sink) = run(zaki_dataset(), options(3, MinerTask::Closed));

    // {C} folds into {C,W}; {D} closes to {C,D,W}; {T} to {A,C,T,W}; {A} to
    // {A,C,W}. Nothing else survives as a distinct closure.
    let expected = vec![
        (attrs(&[2, 3, 5]), 3),
        (attrs(&[1, 2, 4, 5]), 3),
        (attrs(&[1, 2, 5]), 4),
        (attrs(&[2, 5]), 5),
    ];
    assert_eq!(reported(&sink), expected);
    assert!(sink.itemsets.iter().all(|item| item.closed));
    assert!(sink
        .itemsets
        .iter()
        .all(|item| item.intent != attrs(&[2]))); // {C} is not closed
    assert_eq!(miner.summary().itemsets_found, 4);
    assert_eq!(miner.summary().closed_found, 4);
}

#[test]
fn test_closed_scenario_statistics() {
    let (miner, _) = run(zaki_dataset(), options(3, MinerTask::Closed));
    let stats = miner.statistics();

    // Every join on this dataset either fails the pair filter (D-T, D-A) or
    // matches the extending member's support and folds into its closure, so
    // the five level-1 nodes are the only nodes ever created.
    assert_eq!(stats.get(Counters::NodesCreated), 5);
    assert_eq!(stats.get(Counters::PairSupportRejections), 2);
    assert_eq!(stats.get(Counters::ClosurePropagations), 8);
    assert_eq!(stats.get(Counters::PartnersAbsorbed), 1); // W, into C
    assert_eq!(stats.get(Counters::ContainersPushed), 1);
    assert_eq!(stats.get(Counters::SubsumptionRejections), 0);
}

#[test]
fn test_generators_scenario() {
    let (miner, sink) = run(zaki_dataset(), options(3, MinerTask::Generators));

    // Every frequent pair matches one of its parents' supports, so the
    // generators are the empty itemset and the five singletons.
    let expected = vec![
        (attrs(&[]), 5),
        (attrs(&[3]), 3),
        (attrs(&[4]), 3),
        (attrs(&[1]), 4),
        (attrs(&[2]), 5),
        (attrs(&[5]), 5),
    ];
    assert_eq!(reported(&sink), expected);
    assert!(sink.itemsets.iter().all(|item| item.generator));
    assert_eq!(miner.summary().itemsets_found, 6);
    assert_eq!(miner.summary().closed_found, 0);
    assert_eq!(
        miner.statistics().get(Counters::ParentSupportRejections),
        8
    );
}

#[test]
fn test_generators_scenario_matches_reference() {
    let db = zaki_dataset();
    let oracle = Reference::new(&db);
    let (_, sink) = run(db, options(3, MinerTask::Generators));

    let mined: BTreeSet<(AttributeSet, u32)> = reported(&sink).into_iter().collect();
    assert_eq!(mined, oracle.generators(3));
}

#[test]
fn test_association_scenario() {
    let (miner, sink) = run(zaki_dataset(), options(3, MinerTask::ClosedWithGenerators));

    // Closed itemsets in trie order, each with its minimal generators.
    assert_eq!(sink.itemsets.len(), 4);

    assert_eq!(sink.itemsets[0].intent, attrs(&[1, 2, 4, 5]));
    assert_eq!(sink.itemsets[0].support, 3);
    assert_eq!(sink.itemsets[0].minimal_generators, vec![attrs(&[4])]);

    assert_eq!(sink.itemsets[1].intent, attrs(&[1, 2, 5]));
    assert_eq!(sink.itemsets[1].support, 4);
    assert_eq!(sink.itemsets[1].minimal_generators, vec![attrs(&[1])]);

    assert_eq!(sink.itemsets[2].intent, attrs(&[2, 3, 5]));
    assert_eq!(sink.itemsets[2].support, 3);
    assert_eq!(sink.itemsets[2].minimal_generators, vec![attrs(&[3])]);

    assert_eq!(sink.itemsets[3].intent, attrs(&[2, 5]));
    assert_eq!(sink.itemsets[3].support, 5);
    assert_eq!(
        sink.itemsets[3].minimal_generators,
        vec![AttributeSet::empty(), attrs(&[2]), attrs(&[5])]
    );

    assert!(sink.itemsets.iter().all(|item| item.closed));
    // No closed itemset of this dataset is its own minimal generator.
    assert!(sink.itemsets.iter().all(|item| !item.generator));
    assert_eq!(miner.summary().itemsets_found, 4);
    assert_eq!(miner.summary().closed_found, 4);
}

#[test]
fn test_diffsets_match_tidsets() {
    for task in [
        MinerTask::Frequent,
        MinerTask::Closed,
        MinerTask::Generators,
        MinerTask::ClosedWithGenerators,
    ] {
        let (tid_miner, tid_sink) = run(zaki_dataset(), options(3, task));

        let mut diff_options = options(3, task);
        diff_options.shape = ExtentShape::Diffsets;
        let (diff_miner, diff_sink) = run(zaki_dataset(), diff_options);

        assert_eq!(reported(&tid_sink), reported(&diff_sink), "task {}", task);
        assert_eq!(tid_miner.summary(), diff_miner.summary(), "task {}", task);
    }
}

#[test]
fn test_descending_order_reports_the_same_sets() {
    for task in [
        MinerTask::Frequent,
        MinerTask::Closed,
        MinerTask::Generators,
    ] {
        let (_, ascending) = run(zaki_dataset(), options(3, task));

        let mut descending_options = options(3, task);
        descending_options.order = ChildOrder::DescendingSupport;
        let (_, descending) = run(zaki_dataset(), descending_options);

        let a: BTreeSet<(AttributeSet, u32)> = reported(&ascending).into_iter().collect();
        let d: BTreeSet<(AttributeSet, u32)> = reported(&descending).into_iter().collect();
        assert_eq!(a, d, "task {}", task);
    }
}

#[test]
fn test_pair_matrix_prunes_without_changing_output() {
    let (with_miner, with_sink) = run(zaki_dataset(), options(3, MinerTask::Frequent));

    let mut no_matrix = options(3, MinerTask::Frequent);
    no_matrix.use_pair_supports = false;
    let (without_miner, without_sink) = run(zaki_dataset(), no_matrix);

    assert_eq!(reported(&with_sink), reported(&without_sink));

    // D-T and D-A are the two infrequent pairs; with the matrix they are
    // rejected before any tidset intersection.
    let with_stats = with_miner.statistics();
    assert_eq!(with_stats.get(Counters::PairSupportRejections), 2);
    assert_eq!(with_stats.get(Counters::SupportRejections), 0);
    assert_eq!(with_stats.get(Counters::NodesCreated), 19);

    let without_stats = without_miner.statistics();
    assert_eq!(without_stats.get(Counters::PairSupportRejections), 0);
    assert_eq!(without_stats.get(Counters::SupportRejections), 2);
    assert_eq!(without_stats.get(Counters::NodesCreated), 19);
}

#[test]
fn test_traversal_frees_exhausted_subtrees() {
    let (miner, _) = run(zaki_dataset(), options(3, MinerTask::Frequent));
    let stats = miner.statistics();

    // Peak live nodes is the deepest root-to-frontier path (the T subtree),
    // not the 19 nodes created over the whole run.
    assert_eq!(stats.get(Counters::PeakLiveNodes), 11);
    assert_eq!(stats.get(Counters::ContainersPushed), 10);
}

#[test]
fn test_repeat_runs_are_identical() {
    let (_, first) = run(zaki_dataset(), options(3, MinerTask::Frequent));
    let (_, second) = run(zaki_dataset(), options(3, MinerTask::Frequent));
    assert_eq!(reported(&first), reported(&second));
}

#[test]
fn test_write_sink_end_to_end() {
    let mut sink = WriteSink::new(Vec::new());
    let miner = Miner::new(zaki_dataset(), options(3, MinerTask::Closed)).unwrap();
    miner.start(&mut sink);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "2 3 5 (3)",
            "1 2 4 5 (3)",
            "1 2 5 (4)",
            "2 5 (5)",
            "# 4 itemsets (4 closed)",
        ]
    );
}

#[test]
fn test_association_write_sink_lists_generators() {
    let mut sink = WriteSink::new(Vec::new());
    let miner = Miner::new(zaki_dataset(), options(3, MinerTask::ClosedWithGenerators)).unwrap();
    miner.start(&mut sink);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "1 2 4 5 (3)",
            "  generator: 4",
            "1 2 5 (4)",
            "  generator: 1",
            "2 3 5 (3)",
            "  generator: 3",
            "2 5 (5)",
            "  generator: {}",
            "  generator: 2",
            "  generator: 5",
            "# 4 itemsets (4 closed)",
        ]
    );
}

#[test]
fn test_count_sink_collects_nothing() {
    let mut sink = itemset_search::miner::CountSink::new();
    let miner = Miner::new(zaki_dataset(), options(3, MinerTask::Frequent)).unwrap();
    let miner = miner.start(&mut sink);
    assert_eq!(sink.reported, 20);
    assert_eq!(miner.summary().itemsets_found, 20);
}

#[test]
fn test_collect_sink_reference_cross_check_closed() {
    let db = zaki_dataset();
    let oracle = Reference::new(&db);
    let (_, sink) = run(db, options(3, MinerTask::Closed));

    let mined: BTreeSet<(AttributeSet, u32)> = reported(&sink).into_iter().collect();
    assert_eq!(mined, oracle.closed(3));
}

#[test]
fn test_min_support_four_shrinks_the_lattice() {
    // At min_support 4, D and T drop out at level 1 and only the A/C/W
    // corner of the lattice remains.
    let (_, sink) = run(zaki_dataset(), options(4, MinerTask::Frequent));
    let expected = vec![
        (attrs(&[]), 5),
        (attrs(&[1]), 4),
        (attrs(&[1, 2]), 4),
        (attrs(&[1, 2, 5]), 4),
        (attrs(&[1, 5]), 4),
        (attrs(&[2]), 5),
        (attrs(&[2, 5]), 5),
        (attrs(&[5]), 5),
    ];
    assert_eq!(reported(&sink), expected);

    let (_, closed_sink) = run(zaki_dataset(), options(4, MinerTask::Closed));
    let closed: Vec<(AttributeSet, u32)> = reported(&closed_sink);
    assert_eq!(closed, vec![(attrs(&[1, 2, 5]), 4), (attrs(&[2, 5]), 5)]);
}
