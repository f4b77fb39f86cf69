//! Iterative deepening work bounds: on an unreachable goal every pass
//! expands each reachable node once, so a run does at most
//! `(cap + 1) * node_count` expansions plus one deepening step per pass.

use std::sync::Arc;

use lock_tests::fixtures::{cell, grid};
use lock_tests::reference::fewest_hops;
use pathstep_harness::runner::Problem;
use pathstep_kernel::graph::Graph;
use pathstep_kernel::node::{Node, NodeId};
use pathstep_search::algorithms::IterativeDeepening;
use pathstep_search::contract::SearchAlgorithm;
use pathstep_search::observer::NoopObserver;
use pathstep_search::policy::SearchPolicy;
use pathstep_search::result::TerminationReason;

/// A `side` x `side` open grid plus an isolated goal node.
fn stranded_goal(side: usize) -> Problem {
    let mut g: Graph = (*grid(side, side, &[])).clone();
    let goal = g.add_node(Node::new("island"));
    let start = g.node_id(&cell(0, 0)).unwrap();
    Problem::new(Arc::new(g), start, goal)
}

/// Expansions a run must do if each pass expands every node within the
/// limit exactly once.
fn expected_expansions(p: &Problem, cap: u32) -> u64 {
    let hops: Vec<u32> = p
        .graph
        .node_ids()
        .filter_map(|id: NodeId| fewest_hops(&p.graph, p.start, id))
        .collect();
    (0..=cap)
        .map(|limit| hops.iter().filter(|&&h| h <= limit).count() as u64)
        .sum()
}

fn drive(p: &Problem, cap: u32) -> (u64, u64) {
    let policy = SearchPolicy {
        max_depth_cap: cap,
        ..SearchPolicy::default()
    };
    let mut iddfs = IterativeDeepening::new(policy);
    iddfs
        .initialize(Arc::clone(&p.graph), p.start, p.goal, Box::new(NoopObserver))
        .unwrap();
    let mut steps = 1;
    while iddfs.step() {
        steps += 1;
    }
    let result = iddfs.result().unwrap();
    assert_eq!(result.termination, TerminationReason::DepthCapReached { cap });
    assert!(result.path.is_empty());
    (result.nodes_expanded, steps)
}

#[test]
fn expansions_stay_within_cap_times_nodes() {
    for side in [4, 8] {
        let p = stranded_goal(side);
        let n = p.graph.len() as u64;
        let cap = u32::try_from(n - 1).unwrap();
        let (expanded, steps) = drive(&p, cap);
        assert!(
            expanded <= u64::from(cap) * n,
            "{side}x{side}: expanded {expanded} > cap {cap} * nodes {n}"
        );
        assert_eq!(expanded, expected_expansions(&p, cap), "{side}x{side}");
        assert_eq!(steps, expanded + u64::from(cap) + 1, "{side}x{side}");
    }
}

#[test]
fn default_cap_run_is_linear_in_passes() {
    let p = stranded_goal(12);
    let cap = SearchPolicy::default().max_depth_cap;
    let (expanded, _) = drive(&p, cap);
    let n = p.graph.len() as u64;
    assert!(expanded <= (u64::from(cap) + 1) * n);
    assert_eq!(expanded, expected_expansions(&p, cap));
}
