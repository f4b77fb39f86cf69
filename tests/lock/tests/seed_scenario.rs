//! Seed scenario: every discipline on the six-node seed graph, the reversed
//! query, and the deepening graph that separates depth-first from
//! iterative deepening.

use std::sync::Arc;

use lock_tests::fixtures::{deepening_graph, seed_problem};
use pathstep_harness::runner::{run_all, run_one, Problem};
use pathstep_harness::transcript::Transcript;
use pathstep_kernel::heuristic::HeuristicKind;
use pathstep_search::algorithms::{AlgorithmKind, IterativeDeepening};
use pathstep_search::contract::SearchAlgorithm;
use pathstep_search::policy::SearchPolicy;
use pathstep_search::result::TerminationReason;

fn assert_seed_path(kind: AlgorithmKind, heuristic: HeuristicKind) {
    let r = run_one(&seed_problem(), kind, &SearchPolicy::default(), heuristic).unwrap();
    assert_eq!(r.termination, TerminationReason::GoalReached, "{kind}/{heuristic}");
    assert_eq!(r.path_names(), vec!["A", "B", "C", "Goal"], "{kind}/{heuristic}");
    assert!((r.total_cost - 3.0).abs() < 1e-9, "{kind}/{heuristic}: {}", r.total_cost);
    assert_eq!(r.solution_depth, Some(3));
}

// ---------------------------------------------------------------------------
// Forward query
// ---------------------------------------------------------------------------

#[test]
fn bfs_finds_three_hop_route() {
    assert_seed_path(AlgorithmKind::BreadthFirst, HeuristicKind::Zero);
}

#[test]
fn astar_manhattan_finds_cheapest_route() {
    assert_seed_path(AlgorithmKind::AStar, HeuristicKind::Manhattan);
}

#[test]
fn astar_zero_heuristic_finds_cheapest_route() {
    assert_seed_path(AlgorithmKind::AStar, HeuristicKind::Zero);
}

#[test]
fn every_discipline_agrees_on_seed() {
    let results = run_all(&seed_problem(), &SearchPolicy::default(), HeuristicKind::Manhattan)
        .unwrap();
    assert_eq!(results.len(), AlgorithmKind::ALL.len());
    for r in &results {
        assert!(r.is_goal_reached(), "{}", r.algorithm);
        assert_eq!(r.path_names(), vec!["A", "B", "C", "Goal"], "{}", r.algorithm);
        assert!(r.nodes_expanded >= 4, "{} expanded {}", r.algorithm, r.nodes_expanded);
        assert!(r.expansion_digest.as_str().starts_with("sha256:"));
    }
}

#[test]
fn astar_tracks_the_cost_it_reports() {
    let r = run_one(
        &seed_problem(),
        AlgorithmKind::AStar,
        &SearchPolicy::default(),
        HeuristicKind::Manhattan,
    )
    .unwrap();
    let tracked = r.tracked_cost.unwrap();
    assert!((tracked - r.total_cost).abs() < 1e-9);
}

#[test]
fn result_json_shape() {
    let r = run_one(
        &seed_problem(),
        AlgorithmKind::BreadthFirst,
        &SearchPolicy::default(),
        HeuristicKind::Zero,
    )
    .unwrap();
    let v = r.to_json_value();
    assert_eq!(v["algorithm"], "bfs");
    assert_eq!(v["termination"], "goal_reached");
    assert_eq!(v["path"], serde_json::json!(["A", "B", "C", "Goal"]));
    assert_eq!(v["solution_depth"], 3);
    assert_eq!(v["total_cost"], 3.0);
}

// ---------------------------------------------------------------------------
// Reversed query: Goal has no outgoing edges
// ---------------------------------------------------------------------------

#[test]
fn reversed_query_has_no_path() {
    let reversed = seed_problem().reversed();
    let results = run_all(&reversed, &SearchPolicy::default(), HeuristicKind::Manhattan).unwrap();
    for r in &results {
        assert!(!r.is_goal_reached(), "{}", r.algorithm);
        assert!(r.path.is_empty(), "{}", r.algorithm);
        assert!(r.path_ids.is_empty());
        assert!(r.total_cost.is_infinite());
        assert_eq!(r.solution_depth, None);
        assert_eq!(r.solution_depth_or_sentinel(), -1);
        let v = r.to_json_value();
        assert!(v["total_cost"].is_null());
        assert_eq!(v["solution_depth"], -1);
    }
}

#[test]
fn reversed_query_termination_reasons() {
    let reversed = seed_problem().reversed();
    let results = run_all(&reversed, &SearchPolicy::default(), HeuristicKind::Zero).unwrap();
    for r in &results {
        let expected = if r.algorithm == "iddfs" {
            TerminationReason::DepthCapReached { cap: 1000 }
        } else {
            TerminationReason::FrontierExhausted
        };
        assert_eq!(r.termination, expected, "{}", r.algorithm);
    }
}

#[test]
fn reversed_iddfs_stops_early_when_asked() {
    let reversed = seed_problem().reversed();
    let policy = SearchPolicy {
        stop_on_exhausted_pass: true,
        ..SearchPolicy::default()
    };
    let r = run_one(&reversed, AlgorithmKind::IterativeDeepening, &policy, HeuristicKind::Zero)
        .unwrap();
    assert_eq!(r.termination, TerminationReason::FrontierExhausted);
    assert_eq!(r.nodes_expanded, 1);
}

#[test]
fn reversed_iddfs_respects_small_cap() {
    let reversed = seed_problem().reversed();
    let policy = SearchPolicy::from_json(r#"{"max_depth_cap": 3}"#).unwrap();
    let r = run_one(&reversed, AlgorithmKind::IterativeDeepening, &policy, HeuristicKind::Zero)
        .unwrap();
    assert_eq!(r.termination, TerminationReason::DepthCapReached { cap: 3 });
    assert_eq!(r.nodes_expanded, 4, "one expansion per pass at limits 0..=3");
}

// ---------------------------------------------------------------------------
// Depth-first vs iterative deepening
// ---------------------------------------------------------------------------

#[test]
fn dfs_takes_the_deep_route() {
    let problem = Problem::by_name(deepening_graph(), "S", "G").unwrap();
    let r = run_one(&problem, AlgorithmKind::DepthFirst, &SearchPolicy::default(), HeuristicKind::Zero)
        .unwrap();
    assert_eq!(r.path_names(), vec!["S", "X", "Y", "Z", "G"]);
}

#[test]
fn iddfs_takes_the_shallow_route() {
    let problem = Problem::by_name(deepening_graph(), "S", "G").unwrap();
    let transcript = Transcript::new();
    let mut iddfs = IterativeDeepening::new(SearchPolicy::default());
    let r = problem
        .solve(&mut iddfs, Box::new(transcript.observer()))
        .unwrap();
    assert_eq!(r.path_names(), vec!["S", "W", "G"]);
    assert_eq!(r.solution_depth, Some(2));
    assert_eq!(
        transcript.expansion_names(),
        vec!["S", "S", "X", "W", "S", "X", "Y", "W", "G"]
    );
    assert_eq!(r.nodes_expanded, 9);
    assert_eq!(iddfs.metrics().depth_limit, Some(2));
}

#[test]
fn start_equal_to_goal_is_a_zero_cost_path() {
    let graph = deepening_graph();
    let s = graph.node_id("S").unwrap();
    let problem = Problem::new(Arc::clone(&graph), s, s);
    for r in run_all(&problem, &SearchPolicy::default(), HeuristicKind::Zero).unwrap() {
        assert!(r.is_goal_reached(), "{}", r.algorithm);
        assert_eq!(r.path_names(), vec!["S"]);
        assert!(r.total_cost.abs() < 1e-12);
        assert_eq!(r.solution_depth, Some(0));
        assert_eq!(r.nodes_expanded, 1);
    }
}
