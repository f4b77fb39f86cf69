//! Lifecycle lock tests: stepping by hand and solving in one call agree,
//! instances are reusable, and every run finishes exactly once.

use std::sync::{Arc, Mutex};

use lock_tests::fixtures::{deepening_graph, grid_problem, seed_problem};
use pathstep_harness::runner::Problem;
use pathstep_harness::transcript::Transcript;
use pathstep_kernel::graph::Graph;
use pathstep_kernel::heuristic::HeuristicKind;
use pathstep_kernel::node::NodeId;
use pathstep_search::algorithms::AlgorithmKind;
use pathstep_search::contract::{Phase, SearchAlgorithm};
use pathstep_search::error::SearchError;
use pathstep_search::observer::{NoopObserver, StepEvent};
use pathstep_search::policy::SearchPolicy;
use pathstep_search::result::SearchResult;

fn problems() -> Vec<Problem> {
    let deep = deepening_graph();
    let s = deep.node_id("S").unwrap();
    let g = deep.node_id("G").unwrap();
    vec![
        seed_problem(),
        seed_problem().reversed(),
        Problem::new(deep, s, g),
        grid_problem(5, 4, &[(1, 1), (2, 1), (3, 2)]),
    ]
}

fn build(kind: AlgorithmKind) -> Box<dyn SearchAlgorithm> {
    let policy = SearchPolicy {
        max_depth_cap: 25,
        ..SearchPolicy::default()
    };
    kind.build(policy, HeuristicKind::Manhattan)
}

fn step_to_end(algo: &mut dyn SearchAlgorithm) -> SearchResult {
    let mut guard = 0u32;
    while algo.step() {
        guard += 1;
        assert!(guard < 100_000, "{} did not terminate", algo.name());
    }
    algo.result().cloned().unwrap()
}

#[test]
fn stepping_matches_solving() {
    for p in problems() {
        for kind in AlgorithmKind::ALL {
            let solved = p.solve(build(kind).as_mut(), Box::new(NoopObserver)).unwrap();

            let mut stepped = build(kind);
            p.initialize(stepped.as_mut(), Box::new(NoopObserver)).unwrap();
            let by_hand = step_to_end(stepped.as_mut());

            assert!(
                solved.same_outcome(&by_hand),
                "{kind}: solve and step disagree\n{solved:?}\n{by_hand:?}"
            );
            assert_eq!(solved.expansion_digest, by_hand.expansion_digest);
        }
    }
}

#[test]
fn instances_are_reusable() {
    let seed = seed_problem();
    let reversed = seed.reversed();
    for kind in AlgorithmKind::ALL {
        let mut algo = build(kind);
        let first = seed.solve(algo.as_mut(), Box::new(NoopObserver)).unwrap();
        let other = reversed.solve(algo.as_mut(), Box::new(NoopObserver)).unwrap();
        let again = seed.solve(algo.as_mut(), Box::new(NoopObserver)).unwrap();
        assert!(first.same_outcome(&again), "{kind}: state leaked between runs");
        assert!(!other.is_goal_reached());
    }
}

#[test]
fn reinitializing_mid_run_discards_progress() {
    let seed = seed_problem();
    for kind in AlgorithmKind::ALL {
        let mut algo = build(kind);
        seed.initialize(algo.as_mut(), Box::new(NoopObserver)).unwrap();
        algo.step();
        algo.step();
        seed.initialize(algo.as_mut(), Box::new(NoopObserver)).unwrap();
        assert_eq!(algo.phase(), Phase::Initialized);
        assert_eq!(algo.metrics().nodes_expanded, 0, "{kind}");
        let fresh = seed.solve(build(kind).as_mut(), Box::new(NoopObserver)).unwrap();
        assert!(step_to_end(algo.as_mut()).same_outcome(&fresh), "{kind}");
    }
}

#[test]
fn phases_follow_the_lifecycle() {
    let seed = seed_problem();
    for kind in AlgorithmKind::ALL {
        let mut algo = build(kind);
        assert_eq!(algo.phase(), Phase::Uninitialized);
        assert!(!algo.step(), "{kind}: step before initialize must be a no-op");
        assert_eq!(algo.phase(), Phase::Uninitialized);
        assert!(algo.result().is_none());

        seed.initialize(algo.as_mut(), Box::new(NoopObserver)).unwrap();
        assert_eq!(algo.phase(), Phase::Initialized);
        assert_eq!(algo.metrics().nodes_generated, 1);

        assert!(algo.step());
        assert_eq!(algo.phase(), Phase::Stepping);

        let result = step_to_end(algo.as_mut());
        assert_eq!(algo.phase(), Phase::Finished);
        assert!(algo.is_finished());
        assert!(!algo.step(), "{kind}: step after finish must be a no-op");
        assert!(algo.result().unwrap().same_outcome(&result));
    }
}

#[test]
fn failed_initialize_leaves_instance_uninitialized() {
    let seed = seed_problem();
    for kind in AlgorithmKind::ALL {
        let mut algo = build(kind);
        seed.solve(algo.as_mut(), Box::new(NoopObserver)).unwrap();
        let err = algo
            .initialize(Arc::clone(&seed.graph), seed.start, NodeId::new(404), Box::new(NoopObserver))
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidEndpoint { role: "goal", .. }));
        assert_eq!(algo.phase(), Phase::Uninitialized, "{kind}");
        assert!(algo.result().is_none());

        let err = algo
            .solve(Arc::clone(&seed.graph), NodeId::new(404), seed.goal, Box::new(NoopObserver))
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidEndpoint { role: "start", .. }));
    }
}

#[test]
fn exactly_one_finish_per_run() {
    for p in problems() {
        for kind in AlgorithmKind::ALL {
            let transcript = Transcript::new();
            let mut algo = build(kind);
            p.initialize(algo.as_mut(), Box::new(transcript.observer())).unwrap();
            let result = step_to_end(algo.as_mut());
            for _ in 0..3 {
                algo.step();
            }
            assert_eq!(transcript.finish_count(), 1, "{kind}");
            assert_eq!(
                u64::try_from(transcript.step_count()).unwrap(),
                result.nodes_expanded,
                "{kind}: one step event per expansion"
            );
            assert!(transcript.result().unwrap().same_outcome(&result));
        }
    }
}

#[test]
fn closure_observers_see_growing_metrics() {
    let seen: Arc<Mutex<Vec<u64>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let observer = move |_graph: &Graph, event: &StepEvent| {
        sink.lock().unwrap().push(event.metrics.nodes_expanded);
    };
    let seed = seed_problem();
    let mut algo = build(AlgorithmKind::AStar);
    let result = seed.solve(algo.as_mut(), Box::new(observer)).unwrap();
    let seen = seen.lock().unwrap();
    let expected: Vec<u64> = (1..=result.nodes_expanded).collect();
    assert_eq!(*seen, expected);
}

#[test]
fn disabled_snapshots_leave_events_empty() {
    let policy = SearchPolicy {
        capture_snapshots: false,
        ..SearchPolicy::default()
    };
    let transcript = Transcript::new();
    let seed = seed_problem();
    for kind in AlgorithmKind::ALL {
        let mut algo = kind.build(policy.clone(), HeuristicKind::Manhattan);
        seed.solve(algo.as_mut(), Box::new(transcript.observer())).unwrap();
    }
    assert!(transcript.step_count() > 0);
    for step in transcript.steps() {
        assert!(step.frontier.is_empty());
        assert_eq!(step.explored_len, 0);
    }
}
