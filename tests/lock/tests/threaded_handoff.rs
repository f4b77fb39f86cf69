//! Searches driven on worker threads: channel hand-off of events, step
//! budgets, cancellation, and concurrent runs over one shared graph.

use std::sync::Arc;
use std::thread;

use lock_tests::fixtures::{grid_problem, seed_problem};
use pathstep_harness::channel::{spawn_search, SearchEvent};
use pathstep_harness::runner::{run_one, CancelToken, DriveOutcome, Driver, Problem};
use pathstep_harness::transcript::Transcript;
use pathstep_kernel::heuristic::HeuristicKind;
use pathstep_search::algorithms::AlgorithmKind;
use pathstep_search::policy::SearchPolicy;

fn astar() -> Box<dyn pathstep_search::contract::SearchAlgorithm> {
    AlgorithmKind::AStar.build(SearchPolicy::default(), HeuristicKind::Manhattan)
}

#[test]
fn events_match_the_returned_result() {
    let problem = grid_problem(8, 8, &[(3, 0), (3, 1), (3, 2), (3, 3), (3, 4)]);
    let handle = spawn_search(astar(), &problem, Driver::new()).unwrap();
    let (outcome, events) = handle.finish().unwrap();
    let result = outcome.into_result().unwrap();

    let steps = events
        .iter()
        .filter(|e| matches!(e, SearchEvent::Step(_)))
        .count();
    assert_eq!(u64::try_from(steps).unwrap(), result.nodes_expanded);
    match events.last() {
        Some(SearchEvent::Finished(finished)) => assert!(finished.same_outcome(&result)),
        other => panic!("last event was {other:?}"),
    }
    assert!((result.total_cost - 14.0).abs() < 1e-9);
}

#[test]
fn step_events_carry_increasing_counters() {
    let handle = spawn_search(astar(), &seed_problem(), Driver::new()).unwrap();
    let mut last = 0;
    for event in handle.events() {
        if let SearchEvent::Step(step) = event {
            assert_eq!(step.metrics.nodes_expanded, last + 1);
            last = step.metrics.nodes_expanded;
        }
    }
    assert!(matches!(handle.join().unwrap(), DriveOutcome::Finished(_)));
}

#[test]
fn budgeted_worker_stops_without_finishing() {
    let problem = grid_problem(6, 6, &[]);
    let handle = spawn_search(astar(), &problem, Driver::new().with_step_budget(3)).unwrap();
    let (outcome, events) = handle.finish().unwrap();
    assert!(matches!(outcome, DriveOutcome::BudgetExhausted { steps: 3 }));
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| matches!(e, SearchEvent::Step(_))));
}

#[test]
fn cancelled_worker_never_reports_a_finish() {
    let problem = grid_problem(40, 40, &[]);
    let handle = spawn_search(
        AlgorithmKind::BreadthFirst.build(SearchPolicy::default(), HeuristicKind::Zero),
        &problem,
        Driver::new(),
    )
    .unwrap();
    handle.cancel();
    assert!(handle.cancel_token().is_cancelled());
    let (outcome, events) = handle.finish().unwrap();
    let finishes = events
        .iter()
        .filter(|e| matches!(e, SearchEvent::Finished(_)))
        .count();
    match outcome {
        DriveOutcome::Cancelled { steps } => {
            assert_eq!(finishes, 0);
            assert_eq!(u64::try_from(events.len()).unwrap(), steps);
        }
        // The worker may win the race on a fast machine.
        DriveOutcome::Finished(_) => assert_eq!(finishes, 1),
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn driver_token_can_be_shared_with_a_controller() {
    let problem = grid_problem(5, 5, &[]);
    let token = CancelToken::new();
    let driver = Driver::new().with_cancel(token.clone());
    let mut algo = astar();
    problem
        .initialize(algo.as_mut(), Box::new(pathstep_search::observer::NoopObserver))
        .unwrap();
    let controller = thread::spawn(move || token.cancel());
    controller.join().unwrap();
    assert!(driver.cancel_token().unwrap().is_cancelled());
    assert!(matches!(driver.drive(algo.as_mut()), DriveOutcome::Cancelled { steps: 0 }));
}

#[test]
fn concurrent_runs_share_one_graph() {
    let problem = grid_problem(12, 12, &[(5, 5), (5, 6), (6, 5)]);
    let expected: Vec<_> = AlgorithmKind::ALL
        .iter()
        .map(|&kind| {
            run_one(&problem, kind, &SearchPolicy::default(), HeuristicKind::Manhattan).unwrap()
        })
        .collect();

    let results: Vec<_> = thread::scope(|scope| {
        let workers: Vec<_> = AlgorithmKind::ALL
            .iter()
            .map(|&kind| {
                let p = Problem::new(Arc::clone(&problem.graph), problem.start, problem.goal);
                scope.spawn(move || {
                    run_one(&p, kind, &SearchPolicy::default(), HeuristicKind::Manhattan).unwrap()
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    for (a, b) in expected.iter().zip(&results) {
        assert!(a.same_outcome(b), "{} differs across threads", a.algorithm);
    }
    assert_eq!(Arc::strong_count(&problem.graph), 1);
}

#[test]
fn transcript_collects_across_a_thread_boundary() {
    let transcript = Transcript::new();
    let observer = transcript.observer();
    let problem = seed_problem();
    let worker = thread::spawn(move || {
        let mut algo = AlgorithmKind::BreadthFirst.build(SearchPolicy::default(), HeuristicKind::Zero);
        problem.solve(algo.as_mut(), Box::new(observer)).unwrap()
    });
    let result = worker.join().unwrap();
    assert_eq!(transcript.finish_count(), 1);
    assert_eq!(transcript.expansion_names(), vec!["A", "B", "C", "D", "Goal"]);
    assert!(transcript.result().unwrap().same_outcome(&result));
}
