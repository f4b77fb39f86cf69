//! Binary that solves the seed problem and a small blocked grid with every
//! discipline and prints deterministic output lines for cross-process
//! verification.
//!
//! Usage: `search_fixture`
//!
//! Output: `key=value` lines. `seed_graph_digest` and `grid_graph_digest`
//! first, then per problem and discipline:
//!   `<problem>.<algorithm>.termination`=goal_reached|...
//!   `<problem>.<algorithm>.path`=A,B,...
//!   `<problem>.<algorithm>.cost`=...
//!   `<problem>.<algorithm>.expanded`=...
//!   `<problem>.<algorithm>.generated`=...
//!   `<problem>.<algorithm>.expansion_digest`=sha256:...
//!
//! Logs go to stderr (`RUST_LOG` controls the filter).

use lock_tests::fixtures::{grid_problem, seed_problem};
use pathstep_harness::logging::init_logging;
use pathstep_harness::runner::{run_all, Problem};
use pathstep_kernel::hash::graph_digest;
use pathstep_kernel::heuristic::HeuristicKind;
use pathstep_search::policy::SearchPolicy;

fn print_runs(label: &str, problem: &Problem, heuristic: HeuristicKind) {
    let results =
        run_all(problem, &SearchPolicy::default(), heuristic).expect("fixture endpoints are valid");
    for r in &results {
        let prefix = format!("{label}.{}", r.algorithm);
        println!("{prefix}.termination={}", r.termination.as_str());
        println!("{prefix}.path={}", r.path_names().join(","));
        println!("{prefix}.cost={}", r.total_cost);
        println!("{prefix}.expanded={}", r.nodes_expanded);
        println!("{prefix}.generated={}", r.nodes_generated);
        println!("{prefix}.expansion_digest={}", r.expansion_digest.as_str());
    }
}

fn main() {
    init_logging();

    let seed = seed_problem();
    let grid = grid_problem(6, 5, &[(2, 0), (2, 1), (2, 2), (4, 4), (4, 3)]);

    println!("seed_graph_digest={}", graph_digest(&seed.graph).as_str());
    println!("grid_graph_digest={}", graph_digest(&grid.graph).as_str());
    print_runs("seed", &seed, HeuristicKind::Manhattan);
    print_runs("grid", &grid, HeuristicKind::Manhattan);
}
