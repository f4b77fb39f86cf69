//! Shared helpers for pathstep benchmark suites.
//!
//! A [`Regime`] is a named start/goal query on a generated grid, chosen to
//! stress one aspect of the engine: open space (frontier growth), a
//! serpentine maze (long paths), a walled-off goal (exhaustion), and a
//! split grid where greedy and A* diverge.

use std::sync::Arc;

use pathstep_harness::runner::Problem;
use pathstep_kernel::graph::Graph;
use pathstep_kernel::node::Node;

/// A named benchmark query.
pub struct Regime {
    pub name: &'static str,
    pub problem: Problem,
}

fn cell_name(col: usize, row: usize) -> String {
    format!("r{row}c{col}")
}

/// 4-connected unit-cost grid with the cells for which `wall` returns
/// `true` marked blocked and left unconnected.
///
/// # Panics
///
/// Panics if `width` or `height` is zero.
#[allow(clippy::cast_precision_loss)]
pub fn grid_with(width: usize, height: usize, wall: impl Fn(usize, usize) -> bool) -> Problem {
    assert!(width > 0 && height > 0, "grid needs at least one cell");
    let node = |col: usize, row: usize| {
        Node::builder(cell_name(col, row))
            .coords(col as f64, row as f64)
            .blocked(wall(col, row))
            .build()
    };
    let mut g = Graph::new();
    for row in 0..height {
        for col in 0..width {
            g.add_node(node(col, row));
        }
    }
    for row in 0..height {
        for col in 0..width {
            if wall(col, row) {
                continue;
            }
            if col + 1 < width && !wall(col + 1, row) {
                g.connect_both(&node(col, row), &node(col + 1, row), 1.0);
            }
            if row + 1 < height && !wall(col, row + 1) {
                g.connect_both(&node(col, row), &node(col, row + 1), 1.0);
            }
        }
    }
    Problem::by_name(
        Arc::new(g),
        &cell_name(0, 0),
        &cell_name(width - 1, height - 1),
    )
    .expect("grid corners exist")
}

/// Open `side x side` grid.
#[must_use]
pub fn regime_open(side: usize) -> Regime {
    Regime {
        name: "open",
        problem: grid_with(side, side, |_, _| false),
    }
}

/// Every other interior row is a wall with a single gap, alternating sides.
#[must_use]
pub fn regime_serpentine(side: usize) -> Regime {
    Regime {
        name: "serpentine",
        problem: grid_with(side, side, move |col, row| {
            if row % 2 == 0 || row == side - 1 {
                return false;
            }
            let gap = if row % 4 == 1 { side - 1 } else { 0 };
            col != gap
        }),
    }
}

/// The goal corner is sealed off; every discipline exhausts the grid.
#[must_use]
pub fn regime_dead_end(side: usize) -> Regime {
    Regime {
        name: "dead_end",
        problem: grid_with(side, side, move |col, row| {
            (col == side - 2 && row >= side - 2) || (row == side - 2 && col >= side - 2)
        }),
    }
}

/// A wall splits the grid with its only opening on the top row, so the
/// heuristic leads greedy search into the pocket below it.
#[must_use]
pub fn regime_pocket(side: usize) -> Regime {
    Regime {
        name: "pocket",
        problem: grid_with(side, side, move |col, row| col == side / 2 && row > 0),
    }
}

/// All regimes at one size.
#[must_use]
pub fn regimes(side: usize) -> Vec<Regime> {
    vec![
        regime_open(side),
        regime_serpentine(side),
        regime_dead_end(side),
        regime_pocket(side),
    ]
}
