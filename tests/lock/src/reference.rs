//! Straightforward oracles the search disciplines are checked against.

use std::collections::VecDeque;

use pathstep_kernel::graph::Graph;
use pathstep_kernel::node::NodeId;

/// Cheapest `start -> goal` cost, or `None` if the goal is unreachable.
///
/// Quadratic Dijkstra; fixtures are small.
#[must_use]
pub fn cheapest_cost(graph: &Graph, start: NodeId, goal: NodeId) -> Option<f64> {
    let n = graph.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut done = vec![false; n];
    dist[start.index()] = 0.0;
    loop {
        let next = (0..n)
            .filter(|&i| !done[i] && dist[i].is_finite())
            .min_by(|&a, &b| dist[a].total_cmp(&dist[b]));
        let Some(u) = next else { break };
        done[u] = true;
        for edge in graph.edges_from(node_at(u)) {
            let v = edge.to.index();
            let candidate = dist[u] + edge.cost;
            if candidate < dist[v] {
                dist[v] = candidate;
            }
        }
    }
    let d = dist[goal.index()];
    d.is_finite().then_some(d)
}

/// Fewest edges on any `start -> goal` path, or `None` if unreachable.
#[must_use]
pub fn fewest_hops(graph: &Graph, start: NodeId, goal: NodeId) -> Option<u32> {
    let mut hops: Vec<Option<u32>> = vec![None; graph.len()];
    hops[start.index()] = Some(0);
    let mut queue = VecDeque::from([start]);
    while let Some(u) = queue.pop_front() {
        let here = hops[u.index()]?;
        for edge in graph.edges_from(u) {
            if hops[edge.to.index()].is_none() {
                hops[edge.to.index()] = Some(here + 1);
                queue.push_back(edge.to);
            }
        }
    }
    hops[goal.index()]
}

/// Whether consecutive nodes of `path` are joined by edges.
#[must_use]
pub fn is_connected_path(graph: &Graph, path: &[NodeId]) -> bool {
    path.windows(2)
        .all(|pair| graph.edge_cost(pair[0], pair[1]).is_some())
}

fn node_at(index: usize) -> NodeId {
    NodeId::new(u32::try_from(index).unwrap_or(u32::MAX))
}
