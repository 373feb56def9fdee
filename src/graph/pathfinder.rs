use crate::geometry::vector::distance;
use crate::graph::graph::VisibilityGraph;
use crate::graph::GraphError;
use crate::{START, STOP};
use log::debug;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PathStep {
    pub node_index: usize,
    /// Distance travelled from the start up to and including this node.
    pub cost: f64,
}

/// Labels of a solved relay route, ground start first.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Route {
    pub labels: Vec<String>,
    /// steps[i] is the graph node and cumulative distance of labels[i]
    pub steps: Vec<PathStep>,
    pub total_distance: f64,
}

/// Dijkstra over the visibility graph, each edge weighted by the straight-line
/// distance between its endpoints.
///
/// The frontier is a min-heap keyed on the best known distance, ties broken on
/// the lower node index, so repeated solves return the same path.
pub fn shortest_path(
    graph: &VisibilityGraph,
    start: usize,
    goal: usize,
) -> Result<Vec<PathStep>, GraphError> {
    for idx in [start, goal] {
        if idx >= graph.len() {
            return Err(GraphError::UnknownNode(format!("#{idx}")));
        }
    }
    if start == goal {
        return Ok(vec![PathStep {
            node_index: start,
            cost: 0.0,
        }]);
    }

    #[derive(Copy, Clone, Debug)]
    struct Frontier {
        idx: usize,
        dist: f64,
    }

    impl Eq for Frontier {}

    impl PartialEq for Frontier {
        fn eq(&self, other: &Self) -> bool {
            self.cmp(other) == Ordering::Equal
        }
    }

    impl Ord for Frontier {
        fn cmp(&self, other: &Self) -> Ordering {
            other
                .dist
                .total_cmp(&self.dist)
                .then_with(|| other.idx.cmp(&self.idx))
        }
    }

    impl PartialOrd for Frontier {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    let mut dist = vec![f64::INFINITY; graph.len()];
    let mut prev: Vec<Option<usize>> = vec![None; graph.len()];
    let mut settled = vec![false; graph.len()];
    dist[start] = 0.0;

    let mut open = BinaryHeap::new();
    open.push(Frontier {
        idx: start,
        dist: 0.0,
    });

    while let Some(Frontier { idx: current, dist: current_dist }) = open.pop() {
        if settled[current] || current_dist > dist[current] {
            continue;
        }
        settled[current] = true;
        if current == goal {
            break;
        }

        let here = graph.nodes[current].pos;
        for &neighbor in graph.neighbors(current) {
            let Some(next) = graph.nodes.get(neighbor) else {
                return Err(GraphError::UnknownNeighbor {
                    node: current,
                    neighbor,
                });
            };
            let alt = current_dist + distance(here, next.pos);
            if alt < dist[neighbor] {
                dist[neighbor] = alt;
                prev[neighbor] = Some(current);
                open.push(Frontier {
                    idx: neighbor,
                    dist: alt,
                });
            }
        }
    }

    if prev[goal].is_none() {
        return Err(GraphError::Unreachable {
            from: graph.nodes[start].name.clone(),
            to: graph.nodes[goal].name.clone(),
        });
    }

    Ok(reconstruct_path(&prev, &dist, goal))
}

/// Solves the route between the `START` and `STOP` ground endpoints.
pub fn route(graph: &VisibilityGraph) -> Result<Route, GraphError> {
    let start = graph
        .index_of_name(START)
        .ok_or_else(|| GraphError::UnknownNode(START.into()))?;
    let stop = graph
        .index_of_name(STOP)
        .ok_or_else(|| GraphError::UnknownNode(STOP.into()))?;

    let steps = shortest_path(graph, start, stop)?;
    let total_distance = steps.last().map(|s| s.cost).unwrap_or(0.0);
    let labels: Vec<String> = steps
        .iter()
        .map(|s| graph.nodes[s.node_index].name.clone())
        .collect();
    debug!(
        "Route with {} hops, {:.4} total distance",
        labels.len().saturating_sub(1),
        total_distance
    );
    Ok(Route {
        labels,
        steps,
        total_distance,
    })
}

fn reconstruct_path(prev: &[Option<usize>], dist: &[f64], goal: usize) -> Vec<PathStep> {
    let mut total_path = vec![goal];
    let mut current = goal;
    while let Some(p) = prev[current] {
        current = p;
        total_path.push(current);
    }
    total_path.reverse();

    total_path
        .into_iter()
        .map(|idx| PathStep {
            node_index: idx,
            cost: dist[idx],
        })
        .collect()
}
