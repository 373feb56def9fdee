use std::collections::HashMap;

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geometry::visibility::Occluder;
use crate::graph::GraphError;
use crate::Node;

/// Line-of-sight graph over relays and ground endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VisibilityGraph {
    pub nodes: Vec<Node>,
    /// adjacency[i] lists the sorted neighbour indices of nodes[i]
    pub adjacency: Vec<Vec<usize>>,
    #[serde(skip)]
    name_index: HashMap<String, usize>,
}

impl VisibilityGraph {
    /// Wraps a precomputed adjacency, rejecting rows that do not line up with
    /// `nodes`, neighbour indices outside the node set, and repeated labels.
    pub fn new(nodes: Vec<Node>, adjacency: Vec<Vec<usize>>) -> Result<Self, GraphError> {
        if nodes.len() != adjacency.len() {
            return Err(GraphError::AdjacencyMismatch {
                nodes: nodes.len(),
                adjacency: adjacency.len(),
            });
        }
        for (node, neighbours) in adjacency.iter().enumerate() {
            if let Some(&neighbor) = neighbours.iter().find(|&&n| n >= nodes.len()) {
                return Err(GraphError::UnknownNeighbor { node, neighbor });
            }
        }

        let mut graph = VisibilityGraph {
            nodes,
            adjacency,
            name_index: HashMap::new(),
        };
        graph.rebuild_indices()?;
        Ok(graph)
    }

    /// Tests every pair of distinct nodes against `occluder` and links the
    /// visible ones in both directions.
    pub fn build(nodes: Vec<Node>, occluder: &Occluder) -> Result<Self, GraphError> {
        let n = nodes.len();

        // Row i only tests j > i, so each pair is evaluated exactly once.
        let upper: Vec<Vec<usize>> = (0..n)
            .into_par_iter()
            .map(|i| {
                ((i + 1)..n)
                    .filter(|&j| occluder.visible(nodes[i].pos, nodes[j].pos))
                    .collect()
            })
            .collect();

        let mut adjacency = vec![Vec::new(); n];
        for (i, row) in upper.into_iter().enumerate() {
            for j in row {
                adjacency[i].push(j);
                adjacency[j].push(i);
            }
        }
        for neighbours in &mut adjacency {
            neighbours.sort_unstable();
            neighbours.dedup();
        }

        let graph = VisibilityGraph::new(nodes, adjacency)?;
        info!(
            "Built visibility graph ({} nodes, {} edges)",
            graph.len(),
            graph.edge_count()
        );
        Ok(graph)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    pub fn neighbors(&self, idx: usize) -> &[usize] {
        self.adjacency.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_symmetric(&self) -> bool {
        self.adjacency.iter().enumerate().all(|(a, neighbours)| {
            neighbours
                .iter()
                .all(|&b| b != a && self.neighbors(b).contains(&a))
        })
    }

    pub fn rebuild_indices(&mut self) -> Result<(), GraphError> {
        let mut index = HashMap::with_capacity(self.nodes.len());
        for (idx, node) in self.nodes.iter().enumerate() {
            if index.insert(node.name.clone(), idx).is_some() {
                return Err(GraphError::DuplicateLabel(node.name.clone()));
            }
        }
        debug!("Indexed {} node labels", index.len());
        self.name_index = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, pos: [f64; 3]) -> Node {
        Node {
            name: name.into(),
            pos,
        }
    }

    #[test]
    fn build_links_only_visible_pairs() {
        let nodes = vec![
            node("A", [7.0, 0.0, 0.0]),
            node("B", [7.0, 1.0, 0.0]),
            node("C", [-7.0, 0.0, 0.0]),
        ];
        let graph = VisibilityGraph::build(nodes, &Occluder::earth()).expect("graph");
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0]);
        assert!(graph.neighbors(2).is_empty());
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.is_symmetric());
    }

    #[test]
    fn build_never_links_a_node_to_itself() {
        let nodes = vec![
            node("A", [7.0, 0.0, 0.0]),
            node("B", [0.0, 7.0, 0.0]),
            node("C", [0.0, 0.0, 7.0]),
        ];
        let graph = VisibilityGraph::build(nodes, &Occluder::earth()).expect("graph");
        for (idx, neighbours) in graph.adjacency.iter().enumerate() {
            assert!(!neighbours.contains(&idx));
        }
        assert_eq!(graph.index_of_name("C"), Some(2));
        assert_eq!(graph.index_of_name("D"), None);
    }

    #[test]
    fn new_rejects_inconsistent_adjacency() {
        let nodes = vec![node("A", [0.0; 3]), node("B", [1.0, 0.0, 0.0])];
        assert_eq!(
            VisibilityGraph::new(nodes.clone(), vec![vec![1]]).unwrap_err(),
            GraphError::AdjacencyMismatch {
                nodes: 2,
                adjacency: 1
            }
        );
        assert_eq!(
            VisibilityGraph::new(nodes, vec![vec![1], vec![5]]).unwrap_err(),
            GraphError::UnknownNeighbor {
                node: 1,
                neighbor: 5
            }
        );
    }

    #[test]
    fn new_rejects_duplicate_labels() {
        let nodes = vec![node("A", [0.0; 3]), node("A", [1.0, 0.0, 0.0])];
        assert_eq!(
            VisibilityGraph::new(nodes, vec![vec![], vec![]]).unwrap_err(),
            GraphError::DuplicateLabel("A".into())
        );
    }
}
