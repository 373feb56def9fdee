pub mod graph;
pub mod pathfinder;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("duplicate node label {0}")]
    DuplicateLabel(String),
    #[error("relay label {0} is reserved for a ground endpoint")]
    ReservedLabel(String),
    #[error("adjacency has {adjacency} rows but there are {nodes} nodes")]
    AdjacencyMismatch { nodes: usize, adjacency: usize },
    #[error("node {node} lists neighbour index {neighbor} outside the node set")]
    UnknownNeighbor { node: usize, neighbor: usize },
    #[error("node {0} is not part of the graph")]
    UnknownNode(String),
    #[error("no path from {from} to {to}")]
    Unreachable { from: String, to: String },
}
