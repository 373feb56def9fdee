pub mod check;
pub mod config;
pub mod data;
pub mod geometry;
pub mod graph;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::RouteConfig;
use crate::geometry::transform::{ground_position, polar_to_cartesian};
use crate::geometry::vector::{self, Vec3};
use crate::geometry::visibility::Occluder;
use crate::graph::graph::VisibilityGraph;
use crate::graph::pathfinder::{self, Route};
use crate::graph::GraphError;

/// Label of the ground endpoint the route starts from.
pub const START: &str = "START";
/// Label of the ground endpoint the route ends at.
pub const STOP: &str = "STOP";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub name: String,
    /// Position in the Earth-centred frame, in thousands of kilometres
    pub pos: Vec3,
}

impl Node {
    pub fn distance(&self, other: &Node) -> f64 {
        vector::distance(self.pos, other.pos)
    }
}

/// One relay satellite as given in the input: angles in degrees, altitude in km.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RelayRecord {
    pub label: String,
    pub polar: f64,
    pub azimuth: f64,
    pub altitude: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct GroundEndpoints {
    pub start_polar: f64,
    pub start_azimuth: f64,
    pub stop_polar: f64,
    pub stop_azimuth: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConstellationInput {
    pub relays: Vec<RelayRecord>,
    pub endpoints: GroundEndpoints,
}

/// Places every relay and both ground endpoints in Cartesian space.
///
/// Relays keep their input order and are followed by `START` and `STOP`.
pub fn place_nodes(input: &ConstellationInput, config: &RouteConfig) -> Result<Vec<Node>, GraphError> {
    let mut seen = HashSet::with_capacity(input.relays.len());
    let mut nodes = Vec::with_capacity(input.relays.len() + 2);

    for relay in &input.relays {
        if relay.label == START || relay.label == STOP {
            return Err(GraphError::ReservedLabel(relay.label.clone()));
        }
        if !seen.insert(relay.label.as_str()) {
            return Err(GraphError::DuplicateLabel(relay.label.clone()));
        }
        nodes.push(Node {
            name: relay.label.clone(),
            pos: polar_to_cartesian(relay.polar, relay.azimuth, relay.altitude, config),
        });
    }

    let ends = &input.endpoints;
    nodes.push(Node {
        name: START.into(),
        pos: ground_position(ends.start_polar, ends.start_azimuth, config),
    });
    nodes.push(Node {
        name: STOP.into(),
        pos: ground_position(ends.stop_polar, ends.stop_azimuth, config),
    });
    Ok(nodes)
}

/// Builds the visibility graph for `input`.
pub fn build_graph(input: &ConstellationInput, config: &RouteConfig) -> Result<VisibilityGraph, GraphError> {
    let nodes = place_nodes(input, config)?;
    VisibilityGraph::build(nodes, &Occluder::from_config(config))
}

/// Full pipeline: positions, visibility graph, shortest `START → STOP` route.
pub fn plan_route(input: &ConstellationInput, config: &RouteConfig) -> Result<Route, GraphError> {
    let graph = build_graph(input, config)?;
    pathfinder::route(&graph)
}
