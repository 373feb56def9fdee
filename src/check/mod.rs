use log::{debug, info, warn};
use serde::Serialize;

use crate::config::RouteConfig;
use crate::geometry::vector::length;
use crate::geometry::visibility::Occluder;
use crate::graph::pathfinder;
use crate::{build_graph, ConstellationInput, START, STOP};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
}

/// Named pass/fail outcomes of one consistency run, owned by the caller.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct CheckReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, passed: bool) {
        let name = name.into();
        if passed {
            debug!("check '{name}': pass");
        } else {
            warn!("check '{name}': FAIL");
        }
        self.outcomes.push(CheckOutcome { name, passed });
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn merge(&mut self, other: CheckReport) {
        self.outcomes.extend(other.outcomes);
    }
}

/// Checks node placement, graph symmetry and the solved route for `input`.
pub fn run_checks(input: &ConstellationInput, config: &RouteConfig) -> CheckReport {
    let mut report = CheckReport::new();

    let graph = match build_graph(input, config) {
        Ok(graph) => graph,
        Err(err) => {
            report.record(format!("graph construction ({err})"), false);
            return report;
        }
    };

    let radius = config.occluder_radius;
    let relay_min = radius + config.relay_band.min / config.altitude_scale;
    let relay_max = radius + config.relay_band.max / config.altitude_scale;
    for node in &graph.nodes {
        let r = length(node.pos);
        if node.name == START || node.name == STOP {
            report.record(
                format!("{} on the surface", node.name),
                r >= radius && r <= radius + 0.001,
            );
        } else {
            report.record(
                format!("{} within relay altitude band", node.name),
                r >= relay_min && r <= relay_max,
            );
        }
    }

    report.record("visibility graph is symmetric", graph.is_symmetric());

    match pathfinder::route(&graph) {
        Ok(route) => {
            let occluder = Occluder::from_config(config);
            for hop in route.labels.windows(2) {
                let visible = match (graph.index_of_name(&hop[0]), graph.index_of_name(&hop[1])) {
                    (Some(a), Some(b)) => occluder.visible(graph.nodes[a].pos, graph.nodes[b].pos),
                    _ => false,
                };
                report.record(format!("hop {} -> {} is visible", hop[0], hop[1]), visible);
            }
        }
        Err(err) => report.record(format!("route found ({err})"), false),
    }

    info!("{}/{} checks passed", report.passed(), report.total());
    report
}
