use assert_approx_eq::assert_approx_eq;
use relay_path::check::run_checks;
use relay_path::config::RouteConfig;
use relay_path::data::parse_records;
use relay_path::geometry::vector::length;
use relay_path::geometry::visibility::visible;
use relay_path::graph::GraphError;
use relay_path::{build_graph, place_nodes, plan_route, ConstellationInput, START, STOP};

/// Ring-and-shell constellation laid out on a fixed grid.
fn grid_constellation() -> String {
    let mut text = String::from("#SEED: grid\n");
    let mut id = 0;
    for polar in (-75..=75).step_by(15) {
        for azimuth in (-180..180).step_by(15) {
            let altitude = 320 + (id * 37) % 360;
            text.push_str(&format!("SAT{id},{polar}.0,{azimuth}.0,{altitude}.0\n"));
            id += 1;
        }
    }
    text.push_str("ROUTE,-33.9,151.2,51.5,-0.1\n");
    text
}

fn grid_input() -> ConstellationInput {
    parse_records(grid_constellation().as_bytes()).expect("parse")
}

#[test]
fn integration_end_to_end_grid() {
    let config = RouteConfig::default();
    let input = grid_input();
    let graph = build_graph(&input, &config).expect("graph");
    assert_eq!(graph.len(), input.relays.len() + 2);
    assert!(graph.is_symmetric());

    let route = plan_route(&input, &config).expect("route");
    assert_eq!(route.labels.first().map(String::as_str), Some(START));
    assert_eq!(route.labels.last().map(String::as_str), Some(STOP));
    assert!(route.labels.len() >= 3);

    let mut total = 0.0;
    for hop in route.labels.windows(2) {
        let a = &graph.nodes[graph.index_of_name(&hop[0]).unwrap()];
        let b = &graph.nodes[graph.index_of_name(&hop[1]).unwrap()];
        assert!(visible(a.pos, b.pos), "{} -> {}", a.name, b.name);
        total += a.distance(b);
    }
    assert_approx_eq!(route.total_distance, total, 1e-9);
}

#[test]
fn positions_fall_in_expected_shells() {
    let config = RouteConfig::default();
    let r = config.occluder_radius;
    for node in place_nodes(&grid_input(), &config).expect("nodes") {
        let dist = length(node.pos);
        if node.name == START || node.name == STOP {
            assert!(dist >= r && dist <= r + 0.001, "{}", node.name);
        } else {
            assert!(dist >= r + 0.3 && dist <= r + 0.7, "{}", node.name);
        }
    }
}

#[test]
fn self_check_passes_on_grid() {
    let report = run_checks(&grid_input(), &RouteConfig::default());
    assert!(report.is_success());
    assert!(report.total() > grid_input().relays.len());
}

#[test]
fn repeated_planning_is_deterministic() {
    let config = RouteConfig::default();
    let input = grid_input();
    let first = plan_route(&input, &config).expect("route");
    let second = plan_route(&input, &config).expect("route");
    assert_eq!(first, second);
}

#[test]
fn relay_order_does_not_change_route() {
    let config = RouteConfig::default();
    let forward = grid_input();
    let mut reversed = forward.clone();
    reversed.relays.reverse();

    let a = plan_route(&forward, &config).expect("route");
    let b = plan_route(&reversed, &config).expect("route");
    assert_eq!(a.labels, b.labels);
    assert_approx_eq!(a.total_distance, b.total_distance, 1e-12);
}

#[test]
fn antipodal_endpoints_without_relays_are_unreachable() {
    let input = parse_records("ROUTE,0.0,0.0,0.0,180.0\n".as_bytes()).expect("parse");
    let err = plan_route(&input, &RouteConfig::default()).unwrap_err();
    assert!(matches!(err, GraphError::Unreachable { .. }));
}

#[test]
fn reserved_and_duplicate_labels_are_rejected() {
    let config = RouteConfig::default();
    let reserved = parse_records("START,0,0,500\nROUTE,0,0,0,1\n".as_bytes()).unwrap();
    assert_eq!(
        plan_route(&reserved, &config).unwrap_err(),
        GraphError::ReservedLabel(START.into())
    );

    let duplicate = parse_records("A,0,0,500\nA,1,1,500\nROUTE,0,0,0,1\n".as_bytes()).unwrap();
    assert_eq!(
        plan_route(&duplicate, &config).unwrap_err(),
        GraphError::DuplicateLabel("A".into())
    );
}
