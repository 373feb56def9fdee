use lambda_runtime::{service_fn, Error, LambdaEvent};
use log::info;
use once_cell::sync::OnceCell;
use relay_path::check::run_checks;
use relay_path::config::RouteConfig;
use relay_path::geometry::vector::Vec3;
use relay_path::geometry::visibility::Occluder;
use relay_path::{plan_route, ConstellationInput};
use serde::{Deserialize, Serialize};

/// Set once in `main` before the runtime starts serving.
static CONFIG: OnceCell<RouteConfig> = OnceCell::new();

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum EngineRequest {
    Route {
        #[serde(flatten)]
        input: ConstellationInput,
    },
    Visible {
        from: Vec3,
        to: Vec3,
    },
    Check {
        #[serde(flatten)]
        input: ConstellationInput,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum EngineResponse {
    Route {
        systems: Vec<PathResult>,
        total_distance: f64,
    },
    Visible {
        visible: bool,
    },
    Check {
        passed: usize,
        total: usize,
        failures: Vec<String>,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Serialize)]
struct PathResult {
    name: String,
    cumulative_distance: f64,
}

fn solve(input: &ConstellationInput, config: &RouteConfig) -> EngineResponse {
    match plan_route(input, config) {
        Ok(route) => {
            let systems = route
                .labels
                .into_iter()
                .zip(route.steps)
                .map(|(name, step)| PathResult {
                    name,
                    cumulative_distance: step.cost,
                })
                .collect();
            EngineResponse::Route {
                systems,
                total_distance: route.total_distance,
            }
        }
        Err(err) => EngineResponse::Error { message: err.to_string() },
    }
}

async fn handler(event: LambdaEvent<EngineRequest>) -> Result<EngineResponse, Error> {
    let config = CONFIG.get().ok_or("route config was not loaded")?;
    let response = match event.payload {
        EngineRequest::Route { input } => solve(&input, config),
        EngineRequest::Visible { from, to } => EngineResponse::Visible {
            visible: Occluder::from_config(config).visible(from, to),
        },
        EngineRequest::Check { input } => {
            let report = run_checks(&input, config);
            EngineResponse::Check {
                passed: report.passed(),
                total: report.total(),
                failures: report.failures().map(|o| o.name.clone()).collect(),
            }
        }
    };
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let config = RouteConfig::from_env()?;
    info!("Serving routes with {:?}", config);
    CONFIG
        .set(config)
        .map_err(|_| "route config was already loaded")?;
    let func = service_fn(handler);
    lambda_runtime::run(func).await
}
