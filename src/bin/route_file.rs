use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use relay_path::check::run_checks;
use relay_path::config::{load_config, RouteConfig};
use relay_path::data::read_records_from_file;
use relay_path::plan_route;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Shortest line-of-sight relay route between two ground points"
)]
struct Cli {
    /// Constellation data file (relay records followed by a route trailer)
    data: PathBuf,

    /// JSON file overriding the physical constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run consistency checks instead of printing the route
    #[arg(long, default_value_t = false)]
    check: bool,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => RouteConfig::default(),
    };

    let input = read_records_from_file(&cli.data)
        .with_context(|| format!("failed to read constellation from {}", cli.data.display()))?;
    info!(
        "Loaded {} relays from {}",
        input.relays.len(),
        cli.data.display()
    );

    if cli.check {
        let report = run_checks(&input, &config);
        for outcome in &report.outcomes {
            let status = if outcome.passed { "pass" } else { "FAIL" };
            println!("{status}: {}", outcome.name);
        }
        println!("{}/{} checks passed", report.passed(), report.total());
        return Ok(if report.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let route = plan_route(&input, &config).context("failed to plan route")?;
    println!("{}", route.labels.join(","));
    info!("Total distance {:.6}", route.total_distance);
    Ok(ExitCode::SUCCESS)
}
