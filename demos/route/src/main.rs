//! tollroute — cheapest fuel + toll route between two towns.
//!
//! Loads a road graph in the `{ nodes, edges }` JSON shape, builds the
//! adjacency index once, and answers one query.
//!
//! Run with: `cargo run -p tollroute -- demos/route/data/points.json A F`

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use serde_json::json;

use tp_core::CostConfig;
use tp_network::{load_graph_json, AdjacencyIndex, CostModel};
use tp_route::{DijkstraRouter, RouteReport, Router};

#[derive(Parser)]
#[command(name = "tollroute")]
#[command(about = "Least-cost (fuel + toll) route between two nodes of a road graph")]
#[command(long_about = "Least-cost (fuel + toll) route between two nodes of a road graph.

Hop cost = fuel_used * fuel_price + toll, with
  fuel_used = length / efficiency * consumption_factor
  toll      = length * 1.0 * (0.8 if efficiency < 14) * (1.5 if traffic_weight > 1.2),
              only on roads longer than 100

Edges are traversable in both directions.")]
struct Cli {
    /// Road graph JSON file
    graph: PathBuf,

    /// Start node id
    start: String,

    /// End node id
    end: String,

    /// Price of one unit of fuel (overrides the config file)
    #[arg(long)]
    fuel_price: Option<f64>,

    /// Cost configuration JSON: `{ "fuel_price": .., "toll": { .. } }`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the route as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => CostConfig::default(),
    };
    if let Some(price) = cli.fuel_price {
        config.fuel_price = price;
    }
    let model = CostModel::new(config).context("invalid cost configuration")?;

    let t0 = Instant::now();
    let graph = load_graph_json(&cli.graph)
        .with_context(|| format!("loading {}", cli.graph.display()))?;
    let index = AdjacencyIndex::build(&graph, model)?;
    info!(
        "{} nodes, {} edges indexed in {:.3} ms",
        graph.node_count(),
        graph.edge_count(),
        t0.elapsed().as_secs_f64() * 1_000.0
    );

    let (start, end) = (cli.start.trim(), cli.end.trim());
    let route = DijkstraRouter.route_by_key(&graph, &index, start, end)?;

    match (route, cli.json) {
        (Some(route), false) => println!("{}", RouteReport::new(&graph, &route)?),
        (Some(route), true) => {
            let report = RouteReport::new(&graph, &route)?;
            println!("{}", serde_json::to_string_pretty(&report)?)
        }
        (None, false) => println!("No path found!"),
        (None, true) => println!("{}", json!({ "path": [], "totalCost": null })),
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<CostConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}
