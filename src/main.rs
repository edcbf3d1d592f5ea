use anyhow::{anyhow, bail, Context, Result};
use dotenv::dotenv;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metrograph::graph::{
    approximate_vertex_cover, AStar, BellmanFord, Dijkstra, FloydWarshall, Graph, GraphPath,
    PathConfig, PathFinder, WelshPowell,
};
use metrograph::network::{load_network, NetworkConfig, Station};

const USAGE: &str = "\
usage: metrograph path <dijkstra|bellman-ford|floyd-warshall|astar> <from_id> <to_id>
       metrograph color
       metrograph cover";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metrograph=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!(USAGE);
    };

    let config = NetworkConfig::from_env();
    let load = load_network(&config)
        .await
        .context("Failed to load metro network")?;
    if !load.is_clean() {
        warn!("{} rows skipped while loading the network", load.issues.len());
    }
    let graph = load.graph;

    let report = match command.as_str() {
        "path" => {
            let [algorithm, from, to] = &args[1..] else {
                bail!(USAGE);
            };
            path_report(&graph, &config, algorithm, from, to)?
        }
        "color" => color_report(&graph)?,
        "cover" => {
            let cover = approximate_vertex_cover(&graph);
            json!({
                "stations": graph.node_count(),
                "cover_size": cover.len(),
            })
        }
        other => bail!("Unknown command: {}\n{}", other, USAGE),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn find_station<'g>(graph: &'g Graph<Station>, raw_id: &str) -> Result<&'g Station> {
    let id: u32 = raw_id
        .parse()
        .with_context(|| format!("Invalid station id: {}", raw_id))?;
    graph
        .nodes()
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| anyhow!("No station with id {}", id))
}

fn path_report(
    graph: &Graph<Station>,
    config: &NetworkConfig,
    algorithm: &str,
    from: &str,
    to: &str,
) -> Result<serde_json::Value> {
    let from = find_station(graph, from)?;
    let to = find_station(graph, to)?;
    let path_config = PathConfig::from_env();

    let path: GraphPath = match algorithm {
        // Arc weights are travel times, so the km estimate is scaled by the speed bound
        "astar" => AStar::new(path_config).find_path_with(graph, from, to, |a, b| {
            a.distance_km(b) / config.max_speed
        })?,
        _ => {
            let engine: Box<dyn PathFinder<Station>> = match algorithm {
                "dijkstra" => Box::new(Dijkstra::new(path_config)),
                "bellman-ford" => Box::new(BellmanFord::new(path_config)),
                "floyd-warshall" => Box::new(FloydWarshall::new()),
                other => bail!("Unknown algorithm: {}\n{}", other, USAGE),
            };
            engine.shortest_path(graph, from, to)?
        }
    };

    info!(
        "{}: {} -> {} in {} hops",
        algorithm,
        from,
        to,
        path.hop_count()
    );

    Ok(json!({
        "algorithm": algorithm,
        "from": from,
        "to": to,
        "reachable": path.is_reachable(),
        "total_length": path.is_reachable().then_some(path.total_length),
        "stations": path.payloads(graph),
    }))
}

fn color_report(graph: &Graph<Station>) -> Result<serde_json::Value> {
    let mut coloring = WelshPowell::new(graph);
    let colors = coloring.color_graph();
    let group_sizes: Vec<usize> = coloring.color_groups()?.iter().map(Vec::len).collect();

    Ok(json!({
        "stations": graph.node_count(),
        "colors": colors,
        "bipartite": coloring.is_bipartite()?,
        "planar": coloring.is_planar()?,
        "group_sizes": group_sizes,
    }))
}
