use metrograph::graph::{
    approximate_vertex_cover, AStar, BellmanFord, Dijkstra, FloydWarshall, GraphPath, PathFinder,
    WelshPowell,
};
use metrograph::network::{parse_network, NetworkConfig, Station};
use metrograph::Graph;

fn fixture_graph() -> Graph<Station> {
    let nodes = std::fs::read_to_string("tests/fixtures/network/nodes.txt").unwrap();
    let arcs = std::fs::read_to_string("tests/fixtures/network/arcs.txt").unwrap();
    let config = NetworkConfig::default().with_transfer_time(120.0);
    parse_network(&nodes, &arcs, &config)
        .unwrap()
        .into_strict()
        .unwrap()
}

fn engines() -> Vec<Box<dyn PathFinder<Station>>> {
    vec![
        Box::new(Dijkstra::with_defaults()),
        Box::new(BellmanFord::with_defaults()),
        Box::new(FloydWarshall::new()),
        // Kilometres never exceed seconds of travel here, so the raw estimate is admissible
        Box::new(AStar::with_defaults()),
    ]
}

/// Sums the lightest link weight between consecutive path nodes.
fn walked_length(graph: &Graph<Station>, path: &GraphPath) -> f64 {
    path.nodes
        .windows(2)
        .map(|pair| {
            graph
                .neighbors(pair[0])
                .unwrap()
                .iter()
                .filter(|(to, _)| *to == pair[1])
                .map(|(_, w)| *w)
                .fold(f64::INFINITY, f64::min)
        })
        .sum()
}

#[test]
fn test_engines_agree_on_every_pair() {
    let graph = fixture_graph();
    let engines = engines();

    for from in graph.nodes() {
        for to in graph.nodes() {
            let reference = engines[0].shortest_path(&graph, from, to).unwrap();
            for engine in &engines[1..] {
                let path = engine.shortest_path(&graph, from, to).unwrap();
                assert_eq!(
                    path.total_length,
                    reference.total_length,
                    "{} disagrees on {} -> {}",
                    engine.name(),
                    from,
                    to
                );
                assert_eq!(path.is_reachable(), reference.is_reachable());
            }
        }
    }
}

#[test]
fn test_paths_are_walkable() {
    let graph = fixture_graph();

    for engine in engines() {
        for from in graph.nodes() {
            for to in graph.nodes() {
                let path = engine.shortest_path(&graph, from, to).unwrap();
                if !path.is_reachable() {
                    assert!(path.nodes.is_empty());
                    assert_eq!(path.total_length, f64::INFINITY);
                    continue;
                }

                assert_eq!(path.source(), graph.node_id(from));
                assert_eq!(path.target(), graph.node_id(to));
                assert_eq!(
                    walked_length(&graph, &path),
                    path.total_length,
                    "{}: {} -> {}",
                    engine.name(),
                    from,
                    to
                );
            }
        }
    }
}

#[test]
fn test_astar_with_speed_bound() {
    let graph = fixture_graph();
    let config = NetworkConfig::default();
    let from = &graph.nodes()[0];
    let to = &graph.nodes()[4];

    let astar = AStar::with_defaults()
        .find_path_with(&graph, from, to, |a, b| a.distance_km(b) / config.max_speed)
        .unwrap();
    let dijkstra = Dijkstra::with_defaults().shortest_path(&graph, from, to).unwrap();

    // Châtelet -> Bastille 200, transfer 120, Bastille -> République 310
    assert_eq!(dijkstra.total_length, 630.0);
    assert_eq!(astar.total_length, dijkstra.total_length);
    assert_eq!(astar.nodes, dijkstra.nodes);
}

#[test]
fn test_isolated_station_unreachable_everywhere() {
    let graph = fixture_graph();
    let botzaris = graph.nodes().iter().find(|s| s.id == 11).unwrap();

    for engine in engines() {
        let path = engine
            .shortest_path(&graph, &graph.nodes()[0], botzaris)
            .unwrap();
        assert!(!path.is_reachable(), "{}", engine.name());
        assert!(path.nodes.is_empty());
    }
}

#[test]
fn test_network_coloring_and_cover() {
    let graph = fixture_graph();

    let mut coloring = WelshPowell::new(&graph);
    let colors = coloring.color_graph();

    // The network is a tree, but starting from the Bastille hub the greedy pass
    // needs a third color
    assert_eq!(colors, 3);
    assert!(!coloring.is_bipartite().unwrap());
    assert!(coloring.is_planar().unwrap());

    let assigned = coloring.colors().unwrap();
    for (u, v, _) in graph.edges() {
        assert_ne!(assigned[u.index()], assigned[v.index()]);
    }

    let cover = approximate_vertex_cover(&graph);
    assert!(cover.covers(&graph));
    // Five disjoint sections need five members, the greedy pass takes both ends of each
    assert_eq!(cover.len(), 10);
    assert!(!cover.contains(graph.node_id(&graph.nodes()[10]).unwrap()));
}
