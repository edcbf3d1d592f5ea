//! Reads metro network files into a [`Graph`] of [`Station`]s.
//!
//! Parsing is lenient: a malformed row is skipped, logged and recorded as a
//! [`ParseIssue`], and the rest of the file still loads. Callers that want an
//! all-or-nothing load use [`NetworkLoad::into_strict`].

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::config::NetworkConfig;
use super::station::Station;
use crate::graph::{Graph, GraphError, Link};

const NODE_FIELDS: usize = 7;
const ARC_FIELDS: usize = 4;

/// Which file a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    Nodes,
    Arcs,
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nodes => write!(f, "nodes"),
            Self::Arcs => write!(f, "arcs"),
        }
    }
}

/// Why a row was skipped.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum IssueKind {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("travel time must be a non-negative number, got {0}")]
    InvalidTime(f64),

    #[error("{field} must be a finite number of degrees, got {value}")]
    InvalidCoordinate { field: &'static str, value: f64 },

    #[error("unknown station id {0}")]
    UnknownStation(u32),

    #[error("duplicate station id {0}")]
    DuplicateStation(u32),
}

/// A skipped row, located by file and 1-based line number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseIssue {
    pub source: RecordSource,
    pub line: usize,
    pub kind: IssueKind,
}

impl std::fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} line {}: {}", self.source, self.line, self.kind)
    }
}

/// Errors that abort a network load.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Network files contain {} malformed rows", .0.len())]
    Rejected(Vec<ParseIssue>),

    #[error("Invalid configuration: {0}")]
    Config(#[from] crate::graph::ConfigError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Outcome of a lenient load: the graph plus every row that was skipped.
#[derive(Debug, Clone)]
pub struct NetworkLoad {
    pub graph: Graph<Station>,
    pub issues: Vec<ParseIssue>,
}

impl NetworkLoad {
    /// Checks whether every row was accepted.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns the graph only if no row was skipped.
    pub fn into_strict(self) -> Result<Graph<Station>, LoadError> {
        if self.issues.is_empty() {
            Ok(self.graph)
        } else {
            Err(LoadError::Rejected(self.issues))
        }
    }
}

/// Splits a file into (line number, fields), skipping blanks and comments.
fn records(text: &str, delimiter: char) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines().enumerate().filter_map(move |(i, line)| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        Some((i + 1, line.split(delimiter).map(str::trim).collect()))
    })
}

fn parse_field<N: FromStr>(field: &'static str, value: &str) -> Result<N, IssueKind> {
    value.parse().map_err(|_| IssueKind::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_station(fields: &[&str]) -> Result<Station, IssueKind> {
    if fields.len() != NODE_FIELDS {
        return Err(IssueKind::FieldCount {
            expected: NODE_FIELDS,
            found: fields.len(),
        });
    }

    Ok(Station {
        id: parse_field("station id", fields[0])?,
        line: fields[1].to_string(),
        name: fields[2].to_string(),
        longitude: parse_coordinate("longitude", fields[3], 180.0)?,
        latitude: parse_coordinate("latitude", fields[4], 90.0)?,
        commune: fields[5].to_string(),
        commune_code: fields[6].to_string(),
    })
}

/// Parses decimal degrees. `f64` parsing accepts `NaN` and `inf`, which
/// would poison the A* estimate, so those are rejected along with values
/// past `limit`.
fn parse_coordinate(field: &'static str, value: &str, limit: f64) -> Result<f64, IssueKind> {
    let degrees: f64 = parse_field(field, value)?;
    if !degrees.is_finite() || degrees.abs() > limit {
        return Err(IssueKind::InvalidCoordinate {
            field,
            value: degrees,
        });
    }
    Ok(degrees)
}

/// One arc row: a station, its optional neighbors and the travel time.
struct ArcRecord {
    station: u32,
    neighbors: Vec<u32>,
    time: f64,
}

fn parse_arc(fields: &[&str], known: &HashMap<u32, usize>) -> Result<ArcRecord, IssueKind> {
    if fields.len() != ARC_FIELDS {
        return Err(IssueKind::FieldCount {
            expected: ARC_FIELDS,
            found: fields.len(),
        });
    }

    let station: u32 = parse_field("station id", fields[0])?;
    let mut neighbors: Vec<u32> = Vec::with_capacity(2);
    for (field, value) in [("previous id", fields[1]), ("next id", fields[2])] {
        if !value.is_empty() {
            neighbors.push(parse_field(field, value)?);
        }
    }
    let time: f64 = parse_field("travel time", fields[3])?;
    if time.is_nan() || time < 0.0 {
        return Err(IssueKind::InvalidTime(time));
    }

    if let Some(&unknown) = std::iter::once(&station)
        .chain(neighbors.iter())
        .find(|id| !known.contains_key(id))
    {
        return Err(IssueKind::UnknownStation(unknown));
    }

    Ok(ArcRecord {
        station,
        neighbors,
        time,
    })
}

fn skip(issues: &mut Vec<ParseIssue>, source: RecordSource, line: usize, kind: IssueKind) {
    let issue = ParseIssue { source, line, kind };
    warn!("Skipping {}", issue);
    issues.push(issue);
}

/// Parses station records, keeping the first record for each id.
pub fn parse_stations(text: &str, delimiter: char) -> (Vec<Station>, Vec<ParseIssue>) {
    let mut stations = Vec::new();
    let mut seen: HashSet<u32> = HashSet::new();
    let mut issues = Vec::new();

    for (line, fields) in records(text, delimiter) {
        match parse_station(&fields) {
            Ok(station) if seen.contains(&station.id) => {
                skip(
                    &mut issues,
                    RecordSource::Nodes,
                    line,
                    IssueKind::DuplicateStation(station.id),
                );
            }
            Ok(station) => {
                seen.insert(station.id);
                stations.push(station);
            }
            Err(kind) => skip(&mut issues, RecordSource::Nodes, line, kind),
        }
    }

    (stations, issues)
}

/// Builds the network graph from the text of both files.
///
/// Stations are interned in file order, so isolated stations are still nodes
/// and `NodeId`s follow the nodes file.
pub fn parse_network(
    nodes_text: &str,
    arcs_text: &str,
    config: &NetworkConfig,
) -> Result<NetworkLoad, LoadError> {
    config.validate()?;

    let (stations, mut issues) = parse_stations(nodes_text, config.delimiter);
    let by_id: HashMap<u32, usize> = stations
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id, i))
        .collect();

    let mut graph = Graph::new(config.graph.clone());
    for station in &stations {
        graph.add_node(station.clone());
    }

    let mut arc_count = 0usize;
    for (line, fields) in records(arcs_text, config.delimiter) {
        let record = match parse_arc(&fields, &by_id) {
            Ok(record) => record,
            Err(kind) => {
                skip(&mut issues, RecordSource::Arcs, line, kind);
                continue;
            }
        };

        let from = &stations[by_id[&record.station]];
        for neighbor in record.neighbors {
            let to = &stations[by_id[&neighbor]];
            graph.add_link(Link::direct(from.clone(), to.clone(), record.time))?;
            arc_count += 1;
        }
    }

    let mut transfer_count = 0usize;
    if let Some(time) = config.transfer_time {
        let mut hubs: HashMap<&str, Vec<&Station>> = HashMap::new();
        for station in &stations {
            hubs.entry(station.name.as_str()).or_default().push(station);
        }
        // Walk in file order so link order does not depend on hashing
        for (i, a) in stations.iter().enumerate() {
            for b in hubs[a.name.as_str()].iter().filter(|b| by_id[&b.id] > i) {
                if a.is_transfer_with(b) {
                    graph.add_link(Link::undirected(a.clone(), Station::clone(b), time))?;
                    transfer_count += 1;
                }
            }
        }
        debug!("Added {} transfer links", transfer_count);
    }

    info!(
        "Loaded network: {} stations, {} arcs, {} transfers, {} skipped rows",
        graph.node_count(),
        arc_count,
        transfer_count,
        issues.len()
    );

    Ok(NetworkLoad { graph, issues })
}

async fn read_file(path: &Path) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads both files named by `config` and builds the network graph.
pub async fn load_network(config: &NetworkConfig) -> Result<NetworkLoad, LoadError> {
    debug!(
        "Reading network from {} and {}",
        config.nodes_path.display(),
        config.arcs_path.display()
    );
    let (nodes_text, arcs_text) = tokio::try_join!(
        read_file(&config.nodes_path),
        read_file(&config.arcs_path)
    )?;
    parse_network(&nodes_text, &arcs_text, config)
}
