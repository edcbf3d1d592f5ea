//! Metro network loading.
//!
//! Turns a pair of delimited text files (stations and arcs) into a
//! [`Graph<Station>`](crate::graph::Graph) ready for the engines in
//! [`graph`](crate::graph).

pub mod config;
pub mod loader;
pub mod station;

pub use config::NetworkConfig;
pub use loader::{
    load_network, parse_network, parse_stations, IssueKind, LoadError, NetworkLoad, ParseIssue,
    RecordSource,
};
pub use station::Station;
