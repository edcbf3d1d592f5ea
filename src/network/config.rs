//! Network loading configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::graph::{ConfigError, GraphConfig};

/// Where the network files live and how to read them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Station records (`id;line;station;longitude;latitude;commune;commune_code`).
    pub nodes_path: PathBuf,

    /// Arc records (`station_id;previous_id;next_id;time`).
    pub arcs_path: PathBuf,

    /// Field separator.
    pub delimiter: char,

    /// Weight of the links joining same-named stations on different lines
    /// (None = no transfer links).
    pub transfer_time: Option<f64>,

    /// Fastest possible travel, in kilometres per weight unit. Scales the
    /// straight-line A* estimate so it stays a lower bound on travel time.
    pub max_speed: f64,

    /// Graph construction settings.
    pub graph: GraphConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            nodes_path: PathBuf::from("data/nodes.csv"),
            arcs_path: PathBuf::from("data/arcs.csv"),
            delimiter: ';',
            transfer_time: None,
            // 90 km/h with times in seconds
            max_speed: 0.025,
            graph: GraphConfig::default(),
        }
    }
}

impl NetworkConfig {
    /// Creates a configuration for the given file pair.
    pub fn new(nodes_path: impl Into<PathBuf>, arcs_path: impl Into<PathBuf>) -> Self {
        Self {
            nodes_path: nodes_path.into(),
            arcs_path: arcs_path.into(),
            ..Default::default()
        }
    }

    /// Builder: set the field separator.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder: link transfer hubs with the given weight.
    pub fn with_transfer_time(mut self, time: f64) -> Self {
        self.transfer_time = Some(time);
        self
    }

    /// Builder: set the speed bound used by the A* estimate.
    pub fn with_max_speed(mut self, speed: f64) -> Self {
        self.max_speed = speed;
        self
    }

    /// Builder: set graph construction settings.
    pub fn with_graph(mut self, graph: GraphConfig) -> Self {
        self.graph = graph;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = self.delimiter;
        if d == '\n' || d == '\r' || d == '.' || d == '-' || d == '#' || d.is_ascii_digit() {
            return Err(ConfigError::InvalidDelimiter(d));
        }
        if let Some(time) = self.transfer_time {
            if !time.is_finite() || time < 0.0 {
                return Err(ConfigError::InvalidTransferTime);
            }
        }
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed);
        }
        Ok(())
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let nodes_path = std::env::var("METROGRAPH_NODES_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.nodes_path);

        let arcs_path = std::env::var("METROGRAPH_ARCS_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.arcs_path);

        let delimiter = std::env::var("METROGRAPH_DELIMITER")
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(defaults.delimiter);

        let transfer_time = std::env::var("METROGRAPH_TRANSFER_TIME")
            .ok()
            .and_then(|s| s.parse().ok());

        let max_speed = std::env::var("METROGRAPH_MAX_SPEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_speed);

        Self {
            nodes_path,
            arcs_path,
            delimiter,
            transfer_time,
            max_speed,
            graph: GraphConfig::from_env(),
        }
    }
}
