//! Graph and engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for [`Graph`](super::Graph) construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Whether to maintain the dense adjacency matrix next to the adjacency list.
    pub build_matrix: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self { build_matrix: true }
    }
}

impl GraphConfig {
    /// Creates a new configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: enable/disable the dense adjacency matrix.
    pub fn with_matrix(mut self, enabled: bool) -> Self {
        self.build_matrix = enabled;
        self
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        let build_matrix = std::env::var("METROGRAPH_BUILD_MATRIX")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(true);

        Self { build_matrix }
    }
}

/// Configuration shared by the path-finding engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    /// Maximum number of nodes finalized by Dijkstra or expanded by A*
    /// before the search gives up (None = unlimited).
    pub max_expansions: Option<usize>,

    /// Whether Bellman-Ford stops as soon as a round relaxes nothing.
    pub early_exit: bool,

    /// Whether Dijkstra logs a warning when it meets a negative weight.
    pub warn_on_negative: bool,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            max_expansions: None,
            early_exit: true,
            warn_on_negative: true,
        }
    }
}

impl PathConfig {
    /// Creates a new configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: bound the main search loop.
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Builder: remove the search bound.
    pub fn unbounded(mut self) -> Self {
        self.max_expansions = None;
        self
    }

    /// Builder: enable/disable Bellman-Ford early exit.
    pub fn with_early_exit(mut self, enabled: bool) -> Self {
        self.early_exit = enabled;
        self
    }

    /// Builder: enable/disable negative weight warnings.
    pub fn with_negative_warning(mut self, enabled: bool) -> Self {
        self.warn_on_negative = enabled;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_expansions == Some(0) {
            return Err(ConfigError::ZeroExpansionLimit);
        }
        Ok(())
    }

    /// Loads configuration from environment variables.
    ///
    /// `METROGRAPH_MAX_EXPANSIONS=0` (or unset) means unlimited.
    pub fn from_env() -> Self {
        let max_expansions = std::env::var("METROGRAPH_MAX_EXPANSIONS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0);

        let early_exit = std::env::var("METROGRAPH_EARLY_EXIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(true);

        Self {
            max_expansions,
            early_exit,
            ..Default::default()
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroExpansionLimit,
    InvalidDelimiter(char),
    InvalidTransferTime,
    InvalidSpeed,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroExpansionLimit => write!(f, "Maximum expansions must be at least 1"),
            Self::InvalidDelimiter(c) => write!(f, "Field delimiter {:?} clashes with record content", c),
            Self::InvalidTransferTime => {
                write!(f, "Transfer time must be a finite, non-negative number")
            }
            Self::InvalidSpeed => write!(f, "Maximum speed must be a finite, positive number"),
        }
    }
}

impl std::error::Error for ConfigError {}
