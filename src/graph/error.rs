//! Error types for graph construction and the graph engines.

use thiserror::Error;

use super::config::ConfigError;

/// Errors raised by the graph and its engines.
///
/// An unreachable target is not an error: engines report it with an empty
/// [`GraphPath`](super::path::GraphPath) of infinite length.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Unknown vertex: {0}")]
    UnknownVertex(String),

    #[error("Negative-weight cycle detected")]
    NegativeCycle,

    #[error("Invalid link weight: {weight}")]
    InvalidWeight { weight: f64 },

    #[error("Graph has not been colored yet, call color_graph() first")]
    NotColored,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Result alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphError::UnknownVertex("Z".to_string());
        assert_eq!(err.to_string(), "Unknown vertex: Z");

        let err = GraphError::InvalidWeight { weight: f64::NAN };
        assert!(err.to_string().contains("NaN"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: GraphError = ConfigError::ZeroExpansionLimit.into();
        assert!(matches!(err, GraphError::InvalidConfig(_)));
        assert!(err.to_string().contains("expansion"));
    }
}
