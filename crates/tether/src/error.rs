//! Error types for Tether operations.
//!
//! This module provides the main error type [`TetherError`]. Geometry and
//! connection-session updates never fail; everything else reports through
//! this type.

use std::io;

use thiserror::Error;

use tether_core::graph::GraphError;

/// The main error type for Tether operations.
#[derive(Debug, Error)]
pub enum TetherError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input graph violates referential integrity.
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A graph file could not be read into a [`Graph`](tether_core::graph::Graph).
    #[error("Invalid input: {0}")]
    Input(String),
}

#[cfg(test)]
mod tests {
    use tether_core::{graph::Endpoint, identifier::Id};

    use super::*;

    #[test]
    fn test_graph_error_message() {
        let err: TetherError = GraphError::DanglingEdge {
            edge: Id::new("e1"),
            endpoint: Endpoint::Target,
            node: Id::new("missing"),
        }
        .into();

        assert_eq!(
            err.to_string(),
            "Graph error: edge `e1` target references unknown node `missing`"
        );
    }

    #[test]
    fn test_config_error_message() {
        let err = TetherError::Config("bad engine".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad engine");
    }

    #[test]
    fn test_io_error_converts() {
        let err: TetherError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, TetherError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: gone");
    }
}
