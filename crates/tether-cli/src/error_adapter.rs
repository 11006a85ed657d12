//! Error adapter for converting TetherError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use tether::{TetherError, graph::GraphError};

/// Adapter giving a [`TetherError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a TetherError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TetherError::Io(_) => "tether::io",
            TetherError::Graph(_) => "tether::graph",
            TetherError::Config(_) => "tether::config",
            TetherError::Input(_) => "tether::input",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            TetherError::Graph(GraphError::DanglingEdge { .. }) => {
                "every edge `source` and `target` must match a `[[nodes]]` id"
            }
            TetherError::Graph(GraphError::DuplicateNode(_)) => "node ids must be unique",
            TetherError::Graph(GraphError::NonFinitePosition(_)) => {
                "node `x` and `y` must be finite numbers, not nan or inf"
            }
            TetherError::Config(_) => {
                "see `tether/config.toml`; `engine` is one of auto, force, hierarchical"
            }
            TetherError::Input(_) => {
                "nodes need `id`, `x`, `y`; edges need `id`, `source`, `target`"
            }
            TetherError::Io(_) => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use tether::{graph::Endpoint, identifier::Id};

    use super::*;

    fn code(err: &TetherError) -> Option<String> {
        ErrorAdapter(err).code().map(|c| c.to_string())
    }

    fn help(err: &TetherError) -> Option<String> {
        ErrorAdapter(err).help().map(|h| h.to_string())
    }

    #[test]
    fn test_graph_error_code_and_help() {
        let err = TetherError::Graph(GraphError::DanglingEdge {
            edge: Id::new("e"),
            endpoint: Endpoint::Source,
            node: Id::new("x"),
        });

        assert_eq!(code(&err).as_deref(), Some("tether::graph"));
        assert!(help(&err).unwrap().contains("[[nodes]]"));
        assert_eq!(
            ErrorAdapter(&err).to_string(),
            "Graph error: edge `e` source references unknown node `x`"
        );
    }

    #[test]
    fn test_non_finite_position_help() {
        let err = TetherError::Graph(GraphError::NonFinitePosition(Id::new("n")));
        assert_eq!(code(&err).as_deref(), Some("tether::graph"));
        assert!(help(&err).unwrap().contains("finite"));
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = TetherError::Io(std::io::Error::other("disk on fire"));
        assert_eq!(code(&err).as_deref(), Some("tether::io"));
        assert_eq!(help(&err), None);
    }

    #[test]
    fn test_input_error_code() {
        let err = TetherError::Input("bad".to_string());
        assert_eq!(code(&err).as_deref(), Some("tether::input"));
        assert!(help(&err).is_some());
    }

    #[test]
    fn test_renders_with_graphical_handler() {
        let err = TetherError::Config("Missing configuration file: x.toml".to_string());
        let mut out = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut out, &ErrorAdapter(&err))
            .unwrap();
        assert!(out.contains("tether::config"));
        assert!(out.contains("Missing configuration file"));
    }
}
