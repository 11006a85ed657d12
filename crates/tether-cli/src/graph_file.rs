//! TOML graph files.
//!
//! The on-disk form is a flat list of `[[nodes]]` and `[[edges]]` tables:
//!
//! ```toml
//! [[nodes]]
//! id = "api"
//! x = 0.0
//! y = 0.0
//! width = 180.0
//! height = 60.0
//!
//! [[edges]]
//! id = "api-db"
//! source = "api"
//! target = "db"
//! source_handle = "bottom"
//! ```
//!
//! The same schema is used for input and output.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tether::{
    TetherError,
    geometry::{Point, Size},
    graph::{Edge, Graph, Node, Side},
    identifier::Id,
};

/// Problems reading a graph file.
#[derive(Debug, Error)]
pub enum GraphFileError {
    #[error("Failed to parse TOML graph: {0}")]
    Parse(String),

    #[error("Failed to write TOML graph: {0}")]
    Render(String),

    #[error("node `{0}` sets only one of `width` and `height`")]
    PartialSize(String),

    #[error("edge `{0}` sets only one of `target_x` and `target_y`")]
    PartialTarget(String),
}

impl From<GraphFileError> for TetherError {
    fn from(err: GraphFileError) -> Self {
        TetherError::Input(err.to_string())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct GraphRecord {
    #[serde(default)]
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeRecord {
    id: String,
    x: f32,
    y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EdgeRecord {
    id: String,
    source: String,
    target: String,
    #[serde(default = "default_directed")]
    directed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_handle: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_y: Option<f32>,
}

fn default_directed() -> bool {
    true
}

impl NodeRecord {
    fn into_node(self) -> Result<Node, GraphFileError> {
        let node = Node::new(Id::new(&self.id), Point::new(self.x, self.y));
        match (self.width, self.height) {
            (Some(width), Some(height)) => Ok(node.with_size(Size::new(width, height))),
            (None, None) => Ok(node),
            _ => Err(GraphFileError::PartialSize(self.id)),
        }
    }

    fn from_node(node: &Node) -> Self {
        Self {
            id: node.id().to_string(),
            x: node.position().x(),
            y: node.position().y(),
            width: node.size().map(Size::width),
            height: node.size().map(Size::height),
        }
    }
}

impl EdgeRecord {
    fn into_edge(self) -> Result<Edge, GraphFileError> {
        let mut edge = Edge::new(Id::new(&self.id), Id::new(&self.source), Id::new(&self.target))
            .with_directed(self.directed);
        if let Some(side) = self.source_handle {
            edge = edge.with_source_handle(side);
        }
        match (self.target_x, self.target_y) {
            (Some(x), Some(y)) => Ok(edge.with_target_position(Point::new(x, y))),
            (None, None) => Ok(edge),
            _ => Err(GraphFileError::PartialTarget(self.id)),
        }
    }

    fn from_edge(edge: &Edge) -> Self {
        let target = edge.target_position();
        Self {
            id: edge.id().to_string(),
            source: edge.source().to_string(),
            target: edge.target().to_string(),
            directed: edge.is_directed(),
            source_handle: edge.source_handle(),
            target_x: target.map(Point::x),
            target_y: target.map(Point::y),
        }
    }
}

/// Parse a TOML graph file.
///
/// Only the file format is checked here; referential integrity is left to the
/// layout call.
///
/// # Errors
///
/// Returns [`TetherError::Input`] for malformed TOML or half-specified
/// sizes and target points.
pub fn parse(source: &str) -> Result<Graph, TetherError> {
    let record: GraphRecord =
        toml::from_str(source).map_err(|err| GraphFileError::Parse(err.to_string()))?;

    let nodes = record
        .nodes
        .into_iter()
        .map(NodeRecord::into_node)
        .collect::<Result<Vec<_>, _>>()?;
    let edges = record
        .edges
        .into_iter()
        .map(EdgeRecord::into_edge)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(node_count = nodes.len(), edge_count = edges.len(); "Graph file parsed");
    Ok(Graph::new(nodes, edges))
}

/// Render `graph` in the TOML graph file format.
///
/// # Errors
///
/// Returns [`TetherError::Input`] if serialization fails.
pub fn render(graph: &Graph) -> Result<String, TetherError> {
    let record = GraphRecord {
        nodes: graph.nodes().iter().map(NodeRecord::from_node).collect(),
        edges: graph.edges().iter().map(EdgeRecord::from_edge).collect(),
    };
    let output =
        toml::to_string(&record).map_err(|err| GraphFileError::Render(err.to_string()))?;
    Ok(output)
}
