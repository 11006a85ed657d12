//! Graph data model: nodes, edges and handle sides.
//!
//! These are the records a caller hands to the layout engine and to the
//! connection session. They are plain values; layout returns fresh copies
//! instead of touching the caller's records.

use std::{collections::HashSet, fmt, str::FromStr};

use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

/// One of the four sides of a node box a handle can sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// All sides in clockwise order starting at the top.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Unit vector pointing away from the box through this side.
    pub fn outward(self) -> Point {
        match self {
            Side::Top => Point::new(0.0, -1.0),
            Side::Right => Point::new(1.0, 0.0),
            Side::Bottom => Point::new(0.0, 1.0),
            Side::Left => Point::new(-1.0, 0.0),
        }
    }

    /// Midpoint of this side on `bounds`.
    pub fn midpoint(self, bounds: Bounds) -> Point {
        let center = bounds.center();
        match self {
            Side::Top => center.with_y(bounds.min_y()),
            Side::Right => center.with_x(bounds.max_x()),
            Side::Bottom => center.with_y(bounds.max_y()),
            Side::Left => center.with_x(bounds.min_x()),
        }
    }
}

impl FromStr for Side {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "right" => Ok(Self::Right),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            _ => Err("Unsupported handle side"),
        }
    }
}

impl From<Side> for &'static str {
    fn from(val: Side) -> Self {
        match val {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// A diagram node: an identifier, the top-left corner of its box and an optional size.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    position: Point,
    size: Option<Size>,
}

impl Node {
    /// Size assumed for nodes that do not carry an explicit one.
    pub const DEFAULT_SIZE: Size = Size::new(150.0, 50.0);

    /// Create a new Node at `position` without an explicit size.
    pub fn new(id: Id, position: Point) -> Self {
        Self {
            id,
            position,
            size: None,
        }
    }

    /// Returns the node with an explicit size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Returns a copy of the node moved to `position`.
    pub fn with_position(&self, position: Point) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    /// Get the node identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Top-left corner of the node box.
    pub fn position(&self) -> Point {
        self.position
    }

    /// The explicit size, if the caller supplied one.
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// The explicit size, or [`Node::DEFAULT_SIZE`].
    pub fn size_or_default(&self) -> Size {
        self.size.unwrap_or(Self::DEFAULT_SIZE)
    }

    /// The node box.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size_or_default())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A connection between two nodes.
///
/// Besides the endpoints an edge may carry manual anchor metadata: the side
/// of the source node the user dragged it from and the exact point it was
/// dropped on the target.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: Id,
    source: Id,
    target: Id,
    directed: bool,
    source_handle: Option<Side>,
    target_position: Option<Point>,
}

impl Edge {
    /// Create a new directed Edge without anchor metadata.
    pub fn new(id: Id, source: Id, target: Id) -> Self {
        Self {
            id,
            source,
            target,
            directed: true,
            source_handle: None,
            target_position: None,
        }
    }

    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn with_source_handle(mut self, side: Side) -> Self {
        self.source_handle = Some(side);
        self
    }

    pub fn with_target_position(mut self, position: Point) -> Self {
        self.target_position = Some(position);
        self
    }

    /// Get the edge identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the source node Id of this edge.
    pub fn source(&self) -> Id {
        self.source
    }

    /// Get the target node Id of this edge.
    pub fn target(&self) -> Id {
        self.target
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn source_handle(&self) -> Option<Side> {
        self.source_handle
    }

    pub fn target_position(&self) -> Option<Point> {
        self.target_position
    }
}

/// Which end of an edge a [`GraphError::DanglingEdge`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}

/// Referential-integrity violations in a [`Graph`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("edge `{edge}` {endpoint} references unknown node `{node}`")]
    DanglingEdge {
        edge: Id,
        endpoint: Endpoint,
        node: Id,
    },

    #[error("node id `{0}` appears more than once")]
    DuplicateNode(Id),

    #[error("node `{0}` has a non-finite position")]
    NonFinitePosition(Id),
}

/// A node list with unique ids plus the edges between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Nodes in input order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in input order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Looks a node up by id.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns a graph with `nodes` in place of the current ones and the same edges.
    pub fn with_nodes(&self, nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            edges: self.edges.clone(),
        }
    }

    /// Checks the graph is safe to lay out.
    ///
    /// Node ids must be unique and node positions finite. Every edge endpoint
    /// must name an existing node.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphError`] found, scanning nodes then edges in input order.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id()) {
                return Err(GraphError::DuplicateNode(node.id()));
            }
            if !node.position().is_finite() {
                return Err(GraphError::NonFinitePosition(node.id()));
            }
        }

        for edge in &self.edges {
            for (endpoint, node) in [
                (Endpoint::Source, edge.source()),
                (Endpoint::Target, edge.target()),
            ] {
                if !seen.contains(&node) {
                    return Err(GraphError::DanglingEdge {
                        edge: edge.id(),
                        endpoint,
                        node,
                    });
                }
            }
        }

        trace!(
            node_count = self.nodes.len(),
            edge_count = self.edges.len();
            "Graph validated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> Node {
        Node::new(Id::new(id), Point::default())
    }

    fn edge(id: &str, source: &str, target: &str) -> Edge {
        Edge::new(Id::new(id), Id::new(source), Id::new(target))
    }

    #[test]
    fn test_side_from_str_roundtrip() {
        for side in Side::ALL {
            let text = side.to_string();
            assert_eq!(text.parse::<Side>(), Ok(side));
        }
        assert!("diagonal".parse::<Side>().is_err());
    }

    #[test]
    fn test_side_midpoint_and_outward() {
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 50.0));
        assert_eq!(Side::Top.midpoint(bounds), Point::new(50.0, 0.0));
        assert_eq!(Side::Right.midpoint(bounds), Point::new(100.0, 25.0));
        assert_eq!(Side::Bottom.midpoint(bounds), Point::new(50.0, 50.0));
        assert_eq!(Side::Left.midpoint(bounds), Point::new(0.0, 25.0));
        assert_eq!(Side::Left.outward(), Point::new(-1.0, 0.0));
    }

    #[test]
    fn test_node_default_size() {
        let n = node("a");
        assert_eq!(n.size(), None);
        assert_eq!(n.size_or_default(), Node::DEFAULT_SIZE);

        let sized = n.clone().with_size(Size::new(10.0, 20.0));
        assert_eq!(sized.bounds().max_x(), 10.0);
        assert_eq!(sized.bounds().max_y(), 20.0);
    }

    #[test]
    fn test_node_with_position_leaves_original() {
        let original = node("a").with_size(Size::new(10.0, 10.0));
        let moved = original.with_position(Point::new(5.0, 6.0));

        assert_eq!(original.position(), Point::default());
        assert_eq!(moved.position(), Point::new(5.0, 6.0));
        assert_eq!(moved.size(), original.size());
        assert_eq!(moved.id(), original.id());
    }

    #[test]
    fn test_edge_builder() {
        let e = edge("e", "a", "b")
            .with_directed(false)
            .with_source_handle(Side::Bottom)
            .with_target_position(Point::new(1.0, 2.0));

        assert!(!e.is_directed());
        assert_eq!(e.source_handle(), Some(Side::Bottom));
        assert_eq!(e.target_position(), Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn test_validate_ok() {
        let graph = Graph::new(vec![node("a"), node("b")], vec![edge("e1", "a", "b")]);
        assert_eq!(graph.validate(), Ok(()));
    }

    #[test]
    fn test_validate_dangling_target() {
        let graph = Graph::new(vec![node("a")], vec![edge("e1", "a", "ghost")]);
        assert_eq!(
            graph.validate(),
            Err(GraphError::DanglingEdge {
                edge: Id::new("e1"),
                endpoint: Endpoint::Target,
                node: Id::new("ghost"),
            })
        );
    }

    #[test]
    fn test_validate_dangling_source_message() {
        let graph = Graph::new(vec![node("a")], vec![edge("e9", "nowhere", "a")]);
        let err = graph.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "edge `e9` source references unknown node `nowhere`"
        );
    }

    #[test]
    fn test_validate_duplicate_node() {
        let graph = Graph::new(vec![node("a"), node("a")], vec![]);
        assert_eq!(
            graph.validate(),
            Err(GraphError::DuplicateNode(Id::new("a")))
        );
    }

    #[test]
    fn test_validate_non_finite_position() {
        let nan = Node::new(Id::new("nan"), Point::new(f32::NAN, 0.0));
        let graph = Graph::new(vec![node("a"), nan], vec![edge("e1", "a", "nan")]);
        assert_eq!(
            graph.validate(),
            Err(GraphError::NonFinitePosition(Id::new("nan")))
        );

        let far = Node::new(Id::new("far"), Point::new(0.0, f32::NEG_INFINITY));
        let err = Graph::new(vec![far], vec![]).validate().unwrap_err();
        assert_eq!(err.to_string(), "node `far` has a non-finite position");
    }

    #[test]
    fn test_with_nodes_keeps_edges() {
        let graph = Graph::new(vec![node("a"), node("b")], vec![edge("e1", "a", "b")]);
        let replaced = graph.with_nodes(vec![node("a").with_position(Point::new(1.0, 1.0))]);
        assert_eq!(replaced.edges(), graph.edges());
        assert_eq!(replaced.nodes().len(), 1);
        assert!(replaced.node(Id::new("b")).is_none());
    }
}
