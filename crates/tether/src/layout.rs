//! Diagram layout.
//!
//! Every entry point validates the graph first, never mutates its input, and
//! returns a new [`Graph`] whose nodes carry updated positions. Edges pass
//! through unchanged.
//!
//! # Example
//!
//! ```
//! # use tether::{config::LayoutOptions, layout, identifier::Id, geometry::Point};
//! # use tether::graph::{Edge, Graph, Node};
//! let graph = Graph::new(
//!     vec![
//!         Node::new(Id::new("a"), Point::default()),
//!         Node::new(Id::new("b"), Point::default()),
//!     ],
//!     vec![Edge::new(Id::new("e"), Id::new("a"), Id::new("b"))],
//! );
//!
//! let placed = layout::apply_auto_layout(&graph, &LayoutOptions::default()).unwrap();
//! assert_eq!(placed.nodes()[1].position().y(), 250.0);
//! ```

mod clutter;
mod engines;

pub use clutter::{CLUTTER_DISTANCE, is_layout_cluttered};
pub use engines::{
    AppliedLayout, LayoutKind,
    hierarchical::{LEVEL_HEIGHT, LEVEL_WIDTH},
};

pub(crate) use engines::dispatch;

use tether_core::graph::Graph;

use crate::{config::LayoutOptions, error::TetherError};

/// Relax node positions with the force simulation.
///
/// # Errors
///
/// Returns [`TetherError::Graph`] if the graph fails [`Graph::validate`].
pub fn apply_force_directed_layout(
    graph: &Graph,
    options: &LayoutOptions,
) -> Result<Graph, TetherError> {
    apply_layout(LayoutKind::Force, graph, options)
}

/// Arrange nodes in rows by depth from the roots.
///
/// # Errors
///
/// Returns [`TetherError::Graph`] if the graph fails [`Graph::validate`].
pub fn apply_hierarchical_layout(
    graph: &Graph,
    options: &LayoutOptions,
) -> Result<Graph, TetherError> {
    apply_layout(LayoutKind::Hierarchical, graph, options)
}

/// Pick a layout from the graph's shape.
///
/// An empty graph is returned unchanged and a single node is moved to the
/// canvas center. Otherwise acyclic graphs with edges get the hierarchical
/// layout and everything else the force layout.
///
/// # Errors
///
/// Returns [`TetherError::Graph`] if the graph fails [`Graph::validate`].
pub fn apply_auto_layout(graph: &Graph, options: &LayoutOptions) -> Result<Graph, TetherError> {
    apply_layout(LayoutKind::Auto, graph, options)
}

/// Run the layout selected by `kind`.
///
/// # Errors
///
/// Returns [`TetherError::Graph`] if the graph fails [`Graph::validate`].
pub fn apply_layout(
    kind: LayoutKind,
    graph: &Graph,
    options: &LayoutOptions,
) -> Result<Graph, TetherError> {
    dispatch(kind, graph, options).map(|(graph, _)| graph)
}
