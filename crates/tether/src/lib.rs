//! Tether - automatic layout and interactive edge drawing for node/edge diagrams.
//!
//! Positions the nodes of a diagram (force-directed, hierarchical, or picked
//! automatically from the graph's shape) and drives the drag-to-connect
//! interaction that creates new edges between nodes.

pub mod config;
pub mod connection;
pub mod layout;
pub mod structure;

mod error;

pub use tether_core::{geometry, graph, identifier};

pub use error::TetherError;

use log::{debug, info};

use config::AppConfig;
use graph::Graph;
use layout::{AppliedLayout, LayoutKind};

/// Builder for laying out Tether graphs.
///
/// Bundles an [`AppConfig`] so callers configure the engine and its options
/// once and lay out many graphs with them.
///
/// # Examples
///
/// ```rust
/// use tether::{LayoutBuilder, config::AppConfig, layout::LayoutKind};
/// use tether::{geometry::Point, graph::{Graph, Node}, identifier::Id};
///
/// let graph = Graph::new(vec![Node::new(Id::new("solo"), Point::default())], vec![]);
///
/// let builder = LayoutBuilder::new(AppConfig::default().with_engine(LayoutKind::Auto));
/// let outcome = builder.layout(&graph).expect("Failed to lay out");
///
/// assert_eq!(outcome.graph().nodes()[0].position(), Point::new(600.0, 400.0));
/// assert!(!outcome.is_cluttered());
/// ```
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Engine selection and layout options
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lay out `graph` with the configured engine.
    ///
    /// The input graph is left untouched; the outcome carries a new graph
    /// with updated positions, the layout that actually ran, and whether the
    /// result is cluttered.
    ///
    /// # Errors
    ///
    /// Returns [`TetherError::Graph`] if the graph fails
    /// [`Graph::validate`](graph::Graph::validate).
    pub fn layout(&self, graph: &Graph) -> Result<LayoutOutcome, TetherError> {
        let engine = self.config.engine();
        info!(
            engine:% = engine,
            node_count = graph.nodes().len(),
            edge_count = graph.edges().len();
            "Laying out graph"
        );

        let (graph, applied) = layout::dispatch(engine, graph, self.config.layout())?;
        let cluttered = layout::is_layout_cluttered(graph.nodes());

        debug!(applied:? = applied, cluttered = cluttered; "Layout finished");

        Ok(LayoutOutcome {
            graph,
            requested: engine,
            applied,
            cluttered,
        })
    }
}

/// Result of [`LayoutBuilder::layout`].
#[derive(Debug, Clone)]
pub struct LayoutOutcome {
    graph: Graph,
    requested: LayoutKind,
    applied: AppliedLayout,
    cluttered: bool,
}

impl LayoutOutcome {
    /// The positioned graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Engine the caller asked for.
    pub fn requested(&self) -> LayoutKind {
        self.requested
    }

    /// What actually ran; differs from the request when `Auto` picked.
    pub fn applied(&self) -> AppliedLayout {
        self.applied
    }

    /// True if two node centers ended up closer than
    /// [`layout::CLUTTER_DISTANCE`].
    pub fn is_cluttered(&self) -> bool {
        self.cluttered
    }
}
