//! Layout engine selection
//!
//! A closed set of layout algorithms selected by [`LayoutKind`] and
//! dispatched with a `match`. Each engine is a short-lived value built from the
//! caller's [`LayoutOptions`] for one call and dropped afterwards.

pub(crate) mod force;
pub(crate) mod hierarchical;

use std::{fmt, str::FromStr};

use log::{debug, info};
use serde::Deserialize;

use tether_core::graph::Graph;

use crate::{config::LayoutOptions, error::TetherError, structure::GraphIndex};

/// Which layout algorithm to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Hierarchical for acyclic graphs with edges, force-directed otherwise.
    #[default]
    Auto,
    /// Force-directed relaxation.
    Force,
    /// Layers by BFS depth from the roots.
    Hierarchical,
}

impl FromStr for LayoutKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "force" => Ok(Self::Force),
            "hierarchical" => Ok(Self::Hierarchical),
            _ => Err("Unsupported layout engine"),
        }
    }
}

impl From<LayoutKind> for &'static str {
    fn from(val: LayoutKind) -> Self {
        match val {
            LayoutKind::Auto => "auto",
            LayoutKind::Force => "force",
            LayoutKind::Hierarchical => "hierarchical",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// What a layout call actually did to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedLayout {
    /// Empty graph, returned as-is.
    Unchanged,
    /// Single node moved to the canvas center.
    Centered,
    ForceDirected,
    Hierarchical,
}

/// Runs the layout selected by `kind` and reports which one was applied.
pub(crate) fn dispatch(
    kind: LayoutKind,
    graph: &Graph,
    options: &LayoutOptions,
) -> Result<(Graph, AppliedLayout), TetherError> {
    match kind {
        LayoutKind::Force => {
            graph.validate()?;
            let nodes = force::Engine::new(options).calculate(graph);
            Ok((graph.with_nodes(nodes), AppliedLayout::ForceDirected))
        }
        LayoutKind::Hierarchical => {
            let index = GraphIndex::from_graph(graph)?;
            let nodes = hierarchical::Engine::new(options).calculate(graph, &index);
            Ok((graph.with_nodes(nodes), AppliedLayout::Hierarchical))
        }
        LayoutKind::Auto => auto(graph, options),
    }
}

fn auto(graph: &Graph, options: &LayoutOptions) -> Result<(Graph, AppliedLayout), TetherError> {
    let index = GraphIndex::from_graph(graph)?;

    match graph.nodes() {
        [] => {
            debug!("Empty graph, nothing to lay out");
            Ok((graph.clone(), AppliedLayout::Unchanged))
        }
        [single] => {
            debug!(node:% = single.id(); "Single node, centering on canvas");
            let centered = vec![single.with_position(options.center())];
            Ok((graph.with_nodes(centered), AppliedLayout::Centered))
        }
        _ if index.is_hierarchical() => {
            info!(node_count = index.node_count(); "Acyclic graph, using hierarchical layout");
            let nodes = hierarchical::Engine::new(options).calculate(graph, &index);
            Ok((graph.with_nodes(nodes), AppliedLayout::Hierarchical))
        }
        _ => {
            info!(node_count = index.node_count(); "Cyclic or edgeless graph, using force layout");
            let nodes = force::Engine::new(options).calculate(graph);
            Ok((graph.with_nodes(nodes), AppliedLayout::ForceDirected))
        }
    }
}
