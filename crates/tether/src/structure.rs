//! Graph structure analysis.
//!
//! [`GraphIndex`] is a petgraph-backed view of a validated [`Graph`] that
//! answers the structural questions layout selection needs: does the graph
//! contain a directed cycle, which nodes are roots, and how deep is each node
//! below the roots.
//!
//! Node indices follow input order, so every traversal here is deterministic
//! for a given node list.

use std::collections::VecDeque;

use indexmap::IndexMap;
use log::{debug, trace};
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};

use tether_core::{
    graph::{Graph, GraphError},
    identifier::Id,
};

/// Directed adjacency view over a validated [`Graph`].
#[derive(Debug)]
pub struct GraphIndex {
    graph: DiGraph<Id, ()>,
    indices: IndexMap<Id, NodeIndex>,
}

impl GraphIndex {
    /// Builds the index, validating referential integrity first.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] for duplicate node ids or dangling edge endpoints.
    pub fn from_graph(graph: &Graph) -> Result<Self, GraphError> {
        graph.validate()?;

        let mut inner = DiGraph::with_capacity(graph.nodes().len(), graph.edges().len());
        let mut indices = IndexMap::with_capacity(graph.nodes().len());
        for node in graph.nodes() {
            let idx = inner.add_node(node.id());
            indices.insert(node.id(), idx);
        }
        for edge in graph.edges() {
            // Validation guarantees both endpoints are present.
            let source = indices[&edge.source()];
            let target = indices[&edge.target()];
            inner.add_edge(source, target, ());
        }

        Ok(Self {
            graph: inner,
            indices,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if any directed cycle exists, self-loops included.
    ///
    /// Depth-first search keeping an "on stack" set separate from the
    /// "visited" set: reaching a node that is still on the stack closes a cycle,
    /// while reaching a visited node that has already been popped does not
    /// (diamonds are fine).
    pub fn has_cycle(&self) -> bool {
        fn dfs(
            graph: &DiGraph<Id, ()>,
            node: NodeIndex,
            visited: &mut [bool],
            on_stack: &mut [bool],
        ) -> bool {
            visited[node.index()] = true;
            on_stack[node.index()] = true;

            for next in graph.neighbors_directed(node, Direction::Outgoing) {
                if on_stack[next.index()] {
                    trace!(from:% = graph[node], to:% = graph[next]; "Back edge found");
                    return true;
                }
                if !visited[next.index()] && dfs(graph, next, visited, on_stack) {
                    return true;
                }
            }

            on_stack[node.index()] = false;
            false
        }

        let count = self.graph.node_count();
        let mut visited = vec![false; count];
        let mut on_stack = vec![false; count];

        let found = self.graph.node_indices().any(|start| {
            !visited[start.index()] && dfs(&self.graph, start, &mut visited, &mut on_stack)
        });
        debug!(has_cycle = found; "Cycle check finished");
        found
    }

    /// True when a layered layout applies: at least one edge and no cycle.
    pub fn is_hierarchical(&self) -> bool {
        self.edge_count() > 0 && !self.has_cycle()
    }

    /// Nodes without incoming edges, in input order.
    pub fn roots(&self) -> Vec<Id> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|idx| self.graph[idx])
            .collect()
    }

    /// BFS depth of every node, keyed in input order.
    ///
    /// All roots are enqueued at level 0 together, so a node reachable from
    /// several roots or parents keeps the level of its first visit. When the
    /// graph has no root (every node sits on or below a cycle) the first node
    /// is used as the only root. Nodes the search never reaches stay at level 0.
    pub fn levels(&self) -> IndexMap<Id, usize> {
        let mut levels: Vec<Option<usize>> = vec![None; self.graph.node_count()];
        let mut queue = VecDeque::new();

        let mut roots: Vec<NodeIndex> = self
            .roots()
            .into_iter()
            .map(|id| self.indices[&id])
            .collect();
        if roots.is_empty() {
            if let Some(first) = self.graph.node_indices().next() {
                debug!(root:% = self.graph[first]; "No root found, falling back to first node");
                roots.push(first);
            }
        }

        for root in roots {
            levels[root.index()] = Some(0);
            queue.push_back(root);
        }

        while let Some(node) = queue.pop_front() {
            let level = levels[node.index()].unwrap_or(0);
            for next in self.graph.neighbors_directed(node, Direction::Outgoing) {
                if levels[next.index()].is_none() {
                    levels[next.index()] = Some(level + 1);
                    queue.push_back(next);
                }
            }
        }

        let unreached = levels.iter().filter(|level| level.is_none()).count();
        if unreached > 0 {
            debug!(unreached = unreached; "Nodes not reached from any root default to level 0");
        }

        self.graph
            .node_indices()
            .map(|idx| (self.graph[idx], levels[idx.index()].unwrap_or(0)))
            .collect()
    }
}

/// Returns true if `graph` contains a directed cycle.
///
/// # Errors
///
/// Returns [`GraphError`] if the graph fails referential-integrity validation.
pub fn has_cycle(graph: &Graph) -> Result<bool, GraphError> {
    Ok(GraphIndex::from_graph(graph)?.has_cycle())
}

/// Returns true if `graph` has edges and no directed cycle.
///
/// # Errors
///
/// Returns [`GraphError`] if the graph fails referential-integrity validation.
pub fn is_hierarchical(graph: &Graph) -> Result<bool, GraphError> {
    Ok(GraphIndex::from_graph(graph)?.is_hierarchical())
}
