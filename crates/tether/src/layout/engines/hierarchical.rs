//! Hierarchical layout engine
//!
//! Places each node on a horizontal row chosen by its BFS depth from the
//! roots. Rows are spaced [`LEVEL_HEIGHT`] apart and nodes within a row are
//! spaced [`LEVEL_WIDTH`] apart, with the row centered on the canvas. A level
//! holding one node puts it at `width / 2`, the same x a lone node gets from
//! the auto layout.

use std::collections::BTreeMap;

use log::debug;

use tether_core::{
    geometry::Point,
    graph::{Graph, Node},
};

use crate::{config::LayoutOptions, structure::GraphIndex};

/// Horizontal slot width for one node within a level.
pub const LEVEL_WIDTH: f32 = 300.0;
/// Vertical distance between consecutive levels.
pub const LEVEL_HEIGHT: f32 = 250.0;

/// Layered layout engine.
pub struct Engine {
    canvas_width: f32,
}

impl Engine {
    pub fn new(options: &LayoutOptions) -> Self {
        Self {
            canvas_width: options.width(),
        }
    }

    /// Position every node by level.
    ///
    /// Within a level nodes keep their input order. Nodes the BFS never
    /// reached share level 0 with the roots.
    pub fn calculate(&self, graph: &Graph, index: &GraphIndex) -> Vec<Node> {
        let levels = index.levels();

        let mut rows: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (position, node) in graph.nodes().iter().enumerate() {
            let level = levels.get(&node.id()).copied().unwrap_or(0);
            rows.entry(level).or_default().push(position);
        }

        debug!(level_count = rows.len(); "Placing nodes by level");

        let center_x = self.canvas_width / 2.0;
        let mut placed: Vec<Point> = vec![Point::default(); graph.nodes().len()];
        for (level, members) in &rows {
            // Offset of slot 0 from the center, in slots.
            let first_slot = -(members.len() as f32 - 1.0) / 2.0;
            let y = *level as f32 * LEVEL_HEIGHT;

            for (slot, &position) in members.iter().enumerate() {
                let x = center_x + (first_slot + slot as f32) * LEVEL_WIDTH;
                placed[position] = Point::new(x, y);
            }
        }

        graph
            .nodes()
            .iter()
            .zip(placed)
            .map(|(node, point)| node.with_position(point))
            .collect()
    }
}
