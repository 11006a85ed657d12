//! Clutter detection.

use log::trace;

use tether_core::graph::Node;

/// Node centers closer than this are considered cluttered.
pub const CLUTTER_DISTANCE: f32 = 150.0;

/// Returns true if any two distinct nodes have box centers closer than
/// [`CLUTTER_DISTANCE`].
///
/// Nodes without a size use [`Node::DEFAULT_SIZE`]. Checks every pair, so
/// this is meant as a UI hint for modest node counts.
pub fn is_layout_cluttered(nodes: &[Node]) -> bool {
    let centers: Vec<_> = nodes.iter().map(|node| node.bounds().center()).collect();

    for (i, a) in centers.iter().enumerate() {
        for (j, b) in centers.iter().enumerate().skip(i + 1) {
            if a.distance(*b) < CLUTTER_DISTANCE {
                trace!(first:% = nodes[i].id(), second:% = nodes[j].id(); "Nodes too close");
                return true;
            }
        }
    }

    false
}
