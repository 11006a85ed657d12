//! Boundary projection and handle placement.

use tether_core::{
    geometry::{Bounds, Point, Size},
    graph::{Edge, Node, Side},
};

/// Distance a handle sits outside its side of the node box.
///
/// Renderers draw handles at this same offset, so both sides must agree.
pub const HANDLE_OFFSET: f32 = 16.0;

/// Returns the point on the boundary of `bounds` nearest to `point`.
///
/// Each side is treated as a segment and `point` is clamped onto it; the
/// closest of the four candidates wins. This holds for points inside the box
/// too, which land on the nearest side rather than staying put. Exact ties
/// resolve in the order left, right, top, bottom.
///
/// # Examples
///
/// ```
/// # use tether::connection::closest_boundary_point;
/// # use tether::geometry::{Bounds, Point, Size};
/// let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 50.0));
/// let snapped = closest_boundary_point(bounds, Point::new(500.0, 25.0));
/// assert_eq!(snapped, Point::new(100.0, 25.0));
/// ```
pub fn closest_boundary_point(bounds: Bounds, point: Point) -> Point {
    let clamped_x = clamp(point.x(), bounds.min_x(), bounds.max_x());
    let clamped_y = clamp(point.y(), bounds.min_y(), bounds.max_y());

    let candidates = [
        Point::new(bounds.min_x(), clamped_y),
        Point::new(bounds.max_x(), clamped_y),
        Point::new(clamped_x, bounds.min_y()),
        Point::new(clamped_x, bounds.max_y()),
    ];

    let mut best = candidates[0];
    let mut best_distance = point.distance(best);
    for candidate in &candidates[1..] {
        let distance = point.distance(*candidate);
        if distance < best_distance {
            best = *candidate;
            best_distance = distance;
        }
    }
    best
}

/// Like `f32::clamp`, but does not panic when `min > max`.
fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Where the handle on `side` of a node box is drawn.
///
/// `position` is the box's top-left corner.
pub fn handle_anchor(position: Point, size: Size, side: Side) -> Point {
    let bounds = Bounds::new_from_top_left(position, size);
    side.midpoint(bounds)
        .add_point(side.outward().scale(HANDLE_OFFSET))
}

/// The two points a renderer draws an existing edge between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEndpoints {
    source: Point,
    target: Point,
}

impl EdgeEndpoints {
    pub fn source(&self) -> Point {
        self.source
    }

    pub fn target(&self) -> Point {
        self.target
    }
}

/// Resolve where `edge` starts and ends on screen.
///
/// The start is the source handle anchor when the edge recorded one, else the
/// source box center. The end is the stored target point when present, else
/// the point on the target box boundary nearest to the start.
pub fn resolve_edge_endpoints(edge: &Edge, source: &Node, target: &Node) -> EdgeEndpoints {
    let start = match edge.source_handle() {
        Some(side) => handle_anchor(source.position(), source.size_or_default(), side),
        None => source.bounds().center(),
    };
    let end = edge
        .target_position()
        .unwrap_or_else(|| closest_boundary_point(target.bounds(), start));

    EdgeEndpoints {
        source: start,
        target: end,
    }
}
