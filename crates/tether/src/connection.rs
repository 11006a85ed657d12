//! Interactive edge creation.
//!
//! The geometry helpers are pure projections a renderer shares with the
//! session: where handles sit and where a line meets a node box.
//! [`ConnectionSession`] is the drag state machine built on top of them.

mod geometry;
mod session;

pub use geometry::{
    EdgeEndpoints, HANDLE_OFFSET, closest_boundary_point, handle_anchor, resolve_edge_endpoints,
};
pub use session::{
    ConnectionError, ConnectionEvent, ConnectionSession, HOVER_PADDING, HoverSnapshot, LineStyle,
};
