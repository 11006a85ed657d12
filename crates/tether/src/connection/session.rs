//! Interactive connection drawing.
//!
//! A [`ConnectionSession`] tracks one drag from a source handle. While the
//! drag is active every cursor update reports which node (if any) is under
//! the cursor and where the connection would snap. The drag ends with either
//! a [`ConnectionEvent::Requested`] or a [`ConnectionEvent::Cancelled`].

use log::{debug, trace};
use thiserror::Error;

use tether_core::{
    geometry::{Bounds, Insets, Point},
    graph::{Node, Side},
    identifier::Id,
};

use super::geometry::{closest_boundary_point, handle_anchor};

/// Extra margin around each candidate box that still counts as hovering it.
pub const HOVER_PADDING: f32 = 20.0;

/// Reasons a session refuses to start.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConnectionError {
    #[error("source node `{0}` is not among the visible nodes")]
    UnknownSource(Id),

    #[error("a connection from `{0}` is already in progress")]
    AlreadyActive(Id),
}

/// How the in-progress connection line should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Snapped to a valid target.
    Solid,
    /// Following the cursor freely.
    Dashed,
}

/// What the renderer needs for one frame of an active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverSnapshot {
    cursor: Point,
    source_anchor: Point,
    hovered: Option<Id>,
    snap_point: Option<Point>,
}

impl HoverSnapshot {
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Handle point the line starts from.
    pub fn source_anchor(&self) -> Point {
        self.source_anchor
    }

    pub fn hovered(&self) -> Option<Id> {
        self.hovered
    }

    pub fn snap_point(&self) -> Option<Point> {
        self.snap_point
    }

    /// Where the line currently ends: the snap point if any, else the cursor.
    pub fn line_end(&self) -> Point {
        self.snap_point.unwrap_or(self.cursor)
    }

    pub fn line_style(&self) -> LineStyle {
        if self.snap_point.is_some() {
            LineStyle::Solid
        } else {
            LineStyle::Dashed
        }
    }
}

/// Terminal outcome of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectionEvent {
    /// The user released over a valid target. The caller decides whether to
    /// add the edge.
    Requested {
        source: Id,
        target: Id,
        snap_point: Point,
        source_handle: Side,
    },
    /// The drag was abandoned.
    Cancelled { source: Id },
}

#[derive(Debug, Clone)]
struct ActiveConnection {
    source: Id,
    side: Side,
    source_bounds: Bounds,
    cursor: Point,
    hovered: Option<Id>,
    snap_point: Option<Point>,
}

impl ActiveConnection {
    fn source_anchor(&self) -> Point {
        handle_anchor(
            self.source_bounds.min_point(),
            self.source_bounds.to_size(),
            self.side,
        )
    }

    fn snapshot(&self) -> HoverSnapshot {
        HoverSnapshot {
            cursor: self.cursor,
            source_anchor: self.source_anchor(),
            hovered: self.hovered,
            snap_point: self.snap_point,
        }
    }
}

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Idle,
    Active(ActiveConnection),
}

/// State machine for dragging a new connection out of a node handle.
///
/// # Examples
///
/// ```
/// # use tether::connection::{ConnectionEvent, ConnectionSession};
/// # use tether::geometry::Point;
/// # use tether::graph::{Node, Side};
/// # use tether::identifier::Id;
/// let nodes = vec![
///     Node::new(Id::new("a"), Point::new(0.0, 0.0)),
///     Node::new(Id::new("b"), Point::new(400.0, 0.0)),
/// ];
///
/// let mut session = ConnectionSession::new();
/// session.start(Id::new("a"), Side::Right, &nodes).unwrap();
/// session.update_cursor(Point::new(410.0, 20.0), &nodes);
///
/// match session.commit() {
///     Some(ConnectionEvent::Requested { target, .. }) => assert_eq!(target, "b"),
///     other => panic!("unexpected {other:?}"),
/// }
/// assert!(!session.is_active());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConnectionSession {
    state: State,
}

impl ConnectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active(_))
    }

    /// Node the active drag started from.
    pub fn source(&self) -> Option<Id> {
        match &self.state {
            State::Active(active) => Some(active.source),
            State::Idle => None,
        }
    }

    /// Node currently under the cursor, if any.
    pub fn hovered(&self) -> Option<Id> {
        match &self.state {
            State::Active(active) => active.hovered,
            State::Idle => None,
        }
    }

    /// Begin dragging from the `side` handle of `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::UnknownSource`] if `source` is not in
    /// `nodes`, or [`ConnectionError::AlreadyActive`] if a drag is running.
    pub fn start(&mut self, source: Id, side: Side, nodes: &[Node]) -> Result<(), ConnectionError> {
        if let State::Active(active) = &self.state {
            return Err(ConnectionError::AlreadyActive(active.source));
        }

        let node = nodes
            .iter()
            .find(|node| node.id() == source)
            .ok_or(ConnectionError::UnknownSource(source))?;

        let source_bounds = node.bounds();
        let cursor = handle_anchor(node.position(), node.size_or_default(), side);
        debug!(source:% = source, side:% = side; "Connection started");

        self.state = State::Active(ActiveConnection {
            source,
            side,
            source_bounds,
            cursor,
            hovered: None,
            snap_point: None,
        });
        Ok(())
    }

    /// Move the cursor and recompute the hover target.
    ///
    /// The first candidate other than the source whose box, padded by
    /// [`HOVER_PADDING`], contains `position` becomes the hover target, and
    /// the snap point is the nearest point on its unpadded outline. If the
    /// source appears among `candidates` its bounds are refreshed, so the
    /// anchor follows a node that moved mid-drag.
    ///
    /// Returns `None` when no drag is active.
    pub fn update_cursor(&mut self, position: Point, candidates: &[Node]) -> Option<HoverSnapshot> {
        let State::Active(active) = &mut self.state else {
            return None;
        };

        if let Some(source) = candidates.iter().find(|node| node.id() == active.source) {
            active.source_bounds = source.bounds();
        }

        let padding = Insets::uniform(HOVER_PADDING);
        let hovered = candidates.iter().find(|node| {
            node.id() != active.source && node.bounds().add_padding(padding).contains(position)
        });

        if hovered.map(Node::id) != active.hovered {
            trace!(hovered:? = hovered.map(Node::id); "Hover target changed");
        }

        active.cursor = position;
        active.hovered = hovered.map(Node::id);
        active.snap_point = hovered.map(|node| closest_boundary_point(node.bounds(), position));

        Some(active.snapshot())
    }

    /// Finish the drag over the current hover target.
    ///
    /// Emits [`ConnectionEvent::Requested`] and returns to idle when a target
    /// other than the source is hovered. Otherwise nothing happens and the
    /// drag stays active.
    pub fn commit(&mut self) -> Option<ConnectionEvent> {
        let State::Active(active) = &self.state else {
            return None;
        };

        let (target, snap_point) = match (active.hovered, active.snap_point) {
            (Some(target), Some(snap_point)) if target != active.source => (target, snap_point),
            _ => {
                debug!(source:% = active.source; "Commit without a valid target ignored");
                return None;
            }
        };

        let event = ConnectionEvent::Requested {
            source: active.source,
            target,
            snap_point,
            source_handle: active.side,
        };
        debug!(source:% = active.source, target:% = target; "Connection requested");

        self.state = State::Idle;
        Some(event)
    }

    /// Abandon the drag, discarding all state.
    pub fn cancel(&mut self) -> Option<ConnectionEvent> {
        match std::mem::take(&mut self.state) {
            State::Active(active) => {
                debug!(source:% = active.source; "Connection cancelled");
                Some(ConnectionEvent::Cancelled {
                    source: active.source,
                })
            }
            State::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use tether_core::geometry::Size;

    use super::*;

    fn nodes() -> Vec<Node> {
        vec![
            Node::new(Id::new("a"), Point::new(0.0, 0.0)).with_size(Size::new(100.0, 50.0)),
            Node::new(Id::new("b"), Point::new(300.0, 0.0)).with_size(Size::new(100.0, 50.0)),
            Node::new(Id::new("c"), Point::new(0.0, 300.0)).with_size(Size::new(100.0, 50.0)),
        ]
    }

    fn started() -> ConnectionSession {
        let mut session = ConnectionSession::new();
        session.start(Id::new("a"), Side::Right, &nodes()).unwrap();
        session
    }

    #[test]
    fn test_start_unknown_source() {
        let mut session = ConnectionSession::new();
        let err = session
            .start(Id::new("ghost"), Side::Top, &nodes())
            .unwrap_err();
        assert_eq!(err, ConnectionError::UnknownSource(Id::new("ghost")));
        assert!(!session.is_active());
    }

    #[test]
    fn test_start_while_active() {
        let mut session = started();
        let err = session.start(Id::new("b"), Side::Left, &nodes()).unwrap_err();
        assert_eq!(err, ConnectionError::AlreadyActive(Id::new("a")));
        assert_eq!(session.source(), Some(Id::new("a")));
    }

    #[test]
    fn test_hover_inside_padding_snaps_to_boundary() {
        let mut session = started();
        // 10 left of b's box, inside the 20-unit padding.
        let snapshot = session
            .update_cursor(Point::new(290.0, 30.0), &nodes())
            .unwrap();

        assert_eq!(snapshot.hovered(), Some(Id::new("b")));
        assert_eq!(snapshot.snap_point(), Some(Point::new(300.0, 30.0)));
        assert_eq!(snapshot.line_style(), LineStyle::Solid);
        assert_eq!(snapshot.source_anchor(), Point::new(116.0, 25.0));
        assert_eq!(snapshot.line_end(), Point::new(300.0, 30.0));
    }

    #[test]
    fn test_hover_outside_padding() {
        let mut session = started();
        let snapshot = session
            .update_cursor(Point::new(270.0, 30.0), &nodes())
            .unwrap();

        assert_eq!(snapshot.hovered(), None);
        assert_eq!(snapshot.snap_point(), None);
        assert_eq!(snapshot.line_style(), LineStyle::Dashed);
        assert_eq!(snapshot.line_end(), Point::new(270.0, 30.0));
    }

    #[test]
    fn test_padding_edge_is_inclusive() {
        let mut session = started();
        let snapshot = session
            .update_cursor(Point::new(280.0, 25.0), &nodes())
            .unwrap();
        assert_eq!(snapshot.hovered(), Some(Id::new("b")));
    }

    #[test]
    fn test_source_is_never_hovered() {
        let mut session = started();
        let snapshot = session
            .update_cursor(Point::new(50.0, 25.0), &nodes())
            .unwrap();
        assert_eq!(snapshot.hovered(), None);

        assert_eq!(session.commit(), None);
        assert!(session.is_active());
    }

    #[test]
    fn test_commit_emits_request_once() {
        let mut session = started();
        session.update_cursor(Point::new(350.0, 25.0), &nodes());

        let event = session.commit();
        assert_eq!(
            event,
            Some(ConnectionEvent::Requested {
                source: Id::new("a"),
                target: Id::new("b"),
                snap_point: Point::new(350.0, 0.0),
                source_handle: Side::Right,
            })
        );
        assert!(!session.is_active());
        assert_eq!(session.commit(), None);
    }

    #[test]
    fn test_commit_without_target_keeps_session() {
        let mut session = started();
        session.update_cursor(Point::new(900.0, 900.0), &nodes());

        assert_eq!(session.commit(), None);
        assert!(session.is_active());

        session.update_cursor(Point::new(50.0, 310.0), &nodes());
        assert!(matches!(
            session.commit(),
            Some(ConnectionEvent::Requested { target, .. }) if target == "c"
        ));
    }

    #[test]
    fn test_first_candidate_wins_on_overlap() {
        let overlapping = vec![
            Node::new(Id::new("a"), Point::new(0.0, 0.0)),
            Node::new(Id::new("top"), Point::new(300.0, 0.0)),
            Node::new(Id::new("under"), Point::new(310.0, 10.0)),
        ];
        let mut session = ConnectionSession::new();
        session.start(Id::new("a"), Side::Bottom, &overlapping).unwrap();

        let snapshot = session
            .update_cursor(Point::new(320.0, 20.0), &overlapping)
            .unwrap();
        assert_eq!(snapshot.hovered(), Some(Id::new("top")));
    }

    #[test]
    fn test_moving_away_clears_hover() {
        let mut session = started();
        session.update_cursor(Point::new(350.0, 25.0), &nodes());
        assert_eq!(session.hovered(), Some(Id::new("b")));

        session.update_cursor(Point::new(200.0, 200.0), &nodes());
        assert_eq!(session.hovered(), None);
    }

    #[test]
    fn test_source_anchor_follows_moved_source() {
        let mut session = started();
        let mut moved = nodes();
        moved[0] = moved[0].with_position(Point::new(0.0, 100.0));

        let snapshot = session
            .update_cursor(Point::new(200.0, 200.0), &moved)
            .unwrap();
        assert_eq!(snapshot.source_anchor(), Point::new(116.0, 125.0));
    }

    #[test]
    fn test_cancel() {
        let mut session = started();
        session.update_cursor(Point::new(350.0, 25.0), &nodes());

        assert_eq!(
            session.cancel(),
            Some(ConnectionEvent::Cancelled {
                source: Id::new("a")
            })
        );
        assert!(!session.is_active());
        assert_eq!(session.hovered(), None);
        assert_eq!(session.cancel(), None);
    }

    #[test]
    fn test_idle_ignores_updates() {
        let mut session = ConnectionSession::new();
        assert_eq!(session.update_cursor(Point::new(1.0, 1.0), &nodes()), None);
        assert_eq!(session.commit(), None);
        assert_eq!(session.cancel(), None);
    }

    #[test]
    fn test_session_can_restart_after_commit() {
        let mut session = started();
        session.update_cursor(Point::new(350.0, 25.0), &nodes());
        session.commit();

        session.start(Id::new("b"), Side::Left, &nodes()).unwrap();
        assert_eq!(session.source(), Some(Id::new("b")));
        assert_eq!(session.hovered(), None);
    }
}
