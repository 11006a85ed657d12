//! Integration tests for the LayoutBuilder and connection APIs
//!
//! These tests drive the public surface the way an editor would: lay out a
//! graph, then drag a new connection between two of the placed nodes.

use float_cmp::assert_approx_eq;

use tether::{
    LayoutBuilder, TetherError,
    config::{AppConfig, LayoutOptions},
    connection::{ConnectionEvent, ConnectionSession, LineStyle, resolve_edge_endpoints},
    geometry::Point,
    graph::{Edge, Graph, GraphError, Node, Side},
    identifier::Id,
    layout::{self, AppliedLayout, LEVEL_HEIGHT, LEVEL_WIDTH, LayoutKind},
    structure,
};

fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> Graph {
    Graph::new(
        nodes
            .iter()
            .map(|id| Node::new(Id::new(id), Point::default()))
            .collect(),
        edges
            .iter()
            .map(|(s, t)| Edge::new(Id::new(&format!("{s}-{t}")), Id::new(s), Id::new(t)))
            .collect(),
    )
}

#[test]
fn test_builder_default_is_auto() {
    let builder = LayoutBuilder::default();
    assert_eq!(builder.config().engine(), LayoutKind::Auto);
}

#[test]
fn test_auto_reports_hierarchical_for_tree() {
    let g = graph(&["a", "b", "c", "d"], &[("a", "b"), ("a", "c"), ("b", "d")]);
    let outcome = LayoutBuilder::default().layout(&g).expect("Failed to lay out");

    assert_eq!(outcome.requested(), LayoutKind::Auto);
    assert_eq!(outcome.applied(), AppliedLayout::Hierarchical);
    assert!(!outcome.is_cluttered());

    let placed = outcome.graph();
    let b = placed.node(Id::new("b")).unwrap().position();
    let c = placed.node(Id::new("c")).unwrap().position();
    let d = placed.node(Id::new("d")).unwrap().position();
    assert_approx_eq!(f32, b.y(), LEVEL_HEIGHT);
    assert_approx_eq!(f32, c.y(), LEVEL_HEIGHT);
    assert_approx_eq!(f32, c.x() - b.x(), LEVEL_WIDTH);
    assert_approx_eq!(f32, d.y(), 2.0 * LEVEL_HEIGHT);
}

#[test]
fn test_force_layout_is_deterministic() {
    let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
    let builder = LayoutBuilder::new(AppConfig::default().with_engine(LayoutKind::Force));

    let first = builder.layout(&g).unwrap().into_graph();
    let second = builder.layout(&g).unwrap().into_graph();
    for (lhs, rhs) in first.nodes().iter().zip(second.nodes()) {
        assert_approx_eq!(f32, lhs.position().x(), rhs.position().x());
        assert_approx_eq!(f32, lhs.position().y(), rhs.position().y());
    }
}

#[test]
fn test_force_layout_warm_starts_from_positions() {
    let nodes = vec![
        Node::new(Id::new("a"), Point::new(100.0, 100.0)),
        Node::new(Id::new("b"), Point::new(900.0, 100.0)),
    ];
    let g = Graph::new(nodes, vec![]);
    let options = LayoutOptions::default().with_iterations(1);

    let placed = layout::apply_force_directed_layout(&g, &options).unwrap();
    // One tick barely moves anything; "a" stays left of "b".
    assert!(placed.nodes()[0].position().x() < placed.nodes()[1].position().x());
    assert!(placed.nodes()[0].position().distance(Point::new(100.0, 100.0)) < 100.0);
}

#[test]
fn test_cyclic_graph_moves_under_auto() {
    let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
    let options = LayoutOptions::default().with_iterations(10);

    assert_eq!(structure::has_cycle(&g), Ok(true));
    let placed = layout::apply_auto_layout(&g, &options).unwrap();
    assert_ne!(placed.nodes(), g.nodes());
}

#[test]
fn test_dangling_edge_is_a_graph_error() {
    let g = graph(&["a"], &[("a", "missing")]);
    let err = LayoutBuilder::default().layout(&g).unwrap_err();

    assert!(matches!(
        err,
        TetherError::Graph(GraphError::DanglingEdge { .. })
    ));
    assert_eq!(
        err.to_string(),
        "Graph error: edge `a-missing` target references unknown node `missing`"
    );
}

#[test]
fn test_duplicate_node_is_a_graph_error() {
    let g = graph(&["a", "a"], &[]);
    let err = layout::apply_hierarchical_layout(&g, &LayoutOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        TetherError::Graph(GraphError::DuplicateNode(_))
    ));
}

#[test]
fn test_clutter_flag_on_outcome() {
    let nodes = vec![
        Node::new(Id::new("a"), Point::new(0.0, 0.0)),
        Node::new(Id::new("b"), Point::new(100.0, 0.0)),
    ];
    assert!(layout::is_layout_cluttered(&nodes));

    let spread = vec![
        Node::new(Id::new("a"), Point::new(0.0, 0.0)),
        Node::new(Id::new("b"), Point::new(200.0, 0.0)),
    ];
    assert!(!layout::is_layout_cluttered(&spread));
}

#[test]
fn test_connect_after_layout() {
    let g = graph(&["a", "b"], &[("a", "b")]);
    let placed = LayoutBuilder::default().layout(&g).unwrap().into_graph();
    let nodes = placed.nodes();

    let mut session = ConnectionSession::new();
    session
        .start(Id::new("b"), Side::Bottom, nodes)
        .expect("Failed to start connection");

    // Hover the center of "a", which sits one level above "b".
    let a_center = placed.node(Id::new("a")).unwrap().bounds().center();
    let snapshot = session.update_cursor(a_center, nodes).unwrap();
    assert_eq!(snapshot.hovered(), Some(Id::new("a")));
    assert_eq!(snapshot.line_style(), LineStyle::Solid);

    let Some(ConnectionEvent::Requested {
        source,
        target,
        snap_point,
        source_handle,
    }) = session.commit()
    else {
        panic!("Expected a connection request");
    };
    assert_eq!(source, Id::new("b"));
    assert_eq!(target, Id::new("a"));
    assert_eq!(source_handle, Side::Bottom);

    // The caller turns the request into an edge and renders it.
    let edge = Edge::new(Id::new("b-a"), source, target)
        .with_source_handle(source_handle)
        .with_target_position(snap_point);
    let source_node = placed.node(source).unwrap();
    let target_node = placed.node(target).unwrap();
    let endpoints = resolve_edge_endpoints(&edge, source_node, target_node);
    assert_eq!(endpoints.target(), snap_point);
    assert!(target_node.bounds().contains(endpoints.target()));
}

#[test]
fn test_self_connection_never_emitted() {
    let nodes = vec![Node::new(Id::new("a"), Point::new(0.0, 0.0))];
    let mut session = ConnectionSession::new();
    session.start(Id::new("a"), Side::Right, &nodes).unwrap();
    session.update_cursor(Point::new(10.0, 10.0), &nodes);

    assert_eq!(session.commit(), None);
    assert_eq!(
        session.cancel(),
        Some(ConnectionEvent::Cancelled {
            source: Id::new("a")
        })
    );
}
