// SPDX-License-Identifier: MIT OR Apache-2.0
//! The board: placed nodes, grouping ledger, and the drag/drop handlers.
//!
//! Every handler runs to completion inside the canvas's event dispatch, so
//! highlight state is always computed against the most recent prior state.
//! Stale or unknown node ids make a handler a no-op; nothing in here can
//! fail the session.

use crate::viewport::ViewportTransform;
use indexmap::IndexMap;
use jigsaw_board_graph::{
    find_candidates, reconcile, Connection, ConnectionCandidate, ConnectionId, HighlightedPort,
    NodeId, PieceSize, PlacedNode, Point, PortRef, PortRole, PuzzlePiece, SnapPolicy,
};
use serde::{Deserialize, Serialize};

/// Maximum port-to-port distance at which a connection may form, in
/// canvas-local units (unaffected by zoom)
pub const DEFAULT_CONNECTION_RADIUS: f32 = 30.0;

/// A piece dropped from the tray onto the canvas.
///
/// Positions are raw pointer coordinates; the board maps them into
/// canvas-local space using the viewport transform string reported by the
/// canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropEvent {
    /// Pointer position at release, in screen coordinates
    pub pointer: Point,
    /// Where inside the piece the pointer grabbed it at drag start
    pub grab_offset: Point,
    /// The canvas viewport's CSS-style transform string
    pub viewport_transform: String,
}

/// Outcome of a drag gesture, reported back to the host canvas
#[derive(Debug, Clone)]
pub enum DragOutcome {
    /// A candidate was in range: the piece snapped and the connection was
    /// committed; the canvas should draw a persistent edge for it
    Connected(Connection),
    /// No candidate in range; the piece stays where the drag left it
    Unconnected,
}

/// The jigsaw board: the authoritative set of placed nodes, the grouping
/// ledger, and the connections committed so far.
#[derive(Debug, Clone)]
pub struct Board {
    nodes: IndexMap<NodeId, PlacedNode>,
    ledger: jigsaw_board_graph::GroupLedger,
    connections: IndexMap<ConnectionId, Connection>,
    piece_size: f32,
    connection_radius: f32,
    snap_policy: SnapPolicy,
    // Candidate buffer reused across drag ticks
    scratch: Vec<ConnectionCandidate>,
}

impl Board {
    /// Create an empty board. Piece dimensions arrive with the first drop.
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            ledger: jigsaw_board_graph::GroupLedger::new(),
            connections: IndexMap::new(),
            piece_size: 0.0,
            connection_radius: DEFAULT_CONNECTION_RADIUS,
            snap_policy: SnapPolicy::default(),
            scratch: Vec::new(),
        }
    }

    /// Override the connection radius
    pub fn with_connection_radius(mut self, radius: f32) -> Self {
        self.connection_radius = radius;
        self
    }

    /// Select how a confirmed connection repositions the assembly
    pub fn with_snap_policy(mut self, policy: SnapPolicy) -> Self {
        self.snap_policy = policy;
        self
    }

    /// Set piece dimensions up front, for hosts that bypass [`Self::drop_piece`]
    /// and place pieces at already-computed positions
    pub fn with_piece_size(mut self, sizes: PieceSize) -> Self {
        self.piece_size = sizes.piece_size;
        self
    }

    /// Drop a piece from the tray onto the canvas.
    ///
    /// The node's canvas-local position is derived from the raw pointer
    /// coordinates, the grab offset, and the viewport transform string; a
    /// malformed transform degrades to the identity transform rather than
    /// failing the drop. Returns `None` if the piece is already placed.
    pub fn drop_piece(
        &mut self,
        piece: PuzzlePiece,
        piece_size: PieceSize,
        drop: &DropEvent,
    ) -> Option<NodeId> {
        self.piece_size = piece_size.piece_size;

        let transform = ViewportTransform::parse(&drop.viewport_transform);
        let position = transform.to_canvas(drop.pointer, drop.grab_offset);
        self.place_piece(piece, position)
    }

    /// Place a piece at an already-computed canvas-local position.
    /// Returns `None` if the piece is already placed.
    ///
    /// Piece dimensions must already be known, either from a prior
    /// [`Self::drop_piece`] or from [`Self::with_piece_size`]; until then
    /// drags cannot produce candidates.
    pub fn place_piece(&mut self, piece: PuzzlePiece, position: Point) -> Option<NodeId> {
        let id = NodeId::from(piece.id);
        if self.nodes.contains_key(&id) {
            tracing::warn!(node = %id, "piece already on the board, ignoring drop");
            return None;
        }

        tracing::debug!(node = %id, x = position.x, y = position.y, "piece placed");
        self.nodes.insert(id, PlacedNode::new(piece, position));
        Some(id)
    }

    /// Per-pointer-move drag handler.
    ///
    /// Writes the live position reported by the canvas, then recomputes the
    /// provisional candidates and the port highlights from scratch. Nothing
    /// is committed here; a tick with zero candidates leaves every node
    /// unhighlighted.
    pub fn on_node_drag(&mut self, id: NodeId, live_position: Point) {
        let Some(node) = self.nodes.get_mut(&id) else {
            tracing::warn!(node = %id, "drag for unknown node, ignoring");
            return;
        };
        node.position = live_position;

        self.clear_highlights();
        self.recompute_candidates(id);
        tracing::trace!(node = %id, candidates = self.scratch.len(), "drag tick");

        for candidate in &self.scratch {
            if let Some(node) = self.nodes.get_mut(&candidate.dragged) {
                node.highlighted_ports.push(HighlightedPort {
                    edge: candidate.dragged_edge,
                    role: PortRole::Source,
                });
            }
            if let Some(node) = self.nodes.get_mut(&candidate.target) {
                node.highlighted_ports.push(HighlightedPort {
                    edge: candidate.target_edge,
                    role: PortRole::Target,
                });
            }
        }
    }

    /// Release handler: commit the closest candidate, or nothing.
    ///
    /// With no candidate in range the node simply keeps the live position —
    /// that is "no connection", not an error, and terminal for the gesture.
    pub fn on_node_drag_end(&mut self, id: NodeId, live_position: Point) -> DragOutcome {
        self.clear_highlights();

        let Some(node) = self.nodes.get_mut(&id) else {
            tracing::warn!(node = %id, "drag end for unknown node, ignoring");
            return DragOutcome::Unconnected;
        };
        node.position = live_position;

        self.recompute_candidates(id);
        let Some(best) = self.scratch.first().copied() else {
            tracing::trace!(node = %id, "released with no candidate in range");
            return DragOutcome::Unconnected;
        };

        self.commit(best)
    }

    fn recompute_candidates(&mut self, id: NodeId) {
        self.scratch.clear();
        // Without real piece dimensions every port would collapse onto the
        // node's corner and near pieces would snap onto the same position.
        if self.piece_size <= 0.0 {
            tracing::warn!("piece dimensions not set, skipping candidate search");
            return;
        }
        let Some(dragged) = self.nodes.get(&id) else {
            return;
        };
        find_candidates(
            dragged,
            self.nodes.values(),
            self.piece_size,
            self.connection_radius,
            &mut self.scratch,
        );
    }

    /// Snap, reposition the dragged node's group, merge the ledger, and
    /// record the connection. Corrections are computed against the
    /// pre-merge group, then applied, then the ledger merges.
    fn commit(&mut self, candidate: ConnectionCandidate) -> DragOutcome {
        let corrections = reconcile(
            &candidate,
            &self.nodes,
            &self.ledger,
            self.piece_size,
            self.snap_policy,
        );
        if corrections.is_empty() {
            tracing::debug!("connection endpoint vanished, abandoning commit");
            return DragOutcome::Unconnected;
        }

        let (Some(dragged), Some(target)) = (
            self.nodes.get(&candidate.dragged),
            self.nodes.get(&candidate.target),
        ) else {
            return DragOutcome::Unconnected;
        };
        let source_port = PortRef {
            edge: candidate.dragged_edge,
            shape: dragged.piece.edges.get(candidate.dragged_edge),
        };
        let target_port = PortRef {
            edge: candidate.target_edge,
            shape: target.piece.edges.get(candidate.target_edge),
        };

        let connection =
            match Connection::new(candidate.dragged, candidate.target, source_port, target_port) {
                Ok(connection) => connection,
                Err(error) => {
                    tracing::debug!(%error, "rejecting candidate at commit");
                    return DragOutcome::Unconnected;
                }
            };

        for (node_id, position) in corrections {
            if let Some(node) = self.nodes.get_mut(&node_id) {
                node.position = position;
            }
        }
        self.ledger.merge(candidate.dragged, candidate.target);
        self.connections.insert(connection.id, connection.clone());

        tracing::debug!(
            source = %connection.source,
            target = %connection.target,
            source_port = %connection.source_port,
            target_port = %connection.target_port,
            "connection committed"
        );
        DragOutcome::Connected(connection)
    }

    fn clear_highlights(&mut self) {
        for node in self.nodes.values_mut() {
            node.highlighted_ports.clear();
        }
    }

    /// Get a placed node by id
    pub fn node(&self, id: NodeId) -> Option<&PlacedNode> {
        self.nodes.get(&id)
    }

    /// All placed nodes with authoritative positions and highlight
    /// annotations, in placement order, for the canvas to render
    pub fn nodes(&self) -> impl Iterator<Item = &PlacedNode> {
        self.nodes.values()
    }

    /// Number of placed nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All committed connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Number of committed connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// The grouping ledger
    pub fn ledger(&self) -> &jigsaw_board_graph::GroupLedger {
        &self.ledger
    }

    /// The connection radius in canvas-local units
    pub fn connection_radius(&self) -> f32 {
        self.connection_radius
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jigsaw_board_graph::{EdgeMap, EdgePosition, EdgeShape, PieceId};

    const SIZES: PieceSize = PieceSize {
        total_size: 70.0,
        piece_size: 50.0,
        tab_size: 10.0,
    };

    fn piece(id: u32, left: EdgeShape, right: EdgeShape) -> PuzzlePiece {
        PuzzlePiece::new(
            PieceId(id),
            "",
            EdgeMap {
                left,
                right,
                top: EdgeShape::Flat,
                bottom: EdgeShape::Flat,
            },
        )
    }

    fn board_with_anchor() -> Board {
        let mut board = Board::new();
        board.drop_piece(
            piece(1, EdgeShape::Flat, EdgeShape::Tab),
            SIZES,
            &DropEvent {
                pointer: Point::new(0.0, 0.0),
                grab_offset: Point::new(0.0, 0.0),
                viewport_transform: String::new(),
            },
        );
        board
    }

    #[test]
    fn test_drop_places_node_in_canvas_space() {
        let mut board = Board::new();
        let id = board
            .drop_piece(
                piece(1, EdgeShape::Flat, EdgeShape::Tab),
                SIZES,
                &DropEvent {
                    pointer: Point::new(300.0, 150.0),
                    grab_offset: Point::new(10.0, 10.0),
                    viewport_transform: "translate(100px, 50px) scale(2)".into(),
                },
            )
            .unwrap();

        assert_eq!(board.node(id).unwrap().position, Point::new(95.0, 45.0));
    }

    #[test]
    fn test_duplicate_drop_is_a_noop() {
        let mut board = board_with_anchor();
        let before = board.node(NodeId(1)).unwrap().position;

        let result = board.place_piece(
            piece(1, EdgeShape::Flat, EdgeShape::Tab),
            Point::new(500.0, 500.0),
        );

        assert!(result.is_none());
        assert_eq!(board.node_count(), 1);
        assert_eq!(board.node(NodeId(1)).unwrap().position, before);
    }

    #[test]
    fn test_drag_highlights_both_sides() {
        let mut board = board_with_anchor();
        board.place_piece(
            piece(2, EdgeShape::Blank, EdgeShape::Flat),
            Point::new(200.0, 200.0),
        );

        board.on_node_drag(NodeId(2), Point::new(59.0, 1.0));

        let dragged = board.node(NodeId(2)).unwrap();
        assert_eq!(
            dragged.highlighted_ports,
            vec![HighlightedPort {
                edge: EdgePosition::Left,
                role: PortRole::Source,
            }]
        );
        let target = board.node(NodeId(1)).unwrap();
        assert_eq!(
            target.highlighted_ports,
            vec![HighlightedPort {
                edge: EdgePosition::Right,
                role: PortRole::Target,
            }]
        );
    }

    #[test]
    fn test_drag_out_of_range_clears_all_highlights() {
        let mut board = board_with_anchor();
        board.place_piece(
            piece(2, EdgeShape::Blank, EdgeShape::Flat),
            Point::new(200.0, 200.0),
        );

        board.on_node_drag(NodeId(2), Point::new(59.0, 1.0));
        board.on_node_drag(NodeId(2), Point::new(400.0, 400.0));

        for node in board.nodes() {
            assert!(node.highlighted_ports.is_empty());
        }
    }

    #[test]
    fn test_drag_end_snaps_and_merges() {
        let mut board = board_with_anchor();
        board.place_piece(
            piece(2, EdgeShape::Blank, EdgeShape::Flat),
            Point::new(200.0, 200.0),
        );

        let outcome = board.on_node_drag_end(NodeId(2), Point::new(59.0, 1.0));

        let DragOutcome::Connected(connection) = outcome else {
            panic!("expected a connection");
        };
        assert_eq!(connection.source, NodeId(2));
        assert_eq!(connection.target, NodeId(1));
        assert_eq!(connection.source_port.to_string(), "left-blank");
        assert_eq!(connection.target_port.to_string(), "right-tab");

        assert_eq!(board.node(NodeId(2)).unwrap().position, Point::new(50.0, 0.0));
        assert!(board.ledger().connected(NodeId(1), NodeId(2)));
        assert!(board.ledger().connected(NodeId(2), NodeId(1)));
        assert_eq!(board.connection_count(), 1);
    }

    #[test]
    fn test_drag_end_out_of_range_commits_live_position() {
        let mut board = board_with_anchor();
        board.place_piece(
            piece(2, EdgeShape::Blank, EdgeShape::Flat),
            Point::new(100.0, 100.0),
        );

        let outcome = board.on_node_drag_end(NodeId(2), Point::new(200.0, 200.0));

        assert!(matches!(outcome, DragOutcome::Unconnected));
        assert_eq!(
            board.node(NodeId(2)).unwrap().position,
            Point::new(200.0, 200.0)
        );
        assert_eq!(board.node(NodeId(1)).unwrap().position, Point::new(0.0, 0.0));
        assert!(board.ledger().is_empty());
        assert_eq!(board.connection_count(), 0);
        for node in board.nodes() {
            assert!(node.highlighted_ports.is_empty());
        }
    }

    #[test]
    fn test_drag_without_piece_dimensions_never_connects() {
        let mut board = Board::new();
        board.place_piece(piece(1, EdgeShape::Flat, EdgeShape::Tab), Point::new(0.0, 0.0));
        board.place_piece(piece(2, EdgeShape::Blank, EdgeShape::Flat), Point::new(1.0, 1.0));

        board.on_node_drag(NodeId(2), Point::new(1.0, 1.0));
        for node in board.nodes() {
            assert!(node.highlighted_ports.is_empty());
        }

        let outcome = board.on_node_drag_end(NodeId(2), Point::new(1.0, 1.0));

        assert!(matches!(outcome, DragOutcome::Unconnected));
        assert_eq!(board.node(NodeId(2)).unwrap().position, Point::new(1.0, 1.0));
        assert_eq!(board.connection_count(), 0);
        assert!(board.ledger().is_empty());
    }

    #[test]
    fn test_with_piece_size_enables_placed_boards() {
        let mut board = Board::new().with_piece_size(SIZES);
        board.place_piece(piece(1, EdgeShape::Flat, EdgeShape::Tab), Point::new(0.0, 0.0));
        board.place_piece(
            piece(2, EdgeShape::Blank, EdgeShape::Flat),
            Point::new(59.0, 1.0),
        );

        let outcome = board.on_node_drag_end(NodeId(2), Point::new(59.0, 1.0));

        assert!(matches!(outcome, DragOutcome::Connected(_)));
        assert_eq!(board.node(NodeId(2)).unwrap().position, Point::new(50.0, 0.0));
    }

    #[test]
    fn test_handlers_ignore_unknown_nodes() {
        let mut board = board_with_anchor();

        board.on_node_drag(NodeId(42), Point::new(1.0, 1.0));
        let outcome = board.on_node_drag_end(NodeId(42), Point::new(1.0, 1.0));

        assert!(matches!(outcome, DragOutcome::Unconnected));
        assert_eq!(board.node(NodeId(1)).unwrap().position, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_single_node_policy_leaves_group_members() {
        let mut board = Board::new().with_snap_policy(SnapPolicy::SingleNode);
        board.drop_piece(
            piece(1, EdgeShape::Flat, EdgeShape::Tab),
            SIZES,
            &DropEvent {
                pointer: Point::new(0.0, 0.0),
                grab_offset: Point::new(0.0, 0.0),
                viewport_transform: String::new(),
            },
        );
        board.place_piece(
            PuzzlePiece::new(
                PieceId(2),
                "",
                EdgeMap {
                    left: EdgeShape::Blank,
                    right: EdgeShape::Tab,
                    top: EdgeShape::Flat,
                    bottom: EdgeShape::Flat,
                },
            ),
            Point::new(200.0, 0.0),
        );
        board.place_piece(
            piece(3, EdgeShape::Blank, EdgeShape::Flat),
            Point::new(250.0, 0.0),
        );
        board.on_node_drag_end(NodeId(3), Point::new(250.0, 0.0));
        assert!(board.ledger().connected(NodeId(2), NodeId(3)));

        // Reconnecting node 2 to the anchor moves only node 2.
        board.on_node_drag_end(NodeId(2), Point::new(55.0, 2.0));

        assert_eq!(board.node(NodeId(2)).unwrap().position, Point::new(50.0, 0.0));
        assert_eq!(board.node(NodeId(3)).unwrap().position, Point::new(250.0, 0.0));
    }
}
