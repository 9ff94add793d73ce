// SPDX-License-Identifier: MIT OR Apache-2.0
//! Placed nodes and port geometry.

use crate::piece::{EdgePosition, PieceId, PuzzlePiece};
use serde::{Deserialize, Serialize};

/// A point in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Unique identifier for a node placed on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl From<PieceId> for NodeId {
    fn from(id: PieceId) -> Self {
        Self(id.0)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "puzzle-node-{}", self.0)
    }
}

/// Which side of a provisional connection a highlighted port sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortRole {
    /// The port belongs to the piece being dragged
    Source,
    /// The port belongs to a stationary piece in range
    Target,
}

/// Transient highlight marker on a node's port, recomputed every drag tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedPort {
    /// Which edge's port is highlighted
    pub edge: EdgePosition,
    /// Source or target side of the provisional connection
    pub role: PortRole,
}

/// A piece instantiated on the canvas.
///
/// The position is the piece's top-left corner in canvas-local space. It is
/// written by drag events and by group reconciliation; everything else is
/// fixed at drop time except `highlighted_ports`, which is cleared at the
/// start of every drag-move recomputation and at drag end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedNode {
    /// Node identity, derived from the piece identity
    pub id: NodeId,
    /// Top-left corner in canvas-local coordinates
    pub position: Point,
    /// The piece this node displays
    pub piece: PuzzlePiece,
    /// Provisional-candidate highlight markers; empty when idle
    pub highlighted_ports: Vec<HighlightedPort>,
}

impl PlacedNode {
    /// Place a piece on the canvas
    pub fn new(piece: PuzzlePiece, position: Point) -> Self {
        Self {
            id: piece.id.into(),
            position,
            piece,
            highlighted_ports: Vec::new(),
        }
    }

    /// Connection point for one of this node's edges: the midpoint of that
    /// edge, derived from the top-left position and the shared piece size
    pub fn port_position(&self, edge: EdgePosition, piece_size: f32) -> Point {
        let half = piece_size / 2.0;
        let base = self.position;
        match edge {
            EdgePosition::Left => Point::new(base.x, base.y + half),
            EdgePosition::Right => Point::new(base.x + piece_size, base.y + half),
            EdgePosition::Top => Point::new(base.x + half, base.y),
            EdgePosition::Bottom => Point::new(base.x + half, base.y + piece_size),
        }
    }
}
