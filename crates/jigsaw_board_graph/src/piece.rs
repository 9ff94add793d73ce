// SPDX-License-Identifier: MIT OR Apache-2.0
//! Puzzle piece model and edge-shape compatibility.

use serde::{Deserialize, Serialize};

/// Unique identifier for a puzzle piece, assigned at generation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A side of a rectangular piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgePosition {
    /// Left side
    Left,
    /// Right side
    Right,
    /// Top side
    Top,
    /// Bottom side
    Bottom,
}

impl EdgePosition {
    /// All four edge positions, in enumeration order
    pub const ALL: [EdgePosition; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// The facing side: left <-> right, top <-> bottom
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Check whether two sides face each other
    pub fn is_opposite(self, other: Self) -> bool {
        self.opposite() == other
    }
}

impl std::fmt::Display for EdgePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Shape cut into one edge of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeShape {
    /// Protruding knob
    Tab,
    /// Matching indentation
    Blank,
    /// Straight border edge; never participates in a connection
    Flat,
}

impl EdgeShape {
    /// Check whether two shapes interlock. Only tab/blank pairs do; a flat
    /// edge matches nothing, including another flat edge.
    pub fn is_complementary(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Tab, Self::Blank) | (Self::Blank, Self::Tab)
        )
    }
}

impl std::fmt::Display for EdgeShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Tab => "tab",
            Self::Blank => "blank",
            Self::Flat => "flat",
        };
        f.write_str(name)
    }
}

/// The shape assigned to each of a piece's four sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMap {
    /// Shape of the left edge
    pub left: EdgeShape,
    /// Shape of the right edge
    pub right: EdgeShape,
    /// Shape of the top edge
    pub top: EdgeShape,
    /// Shape of the bottom edge
    pub bottom: EdgeShape,
}

impl EdgeMap {
    /// Get the shape on a given side
    pub fn get(&self, position: EdgePosition) -> EdgeShape {
        match position {
            EdgePosition::Left => self.left,
            EdgePosition::Right => self.right,
            EdgePosition::Top => self.top,
            EdgePosition::Bottom => self.bottom,
        }
    }

    /// Iterate over all four sides in `EdgePosition::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (EdgePosition, EdgeShape)> + '_ {
        EdgePosition::ALL.into_iter().map(|p| (p, self.get(p)))
    }
}

/// A generated puzzle piece. Immutable once created; the generator that
/// slices the source image owns piece creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzlePiece {
    /// Piece identity
    pub id: PieceId,
    /// Encoded image data for this piece's region of the source picture
    pub data_url: String,
    /// Per-side edge shapes
    pub edges: EdgeMap,
}

impl PuzzlePiece {
    /// Create a new piece
    pub fn new(id: PieceId, data_url: impl Into<String>, edges: EdgeMap) -> Self {
        Self {
            id,
            data_url: data_url.into(),
            edges,
        }
    }

    /// Iterate over the edges that can take part in a connection (flat
    /// edges are excluded here, before proximity search ever sees them)
    pub fn connectable_edges(&self) -> impl Iterator<Item = (EdgePosition, EdgeShape)> + '_ {
        self.edges.iter().filter(|(_, shape)| *shape != EdgeShape::Flat)
    }
}

/// Shared dimensions for every piece in a session, fixed at generation time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieceSize {
    /// Full footprint of a piece including protruding tabs
    pub total_size: f32,
    /// Side length of the piece body; port geometry and snap offsets use this
    pub piece_size: f32,
    /// Depth of a tab/blank cut
    pub tab_size: f32,
}
