// SPDX-License-Identifier: MIT OR Apache-2.0
//! Piece-connection engine for the jigsaw board.
//!
//! This crate decides whether two puzzle pieces can join, finds nearby
//! connection candidates while a piece is being dragged, computes the exact
//! snapped position on drop, and tracks which pieces must move together as
//! one rigid group.
//!
//! ## Architecture
//!
//! The engine is pure geometry over in-memory state:
//! - Shape compatibility predicates ([`piece`])
//! - Port geometry and placed nodes ([`node`])
//! - Proximity search over edge-pair candidates ([`proximity`])
//! - Transitively-closed grouping ledger ([`group`])
//! - Snap and group-rigid position reconciliation ([`snap`])
//! - Committed connection records ([`connection`])
//!
//! Rendering, gesture recognition, and piece generation live with the host
//! canvas; this crate only reads node positions and hands back corrections.

pub mod connection;
pub mod group;
pub mod node;
pub mod piece;
pub mod proximity;
pub mod snap;

pub use connection::{Connection, ConnectionError, ConnectionId, PortRef};
pub use group::GroupLedger;
pub use node::{HighlightedPort, NodeId, PlacedNode, Point, PortRole};
pub use piece::{EdgeMap, EdgePosition, EdgeShape, PieceId, PieceSize, PuzzlePiece};
pub use proximity::{find_candidates, ConnectionCandidate};
pub use snap::{reconcile, snap_position, SnapPolicy};
