// SPDX-License-Identifier: MIT OR Apache-2.0
//! Canvas-facing session layer for the jigsaw board.
//!
//! The host canvas owns rendering, pan/zoom, and gesture recognition; this
//! crate owns everything between the gesture callbacks and the
//! piece-connection engine:
//! - [`Board`] — the placed nodes, the grouping ledger, the committed
//!   connections, and the drag / drag-end / drop handlers
//! - [`PieceTray`] — the pool of pieces not yet placed on the canvas
//! - [`ViewportTransform`] — pan/zoom extraction from the canvas's CSS-style
//!   transform string
//!
//! All handlers run synchronously inside the canvas's event dispatch; there
//! is no background processing and no handler overlap within a gesture.

pub mod board;
pub mod tray;
pub mod viewport;

pub use board::{Board, DragOutcome, DropEvent, DEFAULT_CONNECTION_RADIUS};
pub use tray::PieceTray;
pub use viewport::ViewportTransform;
