// SPDX-License-Identifier: MIT OR Apache-2.0
//! The tray of pieces not yet placed on the canvas.

use jigsaw_board_graph::{PieceId, PuzzlePiece};
use serde::{Deserialize, Serialize};

/// Available-pieces pool.
///
/// The generator fills the tray once per session; dropping a piece on the
/// canvas takes it out of the tray for good. Order is display order and can
/// be rearranged by dragging within the tray.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PieceTray {
    pieces: Vec<PuzzlePiece>,
}

impl PieceTray {
    /// Create a tray holding a freshly generated piece set
    pub fn new(pieces: Vec<PuzzlePiece>) -> Self {
        Self { pieces }
    }

    /// Remove and return a piece, if it is still in the tray
    pub fn take(&mut self, id: PieceId) -> Option<PuzzlePiece> {
        let index = self.pieces.iter().position(|p| p.id == id)?;
        Some(self.pieces.remove(index))
    }

    /// Move the piece `moved` to the slot currently held by `over`,
    /// shifting the pieces in between. Unknown ids leave the tray as-is.
    pub fn move_piece(&mut self, moved: PieceId, over: PieceId) {
        if moved == over {
            return;
        }
        let (Some(from), Some(to)) = (
            self.pieces.iter().position(|p| p.id == moved),
            self.pieces.iter().position(|p| p.id == over),
        ) else {
            return;
        };

        let piece = self.pieces.remove(from);
        self.pieces.insert(to, piece);
    }

    /// Get a piece without removing it
    pub fn get(&self, id: PieceId) -> Option<&PuzzlePiece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Iterate over the remaining pieces in display order
    pub fn pieces(&self) -> impl Iterator<Item = &PuzzlePiece> {
        self.pieces.iter()
    }

    /// Number of pieces left in the tray
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Check whether every piece has been placed
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jigsaw_board_graph::{EdgeMap, EdgeShape};

    fn pieces(n: u32) -> Vec<PuzzlePiece> {
        (0..n)
            .map(|i| {
                PuzzlePiece::new(
                    PieceId(i),
                    "",
                    EdgeMap {
                        left: EdgeShape::Tab,
                        right: EdgeShape::Blank,
                        top: EdgeShape::Flat,
                        bottom: EdgeShape::Flat,
                    },
                )
            })
            .collect()
    }

    fn order(tray: &PieceTray) -> Vec<u32> {
        tray.pieces().map(|p| p.id.0).collect()
    }

    #[test]
    fn test_take_removes_from_pool() {
        let mut tray = PieceTray::new(pieces(3));

        let taken = tray.take(PieceId(1)).unwrap();
        assert_eq!(taken.id, PieceId(1));
        assert_eq!(tray.len(), 2);
        assert!(tray.take(PieceId(1)).is_none());
    }

    #[test]
    fn test_move_piece_reorders() {
        let mut tray = PieceTray::new(pieces(4));

        tray.move_piece(PieceId(0), PieceId(2));
        assert_eq!(order(&tray), vec![1, 2, 0, 3]);

        tray.move_piece(PieceId(3), PieceId(1));
        assert_eq!(order(&tray), vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_move_piece_ignores_unknown_ids() {
        let mut tray = PieceTray::new(pieces(3));

        tray.move_piece(PieceId(0), PieceId(9));
        tray.move_piece(PieceId(9), PieceId(0));
        tray.move_piece(PieceId(1), PieceId(1));
        assert_eq!(order(&tray), vec![0, 1, 2]);
    }

    #[test]
    fn test_serialization() {
        let mut tray = PieceTray::new(pieces(3));
        tray.move_piece(PieceId(0), PieceId(2));

        let ron_str = ron::to_string(&tray).unwrap();
        let loaded: PieceTray = ron::from_str(&ron_str).unwrap();
        assert_eq!(order(&loaded), order(&tray));
        assert_eq!(loaded.get(PieceId(1)).unwrap().edges, pieces(3)[1].edges);
    }
}
