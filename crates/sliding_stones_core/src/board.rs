//! The piece set and occupancy queries.

use super::types::{Piece, Position};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// All pieces on the board, in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    pieces: Vec<Piece>,
}

impl Board {
    /// Creates a board from a piece list.
    pub fn new(pieces: Vec<Piece>) -> Self {
        Self { pieces }
    }

    /// Returns all pieces.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Looks up a piece by id.
    pub fn piece(&self, id: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    /// Returns the piece covering `cell`, if any.
    pub fn occupant(&self, cell: Position) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.covers(cell))
    }

    /// Returns true if any piece other than `exclude` covers `cell`.
    #[instrument(level = "trace", skip(self))]
    pub fn is_occupied(&self, cell: Position, exclude: Option<&str>) -> bool {
        let occupied = self
            .pieces
            .iter()
            .filter(|p| exclude.is_none_or(|id| p.id() != id))
            .any(|p| p.covers(cell));
        trace!(occupied);
        occupied
    }

    /// Re-anchors a piece without any validation.
    ///
    /// Returns false if no piece has the given id.
    pub(crate) fn set_anchor(&mut self, id: &str, anchor: Position) -> bool {
        match self.pieces.iter_mut().find(|p| p.id() == id) {
            Some(piece) => {
                piece.set_position(anchor);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Layout;

    #[test]
    fn test_occupancy_on_standard_layout() {
        let board = Board::new(Layout::Standard.pieces());
        assert!(board.is_occupied(Position::new(0, 0), None));
        assert!(board.is_occupied(Position::new(5, 2), None));
        assert!(!board.is_occupied(Position::new(1, 1), None));
        assert!(!board.is_occupied(Position::new(2, 2), None));
    }

    #[test]
    fn test_occupancy_excludes_moving_piece() {
        let board = Board::new(Layout::Standard.pieces());
        assert!(board.is_occupied(Position::new(4, 1), None));
        assert!(!board.is_occupied(Position::new(4, 1), Some("square")));
        assert!(board.is_occupied(Position::new(4, 1), Some("L1")));
    }

    #[test]
    fn test_occupant_and_lookup() {
        let board = Board::new(Layout::Standard.pieces());
        let occupant = board.occupant(Position::new(3, 3)).map(|p| p.id().as_str());
        assert_eq!(occupant, Some("L4"));
        assert!(board.piece("missing").is_none());
    }

    #[test]
    fn test_set_anchor_unknown_piece() {
        let mut board = Board::new(Layout::Standard.pieces());
        let before = board.clone();
        assert!(!board.set_anchor("ghost", Position::new(1, 1)));
        assert_eq!(board, before);
    }
}
