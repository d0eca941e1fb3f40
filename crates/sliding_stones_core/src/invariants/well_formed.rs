//! Well-formed invariant: ids are unique and shapes are valid polyominoes.

use super::super::Board;
use super::Invariant;
use std::collections::HashSet;

/// Invariant: piece ids are unique, and every shape is non-empty with no
/// repeated offset.
pub struct WellFormedInvariant;

impl Invariant<Board> for WellFormedInvariant {
    fn holds(board: &Board) -> bool {
        let mut ids = HashSet::new();
        board.pieces().iter().all(|piece| {
            let mut offsets = HashSet::new();
            ids.insert(piece.id())
                && !piece.squares().is_empty()
                && piece.squares().iter().all(|offset| offsets.insert(*offset))
        })
    }

    fn description() -> &'static str {
        "Piece ids are unique and shapes have distinct offsets"
    }
}
