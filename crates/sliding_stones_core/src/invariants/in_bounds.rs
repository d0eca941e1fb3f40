//! In-bounds invariant: every piece lies fully on the grid.

use super::super::geometry::all_in_bounds;
use super::super::Board;
use super::Invariant;

/// Invariant: every absolute square of every piece is inside the grid.
pub struct InBoundsInvariant;

impl Invariant<Board> for InBoundsInvariant {
    fn holds(board: &Board) -> bool {
        board
            .pieces()
            .iter()
            .all(|piece| all_in_bounds(piece.absolute_squares()))
    }

    fn description() -> &'static str {
        "Every piece lies inside the grid"
    }
}
