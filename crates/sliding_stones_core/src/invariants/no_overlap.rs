//! No-overlap invariant: distinct pieces never share a cell.

use super::super::Board;
use super::Invariant;
use std::collections::HashSet;

/// Invariant: the absolute squares of distinct pieces are disjoint.
pub struct NoOverlapInvariant;

impl Invariant<Board> for NoOverlapInvariant {
    fn holds(board: &Board) -> bool {
        let mut seen = HashSet::new();
        board
            .pieces()
            .iter()
            .flat_map(|piece| piece.absolute_squares())
            .all(|cell| seen.insert(cell))
    }

    fn description() -> &'static str {
        "No two pieces cover the same cell"
    }
}
