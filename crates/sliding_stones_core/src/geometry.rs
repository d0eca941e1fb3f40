//! Grid bounds and absolute-cell computation.

use super::types::{Piece, Position};

/// Number of rows on the board.
pub const ROWS: i32 = 6;

/// Number of columns on the board.
pub const COLS: i32 = 4;

/// Returns true if `pos` lies inside `[0, ROWS) × [0, COLS)`.
pub fn in_bounds(pos: Position) -> bool {
    (0..ROWS).contains(&pos.row) && (0..COLS).contains(&pos.col)
}

/// Returns true if every cell lies inside the grid.
pub fn all_in_bounds(cells: impl IntoIterator<Item = Position>) -> bool {
    cells.into_iter().all(in_bounds)
}

impl Piece {
    /// Cells covered by this piece at its current anchor.
    pub fn absolute_squares(&self) -> Vec<Position> {
        self.squares_at(self.position()).collect()
    }

    /// Cells this piece would cover if re-anchored at `anchor`.
    pub fn squares_at(&self, anchor: Position) -> impl Iterator<Item = Position> + '_ {
        self.squares().iter().map(move |&offset| anchor + offset)
    }

    /// Returns true if the piece currently covers `cell`.
    pub fn covers(&self, cell: Position) -> bool {
        self.squares_at(self.position()).any(|sq| sq == cell)
    }

    /// Returns true if the whole shape stays on the board when anchored at `anchor`.
    pub fn fits_at(&self, anchor: Position) -> bool {
        all_in_bounds(self.squares_at(anchor))
    }
}
