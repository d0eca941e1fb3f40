//! Win detection for the sliding puzzle.

use super::super::layout::TARGET_ID;
use super::super::{Board, Piece, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One of the four notches around the 2×2 target block.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Corner {
    /// Above and left of the block.
    TopLeft,
    /// Above and right of the block.
    TopRight,
    /// Below and left of the block.
    BottomLeft,
    /// Below and right of the block.
    BottomRight,
}

impl Corner {
    /// All corners.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// The three cells an L piece must cover to fill this corner, given the
    /// target block's anchor.
    pub fn cells(self, anchor: Position) -> [Position; 3] {
        let Position { row: r, col: c } = anchor;
        let at = Position::new;
        match self {
            Corner::TopLeft => [at(r - 1, c - 1), at(r - 1, c), at(r, c - 1)],
            Corner::TopRight => [at(r - 1, c + 1), at(r - 1, c + 2), at(r, c + 2)],
            Corner::BottomLeft => [at(r + 1, c - 1), at(r + 2, c - 1), at(r + 2, c)],
            Corner::BottomRight => [at(r + 1, c + 2), at(r + 2, c + 2), at(r + 2, c + 1)],
        }
    }
}

/// Returns the target block and the four L pieces, if the board has exactly
/// that composition.
fn target_and_ls(board: &Board) -> Option<(&Piece, Vec<&Piece>)> {
    let mut targets = board.pieces().iter().filter(|p| p.id() == TARGET_ID);
    let target = targets.next()?;
    if targets.next().is_some() {
        return None;
    }

    let ls: Vec<&Piece> = board
        .pieces()
        .iter()
        .filter(|p| p.id() != TARGET_ID)
        .collect();
    (ls.len() == 4).then_some((target, ls))
}

/// Corners around the target block that some L piece currently fills.
///
/// Empty if the board does not hold exactly one target block and four L
/// pieces.
#[instrument(skip(board))]
pub fn filled_corners(board: &Board) -> Vec<Corner> {
    let Some((target, ls)) = target_and_ls(board) else {
        return Vec::new();
    };
    let anchor = target.position();

    Corner::ALL
        .into_iter()
        .filter(|corner| {
            let cells = corner.cells(anchor);
            ls.iter().any(|l| cells.iter().all(|&cell| l.covers(cell)))
        })
        .collect()
}

/// Checks if the four L pieces frame the target block.
///
/// Each corner is checked independently: it is enough that some L piece
/// covers its three cells.
#[instrument(skip(board))]
pub fn check_win_condition(board: &Board) -> bool {
    let won = filled_corners(board).len() == Corner::ALL.len();
    debug!(won, "Win condition evaluated");
    won
}
