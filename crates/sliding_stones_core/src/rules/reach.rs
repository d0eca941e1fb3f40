//! Path existence for a rigid piece sliding in unit steps.
//!
//! A piece may reach an anchor only through a chain of up/down/left/right
//! steps where, at every intermediate anchor, its whole shape is on the board
//! and clear of every other piece. Other pieces are considered at their
//! current positions; the moving piece never collides with itself.

use super::super::geometry::in_bounds;
use super::super::{Board, Direction, Piece, Position};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, instrument};

/// Returns true if `piece` could sit at `anchor` without collision.
fn admissible(board: &Board, piece: &Piece, anchor: Position) -> bool {
    let id = piece.id().as_str();
    piece
        .squares_at(anchor)
        .all(|cell| in_bounds(cell) && !board.is_occupied(cell, Some(id)))
}

/// Breadth-first search over anchors, calling `found` on each dequeued anchor.
///
/// Stops early as soon as `found` returns true.
fn search(
    board: &Board,
    piece: &Piece,
    start: Position,
    mut found: impl FnMut(Position) -> bool,
) -> bool {
    let mut queue = VecDeque::from([start]);
    let mut visited = HashSet::from([start]);

    while let Some(current) = queue.pop_front() {
        if found(current) {
            return true;
        }

        for direction in Direction::ALL {
            let next = current.step(direction);
            if visited.contains(&next) || !admissible(board, piece, next) {
                continue;
            }
            visited.insert(next);
            queue.push_back(next);
        }
    }

    false
}

/// Checks whether `piece_id` can slide from `start` to `end`.
///
/// Unknown pieces are treated as blocked. `start == end` always succeeds.
#[instrument(skip(board))]
pub fn can_reach(board: &Board, piece_id: &str, start: Position, end: Position) -> bool {
    let Some(piece) = board.piece(piece_id) else {
        debug!("Unknown piece treated as blocked");
        return false;
    };

    let reachable = search(board, piece, start, |anchor| anchor == end);
    debug!(reachable, "Path search finished");
    reachable
}

/// All anchors the piece can reach from where it stands, in BFS order.
///
/// The current anchor comes first. Unknown pieces yield an empty list.
#[instrument(skip(board))]
pub fn reachable_anchors(board: &Board, piece_id: &str) -> Vec<Position> {
    let Some(piece) = board.piece(piece_id) else {
        return Vec::new();
    };

    let mut anchors = Vec::new();
    search(board, piece, piece.position(), |anchor| {
        anchors.push(anchor);
        false
    });
    anchors
}
