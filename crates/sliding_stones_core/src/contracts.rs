//! Contract-based move validation.
//!
//! Contracts define correctness through preconditions and postconditions.
//! A move is legal when every precondition holds, checked cheapest first:
//! the piece exists, the re-anchored shape stays on the board, the
//! destination is clear, and a collision-free path leads there.

use super::action::{Move, MoveError};
use super::geometry::in_bounds;
use super::invariants::{BoardInvariants, InvariantSet};
use super::rules::can_reach;
use super::{Board, Piece, Position};
use tracing::{debug, instrument};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the piece being moved exists.
pub struct PieceExists;

impl PieceExists {
    /// Returns the piece named by the move.
    pub fn check<'b>(mov: &Move, board: &'b Board) -> Result<&'b Piece, MoveError> {
        board
            .piece(mov.piece.as_str())
            .ok_or_else(|| MoveError::UnknownPiece(mov.piece.clone()))
    }
}

/// Precondition: the re-anchored shape lies on the board.
pub struct InBounds;

impl InBounds {
    /// Checks every cell of the piece at the destination.
    pub fn check(mov: &Move, piece: &Piece) -> Result<(), MoveError> {
        match piece.squares_at(mov.to).find(|cell| !in_bounds(*cell)) {
            Some(cell) => Err(MoveError::OutOfBounds(cell)),
            None => Ok(()),
        }
    }
}

/// Precondition: no other piece covers the destination cells.
pub struct DestinationFree;

impl DestinationFree {
    /// Checks the destination footprint against every other piece.
    pub fn check(mov: &Move, piece: &Piece, board: &Board) -> Result<(), MoveError> {
        let id = piece.id().as_str();
        match piece
            .squares_at(mov.to)
            .find(|cell| board.is_occupied(*cell, Some(id)))
        {
            Some(cell) => Err(MoveError::DestinationOccupied(cell)),
            None => Ok(()),
        }
    }
}

/// Precondition: a chain of unit steps reaches the destination without collision.
pub struct PathClear;

impl PathClear {
    /// Runs the reachability search from the piece's current anchor.
    pub fn check(mov: &Move, piece: &Piece, board: &Board) -> Result<(), MoveError> {
        let from = piece.position();
        if can_reach(board, piece.id().as_str(), from, mov.to) {
            Ok(())
        } else {
            Err(MoveError::PathBlocked { from, to: mov.to })
        }
    }
}

/// Composite precondition: every check above, short-circuiting on the first failure.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        let piece = PieceExists::check(mov, board)?;
        InBounds::check(mov, piece)?;
        DestinationFree::check(mov, piece, board)?;
        PathClear::check(mov, piece, board)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions: see [`LegalMove`].
///
/// Postconditions: the piece roster is unchanged, at most one anchor moved,
/// and every [`BoardInvariants`] member holds on the new board.
pub struct MoveContract;

impl MoveContract {
    /// Checks that `after` differs from `before` in one piece's anchor at most.
    pub fn single_anchor_changed(before: &Board, after: &Board) -> Result<(), MoveError> {
        let (old, new) = (before.pieces(), after.pieces());
        let same_roster = old.len() == new.len()
            && old.iter().zip(new).all(|(o, n)| {
                o.id() == n.id() && o.kind() == n.kind() && o.squares() == n.squares()
            });
        if !same_roster {
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: piece roster changed".to_string(),
            ));
        }

        let moved = old
            .iter()
            .zip(new)
            .filter(|(o, n)| o.position() != n.position())
            .count();
        if moved > 1 {
            return Err(MoveError::InvariantViolation(format!(
                "Postcondition failed: {} pieces moved in one commit",
                moved
            )));
        }
        Ok(())
    }
}

impl Contract<Board, Move> for MoveContract {
    fn pre(board: &Board, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, board)
    }

    fn post(before: &Board, after: &Board) -> Result<(), MoveError> {
        Self::single_anchor_changed(before, after)?;
        BoardInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

/// Returns true if `piece_id` may move to `new_position`.
///
/// The reason for a rejection is traced but never returned.
#[instrument(skip(board))]
pub fn is_valid_move(board: &Board, piece_id: &str, new_position: Position) -> bool {
    match MoveContract::pre(board, &Move::new(piece_id, new_position)) {
        Ok(()) => true,
        Err(reason) => {
            debug!(%reason, "Move rejected");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Layout;

    fn standard() -> Board {
        Board::new(Layout::Standard.pieces())
    }

    #[test]
    fn test_unknown_piece() {
        let mov = Move::new("ghost", Position::new(0, 0));
        assert!(matches!(
            LegalMove::check(&mov, &standard()),
            Err(MoveError::UnknownPiece(_))
        ));
    }

    #[test]
    fn test_square_cannot_drop_off_bottom() {
        let mov = Move::new("square", Position::new(5, 1));
        assert_eq!(
            LegalMove::check(&mov, &standard()),
            Err(MoveError::OutOfBounds(Position::new(6, 1)))
        );
        assert!(!is_valid_move(&standard(), "square", Position::new(5, 1)));
    }

    #[test]
    fn test_occupied_destination() {
        let mov = Move::new("square", Position::new(3, 1));
        assert_eq!(
            LegalMove::check(&mov, &standard()),
            Err(MoveError::DestinationOccupied(Position::new(3, 1)))
        );
    }

    #[test]
    fn test_free_but_unreachable_destination() {
        // (1,1)-(2,2) is empty in the standard start, but the square is
        // boxed in below L3 and L4.
        let mov = Move::new("square", Position::new(1, 1));
        assert_eq!(
            LegalMove::check(&mov, &standard()),
            Err(MoveError::PathBlocked {
                from: Position::new(4, 1),
                to: Position::new(1, 1),
            })
        );
    }

    #[test]
    fn test_legal_slide() {
        assert!(is_valid_move(&standard(), "square", Position::new(4, 2)));
        assert!(is_valid_move(&standard(), "square", Position::new(4, 0)));
    }

    #[test]
    fn test_staying_put_is_legal() {
        assert!(is_valid_move(&standard(), "L1", Position::new(0, 0)));
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = standard();
        let mut after = before.clone();
        after.set_anchor("L4", Position::new(0, 2));
        assert!(MoveContract::post(&before, &after).is_err());
        assert!(MoveContract::post(&before, &before).is_ok());
    }

    #[test]
    fn test_postcondition_allows_one_anchor_change() {
        let before = standard();
        let mut after = before.clone();
        after.set_anchor("square", Position::new(4, 2));
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_rejects_two_anchor_changes() {
        let before = standard();
        let mut after = before.clone();
        // Both placements are legal on their own; together they are two moves.
        after.set_anchor("square", Position::new(4, 2));
        after.set_anchor("L3", Position::new(3, 0));
        assert!(BoardInvariants::check_all(&after).is_ok());
        assert!(matches!(
            MoveContract::post(&before, &after),
            Err(MoveError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_postcondition_rejects_roster_change() {
        let before = standard();
        let after = Board::new(before.pieces()[..4].to_vec());
        assert!(MoveContract::post(&before, &after).is_err());
    }
}
