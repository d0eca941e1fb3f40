//! First-class action types for the sliding puzzle.
//!
//! Moves are domain events, not side effects. They name a piece and the
//! anchor it should end up at, and can be validated before being applied.

use super::geometry::{COLS, ROWS};
use super::types::{PieceId, Position};
use serde::{Deserialize, Serialize};

/// A unit step along one axis.
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
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    /// One row up.
    Up,
    /// One column right.
    Right,
    /// One row down.
    Down,
    /// One column left.
    Left,
}

impl Direction {
    /// Search order used when exploring neighbours.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Offset of a single step in this direction.
    pub fn delta(self) -> Position {
        match self {
            Direction::Up => Position::new(-1, 0),
            Direction::Right => Position::new(0, 1),
            Direction::Down => Position::new(1, 0),
            Direction::Left => Position::new(0, -1),
        }
    }
}

impl Position {
    /// The neighbouring position one step in `direction`.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.delta()
    }
}

/// Converts a pixel distance into a whole number of cells.
///
/// Rounds to the nearest cell. Non-finite input and a non-positive cell size
/// both resolve to no movement. The result is clamped to `ROWS + COLS` cells
/// either way, which is already off the board from any anchor.
pub fn cells_from_pixels(pixels: f64, cell_size_px: f64) -> i32 {
    if !pixels.is_finite() || !cell_size_px.is_finite() || cell_size_px <= 0.0 {
        return 0;
    }
    let limit = f64::from(ROWS + COLS);
    (pixels / cell_size_px).round().clamp(-limit, limit) as i32
}

/// A request to re-anchor one piece.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The piece being moved.
    pub piece: PieceId,
    /// The anchor the piece should end up at.
    pub to: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(piece: impl Into<PieceId>, to: Position) -> Self {
        Self {
            piece: piece.into(),
            to,
        }
    }

    /// Returns the piece being moved.
    pub fn piece(&self) -> &PieceId {
        &self.piece
    }

    /// Returns the destination anchor.
    pub fn to(&self) -> Position {
        self.to
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.piece, self.to)
    }
}

/// Reason a move was rejected.
///
/// Only used for tracing and tests; the public verdict on a move is a plain
/// legal / illegal answer.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// No piece has this id.
    #[display("No piece named {}", _0)]
    UnknownPiece(PieceId),

    /// Part of the piece would leave the board.
    #[display("Piece would leave the board at {}", _0)]
    OutOfBounds(Position),

    /// The destination overlaps another piece.
    #[display("Cell {} is occupied by another piece", _0)]
    DestinationOccupied(Position),

    /// No collision-free sequence of unit steps reaches the destination.
    #[display("No clear path from {} to {}", from, to)]
    PathBlocked {
        /// Current anchor.
        from: Position,
        /// Requested anchor.
        to: Position,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
