//! Serializable read model of the store.
//!
//! UI collaborators render from a snapshot rather than borrowing the store,
//! so the whole state can cross a serialization boundary in one value.

use super::layout::OPTIMAL_MOVES;
use super::phases::{Interaction, Status};
use super::store::GameStore;
use super::{Layout, Piece, PieceColor, PieceId, PieceKind, Position};
use serde::{Deserialize, Serialize};

/// One piece as the UI sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    /// Piece id.
    pub id: PieceId,
    /// Shape category.
    pub kind: PieceKind,
    /// Colour tag.
    pub color: PieceColor,
    /// Anchor.
    pub position: Position,
    /// Cells currently covered.
    pub cells: Vec<Position>,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        Self {
            id: piece.id().clone(),
            kind: piece.kind(),
            color: piece.color(),
            position: piece.position(),
            cells: piece.absolute_squares(),
        }
    }
}

/// Everything a UI needs to draw the puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Layout the game started from.
    pub layout: Layout,
    /// Pieces in board order.
    pub pieces: Vec<PieceView>,
    /// Selection and drag state.
    pub interaction: Interaction,
    /// Committed moves.
    pub move_count: u32,
    /// Puzzle progress.
    pub status: Status,
    /// Known optimal solution length.
    pub optimal_moves: u32,
}

impl From<&GameStore> for GameSnapshot {
    fn from(store: &GameStore) -> Self {
        Self {
            layout: store.layout(),
            pieces: store.pieces().iter().map(PieceView::from).collect(),
            interaction: store.interaction().clone(),
            move_count: store.move_count(),
            status: store.status(),
            optimal_moves: OPTIMAL_MOVES,
        }
    }
}

impl GameSnapshot {
    /// The selected piece, if any.
    pub fn selected(&self) -> Option<&PieceId> {
        self.interaction.selected()
    }

    /// The tentative drag anchor, if any.
    pub fn temp_position(&self) -> Option<Position> {
        self.interaction.temp_position()
    }

    /// True once the win has been latched.
    pub fn won(&self) -> bool {
        self.status == Status::Won
    }

    /// Returns a status line for display.
    pub fn status_string(&self) -> String {
        match self.status {
            Status::Playing => format!("Moves: {}", self.move_count),
            Status::Settling => format!("Moves: {}. Solved!", self.move_count),
            Status::Won => format!(
                "Solved in {} moves. The optimal solution takes {}.",
                self.move_count, self.optimal_moves
            ),
        }
    }
}
