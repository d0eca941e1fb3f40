//! Interaction and status states of the store.
//!
//! Selection and an in-flight drag are explicit variants rather than a pair
//! of nullable fields, so "nothing selected" and "no pending drag" are
//! matched exhaustively.

use super::types::{PieceId, Position};
use serde::{Deserialize, Serialize};

/// What the player is currently doing with the pieces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Interaction {
    /// Nothing selected.
    #[default]
    Idle,
    /// A piece is pinned but not being dragged.
    Selected {
        /// The selected piece.
        piece: PieceId,
    },
    /// A piece is being dragged and has a validated tentative anchor.
    Dragging {
        /// The dragged piece.
        piece: PieceId,
        /// Tentative anchor, not yet committed.
        temp: Position,
    },
}

impl Interaction {
    /// The selected piece, if any.
    pub fn selected(&self) -> Option<&PieceId> {
        match self {
            Interaction::Idle => None,
            Interaction::Selected { piece } | Interaction::Dragging { piece, .. } => Some(piece),
        }
    }

    /// The tentative drag anchor, if a drag is in progress.
    pub fn temp_position(&self) -> Option<Position> {
        match self {
            Interaction::Dragging { temp, .. } => Some(*temp),
            Interaction::Idle | Interaction::Selected { .. } => None,
        }
    }

    /// The tentative anchor of `piece`, if that piece is the one being dragged.
    pub fn temp_for(&self, piece_id: &str) -> Option<Position> {
        match self {
            Interaction::Dragging { piece, temp } if piece == piece_id => Some(*temp),
            _ => None,
        }
    }
}

/// Progress of the puzzle as seen by the player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Status {
    /// Not solved.
    Playing,
    /// Solved arrangement on the board, waiting for the settle delay.
    Settling,
    /// Win latched.
    Won,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_has_no_selection() {
        let idle = Interaction::Idle;
        assert_eq!(idle.selected(), None);
        assert_eq!(idle.temp_position(), None);
    }

    #[test]
    fn test_dragging_exposes_both() {
        let drag = Interaction::Dragging {
            piece: PieceId::from("L4"),
            temp: Position::new(2, 2),
        };
        assert_eq!(drag.selected().map(PieceId::as_str), Some("L4"));
        assert_eq!(drag.temp_position(), Some(Position::new(2, 2)));
        assert_eq!(drag.temp_for("L4"), Some(Position::new(2, 2)));
        assert_eq!(drag.temp_for("L3"), None);
    }
}
