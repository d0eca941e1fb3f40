//! Core domain types for the sliding puzzle.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// A cell coordinate or a relative offset on the grid.
///
/// Rows grow downward, columns grow to the right. Coordinates are signed so
/// that candidate anchors one step off the board can be represented and
/// rejected by the bounds check instead of wrapping.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({}, {})", row, col)]
pub struct Position {
    /// Row index, 0 at the top.
    pub row: i32,
    /// Column index, 0 at the left.
    pub col: i32,
}

impl Position {
    /// Creates a position.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl Add for Position {
    type Output = Position;

    /// Saturates at the `i32` limits; such positions are never on the board.
    fn add(self, rhs: Position) -> Position {
        Position::new(
            self.row.saturating_add(rhs.row),
            self.col.saturating_add(rhs.col),
        )
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// Stable identifier of a piece for its whole lifetime.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct PieceId(String);

impl PieceId {
    /// Creates an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PieceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<str> for PieceId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PieceId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Shape category of a piece.
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
pub enum PieceKind {
    /// Three-cell L tromino.
    #[serde(rename = "L")]
    #[strum(serialize = "L")]
    L,
    /// The 2×2 target block.
    #[serde(rename = "square")]
    #[strum(serialize = "square")]
    Square,
}

/// Cosmetic colour tag. Has no effect on the rules.
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
#[strum(serialize_all = "lowercase")]
pub enum PieceColor {
    /// Yellow.
    Yellow,
    /// Red.
    Red,
    /// Brown.
    Brown,
    /// Orange.
    Orange,
    /// Multi-coloured (the target block).
    Multi,
}

/// A polyomino piece anchored on the grid.
///
/// `squares` are offsets from the anchor and never change after
/// construction. The cells a piece covers are derived from the current
/// anchor every time they are needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    color: PieceColor,
    position: Position,
    squares: Vec<Position>,
}

impl Piece {
    /// Creates a piece at `position` with the given shape offsets.
    pub fn new(
        id: impl Into<PieceId>,
        kind: PieceKind,
        color: PieceColor,
        position: Position,
        squares: Vec<Position>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            color,
            position,
            squares,
        }
    }

    /// Returns the identifier.
    pub fn id(&self) -> &PieceId {
        &self.id
    }

    /// Returns the shape category.
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the colour tag.
    pub fn color(&self) -> PieceColor {
        self.color
    }

    /// Returns the anchor position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the relative shape offsets.
    pub fn squares(&self) -> &[Position] {
        &self.squares
    }

    /// Moves the anchor (unchecked - the board validates moves).
    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_position_addition() {
        assert_eq!(Position::new(2, 1) + Position::new(-1, 3), Position::new(1, 4));
    }

    #[test]
    fn test_position_addition_saturates() {
        let far = Position::new(i32::MAX, i32::MIN);
        assert_eq!(far + Position::new(1, -1), far);
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(4, 1).to_string(), "(4, 1)");
    }

    #[test]
    fn test_piece_id_compares_with_str() {
        let id = PieceId::from("L4");
        assert_eq!(id, "L4");
        assert_eq!(id.as_str(), "L4");
    }

    #[test]
    fn test_kind_labels_round_trip() {
        assert_eq!(PieceKind::L.to_string(), "L");
        assert_eq!(PieceKind::from_str("square").ok(), Some(PieceKind::Square));
        assert_eq!(PieceColor::from_str("orange").ok(), Some(PieceColor::Orange));
    }
}
