//! Hardcoded starting arrangements.

use super::types::{Piece, PieceColor, PieceKind, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Id of the 2×2 target block.
pub const TARGET_ID: &str = "square";

/// Length of the known optimal solution from the standard layout.
pub const OPTIMAL_MOVES: u32 = 22;

const L1_SHAPE: [(i32, i32); 3] = [(0, 0), (0, 1), (1, 0)];
const L2_SHAPE: [(i32, i32); 3] = [(0, 0), (0, 1), (1, 1)];
const L3_SHAPE: [(i32, i32); 3] = [(0, 0), (1, 0), (1, 1)];
const L4_SHAPE: [(i32, i32); 3] = [(0, 1), (1, 0), (1, 1)];
const SQUARE_SHAPE: [(i32, i32); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];

/// Which starting arrangement to load.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Layout {
    /// The real puzzle start.
    #[default]
    Standard,
    /// One move away from solved, for demos and tests.
    NearWin,
}

impl Layout {
    /// Selects a layout from a URL-style query string.
    ///
    /// `mock=true` picks [`Layout::NearWin`]; anything else is the standard
    /// start. A leading `?` is accepted.
    #[instrument]
    pub fn from_query(query: &str) -> Layout {
        let near_win = query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .any(|(key, value)| key == "mock" && value == "true");
        let layout = if near_win {
            Layout::NearWin
        } else {
            Layout::Standard
        };
        debug!(%layout, "Layout selected from query");
        layout
    }

    /// Builds the pieces of this layout.
    pub fn pieces(self) -> Vec<Piece> {
        let (l4_anchor, square_anchor) = match self {
            Layout::Standard => ((2, 2), (4, 1)),
            Layout::NearWin => ((3, 2), (1, 1)),
        };

        vec![
            piece("L1", PieceKind::L, PieceColor::Yellow, (0, 0), &L1_SHAPE),
            piece("L2", PieceKind::L, PieceColor::Red, (0, 2), &L2_SHAPE),
            piece("L3", PieceKind::L, PieceColor::Brown, (2, 0), &L3_SHAPE),
            piece("L4", PieceKind::L, PieceColor::Orange, l4_anchor, &L4_SHAPE),
            piece(
                TARGET_ID,
                PieceKind::Square,
                PieceColor::Multi,
                square_anchor,
                &SQUARE_SHAPE,
            ),
        ]
    }
}

fn piece(
    id: &str,
    kind: PieceKind,
    color: PieceColor,
    anchor: (i32, i32),
    shape: &[(i32, i32)],
) -> Piece {
    Piece::new(
        id,
        kind,
        color,
        anchor.into(),
        shape.iter().copied().map(Position::from).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_query_flag_selects_near_win() {
        assert_eq!(Layout::from_query("?mock=true"), Layout::NearWin);
        assert_eq!(Layout::from_query("lang=en&mock=true"), Layout::NearWin);
        assert_eq!(Layout::from_query("?mock=false"), Layout::Standard);
        assert_eq!(Layout::from_query(""), Layout::Standard);
    }

    #[test]
    fn test_layout_names() {
        assert_eq!(Layout::NearWin.to_string(), "near-win");
        assert_eq!(Layout::from_str("standard").ok(), Some(Layout::Standard));
        assert_eq!(Layout::from_str("Near-Win").ok(), Some(Layout::NearWin));
    }

    #[test]
    fn test_layouts_differ_only_in_l4_and_square() {
        let standard = Layout::Standard.pieces();
        let near_win = Layout::NearWin.pieces();
        assert_eq!(standard.len(), 5);
        for (a, b) in standard.iter().zip(&near_win) {
            assert_eq!(a.id(), b.id());
            assert_eq!(a.squares(), b.squares());
            if a.id() != "L4" && a.id() != TARGET_ID {
                assert_eq!(a.position(), b.position());
            }
        }
    }
}
