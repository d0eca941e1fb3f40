//! Plain-text board rendering.

use sliding_stones_core::{COLS, Direction, GameSnapshot, PieceKind, PieceView, Position, ROWS};
use strum::IntoEnumIterator;

const EMPTY: char = '.';
const GHOST: char = '+';

fn glyph(piece: &PieceView) -> char {
    match piece.kind {
        PieceKind::Square => '#',
        PieceKind::L => piece.id.as_str().chars().last().unwrap_or('L'),
    }
}

/// Draws the board, the drag ghost and the status line.
///
/// The dragged piece's tentative cells show as `+` where they do not
/// overlap its current cells.
pub fn render_board(snapshot: &GameSnapshot) -> String {
    let mut grid = vec![vec![EMPTY; COLS as usize]; ROWS as usize];

    for piece in &snapshot.pieces {
        for cell in &piece.cells {
            if let Some(slot) = slot(&mut grid, *cell) {
                *slot = glyph(piece);
            }
        }
    }

    if let (Some(id), Some(temp)) = (snapshot.selected(), snapshot.temp_position())
        && let Some(piece) = snapshot.pieces.iter().find(|p| &p.id == id)
    {
        let shift = Position::new(temp.row - piece.position.row, temp.col - piece.position.col);
        for cell in &piece.cells {
            if let Some(slot) = slot(&mut grid, *cell + shift)
                && *slot == EMPTY
            {
                *slot = GHOST;
            }
        }
    }

    let mut out = String::new();
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    if let Some(id) = snapshot.selected() {
        out.push_str(&format!("Selected: {}\n", id));
    }
    out.push_str(&snapshot.status_string());
    out.push('\n');
    out
}

fn slot(grid: &mut [Vec<char>], cell: Position) -> Option<&mut char> {
    let row = usize::try_from(cell.row).ok()?;
    let col = usize::try_from(cell.col).ok()?;
    grid.get_mut(row)?.get_mut(col)
}

/// One-line summary of the commands a player can type.
pub fn help_line() -> String {
    let steps: Vec<String> = Direction::iter().map(|d| d.to_string()).collect();
    format!(
        "Commands: select <id>, {}, key <name>, drag <dx> <dy>, release, swipe <dx> <dy>, \
         cancel, clear, hint, reset, show, wait <ms>, quit",
        steps.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sliding_stones_core::{GameStore, Layout};

    #[test]
    fn test_standard_board() {
        let store = GameStore::new(Layout::Standard);
        let text = render_board(&store.snapshot());
        let expected = "\
1122
1..2
3..4
3344
.##.
.##.
Moves: 0
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_drag_ghost() {
        let mut store = GameStore::new(Layout::Standard);
        store.select("square");
        assert!(store.update_temp_position("square", 100.0, 0.0));
        let text = render_board(&store.snapshot());
        assert!(text.starts_with("1122\n1..2\n3..4\n3344\n.##+\n.##+\n"));
        assert!(text.contains("Selected: square"));
    }

    #[test]
    fn test_help_lists_directions_in_order() {
        assert!(help_line().contains("up, right, down, left"));
    }
}
