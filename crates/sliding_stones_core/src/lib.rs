//! Sliding stones - rules engine for a Klotski-style escape puzzle.
//!
//! Four L trominoes and a 2×2 block share a 6×4 grid. Pieces slide as rigid
//! bodies in unit steps; the puzzle is solved when the four L pieces frame
//! the block from every corner.
//!
//! # Architecture
//!
//! - **Geometry**: positions, shapes and the grid bounds predicate
//! - **Board**: the piece set and occupancy queries
//! - **Rules**: reachability search and win detection
//! - **Contracts**: the move validator composed from preconditions
//! - **Invariants**: board properties checked after every validated commit
//! - **Store**: selection, drag, move counting and the deferred win latch
//!
//! # Example
//!
//! ```
//! use sliding_stones_core::{Direction, GameStore, Layout};
//! use std::time::Duration;
//!
//! let mut store = GameStore::new(Layout::NearWin);
//! assert!(store.request_move("L4", Direction::Up));
//! assert!(store.check_win_condition());
//!
//! store.advance(Duration::from_millis(500));
//! assert!(store.is_won());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod contracts;
mod geometry;
pub mod invariants;
mod latch;
mod layout;
mod phases;
pub mod rules;
mod snapshot;
mod store;
mod types;

pub use action::{Direction, Move, MoveError, cells_from_pixels};
pub use board::Board;
pub use contracts::{
    Contract, DestinationFree, InBounds, LegalMove, MoveContract, PathClear, PieceExists,
    is_valid_move,
};
pub use geometry::{COLS, ROWS, all_in_bounds, in_bounds};
pub use latch::{CancelToken, Deferred, TaskQueue};
pub use layout::{Layout, OPTIMAL_MOVES, TARGET_ID};
pub use phases::{Interaction, Status};
pub use rules::{Corner, can_reach, check_win_condition, filled_corners, reachable_anchors};
pub use snapshot::{GameSnapshot, PieceView};
pub use store::{DEFAULT_CELL_SIZE_PX, GameStore, StoreSettings, WIN_SETTLE_DELAY};
pub use types::{Piece, PieceColor, PieceId, PieceKind, Position};
