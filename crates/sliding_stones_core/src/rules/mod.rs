//! Game rules for the sliding puzzle.
//!
//! Pure functions over a [`Board`](super::Board). Rules are kept apart from
//! the store so the move contracts and the store can compose them.

pub mod reach;
pub mod win;

pub use reach::{can_reach, reachable_anchors};
pub use win::{check_win_condition, filled_corners, Corner};
