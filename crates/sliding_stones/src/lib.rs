//! Sliding Stones - terminal driver.
//!
//! Wires the rules engine in `sliding_stones_core` to a line-oriented
//! terminal session: configuration, input adapters, rendering and the
//! async loop that lets the win latch fire between commands.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod input;
mod render;
mod session;

pub use config::{ConfigError, MIN_DRAG_DISTANCE_PX, PuzzleConfig};
pub use input::{CommandError, Input, direction_from_drag, direction_from_key};
pub use render::{help_line, render_board};
pub use session::{Reply, Session, run};
