//! Translating player input into store operations.
//!
//! Keys and swipes resolve to a [`Direction`]; text lines parse into an
//! [`Input`] the session executes.

use derive_more::{Display, Error};
use sliding_stones_core::Direction;
use std::str::FromStr;
use std::time::Duration;
use tracing::instrument;

/// Maps a key name to a direction.
///
/// Accepts the browser-style arrow names (`ArrowUp`, ...) and `w`/`a`/`s`/`d`.
pub fn direction_from_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

/// Resolves a pointer swipe to a direction.
///
/// Nothing happens until either component travels past `min_distance`.
/// The dominant axis wins; equal travel resolves vertically.
pub fn direction_from_drag(dx: f64, dy: f64, min_distance: f64) -> Option<Direction> {
    if dx.abs() <= min_distance && dy.abs() <= min_distance {
        return None;
    }
    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}

/// One line of player input.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Select a piece by id.
    Select(String),
    /// Move the selected piece one cell.
    Step(Direction),
    /// A key press, mapped through [`direction_from_key`].
    Key(String),
    /// Drag the selected piece by a pixel offset from its anchor.
    Drag {
        /// Horizontal offset.
        dx: f64,
        /// Vertical offset.
        dy: f64,
    },
    /// A swipe gesture, mapped through [`direction_from_drag`].
    Swipe {
        /// Horizontal travel.
        dx: f64,
        /// Vertical travel.
        dy: f64,
    },
    /// Commit the current drag.
    Release,
    /// Abandon the current drag.
    Cancel,
    /// Drop the selection.
    Clear,
    /// Start over.
    Reset,
    /// Print the board.
    Show,
    /// List where the selected piece can go.
    Hint,
    /// Let time pass.
    Wait(Duration),
    /// Leave the session.
    Quit,
}

impl FromStr for Input {
    type Err = CommandError;

    #[instrument]
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let input = match words.as_slice() {
            [] => return Err(CommandError::new("empty command")),
            ["select", id] => Input::Select((*id).to_string()),
            ["key", name] => Input::Key((*name).to_string()),
            ["drag", dx, dy] => Input::Drag {
                dx: pixels(dx)?,
                dy: pixels(dy)?,
            },
            ["swipe", dx, dy] => Input::Swipe {
                dx: pixels(dx)?,
                dy: pixels(dy)?,
            },
            ["release"] => Input::Release,
            ["cancel"] => Input::Cancel,
            ["clear"] => Input::Clear,
            ["reset"] => Input::Reset,
            ["show"] => Input::Show,
            ["hint"] => Input::Hint,
            ["wait", ms] => Input::Wait(Duration::from_millis(
                ms.parse()
                    .map_err(|_| CommandError::new(format!("not a duration in ms: {}", ms)))?,
            )),
            ["quit"] | ["exit"] => Input::Quit,
            [word] => match Direction::from_str(word) {
                Ok(direction) => Input::Step(direction),
                Err(_) => return Err(CommandError::new(format!("unknown command: {}", word))),
            },
            [word, ..] => {
                return Err(CommandError::new(format!(
                    "wrong arguments for command: {}",
                    word
                )));
            }
        };
        Ok(input)
    }
}

#[track_caller]
fn pixels(word: &str) -> Result<f64, CommandError> {
    word.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::new(format!("not a pixel offset: {}", word)))
}

/// A line that could not be parsed.
#[derive(Debug, Clone, Display, Error)]
#[display("Command error: {} at {}:{}", message, file, line)]
pub struct CommandError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl CommandError {
    /// Creates a new command error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
