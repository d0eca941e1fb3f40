//! Interactive play session.
//!
//! [`Session`] executes parsed input against a [`GameStore`] and produces
//! the text to show. [`run`] drives a session from a line stream, waking on
//! the store's next deadline so a pending win latches without further input.

use crate::config::PuzzleConfig;
use crate::input::{Input, direction_from_drag, direction_from_key};
use crate::render::{help_line, render_board};
use sliding_stones_core::{Direction, GameStore, Layout, Piece, PieceId, Position};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// What the driver should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and keep going.
    Text(String),
    /// End the session.
    Quit,
}

/// A single player's game.
#[derive(Debug)]
pub struct Session {
    store: GameStore,
    min_drag_distance_px: f64,
}

impl Session {
    /// Starts a session from `config`.
    #[instrument(skip(config), fields(layout = %config.layout()))]
    pub fn new(config: &PuzzleConfig) -> Self {
        Self {
            store: GameStore::with_settings(*config.layout(), config.store_settings()),
            min_drag_distance_px: *config.min_drag_distance_px(),
        }
    }

    /// Starts a session on `layout` with default settings.
    pub fn with_layout(layout: Layout) -> Self {
        Self::new(&PuzzleConfig::default().with_layout(layout))
    }

    /// Returns the store.
    pub fn store(&self) -> &GameStore {
        &self.store
    }

    /// Parses and executes one line. Parse errors become a text reply.
    #[instrument(skip(self))]
    pub fn handle_line(&mut self, line: &str) -> Reply {
        match line.parse::<Input>() {
            Ok(input) => self.execute(input),
            Err(e) => {
                debug!(error = %e, "Unparseable input");
                Reply::Text(format!("{}\n{}\n", e.message, help_line()))
            }
        }
    }

    /// Executes one input.
    #[instrument(skip(self))]
    pub fn execute(&mut self, input: Input) -> Reply {
        let text = match input {
            Input::Select(id) => {
                self.store.select(&id);
                if self.selected().is_some_and(|s| s == id.as_str()) {
                    self.board()
                } else {
                    format!("No piece named {}\n", id)
                }
            }
            Input::Step(direction) => self.step(direction),
            Input::Key(name) => match direction_from_key(&name) {
                Some(direction) => self.step(direction),
                None => format!("Unbound key: {}\n", name),
            },
            Input::Drag { dx, dy } => self.drag(dx, dy),
            Input::Swipe { dx, dy } => {
                match direction_from_drag(dx, dy, self.min_drag_distance_px) {
                    Some(direction) => self.step(direction),
                    None => "Swipe too short\n".to_string(),
                }
            }
            Input::Release => self.release(),
            Input::Cancel => {
                self.store.cancel_drag();
                self.board()
            }
            Input::Clear => {
                self.store.clear_selection();
                self.board()
            }
            Input::Reset => {
                self.store.reset_game();
                self.board()
            }
            Input::Show => self.board(),
            Input::Hint => self.hint(),
            Input::Wait(elapsed) => match self.advance(elapsed) {
                Some(message) => message,
                None => format!("{}\n", self.store.snapshot().status_string()),
            },
            Input::Quit => return Reply::Quit,
        };
        Reply::Text(text)
    }

    /// Moves time forward. Returns the win announcement if the latch fired.
    pub fn advance(&mut self, elapsed: Duration) -> Option<String> {
        let was_won = self.store.is_won();
        self.store.advance(elapsed);
        if self.store.is_won() && !was_won {
            info!(move_count = self.store.move_count(), "Win announced");
            Some(format!("{}\n", self.store.snapshot().status_string()))
        } else {
            None
        }
    }

    fn selected(&self) -> Option<PieceId> {
        self.store.selected_piece_id().cloned()
    }

    fn board(&self) -> String {
        render_board(&self.store.snapshot())
    }

    fn step(&mut self, direction: Direction) -> String {
        let Some(id) = self.selected() else {
            return "Select a piece first\n".to_string();
        };
        if self.store.move_selected(direction) {
            self.board()
        } else {
            format!("{} cannot move {}\n", id, direction)
        }
    }

    fn drag(&mut self, dx: f64, dy: f64) -> String {
        let Some(id) = self.selected() else {
            return "Select a piece first\n".to_string();
        };
        if self.store.update_temp_position(id.as_str(), dx, dy) {
            self.board()
        } else {
            "Cannot drag there\n".to_string()
        }
    }

    fn release(&mut self) -> String {
        let committed = match self.selected() {
            Some(id) => self.store.commit_move(id.as_str()),
            None => false,
        };
        if committed {
            self.board()
        } else {
            "Nothing to commit\n".to_string()
        }
    }

    fn hint(&self) -> String {
        let Some(id) = self.selected() else {
            let movable: Vec<&str> = self
                .store
                .pieces()
                .iter()
                .filter(|p| self.store.reachable_anchors(p.id().as_str()).len() > 1)
                .map(|p| p.id().as_str())
                .collect();
            return format!("Movable pieces: {}\n", movable.join(", "));
        };
        let current = self.store.piece(id.as_str()).map(Piece::position);
        let targets: Vec<String> = self
            .store
            .reachable_anchors(id.as_str())
            .into_iter()
            .filter(|target| Some(*target) != current)
            .map(|target: Position| target.to_string())
            .collect();
        if targets.is_empty() {
            format!("{} cannot move\n", id)
        } else {
            format!("{} can reach: {}\n", id, targets.join(" "))
        }
    }
}

/// Runs `session` until `input` ends or the player quits.
///
/// Wall-clock time between lines is fed to the store, and the loop also
/// wakes on the store's next deadline so the win latches on its own. A
/// `wait` line sleeps for real here; the store only sees the measured time.
#[instrument(skip_all)]
pub async fn run<R, W>(session: &mut Session, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut clock = Instant::now();

    info!("Session started");
    write_text(&mut output, &format!("{}\n", help_line())).await?;
    write_text(&mut output, &render_board(&session.store().snapshot())).await?;

    loop {
        let deadline = session.store().next_deadline();
        tokio::select! {
            line = lines.next_line() => {
                tick(session, &mut clock, &mut output).await?;
                let Some(line) = line? else {
                    debug!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let reply = match line.parse::<Input>() {
                    Ok(Input::Wait(pause)) => {
                        tokio::time::sleep(pause).await;
                        let elapsed = clock.elapsed();
                        clock = Instant::now();
                        session.execute(Input::Wait(elapsed))
                    }
                    Ok(input) => session.execute(input),
                    Err(_) => session.handle_line(&line),
                };
                match reply {
                    Reply::Text(text) => write_text(&mut output, &text).await?,
                    Reply::Quit => break,
                }
            }
            _ = tokio::time::sleep(deadline.unwrap_or_default()), if deadline.is_some() => {
                tick(session, &mut clock, &mut output).await?;
            }
        }
    }

    if session.store().win_pending() {
        warn!("Session ended before the win latched");
    }
    info!(
        move_count = session.store().move_count(),
        won = session.store().is_won(),
        "Session finished"
    );
    Ok(())
}

async fn tick<W>(session: &mut Session, clock: &mut Instant, output: &mut W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let elapsed = clock.elapsed();
    *clock = Instant::now();
    if let Some(message) = session.advance(elapsed) {
        write_text(output, &message).await?;
    }
    Ok(())
}

async fn write_text<W>(output: &mut W, text: &str) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}
