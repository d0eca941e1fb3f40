//! Authoritative game state.
//!
//! The store owns the piece set, move counter, interaction state and the won
//! flag. Pieces change only through a committed move; every change cancels
//! any pending win latch and re-evaluates the win condition from scratch.

use super::action::{Direction, cells_from_pixels};
use super::contracts::{Contract, MoveContract, is_valid_move};
use super::invariants::{BoardInvariants, InvariantSet};
use super::latch::{CancelToken, Deferred, TaskQueue};
use super::phases::{Interaction, Status};
use super::rules::{check_win_condition, reachable_anchors};
use super::snapshot::GameSnapshot;
use super::{Board, Layout, Piece, PieceId, Position};
use derive_getters::Getters;
use derive_new::new;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Width and height of one board cell in pixels.
pub const DEFAULT_CELL_SIZE_PX: f64 = 100.0;

/// How long a solved arrangement must stand before the win is latched.
pub const WIN_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Tunables the store consumes but never computes.
#[derive(Debug, Clone, PartialEq, new, Getters)]
pub struct StoreSettings {
    /// Pixel size of one cell, used to discretize drag deltas.
    cell_size_px: f64,
    /// Delay between reaching the solved arrangement and latching the win.
    win_settle_delay: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE_PX, WIN_SETTLE_DELAY)
    }
}

/// The puzzle's single source of truth.
#[derive(Debug)]
pub struct GameStore {
    board: Board,
    layout: Layout,
    interaction: Interaction,
    move_count: u32,
    won: bool,
    settings: StoreSettings,
    queue: TaskQueue,
    pending_win: Option<CancelToken>,
}

impl GameStore {
    /// Creates a store loaded with `layout` and default settings.
    #[instrument]
    pub fn new(layout: Layout) -> Self {
        Self::with_settings(layout, StoreSettings::default())
    }

    /// Creates a store loaded with `layout`.
    #[instrument]
    pub fn with_settings(layout: Layout, settings: StoreSettings) -> Self {
        let mut store = Self {
            board: Board::default(),
            layout,
            interaction: Interaction::Idle,
            move_count: 0,
            won: false,
            settings,
            queue: TaskQueue::new(),
            pending_win: None,
        };
        store.initialize(layout);
        store
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns all pieces.
    pub fn pieces(&self) -> &[Piece] {
        self.board.pieces()
    }

    /// Looks up a piece by id.
    pub fn piece(&self, id: &str) -> Option<&Piece> {
        self.board.piece(id)
    }

    /// The layout the store was last initialized with.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Current interaction state.
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// The selected piece, if any.
    pub fn selected_piece_id(&self) -> Option<&PieceId> {
        self.interaction.selected()
    }

    /// The tentative drag anchor, if any.
    pub fn temp_position(&self) -> Option<Position> {
        self.interaction.temp_position()
    }

    /// Number of committed moves since the last reset.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// True once the win has been latched.
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// True while a win latch is armed but has not fired.
    pub fn win_pending(&self) -> bool {
        self.pending_win
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }

    /// Progress of the puzzle.
    pub fn status(&self) -> Status {
        if self.won {
            Status::Won
        } else if self.win_pending() {
            Status::Settling
        } else {
            Status::Playing
        }
    }

    /// Returns the settings.
    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Time left before the next deferred task fires.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_deadline()
    }

    /// Returns true if `piece_id` may move to `new_position`.
    pub fn is_valid_move(&self, piece_id: &str, new_position: Position) -> bool {
        is_valid_move(&self.board, piece_id, new_position)
    }

    /// Evaluates the win predicate on the current board, ignoring the latch.
    pub fn check_win_condition(&self) -> bool {
        check_win_condition(&self.board)
    }

    /// Every anchor `piece_id` can currently slide to, its own included.
    pub fn reachable_anchors(&self, piece_id: &str) -> Vec<Position> {
        reachable_anchors(&self.board, piece_id)
    }

    /// Serializable view of the whole state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }

    // ─────────────────────────────────────────────────────────────
    //  Lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Loads `layout` and resets every other field.
    #[instrument(skip(self))]
    pub fn initialize(&mut self, layout: Layout) {
        self.queue.clear();
        self.pending_win = None;
        self.board = Board::new(layout.pieces());
        self.layout = layout;
        self.interaction = Interaction::Idle;
        self.move_count = 0;
        self.won = false;
        debug_assert!(
            BoardInvariants::check_all(&self.board).is_ok(),
            "hardcoded layout breaks a board invariant"
        );
        info!(%layout, "Game initialized");
        self.on_pieces_changed();
    }

    /// Starts over from the current layout.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        self.initialize(self.layout);
    }

    // ─────────────────────────────────────────────────────────────
    //  Selection
    // ─────────────────────────────────────────────────────────────

    /// Pins a piece. Unknown ids are ignored.
    #[instrument(skip(self))]
    pub fn select(&mut self, piece_id: &str) {
        let Some(piece) = self.board.piece(piece_id) else {
            debug!("Ignoring selection of unknown piece");
            return;
        };
        if self.interaction.temp_for(piece_id).is_some() {
            return;
        }
        self.interaction = Interaction::Selected {
            piece: piece.id().clone(),
        };
    }

    /// Drops the selection and any drag in progress.
    #[instrument(skip(self))]
    pub fn clear_selection(&mut self) {
        self.interaction = Interaction::Idle;
    }

    /// Abandons a drag in progress without moving anything.
    #[instrument(skip(self))]
    pub fn cancel_drag(&mut self) {
        if let Interaction::Dragging { .. } = self.interaction {
            self.interaction = Interaction::Idle;
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Drag path
    // ─────────────────────────────────────────────────────────────

    /// Tracks a drag of `piece_id` by a pixel delta from its anchor.
    ///
    /// The delta is rounded to whole cells. A legal candidate becomes the
    /// tentative position; an illegal one leaves the state untouched.
    #[instrument(skip(self))]
    pub fn update_temp_position(&mut self, piece_id: &str, dx: f64, dy: f64) -> bool {
        let Some(piece) = self.board.piece(piece_id) else {
            return false;
        };
        let id = piece.id().clone();
        let cell = self.settings.cell_size_px;
        let delta = Position::new(cells_from_pixels(dy, cell), cells_from_pixels(dx, cell));
        let candidate = piece.position() + delta;

        if !self.is_valid_move(piece_id, candidate) {
            debug!(%candidate, "Drag candidate rejected");
            return false;
        }

        debug!(%candidate, "Drag candidate accepted");
        self.interaction = Interaction::Dragging {
            piece: id,
            temp: candidate,
        };
        true
    }

    /// Finalizes the drag of `piece_id`.
    ///
    /// Commits only when a tentative position exists for this piece, differs
    /// from its anchor and still validates. The drag always ends.
    #[instrument(skip(self))]
    pub fn commit_move(&mut self, piece_id: &str) -> bool {
        let temp = self.interaction.temp_for(piece_id);
        self.interaction = Interaction::Idle;

        let Some(temp) = temp else {
            debug!("No tentative position to commit");
            return false;
        };
        let Some(current) = self.board.piece(piece_id).map(Piece::position) else {
            return false;
        };
        if temp == current {
            debug!("Tentative position unchanged; discarded");
            return false;
        }
        if !self.is_valid_move(piece_id, temp) {
            return false;
        }

        self.apply_validated(piece_id, temp);
        true
    }

    // ─────────────────────────────────────────────────────────────
    //  Direct path
    // ─────────────────────────────────────────────────────────────

    /// Overwrites a piece's anchor and counts a move, without validation.
    ///
    /// Callers must have checked [`is_valid_move`](Self::is_valid_move)
    /// first. Unknown ids are ignored.
    #[instrument(skip(self))]
    pub fn update_piece_position(&mut self, piece_id: &str, new_position: Position) {
        if !self.board.set_anchor(piece_id, new_position) {
            debug!("Unknown piece; nothing to update");
            return;
        }
        self.move_count += 1;
        if self.interaction.temp_for(piece_id).is_some() {
            self.interaction = Interaction::Selected {
                piece: PieceId::new(piece_id),
            };
        }
        info!(move_count = self.move_count, "Piece moved");
        self.on_pieces_changed();
    }

    /// Moves `piece_id` one cell in `direction` if that step is legal.
    #[instrument(skip(self))]
    pub fn request_move(&mut self, piece_id: &str, direction: Direction) -> bool {
        let Some(current) = self.board.piece(piece_id).map(Piece::position) else {
            return false;
        };
        let target = current.step(direction);
        if !self.is_valid_move(piece_id, target) {
            return false;
        }
        self.apply_validated(piece_id, target);
        true
    }

    /// Moves the selected piece one cell in `direction`.
    #[instrument(skip(self))]
    pub fn move_selected(&mut self, direction: Direction) -> bool {
        match self.selected_piece_id().cloned() {
            Some(piece) => self.request_move(piece.as_str(), direction),
            None => false,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Time
    // ─────────────────────────────────────────────────────────────

    /// Moves virtual time forward and runs any deferred task that came due.
    #[instrument(skip(self))]
    pub fn advance(&mut self, elapsed: Duration) {
        for task in self.queue.advance(elapsed) {
            match task {
                Deferred::LatchWin => {
                    self.pending_win = None;
                    self.won = true;
                    info!(move_count = self.move_count, "Puzzle solved");
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    /// Commits a move that already passed validation.
    fn apply_validated(&mut self, piece_id: &str, to: Position) {
        let before = cfg!(debug_assertions).then(|| self.board.clone());

        self.update_piece_position(piece_id, to);

        if let Some(before) = before {
            let checked = MoveContract::post(&before, &self.board);
            if let Err(violation) = &checked {
                warn!(%violation, "Validated move broke a board invariant");
            }
            debug_assert!(
                checked.is_ok(),
                "validated move {piece_id} -> {to} broke the board: {checked:?}"
            );
        }
    }

    /// Cancels a stale win latch and re-arms it if the board is solved.
    fn on_pieces_changed(&mut self) {
        if let Some(stale) = self.pending_win.take() {
            stale.cancel();
            debug!("Pending win latch cancelled");
        }
        if self.won || !check_win_condition(&self.board) {
            return;
        }
        let token = self
            .queue
            .schedule(self.settings.win_settle_delay, Deferred::LatchWin);
        self.pending_win = Some(token);
        info!(
            delay_ms = self.settings.win_settle_delay.as_millis() as u64,
            "Winning arrangement reached; latch armed"
        );
    }
}
