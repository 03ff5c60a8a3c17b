//! The game-state engine.
//!
//! Owns the board history, whose turn it is, which seat plays X, and the
//! seat scores. Every operation runs to completion and either applies fully
//! or leaves the engine untouched.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::{EngineError, IgnoreReason, MoveOutcome};
use crate::invariants::assert_invariants;
use crate::rules::{WinningLine, detect_winner};
use crate::{BOARD_CELLS, Board, History, Player, Position, Scores, Seat};

/// History length once every cell has been filled.
pub const FULL_HISTORY_LEN: usize = BOARD_CELLS + 1;

/// Outcome of the round, judged from the latest history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    /// The latest board has a completed line.
    #[display("winner")]
    Winner,
    /// Every cell is filled and nobody won.
    #[display("draw")]
    Draw,
    /// Moves remain.
    #[display("in-progress")]
    InProgress,
}

/// Lifecycle phase of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for `start`.
    NotStarted,
    /// Started and the latest board is still open.
    InProgress,
    /// The latest board is won or drawn.
    Concluded,
}

/// Tic-tac-toe engine with time travel and a seat scoreboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    history: History,
    current_step: usize,
    x_is_next: bool,
    started: bool,
    player_one_is_x: bool,
    scores: Scores,
}

impl GameEngine {
    /// Creates an engine with an empty board, not yet started.
    #[instrument]
    pub fn new() -> Self {
        Self {
            history: History::new(),
            current_step: 0,
            x_is_next: true,
            started: false,
            player_one_is_x: true,
            scores: Scores::default(),
        }
    }

    /// Starts the game. Does nothing if already started.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        if self.started {
            debug!("Start ignored: already started");
            return;
        }
        self.started = true;
        info!("Game started");
    }

    /// Places the next mark at `cell` on the viewed board.
    ///
    /// Clicking before the start, on an occupied cell, or on a won board
    /// changes nothing and reports why. Any later history is discarded when
    /// a move is made from an earlier step.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidArgument`] if `cell` is not in `0..9`.
    #[instrument(skip(self), fields(step = self.current_step, x_is_next = self.x_is_next))]
    pub fn click(&mut self, cell: usize) -> Result<MoveOutcome, EngineError> {
        let position = Position::from_index(cell).ok_or_else(|| {
            warn!(cell, "Click outside the board");
            EngineError::invalid_cell(cell)
        })?;

        if let Some(reason) = self.click_blocker(position) {
            debug!(%reason, "Click ignored");
            return Ok(MoveOutcome::Ignored(reason));
        }

        let symbol = self.next_symbol();
        let next = self.current_board().with_mark(position, symbol);
        self.current_step = self.history.branch_from(self.current_step, next);
        self.x_is_next = !self.x_is_next;

        debug!(%position, %symbol, step = self.current_step, "Mark placed");
        assert_invariants(self);

        Ok(MoveOutcome::Placed { position, symbol })
    }

    fn click_blocker(&self, position: Position) -> Option<IgnoreReason> {
        let board = self.current_board();
        if !self.started {
            Some(IgnoreReason::NotStarted)
        } else if detect_winner(board).is_some() {
            Some(IgnoreReason::GameOver)
        } else if !board.is_empty(position) {
            Some(IgnoreReason::CellOccupied(position))
        } else {
            None
        }
    }

    /// Views the board as it was after `step` moves.
    ///
    /// History is left intact; only the next move from here discards it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidArgument`] if `step` is past the last entry.
    #[instrument(skip(self), fields(history_len = self.history.len()))]
    pub fn jump_to(&mut self, step: usize) -> Result<(), EngineError> {
        if step >= self.history.len() {
            warn!(step, "Jump outside the history");
            return Err(EngineError::invalid_step(step, self.history.len()));
        }

        self.current_step = step;
        self.x_is_next = step % 2 == 0;
        debug!(step, "Jumped");
        assert_invariants(self);

        Ok(())
    }

    /// Closes the round and sets up the next one.
    ///
    /// The latest board is scored first, whatever step is being viewed.
    /// Then the board is cleared and the seats swap marks. Returns the seat
    /// credited with the round, if any.
    #[instrument(skip(self), fields(player_one_is_x = self.player_one_is_x))]
    pub fn reset(&mut self) -> Option<Seat> {
        let credited = self.settle_round();

        self.history = History::new();
        self.current_step = 0;
        self.x_is_next = true;
        self.player_one_is_x = !self.player_one_is_x;

        info!(
            ?credited,
            player_one = self.scores.player_one,
            player_two = self.scores.player_two,
            "Round reset"
        );
        assert_invariants(self);

        credited
    }

    /// Credits the winner of the latest board. Only `reset` calls this, so
    /// a round is scored exactly once.
    fn settle_round(&mut self) -> Option<Seat> {
        let win = detect_winner(self.history.latest())?;
        let seat = Seat::owning(win.symbol, self.player_one_is_x);
        self.scores.credit(seat);
        info!(%seat, symbol = %win.symbol, "Round won");
        Some(seat)
    }

    /// Round outcome judged from the latest history entry.
    pub fn game_status(&self) -> GameStatus {
        if detect_winner(self.history.latest()).is_some() {
            GameStatus::Winner
        } else if self.history.len() == FULL_HISTORY_LEN {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        if !self.started {
            Phase::NotStarted
        } else if self.game_status() == GameStatus::InProgress {
            Phase::InProgress
        } else {
            Phase::Concluded
        }
    }

    /// All board snapshots.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Index of the viewed entry.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// The viewed board.
    pub fn current_board(&self) -> &Board {
        // current_step < history.len() always holds
        &self.history.entries()[self.current_step]
    }

    /// The most recent board.
    pub fn latest_board(&self) -> &Board {
        self.history.latest()
    }

    /// Winning line on the viewed board, if any.
    pub fn current_winner(&self) -> Option<WinningLine> {
        detect_winner(self.current_board())
    }

    /// Winning line on the latest board, if any.
    pub fn latest_winner(&self) -> Option<WinningLine> {
        detect_winner(self.history.latest())
    }

    /// Whether X moves next from the viewed board.
    pub fn x_is_next(&self) -> bool {
        self.x_is_next
    }

    /// The mark placed by the next click.
    pub fn next_symbol(&self) -> Player {
        Player::from_x_is_next(self.x_is_next)
    }

    /// The seat whose turn it is.
    pub fn seat_to_move(&self) -> Seat {
        Seat::owning(self.next_symbol(), self.player_one_is_x)
    }

    /// Whether `start` has been called.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether seat one plays X this round.
    pub fn player_one_is_x(&self) -> bool {
        self.player_one_is_x
    }

    /// Rounds won per seat.
    pub fn scores(&self) -> Scores {
        self.scores
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> GameEngine {
        let mut engine = GameEngine::new();
        engine.start();
        engine
    }

    fn play(engine: &mut GameEngine, cells: &[usize]) {
        for &cell in cells {
            assert!(engine.click(cell).unwrap().is_placed(), "cell {cell} should be playable");
        }
    }

    #[test]
    fn test_new_engine_is_not_started() {
        let engine = GameEngine::new();
        assert_eq!(engine.phase(), Phase::NotStarted);
        assert_eq!(engine.history().len(), 1);
        assert!(engine.x_is_next());
        assert!(engine.player_one_is_x());
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut engine = started();
        let before = engine.clone();
        engine.start();
        assert_eq!(engine, before);
        assert_eq!(engine.phase(), Phase::InProgress);
    }

    #[test]
    fn test_click_before_start_is_ignored() {
        let mut engine = GameEngine::new();
        let outcome = engine.click(4).unwrap();
        assert_eq!(outcome, MoveOutcome::Ignored(IgnoreReason::NotStarted));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_click_out_of_range_is_an_error() {
        let mut engine = started();
        assert_eq!(engine.click(9), Err(EngineError::invalid_cell(9)));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_click_places_alternating_marks() {
        let mut engine = started();
        assert_eq!(
            engine.click(4).unwrap(),
            MoveOutcome::Placed {
                position: Position::Center,
                symbol: Player::X
            }
        );
        assert!(!engine.x_is_next());
        assert_eq!(engine.click(0).unwrap(), MoveOutcome::Placed {
            position: Position::TopLeft,
            symbol: Player::O
        });
        assert_eq!(engine.current_step(), 2);
    }

    #[test]
    fn test_click_occupied_cell_keeps_mark() {
        let mut engine = started();
        play(&mut engine, &[4]);
        let outcome = engine.click(4).unwrap();
        assert_eq!(outcome, MoveOutcome::Ignored(IgnoreReason::CellOccupied(Position::Center)));
        assert_eq!(
            engine.current_board().get(Position::Center),
            crate::Square::Occupied(Player::X)
        );
        assert_eq!(engine.history().len(), 2);
    }

    #[test]
    fn test_diagonal_win_freezes_board() {
        let mut engine = started();
        play(&mut engine, &[0, 1, 4, 2, 8]);

        let win = engine.latest_winner().unwrap();
        assert_eq!(win.symbol, Player::X);
        assert_eq!(win.indices(), [0, 4, 8]);
        assert_eq!(engine.game_status(), GameStatus::Winner);
        assert_eq!(engine.phase(), Phase::Concluded);

        assert_eq!(engine.click(5).unwrap(), MoveOutcome::Ignored(IgnoreReason::GameOver));
        assert_eq!(engine.history().len(), 6);
    }

    #[test]
    fn test_draw_after_nine_moves() {
        let mut engine = started();
        // X O X / X O O / O X X
        play(&mut engine, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(engine.history().len(), FULL_HISTORY_LEN);
        assert_eq!(engine.game_status(), GameStatus::Draw);
        assert!(engine.latest_winner().is_none());
    }

    #[test]
    fn test_win_on_ninth_move_beats_draw() {
        let mut engine = started();
        // X O X / O X O / O X X
        play(&mut engine, &[0, 1, 2, 3, 4, 5, 7, 6, 8]);
        assert_eq!(engine.history().len(), FULL_HISTORY_LEN);
        assert_eq!(engine.game_status(), GameStatus::Winner);
        assert_eq!(engine.phase(), Phase::Concluded);

        assert_eq!(engine.reset(), Some(Seat::One));
        assert_eq!(engine.scores().player_one, 1);
        assert_eq!(engine.scores().total(), 1);
    }

    #[test]
    fn test_jump_sets_turn_from_parity() {
        let mut engine = started();
        play(&mut engine, &[0, 1, 2, 4]);
        for step in 0..engine.history().len() {
            engine.jump_to(step).unwrap();
            assert_eq!(engine.x_is_next(), step % 2 == 0);
            assert_eq!(engine.history().len(), 5);
        }
    }

    #[test]
    fn test_jump_out_of_range_is_an_error() {
        let mut engine = started();
        play(&mut engine, &[0]);
        assert_eq!(engine.jump_to(2), Err(EngineError::invalid_step(2, 2)));
        assert_eq!(engine.current_step(), 1);
    }

    #[test]
    fn test_move_after_jump_discards_future() {
        let mut engine = started();
        play(&mut engine, &[0, 1, 2, 4]);
        engine.jump_to(1).unwrap();
        play(&mut engine, &[8]);

        assert_eq!(engine.history().len(), 3);
        assert_eq!(engine.current_step(), 2);
        let board = engine.current_board();
        assert_eq!(board.get(Position::BottomRight), crate::Square::Occupied(Player::O));
        assert!(board.is_empty(Position::TopCenter));
    }

    #[test]
    fn test_jump_back_from_won_game_allows_play() {
        let mut engine = started();
        play(&mut engine, &[0, 1, 4, 2, 8]);
        engine.jump_to(4).unwrap();
        assert!(engine.current_winner().is_none());
        play(&mut engine, &[6]);
        assert_eq!(engine.game_status(), GameStatus::InProgress);
        assert_eq!(engine.history().len(), 6);
    }

    #[test]
    fn test_reset_credits_seat_one_for_x_win() {
        let mut engine = started();
        play(&mut engine, &[0, 3, 1, 4, 2]);

        assert_eq!(engine.reset(), Some(Seat::One));
        assert_eq!(engine.scores().player_one, 1);
        assert_eq!(engine.scores().player_two, 0);
        assert!(!engine.player_one_is_x());
        assert_eq!(engine.history().len(), 1);
        assert!(engine.x_is_next());
        assert!(engine.is_started());
    }

    #[test]
    fn test_reset_scores_latest_board_not_viewed_step() {
        let mut engine = started();
        play(&mut engine, &[0, 3, 1, 4, 2]);
        engine.jump_to(1).unwrap();
        assert_eq!(engine.reset(), Some(Seat::One));
    }

    #[test]
    fn test_second_round_x_belongs_to_seat_two() {
        let mut engine = started();
        engine.reset();
        assert_eq!(engine.seat_to_move(), Seat::Two);
        play(&mut engine, &[0, 3, 1, 4, 2]);
        assert_eq!(engine.reset(), Some(Seat::Two));
        assert_eq!(engine.scores().player_two, 1);
        assert!(engine.player_one_is_x());
    }

    #[test]
    fn test_reset_without_winner_scores_nothing() {
        let mut engine = started();
        play(&mut engine, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(engine.reset(), None);
        assert_eq!(engine.scores().total(), 0);
    }

    #[test]
    fn test_double_reset_counts_once() {
        let mut engine = started();
        play(&mut engine, &[0, 3, 1, 4, 2]);
        engine.reset();
        engine.reset();
        assert_eq!(engine.scores().total(), 1);
    }

    #[test]
    fn test_status_reads_do_not_score() {
        let mut engine = started();
        play(&mut engine, &[0, 3, 1, 4, 2]);
        for _ in 0..3 {
            assert_eq!(engine.game_status(), GameStatus::Winner);
        }
        assert_eq!(engine.scores().total(), 0);
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        assert_eq!(GameStatus::InProgress.to_string(), "in-progress");
        assert_eq!(
            serde_json::to_string(&GameStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
    }
}
