//! Read-only projection of the engine for renderers.
//!
//! A [`Snapshot`] carries everything a renderer needs: the viewed board,
//! the winning cells to highlight, move labels, whose turn it is, and the
//! scoreboard. Names only feed label text; the engine never sees them.

use derive_getters::Getters;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::rules::WinningLine;
use crate::{Board, GameEngine, GameStatus, Phase, Player, Scores, Seat, Standing};

/// Display names for the two seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerNames {
    player_one: String,
    player_two: String,
}

impl PlayerNames {
    /// Default name of seat one.
    pub const DEFAULT_ONE: &'static str = "Player 1";
    /// Default name of seat two.
    pub const DEFAULT_TWO: &'static str = "Player 2";

    /// Creates names for both seats.
    pub fn new(player_one: impl Into<String>, player_two: impl Into<String>) -> Self {
        Self {
            player_one: player_one.into(),
            player_two: player_two.into(),
        }
    }

    /// Name of `seat`.
    pub fn get(&self, seat: Seat) -> &str {
        match seat {
            Seat::One => &self.player_one,
            Seat::Two => &self.player_two,
        }
    }

    /// Renames `seat`. A blank name falls back to the seat default.
    pub fn set(&mut self, seat: Seat, name: impl Into<String>) {
        let name = name.into();
        let name = if name.trim().is_empty() {
            Self::default_for(seat).to_string()
        } else {
            name
        };
        match seat {
            Seat::One => self.player_one = name,
            Seat::Two => self.player_two = name,
        }
    }

    fn default_for(seat: Seat) -> &'static str {
        match seat {
            Seat::One => Self::DEFAULT_ONE,
            Seat::Two => Self::DEFAULT_TWO,
        }
    }
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ONE, Self::DEFAULT_TWO)
    }
}

/// One entry of the move list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct MoveLabel {
    /// History index this label jumps to.
    step: usize,
    /// "Go to Game Start" or "Go to Move #n".
    text: String,
    /// Whether this entry is the one on screen.
    current: bool,
}

impl MoveLabel {
    fn new(step: usize, current_step: usize) -> Self {
        let text = if step == 0 {
            "Go to Game Start".to_string()
        } else {
            format!("Go to Move #{step}")
        };
        Self {
            step,
            text,
            current: step == current_step,
        }
    }
}

/// A seat's line on the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct SeatLine {
    /// The seat described.
    seat: Seat,
    /// Its display name.
    name: String,
    /// The mark it plays this round.
    symbol: Player,
    /// Rounds won.
    score: u32,
    /// Compared with the other seat.
    standing: Standing,
}

impl SeatLine {
    /// "<name>: <n> points."
    pub fn score_text(&self) -> String {
        format!("{}: {} points.", self.name, self.score)
    }
}

/// Everything a renderer needs, frozen at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct Snapshot {
    /// Lifecycle phase.
    phase: Phase,
    /// The viewed board.
    board: Board,
    /// Completed line on the viewed board, for highlighting.
    winning_line: Option<WinningLine>,
    /// Round outcome from the latest board.
    status: GameStatus,
    /// Human-readable status line.
    status_text: String,
    /// Index of the viewed history entry.
    current_step: usize,
    /// One label per history entry; empty before the game starts.
    moves: Vec<MoveLabel>,
    /// Mark placed by the next click.
    next_symbol: Player,
    /// Seat whose turn it is.
    seat_to_move: Seat,
    /// Rounds won per seat.
    scores: Scores,
    /// Scoreboard lines, seat one first.
    seats: Vec<SeatLine>,
}

impl Snapshot {
    /// Projects `engine` with `names` for labels.
    pub fn capture(engine: &GameEngine, names: &PlayerNames) -> Self {
        let started = engine.is_started();
        let winning_line = engine.current_winner();
        let scores = engine.scores();
        let player_one_is_x = engine.player_one_is_x();

        let moves = if started {
            (0..engine.history().len())
                .map(|step| MoveLabel::new(step, engine.current_step()))
                .collect()
        } else {
            Vec::new()
        };

        let seats = Seat::iter()
            .map(|seat| SeatLine {
                seat,
                name: names.get(seat).to_string(),
                symbol: seat.symbol(player_one_is_x),
                score: scores.get(seat),
                standing: scores.standing(seat),
            })
            .collect();

        Self {
            phase: engine.phase(),
            board: engine.current_board().clone(),
            winning_line,
            status: engine.game_status(),
            status_text: status_text(engine, names, winning_line),
            current_step: engine.current_step(),
            moves,
            next_symbol: engine.next_symbol(),
            seat_to_move: engine.seat_to_move(),
            scores,
            seats,
        }
    }

    /// Whether `step`'s label is the viewed one.
    pub fn is_current(&self, step: usize) -> bool {
        self.current_step == step
    }

    /// Scoreboard line for `seat`.
    pub fn seat(&self, seat: Seat) -> &SeatLine {
        match seat {
            Seat::One => &self.seats[0],
            Seat::Two => &self.seats[1],
        }
    }
}

/// Status line shown above the move list.
///
/// The winner comes from the viewed board, the draw from the history length,
/// and the turn from the turn flag mapped onto a seat.
fn status_text(engine: &GameEngine, names: &PlayerNames, winner: Option<WinningLine>) -> String {
    let player_one_is_x = engine.player_one_is_x();
    if let Some(win) = winner {
        let seat = Seat::owning(win.symbol, player_one_is_x);
        format!("Winner is: {}!", names.get(seat))
    } else if engine.game_status() == GameStatus::Draw {
        "It's a Draw!".to_string()
    } else if engine.is_started() {
        format!(
            "{}'s Turn: {}",
            names.get(engine.seat_to_move()),
            engine.next_symbol()
        )
    } else {
        String::new()
    }
}
