//! Core domain types for tic-tac-toe.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::Position;

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 9;

/// Side length of the square board.
pub const BOARD_SIDE: usize = 3;

/// A mark placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Player {
    /// Player X (moves first every round).
    X,
    /// Player O (moves second).
    O,
}

impl Player {
    /// Maps the turn flag onto a mark.
    pub fn from_x_is_next(x_is_next: bool) -> Self {
        if x_is_next { Player::X } else { Player::O }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; BOARD_CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; BOARD_CELLS],
        }
    }

    /// Builds a board directly from its squares.
    pub fn from_squares(squares: [Square; BOARD_CELLS]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Returns a copy of this board with `player` placed at `pos`.
    ///
    /// History entries are immutable, so placing a mark always yields a new board.
    pub fn with_mark(&self, pos: Position, player: Player) -> Self {
        let mut next = self.clone();
        next.squares[pos.to_index()] = Square::Occupied(player);
        next
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; BOARD_CELLS] {
        &self.squares
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based key so the grid doubles as a keypad hint.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..BOARD_SIDE {
            for col in 0..BOARD_SIDE {
                let pos = row * BOARD_SIDE + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(player) => player.to_string(),
                };
                result.push_str(&symbol);
                if col < BOARD_SIDE - 1 {
                    result.push('|');
                }
            }
            if row < BOARD_SIDE - 1 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
