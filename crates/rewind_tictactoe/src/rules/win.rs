//! Win detection logic for tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{Board, Player, Position};

/// Every winning line, in the order they are checked.
///
/// Rows first, then columns, then the two diagonals. Each line lists its
/// cells in ascending index order.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Three identical marks in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine {
    /// The mark that completed the line.
    pub symbol: Player,
    /// The cells of the line, ascending.
    pub line: [Position; 3],
}

impl WinningLine {
    /// Board indices of the line, ascending.
    pub fn indices(&self) -> [usize; 3] {
        self.line.map(Position::to_index)
    }

    /// Whether `pos` is one of the three winning cells.
    pub fn contains(&self, pos: Position) -> bool {
        self.line.contains(&pos)
    }
}

/// Returns the first completed line on the board, if any.
///
/// Total and side-effect free: an absent result means nobody has won yet.
#[instrument(skip(board))]
pub fn detect_winner(board: &Board) -> Option<WinningLine> {
    LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        let symbol = board.get(a).player()?;
        (board.get(b).player() == Some(symbol) && board.get(c).player() == Some(symbol))
            .then_some(WinningLine { symbol, line })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_of(marks: &[(usize, Player)]) -> Board {
        marks.iter().fold(Board::new(), |board, (i, player)| {
            board.with_mark(Position::ALL[*i], *player)
        })
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(detect_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_of(&[(0, Player::X), (1, Player::X), (2, Player::X)]);
        let win = detect_winner(&board).unwrap();
        assert_eq!(win.symbol, Player::X);
        assert_eq!(win.indices(), [0, 1, 2]);
    }

    #[test]
    fn test_winner_column() {
        let board = board_of(&[(1, Player::O), (4, Player::O), (7, Player::O), (0, Player::X)]);
        let win = detect_winner(&board).unwrap();
        assert_eq!(win.symbol, Player::O);
        assert_eq!(win.indices(), [1, 4, 7]);
    }

    #[test]
    fn test_winner_anti_diagonal_is_ascending() {
        let board = board_of(&[(6, Player::O), (4, Player::O), (2, Player::O)]);
        assert_eq!(detect_winner(&board).unwrap().indices(), [2, 4, 6]);
    }

    #[test]
    fn test_rows_checked_before_columns() {
        // Both the top row and the left column are X; the row wins the tie-break.
        let board = board_of(&[
            (0, Player::X),
            (1, Player::X),
            (2, Player::X),
            (3, Player::X),
            (6, Player::X),
        ]);
        assert_eq!(detect_winner(&board).unwrap().indices(), [0, 1, 2]);
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let board = board_of(&[(0, Player::X), (1, Player::O), (2, Player::X)]);
        assert_eq!(detect_winner(&board), None);
    }

    #[test]
    fn test_contains() {
        let board = board_of(&[(0, Player::X), (4, Player::X), (8, Player::X)]);
        let win = detect_winner(&board).unwrap();
        assert!(win.contains(Position::Center));
        assert!(!win.contains(Position::TopRight));
    }
}
