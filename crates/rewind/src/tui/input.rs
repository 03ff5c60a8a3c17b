//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;
use rewind_tictactoe::{BOARD_SIDE, Position};

/// Moves cursor based on arrow keys, stopping at the board edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let last = BOARD_SIDE - 1;

    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(last), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(last)),
        _ => (row, col),
    };

    Position::from_index(row * BOARD_SIDE + col).unwrap_or(cursor)
}

/// Maps the number keys 1-9 onto board cells 0-8.
pub fn digit_cell(c: char) -> Option<usize> {
    match c.to_digit(10)? {
        0 => None,
        d => Some(d as usize - 1),
    }
}
