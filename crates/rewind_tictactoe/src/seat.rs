//! Player seats and the round-by-round scoreboard.
//!
//! Scores belong to seats, not marks. Which seat holds X changes every
//! round, so the mapping between the two is a pure function of
//! `player_one_is_x`.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::Player;

/// One of the two player slots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, derive_more::Display,
)]
pub enum Seat {
    /// Seat one (plays X in the first round).
    #[display("player one")]
    One,
    /// Seat two.
    #[display("player two")]
    Two,
}

impl Seat {
    /// The seat holding `symbol` this round.
    pub fn owning(symbol: Player, player_one_is_x: bool) -> Seat {
        match (symbol, player_one_is_x) {
            (Player::X, true) | (Player::O, false) => Seat::One,
            (Player::X, false) | (Player::O, true) => Seat::Two,
        }
    }

    /// The mark this seat plays this round.
    pub fn symbol(self, player_one_is_x: bool) -> Player {
        match (self, player_one_is_x) {
            (Seat::One, true) | (Seat::Two, false) => Player::X,
            (Seat::One, false) | (Seat::Two, true) => Player::O,
        }
    }

    /// The other seat.
    pub fn other(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }
}

/// How a seat's score compares with the other seat's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standing {
    /// Strictly ahead.
    Leading,
    /// Strictly behind.
    Trailing,
    /// Tied.
    Level,
}

/// Rounds won per seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    /// Rounds won by seat one.
    pub player_one: u32,
    /// Rounds won by seat two.
    pub player_two: u32,
}

impl Scores {
    /// Score for `seat`.
    pub fn get(&self, seat: Seat) -> u32 {
        match seat {
            Seat::One => self.player_one,
            Seat::Two => self.player_two,
        }
    }

    /// Adds one win to `seat`.
    pub fn credit(&mut self, seat: Seat) {
        match seat {
            Seat::One => self.player_one += 1,
            Seat::Two => self.player_two += 1,
        }
    }

    /// Sum of both seats.
    pub fn total(&self) -> u32 {
        self.player_one + self.player_two
    }

    /// Compares `seat` against the other seat.
    pub fn standing(&self, seat: Seat) -> Standing {
        match self.get(seat).cmp(&self.get(seat.other())) {
            std::cmp::Ordering::Greater => Standing::Leading,
            std::cmp::Ordering::Less => Standing::Trailing,
            std::cmp::Ordering::Equal => Standing::Level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_owning_and_symbol_agree() {
        for seat in Seat::iter() {
            for player_one_is_x in [true, false] {
                let symbol = seat.symbol(player_one_is_x);
                assert_eq!(Seat::owning(symbol, player_one_is_x), seat);
            }
        }
    }

    #[test]
    fn test_seat_one_plays_x_first_round() {
        assert_eq!(Seat::owning(Player::X, true), Seat::One);
        assert_eq!(Seat::owning(Player::X, false), Seat::Two);
    }

    #[test]
    fn test_standing() {
        let mut scores = Scores::default();
        assert_eq!(scores.standing(Seat::One), Standing::Level);
        scores.credit(Seat::Two);
        assert_eq!(scores.standing(Seat::One), Standing::Trailing);
        assert_eq!(scores.standing(Seat::Two), Standing::Leading);
        assert_eq!(scores.total(), 1);
    }
}
