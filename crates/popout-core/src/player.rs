//! Disc symbols and the players who own them.
//!
//! A game always has exactly two discs, `X` and `O`. Player 1 plays `X`
//! and always moves first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A player's disc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disc {
    /// Player 1
    X,
    /// Player 2
    O,
}

impl Disc {
    /// The opposing disc
    pub fn other(self) -> Disc {
        match self {
            Disc::X => Disc::O,
            Disc::O => Disc::X,
        }
    }

    /// 1-based player number shown to users
    pub fn player_number(self) -> u8 {
        match self {
            Disc::X => 1,
            Disc::O => 2,
        }
    }

    /// Character drawn on the board
    pub fn symbol(self) -> char {
        match self {
            Disc::X => 'X',
            Disc::O => 'O',
        }
    }
}

impl fmt::Display for Disc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
