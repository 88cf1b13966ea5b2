//! Moves a player can make and the events they produce.

use crate::player::Disc;
use serde::{Deserialize, Serialize};

/// A move by the player whose turn it is. Columns are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Drop a disc into the top of a column
    Drop(usize),
    /// Remove your own disc from the bottom of a column
    PopOut(usize),
}

/// How a game was won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinKind {
    /// Only the winner has four in a row
    Connect4,
    /// Both discs have four in a row after the same move; the mover wins
    Simultaneous,
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A disc was dropped and came to rest at `row`
    DiscDropped {
        disc: Disc,
        column: usize,
        row: usize,
    },

    /// A disc was popped from the bottom of a column
    DiscPopped { disc: Disc, column: usize },

    /// The turn passed to the other player
    TurnPassed { next: Disc },

    /// A player won the game
    GameWon { winner: Disc, kind: WinKind },

    /// The board filled without a winner
    GameDrawn,
}
