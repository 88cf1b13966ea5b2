//! Core game state machine.
//!
//! `GameState` wraps a `Board` with turn order and the PopOut end-of-game
//! rules. The board itself knows nothing about whose turn it is.

use crate::actions::{GameAction, GameEvent, WinKind};
use crate::board::{Board, InvalidDimensions, InvalidMove, MAX_DIMENSION};
use crate::player::Disc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rows of the classic PopOut console board
pub const DEFAULT_ROWS: usize = 4;

/// Columns of the classic PopOut console board
pub const DEFAULT_COLS: usize = 5;

const _: () = assert!(
    DEFAULT_ROWS >= 1
        && DEFAULT_ROWS <= MAX_DIMENSION
        && DEFAULT_COLS >= 1
        && DEFAULT_COLS <= MAX_DIMENSION
);

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Winner { disc: Disc, kind: WinKind },
    Draw,
}

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Game is over")]
    GameOver,

    #[error(transparent)]
    InvalidMove(#[from] InvalidMove),

    #[error(transparent)]
    InvalidDimensions(#[from] InvalidDimensions),
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    board: Board,
    /// Disc whose turn it is
    current_player: Disc,
    /// Set once the game has ended
    outcome: Option<GameOutcome>,
    /// Moves applied so far
    moves_played: u64,
}

impl GameState {
    /// Create a new game on an empty `rows` x `cols` board. X moves first.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        Ok(Self::with_board(Board::new(rows, cols)?))
    }

    /// Create a game on the classic 4x5 board
    pub fn standard() -> Self {
        Self::with_board(Board::empty(DEFAULT_ROWS, DEFAULT_COLS))
    }

    fn with_board(board: Board) -> Self {
        Self {
            board,
            current_player: Disc::X,
            outcome: None,
            moves_played: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Disc {
        self.current_player
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn moves_played(&self) -> u64 {
        self.moves_played
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get the winner if the game is finished
    pub fn get_winner(&self) -> Option<Disc> {
        match self.outcome {
            Some(GameOutcome::Winner { disc, .. }) => Some(disc),
            _ => None,
        }
    }

    /// Whether the current player may take `action`
    pub fn is_valid_action(&self, action: GameAction) -> bool {
        if self.is_finished() {
            return false;
        }
        match action {
            GameAction::Drop(column) => self.board.can_drop(column),
            GameAction::PopOut(column) => self.board.can_pop_out(column, self.current_player),
        }
    }

    /// All actions available to the current player, drops first
    pub fn valid_actions(&self) -> Vec<GameAction> {
        if self.is_finished() {
            return Vec::new();
        }

        let cols = self.board.cols();
        let drops = (0..cols)
            .filter(|&col| self.board.can_drop(col))
            .map(GameAction::Drop);
        let pops = (0..cols)
            .filter(|&col| self.board.can_pop_out(col, self.current_player))
            .map(GameAction::PopOut);

        drops.chain(pops).collect()
    }

    /// Apply an action for the current player.
    ///
    /// A rejected action leaves the state unchanged and the same player to
    /// move.
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }

        let mover = self.current_player;
        let mut events = Vec::new();

        match action {
            GameAction::Drop(column) => {
                let row = self.board.drop_disc(column, mover)?;
                events.push(GameEvent::DiscDropped {
                    disc: mover,
                    column,
                    row,
                });
            }
            GameAction::PopOut(column) => {
                let disc = self.board.pop_out(column, mover)?;
                events.push(GameEvent::DiscPopped { disc, column });
            }
        }

        self.moves_played = self.moves_played.saturating_add(1);
        events.extend(self.resolve_turn(mover));
        Ok(events)
    }

    /// Decide the game after `mover`'s move, or pass the turn.
    ///
    /// When both discs have four in a row at once the mover wins. A pop can
    /// hand the opponent a line without completing one for the mover, in
    /// which case the opponent wins.
    fn resolve_turn(&mut self, mover: Disc) -> Vec<GameEvent> {
        let mover_connects = self.board.has_connect4(mover);
        let opponent_connects = self.board.has_connect4(mover.other());

        let outcome = match (mover_connects, opponent_connects) {
            (true, true) => Some(GameOutcome::Winner {
                disc: mover,
                kind: WinKind::Simultaneous,
            }),
            (true, false) => Some(GameOutcome::Winner {
                disc: mover,
                kind: WinKind::Connect4,
            }),
            (false, true) => Some(GameOutcome::Winner {
                disc: mover.other(),
                kind: WinKind::Connect4,
            }),
            (false, false) if self.board.is_full() => Some(GameOutcome::Draw),
            (false, false) => None,
        };

        match outcome {
            Some(GameOutcome::Winner { disc, kind }) => {
                self.outcome = outcome;
                vec![GameEvent::GameWon { winner: disc, kind }]
            }
            Some(GameOutcome::Draw) => {
                self.outcome = outcome;
                vec![GameEvent::GameDrawn]
            }
            None => {
                self.current_player = mover.other();
                vec![GameEvent::TurnPassed {
                    next: self.current_player,
                }]
            }
        }
    }

    /// JSON snapshot of the whole game, for renderers outside Rust
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::standard()
    }
}
