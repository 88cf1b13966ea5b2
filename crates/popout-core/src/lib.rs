//! PopOut - a Connect 4 variant engine
//!
//! This crate provides the core game logic for Connect 4 with PopOut:
//! players either drop a disc into a column or pop their own disc out of
//! the bottom of a column.
//!
//! # Architecture
//!
//! The engine does no I/O. Front ends (the console driver, or JavaScript
//! through the `wasm` feature) ask it to validate and apply moves, then query
//! the outcome.
//!
//! # Modules
//!
//! - [`board`]: The grid, drop/pop-out moves, and four-in-a-row detection
//! - [`player`]: Disc symbols and player numbering
//! - [`actions`]: Moves and the events they produce
//! - [`game`]: Turn order and end-of-game rules

pub mod actions;
pub mod board;
pub mod game;
pub mod player;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent, WinKind};
pub use board::{Board, Cell, InvalidDimensions, InvalidMove, CONNECT, MAX_DIMENSION};
pub use game::{GameError, GameOutcome, GameState, DEFAULT_COLS, DEFAULT_ROWS};
pub use player::Disc;
