//! Parsing of the player's typed commands.
//!
//! Columns are typed 1-based and converted to the engine's 0-based indices
//! here.

use popout_core::GameAction;
use thiserror::Error;

/// Errors in a typed command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("empty input")]
    Blank,

    #[error("unknown move {0:?}, expected D or P")]
    UnknownMove(String),

    #[error("{0:?} is not a column number")]
    NotANumber(String),

    #[error("column {0} does not exist")]
    NoSuchColumn(i64),
}

/// The kind of move chosen at the first prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Drop,
    PopOut,
}

impl MoveKind {
    /// Parse a move choice. Only the first letter counts, in any case.
    pub fn parse(line: &str) -> Result<Self, InputError> {
        let line = line.trim();
        match line.chars().next().map(|c| c.to_ascii_uppercase()) {
            None => Err(InputError::Blank),
            Some('D') => Ok(MoveKind::Drop),
            Some('P') => Ok(MoveKind::PopOut),
            Some(_) => Err(InputError::UnknownMove(line.to_string())),
        }
    }

    /// The engine action for this move on a 0-based column
    pub fn action(self, column: usize) -> GameAction {
        match self {
            MoveKind::Drop => GameAction::Drop(column),
            MoveKind::PopOut => GameAction::PopOut(column),
        }
    }
}

/// Parse a 1-based column number into a 0-based index.
///
/// Numbers below 1 are `NoSuchColumn`; the upper bound is left to the board.
pub fn parse_column(line: &str) -> Result<usize, InputError> {
    let line = line.trim();
    let number: i64 = line
        .parse()
        .map_err(|_| InputError::NotANumber(line.to_string()))?;

    if number < 1 {
        return Err(InputError::NoSuchColumn(number));
    }
    usize::try_from(number - 1).map_err(|_| InputError::NoSuchColumn(number))
}
