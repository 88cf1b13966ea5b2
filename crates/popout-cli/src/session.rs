//! The console game loop.
//!
//! A `Session` owns the game, reads commands from any `BufRead` and writes
//! prompts and the board to any `Write`. Turn order and the outcome come
//! from the engine; this module only handles text.

use std::io::{self, BufRead, Write};

use popout_core::{GameError, GameOutcome, GameState, WinKind};
use thiserror::Error;
use tracing::{debug, info};

use crate::input::{parse_column, InputError, MoveKind};

/// Errors that end a session early
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("input closed before the game finished")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("game error: {0}")]
    Game(#[from] GameError),
}

/// One game played over a text stream
pub struct Session<R, W> {
    game: GameState,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(game: GameState, input: R, output: W) -> Self {
        Self {
            game,
            input,
            output,
        }
    }

    /// Play until someone wins or the board fills
    pub fn run(mut self) -> Result<GameOutcome, SessionError> {
        writeln!(self.output, "Welcome to Connect 4 - PopOut variation!")?;
        writeln!(self.output, "Player 1: X   Player 2: O")?;
        write!(self.output, "{}", self.game.board())?;

        loop {
            let mover = self.game.current_player();
            writeln!(
                self.output,
                "\nPlayer {} ({}) - your turn.",
                mover.player_number(),
                mover
            )?;
            writeln!(self.output, "Choose move: (D)rop or (P)op out from bottom")?;

            let line = self.read_line()?;
            let kind = match MoveKind::parse(&line) {
                Ok(kind) => kind,
                Err(InputError::Blank) => continue,
                Err(err) => {
                    debug!(%err, "rejected move choice");
                    writeln!(self.output, "Invalid choice - type D or P.")?;
                    continue;
                }
            };

            if !self.take_move(kind)? {
                continue;
            }

            write!(self.output, "{}", self.game.board())?;

            if let Some(outcome) = self.game.outcome() {
                info!(?outcome, moves = self.game.moves_played(), "game finished");
                self.announce(outcome)?;
                return Ok(outcome);
            }
        }
    }

    /// Ask for a column and apply the move. Returns false when the player
    /// has to choose again.
    fn take_move(&mut self, kind: MoveKind) -> Result<bool, SessionError> {
        let (prompt, rejection) = match kind {
            MoveKind::Drop => (
                "Enter column to drop into",
                "Column is full or out of range.",
            ),
            MoveKind::PopOut => (
                "Enter column to pop out from bottom",
                "Cannot pop out from that column - either wrong piece or out of range.",
            ),
        };
        writeln!(self.output, "{} (1 - {}):", prompt, self.game.board().cols())?;

        let line = self.read_line()?;
        let column = match parse_column(&line) {
            Ok(column) => column,
            Err(err @ InputError::NoSuchColumn(_)) => {
                debug!(%err, "rejected column");
                writeln!(self.output, "{}", rejection)?;
                return Ok(false);
            }
            Err(err) => {
                debug!(%err, "rejected column");
                writeln!(self.output, "Invalid column number.")?;
                return Ok(false);
            }
        };

        let mover = self.game.current_player();
        let action = kind.action(column);
        match self.game.apply_action(action) {
            Ok(events) => {
                info!(disc = %mover, ?action, "move applied");
                for event in &events {
                    debug!(?event, "game event");
                }
                Ok(true)
            }
            Err(GameError::InvalidMove(err)) => {
                debug!(%err, "rejected move");
                writeln!(self.output, "{}", rejection)?;
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn announce(&mut self, outcome: GameOutcome) -> io::Result<()> {
        match outcome {
            GameOutcome::Winner { disc, kind } => {
                if kind == WinKind::Simultaneous {
                    writeln!(self.output, "Both players have 4-in-a-row!")?;
                    writeln!(self.output, "By PopOut rules, the current player wins.")?;
                }
                writeln!(
                    self.output,
                    "Player {} ({}) WINS!",
                    disc.player_number(),
                    disc
                )?;
            }
            GameOutcome::Draw => writeln!(self.output, "Board is full. It's a draw!")?,
        }

        writeln!(self.output, "Game over. Thanks for playing!")?;
        self.output.flush()
    }

    fn read_line(&mut self) -> Result<String, SessionError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }
        Ok(line)
    }
}
