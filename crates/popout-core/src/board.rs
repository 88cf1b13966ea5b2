//! The PopOut board engine.
//!
//! This module contains:
//! - The `Cell` type stored in each grid position
//! - The `Board` grid with drop and pop-out moves
//! - Four-in-a-row detection across all four orientations
//!
//! Row 0 is the top of the board and row `rows - 1` the bottom. Every
//! mutation keeps the gravity invariant: inside a column all empty cells sit
//! above all occupied cells.

use crate::player::Disc;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of same-disc cells in a line needed to win
pub const CONNECT: usize = 4;

/// Largest accepted number of rows or columns
pub const MAX_DIMENSION: usize = 1024;

/// Line orientations as (row step, column step): horizontal, vertical,
/// sloping down-right, sloping up-right.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Contents of a single grid position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Disc(Disc),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The disc in this cell, if any
    pub fn disc(&self) -> Option<Disc> {
        match self {
            Cell::Empty => None,
            Cell::Disc(disc) => Some(*disc),
        }
    }

    /// Character drawn on the board
    pub fn symbol(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Disc(disc) => disc.symbol(),
        }
    }
}

/// A move the board refused to apply. The board is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InvalidMove {
    #[error("column {column} is out of range (board has {cols} columns)")]
    OutOfRange { column: usize, cols: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("cannot pop column {column}: bottom disc is not {disc}")]
    IllegalPop { column: usize, disc: Disc },
}

/// Rejected board dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error(
    "board needs between 1 and {max} rows and columns (got {rows}x{cols})",
    max = MAX_DIMENSION
)]
pub struct InvalidDimensions {
    pub rows: usize,
    pub cols: usize,
}

/// A fixed-size PopOut grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major cells, `rows * cols` long
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. Dimensions are fixed for the board's lifetime.
    pub fn new(rows: usize, cols: usize) -> Result<Self, InvalidDimensions> {
        let in_range = |n: usize| (1..=MAX_DIMENSION).contains(&n);
        if !in_range(rows) || !in_range(cols) || rows.checked_mul(cols).is_none() {
            return Err(InvalidDimensions { rows, cols });
        }

        Ok(Self::empty(rows, cols))
    }

    /// Empty board with dimensions already known to be valid
    pub(crate) fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a position, or `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cell(row, col))
        } else {
            None
        }
    }

    fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    fn check_column(&self, column: usize) -> Result<(), InvalidMove> {
        if column < self.cols {
            Ok(())
        } else {
            Err(InvalidMove::OutOfRange {
                column,
                cols: self.cols,
            })
        }
    }

    /// Whether a disc can be dropped into `column`: it must exist and its
    /// top cell must be empty.
    pub fn can_drop(&self, column: usize) -> bool {
        column < self.cols && self.cell(0, column).is_empty()
    }

    /// Drop `disc` into `column`. It lands in the lowest empty cell.
    ///
    /// Returns the row it landed on.
    pub fn drop_disc(&mut self, column: usize, disc: Disc) -> Result<usize, InvalidMove> {
        self.check_column(column)?;

        let row = (0..self.rows)
            .rev()
            .find(|&row| self.cell(row, column).is_empty())
            .ok_or(InvalidMove::ColumnFull { column })?;

        self.set(row, column, Cell::Disc(disc));
        Ok(row)
    }

    /// Whether `disc` may pop `column`: the column must exist and its bottom
    /// cell must hold exactly `disc`.
    pub fn can_pop_out(&self, column: usize, disc: Disc) -> bool {
        column < self.cols && self.cell(self.rows - 1, column).disc() == Some(disc)
    }

    /// Remove the bottom disc of `column` on behalf of `disc`. Everything
    /// above falls one row and the top cell becomes empty.
    ///
    /// Returns the removed disc.
    pub fn pop_out(&mut self, column: usize, disc: Disc) -> Result<Disc, InvalidMove> {
        self.check_column(column)?;
        if !self.can_pop_out(column, disc) {
            return Err(InvalidMove::IllegalPop { column, disc });
        }

        // Bottom-up so every row reads its upper neighbour before it is overwritten
        for row in (1..self.rows).rev() {
            let above = self.cell(row - 1, column);
            self.set(row, column, above);
        }
        self.set(0, column, Cell::Empty);

        Ok(disc)
    }

    /// True when every top-row cell is occupied. Gravity makes this
    /// equivalent to the whole grid being occupied.
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| !self.cell(0, col).is_empty())
    }

    /// Number of discs stacked in `column` (0 for a missing column)
    pub fn column_height(&self, column: usize) -> usize {
        if column >= self.cols {
            return 0;
        }
        (0..self.rows)
            .filter(|&row| !self.cell(row, column).is_empty())
            .count()
    }

    /// Total discs on the board
    pub fn disc_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Whether `disc` has four in a row anywhere on the board
    pub fn has_connect4(&self, disc: Disc) -> bool {
        self.winning_line(disc).is_some()
    }

    /// The first four-in-a-row of `disc`, as (row, col) positions.
    ///
    /// Orientations are scanned horizontal, vertical, down-right, up-right.
    pub fn winning_line(&self, disc: Disc) -> Option<[(usize, usize); CONNECT]> {
        let target = Cell::Disc(disc);

        for &(row_step, col_step) in &DIRECTIONS {
            for row in 0..self.rows {
                for col in 0..self.cols {
                    let Some(line) = self.line_from(row, col, row_step, col_step) else {
                        continue;
                    };
                    if line.iter().all(|&(r, c)| self.cell(r, c) == target) {
                        return Some(line);
                    }
                }
            }
        }

        None
    }

    /// The `CONNECT` positions starting at (row, col) along a step, if they
    /// all fit on the board
    fn line_from(
        &self,
        row: usize,
        col: usize,
        row_step: isize,
        col_step: isize,
    ) -> Option<[(usize, usize); CONNECT]> {
        let mut line = [(0, 0); CONNECT];
        for (k, slot) in line.iter_mut().enumerate() {
            let r = row.checked_add_signed(row_step * k as isize)?;
            let c = col.checked_add_signed(col_step * k as isize)?;
            if r >= self.rows || c >= self.cols {
                return None;
            }
            *slot = (r, c);
        }
        Some(line)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in 0..self.rows {
            write!(f, "|")?;
            for col in 0..self.cols {
                write!(f, "{}|", self.cell(row, col).symbol())?;
            }
            writeln!(f)?;
        }

        write!(f, " ")?;
        for col in 1..=self.cols {
            write!(f, "{} ", col)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn board_4x5() -> Board {
        Board::new(4, 5).unwrap()
    }

    /// No empty cell below an occupied one, in any column
    fn assert_gravity(board: &Board) {
        for col in 0..board.cols() {
            let mut seen_disc = false;
            for row in 0..board.rows() {
                let cell = board.get(row, col).unwrap();
                if seen_disc {
                    assert!(!cell.is_empty(), "gap below a disc at ({}, {})", row, col);
                }
                seen_disc |= !cell.is_empty();
            }
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = board_4x5();
        assert_eq!(board.rows(), 4);
        assert_eq!(board.cols(), 5);
        for row in 0..4 {
            for col in 0..5 {
                assert_eq!(board.get(row, col), Some(Cell::Empty));
            }
        }
        assert_eq!(board.get(4, 0), None);
        assert_eq!(board.get(0, 5), None);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(Board::new(0, 5), Err(InvalidDimensions { rows: 0, cols: 5 }));
        assert_eq!(Board::new(4, 0), Err(InvalidDimensions { rows: 4, cols: 0 }));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        assert_eq!(
            Board::new(usize::MAX, 2),
            Err(InvalidDimensions {
                rows: usize::MAX,
                cols: 2
            })
        );
        assert_eq!(
            Board::new(3, MAX_DIMENSION + 1),
            Err(InvalidDimensions {
                rows: 3,
                cols: MAX_DIMENSION + 1
            })
        );
        let board = Board::new(MAX_DIMENSION, 1).unwrap();
        assert_eq!(board.rows(), MAX_DIMENSION);
    }

    #[test]
    fn test_cell_disc_accessor() {
        assert_eq!(Cell::Empty.disc(), None);
        assert_eq!(Cell::Disc(Disc::O).disc(), Some(Disc::O));
    }

    #[test]
    fn test_drop_lands_on_bottom_and_stacks() {
        let mut board = board_4x5();

        assert_eq!(board.drop_disc(2, Disc::X), Ok(3));
        assert_eq!(board.get(3, 2), Some(Cell::Disc(Disc::X)));

        assert_eq!(board.drop_disc(2, Disc::O), Ok(2));
        assert_eq!(board.get(2, 2), Some(Cell::Disc(Disc::O)));
        assert_eq!(board.column_height(2), 2);
    }

    #[test]
    fn test_column_fills_after_exactly_rows_drops() {
        let mut board = board_4x5();
        for _ in 0..3 {
            board.drop_disc(0, Disc::X).unwrap();
            assert!(board.can_drop(0));
        }
        assert_eq!(board.drop_disc(0, Disc::X), Ok(0));
        assert!(!board.can_drop(0));

        let before = board.clone();
        assert_eq!(
            board.drop_disc(0, Disc::O),
            Err(InvalidMove::ColumnFull { column: 0 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_out_of_range_column() {
        let mut board = board_4x5();
        assert!(!board.can_drop(5));
        assert!(!board.can_pop_out(5, Disc::X));
        assert_eq!(
            board.drop_disc(5, Disc::X),
            Err(InvalidMove::OutOfRange { column: 5, cols: 5 })
        );
        assert_eq!(
            board.pop_out(7, Disc::X),
            Err(InvalidMove::OutOfRange { column: 7, cols: 5 })
        );
        assert_eq!(board.disc_count(), 0);
    }

    #[test]
    fn test_pop_requires_own_bottom_disc() {
        let mut board = board_4x5();
        assert!(!board.can_pop_out(2, Disc::X));
        assert_eq!(
            board.pop_out(2, Disc::X),
            Err(InvalidMove::IllegalPop {
                column: 2,
                disc: Disc::X
            })
        );

        board.drop_disc(2, Disc::X).unwrap();
        board.drop_disc(2, Disc::O).unwrap();
        assert!(board.can_pop_out(2, Disc::X));
        assert!(!board.can_pop_out(2, Disc::O));
    }

    #[test]
    fn test_pop_shifts_column_down() {
        let mut board = board_4x5();
        board.drop_disc(1, Disc::X).unwrap();
        board.drop_disc(1, Disc::O).unwrap();
        board.drop_disc(1, Disc::X).unwrap();
        board.drop_disc(1, Disc::O).unwrap();
        board.drop_disc(0, Disc::O).unwrap();

        assert_eq!(board.pop_out(1, Disc::X), Ok(Disc::X));

        assert_eq!(board.get(0, 1), Some(Cell::Empty));
        assert_eq!(board.get(1, 1), Some(Cell::Disc(Disc::O)));
        assert_eq!(board.get(2, 1), Some(Cell::Disc(Disc::X)));
        assert_eq!(board.get(3, 1), Some(Cell::Disc(Disc::O)));
        assert_eq!(board.column_height(1), 3);
        // Neighbouring column untouched
        assert_eq!(board.get(3, 0), Some(Cell::Disc(Disc::O)));
        assert_gravity(&board);
    }

    #[test]
    fn test_pop_single_disc_empties_column() {
        let mut board = board_4x5();
        board.drop_disc(4, Disc::O).unwrap();
        board.pop_out(4, Disc::O).unwrap();
        assert_eq!(board.column_height(4), 0);
        assert_eq!(board.disc_count(), 0);
    }

    #[test]
    fn test_single_row_board_pop() {
        let mut board = Board::new(1, 3).unwrap();
        board.drop_disc(1, Disc::X).unwrap();
        assert!(!board.can_drop(1));
        board.pop_out(1, Disc::X).unwrap();
        assert!(board.can_drop(1));
    }

    #[test]
    fn test_full_checks_top_row_only() {
        let mut board = board_4x5();
        for col in 0..5 {
            board.set(0, col, Cell::Disc(Disc::O));
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_full_after_filling_every_column() {
        let mut board = board_4x5();
        for col in 0..5 {
            for _ in 0..4 {
                assert!(!board.is_full());
                board.drop_disc(col, Disc::X).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.disc_count(), 20);
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = board_4x5();
        for col in 0..4 {
            board.drop_disc(col, Disc::X).unwrap();
        }
        assert!(board.has_connect4(Disc::X));
        assert!(!board.has_connect4(Disc::O));
        assert_eq!(
            board.winning_line(Disc::X),
            Some([(3, 0), (3, 1), (3, 2), (3, 3)])
        );
    }

    #[test]
    fn test_vertical_win() {
        let mut board = board_4x5();
        for _ in 0..4 {
            board.drop_disc(3, Disc::O).unwrap();
        }
        assert!(board.has_connect4(Disc::O));
        assert_eq!(
            board.winning_line(Disc::O),
            Some([(0, 3), (1, 3), (2, 3), (3, 3)])
        );
    }

    #[test]
    fn test_down_right_diagonal_win() {
        let mut board = board_4x5();
        // X at (0,1) (1,2) (2,3) (3,4)
        for (col, fillers) in [(1, 3), (2, 2), (3, 1), (4, 0)] {
            for _ in 0..fillers {
                board.drop_disc(col, Disc::O).unwrap();
            }
            board.drop_disc(col, Disc::X).unwrap();
        }
        assert!(board.has_connect4(Disc::X));
        assert!(!board.has_connect4(Disc::O));
        assert_eq!(
            board.winning_line(Disc::X),
            Some([(0, 1), (1, 2), (2, 3), (3, 4)])
        );
    }

    #[test]
    fn test_up_right_diagonal_win() {
        let mut board = board_4x5();
        // X at (3,0) (2,1) (1,2) (0,3)
        for (col, fillers) in [(0, 0), (1, 1), (2, 2), (3, 3)] {
            for _ in 0..fillers {
                board.drop_disc(col, Disc::O).unwrap();
            }
            board.drop_disc(col, Disc::X).unwrap();
        }
        assert!(board.has_connect4(Disc::X));
        assert_eq!(
            board.winning_line(Disc::X),
            Some([(3, 0), (2, 1), (1, 2), (0, 3)])
        );
    }

    #[test]
    fn test_three_in_a_row_is_not_a_win() {
        let mut board = board_4x5();
        for col in 0..3 {
            board.drop_disc(col, Disc::X).unwrap();
        }
        board.drop_disc(3, Disc::O).unwrap();
        assert!(!board.has_connect4(Disc::X));
        assert!(!board.has_connect4(Disc::O));
    }

    #[test]
    fn test_small_board_never_wins() {
        let mut board = Board::new(3, 3).unwrap();
        for col in 0..3 {
            for _ in 0..3 {
                board.drop_disc(col, Disc::X).unwrap();
            }
        }
        assert!(!board.has_connect4(Disc::X));
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let mut board = board_4x5();
        board.drop_disc(0, Disc::X).unwrap();
        board.drop_disc(0, Disc::O).unwrap();
        let before = board.clone();

        for _ in 0..2 {
            assert!(board.can_drop(0));
            assert!(board.can_pop_out(0, Disc::X));
            assert!(!board.is_full());
            assert!(!board.has_connect4(Disc::X));
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_display_matches_console_layout() {
        let mut board = Board::new(2, 3).unwrap();
        board.drop_disc(0, Disc::X).unwrap();
        board.drop_disc(2, Disc::O).unwrap();
        board.drop_disc(2, Disc::X).unwrap();

        assert_eq!(board.to_string(), "\n|.|.|X|\n|X|.|O|\n 1 2 3 \n");
    }
}
