//! Board implementation
//!
//! Fixed 3×3 array, row-major.

use std::fmt;

use super::{Cell, Mark, Outcome};

/// Side length of the grid
pub const BOARD_SIZE: usize = 3;

/// Every winning line: 3 rows, 3 columns, 2 diagonals
pub const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// The game grid
///
/// A cell goes Empty → Marked exactly once and only `reset` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `mark` at (row, col)
    ///
    /// Returns false without touching the board if the coordinates are
    /// outside the grid or the cell is already taken.
    pub fn place_move(&mut self, row: usize, col: usize, mark: Mark) -> bool {
        if !Self::in_bounds(row, col) {
            return false;
        }

        let cell = &mut self.cells[row][col];
        if !cell.is_empty() {
            return false;
        }

        *cell = Cell::Marked(mark);
        true
    }

    /// True iff some row, column or diagonal is entirely `mark`
    ///
    /// Scans all 8 lines on every call.
    pub fn is_winner(&self, mark: Mark) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&(r, c)| self.cells[r][c] == Cell::Marked(mark)))
    }

    /// True iff no Empty cell remains
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// Clear every cell
    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    }

    /// Evaluate the position
    ///
    /// A win is checked before fullness, so a last move that both completes
    /// a line and fills the board is a Win.
    pub fn outcome(&self) -> Outcome {
        for mark in [Mark::A, Mark::B] {
            if self.is_winner(mark) {
                return Outcome::Win(mark);
            }
        }

        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    /// Read a cell, None if out of range
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if Self::in_bounds(row, col) {
            Some(self.cells[row][col])
        } else {
            None
        }
    }

    /// Number of marked cells
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| !cell.is_empty()).count()
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < BOARD_SIZE && col < BOARD_SIZE
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().iter().enumerate() {
            if i > 0 {
                writeln!(f, "---+---+---")?;
            }
            let symbols: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => " ".to_string(),
                    Cell::Marked(mark) => mark.symbol().to_string(),
                })
                .collect();
            writeln!(f, " {} | {} | {} ", symbols[0], symbols[1], symbols[2])?;
        }
        Ok(())
    }
}
