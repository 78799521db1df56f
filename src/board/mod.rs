//! Board Module
//!
//! Pure game logic for the 3×3 grid.
//!
//! ## Responsibilities
//! - Move legality (bounds + occupancy)
//! - Win detection across all 8 lines
//! - Fullness detection
//! - Reset between matches
//!
//! No I/O happens here. Every contract is a boolean or a plain value;
//! the session decides what a rejected move means for the player.
//!
//! ## Layout
//! ```text
//!        col 0   col 1   col 2
//! row 0 │ (0,0) │ (0,1) │ (0,2) │
//! row 1 │ (1,0) │ (1,1) │ (1,2) │
//! row 2 │ (2,0) │ (2,1) │ (2,2) │
//! ```

mod grid;

use std::fmt;

pub use grid::{Board, BOARD_SIZE, LINES};

/// The symbol bound to one participant for a whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// "X": the connection initiator, always moves first
    A,

    /// "O": the connection acceptor
    B,
}

impl Mark {
    /// The mark held by the other participant
    pub fn opponent(self) -> Mark {
        match self {
            Mark::A => Mark::B,
            Mark::B => Mark::A,
        }
    }

    /// Display symbol
    pub fn symbol(self) -> char {
        match self {
            Mark::A => 'X',
            Mark::B => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Contents of a single square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Result of evaluating the board after a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Some line is entirely this mark
    Win(Mark),

    /// Board is full and nobody completed a line
    Draw,

    /// Play continues
    Ongoing,
}

impl Outcome {
    /// Win or Draw
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}
