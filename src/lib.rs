//! # tictacwire
//!
//! Two-player tic-tac-toe over a direct point-to-point connection:
//! - Pure board engine (legality, win/draw detection)
//! - Tagged, length-prefixed, checksummed text frames
//! - Per-side state machine enforcing strict turn alternation
//! - Win/loss/tie tallies that survive rematches
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  UI layer (terminal, GUI)                   │
//! │        clicks → place_move / rematch / quit / await         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     MatchSession                            │
//! │          (phase machine, one per process)                   │
//! └──────┬──────────────────┬──────────────────────┬────────────┘
//!        │                  │                      │
//!        ▼                  ▼                      ▼
//!  ┌───────────┐     ┌─────────────┐        ┌─────────────┐
//!  │   Board   │     │ StatsLedger │        │   Channel   │
//!  │  (pure)   │     │ (counters)  │        │ (TCP/memory)│
//!  └───────────┘     └─────────────┘        └──────┬──────┘
//!                                                  │
//!                                           ┌──────▼──────┐
//!                                           │    Codec    │
//!                                           │  (frames)   │
//!                                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod board;
pub mod protocol;
pub mod stats;
pub mod network;
pub mod session;
pub mod console;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{GameError, Result};
pub use config::Config;
pub use board::{Board, Cell, Mark, Outcome};
pub use session::{MatchSession, Phase, RemoteEvent, Role};
pub use stats::{Standing, StatsLedger, StatsSnapshot};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tictacwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
