//! Stats Module
//!
//! Win/loss/tie tallies for the local participant.
//!
//! ## Responsibilities
//! - Count finished matches from the local side's point of view
//! - Snapshot the counters for display without mutating them
//! - Produce the FinalStats message when the local side quits
//! - Hold the peer's reported tallies for display only
//!
//! Counters live for the whole process: they survive rematches and are
//! never decremented or reset.

mod ledger;

pub use ledger::StatsLedger;

/// How a finished match went for the local side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Won,
    Lost,
    Tied,
}

/// Point-in-time copy of the four counters
///
/// Field order matches the FinalStats wire form: games, wins, losses, ties,
/// always from the point of view of whoever produced the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}
