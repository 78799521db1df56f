//! StatsLedger implementation

use crate::board::{Mark, Outcome};
use crate::protocol::Message;

use super::{Standing, StatsSnapshot};

/// Running tallies for the local side, plus the peer's last report
#[derive(Debug, Clone, Default)]
pub struct StatsLedger {
    /// Own counters, only ever incremented
    local: StatsSnapshot,

    /// Tallies the peer sent when it quit (display only)
    remote: Option<StatsSnapshot>,
}

impl StatsLedger {
    /// Create a ledger with every counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished match as seen by the holder of `local`
    ///
    /// Returns the standing that was counted, or None for `Ongoing`
    /// (nothing is recorded for an unfinished board).
    pub fn record(&mut self, outcome: Outcome, local: Mark) -> Option<Standing> {
        let standing = match outcome {
            Outcome::Win(mark) if mark == local => Standing::Won,
            Outcome::Win(_) => Standing::Lost,
            Outcome::Draw => Standing::Tied,
            Outcome::Ongoing => return None,
        };
        self.record_standing(standing);
        Some(standing)
    }

    /// Count one finished match
    pub fn record_standing(&mut self, standing: Standing) {
        self.local.games = self.local.games.saturating_add(1);
        let counter = match standing {
            Standing::Won => &mut self.local.wins,
            Standing::Lost => &mut self.local.losses,
            Standing::Tied => &mut self.local.ties,
        };
        *counter = counter.saturating_add(1);
    }

    /// Current local counters
    pub fn snapshot(&self) -> StatsSnapshot {
        self.local
    }

    /// The FinalStats message carrying the local counters
    pub fn to_final_stats(&self) -> Message {
        Message::FinalStats(self.local)
    }

    /// Store the peer's reported tallies for display
    ///
    /// Never touches the local counters.
    pub fn apply_remote(&mut self, stats: StatsSnapshot) {
        self.remote = Some(stats);
    }

    /// The peer's tallies, if it has reported them
    pub fn remote(&self) -> Option<StatsSnapshot> {
        self.remote
    }
}
