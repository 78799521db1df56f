//! Session Module
//!
//! The per-process state machine that sequences a match and its rematches.
//!
//! ## Phases
//! ```text
//!                 initiator                         acceptor
//!                     │                                 │
//!          AwaitingPeerUsername                         │
//!                     │ submit_username                 │
//!                     ▼                                 ▼
//!      ┌────────► LocalTurn ◄──── peer move ──── RemoteTurnPending ◄───┐
//!      │              │                                 ▲   │          │
//!      │              └──── local move (ongoing) ───────┘   │          │
//!      │              │                                     │          │
//!      │   local move (terminal)                 peer move (terminal)  │
//!      │              ▼                                     ▼          │
//!      │   MatchEndedLocalChoice                 MatchEndedRemoteChoice│
//!      │        │           │                       │            │     │
//!      └─ rematch ──────────┼───────────────────── peer rematch ───────┘
//!      (to the side's starting phase)
//!                           │ quit                  │ peer quit
//!                           ▼                       ▼
//!                         Closed ◄──────────────────┘
//! ```
//!
//! Whichever move ends a match decides who chooses: the side that made it
//! picks rematch or quit, the other side waits for that choice.

mod match_session;

use std::fmt;

pub use match_session::MatchSession;

use crate::board::{Mark, Outcome};
use crate::stats::StatsSnapshot;

/// Which end of the connection this process is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Connected to the peer; holds MarkA and always moves first
    Initiator,

    /// Accepted the peer's connection; holds MarkB
    Acceptor,
}

impl Role {
    /// The mark this role plays for the whole session
    pub fn mark(self) -> Mark {
        match self {
            Role::Initiator => Mark::A,
            Role::Acceptor => Mark::B,
        }
    }

    /// Where every match (first or rematch) begins for this role
    pub fn opening_phase(self) -> Phase {
        match self {
            Role::Initiator => Phase::LocalTurn,
            Role::Acceptor => Phase::RemoteTurnPending,
        }
    }
}

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Initiator has not announced its username yet
    AwaitingPeerUsername,

    /// Local player must move
    LocalTurn,

    /// A blocking receive for the peer's next message is due
    RemoteTurnPending,

    /// Match is over and the local player picks rematch or quit
    MatchEndedLocalChoice,

    /// Match is over and the peer picks rematch or quit
    MatchEndedRemoteChoice,

    /// Terminal; the channel is closed
    Closed,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::AwaitingPeerUsername => "awaiting username",
            Phase::LocalTurn => "local turn",
            Phase::RemoteTurnPending => "waiting for peer move",
            Phase::MatchEndedLocalChoice => "choosing rematch or quit",
            Phase::MatchEndedRemoteChoice => "waiting for peer decision",
            Phase::Closed => "closed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a blocking receive produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteEvent {
    /// Initiator announced its name (acceptor only, once)
    PeerJoined(String),

    /// Peer placed its mark; `outcome` is the board evaluated afterwards
    Moved {
        row: usize,
        col: usize,
        outcome: Outcome,
    },

    /// Peer chose a rematch; the board is already reset
    Rematch,

    /// Peer quit and reported its own tallies; the session is closed
    PeerQuit(StatsSnapshot),
}
