//! MatchSession implementation

use crate::board::{Board, Mark, Outcome};
use crate::config::Config;
use crate::error::{GameError, Result};
use crate::network::Channel;
use crate::protocol::{validate_username, Message};
use crate::stats::{Standing, StatsLedger, StatsSnapshot};

use super::{Phase, RemoteEvent, Role};

/// One side of a match, driving the turn protocol over a channel
///
/// ## Ownership
/// - The session owns its board copy; the peer keeps its own and the two
///   stay identical only because both apply the same moves in order
/// - Turn ownership is the phase: nothing else gates who may move
/// - Any fatal error closes the channel and leaves the session `Closed`
pub struct MatchSession<C: Channel> {
    /// Link to the peer
    channel: C,

    /// Initiator or acceptor, fixed for the session
    role: Role,

    /// Local board copy
    board: Board,

    /// Current lifecycle phase
    phase: Phase,

    /// Local tallies (and the peer's, once reported)
    ledger: StatsLedger,

    /// Name announced by the initiator
    username: Option<String>,

    /// Label for the peer
    peer_name: String,

    /// Acceptor has received the initiator's username
    peer_named: bool,

    /// Evaluation after the most recent placement
    last_outcome: Option<Outcome>,

    /// How the last finished match went for us
    last_standing: Option<Standing>,
}

impl<C: Channel> MatchSession<C> {
    /// Session for the side that connected (MarkA, moves first)
    pub fn initiator(channel: C, config: &Config) -> Self {
        Self::new(channel, Role::Initiator, config)
    }

    /// Session for the side that accepted (MarkB)
    pub fn acceptor(channel: C, config: &Config) -> Self {
        Self::new(channel, Role::Acceptor, config)
    }

    fn new(channel: C, role: Role, config: &Config) -> Self {
        let phase = match role {
            Role::Initiator => Phase::AwaitingPeerUsername,
            Role::Acceptor => Phase::RemoteTurnPending,
        };

        tracing::debug!("Starting {:?} session with {} in phase {}", role, channel.peer(), phase);

        Self {
            channel,
            role,
            board: Board::new(),
            phase,
            ledger: StatsLedger::new(),
            username: None,
            peer_name: config.peer_display_name.clone(),
            peer_named: false,
            last_outcome: None,
            last_standing: None,
        }
    }

    /// Carry tallies over from an earlier, abandoned session
    pub fn with_ledger(mut self, ledger: StatsLedger) -> Self {
        self.ledger = ledger;
        self
    }

    // =========================================================================
    // Local Actions
    // =========================================================================

    /// Announce the local username (initiator only)
    ///
    /// An invalid name is rejected without sending anything.
    pub fn submit_username(&mut self, name: &str) -> Result<()> {
        self.ensure_phase("submit a username", &[Phase::AwaitingPeerUsername])?;
        validate_username(name)?;

        self.send(&Message::Username(name.to_string()))?;
        self.username = Some(name.to_string());
        self.transition(Phase::LocalTurn);
        Ok(())
    }

    /// Place the local mark at (row, col)
    ///
    /// An occupied or out-of-range cell yields `IllegalMove` and changes
    /// nothing: no message is sent and the turn is kept.
    pub fn place_move(&mut self, row: usize, col: usize) -> Result<Outcome> {
        self.ensure_phase("place a move", &[Phase::LocalTurn])?;

        if !self.board.place_move(row, col, self.local_mark()) {
            tracing::debug!("Rejected local move at ({}, {})", row, col);
            return Err(GameError::IllegalMove { row, col });
        }

        self.send(&Message::MoveMade { row, col })?;

        let outcome = self.evaluate();
        if outcome.is_terminal() {
            self.transition(Phase::MatchEndedLocalChoice);
        } else {
            self.transition(Phase::RemoteTurnPending);
        }
        Ok(outcome)
    }

    /// Start another match after this side ended the last one
    pub fn rematch(&mut self) -> Result<()> {
        self.ensure_phase("request a rematch", &[Phase::MatchEndedLocalChoice])?;

        self.board.reset();
        self.send(&Message::RematchRequest)?;

        tracing::info!("Rematch requested");
        self.begin_next_match();
        Ok(())
    }

    /// End the session, reporting the local tallies to the peer
    pub fn quit(&mut self) -> Result<StatsSnapshot> {
        self.ensure_phase("quit", &[Phase::MatchEndedLocalChoice])?;

        let stats = self.ledger.snapshot();
        let final_stats = self.ledger.to_final_stats();
        self.send(&final_stats)?;

        tracing::info!("Quitting after {} games", stats.games);
        self.close();
        Ok(stats)
    }

    /// Abandon the session without telling the peer
    pub fn close(&mut self) {
        if self.phase != Phase::Closed {
            self.channel.close();
            self.transition(Phase::Closed);
        }
    }

    // =========================================================================
    // Remote Actions
    // =========================================================================

    /// Block until the peer's next message and apply it
    ///
    /// Valid while waiting for a peer move or for the peer's end-of-match
    /// decision. A message the current phase cannot accept, an illegal
    /// peer move, or a broken channel closes the session and comes back
    /// as `ConnectionFailure`.
    pub fn await_remote(&mut self) -> Result<RemoteEvent> {
        self.ensure_phase(
            "wait for the peer",
            &[Phase::RemoteTurnPending, Phase::MatchEndedRemoteChoice],
        )?;

        let message = match self.channel.recv() {
            Ok(message) => message,
            Err(e) => return Err(self.fail(e)),
        };

        match self.apply_remote(message) {
            Ok(event) => Ok(event),
            Err(e) => Err(self.fail(e)),
        }
    }

    fn apply_remote(&mut self, message: Message) -> Result<RemoteEvent> {
        match (self.phase, message) {
            (Phase::RemoteTurnPending, Message::Username(name)) if self.expects_username() => {
                tracing::info!("Peer joined as {:?}", name);
                self.peer_name = name.clone();
                self.peer_named = true;
                Ok(RemoteEvent::PeerJoined(name))
            }
            (Phase::RemoteTurnPending, Message::MoveMade { row, col })
                if !self.expects_username() =>
            {
                if !self.board.place_move(row, col, self.remote_mark()) {
                    return Err(GameError::MalformedMessage(format!(
                        "peer played on unavailable cell ({}, {})",
                        row, col
                    )));
                }

                let outcome = self.evaluate();
                if outcome.is_terminal() {
                    self.transition(Phase::MatchEndedRemoteChoice);
                } else {
                    self.transition(Phase::LocalTurn);
                }
                Ok(RemoteEvent::Moved { row, col, outcome })
            }
            (Phase::MatchEndedRemoteChoice, Message::RematchRequest) => {
                tracing::info!("Peer requested a rematch");
                self.board.reset();
                self.begin_next_match();
                Ok(RemoteEvent::Rematch)
            }
            (Phase::MatchEndedRemoteChoice, Message::FinalStats(stats)) => {
                tracing::info!("Peer quit reporting {:?}", stats);
                self.ledger.apply_remote(stats);
                self.close();
                Ok(RemoteEvent::PeerQuit(stats))
            }
            (phase, message) => Err(GameError::UnexpectedMessage {
                phase: phase.name(),
                received: message.message_type().name(),
            }),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// The acceptor must hear the initiator's name before anything else
    fn expects_username(&self) -> bool {
        self.role == Role::Acceptor && !self.peer_named
    }

    /// Evaluate the board after a placement, recording a finished match
    fn evaluate(&mut self) -> Outcome {
        let outcome = self.board.outcome();
        self.last_outcome = Some(outcome);

        if let Some(standing) = self.ledger.record(outcome, self.local_mark()) {
            tracing::info!("Match over: {:?} ({:?})", outcome, standing);
            self.last_standing = Some(standing);
        }
        outcome
    }

    fn begin_next_match(&mut self) {
        self.last_outcome = None;
        self.transition(self.role.opening_phase());
    }

    fn send(&mut self, message: &Message) -> Result<()> {
        if let Err(e) = self.channel.send(message) {
            return Err(self.fail(e));
        }
        Ok(())
    }

    /// Tear the session down after an unrecoverable error
    fn fail(&mut self, error: GameError) -> GameError {
        tracing::warn!("Closing session with {}: {}", self.channel.peer(), error);
        self.close();

        match error {
            GameError::ConnectionFailure(_) => error,
            other => GameError::ConnectionFailure(other.to_string()),
        }
    }

    fn ensure_phase(&self, operation: &'static str, allowed: &[Phase]) -> Result<()> {
        if self.phase == Phase::Closed {
            return Err(GameError::SessionClosed);
        }
        if !allowed.contains(&self.phase) {
            return Err(GameError::InvalidPhase {
                operation,
                phase: self.phase.name(),
            });
        }
        Ok(())
    }

    fn transition(&mut self, next: Phase) {
        tracing::debug!("Phase {} -> {}", self.phase, next);
        self.phase = next;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn local_mark(&self) -> Mark {
        self.role.mark()
    }

    pub fn remote_mark(&self) -> Mark {
        self.role.mark().opponent()
    }

    pub fn is_local_turn(&self) -> bool {
        self.phase == Phase::LocalTurn
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ledger(&self) -> &StatsLedger {
        &self.ledger
    }

    /// Hand the tallies back, e.g. to seed a session after reconnecting
    pub fn into_ledger(mut self) -> StatsLedger {
        self.close();
        std::mem::take(&mut self.ledger)
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn peer_name(&self) -> &str {
        &self.peer_name
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    pub fn last_standing(&self) -> Option<Standing> {
        self.last_standing
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }
}
