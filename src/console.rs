//! Console front-end
//!
//! A line-based UI over any reader/writer pair. It holds no game logic:
//! it forwards input to the session and prints whatever state comes back.

use std::io::{BufRead, Write};

use crate::board::Outcome;
use crate::config::Config;
use crate::error::{GameError, Result};
use crate::network::Channel;
use crate::session::{MatchSession, Phase, RemoteEvent, Role};
use crate::stats::{Standing, StatsLedger, StatsSnapshot};

/// Drives sessions from text input
pub struct Console<R, W> {
    input: R,
    output: W,

    /// Name submitted without prompting, reused after every reconnect
    username: Option<String>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            username: None,
        }
    }

    /// Announce `name` instead of asking for one
    pub fn with_username(mut self, name: impl Into<String>) -> Self {
        self.username = Some(name.into());
        self
    }

    /// Play sessions until one closes normally or the player stops retrying
    ///
    /// `connect` is called for every attempt. A failed attempt, or a
    /// session lost to `ConnectionFailure`, asks whether to try again; the
    /// tallies so far seed the next session. Other errors are returned.
    pub fn run_with_reconnect<C, F>(
        &mut self,
        role: Role,
        config: &Config,
        mut connect: F,
    ) -> Result<StatsSnapshot>
    where
        C: Channel,
        F: FnMut() -> Result<C>,
    {
        let mut ledger = StatsLedger::new();

        loop {
            let channel = match connect() {
                Ok(channel) => channel,
                Err(e) => {
                    tracing::warn!("Connection attempt failed: {}", e);
                    if self.ask_retry(&e)? {
                        continue;
                    }
                    return self.show_summary(&ledger, &config.peer_display_name);
                }
            };

            let mut session = match role {
                Role::Initiator => MatchSession::initiator(channel, config),
                Role::Acceptor => MatchSession::acceptor(channel, config),
            }
            .with_ledger(ledger);

            match self.run(&mut session) {
                Ok(stats) => return Ok(stats),
                Err(e @ GameError::ConnectionFailure(_)) => {
                    let peer_name = session.peer_name().to_string();
                    ledger = session.into_ledger();
                    tracing::info!("Keeping {} games across reconnect", ledger.snapshot().games);

                    if !self.ask_retry(&e)? {
                        return self.show_summary(&ledger, &peer_name);
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Play until the session closes
    ///
    /// Returns the local tallies. Running out of input abandons the
    /// session; fatal session errors are returned as-is.
    pub fn run<C: Channel>(&mut self, session: &mut MatchSession<C>) -> Result<StatsSnapshot> {
        loop {
            match session.phase() {
                Phase::AwaitingPeerUsername => self.ask_username(session)?,
                Phase::LocalTurn => self.ask_move(session)?,
                Phase::RemoteTurnPending => {
                    writeln!(self.output, "Waiting for {} to move...", session.peer_name())?;
                    let event = session.await_remote()?;
                    self.show_event(session, &event)?;
                }
                Phase::MatchEndedLocalChoice => self.ask_decision(session)?,
                Phase::MatchEndedRemoteChoice => {
                    writeln!(self.output, "{} is making a decision...", session.peer_name())?;
                    let event = session.await_remote()?;
                    self.show_event(session, &event)?;
                }
                Phase::Closed => break,
            }
        }

        self.show_summary(session.ledger(), session.peer_name())
    }

    /// Print the error and ask whether to connect again; no at end of input
    fn ask_retry(&mut self, error: &GameError) -> Result<bool> {
        writeln!(self.output, "{}", error)?;
        loop {
            let Some(answer) = self.prompt("Try again? [y/n] ")? else {
                return Ok(false);
            };
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Type y or n.")?,
            }
        }
    }

    fn show_summary(&mut self, ledger: &StatsLedger, peer_name: &str) -> Result<StatsSnapshot> {
        let stats = ledger.snapshot();
        self.show_stats("Your record", stats)?;
        if let Some(remote) = ledger.remote() {
            self.show_stats(&format!("{}'s record", peer_name), remote)?;
        }
        writeln!(self.output, "Fun Times")?;
        self.output.flush()?;
        Ok(stats)
    }

    /// Next input line, None at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask_username<C: Channel>(&mut self, session: &mut MatchSession<C>) -> Result<()> {
        let name = match self.username.clone() {
            Some(name) => name,
            None => match self.prompt("Enter your username: ")? {
                Some(name) => name,
                None => {
                    session.close();
                    return Ok(());
                }
            },
        };

        match session.submit_username(&name) {
            Err(e @ GameError::InvalidUsername(_)) => {
                self.username = None;
                writeln!(self.output, "{}", e)?;
            }
            other => other?,
        }
        Ok(())
    }

    fn ask_move<C: Channel>(&mut self, session: &mut MatchSession<C>) -> Result<()> {
        write!(self.output, "\n{}", session.board())?;
        let label = session.username().unwrap_or("Your").to_string();
        let prompt = format!("{} ({}), your move [row col or 1-9]: ", label, session.local_mark());

        let Some(line) = self.prompt(&prompt)? else {
            session.close();
            return Ok(());
        };

        let Some((row, col)) = parse_move(&line) else {
            writeln!(self.output, "Enter a row and column from 0 to 2, or a square from 1 to 9.")?;
            return Ok(());
        };

        match session.place_move(row, col) {
            Ok(outcome) if outcome.is_terminal() => self.show_result(session),
            Ok(_) => Ok(()),
            Err(GameError::IllegalMove { .. }) => {
                writeln!(self.output, "That square is taken.")?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn ask_decision<C: Channel>(&mut self, session: &mut MatchSession<C>) -> Result<()> {
        let Some(answer) = self.prompt("[r]ematch or [q]uit? ")? else {
            session.close();
            return Ok(());
        };

        match answer.to_ascii_lowercase().as_str() {
            "r" | "rematch" | "play again" => {
                session.rematch()?;
                writeln!(self.output, "Play again!")?;
            }
            "q" | "quit" => {
                session.quit()?;
            }
            _ => writeln!(self.output, "Type r or q.")?,
        }
        Ok(())
    }

    fn show_event<C: Channel>(
        &mut self,
        session: &MatchSession<C>,
        event: &RemoteEvent,
    ) -> Result<()> {
        match event {
            RemoteEvent::PeerJoined(name) => writeln!(self.output, "{} joined.", name)?,
            RemoteEvent::Moved { outcome, .. } if outcome.is_terminal() => {
                self.show_result(session)?
            }
            RemoteEvent::Moved { row, col, .. } => {
                writeln!(self.output, "{} played ({}, {}).", session.peer_name(), row, col)?
            }
            RemoteEvent::Rematch => writeln!(self.output, "{} wants a rematch!", session.peer_name())?,
            RemoteEvent::PeerQuit(_) => writeln!(self.output, "{} quit.", session.peer_name())?,
        }
        Ok(())
    }

    fn show_result<C: Channel>(&mut self, session: &MatchSession<C>) -> Result<()> {
        write!(self.output, "\n{}", session.board())?;

        let message = match (session.last_outcome(), session.last_standing()) {
            (Some(Outcome::Draw), _) => "Board is full!".to_string(),
            (_, Some(Standing::Won)) => "You win!".to_string(),
            (_, Some(Standing::Lost)) => format!("{} wins!", session.peer_name()),
            _ => "Game over.".to_string(),
        };
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn show_stats(&mut self, title: &str, stats: StatsSnapshot) -> Result<()> {
        writeln!(
            self.output,
            "{}: games {}, wins {}, losses {}, ties {}",
            title, stats.games, stats.wins, stats.losses, stats.ties
        )?;
        Ok(())
    }
}

/// Parse `row col` (each 0-2) or a keypad square `1`-`9`
pub fn parse_move(line: &str) -> Option<(usize, usize)> {
    let parts: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .collect();

    match parts.as_slice() {
        [square] => {
            let n: usize = square.parse().ok()?;
            (1..=9).contains(&n).then(|| ((n - 1) / 3, (n - 1) % 3))
        }
        [row, col] => {
            let row: usize = row.parse().ok()?;
            let col: usize = col.parse().ok()?;
            (row < 3 && col < 3).then_some((row, col))
        }
        _ => None,
    }
}
