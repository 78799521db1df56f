//! Message definitions
//!
//! The four logical messages exchanged between the two peers.

use crate::error::{GameError, Result};
use crate::stats::StatsSnapshot;

/// Longest username accepted (in bytes)
pub const MAX_USERNAME_LEN: usize = 64;

/// Literal payload of a rematch request
pub const REMATCH_TEXT: &str = "play_again";

/// Message tags carried in the frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageType {
    Username = 0x01,
    MoveMade = 0x02,
    RematchRequest = 0x03,
    FinalStats = 0x04,
}

impl MessageType {
    /// Map a header byte back to a tag
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(MessageType::Username),
            0x02 => Some(MessageType::MoveMade),
            0x03 => Some(MessageType::RematchRequest),
            0x04 => Some(MessageType::FinalStats),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageType::Username => "username",
            MessageType::MoveMade => "move",
            MessageType::RematchRequest => "rematch request",
            MessageType::FinalStats => "final stats",
        }
    }
}

/// A message exchanged between peers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Sent once, by the initiator, before the first move
    Username(String),

    /// The sender just placed its mark at (row, col)
    MoveMade { row: usize, col: usize },

    /// The deciding side wants another match
    RematchRequest,

    /// The deciding side is leaving; these are its own tallies
    FinalStats(StatsSnapshot),
}

impl Message {
    /// Get the message tag
    pub fn message_type(&self) -> MessageType {
        match self {
            Message::Username(_) => MessageType::Username,
            Message::MoveMade { .. } => MessageType::MoveMade,
            Message::RematchRequest => MessageType::RematchRequest,
            Message::FinalStats(_) => MessageType::FinalStats,
        }
    }

    /// The text form carried inside the frame
    ///
    /// ```text
    /// Username        <name>
    /// MoveMade        RC              e.g. "12"
    /// RematchRequest  play_again
    /// FinalStats      q G W L T       e.g. "q 4 2 1 1"
    /// ```
    pub fn payload_text(&self) -> String {
        match self {
            Message::Username(name) => name.clone(),
            Message::MoveMade { row, col } => format!("{}{}", row, col),
            Message::RematchRequest => REMATCH_TEXT.to_string(),
            Message::FinalStats(stats) => format!(
                "q {} {} {} {}",
                stats.games, stats.wins, stats.losses, stats.ties
            ),
        }
    }
}

/// Check a username against the wire grammar
///
/// Non-empty, at most [`MAX_USERNAME_LEN`] bytes, no control characters.
pub fn validate_username(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(GameError::InvalidUsername("username is empty".to_string()));
    }
    if name.len() > MAX_USERNAME_LEN {
        return Err(GameError::InvalidUsername(format!(
            "username is {} bytes (max {})",
            name.len(),
            MAX_USERNAME_LEN
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(GameError::InvalidUsername(
            "username contains control characters".to_string(),
        ));
    }
    Ok(())
}
