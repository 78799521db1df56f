//! Error types for tictacwire
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using GameError
pub type Result<T> = std::result::Result<T, GameError>;

/// Unified error type for tictacwire operations
#[derive(Debug, Error)]
pub enum GameError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Connection failure: {0}")]
    ConnectionFailure(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    #[error("Unexpected {received} message while {phase}")]
    UnexpectedMessage {
        phase: &'static str,
        received: &'static str,
    },

    // -------------------------------------------------------------------------
    // Game Errors
    // -------------------------------------------------------------------------
    #[error("Illegal move at ({row}, {col})")]
    IllegalMove { row: usize, col: usize },

    #[error("Cannot {operation} while {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: &'static str,
    },

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Session is closed")]
    SessionClosed,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GameError {
    /// Whether the error tore the session down.
    ///
    /// Illegal moves, wrong-phase calls and bad usernames leave the session
    /// untouched; everything else means the channel is gone.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            GameError::IllegalMove { .. }
                | GameError::InvalidPhase { .. }
                | GameError::InvalidUsername(_)
                | GameError::Config(_)
        )
    }
}
