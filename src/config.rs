//! Configuration for tictacwire
//!
//! Centralized configuration with sensible defaults.

use crate::error::{GameError, Result};
use crate::protocol::{validate_username, MAX_PAYLOAD_SIZE};

/// Main configuration for one side of a match
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Address to listen on (host) or connect to (joiner), as `host:port`
    pub addr: String,

    /// Disable Nagle's algorithm; every frame is tiny and latency-bound
    pub nodelay: bool,

    /// Read timeout (milliseconds), 0 blocks forever
    pub read_timeout_ms: u64,

    /// Write timeout (milliseconds), 0 blocks forever
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Largest frame payload accepted from the peer (in bytes)
    pub max_payload_size: u32,

    // -------------------------------------------------------------------------
    // Player Configuration
    // -------------------------------------------------------------------------
    /// Name the initiator announces to its peer
    pub username: String,

    /// Label used for the peer when it never announces a name
    pub peer_display_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:5000".to_string(),
            nodelay: true,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            max_payload_size: 1024,
            username: "Player 1".to_string(),
            peer_display_name: "Player 2".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the config before any socket is opened
    pub fn validate(&self) -> Result<()> {
        if self.addr.trim().is_empty() {
            return Err(GameError::Config("address must not be empty".to_string()));
        }
        if self.max_payload_size == 0 {
            return Err(GameError::Config(
                "max_payload_size must be greater than zero".to_string(),
            ));
        }
        if self.max_payload_size > MAX_PAYLOAD_SIZE {
            return Err(GameError::Config(format!(
                "max_payload_size {} exceeds the {} byte frame limit",
                self.max_payload_size, MAX_PAYLOAD_SIZE
            )));
        }
        validate_username(&self.username)?;
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the listen/connect address
    pub fn addr(mut self, addr: impl Into<String>) -> Self {
        self.config.addr = addr.into();
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn nodelay(mut self, enabled: bool) -> Self {
        self.config.nodelay = enabled;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the largest accepted frame payload (in bytes)
    pub fn max_payload_size(mut self, size: u32) -> Self {
        self.config.max_payload_size = size;
        self
    }

    /// Set the name announced to the peer
    pub fn username(mut self, name: impl Into<String>) -> Self {
        self.config.username = name.into();
        self
    }

    /// Set the fallback label for the peer
    pub fn peer_display_name(mut self, name: impl Into<String>) -> Self {
        self.config.peer_display_name = name.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
