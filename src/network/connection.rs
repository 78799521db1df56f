//! Connection Handler
//!
//! TCP channel to the single peer of this process.

use std::io::{self, BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::time::Duration;

use crate::config::Config;
use crate::error::{GameError, Result};
use crate::protocol::{read_message, write_message, Message};

use super::Channel;

/// TCP connection to the peer
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,

    /// Largest payload accepted from the peer
    max_payload_size: u32,

    /// Set once the stream has been shut down
    closed: bool,
}

impl Connection {
    /// Wrap an established stream
    ///
    /// Sets up buffered I/O and applies the configured socket options
    pub fn new(stream: TcpStream, config: &Config) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(config.nodelay)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        let mut connection = Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
            max_payload_size: config.max_payload_size,
            closed: false,
        };
        connection.set_timeouts(config.read_timeout_ms, config.write_timeout_ms)?;

        tracing::debug!("Connection established with {}", connection.peer_addr);
        Ok(connection)
    }

    /// Connect to a listening peer (initiator side)
    pub fn connect(config: &Config) -> Result<Self> {
        tracing::debug!("Connecting to {}", config.addr);

        let stream = TcpStream::connect(&config.addr).map_err(|e| {
            GameError::ConnectionFailure(format!("could not connect to {}: {}", config.addr, e))
        })?;

        Self::new(stream, config)
    }

    /// Bind, listen, and accept exactly one peer (acceptor side)
    ///
    /// The listener is dropped once the peer is accepted, so no second
    /// peer can ever join this process.
    pub fn accept(config: &Config) -> Result<Self> {
        let listener = TcpListener::bind(&config.addr).map_err(|e| {
            GameError::ConnectionFailure(format!("could not listen on {}: {}", config.addr, e))
        })?;

        Self::accept_from(&listener, config)
    }

    /// Accept one peer from an existing listener
    pub fn accept_from(listener: &TcpListener, config: &Config) -> Result<Self> {
        if let Ok(local) = listener.local_addr() {
            tracing::debug!("Waiting for a peer on {}", local);
        }

        let (stream, _) = listener
            .accept()
            .map_err(|e| GameError::ConnectionFailure(format!("accept failed: {}", e)))?;

        Self::new(stream, config)
    }

    /// Configure connection timeouts, 0 meaning none
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_timeout = (read_ms > 0).then(|| Duration::from_millis(read_ms));
        let write_timeout = (write_ms > 0).then(|| Duration::from_millis(write_ms));

        self.reader.get_ref().set_read_timeout(read_timeout)?;
        self.writer.get_ref().set_write_timeout(write_timeout)?;

        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(GameError::ConnectionFailure(
                "connection already closed".to_string(),
            ));
        }
        Ok(())
    }

    /// Translate socket errors into what the session reports
    fn classify(&self, error: GameError) -> GameError {
        let io_err = match error {
            GameError::Io(io_err) => io_err,
            other => return other,
        };

        match io_err.kind() {
            io::ErrorKind::UnexpectedEof
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe => {
                tracing::debug!("Peer {} disconnected: {}", self.peer_addr, io_err);
                GameError::ConnectionFailure("peer closed the connection".to_string())
            }
            // Windows reports TimedOut instead of WouldBlock
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
                tracing::debug!("Timed out waiting on {}", self.peer_addr);
                GameError::ConnectionFailure("timed out waiting for peer".to_string())
            }
            _ => {
                tracing::warn!("I/O error with {}: {}", self.peer_addr, io_err);
                GameError::ConnectionFailure(io_err.to_string())
            }
        }
    }
}

impl Channel for Connection {
    fn send(&mut self, message: &Message) -> Result<()> {
        self.ensure_open()?;
        tracing::trace!("Sending to {}: {:?}", self.peer_addr, message);
        write_message(&mut self.writer, message).map_err(|e| self.classify(e))
    }

    fn recv(&mut self) -> Result<Message> {
        self.ensure_open()?;
        let message =
            read_message(&mut self.reader, self.max_payload_size).map_err(|e| self.classify(e))?;
        tracing::trace!("Received from {}: {:?}", self.peer_addr, message);
        Ok(message)
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        let _ = self.writer.flush();
        let _ = self.writer.get_ref().shutdown(Shutdown::Both);
        tracing::debug!("Connection to {} closed", self.peer_addr);
    }

    fn peer(&self) -> &str {
        &self.peer_addr
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}
