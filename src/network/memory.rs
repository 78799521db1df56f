//! In-process channel pair
//!
//! Two endpoints joined by crossbeam channels. Every message still goes
//! through the frame codec, so a match over a `MemoryChannel` behaves like
//! one over TCP minus the sockets.

use crossbeam::channel::{unbounded, Receiver, Sender};

use crate::error::{GameError, Result};
use crate::protocol::{decode_message, encode_message, Message};

use super::Channel;

/// One end of an in-process link
pub struct MemoryChannel {
    /// Frames to the peer; None once closed
    outgoing: Option<Sender<Vec<u8>>>,

    /// Frames from the peer; None once closed
    incoming: Option<Receiver<Vec<u8>>>,

    /// Label of the other end, for logs
    peer_name: String,
}

impl MemoryChannel {
    /// Create two connected endpoints
    pub fn pair() -> (MemoryChannel, MemoryChannel) {
        let (a_tx, b_rx) = unbounded();
        let (b_tx, a_rx) = unbounded();

        let a = MemoryChannel {
            outgoing: Some(a_tx),
            incoming: Some(a_rx),
            peer_name: "memory:b".to_string(),
        };
        let b = MemoryChannel {
            outgoing: Some(b_tx),
            incoming: Some(b_rx),
            peer_name: "memory:a".to_string(),
        };
        (a, b)
    }

    /// Send pre-encoded bytes as a single frame
    ///
    /// The peer decodes them like any other frame, which makes this the
    /// way to feed it corrupt or hand-built input.
    pub fn send_frame(&mut self, frame: Vec<u8>) -> Result<()> {
        let outgoing = self.outgoing.as_ref().ok_or_else(closed)?;
        outgoing
            .send(frame)
            .map_err(|_| GameError::ConnectionFailure("peer closed the connection".to_string()))
    }

    /// Whether `close` has been called on this end
    pub fn is_closed(&self) -> bool {
        self.outgoing.is_none()
    }
}

fn closed() -> GameError {
    GameError::ConnectionFailure("connection already closed".to_string())
}

impl Channel for MemoryChannel {
    fn send(&mut self, message: &Message) -> Result<()> {
        tracing::trace!("Sending to {}: {:?}", self.peer_name, message);
        self.send_frame(encode_message(message))
    }

    fn recv(&mut self) -> Result<Message> {
        let incoming = self.incoming.as_ref().ok_or_else(closed)?;
        let frame = incoming
            .recv()
            .map_err(|_| GameError::ConnectionFailure("peer closed the connection".to_string()))?;
        let message = decode_message(&frame)?;
        tracing::trace!("Received from {}: {:?}", self.peer_name, message);
        Ok(message)
    }

    fn close(&mut self) {
        self.outgoing = None;
        self.incoming = None;
    }

    fn peer(&self) -> &str {
        &self.peer_name
    }
}
