//! Channel trait

use crate::error::Result;
use crate::protocol::Message;

/// An established, ordered, reliable link to the peer
///
/// `recv` blocks until a whole message arrives or the link breaks. Once
/// `close` has been called every further `send`/`recv` fails.
pub trait Channel {
    /// Send one message
    fn send(&mut self, message: &Message) -> Result<()>;

    /// Block until the next message arrives
    fn recv(&mut self) -> Result<Message>;

    /// Tear the link down; idempotent
    fn close(&mut self);

    /// Human-readable peer description for logs
    fn peer(&self) -> &str;
}

impl<C: Channel + ?Sized> Channel for Box<C> {
    fn send(&mut self, message: &Message) -> Result<()> {
        (**self).send(message)
    }

    fn recv(&mut self) -> Result<Message> {
        (**self).recv()
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn peer(&self) -> &str {
        (**self).peer()
    }
}
