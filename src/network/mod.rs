//! Network Module
//!
//! The bidirectional channel a match runs over.
//!
//! ## Architecture
//! - `Channel`: what a session needs from a transport (send, blocking recv, close)
//! - `Connection`: TCP, one peer per process, buffered reader/writer halves
//! - `MemoryChannel`: in-process pair over crossbeam channels, same framing
//!
//! Connection setup (bind/listen/accept or connect) happens before a
//! session exists; the session only ever sees an established channel.

mod channel;
mod connection;
mod memory;

pub use channel::Channel;
pub use connection::Connection;
pub use memory::MemoryChannel;
