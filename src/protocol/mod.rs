//! Protocol Module
//!
//! Defines the wire protocol between the two peers.
//!
//! ## Protocol Format (V1 - Tagged Text Frames)
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬─────────────────────────┐
//! │ Tag (1)  │ Len (4)  │ CRC (4)  │      Payload (text)     │
//! └──────────┴──────────┴──────────┴─────────────────────────┘
//! ```
//!
//! Every message is exactly one frame, so a read never returns half a
//! message or two messages glued together. The payload keeps the plain
//! text forms (`12`, `play_again`, `q 4 2 1 1`), but the kind is decided
//! by the tag alone.
//!
//! ### Tags
//! - 0x01: USERNAME - Payload: display name
//! - 0x02: MOVE     - Payload: `RC`
//! - 0x03: REMATCH  - Payload: `play_again`
//! - 0x04: STATS    - Payload: `q G W L T`

mod message;
mod codec;

pub use message::{validate_username, Message, MessageType, MAX_USERNAME_LEN, REMATCH_TEXT};
pub use codec::{
    decode_message, encode_message, read_message, write_message, HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
