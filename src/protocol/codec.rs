//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬─────────────────────────┐
//! │ Tag (1)  │ Len (4)  │ CRC (4)  │      Payload (text)     │
//! └──────────┴──────────┴──────────┴─────────────────────────┘
//! ```
//!
//! Len and CRC are big-endian u32. CRC is crc32 over the payload bytes.
//!
//! ### Payload by Tag
//! - USERNAME: the name, UTF-8, no control characters
//! - MOVE:     two digits `RC`, each `0`-`2`
//! - REMATCH:  `play_again`
//! - STATS:    `q <games> <wins> <losses> <ties>`

use std::io::{Read, Write};

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{GameError, Result};
use crate::stats::StatsSnapshot;

use super::message::{validate_username, REMATCH_TEXT};
use super::{Message, MessageType};

/// Header size: 1 byte tag + 4 bytes length + 4 bytes checksum
pub const HEADER_SIZE: usize = 9;

/// Hard ceiling on payload size (64 KB)
pub const MAX_PAYLOAD_SIZE: u32 = 64 * 1024;

/// Parsed frame header
#[derive(Debug, Clone, Copy)]
struct FrameHeader {
    tag: u8,
    payload_len: usize,
    checksum: u32,
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode a message to a complete frame
///
/// Format: tag (1) + payload_len (4) + crc (4) + payload
pub fn encode_message(message: &Message) -> Vec<u8> {
    let payload = message.payload_text();
    let payload = payload.as_bytes();

    let mut frame = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    frame.put_u8(message.message_type() as u8);
    frame.put_u32(payload.len() as u32);
    frame.put_u32(crc32fast::hash(payload));
    frame.put_slice(payload);

    frame.to_vec()
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a message from exactly one frame
///
/// Missing bytes and trailing bytes are both malformed.
pub fn decode_message(bytes: &[u8]) -> Result<Message> {
    if bytes.len() < HEADER_SIZE {
        return Err(GameError::MalformedMessage(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let header = parse_header(&bytes[..HEADER_SIZE], MAX_PAYLOAD_SIZE)?;

    let total_len = HEADER_SIZE + header.payload_len;
    if bytes.len() < total_len {
        return Err(GameError::MalformedMessage(format!(
            "Incomplete payload: expected {} bytes, got {}",
            total_len,
            bytes.len()
        )));
    }
    if bytes.len() > total_len {
        return Err(GameError::MalformedMessage(format!(
            "{} trailing bytes after frame",
            bytes.len() - total_len
        )));
    }

    decode_frame(header, &bytes[HEADER_SIZE..total_len])
}

/// Split the fixed-size header into its fields
fn parse_header(mut header: &[u8], max_payload: u32) -> Result<FrameHeader> {
    let tag = header.get_u8();
    let payload_len = header.get_u32();
    let checksum = header.get_u32();

    if payload_len > max_payload {
        return Err(GameError::MalformedMessage(format!(
            "Payload too large: {} bytes (max {})",
            payload_len, max_payload
        )));
    }

    Ok(FrameHeader {
        tag,
        payload_len: payload_len as usize,
        checksum,
    })
}

/// Verify the checksum and parse the payload for the header's tag
fn decode_frame(header: FrameHeader, payload: &[u8]) -> Result<Message> {
    let actual = crc32fast::hash(payload);
    if actual != header.checksum {
        return Err(GameError::MalformedMessage(format!(
            "Checksum mismatch: header 0x{:08x}, payload 0x{:08x}",
            header.checksum, actual
        )));
    }

    let message_type = MessageType::from_byte(header.tag).ok_or_else(|| {
        GameError::MalformedMessage(format!("Unknown message tag: 0x{:02x}", header.tag))
    })?;

    let text = std::str::from_utf8(payload).map_err(|e| {
        GameError::MalformedMessage(format!("{} payload is not UTF-8: {}", message_type.name(), e))
    })?;

    match message_type {
        MessageType::Username => decode_username(text),
        MessageType::MoveMade => decode_move(text),
        MessageType::RematchRequest => decode_rematch(text),
        MessageType::FinalStats => decode_final_stats(text),
    }
}

/// Decode USERNAME payload
fn decode_username(text: &str) -> Result<Message> {
    validate_username(text).map_err(|e| GameError::MalformedMessage(e.to_string()))?;
    Ok(Message::Username(text.to_string()))
}

/// Decode MOVE payload
fn decode_move(text: &str) -> Result<Message> {
    match text.as_bytes() {
        [row @ b'0'..=b'2', col @ b'0'..=b'2'] => Ok(Message::MoveMade {
            row: (row - b'0') as usize,
            col: (col - b'0') as usize,
        }),
        _ => Err(GameError::MalformedMessage(format!(
            "move must be two digits 0-2, got {:?}",
            text
        ))),
    }
}

/// Decode REMATCH payload
fn decode_rematch(text: &str) -> Result<Message> {
    if text != REMATCH_TEXT {
        return Err(GameError::MalformedMessage(format!(
            "rematch request must be {:?}, got {:?}",
            REMATCH_TEXT, text
        )));
    }
    Ok(Message::RematchRequest)
}

/// Decode STATS payload
fn decode_final_stats(text: &str) -> Result<Message> {
    let fields: Vec<&str> = text.split(' ').collect();

    let counts = match fields.as_slice() {
        ["q", counts @ ..] if counts.len() == 4 => counts,
        _ => {
            return Err(GameError::MalformedMessage(format!(
                "final stats must be \"q <games> <wins> <losses> <ties>\", got {:?}",
                text
            )))
        }
    };

    let mut values = [0u32; 4];
    for (value, field) in values.iter_mut().zip(counts) {
        // u32::from_str also takes a leading '+'
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GameError::MalformedMessage(format!(
                "final stats field {:?} is not a count",
                field
            )));
        }
        *value = field.parse().map_err(|_| {
            GameError::MalformedMessage(format!("final stats field {:?} is not a count", field))
        })?;
    }

    Ok(Message::FinalStats(StatsSnapshot {
        games: values[0],
        wins: values[1],
        losses: values[2],
        ties: values[3],
    }))
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read a complete message from a stream
///
/// Blocks until the whole frame is received or an error occurs. Payloads
/// above `max_payload` are rejected before they are read.
pub fn read_message<R: Read>(reader: &mut R, max_payload: u32) -> Result<Message> {
    let mut header_bytes = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header_bytes)?;

    let header = parse_header(&header_bytes, max_payload.min(MAX_PAYLOAD_SIZE))?;

    let mut payload = vec![0u8; header.payload_len];
    if header.payload_len > 0 {
        reader.read_exact(&mut payload)?;
    }

    decode_frame(header, &payload)
}

/// Write a message to a stream
pub fn write_message<W: Write>(writer: &mut W, message: &Message) -> Result<()> {
    let bytes = encode_message(message);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
