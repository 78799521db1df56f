//! Codec Tests
//!
//! Tests for message framing, encoding and decoding.

use std::io::Cursor;

use tictacwire::protocol::{
    decode_message, encode_message, read_message, validate_username, write_message, Message,
    MessageType, HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
use tictacwire::{GameError, StatsSnapshot};

// =============================================================================
// Helper Functions
// =============================================================================

/// Build a frame by hand with a correct checksum
fn raw_frame(tag: u8, payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![tag];
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(&crc32fast::hash(payload).to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}

fn assert_malformed(result: tictacwire::Result<Message>) {
    match result {
        Err(GameError::MalformedMessage(_)) => {}
        other => panic!("Expected MalformedMessage, got {:?}", other),
    }
}

fn all_messages() -> Vec<Message> {
    vec![
        Message::Username("Taiki".to_string()),
        Message::MoveMade { row: 2, col: 0 },
        Message::RematchRequest,
        Message::FinalStats(StatsSnapshot {
            games: 4,
            wins: 2,
            losses: 1,
            ties: 1,
        }),
    ]
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_every_variant_round_trips() {
    for message in all_messages() {
        let encoded = encode_message(&message);
        let decoded = decode_message(&encoded).unwrap();
        assert_eq!(decoded, message);
    }
}

#[test]
fn test_every_move_round_trips() {
    for row in 0..3 {
        for col in 0..3 {
            let message = Message::MoveMade { row, col };
            assert_eq!(decode_message(&encode_message(&message)).unwrap(), message);
        }
    }
}

#[test]
fn test_unicode_username_round_trips() {
    let message = Message::Username("Håkon 🎲".to_string());
    assert_eq!(decode_message(&encode_message(&message)).unwrap(), message);
}

// =============================================================================
// Frame Layout Tests
// =============================================================================

#[test]
fn test_frame_layout() {
    let encoded = encode_message(&Message::MoveMade { row: 1, col: 2 });

    assert_eq!(encoded.len(), HEADER_SIZE + 2);
    assert_eq!(encoded[0], MessageType::MoveMade as u8);
    assert_eq!(&encoded[1..5], &2u32.to_be_bytes());
    assert_eq!(&encoded[5..9], &crc32fast::hash(b"12").to_be_bytes());
    assert_eq!(&encoded[HEADER_SIZE..], b"12");
}

#[test]
fn test_payload_keeps_text_forms() {
    let cases = [
        (Message::Username("bob".to_string()), "bob"),
        (Message::MoveMade { row: 0, col: 2 }, "02"),
        (Message::RematchRequest, "play_again"),
        (
            Message::FinalStats(StatsSnapshot {
                games: 4,
                wins: 2,
                losses: 1,
                ties: 1,
            }),
            "q 4 2 1 1",
        ),
    ];

    for (message, text) in cases {
        assert_eq!(message.payload_text(), text);
        assert_eq!(&encode_message(&message)[HEADER_SIZE..], text.as_bytes());
    }
}

#[test]
fn test_tag_decides_kind_not_payload_shape() {
    // A username that looks like a move is still a username
    let frame = raw_frame(MessageType::Username as u8, b"12");
    assert_eq!(
        decode_message(&frame).unwrap(),
        Message::Username("12".to_string())
    );

    // ...and one that looks like a rematch request
    let frame = raw_frame(MessageType::Username as u8, b"play_again");
    assert_eq!(
        decode_message(&frame).unwrap(),
        Message::Username("play_again".to_string())
    );
}

#[test]
fn test_message_type_from_byte() {
    for message in all_messages() {
        let tag = message.message_type();
        assert_eq!(MessageType::from_byte(tag as u8), Some(tag));
    }
    assert_eq!(MessageType::from_byte(0x00), None);
    assert_eq!(MessageType::from_byte(0x05), None);
}

// =============================================================================
// Malformed Input Tests
// =============================================================================

#[test]
fn test_decode_incomplete_header() {
    assert_malformed(decode_message(&[0x02, 0x00, 0x00]));
    assert_malformed(decode_message(&[]));
}

#[test]
fn test_decode_incomplete_payload() {
    let encoded = encode_message(&Message::RematchRequest);
    assert_malformed(decode_message(&encoded[..encoded.len() - 1]));
}

#[test]
fn test_decode_trailing_bytes() {
    let mut encoded = encode_message(&Message::RematchRequest);
    encoded.push(b'x');
    assert_malformed(decode_message(&encoded));
}

#[test]
fn test_decode_two_coalesced_frames_is_rejected() {
    let mut bytes = encode_message(&Message::MoveMade { row: 0, col: 0 });
    bytes.extend(encode_message(&Message::MoveMade { row: 1, col: 1 }));
    assert_malformed(decode_message(&bytes));
}

#[test]
fn test_decode_unknown_tag() {
    assert_malformed(decode_message(&raw_frame(0x7f, b"12")));
}

#[test]
fn test_decode_checksum_mismatch() {
    let mut encoded = encode_message(&Message::MoveMade { row: 1, col: 1 });
    let last = encoded.len() - 1;
    encoded[last] = b'2';
    assert_malformed(decode_message(&encoded));
}

#[test]
fn test_decode_payload_too_large() {
    let mut frame = vec![MessageType::Username as u8];
    frame.extend_from_slice(&(MAX_PAYLOAD_SIZE + 1).to_be_bytes());
    frame.extend_from_slice(&0u32.to_be_bytes());
    assert_malformed(decode_message(&frame));
}

#[test]
fn test_decode_bad_moves() {
    for payload in [&b"33"[..], b"1", b"123", b"a1", b"1 2", b"", b"-1"] {
        assert_malformed(decode_message(&raw_frame(MessageType::MoveMade as u8, payload)));
    }
}

#[test]
fn test_decode_bad_rematch() {
    for payload in [&b"play again"[..], b"PLAY_AGAIN", b"", b"play_again "] {
        assert_malformed(decode_message(&raw_frame(
            MessageType::RematchRequest as u8,
            payload,
        )));
    }
}

#[test]
fn test_decode_bad_final_stats() {
    let payloads: [&[u8]; 9] = [
        b"q 1 2 3",
        b"q 1 2 3 4 5",
        b"x 1 2 3 4",
        b"q 1 two 3 4",
        b"q -1 0 0 0",
        b"q  1 2 3 4",
        b"q +4 +2 +1 +1",
        b"q 4 2 1 +1",
        b"q 4294967296 0 0 0",
    ];
    for payload in payloads {
        assert_malformed(decode_message(&raw_frame(MessageType::FinalStats as u8, payload)));
    }
}

#[test]
fn test_decode_bad_usernames() {
    let long = "x".repeat(65);
    let payloads: [&[u8]; 4] = [b"", b"   ", b"bad\nname", long.as_bytes()];
    for payload in payloads {
        assert_malformed(decode_message(&raw_frame(MessageType::Username as u8, payload)));
    }
}

#[test]
fn test_decode_invalid_utf8() {
    assert_malformed(decode_message(&raw_frame(
        MessageType::Username as u8,
        &[0xff, 0xfe],
    )));
}

#[test]
fn test_validate_username() {
    assert!(validate_username("Player 1").is_ok());
    assert!(validate_username(&"y".repeat(64)).is_ok());
    assert!(matches!(
        validate_username("\u{7}beep"),
        Err(GameError::InvalidUsername(_))
    ));
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_write_then_read_stream() {
    let mut buffer = Vec::new();
    for message in all_messages() {
        write_message(&mut buffer, &message).unwrap();
    }

    let mut cursor = Cursor::new(buffer);
    for message in all_messages() {
        assert_eq!(read_message(&mut cursor, 1024).unwrap(), message);
    }
}

#[test]
fn test_read_stream_eof() {
    let mut cursor = Cursor::new(Vec::<u8>::new());
    match read_message(&mut cursor, 1024) {
        Err(GameError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
        other => panic!("Expected EOF, got {:?}", other),
    }
}

#[test]
fn test_read_stream_truncated_payload() {
    let encoded = encode_message(&Message::Username("someone".to_string()));
    let mut cursor = Cursor::new(encoded[..encoded.len() - 3].to_vec());
    assert!(matches!(
        read_message(&mut cursor, 1024),
        Err(GameError::Io(_))
    ));
}

#[test]
fn test_read_stream_respects_payload_limit() {
    let encoded = encode_message(&Message::Username("abcdefghij".to_string()));

    let mut cursor = Cursor::new(encoded.clone());
    assert_malformed(read_message(&mut cursor, 4));

    let mut cursor = Cursor::new(encoded);
    assert!(read_message(&mut cursor, 10).is_ok());
}

/// A reader that hands out one byte per call, like a badly fragmented socket
struct Trickle(Cursor<Vec<u8>>);

impl std::io::Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let limit = buf.len().min(1);
        self.0.read(&mut buf[..limit])
    }
}

#[test]
fn test_read_stream_survives_fragmentation() {
    let mut buffer = Vec::new();
    write_message(&mut buffer, &Message::MoveMade { row: 2, col: 1 }).unwrap();
    write_message(&mut buffer, &Message::RematchRequest).unwrap();

    let mut reader = Trickle(Cursor::new(buffer));
    assert_eq!(
        read_message(&mut reader, 1024).unwrap(),
        Message::MoveMade { row: 2, col: 1 }
    );
    assert_eq!(read_message(&mut reader, 1024).unwrap(), Message::RematchRequest);
}
