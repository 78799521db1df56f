//! Channel Tests
//!
//! Tests verify:
//! - TCP connect/accept over loopback
//! - Messages arrive whole and in order
//! - Peer disconnects surface as ConnectionFailure
//! - Oversized frames are rejected against the configured limit
//! - MemoryChannel pair behaves like the TCP channel

use std::io::Write;
use std::net::{TcpListener, TcpStream};
use std::thread;

use tictacwire::network::{Channel, Connection, MemoryChannel};
use tictacwire::protocol::{encode_message, Message};
use tictacwire::{Config, GameError, StatsSnapshot};

// =============================================================================
// Helper Functions
// =============================================================================

/// Connected (initiator, acceptor) TCP pair on an ephemeral port
fn tcp_pair(config: Config) -> (Connection, Connection) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let accept_config = config.clone();
    let acceptor = thread::spawn(move || Connection::accept_from(&listener, &accept_config).unwrap());

    let connect_config = Config { addr, ..config };
    let initiator = Connection::connect(&connect_config).unwrap();
    (initiator, acceptor.join().unwrap())
}

fn is_connection_failure<T>(result: &tictacwire::Result<T>) -> bool {
    matches!(result, Err(GameError::ConnectionFailure(_)))
}

// =============================================================================
// TCP Tests
// =============================================================================

#[test]
fn test_tcp_messages_in_order() {
    let (mut initiator, mut acceptor) = tcp_pair(Config::default());

    let messages = vec![
        Message::Username("Alice".to_string()),
        Message::MoveMade { row: 0, col: 0 },
        Message::MoveMade { row: 2, col: 1 },
        Message::RematchRequest,
        Message::FinalStats(StatsSnapshot {
            games: 3,
            wins: 1,
            losses: 1,
            ties: 1,
        }),
    ];

    // Written back-to-back so the stream is free to coalesce them
    for message in &messages {
        initiator.send(message).unwrap();
    }
    for message in &messages {
        assert_eq!(&acceptor.recv().unwrap(), message);
    }

    acceptor.send(&Message::MoveMade { row: 1, col: 1 }).unwrap();
    assert_eq!(
        initiator.recv().unwrap(),
        Message::MoveMade { row: 1, col: 1 }
    );
}

#[test]
fn test_tcp_peer_addr_is_known() {
    let (initiator, acceptor) = tcp_pair(Config::default());
    assert!(initiator.peer_addr().starts_with("127.0.0.1:"));
    assert!(acceptor.peer().starts_with("127.0.0.1:"));
}

#[test]
fn test_tcp_peer_close_is_connection_failure() {
    let (mut initiator, mut acceptor) = tcp_pair(Config::default());

    initiator.close();
    let result = acceptor.recv();
    assert!(is_connection_failure(&result), "got {:?}", result);
}

#[test]
fn test_tcp_closed_connection_rejects_io() {
    let (mut initiator, _acceptor) = tcp_pair(Config::default());
    initiator.close();
    initiator.close();

    assert!(is_connection_failure(&initiator.send(&Message::RematchRequest)));
    assert!(is_connection_failure(&initiator.recv()));
}

#[test]
fn test_tcp_oversized_frame_is_malformed() {
    let config = Config::builder().max_payload_size(8).build();
    let (mut initiator, mut acceptor) = tcp_pair(config);

    initiator
        .send(&Message::Username("a name longer than eight".to_string()))
        .unwrap();
    assert!(matches!(
        acceptor.recv(),
        Err(GameError::MalformedMessage(_))
    ));
}

#[test]
fn test_tcp_read_timeout_is_connection_failure() {
    let config = Config::builder().read_timeout_ms(50).build();
    let (_initiator, mut acceptor) = tcp_pair(config);

    let result = acceptor.recv();
    assert!(is_connection_failure(&result), "got {:?}", result);
}

#[test]
fn test_tcp_fragmented_writes_arrive_whole() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let writer = thread::spawn(move || {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.set_nodelay(true).unwrap();
        for byte in encode_message(&Message::Username("Slow Sam".to_string())) {
            stream.write_all(&[byte]).unwrap();
            stream.flush().unwrap();
        }
    });

    let mut acceptor = Connection::accept_from(&listener, &Config::default()).unwrap();
    assert_eq!(
        acceptor.recv().unwrap(),
        Message::Username("Slow Sam".to_string())
    );
    writer.join().unwrap();
}

#[test]
fn test_connect_to_nothing_is_connection_failure() {
    // Bind then drop to get a port that is very likely closed
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().to_string()
    };

    let config = Config::builder().addr(addr).build();
    assert!(is_connection_failure(&Connection::connect(&config)));
}

#[test]
fn test_accept_on_bad_address_is_connection_failure() {
    let config = Config::builder().addr("not-an-address").build();
    assert!(is_connection_failure(&Connection::accept(&config)));
}

// =============================================================================
// MemoryChannel Tests
// =============================================================================

#[test]
fn test_memory_pair_round_trip() {
    let (mut a, mut b) = MemoryChannel::pair();

    a.send(&Message::MoveMade { row: 1, col: 2 }).unwrap();
    b.send(&Message::RematchRequest).unwrap();

    assert_eq!(b.recv().unwrap(), Message::MoveMade { row: 1, col: 2 });
    assert_eq!(a.recv().unwrap(), Message::RematchRequest);
}

#[test]
fn test_memory_close_delivers_pending_then_fails() {
    let (mut a, mut b) = MemoryChannel::pair();

    a.send(&Message::RematchRequest).unwrap();
    a.close();
    assert!(a.is_closed());

    assert_eq!(b.recv().unwrap(), Message::RematchRequest);
    assert!(is_connection_failure(&b.recv()));
    assert!(is_connection_failure(&b.send(&Message::RematchRequest)));
    assert!(is_connection_failure(&a.recv()));
}

#[test]
fn test_memory_corrupt_frame_is_malformed() {
    let (mut a, mut b) = MemoryChannel::pair();
    a.send_frame(vec![0x02, 0, 0, 0, 2, 0, 0, 0, 0, b'1', b'1']).unwrap();

    assert!(matches!(b.recv(), Err(GameError::MalformedMessage(_))));
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_defaults_validate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.max_payload_size, 1024);
    assert_eq!(config.read_timeout_ms, 0);
}

#[test]
fn test_config_validation_failures() {
    let cases = [
        Config::builder().addr("  ").build(),
        Config::builder().max_payload_size(0).build(),
        Config::builder().max_payload_size(u32::MAX).build(),
        Config::builder().username("").build(),
    ];
    for config in cases {
        assert!(config.validate().is_err(), "{:?} should be invalid", config);
    }
}
