//! tictacwire Host Binary
//!
//! Listens for one peer and plays O against it in the terminal.

use std::io;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tictacwire::console::Console;
use tictacwire::network::Connection;
use tictacwire::{Config, Role};
use tracing_subscriber::{fmt, EnvFilter};

/// tictacwire Host
#[derive(Parser, Debug)]
#[command(name = "tictacwire-host")]
#[command(about = "Wait for a peer to connect, then play tic-tac-toe as O")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    listen: String,

    /// Label shown for the peer until it announces its username
    #[arg(long, default_value = "Player 1")]
    peer_name: String,

    /// Keep retrying if the address cannot be bound or accept fails
    #[arg(long)]
    retry: bool,

    /// Read timeout in milliseconds (0 waits forever)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Largest frame payload accepted from the peer, in bytes
    #[arg(long, default_value = "1024")]
    max_payload: u32,
}

fn main() {
    // Initialize tracing/logging on stderr so it stays out of the board
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tictacwire=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("tictacwire host v{}", tictacwire::VERSION);
    tracing::info!("Listen address: {}", args.listen);

    let config = Config::builder()
        .addr(&args.listen)
        .peer_display_name(&args.peer_name)
        .read_timeout_ms(args.read_timeout_ms)
        .max_payload_size(args.max_payload)
        .build();

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(2);
    }

    let accept = || loop {
        println!("Waiting for connection on {}...", config.addr);
        match Connection::accept(&config) {
            Ok(connection) => {
                println!("Connected! Waiting for the other player to enter their username...");
                return Ok(connection);
            }
            Err(e) if args.retry => {
                tracing::warn!("{}; retrying", e);
                thread::sleep(Duration::from_secs(1));
            }
            Err(e) => return Err(e),
        }
    };

    let mut console = Console::new(io::stdin().lock(), io::stdout());
    if let Err(e) = console.run_with_reconnect(Role::Acceptor, &config, accept) {
        tracing::error!("Session ended: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    tracing::info!("Session closed");
}
