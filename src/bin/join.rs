//! tictacwire Join Binary
//!
//! Connects to a waiting host and plays X, moving first.

use std::io;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tictacwire::console::Console;
use tictacwire::network::Connection;
use tictacwire::{Config, Role};
use tracing_subscriber::{fmt, EnvFilter};

/// tictacwire Join
#[derive(Parser, Debug)]
#[command(name = "tictacwire-join")]
#[command(about = "Connect to a tictacwire host and play tic-tac-toe as X")]
#[command(version)]
struct Args {
    /// Host address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    server: String,

    /// Username to announce; prompted for when omitted
    #[arg(short, long)]
    username: Option<String>,

    /// Label shown for the host, which never sends a name
    #[arg(long, default_value = "Player 2")]
    peer_name: String,

    /// Keep retrying until the host accepts the connection
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

    tracing::info!("tictacwire join v{}", tictacwire::VERSION);
    tracing::info!("Host address: {}", args.server);

    let mut builder = Config::builder()
        .addr(&args.server)
        .peer_display_name(&args.peer_name)
        .read_timeout_ms(args.read_timeout_ms)
        .max_payload_size(args.max_payload);
    if let Some(name) = &args.username {
        builder = builder.username(name);
    }
    let config = builder.build();

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(2);
    }

    let connect = || loop {
        match Connection::connect(&config) {
            Ok(connection) => return Ok(connection),
            Err(e) if args.retry => {
                tracing::warn!("{}; retrying", e);
                thread::sleep(Duration::from_secs(1));
            }
            Err(e) => return Err(e),
        }
    };

    let mut console = Console::new(io::stdin().lock(), io::stdout());
    if let Some(name) = &args.username {
        console = console.with_username(name);
    }

    if let Err(e) = console.run_with_reconnect(Role::Initiator, &config, connect) {
        tracing::error!("Session ended: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    tracing::info!("Session closed");
}
