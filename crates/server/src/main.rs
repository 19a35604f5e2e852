//! Roshambo Server
//!
//! Hosts a single rock-paper-scissors game: accept one connection, play to
//! a decisive round, exit.

mod console;

use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use console::ConsoleIo;
use protocol::{FramedConnection, GameEvent, HostGame, PlayerIo};

/// Roshambo server - host one encrypted rock-paper-scissors game.
#[derive(Parser, Debug)]
#[command(name = "roshambo-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: String,

    /// Port to listen on
    #[arg(short, long, default_value = "4444")]
    pub port: u16,

    /// Read timeout in seconds
    #[arg(long, default_value = "20")]
    pub timeout: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr = format!("{}:{}", cli.bind, cli.port);
    let listener = TcpListener::bind(&addr).await?;
    println!("Hosting rock-paper-scissors game on port {}", cli.port);
    tracing::info!("listening on {}", addr);

    let (stream, peer) = listener.accept().await?;
    tracing::info!("peer connected from {}", peer);

    let conn = FramedConnection::with_timeout(stream, Duration::from_secs(cli.timeout));
    let mut io = ConsoleIo::new();
    io.notify(GameEvent::Connected).await?;

    HostGame::new(conn, io)?.run().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["roshambo-server"]).unwrap();
        assert_eq!(cli.bind, "0.0.0.0");
        assert_eq!(cli.port, 4444);
        assert_eq!(cli.timeout, 20);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_port_flag() {
        let cli = Cli::try_parse_from(["roshambo-server", "--port", "9000"]).unwrap();
        assert_eq!(cli.port, 9000);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["roshambo-server", "-p", "9000", "-v"]).unwrap();
        assert_eq!(cli.port, 9000);
        assert!(cli.verbose);
    }

    #[test]
    fn test_invalid_port_fails() {
        assert!(Cli::try_parse_from(["roshambo-server", "--port", "notaport"]).is_err());
    }
}
