//! Roshambo Client
//!
//! Joins a hosted rock-paper-scissors game and plays it to completion.

mod console;

use std::time::Duration;

use clap::Parser;
use tokio::net::TcpStream;

use console::ConsoleIo;
use protocol::{FramedConnection, GameEvent, GuestGame, PlayerIo};

/// Roshambo client - join an encrypted rock-paper-scissors game.
#[derive(Parser, Debug)]
#[command(name = "roshambo-client")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Host to connect to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port the game is hosted on
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

    let addr = format!("{}:{}", cli.host, cli.port);
    tracing::info!("connecting to {}", addr);
    let stream = TcpStream::connect(&addr).await?;

    let conn = FramedConnection::with_timeout(stream, Duration::from_secs(cli.timeout));
    let mut io = ConsoleIo::new();
    io.notify(GameEvent::Connected).await?;

    GuestGame::new(conn, io).run().await?;
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
        let cli = Cli::try_parse_from(["roshambo-client"]).unwrap();
        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.port, 4444);
        assert_eq!(cli.timeout, 20);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_host_and_port_flags() {
        let cli =
            Cli::try_parse_from(["roshambo-client", "--host", "10.0.0.5", "-p", "9000"]).unwrap();
        assert_eq!(cli.host, "10.0.0.5");
        assert_eq!(cli.port, 9000);
    }

    #[test]
    fn test_invalid_port_fails() {
        assert!(Cli::try_parse_from(["roshambo-client", "--port", "70000"]).is_err());
    }
}
