//! Console-backed player input/output.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

use protocol::{GameEvent, Move, PlayerIo, ProtocolError, Result};

/// Reads moves from stdin and prints game events to stdout.
pub struct ConsoleIo {
    lines: Lines<BufReader<Stdin>>,
    stdout: Stdout,
}

impl ConsoleIo {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            stdout: tokio::io::stdout(),
        }
    }

    async fn print(&mut self, text: &str) -> Result<()> {
        self.stdout.write_all(text.as_bytes()).await?;
        self.stdout.flush().await?;
        Ok(())
    }
}

impl PlayerIo for ConsoleIo {
    async fn next_move(&mut self) -> Result<Move> {
        self.print("Enter your move: ").await?;
        let line = self
            .lines
            .next_line()
            .await?
            .ok_or_else(|| ProtocolError::ConnectionClosed("stdin closed".to_string()))?;
        Move::from_input(&line)
    }

    async fn notify(&mut self, event: GameEvent) -> Result<()> {
        let text = match event {
            GameEvent::Connected => "Connected!\n",
            GameEvent::InvalidInput => "Invalid input.\n",
            GameEvent::WaitingForOpponent => "Waiting for opponent...\n",
            GameEvent::Won => "\nYou win!\n",
            GameEvent::Lost => "\nYou lose!\n",
            GameEvent::Tie => "\nTie. Try again\n",
            GameEvent::GameOver => "Game over.\n",
        };
        self.print(text).await
    }
}
