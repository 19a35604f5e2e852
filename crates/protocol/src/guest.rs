//! Guest-side (responder) session driver.
//!
//! The guest scans plaintext frames for key announcements, then reacts to
//! sealed host messages until `END` arrives: each `PROMPT_MOVE` asks the
//! player for a move, and the outcome tokens are surfaced as events.

use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::{ProtocolError, Result};
use crate::messages::GameMessage;
use crate::player::{prompt_move, GameEvent, PlayerIo};
use crate::session::{Session, SessionState};
use crate::transport::FramedConnection;

/// One joined game over a framed connection.
#[derive(Debug)]
pub struct GuestGame<S, P> {
    conn: FramedConnection<S>,
    io: P,
    session: Session,
}

impl<S, P> GuestGame<S, P>
where
    S: AsyncRead + AsyncWrite + Unpin,
    P: PlayerIo,
{
    /// Set up the guest side. Unkeyed until the host announces.
    pub fn new(conn: FramedConnection<S>, io: P) -> Self {
        Self {
            conn,
            io,
            session: Session::new_responder(),
        }
    }

    /// Play the game to completion.
    pub async fn run(mut self) -> Result<()> {
        while self.session.state() == SessionState::AwaitingKeyExchange {
            let frame = self.conn.recv_frame().await?;
            self.session.observe_key_material(&frame)?;
        }
        tracing::info!("key material received, encryption active");

        loop {
            match self.recv().await? {
                GameMessage::PromptMove => {
                    let own_move = prompt_move(&mut self.io).await?;
                    self.send(GameMessage::Move(own_move)).await?;
                    self.io.notify(GameEvent::WaitingForOpponent).await?;
                }
                GameMessage::Win => self.io.notify(GameEvent::Won).await?,
                GameMessage::Lose => self.io.notify(GameEvent::Lost).await?,
                GameMessage::Tie => self.io.notify(GameEvent::Tie).await?,
                GameMessage::End => break,
                other @ GameMessage::Move(_) => {
                    return Err(ProtocolError::UnexpectedMessage(format!("{:?}", other)));
                }
            }
        }

        self.session.finish();
        self.io.notify(GameEvent::GameOver).await?;
        tracing::info!("session finished");
        Ok(())
    }

    async fn send(&mut self, message: GameMessage) -> Result<()> {
        let (split_factor, ciphertext) = self.session.seal(&message.encode())?;
        self.conn.send_sealed(split_factor, &ciphertext).await
    }

    async fn recv(&mut self) -> Result<GameMessage> {
        let (split_factor, ciphertext) = self.conn.recv_sealed().await?;
        let payload = self.session.open(split_factor, &ciphertext)?;
        GameMessage::parse(&payload)
    }
}
