//! Host-side (initiator) session driver.
//!
//! The host runs the round loop: announce key material, prompt both players
//! for moves, compute the outcome, and announce it. Ties repeat the round;
//! a decisive round ends the game with `END`.

use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::{ProtocolError, Result};
use crate::game::{winner, Move, RoundOutcome};
use crate::messages::GameMessage;
use crate::player::{prompt_move, GameEvent, PlayerIo};
use crate::session::Session;
use crate::transport::FramedConnection;

/// One hosted game over a framed connection.
#[derive(Debug)]
pub struct HostGame<S, P> {
    conn: FramedConnection<S>,
    io: P,
    session: Session,
}

impl<S, P> HostGame<S, P>
where
    S: AsyncRead + AsyncWrite + Unpin,
    P: PlayerIo,
{
    /// Set up the host side. Generates the session key material.
    pub fn new(conn: FramedConnection<S>, io: P) -> Result<Self> {
        Ok(Self {
            conn,
            io,
            session: Session::new_initiator()?,
        })
    }

    /// Play the game to completion and close the connection.
    pub async fn run(mut self) -> Result<()> {
        for frame in self.session.key_announcements()? {
            self.conn.send_frame(&frame).await?;
        }
        tracing::info!("key material sent to peer");

        loop {
            self.send(GameMessage::PromptMove).await?;

            let own_move = prompt_move(&mut self.io).await?;
            self.io.notify(GameEvent::WaitingForOpponent).await?;
            let peer_move = self.recv_move().await?;
            tracing::debug!(own = %own_move, peer = %peer_move, "round played");

            match winner(own_move, peer_move) {
                RoundOutcome::FirstWins => {
                    self.io.notify(GameEvent::Won).await?;
                    self.send(GameMessage::Lose).await?;
                    break;
                }
                RoundOutcome::SecondWins => {
                    self.io.notify(GameEvent::Lost).await?;
                    self.send(GameMessage::Win).await?;
                    break;
                }
                RoundOutcome::Tie => {
                    self.io.notify(GameEvent::Tie).await?;
                    self.send(GameMessage::Tie).await?;
                }
            }
        }

        self.send(GameMessage::End).await?;
        self.session.finish();
        self.io.notify(GameEvent::GameOver).await?;
        self.conn.shutdown().await?;
        tracing::info!("session finished");
        Ok(())
    }

    async fn send(&mut self, message: GameMessage) -> Result<()> {
        let (split_factor, ciphertext) = self.session.seal(&message.encode())?;
        self.conn.send_sealed(split_factor, &ciphertext).await
    }

    async fn recv_move(&mut self) -> Result<Move> {
        let (split_factor, ciphertext) = self.conn.recv_sealed().await?;
        let payload = self.session.open(split_factor, &ciphertext)?;
        match GameMessage::parse(&payload)? {
            GameMessage::Move(mv) => Ok(mv),
            other => Err(ProtocolError::UnexpectedMessage(format!("{:?}", other))),
        }
    }
}
