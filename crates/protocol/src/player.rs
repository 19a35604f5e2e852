//! Injected player input/output capability.
//!
//! The session drivers never touch a terminal directly; they talk to a
//! [`PlayerIo`] implementation. Binaries provide a console-backed one, tests
//! provide scripted ones.

use crate::error::{ProtocolError, Result};
use crate::game::Move;

/// Events the drivers surface to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The peer connection is up.
    Connected,
    /// The entered move could not be parsed; a re-prompt follows.
    InvalidInput,
    /// Own move submitted; the opponent's is pending.
    WaitingForOpponent,
    /// This player won the game.
    Won,
    /// This player lost the game.
    Lost,
    /// Equal moves; another round follows.
    Tie,
    /// The session is over.
    GameOver,
}

/// Player-facing input/output.
pub trait PlayerIo {
    /// Ask for the next move. Returns [`ProtocolError::InvalidMove`] for
    /// unparseable input; the caller re-prompts.
    fn next_move(&mut self) -> impl std::future::Future<Output = Result<Move>> + Send;

    /// Surface a game event.
    fn notify(&mut self, event: GameEvent) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Prompt until a valid move is entered, surfacing [`GameEvent::InvalidInput`]
/// on each failed attempt. Only the recoverable invalid-move branch loops;
/// any other error propagates.
pub async fn prompt_move<P: PlayerIo>(io: &mut P) -> Result<Move> {
    loop {
        match io.next_move().await {
            Ok(mv) => return Ok(mv),
            Err(ProtocolError::InvalidMove(_)) => io.notify(GameEvent::InvalidInput).await?,
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted input yielding canned parse results.
    struct Script {
        inputs: Vec<&'static str>,
        events: Vec<GameEvent>,
    }

    impl PlayerIo for Script {
        async fn next_move(&mut self) -> Result<Move> {
            Move::from_input(self.inputs.remove(0))
        }

        async fn notify(&mut self, event: GameEvent) -> Result<()> {
            self.events.push(event);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_prompt_move_retries_on_invalid_input() {
        let mut io = Script {
            inputs: vec!["lizard", "", "rock"],
            events: Vec::new(),
        };
        let mv = prompt_move(&mut io).await.unwrap();
        assert_eq!(mv, Move::Rock);
        assert_eq!(io.events, vec![GameEvent::InvalidInput, GameEvent::InvalidInput]);
    }

    #[tokio::test]
    async fn test_prompt_move_returns_first_valid() {
        let mut io = Script {
            inputs: vec!["s"],
            events: Vec::new(),
        };
        assert_eq!(prompt_move(&mut io).await.unwrap(), Move::Scissors);
        assert!(io.events.is_empty());
    }
}
