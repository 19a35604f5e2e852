//! Wire message definitions.
//!
//! All messages are short ASCII tokens carried inside frames. Key exchange
//! uses the plaintext announcements `KEY: <decimal>` and `MOD: <decimal>`;
//! everything after that is one of the game tokens.

use num_bigint::BigUint;

use crate::error::{ProtocolError, Result};
use crate::game::Move;

/// A game-phase message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMessage {
    /// Host asks the guest to submit a move.
    PromptMove,
    /// A submitted move.
    Move(Move),
    /// The receiving side won.
    Win,
    /// The receiving side lost.
    Lose,
    /// Equal moves; another round follows.
    Tie,
    /// The session is over.
    End,
}

impl GameMessage {
    /// Render the ASCII token for this message.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            GameMessage::PromptMove => b"PROMPT_MOVE".to_vec(),
            GameMessage::Move(mv) => format!("MOVE: {}", mv.as_digit()).into_bytes(),
            GameMessage::Win => b"WIN".to_vec(),
            GameMessage::Lose => b"LOSE".to_vec(),
            GameMessage::Tie => b"TIE".to_vec(),
            GameMessage::End => b"END".to_vec(),
        }
    }

    /// Parse a frame payload into a game message.
    ///
    /// Fails with [`ProtocolError::UnexpectedMessage`] for anything that is
    /// not a known token, including `MOVE:` payloads whose digit is not 1-3.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(payload)
            .map_err(|_| ProtocolError::UnexpectedMessage(format!("{:?}", payload)))?;

        match text {
            "PROMPT_MOVE" => Ok(GameMessage::PromptMove),
            "WIN" => Ok(GameMessage::Win),
            "LOSE" => Ok(GameMessage::Lose),
            "TIE" => Ok(GameMessage::Tie),
            "END" => Ok(GameMessage::End),
            _ => {
                if let Some(rest) = text.strip_prefix("MOVE: ") {
                    let mv = rest
                        .parse::<u8>()
                        .ok()
                        .and_then(Move::from_digit)
                        .ok_or_else(|| ProtocolError::UnexpectedMessage(text.to_string()))?;
                    Ok(GameMessage::Move(mv))
                } else {
                    Err(ProtocolError::UnexpectedMessage(text.to_string()))
                }
            }
        }
    }
}

/// Render the public-exponent announcement.
pub fn key_announcement(public_exponent: &BigUint) -> Vec<u8> {
    format!("KEY: {}", public_exponent).into_bytes()
}

/// Render the modulus announcement.
pub fn modulus_announcement(modulus: &BigUint) -> Vec<u8> {
    format!("MOD: {}", modulus).into_bytes()
}

/// Scan a frame payload for a public-exponent announcement.
///
/// The pattern may sit anywhere in the payload; every key-exchange frame is
/// scanned, not only the first.
pub fn scan_public_exponent(payload: &[u8]) -> Option<BigUint> {
    scan_decimal(payload, "KEY: ")
}

/// Scan a frame payload for a modulus announcement.
pub fn scan_modulus(payload: &[u8]) -> Option<BigUint> {
    scan_decimal(payload, "MOD: ")
}

/// Find `tag` anywhere in the payload and parse the digit run that follows.
fn scan_decimal(payload: &[u8], tag: &str) -> Option<BigUint> {
    let text = std::str::from_utf8(payload).ok()?;
    let start = text.find(tag)? + tag.len();
    let digits: &str = {
        let rest = &text[start..];
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(rest.len(), |(i, _)| i);
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
