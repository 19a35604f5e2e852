//! Rock-paper-scissors moves and the outcome rule.

use crate::error::{ProtocolError, Result};

/// A player's move. `Idle` is the per-round starting value and never a legal
/// wire move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Move {
    /// No move chosen yet.
    #[default]
    Idle,
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// Parse a human-entered move: `r`/`rock`, `p`/`paper`, `s`/`scissors`,
    /// ignoring case. Anything else is the recoverable
    /// [`ProtocolError::InvalidMove`].
    pub fn from_input(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("r") || trimmed.eq_ignore_ascii_case("rock") {
            Ok(Move::Rock)
        } else if trimmed.eq_ignore_ascii_case("p") || trimmed.eq_ignore_ascii_case("paper") {
            Ok(Move::Paper)
        } else if trimmed.eq_ignore_ascii_case("s") || trimmed.eq_ignore_ascii_case("scissors") {
            Ok(Move::Scissors)
        } else {
            Err(ProtocolError::InvalidMove(input.to_string()))
        }
    }

    /// Decode the wire digit (1-3).
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Move::Rock),
            2 => Some(Move::Paper),
            3 => Some(Move::Scissors),
            _ => None,
        }
    }

    /// The wire digit for this move (0 for `Idle`).
    pub fn as_digit(self) -> u8 {
        match self {
            Move::Idle => 0,
            Move::Rock => 1,
            Move::Paper => 2,
            Move::Scissors => 3,
        }
    }

    /// Whether this move beats the other.
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors)
                | (Move::Paper, Move::Rock)
                | (Move::Scissors, Move::Paper)
        )
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Move::Idle => "idle",
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        };
        f.write_str(name)
    }
}

/// Result of comparing two moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The first move wins.
    FirstWins,
    /// The second move wins.
    SecondWins,
    /// Equal moves.
    Tie,
}

/// Compare two moves. Assumes both are Rock, Paper or Scissors.
pub fn winner(first: Move, second: Move) -> RoundOutcome {
    if first == second {
        RoundOutcome::Tie
    } else if first.beats(second) {
        RoundOutcome::FirstWins
    } else {
        RoundOutcome::SecondWins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_moves_tie() {
        for mv in [Move::Rock, Move::Paper, Move::Scissors] {
            assert_eq!(winner(mv, mv), RoundOutcome::Tie);
        }
    }

    #[test]
    fn test_all_unequal_pairs_have_a_winner() {
        let pairs = [
            (Move::Rock, Move::Scissors, RoundOutcome::FirstWins),
            (Move::Scissors, Move::Rock, RoundOutcome::SecondWins),
            (Move::Paper, Move::Rock, RoundOutcome::FirstWins),
            (Move::Rock, Move::Paper, RoundOutcome::SecondWins),
            (Move::Scissors, Move::Paper, RoundOutcome::FirstWins),
            (Move::Paper, Move::Scissors, RoundOutcome::SecondWins),
        ];
        for (first, second, expected) in pairs {
            assert_eq!(winner(first, second), expected, "{} vs {}", first, second);
        }
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!(Move::from_input("r").unwrap(), Move::Rock);
        assert_eq!(Move::from_input("p").unwrap(), Move::Paper);
        assert_eq!(Move::from_input("s").unwrap(), Move::Scissors);
    }

    #[test]
    fn test_parse_long_forms_ignore_case() {
        assert_eq!(Move::from_input("Rock").unwrap(), Move::Rock);
        assert_eq!(Move::from_input("PAPER").unwrap(), Move::Paper);
        assert_eq!(Move::from_input("sciSSors").unwrap(), Move::Scissors);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Move::from_input(" rock\n").unwrap(), Move::Rock);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "rocks", "lizard", "4", "ro"] {
            assert!(matches!(
                Move::from_input(input),
                Err(ProtocolError::InvalidMove(_))
            ));
        }
    }

    #[test]
    fn test_digit_roundtrip() {
        for mv in [Move::Rock, Move::Paper, Move::Scissors] {
            assert_eq!(Move::from_digit(mv.as_digit()), Some(mv));
        }
        assert_eq!(Move::from_digit(0), None);
        assert_eq!(Move::from_digit(4), None);
    }
}
