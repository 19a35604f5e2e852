//! Error types for the protocol crate.

use thiserror::Error;

/// Protocol error type covering all possible failure modes.
#[derive(Debug, Error)]
pub enum ProtocolError {
    // Transport errors
    /// A read did not complete before the inactivity timeout.
    #[error("operation timed out: {0}")]
    Timeout(String),

    /// Connection was closed unexpectedly.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// Other transport-level I/O failure.
    #[error("transport failed: {0}")]
    Transport(String),

    /// Frame payload exceeds the 32-bit length field.
    #[error("frame too large: {size} bytes exceeds maximum of {max} bytes")]
    FrameTooLarge {
        /// Actual payload size.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },

    // Protocol errors
    /// Received a token the state machine cannot accept.
    #[error("unrecognized response: {0}")]
    UnexpectedMessage(String),

    // Cipher errors
    /// Encrypted block layout is inconsistent with the split factor, or a
    /// decrypted value does not fit in a single byte.
    #[error("decode failed: {0}")]
    Decode(String),

    // Input errors
    /// A human-entered move could not be parsed. Recoverable: the caller
    /// re-prompts; this never travels over the wire.
    #[error("invalid move: {0:?}")]
    InvalidMove(String),

    // Key exchange errors
    /// Attempted to seal or open a payload before key material is active.
    #[error("key exchange incomplete: cannot encrypt before key material is active")]
    KeyExchangeIncomplete,

    /// An exponent search exceeded its iteration cap.
    #[error("key generation exceeded {iterations} iterations")]
    KeyGenerationTimeout {
        /// The iteration cap that was hit.
        iterations: u64,
    },
}

/// Result type alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

impl From<std::io::Error> for ProtocolError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::TimedOut => ProtocolError::Timeout(err.to_string()),
            ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
            | ErrorKind::UnexpectedEof => ProtocolError::ConnectionClosed(err.to_string()),
            _ => ProtocolError::Transport(err.to_string()),
        }
    }
}
