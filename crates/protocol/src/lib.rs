//! # Roshambo Protocol Library
//!
//! This crate provides the wire protocol and cryptographic primitives for
//! the Roshambo networked rock-paper-scissors game.
//!
//! ## Overview
//!
//! The protocol crate is the foundation of Roshambo's communication layer,
//! providing:
//!
//! - **Key Generation**: Deterministic RSA-style key material from fixed primes
//! - **Cipher**: Per-byte modular-exponentiation encryption with split-factor grouping
//! - **Frame Codec**: Length-prefixed framing over any async byte stream
//! - **Game Messages**: ASCII token messages for key exchange and play
//! - **Session**: Key-exchange and sealing state machine for both roles
//! - **Drivers**: Host and guest game loops over a framed connection
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            Game Messages                │  ASCII tokens
//! ├─────────────────────────────────────────┤
//! │          Session Encryption             │  Per-byte modpow cipher
//! ├─────────────────────────────────────────┤
//! │              Framing                    │  u32 length prefix
//! ├─────────────────────────────────────────┤
//! │            Transport (TCP)              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Key-exchange frames travel in plaintext; every frame after that carries a
//! sealed payload preceded by its split factor.
//!
//! ## Modules
//!
//! - [`keygen`]: Key material generation
//! - [`cipher`]: Payload encryption and decryption
//! - [`framing`]: Length-prefixed frame codec
//! - [`transport`]: Framed async connection with read timeouts
//! - [`messages`]: Wire message definitions
//! - [`game`]: Moves and the outcome rule
//! - [`session`]: Key-exchange and sealing state machine
//! - [`player`]: Injected player input/output
//! - [`host`] / [`guest`]: Session drivers
//! - [`error`]: Error types

pub mod cipher;
pub mod error;
pub mod framing;
pub mod game;
pub mod guest;
pub mod host;
pub mod keygen;
pub mod messages;
pub mod player;
pub mod session;
pub mod transport;

pub use error::{ProtocolError, Result};
pub use framing::{FrameCodec, FRAME_HEADER_SIZE, MAX_FRAME_PAYLOAD};
pub use game::{winner, Move, RoundOutcome};
pub use guest::GuestGame;
pub use host::HostGame;
pub use keygen::{KeyGenerator, KeyMaterial, DEFAULT_PRIME_P, DEFAULT_PRIME_Q};
pub use messages::GameMessage;
pub use player::{GameEvent, PlayerIo};
pub use session::{Role, Session, SessionState};
pub use transport::{FramedConnection, READ_TIMEOUT};
