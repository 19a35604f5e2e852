//! Session state machine: key exchange and payload sealing.
//!
//! A [`Session`] is one connection lifetime, from key exchange through
//! termination. The initiator (server role) generates the key material and
//! announces the public half in plaintext; the responder (client role) scans
//! inbound frames for the announcements and activates encryption once both
//! are known. Key-exchange frames are never encrypted — key material cannot
//! encrypt itself.
//!
//! Once playing, every payload is sealed in both directions. The responder
//! only ever holds the public exponent, so the directions use mutually
//! inverse exponents: the responder seals with the public exponent and the
//! initiator opens with the private one; the initiator seals with the
//! private exponent and the responder opens with the public one.

use num_bigint::BigUint;

use crate::cipher;
use crate::error::{ProtocolError, Result};
use crate::keygen::{KeyGenerator, KeyMaterial};
use crate::messages;

/// Role in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Generates and announces key material (server).
    Initiator,
    /// Receives key material (client).
    Responder,
}

/// State of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Key material has not been exchanged yet.
    AwaitingKeyExchange,
    /// Encryption is active; rounds are in progress.
    Playing,
    /// The game is over.
    Finished,
}

/// Crypto and key-exchange state for one connection.
pub struct Session {
    role: Role,
    state: SessionState,
    keys: Option<KeyMaterial>,
    /// Announcements seen so far on the responder side; KEY and MOD arrive
    /// in separate frames and in no guaranteed order.
    pending_exponent: Option<BigUint>,
    pending_modulus: Option<BigUint>,
}

impl Session {
    /// Create the initiating (server) side. Runs the key generator.
    pub fn new_initiator() -> Result<Self> {
        let keys = KeyGenerator::new().generate()?;
        Ok(Self {
            role: Role::Initiator,
            state: SessionState::AwaitingKeyExchange,
            keys: Some(keys),
            pending_exponent: None,
            pending_modulus: None,
        })
    }

    /// Create the responding (client) side. Unkeyed until the announcements
    /// arrive.
    pub fn new_responder() -> Self {
        Self {
            role: Role::Responder,
            state: SessionState::AwaitingKeyExchange,
            keys: None,
            pending_exponent: None,
            pending_modulus: None,
        }
    }

    /// Returns the session role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether key material is present.
    pub fn is_keyed(&self) -> bool {
        self.keys.is_some()
    }

    /// Produce the two plaintext key-announcement payloads and transition to
    /// `Playing`. Initiator only.
    pub fn key_announcements(&mut self) -> Result<Vec<Vec<u8>>> {
        if self.role != Role::Initiator || self.state != SessionState::AwaitingKeyExchange {
            return Err(ProtocolError::UnexpectedMessage(format!(
                "cannot announce keys as {:?} in state {:?}",
                self.role, self.state
            )));
        }
        let keys = self
            .keys
            .as_ref()
            .ok_or(ProtocolError::KeyExchangeIncomplete)?;

        let announcements = vec![
            messages::key_announcement(&keys.public_exponent),
            messages::modulus_announcement(&keys.modulus),
        ];
        self.state = SessionState::Playing;
        tracing::debug!("key material announced, session playing");
        Ok(announcements)
    }

    /// Scan one inbound plaintext frame for key announcements. Responder
    /// only; called for every frame received while awaiting key exchange.
    /// Once both the exponent and the modulus are known the session
    /// transitions to `Playing`.
    pub fn observe_key_material(&mut self, payload: &[u8]) -> Result<()> {
        if self.role != Role::Responder || self.state != SessionState::AwaitingKeyExchange {
            return Err(ProtocolError::UnexpectedMessage(format!(
                "cannot receive key material as {:?} in state {:?}",
                self.role, self.state
            )));
        }

        if let Some(exponent) = messages::scan_public_exponent(payload) {
            self.pending_exponent = Some(exponent);
        }
        if let Some(modulus) = messages::scan_modulus(payload) {
            self.pending_modulus = Some(modulus);
        }

        if let (Some(public_exponent), Some(modulus)) =
            (self.pending_exponent.clone(), self.pending_modulus.clone())
        {
            self.pending_exponent = None;
            self.pending_modulus = None;
            self.keys = Some(KeyMaterial {
                modulus,
                public_exponent,
                private_exponent: None,
            });
            self.state = SessionState::Playing;
            tracing::debug!("key material received, session playing");
        }

        Ok(())
    }

    /// Mark the session finished.
    pub fn finish(&mut self) {
        self.state = SessionState::Finished;
    }

    /// Encrypt a payload with this role's exponent.
    pub fn seal(&self, payload: &[u8]) -> Result<(u32, Vec<u8>)> {
        let (exponent, modulus) = self.active_exponent()?;
        Ok(cipher::encrypt(payload, exponent, modulus))
    }

    /// Decrypt a payload with this role's exponent.
    pub fn open(&self, split_factor: u32, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let (exponent, modulus) = self.active_exponent()?;
        cipher::decrypt(split_factor, ciphertext, exponent, modulus)
    }

    fn active_exponent(&self) -> Result<(&BigUint, &BigUint)> {
        if self.state != SessionState::Playing {
            return Err(ProtocolError::KeyExchangeIncomplete);
        }
        let keys = self
            .keys
            .as_ref()
            .ok_or(ProtocolError::KeyExchangeIncomplete)?;
        let exponent = match self.role {
            Role::Initiator => keys
                .private_exponent
                .as_ref()
                .ok_or(ProtocolError::KeyExchangeIncomplete)?,
            Role::Responder => &keys.public_exponent,
        };
        Ok((exponent, &keys.modulus))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("role", &self.role)
            .field("state", &self.state)
            .field("is_keyed", &self.keys.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_pair() -> (Session, Session) {
        let mut initiator = Session::new_initiator().unwrap();
        let mut responder = Session::new_responder();
        for frame in initiator.key_announcements().unwrap() {
            responder.observe_key_material(&frame).unwrap();
        }
        (initiator, responder)
    }

    #[test]
    fn test_key_exchange_activates_both_sides() {
        let (initiator, responder) = playing_pair();
        assert_eq!(initiator.state(), SessionState::Playing);
        assert_eq!(responder.state(), SessionState::Playing);
        assert!(responder.is_keyed());
    }

    #[test]
    fn test_responder_never_holds_private_exponent() {
        let (_, responder) = playing_pair();
        assert!(responder.keys.unwrap().private_exponent.is_none());
    }

    #[test]
    fn test_partial_key_material_stays_awaiting() {
        let mut responder = Session::new_responder();
        responder.observe_key_material(b"KEY: 17").unwrap();
        assert_eq!(responder.state(), SessionState::AwaitingKeyExchange);
        assert!(!responder.is_keyed());

        responder.observe_key_material(b"MOD: 2078072371").unwrap();
        assert_eq!(responder.state(), SessionState::Playing);
    }

    #[test]
    fn test_announcement_order_does_not_matter() {
        let mut responder = Session::new_responder();
        responder.observe_key_material(b"MOD: 2078072371").unwrap();
        responder.observe_key_material(b"KEY: 17").unwrap();
        assert_eq!(responder.state(), SessionState::Playing);
    }

    #[test]
    fn test_unrelated_frames_are_skipped_during_exchange() {
        let mut responder = Session::new_responder();
        responder.observe_key_material(b"hello there").unwrap();
        assert_eq!(responder.state(), SessionState::AwaitingKeyExchange);
    }

    #[test]
    fn test_responder_to_initiator_roundtrip() {
        let (initiator, responder) = playing_pair();
        let (split, ciphertext) = responder.seal(b"MOVE: 1").unwrap();
        let plaintext = initiator.open(split, &ciphertext).unwrap();
        assert_eq!(plaintext, b"MOVE: 1");
    }

    #[test]
    fn test_initiator_to_responder_roundtrip() {
        let (initiator, responder) = playing_pair();
        let (split, ciphertext) = initiator.seal(b"PROMPT_MOVE").unwrap();
        let plaintext = responder.open(split, &ciphertext).unwrap();
        assert_eq!(plaintext, b"PROMPT_MOVE");
    }

    #[test]
    fn test_cannot_seal_before_key_exchange() {
        let responder = Session::new_responder();
        assert!(matches!(
            responder.seal(b"MOVE: 1"),
            Err(ProtocolError::KeyExchangeIncomplete)
        ));
    }

    #[test]
    fn test_cannot_announce_twice() {
        let mut initiator = Session::new_initiator().unwrap();
        initiator.key_announcements().unwrap();
        assert!(initiator.key_announcements().is_err());
    }

    #[test]
    fn test_responder_cannot_announce() {
        let mut responder = Session::new_responder();
        assert!(responder.key_announcements().is_err());
    }

    #[test]
    fn test_initiator_cannot_observe() {
        let mut initiator = Session::new_initiator().unwrap();
        assert!(initiator.observe_key_material(b"KEY: 17").is_err());
    }

    #[test]
    fn test_debug_hides_key_material() {
        let (initiator, _) = playing_pair();
        let rendered = format!("{:?}", initiator);
        assert!(rendered.contains("is_keyed: true"));
        assert!(!rendered.contains("4074473"));
    }
}
