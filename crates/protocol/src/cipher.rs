//! Per-message encryption and decryption.
//!
//! Each plaintext byte is encrypted independently by modular exponentiation
//! and rendered as its minimal big-endian byte string. The widest rendering
//! in the message sets the *split factor*; every rendering is right-padded
//! with zero bytes to that width and the groups are concatenated in order.
//! The split factor travels with the message (see
//! [`crate::transport::FramedConnection::send_sealed`]).
//!
//! Decoding reverses the padding by truncating each group at the first zero
//! byte found scanning from index 1. This mirrors the reference layout
//! exactly and is knowingly fragile: an encrypted value whose own rendering
//! contains a zero byte past index 0 cannot survive the truncation. With the
//! default key exactly four plaintext byte values (2, 64, 180 and 236) hit
//! this; their groups reassemble to the wrong integer and decryption fails
//! the one-byte range check. Do not "fix" the scan — it would change the
//! byte layout.

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::error::{ProtocolError, Result};

/// Encrypt a payload byte-by-byte.
///
/// Returns the split factor (always ≥ 1, even for an empty payload) and the
/// concatenated fixed-width groups.
pub fn encrypt(plaintext: &[u8], exponent: &BigUint, modulus: &BigUint) -> (u32, Vec<u8>) {
    let renderings: Vec<Vec<u8>> = plaintext
        .iter()
        .map(|&byte| {
            BigUint::from(byte)
                .modpow(exponent, modulus)
                .to_bytes_be()
        })
        .collect();

    let split_factor = renderings.iter().map(Vec::len).max().unwrap_or(1);

    let mut ciphertext = Vec::with_capacity(plaintext.len() * split_factor);
    for rendering in &renderings {
        ciphertext.extend_from_slice(rendering);
        ciphertext.resize(ciphertext.len() + (split_factor - rendering.len()), 0);
    }

    (split_factor as u32, ciphertext)
}

/// Decrypt a payload produced by [`encrypt`].
///
/// Fails with [`ProtocolError::Decode`] if the split factor is zero, the
/// ciphertext length is not a multiple of it, or a decrypted value exceeds
/// one byte's range.
pub fn decrypt(
    split_factor: u32,
    ciphertext: &[u8],
    exponent: &BigUint,
    modulus: &BigUint,
) -> Result<Vec<u8>> {
    let width = split_factor as usize;
    if width == 0 {
        return Err(ProtocolError::Decode("split factor is zero".to_string()));
    }
    if ciphertext.len() % width != 0 {
        return Err(ProtocolError::Decode(format!(
            "ciphertext length {} is not a multiple of split factor {}",
            ciphertext.len(),
            width
        )));
    }

    let mut plaintext = Vec::with_capacity(ciphertext.len() / width);
    for group in ciphertext.chunks_exact(width) {
        let value = BigUint::from_bytes_be(unpad(group));
        let decrypted = value.modpow(exponent, modulus);
        let byte = decrypted.to_u8().ok_or_else(|| {
            ProtocolError::Decode(format!(
                "decrypted value {} exceeds one byte's range",
                decrypted
            ))
        })?;
        plaintext.push(byte);
    }
    Ok(plaintext)
}

/// Strip the zero-byte padding: keep the prefix before the first zero byte
/// found at index 1 or later.
fn unpad(group: &[u8]) -> &[u8] {
    let mut end = 1;
    while end < group.len() && group[end] != 0 {
        end += 1;
    }
    &group[..end]
}
