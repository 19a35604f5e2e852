//! Key generation for the session cipher.
//!
//! Derives a public/private exponent pair and modulus from two primes using
//! the reference search procedure: the totient is found by mutual approach
//! (an LCM computed by repeated scaling rather than via GCD), the public
//! exponent is the 5th integer coprime with the totient, and the private
//! exponent is the first integer whose product with the public exponent is
//! congruent to 1 modulo the totient. The searches are deterministic, so
//! fixed primes always yield the same key material.
//!
//! None of this is cryptographically meaningful — the primes are tiny and
//! the search depths are fixed. The exact procedure is preserved for
//! behavioral compatibility, not security.

use num_bigint::BigUint;

use crate::error::{ProtocolError, Result};

/// Default first prime.
pub const DEFAULT_PRIME_P: u64 = 45481;

/// Default second prime.
pub const DEFAULT_PRIME_Q: u64 = 45691;

/// Per-loop iteration cap. The default primes need ~4.1M iterations for the
/// private-exponent scan.
pub const DEFAULT_ITERATION_LIMIT: u64 = 100_000_000;

/// How many coprime candidates to pass over before settling on the public
/// exponent (otherwise it would always be 1).
const PUBLIC_SEARCH_DEPTH: u64 = 5;

/// How many modular inverses to pass over before settling on the private
/// exponent.
const PRIVATE_SEARCH_DEPTH: u64 = 1;

/// Key material for one session.
///
/// The generating side holds all three fields; a peer that only receives the
/// public announcement holds the modulus and public exponent, never the
/// private exponent.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    /// Product of the two primes.
    pub modulus: BigUint,
    /// Encryption exponent, announced in plaintext during key exchange.
    pub public_exponent: BigUint,
    /// Decryption exponent. `None` on the receiving side.
    pub private_exponent: Option<BigUint>,
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("modulus", &self.modulus)
            .field("public_exponent", &self.public_exponent)
            .field("has_private_exponent", &self.private_exponent.is_some())
            .finish()
    }
}

/// Deterministic key generator.
#[derive(Debug, Clone, Copy)]
pub struct KeyGenerator {
    p: u64,
    q: u64,
    iteration_limit: u64,
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyGenerator {
    /// Create a generator for the default primes.
    pub fn new() -> Self {
        Self {
            p: DEFAULT_PRIME_P,
            q: DEFAULT_PRIME_Q,
            iteration_limit: DEFAULT_ITERATION_LIMIT,
        }
    }

    /// Use explicit primes instead of the defaults.
    pub fn with_primes(mut self, p: u64, q: u64) -> Self {
        self.p = p;
        self.q = q;
        self
    }

    /// Override the per-loop iteration cap.
    pub fn with_iteration_limit(mut self, limit: u64) -> Self {
        self.iteration_limit = limit;
        self
    }

    /// Run the searches and produce key material.
    ///
    /// Fails with [`ProtocolError::KeyGenerationTimeout`] if any search loop
    /// exceeds the iteration cap; this cannot happen for the default primes
    /// and limit.
    pub fn generate(&self) -> Result<KeyMaterial> {
        tracing::debug!(p = self.p, q = self.q, "computing encryption key");

        let modulus = BigUint::from(self.p) * BigUint::from(self.q);
        let totient = self.totient()?;
        let public_exponent = self.find_public_exponent(totient)?;
        let private_exponent = self.find_private_exponent(totient, public_exponent)?;

        tracing::debug!(
            e = %public_exponent,
            n = %modulus,
            "key material ready"
        );

        Ok(KeyMaterial {
            modulus,
            public_exponent: BigUint::from(public_exponent),
            private_exponent: Some(BigUint::from(private_exponent)),
        })
    }

    /// lcm(p-1, q-1) by mutual approach: scale whichever multiple is smaller
    /// until the two meet.
    fn totient(&self) -> Result<u128> {
        let a = u128::from(self.p - 1);
        let b = u128::from(self.q - 1);
        let mut k: u128 = 1;
        let mut l: u128 = 1;

        for _ in 0..self.iteration_limit {
            if a * k == b * l {
                return Ok(a * k);
            } else if a * k < b * l {
                k += 1;
            } else {
                l += 1;
            }
        }
        Err(self.timeout())
    }

    /// The `PUBLIC_SEARCH_DEPTH`-th integer coprime with the totient,
    /// scanning upward from 1.
    fn find_public_exponent(&self, totient: u128) -> Result<u128> {
        let mut coprimes_seen = 0;
        for candidate in 1..=u128::from(self.iteration_limit) {
            if gcd(candidate, totient) == 1 {
                coprimes_seen += 1;
                if coprimes_seen == PUBLIC_SEARCH_DEPTH {
                    return Ok(candidate);
                }
            }
        }
        Err(self.timeout())
    }

    /// The `PRIVATE_SEARCH_DEPTH`-th integer `d` with
    /// `d * e ≡ 1 (mod totient)`, scanning upward from 1.
    fn find_private_exponent(&self, totient: u128, public_exponent: u128) -> Result<u128> {
        let mut inverses_seen = 0;
        for candidate in 1..=u128::from(self.iteration_limit) {
            if candidate * public_exponent % totient == 1 {
                inverses_seen += 1;
                if inverses_seen == PRIVATE_SEARCH_DEPTH {
                    return Ok(candidate);
                }
            }
        }
        Err(self.timeout())
    }

    fn timeout(&self) -> ProtocolError {
        ProtocolError::KeyGenerationTimeout {
            iterations: self.iteration_limit,
        }
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
