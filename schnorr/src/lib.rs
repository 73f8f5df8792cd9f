//! Deterministic Schnorr signatures over a prime-order subgroup of `Z_p^*`.
//!
//! This library implements a Schnorr signature scheme using:
//! - A 256-bit subgroup order `q` (the secp256k1 group order)
//! - A 512-bit prime modulus `p = k*q + 1`, derived once per process
//! - SHA-256 for the nonce and the Fiat-Shamir challenge
//!
//! All arithmetic goes through the `bignum` crate, with scalar math done in
//! a reduction context over `q` and group math in one over `p`.
//!
//! # Example
//!
//! ```
//! use schnorr::{Signature, SigningKey, VerifyingKey};
//!
//! let signing_key = SigningKey::from_bytes(&[0x11; 32]).unwrap();
//! let verifying_key = signing_key.verifying_key().unwrap();
//!
//! let signature = signing_key.sign(b"attack at dawn").unwrap();
//! assert!(verifying_key.verify(b"attack at dawn", &signature));
//!
//! // Keys and signatures have fixed-size byte encodings
//! let bytes = signature.to_bytes();
//! let decoded = Signature::from_bytes(&bytes).unwrap();
//! let pk = VerifyingKey::from_bytes(&verifying_key.to_bytes()).unwrap();
//! assert!(pk.verify(b"attack at dawn", &decoded));
//! ```
//!
//! # Security Considerations
//!
//! - Nonces are derived from the key and message, so no RNG is needed to sign
//! - Arithmetic is not constant time
//! - Protect the signing key from unauthorized access

mod constants;
mod errors;
mod group;
mod keys;
mod signatures;

#[cfg(test)]
mod tests;

pub use constants::{PK_SIZE, SIG_SIZE, SK_SIZE};
pub use errors::SchnorrError;
pub use keys::{SigningKey, VerifyingKey};
pub use signatures::{Signature, verify_batch};
