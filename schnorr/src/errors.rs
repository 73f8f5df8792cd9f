//! Error types for the Schnorr signature scheme.

use bignum::BigNumError;
use thiserror::Error;

/// Errors that can occur during key handling and signing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchnorrError {
    /// A scalar is zero or not below the group order `q`.
    ///
    /// This covers secret keys, tweaks and tweak results that land on zero.
    #[error("invalid scalar")]
    InvalidScalar,

    /// A value is not an element of the order-`q` subgroup of `Z_p^*`.
    ///
    /// This error occurs when:
    /// - A verifying key is outside `[2, p)` or fails the subgroup check
    /// - A signature commitment R is outside `[1, p)`
    #[error("invalid group element")]
    InvalidPoint,

    /// A byte encoding has the wrong size.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The deterministic nonce reduced to zero (negligible probability).
    #[error("nonce reduced to zero")]
    InvalidNonce,

    /// A hex string could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The integer engine rejected an operation.
    #[error(transparent)]
    Arithmetic(#[from] BigNumError),
}
