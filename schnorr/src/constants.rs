//! Constants used in the Schnorr signature scheme implementation.

/// Size of a serialized public verifying key in bytes.
///
/// A verifying key is an element of the 512-bit group modulus `p`.
pub const PK_SIZE: usize = 64;

/// Size of a serialized secret signing key in bytes.
///
/// A signing key is a scalar modulo the 256-bit subgroup order `q`.
pub const SK_SIZE: usize = 32;

/// Size of a serialized signature in bytes.
///
/// A signature consists of:
/// - A commitment R (64 bytes)
/// - A scalar s (32 bytes)
/// Total: 96 bytes
pub const SIG_SIZE: usize = PK_SIZE + SK_SIZE;

/// Subgroup order `q`, the order of the secp256k1 group.
pub(crate) const ORDER_HEX: &str =
    "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

/// The cofactor search starts at `2^COFACTOR_BITS` so that `p = k*q + 1`
/// is a 512-bit prime.
pub(crate) const COFACTOR_BITS: u64 = 256;

/// Miller-Rabin rounds used while searching for `p`.
pub(crate) const PRIMALITY_REPS: usize = 16;

/// Seed for the base sampler of the primality search, so that every process
/// derives the same group in the same number of steps.
pub(crate) const PRIMALITY_SEED: u64 = 0x5363_686e_6f72_7221;
