//! The prime-order group the scheme works in.
//!
//! `q` is fixed (see [`ORDER_HEX`]); `p = k*q + 1` is the first prime with
//! even `k >= 2^256`, and `g = h^k mod p` for the smallest `h >= 2` that does
//! not collapse to 1. The group is derived on first use and shared for the
//! rest of the process.

use std::sync::Arc;

use bignum::{BigNum, Endian, Reduction};
use once_cell::sync::OnceCell;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::constants::{COFACTOR_BITS, ORDER_HEX, PRIMALITY_REPS, PRIMALITY_SEED};
use crate::errors::SchnorrError;

pub(crate) struct SchnorrGroup {
    /// Field modulus.
    pub(crate) p: Arc<Reduction>,
    /// Subgroup order.
    pub(crate) q: Arc<Reduction>,
    /// Subgroup generator, tagged with `p`.
    pub(crate) g: BigNum,
}

static GROUP: OnceCell<SchnorrGroup> = OnceCell::new();

/// Returns the shared group, deriving it on first call.
pub(crate) fn group() -> Result<&'static SchnorrGroup, SchnorrError> {
    GROUP.get_or_try_init(SchnorrGroup::derive)
}

impl SchnorrGroup {
    fn derive() -> Result<Self, SchnorrError> {
        let q = BigNum::from_str_radix(ORDER_HEX, 16)?;
        let mut rng = StdRng::seed_from_u64(PRIMALITY_SEED);

        let two = BigNum::from(2u8);
        let mut k = BigNum::one().shl(COFACTOR_BITS)?;
        let mut tried = 1u32;
        let p = loop {
            let p = &(&k * &q) + &BigNum::one();
            if p.is_prime(&mut rng, PRIMALITY_REPS, 0)? {
                break p;
            }
            k.iadd(&two)?;
            tried += 1;
        };

        let mut h = two;
        let g = loop {
            let g = h.powm(&k, &p)?;
            if !g.is_one() {
                break g;
            }
            h.iadd(&BigNum::one())?;
        };

        debug!(bits = p.bit_length(), candidates = tried, "derived schnorr group");

        let p = Reduction::new(&p)?;
        let q = Reduction::new(&q)?;
        let g = g.to_red(&p)?;
        Ok(Self { p, q, g })
    }

    #[inline]
    pub(crate) fn order(&self) -> &BigNum {
        self.q.modulus()
    }

    #[inline]
    pub(crate) fn modulus(&self) -> &BigNum {
        self.p.modulus()
    }

    /// Checks `0 < d < q`.
    pub(crate) fn is_scalar(&self, d: &BigNum) -> bool {
        !d.is_neg() && !d.is_zero() && d < self.order()
    }

    /// Checks `1 < y < p` and `y^q = 1 (mod p)`.
    pub(crate) fn is_element(&self, y: &BigNum) -> Result<bool, SchnorrError> {
        if y.cmpn(1).is_le() || y >= self.modulus() {
            return Ok(false);
        }
        let t = y.to_red(&self.p)?.red_pow(self.order())?;
        Ok(t.is_one())
    }

    /// `g^d mod p`, tagged with `p`.
    pub(crate) fn exp_g(&self, d: &BigNum) -> Result<BigNum, SchnorrError> {
        Ok(self.g.red_pow(d)?)
    }

    /// Hashes the parts with SHA-256 and reduces the digest modulo `q`.
    pub(crate) fn hash_to_scalar(&self, parts: &[&[u8]]) -> Result<BigNum, SchnorrError> {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        let digest = hasher.finalize();
        Ok(BigNum::from_bytes(&digest, Endian::Big).modulo(self.order())?)
    }
}

/// Big-endian encoding into exactly `N` bytes. Only the low `N` bytes of
/// wider values are kept; scalars and elements are always narrow enough.
pub(crate) fn encode_fixed<const N: usize>(x: &BigNum) -> [u8; N] {
    let bytes = x.to_bytes(Endian::Big);
    let len = bytes.len().min(N);
    let mut out = [0u8; N];
    out[N - len..].copy_from_slice(&bytes[bytes.len() - len..]);
    out
}

/// Reads a big-endian value from exactly `N` bytes.
pub(crate) fn decode_fixed<const N: usize>(bytes: &[u8]) -> Result<BigNum, SchnorrError> {
    if bytes.len() != N {
        return Err(SchnorrError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }
    Ok(BigNum::from_bytes(bytes, Endian::Big))
}
