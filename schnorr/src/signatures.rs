//! Signature types, challenge hashing and batch verification for the
//! Schnorr signature scheme.

use bignum::{BigNum, RandomBigNum};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{PK_SIZE, SIG_SIZE, SK_SIZE};
use crate::errors::SchnorrError;
use crate::group::{SchnorrGroup, decode_fixed, encode_fixed, group};
use crate::keys::VerifyingKey;

/// A Schnorr signature consisting of a group element and a scalar.
///
/// The signature is a pair `(R, s)` where:
/// - `R` is an element of the order-`q` subgroup (the commitment)
/// - `s` is a scalar modulo `q` (the response)
///
/// # Structure
///
/// The signature satisfies the verification equation: `g^s == R * pk^e`
/// where `e = H(R || pk || msg)` is the Fiat-Shamir challenge.
///
/// The byte encoding is `R` as 64 big-endian bytes followed by `s` as 32.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Signature {
    /// The commitment R = g^k, where k is the signing nonce
    r: BigNum,
    /// The response scalar s = k + e * sk, where sk is the signing key
    s: BigNum,
}

impl Signature {
    pub(crate) fn new(r: BigNum, s: BigNum) -> Self {
        Self { r, s }
    }

    /// Parses a 96-byte signature.
    ///
    /// Only the encoding ranges are checked here (`0 < R < p`, `s < q`);
    /// subgroup membership of `R` is left to verification.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        if bytes.len() != SIG_SIZE {
            return Err(SchnorrError::InvalidLength {
                expected: SIG_SIZE,
                actual: bytes.len(),
            });
        }
        let grp = group()?;
        let (r_bytes, s_bytes) = bytes.split_at(PK_SIZE);
        let r = decode_fixed::<PK_SIZE>(r_bytes)?;
        let s = decode_fixed::<SK_SIZE>(s_bytes)?;

        if r.is_zero() || &r >= grp.modulus() {
            return Err(SchnorrError::InvalidPoint);
        }
        if &s >= grp.order() {
            return Err(SchnorrError::InvalidScalar);
        }
        Ok(Self { r, s })
    }

    pub fn to_bytes(&self) -> [u8; SIG_SIZE] {
        let mut out = [0u8; SIG_SIZE];
        out[..PK_SIZE].copy_from_slice(&encode_fixed::<PK_SIZE>(&self.r));
        out[PK_SIZE..].copy_from_slice(&encode_fixed::<SK_SIZE>(&self.s));
        out
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_hex(s: &str) -> Result<Self, SchnorrError> {
        Self::from_bytes(&hex::decode(s)?)
    }

    /// Computes the Fiat-Shamir challenge `e = H(R || pk || msg) mod q`.
    ///
    /// `R` and `pk` enter the hash in their fixed 64-byte encodings.
    pub(crate) fn challenge(
        r: &BigNum,
        pk: &VerifyingKey,
        msg: &[u8],
    ) -> Result<BigNum, SchnorrError> {
        let r_bytes = encode_fixed::<PK_SIZE>(r);
        let pk_bytes = pk.to_bytes();
        group()?.hash_to_scalar(&[r_bytes.as_slice(), pk_bytes.as_slice(), msg])
    }

    /// Checks `s < q` and that `R` lies in the order-`q` subgroup.
    fn check_ranges(&self, grp: &SchnorrGroup) -> Result<(), SchnorrError> {
        if &self.s >= grp.order() || self.s.is_neg() {
            return Err(SchnorrError::InvalidScalar);
        }
        if !grp.is_element(&self.r)? {
            return Err(SchnorrError::InvalidPoint);
        }
        Ok(())
    }

    /// Checks `g^s == R * pk^e (mod p)` after range and subgroup checks.
    pub(crate) fn check(&self, pk: &VerifyingKey, msg: &[u8]) -> Result<bool, SchnorrError> {
        let grp = group()?;
        self.check_ranges(grp)?;

        let e = Self::challenge(&self.r, pk, msg)?;
        let lhs = grp.exp_g(&self.s)?;
        let rhs = pk
            .element()
            .to_red(&grp.p)?
            .red_pow(&e)?
            .red_mul(&self.r.to_red(&grp.p)?)?;

        Ok(lhs.red_eq(&rhs)?)
    }
}

/// Verifies a batch of `(message, signature, key)` triples at once.
///
/// Uses a random linear combination: with `a_0 = 1` and every other `a_i`
/// drawn from `[1, q)`, the batch is valid when
/// `g^(sum a_i*s_i) == prod R_i^a_i * pk_i^(a_i*e_i) (mod p)`.
/// An empty batch is valid. Any malformed entry makes the whole batch fail.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use schnorr::{SigningKey, verify_batch};
///
/// let a = SigningKey::from_bytes(&[1u8; 32]).unwrap();
/// let b = SigningKey::from_bytes(&[2u8; 32]).unwrap();
/// let (pa, pb) = (a.verifying_key().unwrap(), b.verifying_key().unwrap());
/// let (sa, sb) = (a.sign(b"one").unwrap(), b.sign(b"two").unwrap());
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let batch = [(&b"one"[..], &sa, &pa), (&b"two"[..], &sb, &pb)];
/// assert!(verify_batch(&mut rng, &batch));
/// ```
pub fn verify_batch<R: RngCore + ?Sized>(
    rng: &mut R,
    batch: &[(&[u8], &Signature, &VerifyingKey)],
) -> bool {
    match check_batch(rng, batch) {
        Ok(ok) => ok,
        Err(err) => {
            debug!(%err, size = batch.len(), "signature batch rejected");
            false
        }
    }
}

fn check_batch<R: RngCore + ?Sized>(
    rng: &mut R,
    batch: &[(&[u8], &Signature, &VerifyingKey)],
) -> Result<bool, SchnorrError> {
    if batch.is_empty() {
        return Ok(true);
    }
    let grp = group()?;
    let one = BigNum::one();

    let mut sum = BigNum::zero().to_red(&grp.q)?;
    let mut rhs = BigNum::one().to_red(&grp.p)?;

    for (i, (msg, sig, pk)) in batch.iter().enumerate() {
        sig.check_ranges(grp)?;
        let e = Signature::challenge(&sig.r, pk, msg)?;

        let a = if i == 0 {
            one.clone()
        } else {
            BigNum::random_range(rng, &one, grp.order())?
        };
        let a_red = a.to_red(&grp.q)?;
        let ae = e.to_red(&grp.q)?.red_mul(&a_red)?.from_red()?;
        sum.red_iadd(&sig.s.to_red(&grp.q)?.red_mul(&a_red)?)?;

        let r_term = sig.r.to_red(&grp.p)?.red_pow(&a)?;
        let pk_term = pk.element().to_red(&grp.p)?.red_pow(&ae)?;
        rhs.red_imul(&r_term)?.red_imul(&pk_term)?;
    }

    let lhs = grp.exp_g(&sum.from_red()?)?;
    Ok(lhs.red_eq(&rhs)?)
}

impl TryFrom<String> for Signature {
    type Error = SchnorrError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Signature> for String {
    fn from(sig: Signature) -> Self {
        sig.to_hex()
    }
}
