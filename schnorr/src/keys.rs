//! Signing and verifying keys for the Schnorr signature scheme.

use core::fmt;

use bignum::{BigNum, Endian, RandomBigNum};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::constants::{PK_SIZE, SK_SIZE};
use crate::errors::SchnorrError;
use crate::group::{decode_fixed, encode_fixed, group};
use crate::signatures::Signature;

/// A secret signing key for creating Schnorr signatures.
///
/// The signing key is a scalar `d` in `[1, q)`, where `q` is the order of
/// the signing group. It must be kept secret and protected from unauthorized
/// access.
///
/// # Example
///
/// ```
/// use schnorr::SigningKey;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let signing_key = SigningKey::random(&mut rng).unwrap();
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SigningKey {
    scalar: BigNum,
}

/// A public verifying key for verifying Schnorr signatures.
///
/// The verifying key is the group element `g^d mod p`, derived from the
/// signing key `d`.
///
/// # Example
///
/// ```
/// use schnorr::SigningKey;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let signing_key = SigningKey::random(&mut rng).unwrap();
/// let verifying_key = signing_key.verifying_key().unwrap();
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerifyingKey {
    element: BigNum,
}

/// Reads a tweak: any value in `[0, q)`.
fn tweak_scalar(tweak: &[u8]) -> Result<BigNum, SchnorrError> {
    let t = decode_fixed::<SK_SIZE>(tweak)?;
    if &t >= group()?.order() {
        return Err(SchnorrError::InvalidScalar);
    }
    Ok(t)
}

impl SigningKey {
    fn from_scalar(scalar: BigNum) -> Result<Self, SchnorrError> {
        if !group()?.is_scalar(&scalar) {
            return Err(SchnorrError::InvalidScalar);
        }
        Ok(Self { scalar })
    }

    /// Generates a random signing key using the provided random number generator.
    ///
    /// # Arguments
    ///
    /// * `rng` - A cryptographically secure random number generator
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self, SchnorrError> {
        let q = group()?.order();
        let scalar = BigNum::random_range(rng, &BigNum::one(), q)?;
        Ok(Self { scalar })
    }

    /// Parses a 32-byte big-endian scalar, which must lie in `[1, q)`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        Self::from_scalar(decode_fixed::<SK_SIZE>(bytes)?)
    }

    /// Reduces arbitrary bytes modulo `q` into a key. Fails only if the
    /// result is zero.
    pub fn reduce(bytes: &[u8]) -> Result<Self, SchnorrError> {
        let q = group()?.order();
        let scalar = BigNum::from_bytes(bytes, Endian::Big).modulo(q)?;
        Self::from_scalar(scalar)
    }

    pub fn to_bytes(&self) -> [u8; SK_SIZE] {
        encode_fixed::<SK_SIZE>(&self.scalar)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_hex(s: &str) -> Result<Self, SchnorrError> {
        Self::from_bytes(&hex::decode(s)?)
    }

    /// Derives the public verifying key from this signing key.
    ///
    /// The verifying key is computed as `g^d mod p` where `g` generates the
    /// order-`q` subgroup and `d` is the secret scalar.
    pub fn verifying_key(&self) -> Result<VerifyingKey, SchnorrError> {
        let element = group()?.exp_g(&self.scalar)?.from_red()?;
        Ok(VerifyingKey { element })
    }

    /// Signs a message using this signing key.
    ///
    /// The signature is computed deterministically:
    /// 1. Derive the nonce `k = H(sk || msg) mod q`
    /// 2. Compute `R = g^k mod p`
    /// 3. Compute challenge `e = H(R || pk || msg) mod q` using SHA-256
    /// 4. Compute `s = k + e * sk mod q`
    /// 5. Return signature `(R, s)`
    ///
    /// Signing the same message twice with the same key gives the same
    /// signature.
    ///
    /// # Example
    ///
    /// ```
    /// use schnorr::SigningKey;
    ///
    /// let signing_key = SigningKey::from_bytes(&[7u8; 32]).unwrap();
    /// let a = signing_key.sign(b"hello").unwrap();
    /// let b = signing_key.sign(b"hello").unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn sign(&self, msg: &[u8]) -> Result<Signature, SchnorrError> {
        let grp = group()?;
        let pk = self.verifying_key()?;

        let nonce = grp.hash_to_scalar(&[self.to_bytes().as_slice(), msg])?;
        if nonce.is_zero() {
            return Err(SchnorrError::InvalidNonce);
        }
        let r = grp.exp_g(&nonce)?.from_red()?;

        let e = Signature::challenge(&r, &pk, msg)?;

        // s = k + e * d in Z_q
        let k = nonce.to_red(&grp.q)?;
        let e = e.to_red(&grp.q)?;
        let d = self.scalar.to_red(&grp.q)?;
        let s = k.red_add(&e.red_mul(&d)?)?.from_red()?;

        Ok(Signature::new(r, s))
    }

    /// Returns `sk + tweak mod q`.
    pub fn tweak_add(&self, tweak: &[u8]) -> Result<Self, SchnorrError> {
        let q = &group()?.q;
        let t = tweak_scalar(tweak)?.to_red(q)?;
        let d = self.scalar.to_red(q)?.red_add(&t)?;
        Self::from_scalar(d.from_red()?)
    }

    /// Returns `sk * tweak mod q`.
    pub fn tweak_mul(&self, tweak: &[u8]) -> Result<Self, SchnorrError> {
        let q = &group()?.q;
        let t = tweak_scalar(tweak)?.to_red(q)?;
        let d = self.scalar.to_red(q)?.red_mul(&t)?;
        Self::from_scalar(d.from_red()?)
    }

    /// Returns `-sk mod q`.
    pub fn negate(&self) -> Result<Self, SchnorrError> {
        let q = &group()?.q;
        let d = self.scalar.to_red(q)?.red_neg()?;
        Self::from_scalar(d.from_red()?)
    }

    /// Returns `sk^-1 mod q`.
    pub fn invert(&self) -> Result<Self, SchnorrError> {
        let q = group()?.order();
        Self::from_scalar(self.scalar.invert(q)?)
    }

    /// Diffie-Hellman: the shared element `pk^sk mod p` as 64 bytes.
    ///
    /// Both sides of an exchange arrive at the same value,
    /// `g^(a*b) mod p`.
    ///
    /// # Example
    ///
    /// ```
    /// use schnorr::SigningKey;
    ///
    /// let alice = SigningKey::from_bytes(&[3u8; 32]).unwrap();
    /// let bob = SigningKey::from_bytes(&[5u8; 32]).unwrap();
    /// let ab = alice.derive(&bob.verifying_key().unwrap()).unwrap();
    /// let ba = bob.derive(&alice.verifying_key().unwrap()).unwrap();
    /// assert_eq!(ab, ba);
    /// ```
    pub fn derive(&self, pk: &VerifyingKey) -> Result<[u8; PK_SIZE], SchnorrError> {
        let p = &group()?.p;
        let shared = pk.element.to_red(p)?.red_pow(&self.scalar)?.from_red()?;
        Ok(encode_fixed::<PK_SIZE>(&shared))
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

impl VerifyingKey {
    /// Parses a 64-byte big-endian group element.
    ///
    /// The value must lie in `(1, p)` and belong to the order-`q` subgroup.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        let element = decode_fixed::<PK_SIZE>(bytes)?;
        if !group()?.is_element(&element)? {
            return Err(SchnorrError::InvalidPoint);
        }
        Ok(Self { element })
    }

    pub fn to_bytes(&self) -> [u8; PK_SIZE] {
        encode_fixed::<PK_SIZE>(&self.element)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_hex(s: &str) -> Result<Self, SchnorrError> {
        Self::from_bytes(&hex::decode(s)?)
    }

    pub(crate) fn element(&self) -> &BigNum {
        &self.element
    }

    /// Verifies a signature on a message using this verifying key.
    ///
    /// The verification checks whether the signature equation holds:
    /// `g^s == R * pk^e (mod p)`, where:
    /// - `g` is the subgroup generator
    /// - `s` is the signature scalar
    /// - `R` is the signature commitment
    /// - `pk` is this verifying key
    /// - `e = H(R || pk || msg)` is the challenge hash
    ///
    /// Malformed signatures and arithmetic failures are reported as `false`.
    ///
    /// # Example
    ///
    /// ```
    /// use schnorr::SigningKey;
    ///
    /// let signing_key = SigningKey::from_bytes(&[7u8; 32]).unwrap();
    /// let verifying_key = signing_key.verifying_key().unwrap();
    /// let signature = signing_key.sign(b"hello").unwrap();
    /// assert!(verifying_key.verify(b"hello", &signature));
    /// assert!(!verifying_key.verify(b"hellp", &signature));
    /// ```
    pub fn verify(&self, msg: &[u8], sig: &Signature) -> bool {
        match sig.check(self, msg) {
            Ok(ok) => ok,
            Err(err) => {
                tracing::debug!(%err, "signature rejected");
                false
            }
        }
    }

    /// Returns `pk * g^tweak mod p`, the key of [`SigningKey::tweak_add`].
    pub fn tweak_add(&self, tweak: &[u8]) -> Result<Self, SchnorrError> {
        let grp = group()?;
        let t = grp.exp_g(&tweak_scalar(tweak)?)?;
        let y = self.element.to_red(&grp.p)?.red_mul(&t)?.from_red()?;
        if y.is_one() {
            return Err(SchnorrError::InvalidPoint);
        }
        Ok(Self { element: y })
    }

    /// Returns `pk^tweak mod p`, the key of [`SigningKey::tweak_mul`].
    pub fn tweak_mul(&self, tweak: &[u8]) -> Result<Self, SchnorrError> {
        let grp = group()?;
        let t = tweak_scalar(tweak)?;
        if t.is_zero() {
            return Err(SchnorrError::InvalidScalar);
        }
        let y = self.element.to_red(&grp.p)?.red_pow(&t)?.from_red()?;
        Ok(Self { element: y })
    }
}

impl VerifyingKey {
    /// Returns `pk^-1 mod p`, the key of [`SigningKey::negate`].
    pub fn negate(&self) -> Result<Self, SchnorrError> {
        let p = &group()?.p;
        let y = self.element.to_red(p)?.red_invert()?.from_red()?;
        Ok(Self { element: y })
    }

    /// Returns `pk * other mod p`, the key of the summed secret scalars.
    pub fn add_key(&self, other: &VerifyingKey) -> Result<Self, SchnorrError> {
        Self::combine(&[self, other])
    }

    /// Multiplies keys together: `pk_1 * pk_2 * ... mod p`.
    ///
    /// Fails with [`SchnorrError::InvalidPoint`] for an empty list or when
    /// the product collapses to the identity.
    pub fn combine(keys: &[&VerifyingKey]) -> Result<Self, SchnorrError> {
        let (first, rest) = keys.split_first().ok_or(SchnorrError::InvalidPoint)?;
        let p = &group()?.p;
        let mut acc = first.element.to_red(p)?;
        for key in rest {
            acc.red_imul(&key.element.to_red(p)?)?;
        }
        let y = acc.from_red()?;
        if y.is_one() {
            return Err(SchnorrError::InvalidPoint);
        }
        Ok(Self { element: y })
    }
}

impl TryFrom<&SigningKey> for VerifyingKey {
    type Error = SchnorrError;

    /// Equivalent to calling `signing_key.verifying_key()`.
    fn try_from(sk: &SigningKey) -> Result<Self, Self::Error> {
        sk.verifying_key()
    }
}

impl TryFrom<String> for SigningKey {
    type Error = SchnorrError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<SigningKey> for String {
    fn from(sk: SigningKey) -> Self {
        sk.to_hex()
    }
}

impl TryFrom<String> for VerifyingKey {
    type Error = SchnorrError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<VerifyingKey> for String {
    fn from(vk: VerifyingKey) -> Self {
        vk.to_hex()
    }
}
