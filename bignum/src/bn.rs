//! Signed arbitrary-precision integer with an optional ring tag.
//!
//! The value is kept in sign-magnitude form on top of [`num_bigint::BigInt`],
//! so zero is always positive and there are no leading zero limbs. Equality,
//! ordering and hashing look at the numeric value only; the ring tag is an
//! annotation checked by the operations that care about it.

use core::cmp::Ordering;
use core::fmt::{self, Debug, Display, Formatter, LowerHex};
use core::hash::{Hash, Hasher};
use core::str::FromStr;
use std::sync::Arc;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{BigNumError, BigNumResult};
use crate::red::Reduction;

/// Byte order used by buffer conversions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Endian {
    /// Most significant byte first.
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

/// Arbitrary-precision signed integer.
///
/// A value is either raw or tagged with the [`Reduction`] context it lives
/// in. Raw arithmetic rejects tagged values and ring arithmetic rejects raw
/// ones; see [`BigNum::to_red`] and [`BigNum::from_red`].
///
/// `==`, `Ord` and `Hash` compare the integer values only and ignore the
/// tag: a tagged value equals the raw value with the same digits, and values
/// from two contexts over the same modulus compare equal. Use
/// [`BigNum::red_eq`] for ring equality, which fails with
/// [`BigNumError::ContextMismatch`] across contexts.
#[derive(Clone, Default)]
pub struct BigNum {
    pub(crate) n: BigInt,
    pub(crate) red: Option<Arc<Reduction>>,
}

impl BigNum {
    #[inline]
    pub(crate) fn from_int(n: BigInt) -> Self {
        Self { n, red: None }
    }

    /// Builds a value from a sign and magnitude. `NoSign` is read as positive
    /// so a zero receiver's sign can be carried onto a non-zero magnitude.
    #[inline]
    pub(crate) fn from_parts(sign: Sign, magnitude: BigUint) -> Self {
        let sign = match sign {
            Sign::NoSign => Sign::Plus,
            sign => sign,
        };
        Self::from_int(BigInt::from_biguint(sign, magnitude))
    }

    /// Zero.
    pub fn zero() -> Self {
        Self::from_int(BigInt::zero())
    }

    /// One.
    pub fn one() -> Self {
        Self::from_int(BigInt::one())
    }

    /// Creates a value from a float, truncating toward zero. NaN and the
    /// infinities become zero.
    pub fn from_f64(value: f64) -> Self {
        Self::from_int(BigInt::from_f64(value).unwrap_or_default())
    }

    /// Interprets `bytes` as an unsigned magnitude of unbounded length.
    pub fn from_bytes(bytes: &[u8], endian: Endian) -> Self {
        let magnitude = match endian {
            Endian::Big => BigUint::from_bytes_be(bytes),
            Endian::Little => BigUint::from_bytes_le(bytes),
        };
        Self::from_parts(Sign::Plus, magnitude)
    }

    /// Serializes the magnitude into the smallest buffer that holds it.
    /// Zero encodes as a single zero byte. The sign is never encoded.
    pub fn to_bytes(&self, endian: Endian) -> Vec<u8> {
        match endian {
            Endian::Big => self.n.magnitude().to_bytes_be(),
            Endian::Little => self.n.magnitude().to_bytes_le(),
        }
    }

    /// Serializes the magnitude into exactly `len` bytes, zero-padded.
    ///
    /// # Errors
    ///
    /// Returns [`BigNumError::InsufficientLength`] if the magnitude needs
    /// more than `len` bytes.
    pub fn to_bytes_padded(&self, endian: Endian, len: usize) -> BigNumResult<Vec<u8>> {
        let needed = self.byte_length();
        if needed > len {
            return Err(BigNumError::InsufficientLength { needed, len });
        }

        let raw = self.n.magnitude().to_bytes_be();
        let mut out = vec![0u8; len];
        out[len - needed..].copy_from_slice(&raw[raw.len() - needed..]);

        if endian == Endian::Little {
            out.reverse();
        }

        Ok(out)
    }

    /// Parses a string in the given base (2 to 36).
    ///
    /// Tab, line feed, carriage return and space are skipped wherever they
    /// appear. A single leading `-` makes the value negative. Letters are
    /// case-insensitive digits 10 to 35.
    ///
    /// # Errors
    ///
    /// Fails with [`BigNumError::InvalidBase`], [`BigNumError::InvalidDigit`]
    /// or [`BigNumError::EmptyString`].
    pub fn from_str_radix(s: &str, base: u32) -> BigNumResult<Self> {
        check_base(base)?;

        let mut negative = false;
        let mut digits = Vec::with_capacity(s.len());

        for ch in s.chars() {
            match ch {
                '\t' | '\n' | '\r' | ' ' => continue,
                '-' if !negative && digits.is_empty() => negative = true,
                _ => {
                    let digit = ch
                        .to_digit(base)
                        .ok_or(BigNumError::InvalidDigit { ch, base })?;
                    digits.push(digit as u8);
                }
            }
        }

        if digits.is_empty() {
            return Err(BigNumError::EmptyString);
        }

        let magnitude = BigUint::from_radix_be(&digits, base).ok_or(BigNumError::EmptyString)?;
        let sign = if negative { Sign::Minus } else { Sign::Plus };

        Ok(Self::from_parts(sign, magnitude))
    }

    /// Formats the value in the given base with lowercase digits.
    ///
    /// With `padding > 0` the digits are left-padded with zeros to a
    /// multiple of `padding`; the sign is not counted.
    ///
    /// # Errors
    ///
    /// Fails with [`BigNumError::InvalidBase`] outside `2..=36`.
    pub fn to_str_radix(&self, base: u32, padding: usize) -> BigNumResult<String> {
        check_base(base)?;
        Ok(self.format_radix(base, padding))
    }

    fn format_radix(&self, base: u32, padding: usize) -> String {
        let digits = self.n.magnitude().to_str_radix(base);
        let pad = match padding {
            0 => 0,
            unit => (unit - digits.len() % unit) % unit,
        };

        let mut out = String::with_capacity(digits.len() + pad + 1);
        if self.is_neg() {
            out.push('-');
        }
        out.extend(core::iter::repeat('0').take(pad));
        out.push_str(&digits);
        out
    }

    /// Whether the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.n.is_zero()
    }

    /// Whether the value is one.
    #[inline]
    pub fn is_one(&self) -> bool {
        self.n.is_one()
    }

    /// Whether the value is strictly negative.
    #[inline]
    pub fn is_neg(&self) -> bool {
        self.n.is_negative()
    }

    #[inline]
    pub fn is_odd(&self) -> bool {
        self.n.is_odd()
    }

    #[inline]
    pub fn is_even(&self) -> bool {
        self.n.is_even()
    }

    /// Sign of the value: -1, 0 or 1.
    pub fn sign(&self) -> i32 {
        match self.n.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    /// Number of bits in the magnitude.
    #[inline]
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Number of bytes in the magnitude.
    #[inline]
    pub fn byte_length(&self) -> usize {
        self.n.bits().div_ceil(8) as usize
    }

    /// Count of trailing zero bits in the magnitude (zero for zero).
    #[inline]
    pub fn zero_bits(&self) -> u64 {
        self.n.trailing_zeros().unwrap_or(0)
    }

    /// Absolute value. The result is always raw.
    pub fn abs(&self) -> Self {
        Self::from_int(self.n.abs())
    }

    /// Compares magnitudes, ignoring signs.
    pub fn ucmp(&self, other: &Self) -> Ordering {
        self.n.magnitude().cmp(other.n.magnitude())
    }

    /// Compares against a machine integer.
    pub fn cmpn(&self, other: i64) -> Ordering {
        self.n.cmp(&BigInt::from(other))
    }

    /// Whether the value equals a machine integer.
    pub fn eqn(&self, other: i64) -> bool {
        self.cmpn(other) == Ordering::Equal
    }

    /// The value as `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.n.to_u64()
    }

    /// The value as `i64`, if it fits.
    pub fn to_i64(&self) -> Option<i64> {
        self.n.to_i64()
    }

    /// Nearest float; very large magnitudes become infinite.
    pub fn to_f64(&self) -> f64 {
        self.n.to_f64().unwrap_or(f64::NAN)
    }

    /// Whether this value carries a reduction context.
    #[inline]
    pub fn is_red(&self) -> bool {
        self.red.is_some()
    }

    /// The reduction context this value is tagged with, if any.
    #[inline]
    pub fn red_context(&self) -> Option<&Arc<Reduction>> {
        self.red.as_ref()
    }

    #[inline]
    pub(crate) fn ensure_raw(&self) -> BigNumResult<()> {
        match self.red {
            Some(_) => Err(BigNumError::AlreadyReduced),
            None => Ok(()),
        }
    }

    #[inline]
    pub(crate) fn ensure_red(&self) -> BigNumResult<&Arc<Reduction>> {
        self.red.as_ref().ok_or(BigNumError::NotReduced)
    }
}

#[inline]
fn check_base(base: u32) -> BigNumResult<()> {
    if (2..=36).contains(&base) {
        Ok(())
    } else {
        Err(BigNumError::InvalidBase(base))
    }
}

macro_rules! impl_from_prim {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigNum {
                #[inline]
                fn from(value: $t) -> Self {
                    Self::from_int(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_prim!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<BigInt> for BigNum {
    fn from(value: BigInt) -> Self {
        Self::from_int(value)
    }
}

impl From<&BigNum> for BigInt {
    fn from(value: &BigNum) -> Self {
        value.n.clone()
    }
}

/// Compares values only; the ring tag is ignored.
impl PartialEq for BigNum {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n
    }
}

impl Eq for BigNum {}

impl PartialOrd for BigNum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigNum {
    fn cmp(&self, other: &Self) -> Ordering {
        self.n.cmp(&other.n)
    }
}

impl Hash for BigNum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.n.hash(state);
    }
}

impl FromStr for BigNum {
    type Err = BigNumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(s, 10)
    }
}

impl Display for BigNum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_radix(10, 0))
    }
}

impl LowerHex for BigNum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_radix(16, 0))
    }
}

impl Debug for BigNum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.red {
            Some(red) => write!(f, "BigNum(0x{:x}, {:?})", self, red),
            None => write!(f, "BigNum(0x{:x})", self),
        }
    }
}

// Serialized as lowercase hex with an optional leading '-'. The ring tag is
// not part of the value and is dropped.
impl Serialize for BigNum {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format_radix(16, 0))
    }
}

impl<'de> Deserialize<'de> for BigNum {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str_radix(&s, 16).map_err(D::Error::custom)
    }
}
