//! Bitwise operations.
//!
//! `and`, `or`, `xor`, `not`, `shl` and `shr` treat signed values as
//! infinite-width two's complement, so `-1` is all ones and `shr` rounds
//! toward negative infinity. The `u`-prefixed variants work on the
//! magnitude alone and put the receiver's sign back afterwards. The two
//! families give different answers for negative inputs and callers rely on
//! both.
//!
//! Bit-indexed operations (`testn`, `setn`, `maskn`) address magnitude bits,
//! least significant bit first.

use num_bigint::{BigInt, BigUint};
use num_traits::One;

use crate::arith::euclid_mod;
use crate::error::{BigNumError, BigNumResult};
use crate::BigNum;

impl BigNum {
    fn with_magnitude(&self, magnitude: BigUint) -> Self {
        Self::from_parts(self.n.sign(), magnitude)
    }

    /// Two's-complement AND.
    pub fn and(&self, rhs: &BigNum) -> BigNumResult<Self> {
        self.ensure_raw()?;
        rhs.ensure_raw()?;
        Ok(Self::from_int(&self.n & &rhs.n))
    }

    pub fn iand(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        *self = self.and(rhs)?;
        Ok(self)
    }

    /// Two's-complement OR.
    pub fn or(&self, rhs: &BigNum) -> BigNumResult<Self> {
        self.ensure_raw()?;
        rhs.ensure_raw()?;
        Ok(Self::from_int(&self.n | &rhs.n))
    }

    pub fn ior(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        *self = self.or(rhs)?;
        Ok(self)
    }

    /// Two's-complement XOR.
    pub fn xor(&self, rhs: &BigNum) -> BigNumResult<Self> {
        self.ensure_raw()?;
        rhs.ensure_raw()?;
        Ok(Self::from_int(&self.n ^ &rhs.n))
    }

    pub fn ixor(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        *self = self.xor(rhs)?;
        Ok(self)
    }

    /// Two's-complement NOT, i.e. `-self - 1`.
    pub fn not(&self) -> BigNumResult<Self> {
        self.ensure_raw()?;
        Ok(Self::from_int(-&self.n - 1u32))
    }

    pub fn inot(&mut self) -> BigNumResult<&mut Self> {
        *self = self.not()?;
        Ok(self)
    }

    /// Shifts left by `bits`.
    pub fn shl(&self, bits: u64) -> BigNumResult<Self> {
        self.ensure_raw()?;
        Ok(Self::from_int(&self.n << bits))
    }

    pub fn ishl(&mut self, bits: u64) -> BigNumResult<&mut Self> {
        self.ensure_raw()?;
        self.n <<= bits;
        Ok(self)
    }

    /// Arithmetic shift right; negative values round toward negative infinity.
    pub fn shr(&self, bits: u64) -> BigNumResult<Self> {
        self.ensure_raw()?;
        Ok(Self::from_int(&self.n >> bits))
    }

    pub fn ishr(&mut self, bits: u64) -> BigNumResult<&mut Self> {
        self.ensure_raw()?;
        self.n >>= bits;
        Ok(self)
    }

    /// AND of the magnitudes, keeping the receiver's sign.
    pub fn uand(&self, rhs: &BigNum) -> BigNumResult<Self> {
        self.ensure_raw()?;
        rhs.ensure_raw()?;
        Ok(self.with_magnitude(self.n.magnitude() & rhs.n.magnitude()))
    }

    pub fn iuand(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        *self = self.uand(rhs)?;
        Ok(self)
    }

    /// OR of the magnitudes, keeping the receiver's sign.
    pub fn uor(&self, rhs: &BigNum) -> BigNumResult<Self> {
        self.ensure_raw()?;
        rhs.ensure_raw()?;
        Ok(self.with_magnitude(self.n.magnitude() | rhs.n.magnitude()))
    }

    pub fn iuor(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        *self = self.uor(rhs)?;
        Ok(self)
    }

    /// XOR of the magnitudes, keeping the receiver's sign.
    pub fn uxor(&self, rhs: &BigNum) -> BigNumResult<Self> {
        self.ensure_raw()?;
        rhs.ensure_raw()?;
        Ok(self.with_magnitude(self.n.magnitude() ^ rhs.n.magnitude()))
    }

    pub fn iuxor(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        *self = self.uxor(rhs)?;
        Ok(self)
    }

    /// Shifts the magnitude right, keeping the sign: rounds toward zero.
    pub fn ushr(&self, bits: u64) -> BigNumResult<Self> {
        self.ensure_raw()?;
        Ok(self.with_magnitude(self.n.magnitude() >> bits))
    }

    pub fn iushr(&mut self, bits: u64) -> BigNumResult<&mut Self> {
        *self = self.ushr(bits)?;
        Ok(self)
    }

    /// Tests bit `bit` of the magnitude.
    #[inline]
    pub fn testn(&self, bit: u64) -> bool {
        self.n.magnitude().bit(bit)
    }

    /// Returns a copy with magnitude bit `bit` set to `value`.
    pub fn setn(&self, bit: u64, value: bool) -> BigNumResult<Self> {
        self.ensure_raw()?;
        let mut magnitude = self.n.magnitude().clone();
        magnitude.set_bit(bit, value);
        Ok(self.with_magnitude(magnitude))
    }

    pub fn isetn(&mut self, bit: u64, value: bool) -> BigNumResult<&mut Self> {
        *self = self.setn(bit, value)?;
        Ok(self)
    }

    /// Keeps the low `bits` bits of the magnitude, preserving the sign.
    pub fn maskn(&self, bits: u64) -> BigNumResult<Self> {
        self.ensure_raw()?;
        let mask = (BigUint::one() << bits) - 1u32;
        Ok(self.with_magnitude(self.n.magnitude() & mask))
    }

    pub fn imaskn(&mut self, bits: u64) -> BigNumResult<&mut Self> {
        *self = self.maskn(bits)?;
        Ok(self)
    }

    /// Encodes the value as a `width`-bit two's-complement pattern.
    ///
    /// Non-negative values are returned unchanged; negative values become
    /// `self mod 2^width`.
    pub fn to_twos(&self, width: u64) -> BigNumResult<Self> {
        self.ensure_raw()?;
        if !self.is_neg() {
            return Ok(self.clone());
        }
        let modulus = BigInt::one() << width;
        Ok(Self::from_int(euclid_mod(&self.n, &modulus)))
    }

    /// Decodes a `width`-bit two's-complement pattern.
    ///
    /// Only the low `width` bits are read; if the top one is set the result
    /// is negative.
    pub fn from_twos(&self, width: u64) -> BigNumResult<Self> {
        self.ensure_raw()?;
        if width == 0 {
            return Err(BigNumError::InvalidWidth);
        }
        let modulus = BigInt::one() << width;
        let low = euclid_mod(&self.n, &modulus);
        if low.bit(width - 1) {
            Ok(Self::from_int(low - modulus))
        } else {
            Ok(Self::from_int(low))
        }
    }
}
