//! Raw (non-modular) arithmetic.
//!
//! Three division families are provided and they differ only in how the
//! quotient is rounded:
//!
//! * truncating (`quo`, `rem`): remainder takes the dividend's sign,
//! * Euclidean (`div`, `modulo`): remainder is always in `[0, |d|)`,
//! * round (`div_round`): nearest quotient, ties away from zero.
//!
//! The operator traits panic when an operand is ring-tagged; the named
//! methods report [`BigNumError::AlreadyReduced`] instead.

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{BigNumError, BigNumResult};
use crate::BigNum;

#[inline]
#[track_caller]
fn assert_raw(lhs: &BigNum, rhs: &BigNum) {
    assert!(
        lhs.red.is_none() && rhs.red.is_none(),
        "raw arithmetic on a ring-tagged value"
    );
}

macro_rules! forward_binop {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident) => {
        impl $Op<&BigNum> for &BigNum {
            type Output = BigNum;

            #[inline]
            fn $op(self, rhs: &BigNum) -> BigNum {
                assert_raw(self, rhs);
                BigNum::from_int((&self.n).$op(&rhs.n))
            }
        }

        impl $Op<&BigNum> for BigNum {
            type Output = BigNum;

            #[inline]
            fn $op(self, rhs: &BigNum) -> BigNum {
                (&self).$op(rhs)
            }
        }

        impl $Op<BigNum> for &BigNum {
            type Output = BigNum;

            #[inline]
            fn $op(self, rhs: BigNum) -> BigNum {
                self.$op(&rhs)
            }
        }

        impl $Op for BigNum {
            type Output = BigNum;

            #[inline]
            fn $op(self, rhs: BigNum) -> BigNum {
                (&self).$op(&rhs)
            }
        }

        impl $OpAssign<&BigNum> for BigNum {
            #[inline]
            fn $op_assign(&mut self, rhs: &BigNum) {
                assert_raw(self, rhs);
                self.n.$op_assign(&rhs.n);
            }
        }

        impl $OpAssign for BigNum {
            #[inline]
            fn $op_assign(&mut self, rhs: BigNum) {
                self.$op_assign(&rhs);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);

impl Neg for &BigNum {
    type Output = BigNum;

    #[inline]
    fn neg(self) -> BigNum {
        assert!(self.red.is_none(), "raw arithmetic on a ring-tagged value");
        BigNum::from_int(-&self.n)
    }
}

impl Neg for BigNum {
    type Output = BigNum;

    #[inline]
    fn neg(self) -> BigNum {
        -&self
    }
}

/// Euclidean quotient and remainder: `a = q*b + r` with `0 <= r < |b|`.
pub(crate) fn euclid_divmod(a: &BigInt, b: &BigInt) -> (BigInt, BigInt) {
    let (mut q, mut r) = a.div_rem(b);
    if r.is_negative() {
        if b.is_positive() {
            r += b;
            q -= 1u32;
        } else {
            r -= b;
            q += 1u32;
        }
    }
    (q, r)
}

/// Euclidean remainder, always in `[0, |b|)`.
#[inline]
pub(crate) fn euclid_mod(a: &BigInt, b: &BigInt) -> BigInt {
    let r = a % b;
    if r.is_negative() {
        r + b.abs()
    } else {
        r
    }
}

pub(crate) fn pow_int(base: &BigInt, exp: &BigInt) -> BigInt {
    let mut result = BigInt::one();
    for i in (0..exp.bits()).rev() {
        result = &result * &result;
        if exp.bit(i) {
            result *= base;
        }
    }
    result
}

impl BigNum {
    #[inline]
    fn ensure_raw_pair(&self, rhs: &BigNum) -> BigNumResult<()> {
        self.ensure_raw()?;
        rhs.ensure_raw()
    }

    #[inline]
    fn ensure_divisor(&self, rhs: &BigNum) -> BigNumResult<()> {
        self.ensure_raw_pair(rhs)?;
        if rhs.is_zero() {
            return Err(BigNumError::DivisionByZero);
        }
        Ok(())
    }

    /// `self += rhs`.
    pub fn iadd(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        self.ensure_raw_pair(rhs)?;
        self.n += &rhs.n;
        Ok(self)
    }

    /// `self -= rhs`.
    pub fn isub(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        self.ensure_raw_pair(rhs)?;
        self.n -= &rhs.n;
        Ok(self)
    }

    /// `self *= rhs`.
    pub fn imul(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        self.ensure_raw_pair(rhs)?;
        self.n *= &rhs.n;
        Ok(self)
    }

    /// Squares in place.
    pub fn isqr(&mut self) -> BigNumResult<&mut Self> {
        self.ensure_raw()?;
        self.n = &self.n * &self.n;
        Ok(self)
    }

    /// Returns `self^2`.
    pub fn sqr(&self) -> BigNumResult<Self> {
        self.ensure_raw()?;
        Ok(Self::from_int(&self.n * &self.n))
    }

    /// Negates in place.
    pub fn ineg(&mut self) -> BigNumResult<&mut Self> {
        self.ensure_raw()?;
        self.n = -core::mem::take(&mut self.n);
        Ok(self)
    }

    /// Replaces the value with its absolute value.
    pub fn iabs(&mut self) -> BigNumResult<&mut Self> {
        self.ensure_raw()?;
        if self.n.is_negative() {
            self.n = -core::mem::take(&mut self.n);
        }
        Ok(self)
    }

    /// Truncating quotient and remainder.
    pub fn quorem(&self, rhs: &BigNum) -> BigNumResult<(Self, Self)> {
        self.ensure_divisor(rhs)?;
        let (q, r) = self.n.div_rem(&rhs.n);
        Ok((Self::from_int(q), Self::from_int(r)))
    }

    /// Quotient rounded toward zero.
    pub fn quo(&self, rhs: &BigNum) -> BigNumResult<Self> {
        self.ensure_divisor(rhs)?;
        Ok(Self::from_int(&self.n / &rhs.n))
    }

    pub fn iquo(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        self.ensure_divisor(rhs)?;
        self.n = &self.n / &rhs.n;
        Ok(self)
    }

    /// Remainder with the sign of the dividend.
    pub fn rem(&self, rhs: &BigNum) -> BigNumResult<Self> {
        self.ensure_divisor(rhs)?;
        Ok(Self::from_int(&self.n % &rhs.n))
    }

    pub fn irem(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        self.ensure_divisor(rhs)?;
        self.n = &self.n % &rhs.n;
        Ok(self)
    }

    /// Euclidean quotient and remainder.
    pub fn divmod(&self, rhs: &BigNum) -> BigNumResult<(Self, Self)> {
        self.ensure_divisor(rhs)?;
        let (q, r) = euclid_divmod(&self.n, &rhs.n);
        Ok((Self::from_int(q), Self::from_int(r)))
    }

    /// Euclidean quotient, paired with [`BigNum::modulo`].
    pub fn div(&self, rhs: &BigNum) -> BigNumResult<Self> {
        Ok(self.divmod(rhs)?.0)
    }

    pub fn idiv(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        self.ensure_divisor(rhs)?;
        self.n = euclid_divmod(&self.n, &rhs.n).0;
        Ok(self)
    }

    /// Euclidean remainder in `[0, |rhs|)`.
    pub fn modulo(&self, rhs: &BigNum) -> BigNumResult<Self> {
        self.ensure_divisor(rhs)?;
        Ok(Self::from_int(euclid_mod(&self.n, &rhs.n)))
    }

    pub fn imod(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        self.ensure_divisor(rhs)?;
        self.n = euclid_mod(&self.n, &rhs.n);
        Ok(self)
    }

    /// Quotient rounded to the nearest integer, ties away from zero.
    pub fn div_round(&self, rhs: &BigNum) -> BigNumResult<Self> {
        self.ensure_divisor(rhs)?;
        Ok(Self::from_int(div_round_int(&self.n, &rhs.n)))
    }

    pub fn idiv_round(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        self.ensure_divisor(rhs)?;
        self.n = div_round_int(&self.n, &rhs.n);
        Ok(self)
    }

    /// Raises to a non-negative power by repeated squaring.
    ///
    /// # Errors
    ///
    /// Returns [`BigNumError::NegativeValue`] for a negative exponent.
    pub fn pow(&self, exp: &BigNum) -> BigNumResult<Self> {
        self.ensure_raw_pair(exp)?;
        if exp.is_neg() {
            return Err(BigNumError::NegativeValue("exponent"));
        }
        Ok(Self::from_int(pow_int(&self.n, &exp.n)))
    }

    pub fn ipow(&mut self, exp: &BigNum) -> BigNumResult<&mut Self> {
        *self = self.pow(exp)?;
        Ok(self)
    }

    /// Raises to a machine-sized power.
    pub fn pown(&self, exp: u32) -> BigNumResult<Self> {
        self.ensure_raw()?;
        Ok(Self::from_int(num_traits::pow(self.n.clone(), exp as usize)))
    }

    /// Integer square root of the magnitude, rounded down.
    pub fn isqrt(&self) -> BigNumResult<Self> {
        self.ensure_raw()?;
        if self.is_neg() {
            return Err(BigNumError::NegativeValue("radicand"));
        }
        Ok(Self::from_int(self.n.sqrt()))
    }

    /// Whether the value is a perfect square. Negative values never are.
    pub fn is_square(&self) -> bool {
        is_square_int(&self.n)
    }
}

fn div_round_int(a: &BigInt, b: &BigInt) -> BigInt {
    let half = BigInt::from_biguint(Sign::Plus, b.magnitude() >> 1u32);
    let adjusted = if a.is_negative() { a - half } else { a + half };
    adjusted / b
}

pub(crate) fn is_square_int(n: &BigInt) -> bool {
    if n.is_negative() {
        return false;
    }
    if n.is_zero() {
        return true;
    }
    let root = n.sqrt();
    &root * &root == *n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reduction;

    fn n(v: i64) -> BigNum {
        BigNum::from(v)
    }

    #[test]
    fn test_operators() {
        assert_eq!(&n(7) + &n(-9), n(-2));
        assert_eq!(n(7) - n(-9), n(16));
        assert_eq!(&n(-6) * n(7), n(-42));
        assert_eq!(-n(5), n(-5));

        let mut a = n(10);
        a += n(5);
        a -= &n(3);
        a *= n(-2);
        assert_eq!(a, n(-24));
    }

    #[test]
    fn test_in_place_chaining() {
        let mut a = n(3);
        a.iadd(&n(4)).unwrap().imul(&n(5)).unwrap().isqr().unwrap();
        assert_eq!(a, n(1225));
        a.ineg().unwrap();
        assert_eq!(a, n(-1225));
        a.iabs().unwrap();
        assert_eq!(a, n(1225));
    }

    #[test]
    fn test_truncating_division() {
        assert_eq!(n(7).quorem(&n(2)).unwrap(), (n(3), n(1)));
        assert_eq!(n(-7).quorem(&n(2)).unwrap(), (n(-3), n(-1)));
        assert_eq!(n(7).quorem(&n(-2)).unwrap(), (n(-3), n(1)));
        assert_eq!(n(-7).quorem(&n(-2)).unwrap(), (n(3), n(-1)));
        assert_eq!(n(-6).rem(&n(3)).unwrap(), n(0));
    }

    #[test]
    fn test_euclidean_division() {
        assert_eq!(n(7).divmod(&n(2)).unwrap(), (n(3), n(1)));
        assert_eq!(n(-7).divmod(&n(2)).unwrap(), (n(-4), n(1)));
        assert_eq!(n(7).divmod(&n(-2)).unwrap(), (n(-3), n(1)));
        assert_eq!(n(-7).divmod(&n(-2)).unwrap(), (n(4), n(1)));
        assert_eq!(n(-6).modulo(&n(3)).unwrap(), n(0));

        let mut a = n(-13);
        a.imod(&n(5)).unwrap();
        assert_eq!(a, n(2));
    }

    #[test]
    fn test_round_division() {
        assert_eq!(n(7).div_round(&n(2)).unwrap(), n(4));
        assert_eq!(n(-7).div_round(&n(2)).unwrap(), n(-4));
        assert_eq!(n(7).div_round(&n(-2)).unwrap(), n(-4));
        assert_eq!(n(5).div_round(&n(3)).unwrap(), n(2));
        assert_eq!(n(4).div_round(&n(3)).unwrap(), n(1));
        assert_eq!(n(-5).div_round(&n(3)).unwrap(), n(-2));
        assert_eq!(n(-4).div_round(&n(3)).unwrap(), n(-1));
        assert_eq!(n(9).div_round(&n(3)).unwrap(), n(3));
    }

    #[test]
    fn test_division_by_zero() {
        let zero = BigNum::zero();
        assert_eq!(n(1).quo(&zero), Err(BigNumError::DivisionByZero));
        assert_eq!(n(1).rem(&zero), Err(BigNumError::DivisionByZero));
        assert_eq!(n(1).div(&zero), Err(BigNumError::DivisionByZero));
        assert_eq!(n(1).modulo(&zero), Err(BigNumError::DivisionByZero));
        assert_eq!(n(1).div_round(&zero), Err(BigNumError::DivisionByZero));
    }

    #[test]
    fn test_pow() {
        assert_eq!(n(3).pow(&n(5)).unwrap(), n(243));
        assert_eq!(n(-2).pow(&n(3)).unwrap(), n(-8));
        assert_eq!(n(0).pow(&n(0)).unwrap(), n(1));
        assert_eq!(n(2).pown(100).unwrap(), BigNum::from(1u128 << 100));
        assert_eq!(
            n(2).pow(&n(-1)),
            Err(BigNumError::NegativeValue("exponent"))
        );
    }

    #[test]
    fn test_squares() {
        assert!(n(144).is_square());
        assert!(!n(145).is_square());
        assert!(!n(-4).is_square());
        assert_eq!(n(145).isqrt().unwrap(), n(12));
    }

    #[test]
    fn test_rejects_tagged() {
        let red = Reduction::new(&n(13)).unwrap();
        let a = n(5).to_red(&red).unwrap();
        assert_eq!(a.quo(&n(2)), Err(BigNumError::AlreadyReduced));
        assert_eq!(n(2).modulo(&a), Err(BigNumError::AlreadyReduced));
        assert_eq!(a.sqr(), Err(BigNumError::AlreadyReduced));
    }

    #[test]
    #[should_panic(expected = "ring-tagged")]
    fn test_operator_panics_on_tagged() {
        let red = Reduction::new(&n(13)).unwrap();
        let a = n(5).to_red(&red).unwrap();
        let _ = &a + &n(1);
    }
}
