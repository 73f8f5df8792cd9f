//! GCD, modular inverse and modular exponentiation.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::arith::euclid_mod;
use crate::error::{BigNumError, BigNumResult};
use crate::BigNum;

/// Extended Euclid. Returns `(x, y, g)` with `a*x + b*y = g = gcd(a, b)`.
pub(crate) fn egcd_int(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.abs(), b.abs());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let (q, rem) = old_r.div_rem(&r);
        old_r = core::mem::replace(&mut r, rem);
        let next_s = &old_s - &q * &s;
        old_s = core::mem::replace(&mut s, next_s);
        let next_t = &old_t - &q * &t;
        old_t = core::mem::replace(&mut t, next_t);
    }

    if a.is_negative() {
        old_s = -old_s;
    }
    if b.is_negative() {
        old_t = -old_t;
    }
    (old_s, old_t, old_r)
}

pub(crate) fn invert_int(a: &BigInt, m: &BigInt) -> BigNumResult<BigInt> {
    if !m.is_positive() {
        return Err(BigNumError::InvalidModulus);
    }
    if m.is_one() {
        return Err(BigNumError::NotInvertible);
    }
    let a = euclid_mod(a, m);
    let (x, _, g) = egcd_int(&a, m);
    if !g.is_one() {
        return Err(BigNumError::NotInvertible);
    }
    Ok(euclid_mod(&x, m))
}

pub(crate) fn powm_int(base: &BigInt, exp: &BigInt, m: &BigInt) -> BigNumResult<BigInt> {
    if !m.is_positive() {
        return Err(BigNumError::InvalidModulus);
    }
    if m.is_one() {
        return Ok(BigInt::zero());
    }
    let base = if exp.is_negative() {
        invert_int(base, m)?
    } else {
        euclid_mod(base, m)
    };
    Ok(base.modpow(&exp.abs(), m))
}

impl BigNum {
    /// Greatest common divisor, always non-negative.
    pub fn gcd(&self, rhs: &BigNum) -> BigNumResult<Self> {
        self.ensure_raw()?;
        rhs.ensure_raw()?;
        Ok(Self::from_int(self.n.gcd(&rhs.n)))
    }

    /// Extended GCD: returns `(x, y, g)` such that `self*x + rhs*y = g`.
    ///
    /// Bezout coefficients carry the signs of the inputs, so the identity
    /// holds for negative operands too.
    pub fn egcd(&self, rhs: &BigNum) -> BigNumResult<(Self, Self, Self)> {
        self.ensure_raw()?;
        rhs.ensure_raw()?;
        let (x, y, g) = egcd_int(&self.n, &rhs.n);
        Ok((Self::from_int(x), Self::from_int(y), Self::from_int(g)))
    }

    /// Modular inverse in `[0, m)`.
    ///
    /// Fails with [`BigNumError::InvalidModulus`] for `m <= 0` and with
    /// [`BigNumError::NotInvertible`] when `gcd(self, m) != 1` or `m == 1`.
    pub fn invert(&self, m: &BigNum) -> BigNumResult<Self> {
        self.ensure_raw()?;
        m.ensure_raw()?;
        invert_int(&self.n, &m.n).map(Self::from_int)
    }

    /// Inverse by Fermat's little theorem: `self^(p-2) mod p`.
    ///
    /// Only meaningful for prime `p`; the primality of `p` is not checked.
    pub fn fermat(&self, p: &BigNum) -> BigNumResult<Self> {
        self.ensure_raw()?;
        p.ensure_raw()?;
        if p.n < BigInt::from(2u32) {
            return Err(BigNumError::InvalidModulus);
        }
        let exp = &p.n - 2u32;
        let r = powm_int(&self.n, &exp, &p.n)?;
        if r.is_zero() {
            return Err(BigNumError::NotInvertible);
        }
        Ok(Self::from_int(r))
    }

    /// `self^exp mod m`, in `[0, m)`. A negative exponent inverts the base
    /// first.
    pub fn powm(&self, exp: &BigNum, m: &BigNum) -> BigNumResult<Self> {
        self.ensure_raw()?;
        exp.ensure_raw()?;
        m.ensure_raw()?;
        powm_int(&self.n, &exp.n, &m.n).map(Self::from_int)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: i64) -> BigNum {
        BigNum::from(v)
    }

    #[test]
    fn test_gcd() {
        assert_eq!(n(240).gcd(&n(46)).unwrap(), n(2));
        assert_eq!(n(-240).gcd(&n(46)).unwrap(), n(2));
        assert_eq!(n(0).gcd(&n(7)).unwrap(), n(7));
        assert_eq!(n(0).gcd(&n(0)).unwrap(), n(0));
    }

    #[test]
    fn test_egcd() {
        let (x, y, g) = n(240).egcd(&n(46)).unwrap();
        assert_eq!((x, y, g), (n(-9), n(47), n(2)));

        let (x, y, g) = n(-240).egcd(&n(46)).unwrap();
        assert_eq!((x.clone(), y.clone(), g.clone()), (n(9), n(47), n(2)));
        assert_eq!(&(&n(-240) * &x) + &(&n(46) * &y), g);
    }

    #[test]
    fn test_invert() {
        assert_eq!(n(3).invert(&n(7)).unwrap(), n(5));
        assert_eq!(n(-3).invert(&n(7)).unwrap(), n(2));
        assert_eq!(n(10).invert(&n(7)).unwrap(), n(5));
        assert_eq!(n(2).invert(&n(4)), Err(BigNumError::NotInvertible));
        assert_eq!(n(2).invert(&n(1)), Err(BigNumError::NotInvertible));
        assert_eq!(n(2).invert(&n(0)), Err(BigNumError::InvalidModulus));
        assert_eq!(n(2).invert(&n(-7)), Err(BigNumError::InvalidModulus));
    }

    #[test]
    fn test_fermat() {
        assert_eq!(n(3).fermat(&n(7)).unwrap(), n(5));
        assert_eq!(n(7).fermat(&n(7)), Err(BigNumError::NotInvertible));
        assert_eq!(n(3).fermat(&n(1)), Err(BigNumError::InvalidModulus));
    }

    #[test]
    fn test_powm() {
        assert_eq!(n(4).powm(&n(13), &n(497)).unwrap(), n(445));
        assert_eq!(n(-2).powm(&n(3), &n(5)).unwrap(), n(2));
        assert_eq!(n(3).powm(&n(-1), &n(7)).unwrap(), n(5));
        assert_eq!(n(3).powm(&n(0), &n(7)).unwrap(), n(1));
        assert_eq!(n(3).powm(&n(5), &n(1)).unwrap(), n(0));
        assert_eq!(n(3).powm(&n(5), &n(0)), Err(BigNumError::InvalidModulus));
        assert_eq!(n(2).powm(&n(-1), &n(4)), Err(BigNumError::NotInvertible));
    }
}
