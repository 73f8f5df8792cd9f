//! Legendre, Jacobi and Kronecker symbols.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::arith::euclid_mod;
use crate::error::{BigNumError, BigNumResult};
use crate::gcd::powm_int;
use crate::BigNum;

/// `(a/2)` indexed by `a mod 8`.
const KRONECKER_TAB: [i32; 8] = [0, 1, 0, -1, 0, -1, 0, 1];

/// Least significant 64 bits of the magnitude.
#[inline]
fn low_word(n: &BigInt) -> u64 {
    n.magnitude().iter_u64_digits().next().unwrap_or(0)
}

#[inline]
fn trailing_zeros(n: &BigInt) -> u64 {
    n.trailing_zeros().unwrap_or(0)
}

/// Jacobi symbol `(a/b)` for odd `b`. Negative `b` is allowed.
pub(crate) fn jacobi_int(a: &BigInt, b: &BigInt) -> BigNumResult<i32> {
    if b.is_zero() || low_word(b) & 1 == 0 {
        return Err(BigNumError::NotOdd);
    }

    let mut a = a.clone();
    let mut b = b.clone();
    let mut j = 1;

    if b.is_negative() {
        if a.is_negative() {
            j = -1;
        }
        b = -b;
    }

    loop {
        if b.is_one() {
            return Ok(j);
        }
        if a.is_zero() {
            return Ok(0);
        }
        a = euclid_mod(&a, &b);
        if a.is_zero() {
            return Ok(0);
        }

        let s = trailing_zeros(&a);
        if s & 1 != 0 {
            let bmod8 = low_word(&b) & 7;
            if bmod8 == 3 || bmod8 == 5 {
                j = -j;
            }
        }
        let c = &a >> s;

        if low_word(&b) & 3 == 3 && low_word(&c) & 3 == 3 {
            j = -j;
        }
        a = b;
        b = c;
    }
}

/// Kronecker symbol `(a/b)`, defined for every `b`.
pub(crate) fn kronecker_int(a: &BigInt, b: &BigInt) -> i32 {
    if b.is_zero() {
        return i32::from(a.magnitude().is_one());
    }
    if low_word(a) & 1 == 0 && low_word(b) & 1 == 0 {
        return 0;
    }

    let mut a = a.clone();
    let mut b = b.clone();

    let shift = trailing_zeros(&b);
    b >>= shift;
    let mut ret = if shift & 1 != 0 {
        KRONECKER_TAB[(low_word(&a) & 7) as usize]
    } else {
        1
    };

    if b.is_negative() {
        b = -b;
        if a.is_negative() {
            ret = -ret;
        }
    }

    // b is positive and odd from here on.
    loop {
        if a.is_zero() {
            return if b.is_one() { ret } else { 0 };
        }

        let shift = trailing_zeros(&a);
        a >>= shift;
        if shift & 1 != 0 {
            ret *= KRONECKER_TAB[(low_word(&b) & 7) as usize];
        }

        // (-1)^((a-1)(b-1)/4), reading a's low bits in two's complement.
        let a_low = if a.is_negative() {
            !low_word(&a)
        } else {
            low_word(&a)
        };
        if a_low & low_word(&b) & 2 != 0 {
            ret = -ret;
        }

        let next_a = euclid_mod(&b, &a);
        b = a.abs();
        a = next_a;
    }
}

/// Legendre symbol via Euler's criterion.
pub(crate) fn legendre_int(a: &BigInt, p: &BigInt) -> BigNumResult<i32> {
    if !p.is_positive() || low_word(p) & 1 == 0 {
        return Err(BigNumError::NotOdd);
    }
    let e = (p - 1u32) >> 1u32;
    let r = powm_int(a, &e, p)?;
    if r.is_zero() {
        Ok(0)
    } else if r.is_one() {
        Ok(1)
    } else if r == p - 1u32 {
        Ok(-1)
    } else {
        Err(BigNumError::InvalidPrime)
    }
}

impl BigNum {
    /// Legendre symbol `(self/p)` for an odd prime `p`.
    ///
    /// A result of Euler's criterion outside `{0, 1, p-1}` proves `p`
    /// composite and is reported as [`BigNumError::InvalidPrime`].
    pub fn legendre(&self, p: &BigNum) -> BigNumResult<i32> {
        self.ensure_raw()?;
        p.ensure_raw()?;
        legendre_int(&self.n, &p.n)
    }

    /// Jacobi symbol `(self/b)`; `b` must be odd.
    pub fn jacobi(&self, b: &BigNum) -> BigNumResult<i32> {
        self.ensure_raw()?;
        b.ensure_raw()?;
        jacobi_int(&self.n, &b.n)
    }

    /// Kronecker symbol `(self/b)`. Agrees with [`BigNum::jacobi`] for odd
    /// positive `b`.
    pub fn kronecker(&self, b: &BigNum) -> BigNumResult<i32> {
        self.ensure_raw()?;
        b.ensure_raw()?;
        Ok(kronecker_int(&self.n, &b.n))
    }
}
