//! Modular square roots.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::arith::{euclid_mod, is_square_int};
use crate::error::{BigNumError, BigNumResult};
use crate::gcd::egcd_int;
use crate::symbols::jacobi_int;
use crate::BigNum;

/// Square root of `x` modulo the odd prime `p`.
pub(crate) fn sqrtm_int(x: &BigInt, p: &BigInt) -> BigNumResult<BigInt> {
    if !p.is_positive() {
        return Err(BigNumError::InvalidModulus);
    }
    if p.is_one() {
        return Ok(BigInt::zero());
    }

    match jacobi_int(x, p)? {
        -1 => return Err(BigNumError::NotSquare),
        0 => return Ok(BigInt::zero()),
        _ => {}
    }

    let x = euclid_mod(x, p);
    let low = p.magnitude().iter_u32_digits().next().unwrap_or(0);

    let root = if low & 3 == 3 {
        // x^((p+1)/4)
        let e = (p + 1u32) >> 2u32;
        x.modpow(&e, p)
    } else if low & 7 == 5 {
        // Atkin: t = (2x)^((p-5)/8), i = 2x*t^2, r = x*t*(i-1)
        let x2 = euclid_mod(&(&x << 1u32), p);
        let e = (p - 5u32) >> 3u32;
        let t = x2.modpow(&e, p);
        let i = euclid_mod(&(&x2 * &t * &t), p);
        euclid_mod(&(&x * &t * (i - 1u32)), p)
    } else {
        tonelli_shanks(&x, p)?
    };

    if euclid_mod(&(&root * &root), p) != x {
        return Err(BigNumError::InvalidPrime);
    }
    Ok(root)
}

fn tonelli_shanks(x: &BigInt, p: &BigInt) -> BigNumResult<BigInt> {
    // p - 1 = s * 2^e with s odd
    let p1 = p - 1u32;
    let e = p1.trailing_zeros().unwrap_or(0);
    let s = &p1 >> e;

    // a square modulus has no non-residue with Jacobi symbol -1
    if is_square_int(p) {
        return Err(BigNumError::InvalidPrime);
    }

    let mut n = BigInt::from(2u32);
    loop {
        match jacobi_int(&n, p)? {
            -1 => break,
            0 => return Err(BigNumError::InvalidPrime),
            _ => n += 1u32,
        }
    }

    let mut y = x.modpow(&((&s + 1u32) >> 1u32), p);
    let mut b = x.modpow(&s, p);
    let mut g = n.modpow(&s, p);
    let mut r = e;

    loop {
        let mut m = 0u64;
        let mut t = b.clone();
        while !t.is_one() {
            t = euclid_mod(&(&t * &t), p);
            m += 1;
            if m >= r {
                return Err(BigNumError::InvalidPrime);
            }
        }

        if m == 0 {
            return Ok(y);
        }

        let t = g.modpow(&(BigInt::one() << (r - m - 1)), p);
        g = euclid_mod(&(&t * &t), p);
        y = euclid_mod(&(&y * &t), p);
        b = euclid_mod(&(&b * &g), p);
        r = m;
    }
}

pub(crate) fn sqrtpq_int(x: &BigInt, p: &BigInt, q: &BigInt) -> BigNumResult<BigInt> {
    let sp = sqrtm_int(x, p)?;
    let sq = sqrtm_int(x, q)?;
    let (mp, mq, _) = egcd_int(p, q);
    let n = p * q;
    let r = &sq * &mp * p + &sp * &mq * q;
    Ok(euclid_mod(&r, &n))
}

impl BigNum {
    /// Square root of `self` modulo the prime `p`, in `[0, p)`.
    ///
    /// Uses `x^((p+1)/4)` for `p = 3 mod 4`, Atkin's formula for
    /// `p = 5 mod 8` and Tonelli-Shanks otherwise. Fails with
    /// [`BigNumError::NotSquare`] for non-residues and with
    /// [`BigNumError::InvalidPrime`] when `p` turns out to be composite.
    pub fn sqrtm(&self, p: &BigNum) -> BigNumResult<Self> {
        self.ensure_raw()?;
        p.ensure_raw()?;
        sqrtm_int(&self.n, &p.n).map(Self::from_int)
    }

    /// Square root of `self` modulo `p*q` for distinct primes `p` and `q`,
    /// combined with the CRT.
    pub fn sqrtpq(&self, p: &BigNum, q: &BigNum) -> BigNumResult<Self> {
        self.ensure_raw()?;
        p.ensure_raw()?;
        q.ensure_raw()?;
        sqrtpq_int(&self.n, &p.n, &q.n).map(Self::from_int)
    }
}
