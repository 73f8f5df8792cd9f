//! Reduction contexts and ring-tagged arithmetic.
//!
//! A [`Reduction`] fixes a modulus `m`. [`BigNum::to_red`] moves a raw value
//! into the context, after which only the `red_*` methods accept it until
//! [`BigNum::from_red`] takes it back out. Contexts are compared by identity,
//! so two contexts built from the same modulus do not mix.

use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::arith::euclid_mod;
use crate::error::{BigNumError, BigNumResult};
use crate::gcd::{invert_int, powm_int};
use crate::primes;
use crate::sqrt::sqrtm_int;
use crate::symbols::jacobi_int;
use crate::BigNum;

/// Modulus shared by a family of ring-tagged values.
pub struct Reduction {
    m: BigNum,
    name: Option<&'static str>,
}

impl Reduction {
    /// Creates an anonymous context for the positive modulus `m`.
    pub fn new(m: &BigNum) -> BigNumResult<Arc<Self>> {
        m.ensure_raw()?;
        if !m.n.is_positive() {
            return Err(BigNumError::InvalidModulus);
        }
        Ok(Arc::new(Self {
            m: m.clone(),
            name: None,
        }))
    }

    pub(crate) fn with_name(m: BigInt, name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            m: BigNum::from_int(m),
            name: Some(name),
        })
    }

    /// Returns the shared context for a named prime, see [`crate::prime_names`].
    ///
    /// Every call with the same name returns the same context.
    pub fn named(name: &str) -> BigNumResult<Arc<Self>> {
        primes::lookup(name)
    }

    #[inline]
    pub fn modulus(&self) -> &BigNum {
        &self.m
    }

    #[inline]
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    // Operands are canonical residues in [0, m), so one correction suffices.
    fn add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        let r = a + b;
        if r >= self.m.n {
            r - &self.m.n
        } else {
            r
        }
    }

    fn sub(&self, a: &BigInt, b: &BigInt) -> BigInt {
        let r = a - b;
        if r.is_negative() {
            r + &self.m.n
        } else {
            r
        }
    }

    fn neg(&self, a: &BigInt) -> BigInt {
        if a.is_zero() {
            BigInt::zero()
        } else {
            &self.m.n - a
        }
    }

    #[inline]
    fn reduce(&self, a: &BigInt) -> BigInt {
        euclid_mod(a, &self.m.n)
    }
}

impl Debug for Reduction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "Reduction({name})"),
            None => write!(f, "Reduction(0x{:x})", self.m),
        }
    }
}

impl BigNum {
    fn tagged(n: BigInt, ctx: &Arc<Reduction>) -> Self {
        Self {
            n,
            red: Some(Arc::clone(ctx)),
        }
    }

    fn shared_context(&self, rhs: &BigNum) -> BigNumResult<&Arc<Reduction>> {
        let ctx = self.ensure_red()?;
        let other = rhs.ensure_red()?;
        if !Arc::ptr_eq(ctx, other) {
            return Err(BigNumError::ContextMismatch);
        }
        Ok(ctx)
    }

    /// Reduces the value into `[0, m)` and tags it with `ctx`.
    pub fn to_red(&self, ctx: &Arc<Reduction>) -> BigNumResult<Self> {
        self.ensure_raw()?;
        Ok(Self::tagged(ctx.reduce(&self.n), ctx))
    }

    /// Drops the ring tag, returning the residue as a raw value.
    pub fn from_red(&self) -> BigNumResult<Self> {
        self.ensure_red()?;
        Ok(Self::from_int(self.n.clone()))
    }

    pub fn red_add(&self, rhs: &BigNum) -> BigNumResult<Self> {
        let ctx = self.shared_context(rhs)?;
        Ok(Self::tagged(ctx.add(&self.n, &rhs.n), ctx))
    }

    pub fn red_iadd(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        *self = self.red_add(rhs)?;
        Ok(self)
    }

    pub fn red_sub(&self, rhs: &BigNum) -> BigNumResult<Self> {
        let ctx = self.shared_context(rhs)?;
        Ok(Self::tagged(ctx.sub(&self.n, &rhs.n), ctx))
    }

    pub fn red_isub(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        *self = self.red_sub(rhs)?;
        Ok(self)
    }

    pub fn red_mul(&self, rhs: &BigNum) -> BigNumResult<Self> {
        let ctx = self.shared_context(rhs)?;
        Ok(Self::tagged(ctx.reduce(&(&self.n * &rhs.n)), ctx))
    }

    pub fn red_imul(&mut self, rhs: &BigNum) -> BigNumResult<&mut Self> {
        *self = self.red_mul(rhs)?;
        Ok(self)
    }

    pub fn red_sqr(&self) -> BigNumResult<Self> {
        let ctx = self.ensure_red()?;
        Ok(Self::tagged(ctx.reduce(&(&self.n * &self.n)), ctx))
    }

    pub fn red_isqr(&mut self) -> BigNumResult<&mut Self> {
        *self = self.red_sqr()?;
        Ok(self)
    }

    pub fn red_neg(&self) -> BigNumResult<Self> {
        let ctx = self.ensure_red()?;
        Ok(Self::tagged(ctx.neg(&self.n), ctx))
    }

    pub fn red_ineg(&mut self) -> BigNumResult<&mut Self> {
        *self = self.red_neg()?;
        Ok(self)
    }

    /// `self * 2^bits` in the ring.
    pub fn red_shl(&self, bits: u64) -> BigNumResult<Self> {
        let ctx = self.ensure_red()?;
        Ok(Self::tagged(ctx.reduce(&(&self.n << bits)), ctx))
    }

    pub fn red_ishl(&mut self, bits: u64) -> BigNumResult<&mut Self> {
        *self = self.red_shl(bits)?;
        Ok(self)
    }

    /// Raises to a raw exponent; a negative exponent inverts first.
    pub fn red_pow(&self, exp: &BigNum) -> BigNumResult<Self> {
        let ctx = self.ensure_red()?;
        exp.ensure_raw()?;
        let r = powm_int(&self.n, &exp.n, &ctx.m.n)?;
        Ok(Self::tagged(r, ctx))
    }

    pub fn red_invert(&self) -> BigNumResult<Self> {
        let ctx = self.ensure_red()?;
        let r = invert_int(&self.n, &ctx.m.n)?;
        Ok(Self::tagged(r, ctx))
    }

    /// Square root in the ring; the modulus must be prime.
    pub fn red_sqrt(&self) -> BigNumResult<Self> {
        let ctx = self.ensure_red()?;
        let r = sqrtm_int(&self.n, &ctx.m.n)?;
        Ok(Self::tagged(r, ctx))
    }

    /// Jacobi symbol of the residue against the modulus.
    pub fn red_jacobi(&self) -> BigNumResult<i32> {
        let ctx = self.ensure_red()?;
        jacobi_int(&self.n, &ctx.m.n)
    }

    /// Equality that also requires both values to live in the same context.
    pub fn red_eq(&self, rhs: &BigNum) -> BigNumResult<bool> {
        self.shared_context(rhs)?;
        Ok(self.n == rhs.n)
    }
}
