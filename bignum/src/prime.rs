//! Probabilistic primality: Miller-Rabin, extra-strong Lucas and their
//! Baillie-PSW combination.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::RngCore;
use tracing::{debug, trace};

use crate::error::BigNumResult;
use crate::random::RandomBigNum;
use crate::red::Reduction;
use crate::symbols::jacobi_int;
use crate::{BigNum, PrimalityConfig};

/// Lucas parameter search never goes past this `P`.
const LUCAS_HARD_LIMIT: u64 = 10_000;

/// Trial divisors tried before any modular exponentiation.
const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97,
];

/// Extra-strong Lucas test, with `(D, P, Q) = (P^2 - 4, P, 1)` chosen by
/// scanning `P = 3, 4, ...` until `jacobi(D, n) = -1`.
fn lucas_int(n: &BigInt, limit: u64) -> bool {
    if *n <= BigInt::one() {
        return false;
    }
    if n.is_even() {
        return *n == BigInt::from(2u32);
    }

    let cap = match limit {
        0 => LUCAS_HARD_LIMIT,
        limit => limit.min(LUCAS_HARD_LIMIT),
    };

    let mut p = 3u64;
    loop {
        if p > cap {
            debug!(limit = cap, "lucas parameter search exhausted");
            return false;
        }
        let d = BigInt::from(p * p - 4);
        match jacobi_int(&d, n) {
            Ok(-1) => break,
            // d = (p-2)(p+2) shares a factor with n; the factor must be p+2
            Ok(0) => return *n == BigInt::from(p + 2),
            Ok(_) => {}
            Err(_) => return false,
        }
        if p == 40 {
            // a square n never yields -1, so stop looking
            let root = n.sqrt();
            if &root * &root == *n {
                return false;
            }
        }
        p += 1;
    }

    // n + 1 = 2^r * s with s odd
    let np1 = n + 1u32;
    let r = np1.trailing_zeros().unwrap_or(0);
    let s = &np1 >> r;
    let nm2 = n - 2u32;
    let big_p = BigInt::from(p);
    let two = BigInt::from(2u32);

    let mut vk = two.clone();
    let mut vk1 = big_p.clone();
    for i in (0..=s.bits()).rev() {
        if s.bit(i) {
            // V(2k+1) = V(k)V(k+1) - P, V(2k+2) = V(k+1)^2 - 2
            vk = (&vk * &vk1 + n - &big_p) % n;
            vk1 = (&vk1 * &vk1 + &nm2) % n;
        } else {
            // V(2k+1) = V(k)V(k+1) - P, V(2k) = V(k)^2 - 2
            vk1 = (&vk * &vk1 + n - &big_p) % n;
            vk = (&vk * &vk + &nm2) % n;
        }
    }

    if vk == two || vk == nm2 {
        // U(s) = 0 iff P*V(s) = 2*V(s+1) (mod n)
        let lhs = &vk * &big_p;
        let rhs = &vk1 << 1u32;
        let diff = if lhs >= rhs { lhs - rhs } else { rhs - lhs };
        if (diff % n).is_zero() {
            return true;
        }
    }

    for _ in 0..r.saturating_sub(1) {
        if vk.is_zero() {
            return true;
        }
        if vk == two {
            return false;
        }
        vk = (&vk * &vk + &nm2) % n;
    }
    false
}

impl BigNum {
    /// Miller-Rabin with `reps` rounds on random bases in `[2, n-3]`. When
    /// `force2` is set the last round uses base 2 instead.
    pub fn is_prime_mr<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        reps: usize,
        force2: bool,
    ) -> BigNumResult<bool> {
        self.ensure_raw()?;

        if self.n < BigInt::from(7u32) {
            return Ok(matches!(self.to_i64(), Some(2 | 3 | 5)));
        }
        if self.is_even() {
            return Ok(false);
        }

        let nm1 = &self.n - 1u32;
        let k = nm1.trailing_zeros().unwrap_or(0);
        let q = BigNum::from_int(&nm1 >> k);

        let red = Reduction::new(self)?;
        let one = BigNum::one().to_red(&red)?;
        let minus_one = BigNum::from_int(nm1).to_red(&red)?;
        let low = BigNum::from(2u32);
        let high = BigNum::from_int(&self.n - 2u32);

        'rounds: for round in 0..reps {
            let base = if force2 && round == reps - 1 {
                low.clone()
            } else {
                BigNum::random_range(rng, &low, &high)?
            };
            trace!(round, base = %base, "miller-rabin round");

            let mut y = base.to_red(&red)?.red_pow(&q)?;
            if y.red_eq(&one)? || y.red_eq(&minus_one)? {
                continue;
            }

            for _ in 1..k {
                y.red_isqr()?;
                if y.red_eq(&minus_one)? {
                    continue 'rounds;
                }
                if y.red_eq(&one)? {
                    return Ok(false);
                }
            }
            return Ok(false);
        }
        Ok(true)
    }

    /// Extra-strong Lucas probable-prime test.
    ///
    /// `limit` bounds the search for the Lucas parameter `P`; `0` means only
    /// the built-in cap applies. Running out of candidates yields `false`.
    pub fn is_prime_lucas(&self, limit: u64) -> BigNumResult<bool> {
        self.ensure_raw()?;
        Ok(lucas_int(&self.n, limit))
    }

    /// Baillie-PSW: trial division, then Miller-Rabin with `reps + 1` rounds
    /// (the last on base 2), then the extra-strong Lucas test.
    pub fn is_prime<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        reps: usize,
        limit: u64,
    ) -> BigNumResult<bool> {
        self.ensure_raw()?;
        if self.n <= BigInt::one() {
            return Ok(false);
        }

        if let Some(small) = self.n.to_u32() {
            if SMALL_PRIMES.contains(&small) {
                return Ok(true);
            }
        }
        if SMALL_PRIMES.iter().any(|&p| (&self.n % p).is_zero()) {
            return Ok(false);
        }

        if !self.is_prime_mr(rng, reps + 1, true)? {
            return Ok(false);
        }
        self.is_prime_lucas(limit)
    }

    /// [`BigNum::is_prime`] driven by a [`PrimalityConfig`].
    pub fn is_probable_prime<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        config: &PrimalityConfig,
    ) -> BigNumResult<bool> {
        self.is_prime(rng, config.reps, config.lucas_limit)
    }
}
