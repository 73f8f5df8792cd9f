use rand::RngCore;

use crate::error::{BigNumError, BigNumResult};
use crate::{BigNum, Endian};

/// Helper trait for sampling random integers from a byte source.
pub trait RandomBigNum: Sized {
    /// Uniform value in `[0, 2^bits)`.
    fn random_bits<R: RngCore + ?Sized>(rng: &mut R, bits: u64) -> Self;

    /// Uniform value in `[min, max)`, by rejection sampling.
    fn random_range<R: RngCore + ?Sized>(rng: &mut R, min: &Self, max: &Self) -> BigNumResult<Self>;
}

impl RandomBigNum for BigNum {
    fn random_bits<R: RngCore + ?Sized>(rng: &mut R, bits: u64) -> Self {
        let len = bits.div_ceil(8);
        let mut bytes = vec![0u8; len as usize];
        rng.fill_bytes(&mut bytes);
        let mut r = BigNum::from_bytes(&bytes, Endian::Big);
        r.n >>= len * 8 - bits;
        r
    }

    fn random_range<R: RngCore + ?Sized>(rng: &mut R, min: &Self, max: &Self) -> BigNumResult<Self> {
        min.ensure_raw()?;
        max.ensure_raw()?;
        if max <= min {
            return Err(BigNumError::EmptyRange);
        }
        let span = &max.n - &min.n;
        let bits = span.bits();
        loop {
            let r = Self::random_bits(rng, bits);
            if r.n < span {
                return Ok(Self::from_int(&min.n + r.n));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_bits_width() {
        let mut rng = StdRng::seed_from_u64(7);
        for bits in [0u64, 1, 7, 8, 9, 255, 256] {
            for _ in 0..32 {
                let r = BigNum::random_bits(&mut rng, bits);
                assert!(!r.is_neg());
                assert!(r.bit_length() <= bits, "bits={bits}");
            }
        }
    }

    #[test]
    fn test_random_range_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let min = BigNum::from(-5);
        let max = BigNum::from(6);
        let mut seen = [false; 11];
        for _ in 0..500 {
            let r = BigNum::random_range(&mut rng, &min, &max).unwrap();
            assert!(r >= min && r < max);
            seen[(r.to_i64().unwrap() + 5) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_random_range_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        let a = BigNum::from(3);
        assert_eq!(
            BigNum::random_range(&mut rng, &a, &a).unwrap_err(),
            BigNumError::EmptyRange
        );
        assert_eq!(
            BigNum::random_range(&mut rng, &a, &BigNum::from(2)).unwrap_err(),
            BigNumError::EmptyRange
        );
    }
}
