//! Catalogue of named primes used by elliptic-curve fields.
//!
//! Each prime is written as a signed sum of powers of two. Its context is
//! built on first lookup and shared for the rest of the process.

use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::{One, Zero};
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::{BigNumError, BigNumResult};
use crate::red::Reduction;

struct Entry {
    name: &'static str,
    /// `(sign, exponent)` terms summed into the prime.
    terms: &'static [(i8, u32)],
    cell: OnceCell<Arc<Reduction>>,
}

impl Entry {
    const fn new(name: &'static str, terms: &'static [(i8, u32)]) -> Self {
        Self {
            name,
            terms,
            cell: OnceCell::new(),
        }
    }

    fn prime(&self) -> BigInt {
        self.terms
            .iter()
            .fold(BigInt::zero(), |acc, &(sign, exp)| {
                let term = BigInt::one() << exp;
                if sign < 0 {
                    acc - term
                } else {
                    acc + term
                }
            })
    }

    fn context(&self) -> Arc<Reduction> {
        let ctx = self.cell.get_or_init(|| {
            let p = self.prime();
            debug!(name = self.name, bits = p.bits(), "initialised named prime");
            Reduction::with_name(p, self.name)
        });
        Arc::clone(ctx)
    }
}

static CATALOGUE: [Entry; 6] = [
    // NIST P-192: 2^192 - 2^64 - 1
    Entry::new("p192", &[(1, 192), (-1, 64), (-1, 0)]),
    // NIST P-224: 2^224 - 2^96 + 1
    Entry::new("p224", &[(1, 224), (-1, 96), (1, 0)]),
    // NIST P-521: 2^521 - 1
    Entry::new("p521", &[(1, 521), (-1, 0)]),
    // secp256k1: 2^256 - 2^32 - 977
    Entry::new(
        "k256",
        &[
            (1, 256),
            (-1, 32),
            (-1, 9),
            (-1, 8),
            (-1, 7),
            (-1, 6),
            (-1, 4),
            (-1, 0),
        ],
    ),
    // Curve25519: 2^255 - 19
    Entry::new("p25519", &[(1, 255), (-1, 4), (-1, 1), (-1, 0)]),
    // Ed448: 2^448 - 2^224 - 1
    Entry::new("p448", &[(1, 448), (-1, 224), (-1, 0)]),
];

pub(crate) fn lookup(name: &str) -> BigNumResult<Arc<Reduction>> {
    CATALOGUE
        .iter()
        .find(|entry| entry.name == name)
        .map(Entry::context)
        .ok_or_else(|| BigNumError::UnknownPrime(name.to_owned()))
}

/// Names accepted by [`Reduction::named`].
pub fn prime_names() -> impl Iterator<Item = &'static str> {
    CATALOGUE.iter().map(|entry| entry.name)
}
