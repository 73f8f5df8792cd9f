//! Arbitrary-precision signed integers with modular arithmetic.
//!
//! This crate provides the integer engine underneath the signature code in
//! this workspace: a signed [`BigNum`] with truncating, Euclidean and round
//! division, two's-complement and magnitude bit operations, the number theory
//! used by elliptic-curve and discrete-log schemes, and [`Reduction`] contexts
//! for arithmetic modulo a fixed `m`.
//!
//! Values moved into a context with [`BigNum::to_red`] are ring-tagged. Raw
//! operations refuse them and ring operations refuse untagged values, so a
//! reduced and an unreduced number cannot be mixed by accident.
//!
//! # Example
//!
//! ```
//! use bignum::{BigNum, Reduction};
//!
//! let p = Reduction::named("p25519").unwrap();
//! let x = BigNum::from(4u8).to_red(&p).unwrap();
//! let root = x.red_sqrt().unwrap();
//! assert!(root.red_sqr().unwrap().red_eq(&x).unwrap());
//!
//! let a = BigNum::from(-7);
//! let b = BigNum::from(2);
//! assert_eq!(a.quo(&b).unwrap(), BigNum::from(-3));
//! assert_eq!(a.div(&b).unwrap(), BigNum::from(-4));
//! assert_eq!(a.modulo(&b).unwrap(), BigNum::from(1));
//! ```

mod arith;
mod bits;
mod bn;
mod config;
mod error;
mod gcd;
mod prime;
mod primes;
mod random;
mod red;
mod sqrt;
mod symbols;


pub use bn::{BigNum, Endian};
pub use config::PrimalityConfig;
pub use error::{BigNumError, BigNumResult, ErrorKind};
pub use primes::prime_names;
pub use random::RandomBigNum;
pub use red::Reduction;
