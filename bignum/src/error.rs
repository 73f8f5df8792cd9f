//! Error types for the integer engine.

use thiserror::Error;

/// Broad classes of failure reported by the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An argument of the wrong kind, such as an unknown prime name.
    Type,
    /// A value outside the accepted range: negative where non-negative is
    /// required, a non-positive modulus, an empty sampling range.
    Range,
    /// A mathematically undefined request: division by zero, inverse of a
    /// non-unit, square root of a non-residue.
    Domain,
    /// A ring-tagged value used where a raw value is required, or the
    /// reverse, or two different reduction contexts mixed together.
    Ring,
    /// Malformed strings or byte buffers.
    Format,
}

/// Errors that can occur during integer and modular arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BigNumError {
    /// Division, remainder or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A negative value was supplied where a non-negative one is required.
    #[error("{0} must be non-negative")]
    NegativeValue(&'static str),

    /// The modulus is zero or negative.
    #[error("invalid modulus: must be positive")]
    InvalidModulus,

    /// The modulus must be odd for this operation.
    #[error("modulus must be odd")]
    NotOdd,

    /// The bit width of a two's-complement conversion is zero.
    #[error("invalid width: must be positive")]
    InvalidWidth,

    /// The upper bound of a sampling range does not exceed the lower bound.
    #[error("empty range: max must be greater than min")]
    EmptyRange,

    /// The value has no inverse for the given modulus.
    #[error("value is not invertible")]
    NotInvertible,

    /// The value is not a quadratic residue for the given modulus.
    #[error("value is not a square mod p")]
    NotSquare,

    /// The modulus behaved in a way no prime can.
    #[error("modulus is not prime")]
    InvalidPrime,

    /// The radix is outside `2..=36`.
    #[error("invalid base {0}: expected 2..=36")]
    InvalidBase(u32),

    /// A character is not a digit in the requested base.
    #[error("invalid digit {ch:?} for base {base}")]
    InvalidDigit {
        /// Offending character.
        ch: char,
        /// Base being parsed.
        base: u32,
    },

    /// The input contained no digits.
    #[error("no digits in input")]
    EmptyString,

    /// The value does not fit in the requested number of bytes.
    #[error("insufficient length: value needs {needed} bytes, got {len}")]
    InsufficientLength {
        /// Bytes needed to hold the magnitude.
        needed: usize,
        /// Bytes requested by the caller.
        len: usize,
    },

    /// The value is already tagged with a reduction context.
    #[error("value is already in a reduction context")]
    AlreadyReduced,

    /// The value is not tagged with a reduction context.
    #[error("value is not in a reduction context")]
    NotReduced,

    /// The operands belong to different reduction contexts.
    #[error("reduction contexts do not match")]
    ContextMismatch,

    /// No named prime exists under this name.
    #[error("unknown prime: {0}")]
    UnknownPrime(String),
}

impl BigNumError {
    /// Returns the class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownPrime(_) => ErrorKind::Type,
            Self::NegativeValue(_)
            | Self::InvalidModulus
            | Self::NotOdd
            | Self::InvalidWidth
            | Self::EmptyRange
            | Self::InvalidBase(_) => ErrorKind::Range,
            Self::DivisionByZero | Self::NotInvertible | Self::NotSquare | Self::InvalidPrime => {
                ErrorKind::Domain
            }
            Self::AlreadyReduced | Self::NotReduced | Self::ContextMismatch => ErrorKind::Ring,
            Self::InvalidDigit { .. } | Self::EmptyString | Self::InsufficientLength { .. } => {
                ErrorKind::Format
            }
        }
    }
}

/// Result type for integer and modular arithmetic.
pub type BigNumResult<T> = Result<T, BigNumError>;
