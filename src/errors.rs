//! Error types.

use core::fmt;

/// Alias for [`core::result::Result`] with the `rsa-core` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[non_exhaustive]
pub enum Error {
    /// Division by a zero divisor.
    DivisionByZero,

    /// Key generation failed; see [`KeyGenerationError`] for the reason.
    KeyGeneration(KeyGenerationError),

    /// Message too long for the modulus and padding scheme.
    MessageTooLong,

    /// Decryption error.
    ///
    /// Every padding check failure during decryption maps to this single
    /// variant so that callers cannot tell which check failed.
    Decryption,

    /// Verification error.
    Verification,

    /// Invalid padding scheme.
    InvalidPaddingScheme,

    /// Input must be hashed.
    InputNotHashed,

    /// Invalid prime value.
    InvalidPrime,

    /// Invalid modulus.
    InvalidModulus,

    /// Modulus too large.
    ModulusTooLarge,

    /// Invalid exponent.
    InvalidExponent,

    /// Public exponent too small.
    PublicExponentTooSmall,

    /// Public exponent too large.
    PublicExponentTooLarge,

    /// Invalid arguments.
    InvalidArguments,

    /// Malformed key export.
    InvalidKeyEncoding,

    /// Label too long.
    LabelTooLong,

    /// Invalid padding length.
    InvalidPadLen,

    /// Internal error.
    Internal,
}

/// Reasons for which key or prime generation can fail.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[non_exhaustive]
pub enum KeyGenerationError {
    /// Requested modulus is below the supported floor.
    ModulusTooSmall {
        /// Requested size in bits.
        bits: usize,
        /// Smallest accepted size in bits.
        min: usize,
    },

    /// Public exponent must be odd and at least 3.
    InvalidExponent,

    /// Primes must have at least 2 bits.
    PrimeTooSmall,

    /// Gave up after the bounded number of candidates.
    RetriesExhausted,

    /// The random source reported a failure.
    RandomSource,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DivisionByZero => write!(f, "division by zero"),
            Error::KeyGeneration(reason) => write!(f, "key generation failed: {}", reason),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::Decryption => write!(f, "decryption error"),
            Error::Verification => write!(f, "verification error"),
            Error::InvalidPaddingScheme => write!(f, "invalid padding scheme"),
            Error::InputNotHashed => write!(f, "input must be hashed"),
            Error::InvalidPrime => write!(f, "invalid prime value"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::ModulusTooLarge => write!(f, "modulus too large"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
            Error::PublicExponentTooSmall => write!(f, "public exponent too small"),
            Error::PublicExponentTooLarge => write!(f, "public exponent too large"),
            Error::InvalidArguments => write!(f, "invalid arguments"),
            Error::InvalidKeyEncoding => write!(f, "invalid key encoding"),
            Error::LabelTooLong => write!(f, "label too long"),
            Error::InvalidPadLen => write!(f, "invalid padding length"),
            Error::Internal => write!(f, "internal error"),
        }
    }
}

impl fmt::Display for KeyGenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyGenerationError::ModulusTooSmall { bits, min } => {
                write!(f, "modulus of {} bits is below the {} bit minimum", bits, min)
            }
            KeyGenerationError::InvalidExponent => {
                write!(f, "public exponent must be odd and >= 3")
            }
            KeyGenerationError::PrimeTooSmall => write!(f, "prime size must be at least 2 bits"),
            KeyGenerationError::RetriesExhausted => write!(f, "retries exhausted"),
            KeyGenerationError::RandomSource => write!(f, "random source failure"),
        }
    }
}

impl From<KeyGenerationError> for Error {
    fn from(err: KeyGenerationError) -> Self {
        Error::KeyGeneration(err)
    }
}

impl From<Error> for signature::Error {
    fn from(err: Error) -> Self {
        #[cfg(feature = "std")]
        {
            Self::from_source(err)
        }
        #[cfg(not(feature = "std"))]
        {
            core::convert::identity(err);
            Self::new()
        }
    }
}
