//! Signed integers in sign-magnitude form.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Rem, Sub};
use core::str::FromStr;

use num_traits::{Num, One, Zero};
use zeroize::Zeroize;

use super::{BigUint, ParseBigIntError};

/// Sign of a [`BigInt`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    /// Negative.
    Minus,
    /// Zero.
    NoSign,
    /// Positive.
    Plus,
}

impl Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Sign {
        match self {
            Sign::Minus => Sign::Plus,
            Sign::NoSign => Sign::NoSign,
            Sign::Plus => Sign::Minus,
        }
    }
}

impl Mul for Sign {
    type Output = Sign;

    fn mul(self, other: Sign) -> Sign {
        match (self, other) {
            (Sign::NoSign, _) | (_, Sign::NoSign) => Sign::NoSign,
            (a, b) if a == b => Sign::Plus,
            _ => Sign::Minus,
        }
    }
}

/// An arbitrary-precision signed integer.
///
/// Zero always carries [`Sign::NoSign`]; any other value carries
/// [`Sign::Plus`] or [`Sign::Minus`] and a non-zero magnitude.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    sign: Sign,
    mag: BigUint,
}

impl BigInt {
    /// Builds a value from a sign and magnitude. A zero magnitude or a
    /// `NoSign` sign both yield zero.
    pub fn from_biguint(sign: Sign, mag: BigUint) -> Self {
        if sign == Sign::NoSign || mag.is_zero() {
            return BigInt::zero();
        }
        BigInt { sign, mag }
    }

    /// Sign-magnitude decoding: `bytes` is the big-endian magnitude.
    pub fn from_bytes_be(sign: Sign, bytes: &[u8]) -> Self {
        BigInt::from_biguint(sign, BigUint::from_bytes_be(bytes))
    }

    /// Sign-magnitude encoding: the sign and the big-endian magnitude.
    pub fn to_bytes_be(&self) -> (Sign, Vec<u8>) {
        (self.sign, self.mag.to_bytes_be())
    }

    /// Parses an optionally signed number in the given radix.
    pub fn parse_bytes(buf: &[u8], radix: u32) -> Option<BigInt> {
        core::str::from_utf8(buf)
            .ok()
            .and_then(|s| BigInt::from_str_radix(s, radix).ok())
    }

    /// Parses an optionally signed number in the given radix.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<BigInt, ParseBigIntError> {
        let (sign, digits) = match s.strip_prefix('-') {
            Some(rest) => (Sign::Minus, rest),
            None => (Sign::Plus, s),
        };
        let mag = BigUint::from_str_radix(digits, radix)?;
        Ok(BigInt::from_biguint(sign, mag))
    }

    /// The sign.
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// The absolute value.
    pub fn magnitude(&self) -> &BigUint {
        &self.mag
    }

    /// Splits into sign and magnitude.
    pub fn into_parts(self) -> (Sign, BigUint) {
        (self.sign, self.mag)
    }

    /// The value as a `BigUint`, or `None` if it is negative.
    pub fn to_biguint(&self) -> Option<BigUint> {
        match self.sign {
            Sign::Minus => None,
            _ => Some(self.mag.clone()),
        }
    }

    /// Returns `true` for values below zero.
    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Minus
    }

    /// The least non-negative residue of `self` modulo `m`.
    ///
    /// Panics if `m` is zero.
    pub fn rem_euclid(&self, m: &BigUint) -> BigUint {
        let r = &self.mag % m;
        if self.sign == Sign::Minus && !r.is_zero() {
            m - &r
        } else {
            r
        }
    }
}

impl Default for BigInt {
    fn default() -> Self {
        BigInt::zero()
    }
}

impl Zero for BigInt {
    fn zero() -> Self {
        BigInt {
            sign: Sign::NoSign,
            mag: BigUint::zero(),
        }
    }

    fn is_zero(&self) -> bool {
        self.sign == Sign::NoSign
    }
}

impl One for BigInt {
    fn one() -> Self {
        BigInt {
            sign: Sign::Plus,
            mag: BigUint::one(),
        }
    }
}

impl From<BigUint> for BigInt {
    fn from(mag: BigUint) -> Self {
        BigInt::from_biguint(Sign::Plus, mag)
    }
}

impl From<u64> for BigInt {
    fn from(n: u64) -> Self {
        BigInt::from(BigUint::from(n))
    }
}

impl From<i64> for BigInt {
    fn from(n: i64) -> Self {
        let sign = if n < 0 { Sign::Minus } else { Sign::Plus };
        BigInt::from_biguint(sign, BigUint::from(n.unsigned_abs()))
    }
}

impl FromStr for BigInt {
    type Err = ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, ParseBigIntError> {
        BigInt::from_str_radix(s, 10)
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        match self.sign {
            Sign::NoSign => Ordering::Equal,
            Sign::Plus => self.mag.cmp(&other.mag),
            Sign::Minus => other.mag.cmp(&self.mag),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "", &self.mag.to_string())
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Zeroize for BigInt {
    fn zeroize(&mut self) {
        self.mag.zeroize();
        self.sign = Sign::NoSign;
    }
}

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(mut self) -> BigInt {
        self.sign = -self.sign;
        self
    }
}

impl<'a> Neg for &'a BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        -self.clone()
    }
}

impl<'a, 'b> Add<&'b BigInt> for &'a BigInt {
    type Output = BigInt;

    fn add(self, other: &BigInt) -> BigInt {
        match (self.sign, other.sign) {
            (_, Sign::NoSign) => self.clone(),
            (Sign::NoSign, _) => other.clone(),
            (a, b) if a == b => BigInt::from_biguint(a, &self.mag + &other.mag),
            _ => match self.mag.cmp(&other.mag) {
                Ordering::Less => BigInt::from_biguint(other.sign, &other.mag - &self.mag),
                Ordering::Greater => BigInt::from_biguint(self.sign, &self.mag - &other.mag),
                Ordering::Equal => BigInt::zero(),
            },
        }
    }
}

impl<'a, 'b> Sub<&'b BigInt> for &'a BigInt {
    type Output = BigInt;

    fn sub(self, other: &BigInt) -> BigInt {
        self + &(-other)
    }
}

impl<'a, 'b> Mul<&'b BigInt> for &'a BigInt {
    type Output = BigInt;

    fn mul(self, other: &BigInt) -> BigInt {
        BigInt::from_biguint(self.sign * other.sign, &self.mag * &other.mag)
    }
}

impl<'a, 'b> Div<&'b BigInt> for &'a BigInt {
    type Output = BigInt;

    /// Truncating division. Panics on a zero divisor.
    fn div(self, other: &BigInt) -> BigInt {
        BigInt::from_biguint(self.sign * other.sign, &self.mag / &other.mag)
    }
}

impl<'a, 'b> Rem<&'b BigInt> for &'a BigInt {
    type Output = BigInt;

    /// Remainder of truncating division; takes the dividend's sign.
    fn rem(self, other: &BigInt) -> BigInt {
        BigInt::from_biguint(self.sign, &self.mag % &other.mag)
    }
}

macro_rules! forward_signed_binop {
    ($($imp:ident, $method:ident);*) => {
        $(
            impl $imp<BigInt> for BigInt {
                type Output = BigInt;

                #[inline]
                fn $method(self, other: BigInt) -> BigInt {
                    (&self).$method(&other)
                }
            }

            impl<'a> $imp<&'a BigInt> for BigInt {
                type Output = BigInt;

                #[inline]
                fn $method(self, other: &BigInt) -> BigInt {
                    (&self).$method(other)
                }
            }

            impl<'a> $imp<BigInt> for &'a BigInt {
                type Output = BigInt;

                #[inline]
                fn $method(self, other: BigInt) -> BigInt {
                    self.$method(&other)
                }
            }
        )*
    };
}

forward_signed_binop!(Add, add; Sub, sub; Mul, mul; Div, div; Rem, rem);
