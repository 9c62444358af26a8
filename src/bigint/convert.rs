//! Conversions, parsing, formatting and the `num-traits` / `num-integer`
//! trait impls for [`BigUint`].

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use num_integer::Integer;
use num_traits::{FromPrimitive, Num, One, ToPrimitive, Zero};

use super::arith::mac;
use super::division::div_rem;
use super::BigUint;

/// Error returned when parsing a big integer from text fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseBigIntError {
    kind: ParseErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseErrorKind {
    Empty,
    InvalidDigit,
    InvalidRadix,
}

impl ParseBigIntError {
    fn empty() -> Self {
        Self {
            kind: ParseErrorKind::Empty,
        }
    }

    fn invalid() -> Self {
        Self {
            kind: ParseErrorKind::InvalidDigit,
        }
    }
}

impl fmt::Display for ParseBigIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::Empty => f.write_str("cannot parse integer from empty string"),
            ParseErrorKind::InvalidDigit => f.write_str("invalid digit found in string"),
            ParseErrorKind::InvalidRadix => f.write_str("radix must be within 2..=36"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseBigIntError {}

/// `data = data * mul + add`
fn mul_add_small(data: &mut Vec<u64>, mul: u64, add: u64) {
    let mut carry = add;
    for limb in data.iter_mut() {
        *limb = mac(0, *limb, mul, &mut carry);
    }
    if carry != 0 {
        data.push(carry);
    }
}

impl BigUint {
    /// Parses digits in the given radix (2..=36). Underscores between digits
    /// are ignored.
    pub fn parse_bytes(buf: &[u8], radix: u32) -> Option<BigUint> {
        core::str::from_utf8(buf)
            .ok()
            .and_then(|s| BigUint::from_str_radix(s, radix).ok())
    }
}

impl Num for BigUint {
    type FromStrRadixErr = ParseBigIntError;

    fn from_str_radix(s: &str, radix: u32) -> Result<Self, ParseBigIntError> {
        if !(2..=36).contains(&radix) {
            return Err(ParseBigIntError {
                kind: ParseErrorKind::InvalidRadix,
            });
        }
        let s = s.strip_prefix('+').unwrap_or(s);
        if s.is_empty() {
            return Err(ParseBigIntError::empty());
        }
        if s.starts_with('_') || s.ends_with('_') {
            return Err(ParseBigIntError::invalid());
        }

        let mut data = Vec::new();
        for c in s.chars() {
            if c == '_' {
                continue;
            }
            let digit = c.to_digit(radix).ok_or_else(ParseBigIntError::invalid)?;
            mul_add_small(&mut data, u64::from(radix), u64::from(digit));
        }
        Ok(BigUint::from_limbs(data))
    }
}

impl FromStr for BigUint {
    type Err = ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, ParseBigIntError> {
        BigUint::from_str_radix(s, 10)
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigUint {
                #[inline]
                fn from(n: $t) -> Self {
                    BigUint::from_limbs(vec![n as u64])
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<u128> for BigUint {
    fn from(n: u128) -> Self {
        BigUint::from_limbs(vec![n as u64, (n >> 64) as u64])
    }
}

impl Zero for BigUint {
    fn zero() -> Self {
        BigUint::zero()
    }

    fn is_zero(&self) -> bool {
        self.data.is_empty()
    }
}

impl One for BigUint {
    fn one() -> Self {
        BigUint::one()
    }
}

impl ToPrimitive for BigUint {
    fn to_i64(&self) -> Option<i64> {
        self.to_u64().and_then(|n| i64::try_from(n).ok())
    }

    fn to_u64(&self) -> Option<u64> {
        match self.data.len() {
            0 => Some(0),
            1 => Some(self.data[0]),
            _ => None,
        }
    }

    fn to_u128(&self) -> Option<u128> {
        match self.data.len() {
            0 => Some(0),
            1 => Some(u128::from(self.data[0])),
            2 => Some(u128::from(self.data[0]) | (u128::from(self.data[1]) << 64)),
            _ => None,
        }
    }
}

impl FromPrimitive for BigUint {
    fn from_i64(n: i64) -> Option<Self> {
        u64::try_from(n).ok().map(BigUint::from)
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(BigUint::from(n))
    }

    fn from_u128(n: u128) -> Option<Self> {
        Some(BigUint::from(n))
    }
}

impl Integer for BigUint {
    fn div_floor(&self, other: &Self) -> Self {
        self / other
    }

    fn mod_floor(&self, other: &Self) -> Self {
        self % other
    }

    fn gcd(&self, other: &Self) -> Self {
        crate::math::gcd(self, other)
    }

    fn lcm(&self, other: &Self) -> Self {
        crate::math::lcm(self, other)
    }

    #[allow(deprecated)]
    fn divides(&self, other: &Self) -> bool {
        self.is_multiple_of(other)
    }

    fn is_multiple_of(&self, other: &Self) -> bool {
        if other.is_zero() {
            return self.is_zero();
        }
        (self % other).is_zero()
    }

    fn is_even(&self) -> bool {
        BigUint::is_even(self)
    }

    fn is_odd(&self) -> bool {
        BigUint::is_odd(self)
    }

    /// Panics on a zero divisor; see [`BigUint::checked_div_rem`].
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        assert!(!other.is_zero(), "attempt to divide by zero");
        div_rem(self, other)
    }
}

fn to_decimal_string(n: &BigUint) -> String {
    // 10^19 is the largest power of ten below 2^64.
    const CHUNK: u64 = 10_000_000_000_000_000_000;

    if n.is_zero() {
        return String::from("0");
    }
    let chunk = BigUint::from(CHUNK);
    let mut chunks = Vec::new();
    let mut rest = n.clone();
    while !rest.is_zero() {
        let (q, r) = div_rem(&rest, &chunk);
        chunks.push(r.to_u64().unwrap_or(0));
        rest = q;
    }

    let mut out = String::with_capacity(chunks.len() * 19);
    let mut iter = chunks.iter().rev();
    if let Some(first) = iter.next() {
        out.push_str(&format!("{}", first));
    }
    for c in iter {
        out.push_str(&format!("{:019}", c));
    }
    out
}

fn to_hex_string(n: &BigUint, upper: bool) -> String {
    let mut out = String::with_capacity(n.data.len() * 16);
    let mut iter = n.data.iter().rev();
    match iter.next() {
        None => out.push('0'),
        Some(top) if upper => out.push_str(&format!("{:X}", top)),
        Some(top) => out.push_str(&format!("{:x}", top)),
    }
    for limb in iter {
        if upper {
            out.push_str(&format!("{:016X}", limb));
        } else {
            out.push_str(&format!("{:016x}", limb));
        }
    }
    out
}

impl fmt::Display for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "", &to_decimal_string(self))
    }
}

impl fmt::Debug for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::LowerHex for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &to_hex_string(self, false))
    }
}

impl fmt::UpperHex for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &to_hex_string(self, true))
    }
}
