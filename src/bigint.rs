//! Arbitrary-precision integers.
//!
//! [`BigUint`] stores its magnitude as little-endian `u64` limbs without
//! leading zero limbs, so every value has exactly one representation and
//! derived equality is value equality. Zero is the empty limb vector.
//! [`BigInt`] layers a [`Sign`] on top of a `BigUint` magnitude.
//!
//! Values behave as immutable numbers: the arithmetic operators return new
//! values and never share limb storage.

mod arith;
mod convert;
mod division;
mod monty;
mod random;
mod signed;

pub(crate) use self::monty::MontyParams;
pub use self::convert::ParseBigIntError;
pub use self::random::RandBigInt;
pub use self::signed::{BigInt, Sign};

use alloc::vec::Vec;
use core::cmp::Ordering;
use zeroize::Zeroize;

use crate::errors::{Error, Result};

/// An arbitrary-precision unsigned integer.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BigUint {
    pub(crate) data: Vec<u64>,
}

impl BigUint {
    /// Builds a value from little-endian limbs, dropping leading zero limbs.
    pub(crate) fn from_limbs(data: Vec<u64>) -> Self {
        let mut n = BigUint { data };
        n.normalize();
        n
    }

    #[inline]
    pub(crate) fn normalize(&mut self) {
        while let Some(&0) = self.data.last() {
            self.data.pop();
        }
    }

    /// Returns `0`.
    pub fn zero() -> Self {
        BigUint { data: Vec::new() }
    }

    /// Returns `1`.
    pub fn one() -> Self {
        BigUint { data: vec![1] }
    }

    /// Creates a value from big-endian bytes. Leading zero bytes are ignored.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let mut data = Vec::with_capacity((bytes.len() + 7) / 8);
        for chunk in bytes.rchunks(8) {
            let mut limb = 0u64;
            for &b in chunk {
                limb = (limb << 8) | u64::from(b);
            }
            data.push(limb);
        }
        Self::from_limbs(data)
    }

    /// Creates a value from little-endian bytes. Trailing zero bytes are ignored.
    pub fn from_bytes_le(bytes: &[u8]) -> Self {
        let mut data = Vec::with_capacity((bytes.len() + 7) / 8);
        for chunk in bytes.chunks(8) {
            let mut limb = 0u64;
            for (i, &b) in chunk.iter().enumerate() {
                limb |= u64::from(b) << (8 * i);
            }
            data.push(limb);
        }
        Self::from_limbs(data)
    }

    /// Returns the minimal big-endian byte encoding. Zero encodes as `[0]`.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut out = self.to_bytes_le();
        out.reverse();
        out
    }

    /// Returns the minimal little-endian byte encoding. Zero encodes as `[0]`.
    pub fn to_bytes_le(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 8);
        for limb in &self.data {
            out.extend_from_slice(&limb.to_le_bytes());
        }
        while out.len() > 1 && out.last() == Some(&0) {
            out.pop();
        }
        if out.is_empty() {
            out.push(0);
        }
        out
    }

    /// Number of significant bits; `0` for zero.
    pub fn bits(&self) -> usize {
        match self.data.last() {
            None => 0,
            Some(top) => self.data.len() * 64 - top.leading_zeros() as usize,
        }
    }

    /// Returns whether bit `i` is set.
    pub fn bit(&self, i: u64) -> bool {
        let limb = (i / 64) as usize;
        match self.data.get(limb) {
            Some(l) => (l >> (i % 64)) & 1 == 1,
            None => false,
        }
    }

    /// Sets or clears bit `i`.
    pub fn set_bit(&mut self, i: u64, value: bool) {
        let limb = (i / 64) as usize;
        let mask = 1u64 << (i % 64);
        if value {
            if limb >= self.data.len() {
                self.data.resize(limb + 1, 0);
            }
            self.data[limb] |= mask;
        } else if limb < self.data.len() {
            self.data[limb] &= !mask;
            self.normalize();
        }
    }

    /// Number of trailing zero bits, or `None` for zero.
    pub fn trailing_zeros(&self) -> Option<u64> {
        self.data
            .iter()
            .enumerate()
            .find(|&(_, &limb)| limb != 0)
            .map(|(i, limb)| i as u64 * 64 + u64::from(limb.trailing_zeros()))
    }

    /// Returns `true` for zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` for one.
    #[inline]
    pub fn is_one(&self) -> bool {
        self.data.len() == 1 && self.data[0] == 1
    }

    /// Returns `true` if the value is odd.
    #[inline]
    pub fn is_odd(&self) -> bool {
        self.data.first().map_or(false, |l| l & 1 == 1)
    }

    /// Returns `true` if the value is even (zero included).
    #[inline]
    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Little-endian limbs.
    pub fn limbs(&self) -> &[u64] {
        &self.data
    }

    /// Subtraction returning `None` instead of underflowing.
    pub fn checked_sub(&self, other: &BigUint) -> Option<BigUint> {
        let (diff, borrow) = arith::sub_limbs(&self.data, &other.data);
        if borrow != 0 {
            return None;
        }
        Some(Self::from_limbs(diff))
    }

    /// Quotient and remainder; fails with [`Error::DivisionByZero`] for a
    /// zero divisor.
    pub fn checked_div_rem(&self, other: &BigUint) -> Result<(BigUint, BigUint)> {
        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(division::div_rem(self, other))
    }

    /// Remainder of division by a single word.
    ///
    /// Panics if `d` is zero.
    pub(crate) fn rem_u64(&self, d: u64) -> u64 {
        assert!(d != 0, "attempt to divide by zero");
        let d = u128::from(d);
        let mut rem = 0u128;
        for &limb in self.data.iter().rev() {
            rem = ((rem << 64) | u128::from(limb)) % d;
        }
        rem as u64
    }

    /// Computes `self ^ exponent mod modulus`.
    ///
    /// For odd moduli the running time depends only on the limb lengths of
    /// `exponent` and `modulus`, never on the exponent's bit pattern, so it
    /// is safe to use with secret exponents. Even moduli fall back to a
    /// variable-time square-and-multiply.
    ///
    /// Returns `0` for a modulus of one. Panics if `modulus` is zero.
    pub fn modpow(&self, exponent: &BigUint, modulus: &BigUint) -> BigUint {
        assert!(!modulus.is_zero(), "attempt to calculate with zero modulus");
        if modulus.is_one() {
            return BigUint::zero();
        }
        if modulus.is_even() {
            return monty::modpow_plain(self, exponent, modulus);
        }
        monty::modpow_ct(self, exponent, modulus)
    }

    /// Computes `self ^ exponent mod modulus` in variable time.
    ///
    /// Only use this with a public exponent.
    pub fn modpow_vartime(&self, exponent: &BigUint, modulus: &BigUint) -> BigUint {
        assert!(!modulus.is_zero(), "attempt to calculate with zero modulus");
        if modulus.is_one() {
            return BigUint::zero();
        }
        if modulus.is_even() {
            return monty::modpow_plain(self, exponent, modulus);
        }
        monty::modpow_vartime(self, exponent, modulus)
    }
}

#[inline]
pub(crate) fn cmp_limbs(a: &[u64], b: &[u64]) -> Ordering {
    debug_assert!(a.last() != Some(&0) && b.last() != Some(&0));
    match a.len().cmp(&b.len()) {
        Ordering::Equal => {}
        other => return other,
    }
    for (x, y) in a.iter().rev().zip(b.iter().rev()) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

impl Ord for BigUint {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_limbs(&self.data, &other.data)
    }
}

impl PartialOrd for BigUint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Zeroize for BigUint {
    fn zeroize(&mut self) {
        self.data.zeroize();
    }
}
