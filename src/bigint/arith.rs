//! Limb-level addition, subtraction, multiplication and shifts, plus the
//! operator impls for [`BigUint`].

use alloc::vec::Vec;
use core::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Rem, RemAssign, Shl, ShlAssign, Shr,
    ShrAssign, Sub, SubAssign,
};

use super::division::div_rem;
use super::BigUint;

/// `a + b + carry`, returning the low word and updating `carry`.
#[inline(always)]
pub(crate) fn adc(a: u64, b: u64, carry: &mut u64) -> u64 {
    let t = u128::from(a) + u128::from(b) + u128::from(*carry);
    *carry = (t >> 64) as u64;
    t as u64
}

/// `a - b - borrow`, returning the low word and updating `borrow` (0 or 1).
#[inline(always)]
pub(crate) fn sbb(a: u64, b: u64, borrow: &mut u64) -> u64 {
    let t = u128::from(a)
        .wrapping_sub(u128::from(b))
        .wrapping_sub(u128::from(*borrow));
    *borrow = ((t >> 64) as u64) & 1;
    t as u64
}

/// `acc + a * b + carry`, returning the low word and updating `carry`.
#[inline(always)]
pub(crate) fn mac(acc: u64, a: u64, b: u64, carry: &mut u64) -> u64 {
    let t = u128::from(acc) + u128::from(a) * u128::from(b) + u128::from(*carry);
    *carry = (t >> 64) as u64;
    t as u64
}

pub(crate) fn add_limbs(a: &[u64], b: &[u64]) -> Vec<u64> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Vec::with_capacity(long.len() + 1);
    let mut carry = 0;
    for (i, &x) in long.iter().enumerate() {
        let y = short.get(i).copied().unwrap_or(0);
        out.push(adc(x, y, &mut carry));
    }
    if carry != 0 {
        out.push(carry);
    }
    out
}

/// Returns `a - b` over `a.len()` limbs and the final borrow. A non-zero
/// borrow means `b > a`.
pub(crate) fn sub_limbs(a: &[u64], b: &[u64]) -> (Vec<u64>, u64) {
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = 0;
    for (i, &x) in a.iter().enumerate() {
        let y = b.get(i).copied().unwrap_or(0);
        out.push(sbb(x, y, &mut borrow));
    }
    if b.len() > a.len() && b[a.len()..].iter().any(|&l| l != 0) {
        borrow = 1;
    }
    (out, borrow)
}

/// Schoolbook product.
pub(crate) fn mul_limbs(a: &[u64], b: &[u64]) -> Vec<u64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0u64; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        let mut carry = 0;
        for (j, &y) in b.iter().enumerate() {
            out[i + j] = mac(out[i + j], x, y, &mut carry);
        }
        out[i + b.len()] = carry;
    }
    out
}

fn shl_bits(n: &BigUint, shift: usize) -> BigUint {
    if n.is_zero() {
        return BigUint::zero();
    }
    let limbs = shift / 64;
    let bits = (shift % 64) as u32;
    let mut out = vec![0u64; limbs];
    out.reserve(n.data.len() + 1);
    if bits == 0 {
        out.extend_from_slice(&n.data);
    } else {
        let mut carry = 0;
        for &x in &n.data {
            out.push((x << bits) | carry);
            carry = x >> (64 - bits);
        }
        if carry != 0 {
            out.push(carry);
        }
    }
    BigUint::from_limbs(out)
}

fn shr_bits(n: &BigUint, shift: usize) -> BigUint {
    let limbs = shift / 64;
    if limbs >= n.data.len() {
        return BigUint::zero();
    }
    let bits = (shift % 64) as u32;
    let src = &n.data[limbs..];
    if bits == 0 {
        return BigUint::from_limbs(src.to_vec());
    }
    let mut out = Vec::with_capacity(src.len());
    for i in 0..src.len() {
        let hi = match src.get(i + 1) {
            Some(&next) => next << (64 - bits),
            None => 0,
        };
        out.push((src[i] >> bits) | hi);
    }
    BigUint::from_limbs(out)
}

impl<'a, 'b> Add<&'b BigUint> for &'a BigUint {
    type Output = BigUint;

    fn add(self, other: &BigUint) -> BigUint {
        BigUint::from_limbs(add_limbs(&self.data, &other.data))
    }
}

impl<'a, 'b> Sub<&'b BigUint> for &'a BigUint {
    type Output = BigUint;

    /// Panics if `other > self`.
    fn sub(self, other: &BigUint) -> BigUint {
        match self.checked_sub(other) {
            Some(diff) => diff,
            None => panic!("attempt to subtract with overflow"),
        }
    }
}

impl<'a, 'b> Mul<&'b BigUint> for &'a BigUint {
    type Output = BigUint;

    fn mul(self, other: &BigUint) -> BigUint {
        BigUint::from_limbs(mul_limbs(&self.data, &other.data))
    }
}

impl<'a, 'b> Div<&'b BigUint> for &'a BigUint {
    type Output = BigUint;

    /// Panics on a zero divisor; see [`BigUint::checked_div_rem`].
    fn div(self, other: &BigUint) -> BigUint {
        assert!(!other.is_zero(), "attempt to divide by zero");
        div_rem(self, other).0
    }
}

impl<'a, 'b> Rem<&'b BigUint> for &'a BigUint {
    type Output = BigUint;

    /// Panics on a zero divisor; see [`BigUint::checked_div_rem`].
    fn rem(self, other: &BigUint) -> BigUint {
        assert!(!other.is_zero(), "attempt to calculate the remainder with a divisor of zero");
        div_rem(self, other).1
    }
}

/// Forwards the owned/borrowed operand combinations and the `*Assign`
/// variants to the `&a op &b` impl.
macro_rules! forward_binop {
    ($imp:ident, $method:ident, $imp_assign:ident, $method_assign:ident) => {
        impl $imp<BigUint> for BigUint {
            type Output = BigUint;

            #[inline]
            fn $method(self, other: BigUint) -> BigUint {
                (&self).$method(&other)
            }
        }

        impl<'a> $imp<&'a BigUint> for BigUint {
            type Output = BigUint;

            #[inline]
            fn $method(self, other: &BigUint) -> BigUint {
                (&self).$method(other)
            }
        }

        impl<'a> $imp<BigUint> for &'a BigUint {
            type Output = BigUint;

            #[inline]
            fn $method(self, other: BigUint) -> BigUint {
                self.$method(&other)
            }
        }

        impl<'a> $imp_assign<&'a BigUint> for BigUint {
            #[inline]
            fn $method_assign(&mut self, other: &BigUint) {
                *self = (&*self).$method(other);
            }
        }

        impl $imp_assign<BigUint> for BigUint {
            #[inline]
            fn $method_assign(&mut self, other: BigUint) {
                *self = (&*self).$method(&other);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);
forward_binop!(Div, div, DivAssign, div_assign);
forward_binop!(Rem, rem, RemAssign, rem_assign);

impl<'a> Shl<usize> for &'a BigUint {
    type Output = BigUint;

    fn shl(self, shift: usize) -> BigUint {
        shl_bits(self, shift)
    }
}

impl Shl<usize> for BigUint {
    type Output = BigUint;

    fn shl(self, shift: usize) -> BigUint {
        shl_bits(&self, shift)
    }
}

impl ShlAssign<usize> for BigUint {
    fn shl_assign(&mut self, shift: usize) {
        *self = shl_bits(self, shift);
    }
}

impl<'a> Shr<usize> for &'a BigUint {
    type Output = BigUint;

    fn shr(self, shift: usize) -> BigUint {
        shr_bits(self, shift)
    }
}

impl Shr<usize> for BigUint {
    type Output = BigUint;

    fn shr(self, shift: usize) -> BigUint {
        shr_bits(&self, shift)
    }
}

impl ShrAssign<usize> for BigUint {
    fn shr_assign(&mut self, shift: usize) {
        *self = shr_bits(self, shift);
    }
}
