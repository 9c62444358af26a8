//! Number-theoretic helpers: modular inverse, gcd and lcm.

use core::mem;

use num_traits::{One, Zero};

use crate::bigint::{BigInt, BigUint};

/// Generic trait to implement modular inverse
pub trait ModInverse<R: Sized>: Sized {
    /// Function to calculate the [modular multiplicative
    /// inverse](https://en.wikipedia.org/wiki/Modular_multiplicative_inverse) of an integer *a* modulo *m*.
    ///
    /// Returns the inverse in `[0, m)`, or `None` if `gcd(a, m) != 1` or
    /// `m <= 1`.
    fn mod_inverse(self, m: R) -> Option<Self>;
}

impl<'a> ModInverse<&'a BigUint> for BigUint {
    fn mod_inverse(self, m: &'a BigUint) -> Option<BigUint> {
        mod_inverse(&self, m)
    }
}

impl ModInverse<BigUint> for BigUint {
    fn mod_inverse(self, m: BigUint) -> Option<BigUint> {
        mod_inverse(&self, &m)
    }
}

impl<'a> ModInverse<&'a BigInt> for BigInt {
    fn mod_inverse(self, m: &'a BigInt) -> Option<BigInt> {
        signed_mod_inverse(&self, m)
    }
}

impl ModInverse<BigInt> for BigInt {
    fn mod_inverse(self, m: BigInt) -> Option<BigInt> {
        signed_mod_inverse(&self, &m)
    }
}

fn signed_mod_inverse(a: &BigInt, m: &BigInt) -> Option<BigInt> {
    let m = m.to_biguint()?;
    if m.is_zero() {
        return None;
    }
    mod_inverse(&a.rem_euclid(&m), &m).map(BigInt::from)
}

/// Extended Euclid. The remainders stay non-negative, only the Bezout
/// coefficient needs a sign.
fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m <= &BigUint::one() {
        return None;
    }

    let mut old_r = a % m;
    let mut r = m.clone();
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();

    while !r.is_zero() {
        let (q, rem) = old_r.checked_div_rem(&r).ok()?;
        old_r = mem::replace(&mut r, rem);
        let next_s = &old_s - &(&BigInt::from(q) * &s);
        old_s = mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return None;
    }
    Some(old_s.rem_euclid(m))
}

/// Greatest common divisor; `gcd(0, 0) == 0`.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let r = &a % &b;
        a = mem::replace(&mut b, r);
    }
    a
}

/// Least common multiple; zero if either argument is zero.
pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    if a.is_zero() || b.is_zero() {
        return BigUint::zero();
    }
    &(a / &gcd(a, b)) * b
}
