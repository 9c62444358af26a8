//! Modular exponentiation.
//!
//! Odd moduli use Montgomery multiplication in CIOS form. [`modpow_ct`]
//! walks every 4-bit window of every exponent limb, always performs the
//! table multiply, and reads the table by scanning all of it, so the
//! sequence of operations depends only on the limb counts of the exponent
//! and the modulus.

use alloc::vec::Vec;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

use super::arith::{adc, mac, sbb};
use super::BigUint;

const WINDOW: usize = 4;
const TABLE_SIZE: usize = 1 << WINDOW;

/// Precomputed values for arithmetic modulo an odd `m`.
pub(crate) struct MontyParams {
    modulus: Vec<u64>,
    /// `-m^-1 mod 2^64`
    m_inv: u64,
    /// `R mod m`, the Montgomery form of one.
    one: Vec<u64>,
    /// `R^2 mod m`
    r2: Vec<u64>,
}

impl MontyParams {
    pub(crate) fn new(modulus: &BigUint) -> Self {
        debug_assert!(modulus.is_odd());
        let n = modulus.data.len();

        // Newton iteration; each step doubles the number of correct low
        // bits, starting from 3 (m * m == 1 mod 8 for odd m).
        let m0 = modulus.data[0];
        let mut inv = m0;
        for _ in 0..5 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(m0.wrapping_mul(inv)));
        }

        let one = &(BigUint::one() << (64 * n)) % modulus;
        let r2 = &(BigUint::one() << (128 * n)) % modulus;

        MontyParams {
            modulus: modulus.data.clone(),
            m_inv: inv.wrapping_neg(),
            one: pad(&one, n),
            r2: pad(&r2, n),
        }
    }

    fn len(&self) -> usize {
        self.modulus.len()
    }

    /// `a * b * R^-1 mod m` for `a, b < m`.
    fn mul(&self, a: &[u64], b: &[u64]) -> Vec<u64> {
        let n = self.len();
        let m = &self.modulus;
        let mut t = vec![0u64; n + 2];

        for &bi in b.iter().take(n) {
            let mut c = 0;
            for j in 0..n {
                t[j] = mac(t[j], a[j], bi, &mut c);
            }
            let mut c2 = 0;
            t[n] = adc(t[n], c, &mut c2);
            t[n + 1] = c2;

            let u = t[0].wrapping_mul(self.m_inv);
            let mut c = 0;
            mac(t[0], u, m[0], &mut c);
            for j in 1..n {
                t[j - 1] = mac(t[j], u, m[j], &mut c);
            }
            let mut c2 = 0;
            t[n - 1] = adc(t[n], c, &mut c2);
            t[n] = t[n + 1] + c2;
        }

        // t < 2m; subtract m unless that borrows.
        let mut reduced = vec![0u64; n];
        let mut borrow = 0;
        for j in 0..n {
            reduced[j] = sbb(t[j], m[j], &mut borrow);
        }
        sbb(t[n], 0, &mut borrow);
        let keep_t = Choice::from((borrow & 1) as u8);
        for j in 0..n {
            reduced[j].conditional_assign(&t[j], keep_t);
        }
        t.zeroize();
        reduced
    }

    /// `x * R mod m`, padded to the modulus width.
    pub(crate) fn to_monty(&self, x: &BigUint) -> Vec<u64> {
        let n = self.len();
        let m = BigUint {
            data: self.modulus.clone(),
        };
        let reduced = pad(&(x % &m), n);
        self.mul(&reduced, &self.r2)
    }

    /// `x^2 * R^-1 mod m`, so squaring stays in Montgomery form.
    pub(crate) fn square(&self, x: &[u64]) -> Vec<u64> {
        self.mul(x, x)
    }

    fn from_monty(&self, x: &[u64]) -> BigUint {
        let mut unit = vec![0u64; self.len()];
        unit[0] = 1;
        BigUint::from_limbs(self.mul(x, &unit))
    }

    /// `base^k` in Montgomery form for `k` in `0..TABLE_SIZE`.
    fn power_table(&self, base: &[u64]) -> Vec<Vec<u64>> {
        let mut table = Vec::with_capacity(TABLE_SIZE);
        table.push(self.one.clone());
        table.push(base.to_vec());
        for k in 2..TABLE_SIZE {
            let next = self.mul(&table[k - 1], base);
            table.push(next);
        }
        table
    }
}

fn pad(x: &BigUint, n: usize) -> Vec<u64> {
    let mut out = x.data.clone();
    out.resize(n, 0);
    out
}

/// Reads `table[index]` touching every entry.
fn ct_lookup(table: &[Vec<u64>], index: u64) -> Vec<u64> {
    let mut out = vec![0u64; table[0].len()];
    for (k, entry) in table.iter().enumerate() {
        let hit = (k as u64).ct_eq(&index);
        for (o, e) in out.iter_mut().zip(entry) {
            o.conditional_assign(e, hit);
        }
    }
    out
}

/// Fixed-window exponentiation for an odd modulus `> 1`.
pub(crate) fn modpow_ct(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    let params = MontyParams::new(modulus);
    let base = params.to_monty(base);
    let mut table = params.power_table(&base);

    let mut acc = params.one.clone();
    for &limb in exponent.data.iter().rev() {
        for w in (0..64 / WINDOW).rev() {
            for _ in 0..WINDOW {
                acc = params.mul(&acc, &acc);
            }
            let index = (limb >> (w * WINDOW)) & (TABLE_SIZE as u64 - 1);
            let mut entry = ct_lookup(&table, index);
            acc = params.mul(&acc, &entry);
            entry.zeroize();
        }
    }

    let out = params.from_monty(&acc);
    acc.zeroize();
    for entry in table.iter_mut() {
        entry.zeroize();
    }
    out
}

/// Sliding over the significant windows only; for public exponents.
pub(crate) fn modpow_vartime(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    let params = MontyParams::new(modulus);
    let base = params.to_monty(base);
    let table = params.power_table(&base);

    let bits = exponent.bits();
    let windows = (bits + WINDOW - 1) / WINDOW;
    let mut acc = params.one.clone();
    let mut started = false;
    for w in (0..windows).rev() {
        if started {
            for _ in 0..WINDOW {
                acc = params.mul(&acc, &acc);
            }
        }
        let mut index = 0usize;
        for b in 0..WINDOW {
            if exponent.bit((w * WINDOW + b) as u64) {
                index |= 1 << b;
            }
        }
        if index != 0 {
            acc = params.mul(&acc, &table[index]);
            started = true;
        }
    }

    params.from_monty(&acc)
}

/// Square-and-multiply with plain remainders, for even moduli.
pub(crate) fn modpow_plain(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    let base = base % modulus;
    let mut acc = BigUint::one();
    for i in (0..exponent.bits() as u64).rev() {
        acc = &(&acc * &acc) % modulus;
        if exponent.bit(i) {
            acc = &(&acc * &base) % modulus;
        }
    }
    acc
}
