//! Long division (Knuth, TAOCP vol. 2, 4.3.1, Algorithm D).

use alloc::vec::Vec;
use core::cmp::Ordering;

use super::arith::{adc, sbb};
use super::BigUint;

/// Returns `(u / d, u % d)`.
///
/// `d` must be non-zero; callers check.
pub(crate) fn div_rem(u: &BigUint, d: &BigUint) -> (BigUint, BigUint) {
    debug_assert!(!d.is_zero());

    if u.cmp(d) == Ordering::Less {
        return (BigUint::zero(), u.clone());
    }
    if d.data.len() == 1 {
        let (q, r) = div_rem_digit(&u.data, d.data[0]);
        return (BigUint::from_limbs(q), BigUint::from(r));
    }

    let (q, r) = div_rem_knuth(&u.data, &d.data);
    (BigUint::from_limbs(q), BigUint::from_limbs(r))
}

fn div_rem_digit(u: &[u64], d: u64) -> (Vec<u64>, u64) {
    let d = u128::from(d);
    let mut q = vec![0u64; u.len()];
    let mut rem = 0u128;
    for i in (0..u.len()).rev() {
        let cur = (rem << 64) | u128::from(u[i]);
        q[i] = (cur / d) as u64;
        rem = cur % d;
    }
    (q, rem as u64)
}

/// `u >= v`, `v` has at least two limbs and a non-zero top limb.
fn div_rem_knuth(u: &[u64], v: &[u64]) -> (Vec<u64>, Vec<u64>) {
    const B: u128 = 1 << 64;

    let n = v.len();
    let m = u.len() - n;

    // D1: normalize so the divisor's top bit is set.
    let s = v[n - 1].leading_zeros();
    let vn = shl_limbs(v, s, false);
    let mut un = shl_limbs(u, s, true);
    debug_assert_eq!(vn.len(), n);
    debug_assert_eq!(un.len(), u.len() + 1);

    let v_top = u128::from(vn[n - 1]);
    let v_next = u128::from(vn[n - 2]);
    let mut q = vec![0u64; m + 1];

    for j in (0..=m).rev() {
        // D3: estimate qhat from the top two limbs.
        let num = (u128::from(un[j + n]) << 64) | u128::from(un[j + n - 1]);
        let mut qhat = num / v_top;
        let mut rhat = num % v_top;
        while qhat >= B || qhat * v_next > ((rhat << 64) | u128::from(un[j + n - 2])) {
            qhat -= 1;
            rhat += v_top;
            if rhat >= B {
                break;
            }
        }

        // D4: multiply and subtract.
        let mut borrow = 0u64;
        let mut carry = 0u64;
        for i in 0..n {
            let p = qhat * u128::from(vn[i]) + u128::from(carry);
            carry = (p >> 64) as u64;
            un[i + j] = sbb(un[i + j], p as u64, &mut borrow);
        }
        un[j + n] = sbb(un[j + n], carry, &mut borrow);

        // D6: the estimate was one too large; add back.
        if borrow != 0 {
            qhat -= 1;
            let mut c = 0u64;
            for i in 0..n {
                un[i + j] = adc(un[i + j], vn[i], &mut c);
            }
            un[j + n] = un[j + n].wrapping_add(c);
        }

        q[j] = qhat as u64;
    }

    // D8: unnormalize the remainder.
    let r = if s == 0 {
        un[..n].to_vec()
    } else {
        (0..n)
            .map(|i| (un[i] >> s) | (un[i + 1] << (64 - s)))
            .collect()
    };

    (q, r)
}

/// Shifts `x` left by `s < 64` bits. With `extend` the result carries one
/// extra limb for the bits shifted out of the top.
fn shl_limbs(x: &[u64], s: u32, extend: bool) -> Vec<u64> {
    let mut out = Vec::with_capacity(x.len() + 1);
    if s == 0 {
        out.extend_from_slice(x);
        if extend {
            out.push(0);
        }
        return out;
    }
    let mut carry = 0u64;
    for &limb in x {
        out.push((limb << s) | carry);
        carry = limb >> (64 - s);
    }
    if extend {
        out.push(carry);
    }
    out
}
