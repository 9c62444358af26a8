//! Uniform sampling of big integers.

use rand_core::RngCore;

use super::BigUint;

/// Random [`BigUint`] generation for any [`RngCore`].
///
/// Security of everything built on these values depends on `Self` being a
/// cryptographically secure generator.
pub trait RandBigInt {
    /// A uniformly random value with at most `bits` bits.
    fn gen_biguint(&mut self, bits: usize) -> BigUint;

    /// Like [`RandBigInt::gen_biguint`], reporting failures of the
    /// underlying source instead of panicking.
    fn try_gen_biguint(&mut self, bits: usize) -> Result<BigUint, rand_core::Error>;

    /// A uniformly random value in `[0, bound)`.
    ///
    /// Panics if `bound` is zero.
    fn gen_biguint_below(&mut self, bound: &BigUint) -> BigUint;

    /// A uniformly random value in `[low, high)`.
    ///
    /// Panics if `low >= high`.
    fn gen_biguint_range(&mut self, low: &BigUint, high: &BigUint) -> BigUint;
}

fn mask_to_bits(bytes: &mut [u8], bits: usize) {
    let extra = bytes.len() * 8 - bits;
    if extra > 0 {
        if let Some(top) = bytes.last_mut() {
            *top &= 0xff >> extra;
        }
    }
}

impl<R: RngCore + ?Sized> RandBigInt for R {
    fn gen_biguint(&mut self, bits: usize) -> BigUint {
        let mut bytes = vec![0u8; (bits + 7) / 8];
        self.fill_bytes(&mut bytes);
        mask_to_bits(&mut bytes, bits);
        BigUint::from_bytes_le(&bytes)
    }

    fn try_gen_biguint(&mut self, bits: usize) -> Result<BigUint, rand_core::Error> {
        let mut bytes = vec![0u8; (bits + 7) / 8];
        self.try_fill_bytes(&mut bytes)?;
        mask_to_bits(&mut bytes, bits);
        Ok(BigUint::from_bytes_le(&bytes))
    }

    fn gen_biguint_below(&mut self, bound: &BigUint) -> BigUint {
        assert!(!bound.is_zero(), "empty sampling range");
        let bits = bound.bits();
        loop {
            let n = self.gen_biguint(bits);
            if &n < bound {
                return n;
            }
        }
    }

    fn gen_biguint_range(&mut self, low: &BigUint, high: &BigUint) -> BigUint {
        assert!(low < high, "empty sampling range");
        low + &self.gen_biguint_below(&(high - low))
    }
}
