//! Probabilistic primality testing and random prime generation.
//!
//! Everything here draws randomness from the caller. The generator must be
//! a cryptographically secure one: primes produced from a predictable
//! source yield keys anyone can reconstruct.

use alloc::vec::Vec;
use num_traits::ToPrimitive;
use rand_core::CryptoRngCore;

use crate::bigint::{BigUint, MontyParams, RandBigInt};
use crate::errors::{KeyGenerationError, Result};

/// Miller-Rabin rounds used by [`generate_prime`]. A composite survives a
/// round with probability at most 1/4, so 64 rounds bound the error by
/// 2^-128.
pub const DEFAULT_MR_ROUNDS: usize = 64;

/// A list of small, prime numbers that allows us to rapidly
/// exclude some fraction of composite candidates when searching for a random
/// prime. This list is truncated at the point where the product exceeds
/// a u64. It does not include two because we ensure that the candidates are
/// odd by construction.
const SMALL_PRIMES: [u64; 15] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];

/// The product of the values in `SMALL_PRIMES`.
const SMALL_PRIMES_PRODUCT: u64 = 16_294_579_238_595_022_365;

/// Bases for which Miller-Rabin is exact on every input below 2^64.
const DETERMINISTIC_BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// `n - 1 = d * 2^s` with `d` odd. The squaring steps run in Montgomery
/// form, where every value is reduced below `n` and so compares directly.
struct MillerRabin {
    n: BigUint,
    n_minus_one: BigUint,
    d: BigUint,
    s: u64,
    monty: MontyParams,
    one: Vec<u64>,
    minus_one: Vec<u64>,
}

impl MillerRabin {
    /// `n` must be odd and greater than one.
    fn new(n: &BigUint) -> Self {
        let n_minus_one = n - &BigUint::one();
        let s = n_minus_one.trailing_zeros().unwrap_or(0);
        let d = &n_minus_one >> s as usize;
        let monty = MontyParams::new(n);
        let one = monty.to_monty(&BigUint::one());
        let minus_one = monty.to_monty(&n_minus_one);
        MillerRabin {
            n: n.clone(),
            n_minus_one,
            d,
            s,
            monty,
            one,
            minus_one,
        }
    }

    /// Reports whether `n` is a strong probable prime to `base`.
    fn passes(&self, base: &BigUint) -> bool {
        let mut x = self.monty.to_monty(&base.modpow(&self.d, &self.n));
        if x == self.one || x == self.minus_one {
            return true;
        }
        for _ in 1..self.s {
            x = self.monty.square(&x);
            if x == self.minus_one {
                return true;
            }
            if x == self.one {
                return false;
            }
        }
        false
    }
}

/// Reports whether `n` is probably prime.
///
/// Small factors are ruled out by trial division. Inputs below 2^64 are
/// then decided exactly with a fixed set of Miller-Rabin bases. Larger
/// inputs get `rounds` Miller-Rabin rounds with bases drawn uniformly from
/// `[2, n - 2]`; a composite passes with probability at most
/// `4^-rounds`. At least one round is always run.
///
/// Not suitable for judging numbers an adversary may have crafted against
/// a known random source.
pub fn is_probable_prime<R: CryptoRngCore + ?Sized>(rng: &mut R, n: &BigUint, rounds: usize) -> bool {
    if n.bits() < 2 {
        return false;
    }
    if n.is_even() {
        return n.to_u64() == Some(2);
    }
    for &p in SMALL_PRIMES.iter() {
        if n.rem_u64(p) == 0 {
            return n.to_u64() == Some(p);
        }
    }

    let mr = MillerRabin::new(n);
    if n.bits() <= 64 {
        return DETERMINISTIC_BASES
            .iter()
            .all(|&base| mr.passes(&BigUint::from(base)));
    }

    let two = BigUint::from(2u64);
    (0..rounds.max(1)).all(|_| {
        let base = rng.gen_biguint_range(&two, &mr.n_minus_one);
        mr.passes(&base)
    })
}

/// Upper bound on fresh candidates drawn by [`generate_prime_with_rounds`].
///
/// After sieving, roughly one candidate in `bits / 11` is prime, so this
/// bound is reached only with negligible probability unless the random
/// source is broken.
pub fn max_prime_candidates(bits: usize) -> usize {
    (16 * bits).max(64)
}

/// Generates a random prime of exactly `bits` bits, tested with
/// [`DEFAULT_MR_ROUNDS`] Miller-Rabin rounds.
///
/// `rng` must be a cryptographically secure generator.
pub fn generate_prime<R: CryptoRngCore + ?Sized>(rng: &mut R, bits: usize) -> Result<BigUint> {
    generate_prime_with_rounds(rng, bits, DEFAULT_MR_ROUNDS)
}

/// Generates a random prime of exactly `bits` bits with a configurable
/// number of Miller-Rabin rounds.
///
/// The two most significant bits of every candidate are set, so the
/// product of two such primes never comes out one bit short, and the low
/// bit is set. Each fresh candidate is read with
/// [`RandBigInt::try_gen_biguint`]; a failing source aborts the search with
/// [`KeyGenerationError::RandomSource`].
pub fn generate_prime_with_rounds<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bits: usize,
    rounds: usize,
) -> Result<BigUint> {
    if bits < 2 {
        return Err(KeyGenerationError::PrimeTooSmall.into());
    }

    let limit = max_prime_candidates(bits);
    for attempt in 0..limit {
        let candidate = random_candidate(rng, bits)?;
        let p = match sieve(candidate, bits) {
            Some(p) => p,
            None => continue,
        };

        // Adding the sieve delta can push the candidate one bit over.
        if p.bits() == bits && is_probable_prime(rng, &p, rounds) {
            log::trace!("found {}-bit prime after {} candidates", bits, attempt + 1);
            return Ok(p);
        }
    }

    log::debug!("no {}-bit prime within {} candidates", bits, limit);
    Err(KeyGenerationError::RetriesExhausted.into())
}

fn random_candidate<R: CryptoRngCore + ?Sized>(rng: &mut R, bits: usize) -> Result<BigUint> {
    let mut p = rng
        .try_gen_biguint(bits)
        .map_err(|_| KeyGenerationError::RandomSource)?;

    // Set the two most significant bits and make the candidate odd.
    p.set_bit(bits as u64 - 1, true);
    p.set_bit(bits as u64 - 2, true);
    p.set_bit(0, true);
    Ok(p)
}

/// Advances `p` by the smallest even delta that leaves it free of the
/// factors in `SMALL_PRIMES`.
fn sieve(p: BigUint, bits: usize) -> Option<BigUint> {
    let rem = (&p % &BigUint::from(SMALL_PRIMES_PRODUCT)).to_u64()?;

    let delta = (0..1u64 << 20).step_by(2).find(|delta| {
        let m = rem + delta;
        SMALL_PRIMES
            .iter()
            .all(|&prime| m % prime != 0 || (bits <= 6 && m == prime))
    })?;

    Some(p + BigUint::from(delta))
}
