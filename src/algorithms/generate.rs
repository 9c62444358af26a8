//! Generate prime components for the RSA Private Key

use alloc::vec::Vec;
use rand_core::CryptoRngCore;

use crate::algorithms::rsa::{compute_modulus, compute_private_exponent_carmichael};
use crate::bigint::BigUint;
use crate::errors::{KeyGenerationError, Result};
use crate::math::gcd;
use crate::prime::generate_prime;

/// Upper bound on whole-key attempts, and on primes rejected for sharing a
/// factor with the public exponent.
pub(crate) const MAX_KEYGEN_ATTEMPTS: usize = 64;

pub(crate) struct RsaPrivateKeyComponents {
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    pub primes: Vec<BigUint>,
}

/// Generates a two-prime RSA key of exactly `bit_size` bits with public
/// exponent `exp`.
///
/// Each prime has its two top bits set, so `p * q` has the full size for
/// all but a negligible share of draws; those are retried, as are draws
/// with `p == q`. `d` is the inverse of `exp` modulo
/// `lcm(p - 1, q - 1)`.
pub(crate) fn generate_key_with_exp<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    exp: &BigUint,
    min_bits: usize,
) -> Result<RsaPrivateKeyComponents> {
    if bit_size < min_bits {
        return Err(KeyGenerationError::ModulusTooSmall {
            bits: bit_size,
            min: min_bits,
        }
        .into());
    }
    if exp.is_even() || exp < &BigUint::from(3u64) {
        return Err(KeyGenerationError::InvalidExponent.into());
    }

    log::debug!("generating {}-bit RSA key", bit_size);

    for attempt in 1..=MAX_KEYGEN_ATTEMPTS {
        let p = generate_prime_coprime_to(rng, bit_size / 2, exp)?;
        let q = generate_prime_coprime_to(rng, bit_size - p.bits(), exp)?;

        if p == q {
            log::debug!("attempt {}: p == q, retrying", attempt);
            continue;
        }

        let n = compute_modulus(&p, &q);
        if n.bits() != bit_size {
            log::debug!(
                "attempt {}: modulus has {} bits, retrying",
                attempt,
                n.bits()
            );
            continue;
        }

        let d = match compute_private_exponent_carmichael(&p, &q, exp) {
            Ok(d) => d,
            Err(_) => {
                log::debug!("attempt {}: exponent not invertible, retrying", attempt);
                continue;
            }
        };

        log::debug!(
            "generated {}-bit RSA key after {} attempt(s)",
            bit_size,
            attempt
        );
        return Ok(RsaPrivateKeyComponents {
            n,
            e: exp.clone(),
            d,
            primes: vec![p, q],
        });
    }

    log::debug!("giving up after {} key attempts", MAX_KEYGEN_ATTEMPTS);
    Err(KeyGenerationError::RetriesExhausted.into())
}

/// Draws primes until one satisfies `gcd(exp, p - 1) == 1`.
fn generate_prime_coprime_to<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bits: usize,
    exp: &BigUint,
) -> Result<BigUint> {
    let one = BigUint::one();
    for _ in 0..MAX_KEYGEN_ATTEMPTS {
        let p = generate_prime(rng, bits)?;
        if gcd(exp, &(&p - &one)).is_one() {
            return Ok(p);
        }
        log::debug!("prime shares a factor with the exponent, regenerating");
    }
    Err(KeyGenerationError::RetriesExhausted.into())
}
