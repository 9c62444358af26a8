//! Generic RSA implementation

use alloc::borrow::Cow;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::bigint::{BigUint, RandBigInt};
use crate::errors::{Error, Result};
use crate::math::{lcm, ModInverse};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// ⚠️ Raw RSA encryption of m with the public key. No padding is performed.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_encrypt<K: PublicKeyParts>(key: &K, m: &BigUint) -> Result<BigUint> {
    Ok(m.modpow_vartime(key.e(), key.n()))
}

/// ⚠️ Performs raw RSA decryption with no padding or error checking.
///
/// Returns a plaintext `BigUint`. Performs RSA blinding if an `Rng` is passed.
/// Uses the Chinese remainder theorem when the key carries precomputed
/// values; every exponentiation with a secret exponent is constant-time.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt<R: CryptoRngCore + ?Sized>(
    rng: Option<&mut R>,
    priv_key: &impl PrivateKeyParts,
    c: &BigUint,
) -> Result<BigUint> {
    let n = priv_key.n();
    if n.is_zero() || c >= n {
        return Err(Error::Decryption);
    }

    let (c, unblinder) = match rng {
        Some(rng) => {
            let (blinded, unblinder) = blind(rng, priv_key, c);
            (Cow::Owned(blinded), Some(unblinder))
        }
        None => (Cow::Borrowed(c), None),
    };

    let m = match (priv_key.dp(), priv_key.dq(), priv_key.qinv(), priv_key.primes()) {
        (Some(dp), Some(dq), Some(qinv), [p, q]) => {
            // m = m2 + q * (qinv * (m1 - m2) mod p)
            let mut m1 = c.modpow(dp, p);
            let mut m2 = c.modpow(dq, q);
            let mut m2_mod_p = &m2 % p;
            let mut h = &(&(&m1 + p) - &m2_mod_p) * qinv % p;
            let m = &(&h * q) + &m2;

            m1.zeroize();
            m2.zeroize();
            m2_mod_p.zeroize();
            h.zeroize();
            m
        }
        _ => c.modpow(priv_key.d(), n),
    };

    match unblinder {
        Some(mut ir) => {
            let m = unblind(priv_key, &m, &ir);
            ir.zeroize();
            Ok(m)
        }
        None => Ok(m),
    }
}

/// ⚠️ Performs raw RSA decryption with no padding.
///
/// Returns a plaintext `BigUint`. Performs RSA blinding if an `Rng` is passed.  This will also
/// check for errors in the CRT computation.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt_and_check<R: CryptoRngCore + ?Sized>(
    priv_key: &impl PrivateKeyParts,
    rng: Option<&mut R>,
    c: &BigUint,
) -> Result<BigUint> {
    let m = rsa_decrypt(rng, priv_key, c)?;

    // In order to defend against errors in the CRT computation, m^e is
    // calculated, which should match the original ciphertext.
    let check = rsa_encrypt(priv_key, &m)?;

    if c != &check {
        return Err(Error::Internal);
    }

    Ok(m)
}

/// Returns the blinded c, along with the unblinding factor.
fn blind<R: CryptoRngCore + ?Sized, K: PublicKeyParts>(
    rng: &mut R,
    key: &K,
    c: &BigUint,
) -> (BigUint, BigUint) {
    // Blinding involves multiplying c by r^e.
    // Then the decryption operation performs (m^e * r^e)^d mod n
    // which equals mr mod n. The factor of r can then be removed
    // by multiplying by the multiplicative inverse of r.
    let n = key.n();

    let (mut r, unblinder) = loop {
        let r = rng.gen_biguint_below(n);
        if r.is_zero() {
            continue;
        }
        if let Some(ir) = r.clone().mod_inverse(n) {
            break (r, ir);
        }
    };

    let mut rpowe = r.modpow_vartime(key.e(), n);
    let blinded = &(c * &rpowe) % n;

    rpowe.zeroize();
    r.zeroize();

    (blinded, unblinder)
}

/// Given an m and and unblinding factor, unblind the m.
fn unblind(key: &impl PublicKeyParts, m: &BigUint, unblinder: &BigUint) -> BigUint {
    &(m * unblinder) % key.n()
}

/// Computes the modulus `n = p * q`.
pub(crate) fn compute_modulus(p: &BigUint, q: &BigUint) -> BigUint {
    p * q
}

/// Computes `d = e^-1 mod lcm(p - 1, q - 1)`.
///
/// Fails with [`Error::InvalidExponent`] when `e` is not invertible modulo
/// the Carmichael function of `p * q`.
pub(crate) fn compute_private_exponent_carmichael(
    p: &BigUint,
    q: &BigUint,
    exp: &BigUint,
) -> Result<BigUint> {
    let one = BigUint::one();
    let p1 = p.checked_sub(&one).ok_or(Error::InvalidPrime)?;
    let q1 = q.checked_sub(&one).ok_or(Error::InvalidPrime)?;

    let lambda = lcm(&p1, &q1);
    exp.clone()
        .mod_inverse(&lambda)
        .ok_or(Error::InvalidExponent)
}
