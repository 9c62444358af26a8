//! EME-OAEP encoding and decoding, [RFC 8017 section 7.1](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).

use alloc::string::String;
use alloc::vec::Vec;

use digest::{Digest, DynDigest, FixedOutputReset};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroizing;

use super::mgf::{mgf1_xor, mgf1_xor_digest};
use crate::errors::{Error, Result};

/// 2^61 - 1, the input limit of SHA-1 in bytes.
const MAX_LABEL_LEN: u64 = (1 << 61) - 1;

fn label_bytes(label: &Option<String>) -> Option<&[u8]> {
    let label = label.as_deref().unwrap_or("").as_bytes();
    if label.len() as u64 > MAX_LABEL_LEN {
        return None;
    }
    Some(label)
}

/// Builds `EM = 0x00 || maskedSeed || maskedDB` where
/// `DB = lHash || PS || 0x01 || M`.
///
/// `mask(seed, db)` must apply `db ^= MGF(seed)` and then
/// `seed ^= MGF(db)`.
fn encode<R, M>(
    rng: &mut R,
    msg: &[u8],
    l_hash: &[u8],
    k: usize,
    mut mask: M,
) -> Result<Zeroizing<Vec<u8>>>
where
    R: CryptoRngCore + ?Sized,
    M: FnMut(&mut [u8], &mut [u8]),
{
    let h_len = l_hash.len();
    if msg.len() + 2 * h_len + 2 > k {
        return Err(Error::MessageTooLong);
    }

    let mut em = Zeroizing::new(vec![0u8; k]);
    let (seed, db) = em[1..].split_at_mut(h_len);
    rng.fill_bytes(seed);

    db[..h_len].copy_from_slice(l_hash);
    let msg_start = db.len() - msg.len();
    db[msg_start - 1] = 0x01;
    db[msg_start..].copy_from_slice(msg);

    mask(seed, db);

    Ok(em)
}

/// Reverses [`encode`].
///
/// Every structural check is folded into a single [`Choice`] and reported as
/// the one [`Error::Decryption`], so neither the error nor the running time
/// tells which check failed. `unmask(seed, db)` must apply
/// `seed ^= MGF(db)` and then `db ^= MGF(seed)`.
fn decode<M>(em: &mut [u8], l_hash: &[u8], k: usize, mut unmask: M) -> Result<Vec<u8>>
where
    M: FnMut(&mut [u8], &mut [u8]),
{
    let h_len = l_hash.len();
    if k < 2 * h_len + 2 || em.len() != k {
        return Err(Error::Decryption);
    }

    let leading_zero = em[0].ct_eq(&0u8);
    let (seed, db) = em[1..].split_at_mut(h_len);
    unmask(seed, db);

    let l_hash_matches = db[..h_len].ct_eq(l_hash);

    // After lHash: zero or more 0x00, one 0x01, then the message.
    let mut looking_for_one = Choice::from(1u8);
    let mut separator = 0u32;
    let mut garbage_before_one = Choice::from(0u8);

    for (i, byte) in db[h_len..].iter().enumerate() {
        let is_zero = byte.ct_eq(&0u8);
        let is_one = byte.ct_eq(&1u8);
        separator.conditional_assign(&(i as u32), looking_for_one & is_one);
        looking_for_one &= !is_one;
        garbage_before_one |= looking_for_one & !is_zero;
    }

    let valid = leading_zero & l_hash_matches & !garbage_before_one & !looking_for_one;
    if !bool::from(valid) {
        return Err(Error::Decryption);
    }

    Ok(db[h_len + separator as usize + 1..].to_vec())
}

/// Encrypts the given message with RSA and the padding scheme from
/// [PKCS#1 OAEP].
///
/// The message must be no longer than the length of the public modulus minus
/// `2 + (2 * hash.size())`.
///
/// [PKCS#1 OAEP]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
#[inline]
pub(crate) fn oaep_encrypt<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    msg: &[u8],
    digest: &mut dyn DynDigest,
    mgf_digest: &mut dyn DynDigest,
    label: Option<String>,
    k: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    let label = label_bytes(&label).ok_or(Error::LabelTooLong)?;
    digest.update(label);
    let l_hash = digest.finalize_reset();

    encode(rng, msg, &l_hash, k, |seed, db| {
        mgf1_xor(db, mgf_digest, seed);
        mgf1_xor(seed, mgf_digest, db);
    })
}

/// [`oaep_encrypt`] with statically known digests.
#[inline]
pub(crate) fn oaep_encrypt_digest<
    R: CryptoRngCore + ?Sized,
    D: Digest,
    MGD: Digest + FixedOutputReset,
>(
    rng: &mut R,
    msg: &[u8],
    label: Option<String>,
    k: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    let label = label_bytes(&label).ok_or(Error::LabelTooLong)?;
    let l_hash = D::digest(label);

    let mut mgf_digest = MGD::new();
    encode(rng, msg, &l_hash, k, |seed, db| {
        mgf1_xor_digest(db, &mut mgf_digest, seed);
        mgf1_xor_digest(seed, &mut mgf_digest, db);
    })
}

/// Decrypts OAEP padding.
///
/// Any malformed encoding yields [`Error::Decryption`] and nothing more.
///
/// [PKCS#1 OAEP]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
#[inline]
pub(crate) fn oaep_decrypt(
    em: &mut [u8],
    digest: &mut dyn DynDigest,
    mgf_digest: &mut dyn DynDigest,
    label: Option<String>,
    k: usize,
) -> Result<Vec<u8>> {
    let label = label_bytes(&label).ok_or(Error::Decryption)?;
    digest.update(label);
    let l_hash = digest.finalize_reset();

    decode(em, &l_hash, k, |seed, db| {
        mgf1_xor(seed, mgf_digest, db);
        mgf1_xor(db, mgf_digest, seed);
    })
}

/// [`oaep_decrypt`] with statically known digests.
#[inline]
pub(crate) fn oaep_decrypt_digest<D: Digest, MGD: Digest + FixedOutputReset>(
    em: &mut [u8],
    label: Option<String>,
    k: usize,
) -> Result<Vec<u8>> {
    let label = label_bytes(&label).ok_or(Error::Decryption)?;
    let l_hash = D::digest(label);

    let mut mgf_digest = MGD::new();
    decode(em, &l_hash, k, |seed, db| {
        mgf1_xor_digest(seed, &mut mgf_digest, db);
        mgf1_xor_digest(db, &mut mgf_digest, seed);
    })
}
