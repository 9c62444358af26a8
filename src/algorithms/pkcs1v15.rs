//! PKCS#1 v1.5 encoding as described in [RFC8017 § 7.2] (encryption) and
//! [RFC8017 § 8.2] (signatures).
//!
//! [RFC8017 § 7.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.2
//! [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2

use alloc::vec::Vec;
use const_oid::AssociatedOid;
use digest::Digest;
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeGreater};
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Minimum length of the random padding string in an encryption block.
const MIN_PS_LEN: usize = 8;

/// Fills `data` with random non-zero bytes.
#[inline]
fn non_zero_random_bytes<R: CryptoRngCore + ?Sized>(rng: &mut R, data: &mut [u8]) {
    rng.fill_bytes(data);

    for el in data.iter_mut() {
        while *el == 0u8 {
            rng.fill_bytes(core::slice::from_mut(el));
        }
    }
}

/// Applies the padding scheme from PKCS#1 v1.5 for encryption:
/// `EM = 0x00 || 0x02 || PS || 0x00 || M`. The message must be no longer
/// than the length of the public modulus minus 11 bytes.
pub(crate) fn pkcs1v15_encrypt_pad<R>(
    rng: &mut R,
    msg: &[u8],
    k: usize,
) -> Result<Zeroizing<Vec<u8>>>
where
    R: CryptoRngCore + ?Sized,
{
    if msg.len() + MIN_PS_LEN + 3 > k {
        return Err(Error::MessageTooLong);
    }

    let separator = k - msg.len() - 1;
    let mut em = Zeroizing::new(vec![0u8; k]);
    em[1] = 2;
    non_zero_random_bytes(rng, &mut em[2..separator]);
    em[separator + 1..].copy_from_slice(msg);
    Ok(em)
}

/// Removes the encryption padding scheme from PKCS#1 v1.5.
///
/// The scan over `em` touches every byte and folds all checks into one
/// [`Choice`]; a malformed block is reported as the single
/// [`Error::Decryption`].
#[inline]
pub(crate) fn pkcs1v15_encrypt_unpad(em: Vec<u8>, k: usize) -> Result<Vec<u8>> {
    let em = Zeroizing::new(em);
    if k < MIN_PS_LEN + 3 || em.len() != k {
        return Err(Error::Decryption);
    }

    let mut valid = em[0].ct_eq(&0u8) & em[1].ct_eq(&2u8);

    let mut looking_for_zero = Choice::from(1u8);
    let mut separator = 0u32;
    for (i, el) in em.iter().enumerate().skip(2) {
        let is_zero = el.ct_eq(&0u8);
        separator.conditional_assign(&(i as u32), looking_for_zero & is_zero);
        looking_for_zero &= !is_zero;
    }

    // PS occupies em[2..separator].
    valid &= !looking_for_zero & separator.ct_gt(&((MIN_PS_LEN + 1) as u32));

    if !bool::from(valid) {
        return Err(Error::Decryption);
    }
    Ok(em[separator as usize + 1..].to_vec())
}

/// `EM = 0x00 || 0x01 || PS || 0x00 || T` with `PS` all `0xff` and
/// `T = prefix || hashed`.
#[inline]
pub(crate) fn pkcs1v15_sign_pad(prefix: &[u8], hashed: &[u8], k: usize) -> Result<Vec<u8>> {
    let t_len = prefix.len() + hashed.len();
    if k < t_len + MIN_PS_LEN + 3 {
        return Err(Error::MessageTooLong);
    }

    let mut em = vec![0xff; k];
    em[0] = 0;
    em[1] = 1;
    em[k - t_len - 1] = 0;
    em[k - t_len..k - hashed.len()].copy_from_slice(prefix);
    em[k - hashed.len()..].copy_from_slice(hashed);

    Ok(em)
}

/// Checks `em` against the encoding [`pkcs1v15_sign_pad`] would produce,
/// comparing every byte in constant time.
#[inline]
pub(crate) fn pkcs1v15_sign_unpad(prefix: &[u8], hashed: &[u8], em: &[u8], k: usize) -> Result<()> {
    let t_len = prefix.len() + hashed.len();
    if k < t_len + MIN_PS_LEN + 3 || em.len() != k {
        return Err(Error::Verification);
    }

    let mut ok = em[0].ct_eq(&0u8);
    ok &= em[1].ct_eq(&1u8);
    for el in &em[2..k - t_len - 1] {
        ok &= el.ct_eq(&0xff);
    }
    ok &= em[k - t_len - 1].ct_eq(&0u8);
    ok &= em[k - t_len..k - hashed.len()].ct_eq(prefix);
    ok &= em[k - hashed.len()..].ct_eq(hashed);

    if !bool::from(ok) {
        return Err(Error::Verification);
    }

    Ok(())
}

/// DER `DigestInfo` header for `D`:
/// `0x30 <oid_len + 8 + digest_len> 0x30 <oid_len + 4> 0x06 <oid_len> oid 0x05 0x00 0x04 <digest_len>`
#[inline]
pub(crate) fn pkcs1v15_generate_prefix<D>() -> Vec<u8>
where
    D: Digest + AssociatedOid,
{
    let oid = D::OID.as_bytes();
    let oid_len = oid.len() as u8;
    let digest_len = <D as Digest>::output_size() as u8;

    let mut v = Vec::with_capacity(oid.len() + 10);
    v.extend_from_slice(&[0x30, oid_len + 8 + digest_len, 0x30, oid_len + 4, 0x06, oid_len]);
    v.extend_from_slice(oid);
    v.extend_from_slice(&[0x05, 0x00, 0x04, digest_len]);
    v
}
