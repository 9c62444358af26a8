//! EMSA-PSS encoding and verification, [RFC8017 § 9.1].
//!
//! Both operations are written once against [`PssHash`], which is
//! implemented for a runtime [`DynDigest`] and for a static [`Digest`].
//!
//! [RFC8017 § 9.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-9.1

use alloc::vec::Vec;
use digest::{Digest, DynDigest, FixedOutputReset};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::mgf::{mgf1_xor, mgf1_xor_digest};
use crate::errors::{Error, Result};

/// The hash operations EMSA-PSS needs.
trait PssHash {
    fn output_size(&self) -> usize;

    /// `H(0x00 * 8 || m_hash || salt)`
    fn hash_m_prime(&mut self, m_hash: &[u8], salt: &[u8]) -> Vec<u8>;

    /// `db ^= MGF1(h)`
    fn mask(&mut self, db: &mut [u8], h: &[u8]);
}

struct DynHash<'a>(&'a mut dyn DynDigest);

impl PssHash for DynHash<'_> {
    fn output_size(&self) -> usize {
        self.0.output_size()
    }

    fn hash_m_prime(&mut self, m_hash: &[u8], salt: &[u8]) -> Vec<u8> {
        self.0.update(&[0u8; 8]);
        self.0.update(m_hash);
        self.0.update(salt);
        self.0.finalize_reset().into_vec()
    }

    fn mask(&mut self, db: &mut [u8], h: &[u8]) {
        mgf1_xor(db, self.0, h);
    }
}

struct StaticHash<D>(D);

impl<D: Digest + FixedOutputReset> PssHash for StaticHash<D> {
    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }

    fn hash_m_prime(&mut self, m_hash: &[u8], salt: &[u8]) -> Vec<u8> {
        Digest::update(&mut self.0, [0u8; 8]);
        Digest::update(&mut self.0, m_hash);
        Digest::update(&mut self.0, salt);
        Digest::finalize_reset(&mut self.0).to_vec()
    }

    fn mask(&mut self, db: &mut [u8], h: &[u8]) {
        mgf1_xor_digest(db, &mut self.0, h);
    }
}

/// Mask clearing the `8 * em_len - em_bits` unused high bits of EM.
fn top_byte_mask(em_len: usize, em_bits: usize) -> u8 {
    0xff >> (8 * em_len - em_bits)
}

/// `EM = maskedDB || H || 0xbc` with `DB = PS || 0x01 || salt`.
fn encode(m_hash: &[u8], em_bits: usize, salt: &[u8], hash: &mut impl PssHash) -> Result<Vec<u8>> {
    let h_len = hash.output_size();
    let s_len = salt.len();
    let em_len = em_bits.div_ceil(8);

    if m_hash.len() != h_len {
        return Err(Error::InputNotHashed);
    }
    // The key cannot hold the digest and the salt.
    if em_len < h_len + s_len + 2 {
        return Err(Error::Internal);
    }

    let mut em = vec![0u8; em_len];
    let (db, rest) = em.split_at_mut(em_len - h_len - 1);
    let (h, trailer) = rest.split_at_mut(h_len);

    h.copy_from_slice(&hash.hash_m_prime(m_hash, salt));

    let salt_start = db.len() - s_len;
    db[salt_start - 1] = 0x01;
    db[salt_start..].copy_from_slice(salt);

    hash.mask(db, h);
    db[0] &= top_byte_mask(em_len, em_bits);
    trailer[0] = 0xbc;

    Ok(em)
}

/// Scans `db` for the salt. With a known `s_len` the leading
/// `db.len() - s_len - 1` bytes must be zero and followed by `0x01`;
/// otherwise the first nonzero byte must be `0x01` and the salt is
/// everything after it. The scan always covers all of `db`.
fn find_salt(db: &[u8], s_len: Option<usize>) -> (usize, Choice) {
    let mut looking = Choice::from(1u8);
    let mut separator = 0u32;
    let mut valid = Choice::from(1u8);

    for (i, byte) in db.iter().enumerate() {
        let is_one = byte.ct_eq(&0x01);
        let is_zero = byte.ct_eq(&0x00);
        separator.conditional_assign(&(i as u32), looking & is_one);
        valid &= !looking | is_zero | is_one;
        looking &= !is_one;
    }
    valid &= !looking;

    if let Some(s_len) = s_len {
        let expected = (db.len() - s_len - 1) as u32;
        valid &= separator.ct_eq(&expected);
    }

    let salt_len = db.len() - 1 - separator as usize;
    (salt_len, valid)
}

/// Checks that `em` (exactly `ceil(key_bits / 8)` bytes) is a valid
/// EMSA-PSS encoding of `m_hash`.
fn verify(
    m_hash: &[u8],
    em: &mut [u8],
    s_len: Option<usize>,
    hash: &mut impl PssHash,
    key_bits: usize,
) -> Result<()> {
    if key_bits < 2 || em.len() != key_bits.div_ceil(8) {
        return Err(Error::Verification);
    }
    let em_bits = key_bits - 1;
    let em_len = em_bits.div_ceil(8);
    let h_len = hash.output_size();

    // When em_bits is a multiple of eight the leading byte is not part of EM.
    let (lead, em) = em.split_at_mut(em.len() - em_len);
    if lead.iter().any(|&b| b != 0) {
        return Err(Error::Verification);
    }

    if m_hash.len() != h_len
        || em_len < h_len + s_len.unwrap_or(0) + 2
        || em[em_len - 1] != 0xbc
    {
        return Err(Error::Verification);
    }

    let mask = top_byte_mask(em_len, em_bits);
    if em[0] & !mask != 0 {
        return Err(Error::Verification);
    }

    let (db, rest) = em.split_at_mut(em_len - h_len - 1);
    let h = &rest[..h_len];

    hash.mask(db, h);
    db[0] &= mask;

    let (salt_len, salt_valid) = find_salt(db, s_len);
    let salt = &db[db.len() - salt_len..];
    let h_prime = hash.hash_m_prime(m_hash, salt);

    if bool::from(salt_valid & h_prime.as_slice().ct_eq(h)) {
        Ok(())
    } else {
        Err(Error::Verification)
    }
}

pub(crate) fn emsa_pss_encode(
    m_hash: &[u8],
    em_bits: usize,
    salt: &[u8],
    hash: &mut dyn DynDigest,
) -> Result<Vec<u8>> {
    encode(m_hash, em_bits, salt, &mut DynHash(hash))
}

pub(crate) fn emsa_pss_encode_digest<D>(m_hash: &[u8], em_bits: usize, salt: &[u8]) -> Result<Vec<u8>>
where
    D: Digest + FixedOutputReset,
{
    encode(m_hash, em_bits, salt, &mut StaticHash(D::new()))
}

/// Verifies an encoding recovered from a signature. `s_len` of `None`
/// accepts any salt length.
pub(crate) fn emsa_pss_verify(
    m_hash: &[u8],
    em: &mut [u8],
    s_len: Option<usize>,
    hash: &mut dyn DynDigest,
    key_bits: usize,
) -> Result<()> {
    verify(m_hash, em, s_len, &mut DynHash(hash), key_bits)
}

pub(crate) fn emsa_pss_verify_digest<D>(
    m_hash: &[u8],
    em: &mut [u8],
    s_len: Option<usize>,
    key_bits: usize,
) -> Result<()>
where
    D: Digest + FixedOutputReset,
{
    verify(m_hash, em, s_len, &mut StaticHash(D::new()), key_bits)
}
