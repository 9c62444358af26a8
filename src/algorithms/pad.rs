//! Fixed-width big-endian encoding of integers.

use alloc::vec::Vec;
use zeroize::Zeroizing;

use crate::bigint::BigUint;
use crate::errors::{Error, Result};

/// Returns `input` left-padded with zeros to `padded_len` bytes.
#[inline]
pub(crate) fn left_pad(input: &[u8], padded_len: usize) -> Result<Vec<u8>> {
    if input.len() > padded_len {
        return Err(Error::InvalidPadLen);
    }

    let mut out = vec![0u8; padded_len];
    out[padded_len - input.len()..].copy_from_slice(input);
    Ok(out)
}

/// Encodes `input` as exactly `padded_len` big-endian bytes.
///
/// Zero encodes as all zero bytes.
#[inline]
pub(crate) fn uint_to_be_pad(input: BigUint, padded_len: usize) -> Result<Vec<u8>> {
    if input.is_zero() {
        return Ok(vec![0u8; padded_len]);
    }
    left_pad(&input.to_bytes_be(), padded_len)
}

/// Like [`uint_to_be_pad`], wiping the intermediate copies of a secret.
#[inline]
pub(crate) fn uint_to_zeroizing_be_pad(input: BigUint, padded_len: usize) -> Result<Vec<u8>> {
    let m = Zeroizing::new(input);
    if m.is_zero() {
        return Ok(vec![0u8; padded_len]);
    }
    let bytes = Zeroizing::new(m.to_bytes_be());
    left_pad(&bytes, padded_len)
}
