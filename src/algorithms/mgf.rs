//! Mask generation function common to both PSS and OAEP padding

use digest::{Digest, DynDigest, FixedOutputReset};

/// RFC 8017 B.2.1 caps the mask at 2^32 hash blocks.
const MAX_LEN: u64 = u32::MAX as u64 + 1;

/// XORs `out` with `H(seed || C)` for `C = 0, 1, ...` as produced by
/// `block`, `block_len` bytes at a time.
fn xor_mask<B, F>(out: &mut [u8], block_len: usize, mut block: F)
where
    B: AsRef<[u8]>,
    F: FnMut(&[u8; 4]) -> B,
{
    assert!(out.len() as u64 <= MAX_LEN);

    for (counter, chunk) in out.chunks_mut(block_len).enumerate() {
        let mask = block(&(counter as u32).to_be_bytes());
        for (o, m) in chunk.iter_mut().zip(mask.as_ref()) {
            *o ^= m;
        }
    }
}

/// Mask generation function.
///
/// Panics if out is larger than 2**32. This is in accordance with RFC 8017 - PKCS #1 B.2.1
pub(crate) fn mgf1_xor(out: &mut [u8], digest: &mut dyn DynDigest, seed: &[u8]) {
    let block_len = digest.output_size();
    xor_mask(out, block_len, |counter| {
        digest.update(seed);
        digest.update(counter);
        digest.finalize_reset()
    });
}

/// Mask generation function.
///
/// Panics if out is larger than 2**32. This is in accordance with RFC 8017 - PKCS #1 B.2.1
pub(crate) fn mgf1_xor_digest<D>(out: &mut [u8], digest: &mut D, seed: &[u8])
where
    D: Digest + FixedOutputReset,
{
    xor_mask(out, <D as Digest>::output_size(), |counter| {
        Digest::update(digest, seed);
        Digest::update(digest, counter);
        digest.finalize_reset()
    });
}
