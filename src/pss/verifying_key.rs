use super::{verify_digest, Signature};
use crate::{Result, RsaPublicKey};
use core::marker::PhantomData;
use digest::{Digest, FixedOutputReset};
use signature::{hazmat::PrehashVerifier, DigestVerifier, Verifier};

/// Verifying key for checking the validity of RSASSA-PSS signatures as
/// described in [RFC8017 § 8.1].
///
/// A key either expects one salt length or, built with
/// [`VerifyingKey::new_with_any_salt_len`], recovers it from the signature.
///
/// [RFC8017 § 8.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1
#[derive(Debug)]
pub struct VerifyingKey<D>
where
    D: Digest,
{
    inner: RsaPublicKey,
    salt_len: Option<usize>,
    phantom: PhantomData<D>,
}

impl<D> VerifyingKey<D>
where
    D: Digest,
{
    /// Expects salts as long as the digest output.
    pub fn new(key: RsaPublicKey) -> Self {
        Self::new_with_salt_len(key, <D as Digest>::output_size())
    }

    /// Expects salts of exactly `salt_len` bytes.
    pub fn new_with_salt_len(key: RsaPublicKey, salt_len: usize) -> Self {
        Self::with_salt(key, Some(salt_len))
    }

    /// Accepts any salt length.
    pub fn new_with_any_salt_len(key: RsaPublicKey) -> Self {
        Self::with_salt(key, None)
    }

    fn with_salt(inner: RsaPublicKey, salt_len: Option<usize>) -> Self {
        Self {
            inner,
            salt_len,
            phantom: PhantomData,
        }
    }

    /// Expected salt length, or `None` when any length is accepted.
    pub fn salt_len(&self) -> Option<usize> {
        self.salt_len
    }
}

impl<D> VerifyingKey<D>
where
    D: Digest + FixedOutputReset,
{
    fn check(&self, hashed: &[u8], signature: &Signature) -> Result<()> {
        verify_digest::<D>(&self.inner, hashed, &signature.inner, self.salt_len)
    }

    /// Hashes `msg` with `D` and reports whether `signature` is valid for it.
    ///
    /// Unlike [`Verifier::verify`], a mismatch is a plain `false`.
    pub fn is_valid(&self, msg: &[u8], signature: &Signature) -> bool {
        self.check(&D::digest(msg), signature).is_ok()
    }
}

impl<D> DigestVerifier<D, Signature> for VerifyingKey<D>
where
    D: Digest + FixedOutputReset,
{
    fn verify_digest(&self, digest: D, signature: &Signature) -> signature::Result<()> {
        Ok(self.check(&digest.finalize(), signature)?)
    }
}

impl<D> PrehashVerifier<Signature> for VerifyingKey<D>
where
    D: Digest + FixedOutputReset,
{
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        Ok(self.check(prehash, signature)?)
    }
}

impl<D> Verifier<Signature> for VerifyingKey<D>
where
    D: Digest + FixedOutputReset,
{
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        Ok(self.check(&D::digest(msg), signature)?)
    }
}

impl<D> AsRef<RsaPublicKey> for VerifyingKey<D>
where
    D: Digest,
{
    fn as_ref(&self) -> &RsaPublicKey {
        &self.inner
    }
}

// D is only a marker, so no `D: Clone` bound
impl<D> Clone for VerifyingKey<D>
where
    D: Digest,
{
    fn clone(&self) -> Self {
        Self::with_salt(self.inner.clone(), self.salt_len)
    }
}

impl<D> PartialEq for VerifyingKey<D>
where
    D: Digest,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.salt_len == other.salt_len
    }
}

impl<D> From<RsaPublicKey> for VerifyingKey<D>
where
    D: Digest,
{
    fn from(key: RsaPublicKey) -> Self {
        Self::new(key)
    }
}

impl<D> From<VerifyingKey<D>> for RsaPublicKey
where
    D: Digest,
{
    fn from(key: VerifyingKey<D>) -> Self {
        key.inner
    }
}
