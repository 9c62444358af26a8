use super::{pkcs1v15_generate_prefix, verify, Signature};
use crate::{Result, RsaPublicKey};
use alloc::vec::Vec;
use const_oid::AssociatedOid;
use core::marker::PhantomData;
use digest::Digest;
use signature::{hazmat::PrehashVerifier, DigestVerifier, Verifier};

/// Verifying key for `RSASSA-PKCS1-v1_5` signatures as described in [RFC8017 § 8.2].
///
/// [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2
#[derive(Debug)]
pub struct VerifyingKey<D>
where
    D: Digest,
{
    inner: RsaPublicKey,
    prefix: Vec<u8>,
    phantom: PhantomData<D>,
}

impl<D> VerifyingKey<D>
where
    D: Digest + AssociatedOid,
{
    /// Expects a `DigestInfo` prefix naming `D`.
    pub fn new(key: RsaPublicKey) -> Self {
        Self::with_prefix(key, pkcs1v15_generate_prefix::<D>())
    }
}

impl<D> VerifyingKey<D>
where
    D: Digest,
{
    /// Expects the bare digest with no `DigestInfo` prefix.
    ///
    /// ## Note: unprefixed signatures are uncommon
    ///
    /// In most cases you'll want to use [`VerifyingKey::new`] instead.
    pub fn new_unprefixed(key: RsaPublicKey) -> Self {
        Self::with_prefix(key, Vec::new())
    }

    pub(super) fn with_prefix(inner: RsaPublicKey, prefix: Vec<u8>) -> Self {
        Self {
            inner,
            prefix,
            phantom: PhantomData,
        }
    }

    fn check(&self, hashed: &[u8], signature: &Signature) -> Result<()> {
        verify(&self.inner, &self.prefix, hashed, &signature.inner)
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
    D: Digest,
{
    fn verify_digest(&self, digest: D, signature: &Signature) -> signature::Result<()> {
        Ok(self.check(&digest.finalize(), signature)?)
    }
}

impl<D> PrehashVerifier<Signature> for VerifyingKey<D>
where
    D: Digest,
{
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        Ok(self.check(prehash, signature)?)
    }
}

impl<D> Verifier<Signature> for VerifyingKey<D>
where
    D: Digest,
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
        Self::with_prefix(self.inner.clone(), self.prefix.clone())
    }
}

impl<D> PartialEq for VerifyingKey<D>
where
    D: Digest,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.prefix == other.prefix
    }
}

impl<D> From<RsaPublicKey> for VerifyingKey<D>
where
    D: Digest + AssociatedOid,
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
