use super::encrypt_digest;
use crate::{traits::RandomizedEncryptor, Result, RsaPublicKey};
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::marker::PhantomData;
use digest::{Digest, FixedOutputReset};
use rand_core::CryptoRngCore;

/// Encryption key for RSAES-OAEP encryption as described in [RFC8017 § 7.1].
///
/// `D` hashes the label and `MGD` drives MGF1. Messages may be at most
/// `k - 2 * D::output_size() - 2` bytes long.
///
/// [RFC8017 § 7.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
#[derive(Debug)]
pub struct EncryptingKey<D, MGD = D>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    inner: RsaPublicKey,
    label: Option<String>,
    phantom: PhantomData<(D, MGD)>,
}

impl<D, MGD> EncryptingKey<D, MGD>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    /// Encrypts under the empty label.
    pub fn new(key: RsaPublicKey) -> Self {
        Self::with_label(key, None)
    }

    /// Binds every ciphertext to `label`.
    pub fn new_with_label<S: AsRef<str>>(key: RsaPublicKey, label: S) -> Self {
        Self::with_label(key, Some(label.as_ref().to_string()))
    }

    pub(super) fn with_label(inner: RsaPublicKey, label: Option<String>) -> Self {
        Self {
            inner,
            label,
            phantom: PhantomData,
        }
    }

    /// Label bound to this key, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl<D, MGD> AsRef<RsaPublicKey> for EncryptingKey<D, MGD>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    fn as_ref(&self) -> &RsaPublicKey {
        &self.inner
    }
}

// the digests are markers, so no `Clone` bound on them
impl<D, MGD> Clone for EncryptingKey<D, MGD>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    fn clone(&self) -> Self {
        Self::with_label(self.inner.clone(), self.label.clone())
    }
}

impl<D, MGD> PartialEq for EncryptingKey<D, MGD>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.label == other.label
    }
}

impl<D, MGD> RandomizedEncryptor for EncryptingKey<D, MGD>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    fn encrypt_with_rng<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        encrypt_digest::<_, D, MGD>(rng, &self.inner, msg, self.label.clone())
    }
}
