use super::{sign_digest, Signature, VerifyingKey};
use crate::{Result, RsaPrivateKey};
use core::marker::PhantomData;
use digest::{Digest, FixedOutputReset};
use rand_core::CryptoRngCore;
use signature::{
    hazmat::RandomizedPrehashSigner, Keypair, RandomizedDigestSigner, RandomizedSigner,
};
use zeroize::ZeroizeOnDrop;

#[cfg(feature = "getrandom")]
use {
    rand_core::OsRng,
    signature::{hazmat::PrehashSigner, Signer},
};

/// Declares a PSS signing key type. `$blind` selects whether the private
/// key operation is masked with a random blinding factor.
macro_rules! pss_signing_key {
    ($(#[$doc:meta])* $name:ident, blind = $blind:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name<D>
        where
            D: Digest,
        {
            inner: RsaPrivateKey,
            salt_len: usize,
            phantom: PhantomData<D>,
        }

        impl<D> $name<D>
        where
            D: Digest,
        {
            /// Wraps `key`, using the digest output size as the salt length.
            pub fn new(key: RsaPrivateKey) -> Self {
                Self::new_with_salt_len(key, <D as Digest>::output_size())
            }

            /// Wraps `key` with an explicit salt length.
            pub fn new_with_salt_len(key: RsaPrivateKey, salt_len: usize) -> Self {
                Self {
                    inner: key,
                    salt_len,
                    phantom: PhantomData,
                }
            }

            /// Generates a fresh key of `bit_size` bits (at least 1024), using
            /// the digest output size as the salt length.
            pub fn random<R: CryptoRngCore + ?Sized>(rng: &mut R, bit_size: usize) -> Result<Self> {
                Self::random_with_salt_len(rng, bit_size, <D as Digest>::output_size())
            }

            /// Generates a fresh key of `bit_size` bits with an explicit salt length.
            pub fn random_with_salt_len<R: CryptoRngCore + ?Sized>(
                rng: &mut R,
                bit_size: usize,
                salt_len: usize,
            ) -> Result<Self> {
                Ok(Self::new_with_salt_len(
                    RsaPrivateKey::new(rng, bit_size)?,
                    salt_len,
                ))
            }

            /// Salt length used for every signature made with this key.
            pub fn salt_len(&self) -> usize {
                self.salt_len
            }

            fn sign_hashed<R: CryptoRngCore + ?Sized>(
                &self,
                rng: &mut R,
                hashed: &[u8],
            ) -> signature::Result<Signature>
            where
                D: FixedOutputReset,
            {
                sign_digest::<_, D>(rng, $blind, &self.inner, hashed, self.salt_len)?
                    .as_slice()
                    .try_into()
            }
        }

        impl<D> RandomizedDigestSigner<D, Signature> for $name<D>
        where
            D: Digest + FixedOutputReset,
        {
            fn try_sign_digest_with_rng(
                &self,
                rng: &mut impl CryptoRngCore,
                digest: D,
            ) -> signature::Result<Signature> {
                self.sign_hashed(rng, &digest.finalize())
            }
        }

        impl<D> RandomizedSigner<Signature> for $name<D>
        where
            D: Digest + FixedOutputReset,
        {
            fn try_sign_with_rng(
                &self,
                rng: &mut impl CryptoRngCore,
                msg: &[u8],
            ) -> signature::Result<Signature> {
                self.sign_hashed(rng, &D::digest(msg))
            }
        }

        impl<D> RandomizedPrehashSigner<Signature> for $name<D>
        where
            D: Digest + FixedOutputReset,
        {
            fn sign_prehash_with_rng(
                &self,
                rng: &mut impl CryptoRngCore,
                prehash: &[u8],
            ) -> signature::Result<Signature> {
                self.sign_hashed(rng, prehash)
            }
        }

        #[cfg(feature = "getrandom")]
        impl<D> PrehashSigner<Signature> for $name<D>
        where
            D: Digest + FixedOutputReset,
        {
            fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature> {
                self.sign_hashed(&mut OsRng, prehash)
            }
        }

        #[cfg(feature = "getrandom")]
        impl<D> Signer<Signature> for $name<D>
        where
            D: Digest + FixedOutputReset,
        {
            fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature> {
                self.sign_hashed(&mut OsRng, &D::digest(msg))
            }
        }

        impl<D> AsRef<RsaPrivateKey> for $name<D>
        where
            D: Digest,
        {
            fn as_ref(&self) -> &RsaPrivateKey {
                &self.inner
            }
        }

        impl<D> From<RsaPrivateKey> for $name<D>
        where
            D: Digest,
        {
            fn from(key: RsaPrivateKey) -> Self {
                Self::new(key)
            }
        }

        impl<D> From<$name<D>> for RsaPrivateKey
        where
            D: Digest,
        {
            fn from(key: $name<D>) -> Self {
                key.inner
            }
        }

        /// The verifying key checks for exactly this key's salt length.
        impl<D> Keypair for $name<D>
        where
            D: Digest,
        {
            type VerifyingKey = VerifyingKey<D>;

            fn verifying_key(&self) -> Self::VerifyingKey {
                VerifyingKey::new_with_salt_len(self.inner.to_public_key(), self.salt_len)
            }
        }

        impl<D> PartialEq for $name<D>
        where
            D: Digest,
        {
            fn eq(&self, other: &Self) -> bool {
                self.inner == other.inner && self.salt_len == other.salt_len
            }
        }

        impl<D> ZeroizeOnDrop for $name<D> where D: Digest {}
    };
}

pss_signing_key!(
    /// Signing key for producing RSASSA-PSS signatures as described in
    /// [RFC8017 § 8.1].
    ///
    /// [RFC8017 § 8.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1
    SigningKey,
    blind = false
);

pss_signing_key!(
    /// Signing key for producing "blinded" RSASSA-PSS signatures as described in
    /// [draft-irtf-cfrg-rsa-blind-signatures](https://datatracker.ietf.org/doc/draft-irtf-cfrg-rsa-blind-signatures/).
    ///
    /// The private key operation is always masked with a random blinding factor.
    BlindedSigningKey,
    blind = true
);
