//! Minimal binary export of RSA keys.
//!
//! A key is written as a sequence of length-prefixed big-endian integers:
//! each field is a 4-byte big-endian length followed by the minimal
//! big-endian encoding of the value. Public keys carry `n, e`.

use alloc::vec::Vec;

use crate::bigint::BigUint;
use crate::errors::{Error, Result};
use crate::key::RsaPublicKey;
use crate::traits::PublicKeyParts;

#[cfg(feature = "hazmat")]
use {
    crate::{key::RsaPrivateKey, traits::PrivateKeyParts},
    zeroize::Zeroizing,
};

#[cfg(feature = "serde")]
use serdect::serde::{de, Deserialize, Deserializer, Serialize, Serializer};

fn write_field(out: &mut Vec<u8>, value: &BigUint) {
    let bytes = value.to_bytes_be();
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(&bytes);
}

/// Reads length-prefixed fields until `input` is exhausted.
struct FieldReader<'a> {
    input: &'a [u8],
}

impl<'a> FieldReader<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input }
    }

    fn next_field(&mut self) -> Result<BigUint> {
        if self.input.len() < 4 {
            return Err(Error::InvalidKeyEncoding);
        }
        let (len, rest) = self.input.split_at(4);
        let len = u32::from_be_bytes([len[0], len[1], len[2], len[3]]) as usize;
        if len == 0 || rest.len() < len {
            return Err(Error::InvalidKeyEncoding);
        }
        let (value, rest) = rest.split_at(len);
        self.input = rest;
        Ok(BigUint::from_bytes_be(value))
    }

    fn finish(self) -> Result<()> {
        if self.input.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidKeyEncoding)
        }
    }
}

impl RsaPublicKey {
    /// Exports the public key as `len(n) ‖ n ‖ len(e) ‖ e`, each length a
    /// big-endian `u32`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + self.size() + 8);
        write_field(&mut out, self.n());
        write_field(&mut out, self.e());
        out
    }

    /// Parses a key written by [`RsaPublicKey::to_bytes`].
    ///
    /// Truncated input, trailing bytes or empty fields yield
    /// [`Error::InvalidKeyEncoding`]. The decoded key is checked like
    /// [`RsaPublicKey::new`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = FieldReader::new(bytes);
        let n = reader.next_field()?;
        let e = reader.next_field()?;
        reader.finish()?;
        RsaPublicKey::new(n, e)
    }
}

#[cfg(feature = "hazmat")]
impl RsaPrivateKey {
    /// ⚠️ Exports every component of the private key (`n, e, d, p, q`) in
    /// the public key layout, without any protection.
    ///
    /// # ☢️️ WARNING: HAZARDOUS API ☢️
    ///
    /// Intended for tests and fixtures. The returned buffer is zeroized on drop.
    pub fn to_bytes_insecure(&self) -> Zeroizing<Vec<u8>> {
        let mut out = Zeroizing::new(Vec::new());
        write_field(&mut out, self.n());
        write_field(&mut out, self.e());
        write_field(&mut out, self.d());
        for prime in self.primes() {
            write_field(&mut out, prime);
        }
        out
    }

    /// ⚠️ Parses a key written by [`RsaPrivateKey::to_bytes_insecure`] and
    /// validates it.
    ///
    /// # ☢️️ WARNING: HAZARDOUS API ☢️
    ///
    /// Intended for tests and fixtures.
    pub fn from_bytes_insecure(bytes: &[u8]) -> Result<Self> {
        let mut reader = FieldReader::new(bytes);
        let n = reader.next_field()?;
        let e = reader.next_field()?;
        let d = reader.next_field()?;
        let p = reader.next_field()?;
        let q = reader.next_field()?;
        reader.finish()?;
        RsaPrivateKey::from_components(n, e, d, vec![p, q])
    }
}

#[cfg(feature = "serde")]
impl Serialize for RsaPublicKey {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serdect::slice::serialize_hex_lower_or_bin(&self.to_bytes(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for RsaPublicKey {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        Self::from_bytes(&bytes).map_err(de::Error::custom)
    }
}
