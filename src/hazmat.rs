//! ⚠️ Low-level "hazmat" RSA functions.
//!
//! # ☢️️ WARNING: HAZARDOUS API ☢️
//!
//! Everything here works on bare integers: `m^e mod n` and its inverse, with
//! no padding added or checked. Unpadded RSA is malleable and deterministic,
//! so these are only building blocks for reviewed constructions and for
//! tests.
//!
//! The same feature also enables [`RsaPrivateKey::to_bytes_insecure`] and
//! [`RsaPrivateKey::from_bytes_insecure`], which move unprotected private
//! key material in and out of the crate.
//!
//! [`RsaPrivateKey::to_bytes_insecure`]: crate::RsaPrivateKey::to_bytes_insecure
//! [`RsaPrivateKey::from_bytes_insecure`]: crate::RsaPrivateKey::from_bytes_insecure

pub use crate::algorithms::rsa::{rsa_decrypt, rsa_decrypt_and_check, rsa_encrypt};
