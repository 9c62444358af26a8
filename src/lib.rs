#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]

//! Pure Rust RSA built on its own arbitrary-precision integer core.
//!
//! # Supported algorithms
//!
//! This crate supports several schemes described in [RFC8017]:
//!
//! - [OAEP encryption scheme](#oaep-encryption)
//! - [PKCS#1 v1.5 encryption scheme](#pkcs1-v15-encryption)
//! - [PKCS#1 v1.5 signature scheme](#pkcs1-v15-signatures)
//! - [PSS signature scheme](#pss-signatures)
//!
//! Keys are generated with the public exponent 65537 and a modulus of at
//! least 1024 bits; see [`RsaPrivateKey::new`]. The arithmetic lives in
//! [`bigint`], with primality testing and prime generation in [`prime`].
//!
//! # Usage
//!
//! ## OAEP encryption
//!
//! The usual job of RSA encryption is wrapping a symmetric session key.
//! Every padding failure on decryption surfaces as the same
//! [`Error::Decryption`], so a caller cannot be turned into a padding oracle.
//!
//! Note: requires `sha2` feature of `rsa-core` crate is enabled.
//!
#![cfg_attr(feature = "sha2", doc = "```")]
#![cfg_attr(not(feature = "sha2"), doc = "```ignore")]
//! use rand::RngCore;
//! use rsa_core::{Error, RsaPrivateKey, Oaep, sha2::Sha256};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate a key");
//! let public_key = private_key.to_public_key();
//!
//! let mut session_key = [0u8; 32];
//! rng.fill_bytes(&mut session_key);
//!
//! let wrapped = public_key
//!     .encrypt(&mut rng, Oaep::new::<Sha256>(), &session_key)
//!     .expect("failed to encrypt");
//! assert_eq!(wrapped.len(), 256);
//!
//! let unwrapped = private_key
//!     .decrypt(Oaep::new::<Sha256>(), &wrapped)
//!     .expect("failed to decrypt");
//! assert_eq!(unwrapped, session_key);
//!
//! let mut tampered = wrapped.clone();
//! tampered[17] ^= 1;
//! assert_eq!(
//!     private_key.decrypt(Oaep::new::<Sha256>(), &tampered),
//!     Err(Error::Decryption)
//! );
//! ```
//!
//! ## PKCS#1 v1.5 encryption
//!
//! Kept for interoperability. Plaintexts may be at most `k - 11` bytes.
//!
//! ```
//! use rsa_core::{Error, RsaPrivateKey, Pkcs1v15Encrypt};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let private_key = RsaPrivateKey::new(&mut rng, 1024).expect("failed to generate a key");
//! let public_key = private_key.to_public_key();
//!
//! let ct = public_key.encrypt(&mut rng, Pkcs1v15Encrypt, &[7u8; 117]).expect("failed to encrypt");
//! assert_eq!(private_key.decrypt(Pkcs1v15Encrypt, &ct), Ok(vec![7u8; 117]));
//!
//! assert_eq!(
//!     public_key.encrypt(&mut rng, Pkcs1v15Encrypt, &[7u8; 118]),
//!     Err(Error::MessageTooLong)
//! );
//! ```
//!
//! ## PKCS#1 v1.5 signatures
//!
//! Signatures are made over a digest. Verification answers with a `bool`;
//! a forged or corrupted signature is an ordinary `false`, never an error.
//!
//! Note: requires `sha2` feature of `rsa-core` crate is enabled.
//!
#![cfg_attr(feature = "sha2", doc = "```")]
#![cfg_attr(not(feature = "sha2"), doc = "```ignore")]
//! use rsa_core::{RsaPrivateKey, Pkcs1v15Sign};
//! use rsa_core::sha2::{Digest, Sha256};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate a key");
//! let public_key = private_key.to_public_key();
//!
//! let hashed = Sha256::digest(b"Alice knows Bob's secret.");
//! let signature = private_key
//!     .sign(Pkcs1v15Sign::new::<Sha256>(), &hashed)
//!     .expect("failed to sign");
//!
//! assert!(public_key.verify(Pkcs1v15Sign::new::<Sha256>(), &hashed, &signature));
//!
//! let other = Sha256::digest(b"Alice knows Bob's secret!");
//! assert!(!public_key.verify(Pkcs1v15Sign::new::<Sha256>(), &other, &signature));
//! ```
//!
//! ## PSS signatures
//!
//! The typed keys of [`pss`] and [`pkcs1v15`] hash the message themselves and
//! implement the [`signature`] traits. Their `is_valid` keeps the boolean
//! answer; the `Verifier` trait reports a mismatch as [`signature::Error`].
//!
//! Note: requires `sha2` feature of `rsa-core` crate is enabled.
//!
#![cfg_attr(feature = "sha2", doc = "```")]
#![cfg_attr(not(feature = "sha2"), doc = "```ignore")]
//! use rsa_core::RsaPrivateKey;
//! use rsa_core::pss::BlindedSigningKey;
//! use rsa_core::signature::{Keypair, RandomizedSigner, Verifier};
//! use rsa_core::sha2::Sha256;
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate a key");
//! let signing_key = BlindedSigningKey::<Sha256>::new(private_key);
//! let verifying_key = signing_key.verifying_key();
//!
//! let signature = signing_key.sign_with_rng(&mut rng, b"hello world");
//!
//! assert!(verifying_key.is_valid(b"hello world", &signature));
//! assert!(!verifying_key.is_valid(b"hello world!", &signature));
//! verifying_key.verify(b"hello world", &signature).expect("failed to verify");
//! ```
//!
//! ## Public key export
//!
//! [`RsaPublicKey::to_bytes`] writes `n` and `e` as length-prefixed
//! big-endian integers. The private exponent is never part of it.
//!
//! ```
//! use rsa_core::{BigUint, RsaPublicKey};
//!
//! let public_key = RsaPublicKey::new(BigUint::from(3233u64), BigUint::from(17u64))?;
//! let bytes = public_key.to_bytes();
//! assert_eq!(bytes, [0, 0, 0, 2, 0x0c, 0xa1, 0, 0, 0, 1, 0x11]);
//! assert_eq!(RsaPublicKey::from_bytes(&bytes)?, public_key);
//! # Ok::<(), rsa_core::Error>(())
//! ```
//!
//! [RFC8017]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use rand_core;
pub use signature;

#[macro_use]
mod macros;

mod algorithms;
pub mod bigint;
pub mod errors;
pub mod math;
pub mod oaep;
pub mod pkcs1v15;
pub mod prime;
pub mod pss;
pub mod traits;

mod dummy_rng;
mod encoding;
mod key;

#[cfg(feature = "sha2")]
pub use sha2;

pub use crate::{
    bigint::{BigInt, BigUint, RandBigInt, Sign},
    errors::{Error, KeyGenerationError, Result},
    key::{check_public, RsaPrivateKey, RsaPublicKey, DEFAULT_EXPONENT, MIN_KEY_BITS},
    math::ModInverse,
    oaep::Oaep,
    pkcs1v15::{Pkcs1v15Encrypt, Pkcs1v15Sign},
    prime::{generate_prime, is_probable_prime},
    pss::Pss,
};

#[cfg(feature = "hazmat")]
pub mod hazmat;
