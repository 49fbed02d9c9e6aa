#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Configuration
//!
//! Every transform is built from a [`KeyPair`]:
//!
//! - [`KeyPair::key_type`] picks the key half the operation runs with. Both
//!   halves are allowed for every operation, so a private key may encrypt and
//!   a public key may decrypt its output.
//! - [`KeyPair::format`] tells the decoder how the key bytes are encoded and
//!   selects the default padding: [`Padding::Pkcs1v15`] for
//!   [`KeyFormat::Pkcs1`], [`Padding::Oaep`] (encryption) or [`Padding::Pss`]
//!   (signatures) for [`KeyFormat::Pkcs8`].
//! - [`KeyPair::padding`] overrides that default. OAEP cannot sign and PSS
//!   cannot encrypt; constructors reject those combinations with
//!   [`Error::UnsupportedPaddingScheme`] before looking at the key.
//! - [`KeyPair::hash`] is the digest used by OAEP and by both signature
//!   schemes.
//!
//! Constructors parse the key once. A constructor that fails returns the
//! error and no instance, so a transform is always ready to use.
//!
//! # Single-shot transforms
//!
//! [`Encrypter`], [`Decrypter`], [`Signer`] and [`Verifier`] take a whole
//! buffer per call. Empty input yields empty output.
//!
//! ```
//! use rsa_transform::{HashAlgorithm, KeyFormat, KeyPair, KeyType, Signer, Verifier};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pair = KeyPair::new(KeyFormat::Pkcs8, HashAlgorithm::Sha256)
//!     .with_public_key(std::fs::read("tests/examples/pkcs8/rsa1024-pub.pem")?)
//!     .with_private_key(std::fs::read("tests/examples/pkcs8/rsa1024-priv.pem")?);
//!
//! let signer = Signer::new(&pair.clone().with_type(KeyType::Private))?;
//! let signature = signer.sign(b"hello world")?;
//!
//! let verifier = Verifier::new(&pair)?;
//! assert!(verifier.verify(b"hello world", &signature)?);
//! assert!(verifier.verify(b"goodbye world", &signature).is_err());
//! # Ok(())
//! # }
//! ```
//!
//! # Streaming transforms
//!
//! [`StreamEncrypter`], [`StreamDecrypter`], [`StreamSigner`] and
//! [`StreamVerifier`] plug into [`std::io`]; see the [`stream`] module.
//!
//! # Logging
//!
//! Construction logs the resolved configuration at `debug` level and the
//! streaming transforms log every block at `trace` level through the [`log`]
//! facade. Failures are returned, never logged.

pub use rand_core;
pub use rsa;

mod algorithms;
mod context;
mod encoding;
pub mod errors;
mod hash;
mod key;
mod padding;
mod resolve;
pub mod stream;

mod encryption;
mod signature;

#[cfg(test)]
mod test_keys;

pub use crate::{
    encryption::{Decrypter, Encrypter},
    errors::{Error, Result},
    hash::{HashAlgorithm, UnknownHashAlgorithm},
    key::{KeyFormat, KeyPair, KeyType, UnknownKeyFormat, UnknownKeyType},
    padding::{EncryptionScheme, Padding, SignatureScheme, UnknownPadding, PKCS1V15_OVERHEAD},
    resolve::Operation,
    signature::{Signer, Verifier},
    stream::{StreamDecrypter, StreamEncrypter, StreamSigner, StreamVerifier},
};
