//! Key pair configuration and parsed key material.

use core::fmt;
use core::str::FromStr;

use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroize;

use crate::encoding::{decode_private_key, decode_public_key};
use crate::errors::{Error, Result};
use crate::hash::HashAlgorithm;
use crate::padding::Padding;

/// Which half of the key pair drives an operation.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum KeyType {
    /// The public key.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "public-key"))]
    Public,
    /// The private key.
    #[cfg_attr(feature = "serde", serde(alias = "private-key"))]
    Private,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Public => f.write_str("public key"),
            KeyType::Private => f.write_str("private key"),
        }
    }
}

/// Unknown key type name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown key type `{0}`")]
pub struct UnknownKeyType(pub String);

impl FromStr for KeyType {
    type Err = UnknownKeyType;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(&['-', '_', ' '][..], "").as_str() {
            "public" | "publickey" => Ok(KeyType::Public),
            "private" | "privatekey" => Ok(KeyType::Private),
            _ => Err(UnknownKeyType(s.to_string())),
        }
    }
}

/// Key encoding. Besides telling the decoder what to expect, it selects
/// the default padding: [`Padding::Pkcs1v15`] for PKCS#1, OAEP or PSS for
/// PKCS#8.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum KeyFormat {
    /// `RSA PUBLIC KEY` / `RSA PRIVATE KEY` (RFC 8017).
    Pkcs1,
    /// `PUBLIC KEY` (SPKI) / `PRIVATE KEY` (RFC 5208).
    #[default]
    Pkcs8,
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyFormat::Pkcs1 => f.write_str("pkcs1"),
            KeyFormat::Pkcs8 => f.write_str("pkcs8"),
        }
    }
}

/// Unknown key format name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown key format `{0}`")]
pub struct UnknownKeyFormat(pub String);

impl FromStr for KeyFormat {
    type Err = UnknownKeyFormat;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(&['-', '_', ' ', '#'][..], "").as_str() {
            "pkcs1" => Ok(KeyFormat::Pkcs1),
            "pkcs8" => Ok(KeyFormat::Pkcs8),
            _ => Err(UnknownKeyFormat(s.to_string())),
        }
    }
}

/// Configuration shared by every encrypter, decrypter, signer and verifier.
///
/// Holds the encoded key material for both halves of the pair; `key_type`
/// picks the half an operation uses, so the same pair can drive
/// public-key encryption and private-key decryption, or the reverse.
///
/// ```
/// use rsa_transform::{KeyFormat, KeyPair, KeyType, HashAlgorithm, Padding};
///
/// let pair = KeyPair::new(KeyFormat::Pkcs8, HashAlgorithm::Sha256)
///     .with_type(KeyType::Private)
///     .with_padding(Padding::Pkcs1v15);
/// assert!(pair.private_key.is_empty());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeyPair {
    /// Key half used by the operation.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub key_type: KeyType,
    /// Key encoding.
    pub format: KeyFormat,
    /// Explicit padding; derived from `format` when `None`.
    pub padding: Option<Padding>,
    /// Hash used by OAEP and by signatures.
    pub hash: HashAlgorithm,
    /// Public key, PEM or DER.
    pub public_key: Vec<u8>,
    /// Private key, PEM or DER. Wiped on drop.
    pub private_key: Vec<u8>,
}

impl KeyPair {
    /// Creates an empty key pair configuration.
    pub fn new(format: KeyFormat, hash: HashAlgorithm) -> Self {
        Self {
            key_type: KeyType::default(),
            format,
            padding: None,
            hash,
            public_key: Vec::new(),
            private_key: Vec::new(),
        }
    }

    /// Sets the public key bytes.
    pub fn with_public_key(mut self, key: impl AsRef<[u8]>) -> Self {
        self.public_key = key.as_ref().to_vec();
        self
    }

    /// Sets the private key bytes.
    pub fn with_private_key(mut self, key: impl AsRef<[u8]>) -> Self {
        self.private_key.zeroize();
        self.private_key = key.as_ref().to_vec();
        self
    }

    /// Selects the key half operations use.
    pub fn with_type(mut self, key_type: KeyType) -> Self {
        self.key_type = key_type;
        self
    }

    /// Overrides the padding derived from the key format.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Sets the hash algorithm.
    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    /// Decodes the public key.
    pub fn parse_public_key(&self) -> Result<RsaPublicKey> {
        if self.public_key.is_empty() {
            return Err(Error::EmptyKey(KeyType::Public));
        }
        decode_public_key(&self.public_key, self.format).map_err(|source| Error::InvalidKey {
            key_type: KeyType::Public,
            source,
        })
    }

    /// Decodes the private key.
    pub fn parse_private_key(&self) -> Result<RsaPrivateKey> {
        if self.private_key.is_empty() {
            return Err(Error::EmptyKey(KeyType::Private));
        }
        decode_private_key(&self.private_key, self.format).map_err(|source| Error::InvalidKey {
            key_type: KeyType::Private,
            source,
        })
    }

    /// Decodes the half selected by `key_type`.
    pub(crate) fn load_key(&self) -> Result<Key> {
        match self.key_type {
            KeyType::Public => self.parse_public_key().map(Key::Public),
            KeyType::Private => self.parse_private_key().map(|key| Key::Private(Box::new(key))),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("key_type", &self.key_type)
            .field("format", &self.format)
            .field("padding", &self.padding)
            .field("hash", &self.hash)
            .field("public_key", &format_args!("{} bytes", self.public_key.len()))
            .field("private_key", &"..")
            .finish()
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

/// Parsed key for one direction.
#[derive(Clone)]
pub(crate) enum Key {
    Public(RsaPublicKey),
    Private(Box<RsaPrivateKey>),
}

impl Key {
    /// Modulus size in bytes.
    pub(crate) fn size(&self) -> usize {
        match self {
            Key::Public(key) => key.size(),
            Key::Private(key) => key.size(),
        }
    }

    pub(crate) fn key_type(&self) -> KeyType {
        match self {
            Key::Public(_) => KeyType::Public,
            Key::Private(_) => KeyType::Private,
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.key_type(), self.size())
    }
}
