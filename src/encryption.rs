//! Single-shot encryption and decryption.
//!
//! Each call transforms exactly one RSA block. Use
//! [`StreamEncrypter`](crate::StreamEncrypter) and
//! [`StreamDecrypter`](crate::StreamDecrypter) for data larger than one block.

use rand_core::{CryptoRngCore, OsRng};

use crate::context::EncryptionContext;
use crate::errors::{Error, Result};
use crate::key::KeyPair;
use crate::padding::EncryptionScheme;
use crate::resolve::Operation;

/// Encrypts one block with the key half selected by the [`KeyPair`].
///
/// ```
/// use rsa_transform::{Decrypter, Encrypter, HashAlgorithm, KeyFormat, KeyPair, KeyType};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pair = KeyPair::new(KeyFormat::Pkcs8, HashAlgorithm::Sha256)
///     .with_public_key(std::fs::read("tests/examples/pkcs8/rsa1024-pub.pem")?)
///     .with_private_key(std::fs::read("tests/examples/pkcs8/rsa1024-priv.pem")?);
///
/// let ciphertext = Encrypter::new(&pair)?.encrypt(b"hello world")?;
/// let decrypter = Decrypter::new(&pair.with_type(KeyType::Private))?;
/// assert_eq!(decrypter.decrypt(&ciphertext)?, b"hello world");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Encrypter {
    ctx: EncryptionContext,
}

impl Encrypter {
    /// Resolves the padding and parses the key.
    pub fn new(pair: &KeyPair) -> Result<Self> {
        Ok(Self {
            ctx: EncryptionContext::new(pair, Operation::Encrypt)?,
        })
    }

    /// Modulus size in bytes; also the ciphertext length.
    pub fn key_size(&self) -> usize {
        self.ctx.key_size()
    }

    /// Resolved scheme.
    pub fn scheme(&self) -> EncryptionScheme {
        self.ctx.scheme()
    }

    /// Longest plaintext accepted by [`Encrypter::encrypt`].
    pub fn max_message_len(&self) -> usize {
        self.ctx
            .scheme()
            .max_message_len(self.ctx.key_size())
            .unwrap_or(0)
    }

    /// Encrypts `data` using [`OsRng`]. Empty input gives empty output.
    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_with_rng(&mut OsRng, data)
    }

    /// Encrypts `data` drawing padding randomness from `rng`.
    pub fn encrypt_with_rng<R: CryptoRngCore>(&self, rng: &mut R, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        let max = self.max_message_len();
        if data.len() > max {
            return Err(Error::DataTooLarge {
                len: data.len(),
                max,
            });
        }
        self.ctx.encrypt_block(rng, data)
    }
}

/// Decrypts one block with the key half selected by the [`KeyPair`].
#[derive(Clone, Debug)]
pub struct Decrypter {
    ctx: EncryptionContext,
}

impl Decrypter {
    /// Resolves the padding and parses the key.
    pub fn new(pair: &KeyPair) -> Result<Self> {
        Ok(Self {
            ctx: EncryptionContext::new(pair, Operation::Decrypt)?,
        })
    }

    /// Modulus size in bytes; also the expected ciphertext length.
    pub fn key_size(&self) -> usize {
        self.ctx.key_size()
    }

    /// Resolved scheme.
    pub fn scheme(&self) -> EncryptionScheme {
        self.ctx.scheme()
    }

    /// Decrypts `data` using [`OsRng`] for blinding. Empty input gives empty
    /// output.
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.decrypt_with_rng(&mut OsRng, data)
    }

    /// Decrypts `data` drawing blinding factors from `rng`.
    pub fn decrypt_with_rng<R: CryptoRngCore>(&self, rng: &mut R, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        self.ctx.decrypt_block(rng, data)
    }
}
