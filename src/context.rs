//! Parsed key plus resolved scheme, shared by the single-shot and streaming
//! transforms.

use digest::DynDigest;
use rand_core::CryptoRngCore;
use rsa::Pkcs1v15Encrypt;

use crate::algorithms;
use crate::errors::{Error, Result};
use crate::key::{Key, KeyPair};
use crate::padding::{EncryptionScheme, SignatureScheme};
use crate::resolve::{encryption_scheme, signature_scheme, Operation};

#[derive(Clone, Debug)]
pub(crate) struct EncryptionContext {
    key: Key,
    scheme: EncryptionScheme,
}

impl EncryptionContext {
    /// Resolves the scheme, then parses the key half selected by the pair.
    pub(crate) fn new(pair: &KeyPair, operation: Operation) -> Result<Self> {
        let scheme = encryption_scheme(pair, operation)?;
        let key = pair.load_key()?;
        log::debug!(
            "{} with {} key: {:?}, {} byte modulus",
            operation,
            key.key_type(),
            scheme,
            key.size()
        );
        Ok(Self { key, scheme })
    }

    pub(crate) fn key_size(&self) -> usize {
        self.key.size()
    }

    pub(crate) fn scheme(&self) -> EncryptionScheme {
        self.scheme
    }

    /// Encrypts one block; `msg` must fit the scheme capacity.
    pub(crate) fn encrypt_block<R: CryptoRngCore>(&self, rng: &mut R, msg: &[u8]) -> Result<Vec<u8>> {
        match (&self.key, self.scheme) {
            (Key::Public(key), EncryptionScheme::Pkcs1v15) => key.encrypt(rng, Pkcs1v15Encrypt, msg),
            (Key::Public(key), EncryptionScheme::Oaep(hash)) => key.encrypt(rng, hash.oaep(), msg),
            (Key::Private(key), scheme) => algorithms::private_encrypt(rng, key, scheme, msg),
        }
        .map_err(Error::Encrypt)
    }

    /// Decrypts one key-size block.
    pub(crate) fn decrypt_block<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        match (&self.key, self.scheme) {
            (Key::Private(key), EncryptionScheme::Pkcs1v15) => {
                key.decrypt_blinded(rng, Pkcs1v15Encrypt, ciphertext)
            }
            (Key::Private(key), EncryptionScheme::Oaep(hash)) => {
                key.decrypt_blinded(rng, hash.oaep(), ciphertext)
            }
            (Key::Public(key), scheme) => algorithms::public_decrypt(key, scheme, ciphertext),
        }
        .map_err(Error::Decrypt)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct SignatureContext {
    key: Key,
    scheme: SignatureScheme,
}

impl SignatureContext {
    pub(crate) fn new(pair: &KeyPair, operation: Operation) -> Result<Self> {
        let scheme = signature_scheme(pair, operation)?;
        let key = pair.load_key()?;
        log::debug!(
            "{} with {} key: {:?}, {} byte modulus",
            operation,
            key.key_type(),
            scheme,
            key.size()
        );
        Ok(Self { key, scheme })
    }

    pub(crate) fn key_size(&self) -> usize {
        self.key.size()
    }

    pub(crate) fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Fresh hasher for the message digest.
    pub(crate) fn new_digest(&self) -> Box<dyn DynDigest + Send + Sync> {
        self.scheme.hash().new_digest()
    }

    pub(crate) fn digest(&self, msg: &[u8]) -> Vec<u8> {
        self.scheme.hash().digest(msg)
    }

    /// Signs an already computed digest.
    pub(crate) fn sign_digest<R: CryptoRngCore>(&self, rng: &mut R, hashed: &[u8]) -> Result<Vec<u8>> {
        match (&self.key, self.scheme) {
            (Key::Private(key), SignatureScheme::Pkcs1v15(hash)) => {
                key.sign_with_rng(rng, hash.pkcs1v15_sign(), hashed)
            }
            (Key::Private(key), SignatureScheme::Pss(hash)) => {
                key.sign_with_rng(rng, hash.pss(), hashed)
            }
            (Key::Public(key), scheme) => algorithms::public_sign(rng, key, scheme, hashed),
        }
        .map_err(Error::Sign)
    }

    /// Checks `signature` against an already computed digest.
    pub(crate) fn verify_digest<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        hashed: &[u8],
        signature: &[u8],
    ) -> Result<()> {
        match (&self.key, self.scheme) {
            (Key::Public(key), SignatureScheme::Pkcs1v15(hash)) => {
                key.verify(hash.pkcs1v15_sign(), hashed, signature)
            }
            (Key::Public(key), SignatureScheme::Pss(hash)) => key.verify(hash.pss(), hashed, signature),
            (Key::Private(key), scheme) => {
                algorithms::private_verify(rng, key, scheme, hashed, signature)
            }
        }
        .map_err(Error::Verify)
    }
}
