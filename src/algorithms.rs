//! Useful algorithms.
//!
//! The `rsa` crate covers the conventional directions: public-key encryption,
//! private-key decryption, private-key signing and public-key verification.
//! The functions here cover the opposite key half for each operation, built
//! from the same padding encodings on top of the raw RSA primitives.

mod mgf;
mod oaep;
mod pad;
mod pkcs1v15;
mod pss;
mod raw;

use rand_core::CryptoRngCore;
use rsa::errors::{Error, Result};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};

use self::oaep::{oaep_decode, oaep_encode};
use self::pkcs1v15::{pkcs1v15_sign_unpad, pkcs1v15_type1_pad, pkcs1v15_type1_unpad};
use self::pss::{emsa_pss_encode, emsa_pss_verify};
use crate::padding::{EncryptionScheme, SignatureScheme};

/// Encrypts one block with the private key.
///
/// PKCS#1 v1.5 uses block type 1, so the result can be opened by anyone
/// holding the public key.
pub(crate) fn private_encrypt<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    key: &RsaPrivateKey,
    scheme: EncryptionScheme,
    msg: &[u8],
) -> Result<Vec<u8>> {
    let k = key.size();
    let em = match scheme {
        EncryptionScheme::Pkcs1v15 => pkcs1v15_type1_pad(&[], msg, k)?,
        EncryptionScheme::Oaep(hash) => oaep_encode(rng, msg, &mut *hash.new_digest(), k)?,
    };

    let mut ciphertext = raw::private_op(rng, key, &em, Error::Internal)?;
    Ok(core::mem::take(&mut *ciphertext))
}

/// Decrypts one block produced by [`private_encrypt`] with the public key.
pub(crate) fn public_decrypt(
    key: &RsaPublicKey,
    scheme: EncryptionScheme,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    let k = key.size();
    let mut em = raw::public_op(key, ciphertext, Error::Decryption)?;
    match scheme {
        EncryptionScheme::Pkcs1v15 => pkcs1v15_type1_unpad(&em, k),
        EncryptionScheme::Oaep(hash) => oaep_decode(&mut em, &mut *hash.new_digest(), k),
    }
}

/// Signs `hashed` with the public key.
pub(crate) fn public_sign<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    key: &RsaPublicKey,
    scheme: SignatureScheme,
    hashed: &[u8],
) -> Result<Vec<u8>> {
    let k = key.size();
    let hash = scheme.hash();
    if hashed.len() != hash.output_size() {
        return Err(Error::InputNotHashed);
    }

    let em = match scheme {
        SignatureScheme::Pkcs1v15(_) => {
            let prefix = hash.pkcs1v15_sign().prefix;
            pkcs1v15_type1_pad(&prefix, hashed, k)?.to_vec()
        }
        SignatureScheme::Pss(_) => {
            let mut salt = vec![0u8; hash.output_size()];
            rng.fill_bytes(&mut salt);
            let em = emsa_pss_encode(hashed, key.n().bits() - 1, &salt, &mut *hash.new_digest())?;
            let mut block = vec![0u8; k - em.len()];
            block.extend_from_slice(&em);
            block
        }
    };

    raw::public_op(key, &em, Error::Internal)
}

/// Verifies a signature produced by [`public_sign`] with the private key.
pub(crate) fn private_verify<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    key: &RsaPrivateKey,
    scheme: SignatureScheme,
    hashed: &[u8],
    sig: &[u8],
) -> Result<()> {
    let k = key.size();
    let hash = scheme.hash();
    let mut em = raw::private_op(rng, key, sig, Error::Verification)?;
    match scheme {
        SignatureScheme::Pkcs1v15(_) => {
            pkcs1v15_sign_unpad(&hash.pkcs1v15_sign().prefix, hashed, &em, k)
        }
        SignatureScheme::Pss(_) => {
            emsa_pss_verify(hashed, &mut em, &mut *hash.new_digest(), key.n().bits())
        }
    }
}
