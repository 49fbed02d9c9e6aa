//! Single-shot signing and verification.

use rand_core::{CryptoRngCore, OsRng};

use crate::context::SignatureContext;
use crate::errors::Result;
use crate::key::KeyPair;
use crate::padding::SignatureScheme;
use crate::resolve::Operation;

/// Signs whole messages.
///
/// The message is hashed with the pair's [`HashAlgorithm`](crate::HashAlgorithm)
/// and the digest is signed under PKCS#1 v1.5 or PSS.
///
/// [`Signer::sign`] maps an empty message to an empty signature.
/// [`StreamSigner`](crate::StreamSigner) and the
/// [`RandomizedSigner`](::signature::RandomizedSigner) impl sign the digest
/// of the empty message instead; check those signatures with
/// [`StreamVerifier`](crate::StreamVerifier) or the
/// [`signature::Verifier`](::signature::Verifier) impl on [`Verifier`].
#[derive(Clone, Debug)]
pub struct Signer {
    ctx: SignatureContext,
}

impl Signer {
    /// Resolves the padding and parses the key.
    pub fn new(pair: &KeyPair) -> Result<Self> {
        Ok(Self {
            ctx: SignatureContext::new(pair, Operation::Sign)?,
        })
    }

    /// Modulus size in bytes; also the signature length.
    pub fn key_size(&self) -> usize {
        self.ctx.key_size()
    }

    /// Resolved scheme.
    pub fn scheme(&self) -> SignatureScheme {
        self.ctx.scheme()
    }

    /// Signs `message` using [`OsRng`]. An empty message gives an empty
    /// signature.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        self.sign_with_rng(&mut OsRng, message)
    }

    /// Signs `message` drawing salt and blinding factors from `rng`.
    pub fn sign_with_rng<R: CryptoRngCore>(&self, rng: &mut R, message: &[u8]) -> Result<Vec<u8>> {
        if message.is_empty() {
            return Ok(Vec::new());
        }
        self.ctx.sign_digest(rng, &self.ctx.digest(message))
    }
}

/// Verifies signatures over whole messages.
///
/// [`Verifier::verify`] has nothing to check for an empty message and
/// returns `Ok(false)`. The [`signature::Verifier`](::signature::Verifier)
/// impl always checks, so it accepts a signature over the empty message
/// made by [`StreamSigner`](crate::StreamSigner).
#[derive(Clone, Debug)]
pub struct Verifier {
    ctx: SignatureContext,
}

impl Verifier {
    /// Resolves the padding and parses the key.
    pub fn new(pair: &KeyPair) -> Result<Self> {
        Ok(Self {
            ctx: SignatureContext::new(pair, Operation::Verify)?,
        })
    }

    /// Modulus size in bytes; also the expected signature length.
    pub fn key_size(&self) -> usize {
        self.ctx.key_size()
    }

    /// Resolved scheme.
    pub fn scheme(&self) -> SignatureScheme {
        self.ctx.scheme()
    }

    /// Verifies `signature` over `message`.
    ///
    /// Returns `Ok(true)` when the signature matches and
    /// [`Error::Verify`](crate::Error::Verify) when it does not. An empty
    /// message or an empty signature leaves nothing to verify and returns
    /// `Ok(false)`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool> {
        self.verify_with_rng(&mut OsRng, message, signature)
    }

    /// Like [`Verifier::verify`], drawing blinding factors from `rng` when the
    /// private key does the checking.
    pub fn verify_with_rng<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool> {
        if message.is_empty() || signature.is_empty() {
            return Ok(false);
        }
        self.ctx
            .verify_digest(rng, &self.ctx.digest(message), signature)
            .map(|()| true)
    }
}

impl ::signature::RandomizedSigner<Vec<u8>> for Signer {
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> ::signature::Result<Vec<u8>> {
        Ok(self.ctx.sign_digest(rng, &self.ctx.digest(msg))?)
    }
}

impl ::signature::Verifier<Vec<u8>> for Verifier {
    fn verify(&self, msg: &[u8], signature: &Vec<u8>) -> ::signature::Result<()> {
        Ok(self
            .ctx
            .verify_digest(&mut OsRng, &self.ctx.digest(msg), signature)?)
    }
}
