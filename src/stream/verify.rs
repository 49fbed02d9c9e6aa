use core::fmt;
use std::io::{self, Read, Write};

use digest::DynDigest;
use rand_core::{CryptoRngCore, OsRng};

use super::Poison;
use crate::context::SignatureContext;
use crate::errors::{Error, Result};
use crate::key::KeyPair;
use crate::resolve::Operation;

/// Hashes the candidate message written to it and checks it against a
/// signature read from a separate source on [`close`](Self::close).
///
/// An empty signature source leaves nothing to verify: the stream closes
/// cleanly and [`is_verified`](Self::is_verified) stays `false`. A signature
/// that does not match fails with [`Error::Verify`].
pub struct StreamVerifier<R: Read, G: CryptoRngCore = OsRng> {
    signature: R,
    ctx: SignatureContext,
    rng: G,
    digest: Box<dyn DynDigest + Send + Sync>,
    verified: bool,
    closed: bool,
    poison: Poison,
}

impl<R: Read> StreamVerifier<R> {
    /// Reads the signature from `signature` on close, using [`OsRng`] for
    /// blinding when the private key verifies.
    pub fn new(signature: R, pair: &KeyPair) -> Result<Self> {
        Self::with_rng(signature, pair, OsRng)
    }
}

impl<R: Read, G: CryptoRngCore> StreamVerifier<R, G> {
    /// Reads the signature from `signature` on close, drawing blinding
    /// factors from `rng`.
    pub fn with_rng(signature: R, pair: &KeyPair, rng: G) -> Result<Self> {
        let ctx = SignatureContext::new(pair, Operation::Verify)?;
        Ok(Self {
            signature,
            digest: ctx.new_digest(),
            ctx,
            rng,
            verified: false,
            closed: false,
            poison: Poison::default(),
        })
    }

    /// Modulus size in bytes; also the expected signature length.
    pub fn key_size(&self) -> usize {
        self.ctx.key_size()
    }

    /// Whether a signature was read and matched. Only meaningful after
    /// [`close`](Self::close).
    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Reads the whole signature source and verifies it against the
    /// accumulated digest.
    ///
    /// Closing twice is a no-op. A close that fails is not retried; it and
    /// every later call return the failure.
    pub fn close(&mut self) -> Result<()> {
        self.poison.check(Operation::Verify)?;
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        self.conclude().map_err(|err| self.poison.record(err))
    }

    fn conclude(&mut self) -> Result<()> {
        let mut signature = Vec::with_capacity(self.ctx.key_size());
        self.signature
            .read_to_end(&mut signature)
            .map_err(Error::Read)?;
        if signature.is_empty() {
            log::trace!("no signature to verify");
            return Ok(());
        }

        let hashed = self.digest.finalize_reset();
        self.ctx.verify_digest(&mut self.rng, &hashed, &signature)?;
        self.verified = true;
        log::trace!("verified {} byte signature", signature.len());
        Ok(())
    }

    /// Closes the stream and returns whether the signature was verified.
    pub fn finish(mut self) -> Result<bool> {
        self.close()?;
        Ok(self.verified)
    }
}

impl<R: Read, G: CryptoRngCore> Write for StreamVerifier<R, G> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.poison.check(Operation::Verify)?;
        if self.closed {
            return Err(Error::Closed {
                operation: Operation::Verify,
            }
            .into());
        }
        self.digest.update(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<R: Read + fmt::Debug, G: CryptoRngCore> fmt::Debug for StreamVerifier<R, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamVerifier")
            .field("signature", &self.signature)
            .field("scheme", &self.ctx.scheme())
            .field("verified", &self.verified)
            .field("closed", &self.closed)
            .field("aborted", &self.poison.is_poisoned())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_keys::*;
    use crate::{KeyType, Signer};

    fn sign(pair: &KeyPair, message: &[u8]) -> Vec<u8> {
        Signer::new(&pair.clone().with_type(KeyType::Private))
            .unwrap()
            .sign(message)
            .unwrap()
    }

    #[test]
    fn test_verify_in_pieces() {
        let pair = pkcs8_pair_1024();
        let signature = sign(&pair, b"one two three");

        let mut verifier = StreamVerifier::new(signature.as_slice(), &pair).unwrap();
        for piece in [&b"one "[..], &b"two"[..], &b" three"[..]] {
            verifier.write_all(piece).unwrap();
        }
        assert!(!verifier.is_verified());
        verifier.close().unwrap();
        assert!(verifier.is_verified());
        verifier.close().unwrap();
        assert!(verifier.is_verified());
    }

    #[test]
    fn test_empty_signature_source() {
        let mut verifier = StreamVerifier::new(io::empty(), &pkcs1_pair_1024()).unwrap();
        verifier.write_all(b"anything").unwrap();
        verifier.close().unwrap();
        assert!(!verifier.is_verified());
    }

    #[test]
    fn test_mismatch() {
        let pair = pkcs1_pair_1024();
        let signature = sign(&pair, b"original");
        let mut verifier = StreamVerifier::new(signature.as_slice(), &pair).unwrap();
        verifier.write_all(b"tampered").unwrap();
        assert!(matches!(verifier.close(), Err(Error::Verify(_))));
        assert!(!verifier.is_verified());
        // a failed close is final
        assert!(matches!(
            verifier.close(),
            Err(Error::Aborted {
                operation: Operation::Verify,
                kind: io::ErrorKind::InvalidData
            })
        ));
        assert!(verifier.write(b"more").is_err());
        assert!(!verifier.is_verified());
    }

    #[test]
    fn test_private_key_verifies() {
        let pair = pkcs1_pair_1024();
        let signature = Signer::new(&pair).unwrap().sign(b"reverse").unwrap();
        let private = pair.with_type(KeyType::Private);
        let mut verifier = StreamVerifier::new(signature.as_slice(), &private).unwrap();
        verifier.write_all(b"reverse").unwrap();
        assert!(verifier.finish().unwrap());
    }

    #[test]
    fn test_signature_source_failure() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::ErrorKind::TimedOut.into())
            }
        }

        let mut verifier = StreamVerifier::new(Broken, &pkcs1_pair_1024()).unwrap();
        verifier.write_all(b"message").unwrap();
        match verifier.close() {
            Err(Error::Read(err)) => assert_eq!(err.kind(), io::ErrorKind::TimedOut),
            other => panic!("unexpected {:?}", other),
        }
    }
}
