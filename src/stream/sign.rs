use core::fmt;
use std::io::{self, Write};

use digest::DynDigest;
use rand_core::{CryptoRngCore, OsRng};

use super::Poison;
use crate::context::SignatureContext;
use crate::errors::{Error, Result};
use crate::key::KeyPair;
use crate::resolve::Operation;

/// Hashes everything written to it and writes the signature to a sink on
/// [`close`](Self::close).
///
/// Nothing reaches the sink before the stream is closed. Closing a stream
/// nothing was written to signs the digest of the empty message, where
/// [`Signer::sign`](crate::Signer::sign) would return an empty signature.
/// [`StreamVerifier`](crate::StreamVerifier) and the
/// [`signature::Verifier`](::signature::Verifier) impl on
/// [`Verifier`](crate::Verifier) accept it; [`Verifier::verify`](crate::Verifier::verify)
/// reports `Ok(false)` for the empty message.
pub struct StreamSigner<W: Write, G: CryptoRngCore = OsRng> {
    inner: W,
    ctx: SignatureContext,
    rng: G,
    digest: Box<dyn DynDigest + Send + Sync>,
    closed: bool,
    poison: Poison,
}

impl<W: Write> StreamSigner<W> {
    /// Wraps `inner`, using [`OsRng`] for salts and blinding.
    pub fn new(inner: W, pair: &KeyPair) -> Result<Self> {
        Self::with_rng(inner, pair, OsRng)
    }
}

impl<W: Write, G: CryptoRngCore> StreamSigner<W, G> {
    /// Wraps `inner`, drawing salts and blinding factors from `rng`.
    pub fn with_rng(inner: W, pair: &KeyPair, rng: G) -> Result<Self> {
        let ctx = SignatureContext::new(pair, Operation::Sign)?;
        Ok(Self {
            inner,
            digest: ctx.new_digest(),
            ctx,
            rng,
            closed: false,
            poison: Poison::default(),
        })
    }

    /// Modulus size in bytes; also the signature length.
    pub fn key_size(&self) -> usize {
        self.ctx.key_size()
    }

    /// Gets a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Gets a mutable reference to the underlying sink.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Signs the accumulated digest, writes the signature and flushes the
    /// sink.
    ///
    /// Closing twice is a no-op. A close that fails is not retried; it and
    /// every later call return the failure.
    pub fn close(&mut self) -> Result<()> {
        self.poison.check(Operation::Sign)?;
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        self.conclude().map_err(|err| self.poison.record(err))
    }

    fn conclude(&mut self) -> Result<()> {
        let hashed = self.digest.finalize_reset();
        let signature = self.ctx.sign_digest(&mut self.rng, &hashed)?;
        self.inner.write_all(&signature).map_err(Error::Write)?;
        log::trace!("wrote {} byte signature", signature.len());
        self.inner.flush().map_err(Error::Write)
    }

    /// Closes the stream and returns the sink.
    pub fn finish(mut self) -> Result<W> {
        self.close()?;
        Ok(self.inner)
    }
}

impl<W: Write, G: CryptoRngCore> Write for StreamSigner<W, G> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.poison.check(Operation::Sign)?;
        if self.closed {
            return Err(Error::Closed {
                operation: Operation::Sign,
            }
            .into());
        }
        self.digest.update(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write + fmt::Debug, G: CryptoRngCore> fmt::Debug for StreamSigner<W, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSigner")
            .field("inner", &self.inner)
            .field("scheme", &self.ctx.scheme())
            .field("closed", &self.closed)
            .field("aborted", &self.poison.is_poisoned())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_keys::*;
    use crate::{HashAlgorithm, KeyType, Padding, Verifier};
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    #[test]
    fn test_signature_written_on_close() {
        let pair = pkcs1_pair_1024().with_type(KeyType::Private);
        let mut signer = StreamSigner::new(Vec::new(), &pair).unwrap();
        for word in ["stream", "ing ", "sign", "er"] {
            signer.write_all(word.as_bytes()).unwrap();
            assert!(signer.get_ref().is_empty());
        }
        signer.close().unwrap();
        assert_eq!(signer.get_ref().len(), 128);

        let verifier = Verifier::new(&pair.with_type(KeyType::Public)).unwrap();
        assert!(verifier.verify(b"streaming signer", signer.get_ref()).unwrap());
    }

    #[test]
    fn test_public_key_signs() {
        let rng = ChaCha8Rng::from_seed([11; 32]);
        let pair = pkcs8_pair_1024().with_hash(HashAlgorithm::Sha3_256);
        let mut signer = StreamSigner::with_rng(Vec::new(), &pair, rng).unwrap();
        assert_eq!(signer.ctx.scheme().padding(), Padding::Pss);
        signer.write_all(b"reverse").unwrap();
        let signature = signer.finish().unwrap();

        let verifier = Verifier::new(&pair.with_type(KeyType::Private)).unwrap();
        assert!(verifier.verify(b"reverse", &signature).unwrap());
    }

    #[test]
    fn test_failed_close_aborts() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::ErrorKind::BrokenPipe.into())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let pair = pkcs1_pair_1024().with_type(KeyType::Private);
        let mut signer = StreamSigner::new(Broken, &pair).unwrap();
        signer.write_all(b"message").unwrap();
        assert!(matches!(signer.close(), Err(Error::Write(_))));
        assert!(matches!(
            signer.close(),
            Err(Error::Aborted {
                operation: Operation::Sign,
                kind: io::ErrorKind::BrokenPipe
            })
        ));
        assert!(signer.write(b"more").is_err());
        assert!(signer.finish().is_err());
    }

    #[test]
    fn test_empty_message_is_signed() {
        let pair = pkcs1_pair_1024().with_type(KeyType::Private);
        let signature = StreamSigner::new(Vec::new(), &pair)
            .unwrap()
            .finish()
            .unwrap();
        assert_eq!(signature.len(), 128);

        // PKCS#1 v1.5 is deterministic, so the digest of nothing signs the same
        let ctx = SignatureContext::new(&pair, Operation::Sign).unwrap();
        let expected = ctx.sign_digest(&mut OsRng, &ctx.digest(b"")).unwrap();
        assert_eq!(signature, expected);

        let verifier = Verifier::new(&pair.with_type(KeyType::Public)).unwrap();
        assert!(::signature::Verifier::verify(&verifier, b"", &signature).is_ok());
        // single-shot verification has nothing to check for an empty message
        assert!(!verifier.verify(b"", &signature).unwrap());
    }
}
