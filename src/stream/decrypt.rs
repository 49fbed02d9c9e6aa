use core::fmt;
use std::io::{self, Read};

use rand_core::{CryptoRngCore, OsRng};
use zeroize::Zeroizing;

use super::Poison;
use crate::context::EncryptionContext;
use crate::errors::{Error, Result};
use crate::key::KeyPair;
use crate::resolve::Operation;

/// Decrypts a stream of key-size ciphertext blocks read from a source.
///
/// Each block is decrypted as soon as it is read and served across as many
/// [`read`](Read::read) calls as the caller needs. A clean end of the source
/// on a block boundary ends the stream; a truncated block fails with
/// [`io::ErrorKind::UnexpectedEof`].
///
/// Errors carry an [`Error`] payload: [`Error::Decrypt`] (kind
/// [`io::ErrorKind::InvalidData`]) when a block does not decrypt, and
/// [`Error::Read`] (the source's own kind) when the source fails.
///
/// A block that does not decrypt and a truncated block are terminal: every
/// later read fails with [`Error::Aborted`]. A source error is not; the
/// bytes of the current block read so far are kept and the next read
/// resumes it.
pub struct StreamDecrypter<R: Read, G: CryptoRngCore = OsRng> {
    inner: R,
    ctx: EncryptionContext,
    rng: G,
    block: Vec<u8>,
    filled: usize,
    plaintext: Zeroizing<Vec<u8>>,
    pos: usize,
    poison: Poison,
}

impl<R: Read> StreamDecrypter<R> {
    /// Wraps `inner`, using [`OsRng`] for blinding.
    pub fn new(inner: R, pair: &KeyPair) -> Result<Self> {
        Self::with_rng(inner, pair, OsRng)
    }
}

impl<R: Read, G: CryptoRngCore> StreamDecrypter<R, G> {
    /// Wraps `inner`, drawing blinding factors from `rng`.
    pub fn with_rng(inner: R, pair: &KeyPair, rng: G) -> Result<Self> {
        let ctx = EncryptionContext::new(pair, Operation::Decrypt)?;
        Ok(Self {
            inner,
            block: vec![0u8; ctx.key_size()],
            filled: 0,
            ctx,
            rng,
            plaintext: Zeroizing::new(Vec::new()),
            pos: 0,
            poison: Poison::default(),
        })
    }

    /// Modulus size in bytes; also the length of every ciphertext block.
    pub fn key_size(&self) -> usize {
        self.ctx.key_size()
    }

    /// Gets a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Gets a mutable reference to the underlying source.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwraps the source. Decrypted bytes not yet read are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Reads one whole block into `self.block`, picking up where an earlier
    /// failed read left off.
    ///
    /// Returns `false` when the source ends before the first byte.
    fn read_block(&mut self) -> Result<bool> {
        while self.filled < self.block.len() {
            match self.inner.read(&mut self.block[self.filled..]) {
                Ok(0) => break,
                Ok(n) => self.filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(Error::Read(err)),
            }
        }

        let filled = core::mem::take(&mut self.filled);
        if filled == 0 {
            Ok(false)
        } else if filled < self.block.len() {
            Err(self.poison.record(Error::Read(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "truncated ciphertext block: {} of {} bytes",
                    filled,
                    self.block.len()
                ),
            ))))
        } else {
            Ok(true)
        }
    }

    /// Decrypts blocks until there is plaintext to serve or the source ends.
    fn fill(&mut self) -> Result<bool> {
        self.poison.check(Operation::Decrypt)?;
        while self.pos >= self.plaintext.len() {
            if !self.read_block()? {
                return Ok(false);
            }
            let plaintext = self
                .ctx
                .decrypt_block(&mut self.rng, &self.block)
                .map_err(|err| self.poison.record(err))?;
            self.plaintext = Zeroizing::new(plaintext);
            self.pos = 0;
            log::trace!(
                "decrypted {} byte block into {} bytes",
                self.block.len(),
                self.plaintext.len()
            );
        }
        Ok(true)
    }
}

impl<R: Read, G: CryptoRngCore> Read for StreamDecrypter<R, G> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || !self.fill()? {
            return Ok(0);
        }

        let available = &self.plaintext[self.pos..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.pos += n;
        Ok(n)
    }
}

impl<R: Read + fmt::Debug, G: CryptoRngCore> fmt::Debug for StreamDecrypter<R, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamDecrypter")
            .field("inner", &self.inner)
            .field("scheme", &self.ctx.scheme())
            .field("buffered", &(self.plaintext.len() - self.pos))
            .field("aborted", &self.poison.is_poisoned())
            .finish_non_exhaustive()
    }
}
