use core::fmt;
use std::io::{self, Write};

use rand_core::{CryptoRngCore, OsRng};
use zeroize::{Zeroize, Zeroizing};

use super::Poison;
use crate::context::EncryptionContext;
use crate::errors::{Error, Result};
use crate::key::KeyPair;
use crate::resolve::Operation;

/// Encrypts everything written to it into a sink, one RSA block per
/// [`chunk_size`](Self::chunk_size) bytes of plaintext.
///
/// Full chunks are encrypted and written as soon as they are complete; the
/// remainder stays buffered until [`close`](Self::close).
///
/// A failed write or close aborts the stream: the buffered plaintext is
/// wiped and every later call fails with [`Error::Aborted`]. Blocks already
/// written stay in the sink.
pub struct StreamEncrypter<W: Write, G: CryptoRngCore = OsRng> {
    inner: W,
    ctx: EncryptionContext,
    rng: G,
    chunk_size: usize,
    buf: Zeroizing<Vec<u8>>,
    closed: bool,
    poison: Poison,
}

impl<W: Write> StreamEncrypter<W> {
    /// Wraps `inner`, drawing padding randomness from [`OsRng`].
    pub fn new(inner: W, pair: &KeyPair) -> Result<Self> {
        Self::with_rng(inner, pair, OsRng)
    }
}

impl<W: Write, G: CryptoRngCore> StreamEncrypter<W, G> {
    /// Wraps `inner`, drawing padding randomness from `rng`.
    ///
    /// Fails with [`Error::KeyTooSmall`] when the padding overhead leaves no
    /// room for plaintext in a block.
    pub fn with_rng(inner: W, pair: &KeyPair, rng: G) -> Result<Self> {
        let ctx = EncryptionContext::new(pair, Operation::Encrypt)?;
        let scheme = ctx.scheme();
        let chunk_size = scheme
            .max_message_len(ctx.key_size())
            .ok_or(Error::KeyTooSmall {
                key_size: ctx.key_size(),
                padding: scheme.padding(),
                overhead: scheme.overhead(),
            })?;
        log::debug!("streaming {} byte chunks", chunk_size);

        Ok(Self {
            inner,
            ctx,
            rng,
            chunk_size,
            buf: Zeroizing::new(Vec::with_capacity(chunk_size)),
            closed: false,
            poison: Poison::default(),
        })
    }

    /// Plaintext bytes per block.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Modulus size in bytes; also the length of every emitted block.
    pub fn key_size(&self) -> usize {
        self.ctx.key_size()
    }

    /// Gets a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Gets a mutable reference to the underlying sink.
    ///
    /// Writing to it directly interleaves foreign bytes with the blocks.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Encrypts the buffered remainder as a final block and flushes the sink.
    ///
    /// Closing twice is a no-op. A close that fails is not retried; it and
    /// every later close return the failure.
    pub fn close(&mut self) -> Result<()> {
        self.poison.check(Operation::Encrypt)?;
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        self.seal_tail().map_err(|err| self.abort(err))
    }

    /// Closes the stream and returns the sink.
    pub fn finish(mut self) -> Result<W> {
        self.close()?;
        Ok(self.inner)
    }

    fn seal_tail(&mut self) -> Result<()> {
        if !self.buf.is_empty() {
            seal(&self.ctx, &mut self.rng, &mut self.inner, &self.buf)?;
            self.buf.zeroize();
        }
        self.inner.flush().map_err(Error::Write)
    }

    /// Buffers `data`, sealing every chunk it completes.
    fn absorb(&mut self, data: &[u8]) -> Result<()> {
        let mut rest = data;

        // top up a partial chunk first
        if !self.buf.is_empty() {
            let take = (self.chunk_size - self.buf.len()).min(rest.len());
            self.buf.extend_from_slice(&rest[..take]);
            rest = &rest[take..];
            if self.buf.len() < self.chunk_size {
                return Ok(());
            }
            seal(&self.ctx, &mut self.rng, &mut self.inner, &self.buf)?;
            self.buf.zeroize();
        }

        while rest.len() >= self.chunk_size {
            let (chunk, tail) = rest.split_at(self.chunk_size);
            seal(&self.ctx, &mut self.rng, &mut self.inner, chunk)?;
            rest = tail;
        }

        self.buf.extend_from_slice(rest);
        Ok(())
    }

    fn abort(&mut self, err: Error) -> Error {
        self.buf.zeroize();
        self.poison.record(err)
    }
}

/// Encrypts one chunk and writes the block to `sink`.
fn seal<W: Write, G: CryptoRngCore>(
    ctx: &EncryptionContext,
    rng: &mut G,
    sink: &mut W,
    chunk: &[u8],
) -> Result<()> {
    let block = ctx.encrypt_block(rng, chunk)?;
    sink.write_all(&block).map_err(Error::Write)?;
    log::trace!("encrypted {} bytes into a {} byte block", chunk.len(), block.len());
    Ok(())
}

impl<W: Write, G: CryptoRngCore> Write for StreamEncrypter<W, G> {
    /// Accepts all of `data`; the count returned is plaintext consumed, not
    /// ciphertext produced.
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.poison.check(Operation::Encrypt)?;
        if self.closed {
            return Err(Error::Closed {
                operation: Operation::Encrypt,
            }
            .into());
        }

        self.absorb(data).map_err(|err| self.abort(err))?;
        Ok(data.len())
    }

    /// Flushes the sink. Buffered plaintext is not encrypted early, so the
    /// block layout does not depend on flush calls.
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write + fmt::Debug, G: CryptoRngCore> fmt::Debug for StreamEncrypter<W, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamEncrypter")
            .field("inner", &self.inner)
            .field("scheme", &self.ctx.scheme())
            .field("chunk_size", &self.chunk_size)
            .field("buffered", &self.buf.len())
            .field("closed", &self.closed)
            .field("aborted", &self.poison.is_poisoned())
            .finish_non_exhaustive()
    }
}
