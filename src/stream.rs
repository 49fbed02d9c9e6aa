//! Streaming transforms over [`std::io`] sinks and sources.
//!
//! The ciphertext wire format is a plain concatenation of independent RSA
//! blocks, each exactly as long as the modulus, with no framing.
//! [`StreamEncrypter`] cuts the plaintext into chunks of
//! [`chunk_size`](StreamEncrypter::chunk_size) bytes (the last one may be
//! shorter) and [`StreamDecrypter`] reads the blocks back one at a time.
//!
//! [`StreamSigner`] and [`StreamVerifier`] hash everything written to them
//! and only touch the key on [`close`](StreamSigner::close).
//!
//! Streams must be closed explicitly: dropping an unclosed
//! [`StreamEncrypter`] discards the buffered tail, and dropping an unclosed
//! [`StreamSigner`] never emits the signature.
//!
//! A failed call ends a stream for good. Every later call returns
//! [`Error::Aborted`](crate::Error::Aborted) carrying the kind of the first
//! failure, so a retry can neither skip nor duplicate data. The one
//! exception is a transport error from a [`StreamDecrypter`] source: the
//! bytes of the current block read so far are kept and the next
//! [`read`](std::io::Read::read) resumes the block.
//!
//! ```
//! use std::io::{Read, Write};
//! use rsa_transform::{HashAlgorithm, KeyFormat, KeyPair, KeyType, StreamDecrypter, StreamEncrypter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pair = KeyPair::new(KeyFormat::Pkcs1, HashAlgorithm::Sha256)
//!     .with_public_key(std::fs::read("tests/examples/pkcs1/rsa1024-pub.pem")?)
//!     .with_private_key(std::fs::read("tests/examples/pkcs1/rsa1024-priv.pem")?);
//!
//! let message = vec![0x2a; 300];
//! let mut encrypter = StreamEncrypter::new(Vec::new(), &pair)?;
//! encrypter.write_all(&message)?;
//! let ciphertext = encrypter.finish()?;
//! // 117 + 117 + 66 bytes of plaintext
//! assert_eq!(ciphertext.len(), 3 * 128);
//!
//! let pair = pair.with_type(KeyType::Private);
//! let mut decrypter = StreamDecrypter::new(ciphertext.as_slice(), &pair)?;
//! let mut plaintext = Vec::new();
//! decrypter.read_to_end(&mut plaintext)?;
//! assert_eq!(plaintext, message);
//! # Ok(())
//! # }
//! ```

mod decrypt;
mod encrypt;
mod sign;
mod verify;

pub use self::{
    decrypt::StreamDecrypter, encrypt::StreamEncrypter, sign::StreamSigner,
    verify::StreamVerifier,
};

use std::io;

use crate::errors::{Error, Result};
use crate::resolve::Operation;

/// First failure of a stream.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Poison(Option<io::ErrorKind>);

impl Poison {
    /// Fails with [`Error::Aborted`] once a failure was recorded.
    pub(crate) fn check(&self, operation: Operation) -> Result<()> {
        match self.0 {
            Some(kind) => Err(Error::Aborted { operation, kind }),
            None => Ok(()),
        }
    }

    /// Records `err` and hands it back.
    pub(crate) fn record(&mut self, err: Error) -> Error {
        self.0.get_or_insert(err.io_kind());
        err
    }

    pub(crate) fn is_poisoned(&self) -> bool {
        self.0.is_some()
    }
}
