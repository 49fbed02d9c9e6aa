//! Error types.

use std::io;

use crate::key::KeyType;
use crate::padding::Padding;
use crate::resolve::Operation;

/// Alias for [`core::result::Result`] with the `rsa-transform` [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Boxed decoder error raised while parsing key material.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No key bytes were supplied for the key half the operation needs.
    #[error("{0} is empty")]
    EmptyKey(KeyType),

    /// The key bytes could not be decoded.
    #[error("invalid {key_type}")]
    InvalidKey {
        /// Key half that failed to decode.
        key_type: KeyType,
        /// Decoder error.
        #[source]
        source: BoxError,
    },

    /// No padding scheme was configured and none could be derived.
    #[error("padding scheme is not set")]
    EmptyPadding,

    /// Padding scheme is not valid for the requested operation.
    #[error("unsupported padding scheme {padding} for {operation}")]
    UnsupportedPaddingScheme {
        /// Offending padding.
        padding: Padding,
        /// Requested operation.
        operation: Operation,
    },

    /// Key is too small to hold a single block under the chosen padding.
    #[error("{key_size} byte key cannot hold a {padding} block with {overhead} bytes of overhead")]
    KeyTooSmall {
        /// Key size in bytes.
        key_size: usize,
        /// Padding scheme.
        padding: Padding,
        /// Bytes taken by the padding.
        overhead: usize,
    },

    /// Plaintext is larger than one block can carry.
    #[error("data too large: {len} bytes, at most {max} bytes fit in one block")]
    DataTooLarge {
        /// Input length.
        len: usize,
        /// Maximum input length.
        max: usize,
    },

    /// Encryption failed.
    #[error("encrypt error")]
    Encrypt(#[source] rsa::Error),

    /// Decryption failed.
    #[error("decrypt error")]
    Decrypt(#[source] rsa::Error),

    /// Signing failed.
    #[error("sign error")]
    Sign(#[source] rsa::Error),

    /// Signature did not verify.
    #[error("verify error")]
    Verify(#[source] rsa::Error),

    /// Reading from the underlying source failed.
    #[error("read error")]
    Read(#[source] io::Error),

    /// Writing to the underlying sink failed.
    #[error("write error")]
    Write(#[source] io::Error),

    /// The stream was already closed.
    #[error("{operation} stream is closed")]
    Closed {
        /// Operation of the closed stream.
        operation: Operation,
    },

    /// An earlier call on the stream failed and the stream cannot continue.
    #[error("{operation} stream aborted by an earlier {kind:?} error")]
    Aborted {
        /// Operation of the aborted stream.
        operation: Operation,
        /// Kind of the error that aborted it.
        kind: io::ErrorKind,
    },
}

impl Error {
    pub(crate) fn io_kind(&self) -> io::ErrorKind {
        match self {
            Error::Read(err) | Error::Write(err) => err.kind(),
            Error::Aborted { kind, .. } => *kind,
            Error::Decrypt(_) | Error::Verify(_) => io::ErrorKind::InvalidData,
            Error::DataTooLarge { .. } => io::ErrorKind::InvalidInput,
            _ => io::ErrorKind::Other,
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        io::Error::new(err.io_kind(), err)
    }
}

impl From<Error> for ::signature::Error {
    fn from(err: Error) -> Self {
        Self::from_source(err)
    }
}
