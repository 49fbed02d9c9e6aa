//! Resolution of a [`KeyPair`] into the padding scheme an operation runs with.
//!
//! An unset padding is derived from the key format:
//!
//! | format | encrypt / decrypt | sign / verify |
//! |--------|-------------------|---------------|
//! | PKCS#1 | PKCS#1 v1.5       | PKCS#1 v1.5   |
//! | PKCS#8 | OAEP              | PSS           |
//!
//! An explicit padding always wins, but OAEP is rejected for signatures and
//! PSS is rejected for encryption.

use core::fmt;

use crate::errors::{Error, Result};
use crate::key::{KeyFormat, KeyPair};
use crate::padding::{EncryptionScheme, Padding, SignatureScheme};

/// Operation a transform performs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operation {
    /// Encryption.
    Encrypt,
    /// Decryption.
    Decrypt,
    /// Signing.
    Sign,
    /// Signature verification.
    Verify,
}

impl Operation {
    /// Returns `true` for [`Operation::Sign`] and [`Operation::Verify`].
    pub fn is_signature(self) -> bool {
        matches!(self, Operation::Sign | Operation::Verify)
    }

    /// Returns the lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Encrypt => "encrypt",
            Operation::Decrypt => "decrypt",
            Operation::Sign => "sign",
            Operation::Verify => "verify",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_padding(operation: Operation, format: KeyFormat) -> Option<Padding> {
    match (format, operation.is_signature()) {
        (KeyFormat::Pkcs1, _) => Some(Padding::Pkcs1v15),
        (KeyFormat::Pkcs8, false) => Some(Padding::Oaep),
        (KeyFormat::Pkcs8, true) => Some(Padding::Pss),
    }
}

/// Returns the explicit padding, or the one derived from `format`.
pub(crate) fn resolve_padding(
    operation: Operation,
    format: KeyFormat,
    padding: Option<Padding>,
) -> Result<Padding> {
    padding
        .or_else(|| default_padding(operation, format))
        .ok_or(Error::EmptyPadding)
}

/// Resolves the scheme for [`Operation::Encrypt`] or [`Operation::Decrypt`].
pub(crate) fn encryption_scheme(pair: &KeyPair, operation: Operation) -> Result<EncryptionScheme> {
    debug_assert!(!operation.is_signature());
    match resolve_padding(operation, pair.format, pair.padding)? {
        Padding::Pkcs1v15 => Ok(EncryptionScheme::Pkcs1v15),
        Padding::Oaep => Ok(EncryptionScheme::Oaep(pair.hash)),
        padding => Err(Error::UnsupportedPaddingScheme { padding, operation }),
    }
}

/// Resolves the scheme for [`Operation::Sign`] or [`Operation::Verify`].
pub(crate) fn signature_scheme(pair: &KeyPair, operation: Operation) -> Result<SignatureScheme> {
    debug_assert!(operation.is_signature());
    match resolve_padding(operation, pair.format, pair.padding)? {
        Padding::Pkcs1v15 => Ok(SignatureScheme::Pkcs1v15(pair.hash)),
        Padding::Pss => Ok(SignatureScheme::Pss(pair.hash)),
        padding => Err(Error::UnsupportedPaddingScheme { padding, operation }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HashAlgorithm;

    #[test]
    fn test_default_padding() {
        use Operation::*;
        for op in [Encrypt, Decrypt, Sign, Verify] {
            assert_eq!(
                resolve_padding(op, KeyFormat::Pkcs1, None).unwrap(),
                Padding::Pkcs1v15
            );
        }
        assert_eq!(resolve_padding(Encrypt, KeyFormat::Pkcs8, None).unwrap(), Padding::Oaep);
        assert_eq!(resolve_padding(Decrypt, KeyFormat::Pkcs8, None).unwrap(), Padding::Oaep);
        assert_eq!(resolve_padding(Sign, KeyFormat::Pkcs8, None).unwrap(), Padding::Pss);
        assert_eq!(resolve_padding(Verify, KeyFormat::Pkcs8, None).unwrap(), Padding::Pss);
    }

    #[test]
    fn test_explicit_padding_wins() {
        let padding = resolve_padding(Operation::Sign, KeyFormat::Pkcs8, Some(Padding::Pkcs1v15));
        assert_eq!(padding.unwrap(), Padding::Pkcs1v15);

        let pair = KeyPair::new(KeyFormat::Pkcs1, HashAlgorithm::Sha1).with_padding(Padding::Oaep);
        assert_eq!(
            encryption_scheme(&pair, Operation::Encrypt).unwrap(),
            EncryptionScheme::Oaep(HashAlgorithm::Sha1)
        );
    }

    #[test]
    fn test_illegal_combinations() {
        let pair = KeyPair::default().with_padding(Padding::Pss);
        for op in [Operation::Encrypt, Operation::Decrypt] {
            assert!(matches!(
                encryption_scheme(&pair, op),
                Err(Error::UnsupportedPaddingScheme { padding: Padding::Pss, operation }) if operation == op
            ));
        }

        let pair = KeyPair::default().with_padding(Padding::Oaep);
        for op in [Operation::Sign, Operation::Verify] {
            assert!(matches!(
                signature_scheme(&pair, op),
                Err(Error::UnsupportedPaddingScheme { padding: Padding::Oaep, operation }) if operation == op
            ));
        }
    }

    #[test]
    fn test_scheme_carries_hash() {
        let pair = KeyPair::new(KeyFormat::Pkcs8, HashAlgorithm::Sha3_256);
        assert_eq!(
            signature_scheme(&pair, Operation::Verify).unwrap(),
            SignatureScheme::Pss(HashAlgorithm::Sha3_256)
        );
        let pair = pair.with_padding(Padding::Pkcs1v15);
        assert_eq!(
            signature_scheme(&pair, Operation::Sign).unwrap(),
            SignatureScheme::Pkcs1v15(HashAlgorithm::Sha3_256)
        );
        assert_eq!(
            encryption_scheme(&pair, Operation::Decrypt).unwrap(),
            EncryptionScheme::Pkcs1v15
        );
    }
}
