//! Supported padding schemes.

use core::fmt;
use core::str::FromStr;

use crate::hash::HashAlgorithm;

/// PKCS#1 v1.5 encryption overhead: `0x00 || 0x02 || PS (>= 8 bytes) || 0x00`.
pub const PKCS1V15_OVERHEAD: usize = 11;

/// Padding scheme named in a [`KeyPair`](crate::KeyPair).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Padding {
    /// PKCS#1 v1.5, for both encryption and signatures.
    Pkcs1v15,
    /// OAEP, encryption only.
    Oaep,
    /// PSS, signatures only.
    Pss,
}

impl Padding {
    /// Returns the canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Padding::Pkcs1v15 => "pkcs1v15",
            Padding::Oaep => "oaep",
            Padding::Pss => "pss",
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown padding scheme name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown padding scheme `{0}`")]
pub struct UnknownPadding(pub String);

impl FromStr for Padding {
    type Err = UnknownPadding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(&['-', '_', ' ', '#'][..], "").as_str() {
            "pkcs1v15" | "pkcs1v1.5" => Ok(Padding::Pkcs1v15),
            "oaep" => Ok(Padding::Oaep),
            "pss" => Ok(Padding::Pss),
            _ => Err(UnknownPadding(s.to_string())),
        }
    }
}

/// Padding resolved for encryption and decryption.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EncryptionScheme {
    /// PKCS#1 v1.5 encryption padding.
    Pkcs1v15,
    /// OAEP with the given hash for both the label and MGF1.
    Oaep(HashAlgorithm),
}

impl EncryptionScheme {
    /// Returns the padding this scheme was resolved from.
    pub fn padding(self) -> Padding {
        match self {
            EncryptionScheme::Pkcs1v15 => Padding::Pkcs1v15,
            EncryptionScheme::Oaep(_) => Padding::Oaep,
        }
    }

    /// Bytes of a block taken by the padding.
    ///
    /// PKCS#1 v1.5 needs 11 bytes, OAEP needs `2 * h_len + 2`.
    pub fn overhead(self) -> usize {
        match self {
            EncryptionScheme::Pkcs1v15 => PKCS1V15_OVERHEAD,
            EncryptionScheme::Oaep(hash) => 2 * hash.output_size() + 2,
        }
    }

    /// Largest plaintext that fits in one block of a `key_size` byte key, or
    /// `None` when not even an empty message fits.
    pub fn max_message_len(self, key_size: usize) -> Option<usize> {
        key_size
            .checked_sub(self.overhead())
            .filter(|&len| len > 0)
    }
}

/// Padding resolved for signing and verification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SignatureScheme {
    /// `RSASSA-PKCS1-v1_5` over the given hash.
    Pkcs1v15(HashAlgorithm),
    /// `RSASSA-PSS` over the given hash, salt length equal to the digest size.
    Pss(HashAlgorithm),
}

impl SignatureScheme {
    /// Returns the padding this scheme was resolved from.
    pub fn padding(self) -> Padding {
        match self {
            SignatureScheme::Pkcs1v15(_) => Padding::Pkcs1v15,
            SignatureScheme::Pss(_) => Padding::Pss,
        }
    }

    /// Hash the message is digested with.
    pub fn hash(self) -> HashAlgorithm {
        match self {
            SignatureScheme::Pkcs1v15(hash) | SignatureScheme::Pss(hash) => hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pkcs1v15_capacity() {
        let scheme = EncryptionScheme::Pkcs1v15;
        assert_eq!(scheme.max_message_len(128), Some(117));
        assert_eq!(scheme.max_message_len(256), Some(245));
        assert_eq!(scheme.max_message_len(11), None);
        assert_eq!(scheme.max_message_len(4), None);
    }

    #[test]
    fn test_oaep_capacity() {
        let scheme = EncryptionScheme::Oaep(HashAlgorithm::Sha256);
        assert_eq!(scheme.overhead(), 66);
        assert_eq!(scheme.max_message_len(128), Some(62));
        assert_eq!(EncryptionScheme::Oaep(HashAlgorithm::Sha1).max_message_len(128), Some(86));
        // 2 * 64 + 2 > 128
        assert_eq!(EncryptionScheme::Oaep(HashAlgorithm::Sha512).max_message_len(128), None);
        assert_eq!(EncryptionScheme::Oaep(HashAlgorithm::Sha512).max_message_len(64), None);
    }

    #[test]
    fn test_padding_names() {
        for padding in [Padding::Pkcs1v15, Padding::Oaep, Padding::Pss] {
            assert_eq!(padding.to_string().parse::<Padding>(), Ok(padding));
        }
        assert_eq!("PKCS#1 v1.5".parse::<Padding>(), Ok(Padding::Pkcs1v15));
        assert_eq!("OAEP".parse::<Padding>(), Ok(Padding::Oaep));
        assert!("none".parse::<Padding>().is_err());
    }
}
