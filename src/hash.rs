//! Hash algorithms usable with OAEP, PSS and PKCS#1 v1.5 signatures.

use core::fmt;
use core::str::FromStr;

use digest::{Digest, DynDigest};
use rsa::{Oaep, Pkcs1v15Sign, Pss};

/// Runs `$body` with `$d` bound to the digest type selected by `$alg`.
macro_rules! with_digest {
    ($alg:expr, $d:ident => $body:expr) => {
        match $alg {
            HashAlgorithm::Sha1 => {
                type $d = sha1::Sha1;
                $body
            }
            HashAlgorithm::Sha224 => {
                type $d = sha2::Sha224;
                $body
            }
            HashAlgorithm::Sha256 => {
                type $d = sha2::Sha256;
                $body
            }
            HashAlgorithm::Sha384 => {
                type $d = sha2::Sha384;
                $body
            }
            HashAlgorithm::Sha512 => {
                type $d = sha2::Sha512;
                $body
            }
            HashAlgorithm::Sha512_224 => {
                type $d = sha2::Sha512_224;
                $body
            }
            HashAlgorithm::Sha512_256 => {
                type $d = sha2::Sha512_256;
                $body
            }
            HashAlgorithm::Sha3_224 => {
                type $d = sha3::Sha3_224;
                $body
            }
            HashAlgorithm::Sha3_256 => {
                type $d = sha3::Sha3_256;
                $body
            }
            HashAlgorithm::Sha3_384 => {
                type $d = sha3::Sha3_384;
                $body
            }
            HashAlgorithm::Sha3_512 => {
                type $d = sha3::Sha3_512;
                $body
            }
        }
    };
}

/// A list of supported hash functions.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum HashAlgorithm {
    /// SHA-1
    Sha1,
    /// SHA-224
    Sha224,
    /// SHA-256
    #[default]
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// SHA-512/224
    #[cfg_attr(feature = "serde", serde(rename = "sha512-224"))]
    Sha512_224,
    /// SHA-512/256
    #[cfg_attr(feature = "serde", serde(rename = "sha512-256"))]
    Sha512_256,
    /// SHA3-224
    #[cfg_attr(feature = "serde", serde(rename = "sha3-224"))]
    Sha3_224,
    /// SHA3-256
    #[cfg_attr(feature = "serde", serde(rename = "sha3-256"))]
    Sha3_256,
    /// SHA3-384
    #[cfg_attr(feature = "serde", serde(rename = "sha3-384"))]
    Sha3_384,
    /// SHA3-512
    #[cfg_attr(feature = "serde", serde(rename = "sha3-512"))]
    Sha3_512,
}

impl HashAlgorithm {
    /// All supported algorithms.
    pub const ALL: [HashAlgorithm; 11] = [
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha512_224,
        HashAlgorithm::Sha512_256,
        HashAlgorithm::Sha3_224,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_384,
        HashAlgorithm::Sha3_512,
    ];

    /// Returns a fresh hasher.
    pub fn new_digest(self) -> Box<dyn DynDigest + Send + Sync> {
        with_digest!(self, D => Box::new(<D as Digest>::new()))
    }

    /// Returns the length in bytes of a digest.
    pub fn output_size(self) -> usize {
        with_digest!(self, D => <D as Digest>::output_size())
    }

    /// Hashes `data` in one go.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        with_digest!(self, D => <D as Digest>::digest(data).to_vec())
    }

    /// Returns the canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha512_224 => "sha512-224",
            HashAlgorithm::Sha512_256 => "sha512-256",
            HashAlgorithm::Sha3_224 => "sha3-224",
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Sha3_384 => "sha3-384",
            HashAlgorithm::Sha3_512 => "sha3-512",
        }
    }

    pub(crate) fn oaep(self) -> Oaep {
        with_digest!(self, D => Oaep::new::<D>())
    }

    pub(crate) fn pss(self) -> Pss {
        with_digest!(self, D => Pss::new::<D>())
    }

    pub(crate) fn pkcs1v15_sign(self) -> Pkcs1v15Sign {
        with_digest!(self, D => Pkcs1v15Sign::new::<D>())
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown hash algorithm name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown hash algorithm `{0}`")]
pub struct UnknownHashAlgorithm(pub String);

impl FromStr for HashAlgorithm {
    type Err = UnknownHashAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(&['_', '/'][..], "-");
        let normalized = normalized.strip_prefix("sha-").map_or_else(
            || normalized.clone(),
            |rest| format!("sha{}", rest),
        );
        HashAlgorithm::ALL
            .iter()
            .copied()
            .find(|alg| alg.as_str() == normalized)
            .ok_or_else(|| UnknownHashAlgorithm(s.to_string()))
    }
}
