//! Fixture keys shared by unit tests.

#![allow(dead_code)]

use rsa::RsaPrivateKey;

use crate::{encoding::decode_private_key, HashAlgorithm, KeyFormat, KeyPair};

pub const PKCS1_PUB_512: &str = include_str!("../tests/examples/pkcs1/rsa512-pub.pem");
pub const PKCS1_PRIV_512: &str = include_str!("../tests/examples/pkcs1/rsa512-priv.pem");
pub const PKCS1_PUB_1024: &str = include_str!("../tests/examples/pkcs1/rsa1024-pub.pem");
pub const PKCS1_PRIV_1024: &str = include_str!("../tests/examples/pkcs1/rsa1024-priv.pem");
pub const PKCS8_PUB_512: &str = include_str!("../tests/examples/pkcs8/rsa512-pub.pem");
pub const PKCS8_PRIV_512: &str = include_str!("../tests/examples/pkcs8/rsa512-priv.pem");
pub const PKCS8_PUB_1024: &str = include_str!("../tests/examples/pkcs8/rsa1024-pub.pem");
pub const PKCS8_PRIV_1024: &str = include_str!("../tests/examples/pkcs8/rsa1024-priv.pem");

pub const PKCS1_PRIV_1024_DER: &[u8] = include_bytes!("../tests/examples/pkcs1/rsa1024-priv.der");
pub const PKCS8_PUB_1024_DER: &[u8] = include_bytes!("../tests/examples/pkcs8/rsa1024-pub.der");

pub fn private_key_1024() -> RsaPrivateKey {
    decode_private_key(PKCS1_PRIV_1024.as_bytes(), KeyFormat::Pkcs1).unwrap()
}

/// 1024-bit PKCS#1 pair; the default padding is PKCS#1 v1.5.
pub fn pkcs1_pair_1024() -> KeyPair {
    KeyPair::new(KeyFormat::Pkcs1, HashAlgorithm::Sha256)
        .with_public_key(PKCS1_PUB_1024)
        .with_private_key(PKCS1_PRIV_1024)
}

/// 1024-bit PKCS#8 pair; the default padding is OAEP or PSS.
pub fn pkcs8_pair_1024() -> KeyPair {
    KeyPair::new(KeyFormat::Pkcs8, HashAlgorithm::Sha256)
        .with_public_key(PKCS8_PUB_1024)
        .with_private_key(PKCS8_PRIV_1024)
}

pub fn pkcs8_pair_512() -> KeyPair {
    KeyPair::new(KeyFormat::Pkcs8, HashAlgorithm::Sha256)
        .with_public_key(PKCS8_PUB_512)
        .with_private_key(PKCS8_PRIV_512)
}

pub fn pkcs1_pair_512() -> KeyPair {
    KeyPair::new(KeyFormat::Pkcs1, HashAlgorithm::Sha256)
        .with_public_key(PKCS1_PUB_512)
        .with_private_key(PKCS1_PRIV_512)
}
