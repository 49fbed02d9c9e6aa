//! PKCS#1 and PKCS#8 decoding of key material.
//!
//! Keys may be supplied as PEM text or as raw DER. PEM is recognised by its
//! pre-encapsulation boundary; anything else is treated as DER.

use pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::errors::BoxError;
use crate::key::KeyFormat;

const PEM_BOUNDARY: &[u8] = b"-----BEGIN ";

/// Returns the PEM text if `bytes` looks like a PEM document.
fn as_pem(bytes: &[u8]) -> Option<core::result::Result<&str, core::str::Utf8Error>> {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace())?;
    if bytes[start..].starts_with(PEM_BOUNDARY) {
        Some(core::str::from_utf8(&bytes[start..]))
    } else {
        None
    }
}

pub(crate) fn decode_public_key(
    bytes: &[u8],
    format: KeyFormat,
) -> core::result::Result<RsaPublicKey, BoxError> {
    let key = match (as_pem(bytes), format) {
        (Some(pem), KeyFormat::Pkcs1) => RsaPublicKey::from_pkcs1_pem(pem?)?,
        (Some(pem), KeyFormat::Pkcs8) => RsaPublicKey::from_public_key_pem(pem?)?,
        (None, KeyFormat::Pkcs1) => RsaPublicKey::from_pkcs1_der(bytes)?,
        (None, KeyFormat::Pkcs8) => RsaPublicKey::from_public_key_der(bytes)?,
    };
    Ok(key)
}

pub(crate) fn decode_private_key(
    bytes: &[u8],
    format: KeyFormat,
) -> core::result::Result<RsaPrivateKey, BoxError> {
    let key = match (as_pem(bytes), format) {
        (Some(pem), KeyFormat::Pkcs1) => RsaPrivateKey::from_pkcs1_pem(pem?)?,
        (Some(pem), KeyFormat::Pkcs8) => RsaPrivateKey::from_pkcs8_pem(pem?)?,
        (None, KeyFormat::Pkcs1) => RsaPrivateKey::from_pkcs1_der(bytes)?,
        (None, KeyFormat::Pkcs8) => RsaPrivateKey::from_pkcs8_der(bytes)?,
    };
    Ok(key)
}
