//! EMSA-PSS encoding and verification as described in [RFC8017 § 9.1].
//!
//! [RFC8017 § 9.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-9.1

use digest::DynDigest;
use rsa::errors::{Error, Result};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::mgf::mgf1_xor;

pub(crate) fn emsa_pss_encode(
    m_hash: &[u8],
    em_bits: usize,
    salt: &[u8],
    hash: &mut dyn DynDigest,
) -> Result<Vec<u8>> {
    let h_len = hash.output_size();
    let s_len = salt.len();
    let em_len = (em_bits + 7) / 8;

    if m_hash.len() != h_len {
        return Err(Error::InputNotHashed);
    }

    // Key too small for this digest and salt.
    if em_len < h_len + s_len + 2 {
        return Err(Error::Internal);
    }

    let mut em = vec![0; em_len];

    let (db, h) = em.split_at_mut(em_len - h_len - 1);
    let h = &mut h[..h_len];

    // H = Hash(0x00 * 8 || mHash || salt)
    hash.update(&[0u8; 8]);
    hash.update(m_hash);
    hash.update(salt);
    h.copy_from_slice(&hash.finalize_reset());

    // DB = PS || 0x01 || salt
    db[em_len - s_len - h_len - 2] = 0x01;
    db[em_len - s_len - h_len - 1..].copy_from_slice(salt);

    // maskedDB = DB xor MGF(H)
    mgf1_xor(db, hash, h);

    // Clear the leftmost 8 * em_len - em_bits bits.
    db[0] &= 0xFF >> (8 * em_len - em_bits);

    // EM = maskedDB || H || 0xbc
    em[em_len - 1] = 0xBC;

    Ok(em)
}

/// Detect salt length by scanning DB for the 0x01 separator byte.
/// Returns (s_len, valid) where s_len is 0 on failure.
fn emsa_pss_get_salt_len(db: &[u8], em_len: usize, h_len: usize) -> (usize, Choice) {
    let max_scan_len = (em_len - h_len - 2) as u32;

    let mut separator_pos = 0u32;
    let mut found_separator = Choice::from(0u8);
    let mut padding_valid = Choice::from(1u8);

    for i in 0..=max_scan_len {
        let byte_val = db[i as usize];
        let is_zero = byte_val.ct_eq(&0x00);
        let is_separator = byte_val.ct_eq(&0x01);
        let is_invalid = !(is_zero | is_separator);

        let should_update_pos = is_separator & !found_separator;
        separator_pos = u32::conditional_select(&separator_pos, &i, should_update_pos);
        found_separator |= should_update_pos;

        // a non-zero, non-separator byte before the separator
        padding_valid &= !(is_invalid & !found_separator);
    }

    let salt_len = max_scan_len.wrapping_sub(separator_pos);
    let valid = found_separator & padding_valid;

    (u32::conditional_select(&0u32, &salt_len, valid) as usize, valid)
}

/// Verifies a PSS encoded message `em` (left padded to the key size) against
/// `m_hash`, detecting the salt length.
pub(crate) fn emsa_pss_verify(
    m_hash: &[u8],
    em: &mut [u8],
    hash: &mut dyn DynDigest,
    key_bits: usize,
) -> Result<()> {
    let em_bits = key_bits - 1;
    let em_len = (em_bits + 7) / 8;
    let key_len = (key_bits + 7) / 8;
    let h_len = hash.output_size();

    if m_hash.len() != h_len || em.len() != key_len || em_len < h_len + 2 {
        return Err(Error::Verification);
    }

    let em = &mut em[key_len - em_len..];
    if em[em_len - 1] != 0xBC {
        return Err(Error::Verification);
    }

    let (db, h) = em.split_at_mut(em_len - h_len - 1);
    let h = &mut h[..h_len];

    if db[0]
        & (0xFF_u8
            .checked_shl(8 - (8 * em_len - em_bits) as u32)
            .unwrap_or(0))
        != 0
    {
        return Err(Error::Verification);
    }

    // DB = maskedDB xor MGF(H)
    mgf1_xor(db, hash, h);
    db[0] &= 0xFF >> (8 * em_len - em_bits);

    let (s_len, salt_valid) = emsa_pss_get_salt_len(db, em_len, h_len);
    let salt = &db[db.len() - s_len..];

    hash.update(&[0u8; 8]);
    hash.update(m_hash);
    hash.update(salt);
    let h0 = hash.finalize_reset();

    if (salt_valid & h0.ct_eq(h)).into() {
        Ok(())
    } else {
        Err(Error::Verification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HashAlgorithm;

    fn encode(m_hash: &[u8], key_bits: usize, salt: &[u8]) -> Vec<u8> {
        let mut hash = HashAlgorithm::Sha256.new_digest();
        let em = emsa_pss_encode(m_hash, key_bits - 1, salt, &mut *hash).unwrap();
        // left pad to the key size, as a raw RSA operation would
        let mut padded = vec![0u8; (key_bits + 7) / 8 - em.len()];
        padded.extend_from_slice(&em);
        padded
    }

    #[test]
    fn test_encode_verify() {
        let m_hash = HashAlgorithm::Sha256.digest(b"message");
        for (key_bits, salt_len) in [(1024, 32), (1023, 32), (1025, 0), (2048, 20)] {
            let mut em = encode(&m_hash, key_bits, &vec![0x33; salt_len]);
            let mut hash = HashAlgorithm::Sha256.new_digest();
            assert!(
                emsa_pss_verify(&m_hash, &mut em, &mut *hash, key_bits).is_ok(),
                "{} bits, {} byte salt",
                key_bits,
                salt_len
            );
        }
    }

    #[test]
    fn test_verify_wrong_hash() {
        let m_hash = HashAlgorithm::Sha256.digest(b"message");
        let other = HashAlgorithm::Sha256.digest(b"massage");
        let mut em = encode(&m_hash, 1024, &[1u8; 32]);
        let mut hash = HashAlgorithm::Sha256.new_digest();
        assert_eq!(
            emsa_pss_verify(&other, &mut em, &mut *hash, 1024),
            Err(Error::Verification)
        );
    }

    #[test]
    fn test_encode_not_hashed() {
        let mut hash = HashAlgorithm::Sha256.new_digest();
        assert_eq!(
            emsa_pss_encode(b"short", 1023, &[], &mut *hash),
            Err(Error::InputNotHashed)
        );
    }
}
