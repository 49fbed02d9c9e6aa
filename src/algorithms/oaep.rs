//! EME-OAEP encoding as described in [RFC8017 § 7.1], with the empty label.
//!
//! [RFC8017 § 7.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1

use digest::DynDigest;
use rand_core::CryptoRngCore;
use rsa::errors::{Error, Result};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroizing;

use super::mgf::mgf1_xor;

/// Encodes `msg` into a `k` byte block: `0x00 || maskedSeed || maskedDB`.
///
/// The message must be no longer than `k - 2 * h_len - 2`.
#[inline]
pub(crate) fn oaep_encode<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    msg: &[u8],
    digest: &mut dyn DynDigest,
    k: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    let h_size = digest.output_size();
    if msg.len() + 2 * h_size + 2 > k {
        return Err(Error::MessageTooLong);
    }

    let p_hash = digest.finalize_reset();

    let mut em = Zeroizing::new(vec![0u8; k]);
    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);
    rng.fill_bytes(seed);

    // Data block DB = pHash || PS || 01 || M
    let db_len = k - h_size - 1;
    db[0..h_size].copy_from_slice(&p_hash);
    db[db_len - msg.len() - 1] = 1;
    db[db_len - msg.len()..].copy_from_slice(msg);

    mgf1_xor(db, digest, seed);
    mgf1_xor(seed, digest, db);

    Ok(em)
}

/// Decodes an OAEP block produced by [`oaep_encode`].
///
/// Runs in constant time with respect to the block contents so that it is
/// also safe on blocks recovered with a private key.
#[inline]
pub(crate) fn oaep_decode(em: &mut [u8], digest: &mut dyn DynDigest, k: usize) -> Result<Vec<u8>> {
    let h_size = digest.output_size();
    if em.len() != k || k < h_size * 2 + 2 {
        return Err(Error::Decryption);
    }

    let expected_p_hash = digest.finalize_reset();

    let first_byte_is_zero = em[0].ct_eq(&0u8);
    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);

    mgf1_xor(seed, digest, db);
    mgf1_xor(db, digest, seed);

    let hash_are_equal = db[0..h_size].ct_eq(&expected_p_hash);

    // The remainder of the plaintext must be zero or more 0x00, followed
    // by 0x01, followed by the message.
    //   looking_for_index: 1 if we are still looking for the 0x01
    //   index: the offset of the first 0x01 byte
    //   nonzero_before_one: 1 if we saw a non-zero byte before the 1
    let mut looking_for_index = Choice::from(1u8);
    let mut index = 0u32;
    let mut nonzero_before_one = Choice::from(0u8);

    for (i, el) in db.iter().skip(h_size).enumerate() {
        let equals0 = el.ct_eq(&0u8);
        let equals1 = el.ct_eq(&1u8);
        index.conditional_assign(&(i as u32), looking_for_index & equals1);
        looking_for_index &= !equals1;
        nonzero_before_one |= looking_for_index & !equals0;
    }

    let valid = first_byte_is_zero & hash_are_equal & !nonzero_before_one & !looking_for_index;
    if valid.unwrap_u8() != 1 {
        return Err(Error::Decryption);
    }

    let start = h_size + index as usize + 1;
    Ok(db[start..].to_vec())
}
