//! PKCS#1 v1.5 block formatting as described in [RFC8017 § 7.2] and [RFC8017 § 9.2].
//!
//! Only the block-type-1 layout (`0x00 || 0x01 || 0xff.. || 0x00 || T`) lives here:
//! it carries both private-key encryption and signatures verified by the
//! private key. Block type 2 is handled by the `rsa` crate directly.
//!
//! [RFC8017 § 7.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.2
//! [RFC8017 § 9.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-9.2

use rsa::errors::{Error, Result};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::padding::PKCS1V15_OVERHEAD;

/// Builds `EM = 0x00 || 0x01 || PS || 0x00 || prefix || payload` where `PS`
/// is at least eight `0xff` bytes.
#[inline]
pub(crate) fn pkcs1v15_type1_pad(
    prefix: &[u8],
    payload: &[u8],
    k: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    let t_len = prefix.len() + payload.len();
    if k < t_len + PKCS1V15_OVERHEAD {
        return Err(Error::MessageTooLong);
    }

    let mut em = Zeroizing::new(vec![0xff; k]);
    em[0] = 0;
    em[1] = 1;
    em[k - t_len - 1] = 0;
    em[k - t_len..k - payload.len()].copy_from_slice(prefix);
    em[k - payload.len()..].copy_from_slice(payload);

    Ok(em)
}

/// Strips block-type-1 padding and returns the payload.
///
/// The block comes out of a public-key operation, so nothing here is secret
/// and the checks may short-circuit.
#[inline]
pub(crate) fn pkcs1v15_type1_unpad(em: &[u8], k: usize) -> Result<Vec<u8>> {
    if k < PKCS1V15_OVERHEAD || em.len() != k {
        return Err(Error::Decryption);
    }
    if em[0] != 0 || em[1] != 1 {
        return Err(Error::Decryption);
    }

    let ps_len = em[2..].iter().take_while(|&&b| b == 0xff).count();
    let sep = 2 + ps_len;
    if ps_len < 8 || sep >= k || em[sep] != 0 {
        return Err(Error::Decryption);
    }

    Ok(em[sep + 1..].to_vec())
}

/// Checks a block-type-1 encoded digest in constant time.
#[inline]
pub(crate) fn pkcs1v15_sign_unpad(prefix: &[u8], hashed: &[u8], em: &[u8], k: usize) -> Result<()> {
    let hash_len = hashed.len();
    let t_len = prefix.len() + hashed.len();
    if k < t_len + PKCS1V15_OVERHEAD || em.len() != k {
        return Err(Error::Verification);
    }

    // EM = 0x00 || 0x01 || PS || 0x00 || T
    let mut ok = em[0].ct_eq(&0u8);
    ok &= em[1].ct_eq(&1u8);
    ok &= em[k - hash_len..k].ct_eq(hashed);
    ok &= em[k - t_len..k - hash_len].ct_eq(prefix);
    ok &= em[k - t_len - 1].ct_eq(&0u8);

    for el in em.iter().skip(2).take(k - t_len - 3) {
        ok &= el.ct_eq(&0xff)
    }

    if ok.unwrap_u8() != 1 {
        return Err(Error::Verification);
    }

    Ok(())
}
