//! Raw RSA operations on byte blocks.

use rand_core::CryptoRngCore;
use rsa::errors::{Error, Result};
use rsa::hazmat::{rsa_decrypt_and_check, rsa_encrypt};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use super::pad::{uint_to_be_pad, uint_to_zeroizing_be_pad};

/// `block^e mod n`, left padded to the key size.
///
/// `block` must be exactly one key-size block whose value is below the modulus.
pub(crate) fn public_op(key: &RsaPublicKey, block: &[u8], err: Error) -> Result<Vec<u8>> {
    let k = key.size();
    if block.len() != k {
        return Err(err);
    }

    let m = BigUint::from_bytes_be(block);
    if &m >= key.n() {
        return Err(err);
    }

    uint_to_be_pad(rsa_encrypt(key, &m)?, k)
}

/// `block^d mod n` with blinding, left padded to the key size.
pub(crate) fn private_op<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    key: &RsaPrivateKey,
    block: &[u8],
    err: Error,
) -> Result<Zeroizing<Vec<u8>>> {
    let k = key.size();
    if block.len() != k {
        return Err(err);
    }

    let c = BigUint::from_bytes_be(block);
    if &c >= key.n() {
        return Err(err);
    }

    uint_to_zeroizing_be_pad(rsa_decrypt_and_check(key, Some(rng), &c)?, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_keys;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    #[test]
    fn test_private_then_public() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let private_key = test_keys::private_key_1024();
        let public_key = private_key.to_public_key();

        let mut block = vec![0u8; 128];
        block[1] = 0x42;
        block[127] = 0x07;

        let sig = private_op(&mut rng, &private_key, &block, Error::Internal).unwrap();
        assert_ne!(&*sig, &block);
        let back = public_op(&public_key, &sig, Error::Internal).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let public_key = test_keys::private_key_1024().to_public_key();
        assert_eq!(
            public_op(&public_key, &[0xff; 128], Error::Decryption),
            Err(Error::Decryption)
        );
        assert_eq!(
            public_op(&public_key, &[0x01; 127], Error::Verification),
            Err(Error::Verification)
        );
    }
}
