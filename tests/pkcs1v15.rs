//! PKCS#1 keys, where every operation defaults to PKCS#1 v1.5 padding.

use std::io::{Read, Write};

use pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use rsa::{Pkcs1v15Encrypt, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use rsa_transform::{
    Decrypter, Encrypter, EncryptionScheme, HashAlgorithm, KeyFormat, KeyPair, KeyType, Signer,
    StreamDecrypter, StreamEncrypter, Verifier,
};
use sha2::{Digest, Sha256};

const PUB: &str = include_str!("examples/pkcs1/rsa1024-pub.pem");
const PRIV: &str = include_str!("examples/pkcs1/rsa1024-priv.pem");

fn pair(key_type: KeyType) -> KeyPair {
    KeyPair::new(KeyFormat::Pkcs1, HashAlgorithm::Sha256)
        .with_public_key(PUB)
        .with_private_key(PRIV)
        .with_type(key_type)
}

#[test]
fn hello_world() {
    let encrypter = Encrypter::new(&pair(KeyType::Public)).unwrap();
    assert_eq!(encrypter.scheme(), EncryptionScheme::Pkcs1v15);
    let ciphertext = encrypter.encrypt(b"hello world").unwrap();
    assert_eq!(ciphertext.len(), 128);

    let decrypter = Decrypter::new(&pair(KeyType::Private)).unwrap();
    assert_eq!(decrypter.decrypt(&ciphertext).unwrap(), b"hello world");
}

#[test]
fn max_length_both_directions() {
    let mut rng = ChaCha8Rng::from_seed([1; 32]);
    let msg = [0xa5u8; 117];
    for (enc, dec) in [
        (KeyType::Public, KeyType::Private),
        (KeyType::Private, KeyType::Public),
    ] {
        let ciphertext = Encrypter::new(&pair(enc))
            .unwrap()
            .encrypt_with_rng(&mut rng, &msg)
            .unwrap();
        let plaintext = Decrypter::new(&pair(dec))
            .unwrap()
            .decrypt_with_rng(&mut rng, &ciphertext)
            .unwrap();
        assert_eq!(plaintext, msg);
    }
}

#[test]
fn interoperates_with_rsa_crate() {
    let mut rng = ChaCha8Rng::from_seed([2; 32]);
    let private_key = RsaPrivateKey::from_pkcs1_pem(PRIV).unwrap();
    let public_key = RsaPublicKey::from_pkcs1_pem(PUB).unwrap();

    // encrypted here, opened by the rsa crate
    let ciphertext = Encrypter::new(&pair(KeyType::Public))
        .unwrap()
        .encrypt(b"interop")
        .unwrap();
    assert_eq!(private_key.decrypt(Pkcs1v15Encrypt, &ciphertext).unwrap(), b"interop");

    // encrypted by the rsa crate, opened here
    let ciphertext = public_key
        .encrypt(&mut rng, Pkcs1v15Encrypt, b"interop")
        .unwrap();
    let decrypter = Decrypter::new(&pair(KeyType::Private)).unwrap();
    assert_eq!(decrypter.decrypt(&ciphertext).unwrap(), b"interop");

    // signatures are deterministic and identical
    let hashed = Sha256::digest(b"interop");
    let expected = private_key
        .sign(Pkcs1v15Sign::new::<Sha256>(), &hashed)
        .unwrap();
    let signature = Signer::new(&pair(KeyType::Private))
        .unwrap()
        .sign(b"interop")
        .unwrap();
    assert_eq!(signature, expected);
    assert!(Verifier::new(&pair(KeyType::Public))
        .unwrap()
        .verify(b"interop", &expected)
        .unwrap());
}

#[test]
fn reverse_direction_signature() {
    let signature = Signer::new(&pair(KeyType::Public))
        .unwrap()
        .sign(b"signed with the public key")
        .unwrap();
    let verifier = Verifier::new(&pair(KeyType::Private)).unwrap();
    assert!(verifier
        .verify(b"signed with the public key", &signature)
        .unwrap());
    assert!(verifier.verify(b"something else", &signature).is_err());
}

#[test]
fn der_keys() {
    let der = std::fs::read("tests/examples/pkcs1/rsa1024-priv.der").unwrap();
    let private = KeyPair::new(KeyFormat::Pkcs1, HashAlgorithm::Sha256)
        .with_private_key(der)
        .with_type(KeyType::Private);

    let ciphertext = Encrypter::new(&pair(KeyType::Public))
        .unwrap()
        .encrypt(b"der")
        .unwrap();
    assert_eq!(Decrypter::new(&private).unwrap().decrypt(&ciphertext).unwrap(), b"der");
}

#[test]
fn stream_large_message() {
    let message: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();

    let mut encrypter = StreamEncrypter::new(Vec::new(), &pair(KeyType::Private)).unwrap();
    for chunk in message.chunks(333) {
        encrypter.write_all(chunk).unwrap();
    }
    let ciphertext = encrypter.finish().unwrap();
    // 10_000 / 117 rounds up to 86 blocks
    assert_eq!(ciphertext.len(), 86 * 128);

    let mut decrypter = StreamDecrypter::new(ciphertext.as_slice(), &pair(KeyType::Public)).unwrap();
    let mut plaintext = Vec::new();
    decrypter.read_to_end(&mut plaintext).unwrap();
    assert_eq!(plaintext, message);
}
