// Path: crates/crypto/src/sign/secp256k1/tests/mod.rs
use super::*;

#[test]
fn test_sign_and_verify() {
    let keypair = Secp256k1KeyPair::generate();
    let message = b"desmos1owner";
    let signature = keypair.sign(message).unwrap();

    assert_eq!(signature.to_bytes().len(), 64);
    assert!(keypair.public_key().verify(message, &signature).is_ok());
    assert_eq!(
        keypair.public_key().verify(b"desmos1other", &signature),
        Err(CryptoError::VerificationFailed)
    );
}

#[test]
fn test_key_encodings() {
    let keypair = Secp256k1KeyPair::generate();
    let public = keypair.public_key();

    let compressed = public.compressed();
    let uncompressed = public.uncompressed();
    assert_eq!(compressed.len(), 33);
    assert_eq!(uncompressed.len(), 65);
    assert_eq!(uncompressed[0], 0x04);

    // Both encodings load the same point
    assert_eq!(Secp256k1PublicKey::from_bytes(&compressed).unwrap(), public);
    assert_eq!(Secp256k1PublicKey::from_bytes(&uncompressed).unwrap(), public);
}

#[test]
fn test_private_key_roundtrip() {
    let keypair = Secp256k1KeyPair::generate();
    let loaded = Secp256k1PrivateKey::from_bytes(&keypair.private_key().to_bytes()).unwrap();
    assert_eq!(loaded.public_key(), keypair.public_key());

    let signature = loaded.sign(b"msg").unwrap();
    assert!(keypair.public_key().verify(b"msg", &signature).is_ok());
}

#[test]
fn test_malformed_inputs() {
    assert!(matches!(
        Secp256k1PublicKey::from_bytes(&[2u8; 10]),
        Err(CryptoError::InvalidKey(_))
    ));
    assert!(matches!(
        Secp256k1Signature::from_bytes(&[1u8; 63]),
        Err(CryptoError::InvalidSignature(_))
    ));
}
