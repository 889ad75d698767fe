// Path: crates/crypto/src/sign/eddsa/tests/mod.rs
use super::*;

#[test]
fn test_keypair_generation() {
    let keypair = Ed25519KeyPair::generate();
    let message = b"Test message";

    let signature = keypair.sign(message).unwrap();

    let public_key = keypair.public_key();
    assert!(public_key.verify(message, &signature).is_ok());
}

#[test]
fn test_serialization_roundtrip() {
    let keypair = Ed25519KeyPair::generate();

    let public_bytes = keypair.public_key().to_bytes();
    let private_bytes = keypair.private_key().to_bytes();

    assert_eq!(public_bytes.len(), 32);
    assert_eq!(private_bytes.len(), 32); // Just the seed

    let public_key = Ed25519PublicKey::from_bytes(&public_bytes).unwrap();
    let private_key = Ed25519PrivateKey::from_bytes(&private_bytes).unwrap();

    // The loaded private key derives the same public key
    assert_eq!(public_key, private_key.public_key());
}

#[test]
fn test_sign_verify_with_loaded_keys() {
    let original = Ed25519KeyPair::generate();
    let message = b"Test message for persistence";
    let original_sig = original.sign(message).unwrap();

    let loaded = Ed25519PrivateKey::from_bytes(&original.private_key().to_bytes()).unwrap();
    let reconstructed = Ed25519KeyPair::from_private_key(&loaded);
    let new_sig = reconstructed.sign(message).unwrap();

    // Ed25519 signatures are deterministic
    assert_eq!(original_sig.to_bytes(), new_sig.to_bytes());
    assert!(reconstructed.public_key().verify(message, &original_sig).is_ok());
}

#[test]
fn test_wrong_signature_fails() {
    let keypair1 = Ed25519KeyPair::generate();
    let keypair2 = Ed25519KeyPair::generate();
    let message = b"Test message";

    let signature = keypair1.sign(message).unwrap();

    assert_eq!(
        keypair2.public_key().verify(message, &signature),
        Err(CryptoError::VerificationFailed)
    );
    assert!(keypair1
        .public_key()
        .verify(b"Different message", &signature)
        .is_err());
}

#[test]
fn test_malformed_inputs() {
    assert!(matches!(
        Ed25519PublicKey::from_bytes(&[0u8; 31]),
        Err(CryptoError::InvalidKey(_))
    ));
    assert!(matches!(
        Ed25519Signature::from_bytes(&[0u8; 63]),
        Err(CryptoError::InvalidSignature(_))
    ));
    assert!(Ed25519PrivateKey::from_bytes(&[7u8; 16]).is_err());
}
