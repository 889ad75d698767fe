// Path: crates/crypto/src/sign/mod.rs
//! Signature schemes accepted in link proofs.

pub mod eddsa;
pub mod secp256k1;

use crate::error::CryptoError;
use eddsa::{Ed25519PublicKey, Ed25519Signature};
use links_api::crypto::{SerializableKey, VerifyingKey};
use links_types::app::PublicKey;
use secp256k1::{Secp256k1PublicKey, Secp256k1Signature};

/// Verifies `signature` over `message` with a key of any supported type.
///
/// Malformed keys and signatures are reported as such; a well-formed signature
/// that does not verify is `CryptoError::VerificationFailed`.
pub fn verify_signature(
    public_key: &PublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<(), CryptoError> {
    match public_key {
        PublicKey::Ed25519(bytes) => {
            let key = Ed25519PublicKey::from_bytes(bytes)?;
            let sig = Ed25519Signature::from_bytes(signature)?;
            key.verify(message, &sig)
        }
        PublicKey::Secp256k1(bytes) => {
            let key = Secp256k1PublicKey::from_bytes(bytes)?;
            let sig = Secp256k1Signature::from_bytes(signature)?;
            key.verify(message, &sig)
        }
    }
}

/// Parses the key without verifying anything, to surface malformed keys early.
pub fn check_public_key(public_key: &PublicKey) -> Result<(), CryptoError> {
    match public_key {
        PublicKey::Ed25519(bytes) => Ed25519PublicKey::from_bytes(bytes).map(|_| ()),
        PublicKey::Secp256k1(bytes) => Secp256k1PublicKey::from_bytes(bytes).map(|_| ()),
    }
}
