// Path: crates/crypto/src/sign/secp256k1/mod.rs
//! ECDSA over secp256k1 with SHA-256 message digests, using k256.
//!
//! Signatures are the 64-byte `r || s` form and must be low-S normalized.

use crate::error::CryptoError;
use k256::ecdsa::signature::{Signer, Verifier};
use links_api::crypto::{SerializableKey, Signature, SigningKey, SigningKeyPair, VerifyingKey};
use rand::rngs::OsRng;

/// secp256k1 key pair implementation
#[derive(Clone)]
pub struct Secp256k1KeyPair {
    secret_key: k256::ecdsa::SigningKey,
}

/// secp256k1 signature implementation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Secp256k1Signature(k256::ecdsa::Signature);

/// secp256k1 public key implementation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Secp256k1PublicKey(k256::ecdsa::VerifyingKey);

/// secp256k1 private key implementation
#[derive(Clone)]
pub struct Secp256k1PrivateKey(k256::ecdsa::SigningKey);

impl Secp256k1KeyPair {
    /// Generate a new key pair
    pub fn generate() -> Self {
        Self {
            secret_key: k256::ecdsa::SigningKey::random(&mut OsRng),
        }
    }

    /// Create from an existing private key
    pub fn from_private_key(private_key: &Secp256k1PrivateKey) -> Self {
        Self {
            secret_key: private_key.0.clone(),
        }
    }
}

impl SigningKeyPair for Secp256k1KeyPair {
    type PublicKey = Secp256k1PublicKey;
    type PrivateKey = Secp256k1PrivateKey;
    type Signature = Secp256k1Signature;

    fn public_key(&self) -> Self::PublicKey {
        Secp256k1PublicKey(*self.secret_key.verifying_key())
    }

    fn private_key(&self) -> Self::PrivateKey {
        Secp256k1PrivateKey(self.secret_key.clone())
    }

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        let signature: k256::ecdsa::Signature = self
            .secret_key
            .try_sign(message)
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        Ok(Secp256k1Signature(signature))
    }
}

impl VerifyingKey for Secp256k1PublicKey {
    type Signature = Secp256k1Signature;

    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError> {
        self.0
            .verify(message, &signature.0)
            .map_err(|_| CryptoError::VerificationFailed)
    }
}

impl SerializableKey for Secp256k1PublicKey {
    /// The 33-byte compressed SEC1 encoding.
    fn to_bytes(&self) -> Vec<u8> {
        self.compressed()
    }

    /// Accepts compressed or uncompressed SEC1 encodings.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        k256::ecdsa::VerifyingKey::from_sec1_bytes(bytes)
            .map(Secp256k1PublicKey)
            .map_err(|e| CryptoError::InvalidKey(format!("Failed to parse public key: {}", e)))
    }
}

impl Secp256k1PublicKey {
    /// The 33-byte compressed SEC1 encoding.
    pub fn compressed(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }

    /// The 65-byte uncompressed SEC1 encoding, starting with `0x04`.
    pub fn uncompressed(&self) -> Vec<u8> {
        self.0.to_encoded_point(false).as_bytes().to_vec()
    }
}

impl SigningKey for Secp256k1PrivateKey {
    type Signature = Secp256k1Signature;

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        Secp256k1KeyPair::from_private_key(self).sign(message)
    }
}

impl SerializableKey for Secp256k1PrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        k256::ecdsa::SigningKey::from_slice(bytes)
            .map(Secp256k1PrivateKey)
            .map_err(|e| CryptoError::InvalidKey(format!("Failed to parse private key: {}", e)))
    }
}

impl Secp256k1PrivateKey {
    /// Get the public key corresponding to this private key
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey(*self.0.verifying_key())
    }
}

impl SerializableKey for Secp256k1Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        k256::ecdsa::Signature::from_slice(bytes)
            .map(Secp256k1Signature)
            .map_err(|e| CryptoError::InvalidSignature(format!("Failed to parse signature: {}", e)))
    }
}

impl Signature for Secp256k1Signature {}

#[cfg(test)]
mod tests;
