// Path: crates/crypto/src/algorithms/hash/mod.rs
//! Cryptographic hash functions used for address derivation.

use sha2::Digest;

/// Hash function trait
pub trait HashFunction {
    /// Hash a message and return the digest
    fn hash(&self, message: &[u8]) -> Vec<u8>;

    /// Get the digest size in bytes
    fn digest_size(&self) -> usize;

    /// Get the name of the hash function
    fn name(&self) -> &str;
}

/// SHA-256
#[derive(Default, Clone)]
pub struct Sha256Hash;

impl HashFunction for Sha256Hash {
    fn hash(&self, message: &[u8]) -> Vec<u8> {
        sha2::Sha256::digest(message).to_vec()
    }

    fn digest_size(&self) -> usize {
        32
    }

    fn name(&self) -> &str {
        "SHA-256"
    }
}

/// RIPEMD-160
#[derive(Default, Clone)]
pub struct Ripemd160Hash;

impl HashFunction for Ripemd160Hash {
    fn hash(&self, message: &[u8]) -> Vec<u8> {
        ripemd::Ripemd160::digest(message).to_vec()
    }

    fn digest_size(&self) -> usize {
        20
    }

    fn name(&self) -> &str {
        "RIPEMD-160"
    }
}

/// Keccak-256 as used by Ethereum (pre-standard padding, not SHA3-256).
#[derive(Default, Clone)]
pub struct Keccak256Hash;

impl HashFunction for Keccak256Hash {
    fn hash(&self, message: &[u8]) -> Vec<u8> {
        sha3::Keccak256::digest(message).to_vec()
    }

    fn digest_size(&self) -> usize {
        32
    }

    fn name(&self) -> &str {
        "Keccak-256"
    }
}

/// Computes the SHA-256 digest of `message`.
pub fn sha256(message: &[u8]) -> [u8; 32] {
    sha2::Sha256::digest(message).into()
}

/// Computes the RIPEMD-160 digest of `message`.
pub fn ripemd160(message: &[u8]) -> [u8; 20] {
    ripemd::Ripemd160::digest(message).into()
}

/// Computes the Keccak-256 digest of `message`.
pub fn keccak256(message: &[u8]) -> [u8; 32] {
    sha3::Keccak256::digest(message).into()
}
