// Path: crates/crypto/src/proof/mod.rs
//! Verification of address ownership proofs.

use crate::address::{address_matches, check_supported, derive_address};
use crate::error::{CryptoError, VerificationError};
use crate::sign::{check_public_key, verify_signature};
use links_types::app::{AddressData, Proof};

/// Checks that a proof demonstrates control of an address.
///
/// Checks run in a fixed order so the first failing one decides the error:
/// blank address, unsupported encoding, malformed key, non-hex plain text,
/// address mismatch, and finally the signature itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddressProofVerifier;

impl AddressProofVerifier {
    /// Creates a verifier.
    pub fn new() -> Self {
        Self
    }

    /// Verifies `proof` against `address`. Pure; never touches state.
    pub fn verify(&self, address: &AddressData, proof: &Proof) -> Result<(), VerificationError> {
        address.validate()?;
        check_supported(address, &proof.public_key)?;
        check_public_key(&proof.public_key)
            .map_err(|e| VerificationError::InvalidPublicKey(e.to_string()))?;
        let message = proof.plain_text_bytes()?;

        let derived = derive_address(address, &proof.public_key)?;
        if !address_matches(address, &derived) {
            return Err(VerificationError::AddressMismatch {
                expected: address.value().to_string(),
                derived,
            });
        }

        verify_signature(&proof.public_key, &message, &proof.signature).map_err(|e| {
            tracing::debug!(target: "links", "proof signature rejected: {}", e);
            match e {
                CryptoError::InvalidKey(msg) => VerificationError::InvalidPublicKey(msg),
                _ => VerificationError::InvalidSignature,
            }
        })
    }
}
