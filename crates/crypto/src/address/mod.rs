// Path: crates/crypto/src/address/mod.rs
//! Derivation of external-ledger addresses from public keys.
//!
//! | encoding | secp256k1                          | ed25519              |
//! |----------|------------------------------------|----------------------|
//! | bech32   | `ripemd160(sha256(compressed))`    | `sha256(key)[..20]`  |
//! | base58   | unsupported                        | raw key bytes        |
//! | hex      | `keccak256(uncompressed[1..])[12..]` | unsupported        |

use crate::algorithms::hash::{keccak256, ripemd160, sha256};
use crate::error::VerificationError;
use crate::sign::eddsa::Ed25519PublicKey;
use crate::sign::secp256k1::Secp256k1PublicKey;
use bech32::ToBase32;
use links_api::crypto::SerializableKey;
use links_types::app::{AddressData, PublicKey};

/// Fails with `UnsupportedEncoding` when no derivation rule exists for the pair.
pub fn check_supported(address: &AddressData, key: &PublicKey) -> Result<(), VerificationError> {
    match (address, key) {
        (AddressData::Bech32 { .. }, _)
        | (AddressData::Base58 { .. }, PublicKey::Ed25519(_))
        | (AddressData::Hex { .. }, PublicKey::Secp256k1(_)) => Ok(()),
        _ => Err(VerificationError::UnsupportedEncoding {
            encoding: address.encoding(),
            key_type: key.type_name(),
        }),
    }
}

fn secp256k1_key(key: &[u8]) -> Result<Secp256k1PublicKey, VerificationError> {
    Secp256k1PublicKey::from_bytes(key)
        .map_err(|e| VerificationError::InvalidPublicKey(e.to_string()))
}

fn ed25519_key(key: &[u8]) -> Result<Ed25519PublicKey, VerificationError> {
    Ed25519PublicKey::from_bytes(key).map_err(|e| VerificationError::InvalidPublicKey(e.to_string()))
}

/// Derives the address `key` controls, rendered in the encoding of `address`.
pub fn derive_address(address: &AddressData, key: &PublicKey) -> Result<String, VerificationError> {
    check_supported(address, key)?;
    match (address, key) {
        (AddressData::Bech32 { prefix, .. }, key) => {
            let hash: Vec<u8> = match key {
                PublicKey::Secp256k1(bytes) => {
                    ripemd160(&sha256(&secp256k1_key(bytes)?.compressed())).to_vec()
                }
                PublicKey::Ed25519(bytes) => {
                    let key = ed25519_key(bytes)?;
                    sha256(key.as_bytes()).iter().take(20).copied().collect()
                }
            };
            bech32::encode(prefix, hash.to_base32(), bech32::Variant::Bech32)
                .map_err(|e| VerificationError::InvalidAddress(format!("bech32 prefix {}: {}", prefix, e)))
        }
        (AddressData::Base58 { .. }, PublicKey::Ed25519(bytes)) => {
            let key = ed25519_key(bytes)?;
            Ok(bs58::encode(key.as_bytes()).into_string())
        }
        (AddressData::Hex { prefix, .. }, PublicKey::Secp256k1(bytes)) => {
            let uncompressed = secp256k1_key(bytes)?.uncompressed();
            let body = uncompressed.get(1..).unwrap_or_default();
            let digest = keccak256(body);
            let tail: Vec<u8> = digest.iter().skip(12).copied().collect();
            Ok(format!("{}{}", prefix, hex::encode(tail)))
        }
        _ => Err(VerificationError::UnsupportedEncoding {
            encoding: address.encoding(),
            key_type: key.type_name(),
        }),
    }
}

/// Compares a claimed address with a derived one under the rules of its encoding.
///
/// Bech32 is case-insensitive as a whole; hex compares the body case-insensitively
/// so EIP-55 checksummed addresses match; base58 is exact.
pub fn address_matches(address: &AddressData, derived: &str) -> bool {
    match address {
        AddressData::Bech32 { value, .. } => value.eq_ignore_ascii_case(derived),
        AddressData::Base58 { value } => value == derived,
        AddressData::Hex { value, prefix } => {
            match (value.strip_prefix(prefix.as_str()), derived.strip_prefix(prefix.as_str())) {
                (Some(claimed), Some(derived)) => claimed.eq_ignore_ascii_case(derived),
                _ => false,
            }
        }
    }
}
