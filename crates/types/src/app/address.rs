// Path: crates/types/src/app/address.rs

//! Addresses on external ledgers and the proofs that bind them to a key holder.
//!
//! The types here carry data only. Deriving an address from a public key and
//! checking a proof's signature needs hash and curve implementations, which
//! live in `links-crypto`.

use crate::error::VerificationError;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A public key presented inside an ownership proof.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Hash)]
#[serde(tag = "type", content = "key")]
pub enum PublicKey {
    /// A SEC1-encoded secp256k1 key, either 33-byte compressed or 65-byte uncompressed.
    Secp256k1(#[serde(with = "hex")] Vec<u8>),
    /// A 32-byte Ed25519 key.
    Ed25519(#[serde(with = "hex")] Vec<u8>),
}

impl PublicKey {
    /// A short, stable name for the key algorithm.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Secp256k1(_) => "secp256k1",
            Self::Ed25519(_) => "ed25519",
        }
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Secp256k1(b) | Self::Ed25519(b) => b,
        }
    }
}

/// An address on an external ledger, tagged with the encoding it is written in.
///
/// The set of encodings is closed. Two values are equal only when both the
/// encoding and the textual value match.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Hash)]
#[serde(tag = "encoding", rename_all = "snake_case")]
pub enum AddressData {
    /// A bech32 address, e.g. `cosmos1...`, with its human-readable part.
    Bech32 {
        /// The full bech32 string.
        value: String,
        /// The expected human-readable prefix.
        prefix: String,
    },
    /// A base58 address, as used by Solana.
    Base58 {
        /// The base58 string.
        value: String,
    },
    /// A hex address, as used by EVM chains.
    Hex {
        /// The hex string including its prefix.
        value: String,
        /// The expected prefix, usually `0x`.
        prefix: String,
    },
}

impl AddressData {
    /// The textual address.
    pub fn value(&self) -> &str {
        match self {
            Self::Bech32 { value, .. } | Self::Base58 { value } | Self::Hex { value, .. } => value,
        }
    }

    /// The stable tag of the encoding.
    pub fn encoding(&self) -> &'static str {
        match self {
            Self::Bech32 { .. } => "bech32",
            Self::Base58 { .. } => "base58",
            Self::Hex { .. } => "hex",
        }
    }

    /// The form used in storage keys. Bech32 is lowercased and so is the body of
    /// a hex address; base58 is case-sensitive and left untouched.
    pub fn canonical(&self) -> Self {
        match self {
            Self::Bech32 { value, prefix } => Self::Bech32 {
                value: value.to_ascii_lowercase(),
                prefix: prefix.clone(),
            },
            Self::Base58 { .. } => self.clone(),
            Self::Hex { value, prefix } => {
                let value = match value.strip_prefix(prefix.as_str()) {
                    Some(body) => format!("{}{}", prefix, body.to_ascii_lowercase()),
                    None => value.clone(),
                };
                Self::Hex {
                    value,
                    prefix: prefix.clone(),
                }
            }
        }
    }

    /// Checks the address is not blank.
    pub fn validate(&self) -> Result<(), VerificationError> {
        if self.value().trim().is_empty() {
            return Err(VerificationError::EmptyAddress);
        }
        Ok(())
    }
}

/// Evidence that the holder of `public_key` controls an address.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Proof {
    /// The key that produced the signature.
    pub public_key: PublicKey,
    /// The raw signature over the decoded plain text.
    #[serde(with = "hex")]
    pub signature: Vec<u8>,
    /// The signed message, hex-encoded.
    pub plain_text: String,
}

impl Proof {
    /// Decodes the hex plain text into the bytes the signature covers.
    pub fn plain_text_bytes(&self) -> Result<Vec<u8>, VerificationError> {
        hex::decode(&self.plain_text)
            .map_err(|e| VerificationError::InvalidPlainText(e.to_string()))
    }

    /// Checks the proof is well formed without verifying the signature.
    pub fn validate(&self) -> Result<(), VerificationError> {
        if self.public_key.as_bytes().is_empty() {
            return Err(VerificationError::InvalidPublicKey("empty key".into()));
        }
        self.plain_text_bytes().map(|_| ())
    }
}
