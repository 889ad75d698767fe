// Path: crates/types/src/app/chain_link.rs

use super::address::{AddressData, Proof};
use crate::error::{LinkError, VerificationError};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Identifies the external ledger an address lives on.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Hash)]
pub struct ChainConfig {
    /// Lowercase chain name, e.g. `cosmos` or `ethereum`.
    pub name: String,
}

impl ChainConfig {
    /// Creates a new chain config.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The name must be non-blank, lowercase and free of key separators.
    pub fn validate(&self) -> Result<(), LinkError> {
        if self.name.trim().is_empty() {
            return Err(LinkError::InvalidChainConfig("chain name cannot be empty".into()));
        }
        if self.name.trim() != self.name || self.name.to_lowercase() != self.name {
            return Err(LinkError::InvalidChainConfig(format!(
                "chain name must be lowercase and trimmed: {}",
                self.name
            )));
        }
        if self.name.contains('/') {
            return Err(LinkError::InvalidChainConfig(format!(
                "chain name cannot contain '/': {}",
                self.name
            )));
        }
        Ok(())
    }
}

/// A verified binding between a profile and an address on another ledger.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ChainLink {
    /// The profile owner.
    pub owner: String,
    /// The linked external address.
    pub address_data: AddressData,
    /// The proof that was verified when the link was created.
    pub proof: Proof,
    /// The external ledger.
    pub chain_config: ChainConfig,
    /// Block timestamp of creation, in unix seconds.
    pub created_at: u64,
}

impl ChainLink {
    /// The chain name this link is stored under.
    pub fn chain_name(&self) -> &str {
        &self.chain_config.name
    }

    /// The external address this link is stored under.
    pub fn address(&self) -> &str {
        self.address_data.value()
    }

    /// Structural validation of the record, excluding signature verification.
    pub fn validate(&self) -> Result<(), LinkError> {
        if self.owner.trim().is_empty() {
            return Err(LinkError::ProfileNotFound(self.owner.clone()));
        }
        self.chain_config.validate()?;
        self.address_data.validate()?;
        if self.address_data != self.address_data.canonical() {
            return Err(VerificationError::InvalidAddress(format!(
                "{} is not in canonical form",
                self.address()
            ))
            .into());
        }
        self.proof.validate()?;
        Ok(())
    }
}
