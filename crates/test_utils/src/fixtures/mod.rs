//! Deterministic accounts and proofs for link tests.

use crate::randomness::TestRng;
use links_api::crypto::{SerializableKey, SigningKeyPair};
use links_crypto::address::derive_address;
use links_crypto::error::CryptoError;
use links_crypto::sign::eddsa::{Ed25519KeyPair, Ed25519PrivateKey};
use links_crypto::sign::secp256k1::{Secp256k1KeyPair, Secp256k1PrivateKey};
use links_types::app::{AddressData, ChainConfig, ProfileRecord, Proof, PublicKey};

/// A secp256k1 account with a bech32 address.
pub struct TestAccount {
    keypair: Secp256k1KeyPair,
    /// The bech32 address of the account.
    pub address: String,
    /// The bech32 human-readable prefix.
    pub prefix: String,
}

impl TestAccount {
    /// Derives an account from `seed`; the same seed always yields the same account.
    pub fn from_seed(seed: u64, prefix: &str) -> Result<Self, CryptoError> {
        let mut secret = [0u8; 32];
        TestRng::new(seed).fill_bytes(&mut secret);
        let private = Secp256k1PrivateKey::from_bytes(&secret)?;
        let keypair = Secp256k1KeyPair::from_private_key(&private);
        let public_key = PublicKey::Secp256k1(keypair.public_key().compressed());
        let template = AddressData::Bech32 {
            value: String::new(),
            prefix: prefix.to_string(),
        };
        let address = derive_address(&template, &public_key)
            .map_err(|e| CryptoError::Encoding(e.to_string()))?;
        Ok(Self {
            keypair,
            address,
            prefix: prefix.to_string(),
        })
    }

    /// The account's public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::Secp256k1(self.keypair.public_key().compressed())
    }

    /// Signs `message` with the account key.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(self.keypair.sign(message)?.to_bytes())
    }

    /// The account's address as `AddressData`.
    pub fn address_data(&self) -> AddressData {
        AddressData::Bech32 {
            value: self.address.clone(),
            prefix: self.prefix.clone(),
        }
    }

    /// A profile owned by this account.
    pub fn profile(&self, dtag: &str) -> ProfileRecord {
        ProfileRecord {
            owner: self.address.clone(),
            dtag: dtag.to_string(),
            public_key: self.public_key(),
        }
    }

    /// A proof that this account controls its address, signing `plain_text`.
    pub fn proof(&self, plain_text: &[u8]) -> Result<Proof, CryptoError> {
        Ok(Proof {
            public_key: self.public_key(),
            signature: self.sign(plain_text)?,
            plain_text: hex::encode(plain_text),
        })
    }

    /// Address and proof binding this external account to `owner`.
    pub fn link_to(&self, owner: &str) -> Result<(AddressData, Proof), CryptoError> {
        Ok((self.address_data(), self.proof(owner.as_bytes())?))
    }
}

/// An ed25519 account with a base58 address.
pub struct SolanaAccount {
    keypair: Ed25519KeyPair,
    /// The base58 address of the account.
    pub address: String,
}

impl SolanaAccount {
    /// Derives an account from `seed`.
    pub fn from_seed(seed: u64) -> Result<Self, CryptoError> {
        let mut secret = [0u8; 32];
        TestRng::new(seed).fill_bytes(&mut secret);
        let keypair = Ed25519KeyPair::from_private_key(&Ed25519PrivateKey::from_bytes(&secret)?);
        let address = bs58::encode(keypair.public_key().to_bytes()).into_string();
        Ok(Self { keypair, address })
    }

    /// Address and proof binding this external account to `owner`.
    pub fn link_to(&self, owner: &str) -> Result<(AddressData, Proof), CryptoError> {
        let proof = Proof {
            public_key: PublicKey::Ed25519(self.keypair.public_key().to_bytes()),
            signature: self.keypair.sign(owner.as_bytes())?.to_bytes(),
            plain_text: hex::encode(owner.as_bytes()),
        };
        Ok((
            AddressData::Base58 {
                value: self.address.clone(),
            },
            proof,
        ))
    }
}

/// The chain config for `name`.
pub fn chain(name: &str) -> ChainConfig {
    ChainConfig::new(name)
}
