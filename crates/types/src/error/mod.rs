// Path: crates/types/src/error/mod.rs
//! Core error types for the links module.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors related to the key-value state.
#[derive(Error, Debug)]
pub enum StateError {
    /// The requested key was not found in the state.
    #[error("Key not found in state")]
    KeyNotFound,
    /// The stored value could not be interpreted.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    /// An error occurred during state deserialization.
    #[error("Decode error: {0}")]
    Decode(String),
    /// An error occurred in the state backend.
    #[error("State backend error: {0}")]
    Backend(String),
    /// An error occurred while writing to the state.
    #[error("State write error: {0}")]
    WriteError(String),
}

impl ErrorCode for StateError {
    fn code(&self) -> &'static str {
        match self {
            Self::KeyNotFound => "STATE_KEY_NOT_FOUND",
            Self::InvalidValue(_) => "STATE_INVALID_VALUE",
            Self::Decode(_) => "STATE_DECODE_ERROR",
            Self::Backend(_) => "STATE_BACKEND_ERROR",
            Self::WriteError(_) => "STATE_WRITE_ERROR",
        }
    }
}

/// Errors raised by the signature and hashing primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The signature did not verify under the given key.
    #[error("Signature verification failed")]
    VerificationFailed,
    /// The key bytes could not be parsed.
    #[error("Invalid cryptographic key: {0}")]
    InvalidKey(String),
    /// The signature bytes could not be parsed.
    #[error("Invalid signature format: {0}")]
    InvalidSignature(String),
    /// An address could not be encoded.
    #[error("Address encoding failed: {0}")]
    Encoding(String),
    /// The operation is not defined for the given key type or parameter.
    #[error("Unsupported cryptographic operation or parameter: {0}")]
    Unsupported(String),
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::VerificationFailed => "CRYPTO_VERIFICATION_FAILED",
            Self::InvalidKey(_) => "CRYPTO_INVALID_KEY",
            Self::InvalidSignature(_) => "CRYPTO_INVALID_SIGNATURE",
            Self::Encoding(_) => "CRYPTO_ENCODING_FAILED",
            Self::Unsupported(_) => "CRYPTO_UNSUPPORTED",
        }
    }
}

/// Errors produced while verifying an address ownership proof.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// The address value is empty or blank.
    #[error("Address value cannot be empty or blank")]
    EmptyAddress,
    /// No derivation rule exists for this encoding and key type.
    #[error("Unsupported address encoding '{encoding}' for {key_type} public keys")]
    UnsupportedEncoding {
        /// The encoding tag of the address.
        encoding: &'static str,
        /// The type of the public key in the proof.
        key_type: &'static str,
    },
    /// The address or its declared prefix is malformed.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    /// The public key in the proof is malformed.
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
    /// The plain text of the proof is not valid hex.
    #[error("Invalid plain text: {0}")]
    InvalidPlainText(String),
    /// The address derived from the public key differs from the claimed address.
    #[error("Address mismatch: expected {expected}, derived {derived}")]
    AddressMismatch {
        /// The address claimed by the caller.
        expected: String,
        /// The address derived from the proof's public key.
        derived: String,
    },
    /// The signature does not verify over the plain text.
    #[error("Invalid proof signature")]
    InvalidSignature,
}

impl ErrorCode for VerificationError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyAddress => "PROOF_EMPTY_ADDRESS",
            Self::UnsupportedEncoding { .. } => "PROOF_UNSUPPORTED_ENCODING",
            Self::InvalidAddress(_) => "PROOF_INVALID_ADDRESS",
            Self::InvalidPublicKey(_) => "PROOF_INVALID_PUBLIC_KEY",
            Self::InvalidPlainText(_) => "PROOF_INVALID_PLAIN_TEXT",
            Self::AddressMismatch { .. } => "PROOF_ADDRESS_MISMATCH",
            Self::InvalidSignature => "PROOF_INVALID_SIGNATURE",
        }
    }
}

/// Errors raised while sending or interpreting packets on a messaging channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The source channel does not exist.
    #[error("Channel not found: port ID ({port_id}) channel ID ({channel_id})")]
    ChannelNotFound {
        /// The source port.
        port_id: String,
        /// The source channel.
        channel_id: String,
    },
    /// The channel has no next send sequence.
    #[error("Next send sequence not found: port ID ({port_id}) channel ID ({channel_id})")]
    SequenceNotFound {
        /// The source port.
        port_id: String,
        /// The source channel.
        channel_id: String,
    },
    /// The module does not own the channel capability.
    #[error("Module does not own channel capability at {0}")]
    CapabilityNotFound(String),
    /// The transport refused the packet.
    #[error("Packet send failed: {0}")]
    PacketSend(String),
    /// A packet or acknowledgement could not be decoded.
    #[error("Invalid packet data: {0}")]
    InvalidPacketData(String),
}

impl ErrorCode for ChannelError {
    fn code(&self) -> &'static str {
        match self {
            Self::ChannelNotFound { .. } => "CHANNEL_NOT_FOUND",
            Self::SequenceNotFound { .. } => "CHANNEL_SEQUENCE_NOT_FOUND",
            Self::CapabilityNotFound(_) => "CHANNEL_CAPABILITY_NOT_FOUND",
            Self::PacketSend(_) => "CHANNEL_PACKET_SEND_FAILED",
            Self::InvalidPacketData(_) => "CHANNEL_INVALID_PACKET_DATA",
        }
    }
}

/// Errors returned synchronously by chain-link and application-link operations.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The address ownership proof did not verify.
    #[error("Proof verification failed: {0}")]
    Verification(#[from] VerificationError),
    /// The owner has no profile.
    #[error("Profile not found for {0}")]
    ProfileNotFound(String),
    /// The chain configuration is invalid.
    #[error("Invalid chain config: {0}")]
    InvalidChainConfig(String),
    /// The application link data is invalid.
    #[error("Invalid link data: {0}")]
    InvalidLinkData(String),
    /// The proof's plain text does not name the profile owner.
    #[error("Proof plain text is not bound to owner {0}")]
    ProofNotBound(String),
    /// The external address is already linked to another profile.
    #[error("Chain link for {address} on {chain_name} already exists for another owner")]
    DuplicateChainLink {
        /// The chain name.
        chain_name: String,
        /// The external address.
        address: String,
    },
    /// The chain link does not exist or belongs to someone else.
    #[error("Chain link not found: {address} on {chain_name}")]
    ChainLinkNotFound {
        /// The chain name.
        chain_name: String,
        /// The external address.
        address: String,
    },
    /// A verification for the same application account is still in flight.
    #[error("Verification already in progress for {application} account {username}")]
    OngoingVerification {
        /// The application name.
        application: String,
        /// The application username.
        username: String,
    },
    /// The application link does not exist.
    #[error("Application link not found: {application} account {username}")]
    ApplicationLinkNotFound {
        /// The application name.
        application: String,
        /// The application username.
        username: String,
    },
    /// The oracle request could not be dispatched.
    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] ChannelError),
    /// The oracle returned a payload that violates the protocol.
    #[error("Malformed oracle result: {0}")]
    MalformedResult(String),
    /// An error occurred while accessing the state.
    #[error("State error: {0}")]
    State(#[from] StateError),
}

impl ErrorCode for LinkError {
    fn code(&self) -> &'static str {
        match self {
            Self::Verification(_) => "LINK_PROOF_VERIFICATION_FAILED",
            Self::ProfileNotFound(_) => "LINK_PROFILE_NOT_FOUND",
            Self::InvalidChainConfig(_) => "LINK_INVALID_CHAIN_CONFIG",
            Self::InvalidLinkData(_) => "LINK_INVALID_LINK_DATA",
            Self::ProofNotBound(_) => "LINK_PROOF_NOT_BOUND",
            Self::DuplicateChainLink { .. } => "LINK_DUPLICATE_CHAIN_LINK",
            Self::ChainLinkNotFound { .. } => "LINK_CHAIN_LINK_NOT_FOUND",
            Self::OngoingVerification { .. } => "LINK_ONGOING_VERIFICATION",
            Self::ApplicationLinkNotFound { .. } => "LINK_APPLICATION_LINK_NOT_FOUND",
            Self::Dispatch(_) => "LINK_DISPATCH_FAILED",
            Self::MalformedResult(_) => "LINK_MALFORMED_RESULT",
            Self::State(_) => "LINK_STATE_ERROR",
        }
    }
}

/// Errors surfaced by a dispatched service call.
#[derive(Error, Debug)]
pub enum TransactionError {
    /// The call parameters could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The call parameters could not be decoded.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    /// The method is not exposed by the service.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
    /// The caller is not allowed to invoke the method.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// A link operation failed.
    #[error("Link error: {0}")]
    Link(#[from] LinkError),
    /// An error occurred while accessing the state.
    #[error("State error: {0}")]
    State(#[from] StateError),
    /// Parameters submitted to the module are invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl From<String> for TransactionError {
    fn from(s: String) -> Self {
        TransactionError::Deserialization(s)
    }
}

impl ErrorCode for TransactionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Serialization(_) => "TX_SERIALIZATION_ERROR",
            Self::Deserialization(_) => "TX_DESERIALIZATION_ERROR",
            Self::Unsupported(_) => "TX_UNSUPPORTED",
            Self::Unauthorized(_) => "TX_UNAUTHORIZED",
            Self::Link(e) => e.code(),
            Self::State(_) => "TX_STATE_ERROR",
            Self::Config(e) => e.code(),
        }
    }
}

/// Errors raised while loading module parameters.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration text could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
    /// A parameter is out of range.
    #[error("Invalid parameter: {0}")]
    Invalid(String),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "CONFIG_PARSE_ERROR",
            Self::Invalid(_) => "CONFIG_INVALID",
        }
    }
}
