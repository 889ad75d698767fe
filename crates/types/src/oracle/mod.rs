// Path: crates/types/src/oracle/mod.rs

//! Packets exchanged with the oracle chain over a messaging channel.
//!
//! Packet data and acknowledgements travel as JSON with binary fields
//! hex-encoded. Anything read from the channel is size-checked against
//! [`crate::MAX_ORACLE_PAYLOAD_BYTES`] before it is parsed.

pub mod obi;

use crate::error::ChannelError;
use crate::MAX_ORACLE_PAYLOAD_BYTES;
use parity_scale_codec::{Decode, Encode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// An amount of a single denomination.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Coin {
    /// The denomination.
    pub denom: String,
    /// The amount in base units.
    pub amount: u64,
}

impl Coin {
    /// Creates a new coin.
    pub fn new(denom: impl Into<String>, amount: u64) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl core::fmt::Display for Coin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// The request packet sent to the oracle chain.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct OracleRequestPacketData {
    /// Correlation id echoed back in the response.
    pub client_id: String,
    /// The oracle script to run.
    pub oracle_script_id: u64,
    /// OBI-encoded script input.
    #[serde(with = "hex")]
    pub calldata: Vec<u8>,
    /// Validators asked to report.
    pub ask_count: u64,
    /// Reports required for a result.
    pub min_count: u64,
    /// Maximum fee paid to data sources.
    pub fee_limit: Vec<Coin>,
    /// Gas for the prepare phase.
    pub prepare_gas: u64,
    /// Gas for the execute phase.
    pub execute_gas: u64,
}

/// How an oracle request resolved.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ResolveStatus {
    /// Still collecting reports.
    #[serde(rename = "RESOLVE_STATUS_OPEN")]
    Open,
    /// A result was produced.
    #[serde(rename = "RESOLVE_STATUS_SUCCESS")]
    Success,
    /// The script failed.
    #[serde(rename = "RESOLVE_STATUS_FAILURE")]
    Failure,
    /// Not enough reports arrived in time.
    #[serde(rename = "RESOLVE_STATUS_EXPIRED")]
    Expired,
}

/// The response packet received from the oracle chain.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct OracleResponsePacketData {
    /// Correlation id from the request.
    pub client_id: String,
    /// Oracle-assigned request id.
    pub request_id: u64,
    /// Number of reports received.
    pub ans_count: u64,
    /// Request time on the oracle chain, unix seconds.
    pub request_time: i64,
    /// Resolve time on the oracle chain, unix seconds.
    pub resolve_time: i64,
    /// How the request resolved.
    pub resolve_status: ResolveStatus,
    /// OBI-encoded script output, empty unless successful.
    #[serde(with = "hex")]
    pub result: Vec<u8>,
}

/// The success payload of the oracle chain's acknowledgement of a request packet.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct OracleRequestPacketAck {
    /// The id the oracle assigned to the request.
    pub request_id: u64,
}

/// A channel acknowledgement.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Acknowledgement {
    /// The receiver processed the packet.
    Result(#[serde(with = "hex")] Vec<u8>),
    /// The receiver rejected the packet.
    Error(String),
}

impl Acknowledgement {
    /// A successful acknowledgement carrying `result`.
    pub fn success(result: Vec<u8>) -> Self {
        Self::Result(result)
    }

    /// A failed acknowledgement.
    pub fn error(reason: impl Into<String>) -> Self {
        Self::Error(reason.into())
    }

    /// Whether the acknowledgement reports success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Result(_))
    }
}

/// Serializes packet data or an acknowledgement to its JSON wire form.
pub fn encode_packet<T: Serialize>(value: &T) -> Result<Vec<u8>, ChannelError> {
    serde_json::to_vec(value).map_err(|e| ChannelError::InvalidPacketData(e.to_string()))
}

/// Parses packet data or an acknowledgement from its JSON wire form.
pub fn decode_packet<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ChannelError> {
    if bytes.len() > MAX_ORACLE_PAYLOAD_BYTES {
        return Err(ChannelError::InvalidPacketData(format!(
            "payload of {} bytes exceeds limit of {}",
            bytes.len(),
            MAX_ORACLE_PAYLOAD_BYTES
        )));
    }
    serde_json::from_slice(bytes).map_err(|e| ChannelError::InvalidPacketData(e.to_string()))
}
