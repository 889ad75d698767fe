// Path: crates/types/src/ibc.rs

//! Primitives of the cross-chain messaging transport that the links module
//! consumes. The transport itself lives outside this workspace.

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The port the links module binds.
pub const LINKS_PORT_ID: &str = "profiles";

/// The remote end of a channel.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Counterparty {
    /// Port on the counterparty chain.
    pub port_id: String,
    /// Channel on the counterparty chain.
    pub channel_id: String,
}

/// A channel as seen from this chain.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ChannelEnd {
    /// The remote end.
    pub counterparty: Counterparty,
}

/// When a sent packet stops being deliverable. A zero field is disabled.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PacketTimeout {
    /// Counterparty block height.
    pub height: u64,
    /// Counterparty timestamp, unix nanoseconds.
    pub timestamp: u64,
}

/// A packet travelling over a channel.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Packet {
    /// Send sequence on the source channel.
    pub sequence: u64,
    /// Port on the sending chain.
    pub source_port: String,
    /// Channel on the sending chain.
    pub source_channel: String,
    /// Port on the receiving chain.
    pub destination_port: String,
    /// Channel on the receiving chain.
    pub destination_channel: String,
    /// Opaque application payload.
    #[serde(with = "hex")]
    pub data: Vec<u8>,
    /// Delivery deadline.
    pub timeout: PacketTimeout,
}

/// Proof that a module owns a channel. Only the capability keeper hands these out.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Capability {
    index: u64,
}

impl Capability {
    /// Wraps a keeper-assigned index. Reserved for capability keeper implementations.
    pub fn new(index: u64) -> Self {
        Self { index }
    }

    /// The keeper-assigned index.
    pub fn index(&self) -> u64 {
        self.index
    }
}

/// The capability path guarding sends on `(port_id, channel_id)`.
pub fn channel_capability_path(port_id: &str, channel_id: &str) -> String {
    format!("capabilities/ports/{}/channels/{}", port_id, channel_id)
}
