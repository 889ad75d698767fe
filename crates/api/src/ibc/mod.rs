// Path: crates/api/src/ibc/mod.rs
//! Traits over the cross-chain messaging transport.
//!
//! The transport owns channels, sequences and capabilities. The links module
//! only reads them, sends packets through `ChannelKeeper`, and receives the
//! transport's callbacks through `PacketModule`.

use crate::services::BlockchainService;
use crate::state::StateAccess;
use crate::transaction::context::TxContext;
use async_trait::async_trait;
use links_types::error::{ChannelError, StateError, TransactionError};
use links_types::ibc::{Capability, ChannelEnd, Packet};
use links_types::oracle::Acknowledgement;

/// Read and send access to channels.
pub trait ChannelKeeper: Send + Sync {
    /// Looks up a channel end.
    fn get_channel(
        &self,
        state: &dyn StateAccess,
        port_id: &str,
        channel_id: &str,
    ) -> Result<Option<ChannelEnd>, StateError>;

    /// The sequence the next packet sent on the channel will carry.
    fn get_next_sequence_send(
        &self,
        state: &dyn StateAccess,
        port_id: &str,
        channel_id: &str,
    ) -> Result<Option<u64>, StateError>;

    /// Commits `packet` for relaying. `capability` must authorize its source channel.
    fn send_packet(
        &self,
        state: &mut dyn StateAccess,
        capability: &Capability,
        packet: Packet,
    ) -> Result<(), ChannelError>;
}

/// Lookup of capabilities claimed by the links module.
pub trait CapabilityKeeper: Send + Sync {
    /// Returns the capability at `path` if the module owns it.
    fn get_capability(
        &self,
        state: &dyn StateAccess,
        path: &str,
    ) -> Result<Option<Capability>, StateError>;
}

/// Callbacks the transport delivers to a module bound to a port.
#[async_trait]
pub trait PacketModule: BlockchainService {
    /// A packet arrived for the module. The returned acknowledgement is written back
    /// to the sender; a failed call must be turned into an error acknowledgement.
    async fn on_recv_packet(
        &self,
        state: &mut dyn StateAccess,
        packet: &Packet,
        ctx: &mut TxContext,
    ) -> Acknowledgement;

    /// The counterparty acknowledged a packet this module sent.
    async fn on_acknowledgement_packet(
        &self,
        state: &mut dyn StateAccess,
        packet: &Packet,
        acknowledgement: &[u8],
        ctx: &mut TxContext,
    ) -> Result<(), TransactionError>;

    /// A packet this module sent timed out.
    async fn on_timeout_packet(
        &self,
        state: &mut dyn StateAccess,
        packet: &Packet,
        ctx: &mut TxContext,
    ) -> Result<(), TransactionError>;
}
