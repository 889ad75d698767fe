// Path: crates/services/src/links/mod.rs
//! The links service: chain links proven by signature and application links
//! verified by an oracle over a cross-chain channel.

pub mod app_links;
pub mod chain_links;
pub mod params;
mod store;

#[cfg(test)]
mod tests;

use crate::links::app_links::expiry::sweep_expired;
use crate::links::app_links::store::ApplicationLinkStore;
use async_trait::async_trait;
use chain_links::ChainLinkStore;
use links_api::ibc::{CapabilityKeeper, ChannelKeeper, PacketModule};
use links_api::lifecycle::OnEndBlock;
use links_api::params::LinkParams;
use links_api::profiles::ProfileLookup;
use links_api::services::BlockchainService;
use links_api::state::StateAccess;
use links_api::transaction::context::TxContext;
use links_crypto::AddressProofVerifier;
use links_types::app::{
    AddressData, ChainConfig, ChainLink, LinkData, OracleRequestCallData, Proof,
};
use links_types::codec;
use links_types::config::Capabilities;
use links_types::error::{LinkError, StateError, TransactionError};
use links_types::events::LinkEvent;
use links_types::ibc::{Packet, PacketTimeout};
use links_types::oracle::{decode_packet, Acknowledgement, OracleRequestPacketData, OracleResponsePacketData};
use parity_scale_codec::{Decode, Encode};
use std::any::Any;
use std::sync::Arc;

/// Parameters of `link_chain_account@v1`.
#[derive(Encode, Decode, Debug, Clone)]
pub struct LinkChainAccountParams {
    /// The external address being linked.
    pub address: AddressData,
    /// Proof of control over the address.
    pub proof: Proof,
    /// The external chain.
    pub chain_config: ChainConfig,
}

/// Parameters of `unlink_chain_account@v1`.
#[derive(Encode, Decode, Debug, Clone)]
pub struct UnlinkChainAccountParams {
    /// The external chain.
    pub chain_name: String,
    /// The linked address.
    pub address: String,
}

/// Parameters of `set_default_external_address@v1`.
#[derive(Encode, Decode, Debug, Clone)]
pub struct SetDefaultExternalAddressParams {
    /// The external chain.
    pub chain_name: String,
    /// An address the signer already linked on that chain.
    pub address: String,
}

/// Parameters of `link_application@v1`.
#[derive(Encode, Decode, Debug, Clone)]
pub struct LinkApplicationParams {
    /// The application account being claimed.
    pub link_data: LinkData,
    /// Data handed to the oracle script.
    pub call_data: OracleRequestCallData,
    /// Port the request is sent from.
    pub source_port: String,
    /// Channel the request is sent on.
    pub source_channel: String,
    /// Counterparty height after which the request packet times out, zero to disable.
    pub timeout_height: u64,
    /// Counterparty time in unix nanoseconds after which the request packet times out, zero to disable.
    pub timeout_timestamp: u64,
}

/// Parameters of `unlink_application@v1`.
#[derive(Encode, Decode, Debug, Clone)]
pub struct UnlinkApplicationParams {
    /// Application name.
    pub application: String,
    /// Application username.
    pub username: String,
}

/// Parameters of the internal `delete_profile_links@v1`.
#[derive(Encode, Decode, Debug, Clone)]
pub struct DeleteProfileLinksParams {
    /// The owner whose profile was deleted.
    pub owner: String,
}

/// The links service.
pub struct LinksModule {
    profiles: Arc<dyn ProfileLookup>,
    params: Arc<dyn LinkParams>,
    channels: Arc<dyn ChannelKeeper>,
    capabilities: Arc<dyn CapabilityKeeper>,
    verifier: AddressProofVerifier,
}

impl LinksModule {
    /// Creates the service over its collaborators.
    pub fn new(
        profiles: Arc<dyn ProfileLookup>,
        params: Arc<dyn LinkParams>,
        channels: Arc<dyn ChannelKeeper>,
        capabilities: Arc<dyn CapabilityKeeper>,
    ) -> Self {
        Self {
            profiles,
            params,
            channels,
            capabilities,
            verifier: AddressProofVerifier::new(),
        }
    }

    fn require_profile(&self, state: &dyn StateAccess, owner: &str) -> Result<(), LinkError> {
        if self.profiles.has_profile(state, owner)? {
            Ok(())
        } else {
            Err(LinkError::ProfileNotFound(owner.to_string()))
        }
    }

    /// Links `address` on `chain_config` to the profile of `owner`.
    ///
    /// The proof must verify and its plain text must be the owner's address,
    /// so that a proof made for one profile cannot link the address to another.
    pub fn link_chain_account(
        &self,
        state: &mut dyn StateAccess,
        owner: &str,
        address: AddressData,
        proof: Proof,
        chain_config: ChainConfig,
        ctx: &mut TxContext,
    ) -> Result<(), LinkError> {
        self.require_profile(&*state, owner)?;
        chain_config.validate()?;
        self.verifier.verify(&address, &proof)?;
        if proof.plain_text_bytes()? != owner.as_bytes() {
            return Err(LinkError::ProofNotBound(owner.to_string()));
        }

        let link = ChainLink {
            owner: owner.to_string(),
            address_data: address.canonical(),
            proof,
            chain_config,
            created_at: ctx.block_timestamp,
        };
        link.validate()?;
        ChainLinkStore::save(state, &link, ctx)
    }

    /// Removes every chain and application link of `owner`, for when its profile is deleted.
    pub fn on_profile_deleted(
        &self,
        state: &mut dyn StateAccess,
        owner: &str,
        ctx: &mut TxContext,
    ) -> Result<(), LinkError> {
        let chain_links = ChainLinkStore::delete_all(state, owner, ctx)?;
        let app_links = ApplicationLinkStore::delete_all(state, owner)?;
        for link in &app_links {
            ctx.emit(LinkEvent::ApplicationLinkDeleted {
                owner: link.owner.clone(),
                application: link.data.application.clone(),
                username: link.data.username.clone(),
                expiration_height: link.expires_at,
            });
        }
        tracing::info!(
            target: "links",
            "removed {} chain links and {} application links of deleted profile {}",
            chain_links,
            app_links.len(),
            owner
        );
        Ok(())
    }

    /// Lists every broken cross-index invariant. Empty when the store is consistent.
    pub fn check_invariants(&self, state: &dyn StateAccess) -> Result<Vec<String>, StateError> {
        let mut broken = ChainLinkStore::check_invariants(state)?;
        broken.extend(ApplicationLinkStore::check_invariants(state)?);
        Ok(broken)
    }
}

#[async_trait]
impl BlockchainService for LinksModule {
    fn id(&self) -> &str {
        "links"
    }
    fn abi_version(&self) -> u32 {
        1
    }
    fn state_schema(&self) -> &str {
        "v1"
    }
    fn capabilities(&self) -> Capabilities {
        Capabilities::ON_END_BLOCK | Capabilities::PACKET_MODULE
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_on_end_block(&self) -> Option<&dyn OnEndBlock> {
        Some(self)
    }
    fn as_packet_module(&self) -> Option<&dyn PacketModule> {
        Some(self)
    }

    async fn handle_service_call(
        &self,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
        ctx: &mut TxContext,
    ) -> Result<(), TransactionError> {
        let signer = ctx.signer.clone();
        match method {
            "link_chain_account@v1" => {
                let p: LinkChainAccountParams = codec::from_bytes_canonical(params)?;
                self.link_chain_account(state, &signer, p.address, p.proof, p.chain_config, ctx)?;
                Ok(())
            }
            "unlink_chain_account@v1" => {
                let p: UnlinkChainAccountParams = codec::from_bytes_canonical(params)?;
                ChainLinkStore::delete(state, &signer, &p.chain_name, &p.address, ctx)?;
                Ok(())
            }
            "set_default_external_address@v1" => {
                let p: SetDefaultExternalAddressParams = codec::from_bytes_canonical(params)?;
                self.require_profile(&*state, &signer)?;
                ChainLinkStore::set_default_external_address(
                    state,
                    &signer,
                    &p.chain_name,
                    &p.address,
                    ctx,
                )?;
                Ok(())
            }
            "link_application@v1" => {
                let p: LinkApplicationParams = codec::from_bytes_canonical(params)?;
                let timeout = PacketTimeout {
                    height: p.timeout_height,
                    timestamp: p.timeout_timestamp,
                };
                self.start_application_link(
                    state,
                    &signer,
                    p.link_data,
                    p.call_data,
                    &p.source_port,
                    &p.source_channel,
                    timeout,
                    ctx,
                )?;
                Ok(())
            }
            "unlink_application@v1" => {
                let p: UnlinkApplicationParams = codec::from_bytes_canonical(params)?;
                self.unlink_application(state, &signer, &p.application, &p.username, ctx)?;
                Ok(())
            }
            "delete_profile_links@v1" => {
                if !ctx.is_internal {
                    return Err(TransactionError::Unauthorized(
                        "delete_profile_links@v1 can only be invoked by the chain".into(),
                    ));
                }
                let p: DeleteProfileLinksParams = codec::from_bytes_canonical(params)?;
                self.on_profile_deleted(state, &p.owner, ctx)?;
                Ok(())
            }
            _ => Err(TransactionError::Unsupported(format!(
                "LinksModule does not support method '{}'",
                method
            ))),
        }
    }
}

#[async_trait]
impl OnEndBlock for LinksModule {
    async fn on_end_block(
        &self,
        state: &mut dyn StateAccess,
        ctx: &mut TxContext,
    ) -> Result<(), StateError> {
        let expired = sweep_expired(state, ctx.block_height, ctx)?;
        if expired > 0 {
            tracing::info!(
                target: "links",
                "expired {} application links at height {}",
                expired,
                ctx.block_height
            );
        }
        Ok(())
    }
}

#[async_trait]
impl PacketModule for LinksModule {
    async fn on_recv_packet(
        &self,
        state: &mut dyn StateAccess,
        packet: &Packet,
        ctx: &mut TxContext,
    ) -> Acknowledgement {
        let response: OracleResponsePacketData = match decode_packet(&packet.data) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(target: "links", "undecodable oracle response: {}", e);
                return Acknowledgement::error(e.to_string());
            }
        };
        match self.on_result(state, &response, ctx) {
            Ok(()) => Acknowledgement::success(vec![1]),
            Err(e) => {
                tracing::error!(
                    target: "links",
                    "oracle response for {} rejected: {}",
                    response.client_id,
                    e
                );
                Acknowledgement::error(e.to_string())
            }
        }
    }

    async fn on_acknowledgement_packet(
        &self,
        state: &mut dyn StateAccess,
        packet: &Packet,
        acknowledgement: &[u8],
        ctx: &mut TxContext,
    ) -> Result<(), TransactionError> {
        let request: OracleRequestPacketData =
            decode_packet(&packet.data).map_err(LinkError::from)?;
        let ack: Acknowledgement = decode_packet(acknowledgement).map_err(LinkError::from)?;
        self.on_request_acknowledged(state, &request.client_id, &ack, ctx)?;
        Ok(())
    }

    async fn on_timeout_packet(
        &self,
        state: &mut dyn StateAccess,
        packet: &Packet,
        ctx: &mut TxContext,
    ) -> Result<(), TransactionError> {
        let request: OracleRequestPacketData =
            decode_packet(&packet.data).map_err(LinkError::from)?;
        self.on_request_timeout(state, &request.client_id, ctx)?;
        Ok(())
    }
}
