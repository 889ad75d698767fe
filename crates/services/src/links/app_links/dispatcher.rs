// Path: crates/services/src/links/app_links/dispatcher.rs
//! Builds oracle request packets and hands them to the channel layer.

use links_api::ibc::{CapabilityKeeper, ChannelKeeper};
use links_api::state::StateAccess;
use links_types::app::OracleRequest;
use links_types::config::OracleParams;
use links_types::error::{ChannelError, LinkError};
use links_types::ibc::{channel_capability_path, Packet, PacketTimeout};
use links_types::oracle::obi::{self, OracleScriptCallData};
use links_types::oracle::{encode_packet, OracleRequestPacketData};

/// Sends oracle requests over a channel the module owns.
pub struct OracleRequestDispatcher<'a> {
    channels: &'a dyn ChannelKeeper,
    capabilities: &'a dyn CapabilityKeeper,
}

impl<'a> OracleRequestDispatcher<'a> {
    /// Creates a dispatcher over the given keepers.
    pub fn new(channels: &'a dyn ChannelKeeper, capabilities: &'a dyn CapabilityKeeper) -> Self {
        Self {
            channels,
            capabilities,
        }
    }

    /// Sends `request` on `(port_id, channel_id)`, returning the packet sequence.
    pub fn dispatch(
        &self,
        state: &mut dyn StateAccess,
        params: &OracleParams,
        port_id: &str,
        channel_id: &str,
        request: &OracleRequest,
        timeout: PacketTimeout,
    ) -> Result<u64, LinkError> {
        let channel = self
            .channels
            .get_channel(&*state, port_id, channel_id)?
            .ok_or_else(|| ChannelError::ChannelNotFound {
                port_id: port_id.to_string(),
                channel_id: channel_id.to_string(),
            })?;

        let sequence = self
            .channels
            .get_next_sequence_send(&*state, port_id, channel_id)?
            .ok_or_else(|| ChannelError::SequenceNotFound {
                port_id: port_id.to_string(),
                channel_id: channel_id.to_string(),
            })?;

        let path = channel_capability_path(port_id, channel_id);
        let capability = self
            .capabilities
            .get_capability(&*state, &path)?
            .ok_or(ChannelError::CapabilityNotFound(path))?;

        let calldata = obi::encode(&OracleScriptCallData {
            application: request.call_data.application.to_lowercase(),
            call_data: request.call_data.call_data.clone(),
        });
        let packet_data = OracleRequestPacketData {
            client_id: request.client_id.clone(),
            oracle_script_id: request.script_id,
            calldata,
            ask_count: params.ask_count,
            min_count: params.min_count,
            fee_limit: params.fee_limit.clone(),
            prepare_gas: params.prepare_gas,
            execute_gas: params.execute_gas,
        };

        let packet = Packet {
            sequence,
            source_port: port_id.to_string(),
            source_channel: channel_id.to_string(),
            destination_port: channel.counterparty.port_id,
            destination_channel: channel.counterparty.channel_id,
            data: encode_packet(&packet_data)?,
            timeout,
        };
        self.channels.send_packet(state, &capability, packet)?;

        tracing::debug!(
            target: "links",
            "oracle request {} sent on {}/{} with sequence {}",
            request.client_id,
            port_id,
            channel_id,
            sequence
        );
        Ok(sequence)
    }
}
