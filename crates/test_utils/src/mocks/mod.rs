// Path: crates/test_utils/src/mocks/mod.rs
//! Mock collaborators: a fixed profile directory and an in-state channel keeper.

use links_api::ibc::{CapabilityKeeper, ChannelKeeper};
use links_api::profiles::ProfileLookup;
use links_api::state::StateAccess;
use links_types::app::ProfileRecord;
use links_types::codec;
use links_types::error::{ChannelError, StateError};
use links_types::ibc::{channel_capability_path, Capability, ChannelEnd, Counterparty, Packet};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};

/// Profiles known up front, keyed by owner.
#[derive(Debug, Clone, Default)]
pub struct StaticProfiles {
    profiles: BTreeMap<String, ProfileRecord>,
}

impl StaticProfiles {
    /// An empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a profile, builder style.
    pub fn with(mut self, profile: ProfileRecord) -> Self {
        self.profiles.insert(profile.owner.clone(), profile);
        self
    }
}

impl ProfileLookup for StaticProfiles {
    fn profile(
        &self,
        _state: &dyn StateAccess,
        owner: &str,
    ) -> Result<Option<ProfileRecord>, StateError> {
        Ok(self.profiles.get(owner).cloned())
    }
}

const NEXT_SEQUENCE_PREFIX: &[u8] = b"mock_channels/next_sequence_send/";
const SENT_PACKET_PREFIX: &[u8] = b"mock_channels/packets/";

/// A channel keeper and capability keeper keeping sequences and sent packets in state.
///
/// Sent packets are written to state, so a caller's discarded transaction also
/// discards the send, as it would on a real chain.
#[derive(Debug, Default)]
pub struct MockChannels {
    channels: BTreeMap<(String, String), ChannelEnd>,
    owned: BTreeSet<String>,
    fail_sends: AtomicBool,
}

impl MockChannels {
    /// A keeper with no channels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an open channel to `counterparty_channel` on the oracle's `oracle` port,
    /// with the capability owned by the module.
    pub fn with_channel(mut self, port_id: &str, channel_id: &str, counterparty_channel: &str) -> Self {
        self.channels.insert(
            (port_id.to_string(), channel_id.to_string()),
            ChannelEnd {
                counterparty: Counterparty {
                    port_id: "oracle".to_string(),
                    channel_id: counterparty_channel.to_string(),
                },
            },
        );
        self.owned.insert(channel_capability_path(port_id, channel_id));
        self
    }

    /// Registers a channel whose capability the module does not own.
    pub fn with_foreign_channel(mut self, port_id: &str, channel_id: &str) -> Self {
        self = self.with_channel(port_id, channel_id, "channel-x");
        self.owned.remove(&channel_capability_path(port_id, channel_id));
        self
    }

    /// Makes every following `send_packet` fail.
    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    fn sequence_key(port_id: &str, channel_id: &str) -> Vec<u8> {
        [NEXT_SEQUENCE_PREFIX, port_id.as_bytes(), b"/", channel_id.as_bytes()].concat()
    }

    /// Every packet sent so far, in send order.
    pub fn sent_packets(&self, state: &dyn StateAccess) -> Result<Vec<Packet>, StateError> {
        let mut packets = Vec::new();
        for item in state.prefix_scan(SENT_PACKET_PREFIX)? {
            let (_, value) = item?;
            packets.push(codec::from_bytes_canonical(&value).map_err(StateError::Decode)?);
        }
        Ok(packets)
    }
}

impl ChannelKeeper for MockChannels {
    fn get_channel(
        &self,
        _state: &dyn StateAccess,
        port_id: &str,
        channel_id: &str,
    ) -> Result<Option<ChannelEnd>, StateError> {
        Ok(self
            .channels
            .get(&(port_id.to_string(), channel_id.to_string()))
            .cloned())
    }

    fn get_next_sequence_send(
        &self,
        state: &dyn StateAccess,
        port_id: &str,
        channel_id: &str,
    ) -> Result<Option<u64>, StateError> {
        if self.get_channel(state, port_id, channel_id)?.is_none() {
            return Ok(None);
        }
        match state.get(&Self::sequence_key(port_id, channel_id))? {
            Some(bytes) => codec::from_bytes_canonical(&bytes)
                .map(Some)
                .map_err(StateError::Decode),
            None => Ok(Some(1)),
        }
    }

    fn send_packet(
        &self,
        state: &mut dyn StateAccess,
        capability: &Capability,
        packet: Packet,
    ) -> Result<(), ChannelError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(ChannelError::PacketSend("transport unavailable".into()));
        }
        let path = channel_capability_path(&packet.source_port, &packet.source_channel);
        if !self.owned.contains(&path) || capability.index() != capability_index(&path) {
            return Err(ChannelError::CapabilityNotFound(path));
        }
        let expected = self
            .get_next_sequence_send(&*state, &packet.source_port, &packet.source_channel)
            .map_err(|e| ChannelError::PacketSend(e.to_string()))?;
        if expected != Some(packet.sequence) {
            return Err(ChannelError::PacketSend(format!(
                "packet sequence {} does not match next send sequence {:?}",
                packet.sequence, expected
            )));
        }

        let next = codec::to_bytes_canonical(&(packet.sequence + 1))
            .map_err(ChannelError::PacketSend)?;
        let record = codec::to_bytes_canonical(&packet).map_err(ChannelError::PacketSend)?;
        let packet_key = [SENT_PACKET_PREFIX, &packet.sequence.to_be_bytes()[..]].concat();
        state
            .batch_set(&[
                (Self::sequence_key(&packet.source_port, &packet.source_channel), next),
                (packet_key, record),
            ])
            .map_err(|e| ChannelError::PacketSend(e.to_string()))
    }
}

fn capability_index(path: &str) -> u64 {
    path.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64))
}

impl CapabilityKeeper for MockChannels {
    fn get_capability(
        &self,
        _state: &dyn StateAccess,
        path: &str,
    ) -> Result<Option<Capability>, StateError> {
        Ok(self
            .owned
            .contains(path)
            .then(|| Capability::new(capability_index(path))))
    }
}
