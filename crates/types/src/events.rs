// Path: crates/types/src/events.rs

use crate::app::ApplicationLinkState;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// An event emitted whenever a link is written or removed.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinkEvent {
    /// A chain link was created.
    ChainLinkSaved {
        /// Profile owner.
        owner: String,
        /// External chain name.
        chain_name: String,
        /// External address.
        address: String,
        /// Creation time, unix seconds.
        created_at: u64,
    },
    /// A chain link was removed.
    ChainLinkDeleted {
        /// Profile owner.
        owner: String,
        /// External chain name.
        chain_name: String,
        /// External address.
        address: String,
    },
    /// The owner's default address on a chain changed.
    DefaultExternalAddressSet {
        /// Profile owner.
        owner: String,
        /// External chain name.
        chain_name: String,
        /// The new default address.
        address: String,
    },
    /// An oracle request was sent and the application link recorded.
    ApplicationLinkCreated {
        /// Profile owner.
        owner: String,
        /// Application name.
        application: String,
        /// Application username.
        username: String,
        /// Oracle correlation id.
        client_id: String,
        /// Creation time, unix seconds.
        creation_time: u64,
        /// Height at which the verification expires.
        expiration_height: u64,
    },
    /// An application link changed state.
    ApplicationLinkSaved {
        /// Profile owner.
        owner: String,
        /// Application name.
        application: String,
        /// Application username.
        username: String,
        /// The new state.
        state: ApplicationLinkState,
    },
    /// An application link was removed.
    ApplicationLinkDeleted {
        /// Profile owner.
        owner: String,
        /// Application name.
        application: String,
        /// Application username.
        username: String,
        /// The expiration height the link had.
        expiration_height: u64,
    },
}
