// Path: crates/types/src/app/profile.rs

use super::address::PublicKey;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The parts of a profile the links module reads: its owner, DTag and the
/// public key of the owner's account.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ProfileRecord {
    /// The account owning the profile.
    pub owner: String,
    /// The profile's unique handle.
    pub dtag: String,
    /// The owner account's registered public key.
    pub public_key: PublicKey,
}
