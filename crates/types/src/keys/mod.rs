// Path: crates/types/src/keys/mod.rs
//! Defines the state key layout of the links module.
//!
//! Every key is a byte string made of a prefix followed by `/`-separated
//! components. Heights are written as big-endian `u64` so that a prefix scan
//! over a single height is exact.

/// The state key for the governance-managed `LinksParams`.
pub const LINKS_PARAMS_KEY: &[u8] = b"links_params";

/// Reverse index `chain_link/{chain}/{address} -> owner`.
pub const CHAIN_LINK_OWNER_PREFIX: &[u8] = b"chain_link/";
/// Primary record `chain_link_record/{owner}/{chain}/{address} -> ChainLink`.
pub const CHAIN_LINK_RECORD_PREFIX: &[u8] = b"chain_link_record/";
/// `default_external_address/{owner}/{chain} -> address`.
pub const DEFAULT_EXTERNAL_ADDRESS_PREFIX: &[u8] = b"default_external_address/";
/// Primary record `app_link/{owner}/{application}/{username} -> ApplicationLink`.
pub const APP_LINK_PREFIX: &[u8] = b"app_link/";
/// `app_link_by_client/{client_id} -> (owner, application, username)`.
pub const APP_LINK_CLIENT_ID_PREFIX: &[u8] = b"app_link_by_client/";
/// `app_link_expiry/{height}/{client_id} -> client_id`.
pub const APP_LINK_EXPIRY_PREFIX: &[u8] = b"app_link_expiry/";

const SEP: &[u8] = b"/";

fn join(prefix: &[u8], parts: &[&[u8]]) -> Vec<u8> {
    let mut key = prefix.to_vec();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            key.extend_from_slice(SEP);
        }
        key.extend_from_slice(part);
    }
    key
}

/// `chain_link/{chain}/{address}`.
pub fn chain_link_owner_key(chain: &str, address: &str) -> Vec<u8> {
    join(CHAIN_LINK_OWNER_PREFIX, &[chain.as_bytes(), address.as_bytes()])
}

/// `chain_link_record/{owner}/{chain}/{address}`.
pub fn chain_link_record_key(owner: &str, chain: &str, address: &str) -> Vec<u8> {
    join(
        CHAIN_LINK_RECORD_PREFIX,
        &[owner.as_bytes(), chain.as_bytes(), address.as_bytes()],
    )
}

/// Prefix over every chain link record of `owner`.
pub fn chain_link_owner_prefix(owner: &str) -> Vec<u8> {
    [CHAIN_LINK_RECORD_PREFIX, owner.as_bytes(), SEP].concat()
}

/// Prefix over the chain link records of `owner` on `chain`.
pub fn chain_link_owner_chain_prefix(owner: &str, chain: &str) -> Vec<u8> {
    [CHAIN_LINK_RECORD_PREFIX, owner.as_bytes(), SEP, chain.as_bytes(), SEP].concat()
}

/// `default_external_address/{owner}/{chain}`.
pub fn default_external_address_key(owner: &str, chain: &str) -> Vec<u8> {
    join(DEFAULT_EXTERNAL_ADDRESS_PREFIX, &[owner.as_bytes(), chain.as_bytes()])
}

/// `app_link/{owner}/{application}/{username}`.
pub fn app_link_key(owner: &str, application: &str, username: &str) -> Vec<u8> {
    join(
        APP_LINK_PREFIX,
        &[owner.as_bytes(), application.as_bytes(), username.as_bytes()],
    )
}

/// Prefix over every application link of `owner`.
pub fn app_link_owner_prefix(owner: &str) -> Vec<u8> {
    [APP_LINK_PREFIX, owner.as_bytes(), SEP].concat()
}

/// `app_link_by_client/{client_id}`.
pub fn app_link_client_id_key(client_id: &str) -> Vec<u8> {
    [APP_LINK_CLIENT_ID_PREFIX, client_id.as_bytes()].concat()
}

/// `app_link_expiry/{height}/{client_id}`.
pub fn app_link_expiry_key(height: u64, client_id: &str) -> Vec<u8> {
    join(
        APP_LINK_EXPIRY_PREFIX,
        &[&height.to_be_bytes()[..], client_id.as_bytes()],
    )
}

/// Prefix over every expiry entry at exactly `height`.
pub fn app_link_expiry_height_prefix(height: u64) -> Vec<u8> {
    [APP_LINK_EXPIRY_PREFIX, &height.to_be_bytes()[..], SEP].concat()
}
