// Path: crates/services/src/links/store.rs
//! Typed reads and writes over raw state.

use links_api::state::StateAccess;
use links_types::codec;
use links_types::error::StateError;
use parity_scale_codec::{Decode, Encode};

/// Reads and decodes the value at `key`.
pub(crate) fn load<T: Decode>(state: &dyn StateAccess, key: &[u8]) -> Result<Option<T>, StateError> {
    match state.get(key)? {
        Some(bytes) => codec::from_bytes_canonical(&bytes)
            .map(Some)
            .map_err(StateError::Decode),
        None => Ok(None),
    }
}

/// Encodes a value for storage.
pub(crate) fn encode<T: Encode>(value: &T) -> Result<Vec<u8>, StateError> {
    codec::to_bytes_canonical(value).map_err(StateError::InvalidValue)
}

/// Decodes every value under `prefix`, in key order.
pub(crate) fn scan<T: Decode>(state: &dyn StateAccess, prefix: &[u8]) -> Result<Vec<T>, StateError> {
    let mut out = Vec::new();
    for item in state.prefix_scan(prefix)? {
        let (_, value) = item?;
        out.push(codec::from_bytes_canonical(&value).map_err(StateError::Decode)?);
    }
    Ok(out)
}

/// Collects the raw entries under `prefix` so the state can be mutated while walking them.
pub(crate) fn scan_raw(
    state: &dyn StateAccess,
    prefix: &[u8],
) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StateError> {
    state
        .prefix_scan(prefix)?
        .map(|item| item.map(|(k, v)| (k.to_vec(), v.to_vec())))
        .collect()
}
