// Path: crates/types/src/codec.rs

//! Defines the canonical, deterministic binary codec for all link state.
//!
//! This module provides thin wrappers around `parity-scale-codec` (SCALE). Every
//! record written by the links module goes through these two functions so that
//! all nodes agree on the exact byte representation of the same value.

use parity_scale_codec::{Decode, DecodeAll, Encode};

/// Encodes a value into a deterministic, canonical byte representation using SCALE codec.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Result<Vec<u8>, String> {
    Ok(v.encode())
}

/// Decodes a value from a canonical byte representation using SCALE codec.
///
/// Trailing bytes are rejected, so a value decodes only from exactly the bytes
/// its own encoding produced.
pub fn from_bytes_canonical<T: Decode>(b: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*b).map_err(|e| format!("canonical decode failed: {}", e))
}
