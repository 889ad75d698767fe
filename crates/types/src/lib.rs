// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Links Types
//!
//! This crate is the foundational library for profile identity links, containing
//! the link records, the oracle wire types, error enums and configuration objects.
//!
//! ## Architectural Role
//!
//! As the base crate, `links-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. This structure prevents
//! circular dependencies and provides a stable, canonical definition for shared
//! types like `ChainLink`, `ApplicationLink` and the various error enums.

/// The maximum size in bytes for an oracle payload accepted from the channel.
pub const MAX_ORACLE_PAYLOAD_BYTES: usize = 64 * 1024; // 64 KiB

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::LinkError> = std::result::Result<T, E>;

/// Link records, addresses, proofs and profile views.
pub mod app;
/// The canonical, deterministic binary codec for consensus-critical state.
pub mod codec;
/// Module parameters and service capability flags.
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
/// Events emitted for indexers when links change.
pub mod events;
/// Channel primitives consumed from the cross-chain transport.
pub mod ibc;
/// Constants and builders for the state keys used by the links module.
pub mod keys;
/// Oracle packet types and the oracle binary interface (OBI) codec.
pub mod oracle;
