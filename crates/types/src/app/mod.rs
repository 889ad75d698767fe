// Path: crates/types/src/app/mod.rs
//! Core application-level data structures for profile identity links.

/// External address formats, public keys and ownership proofs.
pub mod address;
/// Oracle-verified links to third-party application accounts.
pub mod app_link;
/// Signature-verified links to addresses on other ledgers.
pub mod chain_link;
/// The read-only view of a profile consumed from the profiles module.
pub mod profile;

pub use address::*;
pub use app_link::*;
pub use chain_link::*;
pub use profile::*;
