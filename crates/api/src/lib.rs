// Path: crates/api/src/lib.rs

//! # Links API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! # Links API
//!
//! Traits at the seams of the links module: state access, the service and
//! lifecycle hooks the host chain drives, and the narrow views of the
//! collaborators the module depends on (profiles, parameters, channels).

/// Defines unified traits for cryptographic primitives.
pub mod crypto;
/// Re-exports all core error types from the central `links-types` crate.
pub mod error;
/// Traits over the cross-chain messaging transport.
pub mod ibc;
/// Defines traits for services that hook into the block processing lifecycle.
pub mod lifecycle;
/// The `LinkParams` view over module parameters.
pub mod params;
/// The `ProfileLookup` view over the profiles module.
pub mod profiles;
/// Traits for pluggable blockchain services.
pub mod services;
/// The `StateAccess` trait for key-value storage.
pub mod state;
/// Transaction execution context.
pub mod transaction;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::error::{
        ChannelError, CryptoError, ErrorCode, LinkError, StateError, TransactionError,
        VerificationError,
    };
    pub use crate::ibc::{CapabilityKeeper, ChannelKeeper, PacketModule};
    pub use crate::lifecycle::OnEndBlock;
    pub use crate::params::LinkParams;
    pub use crate::profiles::ProfileLookup;
    pub use crate::services::BlockchainService;
    pub use crate::state::StateAccess;
    pub use crate::transaction::context::TxContext;
}
