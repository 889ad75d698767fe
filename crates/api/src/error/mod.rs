// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use links_types::error::{
    ChannelError, ConfigError, CryptoError, ErrorCode, LinkError, StateError, TransactionError,
    VerificationError,
};
pub use links_types::Result;
