// Path: crates/crypto/src/error.rs
//! Local error types for the `links-crypto` crate.

// Re-export the canonical error types from the API crate.
pub use links_api::error::{CryptoError, VerificationError};
