// Path: crates/crypto/src/lib.rs
//! # Links Crypto Crate Lints
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
        clippy::indexing_slicing
    )
)]
//! # Links Cryptography
//!
//! Signature schemes, hash functions and address derivation used to verify
//! that a profile owner controls an address on another ledger.

pub mod address;
pub mod algorithms;
pub mod error;
pub mod proof;
pub mod sign;

pub use proof::AddressProofVerifier;
