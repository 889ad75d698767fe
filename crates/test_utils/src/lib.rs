// Path: crates/test_utils/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Links Test Utilities
//!
//! In-memory state, mock collaborators and key fixtures for testing the links
//! module without a host chain.

pub mod assertions;
pub mod fixtures;
pub mod mocks;
pub mod randomness;
pub mod state;

pub use mocks::{MockChannels, StaticProfiles};
pub use state::MemoryState;
