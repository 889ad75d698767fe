// Path: crates/crypto/src/algorithms/mod.rs
//! Cryptographic algorithm building blocks.

pub mod hash;
