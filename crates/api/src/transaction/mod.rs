// Path: crates/api/src/transaction/mod.rs
//! Transaction execution context.

pub mod context;
