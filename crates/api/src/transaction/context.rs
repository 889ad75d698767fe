// Path: crates/api/src/transaction/context.rs
//! Defines the stable context for transaction execution.

use links_types::events::LinkEvent;

/// Context handed to services for a single call or lifecycle hook.
#[derive(Clone, Debug, Default)]
pub struct TxContext {
    /// The current block height being processed.
    pub block_height: u64,
    /// The deterministic timestamp of the current block, in unix seconds.
    pub block_timestamp: u64,
    /// The account that signed the current transaction.
    /// This is the authoritative source for permission checks within services.
    pub signer: String,
    /// If true, the call is being simulated and its writes will be discarded.
    pub simulation: bool,
    /// If true, the call is initiated by the chain itself (e.g., end-block hook
    /// or a channel callback). For user-initiated transactions this is `false`.
    pub is_internal: bool,
    /// Events raised during execution, in order.
    pub events: Vec<LinkEvent>,
}

impl TxContext {
    /// Context for a transaction signed by `signer`.
    pub fn new(block_height: u64, block_timestamp: u64, signer: impl Into<String>) -> Self {
        Self {
            block_height,
            block_timestamp,
            signer: signer.into(),
            ..Default::default()
        }
    }

    /// Context for a call the chain makes on its own behalf.
    pub fn internal(block_height: u64, block_timestamp: u64) -> Self {
        Self {
            block_height,
            block_timestamp,
            is_internal: true,
            ..Default::default()
        }
    }

    /// Records an event.
    pub fn emit(&mut self, event: LinkEvent) {
        self.events.push(event);
    }
}
