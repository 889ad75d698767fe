// Path: crates/api/src/services/mod.rs
//! Traits for pluggable blockchain services.

use crate::ibc::PacketModule;
use crate::lifecycle::OnEndBlock;
use crate::state::StateAccess;
use crate::transaction::context::TxContext;
use async_trait::async_trait;
use links_types::config::Capabilities;
use links_types::error::TransactionError;
use std::any::Any;

/// The base trait for any service managed by the chain.
#[async_trait]
pub trait BlockchainService: Any + Send + Sync {
    /// A unique, static, lowercase string identifier for the service.
    /// This is used for deterministic sorting and for dispatching service calls.
    fn id(&self) -> &str;

    /// The version of the ABI the service expects from the host.
    fn abi_version(&self) -> u32;

    /// A string identifying the schema of the state this service reads/writes.
    fn state_schema(&self) -> &str;

    /// Returns a bitmask of the lifecycle capabilities (hooks) this service implements.
    fn capabilities(&self) -> Capabilities;

    /// Provides access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Handles a dispatched call. `method` is a versioned name such as
    /// `link_chain_account@v1` and `params` its SCALE-encoded arguments.
    ///
    /// The default implementation returns an `Unsupported` error.
    async fn handle_service_call(
        &self,
        state: &mut dyn StateAccess,
        method: &str,
        params: &[u8],
        ctx: &mut TxContext,
    ) -> Result<(), TransactionError> {
        let _ = (state, params, ctx);
        Err(TransactionError::Unsupported(format!(
            "Service '{}' does not implement the method '{}'",
            self.id(),
            method
        )))
    }

    /// Attempts to downcast this service to an `OnEndBlock` trait object.
    fn as_on_end_block(&self) -> Option<&dyn OnEndBlock> {
        None
    }

    /// Attempts to downcast this service to a `PacketModule` trait object.
    fn as_packet_module(&self) -> Option<&dyn PacketModule> {
        None
    }
}
