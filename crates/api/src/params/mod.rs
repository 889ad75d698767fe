// Path: crates/api/src/params/mod.rs
//! Defines the `LinkParams` trait, a read-only view of the module parameters.

use crate::state::StateAccess;
use links_types::config::LinksParams;
use links_types::error::StateError;

/// Supplies the parameters in force for the current call.
pub trait LinkParams: Send + Sync {
    /// Returns the current parameters.
    fn links_params(&self, state: &dyn StateAccess) -> Result<LinksParams, StateError>;
}

/// Fixed parameters, independent of state.
impl LinkParams for LinksParams {
    fn links_params(&self, _state: &dyn StateAccess) -> Result<LinksParams, StateError> {
        Ok(self.clone())
    }
}
