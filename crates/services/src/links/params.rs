// Path: crates/services/src/links/params.rs
//! Parameters read from state, as written by governance.

use super::store::{encode, load};
use links_api::params::LinkParams;
use links_api::state::StateAccess;
use links_types::config::LinksParams;
use links_types::error::{StateError, TransactionError};
use links_types::keys::LINKS_PARAMS_KEY;

/// Reads `LinksParams` from [`LINKS_PARAMS_KEY`], falling back to fixed
/// parameters when none were stored.
#[derive(Debug, Clone, Default)]
pub struct StoredLinkParams {
    fallback: LinksParams,
}

impl StoredLinkParams {
    /// Uses `fallback` while the key is unset.
    pub fn new(fallback: LinksParams) -> Self {
        Self { fallback }
    }

    /// Validates and stores `params`.
    pub fn store(state: &mut dyn StateAccess, params: &LinksParams) -> Result<(), TransactionError> {
        params.validate()?;
        state.insert(LINKS_PARAMS_KEY, &encode(params)?)?;
        tracing::info!(target: "links", "links params updated: {:?}", params);
        Ok(())
    }
}

impl LinkParams for StoredLinkParams {
    fn links_params(&self, state: &dyn StateAccess) -> Result<LinksParams, StateError> {
        Ok(load(state, LINKS_PARAMS_KEY)?.unwrap_or_else(|| self.fallback.clone()))
    }
}
