// Path: crates/services/src/links/app_links/expiry.rs
//! End-block expiration of unfinished verifications.

use super::store::ApplicationLinkStore;
use crate::links::LinksModule;
use links_api::state::StateAccess;
use links_api::transaction::context::TxContext;
use links_types::app::{ApplicationLink, ApplicationLinkState};
use links_types::error::StateError;

/// Expires every ongoing link whose expiration height is exactly `height`.
///
/// Each index entry at `height` is consumed whether or not its link still exists.
/// Returns the number of links moved to `VerificationExpired`.
pub fn sweep_expired(
    state: &mut dyn StateAccess,
    height: u64,
    ctx: &mut TxContext,
) -> Result<usize, StateError> {
    let mut expired = 0;
    for (key, client_id) in ApplicationLinkStore::expiring_at(&*state, height)? {
        match ApplicationLinkStore::get_by_client_id(&*state, &client_id)? {
            Some(link) if link.is_ongoing() && link.expires_at == height => {
                let next = ApplicationLink {
                    state: ApplicationLinkState::VerificationExpired,
                    ..link.clone()
                };
                LinksModule::transition(state, &link, &next, ctx)?;
                expired += 1;
            }
            _ => {
                tracing::debug!(target: "links", "dropping stale expiry entry for {}", client_id);
            }
        }
        // No-op for entries the transition already removed.
        state.delete(&key)?;
    }
    Ok(expired)
}
