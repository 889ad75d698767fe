// Path: crates/api/src/profiles/mod.rs

//! Defines the `ProfileLookup` trait for decoupled profile lookups.

use crate::state::StateAccess;
use links_types::app::ProfileRecord;
use links_types::error::StateError;

/// A read-only view of the profiles module.
///
/// The links module never writes profiles; it only needs to know whether an
/// owner has one and which public key the owner's account registered.
pub trait ProfileLookup: Send + Sync {
    /// Fetches the profile owned by `owner`, if any.
    fn profile(
        &self,
        state: &dyn StateAccess,
        owner: &str,
    ) -> Result<Option<ProfileRecord>, StateError>;

    /// Whether `owner` has a profile.
    fn has_profile(&self, state: &dyn StateAccess, owner: &str) -> Result<bool, StateError> {
        Ok(self.profile(state, owner)?.is_some())
    }
}
