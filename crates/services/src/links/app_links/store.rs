// Path: crates/services/src/links/app_links/store.rs
//! Persistence of application links and their two secondary indices.
//!
//! Every write goes through [`ApplicationLinkStore::apply`], which derives the
//! complete set of index changes from the old and new version of a link and
//! commits them in one batch.

use crate::links::store::{encode, load, scan, scan_raw};
use links_api::state::StateAccess;
use links_types::app::ApplicationLink;
use links_types::codec;
use links_types::error::StateError;
use links_types::keys::{
    app_link_client_id_key, app_link_expiry_height_prefix, app_link_expiry_key, app_link_key,
    app_link_owner_prefix, APP_LINK_CLIENT_ID_PREFIX, APP_LINK_EXPIRY_PREFIX, APP_LINK_PREFIX,
};

/// A change to one application link.
#[derive(Debug, Clone, Copy)]
pub enum LinkDelta<'a> {
    /// Writes `next`, replacing `previous` if one was stored.
    Upsert {
        /// The stored version, if any.
        previous: Option<&'a ApplicationLink>,
        /// The version to store.
        next: &'a ApplicationLink,
    },
    /// Removes the link and everything indexing it.
    Remove(&'a ApplicationLink),
}

/// `(owner, application, username)`, the value of the client id index.
type LinkRef = (String, String, String);

fn primary_key(link: &ApplicationLink) -> Vec<u8> {
    app_link_key(&link.owner, &link.data.application, &link.data.username)
}

fn expiry_key(link: &ApplicationLink) -> Option<Vec<u8>> {
    link.is_ongoing()
        .then(|| app_link_expiry_key(link.expires_at, link.client_id()))
}

/// Application link persistence.
pub struct ApplicationLinkStore;

impl ApplicationLinkStore {
    /// The link of `owner` for `username` on `application`.
    pub fn get(
        state: &dyn StateAccess,
        owner: &str,
        application: &str,
        username: &str,
    ) -> Result<Option<ApplicationLink>, StateError> {
        load(state, &app_link_key(owner, application, username))
    }

    /// Resolves an oracle client id to its link.
    pub fn get_by_client_id(
        state: &dyn StateAccess,
        client_id: &str,
    ) -> Result<Option<ApplicationLink>, StateError> {
        match load::<LinkRef>(state, &app_link_client_id_key(client_id))? {
            Some((owner, application, username)) => Self::get(state, &owner, &application, &username),
            None => Ok(None),
        }
    }

    /// Every application link of `owner`.
    pub fn owner_links(
        state: &dyn StateAccess,
        owner: &str,
    ) -> Result<Vec<ApplicationLink>, StateError> {
        scan(state, &app_link_owner_prefix(owner))
    }

    /// Commits `delta` to the primary record, the client id index and the expiry index.
    ///
    /// The expiry entry exists only while the link is ongoing.
    pub fn apply(state: &mut dyn StateAccess, delta: LinkDelta<'_>) -> Result<(), StateError> {
        let mut inserts = Vec::new();
        let mut deletes = Vec::new();

        match delta {
            LinkDelta::Upsert { previous, next } => {
                if let Some(prev) = previous {
                    if primary_key(prev) != primary_key(next) {
                        deletes.push(primary_key(prev));
                    }
                    if prev.client_id() != next.client_id() {
                        deletes.push(app_link_client_id_key(prev.client_id()));
                    }
                    if let Some(key) = expiry_key(prev) {
                        deletes.push(key);
                    }
                }
                inserts.push((primary_key(next), encode(next)?));
                let link_ref: LinkRef = (
                    next.owner.clone(),
                    next.data.application.clone(),
                    next.data.username.clone(),
                );
                inserts.push((app_link_client_id_key(next.client_id()), encode(&link_ref)?));
                if let Some(key) = expiry_key(next) {
                    inserts.push((key, encode(&next.client_id().to_string())?));
                }
            }
            LinkDelta::Remove(link) => {
                deletes.push(primary_key(link));
                deletes.push(app_link_client_id_key(link.client_id()));
                if let Some(key) = expiry_key(link) {
                    deletes.push(key);
                }
            }
        }

        state.batch_apply(&inserts, &deletes)
    }

    /// Client ids whose verification expires at exactly `height`.
    pub fn expiring_at(state: &dyn StateAccess, height: u64) -> Result<Vec<(Vec<u8>, String)>, StateError> {
        scan_raw(state, &app_link_expiry_height_prefix(height))?
            .into_iter()
            .map(|(key, value)| {
                let client_id: String = codec::from_bytes_canonical(&value).map_err(StateError::Decode)?;
                Ok((key, client_id))
            })
            .collect()
    }

    /// Removes every application link of `owner`, returning the removed links.
    pub fn delete_all(
        state: &mut dyn StateAccess,
        owner: &str,
    ) -> Result<Vec<ApplicationLink>, StateError> {
        let links = Self::owner_links(&*state, owner)?;
        for link in &links {
            Self::apply(state, LinkDelta::Remove(link))?;
        }
        Ok(links)
    }

    /// Reports every disagreement between the primary records and the two indices.
    pub fn check_invariants(state: &dyn StateAccess) -> Result<Vec<String>, StateError> {
        let mut broken = Vec::new();

        let links: Vec<ApplicationLink> = scan(state, APP_LINK_PREFIX)?;
        for link in &links {
            match Self::get_by_client_id(state, link.client_id())? {
                Some(found) if found == *link => {}
                _ => broken.push(format!(
                    "application link {} is not reachable through its client id",
                    link.client_id()
                )),
            }
            let indexed = state
                .get(&app_link_expiry_key(link.expires_at, link.client_id()))?
                .is_some();
            if link.is_ongoing() != indexed {
                broken.push(format!(
                    "application link {} in state {} has expiry entry: {}",
                    link.client_id(),
                    link.state,
                    indexed
                ));
            }
        }

        for (key, value) in scan_raw(state, APP_LINK_CLIENT_ID_PREFIX)? {
            let (owner, application, username): LinkRef =
                codec::from_bytes_canonical(&value).map_err(StateError::Decode)?;
            if Self::get(state, &owner, &application, &username)?.is_none() {
                broken.push(format!(
                    "client id index {} points to a missing link",
                    String::from_utf8_lossy(&key)
                ));
            }
        }

        for (_, value) in scan_raw(state, APP_LINK_EXPIRY_PREFIX)? {
            let client_id: String =
                codec::from_bytes_canonical(&value).map_err(StateError::Decode)?;
            match Self::get_by_client_id(state, &client_id)? {
                Some(link) if link.is_ongoing() => {}
                _ => broken.push(format!(
                    "expiry entry for {} has no ongoing link",
                    client_id
                )),
            }
        }

        Ok(broken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use links_test_utils::MemoryState;
    use links_types::app::{
        client_id, ApplicationLinkState, LinkData, LinkResult, OracleRequest,
        OracleRequestCallData,
    };

    fn link(owner: &str, username: &str, state: ApplicationLinkState) -> ApplicationLink {
        ApplicationLink {
            owner: owner.to_string(),
            data: LinkData::new("twitter", username),
            state,
            oracle_request: OracleRequest {
                id: 0,
                script_id: 32,
                call_data: OracleRequestCallData::new("twitter", "7465737431"),
                client_id: client_id(owner, "twitter", username),
            },
            result: None,
            created_at: 1_700_000_000,
            expires_at: 600,
        }
    }

    #[test]
    fn test_upsert_maintains_indices() {
        let mut state = MemoryState::new();
        let initialized = link("desmos1a", "alice", ApplicationLinkState::Initialized);
        ApplicationLinkStore::apply(
            &mut state,
            LinkDelta::Upsert {
                previous: None,
                next: &initialized,
            },
        )
        .unwrap();
        assert_eq!(
            ApplicationLinkStore::get_by_client_id(&state, initialized.client_id()).unwrap(),
            Some(initialized.clone())
        );
        assert_eq!(ApplicationLinkStore::expiring_at(&state, 600).unwrap().len(), 1);

        let mut done = initialized.clone();
        done.state = ApplicationLinkState::VerificationError;
        done.result = Some(LinkResult::error("request failed"));
        ApplicationLinkStore::apply(
            &mut state,
            LinkDelta::Upsert {
                previous: Some(&initialized),
                next: &done,
            },
        )
        .unwrap();
        assert!(ApplicationLinkStore::expiring_at(&state, 600).unwrap().is_empty());
        assert!(ApplicationLinkStore::check_invariants(&state).unwrap().is_empty());
    }

    #[test]
    fn test_remove_clears_everything() {
        let mut state = MemoryState::new();
        let l = link("desmos1a", "alice", ApplicationLinkState::VerificationStarted);
        ApplicationLinkStore::apply(&mut state, LinkDelta::Upsert { previous: None, next: &l }).unwrap();
        ApplicationLinkStore::apply(&mut state, LinkDelta::Remove(&l)).unwrap();
        assert!(state.is_empty());
    }

    #[test]
    fn test_delete_all_only_touches_owner() {
        let mut state = MemoryState::new();
        let a = link("desmos1a", "alice", ApplicationLinkState::Initialized);
        let b = link("desmos1ab", "bob", ApplicationLinkState::Initialized);
        for l in [&a, &b] {
            ApplicationLinkStore::apply(&mut state, LinkDelta::Upsert { previous: None, next: l }).unwrap();
        }
        let removed = ApplicationLinkStore::delete_all(&mut state, "desmos1a").unwrap();
        assert_eq!(removed, vec![a]);
        assert_eq!(ApplicationLinkStore::owner_links(&state, "desmos1ab").unwrap(), vec![b]);
        assert!(ApplicationLinkStore::check_invariants(&state).unwrap().is_empty());
    }

    #[test]
    fn test_invariants_detect_stray_expiry_entry() {
        let mut state = MemoryState::new();
        state
            .insert(
                &app_link_expiry_key(10, "desmos1a-twitter-ghost"),
                &encode(&"desmos1a-twitter-ghost".to_string()).unwrap(),
            )
            .unwrap();
        let broken = ApplicationLinkStore::check_invariants(&state).unwrap();
        assert_eq!(broken.len(), 1);
    }
}
