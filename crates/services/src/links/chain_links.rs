// Path: crates/services/src/links/chain_links.rs
//! Storage of chain links and the per-chain default external address.
//!
//! A link lives under two keys: the record keyed by owner and a reverse index
//! keyed by `(chain, address)` that enforces one owner per external address.

use super::store::{encode, load, scan, scan_raw};
use links_api::state::StateAccess;
use links_api::transaction::context::TxContext;
use links_types::app::ChainLink;
use links_types::error::{LinkError, StateError};
use links_types::events::LinkEvent;
use links_types::keys::{
    chain_link_owner_chain_prefix, chain_link_owner_key, chain_link_owner_prefix,
    chain_link_record_key, default_external_address_key, CHAIN_LINK_OWNER_PREFIX,
    CHAIN_LINK_RECORD_PREFIX, DEFAULT_EXTERNAL_ADDRESS_PREFIX,
};

/// Chain link persistence. Stateless; every call works on the given state.
pub struct ChainLinkStore;

impl ChainLinkStore {
    /// The link `owner` holds for `address` on `chain`.
    pub fn get(
        state: &dyn StateAccess,
        owner: &str,
        chain: &str,
        address: &str,
    ) -> Result<Option<ChainLink>, StateError> {
        load(state, &chain_link_record_key(owner, chain, address))
    }

    /// The owner that linked `address` on `chain`.
    pub fn owner_of(
        state: &dyn StateAccess,
        chain: &str,
        address: &str,
    ) -> Result<Option<String>, StateError> {
        load(state, &chain_link_owner_key(chain, address))
    }

    /// The link for `address` on `chain`, whoever owns it.
    pub fn get_by_address(
        state: &dyn StateAccess,
        chain: &str,
        address: &str,
    ) -> Result<Option<ChainLink>, StateError> {
        match Self::owner_of(state, chain, address)? {
            Some(owner) => Self::get(state, &owner, chain, address),
            None => Ok(None),
        }
    }

    /// Every link of `owner`, ordered by chain then address.
    pub fn owner_links(state: &dyn StateAccess, owner: &str) -> Result<Vec<ChainLink>, StateError> {
        scan(state, &chain_link_owner_prefix(owner))
    }

    /// The owner's default address on `chain`.
    pub fn default_external_address(
        state: &dyn StateAccess,
        owner: &str,
        chain: &str,
    ) -> Result<Option<String>, StateError> {
        load(state, &default_external_address_key(owner, chain))
    }

    /// Writes `link`. An address already linked by another owner is rejected.
    /// The first link an owner stores on a chain becomes the default for that chain.
    pub fn save(
        state: &mut dyn StateAccess,
        link: &ChainLink,
        ctx: &mut TxContext,
    ) -> Result<(), LinkError> {
        let chain = link.chain_name();
        let address = link.address();
        if let Some(existing) = Self::owner_of(&*state, chain, address)? {
            if existing != link.owner {
                return Err(LinkError::DuplicateChainLink {
                    chain_name: chain.to_string(),
                    address: address.to_string(),
                });
            }
        }

        let mut inserts = vec![
            (chain_link_record_key(&link.owner, chain, address), encode(link)?),
            (chain_link_owner_key(chain, address), encode(&link.owner)?),
        ];
        let becomes_default = Self::default_external_address(&*state, &link.owner, chain)?.is_none();
        if becomes_default {
            inserts.push((
                default_external_address_key(&link.owner, chain),
                encode(&address.to_string())?,
            ));
        }
        state.batch_apply(&inserts, &[])?;

        tracing::info!(
            target: "links",
            "chain link saved: owner={} chain={} address={}",
            link.owner,
            chain,
            address
        );
        ctx.emit(LinkEvent::ChainLinkSaved {
            owner: link.owner.clone(),
            chain_name: chain.to_string(),
            address: address.to_string(),
            created_at: link.created_at,
        });
        if becomes_default {
            ctx.emit(LinkEvent::DefaultExternalAddressSet {
                owner: link.owner.clone(),
                chain_name: chain.to_string(),
                address: address.to_string(),
            });
        }
        Ok(())
    }

    /// Removes the link `owner` holds for `address` on `chain`. If it was the
    /// default, the oldest remaining link on the chain takes over.
    pub fn delete(
        state: &mut dyn StateAccess,
        owner: &str,
        chain: &str,
        address: &str,
        ctx: &mut TxContext,
    ) -> Result<ChainLink, LinkError> {
        let link = Self::get(&*state, owner, chain, address)?.ok_or_else(|| {
            LinkError::ChainLinkNotFound {
                chain_name: chain.to_string(),
                address: address.to_string(),
            }
        })?;

        let mut deletes = vec![
            chain_link_record_key(owner, chain, address),
            chain_link_owner_key(chain, address),
        ];
        let mut inserts = Vec::new();
        let mut new_default = None;
        let was_default =
            Self::default_external_address(&*state, owner, chain)?.as_deref() == Some(address);
        if was_default {
            let successor = scan::<ChainLink>(&*state, &chain_link_owner_chain_prefix(owner, chain))?
                .into_iter()
                .filter(|l| l.address() != address)
                .min_by_key(|l| l.created_at);
            match successor {
                Some(next) => {
                    let next_address = next.address().to_string();
                    inserts.push((
                        default_external_address_key(owner, chain),
                        encode(&next_address)?,
                    ));
                    new_default = Some(next_address);
                }
                None => deletes.push(default_external_address_key(owner, chain)),
            }
        }
        state.batch_apply(&inserts, &deletes)?;

        tracing::info!(
            target: "links",
            "chain link deleted: owner={} chain={} address={}",
            owner,
            chain,
            address
        );
        ctx.emit(LinkEvent::ChainLinkDeleted {
            owner: owner.to_string(),
            chain_name: chain.to_string(),
            address: address.to_string(),
        });
        if let Some(next_address) = new_default {
            ctx.emit(LinkEvent::DefaultExternalAddressSet {
                owner: owner.to_string(),
                chain_name: chain.to_string(),
                address: next_address,
            });
        }
        Ok(link)
    }

    /// Makes an existing link the owner's default on its chain.
    pub fn set_default_external_address(
        state: &mut dyn StateAccess,
        owner: &str,
        chain: &str,
        address: &str,
        ctx: &mut TxContext,
    ) -> Result<(), LinkError> {
        if Self::get(&*state, owner, chain, address)?.is_none() {
            return Err(LinkError::ChainLinkNotFound {
                chain_name: chain.to_string(),
                address: address.to_string(),
            });
        }
        state.insert(
            &default_external_address_key(owner, chain),
            &encode(&address.to_string())?,
        )?;
        ctx.emit(LinkEvent::DefaultExternalAddressSet {
            owner: owner.to_string(),
            chain_name: chain.to_string(),
            address: address.to_string(),
        });
        Ok(())
    }

    /// Removes every link of `owner`. Returns how many were removed.
    pub fn delete_all(
        state: &mut dyn StateAccess,
        owner: &str,
        ctx: &mut TxContext,
    ) -> Result<usize, LinkError> {
        let links = Self::owner_links(&*state, owner)?;
        let count = links.len();
        for link in links {
            Self::delete(state, owner, link.chain_name(), link.address(), ctx)?;
        }
        Ok(count)
    }

    /// Reports every disagreement between records, the reverse index and defaults.
    pub fn check_invariants(state: &dyn StateAccess) -> Result<Vec<String>, StateError> {
        let mut broken = Vec::new();

        for link in scan::<ChainLink>(state, CHAIN_LINK_RECORD_PREFIX)? {
            let indexed = Self::owner_of(state, link.chain_name(), link.address())?;
            if indexed.as_deref() != Some(link.owner.as_str()) {
                broken.push(format!(
                    "chain link {}/{} of {} has reverse index {:?}",
                    link.chain_name(),
                    link.address(),
                    link.owner,
                    indexed
                ));
            }
        }

        for (key, value) in scan_raw(state, CHAIN_LINK_OWNER_PREFIX)? {
            let Some((chain, address)) = split_pair(&key, CHAIN_LINK_OWNER_PREFIX) else {
                broken.push(format!("malformed chain link index key {}", hex::encode(&key)));
                continue;
            };
            let owner: String = links_types::codec::from_bytes_canonical(&value)
                .map_err(StateError::Decode)?;
            if Self::get(state, &owner, &chain, &address)?.is_none() {
                broken.push(format!(
                    "reverse index {}/{} points to {} without a record",
                    chain, address, owner
                ));
            }
        }

        for (key, value) in scan_raw(state, DEFAULT_EXTERNAL_ADDRESS_PREFIX)? {
            let Some((owner, chain)) = split_pair(&key, DEFAULT_EXTERNAL_ADDRESS_PREFIX) else {
                broken.push(format!("malformed default address key {}", hex::encode(&key)));
                continue;
            };
            let address: String = links_types::codec::from_bytes_canonical(&value)
                .map_err(StateError::Decode)?;
            if Self::get(state, &owner, &chain, &address)?.is_none() {
                broken.push(format!(
                    "default address {} of {} on {} has no link",
                    address, owner, chain
                ));
            }
        }

        Ok(broken)
    }
}

fn split_pair(key: &[u8], prefix: &[u8]) -> Option<(String, String)> {
    let rest = std::str::from_utf8(key.strip_prefix(prefix)?).ok()?;
    let (a, b) = rest.split_once('/')?;
    Some((a.to_string(), b.to_string()))
}
