// Path: crates/api/src/state/accessor.rs
//! The key-value view the links module reads and writes through.

use crate::state::StateScanIter;
use links_types::error::StateError;

/// Ledger storage as seen by one handler invocation.
///
/// The host commits or discards everything written during a call as a unit, so
/// a handler that fails part way leaves nothing behind. Within a call, writes
/// that must stay consistent with each other, such as a link record and the
/// indices pointing at it, go through a single [`StateAccess::batch_apply`].
pub trait StateAccess: Send + Sync {
    /// The value under `key`, if any.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError>;

    /// Writes one key.
    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError>;

    /// Removes one key. Removing a missing key is not an error; the expiry
    /// sweep relies on this when an index entry is already gone.
    fn delete(&mut self, key: &[u8]) -> Result<(), StateError>;

    /// Writes every pair in `updates`.
    fn batch_set(&mut self, updates: &[(Vec<u8>, Vec<u8>)]) -> Result<(), StateError>;

    /// Removes `deletes`, then writes `inserts`, as one step.
    ///
    /// A key in both lists ends up written. Link transitions use this to drop
    /// the entries of the previous version and add those of the next one
    /// without first working out which keys the two versions share.
    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError>;

    /// Every pair whose key starts with `prefix`, in ascending key order.
    /// Owner listings and the per-height expiry lookup are prefix scans.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError>;
}
