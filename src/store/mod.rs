//! Relation store - persistence of host/entity relations
//!
//! The [`RelationStore`] trait is the only way relations are written. It owns
//! the uniqueness rule: at most one relation per `(component, area,
//! instanceid)` address.
//!
//! # Implementations
//!
//! - [`InMemoryRelationStore`]: process-local, used by tests and embedders
//! - [`JsonlRelationStore`]: the same table persisted to a JSONL file after
//!   every mutation
//!
//! Both run compound operations (upsert, bulk delete) under a single write
//! lock, so concurrent saves for one address cannot both insert.

mod jsonl;
mod memory;
mod table;

pub use jsonl::JsonlRelationStore;
pub use memory::InMemoryRelationStore;

use tracing::warn;

use crate::error::RelationResult;
use crate::types::{
    BulkDeleteReport, EntityId, HostAddress, HostKind, InstanceId, Relation, RelationDraft,
    RelationId, UpsertOutcome,
};

/// CRUD over polymorphic relation records.
///
/// Implementations must be `Send + Sync`; the handler is shared across
/// request tasks.
pub trait RelationStore: Send + Sync {
    /// The relation stored for `address`, if any
    fn find_by_address(&self, address: &HostAddress) -> RelationResult<Option<Relation>>;

    /// Create a new record and return its id.
    ///
    /// Fails with a storage error if a relation already exists for the address.
    fn insert(&self, draft: RelationDraft) -> RelationResult<RelationId>;

    /// Overwrite entity and timestamp of an existing record.
    ///
    /// Fails with `NotFound` if `relation_id` no longer exists.
    fn update(&self, relation_id: RelationId, entity_id: EntityId, time_created: i64)
        -> RelationResult<()>;

    /// Remove the relation for `address`; `Ok(false)` when there was none
    fn delete_by_address(&self, address: &HostAddress) -> RelationResult<bool>;

    /// Insert-or-update keyed by the address, as one atomic step.
    ///
    /// An update keeps the storage id; `time_created` never moves backwards and
    /// always advances past the previous value.
    fn upsert_by_address(
        &self,
        address: &HostAddress,
        entity_id: EntityId,
        time_created: i64,
    ) -> RelationResult<UpsertOutcome>;

    /// Number of distinct entity ids referenced by relations of `kind` whose
    /// instance id is in `instance_ids`
    fn distinct_entity_count(&self, kind: &HostKind, instance_ids: &[InstanceId])
        -> RelationResult<usize>;

    fn get_entity_id_for_address(&self, address: &HostAddress) -> RelationResult<Option<EntityId>> {
        Ok(self.find_by_address(address)?.map(|relation| relation.entity_id))
    }

    /// Best-effort bulk delete: one failed id does not stop the others
    fn delete_by_addresses(&self, kind: &HostKind, instance_ids: &[InstanceId]) -> BulkDeleteReport {
        let mut report = BulkDeleteReport::default();
        for &instance_id in instance_ids {
            let address = kind.address(instance_id);
            match self.delete_by_address(&address) {
                Ok(true) => report.removed += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!(%address, error = %e, "Failed to delete relation");
                    report.failed.push(instance_id);
                }
            }
        }
        report
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::StickyStore;
    use super::*;

    #[test]
    fn test_bulk_delete_continues_past_failure() {
        let store = StickyStore::new(11);
        let kind = HostKind::new("mod_booking", "option");
        for id in [10, 11, 12] {
            store.upsert_by_address(&kind.address(id), 5, 1000).unwrap();
        }

        let report = store.delete_by_addresses(&kind, &[10, 11, 12, 13]);

        assert_eq!(report.removed, 2);
        assert_eq!(report.failed, vec![11]);
        assert!(!report.succeeded());
        assert_eq!(store.get_entity_id_for_address(&kind.address(11)).unwrap(), Some(5));
        assert!(store.find_by_address(&kind.address(12)).unwrap().is_none());
    }
}
