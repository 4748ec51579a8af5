//! In-memory relation store

use parking_lot::RwLock;

use super::table::RelationTable;
use super::RelationStore;
use crate::error::RelationResult;
use crate::types::{
    BulkDeleteReport, EntityId, HostAddress, HostKind, InstanceId, Relation, RelationDraft,
    RelationId, UpsertOutcome,
};

/// Process-local relation store.
///
/// # Example
/// ```
/// use entity_relations::store::{InMemoryRelationStore, RelationStore};
/// use entity_relations::types::HostAddress;
///
/// let store = InMemoryRelationStore::new();
/// let address = HostAddress::new("mod_booking", "option", 42);
/// store.upsert_by_address(&address, 5, 1_700_000_000).unwrap();
/// assert_eq!(store.get_entity_id_for_address(&address).unwrap(), Some(5));
/// ```
#[derive(Default)]
pub struct InMemoryRelationStore {
    table: RwLock<RelationTable>,
}

impl InMemoryRelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing rows (duplicate addresses collapse to the newest)
    pub fn with_relations(relations: impl IntoIterator<Item = Relation>) -> Self {
        let (table, _) = RelationTable::from_rows(relations);
        Self {
            table: RwLock::new(table),
        }
    }

    /// Snapshot of all rows ordered by id
    pub fn relations(&self) -> Vec<Relation> {
        self.table.read().rows().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RelationStore for InMemoryRelationStore {
    fn find_by_address(&self, address: &HostAddress) -> RelationResult<Option<Relation>> {
        Ok(self.table.read().find(address).cloned())
    }

    fn insert(&self, draft: RelationDraft) -> RelationResult<RelationId> {
        self.table.write().insert(draft)
    }

    fn update(
        &self,
        relation_id: RelationId,
        entity_id: EntityId,
        time_created: i64,
    ) -> RelationResult<()> {
        self.table.write().update(relation_id, entity_id, time_created)
    }

    fn delete_by_address(&self, address: &HostAddress) -> RelationResult<bool> {
        Ok(self.table.write().delete(address))
    }

    fn upsert_by_address(
        &self,
        address: &HostAddress,
        entity_id: EntityId,
        time_created: i64,
    ) -> RelationResult<UpsertOutcome> {
        self.table.write().upsert(address, entity_id, time_created)
    }

    fn distinct_entity_count(
        &self,
        kind: &HostKind,
        instance_ids: &[InstanceId],
    ) -> RelationResult<usize> {
        Ok(self.table.read().distinct_entity_count(kind, instance_ids))
    }

    fn delete_by_addresses(&self, kind: &HostKind, instance_ids: &[InstanceId]) -> BulkDeleteReport {
        let mut table = self.table.write();
        let removed = instance_ids
            .iter()
            .filter(|&&instance_id| table.delete(&kind.address(instance_id)))
            .count();
        BulkDeleteReport {
            removed,
            failed: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelationError;
    use std::sync::Arc;
    use std::thread;

    fn option(instance_id: InstanceId) -> HostAddress {
        HostAddress::new("mod_booking", "option", instance_id)
    }

    #[test]
    fn test_insert_and_find() {
        let store = InMemoryRelationStore::new();
        let id = store
            .insert(RelationDraft::new(option(42), 5, 1000))
            .unwrap();

        let found = store.find_by_address(&option(42)).unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.entity_id, 5);
        assert!(store.find_by_address(&option(43)).unwrap().is_none());
    }

    #[test]
    fn test_insert_rejects_duplicate_address() {
        let store = InMemoryRelationStore::new();
        store.insert(RelationDraft::new(option(42), 5, 1000)).unwrap();

        let err = store
            .insert(RelationDraft::new(option(42), 9, 1001))
            .unwrap_err();
        assert!(err.is_storage());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_missing_relation() {
        let store = InMemoryRelationStore::new();
        let err = store.update(99, 5, 1000).unwrap_err();
        assert!(matches!(err, RelationError::NotFound(_)));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = InMemoryRelationStore::new();
        store.upsert_by_address(&option(42), 5, 1000).unwrap();

        assert!(store.delete_by_address(&option(42)).unwrap());
        assert!(!store.delete_by_address(&option(42)).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_addresses_differ_by_area() {
        let store = InMemoryRelationStore::new();
        let date = HostAddress::new("mod_booking", "optiondate", 42);
        store.upsert_by_address(&option(42), 5, 1000).unwrap();
        store.upsert_by_address(&date, 7, 1000).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get_entity_id_for_address(&date).unwrap(), Some(7));
    }

    #[test]
    fn test_bulk_delete_counts_removed() {
        let store = InMemoryRelationStore::new();
        for id in [10, 11, 12] {
            store.upsert_by_address(&option(id), 5, 1000).unwrap();
        }
        let kind = HostKind::new("mod_booking", "option");

        let report = store.delete_by_addresses(&kind, &[10, 11, 12, 13]);
        assert_eq!(report.removed, 3);
        assert!(report.succeeded());

        let again = store.delete_by_addresses(&kind, &[10, 11, 12]);
        assert_eq!(again.removed, 0);
        assert!(again.succeeded());
    }

    #[test]
    fn test_distinct_entity_count() {
        let store = InMemoryRelationStore::new();
        let kind = HostKind::new("mod_booking", "optiondate");
        store.upsert_by_address(&kind.address(1), 5, 1000).unwrap();
        store.upsert_by_address(&kind.address(2), 5, 1000).unwrap();
        store.upsert_by_address(&kind.address(3), 7, 1000).unwrap();

        assert_eq!(store.distinct_entity_count(&kind, &[1, 2, 3]).unwrap(), 2);
        assert_eq!(store.distinct_entity_count(&kind, &[1, 2]).unwrap(), 1);
        assert_eq!(store.distinct_entity_count(&kind, &[4]).unwrap(), 0);
    }

    #[test]
    fn test_concurrent_upserts_keep_one_row() {
        let store = Arc::new(InMemoryRelationStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                thread::spawn(move || {
                    for n in 0..50 {
                        store.upsert_by_address(&option(42), i * 100 + n, 1000).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 1);
    }
}
