//! Relation store persisted to a JSONL file
//!
//! One relation per line. The whole file is rewritten atomically after every
//! mutation while the write lock is held, so the file and the in-memory
//! table never disagree about a completed operation.

use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::table::RelationTable;
use super::RelationStore;
use crate::error::RelationResult;
use crate::types::{
    BulkDeleteReport, EntityId, HostAddress, HostKind, InstanceId, Relation, RelationDraft,
    RelationId, UpsertOutcome,
};
use crate::utils::{atomic_write_with, read_jsonl};

/// File-backed relation store
pub struct JsonlRelationStore {
    path: PathBuf,
    table: RwLock<RelationTable>,
}

impl JsonlRelationStore {
    /// Open the store at `path`, loading existing relations (or starting empty)
    pub fn open<P: AsRef<Path>>(path: P) -> RelationResult<Self> {
        let path = path.as_ref().to_path_buf();
        let table = Self::load_table(&path)?;
        info!(path = %path.display(), relations = table.len(), "Opened relation store");

        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of all rows ordered by id
    pub fn relations(&self) -> Vec<Relation> {
        self.table.read().rows().cloned().collect()
    }

    fn load_table(path: &Path) -> RelationResult<RelationTable> {
        let rows: Vec<Relation> = read_jsonl(path)?;
        let (table, dropped) = RelationTable::from_rows(rows);
        if dropped > 0 {
            warn!(dropped, "Dropped duplicate relation rows while loading");
        }
        Ok(table)
    }

    fn persist(&self, table: &RelationTable) -> RelationResult<()> {
        atomic_write_with(&self.path, |file| {
            for relation in table.rows() {
                let line = serde_json::to_string(relation)?;
                writeln!(file, "{}", line)?;
            }
            Ok(())
        })?;
        debug!(path = %self.path.display(), relations = table.len(), "Persisted relations");
        Ok(())
    }

    /// Run a mutation on a copy of the table and swap it in once it is on disk
    fn write<T>(&self, op: impl FnOnce(&mut RelationTable) -> RelationResult<T>) -> RelationResult<T> {
        let mut guard = self.table.write();
        let mut next = guard.clone();
        let value = op(&mut next)?;

        if next.revision != guard.revision {
            self.persist(&next)?;
            *guard = next;
        }
        Ok(value)
    }
}

impl RelationStore for JsonlRelationStore {
    fn find_by_address(&self, address: &HostAddress) -> RelationResult<Option<Relation>> {
        Ok(self.table.read().find(address).cloned())
    }

    fn insert(&self, draft: RelationDraft) -> RelationResult<RelationId> {
        self.write(|table| table.insert(draft))
    }

    fn update(
        &self,
        relation_id: RelationId,
        entity_id: EntityId,
        time_created: i64,
    ) -> RelationResult<()> {
        self.write(|table| table.update(relation_id, entity_id, time_created))
    }

    fn delete_by_address(&self, address: &HostAddress) -> RelationResult<bool> {
        self.write(|table| Ok(table.delete(address)))
    }

    fn upsert_by_address(
        &self,
        address: &HostAddress,
        entity_id: EntityId,
        time_created: i64,
    ) -> RelationResult<UpsertOutcome> {
        self.write(|table| table.upsert(address, entity_id, time_created))
    }

    fn distinct_entity_count(
        &self,
        kind: &HostKind,
        instance_ids: &[InstanceId],
    ) -> RelationResult<usize> {
        Ok(self.table.read().distinct_entity_count(kind, instance_ids))
    }

    fn delete_by_addresses(&self, kind: &HostKind, instance_ids: &[InstanceId]) -> BulkDeleteReport {
        let result = self.write(|table| {
            Ok(instance_ids
                .iter()
                .filter(|&&instance_id| table.delete(&kind.address(instance_id)))
                .count())
        });

        match result {
            Ok(removed) => BulkDeleteReport {
                removed,
                failed: Vec::new(),
            },
            Err(e) => {
                warn!(kind = %kind, error = %e, "Bulk relation delete could not be persisted");
                BulkDeleteReport {
                    removed: 0,
                    failed: instance_ids.to_vec(),
                }
            }
        }
    }
}
