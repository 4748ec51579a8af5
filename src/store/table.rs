//! In-memory relation table shared by the store implementations

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{RelationError, RelationResult};
use crate::types::{
    EntityId, HostAddress, HostKind, InstanceId, Relation, RelationDraft, RelationId,
    UpsertOutcome,
};

/// Relations by id plus an address index.
///
/// `revision` is bumped on every mutation so callers can tell whether an
/// operation changed anything.
#[derive(Debug, Clone)]
pub(crate) struct RelationTable {
    rows: BTreeMap<RelationId, Relation>,
    by_address: HashMap<HostAddress, RelationId>,
    next_id: RelationId,
    pub(crate) revision: u64,
}

impl Default for RelationTable {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            by_address: HashMap::new(),
            next_id: 1,
            revision: 0,
        }
    }
}

impl RelationTable {
    /// Rebuild a table from loaded rows.
    ///
    /// When two rows share an address the one with the later `time_created`
    /// (then the higher id) wins. A row reusing the id of a row kept for
    /// another address is dropped, so the address index never points at a
    /// foreign row. The number of dropped rows is returned.
    pub(crate) fn from_rows(rows: impl IntoIterator<Item = Relation>) -> (Self, usize) {
        let mut table = Self::default();
        let mut dropped = 0;

        for relation in rows {
            table.next_id = table.next_id.max(relation.id + 1);
            if let Some(holder) = table.rows.get(&relation.id) {
                if holder.address != relation.address {
                    dropped += 1;
                    continue;
                }
            }
            if let Some(existing_id) = table.by_address.get(&relation.address).copied() {
                dropped += 1;
                let existing = &table.rows[&existing_id];
                if (existing.time_created, existing.id) >= (relation.time_created, relation.id) {
                    continue;
                }
                table.rows.remove(&existing_id);
            }
            table.by_address.insert(relation.address.clone(), relation.id);
            table.rows.insert(relation.id, relation);
        }

        (table, dropped)
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &Relation> {
        self.rows.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn find(&self, address: &HostAddress) -> Option<&Relation> {
        self.by_address.get(address).and_then(|id| self.rows.get(id))
    }

    pub(crate) fn insert(&mut self, draft: RelationDraft) -> RelationResult<RelationId> {
        if self.by_address.contains_key(&draft.address) {
            return Err(RelationError::Storage(format!(
                "Relation for {} already exists",
                draft.address
            )));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.by_address.insert(draft.address.clone(), id);
        self.rows.insert(id, draft.into_relation(id));
        self.revision += 1;
        Ok(id)
    }

    pub(crate) fn update(
        &mut self,
        relation_id: RelationId,
        entity_id: EntityId,
        time_created: i64,
    ) -> RelationResult<()> {
        let relation = self
            .rows
            .get_mut(&relation_id)
            .ok_or_else(|| RelationError::NotFound(format!("Relation {}", relation_id)))?;
        relation.entity_id = entity_id;
        relation.time_created = time_created;
        self.revision += 1;
        Ok(())
    }

    pub(crate) fn delete(&mut self, address: &HostAddress) -> bool {
        match self.by_address.remove(address) {
            Some(id) => {
                self.rows.remove(&id);
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    pub(crate) fn upsert(
        &mut self,
        address: &HostAddress,
        entity_id: EntityId,
        time_created: i64,
    ) -> RelationResult<UpsertOutcome> {
        match self.find(address).map(|r| (r.id, r.time_created)) {
            Some((id, previous)) => {
                self.update(id, entity_id, time_created.max(previous + 1))?;
                Ok(UpsertOutcome::Updated(id))
            }
            None => {
                let draft = RelationDraft::new(address.clone(), entity_id, time_created);
                self.insert(draft).map(UpsertOutcome::Inserted)
            }
        }
    }

    pub(crate) fn distinct_entity_count(&self, kind: &HostKind, instance_ids: &[InstanceId]) -> usize {
        instance_ids
            .iter()
            .filter_map(|&instance_id| self.find(&kind.address(instance_id)))
            .map(|relation| relation.entity_id)
            .collect::<HashSet<_>>()
            .len()
    }
}
