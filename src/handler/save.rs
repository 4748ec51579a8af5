//! Write decisions: upsert or delete a host's relation

use tracing::{debug, info};

use crate::error::{RelationError, RelationResult};
use crate::types::{EntityFormRow, EntityId, EntitySelection, FormSubmission, InstanceId, UpsertOutcome};
use crate::utils::current_timestamp;

use super::RelationHandler;

/// Save the relation for `host_id` from row `index` of a submission.
///
/// Must run after the host itself has been stored. Returns the stored entity
/// id, or `None` when the relation was removed or left alone:
///
/// - no row carries an entity field at all: the relation is removed
/// - row `index` carries no entity field: nothing happens
/// - empty value or the `-1` sentinel: the relation is removed
/// - otherwise the relation is inserted or updated in place
pub fn save(
    handler: &RelationHandler,
    host_id: InstanceId,
    submission: &FormSubmission,
    index: usize,
) -> RelationResult<Option<EntityId>> {
    if host_id == 0 {
        return Err(RelationError::Precondition(
            "Host must be stored before its entity relation is saved".to_string(),
        ));
    }

    if !submission.has_entity_fields() {
        delete_for_host(handler, host_id)?;
        return Ok(None);
    }

    let Some(row) = submission.row(index) else {
        return Ok(None);
    };
    let Some(selection) = row.entity_id else {
        return Ok(None);
    };

    let entity_id = match selection {
        EntitySelection::Empty | EntitySelection::Cleared => {
            delete_for_host(handler, host_id)?;
            return Ok(None);
        }
        EntitySelection::Entity(entity_id) => entity_id,
    };

    let address = handler.address(host_id);
    let outcome = handler
        .deps
        .store
        .upsert_by_address(&address, entity_id, current_timestamp())?;

    match outcome {
        UpsertOutcome::Inserted(id) => {
            info!(%address, entity_id, relation_id = id, "Created entity relation")
        }
        UpsertOutcome::Updated(id) => {
            if row.relation_id.is_some_and(|submitted| submitted != 0 && submitted != id) {
                debug!(%address, submitted = ?row.relation_id, stored = id, "Form carried a stale relation id");
            }
            info!(%address, entity_id, relation_id = id, "Updated entity relation")
        }
    }

    Ok(Some(entity_id))
}

/// Save without a form: `entity_id` 0 removes the relation
pub fn save_simple(
    handler: &RelationHandler,
    host_id: InstanceId,
    entity_id: EntityId,
) -> RelationResult<Option<EntityId>> {
    if entity_id == 0 {
        delete_for_host(handler, host_id)?;
        return Ok(None);
    }

    let selection = EntitySelection::from_id(entity_id)?;
    let submission = FormSubmission::single(EntityFormRow::with_selection(selection));
    save(handler, host_id, &submission, 0)
}

/// Remove the relation of one host; `Ok(false)` when there was none
pub fn delete_for_host(handler: &RelationHandler, host_id: InstanceId) -> RelationResult<bool> {
    let address = handler.address(host_id);
    let removed = handler.deps.store.delete_by_address(&address)?;
    if removed {
        info!(%address, "Deleted entity relation");
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test_support::Fixture;
    use crate::store::RelationStore;
    use crate::types::HostAddress;

    fn row(selection: EntitySelection) -> EntityFormRow {
        EntityFormRow::with_selection(selection)
    }

    fn option(instance_id: InstanceId) -> HostAddress {
        HostAddress::new("mod_booking", "option", instance_id)
    }

    #[test]
    fn test_save_requires_persisted_host() {
        let fixture = Fixture::new();
        let handler = fixture.handler("option");
        let submission = FormSubmission::single(row(EntitySelection::Entity(5)));

        let err = handler.save(0, &submission, 0).unwrap_err();
        assert!(matches!(err, RelationError::Precondition(_)));
        assert!(fixture.store.is_empty());
    }

    #[test]
    fn test_save_creates_then_updates_in_place() {
        let fixture = Fixture::new();
        let handler = fixture.handler("option");

        let stored = handler
            .save(42, &FormSubmission::single(row(EntitySelection::Entity(5))), 0)
            .unwrap();
        assert_eq!(stored, Some(5));
        let first = fixture.store.find_by_address(&option(42)).unwrap().unwrap();

        handler
            .save(42, &FormSubmission::single(row(EntitySelection::Entity(9))), 0)
            .unwrap();
        let second = fixture.store.find_by_address(&option(42)).unwrap().unwrap();

        assert_eq!(fixture.store.len(), 1);
        assert_eq!(second.id, first.id);
        assert_eq!(second.entity_id, 9);
        assert!(second.time_created > first.time_created);
    }

    #[test]
    fn test_empty_and_sentinel_delete() {
        let fixture = Fixture::new();
        let handler = fixture.handler("option");

        for clearing in [EntitySelection::Empty, EntitySelection::Cleared] {
            handler.save_simple(42, 5).unwrap();
            let result = handler
                .save(42, &FormSubmission::single(row(clearing)), 0)
                .unwrap();
            assert_eq!(result, None);
            assert!(fixture.store.find_by_address(&option(42)).unwrap().is_none());
        }
    }

    #[test]
    fn test_empty_without_existing_relation_is_noop() {
        let fixture = Fixture::new();
        let handler = fixture.handler("option");

        let result = handler
            .save(42, &FormSubmission::single(row(EntitySelection::Empty)), 0)
            .unwrap();
        assert_eq!(result, None);
        assert!(fixture.store.is_empty());
    }

    #[test]
    fn test_no_entity_fields_clears_host() {
        let fixture = Fixture::new();
        let handler = fixture.handler("option");
        handler.save_simple(42, 5).unwrap();
        handler.save_simple(43, 5).unwrap();

        let submission = FormSubmission::single(EntityFormRow::default().with_area("option"));
        assert_eq!(handler.save(42, &submission, 0).unwrap(), None);

        assert!(fixture.store.find_by_address(&option(42)).unwrap().is_none());
        assert!(fixture.store.find_by_address(&option(43)).unwrap().is_some());
    }

    #[test]
    fn test_missing_row_field_leaves_relation() {
        let fixture = Fixture::new();
        let handler = fixture.handler("option");
        handler.save_simple(42, 5).unwrap();

        // Row 0 carries an entity field, the targeted row 1 does not
        let submission = FormSubmission::new(vec![
            row(EntitySelection::Entity(7)),
            EntityFormRow::default(),
        ]);
        assert_eq!(handler.save(42, &submission, 1).unwrap(), None);
        assert_eq!(handler.save(42, &submission, 5).unwrap(), None);

        assert_eq!(handler.get_entity_id(42).unwrap(), 5);
    }

    #[test]
    fn test_save_reads_selected_row() {
        let fixture = Fixture::new();
        let handler = fixture.handler("optiondate");
        let submission = FormSubmission::new(vec![
            row(EntitySelection::Entity(5)),
            row(EntitySelection::Entity(7)),
        ]);

        handler.save(100, &submission, 0).unwrap();
        handler.save(101, &submission, 1).unwrap();

        assert_eq!(handler.get_entity_id(100).unwrap(), 5);
        assert_eq!(handler.get_entity_id(101).unwrap(), 7);
    }

    #[test]
    fn test_save_simple() {
        let fixture = Fixture::new();
        let handler = fixture.handler("option");

        assert_eq!(handler.save_simple(42, 5).unwrap(), Some(5));
        assert_eq!(handler.save_simple(42, 0).unwrap(), None);
        assert!(fixture.store.is_empty());

        handler.save_simple(42, 5).unwrap();
        assert_eq!(handler.save_simple(42, -1).unwrap(), None);
        assert!(fixture.store.is_empty());

        assert!(handler.save_simple(42, -3).is_err());
    }

    #[test]
    fn test_delete_for_host() {
        let fixture = Fixture::new();
        let handler = fixture.handler("option");
        handler.save_simple(42, 5).unwrap();

        assert!(handler.delete_for_host(42).unwrap());
        assert!(!handler.delete_for_host(42).unwrap());
    }
}
