//! Read operations: relation views and form prefill

use tracing::debug;

use crate::error::{RelationError, RelationResult};
use crate::types::{EntityFormRow, EntityId, EntitySelection, InstanceId, RelationView};

use super::RelationHandler;

/// Relation of a host joined with its entity; empty view when there is none
pub fn load_for_host(handler: &RelationHandler, instance_id: InstanceId) -> RelationResult<RelationView> {
    let address = handler.address(instance_id);
    let Some(relation) = handler.deps.store.find_by_address(&address)? else {
        return Ok(RelationView::default());
    };

    let entity = match handler.deps.entities.load(relation.entity_id) {
        Ok(entity) => entity,
        Err(RelationError::NotFound(_)) => {
            // Relation points at a deleted entity: treat the host as unassigned
            debug!(%address, entity_id = relation.entity_id, "Relation references missing entity");
            return Ok(RelationView::default());
        }
        Err(e) => return Err(e),
    };
    let parent_name = handler.deps.entities.parent_name(&entity)?;

    Ok(RelationView {
        entity_id: Some(relation.entity_id),
        relation_id: Some(relation.id),
        address: Some(relation.address),
        name: Some(entity.name),
        shortname: Some(entity.shortname),
        parent_id: entity.parent_id,
        parent_name,
        time_created: Some(relation.time_created),
    })
}

/// Entity assigned to a host, 0 when none
pub fn get_entity_id(handler: &RelationHandler, instance_id: InstanceId) -> RelationResult<EntityId> {
    Ok(handler
        .deps
        .store
        .get_entity_id_for_address(&handler.address(instance_id))?
        .unwrap_or(0))
}

/// Form row populated from storage, with an empty selection when unassigned
pub fn form_defaults(handler: &RelationHandler, instance_id: InstanceId) -> RelationResult<EntityFormRow> {
    let view = load_for_host(handler, instance_id)?;
    Ok(EntityFormRow {
        entity_id: Some(
            view.entity_id
                .map_or(EntitySelection::Empty, EntitySelection::Entity),
        ),
        area_tag: None,
        relation_id: view.relation_id,
        display_name: view.name,
    })
}

/// Fill the row's empty fields from storage.
///
/// Submitted values always win, so a form re-rendered after a no-submit
/// button keeps what the user picked.
pub fn prefill(handler: &RelationHandler, row: &mut EntityFormRow, instance_id: InstanceId) -> RelationResult<()> {
    let view = load_for_host(handler, instance_id)?;

    if matches!(row.entity_id, None | Some(EntitySelection::Empty)) {
        row.entity_id = Some(
            view.entity_id
                .map_or(EntitySelection::Empty, EntitySelection::Entity),
        );
    }
    if row.display_name.as_deref().map_or(true, str::is_empty) {
        row.display_name = Some(view.name.unwrap_or_default());
    }
    if matches!(row.relation_id, None | Some(0)) {
        row.relation_id = Some(view.relation_id.unwrap_or(0));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::handler::test_support::Fixture;
    use crate::store::RelationStore;
    use crate::types::{EntityFormRow, EntitySelection, HostAddress};

    #[test]
    fn test_load_for_host_joins_entity_and_parent() {
        let fixture = Fixture::new();
        let handler = fixture.handler("option");
        handler.save_simple(42, 5).unwrap();

        let view = handler.load_for_host(42).unwrap();
        assert_eq!(view.entity_id, Some(5));
        assert_eq!(view.name.as_deref(), Some("Room 5"));
        assert_eq!(view.shortname.as_deref(), Some("r5"));
        assert_eq!(view.parent_id, Some(1));
        assert_eq!(view.parent_name.as_deref(), Some("Campus"));
        assert_eq!(view.address, Some(HostAddress::new("mod_booking", "option", 42)));
    }

    #[test]
    fn test_load_for_host_without_relation_is_empty() {
        let fixture = Fixture::new();
        let handler = fixture.handler("option");

        let view = handler.load_for_host(42).unwrap();
        assert!(view.is_empty());
        assert_eq!(handler.get_entity_id(42).unwrap(), 0);
    }

    #[test]
    fn test_relation_to_missing_entity_reads_as_empty() {
        let fixture = Fixture::new();
        let handler = fixture.handler("option");
        fixture
            .store
            .upsert_by_address(&HostAddress::new("mod_booking", "option", 42), 404, 1000)
            .unwrap();

        assert!(handler.load_for_host(42).unwrap().is_empty());
        assert_eq!(handler.get_entity_id(42).unwrap(), 404);
    }

    #[test]
    fn test_form_defaults() {
        let fixture = Fixture::new();
        let handler = fixture.handler("option");

        let empty = handler.form_defaults(42).unwrap();
        assert_eq!(empty.entity_id, Some(EntitySelection::Empty));
        assert_eq!(empty.relation_id, None);

        handler.save_simple(42, 7).unwrap();
        let row = handler.form_defaults(42).unwrap();
        assert_eq!(row.entity_id, Some(EntitySelection::Entity(7)));
        assert_eq!(row.display_name.as_deref(), Some("Park"));
        assert!(row.relation_id.is_some());
    }

    #[test]
    fn test_prefill_keeps_submitted_values() {
        let fixture = Fixture::new();
        let handler = fixture.handler("option");
        handler.save_simple(42, 7).unwrap();

        let mut submitted = EntityFormRow::with_selection(EntitySelection::Entity(9));
        handler.prefill(&mut submitted, 42).unwrap();
        assert_eq!(submitted.entity_id, Some(EntitySelection::Entity(9)));
        assert_eq!(submitted.display_name.as_deref(), Some("Park"));

        let mut blank = EntityFormRow::default();
        handler.prefill(&mut blank, 42).unwrap();
        assert_eq!(blank.entity_id, Some(EntitySelection::Entity(7)));
    }
}
