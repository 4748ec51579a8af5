//! Relation handler - lifecycle engine for entity relations
//!
//! A handler serves one host kind (`component`/`area`) and is reused for any
//! number of host instances of that kind. It decides what to write and
//! delegates every write to the injected [`RelationStore`].
//!
//! # Flow
//!
//! ```text
//! form submit ──► validate() ──► ConflictChecker ──► field messages
//!            └──► save() ──► upsert / delete ──► RelationStore
//! ```

mod cascade;
mod lookup;
mod save;
mod validate;

pub use cascade::delete_relations_for_booking;

use std::sync::Arc;

use crate::conflict::ConflictChecker;
use crate::error::{RelationError, RelationResult};
use crate::repository::{EntityRepository, HostDirectory};
use crate::store::RelationStore;
use crate::types::{
    BulkDeleteReport, DateRange, EntityFormRow, EntityId, FormSubmission, HostAddress, HostKind,
    InstanceId, RelationView, ValidationResult,
};
use crate::validation::KnownHostKinds;

/// Collaborators injected into every handler
#[derive(Clone)]
pub struct Collaborators {
    pub store: Arc<dyn RelationStore>,
    pub entities: Arc<dyn EntityRepository>,
    pub conflicts: Arc<dyn ConflictChecker>,
    pub hosts: Arc<dyn HostDirectory>,
}

impl Collaborators {
    pub fn new(
        store: Arc<dyn RelationStore>,
        entities: Arc<dyn EntityRepository>,
        conflicts: Arc<dyn ConflictChecker>,
        hosts: Arc<dyn HostDirectory>,
    ) -> Self {
        Self {
            store,
            entities,
            conflicts,
            hosts,
        }
    }
}

/// Relation lifecycle for one host kind
#[derive(Clone)]
pub struct RelationHandler {
    pub(crate) kind: HostKind,
    pub(crate) sub_area: Option<String>,
    pub(crate) deps: Collaborators,
}

impl RelationHandler {
    /// Create a handler for `component`/`area`, which must be a known host kind
    pub fn new(
        known: &KnownHostKinds,
        component: &str,
        area: &str,
        deps: Collaborators,
    ) -> RelationResult<Self> {
        let kind = known.resolve(component, area)?;
        Ok(Self {
            kind,
            sub_area: None,
            deps,
        })
    }

    /// Declare the area of this kind's sub-instances (e.g. `optiondate` under
    /// `option`), enabling [`Self::has_divergent_sub_entities`]
    pub fn with_sub_area(mut self, known: &KnownHostKinds, sub_area: &str) -> RelationResult<Self> {
        let sub_kind = known.resolve(&self.kind.component, sub_area)?;
        self.sub_area = Some(sub_kind.area);
        Ok(self)
    }

    pub fn kind(&self) -> &HostKind {
        &self.kind
    }

    pub fn component(&self) -> &str {
        &self.kind.component
    }

    pub fn area(&self) -> &str {
        &self.kind.area
    }

    pub(crate) fn address(&self, instance_id: InstanceId) -> HostAddress {
        self.kind.address(instance_id)
    }

    fn sub_kind(&self) -> RelationResult<HostKind> {
        self.sub_area
            .as_deref()
            .map(|area| self.kind.with_area(area))
            .ok_or_else(|| {
                RelationError::InvalidArgument(format!(
                    "Host kind '{}' has no sub-area configured",
                    self.kind
                ))
            })
    }
}

// Operations live in the submodules; these are the public entry points
impl RelationHandler {
    // Lookups (from lookup.rs)
    pub fn load_for_host(&self, instance_id: InstanceId) -> RelationResult<RelationView> {
        lookup::load_for_host(self, instance_id)
    }

    pub fn get_entity_id(&self, instance_id: InstanceId) -> RelationResult<EntityId> {
        lookup::get_entity_id(self, instance_id)
    }

    pub fn form_defaults(&self, instance_id: InstanceId) -> RelationResult<EntityFormRow> {
        lookup::form_defaults(self, instance_id)
    }

    pub fn prefill(&self, row: &mut EntityFormRow, instance_id: InstanceId) -> RelationResult<()> {
        lookup::prefill(self, row, instance_id)
    }

    // Validation (from validate.rs)
    pub fn validate(
        &self,
        submission: &FormSubmission,
        date_ranges: &[DateRange],
        host_id: InstanceId,
    ) -> RelationResult<ValidationResult> {
        validate::validate(self, submission, date_ranges, host_id)
    }

    // Writes (from save.rs)
    pub fn save(
        &self,
        host_id: InstanceId,
        submission: &FormSubmission,
        index: usize,
    ) -> RelationResult<Option<EntityId>> {
        save::save(self, host_id, submission, index)
    }

    pub fn save_simple(
        &self,
        host_id: InstanceId,
        entity_id: EntityId,
    ) -> RelationResult<Option<EntityId>> {
        save::save_simple(self, host_id, entity_id)
    }

    pub fn delete_for_host(&self, host_id: InstanceId) -> RelationResult<bool> {
        save::delete_for_host(self, host_id)
    }

    // Parent-level operations (from cascade.rs)
    pub fn delete_all_for_parent(&self, parent_id: InstanceId) -> RelationResult<BulkDeleteReport> {
        cascade::delete_all_for_parent(self, parent_id)
    }

    pub fn has_divergent_sub_entities(&self, parent_id: InstanceId) -> RelationResult<bool> {
        cascade::has_divergent_sub_entities(self, parent_id)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::Fixture;
    use super::*;

    #[test]
    fn test_unknown_kind_rejected_at_construction() {
        let fixture = Fixture::new();
        let deps = fixture.deps_with(Arc::new(crate::conflict::AcceptAllChecker));
        let result = RelationHandler::new(&KnownHostKinds::default(), "mod_forum", "post", deps);
        assert!(matches!(result, Err(RelationError::InvalidArgument(_))));
    }

    #[test]
    fn test_sub_area_must_be_known() {
        let fixture = Fixture::new();
        let known = KnownHostKinds::default();
        let handler = fixture.handler("option");

        assert!(handler.clone().with_sub_area(&known, "optiondate").is_ok());
        assert!(handler.with_sub_area(&known, "session").is_err());
    }
}
