//! Read-only collaborators: entity lookup and host hierarchy
//!
//! Neither is owned by the relation engine. The traits describe the calls
//! the engine makes; the in-memory implementations back the server binary
//! and the tests.

mod entities;
mod hosts;

pub use entities::InMemoryEntityRepository;
pub use hosts::{HostRecord, InMemoryHostDirectory};

use crate::error::{RelationError, RelationResult};
use crate::types::{Entity, EntityAddressView, EntityId, HostKind, InstanceId};

/// Read-only lookup of entities
pub trait EntityRepository: Send + Sync {
    /// Load one entity; a missing id is `RelationError::NotFound`
    fn load(&self, id: EntityId) -> RelationResult<Entity>;

    /// Entities without a parent, ordered by sort order then name
    fn list_top_level(&self) -> RelationResult<Vec<Entity>>;

    /// Entities whose name matches exactly, ignoring case
    fn find_by_name(&self, name: &str) -> RelationResult<Vec<Entity>>;

    /// Entities whose shortname matches exactly
    fn find_by_shortname(&self, shortname: &str) -> RelationResult<Vec<Entity>>;

    /// Name of the entity's parent, `None` when it has none or the parent is gone
    fn parent_name(&self, entity: &Entity) -> RelationResult<Option<String>> {
        let Some(parent_id) = entity.parent_id.filter(|id| *id != 0) else {
            return Ok(None);
        };
        match self.load(parent_id) {
            Ok(parent) => Ok(Some(parent.name)),
            Err(RelationError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Entity joined with each of its addresses; empty when the entity is missing
    fn entity_with_addresses(&self, id: EntityId) -> RelationResult<Vec<EntityAddressView>> {
        let mut entity = match self.load(id) {
            Ok(entity) => entity,
            Err(RelationError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let parent_name = self.parent_name(&entity)?;
        let addresses = std::mem::take(&mut entity.addresses);

        if addresses.is_empty() {
            return Ok(vec![EntityAddressView {
                entity,
                parent_name,
                address: None,
            }]);
        }

        Ok(addresses
            .into_iter()
            .map(|address| EntityAddressView {
                entity: entity.clone(),
                parent_name: parent_name.clone(),
                address: Some(address),
            })
            .collect())
    }

    /// Stored price factor; `None` when the entity or the factor is missing
    fn price_factor(&self, id: EntityId) -> RelationResult<Option<f64>> {
        match self.load(id) {
            Ok(entity) => Ok(entity.price_factor),
            Err(RelationError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Which host instances belong to a parent host.
///
/// For `mod_booking`/`option` the parent is a booking instance; for
/// `mod_booking`/`optiondate` it is an option.
pub trait HostDirectory: Send + Sync {
    fn instances_of(&self, kind: &HostKind, parent_id: InstanceId) -> RelationResult<Vec<InstanceId>>;
}
