//! In-memory entity repository

use std::collections::BTreeMap;
use std::path::Path;

use parking_lot::RwLock;
use tracing::info;

use super::EntityRepository;
use crate::error::{RelationError, RelationResult};
use crate::types::{Entity, EntityId};
use crate::utils::read_jsonl;

/// Entities held in memory, optionally loaded from a JSONL file
#[derive(Default)]
pub struct InMemoryEntityRepository {
    entities: RwLock<BTreeMap<EntityId, Entity>>,
}

impl InMemoryEntityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            entities: RwLock::new(entities.into_iter().map(|e| (e.id, e)).collect()),
        }
    }

    /// Load entities from a JSONL file, one entity per line (missing file = empty)
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RelationResult<Self> {
        let path = path.as_ref();
        let entities: Vec<Entity> = read_jsonl(path)?;
        info!(path = %path.display(), entities = entities.len(), "Loaded entities");
        Ok(Self::with_entities(entities))
    }

    /// Add or replace an entity
    pub fn insert(&self, entity: Entity) {
        self.entities.write().insert(entity.id, entity);
    }

    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn filtered(&self, predicate: impl Fn(&Entity) -> bool) -> Vec<Entity> {
        self.entities
            .read()
            .values()
            .filter(|&e| predicate(e))
            .cloned()
            .collect()
    }
}

impl EntityRepository for InMemoryEntityRepository {
    fn load(&self, id: EntityId) -> RelationResult<Entity> {
        self.entities
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| RelationError::NotFound(format!("Entity {}", id)))
    }

    fn list_top_level(&self) -> RelationResult<Vec<Entity>> {
        let mut entities = self.filtered(Entity::is_top_level);
        entities.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(entities)
    }

    fn find_by_name(&self, name: &str) -> RelationResult<Vec<Entity>> {
        let needle = name.to_lowercase();
        Ok(self.filtered(|e| e.name.to_lowercase() == needle))
    }

    fn find_by_shortname(&self, shortname: &str) -> RelationResult<Vec<Entity>> {
        Ok(self.filtered(|e| e.shortname == shortname))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Address;

    fn sample_repo() -> InMemoryEntityRepository {
        let mut campus = Entity::new(1, "Campus");
        campus.sort_order = 2;
        let mut hall = Entity::new(2, "Main Hall");
        hall.shortname = "hall".to_string();
        hall.sort_order = 1;
        hall.price_factor = Some(1.5);
        let mut room = Entity::with_parent(3, "Room 101", 1);
        room.shortname = "r101".to_string();
        room.addresses = vec![
            Address {
                id: 10,
                city: "Vienna".to_string(),
                ..Default::default()
            },
            Address {
                id: 11,
                city: "Graz".to_string(),
                ..Default::default()
            },
        ];
        let orphan = Entity::with_parent(4, "Annex", 99);

        InMemoryEntityRepository::with_entities(vec![campus, hall, room, orphan])
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let repo = sample_repo();
        assert_eq!(repo.load(2).unwrap().name, "Main Hall");
        assert!(matches!(repo.load(42), Err(RelationError::NotFound(_))));
    }

    #[test]
    fn test_list_top_level_ordering() {
        let repo = sample_repo();
        let names: Vec<String> = repo
            .list_top_level()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Main Hall", "Campus"]);
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        let repo = sample_repo();
        assert_eq!(repo.find_by_name("main hall").unwrap().len(), 1);
        assert!(repo.find_by_name("Main").unwrap().is_empty());
    }

    #[test]
    fn test_find_by_shortname_is_exact() {
        let repo = sample_repo();
        assert_eq!(repo.find_by_shortname("r101").unwrap()[0].id, 3);
        assert!(repo.find_by_shortname("R101").unwrap().is_empty());
    }

    #[test]
    fn test_entity_with_addresses() {
        let repo = sample_repo();

        let rows = repo.entity_with_addresses(3).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].parent_name.as_deref(), Some("Campus"));
        assert_eq!(rows[1].address.as_ref().unwrap().city, "Graz");
        assert!(rows[0].entity.addresses.is_empty());

        let single = repo.entity_with_addresses(2).unwrap();
        assert_eq!(single.len(), 1);
        assert!(single[0].address.is_none());
        assert!(single[0].parent_name.is_none());

        assert!(repo.entity_with_addresses(42).unwrap().is_empty());
    }

    #[test]
    fn test_dangling_parent_has_no_name() {
        let repo = sample_repo();
        let annex = repo.load(4).unwrap();
        assert_eq!(repo.parent_name(&annex).unwrap(), None);
    }

    #[test]
    fn test_price_factor_missing_is_none() {
        let repo = sample_repo();
        assert_eq!(repo.price_factor(2).unwrap(), Some(1.5));
        assert_eq!(repo.price_factor(1).unwrap(), None);
        assert_eq!(repo.price_factor(42).unwrap(), None);
    }
}
