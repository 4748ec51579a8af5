//! Typed form rows exchanged with the form adapter
//!
//! A submission is an ordered sequence of rows, one per sub-host shown in the
//! form. Whether a row carries an `entityid` field at all is significant and
//! is kept apart from the value of that field: an absent field means "this
//! row does not touch entities", an empty one means "clear".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{EntityId, RelationId, SENTINEL_ENTITY_ID};
use crate::error::RelationError;

/// Value of a row's entity-id field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSelection", into = "RawSelection")]
pub enum EntitySelection {
    /// Field submitted without a value (`""` or `0`)
    Empty,
    /// Sentinel `-1`: explicitly no entity
    Cleared,
    Entity(EntityId),
}

impl EntitySelection {
    pub fn from_id(id: EntityId) -> Result<Self, RelationError> {
        match id {
            0 => Ok(EntitySelection::Empty),
            SENTINEL_ENTITY_ID => Ok(EntitySelection::Cleared),
            id if id > 0 => Ok(EntitySelection::Entity(id)),
            other => Err(RelationError::InvalidArgument(format!(
                "entity id {} is neither positive nor the sentinel",
                other
            ))),
        }
    }

    /// The selected entity, if any
    pub fn entity_id(&self) -> Option<EntityId> {
        match self {
            EntitySelection::Entity(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, EntitySelection::Empty)
    }
}

impl FromStr for EntitySelection {
    type Err = RelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(EntitySelection::Empty);
        }
        let id: EntityId = s.parse().map_err(|_| {
            RelationError::InvalidArgument(format!("'{}' is not an entity id", s))
        })?;
        Self::from_id(id)
    }
}

impl fmt::Display for EntitySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntitySelection::Empty => Ok(()),
            EntitySelection::Cleared => write!(f, "{}", SENTINEL_ENTITY_ID),
            EntitySelection::Entity(id) => write!(f, "{}", id),
        }
    }
}

/// Form adapters send ids either as numbers or as strings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawSelection {
    Number(i64),
    Text(String),
}

impl TryFrom<RawSelection> for EntitySelection {
    type Error = RelationError;

    fn try_from(raw: RawSelection) -> Result<Self, Self::Error> {
        match raw {
            RawSelection::Number(id) => EntitySelection::from_id(id),
            RawSelection::Text(text) => text.parse(),
        }
    }
}

impl From<EntitySelection> for RawSelection {
    fn from(selection: EntitySelection) -> Self {
        match selection {
            EntitySelection::Empty => RawSelection::Text(String::new()),
            EntitySelection::Cleared => RawSelection::Number(SENTINEL_ENTITY_ID),
            EntitySelection::Entity(id) => RawSelection::Number(id),
        }
    }
}

/// One form row: the four entity fields of a single sub-host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityFormRow {
    #[serde(rename = "entityid", default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<EntitySelection>,
    /// Area tag of the row, carried through to the conflict checker
    #[serde(rename = "entityarea", default, skip_serializing_if = "Option::is_none")]
    pub area_tag: Option<String>,
    /// Storage id of the existing relation, round-tripped by the form
    #[serde(rename = "relationid", default, skip_serializing_if = "Option::is_none")]
    pub relation_id: Option<RelationId>,
    /// Display-only cached name, never authoritative
    #[serde(rename = "entityname", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl EntityFormRow {
    /// Row carrying only an entity-id field
    pub fn with_selection(selection: EntitySelection) -> Self {
        Self {
            entity_id: Some(selection),
            ..Default::default()
        }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area_tag = Some(area.into());
        self
    }

    fn has_no_entity(&self) -> bool {
        matches!(self.entity_id, None | Some(EntitySelection::Empty))
    }

    /// Change detection between a stored row and a submitted one.
    ///
    /// Two rows without an entity are the same; otherwise they differ as soon
    /// as the entity or the area tag differs.
    pub fn same_selection(&self, other: &EntityFormRow) -> bool {
        if self.has_no_entity() && other.has_no_entity() {
            return true;
        }
        self.entity_id == other.entity_id && self.area_tag == other.area_tag
    }
}

/// All entity rows of one submitted form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub rows: Vec<EntityFormRow>,
}

impl FormSubmission {
    pub fn new(rows: Vec<EntityFormRow>) -> Self {
        Self { rows }
    }

    /// Submission with a single row at index 0
    pub fn single(row: EntityFormRow) -> Self {
        Self { rows: vec![row] }
    }

    pub fn row(&self, index: usize) -> Option<&EntityFormRow> {
        self.rows.get(index)
    }

    /// True when any row carries an entity-id field, whatever its value
    pub fn has_entity_fields(&self) -> bool {
        self.rows.iter().any(|row| row.entity_id.is_some())
    }

    /// Rows carrying an entity-id field, with their index and value
    pub fn entity_fields(&self) -> impl Iterator<Item = (usize, &EntityFormRow, EntitySelection)> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(index, row)| row.entity_id.map(|selection| (index, row, selection)))
    }
}
