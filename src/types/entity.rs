//! Entity types: bookable resources and their addresses

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{is_zero, EntityId};

/// Bookable resource such as a room, a location or a piece of equipment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub shortname: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "parentid", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
    #[serde(rename = "pricefactor", default, skip_serializing_if = "Option::is_none")]
    pub price_factor: Option<f64>,
    /// Schedule data only the conflict checker understands
    #[serde(rename = "openinghours", default, skip_serializing_if = "Value::is_null")]
    pub opening_hours: Value,
    #[serde(rename = "maxallocation", default, skip_serializing_if = "is_zero")]
    pub max_allocation: i64,
    #[serde(default)]
    pub status: i64,
    #[serde(rename = "createdby", default, skip_serializing_if = "is_zero")]
    pub created_by: i64,
    #[serde(rename = "sortorder", default)]
    pub sort_order: i64,
    #[serde(rename = "timecreated", default, skip_serializing_if = "is_zero")]
    pub time_created: i64,
    #[serde(rename = "timemodified", default, skip_serializing_if = "is_zero")]
    pub time_modified: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
}

impl Entity {
    /// Create a new top-level entity with default values
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a new entity nested below `parent_id`
    pub fn with_parent(id: EntityId, name: impl Into<String>, parent_id: EntityId) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::new(id, name)
        }
    }

    pub fn is_top_level(&self) -> bool {
        matches!(self.parent_id, None | Some(0))
    }
}

/// Contact/location record attached to an entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(rename = "streetname", default)]
    pub street_name: String,
    #[serde(rename = "streetnumber", default)]
    pub street_number: String,
    #[serde(rename = "maplink", default)]
    pub map_link: String,
    #[serde(rename = "mapembed", default)]
    pub map_embed: String,
}

/// Entity joined with one of its addresses and its parent's name.
///
/// An entity with several addresses yields one view per address; an entity
/// without addresses yields a single view with `address` unset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityAddressView {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "parentname", skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}
