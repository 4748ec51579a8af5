//! Relation types: the host address key and the persisted association

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{EntityId, InstanceId, RelationId};

/// Kind of host object a relation can be attached to, e.g. `mod_booking`/`option`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostKind {
    pub component: String,
    pub area: String,
}

impl HostKind {
    pub fn new(component: impl Into<String>, area: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            area: area.into(),
        }
    }

    /// Address a single host object of this kind
    pub fn address(&self, instance_id: InstanceId) -> HostAddress {
        HostAddress {
            component: self.component.clone(),
            area: self.area.clone(),
            instance_id,
        }
    }

    /// Same component, different area
    pub fn with_area(&self, area: impl Into<String>) -> Self {
        Self::new(self.component.clone(), area)
    }
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.component, self.area)
    }
}

/// Weak composite key `(component, area, instanceid)` of a host object
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostAddress {
    pub component: String,
    pub area: String,
    #[serde(rename = "instanceid")]
    pub instance_id: InstanceId,
}

impl HostAddress {
    pub fn new(component: impl Into<String>, area: impl Into<String>, instance_id: InstanceId) -> Self {
        Self {
            component: component.into(),
            area: area.into(),
            instance_id,
        }
    }

    pub fn kind(&self) -> HostKind {
        HostKind::new(self.component.clone(), self.area.clone())
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.component, self.area, self.instance_id)
    }
}

/// Persisted association between one host object and one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub id: RelationId,
    #[serde(flatten)]
    pub address: HostAddress,
    #[serde(rename = "entityid")]
    pub entity_id: EntityId,
    /// Refreshed on every upsert, so it doubles as "last modified"
    #[serde(rename = "timecreated")]
    pub time_created: i64,
}

/// Relation that has not been assigned a storage id yet
#[derive(Debug, Clone, PartialEq)]
pub struct RelationDraft {
    pub address: HostAddress,
    pub entity_id: EntityId,
    pub time_created: i64,
}

impl RelationDraft {
    pub fn new(address: HostAddress, entity_id: EntityId, time_created: i64) -> Self {
        Self {
            address,
            entity_id,
            time_created,
        }
    }

    pub(crate) fn into_relation(self, id: RelationId) -> Relation {
        Relation {
            id,
            address: self.address,
            entity_id: self.entity_id,
            time_created: self.time_created,
        }
    }
}

/// What an atomic upsert did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted(RelationId),
    Updated(RelationId),
}

impl UpsertOutcome {
    pub fn relation_id(&self) -> RelationId {
        match self {
            UpsertOutcome::Inserted(id) | UpsertOutcome::Updated(id) => *id,
        }
    }
}

/// Result of a bulk delete: how many rows went away and which ids failed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulkDeleteReport {
    pub removed: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<InstanceId>,
}

impl BulkDeleteReport {
    /// Aggregate flag: true when no individual delete failed
    pub fn succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    pub(crate) fn merge(&mut self, other: BulkDeleteReport) {
        self.removed += other.removed;
        self.failed.extend(other.failed);
    }
}

/// Relation joined with its entity for display and form prefill.
///
/// Every field is absent when the host has no relation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationView {
    #[serde(rename = "entityid", skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<EntityId>,
    #[serde(rename = "relationid", skip_serializing_if = "Option::is_none")]
    pub relation_id: Option<RelationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<HostAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortname: Option<String>,
    #[serde(rename = "parentid", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
    #[serde(rename = "parentname", skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(rename = "timecreated", skip_serializing_if = "Option::is_none")]
    pub time_created: Option<i64>,
}

impl RelationView {
    pub fn is_empty(&self) -> bool {
        self.relation_id.is_none()
    }
}
