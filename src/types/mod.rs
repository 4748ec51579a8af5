//! Data types for the entity relations engine
//!
//! This module contains all the core data structures used throughout the application.

mod conflict;
mod entity;
mod form;
mod relation;

pub use conflict::{Conflict, ConflictReport, DateRange, ValidationResult};
pub use entity::{Address, Entity, EntityAddressView};
pub use form::{EntityFormRow, EntitySelection, FormSubmission};
pub use relation::{
    BulkDeleteReport, HostAddress, HostKind, Relation, RelationDraft, RelationView, UpsertOutcome,
};

/// Identifier of an entity (room, location, equipment)
pub type EntityId = i64;

/// Storage identifier of a relation record
pub type RelationId = i64;

/// Host subsystem's local identifier of a host object
pub type InstanceId = i64;

/// Entity id value meaning "explicitly no entity"
pub const SENTINEL_ENTITY_ID: EntityId = -1;

/// Check if value is zero (for skip_serializing_if)
pub fn is_zero(val: &i64) -> bool {
    *val == 0
}
