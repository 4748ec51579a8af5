//! Entity Relations
//!
//! Attaches bookable entities (rooms, locations, equipment) to host objects
//! of other subsystems. A host is addressed by the weak composite key
//! `(component, area, instanceid)` and holds at most one entity.
//!
//! # Features
//!
//! - **Atomic upsert**: one relation per host address, even under concurrent saves
//! - **Conflict validation**: per-row booking conflict and opening-hours messages
//! - **Outlier detection**: warns when sub-hosts of a parent disagree on the entity
//! - **Cascading cleanup**: best-effort bulk deletes with per-id failure reports
//! - **JSONL persistence**: atomic file writes, corrupt lines skipped on load
//!
//! # Modules
//!
//! - `types`: Core data structures (Entity, Relation, HostAddress, form rows)
//! - `store`: Relation persistence behind the `RelationStore` trait
//! - `repository`: Entity lookup and host hierarchy collaborators
//! - `conflict`: Conflict checker contract and message formatting
//! - `handler`: Relation lifecycle engine
//! - `validation`: Closed list of accepted host kinds
//! - `api`: Axum REST endpoints
//! - `config`: Environment configuration
//! - `utils`: Timestamps, atomic writes and JSONL loading
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use entity_relations::conflict::AcceptAllChecker;
//! use entity_relations::handler::{Collaborators, RelationHandler};
//! use entity_relations::repository::{InMemoryEntityRepository, InMemoryHostDirectory};
//! use entity_relations::store::InMemoryRelationStore;
//! use entity_relations::types::Entity;
//! use entity_relations::validation::KnownHostKinds;
//!
//! let deps = Collaborators::new(
//!     Arc::new(InMemoryRelationStore::new()),
//!     Arc::new(InMemoryEntityRepository::with_entities(vec![Entity::new(5, "Room 5")])),
//!     Arc::new(AcceptAllChecker),
//!     Arc::new(InMemoryHostDirectory::new()),
//! );
//! let handler = RelationHandler::new(&KnownHostKinds::default(), "mod_booking", "option", deps).unwrap();
//!
//! handler.save_simple(42, 5).unwrap();
//! assert_eq!(handler.load_for_host(42).unwrap().name.as_deref(), Some("Room 5"));
//! ```

pub mod api;
pub mod config;
pub mod conflict;
pub mod error;
pub mod handler;
pub mod repository;
pub mod store;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used items at crate root
pub use config::Config;
pub use error::{RelationError, RelationResult};
pub use handler::{Collaborators, RelationHandler};
pub use store::{InMemoryRelationStore, JsonlRelationStore, RelationStore};
pub use types::{
    BulkDeleteReport, EntityFormRow, EntitySelection, FormSubmission, HostAddress, HostKind,
    Relation, RelationView, ValidationResult,
};
pub use validation::KnownHostKinds;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
