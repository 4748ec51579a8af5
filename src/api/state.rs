//! Shared application state for the HTTP handlers

use crate::error::RelationResult;
use crate::handler::{Collaborators, RelationHandler};
use crate::validation::KnownHostKinds;

/// State shared by every request
pub struct AppState {
    /// Injected store and collaborators
    pub deps: Collaborators,
    /// Host kinds requests may address
    pub host_kinds: KnownHostKinds,
}

impl AppState {
    pub fn new(deps: Collaborators, host_kinds: KnownHostKinds) -> Self {
        Self { deps, host_kinds }
    }

    /// Handler for a host kind named in a request path
    pub fn handler(&self, component: &str, area: &str) -> RelationResult<RelationHandler> {
        RelationHandler::new(&self.host_kinds, component, area, self.deps.clone())
    }
}
