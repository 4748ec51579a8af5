//! HTTP API
//!
//! REST endpoints over the relation engine and the entity lookups, for form
//! adapters and reporting clients.

pub mod http;
pub mod rest;
pub mod state;

pub use http::create_router;
pub use state::AppState;
