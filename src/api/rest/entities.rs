//! Entity endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{error_response, ApiError, ApiResponse};
use crate::api::state::AppState;
use crate::types::EntityId;

/// Query parameters for listing entities
#[derive(Debug, Deserialize)]
pub struct ListEntitiesParams {
    /// Exact name, case-insensitive
    pub name: Option<String>,
    /// Exact shortname
    pub shortname: Option<String>,
}

/// GET /api/entities - Top-level entities, or exact matches by name or shortname
pub async fn list_entities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListEntitiesParams>,
) -> Response {
    let entities = &state.deps.entities;
    let result = match (params.name.as_deref(), params.shortname.as_deref()) {
        (Some(name), _) => entities.find_by_name(name),
        (None, Some(shortname)) => entities.find_by_shortname(shortname),
        (None, None) => entities.list_top_level(),
    };

    match result {
        Ok(entities) => {
            let total = entities.len();
            Json(ApiResponse::with_total(entities, total)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/entities/:id - Entity joined with each of its addresses
pub async fn get_entity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
) -> Response {
    match state.deps.entities.entity_with_addresses(id) {
        Ok(rows) if rows.is_empty() => {
            let error = ApiError::not_found(format!("Entity {} not found", id));
            (StatusCode::NOT_FOUND, Json(error)).into_response()
        }
        Ok(rows) => {
            let total = rows.len();
            Json(ApiResponse::with_total(rows, total)).into_response()
        }
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Serialize)]
pub struct PriceFactor {
    pub pricefactor: Option<f64>,
}

/// GET /api/entities/:id/pricefactor - `null` when the entity or factor is missing
pub async fn get_price_factor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
) -> Response {
    match state.deps.entities.price_factor(id) {
        Ok(pricefactor) => Json(ApiResponse::new(PriceFactor { pricefactor })).into_response(),
        Err(e) => error_response(e),
    }
}
