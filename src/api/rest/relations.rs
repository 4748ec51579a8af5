//! Relation endpoints

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
use crate::handler::RelationHandler;
use crate::types::{DateRange, EntityId, FormSubmission, InstanceId};

type HostPath = Path<(String, String, InstanceId)>;

/// `Path` has already percent-decoded the segments
fn resolve(state: &AppState, component: &str, area: &str) -> Result<RelationHandler, Response> {
    state.handler(component, area).map_err(error_response)
}

/// GET /api/relations/:component/:area/:instanceid - Relation view of one host
pub async fn get_relation(
    State(state): State<Arc<AppState>>,
    Path((component, area, instance_id)): HostPath,
) -> Response {
    let handler = match resolve(&state, &component, &area) {
        Ok(handler) => handler,
        Err(response) => return response,
    };
    match handler.load_for_host(instance_id) {
        Ok(view) => Json(ApiResponse::new(view)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Body of a save request: the submitted rows, the row to save and the
/// candidate dates to validate against
#[derive(Debug, Deserialize)]
pub struct SaveRelationRequest {
    #[serde(flatten)]
    pub submission: FormSubmission,
    #[serde(default)]
    pub index: usize,
    #[serde(rename = "dateranges", default)]
    pub date_ranges: Vec<DateRange>,
}

#[derive(Debug, Serialize)]
pub struct SaveRelationResponse {
    #[serde(rename = "entityid")]
    pub entity_id: Option<EntityId>,
}

/// PUT /api/relations/:component/:area/:instanceid - Validate, then save
///
/// Conflicts reject the request with 422 and the per-row messages; nothing is
/// written in that case.
pub async fn put_relation(
    State(state): State<Arc<AppState>>,
    Path((component, area, instance_id)): HostPath,
    Json(request): Json<SaveRelationRequest>,
) -> Response {
    let handler = match resolve(&state, &component, &area) {
        Ok(handler) => handler,
        Err(response) => return response,
    };

    let validation = match handler.validate(&request.submission, &request.date_ranges, instance_id) {
        Ok(validation) => validation,
        Err(e) => return error_response(e),
    };
    if !validation.is_valid() {
        let error = ApiError::validation(validation.errors);
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(error)).into_response();
    }

    match handler.save(instance_id, &request.submission, request.index) {
        Ok(entity_id) => Json(ApiResponse::new(SaveRelationResponse { entity_id })).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteRelationResponse {
    pub deleted: bool,
}

/// DELETE /api/relations/:component/:area/:instanceid - Remove one host's relation
pub async fn delete_relation(
    State(state): State<Arc<AppState>>,
    Path((component, area, instance_id)): HostPath,
) -> Response {
    let handler = match resolve(&state, &component, &area) {
        Ok(handler) => handler,
        Err(response) => return response,
    };
    match handler.delete_for_host(instance_id) {
        Ok(deleted) => Json(ApiResponse::new(DeleteRelationResponse { deleted })).into_response(),
        Err(e) => error_response(e),
    }
}

/// Query parameters for the outlier check
#[derive(Debug, Deserialize)]
pub struct DivergentParams {
    /// Area of the sub-instances, e.g. `optiondate`
    pub subarea: String,
}

#[derive(Debug, Serialize)]
pub struct DivergentResponse {
    pub divergent: bool,
}

/// GET /api/relations/:component/:area/:parentid/divergent?subarea=...
pub async fn get_divergent(
    State(state): State<Arc<AppState>>,
    Path((component, area, parent_id)): HostPath,
    Query(params): Query<DivergentParams>,
) -> Response {
    let handler = match resolve(&state, &component, &area)
        .and_then(|h| h.with_sub_area(&state.host_kinds, &params.subarea).map_err(error_response))
    {
        Ok(handler) => handler,
        Err(response) => return response,
    };
    match handler.has_divergent_sub_entities(parent_id) {
        Ok(divergent) => Json(ApiResponse::new(DivergentResponse { divergent })).into_response(),
        Err(e) => error_response(e),
    }
}
