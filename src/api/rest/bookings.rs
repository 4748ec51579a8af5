//! Booking cleanup endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{error_response, ApiResponse};
use crate::api::state::AppState;
use crate::handler::delete_relations_for_booking;
use crate::types::InstanceId;

/// DELETE /api/bookings/:bookingid/relations - Clear every relation under a booking
///
/// Partial failures answer 500 with the report, so callers can retry the
/// listed ids.
pub async fn delete_booking_relations(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<InstanceId>,
) -> Response {
    match delete_relations_for_booking(&state.deps, &state.host_kinds, booking_id) {
        Ok(report) if report.succeeded() => Json(ApiResponse::new(report)).into_response(),
        Ok(report) => (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiResponse::new(report))).into_response(),
        Err(e) => error_response(e),
    }
}
