//! Appointment review.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::error;

use crate::api::handlers::club::session::require_admin;
use crate::api::state::AppState;
use crate::store::{models::Appointment, Store};

#[utoipa::path(
    get,
    path = "/v1/admin/appointments",
    responses(
        (status = 200, description = "All booked appointments", body = [Appointment]),
        (status = 401, description = "Missing or invalid session cookie")
    ),
    tag = "admin"
)]
pub async fn list_appointments(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    if let Err(status) = require_admin(&headers, &state, &store).await {
        return status.into_response();
    }
    Json(store.appointments().await).into_response()
}

#[utoipa::path(
    delete,
    path = "/v1/admin/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 204, description = "Appointment deleted (or already absent)"),
        (status = 401, description = "Missing or invalid session cookie")
    ),
    tag = "admin"
)]
pub async fn delete_appointment(
    Path(id): Path<String>,
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    if let Err(status) = require_admin(&headers, &state, &store).await {
        return status.into_response();
    }
    match store.delete_appointment(&id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            error!("Failed to delete appointment: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
