//! Event management.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::error;

use crate::api::handlers::club::session::require_admin;
use crate::api::handlers::valid_date;
use crate::api::state::AppState;
use crate::store::{models::Event, Store};

use super::types::EventPayload;

fn validate(payload: &EventPayload) -> Result<(), String> {
    if payload.title.trim().is_empty() {
        return Err("Event title is required.".to_string());
    }
    if !valid_date(&payload.date) {
        return Err("Date must look like YYYY-MM-DD.".to_string());
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/v1/admin/events",
    request_body = EventPayload,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid input", body = String),
        (status = 401, description = "Missing or invalid session cookie")
    ),
    tag = "admin"
)]
pub async fn create_event(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
    payload: Option<Json<EventPayload>>,
) -> impl IntoResponse {
    if let Err(status) = require_admin(&headers, &state, &store).await {
        return status.into_response();
    }
    let Some(Json(payload)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };
    if let Err(message) = validate(&payload) {
        return (StatusCode::BAD_REQUEST, message).into_response();
    }

    match store
        .add_event(
            payload.title.trim().to_string(),
            payload.description,
            payload.date,
            payload.location,
        )
        .await
    {
        Ok(event) => (StatusCode::CREATED, Json(event)).into_response(),
        Err(err) => {
            error!("Failed to create event: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/v1/admin/events/{id}",
    request_body = EventPayload,
    params(("id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Invalid input", body = String),
        (status = 401, description = "Missing or invalid session cookie"),
        (status = 404, description = "Event not found")
    ),
    tag = "admin"
)]
pub async fn update_event(
    Path(id): Path<String>,
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
    payload: Option<Json<EventPayload>>,
) -> impl IntoResponse {
    if let Err(status) = require_admin(&headers, &state, &store).await {
        return status.into_response();
    }
    let Some(Json(payload)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };
    if let Err(message) = validate(&payload) {
        return (StatusCode::BAD_REQUEST, message).into_response();
    }

    match store
        .update_event(
            &id,
            payload.title.trim().to_string(),
            payload.description,
            payload.date,
            payload.location,
        )
        .await
    {
        Ok(Some(event)) => (StatusCode::OK, Json(event)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            error!("Failed to update event: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/v1/admin/events/{id}",
    params(("id" = String, Path, description = "Event id")),
    responses(
        (status = 204, description = "Event deleted (or already absent)"),
        (status = 401, description = "Missing or invalid session cookie")
    ),
    tag = "admin"
)]
pub async fn delete_event(
    Path(id): Path<String>,
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    if let Err(status) = require_admin(&headers, &state, &store).await {
        return status.into_response();
    }
    match store.delete_event(&id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            error!("Failed to delete event: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
