//! Workshop calendar blocking.

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
use crate::store::Store;

use super::types::BlockDateRequest;

#[utoipa::path(
    post,
    path = "/v1/admin/availability",
    request_body = BlockDateRequest,
    responses(
        (status = 200, description = "Blocked dates after the change", body = [String]),
        (status = 400, description = "Invalid input", body = String),
        (status = 401, description = "Missing or invalid session cookie")
    ),
    tag = "admin"
)]
pub async fn block_date(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
    payload: Option<Json<BlockDateRequest>>,
) -> impl IntoResponse {
    if let Err(status) = require_admin(&headers, &state, &store).await {
        return status.into_response();
    }
    let Some(Json(payload)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };
    if !valid_date(&payload.date) {
        return (
            StatusCode::BAD_REQUEST,
            "Date must look like YYYY-MM-DD.".to_string(),
        )
            .into_response();
    }

    // Re-blocking an already blocked date is a no-op, not an error.
    match store.block_date(&payload.date).await {
        Ok(_) => Json(store.blocked_dates().await).into_response(),
        Err(err) => {
            error!("Failed to block date: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/v1/admin/availability/{date}",
    params(("date" = String, Path, description = "Date in YYYY-MM-DD form")),
    responses(
        (status = 200, description = "Blocked dates after the change", body = [String]),
        (status = 401, description = "Missing or invalid session cookie")
    ),
    tag = "admin"
)]
pub async fn unblock_date(
    Path(date): Path<String>,
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    if let Err(status) = require_admin(&headers, &state, &store).await {
        return status.into_response();
    }
    match store.unblock_date(&date).await {
        Ok(_) => Json(store.blocked_dates().await).into_response(),
        Err(err) => {
            error!("Failed to unblock date: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
