use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::error;

use crate::api::handlers::valid_date;
use crate::api::state::AppState;
use crate::store::{models::Visit, Store};

use super::session::require_user;
use super::types::{PanelResponse, VisitRequest};

#[utoipa::path(
    get,
    path = "/v1/club/panel",
    responses(
        (status = 200, description = "Membership, benefits and visit history", body = PanelResponse),
        (status = 401, description = "Missing or invalid session cookie")
    ),
    tag = "club"
)]
pub async fn panel(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    let principal = match require_user(&headers, &state, &store).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let Some(user) = store.user_by_id(principal.user_id).await else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let body = PanelResponse {
        name: user.name,
        email: user.email,
        membership: user.membership,
        visits: user.visits,
    };
    (StatusCode::OK, Json(body)).into_response()
}

#[utoipa::path(
    post,
    path = "/v1/club/visits",
    request_body = VisitRequest,
    responses(
        (status = 201, description = "Visit recorded", body = Visit),
        (status = 400, description = "Invalid input", body = String),
        (status = 401, description = "Missing or invalid session cookie")
    ),
    tag = "club"
)]
pub async fn add_visit(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
    payload: Option<Json<VisitRequest>>,
) -> impl IntoResponse {
    let principal = match require_user(&headers, &state, &store).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let Some(Json(payload)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    let service = payload.service.trim();
    if service.is_empty() {
        return (StatusCode::BAD_REQUEST, "Service is required.".to_string()).into_response();
    }
    if !valid_date(&payload.date) {
        return (
            StatusCode::BAD_REQUEST,
            "Date must look like YYYY-MM-DD.".to_string(),
        )
            .into_response();
    }

    let visit = Visit {
        date: payload.date.clone(),
        service: service.to_string(),
    };
    match store.add_visit(principal.user_id, visit.clone()).await {
        Ok(true) => (StatusCode::CREATED, Json(visit)).into_response(),
        Ok(false) => StatusCode::UNAUTHORIZED.into_response(),
        Err(err) => {
            error!("Failed to record visit: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
