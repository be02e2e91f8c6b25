//! Course management.

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
use crate::store::{models::Course, Store};

use super::types::CoursePayload;

fn validate(payload: &CoursePayload) -> Result<(), String> {
    if payload.title.trim().is_empty() {
        return Err("Course title is required.".to_string());
    }
    if !valid_date(&payload.date) {
        return Err("Date must look like YYYY-MM-DD.".to_string());
    }
    if payload.price < 0 {
        return Err("Invalid price.".to_string());
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/v1/admin/courses",
    request_body = CoursePayload,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Invalid input", body = String),
        (status = 401, description = "Missing or invalid session cookie")
    ),
    tag = "admin"
)]
pub async fn create_course(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
    payload: Option<Json<CoursePayload>>,
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
        .add_course(
            payload.title.trim().to_string(),
            payload.description,
            payload.date,
            payload.price,
        )
        .await
    {
        Ok(course) => (StatusCode::CREATED, Json(course)).into_response(),
        Err(err) => {
            error!("Failed to create course: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/v1/admin/courses/{id}",
    request_body = CoursePayload,
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Invalid input", body = String),
        (status = 401, description = "Missing or invalid session cookie"),
        (status = 404, description = "Course not found")
    ),
    tag = "admin"
)]
pub async fn update_course(
    Path(id): Path<String>,
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
    payload: Option<Json<CoursePayload>>,
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
        .update_course(
            &id,
            payload.title.trim().to_string(),
            payload.description,
            payload.date,
            payload.price,
        )
        .await
    {
        Ok(Some(course)) => (StatusCode::OK, Json(course)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            error!("Failed to update course: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/v1/admin/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 204, description = "Course deleted (or already absent)"),
        (status = 401, description = "Missing or invalid session cookie")
    ),
    tag = "admin"
)]
pub async fn delete_course(
    Path(id): Path<String>,
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    if let Err(status) = require_admin(&headers, &state, &store).await {
        return status.into_response();
    }
    match store.delete_course(&id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            error!("Failed to delete course: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
