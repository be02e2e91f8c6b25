//! Member account management.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::api::handlers::club::session::require_admin;
use crate::api::handlers::{normalize_email, valid_email};
use crate::api::state::AppState;
use crate::store::{CreateUserOutcome, Store};

use super::types::{CreateUserRequest, UserResponse};

#[utoipa::path(
    get,
    path = "/v1/admin/users",
    responses(
        (status = 200, description = "All registered members", body = [UserResponse]),
        (status = 401, description = "Missing or invalid session cookie")
    ),
    tag = "admin"
)]
pub async fn list_users(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    if let Err(status) = require_admin(&headers, &state, &store).await {
        return status.into_response();
    }
    let users: Vec<UserResponse> = store
        .users()
        .await
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Json(users).into_response()
}

#[utoipa::path(
    post,
    path = "/v1/admin/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Member created", body = UserResponse),
        (status = 400, description = "Invalid input", body = String),
        (status = 401, description = "Missing or invalid session cookie"),
        (status = 409, description = "Email already registered", body = String)
    ),
    tag = "admin"
)]
pub async fn create_user(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
    payload: Option<Json<CreateUserRequest>>,
) -> impl IntoResponse {
    if let Err(status) = require_admin(&headers, &state, &store).await {
        return status.into_response();
    }

    let Some(Json(payload)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    let email = normalize_email(&payload.email);
    if !valid_email(&email) {
        return (StatusCode::BAD_REQUEST, "Invalid email.".to_string()).into_response();
    }
    if payload.password.is_empty() {
        return (StatusCode::BAD_REQUEST, "Password is required.".to_string()).into_response();
    }
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return (StatusCode::BAD_REQUEST, "Name is required.".to_string()).into_response();
    }

    match store
        .add_user(
            email,
            SecretString::from(payload.password),
            name,
            payload.is_admin,
            payload.membership,
        )
        .await
    {
        Ok(CreateUserOutcome::Created(user)) => {
            (StatusCode::CREATED, Json(UserResponse::from(user))).into_response()
        }
        Ok(CreateUserOutcome::EmailTaken) => (
            StatusCode::CONFLICT,
            "Email already registered.".to_string(),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to create user: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/v1/admin/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "Member deleted"),
        (status = 400, description = "Admins cannot delete their own account", body = String),
        (status = 401, description = "Missing or invalid session cookie"),
        (status = 404, description = "User not found")
    ),
    tag = "admin"
)]
pub async fn delete_user(
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    let principal = match require_admin(&headers, &state, &store).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    if principal.user_id == id {
        return (
            StatusCode::BAD_REQUEST,
            "You cannot delete your own account.".to_string(),
        )
            .into_response();
    }

    match store.delete_user(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            error!("Failed to delete user: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
