use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::api::state::AppState;
use crate::store::Store;

use super::session::ensure_session;
use super::types::{LoginRequest, SessionResponse};

#[utoipa::path(
    post,
    path = "/v1/club/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = SessionResponse),
        (status = 400, description = "Missing payload"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "club"
)]
#[instrument(skip_all)]
pub async fn login(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let Some(Json(payload)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    // Plaintext comparison against the users collection; failures are
    // deliberately indistinguishable (unknown email vs wrong password).
    let Some(user) = store.authenticate(&payload.email, &payload.password).await else {
        return (StatusCode::UNAUTHORIZED, "Credenciales inválidas".to_string()).into_response();
    };

    // Reuse a pre-login session so a cart built while browsing survives
    // the login, exactly like the cookie-session site this replaces.
    let (token_hash, new_cookie) = match ensure_session(&state, &headers).await {
        Ok(session) => session,
        Err(status) => return status.into_response(),
    };
    state
        .with_session(&token_hash, |entry| entry.user_id = Some(user.id))
        .await;

    debug!(user_id = %user.id, "club login");

    let mut response_headers = HeaderMap::new();
    if let Some(cookie) = new_cookie {
        response_headers.insert(SET_COOKIE, cookie);
    }
    let body = SessionResponse {
        user_id: user.id.to_string(),
        email: user.email,
        name: user.name,
        is_admin: user.is_admin,
    };
    (StatusCode::OK, response_headers, Json(body)).into_response()
}
