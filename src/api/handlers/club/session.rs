//! Session endpoints and cookie plumbing.
//!
//! Missing or expired cookies read as "no session" rather than an error
//! so the endpoints never leak whether a session existed.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, AUTHORIZATION, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::api::state::{hash_session_token, AppConfig, AppState};
use crate::store::Store;

use super::types::SessionResponse;

const SESSION_COOKIE_NAME: &str = "motoclub_session";

/// Authenticated user context derived from the session cookie.
#[derive(Clone, Debug)]
pub(crate) struct Principal {
    pub(crate) user_id: Uuid,
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) is_admin: bool,
}

#[utoipa::path(
    get,
    path = "/v1/club/session",
    responses(
        (status = 200, description = "Session is active and logged in", body = SessionResponse),
        (status = 204, description = "No active login")
    ),
    tag = "club"
)]
pub async fn session(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    match require_user(&headers, &state, &store).await {
        Ok(principal) => (StatusCode::OK, Json(SessionResponse::from(principal))).into_response(),
        Err(_) => StatusCode::NO_CONTENT.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/v1/club/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tag = "club"
)]
pub async fn logout(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    if let Some(token) = extract_session_token(&headers) {
        state.remove_session(&hash_session_token(&token)).await;
    }

    // Always clear the cookie, even if the session was already gone.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(state.config()) {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (StatusCode::NO_CONTENT, response_headers).into_response()
}

/// Resolve the cookie to the hash of a live session, if any.
pub(crate) async fn current_session(state: &AppState, headers: &HeaderMap) -> Option<Vec<u8>> {
    let token = extract_session_token(headers)?;
    let token_hash = hash_session_token(&token);
    state.with_session(&token_hash, |_| ()).await.map(|()| token_hash)
}

/// Reuse the caller's session or create one, returning the cookie to set
/// when a session was created. Carts are attached before login, so this
/// runs on the first cart mutation too.
pub(crate) async fn ensure_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(Vec<u8>, Option<HeaderValue>), StatusCode> {
    if let Some(token_hash) = current_session(state, headers).await {
        return Ok((token_hash, None));
    }

    let token = state.insert_session().await.map_err(|err| {
        error!("Failed to create session: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let cookie = session_cookie(state.config(), &token).map_err(|err| {
        error!("Failed to build session cookie: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok((hash_session_token(&token), Some(cookie)))
}

/// Resolve the session cookie into a logged-in principal, or 401.
pub(crate) async fn require_user(
    headers: &HeaderMap,
    state: &AppState,
    store: &Store,
) -> Result<Principal, StatusCode> {
    let token_hash = current_session(state, headers)
        .await
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let user_id = state
        .with_session(&token_hash, |entry| entry.user_id)
        .await
        .flatten()
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let user = store
        .user_by_id(user_id)
        .await
        .ok_or(StatusCode::UNAUTHORIZED)?;
    Ok(Principal {
        user_id: user.id,
        email: user.email,
        name: user.name,
        is_admin: user.is_admin,
    })
}

/// Like [`require_user`] but additionally demands the admin flag.
/// Non-admin callers get 404 so the back-office is not enumerable.
pub(crate) async fn require_admin(
    headers: &HeaderMap,
    state: &AppState,
    store: &Store,
) -> Result<Principal, StatusCode> {
    let principal = require_user(headers, state, store).await?;
    if principal.is_admin {
        Ok(principal)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// Build an `HttpOnly` cookie for the session token.
pub(crate) fn session_cookie(
    config: &AppConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.session_ttl_seconds();
    // Only mark cookies secure when the frontend is served over HTTPS.
    let secure = config.session_cookie_secure();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn clear_session_cookie(config: &AppConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = config.session_cookie_secure();
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(token);
    }
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
