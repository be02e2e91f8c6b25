//! Session shopping cart.
//!
//! The cart is a `product_id -> quantity` map inside the session entry.
//! A session is created lazily on the first mutation, so browsing and
//! reading an empty cart never set a cookie. Totals are recomputed from
//! the live product list on every read.

pub mod types;

use axum::{
    extract::{Extension, Path},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use ulid::Ulid;

use crate::api::state::AppState;
use crate::store::Store;

use super::club::session::{current_session, ensure_session};
use types::{price_cart, AddItemRequest, CartResponse, OrderResponse, SetItemRequest};

#[utoipa::path(
    get,
    path = "/v1/cart",
    responses(
        (status = 200, description = "Cart contents and totals", body = CartResponse)
    ),
    tag = "cart"
)]
pub async fn get_cart(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    // No session (or an expired one) is just an empty cart.
    let Some(token_hash) = current_session(&state, &headers).await else {
        return Json(CartResponse::default()).into_response();
    };
    let Some(cart) = state
        .with_session(&token_hash, |entry| entry.cart.clone())
        .await
    else {
        return Json(CartResponse::default()).into_response();
    };

    let products = store.products(None).await;
    Json(price_cart(&cart, &products)).into_response()
}

#[utoipa::path(
    post,
    path = "/v1/cart/items",
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Quantity added, updated cart returned", body = CartResponse),
        (status = 400, description = "Invalid quantity", body = String),
        (status = 404, description = "Unknown product")
    ),
    tag = "cart"
)]
pub async fn add_item(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
    payload: Option<Json<AddItemRequest>>,
) -> impl IntoResponse {
    let Some(Json(payload)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    let quantity = payload.quantity.unwrap_or(1);
    let Ok(quantity) = u32::try_from(quantity) else {
        return (StatusCode::BAD_REQUEST, "Invalid quantity.".to_string()).into_response();
    };
    if quantity == 0 {
        return (StatusCode::BAD_REQUEST, "Invalid quantity.".to_string()).into_response();
    }

    if store.product(&payload.product_id).await.is_none() {
        return StatusCode::NOT_FOUND.into_response();
    }

    let (token_hash, new_cookie) = match ensure_session(&state, &headers).await {
        Ok(session) => session,
        Err(status) => return status.into_response(),
    };

    state
        .with_session(&token_hash, |entry| {
            // Missing entry counts as 0, then saturate rather than wrap.
            let current = entry.cart.get(&payload.product_id).copied().unwrap_or(0);
            entry
                .cart
                .insert(payload.product_id.clone(), current.saturating_add(quantity));
        })
        .await;

    debug!(product_id = %payload.product_id, quantity, "cart add");
    cart_response(&state, &store, &token_hash, new_cookie).await
}

#[utoipa::path(
    put,
    path = "/v1/cart/items/{id}",
    request_body = SetItemRequest,
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Quantity set, updated cart returned", body = CartResponse),
        (status = 400, description = "Invalid quantity", body = String),
        (status = 404, description = "Unknown product")
    ),
    tag = "cart"
)]
pub async fn set_item(
    Path(id): Path<String>,
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
    payload: Option<Json<SetItemRequest>>,
) -> impl IntoResponse {
    let Some(Json(payload)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    let Ok(quantity) = u32::try_from(payload.quantity) else {
        return (StatusCode::BAD_REQUEST, "Invalid quantity.".to_string()).into_response();
    };

    if store.product(&id).await.is_none() {
        return StatusCode::NOT_FOUND.into_response();
    }

    let (token_hash, new_cookie) = match ensure_session(&state, &headers).await {
        Ok(session) => session,
        Err(status) => return status.into_response(),
    };

    state
        .with_session(&token_hash, |entry| {
            if quantity == 0 {
                entry.cart.remove(&id);
            } else {
                entry.cart.insert(id.clone(), quantity);
            }
        })
        .await;

    cart_response(&state, &store, &token_hash, new_cookie).await
}

#[utoipa::path(
    delete,
    path = "/v1/cart",
    responses(
        (status = 204, description = "Cart cleared")
    ),
    tag = "cart"
)]
pub async fn clear_cart(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    if let Some(token_hash) = current_session(&state, &headers).await {
        state
            .with_session(&token_hash, |entry| entry.cart.clear())
            .await;
    }
    StatusCode::NO_CONTENT.into_response()
}

#[utoipa::path(
    post,
    path = "/v1/cart/checkout",
    responses(
        (status = 200, description = "Order captured, cart emptied", body = OrderResponse),
        (status = 400, description = "Empty cart", body = String)
    ),
    tag = "cart"
)]
pub async fn checkout(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    let Some(token_hash) = current_session(&state, &headers).await else {
        return (StatusCode::BAD_REQUEST, "Cart is empty.".to_string()).into_response();
    };
    let Some(cart) = state
        .with_session(&token_hash, |entry| entry.cart.clone())
        .await
    else {
        return (StatusCode::BAD_REQUEST, "Cart is empty.".to_string()).into_response();
    };

    let products = store.products(None).await;
    let priced = price_cart(&cart, &products);
    if priced.items.is_empty() {
        return (StatusCode::BAD_REQUEST, "Cart is empty.".to_string()).into_response();
    }

    // Mock payment: always succeeds. The cart empties once the order is
    // captured.
    state
        .with_session(&token_hash, |entry| entry.cart.clear())
        .await;

    let order = OrderResponse {
        order_id: Ulid::new().to_string(),
        total: priced.total,
        items: priced.items,
        status: "paid".to_string(),
    };
    debug!(order_id = %order.order_id, total = order.total, "checkout");
    (StatusCode::OK, Json(order)).into_response()
}

async fn cart_response(
    state: &AppState,
    store: &Store,
    token_hash: &[u8],
    new_cookie: Option<HeaderValue>,
) -> axum::response::Response {
    let cart = state
        .with_session(token_hash, |entry| entry.cart.clone())
        .await
        .unwrap_or_default();
    let products = store.products(None).await;

    let mut response_headers = HeaderMap::new();
    if let Some(cookie) = new_cookie {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (
        StatusCode::OK,
        response_headers,
        Json(price_cart(&cart, &products)),
    )
        .into_response()
}
