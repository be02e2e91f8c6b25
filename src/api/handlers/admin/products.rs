//! Product management.

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
use crate::store::{
    models::Product, CreateProductOutcome, Store, UpdateProductOutcome,
};

use super::types::{CreateProductRequest, UpdateProductRequest};

#[utoipa::path(
    post,
    path = "/v1/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid input", body = String),
        (status = 401, description = "Missing or invalid session cookie"),
        (status = 409, description = "Product id already exists", body = String)
    ),
    tag = "admin"
)]
pub async fn create_product(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
    payload: Option<Json<CreateProductRequest>>,
) -> impl IntoResponse {
    if let Err(status) = require_admin(&headers, &state, &store).await {
        return status.into_response();
    }

    let Some(Json(payload)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    let id = payload.id.trim().to_string();
    let name = payload.name.trim().to_string();
    if id.is_empty() || name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "Product id and name are required.".to_string(),
        )
            .into_response();
    }
    if payload.price < 0 {
        return (StatusCode::BAD_REQUEST, "Invalid price.".to_string()).into_response();
    }

    let product = Product {
        id,
        name,
        price: payload.price,
        category: payload.category.clone(),
        image: payload
            .image
            .unwrap_or_else(|| "/images/download.png".to_string()),
    };

    match store.insert_product(product.clone()).await {
        Ok(CreateProductOutcome::Created) => {
            (StatusCode::CREATED, Json(product)).into_response()
        }
        Ok(CreateProductOutcome::Conflict) => (
            StatusCode::CONFLICT,
            "Product with this id already exists.".to_string(),
        )
            .into_response(),
        Ok(CreateProductOutcome::UnknownCategory) => {
            (StatusCode::BAD_REQUEST, "Unknown category.".to_string()).into_response()
        }
        Err(err) => {
            error!("Failed to create product: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/v1/admin/products/{id}",
    request_body = UpdateProductRequest,
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Invalid input", body = String),
        (status = 401, description = "Missing or invalid session cookie"),
        (status = 404, description = "Product not found")
    ),
    tag = "admin"
)]
pub async fn update_product(
    Path(id): Path<String>,
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
    payload: Option<Json<UpdateProductRequest>>,
) -> impl IntoResponse {
    if let Err(status) = require_admin(&headers, &state, &store).await {
        return status.into_response();
    }

    let Some(Json(payload)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return (StatusCode::BAD_REQUEST, "Product name is required.".to_string()).into_response();
    }
    if payload.price < 0 {
        return (StatusCode::BAD_REQUEST, "Invalid price.".to_string()).into_response();
    }

    match store
        .update_product(&id, name, payload.price, payload.category, payload.image)
        .await
    {
        Ok(UpdateProductOutcome::Updated(product)) => {
            (StatusCode::OK, Json(product)).into_response()
        }
        Ok(UpdateProductOutcome::NotFound) => StatusCode::NOT_FOUND.into_response(),
        Ok(UpdateProductOutcome::UnknownCategory) => {
            (StatusCode::BAD_REQUEST, "Unknown category.".to_string()).into_response()
        }
        Err(err) => {
            error!("Failed to update product: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/v1/admin/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted (or already absent)"),
        (status = 401, description = "Missing or invalid session cookie")
    ),
    tag = "admin"
)]
pub async fn delete_product(
    Path(id): Path<String>,
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    if let Err(status) = require_admin(&headers, &state, &store).await {
        return status.into_response();
    }

    match store.delete_product(&id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            error!("Failed to delete product: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
