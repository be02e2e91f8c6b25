//! Public catalog endpoints.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::store::{
    models::{Category, Product},
    Store,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CatalogQuery {
    /// Category slug to filter on; unknown slugs yield an empty list.
    pub category: Option<String>,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct CatalogResponse {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

#[utoipa::path(
    get,
    path = "/v1/catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Categories and products", body = CatalogResponse)
    ),
    tag = "shop"
)]
pub async fn catalog(
    Query(query): Query<CatalogQuery>,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    let categories = store.categories().await;
    let products = store.products(query.category.as_deref()).await;
    Json(CatalogResponse {
        categories,
        products,
    })
}

#[utoipa::path(
    get,
    path = "/v1/catalog/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product detail", body = Product),
        (status = 404, description = "Product not found")
    ),
    tag = "shop"
)]
pub async fn product_detail(
    Path(id): Path<String>,
    store: Extension<Arc<Store>>,
) -> impl IntoResponse {
    match store.product(&id).await {
        Some(product) => (StatusCode::OK, Json(product)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
