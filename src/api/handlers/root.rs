use axum::response::IntoResponse;

// undocumented banner route, mostly for load balancers and curl
pub async fn root() -> impl IntoResponse {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
