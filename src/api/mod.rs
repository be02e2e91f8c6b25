use crate::{
    api::handlers::{health, root},
    store::Store,
};
use anyhow::{anyhow, Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method, Request,
    },
    routing::{get, options},
    Extension, Router,
};
use std::{path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use url::Url;
use utoipa_swagger_ui::SwaggerUi;

pub(crate) mod handlers;
// OpenAPI router wiring and route registration live in openapi.rs.
mod openapi;
mod state;

pub use openapi::openapi;
pub use state::{AppConfig, AppState};

/// Build the full application router with layers and shared state applied.
///
/// Split out from `new` so tests can drive the router with `oneshot`
/// without binding a socket.
///
/// # Errors
/// Returns an error if the configured frontend base URL cannot be parsed
/// into a CORS origin.
pub fn app(store: Arc<Store>, state: Arc<AppState>) -> Result<Router> {
    let origin = frontend_origin(state.config().frontend_base_url())?;
    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(AllowOrigin::exact(origin))
        .allow_credentials(true);

    // Build the router from OpenAPI-wired routes, then extend it with
    // non-doc routes like `/` and preflight-only `OPTIONS /health`.
    let (router, api_doc) = openapi::api_router().split_for_parts();
    let router = router
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api_doc))
        .route("/", get(root::root))
        .route("/health", options(health::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(state))
                .layer(Extension(store)),
        );

    Ok(router)
}

/// Start the server
/// # Errors
/// Return error if failed to open the store or start the server
pub async fn new(port: u16, data_dir: PathBuf, config: AppConfig) -> Result<()> {
    let store = Arc::new(Store::open(data_dir).await?);
    let state = Arc::new(AppState::new(config));

    let app = app(store, state)?;

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

fn frontend_origin(frontend_base_url: &str) -> Result<HeaderValue> {
    let parsed = Url::parse(frontend_base_url)
        .with_context(|| format!("Invalid frontend base URL: {frontend_base_url}"))?;
    let host = parsed.host_str().ok_or_else(|| {
        anyhow!("Frontend base URL must include a valid host: {frontend_base_url}")
    })?;
    let port = parsed
        .port()
        .map_or_else(String::new, |port| format!(":{port}"));
    let origin = format!("{}://{}{}", parsed.scheme(), host, port);
    HeaderValue::from_str(&origin).context("Failed to build frontend origin header")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontend_origin_strips_path() {
        let origin = frontend_origin("https://club.gorillaz.co/shop/").unwrap();
        assert_eq!(origin, HeaderValue::from_static("https://club.gorillaz.co"));
    }

    #[test]
    fn frontend_origin_keeps_explicit_port() {
        let origin = frontend_origin("http://localhost:8080").unwrap();
        assert_eq!(origin, HeaderValue::from_static("http://localhost:8080"));
    }

    #[test]
    fn frontend_origin_rejects_garbage() {
        assert!(frontend_origin("not a url").is_err());
    }
}
