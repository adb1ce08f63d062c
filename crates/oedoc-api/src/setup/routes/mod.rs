//! Route configuration and setup

mod health;

use crate::handlers;
use crate::middleware::{
    request_id_middleware, security_headers_middleware, RequestSpan, SecurityHeadersConfig,
};
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use oedoc_core::Config;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Setup all application routes.
///
/// Service routes live under `[/<APP_VERSION>]/<SERVICE_NAME>`; health and
/// documentation routes stay at the root.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let prefix = config.route_prefix();

    let security_headers_config = Arc::new(SecurityHeadersConfig::new(config.public_host()));
    let openapi = crate::api_doc::get_openapi_spec(&prefix);

    let app = Router::new()
        .nest(&prefix, service_routes(security_headers_config))
        .merge(health::health_routes())
        .route(
            "/api/openapi.json",
            get(move || {
                let spec = openapi.clone();
                async move { Json(spec) }
            }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
                .layer(cors),
        )
        .with_state(state);

    tracing::info!(route_prefix = %prefix, "Routes configured");

    Ok(app)
}

fn service_routes(security_headers_config: Arc<SecurityHeadersConfig>) -> Router<Arc<AppState>> {
    let file_routes = Router::new()
        .route("/file/{guid}", get(handlers::file::get_file_by_guid))
        .route(
            "/file/uuid/{company}/{objectType}/{documentType}/{objectId}/{culture}",
            get(handlers::file_lookup::lookup_file),
        )
        .route(
            "/file/{company}/{objectType}/{documentType}/{objectId}/{culture}",
            get(handlers::file::get_file),
        )
        .layer(axum::middleware::from_fn_with_state(
            security_headers_config,
            security_headers_middleware,
        ));

    Router::new().merge(file_routes).route(
        "/objectlist/{company}/{objectType}/{objectId}",
        get(handlers::object_list::get_object_list),
    )
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
