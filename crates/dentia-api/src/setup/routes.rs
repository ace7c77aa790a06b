//! Route configuration and setup.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Json, Router,
};
use dentia_core::Config;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;
use crate::auth::middleware::{auth_middleware, AuthState};
use crate::handlers;
use crate::state::AppState;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState {
        jwt_secret: config.jwt_secret.clone(),
    });

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/openapi.json", get(openapi_json))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/token", post(handlers::auth::login))
        .route("/doctors", get(handlers::doctors::list_doctors))
        .route("/doctors/{doctor_id}", get(handlers::doctors::get_doctor))
        .route("/products", get(handlers::products::list_products))
        .route(
            "/products/{product_id}",
            get(handlers::products::get_product),
        );

    let protected_routes = Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/update", put(handlers::auth::update))
        .route(
            "/profile",
            get(handlers::profile::get_profile).put(handlers::profile::update_profile),
        )
        .route("/profile/avatar", post(handlers::profile::upload_avatar))
        .route("/doctors", post(handlers::doctors::add_doctor))
        .route(
            "/doctors/{doctor_id}",
            put(handlers::doctors::update_doctor).delete(handlers::doctors::delete_doctor),
        )
        .route("/products", post(handlers::products::add_product))
        .route(
            "/products/{product_id}",
            put(handlers::products::update_product).delete(handlers::products::delete_product),
        )
        .route(
            "/orders",
            post(handlers::orders::create_order).get(handlers::orders::list_orders),
        )
        .route("/orders/{order_id}", get(handlers::orders::get_order_detail))
        .route(
            "/orders/{order_id}/status",
            put(handlers::orders::update_order_status),
        )
        .route(
            "/appointments",
            post(handlers::appointments::book_appointment)
                .get(handlers::appointments::list_appointments),
        )
        .route(
            "/appointments/{appointment_id}/status",
            put(handlers::appointments::update_appointment_status),
        )
        .route("/scans", post(handlers::scans::analyze_scan))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    // Generated PDF reports are served as plain static files.
    let reports_service = ServeDir::new(&state.config.reports_dir);

    let app = public_routes
        .merge(protected_routes)
        .nest_service("/reports", reports_service)
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(RequestBodyLimitLayer::new(config.max_scan_size_bytes))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();
        CorsLayer::new()
            .allow_origin(origins?)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    };
    Ok(cors)
}

async fn health() -> &'static str {
    "ok"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
