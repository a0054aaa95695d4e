use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Access-control core: roles, sessions, the guard and the route table it protects.
pub mod guard;
pub mod models;
pub mod session;
pub mod views;

// Client runtime: navigation history, transition overlay, assistive announcements.
pub mod a11y;
pub mod navigation;
pub mod overlay;

// Service plumbing.
pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;

// Route declarations (public, per-role sections, common, API).
pub mod routes;

// --- Public Re-exports ---

pub use backend::{BackendApi, BackendState, HttpBackend};
pub use config::AppConfig;
pub use routes::ViewRouter;

/// ApiDoc
///
/// OpenAPI description of the JSON endpoints, served at `/api-docs/openapi.json`.
/// View routes return HTML and are listed by `GET /api/routes` instead.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::login, handlers::current_session, handlers::logout,
        handlers::route_manifest, handlers::preview_navigation
    ),
    components(
        schemas(
            models::Role, models::LoginRequest, models::LoginResponse, models::SessionView,
            models::RouteManifestEntry, models::GuardOutcome, models::NavigationPreview,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "librario-web", description = "Library client views and session API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared, immutable state handed to every handler and extractor.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Client for the library backend (login only; pages call it directly).
    pub backend: BackendState,
    /// The validated view route table.
    pub views: Arc<ViewRouter>,
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for BackendState {
    fn from_ref(app_state: &AppState) -> BackendState {
        app_state.backend.clone()
    }
}

/// create_router
///
/// Assembles the service: API routes, the guarded view table, the login fallback, and the
/// observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let views = Arc::clone(&state.views);

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", axum::routing::get(|| async { "ok" }))
        .merge(routes::api::api_routes())
        // Views: public paths, guarded sections, guarded common paths.
        .merge(views.view_routes(&state.config))
        // Catch-all, lowest priority: unmatched paths render the login view.
        .fallback(routes::fallback_view)
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Request span carrying method, URI and the `x-request-id` set above.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
