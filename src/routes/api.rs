use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// API Router Module
///
/// JSON endpoints under `/api`. None of them is gated: they report on the session and the
/// route table and never expose library data, which stays behind the backend.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // POST   /api/session  sign in through the backend and set the session cookie
        // GET    /api/session  the session decoded from the request
        // DELETE /api/session  sign out
        .route(
            "/api/session",
            get(handlers::current_session)
                .post(handlers::login)
                .delete(handlers::logout),
        )
        // GET /api/routes
        // The declared view table with each path's allowed roles.
        .route("/api/routes", get(handlers::route_manifest))
        // GET /api/navigation?path=/admin/books
        // Dry-run of the guard for the caller's session.
        .route("/api/navigation", get(handlers::preview_navigation))
}
