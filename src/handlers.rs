use crate::{
    AppState,
    error::AppError,
    guard::GuardDecision,
    models::{
        LoginRequest, LoginResponse, NavigationPreview, NavigationQuery, Role,
        RouteManifestEntry, SessionView,
    },
    session::{self, Session, SessionStore},
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

// --- Input Validation ---

/// validate_login
///
/// Runs the `LoginRequest` field rules. When both fields fail, the email message wins,
/// matching the order the login form checks them in.
fn validate_login(payload: &LoginRequest) -> Result<(), AppError> {
    payload.validate().map_err(|errors| {
        let fields = errors.field_errors();
        let message = ["email", "password"]
            .iter()
            .filter_map(|field| fields.get(*field))
            .flat_map(|field_errors| field_errors.iter())
            .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        AppError::Validation(message)
    })
}

// --- Handlers ---

/// login
///
/// [Public Route] Signs the user in through the backend and persists the session cookie.
///
/// The backend's role is upper-cased before parsing; a role outside ADMIN, LIBRARIAN and
/// MEMBER is refused without setting a cookie.
#[utoipa::path(
    post,
    path = "/api/session",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 401, description = "Credentials rejected", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid input or unknown role", body = crate::error::ErrorResponse),
        (status = 502, description = "Backend unreachable", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    validate_login(&payload)?;

    let response = state.backend.login(&payload).await?;

    let role: Role = response
        .role
        .to_uppercase()
        .parse()
        .map_err(|_| {
            AppError::Validation("Unknown role! Please contact administrator.".to_string())
        })?;
    let user_id = response.user.id_string();
    let email = response.user.email;

    let token = session::issue_token(&state.config, &user_id, role, &email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(%role, user_id = %user_id, "session started");

    let body = LoginResponse {
        role,
        user_id,
        email,
        landing: role.landing_path().to_string(),
    };
    Ok((jar.add(session::session_cookie(token)), Json(body)))
}

/// current_session
///
/// [Public Route] The session decoded from the request. Anonymous visitors get nulls.
#[utoipa::path(
    get,
    path = "/api/session",
    responses((status = 200, description = "Current session", body = SessionView))
)]
pub async fn current_session(session: Session) -> Json<SessionView> {
    Json(session.view())
}

/// logout
///
/// [Public Route] Clears the session cookie. The next request is anonymous.
#[utoipa::path(
    delete,
    path = "/api/session",
    responses((status = 204, description = "Signed out"))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    // Always sent, even when the request carried no cookie to remove.
    let mut removal = session::session_cookie(String::new());
    removal.make_removal();
    (jar.add(removal), StatusCode::NO_CONTENT)
}

/// route_manifest
///
/// [Public Route] Every declared view path with the roles allowed to open it.
#[utoipa::path(
    get,
    path = "/api/routes",
    responses((status = 200, description = "Declared routes", body = [RouteManifestEntry]))
)]
pub async fn route_manifest(State(state): State<AppState>) -> Json<Vec<RouteManifestEntry>> {
    Json(state.views.manifest())
}

/// preview_navigation
///
/// [Public Route] Reports what opening `path` would do for the caller's session, without
/// navigating. Uses the same table and decision as the view routes.
#[utoipa::path(
    get,
    path = "/api/navigation",
    params(NavigationQuery),
    responses((status = 200, description = "Navigation outcome", body = NavigationPreview))
)]
pub async fn preview_navigation(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NavigationQuery>,
) -> Json<NavigationPreview> {
    let resolution = state.views.resolve(&query.path);
    let decision = resolution.decide(session.role());

    let (view, location) = match decision {
        GuardDecision::Render => (resolution.view, query.path.clone()),
        GuardDecision::Redirect(to) => {
            (state.views.resolve(to).view, to.to_string())
        }
    };

    Json(NavigationPreview {
        path: query.path,
        view: view.name().to_string(),
        title: view.title().to_string(),
        outcome: decision.outcome(),
        location,
    })
}
