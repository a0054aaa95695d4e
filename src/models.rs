use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use ts_rs::TS;
use utoipa::ToSchema;
use validator::Validate;

// --- Core Domain Values ---

/// Role
///
/// The permission class of the signed-in user. Exactly one role is active per session;
/// the absence of a role (`Option::None` wherever a role is read) means the session is
/// unauthenticated.
///
/// Roles travel as the upper-case strings `ADMIN`, `LIBRARIAN` and `MEMBER`. Comparison is
/// strict value equality: there is no hierarchy, so `Admin` does not stand in for `Member`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Role {
    Admin,
    Librarian,
    Member,
}

impl Role {
    /// Every role, in the order used for the common protected routes.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Librarian, Role::Member];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Librarian => "LIBRARIAN",
            Role::Member => "MEMBER",
        }
    }

    /// landing_path
    ///
    /// The section root a user is sent to right after a successful login.
    pub fn landing_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Librarian => "/librarian",
            Role::Member => "/member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a role string is not one of the three known values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Case-sensitive on purpose: "admin" is not "ADMIN".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "LIBRARIAN" => Ok(Role::Librarian),
            "MEMBER" => Ok(Role::Member),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

// --- Request Payloads (Input Schemas) ---

/// Email shape accepted at login: `local@domain.tld`, no whitespace, a single `@`.
pub static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// LoginRequest
///
/// Input payload for `POST /api/session`. The password is forwarded to the backend and is
/// never logged or stored by this service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    #[schema(example = "reader@library.test")]
    #[validate(regex(path = *EMAIL_PATTERN, message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// NavigationQuery
///
/// Query string for the navigation preview endpoint (`GET /api/navigation?path=...`).
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct NavigationQuery {
    /// The client path to evaluate, e.g. `/admin/books`.
    pub path: String,
}

// --- Backend Contract ---

/// BackendUser
///
/// The `user` object inside the backend's login response. The backend uses numeric ids,
/// but ids are kept opaque here, so both numbers and strings are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendUser {
    pub id: serde_json::Value,
    pub email: String,
}

impl BackendUser {
    pub fn id_string(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// BackendLoginResponse
///
/// Body of a successful `POST {API_BASE}/api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendLoginResponse {
    #[serde(default)]
    pub session_id: Option<String>,
    pub role: String,
    pub user: BackendUser,
}

// --- Response Schemas (Output) ---

/// SessionView
///
/// The session as this service sees it for the current request. Both fields are `null`
/// for an anonymous visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionView {
    pub role: Option<Role>,
    pub user_id: Option<String>,
    pub email: Option<String>,
}

/// LoginResponse
///
/// Output of a successful login. `landing` is the section root the client should open next.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LoginResponse {
    pub role: Role,
    pub user_id: String,
    pub email: String,
    #[schema(example = "/admin")]
    pub landing: String,
}

/// RouteManifestEntry
///
/// One declared view route. `allowedRoles` is `null` for public routes.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RouteManifestEntry {
    pub path: String,
    pub view: String,
    pub title: String,
    pub allowed_roles: Option<Vec<Role>>,
}

/// GuardOutcome
///
/// The two observable results of an access check. Unauthenticated and wrong-role access
/// both produce `Redirect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum GuardOutcome {
    Render,
    Redirect,
}

/// NavigationPreview
///
/// What navigating to `path` would do for the caller's current session.
/// `location` is where the browser ends up: `path` itself on render, `/login` on redirect.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NavigationPreview {
    pub path: String,
    pub view: String,
    pub title: String,
    pub outcome: GuardOutcome,
    pub location: String,
}
