use std::{
    convert::Infallible,
    sync::{Arc, PoisonError, RwLock},
};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    config::{AppConfig, Env},
    models::{Role, SessionView},
};

/// Name of the browser cookie that persists the session between page loads.
pub const SESSION_COOKIE: &str = "librario_session";

/// Development-only header that stands in for the session cookie (see `Env::Local`).
pub const ROLE_BYPASS_HEADER: &str = "x-session-role";

/// SessionStore
///
/// Read access to the current session role. The route guard consumes only this; it never
/// writes or clears a store. Implementations must reflect a logout synchronously, before the
/// next read, because the guard does not poll or refresh.
pub trait SessionStore {
    fn role(&self) -> Option<Role>;
}

/// Session
///
/// The client-held record of who is signed in. An anonymous session has no role and no
/// identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    role: Option<Role>,
    user_id: Option<String>,
    email: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(role: Role, user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            role: Some(role),
            user_id: Some(user_id.into()),
            email: Some(email.into()),
        }
    }

    /// with_role
    ///
    /// A session carrying only a role, as produced by the local development bypass.
    pub fn with_role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            role: self.role,
            user_id: self.user_id.clone(),
            email: self.email.clone(),
        }
    }
}

impl SessionStore for Session {
    fn role(&self) -> Option<Role> {
        self.role
    }
}

/// SharedSession
///
/// In-process session store for the headless navigation runtime. Login and logout replace
/// the whole record at once, so a reader never observes a half-updated session.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    pub fn set(&self, session: Session) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    pub fn clear(&self) {
        self.set(Session::anonymous());
    }

    pub fn snapshot(&self) -> Session {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionStore for SharedSession {
    fn role(&self) -> Option<Role> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .role
    }
}

/// Claims
///
/// Payload of the signed session token stored in the cookie. The signature only keeps the
/// cookie intact in transit; the backend re-authorizes every data request regardless.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Backend user identifier.
    pub sub: String,
    pub role: Role,
    pub email: String,
    /// Issued At, seconds since the epoch.
    pub iat: i64,
    /// Expiration, seconds since the epoch. Past this the token decodes as anonymous.
    pub exp: i64,
}

/// issue_token
///
/// Signs a session token valid for the configured TTL.
pub fn issue_token(
    config: &AppConfig,
    user_id: &str,
    role: Role,
    email: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(config.session_ttl_hours)).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.session_secret.as_bytes()),
    )
}

/// decode_token
///
/// Verifies signature and expiry. Any failure (malformed, bad signature, expired, unknown
/// role) yields `None`; the caller treats that as an anonymous session.
pub fn decode_token(config: &AppConfig, token: &str) -> Option<Session> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.session_secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => Some(Session::new(
            data.claims.role,
            data.claims.sub,
            data.claims.email,
        )),
        Err(e) => {
            tracing::debug!(error = %e, "discarding unreadable session token");
            None
        }
    }
}

/// session_cookie
///
/// The cookie written at login. Lifetime is bounded by the token's own `exp`.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Session Extractor Implementation
///
/// Resolves the request's session for handlers and the route guard. It never rejects:
/// anything short of a valid token is the anonymous session, which the guard redirects.
///
/// In `Env::Local` a valid role in the `x-session-role` header takes precedence over the
/// cookie so views can be browsed without a running backend.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        if config.env == Env::Local {
            let bypass = parts
                .headers
                .get(ROLE_BYPASS_HEADER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<Role>().ok());
            if let Some(role) = bypass {
                return Ok(Session::with_role(role));
            }
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let session = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| decode_token(&config, cookie.value()))
            .unwrap_or_default();

        Ok(session)
    }
}
