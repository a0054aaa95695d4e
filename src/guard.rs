use axum::{
    extract::{FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    config::AppConfig,
    models::{GuardOutcome, Role},
    session::{Session, SessionStore},
};

/// The public view every failed access check is sent to.
pub const LOGIN_PATH: &str = "/login";

/// RouteAccessSpec
///
/// The role requirement attached to a protected route subtree: either a single role or an
/// ordered set meaning "any of these". Both forms are normalized at construction into one
/// allowed-role list (a singleton for the single form), so the decision is a single
/// membership test.
///
/// Specs are built once when the router is declared and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAccessSpec {
    allowed: Vec<Role>,
}

impl RouteAccessSpec {
    pub fn single(role: Role) -> Self {
        Self {
            allowed: vec![role],
        }
    }

    /// any_of
    ///
    /// Keeps the caller's order and drops repeated roles.
    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut allowed = Vec::new();
        for role in roles {
            if !allowed.contains(&role) {
                allowed.push(role);
            }
        }
        Self { allowed }
    }

    pub fn allowed_roles(&self) -> &[Role] {
        &self.allowed
    }

    pub fn permits(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }
}

impl From<Role> for RouteAccessSpec {
    fn from(role: Role) -> Self {
        Self::single(role)
    }
}

impl<const N: usize> From<[Role; N]> for RouteAccessSpec {
    fn from(roles: [Role; N]) -> Self {
        Self::any_of(roles)
    }
}

/// GuardDecision
///
/// The result of evaluating an access rule against the current role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Mount the protected content as-is.
    Render,
    /// Replace the navigation with the given public path.
    Redirect(&'static str),
}

impl GuardDecision {
    pub fn outcome(&self) -> GuardOutcome {
        match self {
            GuardDecision::Render => GuardOutcome::Render,
            GuardDecision::Redirect(_) => GuardOutcome::Redirect,
        }
    }
}

/// evaluate
///
/// The whole access rule. Renders iff a role is present and it is a member of the
/// allowed set; a missing role (unauthenticated, or not yet hydrated) always redirects.
/// Wrong-role and unauthenticated access are deliberately the same outcome, and the
/// originally requested path is not carried along.
///
/// Pure and synchronous: calling it again with the same inputs gives the same answer.
pub fn evaluate(spec: &RouteAccessSpec, current: Option<Role>) -> GuardDecision {
    match current {
        Some(role) if spec.permits(role) => GuardDecision::Render,
        _ => GuardDecision::Redirect(LOGIN_PATH),
    }
}

/// evaluate_store
///
/// Reads the role from the store once and evaluates. The store is never written.
pub fn evaluate_store<S>(spec: &RouteAccessSpec, store: &S) -> GuardDecision
where
    S: SessionStore + ?Sized,
{
    evaluate(spec, store.role())
}

/// GuardState
///
/// Per-subtree middleware state: the subtree's access rule plus the configuration needed to
/// decode the session. One is created for every `route_layer` the router installs.
#[derive(Clone)]
pub struct GuardState {
    pub spec: RouteAccessSpec,
    pub config: AppConfig,
}

impl GuardState {
    pub fn new(spec: RouteAccessSpec, config: AppConfig) -> Self {
        Self { spec, config }
    }
}

impl FromRef<GuardState> for AppConfig {
    fn from_ref(state: &GuardState) -> AppConfig {
        state.config.clone()
    }
}

/// route_guard
///
/// Middleware form of the guard, installed with `route_layer` over a protected subtree.
/// The `Session` extractor never rejects; a missing or unreadable session is anonymous and
/// therefore redirected. On render the inner response is returned untouched.
///
/// This is a convenience for the browser only. Every page backed by data must still be
/// authorized by the backend API, which is the real security boundary.
pub async fn route_guard(
    State(guard): State<GuardState>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    match evaluate_store(&guard.spec, &session) {
        GuardDecision::Render => next.run(request).await,
        GuardDecision::Redirect(location) => {
            tracing::debug!(
                path = %request.uri().path(),
                required = ?guard.spec.allowed_roles(),
                current = ?session.role(),
                "route guard redirect"
            );
            Redirect::to(location).into_response()
        }
    }
}

