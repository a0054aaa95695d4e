/// Router Module Index
///
/// Declares every navigable client path and which of them sit behind the route guard.
/// The declaration is one static table (`ViewRouter`) that serves two purposes:
/// it is folded into the axum router, and it answers `resolve` for the navigation runtime
/// and the preview endpoint. Both paths therefore apply exactly the same rules.
///
/// Layout mirrors the access structure:
/// - `public`: login, registration and password recovery, never guarded.
/// - `admin`, `member`, `librarian`: one role-scoped subtree each, guarded once at its prefix.
/// - `common`: standalone paths, each guarded with its own multi-role access rule.
/// - `api`: the JSON endpoints under `/api`.
use axum::{
    Router,
    extract::State,
    middleware,
    routing::{MethodRouter, get},
};
use std::time::Duration;
use thiserror::Error;

use crate::{
    config::AppConfig,
    guard::{self, GuardDecision, GuardState, RouteAccessSpec},
    models::{Role, RouteManifestEntry},
    views::View,
};

pub mod admin;
pub mod api;
pub mod common;
pub mod librarian;
pub mod member;
pub mod public;

/// The view rendered for any path nothing else matches.
pub const FALLBACK_VIEW: View = View::Login;

/// RouterError
///
/// Raised when a route table is ambiguous. Overlapping declarations are a programming
/// error, so they are rejected when the table is built instead of being resolved by order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("route path must start with '/' and must not end with one: {0:?}")]
    InvalidPath(String),
    #[error("path declared more than once: {0}")]
    DuplicatePath(String),
    #[error("path {path} lies inside the {prefix} section")]
    InsideSection { path: String, prefix: String },
}

/// ViewRoute
///
/// A single path mounting a view. Inside a section the path is relative to the prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRoute {
    pub path: &'static str,
    pub view: View,
}

impl ViewRoute {
    pub fn new(path: &'static str, view: View) -> Self {
        Self { path, view }
    }
}

/// GuardedRoute
///
/// A standalone protected path with its own access rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardedRoute {
    pub path: &'static str,
    pub view: View,
    pub access: RouteAccessSpec,
}

impl GuardedRoute {
    pub fn new(path: &'static str, view: View, access: impl Into<RouteAccessSpec>) -> Self {
        Self {
            path,
            view,
            access: access.into(),
        }
    }
}

/// Section
///
/// A role-scoped subtree mounted at a fixed prefix. One access rule covers the index and every
/// child; children cannot carry access rules of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub prefix: &'static str,
    pub access: RouteAccessSpec,
    pub index: View,
    pub children: Vec<ViewRoute>,
}

impl Section {
    pub fn new(prefix: &'static str, access: impl Into<RouteAccessSpec>, index: View) -> Self {
        Self {
            prefix,
            access: access.into(),
            index,
            children: Vec::new(),
        }
    }

    pub fn child(mut self, path: &'static str, view: View) -> Self {
        self.children.push(ViewRoute::new(path, view));
        self
    }

    /// Matches the bare prefix to the index, and `prefix/child` to a declared child.
    fn resolve(&self, path: &str) -> Option<View> {
        if path == self.prefix {
            return Some(self.index);
        }
        let rest = path.strip_prefix(self.prefix)?;
        if !rest.starts_with('/') {
            return None;
        }
        self.children
            .iter()
            .find(|child| child.path == rest)
            .map(|child| child.view)
    }

    fn contains(&self, path: &str) -> bool {
        path == self.prefix
            || path
                .strip_prefix(self.prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    fn full_paths(&self) -> impl Iterator<Item = (String, View)> + '_ {
        std::iter::once((self.prefix.to_string(), self.index)).chain(
            self.children
                .iter()
                .map(|child| (format!("{}{}", self.prefix, child.path), child.view)),
        )
    }
}

/// Resolution
///
/// The outcome of matching a path against the table. `access` is `None` for public
/// routes and for the fallback; `matched` is `false` only for the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub view: View,
    pub access: Option<&'a RouteAccessSpec>,
    pub matched: bool,
}

impl Resolution<'_> {
    /// decide
    ///
    /// Public routes always render; protected routes defer to the guard.
    pub fn decide(&self, role: Option<Role>) -> GuardDecision {
        match self.access {
            Some(spec) => guard::evaluate(spec, role),
            None => GuardDecision::Render,
        }
    }
}

/// ViewRouter
///
/// The complete, validated route table. Built once and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct ViewRouter {
    public: Vec<ViewRoute>,
    sections: Vec<Section>,
    common: Vec<GuardedRoute>,
}

impl ViewRouter {
    /// new
    ///
    /// Validates that no two declarations can match the same path.
    pub fn new(
        public: Vec<ViewRoute>,
        sections: Vec<Section>,
        common: Vec<GuardedRoute>,
    ) -> Result<Self, RouterError> {
        let mut seen: Vec<String> = Vec::new();
        let mut claim = |path: String| -> Result<(), RouterError> {
            if !path.starts_with('/') || path.len() < 2 || path.ends_with('/') {
                return Err(RouterError::InvalidPath(path));
            }
            if seen.contains(&path) {
                return Err(RouterError::DuplicatePath(path));
            }
            seen.push(path);
            Ok(())
        };

        for section in &sections {
            for child in &section.children {
                if !child.path.starts_with('/') || child.path.len() < 2 {
                    return Err(RouterError::InvalidPath(format!(
                        "{}{}",
                        section.prefix, child.path
                    )));
                }
            }
            for (path, _) in section.full_paths() {
                claim(path)?;
            }
        }

        let standalone = public
            .iter()
            .map(|route| route.path)
            .chain(common.iter().map(|route| route.path));
        for path in standalone {
            claim(path.to_string())?;
            if let Some(section) = sections.iter().find(|section| section.contains(path)) {
                return Err(RouterError::InsideSection {
                    path: path.to_string(),
                    prefix: section.prefix.to_string(),
                });
            }
        }

        for (i, outer) in sections.iter().enumerate() {
            for inner in sections.iter().skip(i + 1) {
                if outer.contains(inner.prefix) || inner.contains(outer.prefix) {
                    return Err(RouterError::InsideSection {
                        path: inner.prefix.to_string(),
                        prefix: outer.prefix.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            public,
            sections,
            common,
        })
    }

    /// library
    ///
    /// The application's declared routes.
    pub fn library() -> Result<Self, RouterError> {
        Self::new(
            public::public_routes(),
            vec![
                admin::admin_section(),
                member::member_section(),
                librarian::librarian_section(),
            ],
            common::common_routes(),
        )
    }

    /// resolve
    ///
    /// Exact matching for standalone paths, prefix plus exact child for sections, and the
    /// login view for everything else.
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        if let Some(route) = self.public.iter().find(|route| route.path == path) {
            return Resolution {
                view: route.view,
                access: None,
                matched: true,
            };
        }

        if let Some(route) = self.common.iter().find(|route| route.path == path) {
            return Resolution {
                view: route.view,
                access: Some(&route.access),
                matched: true,
            };
        }

        for section in &self.sections {
            if let Some(view) = section.resolve(path) {
                return Resolution {
                    view,
                    access: Some(&section.access),
                    matched: true,
                };
            }
        }

        Resolution {
            view: FALLBACK_VIEW,
            access: None,
            matched: false,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// manifest
    ///
    /// Every declared path in declaration order: public, then sections, then common.
    pub fn manifest(&self) -> Vec<RouteManifestEntry> {
        let entry = |path: String, view: View, access: Option<&RouteAccessSpec>| {
            RouteManifestEntry {
                path,
                view: view.name().to_string(),
                title: view.title().to_string(),
                allowed_roles: access.map(|spec| spec.allowed_roles().to_vec()),
            }
        };

        let mut entries: Vec<RouteManifestEntry> = self
            .public
            .iter()
            .map(|route| entry(route.path.to_string(), route.view, None))
            .collect();

        for section in &self.sections {
            entries.extend(
                section
                    .full_paths()
                    .map(|(path, view)| entry(path, view, Some(&section.access))),
            );
        }

        entries.extend(
            self.common
                .iter()
                .map(|route| entry(route.path.to_string(), route.view, Some(&route.access))),
        );

        entries
    }

    /// view_routes
    ///
    /// Folds the table into an axum router. Each section is nested at its prefix and guarded
    /// once with `route_layer`, so the guard only runs for paths the section actually
    /// declares; anything else under the prefix reaches the outer fallback. Common routes
    /// are guarded one by one.
    pub fn view_routes<S>(&self, config: &AppConfig) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let transition = config.transition;
        let mut router = Router::new();

        for route in &self.public {
            router = router.route(route.path, view_handler(route.view, transition));
        }

        for section in &self.sections {
            let mut nested = Router::new().route("/", view_handler(section.index, transition));
            for child in &section.children {
                nested = nested.route(child.path, view_handler(child.view, transition));
            }
            let nested = nested.route_layer(middleware::from_fn_with_state(
                GuardState::new(section.access.clone(), config.clone()),
                guard::route_guard,
            ));
            router = router.nest(section.prefix, nested);
        }

        // Layered as a router, like sections, so the guard also covers the method fallback.
        for route in &self.common {
            let guarded = Router::new()
                .route(route.path, view_handler(route.view, transition))
                .route_layer(middleware::from_fn_with_state(
                    GuardState::new(route.access.clone(), config.clone()),
                    guard::route_guard,
                ));
            router = router.merge(guarded);
        }

        router
    }
}

fn view_handler<S>(view: View, transition: Duration) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    get(move || async move { view.render(transition) })
}

/// fallback_view
///
/// Catch-all for unmatched paths: the login view, rendered in place with no redirect.
pub async fn fallback_view(State(config): State<AppConfig>) -> axum::response::Html<String> {
    FALLBACK_VIEW.render(config.transition)
}
