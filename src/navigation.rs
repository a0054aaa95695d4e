use std::sync::Arc;

use crate::{
    a11y::{Announcer, Priority},
    guard::GuardDecision,
    overlay::TransitionOverlay,
    routes::ViewRouter,
    session::SessionStore,
    views::View,
};

/// Announced once when a navigator is created.
pub const APP_LOADED_MESSAGE: &str = "Library Management System loaded";

/// NavigationEvent
///
/// One location change. `from` is `None` for the first navigation of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    pub from: Option<String>,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The requested path is already the current location; nothing happened.
    Unchanged,
    /// The requested path mounted `view`.
    Rendered { view: View },
    /// The guard refused `requested`; the navigator moved on to the login view instead.
    Redirected { requested: String, view: View },
}

/// Navigation
///
/// Everything one call to `Navigator::navigate` did. A redirect produces two events: the
/// requested location, then the login view replacing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub events: Vec<NavigationEvent>,
    pub outcome: NavigationOutcome,
    pub location: String,
}

/// Navigator
///
/// Headless navigation runtime for the client: it owns the current location and, on every
/// location change, re-runs the guard against the session store, restarts the transition
/// overlay and announces the destination.
///
/// `navigate` takes `&mut self`, so navigations are applied one at a time in call order.
/// The session role is read at decision time and never cached, so a logout applied to the
/// store is honored by the very next navigation.
pub struct Navigator<S> {
    router: Arc<ViewRouter>,
    store: S,
    overlay: TransitionOverlay,
    announcer: Arc<dyn Announcer>,
    location: Option<String>,
}

impl<S: SessionStore> Navigator<S> {
    pub fn new(
        router: Arc<ViewRouter>,
        store: S,
        overlay: TransitionOverlay,
        announcer: Arc<dyn Announcer>,
    ) -> Self {
        announcer.announce(APP_LOADED_MESSAGE, Priority::Polite);
        Self {
            router,
            store,
            overlay,
            announcer,
            location: None,
        }
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn overlay(&self) -> &TransitionOverlay {
        &self.overlay
    }

    /// navigate
    ///
    /// Moves to `path`. Unmatched paths mount the login view in place (no redirect).
    /// A refused protected path is replaced by `/login`; the originally requested path is
    /// not remembered.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime (see `TransitionOverlay::show`).
    pub fn navigate(&mut self, path: &str) -> Navigation {
        if self.location.as_deref() == Some(path) {
            return Navigation {
                events: Vec::new(),
                outcome: NavigationOutcome::Unchanged,
                location: path.to_string(),
            };
        }

        let mut events = vec![self.enter(path)];
        let router = Arc::clone(&self.router);
        let resolution = router.resolve(path);

        let (outcome, view) = match resolution.decide(self.store.role()) {
            GuardDecision::Render => (
                NavigationOutcome::Rendered {
                    view: resolution.view,
                },
                resolution.view,
            ),
            GuardDecision::Redirect(to) => {
                tracing::debug!(requested = path, location = to, "navigation redirected");
                events.push(self.enter(to));
                let view = router.resolve(to).view;
                (
                    NavigationOutcome::Redirected {
                        requested: path.to_string(),
                        view,
                    },
                    view,
                )
            }
        };

        self.announcer
            .announce(&format!("Navigated to {}", view.title()), Priority::Polite);

        Navigation {
            events,
            outcome,
            location: self.location.clone().unwrap_or_default(),
        }
    }

    /// unmount
    ///
    /// Tears the client down: the overlay timer is cancelled and nothing fires afterwards.
    pub fn unmount(&mut self) {
        self.overlay.cancel();
        self.location = None;
    }

    fn enter(&mut self, path: &str) -> NavigationEvent {
        let event = NavigationEvent {
            from: self.location.replace(path.to_string()),
            to: path.to_string(),
        };
        tracing::trace!(from = ?event.from, to = %event.to, "navigation");
        self.overlay.show();
        event
    }
}
