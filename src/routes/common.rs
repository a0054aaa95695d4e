use super::GuardedRoute;
use crate::{models::Role, views::View};

/// Common Protected Routes
///
/// Paths every signed-in role can open, independent of any section. Each one carries its
/// own access rule; a session without a role is still redirected.
pub fn common_routes() -> Vec<GuardedRoute> {
    vec![
        // GET /change-password
        GuardedRoute::new("/change-password", View::ChangePassword, Role::ALL),
        // GET /books
        // The shared catalogue view, outside any section layout.
        GuardedRoute::new("/books", View::Books, Role::ALL),
    ]
}
