use super::Section;
use crate::{models::Role, views::View};

/// Mount point of the administrator subtree.
pub const PREFIX: &str = "/admin";

/// Administrator Section
///
/// Catalogue, membership and staff management. The whole subtree is gated once at
/// `/admin` and requires exactly `ADMIN`; no other role, however privileged, gets in.
pub fn admin_section() -> Section {
    Section::new(PREFIX, Role::Admin, View::AdminDashboard)
        .child("/books", View::Books)
        .child("/membership-plans", View::MembershipPlans)
        .child("/add-librarian", View::AddLibrarian)
        .child("/borrow-requests", View::BorrowRequests)
        .child("/admin-alerts", View::AdminAlerts)
        .child("/membership-requests", View::MembershipRequests)
        .child("/overdue-books", View::OverdueBooks)
}
