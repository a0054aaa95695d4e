use super::Section;
use crate::{models::Role, views::View};

/// Mount point of the member subtree.
pub const PREFIX: &str = "/member";

/// Member Section
///
/// Borrowing, reservations, membership renewal and payments for library members.
pub fn member_section() -> Section {
    Section::new(PREFIX, Role::Member, View::MemberDashboard)
        .child("/books", View::MemberBooks)
        .child("/borrowed-books", View::BorrowedBooks)
        .child("/notifications", View::Notifications)
        .child("/payment", View::Payment)
        .child("/renew-membership", View::RenewMembership)
        .child("/requests", View::MemberRequests)
}
