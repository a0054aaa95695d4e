use super::Section;
use crate::{models::Role, views::View};

/// Mount point of the staff subtree.
pub const PREFIX: &str = "/librarian";

/// Librarian Section
///
/// Front-desk work: circulation records, overdue follow-up and payments taken in person.
pub fn librarian_section() -> Section {
    Section::new(PREFIX, Role::Librarian, View::LibrarianDashboard)
        .child("/books", View::Books)
        .child("/notifications", View::Notifications)
        .child("/offline-payment", View::OfflinePayment)
        .child("/overdue-books", View::OverdueBooks)
        .child("/borrow-records", View::BorrowRecords)
}
