use axum::response::Html;
use std::time::Duration;

/// View
///
/// Every page the client can mount. Page contents (tables, forms, payment flows) belong to
/// the page components and call the backend API themselves; this service only knows which
/// page a path resolves to and serves its shell.
///
/// Several paths can mount the same view, e.g. `Books` under `/admin`, `/librarian` and the
/// common `/books` route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    // Public
    Login,
    Register,
    ForgotPassword,
    VerifyOtp,
    ResetPassword,
    // Administrator
    AdminDashboard,
    MembershipPlans,
    AddLibrarian,
    BorrowRequests,
    AdminAlerts,
    MembershipRequests,
    // Member
    MemberDashboard,
    MemberBooks,
    BorrowedBooks,
    Payment,
    RenewMembership,
    MemberRequests,
    // Librarian
    LibrarianDashboard,
    OfflinePayment,
    BorrowRecords,
    // Shared between sections
    Books,
    Notifications,
    OverdueBooks,
    ChangePassword,
}

impl View {
    /// Stable identifier used in the route manifest and the `data-view` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            View::Login => "login",
            View::Register => "register",
            View::ForgotPassword => "forgot-password",
            View::VerifyOtp => "verify-otp",
            View::ResetPassword => "reset-password",
            View::AdminDashboard => "admin-dashboard",
            View::MembershipPlans => "membership-plans",
            View::AddLibrarian => "add-librarian",
            View::BorrowRequests => "borrow-requests",
            View::AdminAlerts => "admin-alerts",
            View::MembershipRequests => "membership-requests",
            View::MemberDashboard => "member-dashboard",
            View::MemberBooks => "member-books",
            View::BorrowedBooks => "borrowed-books",
            View::Payment => "payment",
            View::RenewMembership => "renew-membership",
            View::MemberRequests => "member-requests",
            View::LibrarianDashboard => "librarian-dashboard",
            View::OfflinePayment => "offline-payment",
            View::BorrowRecords => "borrow-records",
            View::Books => "books",
            View::Notifications => "notifications",
            View::OverdueBooks => "overdue-books",
            View::ChangePassword => "change-password",
        }
    }

    /// Human-readable page title, also used for navigation announcements.
    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Sign In",
            View::Register => "Create Account",
            View::ForgotPassword => "Forgot Password",
            View::VerifyOtp => "Verify Code",
            View::ResetPassword => "Reset Password",
            View::AdminDashboard => "Administrator Dashboard",
            View::MembershipPlans => "Membership Plans",
            View::AddLibrarian => "Librarians",
            View::BorrowRequests => "Borrow Requests",
            View::AdminAlerts => "Alerts",
            View::MembershipRequests => "Membership Requests",
            View::MemberDashboard => "Member Dashboard",
            View::MemberBooks => "Browse Books",
            View::BorrowedBooks => "Borrowed Books",
            View::Payment => "Payment",
            View::RenewMembership => "Renew Membership",
            View::MemberRequests => "My Requests",
            View::LibrarianDashboard => "Librarian Dashboard",
            View::OfflinePayment => "Offline Payment",
            View::BorrowRecords => "Borrow Records",
            View::Books => "Books",
            View::Notifications => "Notifications",
            View::OverdueBooks => "Overdue Books",
            View::ChangePassword => "Change Password",
        }
    }

    /// render
    ///
    /// The page shell: document language, skip link, the `main` landmark the page component
    /// mounts into, and a polite live region naming the destination. `transition` is the
    /// overlay window the client shows on every navigation, published as
    /// `data-transition-ms`.
    pub fn render(&self, transition: Duration) -> Html<String> {
        let title = self.title();
        let name = self.name();
        let transition_ms = transition.as_millis();
        Html(format!(
            "<!doctype html>\
             <html lang=\"en\" dir=\"ltr\">\
             <head><meta charset=\"utf-8\"><title>{title} | Librario</title></head>\
             <body>\
             <div class=\"App\" role=\"application\" aria-label=\"Library Management System\" data-transition-ms=\"{transition_ms}\">\
             <a href=\"#main-content\" class=\"skip-link\">Skip to main content</a>\
             <main id=\"main-content\" tabindex=\"-1\" data-view=\"{name}\"><h1>{title}</h1></main>\
             <div class=\"sr-only\" aria-live=\"polite\" aria-atomic=\"true\">Navigated to {title}</div>\
             </div>\
             </body>\
             </html>"
        ))
    }
}
