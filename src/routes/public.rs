use super::ViewRoute;
use crate::views::View;

/// Public Routes
///
/// Entry points that must work without a session: sign-in, registration and the
/// password-recovery flow (request code, verify code, set new password). These bypass the
/// guard entirely.
pub fn public_routes() -> Vec<ViewRoute> {
    vec![
        ViewRoute::new("/login", View::Login),
        ViewRoute::new("/register", View::Register),
        ViewRoute::new("/forgot-password", View::ForgotPassword),
        ViewRoute::new("/verify-otp", View::VerifyOtp),
        ViewRoute::new("/reset-password", View::ResetPassword),
    ]
}
