use librario_web::{
    guard::{GuardDecision, LOGIN_PATH, RouteAccessSpec},
    models::Role,
    routes::{GuardedRoute, RouterError, Section, ViewRoute, ViewRouter},
    views::View,
};
use std::time::Duration;

fn library() -> ViewRouter {
    ViewRouter::library().expect("library route table must be valid")
}

// --- Resolution ---

#[test]
fn test_public_paths_have_no_access_rule() {
    let router = library();
    for (path, view) in [
        ("/login", View::Login),
        ("/register", View::Register),
        ("/forgot-password", View::ForgotPassword),
        ("/verify-otp", View::VerifyOtp),
        ("/reset-password", View::ResetPassword),
    ] {
        let resolution = router.resolve(path);
        assert!(resolution.matched, "{path} should match");
        assert_eq!(resolution.view, view);
        assert!(resolution.access.is_none());
        assert_eq!(resolution.decide(None), GuardDecision::Render);
    }
}

#[test]
fn test_section_index_and_children_share_one_access_rule() {
    let router = library();

    let index = router.resolve("/admin");
    assert_eq!(index.view, View::AdminDashboard);
    assert_eq!(index.access, Some(&RouteAccessSpec::single(Role::Admin)));

    let books = router.resolve("/admin/books");
    assert_eq!(books.view, View::Books);
    assert_eq!(books.access, Some(&RouteAccessSpec::single(Role::Admin)));

    assert_eq!(router.resolve("/member/payment").view, View::Payment);
    assert_eq!(
        router.resolve("/member/renew-membership").access,
        Some(&RouteAccessSpec::single(Role::Member))
    );
    assert_eq!(router.resolve("/librarian").view, View::LibrarianDashboard);
    assert_eq!(
        router.resolve("/librarian/borrow-records").access,
        Some(&RouteAccessSpec::single(Role::Librarian))
    );
}

#[test]
fn test_common_paths_accept_every_role() {
    let router = library();
    for path in ["/change-password", "/books"] {
        let resolution = router.resolve(path);
        assert!(resolution.matched);
        assert_eq!(resolution.access, Some(&RouteAccessSpec::any_of(Role::ALL)));
        for role in Role::ALL {
            assert_eq!(resolution.decide(Some(role)), GuardDecision::Render);
        }
        assert_eq!(resolution.decide(None), GuardDecision::Redirect(LOGIN_PATH));
    }
}

#[test]
fn test_unmatched_paths_fall_back_to_login() {
    let router = library();
    for path in [
        "/does-not-exist",
        "/",
        "",
        "/admin/",
        "/admin/unknown",
        "/administrator",
        "/member/books/extra",
        "/LOGIN",
    ] {
        let resolution = router.resolve(path);
        assert!(!resolution.matched, "{path:?} should not match");
        assert_eq!(resolution.view, View::Login);
        assert!(resolution.access.is_none());
        for role in [None, Some(Role::Admin), Some(Role::Member)] {
            assert_eq!(resolution.decide(role), GuardDecision::Render);
        }
    }
}

#[test]
fn test_same_child_name_resolves_per_section() {
    let router = library();
    assert_eq!(router.resolve("/member/books").view, View::MemberBooks);
    assert_eq!(router.resolve("/librarian/books").view, View::Books);
    assert_eq!(router.resolve("/admin/books").view, View::Books);
}

// --- Manifest ---

#[test]
fn test_manifest_lists_every_declared_path_once() {
    let manifest = library().manifest();

    // 5 public + 8 admin + 7 member + 6 librarian + 2 common
    assert_eq!(manifest.len(), 28);

    let mut paths: Vec<&str> = manifest.iter().map(|e| e.path.as_str()).collect();
    paths.sort_unstable();
    paths.dedup();
    assert_eq!(paths.len(), manifest.len());

    let login = manifest.iter().find(|e| e.path == "/login").unwrap();
    assert!(login.allowed_roles.is_none());
    assert_eq!(login.view, "login");

    let overdue = manifest
        .iter()
        .find(|e| e.path == "/librarian/overdue-books")
        .unwrap();
    assert_eq!(overdue.allowed_roles, Some(vec![Role::Librarian]));
    assert_eq!(overdue.title, "Overdue Books");

    let change = manifest
        .iter()
        .find(|e| e.path == "/change-password")
        .unwrap();
    assert_eq!(change.allowed_roles, Some(Role::ALL.to_vec()));
}

#[test]
fn test_manifest_paths_resolve_to_themselves() {
    let router = library();
    for entry in router.manifest() {
        let resolution = router.resolve(&entry.path);
        assert!(resolution.matched, "{} should match", entry.path);
        assert_eq!(resolution.view.name(), entry.view);
    }
}

// --- Construction rejects ambiguity ---

#[test]
fn test_duplicate_standalone_path_is_rejected() {
    let result = ViewRouter::new(
        vec![ViewRoute::new("/login", View::Login)],
        vec![],
        vec![GuardedRoute::new("/login", View::ChangePassword, Role::ALL)],
    );
    assert_eq!(
        result.unwrap_err(),
        RouterError::DuplicatePath("/login".to_string())
    );
}

#[test]
fn test_duplicate_section_child_is_rejected() {
    let section = Section::new("/admin", Role::Admin, View::AdminDashboard)
        .child("/books", View::Books)
        .child("/books", View::OverdueBooks);
    let result = ViewRouter::new(vec![], vec![section], vec![]);
    assert_eq!(
        result.unwrap_err(),
        RouterError::DuplicatePath("/admin/books".to_string())
    );
}

#[test]
fn test_standalone_path_inside_section_is_rejected() {
    let section = Section::new("/member", Role::Member, View::MemberDashboard);
    let result = ViewRouter::new(
        vec![],
        vec![section],
        vec![GuardedRoute::new("/member/settings", View::ChangePassword, Role::ALL)],
    );
    assert_eq!(
        result.unwrap_err(),
        RouterError::InsideSection {
            path: "/member/settings".to_string(),
            prefix: "/member".to_string(),
        }
    );
}

#[test]
fn test_nested_section_prefixes_are_rejected() {
    let outer = Section::new("/admin", Role::Admin, View::AdminDashboard);
    let inner = Section::new("/admin/staff", Role::Librarian, View::LibrarianDashboard);
    let result = ViewRouter::new(vec![], vec![outer, inner], vec![]);
    assert!(matches!(result, Err(RouterError::InsideSection { .. })));
}

#[test]
fn test_malformed_paths_are_rejected() {
    for path in ["login", "/login/", "/"] {
        let result = ViewRouter::new(vec![ViewRoute::new(path, View::Login)], vec![], vec![]);
        assert_eq!(
            result.unwrap_err(),
            RouterError::InvalidPath(path.to_string()),
            "{path:?}"
        );
    }

    let section = Section::new("/admin", Role::Admin, View::AdminDashboard).child("/", View::Books);
    assert!(matches!(
        ViewRouter::new(vec![], vec![section], vec![]),
        Err(RouterError::InvalidPath(_))
    ));
}

// --- View shells ---

#[test]
fn test_view_shell_names_the_destination() {
    let html = View::OfflinePayment.render(Duration::from_millis(1200)).0;
    assert!(html.contains("<title>Offline Payment | Librario</title>"));
    assert!(html.contains("data-view=\"offline-payment\""));
    assert!(html.contains("aria-live=\"polite\""));
    assert!(html.contains("Navigated to Offline Payment"));
    assert!(html.contains("lang=\"en\""));
    assert!(html.contains("data-transition-ms=\"1200\""));
}
