use librario_web::{
    guard::{GuardDecision, LOGIN_PATH, RouteAccessSpec, evaluate, evaluate_store},
    models::{GuardOutcome, Role},
    session::{Session, SessionStore, SharedSession},
};

// --- Strict single-role matching ---

#[test]
fn test_single_role_renders_only_for_exact_role() {
    for required in Role::ALL {
        let spec = RouteAccessSpec::single(required);
        for current in Role::ALL {
            let expected = if current == required {
                GuardDecision::Render
            } else {
                GuardDecision::Redirect(LOGIN_PATH)
            };
            assert_eq!(
                evaluate(&spec, Some(current)),
                expected,
                "required {required}, current {current}"
            );
        }
    }
}

#[test]
fn test_admin_has_no_implicit_access_to_member_routes() {
    let spec = RouteAccessSpec::from(Role::Member);
    assert_eq!(
        evaluate(&spec, Some(Role::Admin)),
        GuardDecision::Redirect(LOGIN_PATH)
    );
}

// --- Set membership ---

#[test]
fn test_role_set_renders_iff_role_is_member() {
    let staff = RouteAccessSpec::from([Role::Admin, Role::Librarian]);
    assert_eq!(evaluate(&staff, Some(Role::Admin)), GuardDecision::Render);
    assert_eq!(evaluate(&staff, Some(Role::Librarian)), GuardDecision::Render);
    assert_eq!(
        evaluate(&staff, Some(Role::Member)),
        GuardDecision::Redirect(LOGIN_PATH)
    );

    let everyone = RouteAccessSpec::from(Role::ALL);
    for role in Role::ALL {
        assert_eq!(evaluate(&everyone, Some(role)), GuardDecision::Render);
    }
}

#[test]
fn test_singleton_set_behaves_like_single_role() {
    let as_set = RouteAccessSpec::any_of([Role::Librarian]);
    let as_single = RouteAccessSpec::single(Role::Librarian);
    assert_eq!(as_set, as_single);
    for role in Role::ALL {
        assert_eq!(evaluate(&as_set, Some(role)), evaluate(&as_single, Some(role)));
    }
}

#[test]
fn test_empty_set_never_renders() {
    let spec = RouteAccessSpec::any_of([]);
    for role in Role::ALL {
        assert_eq!(
            evaluate(&spec, Some(role)),
            GuardDecision::Redirect(LOGIN_PATH)
        );
    }
}

#[test]
fn test_any_of_keeps_order_and_drops_duplicates() {
    let spec = RouteAccessSpec::any_of([Role::Member, Role::Admin, Role::Member]);
    assert_eq!(spec.allowed_roles(), &[Role::Member, Role::Admin]);
}

// --- Null-role safety ---

#[test]
fn test_missing_role_always_redirects() {
    let specs = [
        RouteAccessSpec::single(Role::Admin),
        RouteAccessSpec::single(Role::Librarian),
        RouteAccessSpec::single(Role::Member),
        RouteAccessSpec::any_of(Role::ALL),
    ];
    for spec in &specs {
        assert_eq!(evaluate(spec, None), GuardDecision::Redirect(LOGIN_PATH));
        assert_eq!(
            evaluate_store(spec, &Session::anonymous()),
            GuardDecision::Redirect(LOGIN_PATH)
        );
    }
}

// --- Stability & store isolation ---

#[test]
fn test_repeated_evaluation_is_stable_and_read_only() {
    let spec = RouteAccessSpec::any_of(Role::ALL);
    let store = SharedSession::new(Session::new(Role::Librarian, "12", "lib@library.test"));

    let first = evaluate_store(&spec, &store);
    for _ in 0..25 {
        assert_eq!(evaluate_store(&spec, &store), first);
    }

    assert_eq!(first, GuardDecision::Render);
    assert_eq!(
        store.snapshot(),
        Session::new(Role::Librarian, "12", "lib@library.test")
    );
}

#[test]
fn test_store_change_is_seen_on_next_evaluation() {
    let spec = RouteAccessSpec::single(Role::Admin);
    let store = SharedSession::new(Session::with_role(Role::Admin));
    assert_eq!(evaluate_store(&spec, &store), GuardDecision::Render);

    store.clear();
    assert_eq!(store.role(), None);
    assert_eq!(
        evaluate_store(&spec, &store),
        GuardDecision::Redirect(LOGIN_PATH)
    );
}

#[test]
fn test_decision_outcome_mapping() {
    assert_eq!(GuardDecision::Render.outcome(), GuardOutcome::Render);
    assert_eq!(
        GuardDecision::Redirect(LOGIN_PATH).outcome(),
        GuardOutcome::Redirect
    );
}

// --- Role parsing ---

#[test]
fn test_role_parsing_is_case_sensitive() {
    assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
    assert_eq!("LIBRARIAN".parse::<Role>(), Ok(Role::Librarian));
    assert_eq!("MEMBER".parse::<Role>(), Ok(Role::Member));
    assert!("admin".parse::<Role>().is_err());
    assert!("Member".parse::<Role>().is_err());
    assert!("".parse::<Role>().is_err());
}

#[test]
fn test_role_json_form_is_upper_case() {
    assert_eq!(serde_json::to_string(&Role::Librarian).unwrap(), "\"LIBRARIAN\"");
    let parsed: Role = serde_json::from_str("\"MEMBER\"").unwrap();
    assert_eq!(parsed, Role::Member);
    assert!(serde_json::from_str::<Role>("\"member\"").is_err());
}
