use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use librario_web::{
    AppConfig,
    models::Role,
    session::{Claims, Session, SessionStore, SharedSession, decode_token, issue_token},
};

#[test]
fn test_issued_token_round_trips_identity() {
    let config = AppConfig::default();
    let token = issue_token(&config, "31", Role::Librarian, "desk@library.test").unwrap();

    let session = decode_token(&config, &token).unwrap();

    assert_eq!(session.role(), Some(Role::Librarian));
    assert_eq!(session.user_id(), Some("31"));
    assert_eq!(session.email(), Some("desk@library.test"));
    assert!(session.is_authenticated());
}

#[test]
fn test_expired_token_decodes_as_nothing() {
    let config = AppConfig::default();
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "31".to_string(),
        role: Role::Admin,
        email: "old@library.test".to_string(),
        iat: now - 7200,
        exp: now - 60,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.session_secret.as_bytes()),
    )
    .unwrap();

    assert!(decode_token(&config, &token).is_none());
}

#[test]
fn test_negative_ttl_session_is_already_expired() {
    let config = AppConfig {
        session_ttl_hours: -1,
        ..AppConfig::default()
    };
    let token = issue_token(&config, "1", Role::Member, "m@library.test").unwrap();
    assert!(decode_token(&config, &token).is_none());
}

#[test]
fn test_garbage_token_decodes_as_nothing() {
    let config = AppConfig::default();
    assert!(decode_token(&config, "").is_none());
    assert!(decode_token(&config, "not.a.jwt").is_none());
}

#[test]
fn test_anonymous_session_has_no_role() {
    let session = Session::anonymous();
    assert_eq!(session.role(), None);
    assert!(!session.is_authenticated());
    assert_eq!(session.view().role, None);
    assert_eq!(session.view().user_id, None);
}

#[test]
fn test_shared_session_login_and_logout() {
    let store = SharedSession::default();
    assert_eq!(store.role(), None);

    let reader = store.clone();
    store.set(Session::new(Role::Member, "5", "m@library.test"));
    assert_eq!(reader.role(), Some(Role::Member));

    store.clear();
    assert_eq!(reader.role(), None);
    assert_eq!(reader.snapshot(), Session::anonymous());
}
