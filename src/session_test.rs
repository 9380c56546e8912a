use super::*;
use crate::test_helpers::user;

// =============================================================================
// Session
// =============================================================================

#[test]
fn new_session_is_empty_and_uninitialized() {
    let store = SessionStore::new();
    assert!(store.identity().is_none());
    assert!(!store.is_logged_in());
    assert!(!store.is_initialized());
    assert_eq!(store.snapshot(), Session::default());
}

#[test]
fn default_equals_new() {
    assert_eq!(SessionStore::default().snapshot(), SessionStore::new().snapshot());
}

// =============================================================================
// set_identity / set_logged_in_user
// =============================================================================

#[test]
fn set_identity_some_logs_in() {
    let store = SessionStore::new();
    store.set_identity(Some(user(1, "A", "a@x.com")));
    assert!(store.is_logged_in());
    assert_eq!(store.identity(), Some(user(1, "A", "a@x.com")));
}

#[test]
fn set_logged_in_user_none_logs_out() {
    let store = SessionStore::new();
    store.set_logged_in_user(Some(user(1, "A", "a@x.com")));
    assert!(store.is_logged_in());
    store.set_logged_in_user(None);
    assert!(!store.is_logged_in());
    assert!(store.identity().is_none());
}

#[test]
fn set_identity_replaces_without_merge() {
    let store = SessionStore::new();
    let mut first = user(1, "A", "a@x.com");
    first.created_at = Some("2024-01-01T00:00:00Z".to_owned());
    store.set_identity(Some(first));
    store.set_identity(Some(user(2, "B", "b@x.com")));

    let current = store.identity().unwrap();
    assert_eq!(current.id, 2);
    assert!(current.created_at.is_none());
}

#[test]
fn set_identity_does_not_touch_initialized() {
    let store = SessionStore::new();
    store.set_identity(Some(user(1, "A", "a@x.com")));
    assert!(!store.is_initialized());
}

#[test]
fn set_initialized_round_trip() {
    let store = SessionStore::new();
    store.set_initialized(true);
    assert!(store.is_initialized());
    store.set_initialized(false);
    assert!(!store.is_initialized());
}

// =============================================================================
// subscribe
// =============================================================================

#[test]
fn subscribers_see_identity_changes_synchronously() {
    let store = SessionStore::new();
    let mut rx = store.subscribe();

    store.set_identity(Some(user(1, "A", "a@x.com")));
    assert_eq!(rx.try_recv().unwrap(), SessionEvent::IdentityChanged { logged_in: true });

    store.set_identity(None);
    assert_eq!(rx.try_recv().unwrap(), SessionEvent::IdentityChanged { logged_in: false });
}

#[test]
fn subscribers_see_initialized_changes() {
    let store = SessionStore::new();
    let mut rx = store.subscribe();
    store.set_initialized(true);
    assert_eq!(rx.try_recv().unwrap(), SessionEvent::InitializedChanged { initialized: true });
    assert!(rx.try_recv().is_err());
}

#[test]
fn mutation_without_subscribers_does_not_fail() {
    let store = SessionStore::new();
    store.set_identity(Some(user(1, "A", "a@x.com")));
    store.set_initialized(true);
    assert!(store.snapshot().is_logged_in());
}

// =============================================================================
// User serde
// =============================================================================

#[test]
fn user_deserializes_without_timestamps() {
    let json = r#"{"id":1,"name":"A","email":"a@x.com"}"#;
    let parsed: User = serde_json::from_str(json).unwrap();
    assert_eq!(parsed, user(1, "A", "a@x.com"));
}

#[test]
fn user_deserializes_with_timestamps() {
    let json = r#"{"id":7,"name":"A","email":"a@x.com","created_at":"c","updated_at":"u"}"#;
    let parsed: User = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.created_at.as_deref(), Some("c"));
    assert_eq!(parsed.updated_at.as_deref(), Some("u"));
}
